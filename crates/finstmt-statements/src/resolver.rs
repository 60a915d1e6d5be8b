//! Statement type resolution.
//!
//! [`StatementTypeResolver`] maps a presentation role label to a [`StatementKind`]
//! with a confidence score. It is a scored lookup, not a parse: unresolvable labels
//! still yield the best fuzzy candidate, and callers compare the confidence against
//! their own threshold.
//!
//! Confidence levels:
//!
//! | Outcome | Confidence |
//! |---|---|
//! | exactly one kind's patterns match | 1.0 |
//! | several kinds match; the earliest match in the label wins | 0.8 (others 0.6) |
//! | no pattern matches; keyword and bigram similarity | below 0.9 |
//!
//! Parenthetical and note roles (`Details`, `Tables`, `Policies`) keep their score
//! but are flagged [`supplementary`](Resolution::supplementary);
//! [`select_role`](StatementTypeResolver::select_role) only falls back to them when
//! no primary role of the kind qualifies.

use finstmt_core::{ResolverConfig, Result, StatementError, StatementKind};
use regex::Regex;
use tracing::debug;

use crate::patterns::{DEFAULT_PATTERNS, KEYWORDS, PatternTable, is_supplementary, normalize_label, normalized_name};

/// Confidence when exactly one kind matches.
pub const EXACT_CONFIDENCE: f64 = 1.0;
/// Confidence of the winning kind when several kinds match.
pub const CONTESTED_CONFIDENCE: f64 = 0.8;
/// Confidence of the losing kinds when several kinds match.
pub const ALTERNATIVE_CONFIDENCE: f64 = 0.6;

/// The outcome of resolving one label.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    /// Best kind.
    pub kind: StatementKind,
    /// Confidence in `kind`, 0.0 to 1.0.
    pub confidence: f64,
    /// Other candidate kinds, best first.
    pub alternatives: Vec<(StatementKind, f64)>,
    /// Parenthetical or note role rather than the statement itself.
    pub supplementary: bool,
}

/// Pattern-table statement type resolver.
#[derive(Clone, Debug)]
pub struct StatementTypeResolver {
    patterns: Vec<(StatementKind, Regex)>,
    config: ResolverConfig,
}

impl StatementTypeResolver {
    /// Creates a resolver with the default pattern table.
    pub fn new() -> Result<Self> {
        Self::with_patterns(DEFAULT_PATTERNS)
    }

    /// Creates a resolver from a custom pattern table.
    pub fn with_patterns(table: PatternTable<'_>) -> Result<Self> {
        let mut patterns = Vec::new();
        for (kind, sources) in table {
            for source in *sources {
                let regex = Regex::new(source).map_err(|e| StatementError::InvalidPattern {
                    pattern: (*source).to_string(),
                    reason: e.to_string(),
                })?;
                patterns.push((*kind, regex));
            }
        }
        Ok(Self {
            patterns,
            config: ResolverConfig::default(),
        })
    }

    /// Sets the resolver configuration.
    #[must_use]
    pub const fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolves a role URI or label.
    #[must_use]
    pub fn resolve(&self, label: &str) -> Resolution {
        let normalized = normalize_label(label);

        let mut matches: Vec<(usize, StatementKind)> = Vec::new();
        for (kind, regex) in &self.patterns {
            let Some(found) = regex.find(&normalized) else {
                continue;
            };
            match matches.iter_mut().find(|(_, k)| k == kind) {
                Some(entry) => entry.0 = entry.0.min(found.start()),
                None => matches.push((found.start(), *kind)),
            }
        }
        matches.sort();

        let supplementary = is_supplementary(&normalized);
        let resolution = match matches.as_slice() {
            [] => fuzzy(&normalized, supplementary),
            [(_, kind)] => Resolution {
                kind: *kind,
                confidence: EXACT_CONFIDENCE,
                alternatives: Vec::new(),
                supplementary,
            },
            [(_, kind), rest @ ..] => Resolution {
                kind: *kind,
                confidence: CONTESTED_CONFIDENCE,
                alternatives: rest.iter().map(|(_, k)| (*k, ALTERNATIVE_CONFIDENCE)).collect(),
                supplementary,
            },
        };

        debug!(
            label,
            kind = %resolution.kind,
            confidence = resolution.confidence,
            supplementary,
            "Resolved statement type"
        );
        resolution
    }

    /// Picks the role that best represents `kind`.
    ///
    /// Only roles resolving to `kind` with at least the configured minimum confidence
    /// qualify. Primary roles outrank supplementary ones regardless of confidence;
    /// within each group the higher confidence wins, and among equals the first role.
    pub fn select_role<'a, I>(&self, roles: I, kind: StatementKind) -> Option<(&'a str, f64)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut best: Option<(&'a str, bool, f64)> = None;
        for role in roles {
            let resolution = self.resolve(role);
            if resolution.kind != kind || resolution.confidence < self.config.min_confidence {
                continue;
            }
            let primary = !resolution.supplementary;
            let better = best.is_none_or(|(_, best_primary, best_confidence)| {
                (primary, resolution.confidence) > (best_primary, best_confidence)
            });
            if better {
                best = Some((role, primary, resolution.confidence));
            }
        }
        best.map(|(role, _, confidence)| (role, confidence))
    }
}

/// Keyword and bigram fallback. Scores stay below 0.9.
fn fuzzy(normalized: &str, supplementary: bool) -> Resolution {
    let mut scored: Vec<(StatementKind, f64)> = KEYWORDS
        .iter()
        .map(|(kind, keywords)| {
            let hits = keywords.iter().filter(|k| normalized.contains(*k)).count().min(2);
            let keyword_score = hits as f64 / 2.0;
            let similarity = bigram_similarity(normalized, &normalized_name(*kind));
            (*kind, 0.6 * keyword_score + 0.3 * similarity)
        })
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    let (kind, confidence) = scored[0];
    Resolution {
        kind,
        confidence,
        alternatives: scored.into_iter().skip(1).filter(|(_, score)| *score > 0.0).collect(),
        supplementary,
    }
}

/// Sorensen-Dice coefficient over character bigrams.
fn bigram_similarity(a: &str, b: &str) -> f64 {
    let bigrams = |s: &str| -> Vec<(char, char)> { s.chars().zip(s.chars().skip(1)).collect() };
    let left = bigrams(a);
    let mut right = bigrams(b);
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    let total = left.len() + right.len();
    let mut common = 0usize;
    for gram in &left {
        if let Some(i) = right.iter().position(|g| g == gram) {
            right.swap_remove(i);
            common += 1;
        }
    }
    2.0 * common as f64 / total as f64
}
