//! Fact store.
//!
//! Every fact ever ingested is kept, grouped by (concept, context). A filer may tag
//! the same number several times at different rounding precisions, so a canonical
//! value is chosen at read time by [`resolve`]:
//!
//! 1. highest precision wins (`INF`, then larger `decimals`, missing last);
//! 2. ties go to the earliest-ingested fact.
//!
//! This is a heuristic. It yields the most precise figure disclosed, which is not
//! guaranteed to be the figure shown in the filer's rendered table.

use std::collections::HashMap;

use finstmt_core::{Concept, Context, Fact, Period};

/// The canonical fact for a key, with what it was chosen from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedFact<'a> {
    fact: &'a Fact,
    candidates: usize,
    conflicting: bool,
}

impl<'a> ResolvedFact<'a> {
    /// The chosen fact.
    #[must_use]
    pub const fn fact(&self) -> &'a Fact {
        self.fact
    }

    /// Number of facts sharing the key.
    #[must_use]
    pub const fn candidates(&self) -> usize {
        self.candidates
    }

    /// True when another candidate reports a different value.
    #[must_use]
    pub const fn is_conflicting(&self) -> bool {
        self.conflicting
    }
}

/// Picks the canonical fact among facts sharing one key, in ingestion order.
#[must_use]
pub fn resolve(facts: &[Fact]) -> Option<ResolvedFact<'_>> {
    let (first, rest) = facts.split_first()?;
    let chosen = rest
        .iter()
        .fold(first, |best, f| if f.precision > best.precision { f } else { best });

    let conflicting = facts.iter().any(|f| match (f.value, chosen.value) {
        (Some(a), Some(b)) => a != b,
        _ => f.raw_value.trim() != chosen.raw_value.trim(),
    });

    Some(ResolvedFact {
        fact: chosen,
        candidates: facts.len(),
        conflicting,
    })
}

/// Facts of one concept, grouped by context in first-seen order.
#[derive(Clone, Debug, Default)]
struct ConceptFacts {
    groups: Vec<(Context, Vec<Fact>)>,
    index: HashMap<Context, usize>,
}

/// All facts of one filing.
#[derive(Clone, Debug, Default)]
pub struct FactStore {
    concepts: HashMap<Concept, ConceptFacts>,
    concept_order: Vec<Concept>,
    next_sequence: u64,
}

impl FactStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a fact under its resolved context. Never replaces an existing fact.
    pub fn insert(&mut self, context: Context, mut fact: Fact) {
        fact.sequence = self.next_sequence;
        self.next_sequence += 1;

        if !self.concepts.contains_key(&fact.concept) {
            self.concept_order.push(fact.concept.clone());
        }
        let entry = self.concepts.entry(fact.concept.clone()).or_default();
        match entry.index.get(&context) {
            Some(&i) => entry.groups[i].1.push(fact),
            None => {
                entry.index.insert(context.clone(), entry.groups.len());
                entry.groups.push((context, vec![fact]));
            }
        }
    }

    /// Returns the canonical fact for a key, or `None` when nothing was reported.
    #[must_use]
    pub fn get(&self, concept: &Concept, context: &Context) -> Option<ResolvedFact<'_>> {
        resolve(self.get_all(concept, context))
    }

    /// Returns every fact for a key in ingestion order.
    #[must_use]
    pub fn get_all(&self, concept: &Concept, context: &Context) -> &[Fact] {
        self.concepts
            .get(concept)
            .and_then(|c| c.index.get(context).map(|&i| c.groups[i].1.as_slice()))
            .unwrap_or(&[])
    }

    /// Resolves a concept against the undimensioned context for `period`.
    ///
    /// When several base contexts share the period (multiple entity identifiers),
    /// the first one seen is used.
    #[must_use]
    pub fn get_for_period(&self, concept: &Concept, period: &Period) -> Option<ResolvedFact<'_>> {
        let facts = self.concepts.get(concept)?;
        facts
            .groups
            .iter()
            .find(|(context, _)| context.is_base() && &context.period == period)
            .and_then(|(_, group)| resolve(group))
    }

    /// Returns the contexts a concept is reported in, in first-seen order.
    pub fn contexts_of(&self, concept: &Concept) -> impl Iterator<Item = &Context> {
        self.concepts
            .get(concept)
            .into_iter()
            .flat_map(|c| c.groups.iter().map(|(context, _)| context))
    }

    /// Returns every concept with at least one fact, in first-seen order.
    pub fn concepts(&self) -> impl Iterator<Item = &Concept> {
        self.concept_order.iter()
    }

    /// Returns the total number of facts.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.next_sequence as usize
    }

    /// Returns true when no fact has been ingested.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.next_sequence == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finstmt_core::Precision;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn revenue() -> Concept {
        Concept::new("us-gaap", "Revenues")
    }

    fn fy2024() -> Context {
        Context::base(
            "0000320193",
            Period::parse_duration("2024-01-01", "2024-12-31").unwrap(),
        )
    }

    fn fact(value: i64, precision: Precision, id: &str) -> Fact {
        Fact::new(revenue(), "c1", value.to_string())
            .with_value(Decimal::from(value))
            .with_precision(precision)
            .with_instance_id(id)
    }

    #[test]
    fn test_all_duplicates_are_retained() {
        let mut store = FactStore::new();
        store.insert(fy2024(), fact(391_000_000, Precision::Decimals(-6), "f1"));
        store.insert(fy2024(), fact(391_035_000, Precision::Decimals(-3), "f2"));
        store.insert(fy2024(), fact(391_000_000, Precision::Decimals(-6), "f3"));

        assert_eq!(store.len(), 3);
        assert_eq!(store.get_all(&revenue(), &fy2024()).len(), 3);
    }

    #[test]
    fn test_highest_precision_wins() {
        let mut store = FactStore::new();
        store.insert(fy2024(), fact(391_000_000, Precision::Decimals(-6), "f1"));
        store.insert(fy2024(), fact(391_035_123, Precision::Infinite, "f2"));
        store.insert(fy2024(), fact(391_035_000, Precision::Decimals(-3), "f3"));

        let resolved = store.get(&revenue(), &fy2024()).unwrap();
        assert_eq!(resolved.fact().instance_id, "f2");
        assert_eq!(resolved.candidates(), 3);
        assert!(resolved.is_conflicting());
    }

    #[test]
    fn test_missing_decimals_is_lowest() {
        let mut store = FactStore::new();
        store.insert(fy2024(), fact(1, Precision::Missing, "f1"));
        store.insert(fy2024(), fact(2, Precision::Decimals(-9), "f2"));

        let resolved = store.get(&revenue(), &fy2024()).unwrap();
        assert_eq!(resolved.fact().instance_id, "f2");
    }

    #[test]
    fn test_tie_goes_to_earliest() {
        let mut store = FactStore::new();
        store.insert(fy2024(), fact(100, Precision::Decimals(-6), "first"));
        store.insert(fy2024(), fact(100, Precision::Decimals(-6), "second"));

        let resolved = store.get(&revenue(), &fy2024()).unwrap();
        assert_eq!(resolved.fact().instance_id, "first");
        assert!(!resolved.is_conflicting());
    }

    #[test]
    fn test_absent_key_is_none() {
        let store = FactStore::new();
        assert!(store.get(&revenue(), &fy2024()).is_none());
        assert!(store.get_all(&revenue(), &fy2024()).is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_for_period_ignores_dimensioned_contexts() {
        let period = Period::parse_duration("2024-01-01", "2024-12-31").unwrap();
        let segment = Context::new(
            "0000320193",
            period,
            vec![finstmt_core::Dimension::new("us-gaap:SegmentAxis", "x:EuropeMember")],
        );

        let mut store = FactStore::new();
        store.insert(segment, fact(40, Precision::Infinite, "seg"));
        assert!(store.get_for_period(&revenue(), &period).is_none());

        store.insert(fy2024(), fact(100, Precision::Decimals(-6), "total"));
        let resolved = store.get_for_period(&revenue(), &period).unwrap();
        assert_eq!(resolved.fact().instance_id, "total");
        assert_eq!(store.contexts_of(&revenue()).count(), 2);
    }

    fn precision_strategy() -> impl Strategy<Value = Precision> {
        prop_oneof![
            Just(Precision::Missing),
            Just(Precision::Infinite),
            (-9i32..=4).prop_map(Precision::Decimals),
        ]
    }

    proptest! {
        #[test]
        fn prop_resolution_is_insertion_order_independent(
            precisions in proptest::collection::vec(precision_strategy(), 1..8),
            seed in any::<u64>(),
        ) {
            let facts: Vec<Fact> = precisions
                .iter()
                .enumerate()
                .map(|(i, p)| fact(i as i64, *p, &format!("f{i}")))
                .collect();

            // Deterministic shuffle driven by the seed.
            let mut shuffled = facts.clone();
            let mut state = seed;
            for i in (1..shuffled.len()).rev() {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let j = (state >> 33) as usize % (i + 1);
                shuffled.swap(i, j);
            }

            let a = resolve(&facts).unwrap().fact().clone();
            let b = resolve(&shuffled).unwrap().fact().clone();
            let best = precisions.iter().max().copied().unwrap();

            prop_assert_eq!(a.precision, best);
            prop_assert_eq!(b.precision, best);
            // Only facts tied on the best precision may differ, and then the
            // earliest one in each order is chosen.
            let tied = precisions.iter().filter(|p| **p == best).count();
            if tied == 1 {
                prop_assert_eq!(a.value, b.value);
            } else {
                let first_tied = shuffled.iter().find(|f| f.precision == best).unwrap();
                prop_assert_eq!(&b.instance_id, &first_tied.instance_id);
            }
        }
    }
}
