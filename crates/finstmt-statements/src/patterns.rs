//! Role label patterns.
//!
//! Patterns run against a normalized label: the last segment of a role URI,
//! upper-cased, with everything but ASCII letters and digits removed. So
//! `http://www.apple.com/role/CONSOLIDATEDSTATEMENTSOFOPERATIONS` and
//! `Consolidated Statements of Operations` both normalize to
//! `CONSOLIDATEDSTATEMENTSOFOPERATIONS`.

use finstmt_core::StatementKind;

/// A pattern table: regex sources per kind, in evaluation order.
pub type PatternTable<'a> = &'a [(StatementKind, &'a [&'a str])];

/// Default role patterns.
pub const DEFAULT_PATTERNS: PatternTable<'static> = &[
    (
        StatementKind::BalanceSheet,
        &[
            r"BALANCESHEETS?",
            r"STATEMENTS?OF(?:CONSOLIDATED)?FINANCIALPOSITION",
            r"STATEMENTS?OF(?:CONSOLIDATED)?FINANCIALCONDITION",
            r"STATEMENTS?OFCONDITION",
        ],
    ),
    (
        StatementKind::IncomeStatement,
        &[
            r"STATEMENTS?OF(?:CONSOLIDATED)?(?:INCOME|OPERATIONS|EARNINGS)",
            r"INCOMESTATEMENTS?",
            r"PROFITANDLOSS",
            r"RESULTSOFOPERATIONS",
        ],
    ),
    (
        StatementKind::CashFlowStatement,
        &[r"CASHFLOWS?", r"STATEMENTS?OFCASHFLOWS?"],
    ),
    (
        StatementKind::EquityStatement,
        &[
            r"(?:STOCKHOLDERS|SHAREHOLDERS|SHAREOWNERS)(?:DEFICIT|EQUITY)",
            r"CHANGESIN(?:STOCKHOLDERS|SHAREHOLDERS)?EQUITY",
            r"STATEMENTS?OF(?:CONSOLIDATED)?EQUITY",
            r"PARTNERSCAPITAL",
        ],
    ),
    (
        StatementKind::ComprehensiveIncome,
        &[r"COMPREHENSIVE(?:INCOME|LOSS|EARNINGS)"],
    ),
];

/// Fallback keywords per kind.
pub(crate) const KEYWORDS: &[(StatementKind, &[&str])] = &[
    (
        StatementKind::BalanceSheet,
        &["BALANCE", "FINANCIALPOSITION", "ASSETS", "LIABILITIES", "CONDITION"],
    ),
    (
        StatementKind::IncomeStatement,
        &["INCOME", "OPERATIONS", "EARNINGS", "REVENUE", "PROFIT"],
    ),
    (StatementKind::CashFlowStatement, &["CASH", "FLOW"]),
    (
        StatementKind::EquityStatement,
        &["EQUITY", "STOCKHOLDERS", "SHAREHOLDERS", "CAPITAL"],
    ),
    (StatementKind::ComprehensiveIncome, &["COMPREHENSIVE", "OCI"]),
];

/// Markers of parenthetical and note roles.
const SUPPLEMENTARY: &[&str] = &["PARENTHETICAL", "DETAILS", "DETAIL", "TABLES", "POLICIES"];

/// Normalizes a role URI or label for matching.
#[must_use]
pub fn normalize_label(label: &str) -> String {
    let tail = if label.contains("://") {
        label.rsplit(['/', '#']).find(|s| !s.is_empty()).unwrap_or(label)
    } else {
        label
    };
    tail.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Returns true for parenthetical and note-style roles.
#[must_use]
pub fn is_supplementary(normalized: &str) -> bool {
    SUPPLEMENTARY.iter().any(|marker| normalized.ends_with(marker))
        || normalized.contains("PARENTHETICAL")
}

/// Canonical name of a kind in normalized form.
pub(crate) fn normalized_name(kind: StatementKind) -> String {
    normalize_label(kind.canonical_name())
}
