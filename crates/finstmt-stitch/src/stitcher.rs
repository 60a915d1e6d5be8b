//! Multi-filing statement stitching.

use std::collections::HashSet;

use finstmt_core::{
    Concept, Diagnostics, FilingStatement, Issue, PeriodDescriptor, Result, Statement, StatementError,
    StatementKind, StatementRow, StitchConfig, UnitKind,
};
use finstmt_periods::PeriodSelector;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::ordering::priority;
use crate::tree::{NodeId, PresentationTree};

/// The result of stitching.
#[derive(Clone, Debug, PartialEq)]
pub struct StitchedStatement {
    /// The merged statement.
    pub statement: Statement,
    /// Accession numbers of the inputs, most recent first.
    pub filings: Vec<String>,
    /// Structural drift found while merging.
    pub diagnostics: Diagnostics,
}

/// Where a merged row's label, level and flags come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Source {
    filing: usize,
    row: usize,
}

/// Merges single-filing statements of one kind into one statement.
#[derive(Clone, Debug, Default)]
pub struct StatementStitcher {
    config: StitchConfig,
    selector: PeriodSelector,
}

impl StatementStitcher {
    /// Creates a stitcher with the default period selector.
    #[must_use]
    pub fn new(config: StitchConfig) -> Self {
        Self {
            config,
            selector: PeriodSelector::default(),
        }
    }

    /// Replaces the period selector, e.g. with one built from the engine's policy.
    #[must_use]
    pub const fn with_selector(mut self, selector: PeriodSelector) -> Self {
        self.selector = selector;
        self
    }

    /// Returns the period selector.
    #[must_use]
    pub const fn selector(&self) -> &PeriodSelector {
        &self.selector
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &StitchConfig {
        &self.config
    }

    /// Stitches statements from several filings.
    ///
    /// Filings are ranked by filing date when every input has one; otherwise by
    /// document period end. Input position breaks ties (later wins). The most recent filing's structure, labels and levels
    /// are authoritative; concepts only older filings present are placed after their
    /// nearest surviving sibling. Each period column takes its values from the filing
    /// whose own reporting period ends on that date, falling back to the most recent
    /// filing that reports it.
    ///
    /// # Errors
    ///
    /// [`StatementError::NoStatements`] for empty input and
    /// [`StatementError::KindMismatch`] when the inputs are of different kinds.
    #[instrument(skip_all, fields(statements = statements.len()))]
    pub fn stitch(&self, statements: &[FilingStatement]) -> Result<StitchedStatement> {
        let Some(first) = statements.first() else {
            return Err(StatementError::NoStatements);
        };
        let kind = first.statement.kind;
        if let Some(other) = statements.iter().find(|s| s.statement.kind != kind) {
            return Err(StatementError::KindMismatch {
                expected: kind,
                found: other.statement.kind,
            });
        }

        let ordered = by_recency(statements);
        let periods = self.selector.select_across(
            ordered.iter().map(|s| s.statement.periods.as_slice()),
            kind,
            self.config.max_periods,
        );

        let mut diagnostics = Diagnostics::new();
        let mut tree = merge(&ordered, &mut diagnostics);

        let distinct: HashSet<&str> = ordered.iter().map(|s| s.filing.accession.as_str()).collect();
        if self.config.semantic_ordering && distinct.len() > 1 {
            reorder(&mut tree, kind);
        }

        let flattener = Flattener {
            tree: &tree,
            filings: &ordered,
            periods: &periods,
        };
        let mut rows = Vec::with_capacity(tree.len());
        flattener.siblings(tree.roots(), None, &mut rows);

        debug!(
            kind = %kind,
            filings = ordered.len(),
            periods = periods.len(),
            rows = rows.len(),
            drift = diagnostics.len(),
            "Stitched statement"
        );

        Ok(StitchedStatement {
            statement: Statement { kind, periods, rows },
            filings: ordered.iter().map(|s| s.filing.accession.clone()).collect(),
            diagnostics,
        })
    }
}

/// Most recent first. A filing date only ranks when all inputs carry one, so a
/// missing date never makes a filing look older than it is.
fn by_recency(statements: &[FilingStatement]) -> Vec<&FilingStatement> {
    let all_filed = statements.iter().all(|s| s.filing.filed.is_some());
    let key = |index: usize, s: &FilingStatement| {
        let document_end = s.filing.fiscal.document_period_end_date;
        if all_filed {
            (s.filing.filed, document_end, index)
        } else {
            (document_end, None, index)
        }
    };

    let mut ordered: Vec<(usize, &FilingStatement)> = statements.iter().enumerate().collect();
    ordered.sort_by(|(ia, a), (ib, b)| key(*ib, b).cmp(&key(*ia, a)));
    ordered.into_iter().map(|(_, s)| s).collect()
}

/// Unions the filings' trees by concept, most recent filing first.
fn merge(ordered: &[&FilingStatement], diagnostics: &mut Diagnostics) -> PresentationTree<Source> {
    let mut merged: PresentationTree<Source> = PresentationTree::new();

    for (index, filing) in ordered.iter().enumerate() {
        let local = PresentationTree::from_rows(&filing.statement.rows);

        for id in local.depth_first() {
            let node = local.node(id);
            let local_parent = local.parent_concept(id);

            if let Some(existing) = merged.find(&node.concept) {
                let kept = merged.node(existing);
                let kept_filing = &ordered[kept.data.filing].filing.accession;
                let moved = kept.level != node.level || merged.parent_concept(existing) != local_parent;
                if moved && kept_filing != &filing.filing.accession {
                    diagnostics.push(Issue::StructuralDrift {
                        concept: node.concept.clone(),
                        kept_filing: kept_filing.clone(),
                        kept_level: kept.level,
                        other_filing: filing.filing.accession.clone(),
                        other_level: node.level,
                    });
                }
                continue;
            }

            let parent = local_parent.and_then(|p| merged.find(p));
            let after = preceding_sibling(&local, id, &merged, parent);
            merged.insert(
                node.concept.clone(),
                node.level,
                parent,
                after,
                Source {
                    filing: index,
                    row: node.data,
                },
            );
        }
    }
    merged
}

/// Nearest earlier sibling in `local` that already sits under `parent` in `merged`.
fn preceding_sibling(
    local: &PresentationTree<usize>,
    id: NodeId,
    merged: &PresentationTree<Source>,
    parent: Option<NodeId>,
) -> Option<NodeId> {
    let siblings = match local.parent(id) {
        Some(p) => local.children(p),
        None => local.roots(),
    };
    let position = siblings.iter().position(|s| *s == id)?;
    siblings[..position]
        .iter()
        .rev()
        .filter_map(|s| merged.find(&local.node(*s).concept))
        .find(|m| merged.parent(*m) == parent)
}

/// Sorts every sibling group by canonical priority. Nodes never change parent.
fn reorder(tree: &mut PresentationTree<Source>, kind: StatementKind) {
    tree.sort_siblings_by_key(None, |n| priority(kind, &n.concept));
    for id in 0..tree.len() {
        tree.sort_siblings_by_key(Some(id), |n| priority(kind, &n.concept));
    }
}

struct Flattener<'a> {
    tree: &'a PresentationTree<Source>,
    filings: &'a [&'a FilingStatement],
    periods: &'a [PeriodDescriptor],
}

impl Flattener<'_> {
    fn siblings(&self, ids: &[NodeId], parent_level: Option<u32>, out: &mut Vec<StatementRow>) {
        let mut ceiling = None;
        for id in ids {
            if let Some(level) = self.node(*id, parent_level, ceiling, out) {
                ceiling = Some(level);
            }
        }
    }

    /// Emits a node and its subtree; returns the level used, or `None` when the
    /// subtree had nothing to show.
    ///
    /// Levels are at least one deeper than the parent and never deeper than the
    /// previous sibling, so the output's levels rebuild the same tree.
    fn node(
        &self,
        id: NodeId,
        parent_level: Option<u32>,
        ceiling: Option<u32>,
        out: &mut Vec<StatementRow>,
    ) -> Option<u32> {
        let node = self.tree.node(id);
        let source = &self.filings[node.data.filing].statement.rows[node.data.row];

        let mut level = parent_level.map_or(source.level, |p| source.level.max(p + 1));
        if let Some(ceiling) = ceiling {
            level = level.min(ceiling);
        }

        let (values, unit) = if source.is_abstract {
            (vec![None; self.periods.len()], None)
        } else {
            let values = self.periods.iter().map(|p| self.value(&node.concept, p)).collect();
            (values, self.unit(&node.concept, source))
        };

        let start = out.len();
        out.push(StatementRow {
            concept: node.concept.clone(),
            display_label: source.display_label.clone(),
            level,
            is_abstract: source.is_abstract,
            is_total: source.is_total,
            unit,
            values,
        });
        self.siblings(self.tree.children(id), Some(level), out);

        if !source.is_abstract && out.len() == start + 1 && !out[start].has_values() {
            out.pop();
            return None;
        }
        Some(level)
    }

    /// The authoritative row's unit, else the most recent filing's that has one.
    fn unit(&self, concept: &Concept, source: &StatementRow) -> Option<UnitKind> {
        source.unit.clone().or_else(|| {
            self.filings
                .iter()
                .find_map(|f| f.statement.row(concept).and_then(|r| r.unit.clone()))
        })
    }

    fn value(&self, concept: &Concept, column: &PeriodDescriptor) -> Option<Decimal> {
        let mut fallback = None;
        for filing in self.filings {
            let Some(value) = reported(filing, concept, column) else {
                continue;
            };
            if filing.filing.fiscal.document_period_end_date == Some(column.period.end()) {
                return Some(value);
            }
            if fallback.is_none() {
                fallback = Some(value);
            }
        }
        fallback
    }
}

/// A filing's value for a concept in the column ending on the same date with the same bucket.
fn reported(filing: &FilingStatement, concept: &Concept, column: &PeriodDescriptor) -> Option<Decimal> {
    let index = filing.statement.periods.iter().position(|p| {
        p.period.period_type() == column.period.period_type()
            && p.period.end() == column.period.end()
            && p.bucket == column.bucket
    })?;
    filing.statement.row(concept)?.values.get(index).copied().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use finstmt_core::{DurationBucket, FilingInfo, FiscalMetadata, FiscalPeriod, IssueKind, Period};
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn annual(year: i32) -> PeriodDescriptor {
        PeriodDescriptor {
            period: Period::Duration {
                start: date(year, 1, 1),
                end: date(year, 12, 31),
            },
            label: format!("FY {year}"),
            fiscal_year: Some(year),
            fiscal_period: FiscalPeriod::FY,
            bucket: Some(DurationBucket::Annual),
        }
    }

    fn concept(name: &str) -> Concept {
        Concept::new("us-gaap", name)
    }

    fn row(name: &str, level: u32, values: &[Option<i64>]) -> StatementRow {
        StatementRow {
            concept: concept(name),
            display_label: name.to_string(),
            level,
            is_abstract: false,
            is_total: false,
            unit: None,
            values: values.iter().map(|v| v.map(Decimal::from)).collect(),
        }
    }

    /// A 10-K for `year` with the current and prior fiscal year as columns.
    fn annual_report(accession: &str, year: i32, rows: Vec<StatementRow>) -> FilingStatement {
        let info = FilingInfo::new(accession)
            .with_filed(date(year + 1, 2, 1))
            .with_fiscal(FiscalMetadata {
                document_period_end_date: Some(date(year, 12, 31)),
                fiscal_period_focus: FiscalPeriod::FY,
                fiscal_year_focus: Some(year),
                ..Default::default()
            });
        FilingStatement::new(
            info,
            Statement {
                kind: StatementKind::IncomeStatement,
                periods: vec![annual(year), annual(year - 1)],
                rows,
            },
        )
    }

    fn names(statement: &Statement) -> Vec<&str> {
        statement.rows.iter().map(|r| r.concept.name()).collect()
    }

    fn filing_a() -> FilingStatement {
        annual_report(
            "A",
            2023,
            vec![
                row("Revenues", 1, &[Some(100), Some(90)]),
                row("OperatingExpenses", 1, &[Some(40), Some(35)]),
            ],
        )
    }

    fn filing_b() -> FilingStatement {
        annual_report(
            "B",
            2024,
            vec![
                row("Revenues", 1, &[Some(120), Some(99)]),
                row("OperatingExpenses", 1, &[Some(50), Some(40)]),
                row("ResearchAndDevelopmentExpense", 2, &[Some(25), Some(20)]),
                row("SellingGeneralAndAdministrativeExpense", 2, &[Some(20), Some(15)]),
                row("RestructuringCharges", 2, &[Some(5), None]),
            ],
        )
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let err = StatementStitcher::default().stitch(&[]).unwrap_err();
        assert!(matches!(err, StatementError::NoStatements));
    }

    #[test]
    fn test_mixed_kinds_are_an_error() {
        let mut balance = filing_b();
        balance.statement.kind = StatementKind::BalanceSheet;
        let err = StatementStitcher::default().stitch(&[filing_a(), balance]).unwrap_err();
        assert!(matches!(
            err,
            StatementError::KindMismatch {
                expected: StatementKind::IncomeStatement,
                found: StatementKind::BalanceSheet
            }
        ));
    }

    #[test]
    fn test_two_annual_reports() {
        let stitcher = StatementStitcher::new(StitchConfig::default().with_max_periods(2));
        let stitched = stitcher.stitch(&[filing_a(), filing_b()]).unwrap();
        let statement = &stitched.statement;

        assert_eq!(stitched.filings, ["B", "A"]);
        let labels: Vec<&str> = statement.periods.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["FY 2024", "FY 2023"]);

        assert_eq!(
            names(statement),
            [
                "Revenues",
                "OperatingExpenses",
                "ResearchAndDevelopmentExpense",
                "SellingGeneralAndAdministrativeExpense",
                "RestructuringCharges"
            ]
        );
        let levels: Vec<u32> = statement.rows.iter().map(|r| r.level).collect();
        assert_eq!(levels, [1, 1, 2, 2, 2]);

        let fy24 = annual(2024).period;
        let fy23 = annual(2023).period;
        assert_eq!(statement.value(&concept("Revenues"), &fy24), Some(Decimal::from(120)));
        // The FY2023 10-K reports FY2023 as its own period and wins over B's comparative.
        assert_eq!(statement.value(&concept("Revenues"), &fy23), Some(Decimal::from(100)));
        assert_eq!(statement.value(&concept("ResearchAndDevelopmentExpense"), &fy23), Some(Decimal::from(20)));
        assert_eq!(statement.value(&concept("RestructuringCharges"), &fy23), None);
        assert!(stitched.diagnostics.is_empty());
    }

    #[test]
    fn test_missing_filed_date_falls_back_to_document_period() {
        let mut b = annual_report(
            "B",
            2024,
            vec![row("Revenues", 0, &[Some(120), Some(100)])],
        );
        b.filing.filed = None;
        b.statement.rows[0].display_label = "Net sales (2024 label)".to_string();
        let mut a = annual_report("A", 2023, vec![row("Revenues", 2, &[Some(100), Some(90)])]);
        a.statement.rows[0].display_label = "Revenue (2023 label)".to_string();

        for input in [[a.clone(), b.clone()], [b.clone(), a.clone()]] {
            let stitched = StatementStitcher::default().stitch(&input).unwrap();
            assert_eq!(stitched.filings, ["B", "A"]);
            let revenue = &stitched.statement.rows[0];
            assert_eq!(revenue.display_label, "Net sales (2024 label)");
            assert_eq!(revenue.level, 0);
        }
    }

    #[test]
    fn test_filed_date_ranks_when_all_inputs_have_one() {
        // An amendment to the FY2023 report, filed after the FY2024 report.
        let mut amended = annual_report("A2", 2023, vec![row("Revenues", 1, &[Some(101), Some(90)])]);
        amended.filing.filed = Some(date(2025, 6, 1));
        let stitched = StatementStitcher::default()
            .stitch(&[amended, filing_b()])
            .unwrap();
        assert_eq!(stitched.filings, ["A2", "B"]);
    }

    #[test]
    fn test_unit_falls_back_to_older_filing() {
        let usd = UnitKind::Currency("USD".to_string());
        let mut a = filing_a();
        a.statement.rows[0].unit = Some(usd.clone());
        a.statement.rows[1].unit = Some(UnitKind::Currency("EUR".to_string()));
        let mut b = filing_b();
        b.statement.rows[1].unit = Some(usd.clone());

        let stitched = StatementStitcher::default().stitch(&[a, b]).unwrap();
        let units: Vec<Option<UnitKind>> = stitched.statement.rows.iter().map(|r| r.unit.clone()).collect();
        assert_eq!(units[0], Some(usd.clone()));
        // The most recent filing's unit wins.
        assert_eq!(units[1], Some(usd));
        assert_eq!(units[2], None);
    }

    #[test]
    fn test_period_cap_keeps_most_recent() {
        let stitched = StatementStitcher::default().stitch(&[filing_a(), filing_b()]).unwrap();
        let labels: Vec<&str> = stitched.statement.periods.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["FY 2024", "FY 2023", "FY 2022"]);
        let fy22 = annual(2022).period;
        assert_eq!(stitched.statement.value(&concept("Revenues"), &fy22), Some(Decimal::from(90)));
    }

    #[test]
    fn test_semantic_ordering_moves_siblings_only() {
        let b = annual_report(
            "B",
            2024,
            vec![
                row("OperatingExpenses", 0, &[Some(50), None]),
                row("SellingGeneralAndAdministrativeExpense", 1, &[Some(20), None]),
                row("ResearchAndDevelopmentExpense", 1, &[Some(25), None]),
                row("Revenues", 0, &[Some(120), None]),
            ],
        );
        let a = annual_report("A", 2023, vec![row("Revenues", 0, &[Some(100), None])]);

        let stitched = StatementStitcher::default().stitch(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(
            names(&stitched.statement),
            [
                "Revenues",
                "OperatingExpenses",
                "SellingGeneralAndAdministrativeExpense",
                "ResearchAndDevelopmentExpense"
            ]
        );

        let unordered = StatementStitcher::new(StitchConfig::default().with_semantic_ordering(false))
            .stitch(&[a, b.clone()])
            .unwrap();
        assert_eq!(names(&unordered.statement)[0], "OperatingExpenses");

        // One filing is never reordered.
        let single = StatementStitcher::default().stitch(&[b.clone()]).unwrap();
        assert_eq!(single.statement, b.statement);
    }

    #[test]
    fn test_older_only_concept_follows_its_sibling() {
        let a = annual_report(
            "A",
            2023,
            vec![
                row("Revenues", 1, &[Some(100), None]),
                row("LegacyFees", 1, &[Some(7), None]),
                row("OperatingExpenses", 1, &[Some(40), None]),
            ],
        );
        let b = annual_report(
            "B",
            2024,
            vec![
                row("Revenues", 1, &[Some(120), Some(100)]),
                row("OperatingExpenses", 1, &[Some(50), Some(40)]),
            ],
        );
        let stitcher = StatementStitcher::new(StitchConfig::default().with_semantic_ordering(false));
        let stitched = stitcher.stitch(&[b, a]).unwrap();
        assert_eq!(names(&stitched.statement), ["Revenues", "LegacyFees", "OperatingExpenses"]);
        let fy24 = annual(2024).period;
        assert_eq!(stitched.statement.value(&concept("LegacyFees"), &fy24), None);
    }

    #[test]
    fn test_structural_drift_keeps_latest_position() {
        let a = annual_report(
            "A",
            2023,
            vec![
                row("OperatingExpenses", 1, &[Some(40), None]),
                row("ResearchAndDevelopmentExpense", 1, &[Some(20), None]),
                row("LegacyDetail", 2, &[Some(3), None]),
            ],
        );
        let b = annual_report(
            "B",
            2024,
            vec![
                row("OperatingExpenses", 2, &[Some(50), None]),
                row("ResearchAndDevelopmentExpense", 3, &[Some(25), None]),
            ],
        );
        let stitched = StatementStitcher::default().stitch(&[a, b]).unwrap();

        let drift: Vec<&Issue> = stitched.diagnostics.of_kind(IssueKind::StructuralDrift).collect();
        assert_eq!(drift.len(), 2);
        assert!(drift.iter().any(|issue| matches!(
            issue,
            Issue::StructuralDrift { concept, kept_filing, kept_level: 3, other_filing, other_level: 1 }
                if concept.name() == "ResearchAndDevelopmentExpense" && kept_filing == "B" && other_filing == "A"
        )));

        let levels: Vec<(&str, u32)> = stitched
            .statement
            .rows
            .iter()
            .map(|r| (r.concept.name(), r.level))
            .collect();
        // LegacyDetail sat at level 2 under a level-1 parent; its parent is now level 3.
        assert_eq!(
            levels,
            [("OperatingExpenses", 2), ("ResearchAndDevelopmentExpense", 3), ("LegacyDetail", 4)]
        );
    }

    #[test]
    fn test_empty_subtree_is_dropped_but_abstract_kept() {
        let mut header = row("OperatingExpensesAbstract", 0, &[None, None]);
        header.is_abstract = true;
        let b = annual_report(
            "B",
            2024,
            vec![header, row("Revenues", 1, &[Some(1), None])],
        );
        let a = annual_report("A", 2021, vec![row("Discontinued", 0, &[Some(5), None])]);
        let stitcher = StatementStitcher::new(StitchConfig::default().with_max_periods(2));
        let stitched = stitcher.stitch(&[a, b]).unwrap();
        // FY2021 is beyond the two-period cap, so Discontinued has nothing to show.
        assert_eq!(names(&stitched.statement), ["OperatingExpensesAbstract", "Revenues"]);
    }

    #[test]
    fn test_stitching_is_idempotent() {
        let stitcher = StatementStitcher::new(StitchConfig::default().with_max_periods(2));
        let first = stitcher.stitch(&[filing_a(), filing_b()]).unwrap();

        let again = FilingStatement::new(filing_b().filing, first.statement.clone());
        let second = stitcher.stitch(&[again]).unwrap();
        assert_eq!(second.statement, first.statement);

        let twice = stitcher.stitch(&[filing_b(), filing_b()]).unwrap();
        assert_eq!(twice.statement, filing_b().statement);
        assert!(twice.diagnostics.is_empty());
    }

    const POOL: [&str; 8] = [
        "Revenues",
        "CostOfRevenue",
        "GrossProfit",
        "OperatingExpenses",
        "NetIncomeLoss",
        "CustomA",
        "CustomB",
        "CustomC",
    ];

    fn rows_strategy() -> impl Strategy<Value = Vec<StatementRow>> {
        prop::collection::vec((0..POOL.len(), 0u32..4, any::<bool>()), 1..10).prop_map(|raw| {
            let mut seen = HashSet::new();
            raw.into_iter()
                .filter(|(index, _, _)| seen.insert(*index))
                .map(|(index, level, is_abstract)| StatementRow {
                    concept: concept(POOL[index]),
                    display_label: POOL[index].to_string(),
                    level,
                    is_abstract,
                    is_total: false,
                    unit: None,
                    values: vec![if is_abstract { None } else { Some(Decimal::ONE) }],
                })
                .collect()
        })
    }

    fn single_year(accession: &str, year: i32, rows: Vec<StatementRow>) -> FilingStatement {
        let mut filing = annual_report(accession, year, rows);
        filing.statement.periods.truncate(1);
        filing
    }

    /// Parent of every row: the nearest earlier row with a lower level.
    fn parents(rows: &[StatementRow]) -> HashMap<Concept, Option<Concept>> {
        rows.iter()
            .enumerate()
            .map(|(i, r)| {
                let parent = rows[..i].iter().rev().find(|p| p.level < r.level);
                (r.concept.clone(), parent.map(|p| p.concept.clone()))
            })
            .collect()
    }

    proptest! {
        #[test]
        fn prop_hierarchy_is_preserved(
            filings in prop::collection::vec(rows_strategy(), 1..4),
        ) {
            let statements: Vec<FilingStatement> = filings
                .iter()
                .enumerate()
                .map(|(i, rows)| single_year(&format!("F{i}"), 2020 + i as i32, rows.clone()))
                .collect();
            let stitched = StatementStitcher::default().stitch(&statements).unwrap();
            let output = parents(&stitched.statement.rows);

            let mut expected: HashMap<Concept, Option<Concept>> = HashMap::new();
            // Inputs are oldest first; the most recent filing containing a concept decides.
            for statement in &statements {
                expected.extend(parents(&statement.statement.rows));
            }
            prop_assert_eq!(output, expected);
        }

        #[test]
        fn prop_single_filing_is_unchanged(rows in rows_strategy()) {
            let filing = single_year("F", 2024, rows);
            let stitched = StatementStitcher::default().stitch(&[filing.clone()]).unwrap();
            prop_assert_eq!(stitched.statement, filing.statement);
        }
    }
}
