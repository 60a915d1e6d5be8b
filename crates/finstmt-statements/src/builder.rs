//! Single-filing statement building.

use std::collections::HashSet;

use finstmt_core::{
    BuilderConfig, Diagnostics, FilingStatement, Issue, PeriodDescriptor, Statement, StatementKind,
    StatementRow, UnitKind,
};
use finstmt_facts::{Filing, PeriodInfo, Presentation, PresentationRow};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

/// Builds one filing's statement from a presentation role and selected periods.
#[derive(Clone, Copy, Debug, Default)]
pub struct StatementBuilder {
    config: BuilderConfig,
}

impl StatementBuilder {
    /// Creates a builder.
    #[must_use]
    pub const fn new(config: BuilderConfig) -> Self {
        Self { config }
    }

    /// Builds the statement.
    ///
    /// Rows keep the filer's order and levels. A concept presented twice keeps its
    /// first position. Rows without a value in any selected period are dropped
    /// unless abstract. Conflicting duplicate facts are resolved by precision and
    /// recorded in `diagnostics`.
    #[instrument(skip_all, fields(filing = %filing.accession(), kind = %kind, role = %presentation.role))]
    pub fn build(
        &self,
        filing: &Filing,
        presentation: &Presentation,
        kind: StatementKind,
        periods: &[PeriodInfo],
        diagnostics: &mut Diagnostics,
    ) -> FilingStatement {
        let mut columns: Vec<PeriodDescriptor> = periods.iter().map(PeriodInfo::descriptor).collect();
        let mut seen = HashSet::new();
        let mut rows = Vec::with_capacity(presentation.rows.len());

        for row in &presentation.rows {
            if !seen.insert(&row.concept) {
                debug!(concept = %row.concept, "Skipping repeated presentation row");
                continue;
            }
            let (values, unit) = if row.is_abstract {
                (vec![None; columns.len()], None)
            } else {
                resolve_values(filing, row, &columns, diagnostics)
            };
            let row = StatementRow {
                concept: row.concept.clone(),
                display_label: row.display_label.clone(),
                level: row.level,
                is_abstract: row.is_abstract,
                is_total: row.is_total,
                unit,
                values,
            };
            if row.is_abstract || row.has_values() {
                rows.push(row);
            }
        }

        if self.config.drop_empty_periods {
            drop_empty_columns(&mut columns, &mut rows);
        }

        debug!(rows = rows.len(), periods = columns.len(), "Built statement");
        FilingStatement::new(
            filing.info().clone(),
            Statement {
                kind,
                periods: columns,
                rows,
            },
        )
    }
}

/// The row's value per column, and the unit of the first value with a declared unit.
fn resolve_values(
    filing: &Filing,
    row: &PresentationRow,
    columns: &[PeriodDescriptor],
    diagnostics: &mut Diagnostics,
) -> (Vec<Option<Decimal>>, Option<UnitKind>) {
    let mut unit = None;
    let values = columns
        .iter()
        .map(|column| {
            let resolved = filing.facts().get_for_period(&row.concept, &column.period)?;
            if resolved.is_conflicting() {
                diagnostics.push(Issue::Ambiguity {
                    filing: filing.accession().to_string(),
                    concept: row.concept.clone(),
                    context: resolved.fact().context_id.clone(),
                    candidates: resolved.candidates(),
                    chosen: resolved.fact().instance_id.clone(),
                });
            }
            let fact = resolved.fact();
            if unit.is_none() && fact.value.is_some() {
                unit = fact
                    .unit
                    .as_deref()
                    .and_then(|id| filing.unit(id))
                    .map(|u| u.kind.clone());
            }
            fact.value
        })
        .collect();
    (values, unit)
}

fn drop_empty_columns(columns: &mut Vec<PeriodDescriptor>, rows: &mut [StatementRow]) {
    let keep: Vec<bool> = (0..columns.len())
        .map(|i| rows.iter().any(|r| r.values.get(i).copied().flatten().is_some()))
        .collect();
    if keep.iter().all(|k| *k) {
        return;
    }

    let mut index = 0;
    columns.retain(|_| {
        index += 1;
        keep[index - 1]
    });
    for row in rows {
        let mut index = 0;
        row.values.retain(|_| {
            index += 1;
            keep[index - 1]
        });
    }
}
