//! Statement to DataFrame conversion.

use chrono::{Datelike, NaiveDate};
use finstmt_core::{Result, Statement, StatementError};
use polars::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

/// Line-item columns preceding the period columns.
pub const ROW_COLUMNS: [&str; 6] = ["concept", "label", "level", "is_abstract", "is_total", "unit"];

/// Converts a statement into a frame with one row per line item.
///
/// Columns are [`ROW_COLUMNS`] followed by one `f64` column per period, named by the
/// period label, most recent first. Blank cells and unknown units are null.
///
/// # Errors
///
/// [`StatementError::Export`] when polars rejects the frame, for example when two
/// periods share a label.
pub fn statement_to_frame(statement: &Statement) -> Result<DataFrame> {
    let rows = &statement.rows;
    let concepts: Vec<String> = rows.iter().map(|r| r.concept.to_string()).collect();
    let labels: Vec<&str> = rows.iter().map(|r| r.display_label.as_str()).collect();
    let levels: Vec<u32> = rows.iter().map(|r| r.level).collect();
    let abstracts: Vec<bool> = rows.iter().map(|r| r.is_abstract).collect();
    let totals: Vec<bool> = rows.iter().map(|r| r.is_total).collect();
    let units: Vec<Option<String>> = rows.iter().map(|r| r.unit.as_ref().map(ToString::to_string)).collect();

    let mut columns = vec![
        Column::new("concept".into(), concepts),
        Column::new("label".into(), labels),
        Column::new("level".into(), levels),
        Column::new("is_abstract".into(), abstracts),
        Column::new("is_total".into(), totals),
        Column::new("unit".into(), units),
    ];
    for (index, period) in statement.periods.iter().enumerate() {
        let values: Vec<Option<f64>> = rows
            .iter()
            .map(|r| r.values.get(index).copied().flatten().and_then(|v| v.to_f64()))
            .collect();
        columns.push(Column::new(period.label.as_str().into(), values));
    }

    let df = DataFrame::new(columns).map_err(|e| StatementError::Export(e.to_string()))?;
    debug!(kind = %statement.kind, shape = ?df.shape(), "Exported statement frame");
    Ok(df)
}

/// Describes a statement's period columns: label, start, end, fiscal year and period.
///
/// Instants have a null start.
///
/// # Errors
///
/// [`StatementError::Export`] when polars rejects the frame.
pub fn periods_to_frame(statement: &Statement) -> Result<DataFrame> {
    let periods = &statement.periods;
    let labels: Vec<&str> = periods.iter().map(|p| p.label.as_str()).collect();
    let starts: Vec<Option<i32>> = periods.iter().map(|p| p.period.start().map(epoch_days)).collect();
    let ends: Vec<i32> = periods.iter().map(|p| epoch_days(p.period.end())).collect();
    let years: Vec<Option<i32>> = periods.iter().map(|p| p.fiscal_year).collect();
    let focus: Vec<String> = periods.iter().map(|p| p.fiscal_period.to_string()).collect();

    let start_col = Column::new("start".into(), starts)
        .cast(&DataType::Date)
        .map_err(|e| StatementError::Export(e.to_string()))?;
    let end_col = Column::new("end".into(), ends)
        .cast(&DataType::Date)
        .map_err(|e| StatementError::Export(e.to_string()))?;

    DataFrame::new(vec![
        Column::new("label".into(), labels),
        start_col,
        end_col,
        Column::new("fiscal_year".into(), years),
        Column::new("fiscal_period".into(), focus),
    ])
    .map_err(|e| StatementError::Export(e.to_string()))
}

/// Days from 0001-01-01 to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Days since 1970-01-01, the physical form of a polars `Date`.
fn epoch_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

#[cfg(test)]
mod tests {
    use super::*;
    use finstmt_core::{Concept, Period, PeriodDescriptor, StatementKind, StatementRow, UnitKind};
    use rust_decimal::Decimal;

    fn statement() -> Statement {
        let mut fy24 = PeriodDescriptor::new(Period::parse_duration("2024-01-01", "2024-12-31").unwrap());
        fy24.label = "FY 2024".to_string();
        fy24.fiscal_year = Some(2024);
        let mut fy23 = PeriodDescriptor::new(Period::parse_duration("2023-01-01", "2023-12-31").unwrap());
        fy23.label = "FY 2023".to_string();

        let row = |name: &str, level, is_abstract, values: Vec<Option<Decimal>>| StatementRow {
            concept: Concept::new("us-gaap", name),
            display_label: name.to_string(),
            level,
            is_abstract,
            is_total: false,
            unit: (!is_abstract).then(|| UnitKind::Currency("USD".to_string())),
            values,
        };
        Statement {
            kind: StatementKind::IncomeStatement,
            periods: vec![fy24, fy23],
            rows: vec![
                row("IncomeStatementAbstract", 0, true, vec![None, None]),
                row("Revenues", 1, false, vec![Some(Decimal::new(1205, 1)), Some(Decimal::from(100))]),
                row("RestructuringCharges", 1, false, vec![Some(Decimal::from(5)), None]),
            ],
        }
    }

    #[test]
    fn test_statement_frame_layout() {
        let df = statement_to_frame(&statement()).unwrap();
        assert_eq!(df.shape(), (3, 8));
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(
            names,
            ["concept", "label", "level", "is_abstract", "is_total", "unit", "FY 2024", "FY 2023"]
        );

        let units = df.column("unit").unwrap().str().unwrap();
        assert_eq!(units.get(0), None);
        assert_eq!(units.get(1), Some("USD"));

        let fy24 = df.column("FY 2024").unwrap().f64().unwrap();
        assert_eq!(fy24.get(0), None);
        assert_eq!(fy24.get(1), Some(120.5));
        let fy23 = df.column("FY 2023").unwrap().f64().unwrap();
        assert_eq!(fy23.get(2), None);
        assert_eq!(df.column("FY 2023").unwrap().null_count(), 2);
    }

    #[test]
    fn test_duplicate_period_labels_are_an_error() {
        let mut statement = statement();
        statement.periods[1].label = "FY 2024".to_string();
        assert!(matches!(statement_to_frame(&statement), Err(StatementError::Export(_))));
    }

    #[test]
    fn test_periods_frame() {
        let df = periods_to_frame(&statement()).unwrap();
        assert_eq!(df.shape(), (2, 5));
        assert_eq!(df.column("end").unwrap().dtype(), &DataType::Date);
        let years = df.column("fiscal_year").unwrap().i32().unwrap();
        assert_eq!(years.get(0), Some(2024));
        assert_eq!(years.get(1), None);
    }

    #[test]
    fn test_empty_statement() {
        let df = statement_to_frame(&Statement::new(StatementKind::BalanceSheet)).unwrap();
        assert_eq!(df.shape(), (0, ROW_COLUMNS.len()));
    }

    #[test]
    fn test_epoch_days() {
        let day = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        assert_eq!(epoch_days(day(1970, 1, 1)), 0);
        assert_eq!(epoch_days(day(1969, 12, 31)), -1);
        assert_eq!(epoch_days(day(2024, 1, 1)), 19_723);
    }
}
