//! Filing ingestion.
//!
//! [`Filing::from_bundle`] turns one [`FilingBundle`] into typed, immutable data.
//! It never fails: every record that cannot be interpreted is skipped and recorded
//! as a [`Issue::Malformed`] in the filing's diagnostics.

use std::collections::HashMap;
use std::str::FromStr;

use finstmt_core::{
    Concept, Context, Diagnostics, Fact, FilingBundle, FilingInfo, FiscalMetadata, FiscalPeriod,
    FiscalYearEnd, Issue, PeriodPolicy, Precision, RawDecimals, RawFact, RawFilingMetadata,
    RawPresentation, Record, Result, Unit, UnitKind, types::parse_date,
};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::context::ContextModel;
use crate::store::FactStore;

/// One presentation row with a typed concept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresentationRow {
    /// Concept presented.
    pub concept: Concept,
    /// Label as disclosed.
    pub display_label: String,
    /// Indentation level.
    pub level: u32,
    /// Structural header.
    pub is_abstract: bool,
    /// Total line.
    pub is_total: bool,
}

/// A presentation role and its rows in disclosed order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Presentation {
    /// Role URI or definition.
    pub role: String,
    /// Rows.
    pub rows: Vec<PresentationRow>,
}

/// One ingested filing.
#[derive(Clone, Debug)]
pub struct Filing {
    info: FilingInfo,
    contexts: ContextModel,
    facts: FactStore,
    units: HashMap<String, Unit>,
    presentations: Vec<Presentation>,
    diagnostics: Diagnostics,
}

impl Filing {
    /// Ingests a bundle, skipping malformed records.
    #[instrument(skip_all, fields(filing = %bundle.accession))]
    pub fn from_bundle(bundle: FilingBundle, policy: &PeriodPolicy) -> Self {
        let mut diagnostics = Diagnostics::new();
        let accession = bundle.accession;

        let metadata = bundle.metadata.into_result().unwrap_or_else(|rejected| {
            diagnostics.push(Issue::malformed(
                accession.as_str(),
                None,
                None,
                format!("unreadable metadata: {}", rejected.reason),
            ));
            RawFilingMetadata::default()
        });
        let info = filing_info(&accession, &metadata, &mut diagnostics);

        let raw_contexts = accept(bundle.contexts, "context", &accession, &mut diagnostics);
        let contexts = ContextModel::from_raw(
            &raw_contexts,
            &info.fiscal,
            policy,
            &accession,
            &mut diagnostics,
        );

        let units: HashMap<String, Unit> = accept(bundle.units, "unit", &accession, &mut diagnostics)
            .into_iter()
            .map(|u| {
                let kind = UnitKind::from_measures(&u.measure, u.denominator.as_deref());
                (u.unit_id.clone(), Unit::new(u.unit_id, kind))
            })
            .collect();

        let mut facts = FactStore::new();
        for raw in accept(bundle.facts, "fact", &accession, &mut diagnostics) {
            match ingest_fact(&raw, &accession, &contexts) {
                Ok((context, fact)) => facts.insert(context, fact),
                Err(reason) => diagnostics.push(Issue::malformed(
                    accession.as_str(),
                    Some(raw.concept_id.as_str()),
                    Some(raw.context_id.as_str()),
                    reason,
                )),
            }
        }

        let presentations = accept(bundle.presentations, "presentation", &accession, &mut diagnostics)
            .into_iter()
            .map(|p| presentation(p, &accession, &mut diagnostics))
            .collect();

        debug!(
            facts = facts.len(),
            contexts = contexts.len(),
            units = units.len(),
            issues = diagnostics.len(),
            "Ingested filing"
        );

        Self {
            info,
            contexts,
            facts,
            units,
            presentations,
            diagnostics,
        }
    }

    /// Parses a bundle from JSON and ingests it.
    pub fn from_json(json: &str, policy: &PeriodPolicy) -> Result<Self> {
        Ok(Self::from_bundle(FilingBundle::from_json(json)?, policy))
    }

    /// Filing identity and fiscal metadata.
    #[must_use]
    pub const fn info(&self) -> &FilingInfo {
        &self.info
    }

    /// Accession number.
    #[must_use]
    pub fn accession(&self) -> &str {
        &self.info.accession
    }

    /// Disclosed fiscal metadata.
    #[must_use]
    pub const fn fiscal(&self) -> &FiscalMetadata {
        &self.info.fiscal
    }

    /// Context model.
    #[must_use]
    pub const fn contexts(&self) -> &ContextModel {
        &self.contexts
    }

    /// Fact store.
    #[must_use]
    pub const fn facts(&self) -> &FactStore {
        &self.facts
    }

    /// Looks up a unit by id.
    #[must_use]
    pub fn unit(&self, id: &str) -> Option<&Unit> {
        self.units.get(id)
    }

    /// Presentation roles in disclosed order.
    #[must_use]
    pub fn presentations(&self) -> &[Presentation] {
        &self.presentations
    }

    /// Looks up a presentation role by its exact name.
    #[must_use]
    pub fn presentation(&self, role: &str) -> Option<&Presentation> {
        self.presentations.iter().find(|p| p.role == role)
    }

    /// Issues raised during ingestion.
    #[must_use]
    pub const fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

/// Keeps the records that were read and reports the rest.
fn accept<T>(records: Vec<Record<T>>, what: &str, accession: &str, diagnostics: &mut Diagnostics) -> Vec<T> {
    records
        .into_iter()
        .filter_map(|record| match record.into_result() {
            Ok(record) => Some(record),
            Err(rejected) => {
                diagnostics.push(Issue::malformed(
                    accession,
                    rejected.field("concept_id"),
                    rejected.field("context_id"),
                    format!("unreadable {what}: {}", rejected.reason),
                ));
                None
            }
        })
        .collect()
}

fn filing_info(accession: &str, raw: &RawFilingMetadata, diagnostics: &mut Diagnostics) -> FilingInfo {
    let mut malformed = |reason: String| {
        diagnostics.push(Issue::malformed(accession, None, None, reason));
    };

    let document_period_end_date = match raw.document_period_end_date.as_deref() {
        Some(text) => parse_date(text)
            .map_err(|e| malformed(format!("document period end date: {e}")))
            .ok(),
        None => {
            malformed("missing document period end date".to_string());
            None
        }
    };

    let fiscal_year_end = match (raw.fiscal_year_end_month, raw.fiscal_year_end_day) {
        (Some(month), Some(day)) => FiscalYearEnd::new(month, day)
            .map_err(|e| malformed(format!("fiscal year end: {e}")))
            .ok(),
        _ => {
            malformed("missing fiscal year end".to_string());
            None
        }
    };

    let fiscal_period_focus = match raw.fiscal_period_focus.as_deref() {
        Some(text) => FiscalPeriod::from_str(text)
            .map_err(|e| malformed(format!("fiscal period focus: {e}")))
            .unwrap_or_default(),
        None => FiscalPeriod::Unknown,
    };

    let filed = raw
        .filed
        .as_deref()
        .and_then(|text| parse_date(text).map_err(|e| malformed(format!("filed date: {e}"))).ok());

    FilingInfo {
        accession: accession.to_string(),
        filed,
        entity_name: raw.entity_name.clone(),
        fiscal: FiscalMetadata {
            document_period_end_date,
            fiscal_year_end,
            fiscal_period_focus,
            fiscal_year_focus: raw.fiscal_year_focus,
        },
    }
}

/// Interprets one raw fact; the error is the skip reason.
fn ingest_fact(
    raw: &RawFact,
    accession: &str,
    contexts: &ContextModel,
) -> std::result::Result<(Context, Fact), String> {
    let concept = Concept::from_str(&raw.concept_id).map_err(|e| e.to_string())?;
    let entry = contexts
        .get(&raw.context_id)
        .ok_or_else(|| "unknown context".to_string())?;

    let precision = match &raw.decimals {
        None => Precision::Missing,
        Some(RawDecimals::Int(d)) => Precision::Decimals(*d),
        Some(RawDecimals::Text(text)) => Precision::from_str(text).map_err(|e| e.to_string())?,
    };

    let value = match (raw.numeric_value, &raw.unit_id) {
        (Some(value), _) => Some(value),
        (None, Some(_)) => parse_numeric(&raw.raw_value)?,
        (None, None) => None,
    };

    let mut fact = Fact::new(concept, raw.context_id.as_str(), raw.raw_value.as_str())
        .with_precision(precision)
        .with_instance_id(raw.instance_id.as_str())
        .with_filing(accession);
    if let Some(unit) = &raw.unit_id {
        fact = fact.with_unit(unit.as_str());
    }
    if let Some(value) = value {
        fact = fact.with_value(value);
    }
    Ok((entry.context.clone(), fact))
}

/// Parses a numeric text value. Empty text is a nil fact.
fn parse_numeric(text: &str) -> std::result::Result<Option<Decimal>, String> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map(Some)
        .map_err(|e| format!("unparseable numeric value {text:?}: {e}"))
}

fn presentation(raw: RawPresentation, accession: &str, diagnostics: &mut Diagnostics) -> Presentation {
    let raw_rows = accept(raw.rows, "presentation row", accession, diagnostics);
    let mut rows = Vec::with_capacity(raw_rows.len());
    for row in raw_rows {
        let concept = match Concept::from_str(&row.concept_id) {
            Ok(concept) => concept,
            Err(e) => {
                diagnostics.push(Issue::malformed(
                    accession,
                    Some(row.concept_id.as_str()),
                    None,
                    e.to_string(),
                ));
                continue;
            }
        };
        let Ok(level) = u32::try_from(row.level) else {
            diagnostics.push(Issue::malformed(
                accession,
                Some(row.concept_id.as_str()),
                None,
                format!("negative presentation level {} in {}", row.level, raw.role),
            ));
            continue;
        };
        rows.push(PresentationRow {
            concept,
            display_label: row.display_label,
            level,
            is_abstract: row.is_abstract,
            is_total: row.is_total,
        });
    }
    Presentation { role: raw.role, rows }
}
