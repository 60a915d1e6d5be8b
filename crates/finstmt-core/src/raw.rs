//! Raw records accepted from an upstream XBRL parser.
//!
//! These mirror the parser's output one to one and are deliberately loose:
//! dates and identifiers stay as strings, and every list entry is read as a
//! [`Record`], so that a single malformed record can be reported and skipped at
//! ingestion instead of failing the whole filing.

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::Result;

/// A record that did not match its expected shape, kept as the JSON it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Rejected {
    /// The record as received.
    pub value: Value,
    /// Why it could not be read.
    pub reason: String,
}

impl Rejected {
    /// Returns a top-level string field of the rejected record, if present.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.value.get(name).and_then(Value::as_str)
    }
}

/// One entry of a raw record list: either read into `T` or rejected.
///
/// Deserializing a `Record` never fails once the input is valid JSON.
#[derive(Clone, Debug, PartialEq)]
pub enum Record<T> {
    /// Read successfully.
    Valid(T),
    /// Shape did not match.
    Invalid(Rejected),
}

impl<T> Record<T> {
    /// Returns the record if it was read.
    #[must_use]
    pub const fn valid(&self) -> Option<&T> {
        match self {
            Self::Valid(record) => Some(record),
            Self::Invalid(_) => None,
        }
    }

    /// Converts into the read record or the rejection.
    pub fn into_result(self) -> std::result::Result<T, Rejected> {
        match self {
            Self::Valid(record) => Ok(record),
            Self::Invalid(rejected) => Err(rejected),
        }
    }
}

impl<T> From<T> for Record<T> {
    fn from(record: T) -> Self {
        Self::Valid(record)
    }
}

impl<T: Default> Default for Record<T> {
    fn default() -> Self {
        Self::Valid(T::default())
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Record<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let parsed = T::deserialize(&value);
        Ok(match parsed {
            Ok(record) => Self::Valid(record),
            Err(e) => Self::Invalid(Rejected {
                reason: e.to_string(),
                value,
            }),
        })
    }
}

impl<T: Serialize> Serialize for Record<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Valid(record) => record.serialize(serializer),
            Self::Invalid(rejected) => rejected.value.serialize(serializer),
        }
    }
}

/// A raw fact record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawFact {
    /// Concept identifier (`us-gaap:Revenues`).
    pub concept_id: String,
    /// Context reference.
    pub context_id: String,
    /// Unit reference for numeric facts.
    #[serde(default)]
    pub unit_id: Option<String>,
    /// Value text as reported.
    #[serde(default)]
    pub raw_value: String,
    /// Parsed numeric value.
    #[serde(default)]
    pub numeric_value: Option<Decimal>,
    /// `decimals` attribute.
    #[serde(default)]
    pub decimals: Option<RawDecimals>,
    /// Fact `id` attribute.
    #[serde(default)]
    pub instance_id: String,
}

/// A `decimals` attribute: an integer or text (`"INF"`, `"-6"`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDecimals {
    /// Integer form.
    Int(i32),
    /// Text form.
    Text(String),
}

/// A raw period: `{"instant": "..."}` or `{"duration": {"start": "...", "end": "..."}}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawPeriod {
    /// Point in time.
    Instant(String),
    /// Date range.
    Duration {
        /// First day.
        start: String,
        /// Last day.
        end: String,
    },
}

/// A raw context record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawContext {
    /// Context identifier.
    pub context_id: String,
    /// Entity identifier.
    #[serde(default)]
    pub entity_id: String,
    /// Reporting period.
    pub period: RawPeriod,
    /// `(axis, member)` pairs.
    #[serde(default)]
    pub dimensions: Vec<(String, String)>,
}

/// A raw unit declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUnit {
    /// Unit identifier.
    pub unit_id: String,
    /// Numerator measure (`iso4217:USD`).
    pub measure: String,
    /// Denominator measure for divide units.
    #[serde(default)]
    pub denominator: Option<String>,
}

/// Filing-level fiscal metadata, as strings and integers from the `dei` facts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFilingMetadata {
    /// `dei:DocumentPeriodEndDate`.
    #[serde(default)]
    pub document_period_end_date: Option<String>,
    /// Fiscal-year-end month.
    #[serde(default)]
    pub fiscal_year_end_month: Option<u32>,
    /// Fiscal-year-end day.
    #[serde(default)]
    pub fiscal_year_end_day: Option<u32>,
    /// `dei:DocumentFiscalPeriodFocus` (FY, Q1-Q4).
    #[serde(default)]
    pub fiscal_period_focus: Option<String>,
    /// `dei:DocumentFiscalYearFocus`.
    #[serde(default)]
    pub fiscal_year_focus: Option<i32>,
    /// Filing date.
    #[serde(default)]
    pub filed: Option<String>,
    /// `dei:EntityRegistrantName`.
    #[serde(default)]
    pub entity_name: Option<String>,
}

/// A presentation row as disclosed by the filer, in original order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    /// Concept identifier.
    pub concept_id: String,
    /// Preferred label.
    #[serde(default)]
    pub display_label: String,
    /// Indentation level; negative values are malformed.
    pub level: i64,
    /// Structural header.
    #[serde(default)]
    pub is_abstract: bool,
    /// Total line.
    #[serde(default)]
    pub is_total: bool,
}

/// One presentation role (a statement or note) and its rows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawPresentation {
    /// Role URI or definition label.
    pub role: String,
    /// Rows in original order.
    #[serde(default)]
    pub rows: Vec<Record<RawRow>>,
}

/// Everything one filing contributes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilingBundle {
    /// Accession number.
    pub accession: String,
    /// Fiscal metadata.
    #[serde(default)]
    pub metadata: Record<RawFilingMetadata>,
    /// Facts.
    #[serde(default)]
    pub facts: Vec<Record<RawFact>>,
    /// Contexts.
    #[serde(default)]
    pub contexts: Vec<Record<RawContext>>,
    /// Units.
    #[serde(default)]
    pub units: Vec<Record<RawUnit>>,
    /// Presentation roles.
    #[serde(default)]
    pub presentations: Vec<Record<RawPresentation>>,
}

impl FilingBundle {
    /// Parses a bundle from JSON text.
    ///
    /// Only text that is not JSON, or whose top level is not a bundle, is an error.
    /// Individual records of the wrong shape come back as [`Record::Invalid`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_from_json() {
        let json = r#"{
            "accession": "0000320193-24-000123",
            "metadata": {
                "document_period_end_date": "2024-09-28",
                "fiscal_year_end_month": 9,
                "fiscal_year_end_day": 28,
                "fiscal_period_focus": "FY"
            },
            "contexts": [
                {"context_id": "c1", "entity_id": "0000320193",
                 "period": {"duration": {"start": "2023-10-01", "end": "2024-09-28"}}},
                {"context_id": "c2", "entity_id": "0000320193",
                 "period": {"instant": "2024-09-28"},
                 "dimensions": [["us-gaap:StatementBusinessSegmentsAxis", "aapl:AmericasSegmentMember"]]}
            ],
            "facts": [
                {"concept_id": "us-gaap:Revenues", "context_id": "c1", "unit_id": "usd",
                 "raw_value": "391035000000", "numeric_value": 391035000000, "decimals": -6,
                 "instance_id": "f1"},
                {"concept_id": "us-gaap:Revenues", "context_id": "c1", "unit_id": "usd",
                 "raw_value": "391035000000", "decimals": "INF", "instance_id": "f2"}
            ],
            "presentations": [
                {"role": "http://www.apple.com/role/CONSOLIDATEDSTATEMENTSOFOPERATIONS",
                 "rows": [{"concept_id": "us-gaap:Revenues", "display_label": "Net sales", "level": 1}]}
            ]
        }"#;

        let bundle = FilingBundle::from_json(json).unwrap();
        let contexts: Vec<&RawContext> = bundle.contexts.iter().filter_map(Record::valid).collect();
        let facts: Vec<&RawFact> = bundle.facts.iter().filter_map(Record::valid).collect();
        assert_eq!(contexts.len(), 2);
        assert_eq!(
            contexts[0].period,
            RawPeriod::Duration {
                start: "2023-10-01".to_string(),
                end: "2024-09-28".to_string()
            }
        );
        assert_eq!(contexts[1].dimensions.len(), 1);
        assert_eq!(facts[0].decimals, Some(RawDecimals::Int(-6)));
        assert_eq!(facts[1].decimals, Some(RawDecimals::Text("INF".to_string())));
        assert_eq!(facts[1].numeric_value, None);
        let presentation = bundle.presentations[0].valid().unwrap();
        assert_eq!(presentation.rows[0].valid().unwrap().level, 1);
        assert!(bundle.units.is_empty());
    }

    #[test]
    fn test_bad_record_does_not_reject_bundle() {
        let json = r#"{
            "accession": "0001",
            "metadata": {"fiscal_year_end_month": "twelve"},
            "contexts": [{"context_id": "c1"}],
            "facts": [
                {"concept_id": "us-gaap:Revenues", "context_id": "c1", "raw_value": "5",
                 "numeric_value": 5, "instance_id": "f1"},
                {"concept_id": "us-gaap:Revenues", "context_id": "c1", "raw_value": "n/a",
                 "numeric_value": "n/a", "instance_id": "f2"},
                {"concept_id": "us-gaap:Revenues", "context_id": "c1", "raw_value": "5",
                 "decimals": -6.0, "instance_id": "f3"}
            ],
            "presentations": [{"role": "r", "rows": [{"concept_id": "us-gaap:Revenues", "level": "one"}]}]
        }"#;

        let bundle = FilingBundle::from_json(json).unwrap();
        assert!(matches!(bundle.metadata, Record::Invalid(_)));
        assert!(matches!(bundle.contexts[0], Record::Invalid(_)));
        assert!(bundle.facts[0].valid().is_some());

        let Record::Invalid(rejected) = &bundle.facts[1] else {
            panic!("non-numeric numeric_value should be rejected");
        };
        assert_eq!(rejected.field("instance_id"), Some("f2"));
        assert_eq!(rejected.field("concept_id"), Some("us-gaap:Revenues"));
        assert!(bundle.facts[2].valid().is_none());

        let presentation = bundle.presentations[0].valid().unwrap();
        assert!(presentation.rows[0].valid().is_none());
    }

    #[test]
    fn test_rejected_record_serializes_as_received() {
        let json = r#"{"accession":"0001","facts":[{"concept_id":"x","numeric_value":"n/a"}]}"#;
        let bundle = FilingBundle::from_json(json).unwrap();
        let out = serde_json::to_value(&bundle).unwrap();
        assert_eq!(out["facts"][0]["numeric_value"], "n/a");
    }

    #[test]
    fn test_bundle_from_invalid_json() {
        assert!(FilingBundle::from_json("not json").is_err());
    }
}
