//! Canonical analysis records and the normalizer that produces them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identity given to an analysis object that carries no usable `companyName`.
pub const UNKNOWN_COMPANY: &str = "Unknown Company";

/// Identity of the record synthesized when nothing in the response decoded.
pub const FALLBACK_COMPANY_NAME: &str = "Analysis Unavailable";

/// Reserved field marking a synthesized fallback record.
pub const FALLBACK_MARKER: &str = "_fallback";

const COMPANY_NAME_FIELD: &str = "companyName";

/// One product analysis returned by the service.
///
/// Only `companyName` is interpreted; every other field is owned by the
/// service's schema and carried verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    #[serde(rename = "companyName")]
    pub company_name: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl AnalysisRecord {
    /// Builds a record from a decoded JSON object.
    ///
    /// A missing, non-string, or blank `companyName` is replaced by
    /// [`UNKNOWN_COMPANY`].
    pub fn from_object(mut object: Map<String, Value>) -> Self {
        let company_name = match object.remove(COMPANY_NAME_FIELD) {
            Some(Value::String(name)) if !name.trim().is_empty() => name,
            _ => UNKNOWN_COMPANY.to_string(),
        };
        Self {
            company_name,
            details: object,
        }
    }

    /// The placeholder returned when the response held no usable analysis.
    pub fn fallback() -> Self {
        let mut details = Map::new();
        details.insert(FALLBACK_MARKER.to_string(), Value::Bool(true));
        details.insert(
            "summary".to_string(),
            Value::String(
                "The analysis service replied, but no analysis could be read from its response."
                    .to_string(),
            ),
        );
        Self {
            company_name: FALLBACK_COMPANY_NAME.to_string(),
            details,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.details.get(FALLBACK_MARKER) == Some(&Value::Bool(true))
    }

    /// Looks up an analysis field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.details.get(name)
    }
}

/// Output of [`normalize`]: never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedResults {
    pub records: Vec<AnalysisRecord>,
    /// True when `records` holds only the synthesized fallback.
    pub degraded: bool,
}

/// Field that holds a non-object value wrapped into a placeholder record.
pub const RAW_VALUE_FIELD: &str = "value";

/// Maps decoded fragments to analysis records.
///
/// Objects become records. Arrays are flattened, one record per element.
/// Any other value becomes an [`UNKNOWN_COMPANY`] record carrying it under
/// [`RAW_VALUE_FIELD`]. If nothing remains, a single fallback record is
/// returned.
pub fn normalize(values: Vec<Value>) -> NormalizedResults {
    let mut records = Vec::with_capacity(values.len());
    for value in values {
        collect_records(value, &mut records);
    }

    if records.is_empty() {
        tracing::warn!("No analysis decoded from response; using fallback record");
        return NormalizedResults {
            records: vec![AnalysisRecord::fallback()],
            degraded: true,
        };
    }

    NormalizedResults {
        records,
        degraded: false,
    }
}

fn collect_records(value: Value, records: &mut Vec<AnalysisRecord>) {
    match value {
        Value::Object(object) => records.push(AnalysisRecord::from_object(object)),
        Value::Array(items) => {
            for item in items {
                collect_records(item, records);
            }
        }
        other => {
            tracing::warn!(
                kind = json_kind(&other),
                "Analysis value is not an object; recording it without identity"
            );
            let mut details = Map::new();
            details.insert(RAW_VALUE_FIELD.to_string(), other);
            records.push(AnalysisRecord {
                company_name: UNKNOWN_COMPANY.to_string(),
                details,
            });
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_objects_become_records() {
        let results = normalize(vec![
            json!({"companyName": "Acme", "marketShare": 0.4}),
            json!({"companyName": "Beta"}),
        ]);

        assert!(!results.degraded);
        assert_eq!(results.records.len(), 2);
        assert_eq!(results.records[0].company_name, "Acme");
        assert_eq!(results.records[0].field("marketShare"), Some(&json!(0.4)));
        assert!(results.records[0].field("companyName").is_none());
    }

    #[test]
    fn test_missing_identity_gets_placeholder() {
        let results = normalize(vec![
            json!({"summary": "no name"}),
            json!({"companyName": 42}),
            json!({"companyName": "   "}),
        ]);

        assert_eq!(results.records.len(), 3);
        assert!(results
            .records
            .iter()
            .all(|r| r.company_name == UNKNOWN_COMPANY));
        assert_eq!(results.records[0].field("summary"), Some(&json!("no name")));
    }

    #[test]
    fn test_empty_input_yields_single_fallback() {
        let results = normalize(vec![]);

        assert!(results.degraded);
        assert_eq!(results.records.len(), 1);
        assert!(results.records[0].is_fallback());
        assert_eq!(results.records[0].company_name, FALLBACK_COMPANY_NAME);
    }

    #[test]
    fn test_arrays_are_flattened() {
        let results = normalize(vec![
            json!([{"companyName": "Acme"}, {"companyName": "Beta"}]),
            json!({"companyName": "Gamma"}),
        ]);

        assert!(!results.degraded);
        let names: Vec<&str> = results
            .records
            .iter()
            .map(|r| r.company_name.as_str())
            .collect();
        assert_eq!(names, vec!["Acme", "Beta", "Gamma"]);
    }

    #[test]
    fn test_scalars_get_placeholder_records() {
        let results = normalize(vec![json!(42), json!("text"), json!(null)]);

        assert!(!results.degraded);
        assert_eq!(results.records.len(), 3);
        assert!(results
            .records
            .iter()
            .all(|r| r.company_name == UNKNOWN_COMPANY && !r.is_fallback()));
        assert_eq!(results.records[0].field(RAW_VALUE_FIELD), Some(&json!(42)));
        assert_eq!(results.records[2].field(RAW_VALUE_FIELD), Some(&Value::Null));
    }

    #[test]
    fn test_empty_array_yields_fallback() {
        let results = normalize(vec![json!([])]);
        assert!(results.degraded);
        assert_eq!(results.records.len(), 1);
        assert!(results.records[0].is_fallback());
    }

    #[test]
    fn test_record_serializes_flat() {
        let record = AnalysisRecord::from_object(
            json!({"companyName": "Acme", "pricing": {"tier": "pro"}})
                .as_object()
                .cloned()
                .unwrap(),
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({"companyName": "Acme", "pricing": {"tier": "pro"}}));

        let back: AnalysisRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_regular_record_is_not_fallback() {
        let record = AnalysisRecord::from_object(Map::new());
        assert!(!record.is_fallback());
    }
}
