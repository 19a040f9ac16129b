// Dashboard domain model and payload normalization
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::fmt;
use thiserror::Error;

/// Formats a JSON number the way a browser prints it: whole-valued floats
/// drop their fraction, so `42.0` and `1e2` read as `42` and `100`.
pub fn format_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

/// Metric identifier. The stats API has emitted both string and integer ids.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricId {
    Text(String),
    Number(Number),
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricId::Text(s) => f.write_str(s),
            MetricId::Number(n) => f.write_str(&format_number(n)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Text(String),
    Number(Number),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Text(s) => f.write_str(s),
            MetricValue::Number(n) => f.write_str(&format_number(n)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metric {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<MetricId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<MetricValue>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Metric {
    /// Builds a metric from one element of the payload's `metrics` array.
    /// Anything that is not an object yields an empty metric.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return Self::default();
        };

        let id = take_typed(&mut fields, "id", |v| match v {
            Value::String(s) => Ok(MetricId::Text(s)),
            Value::Number(n) => Ok(MetricId::Number(n)),
            other => Err(other),
        });
        let name = take_typed(&mut fields, "name", as_string);
        let value = take_typed(&mut fields, "value", |v| match v {
            Value::String(s) => Ok(MetricValue::Text(s)),
            Value::Number(n) => Ok(MetricValue::Number(n)),
            other => Err(other),
        });

        Self {
            id,
            name,
            value,
            extra: fields,
        }
    }

    /// Key identifying this metric's row when rendered at `index`.
    pub fn display_key(&self, index: usize) -> String {
        match &self.id {
            Some(id) => id.to_string(),
            None => format!("{}-{}", self.name.as_deref().unwrap_or("m"), index),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dashboard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_users: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    pub metrics: Vec<Metric>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The payload was decoded but is not a usable JSON object.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("API returned empty/invalid JSON")]
pub struct InvalidShape;

impl Dashboard {
    /// Validates and normalizes a decoded stats payload.
    ///
    /// Recognized fields land in their typed slots. Fields of the wrong JSON
    /// type are kept in `extra` under their own key, as is every unrecognized
    /// field. `metrics` is always a sequence afterwards.
    pub fn from_payload(payload: Value) -> Result<Self, InvalidShape> {
        let Value::Object(mut fields) = payload else {
            return Err(InvalidShape);
        };

        let title = take_typed(&mut fields, "title", as_string);
        let server_status = take_typed(&mut fields, "server_status", as_string);
        let active_users = take_typed(&mut fields, "active_users", |v| match v {
            Value::Number(n) => Ok(n),
            other => Err(other),
        });
        let last_updated = take_typed(&mut fields, "last_updated", as_string);

        let metrics = match fields.remove("metrics") {
            Some(Value::Array(items)) => items.into_iter().map(Metric::from_value).collect(),
            _ => Vec::new(),
        };

        Ok(Self {
            title,
            server_status,
            active_users,
            last_updated,
            metrics,
            extra: fields,
        })
    }
}

fn as_string(value: Value) -> Result<String, Value> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(other),
    }
}

/// Removes `key` and converts it. Null counts as absent; a value that fails
/// conversion goes back into the map untouched.
fn take_typed<T>(
    fields: &mut Map<String, Value>,
    key: &str,
    convert: impl FnOnce(Value) -> Result<T, Value>,
) -> Option<T> {
    match fields.remove(key)? {
        Value::Null => None,
        value => match convert(value) {
            Ok(typed) => Some(typed),
            Err(original) => {
                fields.insert(key.to_string(), original);
                None
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_payload_reads_recognized_fields() {
        let dashboard = Dashboard::from_payload(json!({
            "title": "Ops",
            "server_status": "online",
            "active_users": 42,
            "last_updated": "2024-01-01T00:00:00Z",
            "metrics": [{"id": "m1", "name": "CPU", "value": "73%"}]
        }))
        .unwrap();

        assert_eq!(dashboard.title.as_deref(), Some("Ops"));
        assert_eq!(dashboard.server_status.as_deref(), Some("online"));
        assert_eq!(dashboard.active_users, Some(Number::from(42u64)));
        assert_eq!(dashboard.last_updated.as_deref(), Some("2024-01-01T00:00:00Z"));
        assert_eq!(dashboard.metrics.len(), 1);
        assert_eq!(dashboard.metrics[0].id, Some(MetricId::Text("m1".to_string())));
        assert_eq!(dashboard.metrics[0].value, Some(MetricValue::Text("73%".to_string())));
        assert!(dashboard.extra.is_empty());
    }

    #[test]
    fn test_non_object_payloads_are_rejected() {
        for payload in [json!(null), json!("hello"), json!(7), json!(true), json!([1, 2])] {
            assert_eq!(Dashboard::from_payload(payload), Err(InvalidShape));
        }
        assert_eq!(InvalidShape.to_string(), "API returned empty/invalid JSON");
    }

    #[test]
    fn test_metrics_coerced_to_empty_sequence() {
        for metrics in [None, Some(json!(null)), Some(json!(3)), Some(json!("cpu")), Some(json!({"a": 1}))] {
            let mut payload = json!({"title": "t"});
            if let Some(m) = metrics {
                payload["metrics"] = m;
            }
            let dashboard = Dashboard::from_payload(payload).unwrap();
            assert!(dashboard.metrics.is_empty());
            assert!(!dashboard.extra.contains_key("metrics"));
        }
    }

    #[test]
    fn test_metrics_sequence_keeps_order() {
        let dashboard = Dashboard::from_payload(json!({
            "metrics": [
                {"id": 1, "name": "CPU Usage", "value": "40%"},
                {"id": 2, "name": "Memory", "value": "64MB"},
                {"name": "Disk", "value": 0.5}
            ]
        }))
        .unwrap();

        let names: Vec<_> = dashboard.metrics.iter().map(|m| m.name.clone().unwrap()).collect();
        assert_eq!(names, ["CPU Usage", "Memory", "Disk"]);
        assert_eq!(dashboard.metrics[0].id, Some(MetricId::Number(Number::from(1u64))));
        assert_eq!(dashboard.metrics[2].value.as_ref().unwrap().to_string(), "0.5");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let first = Dashboard::from_payload(json!({
            "title": "Ops",
            "active_users": 0,
            "region": "eu-west",
            "server_status": 5,
            "metrics": [{"id": "m1", "name": "CPU", "value": 73, "unit": "%"}, "junk"]
        }))
        .unwrap();

        let second = Dashboard::from_payload(serde_json::to_value(&first).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_mistyped_fields_are_kept_in_extra() {
        let dashboard = Dashboard::from_payload(json!({
            "title": 42,
            "active_users": "many",
            "last_updated": null,
            "build": "abc123"
        }))
        .unwrap();

        assert_eq!(dashboard.title, None);
        assert_eq!(dashboard.active_users, None);
        assert_eq!(dashboard.last_updated, None);
        assert_eq!(dashboard.extra.get("title"), Some(&json!(42)));
        assert_eq!(dashboard.extra.get("active_users"), Some(&json!("many")));
        assert_eq!(dashboard.extra.get("build"), Some(&json!("abc123")));
        assert!(!dashboard.extra.contains_key("last_updated"));
    }

    #[test]
    fn test_falsy_values_are_present() {
        let dashboard = Dashboard::from_payload(json!({"title": "", "active_users": 0})).unwrap();
        assert_eq!(dashboard.title.as_deref(), Some(""));
        assert_eq!(dashboard.active_users, Some(Number::from(0u64)));
    }

    #[test]
    fn test_non_integer_active_users_are_kept() {
        for (payload, shown) in [(json!(42.0), "42"), (json!(1e2), "100"), (json!(42.5), "42.5")] {
            let dashboard = Dashboard::from_payload(json!({"active_users": payload})).unwrap();
            assert!(!dashboard.extra.contains_key("active_users"));
            assert_eq!(format_number(dashboard.active_users.as_ref().unwrap()), shown);
        }
    }

    #[test]
    fn test_display_key() {
        let with_id = Metric::from_value(json!({"id": 7, "name": "CPU"}));
        assert_eq!(with_id.display_key(3), "7");

        let named = Metric::from_value(json!({"name": "CPU"}));
        assert_eq!(named.display_key(3), "CPU-3");

        let anonymous = Metric::from_value(json!("not an object"));
        assert_eq!(anonymous, Metric::default());
        assert_eq!(anonymous.display_key(0), "m-0");
    }
}
