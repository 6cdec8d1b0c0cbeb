//! Raw metric record parsing.

use crate::error::ParseError;

/// A single metric sample.
/// Value and timestamp are carried verbatim; no numeric validation applies.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MetricRecord {
    /// Dot-delimited metric key.
    pub key: String,
    /// Sampled value, opaque.
    pub value: String,
    /// Sample timestamp, opaque.
    pub timestamp: String,
}

impl MetricRecord {
    /// Split a raw `key|value|timestamp` line into a record.
    pub fn parse(raw: &str) -> Result<MetricRecord, ParseError> {
        let mut fields = raw.split('|');
        match (fields.next(), fields.next(), fields.next(), fields.next()) {
            (Some(key), Some(value), Some(timestamp), None) => Ok(MetricRecord {
                key: key.to_string(),
                value: value.to_string(),
                timestamp: timestamp.to_string(),
            }),
            _ => Err(ParseError {
                raw: raw.to_string(),
                fields: raw.split('|').count(),
            }),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn three_fields() {
        let record = MetricRecord::parse("app.requests|42|1000").unwrap();
        assert_eq!(record.key, "app.requests");
        assert_eq!(record.value, "42");
        assert_eq!(record.timestamp, "1000");
    }

    #[test]
    fn values_are_opaque() {
        let record = MetricRecord::parse("app.latency|not-a-number|later").unwrap();
        assert_eq!(record.value, "not-a-number");
        assert_eq!(record.timestamp, "later");
    }

    #[test]
    fn wrong_field_count() {
        let err = MetricRecord::parse("app.requests|42").unwrap_err();
        assert_eq!(err.fields, 2);
        let err = MetricRecord::parse("a|b|c|d").unwrap_err();
        assert_eq!(err.fields, 4);
    }
}
