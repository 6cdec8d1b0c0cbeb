//! Graphite plaintext line construction.

use crate::name::MetricPath;
use crate::record::MetricRecord;

/// Stamps records into graphite plaintext lines.
/// Holds the parts of a line that do not change between records.
#[derive(Debug, Clone)]
pub struct LineTemplate {
    host_segment: String,
    prefix: Option<String>,
    append: Option<String>,
}

impl LineTemplate {
    /// A template splicing `host_segment` into every key,
    /// decorated with the optional prefix and append strings.
    pub fn new<S: Into<String>>(
        host_segment: S,
        prefix: Option<String>,
        append: Option<String>,
    ) -> Self {
        LineTemplate {
            host_segment: host_segment.into(),
            prefix,
            append,
        }
    }

    /// Render one record as `path value timestamp`, without the newline.
    /// Deterministic: the same record always renders the same line.
    pub fn line(&self, record: &MetricRecord) -> String {
        let mut path = MetricPath::from(record.key.as_str());
        path.insert_before_leaf(self.host_segment.as_str());
        let key = path.join(".");

        match (&self.prefix, &self.append) {
            (Some(prefix), Some(append)) => format!(
                "{}.{}-{} {} {}",
                prefix, key, append, record.value, record.timestamp
            ),
            (Some(prefix), None) => {
                format!("{}.{} {} {}", prefix, key, record.value, record.timestamp)
            }
            (None, Some(append)) => {
                format!("{}-{} {} {}", key, append, record.value, record.timestamp)
            }
            (None, None) => format!("{} {} {}", key, record.value, record.timestamp),
        }
    }
}
