//! Response assembly and encoding.

use lm_error::{LmError, Result};
use lm_types::{DataRecord, ObjectSummary, RESPONSE_TITLE, ResultEnvelope};
use serde::{Deserialize, Serialize};

/// JSON layout of an encoded response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Single-line JSON
    #[default]
    Json,

    /// Indented JSON
    Pretty,
}

/// Build the response for the selected object and its records.
pub fn assemble(bucket: &str, summary: ObjectSummary, records: Vec<DataRecord>) -> ResultEnvelope {
    ResultEnvelope {
        title: RESPONSE_TITLE.to_string(),
        bucket: bucket.to_string(),
        key: summary.key,
        last_modified: summary.last_modified,
        contents: records,
    }
}

/// Encode a response as JSON.
pub fn encode(envelope: &ResultEnvelope, format: OutputFormat) -> Result<String> {
    let encoded = match format {
        OutputFormat::Json => serde_json::to_string(envelope),
        OutputFormat::Pretty => serde_json::to_string_pretty(envelope),
    };
    encoded.map_err(|e| LmError::Serialization(e.to_string()))
}

/// Decode a JSON response produced by [`encode`].
pub fn decode(json: &str) -> Result<ResultEnvelope> {
    serde_json::from_str(json).map_err(|e| LmError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample() -> ResultEnvelope {
        let summary = ObjectSummary::new(
            "prod/unit=42/sensor=temp/year=2024/month=03/day=01/part-0003.json.gz",
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            2048,
        );
        let records = vec![
            DataRecord::new("2024-03-01T11:59:58Z", "21.4"),
            DataRecord::new("2024-03-01T11:59:59Z", "21.5"),
        ];
        assemble("sensor-data", summary, records)
    }

    #[test]
    fn test_assemble_copies_identity() {
        let envelope = sample();

        assert_eq!(envelope.title, "Last uploaded S3 object");
        assert_eq!(envelope.bucket, "sensor-data");
        assert!(envelope.key.ends_with("part-0003.json.gz"));
        assert_eq!(envelope.contents.len(), 2);
    }

    #[test]
    fn test_encode_field_names() {
        let json = encode(&sample(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["title"], "Last uploaded S3 object");
        assert_eq!(value["bucket"], "sensor-data");
        assert_eq!(value["last_modified"], "2024-03-01T12:00:00Z");
        assert_eq!(value["contents"][1]["timestamp"], "2024-03-01T11:59:59Z");
        assert_eq!(value["contents"][1]["data"], "21.5");
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_decode_reproduces_envelope() {
        let envelope = sample();

        for format in [OutputFormat::Json, OutputFormat::Pretty] {
            let decoded = decode(&encode(&envelope, format).unwrap()).unwrap();

            assert_eq!(decoded.bucket, envelope.bucket);
            assert_eq!(decoded.key, envelope.key);
            assert_eq!(decoded.last_modified, envelope.last_modified);
            assert_eq!(decoded.contents, envelope.contents);
        }
    }

    #[test]
    fn test_empty_contents_encode_as_array() {
        let summary = ObjectSummary::new("k", Utc.timestamp_opt(0, 0).unwrap(), 0);
        let json = encode(&assemble("b", summary, Vec::new()), OutputFormat::Json).unwrap();

        assert!(json.contains(r#""contents":[]"#));
    }

    #[test]
    fn test_decode_garbage_is_serialization_error() {
        assert!(matches!(
            decode("{not json"),
            Err(LmError::Serialization(_))
        ));
    }
}
