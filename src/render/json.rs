//! JSON rendering for outline results.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{Error, Result};
use crate::model::OutlineResult;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with four-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an outline result to JSON.
pub fn to_json(result: &OutlineResult, format: JsonFormat) -> Result<String> {
    let bytes = match format {
        JsonFormat::Pretty => {
            let mut out = Vec::new();
            let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
            result
                .serialize(&mut ser)
                .map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))?;
            out
        }
        JsonFormat::Compact => serde_json::to_vec(result)
            .map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))?,
    };

    String::from_utf8(bytes).map_err(|e| Error::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, OutlineEntry};

    fn sample() -> OutlineResult {
        OutlineResult::new(
            "Overview",
            vec![OutlineEntry::new(HeadingLevel::H1, "Introduction", 2)],
        )
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        let expected = "{\n    \"title\": \"Overview\",\n    \"outline\": [\n        {\n            \"level\": \"H1\",\n            \"text\": \"Introduction\",\n            \"page\": 2\n        }\n    ]\n}";
        assert_eq!(json, expected);
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Overview","outline":[{"level":"H1","text":"Introduction","page":2}]}"#
        );
    }

    #[test]
    fn test_empty_outline_is_array() {
        let json = to_json(&OutlineResult::new("Untitled", vec![]), JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"{"title":"Untitled","outline":[]}"#);
    }
}
