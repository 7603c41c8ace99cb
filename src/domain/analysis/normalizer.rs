//! Coerces free-text model replies into a JSON object.
//!
//! Stages, in order:
//! 1. strip markdown code fences
//! 2. isolate the span from the first `{` to the last `}`
//! 3. parse directly
//! 4. apply the [`REPAIR_CHAIN`](super::repair::REPAIR_CHAIN) and parse
//! 5. drop non-printable characters from the repaired text and parse
//!
//! The first stage that parses wins. Failed stages are kept on the error for
//! diagnostics and logged at `debug`; they are never shown to end users.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use super::repair::{apply_chain, strip_non_printable};

/// A parse stage of the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeStage {
    Direct,
    Repaired,
    PrintableOnly,
}

impl fmt::Display for NormalizeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NormalizeStage::Direct => "direct",
            NormalizeStage::Repaired => "repaired",
            NormalizeStage::PrintableOnly => "printable_only",
        };
        f.write_str(name)
    }
}

/// One failed parse attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageAttempt {
    pub stage: NormalizeStage,
    pub error: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("No JSON object found in model response")]
    NoJsonObject,

    #[error("Failed to parse model response after {} cleanup attempts", .attempts.len())]
    Unparseable { attempts: Vec<StageAttempt> },
}

impl NormalizeError {
    /// Failed attempts in stage order; empty when no object was found.
    pub fn attempts(&self) -> &[StageAttempt] {
        match self {
            NormalizeError::NoJsonObject => &[],
            NormalizeError::Unparseable { attempts } => attempts,
        }
    }
}

static FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)```(?:json)?").unwrap());

/// Turns raw model text into a JSON value, repairing it if needed.
pub fn normalize_response(raw: &str) -> Result<Value, NormalizeError> {
    let unfenced = strip_fences(raw);
    let candidate = isolate_object(&unfenced).ok_or(NormalizeError::NoJsonObject)?;

    let mut attempts = Vec::with_capacity(3);

    let direct = candidate.to_string();
    let direct = match try_stage(NormalizeStage::Direct, direct, &mut attempts) {
        Ok(value) => return Ok(value),
        Err(text) => text,
    };

    let repaired = match try_stage(NormalizeStage::Repaired, apply_chain(&direct), &mut attempts) {
        Ok(value) => return Ok(value),
        Err(text) => text,
    };

    match try_stage(
        NormalizeStage::PrintableOnly,
        strip_non_printable(&repaired),
        &mut attempts,
    ) {
        Ok(value) => Ok(value),
        Err(_) => Err(NormalizeError::Unparseable { attempts }),
    }
}

/// Removes ```` ```json ```` and ```` ``` ```` markers.
pub fn strip_fences(raw: &str) -> String {
    FENCE.replace_all(raw.trim(), "").trim().to_string()
}

/// The span from the first `{` to the last `}`, inclusive.
pub fn isolate_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Parses `text`; on failure records the attempt and hands the text back.
fn try_stage(
    stage: NormalizeStage,
    text: String,
    attempts: &mut Vec<StageAttempt>,
) -> Result<Value, String> {
    match serde_json::from_str::<Value>(&text) {
        Ok(value) => {
            if stage != NormalizeStage::Direct {
                tracing::debug!(%stage, "model response parsed after cleanup");
            }
            Ok(value)
        }
        Err(e) => {
            tracing::debug!(%stage, error = %e, text = %text, "model response stage failed to parse");
            attempts.push(StageAttempt {
                stage,
                error: e.to_string(),
                text: text.clone(),
            });
            Err(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn valid_json_passes_through() {
        let value = normalize_response(r#"{"a": 1, "b": [true, null]}"#).unwrap();
        assert_eq!(value, json!({"a": 1, "b": [true, null]}));
    }

    #[test]
    fn fenced_json_matches_unfenced() {
        let fenced = "```json\n{\"a\": {\"b\": \"c\"}}\n```";
        let plain = "{\"a\": {\"b\": \"c\"}}";
        assert_eq!(normalize_response(fenced), normalize_response(plain));
    }

    #[test]
    fn commentary_around_object_is_dropped() {
        let raw = "Sure! Here is the analysis:\n{\"score\": 72}\nLet me know if you need more.";
        assert_eq!(normalize_response(raw).unwrap(), json!({"score": 72}));
    }

    #[test]
    fn fenced_trailing_comma_is_repaired() {
        let raw = "Here is the data:\n```json\n{\"a\":1,}\n```";
        assert_eq!(normalize_response(raw).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn unquoted_keys_are_repaired() {
        let raw = "{drugName: \"PDE3A\", overallScore: 72}";
        assert_eq!(
            normalize_response(raw).unwrap(),
            json!({"drugName": "PDE3A", "overallScore": 72})
        );
    }

    #[test]
    fn control_characters_fall_through_to_printable_stage() {
        // Outside a string the form feed is not JSON whitespace.
        let raw = "{\"a\":\u{000c} 1}";
        assert_eq!(normalize_response(raw).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn truncated_reply_fails_without_panicking() {
        let err = normalize_response("{\"drugName\": \"PDE3A\", \"riskAssessment\": {").unwrap_err();
        assert_eq!(err, NormalizeError::NoJsonObject);
    }

    #[test]
    fn no_braces_fails() {
        assert_eq!(
            normalize_response("I cannot help with that.").unwrap_err(),
            NormalizeError::NoJsonObject
        );
        assert_eq!(normalize_response("} backwards {").unwrap_err(), NormalizeError::NoJsonObject);
    }

    #[test]
    fn hopeless_reply_records_every_stage() {
        let err = normalize_response("{ [[[ : }").unwrap_err();
        let stages: Vec<NormalizeStage> = err.attempts().iter().map(|a| a.stage).collect();
        assert_eq!(
            stages,
            [
                NormalizeStage::Direct,
                NormalizeStage::Repaired,
                NormalizeStage::PrintableOnly
            ]
        );
        assert!(err.to_string().contains("3 cleanup attempts"));
    }

    #[test]
    fn isolate_uses_outermost_braces() {
        assert_eq!(isolate_object("x {a} y {b} z"), Some("{a} y {b}"));
        assert_eq!(isolate_object("no braces"), None);
    }

    fn json_leaf() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i32>().prop_map(|n| json!(n)),
            "[a-zA-Z0-9 ,:{}\\[\\]\"\\\\\n]{0,16}".prop_map(Value::String),
        ]
    }

    fn json_object() -> impl Strategy<Value = Value> {
        let value = json_leaf().prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                proptest::collection::btree_map("[a-zA-Z_]{1,8}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        });
        proptest::collection::btree_map("[a-zA-Z_]{1,8}", value, 0..6)
            .prop_map(|m| Value::Object(m.into_iter().collect()))
    }

    proptest! {
        #[test]
        fn valid_objects_normalize_unchanged(object in json_object(), pretty in any::<bool>()) {
            let text = if pretty {
                serde_json::to_string_pretty(&object).unwrap()
            } else {
                serde_json::to_string(&object).unwrap()
            };
            prop_assert_eq!(normalize_response(&text).unwrap(), object);
        }

        #[test]
        fn arbitrary_text_never_panics(raw in "\\PC{0,200}") {
            let _ = normalize_response(&raw);
        }
    }
}
