//! Syntactic repair rules for almost-JSON model output.
//!
//! Each rule is a pure text transform. [`REPAIR_CHAIN`] fixes their order:
//! later rules assume the earlier ones have run. Rules that must not touch
//! string contents work on the segments outside string literals only.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// A named text transform in the repair chain.
#[derive(Clone, Copy)]
pub struct RepairRule {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

impl std::fmt::Debug for RepairRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepairRule").field("name", &self.name).finish()
    }
}

/// Repair rules in application order.
pub const REPAIR_CHAIN: [RepairRule; 5] = [
    RepairRule {
        name: "trailing_commas",
        apply: remove_trailing_commas,
    },
    RepairRule {
        name: "bare_keys",
        apply: quote_bare_keys,
    },
    RepairRule {
        name: "unbalanced_quotes",
        apply: escape_unbalanced_quotes,
    },
    RepairRule {
        name: "bare_values",
        apply: quote_bare_values,
    },
    RepairRule {
        name: "raw_newlines",
        apply: escape_newlines_in_strings,
    },
];

/// Runs every rule of [`REPAIR_CHAIN`] in order.
pub fn apply_chain(text: &str) -> String {
    REPAIR_CHAIN
        .iter()
        .fold(text.to_string(), |acc, rule| (rule.apply)(&acc))
}

static TRAILING_COMMA: Lazy<Regex> = Lazy::new(|| Regex::new(r",(\s*[}\]])").unwrap());

static BARE_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([{,]\s*)([a-zA-Z_][a-zA-Z0-9_]*)\s*:").unwrap());

static BARE_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r":(\s*)([a-zA-Z][a-zA-Z0-9\s\-_]*?)(\s*)([,}])").unwrap()
});

/// `{"a":1,}` becomes `{"a":1}`; same for arrays.
pub fn remove_trailing_commas(text: &str) -> String {
    TRAILING_COMMA.replace_all(text, "$1").into_owned()
}

/// `{a: 1}` becomes `{"a": 1}`. String contents are left alone.
pub fn quote_bare_keys(text: &str) -> String {
    map_outside_strings(text, |code| BARE_KEY.replace_all(code, "$1\"$2\":"))
}

/// Escapes quotes that appear inside a string value without closing it.
///
/// Inside a string, a `"` is taken as the closing quote only when the next
/// non-whitespace character is `:`, `,`, `}`, `]` or the end of the text;
/// any other `"` is escaped. Existing backslash escapes are kept.
pub fn escape_unbalanced_quotes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 16);
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if !in_string {
            if c == '"' {
                in_string = true;
            }
            out.push(c);
            i += 1;
            continue;
        }

        match c {
            '\\' => {
                out.push(c);
                if let Some(&next) = chars.get(i + 1) {
                    out.push(next);
                    i += 1;
                }
            }
            '"' => {
                let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
                if matches!(next, None | Some(':' | ',' | '}' | ']')) {
                    in_string = false;
                    out.push('"');
                } else {
                    out.push_str("\\\"");
                }
            }
            _ => out.push(c),
        }
        i += 1;
    }

    out
}

/// `{"risk": High}` becomes `{"risk": "High"}`.
///
/// Only word-like values terminated by `,` or `}` are quoted; `true`, `false`
/// and `null` are kept as literals. Values inside arrays are not touched.
pub fn quote_bare_values(text: &str) -> String {
    map_outside_strings(text, |code| {
        BARE_VALUE.replace_all(code, |caps: &Captures| {
            let value = &caps[2];
            if matches!(value, "true" | "false" | "null") {
                caps[0].to_string()
            } else {
                format!(":{}\"{}\"{}{}", &caps[1], value, &caps[3], &caps[4])
            }
        })
    })
}

/// Escapes raw line breaks that occur inside string literals.
pub fn escape_newlines_in_strings(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for segment in segments(text) {
        match segment {
            Segment::Code(code) => out.push_str(code),
            Segment::Str(literal) => {
                for c in literal.chars() {
                    match c {
                        '\n' => out.push_str("\\n"),
                        '\r' => out.push_str("\\r"),
                        _ => out.push(c),
                    }
                }
            }
        }
    }
    out
}

/// Strips every character outside printable ASCII (0x20..=0x7E).
pub fn strip_non_printable(text: &str) -> String {
    text.chars().filter(|c| (' '..='~').contains(c)).collect()
}

#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Code(&'a str),
    /// A string literal including its quotes; may be unterminated.
    Str(&'a str),
}

fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                out.push(Segment::Str(&text[start..idx + 1]));
                start = idx + 1;
                in_string = false;
            }
        } else if c == '"' {
            if start < idx {
                out.push(Segment::Code(&text[start..idx]));
            }
            start = idx;
            in_string = true;
        }
    }

    if start < text.len() {
        let rest = &text[start..];
        out.push(if in_string {
            Segment::Str(rest)
        } else {
            Segment::Code(rest)
        });
    }
    out
}

fn map_outside_strings<'a, F>(text: &'a str, mut f: F) -> String
where
    F: FnMut(&'a str) -> Cow<'a, str>,
{
    let mut out = String::with_capacity(text.len() + 16);
    for segment in segments(text) {
        match segment {
            Segment::Code(code) => out.push_str(&f(code)),
            Segment::Str(literal) => out.push_str(literal),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_order_is_fixed() {
        let names: Vec<&str> = REPAIR_CHAIN.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            ["trailing_commas", "bare_keys", "unbalanced_quotes", "bare_values", "raw_newlines"]
        );
    }

    #[test]
    fn segments_split_on_string_literals() {
        let parts = segments(r#"{"a\"b": 1, "c"#);
        assert_eq!(
            parts,
            vec![
                Segment::Code("{"),
                Segment::Str(r#""a\"b""#),
                Segment::Code(": 1, "),
                Segment::Str(r#""c"#),
            ]
        );
    }

    #[test]
    fn trailing_commas_removed_before_closers() {
        assert_eq!(remove_trailing_commas(r#"{"a":1,}"#), r#"{"a":1}"#);
        assert_eq!(remove_trailing_commas("[1, 2,\n ]"), "[1, 2\n ]");
        assert_eq!(remove_trailing_commas(r#"{"a":[1,],}"#), r#"{"a":[1]}"#);
    }

    #[test]
    fn bare_keys_quoted() {
        assert_eq!(quote_bare_keys("{a: 1, b_2: 2}"), r#"{"a": 1, "b_2": 2}"#);
        assert_eq!(quote_bare_keys(r#"{"a": 1}"#), r#"{"a": 1}"#);
    }

    #[test]
    fn bare_keys_ignore_string_contents() {
        let text = r#"{"note": "ratio {x: 1}"}"#;
        assert_eq!(quote_bare_keys(text), text);
    }

    #[test]
    fn well_formed_strings_untouched_by_quote_escaping() {
        let text = r#"{"a": "b", "c": ["d", "e"], "f": "say \"hi\""}"#;
        assert_eq!(escape_unbalanced_quotes(text), text);
    }

    #[test]
    fn inner_quotes_escaped() {
        let text = r#"{"summary": "The "best" option"}"#;
        let fixed = escape_unbalanced_quotes(text);
        assert_eq!(fixed, r#"{"summary": "The \"best\" option"}"#);
        assert!(serde_json::from_str::<serde_json::Value>(&fixed).is_ok());
    }

    #[test]
    fn bare_values_quoted() {
        assert_eq!(
            quote_bare_values(r#"{"risk": High, "level": Very high}"#),
            r#"{"risk": "High", "level": "Very high"}"#
        );
    }

    #[test]
    fn bare_value_regressions() {
        // Literals and numbers stay as they are.
        assert_eq!(quote_bare_values(r#"{"ok": true, "n": null}"#), r#"{"ok": true, "n": null}"#);
        assert_eq!(quote_bare_values(r#"{"score": 72}"#), r#"{"score": 72}"#);
        // Single-letter values are quoted.
        assert_eq!(quote_bare_values(r#"{"grade": A}"#), r#"{"grade": "A"}"#);
        // Values in arrays are left for the parser to reject.
        assert_eq!(quote_bare_values(r#"{"x": [Low, High]}"#), r#"{"x": [Low, High]}"#);
        // Values ending in `]` are not terminated by `,` or `}`.
        assert_eq!(quote_bare_values("[{\"a\": b]"), "[{\"a\": b]");
        // Text inside strings is never rewritten.
        let text = r#"{"a": "x: y, z"}"#;
        assert_eq!(quote_bare_values(text), text);
    }

    #[test]
    fn newlines_escaped_only_inside_strings() {
        let text = "{\n  \"a\": \"line one\nline two\"\n}";
        let fixed = escape_newlines_in_strings(text);
        assert_eq!(fixed, "{\n  \"a\": \"line one\\nline two\"\n}");
        assert!(serde_json::from_str::<serde_json::Value>(&fixed).is_ok());
    }

    #[test]
    fn non_printable_stripped() {
        assert_eq!(strip_non_printable("{\"a\":\u{00a0}1\u{0007}}"), "{\"a\":1}");
        assert_eq!(strip_non_printable("caf\u{e9}"), "caf");
    }

    #[test]
    fn chain_fixes_combined_damage() {
        let text = "{drugName: \"PDE3A \"inhaled\" inhibitor\", risk: High,\n notes: \"a\nb\",}";
        let fixed = apply_chain(text);
        let value: serde_json::Value = serde_json::from_str(&fixed).unwrap();
        assert_eq!(value["drugName"], "PDE3A \"inhaled\" inhibitor");
        assert_eq!(value["risk"], "High");
        assert_eq!(value["notes"], "a\nb");
    }
}
