//! Score-file loading.
//!
//! A score file is a JSON object grouping effect names by score:
//!
//! ```text
//! {
//!     // comments and trailing commas are allowed
//!     "10": ["vigor", "improved sorcery +*"],
//!     "-5": "reduced vigor",
//! }
//! ```
//!
//! A key that is not an integer is read as an effect name when its value is
//! an integer, so `{"vigor": 10}` is accepted too.
//!
//! Entries apply in file order, so a name listed in several groups takes the
//! score of the last one.

use std::path::Path;

use relicforge_core::ScoreTable;
use serde_json::Value;

use crate::ConfigError;

const BUILTIN_SCORE_TABLES: [(&str, &str); 2] = [
    ("default", include_str!("../resources/scores_default.json")),
    ("sorcery", include_str!("../resources/scores_sorcery.json")),
];

/// Removes `//` and `/* */` comments and trailing commas outside string
/// literals, leaving plain JSON.
pub fn strip_relaxed_json(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for skipped in chars.by_ref() {
                    if prev == '*' && skipped == '/' {
                        break;
                    }
                    prev = skipped;
                }
                out.push(' ');
            }
            ']' | '}' => {
                let kept = out.trim_end().len();
                if out[..kept].ends_with(',') {
                    out.truncate(kept - 1);
                }
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Parses score-file text into a [`ScoreTable`].
///
/// # Errors
///
/// `ConfigError::Json` if the text is not relaxed JSON, `ConfigError::Invalid`
/// if the root is not an object or an entry has the wrong shape.
pub fn parse_score_table(text: &str) -> Result<ScoreTable, ConfigError> {
    let root: Value = serde_json::from_str(&strip_relaxed_json(text))?;
    let entries = match root {
        Value::Object(entries) => entries,
        other => {
            return Err(ConfigError::Invalid(format!(
                "score file root is not an object: {}",
                json_kind(&other)
            )))
        }
    };

    let mut table = ScoreTable::new();
    for (key, value) in &entries {
        match key.trim().parse::<i64>() {
            Ok(score) => match value {
                Value::String(name) => table.insert(name, score),
                Value::Array(names) => {
                    for name in names {
                        let Value::String(name) = name else {
                            return Err(ConfigError::Invalid(format!(
                                "score group {key:?} holds a {}, expected an effect name",
                                json_kind(name)
                            )));
                        };
                        table.insert(name, score);
                    }
                }
                other => {
                    return Err(ConfigError::Invalid(format!(
                        "score group {key:?} holds a {}, expected a name or list of names",
                        json_kind(other)
                    )))
                }
            },
            Err(_) => match value.as_i64() {
                Some(score) => table.insert(key, score),
                None => {
                    return Err(ConfigError::Invalid(format!(
                        "score key {key:?} is not an integer"
                    )))
                }
            },
        }
    }
    Ok(table)
}

/// Loads a score file from disk.
pub fn load_score_table(path: impl AsRef<Path>) -> Result<ScoreTable, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    parse_score_table(&text)
}

/// Names of the score tables compiled into the crate.
pub fn builtin_score_table_names() -> impl Iterator<Item = &'static str> {
    BUILTIN_SCORE_TABLES.iter().map(|(name, _)| *name)
}

/// Loads a builtin score table by name.
pub fn builtin_score_table(name: &str) -> Result<ScoreTable, ConfigError> {
    BUILTIN_SCORE_TABLES
        .iter()
        .find(|(builtin, _)| builtin.eq_ignore_ascii_case(name))
        .ok_or_else(|| ConfigError::UnknownScoreTable(name.to_string()))
        .and_then(|(_, text)| parse_score_table(text))
}

/// Loads a builtin table if `name_or_path` names one, otherwise reads the
/// file at that path.
pub fn resolve_score_table(name_or_path: &str) -> Result<ScoreTable, ConfigError> {
    if builtin_score_table_names().any(|name| name.eq_ignore_ascii_case(name_or_path)) {
        builtin_score_table(name_or_path)
    } else {
        load_score_table(name_or_path)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
