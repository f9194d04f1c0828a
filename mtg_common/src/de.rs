//! Lenient deserializers for card JSON.
//!
//! Collection files are edited by hand and by older tool versions, so the same
//! field may arrive as a string, a number, `null` or a list of letters.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
    List(Vec<Option<Loose>>),
}

impl Loose {
    fn into_text(self) -> String {
        match self {
            Loose::Text(s) => s,
            Loose::Integer(n) => n.to_string(),
            Loose::Float(f) => f.to_string(),
            Loose::Flag(b) => b.to_string(),
            Loose::List(items) => items
                .into_iter()
                .flatten()
                .map(Loose::into_text)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    fn into_letters(self) -> Vec<String> {
        match self {
            Loose::List(items) => items.into_iter().flatten().map(Loose::into_text).collect(),
            other => split_letters(&other.into_text()),
        }
    }
}

fn split_letters(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// `null` becomes the empty string.
pub fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Any scalar (or list of scalars, comma-joined) as a string; `null` is empty.
pub fn loose_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Loose>::deserialize(deserializer)?
        .map(Loose::into_text)
        .unwrap_or_default())
}

/// A list of letters, accepting either `["W","U"]` or `"W,U"`.
pub fn letters<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Loose>::deserialize(deserializer)?
        .map(Loose::into_letters)
        .unwrap_or_default())
}
