use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

use crate::core::Color;

/// セル列を `"BW..."` 形式の 1 本の文字列として書き出す
pub fn serialize<S>(cells: &[Color], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let s: String = cells.iter().map(|c| c.to_char()).collect();
    serializer.serialize_str(&s)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Color>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.chars()
        .map(|ch| {
            Color::from_char(ch)
                .ok_or_else(|| D::Error::custom(format!("invalid cell character '{}'", ch)))
        })
        .collect()
}
