use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

/// Deserialize an optional decimal that may arrive as a JSON number or a string.
///
/// Numbers go through `Decimal::from_f64`, which keeps the shortest decimal
/// rendering (`0.1` stays `0.1`). Unparseable values become `None`.
pub(crate) fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrString>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        NumberOrString::Number(n) => Decimal::from_f64(n),
        NumberOrString::String(s) => Decimal::from_str(s.trim())
            .or_else(|_| Decimal::from_scientific(s.trim()))
            .ok(),
    }))
}
