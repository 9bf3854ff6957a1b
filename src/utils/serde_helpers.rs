use serde::{Deserialize, Deserializer};

/// Deserializes an identifier that may arrive as a JSON string or number.
/// Backends differ on this; the client always works with strings.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Unsigned(u64),
        Signed(i64),
    }

    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) if s.is_empty() => {
            Err(serde::de::Error::custom("identifier must not be empty"))
        }
        StringOrNumber::String(s) => Ok(s),
        StringOrNumber::Unsigned(n) => Ok(n.to_string()),
        StringOrNumber::Signed(n) => Ok(n.to_string()),
    }
}
