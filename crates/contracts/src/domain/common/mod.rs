//! Serde helpers shared by the domain contracts.

use serde::{Deserialize, Deserializer};

/// Deserialize a decimal amount that the API may send either as a JSON
/// number or as a string (`12.5` and `"12.50"` are both accepted).
/// Missing/null fields should pair this with `#[serde(default)]`.
pub fn flexible_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid decimal string: {s:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Amount {
        #[serde(deserialize_with = "super::flexible_f64")]
        value: f64,
    }

    #[test]
    fn test_flexible_f64_number() {
        let a: Amount = serde_json::from_str(r#"{"value": 12.5}"#).unwrap();
        assert_eq!(a.value, 12.5);
    }

    #[test]
    fn test_flexible_f64_string() {
        let a: Amount = serde_json::from_str(r#"{"value": "12.50"}"#).unwrap();
        assert_eq!(a.value, 12.5);
    }

    #[test]
    fn test_flexible_f64_rejects_garbage() {
        assert!(serde_json::from_str::<Amount>(r#"{"value": "not a number"}"#).is_err());
    }
}
