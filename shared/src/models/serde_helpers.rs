//! Common serde helpers for partial-update payloads

use serde::{Deserialize, Deserializer};

/// Deserialize a nullable patch field, keeping "absent" and "null" apart.
///
/// Use with `#[serde(default, deserialize_with = "double_option")]`:
/// - field absent → `None` (keep the stored value)
/// - field `null` → `Some(None)` (clear it)
/// - field set    → `Some(Some(v))`
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Deserialize bool that treats null as true
pub fn bool_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|opt| opt.unwrap_or(true))
}

/// Deserialize bool that treats null as false
pub fn bool_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|opt| opt.unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        price: Option<Option<i64>>,
        #[serde(default = "yes", deserialize_with = "bool_true")]
        available: bool,
    }

    fn yes() -> bool {
        true
    }

    #[test]
    fn test_double_option_states() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.price, None);

        let cleared: Patch = serde_json::from_str(r#"{"price":null}"#).unwrap();
        assert_eq!(cleared.price, Some(None));

        let set: Patch = serde_json::from_str(r#"{"price":900}"#).unwrap();
        assert_eq!(set.price, Some(Some(900)));
    }

    #[test]
    fn test_bool_true_null() {
        let p: Patch = serde_json::from_str(r#"{"available":null}"#).unwrap();
        assert!(p.available);
        let p: Patch = serde_json::from_str(r#"{"available":false}"#).unwrap();
        assert!(!p.available);
    }
}
