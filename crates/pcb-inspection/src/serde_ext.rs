//! Field-level serde helpers for the inspection document format.

use serde::{Deserialize, Deserializer};

/// Read an optional list, dropping `null` elements.
///
/// A missing field (together with `#[serde(default)]`) or an explicit
/// `null` both read as an empty list.
pub(crate) fn non_null_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items: Option<Vec<Option<T>>> = Option::deserialize(deserializer)?;
    Ok(items.unwrap_or_default().into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "non_null_items")]
        items: Vec<u32>,
    }

    #[test]
    fn test_null_elements_are_dropped() {
        let holder: Holder = serde_json::from_str(r#"{"items": [1, null, 3]}"#).unwrap();
        assert_eq!(holder.items, vec![1, 3]);
    }

    #[test]
    fn test_null_list_reads_as_empty() {
        let holder: Holder = serde_json::from_str(r#"{"items": null}"#).unwrap();
        assert!(holder.items.is_empty());
    }

    #[test]
    fn test_missing_list_reads_as_empty() {
        let holder: Holder = serde_json::from_str("{}").unwrap();
        assert!(holder.items.is_empty());
    }

    #[test]
    fn test_yaml_null_elements_are_dropped() {
        let holder: Holder = serde_yaml::from_str("items:\n  - 4\n  - ~\n").unwrap();
        assert_eq!(holder.items, vec![4]);
    }
}
