//! Query string decoding module
//!
//! Percent-decodes `application/x-www-form-urlencoded` query strings.
//! A repeated key keeps its last value.

/// Decoded key/value pairs in query order.
///
/// A missing query decodes like an empty one. Undecodable input yields no
/// pairs so callers fall back to their default behavior.
pub fn pairs(raw: Option<&str>) -> Vec<(String, String)> {
    match serde_urlencoded::from_str(raw.unwrap_or("")) {
        Ok(pairs) => pairs,
        Err(e) => {
            crate::logger::log_debug(&format!("Ignoring undecodable query string: {e}"));
            Vec::new()
        }
    }
}

/// Last value of `key`, the way form handlers overwrite repeated keys
pub fn last_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .rev()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_query() {
        assert!(pairs(None).is_empty());
        assert!(pairs(Some("")).is_empty());
    }

    #[test]
    fn test_percent_decoding() {
        let p = pairs(Some("action=create&filename=..%2Fshell.php"));
        assert_eq!(last_value(&p, "action").as_deref(), Some("create"));
        assert_eq!(last_value(&p, "filename").as_deref(), Some("../shell.php"));
    }

    #[test]
    fn test_empty_value_is_present() {
        let p = pairs(Some("action=create&filename="));
        assert_eq!(last_value(&p, "filename").as_deref(), Some(""));
    }

    #[test]
    fn test_repeated_key_keeps_last() {
        let p = pairs(Some("filename=a.php&x=1&filename=b.php"));
        assert_eq!(last_value(&p, "filename").as_deref(), Some("b.php"));
        assert_eq!(last_value(&p, "missing"), None);
    }
}
