//! Dotted-path access into nested JSON records.
//!
//! QMK data keys are usually referred to as `section.key` (for example
//! `qmk_lufa_bootloader.led`). These helpers walk a [`Value`] one segment at a
//! time instead of flattening the record.

use serde_json::Value;

/// Looks up a dotted path in a nested JSON object.
///
/// Returns `None` if any segment is missing or if an intermediate value is not
/// an object.
///
/// # Examples
///
/// ```
/// use qmkgen::parser::dotted::lookup_dotted;
/// use serde_json::json;
///
/// let record = json!({"qmk_lufa_bootloader": {"led": "B0"}});
/// assert_eq!(lookup_dotted(&record, "qmk_lufa_bootloader.led"), Some(&json!("B0")));
/// assert_eq!(lookup_dotted(&record, "qmk_lufa_bootloader.speaker"), None);
/// ```
pub fn lookup_dotted<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(record, |current, segment| {
        if segment.is_empty() {
            return None;
        }
        current.as_object()?.get(segment)
    })
}

/// Returns true if the dotted path is present, even when its value is `null`.
pub fn has_dotted(record: &Value, path: &str) -> bool {
    lookup_dotted(record, path).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_record() -> Value {
        json!({
            "manufacturer": "Acme",
            "qmk_lufa_bootloader": {
                "esc_output": "F1",
                "esc_input": "D5",
                "speaker": null
            },
            "usb": {"device": {"ver": 3}}
        })
    }

    #[test]
    fn test_lookup_top_level_key() {
        let record = sample_record();
        assert_eq!(lookup_dotted(&record, "manufacturer"), Some(&json!("Acme")));
    }

    #[test]
    fn test_lookup_nested_key() {
        let record = sample_record();
        assert_eq!(
            lookup_dotted(&record, "qmk_lufa_bootloader.esc_input"),
            Some(&json!("D5"))
        );
        assert_eq!(lookup_dotted(&record, "usb.device.ver"), Some(&json!(3)));
    }

    #[test]
    fn test_lookup_missing_segment() {
        let record = sample_record();
        assert_eq!(lookup_dotted(&record, "qmk_lufa_bootloader.led"), None);
        assert_eq!(lookup_dotted(&record, "split.enabled"), None);
    }

    #[test]
    fn test_lookup_through_scalar_is_absent() {
        let record = sample_record();
        assert_eq!(lookup_dotted(&record, "manufacturer.name"), None);
    }

    #[test]
    fn test_empty_segments_never_match() {
        let record = json!({"": {"x": 1}, "a": {"": 2}});
        assert_eq!(lookup_dotted(&record, ""), None);
        assert_eq!(lookup_dotted(&record, ".x"), None);
        assert_eq!(lookup_dotted(&record, "a."), None);
    }

    #[test]
    fn test_has_dotted_counts_null_as_present() {
        let record = sample_record();
        assert!(has_dotted(&record, "qmk_lufa_bootloader.speaker"));
        assert!(!has_dotted(&record, "qmk_lufa_bootloader.led"));
    }
}
