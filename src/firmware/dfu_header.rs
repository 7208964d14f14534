//! LUFA bootloader header generation.
//!
//! The QMK DFU bootloader is built with a `Keyboard.h` naming the vendor and
//! product, plus the optional escape/LED/speaker pins configured under
//! `qmk_lufa_bootloader` in the keyboard's info record.

use anyhow::Result;
use serde_json::Value;

use crate::constants::APP_BINARY_NAME;
use crate::parser::dotted::{has_dotted, lookup_dotted};

/// Optional bootloader macros and the info record keys they are read from, in output order.
pub const BOOTLOADER_DEFINES: [(&str, &str); 4] = [
    ("QMK_ESC_OUTPUT", "qmk_lufa_bootloader.esc_output"),
    ("QMK_ESC_INPUT", "qmk_lufa_bootloader.esc_input"),
    ("QMK_LED", "qmk_lufa_bootloader.led"),
    ("QMK_SPEAKER", "qmk_lufa_bootloader.speaker"),
];

/// Generates the bootloader `Keyboard.h` for one keyboard.
pub struct DfuHeaderGenerator<'a> {
    keyboard: &'a str,
    info: &'a Value,
}

impl<'a> DfuHeaderGenerator<'a> {
    /// Creates a generator for `keyboard` backed by its merged info record.
    pub fn new(keyboard: &'a str, info: &'a Value) -> Self {
        Self { keyboard, info }
    }

    /// Builds the header lines in output order.
    ///
    /// Fails if the info record has no `manufacturer`.
    pub fn lines(&self) -> Result<Vec<String>> {
        let manufacturer = lookup_dotted(self.info, "manufacturer").ok_or_else(|| {
            anyhow::anyhow!(
                "Keyboard \"{}\" has no \"manufacturer\" in its info.json",
                self.keyboard
            )
        })?;

        let mut lines = vec![
            format!(
                "/* This file was generated by `{} generate-dfu-header`. Do not edit or copy. */",
                APP_BINARY_NAME
            ),
            String::new(),
            "#pragma once".to_string(),
            format!("#define MANUFACTURER {}", define_value(manufacturer)),
            format!("#define PRODUCT {} Bootloader", self.keyboard),
        ];

        for (name, key) in BOOTLOADER_DEFINES {
            if !has_dotted(self.info, key) {
                continue;
            }
            let value = lookup_dotted(self.info, key)
                .map(define_value)
                .unwrap_or_default();
            lines.push(format!("#define {} {}", name, value));
        }

        Ok(lines)
    }

    /// Renders the complete header, lines joined by `\n` without a trailing newline.
    pub fn generate(&self) -> Result<String> {
        Ok(self.lines()?.join("\n"))
    }
}

/// Formats an info record value as the body of a `#define`.
///
/// Values are written C-style (`true`, empty for `null`, compact JSON for
/// lists), not the Python spellings `qmk generate-dfu-header` produces.
fn define_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn defines(header: &str) -> Vec<&str> {
        header.lines().filter(|l| l.starts_with("#define")).collect()
    }

    #[test]
    fn test_minimal_header() {
        let info = json!({"manufacturer": "Acme"});
        let header = DfuHeaderGenerator::new("foo", &info).generate().unwrap();

        assert_eq!(
            header,
            "/* This file was generated by `qmkgen generate-dfu-header`. Do not edit or copy. */\n\
             \n\
             #pragma once\n\
             #define MANUFACTURER Acme\n\
             #define PRODUCT foo Bootloader"
        );
    }

    #[test]
    fn test_product_uses_keyboard_identifier() {
        let info = json!({"manufacturer": "Acme", "keyboard_name": "Fancy Foo"});
        let lines = DfuHeaderGenerator::new("vendor/foo/rev2", &info).lines().unwrap();

        assert!(lines.contains(&"#define PRODUCT vendor/foo/rev2 Bootloader".to_string()));
    }

    #[test]
    fn test_all_bootloader_defines_in_fixed_order() {
        // Keys deliberately out of order in the record
        let info = json!({
            "manufacturer": "Acme",
            "qmk_lufa_bootloader": {
                "speaker": "C6",
                "led": "B0",
                "esc_input": "D5",
                "esc_output": "F1"
            }
        });
        let header = DfuHeaderGenerator::new("foo", &info).generate().unwrap();

        assert_eq!(
            defines(&header),
            vec![
                "#define MANUFACTURER Acme",
                "#define PRODUCT foo Bootloader",
                "#define QMK_ESC_OUTPUT F1",
                "#define QMK_ESC_INPUT D5",
                "#define QMK_LED B0",
                "#define QMK_SPEAKER C6",
            ]
        );
    }

    #[test]
    fn test_partial_bootloader_defines() {
        let info = json!({
            "manufacturer": "Acme",
            "qmk_lufa_bootloader": {"led": "B0"}
        });
        let header = DfuHeaderGenerator::new("foo", &info).generate().unwrap();

        assert_eq!(defines(&header).len(), 3);
        assert!(header.ends_with("#define QMK_LED B0"));
        assert!(!header.contains("QMK_ESC_OUTPUT"));
        assert!(!header.contains("QMK_SPEAKER"));
    }

    #[test]
    fn test_null_bootloader_setting_emits_empty_define() {
        let info = json!({
            "manufacturer": "Acme",
            "qmk_lufa_bootloader": {"speaker": null}
        });
        let header = DfuHeaderGenerator::new("foo", &info).generate().unwrap();

        assert!(header.ends_with("#define QMK_SPEAKER "));
    }

    #[test]
    fn test_missing_manufacturer_is_an_error() {
        let info = json!({"qmk_lufa_bootloader": {"led": "B0"}});
        let err = DfuHeaderGenerator::new("foo", &info).generate().unwrap_err();

        assert!(err.to_string().contains("manufacturer"));
    }

    #[test]
    fn test_define_value_formatting() {
        assert_eq!(define_value(&json!("Acme")), "Acme");
        assert_eq!(define_value(&json!(42)), "42");
        assert_eq!(define_value(&json!(true)), "true");
        assert_eq!(define_value(&Value::Null), "");
        assert_eq!(define_value(&json!(["B0", "B1"])), r#"["B0","B1"]"#);
    }
}
