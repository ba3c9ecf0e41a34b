//! Masking of secret values for log output.

use std::borrow::Cow;

use crate::Field;

/// Upper bound on characters kept visible at each end of a masked value.
const MAX_VISIBLE_CHARS: usize = 4;

/// Values this short are replaced entirely.
const FULLY_HIDDEN_LEN: usize = 8;

/// Redact a secret value for log output.
///
/// Keeps at most a quarter of the value visible, split between both ends and capped at four
/// characters per end, and replaces everything in between with `*`. Values of eight
/// characters or fewer are replaced entirely. The result never equals the input for values
/// longer than eight characters.
pub fn mask(value: &str) -> String {
    if value.is_empty() {
        return "<empty>".to_string();
    }

    let length = value.chars().count();

    if length <= FULLY_HIDDEN_LEN {
        return "*".repeat(length);
    }

    let visible = (length / 4).min(MAX_VISIBLE_CHARS);
    let start: String = value.chars().take(visible).collect();
    let end: String = value.chars().skip(length - visible).collect();
    let masked = format!("{start}{}{end}", "*".repeat(length - visible * 2));

    // a value whose middle is already asterisks would come back unchanged
    if masked == value {
        return "<redacted>".to_string();
    }

    masked
}

/// How a field's value appears in logs and debug output: masked for sensitive fields,
/// verbatim otherwise.
pub fn display_value(field: Field, value: &str) -> Cow<'_, str> {
    if field.is_sensitive() {
        Cow::Owned(mask(value))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_a_quarter_visible() {
        assert_eq!(mask("secret123"), "se*****23");
        assert_eq!(mask("abcd1234efgh"), "abc******fgh");
    }

    #[test]
    fn caps_visible_characters() {
        assert_eq!(mask("ATATT3xFfGF0T4nF9g2kXyZw"), "ATAT****************XyZw");
    }

    #[test]
    fn short_values_are_fully_hidden() {
        assert_eq!(mask("a"), "*");
        assert_eq!(mask("12345678"), "********");
    }

    #[test]
    fn empty_value() {
        assert_eq!(mask(""), "<empty>");
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(mask("éééxyzwvuààà"), "ééé******ààà");
    }

    #[test]
    fn never_echoes_long_values() {
        let values = [
            "secret123",
            "abc******fgh",
            "*********",
            "ATATT3xFfGF0T4nF9g2k",
            "Bearer xyz.abc.def",
        ];

        for value in values {
            assert_ne!(mask(value), value, "{value} was not masked");
        }
    }

    #[test]
    fn deterministic() {
        assert_eq!(mask("ATATT3xFfGF0T4nF9g2k"), mask("ATATT3xFfGF0T4nF9g2k"));
    }

    #[test]
    fn token_is_masked_and_url_is_not() {
        let url = "https://issues.example.com";
        let token = "abcd1234efgh";

        assert_eq!(display_value(Field::JiraUrl, url), url);
        assert_eq!(display_value(Field::JiraApiToken, token), "abc******fgh");
    }

    #[test]
    fn every_sensitive_field_is_masked() {
        let value = "a-long-secret-value";

        for field in Field::ALL {
            if field.is_sensitive() {
                assert_ne!(display_value(field, value), value, "{field} leaked");
            } else {
                assert_eq!(display_value(field, value), value);
            }
        }
    }
}
