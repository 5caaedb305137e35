//! Lenient boolean parsing for query strings and form fields.

/// Parses a boolean flag as sent by HTML forms and query strings.
///
/// Accepts `true/false`, `1/0`, `on/off`, and `yes/no`, case-insensitively.
/// Returns `None` for anything else.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Some(true),
        "false" | "0" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy_values() {
        for value in ["true", "TRUE", "1", "on", "Yes", " true "] {
            assert_eq!(parse_flag(value), Some(true), "{value}");
        }
    }

    #[test]
    fn test_falsy_values() {
        for value in ["false", "False", "0", "off", "no"] {
            assert_eq!(parse_flag(value), Some(false), "{value}");
        }
    }

    #[test]
    fn test_invalid_values() {
        for value in ["", "maybe", "2", "truthy"] {
            assert_eq!(parse_flag(value), None, "{value}");
        }
    }
}
