use crate::error::{PorticoError, Result};

/// Collects field-constraint failures and reports them as one
/// `Validation` error, messages joined by `"; "`.
#[derive(Debug, Default)]
pub struct FieldCheck {
    messages: Vec<String>,
}

impl FieldCheck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Present, at least one character, at most `max` characters.
    pub fn required(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        if value.is_empty() {
            self.messages.push(format!("{field} is required"));
        } else {
            self.max_len(field, value, max);
        }
        self
    }

    /// May be empty; otherwise at most `max` characters.
    pub fn optional(&mut self, field: &str, value: Option<&str>, max: usize) -> &mut Self {
        if let Some(value) = value {
            self.max_len(field, value, max);
        }
        self
    }

    /// Foreign key that must be supplied (non-zero).
    pub fn required_id(&mut self, field: &str, id: u64) -> &mut Self {
        if id == 0 {
            self.messages.push(format!("{field} is required"));
        }
        self
    }

    fn max_len(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.messages
                .push(format!("{field} must be at most {max} characters"));
        }
    }

    pub fn finish(&mut self) -> Result<()> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(PorticoError::Validation(self.messages.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_input_passes() {
        assert!(FieldCheck::new().required("Name", "x", 3).finish().is_ok());
    }

    #[test]
    fn messages_are_joined() {
        let err = FieldCheck::new()
            .required("Path", "", 255)
            .required("Upstream URL", "abcd", 3)
            .required_id("Domain ID", 0)
            .finish()
            .unwrap_err();
        assert_eq!(
            err,
            PorticoError::Validation(
                "Path is required; Upstream URL must be at most 3 characters; Domain ID is required"
                    .into()
            )
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(FieldCheck::new().required("Name", "ééé", 3).finish().is_ok());
    }

    #[test]
    fn optional_skips_absent_values() {
        assert!(FieldCheck::new().optional("Plugin", None, 1).finish().is_ok());
        assert!(FieldCheck::new().optional("Plugin", Some("ab"), 1).finish().is_err());
    }
}
