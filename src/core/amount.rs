//! Keypad-style editing of the amount string.

use crate::core::convert::parse_amount;

/// Longest amount accepted once the user has started typing.
pub const MAX_AMOUNT_LEN: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountInput {
    text: String,
    has_user_typed: bool,
}

impl AmountInput {
    /// Wraps a stored amount. "0" and "1" count as untouched placeholders,
    /// so the next digit replaces them.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let has_user_typed = text != "1" && text != "0";
        Self {
            text,
            has_user_typed,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn has_user_typed(&self) -> bool {
        self.has_user_typed
    }

    pub fn value(&self) -> f64 {
        parse_amount(&self.text)
    }

    /// Applies one keypad key. Keys other than digits and `.` are ignored.
    /// Returns whether the text changed.
    pub fn press(&mut self, key: char) -> bool {
        let before = self.text.clone();
        if key == '.' {
            if !self.text.contains('.') {
                if self.has_user_typed {
                    self.text.push('.');
                } else {
                    self.text = "0.".to_string();
                }
                self.has_user_typed = true;
            }
        } else if key.is_ascii_digit() {
            if self.has_user_typed && self.text.len() >= MAX_AMOUNT_LEN {
                return false;
            }
            if !self.has_user_typed || self.text == "0" {
                self.text = key.to_string();
            } else {
                self.text.push(key);
            }
            self.has_user_typed = true;
        }
        self.text != before
    }

    pub fn clear(&mut self) {
        self.text = "0".to_string();
        self.has_user_typed = false;
    }
}

impl Default for AmountInput {
    fn default() -> Self {
        Self::new("0")
    }
}
