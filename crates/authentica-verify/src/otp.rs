//! # OTP Entry
//!
//! The five-box one-time-code input. Each box holds at most one character;
//! typing into a box moves focus to the next one, and backspace on an empty
//! box moves focus back.

use serde::{Deserialize, Serialize};

use authentica_state::VerificationStatus;

use crate::error::VerifyError;

/// Number of OTP slots.
pub const OTP_LENGTH: usize = 5;

/// Classify a product code by its leading character.
///
/// `1…` is authentic, `2…` needs further checks, anything else is
/// counterfeit.
pub fn classify_code(code: &str) -> VerificationStatus {
    match code.chars().next() {
        Some('1') => VerificationStatus::Verified,
        Some('2') => VerificationStatus::Warning,
        _ => VerificationStatus::Fake,
    }
}

/// State of the OTP input boxes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpEntry {
    slots: [Option<char>; OTP_LENGTH],
}

impl OtpEntry {
    /// All slots empty.
    pub fn new() -> Self {
        Self::default()
    }

    fn check_index(index: usize) -> Result<(), VerifyError> {
        if index >= OTP_LENGTH {
            return Err(VerifyError::InvalidSlot {
                index,
                len: OTP_LENGTH,
            });
        }
        Ok(())
    }

    /// Put `value` into slot `index` and return the slot that should take
    /// focus. An empty `value` clears the slot and keeps focus.
    ///
    /// # Errors
    ///
    /// - [`VerifyError::InvalidSlot`] if `index` is not a slot.
    /// - [`VerifyError::InvalidCode`] if `value` is longer than one
    ///   character. The slot is left unchanged.
    pub fn set_digit(&mut self, index: usize, value: &str) -> Result<usize, VerifyError> {
        Self::check_index(index)?;
        let mut chars = value.chars();
        let ch = chars.next();
        if chars.next().is_some() {
            return Err(VerifyError::InvalidCode(format!(
                "slot {index} takes one character, got {value:?}"
            )));
        }
        self.slots[index] = ch;
        Ok(match ch {
            Some(_) if index + 1 < OTP_LENGTH => index + 1,
            _ => index,
        })
    }

    /// Handle backspace in slot `index` and return the slot that should take
    /// focus. A filled slot is cleared in place; on an empty slot focus moves
    /// back one.
    pub fn backspace(&mut self, index: usize) -> Result<usize, VerifyError> {
        Self::check_index(index)?;
        if self.slots[index].take().is_some() {
            return Ok(index);
        }
        Ok(index.saturating_sub(1))
    }

    /// The slots in order.
    pub fn slots(&self) -> &[Option<char>; OTP_LENGTH] {
        &self.slots
    }

    /// The characters entered so far, in slot order.
    pub fn code(&self) -> String {
        self.slots.iter().flatten().collect()
    }

    /// Whether every slot is filled.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Empty every slot.
    pub fn clear(&mut self) {
        self.slots = [None; OTP_LENGTH];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn typed(code: &str) -> OtpEntry {
        let mut entry = OtpEntry::new();
        for (i, ch) in code.chars().enumerate() {
            entry.set_digit(i, &ch.to_string()).unwrap();
        }
        entry
    }

    #[test]
    fn classification_by_leading_digit() {
        assert_eq!(classify_code("12345"), VerificationStatus::Verified);
        assert_eq!(classify_code("29999"), VerificationStatus::Warning);
        assert_eq!(classify_code("31111"), VerificationStatus::Fake);
        assert_eq!(classify_code(""), VerificationStatus::Fake);
    }

    #[test]
    fn typing_advances_focus() {
        let mut entry = OtpEntry::new();
        assert_eq!(entry.set_digit(0, "1").unwrap(), 1);
        assert_eq!(entry.set_digit(1, "2").unwrap(), 2);
        assert_eq!(entry.set_digit(4, "9").unwrap(), 4);
        assert_eq!(entry.code(), "129");
        assert!(!entry.is_complete());
    }

    #[test]
    fn multi_character_input_rejected() {
        let mut entry = typed("1");
        let err = entry.set_digit(0, "23").unwrap_err();
        assert!(matches!(err, VerifyError::InvalidCode(_)));
        assert_eq!(entry.slots()[0], Some('1'));
    }

    #[test]
    fn clearing_a_slot_keeps_focus() {
        let mut entry = typed("12");
        assert_eq!(entry.set_digit(1, "").unwrap(), 1);
        assert_eq!(entry.code(), "1");
    }

    #[test]
    fn backspace_moves_back_only_when_empty() {
        let mut entry = typed("12");
        assert_eq!(entry.backspace(1).unwrap(), 1);
        assert_eq!(entry.slots()[1], None);
        assert_eq!(entry.backspace(1).unwrap(), 0);
        assert_eq!(entry.slots()[0], Some('1'));
        assert_eq!(OtpEntry::new().backspace(0).unwrap(), 0);
    }

    #[test]
    fn out_of_range_slot() {
        let mut entry = OtpEntry::new();
        assert_eq!(
            entry.set_digit(5, "1"),
            Err(VerifyError::InvalidSlot { index: 5, len: 5 })
        );
        assert!(entry.backspace(9).is_err());
    }

    #[test]
    fn complete_and_clear() {
        let mut entry = typed("12345");
        assert!(entry.is_complete());
        entry.clear();
        assert_eq!(entry, OtpEntry::new());
    }

    proptest! {
        #[test]
        fn focus_stays_in_bounds(
            ops in prop::collection::vec((0usize..OTP_LENGTH, "[0-9]?", any::<bool>()), 0..30)
        ) {
            let mut entry = OtpEntry::new();
            for (index, value, backspace) in ops {
                let focus = if backspace {
                    entry.backspace(index).unwrap()
                } else {
                    entry.set_digit(index, &value).unwrap()
                };
                prop_assert!(focus < OTP_LENGTH);
                prop_assert!(entry.code().len() <= OTP_LENGTH);
            }
        }
    }
}
