//! Phone number normalization.

use crate::types::PhoneNumber;

/// Strip everything that is not an ASCII digit.
pub fn normalize(raw: &str) -> PhoneNumber {
    raw.chars().filter(char::is_ascii_digit).collect()
}
