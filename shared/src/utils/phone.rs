//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Country calling code prepended when converting to E.164
pub const COUNTRY_CODE: &str = "+886";

// Taiwanese mobile number regex (10 digits, 09 trunk prefix)
static TAIWAN_MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^09\d{8}$").unwrap()
});

/// Check if a phone number is a valid Taiwanese mobile number (09xxxxxxxx)
pub fn is_valid_mobile(phone: &str) -> bool {
    TAIWAN_MOBILE_REGEX.is_match(phone)
}

/// Convert a canonical local number to E.164 format
///
/// Strips the leading trunk `0` and prepends the country code,
/// e.g. `0912345678` becomes `+886912345678`. Returns `None` when
/// the input is not a valid canonical number.
pub fn to_e164(phone: &str) -> Option<String> {
    if is_valid_mobile(phone) {
        Some(format!("{}{}", COUNTRY_CODE, &phone[1..]))
    } else {
        None
    }
}

/// Mask a phone number for display and logging (e.g., 0912****678)
pub fn mask_phone_number(phone: &str) -> String {
    if phone.len() >= 7 {
        format!(
            "{}****{}",
            &phone[0..4],
            &phone[phone.len() - 3..]
        )
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_mobile() {
        assert!(is_valid_mobile("0912345678"));
        assert!(is_valid_mobile("0987654321"));
        assert!(is_valid_mobile("0900000000"));
        assert!(!is_valid_mobile("0812345678")); // Wrong prefix
        assert!(!is_valid_mobile("912345678")); // Missing trunk zero
        assert!(!is_valid_mobile("09123456")); // Too short
        assert!(!is_valid_mobile("091234567890")); // Too long
        assert!(!is_valid_mobile("09abcdefgh")); // Non-digit characters
        assert!(!is_valid_mobile("+886912345678")); // Already international
    }

    #[test]
    fn test_to_e164() {
        assert_eq!(to_e164("0912345678"), Some("+886912345678".to_string()));
        assert_eq!(to_e164("0987654321"), Some("+886987654321".to_string()));
        assert_eq!(to_e164("0812345678"), None);
        assert_eq!(to_e164("invalid"), None);
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("0912345678"), "0912****678");
        assert_eq!(mask_phone_number("+886912345678"), "+886****678");
        assert_eq!(mask_phone_number("12345"), "****");
    }
}
