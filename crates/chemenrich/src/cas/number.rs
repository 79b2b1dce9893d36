//! CAS Registry Number parsing and checksum validation.
//!
//! A CAS number is written `NNNNNNN-NN-C`: up to seven digits, two digits
//! and a single check digit. The check digit is the weighted sum of the
//! other digits modulo 10, where the digit nearest the check digit has
//! weight 1, the next weight 2, and so on.
//!
//! # Example
//!
//! ```
//! use chemenrich::cas::{validate, CasNumber};
//!
//! assert!(validate("7732-18-5").unwrap());
//! assert!(!validate("123-45-6").unwrap());
//!
//! let water = CasNumber::parse("7732185").unwrap();
//! assert_eq!(water.canonical(), "7732-18-5");
//! ```

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{EnrichError, Result};

/// Canonical hyphenated layout.
static CANONICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2,7}-\d{2}-\d$").expect("valid CAS layout regex"));

/// A CAS number split into its body digits and check digit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CasNumber {
    /// The trimmed input as given.
    pub input: String,
    /// Digits preceding the check digit, left to right.
    pub body: Vec<u8>,
    /// The trailing check digit.
    pub check_digit: u8,
}

impl CasNumber {
    /// Parse a CAS number with or without hyphens.
    ///
    /// Fails with [`EnrichError::InvalidCas`] when the input is empty, holds
    /// anything other than digits and hyphens, or has no digit before the
    /// check digit.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let digits: String = trimmed.chars().filter(|&c| c != '-').collect();

        let invalid = |reason: &str| EnrichError::InvalidCas {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        if digits.is_empty() {
            return Err(invalid("no digits"));
        }
        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_digit()) {
            return Err(invalid(&format!("unexpected character '{}'", bad)));
        }
        if digits.len() < 2 {
            return Err(invalid("no digits before the check digit"));
        }

        let mut values: Vec<u8> = digits.bytes().map(|b| b - b'0').collect();
        let check_digit = values.pop().unwrap_or_default();

        Ok(Self {
            input: trimmed.to_string(),
            body: values,
            check_digit,
        })
    }

    /// The check digit the body digits call for.
    pub fn expected_check_digit(&self) -> u8 {
        let sum: u64 = self
            .body
            .iter()
            .rev()
            .zip(1u64..)
            .map(|(&digit, weight)| digit as u64 * weight)
            .sum();
        (sum % 10) as u8
    }

    /// Whether the stored check digit matches the checksum.
    pub fn is_valid(&self) -> bool {
        self.expected_check_digit() == self.check_digit
    }

    /// Whether the input was already written as `NNNNNNN-NN-C`.
    pub fn is_canonical(&self) -> bool {
        CANONICAL.is_match(&self.input)
    }

    /// Hyphenated rendering, e.g. `7732185` → `7732-18-5`.
    ///
    /// Numbers with fewer than three body digits have no middle group and
    /// are rendered as `N-C`.
    pub fn canonical(&self) -> String {
        let body: String = self.body.iter().map(|d| char::from(b'0' + d)).collect();
        if body.len() < 3 {
            return format!("{}-{}", body, self.check_digit);
        }
        let (head, tail) = body.split_at(body.len() - 2);
        format!("{}-{}-{}", head, tail, self.check_digit)
    }
}

impl fmt::Display for CasNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

/// Validate a CAS Registry Number.
///
/// Returns `Ok(false)` for a well-formed number with the wrong check digit
/// and `Err(EnrichError::InvalidCas)` for input that is not a CAS number.
pub fn validate(cas: &str) -> Result<bool> {
    Ok(CasNumber::parse(cas)?.is_valid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_valid_numbers() {
        assert!(validate("7732-18-5").unwrap()); // water
        assert!(validate("80-05-7").unwrap()); // bisphenol A
        assert!(validate("50-00-0").unwrap()); // formaldehyde
        assert!(validate("64-17-5").unwrap()); // ethanol
        assert!(validate("1333-74-0").unwrap()); // hydrogen
    }

    #[test]
    fn test_wrong_check_digit() {
        assert!(!validate("123-45-6").unwrap());
        assert!(!validate("7732-18-4").unwrap());
    }

    #[test]
    fn test_hyphens_ignored() {
        assert_eq!(validate("7732185").unwrap(), validate("7732-18-5").unwrap());
        assert_eq!(validate("80057").unwrap(), validate("80-05-7").unwrap());
        assert!(validate("77-32-18-5").unwrap());
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert!(validate(" 7732-18-5\t").unwrap());
    }

    #[test]
    fn test_checksum_computation() {
        // 8*1 + 1*2 + 2*3 + 3*4 + 7*5 + 7*6 = 105
        let water = CasNumber::parse("7732-18-5").unwrap();
        assert_eq!(water.body, vec![7, 7, 3, 2, 1, 8]);
        assert_eq!(water.check_digit, 5);
        assert_eq!(water.expected_check_digit(), 5);

        let fake = CasNumber::parse("123-45-6").unwrap();
        assert_eq!(fake.expected_check_digit(), 5);
    }

    #[test]
    fn test_malformed_inputs() {
        for input in ["", "-", "--", "abc", "7732-18-X", "7732 18 5", "5", "-5-"] {
            let err = validate(input).unwrap_err();
            assert!(
                matches!(err, EnrichError::InvalidCas { .. }),
                "expected InvalidCas for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_malformed_reason() {
        let err = CasNumber::parse("12a-45-6").unwrap_err();
        assert!(err.to_string().contains("unexpected character 'a'"));
    }

    #[test]
    fn test_canonical_form() {
        let cas = CasNumber::parse("7732185").unwrap();
        assert!(!cas.is_canonical());
        assert_eq!(cas.canonical(), "7732-18-5");
        assert_eq!(cas.to_string(), "7732-18-5");

        let cas = CasNumber::parse("80-05-7").unwrap();
        assert!(cas.is_canonical());
        assert_eq!(cas.canonical(), "80-05-7");

        let short = CasNumber::parse("12").unwrap();
        assert_eq!(short.canonical(), "1-2");
    }

    #[test]
    fn test_idempotent() {
        let first = validate("1336-36-3").unwrap();
        for _ in 0..10 {
            assert_eq!(validate("1336-36-3").unwrap(), first);
        }
    }
}
