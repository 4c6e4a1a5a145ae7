use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Upper bound on how many alert recipients one input may carry
pub const MAX_ADDRESSES: usize = 3;

/// Permissive address shape: no whitespace or '@' around a single '@' and
/// at least one dot in what follows it. Deliberately far from full RFC
/// address validation
static ADDRESS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// A validated list of 1 to [`MAX_ADDRESSES`] email addresses parsed from
/// one comma separated input string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddressList {
    addresses: Vec<String>,
}

impl EmailAddressList {
    /// Parse and validate a comma separated address list
    ///
    /// `None` when there is no candidate, more than [`MAX_ADDRESSES`] of
    /// them, or any candidate fails the pattern - a list is never partially
    /// accepted. Validity is recomputed from the input on every call
    pub fn parse(input: &str) -> Option<Self> {
        let addresses: Vec<String> = input
            .trim()
            .split(',')
            .map(|candidate| candidate.trim().to_string())
            .collect();

        if addresses.is_empty() || addresses.len() > MAX_ADDRESSES {
            return None;
        }

        if addresses
            .iter()
            .all(|address| ADDRESS_PATTERN.is_match(address))
        {
            Some(Self { addresses })
        } else {
            None
        }
    }

    /// The validated addresses in input order
    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }
}

impl fmt::Display for EmailAddressList {
    // canonical recipient field: addresses joined by comma and space
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.addresses.join(", "))
    }
}

/// Validity flag for an address input as typed
pub fn is_valid(input: &str) -> bool {
    EmailAddressList::parse(input).is_some()
}
