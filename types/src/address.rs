//! Account and contract addresses (`0x` + 40 hex digits).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Length of a canonical address string: `0x` plus 40 hex digits.
pub const ADDRESS_LEN: usize = 42;

const PREFIX: &[u8] = b"0x";

/// How strictly raw input is matched against the address format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressMatch {
    /// The whole input must be an address.
    #[default]
    Strict,
    /// Any `0x` + 40 hex digit run inside the input is accepted.
    ///
    /// This includes inputs such as `"foo0x…bar"`.
    Substring,
}

/// Returns true if `input` is exactly `0x` followed by 40 hex digits.
///
/// Letter case is ignored, including for the `0x` prefix.
pub fn is_valid_address(input: &str) -> bool {
    input.len() == ADDRESS_LEN && find_address_run(input) == Some(0)
}

/// Returns true if `input` contains a `0x` + 40 hex digit run anywhere.
pub fn is_valid_address_lenient(input: &str) -> bool {
    find_address_run(input).is_some()
}

/// Byte offset of the first address-shaped run in `input`, ignoring case.
fn find_address_run(input: &str) -> Option<usize> {
    let lower = input.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    if bytes.len() < ADDRESS_LEN {
        return None;
    }
    (0..=bytes.len() - ADDRESS_LEN).find(|&start| {
        bytes[start..].starts_with(PREFIX)
            && bytes[start + PREFIX.len()..start + ADDRESS_LEN]
                .iter()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    })
}

/// A validated account or contract address.
///
/// Keeps the letter case it was entered with, so checksummed addresses
/// are passed through to the provider untouched.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Parse raw user input under the given matching mode.
    ///
    /// Under [`AddressMatch::Substring`] the returned address is the first
    /// embedded run, not the whole input.
    pub fn parse(raw: &str, mode: AddressMatch) -> Result<Self, ValidationError> {
        let start = match mode {
            AddressMatch::Strict if is_valid_address(raw) => Some(0),
            AddressMatch::Strict => None,
            AddressMatch::Substring => find_address_run(raw),
        };
        match start {
            Some(start) => Ok(Self(raw[start..start + ADDRESS_LEN].to_string())),
            None => Err(ValidationError::InvalidAddress(raw.to_string())),
        }
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form shown next to the connect toggle: `0x12345....2345678`.
    pub fn abbreviated(&self) -> String {
        format!("{}....{}", &self.0[..7], &self.0[35..])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Address {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, AddressMatch::Strict)
    }
}

impl TryFrom<String> for Address {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}
