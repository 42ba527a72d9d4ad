//! Solidity ABI encoding for the voting contract's fixed interface.
//!
//! Only the shapes the contract uses are supported: `uint256` arguments,
//! and `string`, `uint256` and `(uint256, string, uint256)` return values.
//! Every `uint256` the client handles must fit in a `u64`.

use ballot_types::Candidate;
use sha3::{Digest, Keccak256};

use crate::error::AbiError;

pub const VOTE_TOPIC: &str = "voteTopic()";
pub const CANDIDATES_COUNT: &str = "candidatesCount()";
pub const CANDIDATES: &str = "candidates(uint256)";
pub const VOTE: &str = "vote(uint256)";

/// Size of one ABI word in bytes.
pub const WORD: usize = 32;

/// First four bytes of the Keccak-256 hash of a function signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = Keccak256::digest(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Big-endian, left-padded `uint256` word.
pub fn encode_uint(value: u64) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[WORD - 8..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Calldata for `signature` applied to `uint256` arguments.
pub fn encode_call(signature: &str, args: &[u64]) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + args.len() * WORD);
    data.extend_from_slice(&selector(signature));
    for arg in args {
        data.extend_from_slice(&encode_uint(*arg));
    }
    data
}

/// Return data of a function returning a single `string`.
pub fn encode_string(value: &str) -> Vec<u8> {
    let mut data = encode_uint(WORD as u64).to_vec();
    append_string_tail(&mut data, value);
    data
}

/// Return data of `candidates(uint256)`.
pub fn encode_candidate(candidate: &Candidate) -> Vec<u8> {
    let mut data = Vec::with_capacity(5 * WORD);
    data.extend_from_slice(&encode_uint(candidate.id));
    data.extend_from_slice(&encode_uint(3 * WORD as u64));
    data.extend_from_slice(&encode_uint(candidate.count));
    append_string_tail(&mut data, &candidate.name);
    data
}

fn append_string_tail(data: &mut Vec<u8>, value: &str) {
    let bytes = value.as_bytes();
    data.extend_from_slice(&encode_uint(bytes.len() as u64));
    data.extend_from_slice(bytes);
    let padding = (WORD - bytes.len() % WORD) % WORD;
    data.resize(data.len() + padding, 0);
}

/// The word starting at byte `offset`.
fn word_at(data: &[u8], offset: usize) -> Result<&[u8], AbiError> {
    let end = offset.checked_add(WORD).ok_or(AbiError::Overflow)?;
    data.get(offset..end).ok_or(AbiError::OutOfBounds {
        needed: end,
        len: data.len(),
    })
}

fn word_to_u64(word: &[u8]) -> Result<u64, AbiError> {
    if word[..WORD - 8].iter().any(|&b| b != 0) {
        return Err(AbiError::Overflow);
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&word[WORD - 8..]);
    Ok(u64::from_be_bytes(buf))
}

fn to_usize(value: u64) -> Result<usize, AbiError> {
    usize::try_from(value).map_err(|_| AbiError::Overflow)
}

/// Decode the `uint256` in head slot `index`.
pub fn decode_uint(data: &[u8], index: usize) -> Result<u64, AbiError> {
    let offset = index.checked_mul(WORD).ok_or(AbiError::Overflow)?;
    word_to_u64(word_at(data, offset)?)
}

/// Decode the `string` whose offset sits in head slot `index`.
pub fn decode_string(data: &[u8], index: usize) -> Result<String, AbiError> {
    let offset = to_usize(decode_uint(data, index)?)?;
    let len = to_usize(word_to_u64(word_at(data, offset)?)?)?;
    let start = offset + WORD;
    let end = start.checked_add(len).ok_or(AbiError::Overflow)?;
    let bytes = data.get(start..end).ok_or(AbiError::OutOfBounds {
        needed: end,
        len: data.len(),
    })?;
    String::from_utf8(bytes.to_vec()).map_err(|_| AbiError::InvalidUtf8)
}

/// Decode a `(uint256 id, string name, uint256 count)` tuple positionally.
pub fn decode_candidate(data: &[u8]) -> Result<Candidate, AbiError> {
    Ok(Candidate {
        id: decode_uint(data, 0)?,
        name: decode_string(data, 1)?,
        count: decode_uint(data, 2)?,
    })
}
