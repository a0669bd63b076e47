//! MAP rules: a base64 truth table over the active neighborhood.
//!
//! The payload is read six bits per character, most significant first.
//! Bit `k` of the decoded string is the outcome for the reduced pattern `k`,
//! where the reduction keeps only the neighborhood's positions (center
//! included) in pattern bit order.

use super::RuleError;
use super::neighborhood::{Neighborhood, PATTERN_COUNT};

const BASE64: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

#[inline]
fn sextet(c: u8) -> Option<u8> {
    BASE64.iter().position(|&b| b == c).map(|i| i as u8)
}

/// Strip `==` padding and check length and alphabet.
///
/// Returns the bare payload and the neighborhood its length implies.
pub fn validate(payload: &str) -> Result<(&str, Neighborhood), RuleError> {
    let bare = match payload.strip_suffix("==") {
        Some(stripped) if payload.len() > 2 => stripped,
        _ => payload,
    };
    let nbhd = Neighborhood::from_map_len(bare.len()).ok_or(RuleError::MapLength(bare.len()))?;
    if let Some(bad) = bare.chars().find(|&c| !c.is_ascii() || sextet(c as u8).is_none()) {
        return Err(RuleError::MapCharacter(bad));
    }
    Ok((bare, nbhd))
}

/// Decode a validated payload into its `2^(n+1)` truth bits.
pub fn decode_bits(payload: &str, nbhd: Neighborhood) -> Vec<u8> {
    let len = 1usize << (nbhd.neighbor_count() + 1);
    let mut bits = Vec::with_capacity(len);
    for &c in payload.as_bytes() {
        let value = sextet(c).unwrap_or(0);
        for shift in (0..6).rev() {
            if bits.len() == len {
                break;
            }
            bits.push((value >> shift) & 1);
        }
    }
    bits.resize(len, 0);
    bits
}

/// Index of `pattern` in a MAP for `nbhd`.
pub fn reduce_pattern(pattern: u16, nbhd: Neighborhood) -> usize {
    let mask = nbhd.mask();
    let mut index = 0usize;
    for bit in (0..9).rev() {
        if mask & (1 << bit) != 0 {
            index = (index << 1) | ((pattern >> bit) & 1) as usize;
        }
    }
    index
}

/// Expand a validated payload into a full 512-entry table.
pub fn expand(payload: &str, nbhd: Neighborhood) -> [u8; PATTERN_COUNT] {
    let bits = decode_bits(payload, nbhd);
    let mut table = [0u8; PATTERN_COUNT];
    for (pattern, slot) in table.iter_mut().enumerate() {
        *slot = bits[reduce_pattern(pattern as u16, nbhd)];
    }
    table
}

#[cfg(test)]
mod tests {
    use super::{BASE64, decode_bits, reduce_pattern, validate};
    use crate::rules::{Neighborhood, RuleError};

    fn encode_bits(bits: &[u8]) -> String {
        bits.chunks(6)
            .map(|chunk| {
                let value = chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &b)| acc | ((b & 1) << (5 - i)));
                BASE64[value as usize] as char
            })
            .collect()
    }

    #[test]
    fn padding_is_stripped() {
        let payload = format!("{}==", "A".repeat(86));
        let (bare, nbhd) = validate(&payload).unwrap();
        assert_eq!(bare.len(), 86);
        assert_eq!(nbhd, Neighborhood::Moore);
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert_eq!(validate("ABCDEFGHIJ"), Err(RuleError::MapLength(10)));
        assert_eq!(validate("=="), Err(RuleError::MapLength(2)));
    }

    #[test]
    fn bad_alphabet_is_rejected() {
        assert_eq!(validate("ABC!EF"), Err(RuleError::MapCharacter('!')));
    }

    #[test]
    fn decode_reads_msb_first() {
        let bits = decode_bits("gAAAAA", Neighborhood::VonNeumann);
        assert_eq!(bits.len(), 32);
        assert_eq!(bits[0], 1);
        assert!(bits[1..].iter().all(|&b| b == 0));

        let bits = decode_bits("AAAAAw", Neighborhood::VonNeumann);
        // 'w' = 48 = 0b110000; only its top two bits are used.
        assert_eq!(&bits[30..], &[1, 1]);
        assert_eq!(bits.iter().filter(|&&b| b == 1).count(), 2);
    }

    #[test]
    fn moore_reduction_is_identity() {
        for p in 0u16..512 {
            assert_eq!(reduce_pattern(p, Neighborhood::Moore), p as usize);
        }
    }

    #[test]
    fn von_neumann_reduction_keeps_orthogonals() {
        // N W C E S -> bits 4..0 of the reduced index.
        assert_eq!(reduce_pattern(0x080, Neighborhood::VonNeumann), 0b10000);
        assert_eq!(reduce_pattern(0x010, Neighborhood::VonNeumann), 0b00100);
        assert_eq!(reduce_pattern(0x002, Neighborhood::VonNeumann), 0b00001);
        assert_eq!(reduce_pattern(0x145, Neighborhood::VonNeumann), 0);
    }

    #[test]
    fn encode_inverts_decode() {
        let payload = "QUJDRE";
        let bits = decode_bits(payload, Neighborhood::VonNeumann);
        assert_eq!(encode_bits(&bits), "QUJDRA");
    }
}
