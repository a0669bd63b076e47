//! Non-totalistic (Hensel) letters for the Moore neighborhood.
//!
//! Each letter names one arrangement of `n` live neighbors, up to rotation
//! and reflection. Letter sets are kept as a `u16` bitset indexed by
//! position in [`LETTERS`], with [`NEGATIVE_BIT`] flagging a group that was
//! written with a leading minus.

/// All letters, in bitset order.
pub const LETTERS: &[u8; 13] = b"ceaiknjqrytwz";

/// Flag bit in a letter set marking a negated group.
pub const NEGATIVE_BIT: u16 = 1 << 13;

/// Letter bits without the negative flag.
pub const LETTER_MASK: u16 = NEGATIVE_BIT - 1;

/// Representative pattern for each letter at 1..=4 live neighbors.
/// Counts 5..=7 use the complement of 3..=1.
const REPRESENTATIVES: [&[u16]; 4] = [
    &[1, 2],
    &[5, 10, 3, 40, 33, 68],
    &[69, 42, 11, 7, 98, 13, 14, 70, 41, 97],
    &[325, 170, 15, 45, 99, 71, 106, 102, 43, 101, 105, 78, 108],
];

/// Ring bits flipped to turn an `n` neighbor pattern into an `8 - n` one.
const COMPLEMENT: u16 = 0x1ef;

/// Letter indices in canonical output order, by distance from 4.
const ORDER: [&[usize]; 5] = [
    &[],
    &[0, 1],
    &[2, 0, 1, 3, 4, 5],
    &[2, 0, 1, 3, 6, 4, 5, 7, 8, 9],
    &[2, 0, 1, 3, 6, 4, 5, 7, 8, 10, 11, 9, 12],
];

/// Fold counts 5..=8 onto 3..=0.
#[inline]
const fn fold(count: u8) -> usize {
    if count > 4 { 8 - count as usize } else { count as usize }
}

/// Number of letters defined for `count` live neighbors.
#[inline]
pub const fn max_letters(count: u8) -> usize {
    match fold(count) {
        0 => 0,
        1 => 2,
        2 => 6,
        3 => 10,
        _ => 13,
    }
}

/// Bitset index of `letter`, if it is a Hensel letter at all.
#[inline]
pub fn letter_index(letter: u8) -> Option<usize> {
    LETTERS.iter().position(|&l| l == letter)
}

/// Whether `letter` is defined for `count` live neighbors.
pub fn letter_valid(count: u8, letter: u8) -> bool {
    letter_index(letter).is_some_and(|index| index < max_letters(count))
}

/// Letter indices for `count` in the order they are written.
#[inline]
pub fn canonical_order(count: u8) -> &'static [usize] {
    ORDER[fold(count)]
}

/// Representative ring pattern (center clear) for a letter at `count`.
///
/// `count` must be in 1..=7 and `index` below [`max_letters`].
pub fn representative(count: u8, index: usize) -> u16 {
    debug_assert!((1..=7).contains(&count));
    debug_assert!(index < max_letters(count));
    if count > 4 {
        REPRESENTATIVES[7 - count as usize][index] ^ COMPLEMENT
    } else {
        REPRESENTATIVES[count as usize - 1][index]
    }
}

/// Mirror a pattern top to bottom.
#[inline]
pub const fn flip(x: u16) -> u16 {
    ((x & 0x07) << 6) | ((x & 0x1c0) >> 6) | (x & 0x38)
}

/// Rotate a pattern a quarter turn clockwise.
#[inline]
pub const fn rotate_clockwise(x: u16) -> u16 {
    ((x & 0x4) << 6)
        | ((x & 0x20) << 2)
        | ((x & 0x100) >> 2)
        | ((x & 0x2) << 4)
        | (x & 0x10)
        | ((x & 0x80) >> 4)
        | ((x & 0x1) << 2)
        | ((x & 0x8) >> 2)
        | ((x & 0x40) >> 6)
}

/// The 8 symmetric images of a pattern: four rotations, then the four
/// rotations of the mirror image. Images may repeat.
pub fn orbit(pattern: u16) -> [u16; 8] {
    let mut out = [0u16; 8];
    let mut y = pattern;
    for slot in out.iter_mut().take(4) {
        *slot = y;
        y = rotate_clockwise(y);
    }
    y = flip(y);
    for slot in out.iter_mut().skip(4) {
        *slot = y;
        y = rotate_clockwise(y);
    }
    out
}
