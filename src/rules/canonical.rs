//! Canonical rule names.
//!
//! Equivalent rule strings render to one name, and compiling that name
//! renders it again unchanged.

use super::letters::{self, LETTER_MASK, LETTERS, NEGATIVE_BIT};
use super::table::Role;
use super::{Neighborhood, Rule};

/// Body of the Moore-neighborhood Life rule.
const LIFE_BODY: &str = "B3/S23";
const LIFE_ALIAS: &str = "Life";

/// Outcome of writing one letter group.
#[derive(Debug, PartialEq, Eq)]
enum Group {
    /// Nothing written; the digit stands alone.
    Bare,
    /// Letters written after the digit.
    Letters,
    /// The group removes every arrangement, so the digit must go too.
    Cancelled,
}

/// Write the shortest form of a letter set for `count`.
///
/// A set using more than half the letters is written as the negation of
/// the rest. Seven positive letters out of thirteen stay positive.
fn write_group(out: &mut String, stored: u16, count: u8) -> Group {
    if stored == 0 {
        return Group::Bare;
    }
    let mut negative = stored & NEGATIVE_BIT != 0;
    let mut bits = stored & LETTER_MASK;
    let set = bits.count_ones() as usize;
    let max = letters::max_letters(count);

    let seven_of_thirteen = !negative && set == 7 && max == 13;
    if !seven_of_thirteen && set + usize::from(negative) > max >> 1 {
        bits = !bits & ((1u16 << max) - 1);
        if bits != 0 {
            negative = !negative;
        }
    }

    if negative && bits == 0 {
        return Group::Cancelled;
    }
    if bits == 0 {
        return Group::Bare;
    }
    if negative {
        out.push('-');
    }
    for &index in letters::canonical_order(count) {
        if bits & (1 << index) != 0 {
            out.push(LETTERS[index] as char);
        }
    }
    Group::Letters
}

/// Write one half; returns whether any digit kept letters.
fn write_half(out: &mut String, rule: &Rule, role: Role) -> bool {
    let mut kept_letters = false;
    let counts = rule.bits.counts(role);
    for count in 0..=rule.neighborhood.neighbor_count() {
        if counts & (1 << count) == 0 {
            continue;
        }
        out.push(char::from(b'0' + count));
        if rule.totalistic {
            continue;
        }
        match write_group(out, rule.bits.letters(role, count), count) {
            Group::Bare => {}
            Group::Letters => kept_letters = true,
            Group::Cancelled => {
                out.pop();
            }
        }
    }
    kept_letters
}

/// Render the canonical name of a compiled rule.
///
/// Returns the name and whether it still needs letters. The rule is not
/// modified.
pub(crate) fn render(rule: &Rule) -> (String, bool) {
    let mut name = String::new();
    let mut kept_letters = false;

    if let Some(payload) = rule.map.as_deref() {
        name.push_str("MAP");
        name.push_str(payload);
    } else {
        let mut body = String::from("B");
        kept_letters |= write_half(&mut body, rule, Role::Birth);
        body.push_str("/S");
        kept_letters |= write_half(&mut body, rule, Role::Survival);

        if rule.neighborhood == Neighborhood::Moore && body == LIFE_BODY {
            name.push_str(LIFE_ALIAS);
        } else {
            name.push_str(&body);
        }
        name.push_str(rule.neighborhood.suffix());
    }

    name.push_str(rule.family.postfix());
    if let Some(bounds) = rule.bounded_grid.as_deref() {
        name.push(':');
        name.push_str(bounds);
    }
    (name, kept_letters)
}
