//! 3x3 lookup table generation.

use super::letters::{self, LETTER_MASK, NEGATIVE_BIT};
use super::map;
use super::neighborhood::{CENTER_BIT, Neighborhood, PATTERN_COUNT};

/// Next-generation outcome for every 3x3 pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleTable {
    table: [u8; PATTERN_COUNT],
}

impl RuleTable {
    pub(crate) fn from_raw(table: [u8; PATTERN_COUNT]) -> Self {
        Self { table }
    }

    /// 1 when the center of `pattern` is alive next generation.
    #[inline(always)]
    pub fn lookup(&self, pattern: u16) -> u8 {
        self.table[pattern as usize & (PATTERN_COUNT - 1)]
    }

    /// Whether a dead cell with no live neighbors is born.
    #[inline]
    pub fn births_on_zero(&self) -> bool {
        self.table[0] != 0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.table
    }
}

/// Birth or survival half of a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Birth,
    Survival,
}

impl Role {
    #[inline]
    const fn center(self) -> u16 {
        match self {
            Role::Birth => 0,
            Role::Survival => CENTER_BIT,
        }
    }

    #[inline]
    const fn slot(self) -> usize {
        match self {
            Role::Birth => 0,
            Role::Survival => 1,
        }
    }
}

/// Digit and letter bookkeeping gathered while filling a table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RuleBits {
    /// Bit `n` set when `n` neighbors appear in the rule, per role.
    pub counts: [u16; 2],
    /// Letter sets per role and neighbor count.
    pub letters: [[u16; 9]; 2],
}

impl RuleBits {
    #[inline]
    pub fn counts(&self, role: Role) -> u16 {
        self.counts[role.slot()]
    }

    #[inline]
    pub fn letters(&self, role: Role, count: u8) -> u16 {
        self.letters[role.slot()][count as usize]
    }
}

/// Scratch area for one compile. Starts zeroed; consumed by [`finish`].
///
/// [`finish`]: TableBuilder::finish
pub struct TableBuilder {
    nbhd: Neighborhood,
    table: [u8; PATTERN_COUNT],
    bits: RuleBits,
}

impl TableBuilder {
    pub fn new(nbhd: Neighborhood) -> Self {
        Self {
            nbhd,
            table: [0u8; PATTERN_COUNT],
            bits: RuleBits::default(),
        }
    }

    /// Mark every pattern with `count` live neighbors.
    ///
    /// A count already applied for this role is skipped.
    pub fn set_totalistic(&mut self, count: u8, role: Role) {
        let flag = 1u16 << count;
        if self.bits.counts[role.slot()] & flag != 0 {
            return;
        }
        self.bits.counts[role.slot()] |= flag;
        for pattern in 0u16..PATTERN_COUNT as u16 {
            if pattern & CENTER_BIT == 0 && self.nbhd.live_neighbors(pattern) == count as u32 {
                self.table[(pattern | role.center()) as usize] = 1;
            }
        }
    }

    /// Set (or clear, when `negated`) the orbit of one letter.
    pub fn set_letter(&mut self, count: u8, role: Role, index: usize, negated: bool) {
        if count == 0 || count == 8 {
            self.set_totalistic(count, role);
            return;
        }
        self.bits.counts[role.slot()] |= 1 << count;
        let letters = &mut self.bits.letters[role.slot()][count as usize];
        *letters |= 1 << index;
        if negated {
            *letters |= NEGATIVE_BIT;
        }
        let value = u8::from(!negated);
        let base = letters::representative(count, index) | role.center();
        for pattern in letters::orbit(base) {
            self.table[pattern as usize] = value;
        }
    }

    /// Apply digits only.
    pub fn apply_totalistic(&mut self, part: &str, role: Role) {
        for digit in part.bytes().filter(u8::is_ascii_digit) {
            self.set_totalistic(digit - b'0', role);
        }
    }

    /// Apply digits with optional letter groups such as `2-an3cq`.
    ///
    /// A digit not directly followed by a letter is set totalistically
    /// first, so a negated group carves its orbits out of the full count.
    pub fn apply_letters(&mut self, part: &str, role: Role) {
        let chars = part.as_bytes();
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            i += 1;
            if !(b'0'..=b'8').contains(&c) {
                continue;
            }
            let count = c - b'0';
            let next = chars.get(i).copied();
            if next.and_then(letters::letter_index).is_none() {
                self.set_totalistic(count, role);
            }
            let mut negated = false;
            if next == Some(b'-') {
                negated = true;
                i += 1;
            }
            while let Some(index) = chars.get(i).copied().and_then(letters::letter_index) {
                self.set_letter(count, role, index, negated);
                i += 1;
            }
        }
    }

    /// Fill from a validated MAP payload.
    pub fn apply_map(&mut self, payload: &str) {
        self.table = map::expand(payload, self.nbhd);
    }

    /// Letters the table actually holds for `count`, as a positive set.
    fn letters_in_table(&self, count: u8, role: Role) -> u16 {
        (0..letters::max_letters(count))
            .filter(|&index| {
                let pattern = letters::representative(count, index) | role.center();
                self.table[pattern as usize] != 0
            })
            .fold(0u16, |acc, index| acc | 1 << index)
    }

    /// Rewrite letter sets that no longer describe the table.
    ///
    /// A digit given more than once (`33a`, `3a3-c`) can leave a recorded
    /// group that disagrees with the orbits it filled.
    fn reconcile_letters(&mut self) {
        if self.nbhd != Neighborhood::Moore {
            return;
        }
        for role in [Role::Birth, Role::Survival] {
            for count in 1u8..8 {
                if self.bits.counts[role.slot()] & (1 << count) == 0 {
                    continue;
                }
                let full = (1u16 << letters::max_letters(count)) - 1;
                let stored = self.bits.letters[role.slot()][count as usize];
                let recorded = match stored & LETTER_MASK {
                    0 => full,
                    bits if stored & NEGATIVE_BIT != 0 => full & !bits,
                    bits => bits,
                };
                let actual = self.letters_in_table(count, role);
                if actual != recorded {
                    self.bits.letters[role.slot()][count as usize] = match actual {
                        0 => full | NEGATIVE_BIT,
                        set if set == full => 0,
                        set => set,
                    };
                }
            }
        }
    }

    pub fn finish(mut self) -> (RuleTable, RuleBits) {
        self.reconcile_letters();
        (RuleTable::from_raw(self.table), self.bits)
    }
}
