//! Per-cell state transitions for the Super and History families.
//!
//! The binary rule decides whether a cell is alive next generation; the
//! family then picks which odd (alive) or even (dead) state it takes, using
//! the set of states present among its neighbors.

use super::bits::isolated_bit_index;
use crate::State;
use crate::rules::{Family, Neighbors, Rule, parity_pattern};

const fn states(list: &[u32]) -> u32 {
    let mut mask = 0;
    let mut i = 0;
    while i < list.len() {
        mask |= 1 << list[i];
        i += 1;
    }
    mask
}

/// Odd Super states.
const ALIVE: u32 = states(&[1, 3, 5, 7, 9, 11, 13, 15, 17, 19, 21, 23, 25]);
const ALIVE_WITH_14: u32 = ALIVE | states(&[14]);
const ALIVE_WITH_14_OR_18: u32 = ALIVE_WITH_14 | states(&[18]);
const ALIVE_7_OR_9: u32 = states(&[7, 9]);
const ALIVE_NOT_7_OR_9: u32 = ALIVE & !ALIVE_7_OR_9;
const ALIVE_7_OR_11: u32 = states(&[7, 11]);
const ALIVE_NOT_7_OR_11: u32 = ALIVE & !ALIVE_7_OR_11;
/// Marker states a newborn cell may copy from a lone parent.
const ALIVE_9_TO_25: u32 = states(&[9, 11, 13, 15, 17, 19, 21, 23, 25]);
const ALIVE_1_3_5_9_11: u32 = states(&[1, 3, 5, 9, 11]);

/// Neighbor state that kills live cells next to it, in both families.
const BRIDGE: u32 = states(&[6]);

/// Highest odd Super state that decays through the trail states.
const LAST_DECAYING: State = 11;

impl Rule {
    /// Next state of a cell given its own state and its eight neighbors.
    ///
    /// States must be below [`Rule::state_count`]. Neighbors outside the
    /// rule's neighborhood are ignored.
    #[inline]
    pub fn next_state(&self, center: State, neighbors: &Neighbors) -> State {
        debug_assert!((center as usize) < self.state_count(), "state {center} out of range");
        let born_or_survives = self.table.lookup(parity_pattern(center, neighbors)) != 0;
        let types = self.neighborhood.type_mask(neighbors);

        if types & BRIDGE != 0 && center & 1 != 0 {
            return if center == 1 { 2 } else { 4 };
        }
        match self.family {
            Family::History => history_next(center, born_or_survives),
            Family::Super => super_next(center, born_or_survives, types),
        }
    }
}

fn history_next(center: State, alive: bool) -> State {
    let was_alive = center & 1 != 0;
    match (alive, was_alive) {
        (true, false) => match center {
            4 => 3,
            6 => 6,
            _ => 1,
        },
        (false, true) => {
            if center == 5 {
                4
            } else {
                center + 1
            }
        }
        _ => center,
    }
}

/// Odd state a newborn copies when exactly one marker state is nearby.
#[inline]
fn lone_marker(types: u32) -> Option<State> {
    isolated_bit_index(types & ALIVE_9_TO_25).map(|index| index as State)
}

fn super_birth(center: State, types: u32) -> State {
    match center {
        4 => 3,
        6 => 6,
        8 => 7,
        10 | 12 => {
            if types & ALIVE_7_OR_9 != 0 && types & ALIVE_NOT_7_OR_9 == 0 {
                9
            } else if types & ALIVE_7_OR_11 != 0 && types & ALIVE_NOT_7_OR_11 == 0 {
                11
            } else {
                lone_marker(types).unwrap_or(1)
            }
        }
        _ => {
            let marker = if types & states(&[1]) == 0 {
                lone_marker(types)
            } else {
                None
            };
            match marker {
                Some(state) => state,
                None if types & ALIVE_1_3_5_9_11 == 0 => 13,
                None => 1,
            }
        }
    }
}

fn super_death(center: State) -> State {
    match center {
        5 => 4,
        c if c <= LAST_DECAYING => c + 1,
        _ => 0,
    }
}

/// History fading of a cell that stays dead.
fn super_fade(center: State, types: u32) -> State {
    let revert = |needed: u32, to: State| if types & needed != 0 { to } else { center };
    match center {
        14 => 0,
        16 => revert(ALIVE_WITH_14, 14),
        18 => revert(states(&[22]), 22),
        20 => revert(states(&[18]), 18),
        22 => revert(states(&[20]), 20),
        24 => revert(ALIVE_WITH_14_OR_18, 18),
        _ => center,
    }
}

fn super_next(center: State, alive: bool, types: u32) -> State {
    let was_alive = center & 1 != 0;
    match (alive, was_alive) {
        (true, false) => super_birth(center, types),
        (true, true) => center,
        (false, true) => super_death(center),
        (false, false) => super_fade(center, types),
    }
}

#[cfg(test)]
mod tests {
    use super::{history_next, super_birth, super_death, super_fade, states};

    #[test]
    fn history_decay_chain() {
        assert_eq!(history_next(1, false), 2);
        assert_eq!(history_next(3, false), 4);
        assert_eq!(history_next(5, false), 4);
        assert_eq!(history_next(2, true), 1);
        assert_eq!(history_next(4, true), 3);
        assert_eq!(history_next(6, true), 6);
        assert_eq!(history_next(1, true), 1);
        assert_eq!(history_next(2, false), 2);
    }

    #[test]
    fn super_deaths() {
        assert_eq!(super_death(1), 2);
        assert_eq!(super_death(5), 4);
        assert_eq!(super_death(7), 8);
        assert_eq!(super_death(11), 12);
        assert_eq!(super_death(13), 0);
        assert_eq!(super_death(25), 0);
    }

    #[test]
    fn super_births_from_fixed_states() {
        assert_eq!(super_birth(4, states(&[1])), 3);
        assert_eq!(super_birth(6, states(&[1])), 6);
        assert_eq!(super_birth(8, states(&[1])), 7);
    }

    #[test]
    fn super_births_from_10_and_12() {
        assert_eq!(super_birth(10, states(&[0, 7, 9])), 9);
        assert_eq!(super_birth(12, states(&[0, 7, 11])), 11);
        assert_eq!(super_birth(10, states(&[0, 1, 17])), 17);
        assert_eq!(super_birth(12, states(&[0, 1, 3])), 1);
        assert_eq!(super_birth(10, states(&[7])), 9);
    }

    #[test]
    fn super_births_default() {
        // Lone marker without a state-1 parent.
        assert_eq!(super_birth(0, states(&[0, 21])), 21);
        assert_eq!(super_birth(0, states(&[0, 3, 21])), 21);
        // State 1 present blocks the marker.
        assert_eq!(super_birth(0, states(&[0, 1, 21])), 1);
        // Only "unusual" parents give 13.
        assert_eq!(super_birth(2, states(&[0, 7, 13])), 13);
        assert_eq!(super_birth(0, states(&[0, 3, 7])), 1);
    }

    #[test]
    fn super_fading() {
        assert_eq!(super_fade(14, 0), 0);
        assert_eq!(super_fade(16, states(&[14])), 14);
        assert_eq!(super_fade(16, states(&[0])), 16);
        assert_eq!(super_fade(18, states(&[22])), 22);
        assert_eq!(super_fade(20, states(&[18])), 18);
        assert_eq!(super_fade(22, states(&[20])), 20);
        assert_eq!(super_fade(24, states(&[5])), 18);
        assert_eq!(super_fade(24, states(&[0, 2])), 24);
        assert_eq!(super_fade(2, states(&[1])), 2);
    }
}
