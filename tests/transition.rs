use super_life::rules::Direction;
use super_life::superalgo::isolated_bit_index;
use super_life::{Neighbors, Rule, State, SuperAlgo};

fn rule(text: &str) -> Rule {
    Rule::compile(text).unwrap_or_else(|e| panic!("{text}: {e}"))
}

/// Neighbors with the given states at the given positions, the rest `fill`.
fn around(fill: State, cells: &[(Direction, State)]) -> Neighbors {
    let mut neighbors = [fill; 8];
    for &(dir, state) in cells {
        neighbors[dir.index()] = state;
    }
    neighbors
}

#[test]
fn empty_neighborhood_stays_empty() {
    for text in ["LifeSuper", "LifeHistory", "B2/S34HSuper", "B2/S0VHistory", "B2-a/S1cSuper"] {
        assert_eq!(rule(text).next_state(0, &[0; 8]), 0, "{text}");
    }
}

#[test]
fn lonely_live_cell_decays() {
    let history = rule("LifeHistory");
    assert_eq!(history.next_state(1, &[0; 8]), 2);
    assert_eq!(history.next_state(3, &[0; 8]), 4);
    assert_eq!(history.next_state(5, &[0; 8]), 4);

    let sup = rule("LifeSuper");
    assert_eq!(sup.next_state(1, &[0; 8]), 2);
    assert_eq!(sup.next_state(9, &[0; 8]), 10);
    assert_eq!(sup.next_state(13, &[0; 8]), 0);
    assert_eq!(sup.next_state(25, &[0; 8]), 0);
}

#[test]
fn birth_and_survival_follow_the_table() {
    let history = rule("LifeHistory");
    let three = around(0, &[(Direction::North, 1), (Direction::East, 1), (Direction::SW, 1)]);
    assert_eq!(history.next_state(0, &three), 1);
    assert_eq!(history.next_state(2, &three), 1);
    assert_eq!(history.next_state(4, &three), 3);
    assert_eq!(history.next_state(1, &three), 1);
    assert_eq!(history.next_state(3, &three), 3);

    let two = around(0, &[(Direction::North, 1), (Direction::East, 1)]);
    assert_eq!(history.next_state(1, &two), 1);
    assert_eq!(history.next_state(0, &two), 0);
    assert_eq!(history.next_state(2, &two), 2);
}

#[test]
fn bridge_state_kills_live_cells() {
    let history = rule("LifeHistory");
    let two_and_bridge = around(0, &[(Direction::North, 1), (Direction::East, 1), (Direction::West, 6)]);
    assert_eq!(history.next_state(1, &two_and_bridge), 2);
    assert_eq!(history.next_state(3, &two_and_bridge), 4);
    assert_eq!(history.next_state(5, &two_and_bridge), 4);
    // Dead cells are not affected by the bridge.
    assert_eq!(history.next_state(0, &two_and_bridge), 0);

    let sup = rule("LifeSuper");
    assert_eq!(sup.next_state(1, &two_and_bridge), 2);
    assert_eq!(sup.next_state(21, &two_and_bridge), 4);
}

#[test]
fn bridge_applies_to_map_rules() {
    let payload =
        "ARYXfhZofugWaH7oaIDogBZofuhogOiAaIDogIAAgAAWaH7oaIDogGiA6ICAAIAAaIDogIAAgACAAIAAAAAAAA";
    let map = rule(&format!("MAP{payload}Super"));
    let nbrs = around(0, &[(Direction::North, 1), (Direction::East, 1), (Direction::SE, 6)]);
    assert_eq!(map.next_state(1, &nbrs), 2);
}

#[test]
fn bridge_outside_neighborhood_is_ignored() {
    let vn = rule("B2/S2VHistory");
    let nbrs = around(0, &[(Direction::North, 1), (Direction::South, 1), (Direction::NE, 6)]);
    assert_eq!(vn.next_state(1, &nbrs), 1);
    let nbrs = around(0, &[(Direction::North, 1), (Direction::South, 1), (Direction::East, 6)]);
    assert_eq!(vn.next_state(1, &nbrs), 2);
}

#[test]
fn state_six_is_never_born() {
    let history = rule("LifeHistory");
    let three = around(0, &[(Direction::North, 1), (Direction::East, 1), (Direction::SW, 1)]);
    assert_eq!(history.next_state(6, &three), 6);
    assert_eq!(rule("LifeSuper").next_state(6, &three), 6);
}

#[test]
fn super_births_copy_a_lone_marker() {
    let sup = rule("LifeSuper");
    let markers = around(0, &[(Direction::North, 17), (Direction::East, 3), (Direction::SW, 17)]);
    assert_eq!(sup.next_state(0, &markers), 17);

    let two_markers = around(0, &[(Direction::North, 17), (Direction::East, 19), (Direction::SW, 3)]);
    assert_eq!(sup.next_state(0, &two_markers), 1);

    let odd_parents = around(0, &[(Direction::North, 7), (Direction::East, 7), (Direction::SW, 15)]);
    assert_eq!(sup.next_state(0, &odd_parents), 15);
    let odd_parents = around(0, &[(Direction::North, 7), (Direction::East, 7), (Direction::SW, 13)]);
    assert_eq!(sup.next_state(0, &odd_parents), 13);

    let sevens = around(0, &[(Direction::North, 7), (Direction::East, 7), (Direction::SW, 7)]);
    assert_eq!(sup.next_state(0, &sevens), 13);
    assert_eq!(sup.next_state(10, &sevens), 9);
    assert_eq!(sup.next_state(8, &sevens), 7);
}

#[test]
fn super_dead_cells_fade() {
    let sup = rule("LifeSuper");
    assert_eq!(sup.next_state(14, &[0; 8]), 0);
    assert_eq!(sup.next_state(16, &around(0, &[(Direction::West, 14)])), 14);
    assert_eq!(sup.next_state(16, &[0; 8]), 16);
    assert_eq!(sup.next_state(18, &around(0, &[(Direction::West, 22)])), 22);
    assert_eq!(sup.next_state(20, &around(0, &[(Direction::West, 18)])), 18);
    assert_eq!(sup.next_state(22, &around(0, &[(Direction::West, 20)])), 20);
    assert_eq!(sup.next_state(24, &around(0, &[(Direction::West, 1)])), 18);
    assert_eq!(sup.next_state(24, &[0; 8]), 24);
}

#[test]
fn engine_delegates_to_active_rule() {
    let mut algo = SuperAlgo::new();
    assert_eq!(algo.num_cell_states(), 26);
    assert_eq!(algo.next_state(13, &[0; 8]), 0);
    algo.set_rule("LifeHistory").unwrap();
    assert_eq!(algo.num_cell_states(), 7);
    assert_eq!(algo.next_state(5, &[0; 8]), 4);
}

#[test]
fn isolated_bit_matches_trailing_zeros() {
    for mask in (0u32..1 << 12).chain([1 << 25, (1 << 25) | 1, u32::MAX]) {
        let expected = (mask.count_ones() == 1).then(|| mask.trailing_zeros());
        assert_eq!(isolated_bit_index(mask), expected, "mask {mask:#x}");
    }
}
