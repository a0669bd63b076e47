//! Compile and transition throughput across rule shapes.
//!
//! Use with `--release` for meaningful results.

use rand::Rng;
use rand::SeedableRng;
use std::time::Instant;
use super_life::{Neighbors, Rule, State};

const COMPILE_ITERS: u32 = 2_000;
const CELLS: usize = 1 << 20;

fn bench_compile(text: &str) -> f64 {
    let start = Instant::now();
    for _ in 0..COMPILE_ITERS {
        std::hint::black_box(Rule::compile(std::hint::black_box(text)).ok());
    }
    start.elapsed().as_secs_f64() * 1e6 / COMPILE_ITERS as f64
}

fn bench_transition(rule: &Rule, inputs: &[(State, Neighbors)]) -> (f64, u64) {
    let start = Instant::now();
    let mut checksum = 0u64;
    for (center, neighbors) in inputs {
        checksum += rule.next_state(*center, neighbors) as u64;
    }
    let ns = start.elapsed().as_secs_f64() * 1e9 / inputs.len() as f64;
    (ns, checksum)
}

fn random_inputs(states: usize, seed: u64) -> Vec<(State, Neighbors)> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..CELLS)
        .map(|_| {
            let mut neighbors = [0; 8];
            for n in &mut neighbors {
                *n = rng.random_range(0..states) as State;
            }
            (rng.random_range(0..states) as State, neighbors)
        })
        .collect()
}

fn main() {
    let rules = [
        "LifeSuper",
        "LifeHistory",
        "B36/S23Super",
        "B2-a3/S23kHistory",
        "B2/S34HSuper",
        "B2/S013VHistory",
        "MAPARYXfhZofugWaH7oaIDogBZofuhogOiAaIDogIAAgAAWaH7oaIDogGiA6ICAAIAAaIDogIAAgACAAIAAAAAAAASuper",
    ];

    println!(
        "{:<28} {:>14} {:>14} {:>12}",
        "Rule", "Compile(us)", "Step(ns/cell)", "Checksum"
    );
    println!("{}", "-".repeat(72));

    for text in rules {
        let rule = match Rule::compile(text) {
            Ok(rule) => rule,
            Err(err) => {
                eprintln!("{text}: {err}");
                continue;
            }
        };
        let inputs = random_inputs(rule.state_count(), 0xB2);
        let compile_us = bench_compile(text);
        let (step_ns, checksum) = bench_transition(&rule, &inputs);
        let mut name = rule.canonical_name().to_string();
        name.truncate(28);
        println!("{name:<28} {compile_us:>14.2} {step_ns:>14.2} {checksum:>12}");
    }
}
