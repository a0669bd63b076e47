#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use rand::RngCore;
use rand::SeedableRng;
use rayon::prelude::*;
use std::time::{Duration, Instant};
use super_life::rules::Direction;
use super_life::{Neighbors, Rule, State, SuperAlgo, SuperAlgoConfig};

const DEFAULT_SIDE: usize = 256;
const DEFAULT_DENSITY: f64 = 0.35;
const DEFAULT_GENERATIONS: u64 = 200;
const CHECK_INTERVAL: u64 = 50;
const RULE_ENV: &str = "SUPERLIFE_RULE";

/// Thread pool sizing for the host grid.
#[derive(Clone, Debug, Default)]
struct HostConfig {
    /// `None` means one thread per available core.
    thread_count: Option<usize>,
    /// Hard upper bound regardless of auto-detection.
    max_threads: Option<usize>,
}

impl HostConfig {
    fn thread_count(mut self, n: usize) -> Self {
        self.thread_count = Some(n.max(1));
        self
    }

    fn max_threads(mut self, n: usize) -> Self {
        self.max_threads = Some(n.max(1));
        self
    }

    fn resolve_threads(&self) -> usize {
        let mut threads = self.thread_count.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        });
        if let Some(cap) = self.max_threads {
            threads = threads.min(cap);
        }
        threads.max(1)
    }
}

struct MainArgs {
    rule: String,
    side: usize,
    density: f64,
    generations: u64,
    seed: u64,
    config: HostConfig,
}

fn parse_args() -> MainArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = MainArgs {
        rule: std::env::var(RULE_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| super_life::rules::DEFAULT_RULE.to_string()),
        side: DEFAULT_SIDE,
        density: DEFAULT_DENSITY,
        generations: DEFAULT_GENERATIONS,
        seed: 0x5EED_1234_ABCD_EF01,
        config: HostConfig::default(),
    };
    let next_arg = |i: usize, flag: &str| -> &str {
        args.get(i)
            .map(String::as_str)
            .unwrap_or_else(|| panic!("{flag} requires a value"))
    };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--rule" => {
                i += 1;
                parsed.rule = next_arg(i, "--rule").to_string();
            }
            "--size" => {
                i += 1;
                parsed.side = next_arg(i, "--size")
                    .parse()
                    .expect("--size requires a positive integer");
                assert!(parsed.side >= 3, "--size must be at least 3");
            }
            "--gens" => {
                i += 1;
                parsed.generations = next_arg(i, "--gens")
                    .parse()
                    .expect("--gens requires a non-negative integer");
            }
            "--density" => {
                i += 1;
                parsed.density = next_arg(i, "--density")
                    .parse()
                    .expect("--density requires a number between 0 and 1");
            }
            "--seed" => {
                i += 1;
                parsed.seed = next_arg(i, "--seed")
                    .parse()
                    .expect("--seed requires an integer");
            }
            "--threads" => {
                i += 1;
                let n: usize = next_arg(i, "--threads")
                    .parse()
                    .expect("--threads requires a positive integer");
                parsed.config = parsed.config.thread_count(n);
            }
            "--max-threads" => {
                i += 1;
                let n: usize = next_arg(i, "--max-threads")
                    .parse()
                    .expect("--max-threads requires a positive integer");
                parsed.config = parsed.config.max_threads(n);
            }
            other => panic!(
                "unknown argument: {other}\nusage: super-life [--rule R] [--size N] [--gens N] [--density F] [--seed N] [--threads N] [--max-threads N]"
            ),
        }
        i += 1;
    }
    parsed
}

/// Toroidal grid driving a compiled rule generation by generation.
struct TorusHost {
    side: usize,
    cells: Vec<State>,
    next: Vec<State>,
    pool: rayon::ThreadPool,
}

impl TorusHost {
    fn new(side: usize, config: &HostConfig) -> Self {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.resolve_threads())
            .build()
            .expect("failed to build host rayon thread pool");
        Self {
            side,
            cells: vec![0; side * side],
            next: vec![0; side * side],
            pool,
        }
    }

    fn seed_soup(&mut self, density: f64, seed: u64) {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let threshold = (u64::MAX as f64 * density) as u64;
        for cell in &mut self.cells {
            *cell = if rng.next_u64() <= threshold { 1 } else { 0 };
        }
    }

    fn step(&mut self, rule: &Rule) {
        let side = self.side;
        let cells = &self.cells;
        self.pool.install(|| {
            self.next
                .par_chunks_mut(side)
                .enumerate()
                .for_each(|(y, row)| {
                    for (x, out) in row.iter_mut().enumerate() {
                        let neighbors = gather(cells, side, x, y);
                        *out = rule.next_state(cells[y * side + x], &neighbors);
                    }
                });
        });
        std::mem::swap(&mut self.cells, &mut self.next);
    }

    fn histogram(&self, states: usize) -> Vec<u64> {
        let mut counts = vec![0u64; states];
        for &cell in &self.cells {
            counts[cell as usize] += 1;
        }
        counts
    }
}

fn gather(cells: &[State], side: usize, x: usize, y: usize) -> Neighbors {
    let mut neighbors = [0; 8];
    for dir in Direction::ALL {
        let (dx, dy) = offset(dir);
        let nx = (x + side).wrapping_add_signed(dx) % side;
        let ny = (y + side).wrapping_add_signed(dy) % side;
        neighbors[dir.index()] = cells[ny * side + nx];
    }
    neighbors
}

/// Grid offset of a neighbor, with y growing downwards.
const fn offset(dir: Direction) -> (isize, isize) {
    match dir {
        Direction::NW    => (-1, -1),
        Direction::North => (0, -1),
        Direction::NE    => (1, -1),
        Direction::West  => (-1, 0),
        Direction::East  => (1, 0),
        Direction::SW    => (-1, 1),
        Direction::South => (0, 1),
        Direction::SE    => (1, 1),
    }
}

fn format_histogram(counts: &[u64]) -> String {
    counts
        .iter()
        .enumerate()
        .filter(|&(_, &n)| n > 0)
        .map(|(state, n)| format!("{state}:{n}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() {
    let args = parse_args();
    let algo = match SuperAlgo::with_config(SuperAlgoConfig::default().default_rule(&args.rule)) {
        Ok(algo) => algo,
        Err(err) => {
            eprintln!("invalid rule {:?}: {err}", args.rule);
            std::process::exit(2);
        }
    };
    let rule = algo.rule();

    println!(
        "Rule {} ({} states, {:?} neighborhood)",
        rule.canonical_name(),
        rule.state_count(),
        rule.neighborhood()
    );

    let mut host = TorusHost::new(args.side, &args.config);
    host.seed_soup(args.density, args.seed);

    let mut total = Duration::ZERO;
    let mut generation = 0u64;
    while generation < args.generations {
        let chunk = CHECK_INTERVAL.min(args.generations - generation);
        let start = Instant::now();
        for _ in 0..chunk {
            host.step(rule);
        }
        let elapsed = start.elapsed();
        total += elapsed;
        generation += chunk;

        let counts = host.histogram(rule.state_count());
        let alive: u64 = counts.iter().skip(1).step_by(2).sum();
        let phase_ms = elapsed.as_secs_f64() * 1000.0;
        println!(
            "Generation {generation}: alive = {alive}, {phase_ms:.3} ms ({:.4} ms/gen)",
            phase_ms / chunk as f64
        );
        println!("  states {}", format_histogram(&counts));
    }

    let total_ms = total.as_secs_f64() * 1000.0;
    println!("\n--- Summary ({generation} generations) ---");
    println!(
        "{total_ms:.3} ms total, {:.4} ms/gen",
        total_ms / generation.max(1) as f64
    );
}
