//! Perft benchmark and move-generator debugging aid.
//!
//! Usage:
//!   cargo run --release --example perft_bench -p chess_rules -- [depth] [fen] [--divide]
//!
//! Without a FEN the standard test positions are run at `depth` (default 3).
//! `--divide` prints the node count below each root move of the given FEN.

use std::env;
use std::time::{Duration, Instant};

use chess_rules::perft::{perft, perft_divide};
use chess_rules::{GameState, Result, START_FEN};

const TEST_POSITIONS: &[(&str, &str)] = &[
    ("Starting position", START_FEN),
    (
        "Kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
    ),
    ("Position 3", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -"),
    (
        "Position 4",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq -",
    ),
    (
        "Position 5",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ -",
    ),
];

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let divide = args.iter().any(|a| a == "--divide");
    let mut positional = args.iter().filter(|a| !a.starts_with("--"));

    let depth: u8 = positional.next().and_then(|s| s.parse().ok()).unwrap_or(3);

    match positional.next() {
        Some(fen) if divide => run_divide(fen, depth),
        Some(fen) => run_single_position(fen, depth),
        None => run_all_positions(depth),
    }
}

fn nps(nodes: u64, elapsed: Duration) -> f64 {
    if elapsed.as_secs_f64() > 0.0 {
        nodes as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    }
}

fn run_divide(fen: &str, depth: u8) -> Result<()> {
    let mut state = GameState::from_fen(fen)?;
    println!("{}\n", state.board().render());
    let split = perft_divide(&mut state, depth)?;
    for (mv, nodes) in &split {
        println!("{mv}: {nodes}");
    }
    println!();
    println!("Moves: {}", split.len());
    println!("Nodes: {}", split.iter().map(|(_, n)| n).sum::<u64>());
    Ok(())
}

fn run_single_position(fen: &str, depth: u8) -> Result<()> {
    let mut state = GameState::from_fen(fen)?;

    println!("Position: {fen}");
    println!("Depth: {depth}");
    println!();

    let start = Instant::now();
    let nodes = perft(&mut state, depth)?;
    let elapsed = start.elapsed();

    println!("Nodes: {nodes}");
    println!("Time: {elapsed:.3?}");
    println!("NPS: {:.0}", nps(nodes, elapsed));
    Ok(())
}

fn run_all_positions(depth: u8) -> Result<()> {
    println!("=== Perft Benchmark Suite ===");
    println!("Depth: {depth}");
    println!();

    let mut total_nodes = 0u64;
    let mut total_time = Duration::ZERO;

    for (name, fen) in TEST_POSITIONS {
        let mut state = GameState::from_fen(fen)?;

        print!("{name:.<30}");

        let start = Instant::now();
        let nodes = perft(&mut state, depth)?;
        let elapsed = start.elapsed();

        total_nodes += nodes;
        total_time += elapsed;

        println!(" {nodes:>12} nodes in {elapsed:>8.3?} ({:>10.0} nps)", nps(nodes, elapsed));
    }

    println!();
    println!("{:=<70}", "");
    println!(
        "TOTAL: {total_nodes} nodes in {total_time:.3?} ({:.0} nps)",
        nps(total_nodes, total_time)
    );
    Ok(())
}
