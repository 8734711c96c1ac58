//! Move-generator node counts on the standard positions in `standard.epd`.
//!
//! Counts above `NODE_LIMIT` are skipped unless `FULL_PERFT` is set. Every
//! case also checks that walking the tree leaves the state as it was loaded.

use rayon::prelude::*;

use chess_rules::{GameState, perft, perft::perft_divide};

const NODE_LIMIT: u64 = 100_000;

struct Case {
    fen: String,
    counts: Vec<(u8, u64)>,
}

/// `<fen> ;D1 20 ;D2 400 ...`
fn parse_case(line: &str) -> Option<Case> {
    let (fen, rest) = line.split_once(';')?;
    let counts = rest
        .split(';')
        .filter_map(|field| {
            let (key, value) = field.trim().split_once(' ')?;
            Some((key.strip_prefix('D')?.parse().ok()?, value.trim().parse().ok()?))
        })
        .collect();
    Some(Case {
        fen: fen.trim().to_string(),
        counts,
    })
}

fn cases() -> Vec<Case> {
    include_str!("standard.epd")
        .lines()
        .filter_map(parse_case)
        .collect()
}

#[test]
fn standard_positions_match_reference_counts() {
    let full = std::env::var_os("FULL_PERFT").is_some();
    let cases = cases();
    assert_eq!(cases.len(), 6);

    cases.par_iter().for_each(|case| {
        let mut state = GameState::from_fen(&case.fen).unwrap();
        let loaded = state.clone();
        for &(depth, expected) in case.counts.iter().filter(|(_, n)| full || *n <= NODE_LIMIT) {
            assert_eq!(perft(&mut state, depth).unwrap(), expected, "{} at depth {depth}", case.fen);
        }
        assert_eq!(state.board(), loaded.board(), "{}", case.fen);
        assert_eq!(state.generate_fen(), loaded.generate_fen());
        assert_eq!(state.ply_count(), 0);
        assert!(state.captured_pieces().is_empty());
    });
}

#[test]
fn divide_agrees_with_perft_on_every_position() {
    cases().par_iter().for_each(|case| {
        let mut state = GameState::from_fen(&case.fen).unwrap();
        let split = perft_divide(&mut state, 2).unwrap();
        assert_eq!(split.len(), state.get_legal_moves(state.side_to_move()).len());
        let total: u64 = split.iter().map(|(_, n)| n).sum();
        assert_eq!(total, perft(&mut state, 2).unwrap(), "{}", case.fen);
    });
}

#[test]
fn divide_of_start_position() {
    let mut state = GameState::startpos();
    let split = perft_divide(&mut state, 2).unwrap();
    assert_eq!(split.len(), 20);
    assert!(split.iter().all(|(_, nodes)| *nodes == 20));
    assert!(split.iter().any(|(mv, _)| mv == "Ng1f3"));
}
