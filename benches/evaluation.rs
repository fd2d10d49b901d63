use chess_search_core::board::fen::from_fen;
use chess_search_core::defs::FEN_START_POSITION;
use chess_search_core::position_value;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const TEST_POSITIONS: &[(&str, &str)] = &[
    (FEN_START_POSITION, "Starting Position"),
    ("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 0", "After 1.e4"),
    ("rnbqkb1r/pppp1ppp/5n2/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 2 0", "Petrov Defense"),
    (
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 4 0",
        "Italian Game",
    ),
    (
        "r2q1rk1/ppp2ppp/2np1n2/2b1p1B1/2B1P3/3P1N2/PPP2PPP/RN1Q1RK1 w - - 0 0",
        "Complex Middlegame",
    ),
    ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 0", "King and Pawn Endgame"),
    ("8/8/8/8/8/8/8/K7 w - - 0 0", "Lone King"),
];

fn bench_evaluation_positions(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation_positions");

    for (fen, name) in TEST_POSITIONS {
        let board = from_fen(fen).expect("valid FEN");

        group.bench_with_input(BenchmarkId::new("position_value", name), fen, |b, _| {
            b.iter(|| black_box(position_value(&board)));
        });
    }

    group.finish();
}

fn bench_evaluation_game_phases(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation_game_phases");

    let phases = [
        ("Opening", "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 0"),
        (
            "Middlegame",
            "r2q1rk1/ppp2ppp/2np1n2/2b1p1B1/2B1P3/3P1N2/PPP2PPP/RN1Q1RK1 w - - 0 0",
        ),
        ("Endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 0"),
        ("Late Endgame", "8/8/8/8/8/3k4/8/3K4 w - - 0 0"),
    ];

    for (phase_name, fen) in &phases {
        let board = from_fen(fen).expect("valid FEN");

        group.bench_with_input(BenchmarkId::new("position_value", phase_name), phase_name, |b, _| {
            b.iter(|| black_box(position_value(&board)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_evaluation_positions, bench_evaluation_game_phases);
criterion_main!(benches);
