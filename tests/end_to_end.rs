use chess_engine::board::color::Color;
use chess_engine::board::piece::Piece;
use chess_engine::board::Board;
use chess_engine::chess_move::{ChessMove, ChessMoveEffect};
use chess_engine::engine::{Engine, EngineConfig, Strategy};
use chess_engine::move_generation::{attacks, generate_valid_moves};
use chess_engine::square::*;
use chess_engine::{chess_move, chess_position};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn find(moves: &[ChessMove], from: Square, to: Square) -> Option<ChessMove> {
    moves
        .iter()
        .find(|m| m.from_square() == from && m.to_square() == to)
        .copied()
}

#[test]
fn test_starting_position_has_twenty_legal_moves() {
    init_logging();
    let board = Board::starting_position();
    let moves = generate_valid_moves(&board, Color::White).unwrap();
    assert_eq!(20, moves.len());

    let pawn_moves = moves
        .iter()
        .filter(|m| board.get(m.from_square()) == Piece::WhitePawn)
        .count();
    assert_eq!(16, pawn_moves);
}

#[test]
fn test_rook_move_onto_open_file_is_check() {
    init_logging();
    let board = chess_position! {
        ...r...k
        ........
        ........
        ........
        ........
        ........
        ........
        ...K....
    };
    let moves = generate_valid_moves(&board, Color::Black).unwrap();

    let d2 = find(&moves, D8, D2).unwrap();
    assert_eq!(ChessMoveEffect::Check, d2.effect());

    let a8 = find(&moves, D8, A8).unwrap();
    assert_eq!(ChessMoveEffect::None, a8.effect());
}

#[test]
fn test_check_flags_match_the_resulting_board() {
    init_logging();
    let boards = [
        Board::starting_position(),
        chess_position! {
            r...k..r
            ppp..ppp
            ..n.....
            ...qp...
            ...P....
            ..N..N..
            PPP..PPP
            R..QK..R
        },
        chess_position! {
            ...r...k
            ........
            ........
            ........
            ....b...
            ........
            ........
            ...K....
        },
    ];

    for board in boards.iter() {
        for color in Color::ALL.iter() {
            for chess_move in generate_valid_moves(board, *color).unwrap().iter() {
                let mut after = board.clone();
                chess_move.apply(&mut after).unwrap();
                assert!(
                    !attacks::is_in_check(&after, *color),
                    "{} leaves king attacked",
                    chess_move
                );
                assert_eq!(
                    chess_move.effect() == ChessMoveEffect::Check,
                    attacks::is_in_check(&after, color.opposite()),
                    "wrong check flag on {}",
                    chess_move
                );
            }
        }
    }
}

#[test]
fn test_back_rank_mate_is_flagged_checkmate() {
    init_logging();
    let board = chess_position! {
        ......k.
        .....ppp
        ........
        ........
        ........
        ........
        ........
        R.....K.
    };
    let mut engine = Engine::with_config(EngineConfig {
        search_depth: 2,
        ..Default::default()
    });

    let chess_move = engine.choose_move(&board, Color::White).unwrap();
    assert_eq!(A1, chess_move.from_square());
    assert_eq!(A8, chess_move.to_square());
    assert_eq!(ChessMoveEffect::Checkmate, chess_move.effect());
}

#[test]
fn test_mated_side_gets_checkmate_sentinel() {
    init_logging();
    let mut board = chess_position! {
        ......k.
        .....ppp
        ........
        ........
        ........
        ........
        ........
        R.....K.
    };
    chess_move!(A1, A8).apply(&mut board).unwrap();

    let mut engine = Engine::new();
    let chess_move = engine.choose_move(&board, Color::Black).unwrap();
    assert_eq!(ChessMoveEffect::Checkmate, chess_move.effect());
}

#[test]
fn test_stalemated_side_gets_stalemate_sentinel() {
    init_logging();
    let board = chess_position! {
        .......k
        ........
        ......QK
        ........
        ........
        ........
        ........
        ........
    };
    let mut engine = Engine::new();
    let chess_move = engine.choose_move(&board, Color::Black).unwrap();
    assert_eq!(ChessMoveEffect::Stalemate, chess_move.effect());
}

#[test]
fn test_engine_plays_a_short_game_against_itself() {
    init_logging();
    let mut board = Board::starting_position();
    let mut white = Engine::with_config(EngineConfig {
        search_depth: 2,
        ..Default::default()
    });
    let mut black = Engine::with_config(EngineConfig {
        search_depth: 2,
        strategy: Strategy::Greedy,
        seed: Some(42),
        ..Default::default()
    });

    let mut color = Color::White;
    for _ in 0..8 {
        let engine = match color {
            Color::White => &mut white,
            Color::Black => &mut black,
        };
        let chess_move = engine.choose_move(&board, color).unwrap();
        match chess_move.effect() {
            ChessMoveEffect::Checkmate | ChessMoveEffect::Stalemate => break,
            _ => {}
        }
        assert!(engine.validate_move(&board, &chess_move, color));
        chess_move.apply(&mut board).unwrap();
        color = color.opposite();
    }

    assert!(white.moves_played() > 0);
    assert!(board.find_king(Color::White).is_some());
    assert!(board.find_king(Color::Black).is_some());
}

#[test]
fn test_validate_move_rejects_self_check() {
    init_logging();
    let board = chess_position! {
        ....r..k
        ........
        ........
        ........
        ........
        ........
        ........
        ...K....
    };
    let engine = Engine::new();
    assert!(!engine.validate_move(&board, &chess_move!(D1, E1), Color::White));
    assert!(!engine.validate_move(&board, &chess_move!(D1, E2), Color::White));
    assert!(engine.validate_move(&board, &chess_move!(D1, C2), Color::White));
    assert!(!engine.validate_move(&board, &chess_move!(D1, F3), Color::White));
}
