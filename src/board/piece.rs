use super::color::Color;

/// The kind of a piece, independent of its color.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

pub const ALL_PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

/// The contents of a single square.
///
/// Variants are ordered so that every white piece compares greater than
/// `Empty` and every black piece compares less than `Empty`. Ownership tests
/// throughout move validation rely on this ordering.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(i8)]
pub enum Piece {
    BlackKing = -6,
    BlackQueen = -5,
    BlackRook = -4,
    BlackBishop = -3,
    BlackKnight = -2,
    BlackPawn = -1,
    Empty = 0,
    WhitePawn = 1,
    WhiteKnight = 2,
    WhiteBishop = 3,
    WhiteRook = 4,
    WhiteQueen = 5,
    WhiteKing = 6,
}

impl Default for Piece {
    fn default() -> Self {
        Piece::Empty
    }
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Self {
        match (kind, color) {
            (PieceKind::Pawn, Color::White) => Piece::WhitePawn,
            (PieceKind::Knight, Color::White) => Piece::WhiteKnight,
            (PieceKind::Bishop, Color::White) => Piece::WhiteBishop,
            (PieceKind::Rook, Color::White) => Piece::WhiteRook,
            (PieceKind::Queen, Color::White) => Piece::WhiteQueen,
            (PieceKind::King, Color::White) => Piece::WhiteKing,
            (PieceKind::Pawn, Color::Black) => Piece::BlackPawn,
            (PieceKind::Knight, Color::Black) => Piece::BlackKnight,
            (PieceKind::Bishop, Color::Black) => Piece::BlackBishop,
            (PieceKind::Rook, Color::Black) => Piece::BlackRook,
            (PieceKind::Queen, Color::Black) => Piece::BlackQueen,
            (PieceKind::King, Color::Black) => Piece::BlackKing,
        }
    }

    pub fn kind(self) -> Option<PieceKind> {
        match self {
            Piece::WhitePawn | Piece::BlackPawn => Some(PieceKind::Pawn),
            Piece::WhiteKnight | Piece::BlackKnight => Some(PieceKind::Knight),
            Piece::WhiteBishop | Piece::BlackBishop => Some(PieceKind::Bishop),
            Piece::WhiteRook | Piece::BlackRook => Some(PieceKind::Rook),
            Piece::WhiteQueen | Piece::BlackQueen => Some(PieceKind::Queen),
            Piece::WhiteKing | Piece::BlackKing => Some(PieceKind::King),
            Piece::Empty => None,
        }
    }

    pub fn color(self) -> Option<Color> {
        if self > Piece::Empty {
            Some(Color::White)
        } else if self < Piece::Empty {
            Some(Color::Black)
        } else {
            None
        }
    }

    #[inline(always)]
    pub fn is_empty(self) -> bool {
        self == Piece::Empty
    }

    /// True if the piece is owned by `color`.
    #[inline(always)]
    pub fn belongs_to(self, color: Color) -> bool {
        match color {
            Color::White => self > Piece::Empty,
            Color::Black => self < Piece::Empty,
        }
    }

    /// True if the piece sits on the opposite side of `Empty` from `color`.
    #[inline(always)]
    pub fn is_enemy_of(self, color: Color) -> bool {
        self.belongs_to(color.opposite())
    }

    pub fn to_fen(self) -> char {
        match self {
            Piece::BlackBishop => 'b',
            Piece::WhiteBishop => 'B',
            Piece::BlackKing => 'k',
            Piece::WhiteKing => 'K',
            Piece::BlackKnight => 'n',
            Piece::WhiteKnight => 'N',
            Piece::BlackPawn => 'p',
            Piece::WhitePawn => 'P',
            Piece::BlackQueen => 'q',
            Piece::WhiteQueen => 'Q',
            Piece::BlackRook => 'r',
            Piece::WhiteRook => 'R',
            Piece::Empty => '.',
        }
    }

    pub fn from_fen(c: char) -> Option<Piece> {
        match c {
            'b' => Some(Piece::BlackBishop),
            'B' => Some(Piece::WhiteBishop),
            'k' => Some(Piece::BlackKing),
            'K' => Some(Piece::WhiteKing),
            'n' => Some(Piece::BlackKnight),
            'N' => Some(Piece::WhiteKnight),
            'p' => Some(Piece::BlackPawn),
            'P' => Some(Piece::WhitePawn),
            'q' => Some(Piece::BlackQueen),
            'Q' => Some(Piece::WhiteQueen),
            'r' => Some(Piece::BlackRook),
            'R' => Some(Piece::WhiteRook),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_pieces_order_above_empty() {
        for &kind in &ALL_PIECE_KINDS {
            assert!(Piece::new(kind, Color::White) > Piece::Empty);
            assert!(Piece::new(kind, Color::Black) < Piece::Empty);
        }
    }

    #[test]
    fn test_kind_and_color_round_trip() {
        for &color in &Color::ALL {
            for &kind in &ALL_PIECE_KINDS {
                let piece = Piece::new(kind, color);
                assert_eq!(Some(kind), piece.kind());
                assert_eq!(Some(color), piece.color());
            }
        }
        assert_eq!(None, Piece::Empty.kind());
        assert_eq!(None, Piece::Empty.color());
    }

    #[test]
    fn test_enemy_of() {
        assert!(Piece::BlackRook.is_enemy_of(Color::White));
        assert!(!Piece::WhiteRook.is_enemy_of(Color::White));
        assert!(!Piece::Empty.is_enemy_of(Color::White));
        assert!(!Piece::Empty.is_enemy_of(Color::Black));
    }

    #[test]
    fn test_fen_characters() {
        assert_eq!(Some(Piece::WhiteKnight), Piece::from_fen('N'));
        assert_eq!(Some(Piece::BlackQueen), Piece::from_fen('q'));
        assert_eq!(None, Piece::from_fen('x'));
        assert_eq!('k', Piece::BlackKing.to_fen());
    }
}
