use common::Square;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum BoardError {
    #[error("Cannot put a piece on {square}, the square is already occupied")]
    SquareOccupied { square: Square },
    #[error("Cannot apply chess move, the `from` square {square} is empty")]
    FromSquareIsEmpty { square: Square },
}
