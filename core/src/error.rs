use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    OutOfBounds,
    #[error("Region lookup started outside the grid or on an empty cell")]
    InvalidStart,
    #[error("Color index outside the configured palette")]
    InvalidColor,
    #[error("Tile palette is empty")]
    EmptyPalette,
    #[error("No settle cycle is in flight")]
    NotSettling,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
