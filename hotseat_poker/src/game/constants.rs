pub const DECK_SIZE: usize = 52;
pub const HOLE_CARDS: usize = 2;
pub const BOARD_SIZE: usize = 5;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;
