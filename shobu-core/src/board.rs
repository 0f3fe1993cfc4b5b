//! Board geometry: 4x4 grids, tile lookup and move vectors
//!
//! Four boards make up a game. Boards 0 and 2 are dark, boards 1 and 3 are
//! light. Boards 0-1 are White's home pair, boards 2-3 are Black's.

use serde::{Deserialize, Serialize};

/// Width and height of a single board
pub const BOARD_SIZE: i8 = 4;

/// Number of boards in a game
pub const BOARD_COUNT: usize = 4;

/// Longest displacement a passive move can produce along one axis
pub const MAX_STEP: i8 = 2;

// ============================================================================
// STONES AND TILES
// ============================================================================

/// Stone color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stone {
    Black,
    White,
}

impl Stone {
    pub fn opponent(self) -> Self {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }
}

/// What a tile holds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Content {
    #[default]
    Empty,
    Black,
    White,
}

impl Content {
    /// Stone on this tile, if any
    pub fn stone(self) -> Option<Stone> {
        match self {
            Content::Empty => None,
            Content::Black => Some(Stone::Black),
            Content::White => Some(Stone::White),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Content::Empty
    }

    pub fn holds(self, stone: Stone) -> bool {
        self.stone() == Some(stone)
    }
}

impl From<Stone> for Content {
    fn from(stone: Stone) -> Self {
        match stone {
            Stone::Black => Content::Black,
            Stone::White => Content::White,
        }
    }
}

/// Coordinates on a single board, `x` is the column and `y` the row
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub x: i8,
    pub y: i8,
}

impl Pos {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Check if this position is on the board
    pub fn is_valid(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.x) && (0..BOARD_SIZE).contains(&self.y)
    }

    /// Position displaced by a vector (may be off the board), `None` when
    /// the coordinates overflow
    pub fn offset(self, vector: MoveVector) -> Option<Pos> {
        Some(Pos::new(
            self.x.checked_add(vector.dx)?,
            self.y.checked_add(vector.dy)?,
        ))
    }

    /// All 16 positions in row-major order
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| Pos::new(x, y)))
    }
}

/// A tile read off a board
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub content: Content,
    pub x: i8,
    pub y: i8,
}

impl Tile {
    pub fn pos(&self) -> Pos {
        Pos::new(self.x, self.y)
    }
}

/// One specific tile across all four boards
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoneCoordinates {
    pub board_index: usize,
    pub pos: Pos,
}

impl StoneCoordinates {
    pub const fn new(board_index: usize, x: i8, y: i8) -> Self {
        Self {
            board_index,
            pos: Pos::new(x, y),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.board_index < BOARD_COUNT && self.pos.is_valid()
    }
}

// ============================================================================
// MOVE VECTORS
// ============================================================================

/// Net displacement of a passive move, replayed by the aggressive move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveVector {
    pub dx: i8,
    pub dy: i8,
}

/// Unit vectors for the 8 compass directions
/// Index: 0=S, 1=SE, 2=E, 3=NE, 4=N, 5=NW, 6=W, 7=SW
pub const DIRECTIONS: [MoveVector; 8] = [
    MoveVector::new(0, 1),
    MoveVector::new(1, 1),
    MoveVector::new(1, 0),
    MoveVector::new(1, -1),
    MoveVector::new(0, -1),
    MoveVector::new(-1, -1),
    MoveVector::new(-1, 0),
    MoveVector::new(-1, 1),
];

impl MoveVector {
    pub const fn new(dx: i8, dy: i8) -> Self {
        Self { dx, dy }
    }

    /// Vector from one position to another
    pub fn between(from: Pos, to: Pos) -> Self {
        Self::new(to.x.saturating_sub(from.x), to.y.saturating_sub(from.y))
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// Nonzero, straight (orthogonal or diagonal) and at most two steps long
    pub fn is_valid(&self) -> bool {
        let (ax, ay) = (self.dx.unsigned_abs(), self.dy.unsigned_abs());
        let straight = ax == 0 || ay == 0 || ax == ay;
        !self.is_zero() && straight && ax <= MAX_STEP.unsigned_abs() && ay <= MAX_STEP.unsigned_abs()
    }

    /// Multiply both components by `factor`
    pub fn scaled(self, factor: i8) -> Self {
        Self::new(self.dx.saturating_mul(factor), self.dy.saturating_mul(factor))
    }

    /// Lengthen (positive `amount`) or shorten (negative `amount`) each
    /// nonzero component along its own sign. Components clamp at zero
    /// instead of flipping sign.
    pub fn resized(self, amount: i8) -> Self {
        Self::new(
            resize_component(self.dx, amount),
            resize_component(self.dy, amount),
        )
    }
}

fn resize_component(value: i8, amount: i8) -> i8 {
    let sign = value.signum();
    let resized = value.saturating_add(amount.saturating_mul(sign));
    if resized.signum() == -sign {
        0
    } else {
        resized
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// A single 4x4 board, stored row-major as `cells[y][x]`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Content; 4]; 4],
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    /// White on the top row, Black on the bottom row
    pub fn starting() -> Self {
        let mut cells = [[Content::Empty; 4]; 4];
        cells[0] = [Content::White; 4];
        cells[3] = [Content::Black; 4];
        Self { cells }
    }

    pub fn from_rows(cells: [[Content; 4]; 4]) -> Self {
        Self { cells }
    }

    pub fn rows(&self) -> &[[Content; 4]; 4] {
        &self.cells
    }

    /// Content at a position, `None` when off the board
    pub fn get(&self, pos: Pos) -> Option<Content> {
        if pos.is_valid() {
            Some(self.cells[pos.y as usize][pos.x as usize])
        } else {
            None
        }
    }

    /// Bounds-checked tile lookup
    pub fn tile_at(&self, x: i8, y: i8) -> Option<Tile> {
        self.get(Pos::new(x, y)).map(|content| Tile { content, x, y })
    }

    /// Tile at `origin + vector`, `None` when that lands off the board
    pub fn resolve_vector(&self, origin: Pos, vector: MoveVector) -> Option<Tile> {
        let target = origin.offset(vector)?;
        self.tile_at(target.x, target.y)
    }

    /// Copy of this board with the given tiles overwritten.
    /// Off-board positions are ignored.
    pub fn with(&self, changes: &[(Pos, Content)]) -> Board {
        let mut next = *self;
        for &(pos, content) in changes {
            if pos.is_valid() {
                next.cells[pos.y as usize][pos.x as usize] = content;
            }
        }
        next
    }

    /// Iterate tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        Pos::all().map(move |pos| Tile {
            content: self.cells[pos.y as usize][pos.x as usize],
            x: pos.x,
            y: pos.y,
        })
    }

    /// Number of stones of one color
    pub fn count(&self, stone: Stone) -> usize {
        self.tiles().filter(|tile| tile.content.holds(stone)).count()
    }

    pub fn stone_count(&self) -> usize {
        self.count(Stone::Black) + self.count(Stone::White)
    }
}

// ============================================================================
// BOARD SET
// ============================================================================

/// Board color, which decides where the aggressive half may be played
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardColor {
    Dark,
    Light,
}

impl BoardColor {
    /// Color of the board at `index`
    pub fn of(index: usize) -> Self {
        if index % 2 == 0 {
            BoardColor::Dark
        } else {
            BoardColor::Light
        }
    }

    pub fn other(self) -> Self {
        match self {
            BoardColor::Dark => BoardColor::Light,
            BoardColor::Light => BoardColor::Dark,
        }
    }
}

/// Indices of the boards a player may start a passive move on
pub fn home_boards(stone: Stone) -> [usize; 2] {
    match stone {
        Stone::Black => [2, 3],
        Stone::White => [0, 1],
    }
}

pub fn is_home_board(stone: Stone, board_index: usize) -> bool {
    home_boards(stone).contains(&board_index)
}

/// All four boards of a game
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllBoards {
    boards: [Board; BOARD_COUNT],
}

impl AllBoards {
    pub fn new(boards: [Board; BOARD_COUNT]) -> Self {
        Self { boards }
    }

    /// Canonical starting layout on all four boards
    pub fn starting() -> Self {
        Self::new([Board::starting(); BOARD_COUNT])
    }

    pub fn board(&self, index: usize) -> Option<&Board> {
        self.boards.get(index)
    }

    /// Content at one tile of one board
    pub fn get(&self, at: StoneCoordinates) -> Option<Content> {
        self.board(at.board_index).and_then(|board| board.get(at.pos))
    }

    /// Copy of the set with one board swapped out
    pub fn replace(&self, index: usize, board: Board) -> AllBoards {
        let mut next = *self;
        if let Some(slot) = next.boards.get_mut(index) {
            *slot = board;
        }
        next
    }

    pub fn iter(&self) -> impl Iterator<Item = &Board> {
        self.boards.iter()
    }

    pub fn count(&self, stone: Stone) -> usize {
        self.boards.iter().map(|board| board.count(stone)).sum()
    }

    pub fn stone_count(&self) -> usize {
        self.boards.iter().map(Board::stone_count).sum()
    }
}
