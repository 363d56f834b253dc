use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// The four ways to slide the blank, in canonical order.
///
/// Expansion always generates children in this order. All three strategies
/// inherit their tie-break behavior from it, so reordering changes every
/// reported path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

pub const ACTIONS: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Action::Up => write!(f, "Up"),
            Action::Down => write!(f, "Down"),
            Action::Left => write!(f, "Left"),
            Action::Right => write!(f, "Right"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    WrongLength { len: usize, n: usize },
    TooSmall(usize),
    NotAPermutation,
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            BoardError::WrongLength { len, n } => {
                write!(f, "Got {} tiles, a {}x{} board needs {}", len, n, n, n * n)
            }
            BoardError::TooSmall(n) => write!(f, "Board dimension must be at least 2, got {}", n),
            BoardError::NotAPermutation => {
                write!(f, "Tiles are not a permutation of 0..n*n (duplicate or out of range value)")
            }
        }
    }
}

impl Error for BoardError {}

/// An n*n tile configuration, stored flat in row-major order. Value 0 is
/// the blank. Never mutated after construction - moves produce new boards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    tiles: Box<[u8]>,
    n: usize,
    blank: usize,
}

impl Board {
    pub fn new(tiles: Vec<u8>, n: usize) -> Result<Board, BoardError> {
        if n < 2 {
            return Err(BoardError::TooSmall(n));
        }
        if tiles.len() != n * n {
            return Err(BoardError::WrongLength { len: tiles.len(), n });
        }

        let mut seen = vec![false; tiles.len()];
        let mut blank = 0;
        for (i, &tile) in tiles.iter().enumerate() {
            if tile as usize >= tiles.len() || seen[tile as usize] {
                return Err(BoardError::NotAPermutation);
            }
            seen[tile as usize] = true;
            if tile == 0 {
                blank = i;
            }
        }

        Ok(Board { tiles: tiles.into_boxed_slice(), n, blank })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    /// Index of the blank cell.
    pub fn blank(&self) -> usize {
        self.blank
    }

    /// The goal is the identity permutation - blank in the top left corner,
    /// tiles counting up in row-major order.
    pub fn is_goal(&self) -> bool {
        self.tiles.iter().enumerate().all(|(i, &tile)| tile as usize == i)
    }

    /// Total Manhattan displacement of all cells from their goal positions.
    ///
    /// The blank is included - it only contributes when it is away from
    /// cell 0, which keeps the sum zero exactly on the goal board.
    pub fn manhattan(&self) -> u32 {
        let n = self.n as i32;
        let mut sum = 0;
        for (idx, &tile) in self.tiles.iter().enumerate() {
            let idx = idx as i32;
            let tile = i32::from(tile);
            sum += (tile / n - idx / n).abs() + (tile % n - idx % n).abs();
        }
        sum as u32
    }

    /// Slides the blank one cell in the direction of `action`, returning
    /// `None` when the blank is already at the corresponding edge.
    pub fn apply(&self, action: Action) -> Option<Board> {
        let n = self.n;
        let blank = self.blank;
        let target = match action {
            Action::Up => {
                if blank < n {
                    return None;
                }
                blank - n
            }
            Action::Down => {
                if blank >= n * (n - 1) {
                    return None;
                }
                blank + n
            }
            Action::Left => {
                if blank % n == 0 {
                    return None;
                }
                blank - 1
            }
            Action::Right => {
                if blank % n == n - 1 {
                    return None;
                }
                blank + 1
            }
        };

        let mut tiles = self.tiles.clone();
        tiles.swap(blank, target);
        Some(Board { tiles, n: self.n, blank: target })
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.n) {
            let cells: Vec<String> = row.iter().map(|tile| tile.to_string()).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}
