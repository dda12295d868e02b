use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct CreatureId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn offset(self, dy: i32, dx: i32) -> Pos {
        Pos { y: self.y + dy, x: self.x + dx }
    }

    /// Row plus column, the quantity the stair-separation heuristic compares.
    pub fn coordinate_sum(self) -> i32 {
        self.y + self.x
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum TileKind {
    #[default]
    Empty,
    Wall,
    UpStair,
    DownStair,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LevelKind {
    #[default]
    None,
    Cave,
    Static,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Race {
    Human,
    Goblin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Down,
    Up,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// All eight directions; monster turns index into this with a bounded draw.
    pub const ALL: [Direction; 8] = [
        Direction::Left,
        Direction::Down,
        Direction::Up,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (0, -1),
            Direction::Down => (1, 0),
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::UpLeft => (-1, -1),
            Direction::UpRight => (-1, 1),
            Direction::DownLeft => (1, -1),
            Direction::DownRight => (1, 1),
        }
    }
}

/// A fully resolved player input. `Run` is the sustained-direction modifier
/// already collapsed to its base move; the scheduler treats both the same and
/// the input layer re-issues it while the run continues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerIntent {
    Move(Direction),
    Run(Direction),
    Rest,
    Ascend,
    Descend,
    Look,
    OpenMenu,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    BlockedByWall,
    BlockedByCreature,
    OutOfBounds,
}
