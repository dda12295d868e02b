//! A single dungeon level: a fixed 22x80 grid of tiles plus per-level
//! bookkeeping (generation kind, visited flag, entry message).

pub mod template;

use crate::types::{CreatureId, LevelKind, Pos, TileKind};

pub const MAX_ROWS: usize = 22;
pub const MAX_COLS: usize = 80;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Tile {
    pub kind: TileKind,
    pub occupant: Option<CreatureId>,
}

#[derive(Clone, Debug)]
pub struct Level {
    pub kind: LevelKind,
    pub visited: bool,
    pub entry_message: Option<String>,
    tiles: Vec<Tile>,
}

impl Level {
    pub fn new() -> Self {
        Self {
            kind: LevelKind::None,
            visited: false,
            entry_message: None,
            tiles: vec![Tile::default(); MAX_ROWS * MAX_COLS],
        }
    }

    /// Back to the blank state, keeping the allocation. Regeneration retries
    /// reuse the same level this way.
    pub fn reset(&mut self) {
        self.kind = LevelKind::None;
        self.visited = false;
        self.entry_message = None;
        self.tiles.fill(Tile::default());
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.y >= 0 && pos.x >= 0 && (pos.y as usize) < MAX_ROWS && (pos.x as usize) < MAX_COLS
    }

    fn index(pos: Pos) -> usize {
        pos.y as usize * MAX_COLS + pos.x as usize
    }

    /// Tile lookup that treats everything outside the grid as solid wall.
    pub fn tile_at(&self, pos: Pos) -> Tile {
        if self.in_bounds(pos) {
            self.tiles[Self::index(pos)]
        } else {
            Tile { kind: TileKind::Wall, occupant: None }
        }
    }

    pub fn kind_at(&self, pos: Pos) -> TileKind {
        self.tile_at(pos).kind
    }

    pub fn set_kind(&mut self, pos: Pos, kind: TileKind) {
        if self.in_bounds(pos) {
            self.tiles[Self::index(pos)].kind = kind;
        }
    }

    pub fn occupant_at(&self, pos: Pos) -> Option<CreatureId> {
        self.tile_at(pos).occupant
    }

    pub fn set_occupant(&mut self, pos: Pos, id: CreatureId) {
        if self.in_bounds(pos) {
            self.tiles[Self::index(pos)].occupant = Some(id);
        }
    }

    pub fn clear_occupant(&mut self, pos: Pos) {
        if self.in_bounds(pos) {
            self.tiles[Self::index(pos)].occupant = None;
        }
    }

    /// Whether a creature may stand here: floor or stair, and nobody on it.
    pub fn is_walkable(&self, pos: Pos) -> bool {
        let tile = self.tile_at(pos);
        tile.occupant.is_none()
            && matches!(
                tile.kind,
                TileKind::Empty | TileKind::UpStair | TileKind::DownStair
            )
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        self.kind_at(pos) == TileKind::Wall
    }

    /// First tile of the given kind in row-major order.
    pub fn find(&self, kind: TileKind) -> Option<Pos> {
        for y in 0..MAX_ROWS as i32 {
            for x in 0..MAX_COLS as i32 {
                let pos = Pos { y, x };
                if self.kind_at(pos) == kind {
                    return Some(pos);
                }
            }
        }
        None
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::new()
    }
}
