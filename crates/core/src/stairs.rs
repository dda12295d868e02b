//! Stair placement.
//!
//! Coordinates for both stair ends are drawn (or taken from stairs a template
//! already put down), then the pair is accepted only if both tiles are
//! walkable, mutually reachable, and far enough apart. Only the requested
//! stair kinds are carved; the other end still participates in the checks, so
//! a lone stair always lands somewhere a walker could reach from a second
//! random point.

use std::fmt;

use crate::level::{Level, MAX_COLS, MAX_ROWS};
use crate::pathfind;
use crate::rng::RngState;
use crate::types::{Pos, TileKind};

pub const MAX_STAIR_ATTEMPTS: u32 = 1024;

/// Minimum |row+col difference| between two freshly drawn stair ends.
const MIN_COORDINATE_SUM_GAP: i32 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StairPlacementError {
    AttemptsExhausted { attempts: u32 },
}

impl fmt::Display for StairPlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StairPlacementError::AttemptsExhausted { attempts } => {
                write!(f, "no acceptable stair pair in {attempts} attempts")
            }
        }
    }
}

impl std::error::Error for StairPlacementError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StairPlan {
    pub upstair: Pos,
    pub downstair: Pos,
}

/// Carve the requested stairs into `level`. Stairs already present (from a
/// template) keep their positions and anchor the checks instead of being
/// redrawn.
pub fn place_stairs(
    level: &mut Level,
    rng: &mut RngState,
    build_upstair: bool,
    build_downstair: bool,
) -> Result<StairPlan, StairPlacementError> {
    let fixed_upstair = find_existing(level, TileKind::UpStair);
    let fixed_downstair = find_existing(level, TileKind::DownStair);

    for _ in 0..MAX_STAIR_ATTEMPTS {
        let upstair = fixed_upstair.unwrap_or_else(|| draw_pos(rng));
        let downstair = fixed_downstair.unwrap_or_else(|| draw_pos(rng));

        if fixed_upstair.is_none() && fixed_downstair.is_none() {
            let gap = (upstair.coordinate_sum() - downstair.coordinate_sum()).abs();
            if gap < MIN_COORDINATE_SUM_GAP {
                continue;
            }
        }
        if !level.is_walkable(upstair) || !level.is_walkable(downstair) {
            continue;
        }
        if !pathfind::is_reachable(level, upstair, downstair) {
            continue;
        }

        if build_upstair {
            level.set_kind(upstair, TileKind::UpStair);
        }
        if build_downstair {
            level.set_kind(downstair, TileKind::DownStair);
        }
        return Ok(StairPlan { upstair, downstair });
    }
    Err(StairPlacementError::AttemptsExhausted { attempts: MAX_STAIR_ATTEMPTS })
}

fn draw_pos(rng: &mut RngState) -> Pos {
    Pos {
        y: rng.next_bounded(MAX_ROWS as u32) as i32,
        x: rng.next_bounded(MAX_COLS as u32) as i32,
    }
}

/// Template stairs never sit on the border ring, so the scan skips it.
fn find_existing(level: &Level, kind: TileKind) -> Option<Pos> {
    for y in 1..MAX_ROWS as i32 {
        for x in 1..MAX_COLS as i32 {
            let pos = Pos { y, x };
            if level.kind_at(pos) == kind {
                return Some(pos);
            }
        }
    }
    None
}
