//! Breadth-first reachability and step counts over walkable tiles.
//!
//! Movement is 8-connected and every step costs one, so a plain BFS frontier
//! yields minimal step counts. Neighbor order is fixed, which keeps path
//! reconstruction deterministic.

use std::collections::VecDeque;

use crate::level::{Level, MAX_COLS, MAX_ROWS};
use crate::types::Pos;

const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Minimal step counts from a start tile to every walkable tile that can be
/// reached from it. Unreachable or unwalkable tiles record nothing.
pub struct DistanceField {
    steps: Vec<Option<u32>>,
    start: Pos,
}

impl DistanceField {
    pub fn flood(level: &Level, start: Pos) -> Self {
        let mut steps = vec![None; MAX_ROWS * MAX_COLS];
        let mut frontier = VecDeque::new();
        if level.is_walkable(start) {
            steps[index(start)] = Some(0);
            frontier.push_back(start);
        }
        while let Some(current) = frontier.pop_front() {
            let next_steps = match steps[index(current)] {
                Some(recorded) => recorded + 1,
                None => continue,
            };
            for (dy, dx) in NEIGHBOR_OFFSETS {
                let neighbor = current.offset(dy, dx);
                if !level.is_walkable(neighbor) {
                    continue;
                }
                let slot = &mut steps[index(neighbor)];
                // Strict improvement only, otherwise the frontier never drains.
                if slot.is_none_or(|recorded| next_steps < recorded) {
                    *slot = Some(next_steps);
                    frontier.push_back(neighbor);
                }
            }
        }
        Self { steps, start }
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn steps_at(&self, pos: Pos) -> Option<u32> {
        if pos.y >= 0 && pos.x >= 0 && (pos.y as usize) < MAX_ROWS && (pos.x as usize) < MAX_COLS
        {
            self.steps[index(pos)]
        } else {
            None
        }
    }
}

fn index(pos: Pos) -> usize {
    pos.y as usize * MAX_COLS + pos.x as usize
}

pub fn is_reachable(level: &Level, start: Pos, end: Pos) -> bool {
    DistanceField::flood(level, start).steps_at(end).is_some()
}

pub fn distance(level: &Level, start: Pos, end: Pos) -> Option<u32> {
    DistanceField::flood(level, start).steps_at(end)
}

/// Minimal path from `start` to `end` inclusive, walked back from the goal
/// along strictly decreasing step counts.
pub fn shortest_path(level: &Level, start: Pos, end: Pos) -> Option<Vec<Pos>> {
    let field = DistanceField::flood(level, start);
    let mut remaining = field.steps_at(end)?;
    let mut path = vec![end];
    let mut current = end;
    while remaining > 0 {
        let previous = NEIGHBOR_OFFSETS.iter().find_map(|&(dy, dx)| {
            let neighbor = current.offset(dy, dx);
            (field.steps_at(neighbor) == Some(remaining - 1)).then_some(neighbor)
        })?;
        current = previous;
        remaining -= 1;
        path.push(current);
    }
    path.reverse();
    Some(path)
}
