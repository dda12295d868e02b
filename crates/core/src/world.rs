//! World assembly and the level cursor.
//!
//! A world is a fixed stack of levels generated up front from one rng stream:
//! the entry caves at index 0, plain caves between, and the hall at the deepest
//! index. Creatures live in a slotmap arena; tiles refer to them by key.

use std::fmt;

use slotmap::SlotMap;
use xxhash_rust::xxh3::xxh3_64;

use crate::cave::{self, CaveParams};
use crate::content;
use crate::level::template::{self, TemplateError};
use crate::level::{Level, MAX_COLS, MAX_ROWS};
use crate::rng::RngState;
use crate::stairs::{self, StairPlacementError};
use crate::types::{CreatureId, LevelKind, Pos, Race, TileKind};

/// Full regenerations allowed per level before assembly gives up.
pub const MAX_LEVEL_ATTEMPTS: u32 = 64;

const MAX_SPAWN_ATTEMPTS: u32 = 4096;

#[derive(Clone, Copy, Debug)]
pub struct WorldConfig {
    pub levels: usize,
    pub monsters: usize,
    pub cave: CaveParams,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self { levels: 5, monsters: 3, cave: CaveParams::default() }
    }
}

#[derive(Clone, Debug)]
pub struct Creature {
    pub race: Race,
    pub pos: Pos,
    pub level: usize,
    pub hp: i32,
    pub speed: u32,
    pub action_points: u32,
}

impl Creature {
    /// Dead creatures keep their slot with hp pinned to -1.
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

#[derive(Debug)]
pub enum BuildError {
    LevelAttemptsExhausted { level: usize, attempts: u32 },
    SpawnAttemptsExhausted { level: usize },
    Template(TemplateError),
    TooFewLevels { requested: usize },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::LevelAttemptsExhausted { level, attempts } => {
                write!(f, "level {level} failed generation {attempts} times")
            }
            BuildError::SpawnAttemptsExhausted { level } => {
                write!(f, "no free tile to spawn a creature on level {level}")
            }
            BuildError::Template(err) => write!(f, "template: {err}"),
            BuildError::TooFewLevels { requested } => {
                write!(f, "a world needs at least 2 levels, got {requested}")
            }
        }
    }
}

impl std::error::Error for BuildError {}

impl From<TemplateError> for BuildError {
    fn from(err: TemplateError) -> Self {
        BuildError::Template(err)
    }
}

#[derive(Debug)]
pub struct World {
    levels: Vec<Level>,
    current: usize,
    creatures: SlotMap<CreatureId, Creature>,
    monsters: Vec<CreatureId>,
}

impl World {
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn first(&self) -> &Level {
        &self.levels[0]
    }

    pub fn current(&self) -> &Level {
        &self.levels[self.current]
    }

    pub fn current_mut(&mut self) -> &mut Level {
        &mut self.levels[self.current]
    }

    /// Step the cursor one level deeper, clamped at the last level.
    pub fn next(&mut self) -> usize {
        self.current = (self.current + 1).min(self.levels.len() - 1);
        self.current
    }

    /// Step the cursor one level up, clamped at the entry level.
    pub fn prev(&mut self) -> usize {
        self.current = self.current.saturating_sub(1);
        self.current
    }

    pub(crate) fn set_current(&mut self, index: usize) {
        debug_assert!(index < self.levels.len());
        self.current = index;
    }

    pub fn level(&self, index: usize) -> &Level {
        &self.levels[index]
    }

    pub fn level_mut(&mut self, index: usize) -> &mut Level {
        &mut self.levels[index]
    }

    pub fn creature(&self, id: CreatureId) -> &Creature {
        &self.creatures[id]
    }

    pub fn creature_mut(&mut self, id: CreatureId) -> &mut Creature {
        &mut self.creatures[id]
    }

    pub fn monsters(&self) -> &[CreatureId] {
        &self.monsters
    }

    pub fn creatures(&self) -> impl Iterator<Item = (CreatureId, &Creature)> {
        self.creatures.iter()
    }

    /// Spawn a creature of `race` on a random free tile of a level. Draws
    /// coordinates from `rng` until one is walkable.
    pub fn spawn_creature(
        &mut self,
        race: Race,
        level_index: usize,
        rng: &mut RngState,
    ) -> Result<CreatureId, BuildError> {
        let pos = {
            let level = &self.levels[level_index];
            let mut found = None;
            for _ in 0..MAX_SPAWN_ATTEMPTS {
                let candidate = Pos {
                    y: rng.next_bounded(MAX_ROWS as u32) as i32,
                    x: rng.next_bounded(MAX_COLS as u32) as i32,
                };
                if level.is_walkable(candidate) {
                    found = Some(candidate);
                    break;
                }
            }
            found.ok_or(BuildError::SpawnAttemptsExhausted { level: level_index })?
        };
        let stats = content::race_stats(race);
        let id = self.creatures.insert(Creature {
            race,
            pos,
            level: level_index,
            hp: stats.hp,
            speed: stats.speed,
            action_points: 0,
        });
        self.levels[level_index].set_occupant(pos, id);
        Ok(id)
    }

    /// Stable byte serialization of everything a seed determines: level
    /// layouts, flags, and the creature roster.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.levels.len() * MAX_ROWS * MAX_COLS + 64);
        bytes.extend_from_slice(&(self.levels.len() as u32).to_le_bytes());
        for level in &self.levels {
            bytes.push(match level.kind {
                LevelKind::None => 0,
                LevelKind::Cave => 1,
                LevelKind::Static => 2,
            });
            bytes.push(u8::from(level.visited));
            for y in 0..MAX_ROWS as i32 {
                for x in 0..MAX_COLS as i32 {
                    bytes.push(match level.kind_at(Pos { y, x }) {
                        TileKind::Empty => 0,
                        TileKind::Wall => 1,
                        TileKind::UpStair => 2,
                        TileKind::DownStair => 3,
                    });
                }
            }
        }
        bytes.extend_from_slice(&(self.creatures.len() as u32).to_le_bytes());
        for (_, creature) in &self.creatures {
            bytes.push(match creature.race {
                Race::Human => 0,
                Race::Goblin => 1,
            });
            bytes.extend_from_slice(&creature.pos.y.to_le_bytes());
            bytes.extend_from_slice(&creature.pos.x.to_le_bytes());
            bytes.extend_from_slice(&(creature.level as u32).to_le_bytes());
            bytes.extend_from_slice(&creature.hp.to_le_bytes());
            bytes.extend_from_slice(&creature.speed.to_le_bytes());
            bytes.extend_from_slice(&creature.action_points.to_le_bytes());
        }
        bytes.extend_from_slice(&(self.current as u32).to_le_bytes());
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

/// Build the whole world from one rng stream. Each level is regenerated from
/// scratch until stair placement accepts it, up to [`MAX_LEVEL_ATTEMPTS`]
/// times.
pub fn build_world(rng: &mut RngState, config: &WorldConfig) -> Result<World, BuildError> {
    if config.levels < 2 {
        return Err(BuildError::TooFewLevels { requested: config.levels });
    }
    let mut levels = Vec::with_capacity(config.levels);
    for index in 0..config.levels {
        let depth = LevelDepth::of(index, config.levels);
        levels.push(build_level(rng, config, index, depth)?);
    }

    let mut world = World {
        levels,
        current: 0,
        creatures: SlotMap::with_key(),
        monsters: Vec::with_capacity(config.monsters),
    };
    for _ in 0..config.monsters {
        let id = world.spawn_creature(Race::Goblin, 0, rng)?;
        world.monsters.push(id);
    }
    Ok(world)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum LevelDepth {
    Entry,
    Middle,
    Deepest,
}

impl LevelDepth {
    fn of(index: usize, total: usize) -> Self {
        if index == 0 {
            LevelDepth::Entry
        } else if index == total - 1 {
            LevelDepth::Deepest
        } else {
            LevelDepth::Middle
        }
    }
}

fn build_level(
    rng: &mut RngState,
    config: &WorldConfig,
    index: usize,
    depth: LevelDepth,
) -> Result<Level, BuildError> {
    let mut level = Level::new();
    for _ in 0..MAX_LEVEL_ATTEMPTS {
        level.reset();
        cave::generate(&mut level, rng, &config.cave);
        let (build_upstair, build_downstair) = match depth {
            LevelDepth::Entry => {
                template::apply_template(&mut level, content::ENTRY_TEMPLATE)?;
                level.entry_message = Some(content::ENTRY_MESSAGE.to_owned());
                (false, true)
            }
            LevelDepth::Middle => (true, true),
            LevelDepth::Deepest => {
                template::apply_template(&mut level, content::HALL_TEMPLATE)?;
                level.entry_message = Some(content::HALL_MESSAGE.to_owned());
                (true, false)
            }
        };
        match stairs::place_stairs(&mut level, rng, build_upstair, build_downstair) {
            Ok(_) => return Ok(level),
            Err(StairPlacementError::AttemptsExhausted { .. }) => continue,
        }
    }
    Err(BuildError::LevelAttemptsExhausted { level: index, attempts: MAX_LEVEL_ATTEMPTS })
}
