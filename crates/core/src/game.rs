//! The turn scheduler.
//!
//! Time advances in ticks. Each tick grants every creature its speed in
//! action points; any creature holding at least [`ACTION_COST`] points acts,
//! repeatedly, until its balance drops below the cost. The player drains
//! first, then the monsters in roster order. Player inputs that do not
//! resolve into an action (bumps, menu keys) cost nothing, so the intent
//! source is polled again within the same tick.

use crate::rng::RngState;
use crate::types::{CreatureId, Direction, MoveOutcome, PlayerIntent, Race, TileKind};
use crate::world::{self, BuildError, World, WorldConfig};

pub const ACTION_COST: u32 = 5;

/// Where player intents come from: a UI event loop, a script, a fuzzer.
pub trait IntentSource {
    fn next_intent(&mut self) -> PlayerIntent;
}

/// Where one-line game messages go.
pub trait MessageSink {
    fn show_message(&mut self, text: &str);
    fn clear_message(&mut self);
}

/// Discards all messages. Handy for replays and tests.
pub struct NullSink;

impl MessageSink for NullSink {
    fn show_message(&mut self, _text: &str) {}
    fn clear_message(&mut self) {}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub player_actions: u32,
    pub monster_actions: u32,
    pub player_alive: bool,
}

pub struct Game {
    world: World,
    rng: RngState,
    player_id: CreatureId,
}

impl Game {
    /// Build the world from `rng` and drop the player onto the entry level.
    pub fn new(mut rng: RngState, config: WorldConfig) -> Result<Self, BuildError> {
        let mut world = world::build_world(&mut rng, &config)?;
        let player_id = world.spawn_creature(Race::Human, 0, &mut rng)?;
        Ok(Self { world, rng, player_id })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn player_id(&self) -> CreatureId {
        self.player_id
    }

    pub fn player_alive(&self) -> bool {
        self.world.creature(self.player_id).is_alive()
    }

    /// Run one tick: grant action points, drain the player, then the
    /// monsters.
    pub fn tick(
        &mut self,
        intents: &mut dyn IntentSource,
        messages: &mut dyn MessageSink,
    ) -> TickReport {
        let mut report = TickReport::default();
        self.announce_level_entry(messages);

        if self.player_alive() {
            let speed = self.world.creature(self.player_id).speed;
            self.world.creature_mut(self.player_id).action_points += speed;
            while self.player_alive()
                && self.world.creature(self.player_id).action_points >= ACTION_COST
            {
                let intent = intents.next_intent();
                messages.clear_message();
                if self.resolve_player_intent(intent, messages) {
                    self.world.creature_mut(self.player_id).action_points -= ACTION_COST;
                    report.player_actions += 1;
                }
            }
        }

        for id in self.world.monsters().to_vec() {
            if !self.world.creature(id).is_alive() {
                continue;
            }
            let speed = self.world.creature(id).speed;
            self.world.creature_mut(id).action_points += speed;
            while self.world.creature(id).is_alive()
                && self.world.creature(id).action_points >= ACTION_COST
            {
                let direction = Direction::ALL[self.rng.next_bounded(8) as usize];
                self.move_creature(id, direction, None);
                // A blocked wander still spends the points.
                self.world.creature_mut(id).action_points -= ACTION_COST;
                report.monster_actions += 1;
            }
        }

        report.player_alive = self.player_alive();
        report
    }

    /// Returns true when the intent consumed an action.
    fn resolve_player_intent(
        &mut self,
        intent: PlayerIntent,
        messages: &mut dyn MessageSink,
    ) -> bool {
        match intent {
            PlayerIntent::Move(direction) | PlayerIntent::Run(direction) => {
                self.move_creature(self.player_id, direction, Some(messages))
                    == MoveOutcome::Moved
            }
            PlayerIntent::Rest => true,
            PlayerIntent::Descend => self.take_stairs(true, messages),
            PlayerIntent::Ascend => self.take_stairs(false, messages),
            PlayerIntent::Look | PlayerIntent::OpenMenu => false,
        }
    }

    /// One-step move with bump resolution. Walking into a creature deals one
    /// point of damage and leaves the mover in place.
    fn move_creature(
        &mut self,
        id: CreatureId,
        direction: Direction,
        messages: Option<&mut dyn MessageSink>,
    ) -> MoveOutcome {
        let (dy, dx) = direction.delta();
        let (from, level_index) = {
            let creature = self.world.creature(id);
            (creature.pos, creature.level)
        };
        let to = from.offset(dy, dx);
        let level = self.world.level(level_index);

        if !level.in_bounds(to) {
            return MoveOutcome::OutOfBounds;
        }
        if level.is_wall(to) {
            if let Some(sink) = messages {
                sink.show_message("You bumped into a wall");
            }
            return MoveOutcome::BlockedByWall;
        }
        if let Some(occupant) = level.occupant_at(to) {
            if let Some(sink) = messages {
                sink.show_message("You bumped into something");
            }
            self.hurt(occupant);
            return MoveOutcome::BlockedByCreature;
        }

        let level = self.world.level_mut(level_index);
        level.clear_occupant(from);
        level.set_occupant(to, id);
        self.world.creature_mut(id).pos = to;
        MoveOutcome::Moved
    }

    /// One point of bump damage. Death is uniform for every race: the slot
    /// stays, hp pins to -1, and the tile is freed.
    fn hurt(&mut self, id: CreatureId) {
        let creature = self.world.creature_mut(id);
        creature.hp -= 1;
        if creature.hp <= 0 {
            let (pos, level_index) = (creature.pos, creature.level);
            creature.hp = -1;
            self.world.level_mut(level_index).clear_occupant(pos);
        }
    }

    /// Move the player through a stairway. Requires standing on the matching
    /// stair and a free linked stair on the destination level.
    fn take_stairs(&mut self, descend: bool, messages: &mut dyn MessageSink) -> bool {
        let (pos, level_index) = {
            let player = self.world.creature(self.player_id);
            (player.pos, player.level)
        };
        let here = if descend { TileKind::DownStair } else { TileKind::UpStair };
        if self.world.level(level_index).kind_at(pos) != here {
            messages.show_message("There is no stairway here");
            return false;
        }

        self.world.set_current(level_index);
        let target = if descend { self.world.next() } else { self.world.prev() };
        if target == level_index {
            return false;
        }
        let arrival = if descend { TileKind::UpStair } else { TileKind::DownStair };
        let destination = match self.world.level(target).find(arrival) {
            Some(found) if self.world.level(target).occupant_at(found).is_none() => found,
            _ => {
                self.world.set_current(level_index);
                messages.show_message("The stairway is blocked");
                return false;
            }
        };

        self.world.level_mut(level_index).clear_occupant(pos);
        self.world.level_mut(target).set_occupant(destination, self.player_id);
        {
            let player = self.world.creature_mut(self.player_id);
            player.pos = destination;
            player.level = target;
        }
        self.announce_level_entry(messages);
        true
    }

    /// First visit to a level fires its entry message once.
    fn announce_level_entry(&mut self, messages: &mut dyn MessageSink) {
        let level_index = self.world.creature(self.player_id).level;
        let level = self.world.level_mut(level_index);
        if level.visited {
            return;
        }
        level.visited = true;
        if let Some(text) = level.entry_message.clone() {
            messages.show_message(&text);
        }
    }
}
