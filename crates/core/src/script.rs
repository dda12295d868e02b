//! Scripted runs: a seed plus a recorded intent stream, replayable to a
//! world fingerprint. The JSON form is what the replay and fuzz tools write
//! and read.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::{Game, IntentSource, NullSink};
use crate::rng::RngState;
use crate::types::PlayerIntent;
use crate::world::{BuildError, WorldConfig};

pub const SCRIPT_FORMAT_VERSION: u16 = 1;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntentScript {
    pub format_version: u16,
    /// World seed. Zero would pull process entropy and defeat the replay.
    pub seed: u32,
    pub ticks: u32,
    pub intents: Vec<PlayerIntent>,
}

impl IntentScript {
    pub fn new(seed: u32, ticks: u32) -> Self {
        Self { format_version: SCRIPT_FORMAT_VERSION, seed, ticks, intents: Vec::new() }
    }

    pub fn push(&mut self, intent: PlayerIntent) {
        self.intents.push(intent);
    }

    pub fn to_json(&self) -> Result<String, ScriptError> {
        serde_json::to_string_pretty(self).map_err(ScriptError::Json)
    }

    pub fn from_json(text: &str) -> Result<Self, ScriptError> {
        let script: Self = serde_json::from_str(text).map_err(ScriptError::Json)?;
        if script.format_version != SCRIPT_FORMAT_VERSION {
            return Err(ScriptError::UnsupportedVersion { found: script.format_version });
        }
        Ok(script)
    }
}

/// Feeds recorded intents in order, then rests once the script runs dry.
pub struct ScriptedInput {
    intents: Vec<PlayerIntent>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(intents: Vec<PlayerIntent>) -> Self {
        Self { intents, cursor: 0 }
    }

    pub fn exhausted(&self) -> bool {
        self.cursor >= self.intents.len()
    }
}

impl IntentSource for ScriptedInput {
    fn next_intent(&mut self) -> PlayerIntent {
        match self.intents.get(self.cursor) {
            Some(&intent) => {
                self.cursor += 1;
                intent
            }
            None => PlayerIntent::Rest,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScriptReport {
    pub fingerprint: u64,
    pub ticks_run: u32,
    pub player_alive: bool,
}

#[derive(Debug)]
pub enum ScriptError {
    Build(BuildError),
    Json(serde_json::Error),
    UnsupportedVersion { found: u16 },
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Build(err) => write!(f, "world build failed: {err}"),
            ScriptError::Json(err) => write!(f, "script json: {err}"),
            ScriptError::UnsupportedVersion { found } => {
                write!(f, "script format version {found}, expected {SCRIPT_FORMAT_VERSION}")
            }
        }
    }
}

impl std::error::Error for ScriptError {}

impl From<BuildError> for ScriptError {
    fn from(err: BuildError) -> Self {
        ScriptError::Build(err)
    }
}

/// Replay a script against a fresh world and report the final fingerprint.
/// The run stops early if the player dies.
pub fn run_script(script: &IntentScript) -> Result<ScriptReport, ScriptError> {
    let rng = RngState::from_seed(script.seed);
    let mut game = Game::new(rng, WorldConfig::default())?;
    let mut input = ScriptedInput::new(script.intents.clone());
    let mut sink = NullSink;
    let mut ticks_run = 0;
    for _ in 0..script.ticks {
        let report = game.tick(&mut input, &mut sink);
        ticks_run += 1;
        if !report.player_alive {
            break;
        }
    }
    Ok(ScriptReport {
        fingerprint: game.world().fingerprint(),
        ticks_run,
        player_alive: game.player_alive(),
    })
}
