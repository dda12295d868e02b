pub mod cave;
pub mod content;
pub mod game;
pub mod level;
pub mod pathfind;
pub mod rng;
pub mod script;
pub mod stairs;
pub mod types;
pub mod world;

pub use game::{Game, IntentSource, MessageSink, NullSink, TickReport};
pub use level::{Level, MAX_COLS, MAX_ROWS};
pub use rng::RngState;
pub use script::{IntentScript, ScriptReport, ScriptedInput, run_script};
pub use types::*;
pub use world::{BuildError, World, WorldConfig, build_world};
