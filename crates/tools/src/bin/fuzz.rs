//! Fuzz harness: drive a game with random player intents and check the
//! structural invariants after every tick. The harness rng is ChaCha8 and
//! entirely separate from the world's own generator.

use anyhow::Result;
use clap::Parser;
use game_core::{
    Direction, Game, IntentSource, NullSink, PlayerIntent, RngState, WorldConfig,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u32,
    #[arg(short, long, default_value_t = 1000)]
    ticks: u32,
}

struct FuzzInput {
    rng: ChaCha8Rng,
}

impl IntentSource for FuzzInput {
    fn next_intent(&mut self) -> PlayerIntent {
        // Mostly moves, with the occasional rest or stair attempt.
        match self.rng.next_u64() % 12 {
            roll @ 0..8 => PlayerIntent::Move(Direction::ALL[roll as usize]),
            8 => PlayerIntent::Rest,
            9 => PlayerIntent::Descend,
            10 => PlayerIntent::Ascend,
            _ => PlayerIntent::Look,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for max {} ticks...", args.seed, args.ticks);
    let mut game = Game::new(RngState::from_seed(args.seed), WorldConfig::default())?;
    let mut input = FuzzInput { rng: ChaCha8Rng::seed_from_u64(u64::from(args.seed)) };
    let mut sink = NullSink;

    let mut ticks_run = 0;
    while ticks_run < args.ticks {
        let report = game.tick(&mut input, &mut sink);
        ticks_run += 1;

        // Assert invariants
        let world = game.world();
        for (id, creature) in world.creatures() {
            if creature.is_alive() {
                let level = world.level(creature.level);
                assert!(level.in_bounds(creature.pos), "Invariant failed: creature off-grid");
                assert!(!level.is_wall(creature.pos), "Invariant failed: creature inside wall");
                assert_eq!(
                    level.occupant_at(creature.pos),
                    Some(id),
                    "Invariant failed: tile does not carry its occupant"
                );
            } else {
                assert_eq!(creature.hp, -1, "Invariant failed: dead creature without sentinel");
            }
        }

        if !report.player_alive {
            println!("Player died after {ticks_run} ticks");
            break;
        }
    }

    println!("Fuzzing completed successfully after {ticks_run} ticks.");
    println!("World fingerprint: {:016x}", game.world().fingerprint());
    Ok(())
}
