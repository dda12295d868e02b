//! Replay a recorded intent script against a fresh world and print the
//! resulting fingerprint.

use anyhow::{Context, Result};
use clap::Parser;
use game_core::{IntentScript, run_script};
use std::fs;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the intent script JSON file to replay
    #[arg(short, long)]
    script: String,

    /// Emit the report as JSON instead of plain text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let script_data = fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script file: {}", args.script))?;
    let script = IntentScript::from_json(&script_data)
        .with_context(|| "Failed to parse intent script")?;

    let report = run_script(&script).with_context(|| "Replay failed during execution")?;

    if args.json {
        let out = serde_json::json!({
            "seed": script.seed,
            "ticks_run": report.ticks_run,
            "player_alive": report.player_alive,
            "fingerprint": format!("{:016x}", report.fingerprint),
        });
        println!("{out}");
    } else {
        println!("Replay complete.");
        println!("Seed: {}", script.seed);
        println!("Ticks run: {}", report.ticks_run);
        println!("Player alive: {}", report.player_alive);
        println!("World fingerprint: {:016x}", report.fingerprint);
    }

    Ok(())
}
