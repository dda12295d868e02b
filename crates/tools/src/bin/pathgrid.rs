//! Load a level template and print the BFS step counts from its up stair,
//! digits over the map glyphs. Handy for eyeballing connectivity in a
//! template before shipping it.

use anyhow::{Context, Result, bail};
use clap::Parser;
use game_core::level::template::{LEGACY_TEMPLATE_BYTES, apply_fixed_template, apply_template};
use game_core::pathfind::DistanceField;
use game_core::{Level, MAX_COLS, MAX_ROWS, Pos, TileKind};
use std::fs;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a template file, keyed text or legacy fixed-size
    #[arg(short, long)]
    template: String,

    /// Flood origin as `row col`, defaulting to the template's up stair
    #[arg(long, num_args = 2, value_names = ["ROW", "COL"])]
    start: Option<Vec<i32>>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let bytes = fs::read(&args.template)
        .with_context(|| format!("Failed to read template file: {}", args.template))?;
    let mut level = Level::new();
    if bytes.len() == LEGACY_TEMPLATE_BYTES {
        apply_fixed_template(&mut level, &bytes)?;
    } else {
        let text = String::from_utf8(bytes).context("Template is not valid UTF-8")?;
        apply_template(&mut level, &text)?;
    }

    let start = match &args.start {
        Some(pair) => Pos { y: pair[0], x: pair[1] },
        None => match level.find(TileKind::UpStair) {
            Some(found) => found,
            None => bail!("Template has no up stair; pass --start ROW COL"),
        },
    };
    if !level.is_walkable(start) {
        bail!("Start tile {},{} is not walkable", start.y, start.x);
    }

    let field = DistanceField::flood(&level, start);
    for y in 0..MAX_ROWS as i32 {
        let mut row = String::with_capacity(MAX_COLS);
        for x in 0..MAX_COLS as i32 {
            let pos = Pos { y, x };
            let glyph = if pos == field.start() {
                '@'
            } else if level.is_wall(pos) {
                '#'
            } else {
                match field.steps_at(pos) {
                    Some(steps) => char::from_digit(steps % 10, 10).unwrap_or('?'),
                    None => '.',
                }
            };
            row.push(glyph);
        }
        println!("{row}");
    }
    println!("Flooded from {},{}", field.start().y, field.start().x);
    Ok(())
}
