// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::path::PathBuf;

use afrochord::export::TrackEvent;
use afrochord::{Generation, Session, Settings};
use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, Level};

#[derive(Parser, Debug)]
#[command(
    name = "afrochord",
    about = "Generate an afrobeats chord progression and melody as a MIDI file"
)]
struct Args {
    /// Key to generate in, e.g. `C minor` or `"F# major"`.
    #[arg(required = true, num_args = 1..)]
    scale: Vec<String>,

    /// Directory the MIDI file is written to.
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Seed for reproducible output.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Settings file (YAML, or TOML with a .toml extension).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bars of melody, overriding the settings file.
    #[arg(short, long)]
    bars: Option<u32>,

    /// Print the progression and events without writing a file.
    #[arg(short, long, default_value_t = false)]
    dry_run: bool,

    /// Prints extra information to the terminal.
    #[arg(short, long)]
    verbose: bool,
}

fn print_events(generation: &Generation) {
    for event in generation.track.events() {
        match event {
            TrackEvent::ProgramChange { instrument } => {
                println!("program  instrument={}", instrument);
            }
            TrackEvent::Note(note) => {
                let pitches: Vec<String> = note.pitches.iter().map(|p| p.to_string()).collect();
                println!(
                    "note     tick={:>5} len={:<2} vel={:>3} {}",
                    note.start_tick,
                    note.length.token(),
                    note.velocity,
                    pitches.join(" ")
                );
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(bars) = args.bars {
        settings.melody.bars = bars;
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let input = args.scale.join(" ");
    let mut session = Session::new(settings);
    let generation = session.generate(&input, &mut rng)?;

    debug!(pool = ?generation.pool.chords().iter().map(|c| c.to_string()).collect::<Vec<_>>(), "chord pool");
    if let Some(display) = session.display() {
        println!("{}", display);
    }

    if args.dry_run {
        print_events(&generation);
        return Ok(());
    }

    let path = generation
        .save(&args.out_dir)
        .with_context(|| format!("Failed to write MIDI file into {:?}", args.out_dir))?;
    println!("{}", path.display());

    Ok(())
}
