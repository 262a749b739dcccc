//! Command-line front end: list, render and audition the procedural sounds.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use haunted_castle_lib::audio::export::write_wav;
use haunted_castle_lib::logging::init_tracing;
use haunted_castle_lib::{EngineConfig, HauntedCastle, SoundEffect, SynthesizedClip};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "haunted-castle")]
#[command(about = "Procedural sound effects for Haunted Castle")]
struct Args {
    /// JSON engine config (custom sounds, music, volumes)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List catalog effects, custom sounds and music tracks
    List,
    /// Render a sound (or `all`) to 16-bit mono WAV files
    Render {
        key: String,
        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
    /// Play a sound or music track on the default output device
    Play {
        key: String,
        /// Seconds to keep a music track playing
        #[arg(long, default_value_t = 5.0, value_parser = parse_seconds)]
        seconds: f32,
    },
}

/// Finite, non-negative playback length.
fn parse_seconds(value: &str) -> std::result::Result<f32, String> {
    let seconds: f32 = value.parse().map_err(|e| format!("{}", e))?;
    if seconds.is_finite() && seconds >= 0.0 {
        Ok(seconds)
    } else {
        Err(format!("expected a finite number of seconds, got {}", value))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    init_tracing(&config.logging);

    let castle = HauntedCastle::new(config)?;
    match args.command {
        Command::List => list(&castle),
        Command::Render { key, out } => render(&castle, &key, &out),
        Command::Play { key, seconds } => play(castle, &key, seconds),
    }
}

fn list(castle: &HauntedCastle) -> Result<()> {
    println!("Effects:");
    for effect in SoundEffect::ALL {
        println!("  {:<16} {:.2}s", effect.key(), effect.recipe().total_duration());
    }

    let config = castle.config();
    if !config.sounds.is_empty() {
        println!("Custom sounds:");
        let mut names: Vec<_> = config.sounds.iter().collect();
        names.sort_by(|a, b| a.0.cmp(b.0));
        for (name, recipe) in names {
            println!("  {:<16} {:.2}s", name, recipe.total_duration());
        }
    }

    println!("Music:");
    let mut tracks: Vec<_> = config.music.iter().collect();
    tracks.sort_by(|a, b| a.0.cmp(b.0));
    for (name, recipe) in tracks {
        println!("  {:<16} {:.2}s loop", name, recipe.total_duration());
    }
    Ok(())
}

/// Sound or music clip for `key`; sounds win over tracks of the same name.
fn resolve(castle: &HauntedCastle, key: &str) -> Result<Arc<SynthesizedClip>> {
    let audio = castle.audio();
    let server = audio.lock();
    match server.resolve_named(key) {
        Ok(clip) => Ok(clip),
        Err(_) if castle.config().music.contains_key(key) => Ok(server.resolve_music(key)?),
        Err(err) => Err(err.into()),
    }
}

fn render(castle: &HauntedCastle, key: &str, out: &Path) -> Result<()> {
    std::fs::create_dir_all(out)
        .with_context(|| format!("failed to create {}", out.display()))?;

    let keys: Vec<String> = if key == "all" {
        let config = castle.config();
        SoundEffect::ALL
            .iter()
            .map(|e| e.key().to_string())
            .chain(config.sounds.keys().cloned())
            .chain(config.music.keys().cloned())
            .collect()
    } else {
        vec![key.to_string()]
    };

    for key in &keys {
        let clip = resolve(castle, key)?;
        let path = out.join(format!("{}.wav", key));
        write_wav(&clip, &path).with_context(|| format!("failed to write {}", path.display()))?;
        println!("{} ({} samples)", path.display(), clip.len());
    }
    Ok(())
}

fn play(mut castle: HauntedCastle, key: &str, seconds: f32) -> Result<()> {
    let is_music = castle.config().music.contains_key(key) && !castle.config().sounds.contains_key(key);
    let clip = resolve(&castle, key)?;

    if !castle.start_audio() {
        bail!("no audio output (build with `--features output` and check the device)");
    }

    let audio = castle.audio();
    let duration = if is_music {
        audio.lock().play_music(key);
        seconds.max(0.0)
    } else {
        audio.lock().play_clip(Arc::clone(&clip));
        clip.duration_secs()
    };

    let wait = Duration::try_from_secs_f32(duration + 0.2)
        .with_context(|| format!("cannot wait {} seconds", seconds))?;
    std::thread::sleep(wait);
    castle.stop_audio();
    Ok(())
}
