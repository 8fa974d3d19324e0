//! chord - harmony analysis from the command line
//!
//! Subcommands:
//! - `chord key <text>` - Parse a key and show its scale
//! - `chord chords <tonic>` - Diatonic chords of a key
//! - `chord degree <symbol> --key <text>` - Roman numeral of a chord symbol
//! - `chord subs <symbol> --key <text>` - Ranked substitutions
//! - `chord suggest --key <text> <symbols..>` - Next chord after a sequence of symbols
//! - `chord progressions --family <f>` - Browse the progression dataset
//! - `chord match --family <f> <romans..>` - Progressions containing a numeral run
//! - `chord next --tonic <x> <romans..>` - Weighted next-numeral vote
//! - `chord start --family <f> --tonic <x>` - Common opening chords
//! - `chord tags` - Every progression tag

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use harmony::{ChordProfile, ChordType, ModeFamily, ModeId};
use harmonyconf::HarmonyConfig;
use owo_colors::OwoColorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod formatter;

use formatter::Formatter;

#[derive(Parser)]
#[command(name = "chord")]
#[command(about = "Keys, chords, substitutions and progressions")]
#[command(version)]
struct Cli {
    /// Config file read in place of ./chordcraft.toml
    #[arg(long, global = true, env = "CHORDCRAFT_CONFIG")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a key ("Em", "Bb major", "F# dorian") and show its scale
    Key {
        /// Free-text key
        text: String,
    },

    /// List the seven diatonic chords of a key
    Chords {
        /// Tonic note (C, F#, Bb)
        tonic: String,

        /// Mode name (ionian, dorian, ..., harmonic_minor)
        #[arg(short, long, default_value = "ionian")]
        mode: ModeId,

        /// Build seventh chords instead of triads
        #[arg(long)]
        sevenths: bool,
    },

    /// Roman numeral of a chord symbol in a key
    Degree {
        /// Chord symbol (G7, F#m7b5, Bb/D)
        symbol: String,

        /// Free-text key
        #[arg(short, long)]
        key: String,
    },

    /// Ranked substitutions for a diatonic chord
    Subs {
        /// Chord symbol or Roman numeral of the chord to replace
        symbol: String,

        /// Free-text key
        #[arg(short, long)]
        key: String,

        /// Chord that follows the target
        #[arg(short, long)]
        next: Option<String>,

        /// Work with seventh chords
        #[arg(long)]
        sevenths: bool,
    },

    /// Suggest the next chord after a sequence of chord symbols
    Suggest {
        /// Free-text key
        #[arg(short, long)]
        key: String,

        /// Chord profile: triad, seventh or jazz (default from config)
        #[arg(short, long)]
        profile: Option<ChordProfile>,

        /// Add altered dominants to jazz suggestions
        #[arg(long)]
        spice: bool,

        /// Maximum suggestions (default from config)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Chord symbols played so far
        symbols: Vec<String>,
    },

    /// Browse the progression dataset
    Progressions {
        /// major or minor
        #[arg(short, long)]
        family: ModeFamily,

        /// Keep progressions carrying any of these tags
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// triad or seventh
        #[arg(long = "type")]
        chord_type: Option<ChordType>,

        /// Spell the progressions in this tonic
        #[arg(long)]
        tonic: Option<String>,
    },

    /// Progressions containing a contiguous run of numerals
    Match {
        /// major or minor
        #[arg(short, long)]
        family: ModeFamily,

        /// Roman numerals to look for
        #[arg(required = true)]
        romans: Vec<String>,
    },

    /// Weighted vote for the numeral that follows a sequence
    Next {
        /// Tonic note
        #[arg(short, long)]
        tonic: String,

        /// Mode name
        #[arg(short, long, default_value = "ionian")]
        mode: ModeId,

        /// Roman numerals played so far
        romans: Vec<String>,
    },

    /// Common opening chords for a family
    Start {
        /// major or minor
        #[arg(short, long)]
        family: ModeFamily,

        /// Tonic note
        #[arg(short, long)]
        tonic: String,
    },

    /// List every progression tag
    Tags,

    /// Show the effective configuration and where it came from
    Config,

    /// Generate shell completions
    Completions {
        /// Shell to generate for
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let no_color = cli.no_color;

    if let Err(e) = run(cli) {
        if no_color {
            eprintln!("error: {:#}", e);
        } else {
            eprintln!("{} {:#}", "error:".bright_red().bold(), e);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "chord", &mut std::io::stdout());
        return Ok(());
    }

    let (config, sources) = HarmonyConfig::load_with_sources_from(cli.config.as_deref())
        .context("Failed to load configuration")?;
    init_tracing(&config.telemetry.log_level);
    debug!(files = ?sources.files, env = ?sources.env_overrides, "config loaded");

    let fmt = Formatter::new(cli.json, cli.no_color);

    match cli.command {
        Commands::Key { text } => commands::key(&fmt, &text),
        Commands::Chords {
            tonic,
            mode,
            sevenths,
        } => commands::chords(&fmt, &tonic, mode, sevenths),
        Commands::Degree { symbol, key } => commands::degree(&fmt, &symbol, &key),
        Commands::Subs {
            symbol,
            key,
            next,
            sevenths,
        } => commands::subs(&fmt, &config, &symbol, &key, next.as_deref(), sevenths),
        Commands::Suggest {
            key,
            profile,
            spice,
            limit,
            symbols,
        } => {
            let options =
                commands::suggestion_options(&config.suggestions, profile, spice, limit)?;
            commands::suggest(&fmt, &key, &symbols, &options)
        }
        Commands::Progressions {
            family,
            tags,
            chord_type,
            tonic,
        } => commands::progressions(&fmt, family, &tags, chord_type, tonic.as_deref()),
        Commands::Match { family, romans } => commands::find_matches(&fmt, family, &romans),
        Commands::Next {
            tonic,
            mode,
            romans,
        } => commands::next(&fmt, &tonic, mode, &romans),
        Commands::Start { family, tonic } => commands::start(&fmt, family, &tonic),
        Commands::Tags => commands::tags(&fmt),
        Commands::Config => commands::show_config(&fmt, &config, &sources),
        Commands::Completions { .. } => Ok(()),
    }
}

/// Log to stderr so stdout stays clean for results.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
