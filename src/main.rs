//! harmony - spell and analyse piano chords from the command line
//!
//! # Commands
//!
//! - `harmony keys` - List the builtin key table
//! - `harmony spell` - Spell notes on the treble and bass staves
//! - `harmony highlight` - Report root/double/tritone/octave matches
//! - `harmony chords` - Print the MIDI content of LilyPond chords
//!
//! # Usage
//!
//! ```bash
//! # F#4 and C#5 in D major
//! harmony spell --key D 66 73
//!
//! # Same chord written in LilyPond
//! harmony spell --key D --lilypond "<fs' cs''>"
//!
//! # Tritones and roots, as JSON
//! harmony highlight --key C --modes roots,tritones --json 48 60 66
//! ```
//!
//! Set `RUST_LOG=debug` to see key changes and table loading.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use harmony::lilypond::parse_chords;
use harmony::{
    Clef, HighlightModes, HighlightPalette, KeyTable, MidiNumber, NoteHighlight, StaffNote,
    Trainer, TrainerConfig,
};

/// harmony - pitch spelling and harmonic highlighting for piano notation
#[derive(Parser)]
#[command(name = "harmony")]
#[command(about = "Pitch spelling and harmonic highlighting for piano notation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the builtin key table
    Keys,

    /// Spell notes on the treble and bass staves
    Spell(SpellArgs),

    /// Report which analysis modes each note matches
    Highlight(HighlightArgs),

    /// Print the MIDI content of LilyPond chords
    Chords {
        /// LilyPond text containing one or more <...> chords
        text: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct TrainerArgs {
    /// Displayed key (and signature key unless --signature-key is given)
    #[arg(short, long)]
    key: Option<String>,

    /// Key whose signature drives spelling
    #[arg(long)]
    signature_key: Option<String>,

    /// YAML trainer configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Take notes from LilyPond chords instead of MIDI numbers
    #[arg(long)]
    lilypond: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// MIDI note numbers
    notes: Vec<MidiNumber>,
}

#[derive(Args)]
struct SpellArgs {
    #[command(flatten)]
    trainer: TrainerArgs,
}

#[derive(Args)]
struct HighlightArgs {
    #[command(flatten)]
    trainer: TrainerArgs,

    /// Comma-separated modes: roots, doubles, tritones, octaves, all
    #[arg(short, long)]
    modes: Option<HighlightModes>,
}

impl TrainerArgs {
    /// Config file with command-line keys layered on top
    fn config(&self) -> Result<TrainerConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let source = fs::read_to_string(path)
                    .with_context(|| format!("reading config '{}'", path.display()))?;
                TrainerConfig::from_yaml(&source)
                    .with_context(|| format!("loading config '{}'", path.display()))?
            }
            None => TrainerConfig::default(),
        };

        if let Some(key) = &self.key {
            config.key = Some(key.clone());
            if self.signature_key.is_none() {
                config.signature_key = None;
            }
        }
        if let Some(signature_key) = &self.signature_key {
            config.signature_key = Some(signature_key.clone());
        }
        Ok(config)
    }

    /// One note group per LilyPond chord, or the positional notes as one group
    fn chords(&self) -> Result<Vec<Vec<MidiNumber>>> {
        match &self.lilypond {
            Some(text) => {
                if !self.notes.is_empty() {
                    bail!("pass either MIDI notes or --lilypond, not both");
                }
                let chords = parse_chords(text)?;
                if chords.is_empty() {
                    bail!("no <...> chords found in LilyPond input");
                }
                Ok(chords.into_iter().map(|chord| chord.visible).collect())
            }
            None => Ok(vec![self.notes.clone()]),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Keys => list_keys(),
        Commands::Spell(args) => spell(args),
        Commands::Highlight(args) => highlight(args),
        Commands::Chords { text, json } => chords(&text, json),
    }
}

fn list_keys() -> Result<()> {
    for entry in KeyTable::builtin().entries() {
        let signature = if entry.signature_spec.is_empty() {
            "-"
        } else {
            entry.signature_spec.as_str()
        };
        println!("{:<4} {:<3} {:<8} {}", entry.id, entry.short_name, signature, entry.name);
    }
    Ok(())
}

/// Load the trainer and press `notes`
fn load_trainer(config: &TrainerConfig, notes: &[MidiNumber]) -> Result<Trainer<'static>> {
    let mut trainer = Trainer::from_config(config)?;
    for &n in notes {
        trainer.note_on(n);
    }
    Ok(trainer)
}

fn spell(args: SpellArgs) -> Result<()> {
    let config = args.trainer.config()?;
    let mut snapshots = Vec::new();

    for notes in args.trainer.chords()? {
        let trainer = load_trainer(&config, &notes)?;
        if args.trainer.json {
            snapshots.push(trainer.snapshot(HighlightModes::none(), &HighlightPalette::default()));
        } else {
            println!("{}", trainer.key_signature().key().name);
            print_staff(Clef::Treble, &trainer.staff(Clef::Treble));
            print_staff(Clef::Bass, &trainer.staff(Clef::Bass));
        }
    }

    if args.trainer.json {
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
    }
    Ok(())
}

fn highlight(args: HighlightArgs) -> Result<()> {
    let config = args.trainer.config()?;
    let modes = args.modes.unwrap_or(config.highlight);
    let mut snapshots = Vec::new();

    for notes in args.trainer.chords()? {
        let trainer = load_trainer(&config, &notes)?;
        let snapshot = trainer.snapshot(modes, &config.palette);
        if args.trainer.json {
            snapshots.push(snapshot);
        } else {
            for highlight in &snapshot.highlights {
                println!("{}", format_highlight(highlight));
            }
        }
    }

    if args.trainer.json {
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
    }
    Ok(())
}

fn chords(text: &str, json: bool) -> Result<()> {
    let chords = parse_chords(text)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&chords)?);
        return Ok(());
    }

    for chord in &chords {
        let visible: Vec<String> = chord.visible.iter().map(u8::to_string).collect();
        if chord.hidden.is_empty() {
            println!("{}", visible.join(" "));
        } else {
            let hidden: Vec<String> = chord.hidden.iter().map(u8::to_string).collect();
            println!("{} (hidden: {})", visible.join(" "), hidden.join(" "));
        }
    }
    Ok(())
}

fn print_staff(clef: Clef, notes: &[StaffNote]) {
    let rendered: Vec<String> = notes
        .iter()
        .map(|note| {
            if note.has_accidental() {
                format!("{}[{}]", note.key, note.modifier)
            } else {
                note.key.clone()
            }
        })
        .collect();
    println!("  {:<6} {}", clef.name(), rendered.join(" "));
}

fn format_highlight(highlight: &NoteHighlight) -> String {
    let modes: Vec<&str> = highlight
        .matches
        .modes()
        .into_iter()
        .map(|mode| mode.name())
        .collect();
    let mut line = format!("{:>3} {}", highlight.midi, modes.join(","));
    if let Some(color) = &highlight.color {
        line.push_str(&format!(" ({})", color));
    }
    line
}
