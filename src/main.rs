use chordsynth::runtime::{NativeSynth, PlayOptions};
use chordsynth::synth::chord::{chord_count, chords_json, CHORDS};
use chordsynth::synth::SynthConfig;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chordsynth")]
#[command(version, about = "Three-voice additive sine synthesizer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play through the output device, controlled from the keyboard
    Play(PlayArgs),

    /// Print the chord table as JSON
    Chords,
}

#[derive(Args, Default)]
struct PlayArgs {
    /// Output device name (substring match)
    #[arg(long)]
    device: Option<String>,

    /// Buffer size requested from the device, in frames
    #[arg(long)]
    buffer_size: Option<u32>,

    /// Chord to start on, by index or name (C, Am, F, G)
    #[arg(long, value_parser = parse_chord)]
    chord: Option<usize>,

    /// Gain applied to every voice at startup
    #[arg(long)]
    gain: Option<f32>,

    /// Start with the master gate open
    #[arg(long)]
    enabled: bool,
}

fn parse_chord(s: &str) -> Result<usize, String> {
    if let Ok(index) = s.parse::<usize>() {
        return if index < chord_count() {
            Ok(index)
        } else {
            Err(format!("chord index must be below {}", chord_count()))
        };
    }
    CHORDS
        .iter()
        .position(|chord| chord.name.eq_ignore_ascii_case(s))
        .ok_or_else(|| format!("unknown chord '{}'", s))
}

fn play(args: PlayArgs) -> chordsynth::Result<()> {
    let mut config = SynthConfig::default();
    if let Some(buffer_size) = args.buffer_size {
        config.buffer_size = buffer_size;
    }

    let options = PlayOptions {
        device_name: args.device,
        chord: args.chord,
        gain: args.gain,
        enabled: args.enabled,
    };
    NativeSynth::start(config, options)?.run()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Play(PlayArgs::default())) {
        Commands::Play(args) => play(args)?,
        Commands::Chords => println!("{}", chords_json()?),
    }
    Ok(())
}
