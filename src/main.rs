use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use notegraph::io::{JsonNoteSource, NoteSource};
use notegraph::pipeline::{self, Options};
use notegraph::transcript::TerminalGap;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notegraph")]
#[command(version = "0.1.0")]
#[command(about = "Group note records into per-channel sound events", long_about = None)]
struct Args {
    /// Input JSON note list, optionally gzipped (reads from stdin if not specified)
    input: Option<PathBuf>,

    /// Output JSON file (writes to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output compact JSON (default is pretty-printed)
    #[arg(short, long)]
    compact: bool,

    /// End-of-piece tick used as the forward gap of the last notes
    #[arg(long)]
    end_tick: Option<u32>,

    /// Sound events per frame; emits frames instead of tracks
    #[arg(long)]
    frame_size: Option<usize>,

    /// Sound events between frame starts (defaults to the frame size)
    #[arg(long, requires = "frame_size")]
    stride: Option<usize>,

    /// Only keep this channel
    #[arg(long)]
    channel: Option<u8>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Logging goes to stderr
    init_logging(args.verbose)?;

    let options = Options {
        terminal_gap: args
            .end_tick
            .map(TerminalGap::EndOfPiece)
            .unwrap_or_default(),
        frame_size: args.frame_size,
        frame_stride: args.stride,
    };

    // Read input notes
    let notes = match &args.input {
        Some(path) => JsonNoteSource::open(path)?.read_notes()?,
        None => JsonNoteSource::new(std::io::stdin()).read_notes()?,
    };

    // Group into sound events
    let mut transcript = pipeline::transcribe(notes, &options)?;
    if let Some(channel) = args.channel {
        transcript.retain_channel(channel)?;
    }

    // Serialize to JSON
    let json_string = if options.frame_size.is_some() {
        let frames = pipeline::frames(&transcript, &options)?;
        to_json(&frames, args.compact)?
    } else {
        to_json(&transcript, args.compact)?
    };

    // Write output
    match args.output {
        Some(path) => {
            let mut file = File::create(path)?;
            file.write_all(json_string.as_bytes())?;
            file.write_all(b"\n")?;
        }
        None => {
            println!("{}", json_string);
        }
    }

    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}

/// Log to stderr so JSON on stdout stays clean
fn init_logging(verbose: u8) -> Result<(), Box<dyn std::error::Error>> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{l} {t} - {m}{n}")))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;

    log4rs::init_config(config)?;
    Ok(())
}
