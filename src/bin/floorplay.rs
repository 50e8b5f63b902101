use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use floorplay::{Engine, FloorPlan, SyntheticConfig, TraceSource};

#[derive(Parser, Debug)]
#[command(name = "floorplay", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a synthetic trace artifact.
    Synth(SynthArgs),
    /// Replay a trace headlessly and print sampled scenes as JSON lines.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct SynthArgs {
    /// Output trace JSON path.
    #[arg(long)]
    out: PathBuf,

    /// Generator seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Number of frames to generate.
    #[arg(long, default_value_t = 120)]
    frames: usize,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input trace JSON. Missing or malformed input degrades to a
    /// synthetic trace.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Seed for the synthetic fallback.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Tick interval in milliseconds (clamped to 50..=1000).
    #[arg(long, default_value_t = 400)]
    speed: u64,

    /// Number of ticks to replay.
    #[arg(long, default_value_t = 10)]
    ticks: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Synth(args) => synth(args),
        Command::Play(args) => play(args),
    }
}

fn synth(args: SynthArgs) -> anyhow::Result<()> {
    let registry = FloorPlan::standard(900.0, 520.0)?;
    let config = SyntheticConfig {
        frames: args.frames,
        ..SyntheticConfig::default()
    };
    let trace = TraceSource::with_config(args.seed, config).synthetic(&registry);

    let json = serde_json::to_string_pretty(&trace.0)?;
    std::fs::write(&args.out, json)
        .with_context(|| format!("failed to write {}", args.out.display()))?;
    eprintln!("wrote {} frames to {}", trace.len(), args.out.display());
    Ok(())
}

fn play(args: PlayArgs) -> anyhow::Result<()> {
    let registry = FloorPlan::standard(900.0, 520.0)?;
    let trace = TraceSource::new(args.seed).load(&args.in_path, &registry);

    let mut engine = Engine::new(trace, registry, args.speed);
    let speed = engine.speed_ms();
    engine.start(0);

    // Logical clock: jump straight to each tick's due time.
    for i in 1..=args.ticks {
        let now = i * speed;
        engine.tick(now);
        let scene = engine.sample(now);
        println!("{}", serde_json::to_string(&scene)?);
    }
    Ok(())
}
