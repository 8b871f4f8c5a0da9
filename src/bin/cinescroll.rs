use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

/// Nominal frame interval used when pumping frames headlessly.
const FRAME_MS: f64 = 1000.0 / 60.0;

#[derive(Parser, Debug)]
#[command(name = "cinescroll", version)]
struct Cli {
    /// Log pipeline events to stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the scene table with resolved fade policies and particle budgets.
    Scenes(ScenesArgs),
    /// Scroll from one position to another and print per-frame snapshots as JSON lines.
    Trace(TraceArgs),
    /// Print the settled state at one scroll position.
    Sample(SampleArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Device {
    Mobile,
    Desktop,
}

impl From<Device> for cinescroll::DeviceClass {
    fn from(d: Device) -> Self {
        match d {
            Device::Mobile => Self::Mobile,
            Device::Desktop => Self::Desktop,
        }
    }
}

#[derive(Parser, Debug)]
struct ScenesArgs {
    /// Compositor config JSON (built-in experience when omitted).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct TraceArgs {
    /// Compositor config JSON (built-in experience when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial scroll fraction, applied without smoothing.
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// Target scroll fraction.
    #[arg(long)]
    to: f64,

    /// Number of frames to run.
    #[arg(long, default_value_t = 120)]
    frames: u32,

    /// Device class for particle selection.
    #[arg(long, value_enum, default_value_t = Device::Desktop)]
    device: Device,

    /// Print every Nth frame (the last frame is always printed).
    #[arg(long, default_value_t = 1)]
    every: u32,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Compositor config JSON (built-in experience when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scroll fraction to sample.
    #[arg(long)]
    at: f64,

    /// Device class for particle selection.
    #[arg(long, value_enum, default_value_t = Device::Desktop)]
    device: Device,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }
    match cli.cmd {
        Command::Scenes(args) => cmd_scenes(args),
        Command::Trace(args) => cmd_trace(args),
        Command::Sample(args) => cmd_sample(args),
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<cinescroll::CompositorConfig> {
    let Some(path) = path else {
        return Ok(cinescroll::CompositorConfig::default());
    };
    let cfg = cinescroll::CompositorConfig::from_path(path)
        .with_context(|| format!("load config '{}'", path.display()))?;
    Ok(cfg)
}

fn cmd_scenes(args: ScenesArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_ref())?;
    let comp = cinescroll::ScrollCompositor::new(cfg.clone(), cinescroll::DeviceClass::Desktop)
        .context("build compositor")?;
    let layering = cinescroll::LayerResolver::new(cfg.layering);

    let rows: Vec<serde_json::Value> = comp
        .registry()
        .scenes()
        .iter()
        .zip(comp.dissolve().fades())
        .enumerate()
        .map(|(i, (scene, fade))| {
            serde_json::json!({
                "index": i,
                "key": scene.key,
                "range": scene.range,
                "fade_zone": scene.fade_zone,
                "transition_duration": scene.transition_duration,
                "fade": fade,
                "base_z": layering.base_z(i),
                "particles": {
                    "mobile": cfg.particles.select(&scene.key, cinescroll::DeviceClass::Mobile),
                    "desktop": cfg.particles.select(&scene.key, cinescroll::DeviceClass::Desktop),
                },
            })
        })
        .collect();

    let out = serde_json::to_string_pretty(&rows).context("serialize scene table")?;
    println!("{out}");
    Ok(())
}

fn cmd_trace(args: TraceArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.every > 0, "--every must be > 0");
    let cfg = load_config(args.config.as_ref())?;
    let mut comp =
        cinescroll::ScrollCompositor::new(cfg, args.device.into()).context("build compositor")?;
    let mut host = cinescroll::HeadlessHost::new();

    comp.init(&mut host, cinescroll::ScrollMetrics::default());
    comp.seek(args.from);
    comp.on_raw_progress(&mut host, args.to);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut now_ms = 0.0;
    for frame in 1..=args.frames {
        let Some(token) = host.take_due() else {
            break;
        };
        now_ms += FRAME_MS;
        let Some(stats) = comp.frame(&mut host, token, now_ms) else {
            break;
        };
        if frame % args.every == 0 || frame == args.frames {
            let line = serde_json::json!({
                "frame": frame,
                "delta_secs": stats.delta_secs,
                "state": comp.snapshot(),
            });
            serde_json::to_writer(&mut out, &line).context("write trace line")?;
            writeln!(out).context("write trace line")?;
        }
    }

    comp.dispose(&mut host);
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_ref())?;
    let mut comp =
        cinescroll::ScrollCompositor::new(cfg, args.device.into()).context("build compositor")?;
    comp.seek(args.at);

    let out = serde_json::to_string_pretty(&comp.snapshot()).context("serialize snapshot")?;
    println!("{out}");
    Ok(())
}
