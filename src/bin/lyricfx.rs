use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lyricfx::render::ParleyMetrics;
use lyricfx::{
    AudioData, ChainConfig, ColorPalette, CpuRasterizer, EffectCategory, EffectChain,
    EffectInstanceConfig, EffectRegistry, EngineConfig, FrameInput, LyricLine, RecordingCanvas,
    VisualSettings,
};

#[derive(Parser, Debug)]
#[command(name = "lyricfx", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered effects.
    List(ListArgs),
    /// Print an effect's default parameters as JSON.
    Defaults(DefaultsArgs),
    /// Render one frame of a lyric line as a PNG.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Only effects of this category (lyric, background, overlay).
    #[arg(long)]
    category: Option<String>,

    /// Only effects carrying this tag.
    #[arg(long)]
    tag: Option<String>,
}

#[derive(Parser, Debug)]
struct DefaultsArgs {
    /// Effect id.
    effect_id: String,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Chain preset JSON; without it, `--effect` picks effects with default parameters.
    #[arg(long)]
    chain: Option<PathBuf>,

    /// Effect id to stack (repeatable).
    #[arg(long = "effect")]
    effects: Vec<String>,

    /// TTF/OTF font used for measuring and drawing text.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Lyric text.
    #[arg(long)]
    text: String,

    /// Line progress in `[0, 1]`.
    #[arg(long, default_value_t = 0.5)]
    progress: f64,

    /// Line duration in seconds.
    #[arg(long, default_value_t = 4.0)]
    duration: f64,

    /// Simulation rate used to reach `progress`.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Output width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Output height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Constant bass level (`0..=255`).
    #[arg(long, default_value_t = 0.0)]
    bass: f64,

    /// Background color (`#RRGGBB[AA]`).
    #[arg(long, default_value = "#12141c")]
    background: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::List(args) => cmd_list(args),
        Command::Defaults(args) => cmd_defaults(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn cmd_list(args: ListArgs) -> anyhow::Result<()> {
    let registry = EffectRegistry::global();
    let category = match args.category.as_deref() {
        Some(name) => Some(
            EffectCategory::from_name(name)
                .with_context(|| format!("unknown category '{name}'"))?,
        ),
        None => None,
    };
    for meta in registry.list() {
        if category.is_some_and(|c| c != meta.category) {
            continue;
        }
        if let Some(tag) = &args.tag
            && !meta.tags.contains(&tag.as_str())
        {
            continue;
        }
        println!(
            "{:<22} {:<11} {}",
            meta.id,
            meta.category.as_str(),
            meta.description
        );
    }
    Ok(())
}

fn cmd_defaults(args: DefaultsArgs) -> anyhow::Result<()> {
    let defaults = EffectRegistry::global()
        .defaults(&args.effect_id)
        .with_context(|| format!("unknown effect '{}'", args.effect_id))?;
    println!("{}", serde_json::to_string_pretty(&defaults)?);
    Ok(())
}

fn read_chain(path: &Path) -> anyhow::Result<ChainConfig> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read chain preset '{}'", path.display()))?;
    ChainConfig::from_json(&s).with_context(|| format!("parse chain preset '{}'", path.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    if !(0.0..=1.0).contains(&args.progress) {
        anyhow::bail!("--progress must be within [0, 1], got {}", args.progress);
    }
    if !(args.fps > 0.0 && args.fps.is_finite()) {
        anyhow::bail!("--fps must be positive");
    }

    let config = match &args.chain {
        Some(path) => read_chain(path)?,
        None => ChainConfig {
            engine: EngineConfig::default().with_env_overrides(),
            effects: args.effects.iter().map(EffectInstanceConfig::new).collect(),
        },
    };
    if config.effects.is_empty() {
        anyhow::bail!("no effects: pass --chain or at least one --effect");
    }

    let font_bytes = match &args.font {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("read font '{}'", path.display()))?;
            Some(bytes)
        }
        None => None,
    };

    let mut canvas = match &font_bytes {
        Some(bytes) => {
            let metrics = ParleyMetrics::from_font_bytes(bytes).context("load font metrics")?;
            RecordingCanvas::with_metrics(args.width, args.height, Box::new(metrics))
        }
        None => RecordingCanvas::new(args.width, args.height),
    };

    let mut raster = CpuRasterizer::new().with_clear_color(
        lyricfx::Color::from_hex(&args.background).context("parse --background")?,
    );
    if let Some(bytes) = &font_bytes {
        raster = raster.with_font(bytes).context("load font")?;
    }

    let registry = EffectRegistry::global();
    let mut chain = EffectChain::from_config(&config, registry);
    if chain.instances().is_empty() {
        anyhow::bail!("none of the requested effects are registered");
    }

    let line = LyricLine::new("cli-line", args.text.as_str(), 0.0, args.duration.max(0.01));
    let audio = AudioData {
        bass: args.bass,
        ..AudioData::silent()
    };
    let settings = VisualSettings::default();
    let palette = ColorPalette::default();

    // Stateful effects need every frame up to the target time.
    let target = args.progress * line.duration();
    let dt = 1.0 / args.fps;
    let steps = (target / dt).floor() as u64;
    for step in 0..=steps {
        let time = if step == steps {
            target
        } else {
            step as f64 * dt
        };
        canvas.clear();
        chain.render_frame(
            &mut canvas,
            &FrameInput {
                time,
                delta_time: if step == 0 { 0.0 } else { dt },
                audio: &audio,
                settings: &settings,
                palette: &palette,
                line: Some(&line),
            },
        );
    }

    let frame = raster.render(canvas.list()).context("rasterize frame")?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
