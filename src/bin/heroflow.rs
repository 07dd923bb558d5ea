use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "heroflow", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Dump the canvas calls of the first frames as JSON.
    Trace(TraceArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Viewport width in logical units.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in logical units.
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Lay out for a right-to-left page.
    #[arg(long)]
    rtl: bool,

    /// Simulate the reduced-motion accessibility preference.
    #[arg(long)]
    reduced_motion: bool,

    /// Flow-field config JSON (every key optional).
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed; overrides the config file.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct RasterArgs {
    /// Backdrop color behind the strokes (`#rrggbb` or `#rrggbbaa`).
    #[arg(long, default_value = "#12141c", value_parser = parse_hex_rgba)]
    backdrop: [u8; 4],

    /// Stroke blend mode.
    #[arg(long, value_enum, default_value_t = BlendChoice::Screen)]
    blend: BlendChoice,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    #[command(flatten)]
    raster: RasterArgs,

    /// Frame index (0 is the frame drawn at mount).
    #[arg(long, default_value_t = 0)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,

    #[command(flatten)]
    raster: RasterArgs,

    /// Number of frames to render.
    #[arg(long, default_value_t = 300)]
    frames: u64,

    /// Output frame rate.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct TraceArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Number of frames to record (mount frame included).
    #[arg(long, default_value_t = 1)]
    frames: u64,

    /// Output JSON path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BlendChoice {
    Normal,
    Screen,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Trace(args) => cmd_trace(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn load_config(scene: &SceneArgs) -> anyhow::Result<heroflow::FlowFieldConfig> {
    let mut cfg = match &scene.config {
        Some(path) => heroflow::FlowFieldConfig::load(path)?,
        None => heroflow::FlowFieldConfig::default(),
    };
    if scene.seed.is_some() {
        cfg.seed = scene.seed;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn viewport(scene: &SceneArgs) -> heroflow::Viewport {
    heroflow::Viewport::new(scene.width, scene.height).with_device_pixel_ratio(scene.dpr)
}

fn props(scene: &SceneArgs) -> heroflow::FlowFieldProps {
    heroflow::FlowFieldProps {
        style: None,
        is_right_to_left: scene.rtl,
    }
}

fn render_request(
    scene: &SceneArgs,
    raster: &RasterArgs,
) -> anyhow::Result<heroflow::RenderRequest> {
    let blend = match raster.blend {
        BlendChoice::Normal => heroflow::StrokeBlend::Normal,
        BlendChoice::Screen => heroflow::StrokeBlend::Screen,
    };
    Ok(heroflow::RenderRequest {
        viewport: viewport(scene),
        props: props(scene),
        config: load_config(scene)?,
        surface: heroflow::CpuSurfaceOpts::default()
            .with_backdrop(Some(raster.backdrop))
            .with_blend(blend),
        reduced_motion: scene.reduced_motion,
    })
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let req = render_request(&args.scene, &args.raster)?;
    let frame = heroflow::session::render_frame(&req, heroflow::FrameIndex(args.frame))?;

    ensure_parent(&args.out)?;
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

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let req = render_request(&args.scene, &args.raster)?;
    let fps = heroflow::Fps::new(args.fps, 1)?;

    ensure_parent(&args.out)?;
    let mut sink = heroflow::FfmpegSink::new(&args.out);

    let stats = heroflow::session::render_range(&req, args.frames, fps, &mut sink)?;
    tracing::info!(
        frames = stats.frames_total,
        animated = stats.frames_animated,
        "render finished"
    );

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_trace(args: TraceArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.scene)?;
    let host = heroflow::HeadlessHost::new(viewport(&args.scene), heroflow::RecordingSurface::new())
        .with_reduced_motion(args.scene.reduced_motion);
    let mut canvas = heroflow::FlowFieldCanvas::mount(host, props(&args.scene), cfg)?;
    canvas.pump_frames(args.frames.saturating_sub(1));

    let commands = canvas
        .surface()
        .map(|s| s.commands().to_vec())
        .unwrap_or_default();
    let trace = serde_json::json!({
        "status": format!("{:?}", canvas.status()),
        "layout": canvas.layout(),
        "curves": canvas.population().map(|p| p.curves().to_vec()),
        "commands": commands,
    });
    canvas.unmount();

    ensure_parent(&args.out)?;
    let f = std::fs::File::create(&args.out)
        .with_context(|| format!("create trace '{}'", args.out.display()))?;
    serde_json::to_writer_pretty(f, &trace).with_context(|| "write trace JSON")?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn parse_hex_rgba(s: &str) -> Result<[u8; 4], String> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    let byte = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .ok_or_else(|| format!("invalid hex color '{s}'"))
    };
    match hex.len() {
        6 => Ok([byte(0)?, byte(2)?, byte(4)?, 255]),
        8 => Ok([byte(0)?, byte(2)?, byte(4)?, byte(6)?]),
        _ => Err(format!("expected #rrggbb or #rrggbbaa, got '{s}'")),
    }
}
