use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use playlist_video::{
    AssemblyConfig, Background, CanvasConfig, DEFAULT_TAGGING_URL, FontSet, PipelineOptions,
    PipelineOutcome, PipelinePaths, ResolverConfig, Rgb8, TagzenResolver, TextLayoutEngine, Track,
    TrackId,
};

#[derive(Parser, Debug)]
#[command(name = "playlist-video", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the playlist video (requires `ffmpeg` and `ffprobe` on PATH).
    Render(RenderArgs),
    /// Render a single preview frame as a PNG, labelling tracks by file name.
    Frame(FrameArgs),
}

#[derive(Args, Debug)]
struct CanvasArgs {
    /// Playlist title. When omitted you are asked for title and background interactively.
    #[arg(long)]
    title: Option<String>,

    /// Background image; must already be the canvas size (2560x1440 by default).
    #[arg(long, conflicts_with = "background_color", requires = "title")]
    background_image: Option<PathBuf>,

    /// Background color as RRGGBB hex.
    #[arg(long, requires = "title")]
    background_color: Option<String>,

    /// JSON canvas config (size, colors, offsets, fonts). Unset fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory of audio files; playlist order is file-name order.
    #[arg(long, default_value = "./music")]
    music_dir: PathBuf,

    /// Print the family and size of every loaded font before rendering.
    #[arg(long)]
    dump_fonts: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    canvas: CanvasArgs,

    /// Directory for per-track frames; removed after a successful run.
    #[arg(long, default_value = "./tmp")]
    scratch_dir: PathBuf,

    /// Output MP4 path. Replaced if it already exists.
    #[arg(long, default_value = "./playlist.mp4")]
    out: PathBuf,

    /// Base URL of the tagging service.
    #[arg(long, default_value = DEFAULT_TAGGING_URL)]
    api_url: String,

    /// Output video frame rate.
    #[arg(long, default_value_t = 0.5)]
    fps: f64,

    /// Output audio bitrate in bits per second.
    #[arg(long, default_value_t = 256_000)]
    audio_bitrate: u32,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    canvas: CanvasArgs,

    /// Zero-based index of the track to mark as playing.
    #[arg(long, default_value_t = 0)]
    active: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

/// Canvas config plus title, from flags or, without `--title`, from the interactive prompts.
fn resolve_canvas(args: &CanvasArgs) -> anyhow::Result<(CanvasConfig, String)> {
    let mut canvas = match &args.config {
        Some(path) => CanvasConfig::from_path(path)?,
        None => CanvasConfig::default(),
    };

    let title = match &args.title {
        Some(title) => {
            if let Some(image) = &args.background_image {
                canvas.background = Background::Image(image.clone());
            } else if let Some(hex) = &args.background_color {
                canvas.background = Background::Color(Rgb8::from_hex(hex)?);
            }
            title.clone()
        }
        None => {
            let default_color = match canvas.background {
                Background::Color(c) => c,
                Background::Image(_) => Rgb8::NAVY,
            };
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut output = std::io::stdout();
            let answers =
                playlist_video::prompt_run_inputs(&mut input, &mut output, default_color)?;
            canvas.background = answers.background;
            answers.title
        }
    };

    if args.dump_fonts {
        dump_font_diagnostics(&canvas)?;
    }

    Ok((canvas, title))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (canvas, title) = resolve_canvas(&args.canvas)?;

    let opts = PipelineOptions {
        title,
        canvas,
        paths: PipelinePaths {
            music_dir: args.canvas.music_dir.clone(),
            scratch_dir: args.scratch_dir,
            output: args.out,
        },
        assembly: AssemblyConfig {
            frame_rate: args.fps,
            audio_bitrate: args.audio_bitrate,
            ..AssemblyConfig::default()
        },
    };

    let resolver = TagzenResolver::new(&ResolverConfig::default().with_base_url(args.api_url))?;

    match playlist_video::run_pipeline(&opts, &resolver)? {
        PipelineOutcome::Written { path, segments } => {
            let shown = std::fs::canonicalize(&path).unwrap_or(path);
            eprintln!("wrote {segments} segments");
            println!("Finished! Find your playlist at:\n\n{}", shown.display());
        }
        PipelineOutcome::Empty => {
            println!(
                "No songs found in '{}'; no playlist was written.",
                opts.paths.music_dir.display()
            );
        }
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (canvas, title) = resolve_canvas(&args.canvas)?;

    let files = playlist_video::collect_audio_files(&args.canvas.music_dir)?;
    anyhow::ensure!(
        args.active < files.len(),
        "--active {} is out of range for {} tracks in '{}'",
        args.active,
        files.len(),
        args.canvas.music_dir.display()
    );

    let tracks: Vec<Track> = files
        .iter()
        .enumerate()
        .map(|(i, path)| Track::with_label(TrackId(i), path, file_label(path)))
        .collect();

    let mut renderer = playlist_video::FrameRenderer::new(canvas, title)?;
    let frame = renderer.compose(&tracks, TrackId(args.active))?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    frame.save_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn file_label(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn dump_font_diagnostics(canvas: &CanvasConfig) -> anyhow::Result<()> {
    let mut engine = TextLayoutEngine::new();
    let set = FontSet::load(&mut engine, &canvas.fonts)?;

    eprintln!("font diagnostics:");
    for (role, face, font) in [
        ("title", &canvas.fonts.title, &set.title),
        ("body", &canvas.fonts.body, &set.body),
        ("marker", &canvas.fonts.marker, &set.marker),
    ] {
        eprintln!("  {role}:");
        eprintln!("    source:  {}", face.path.display());
        eprintln!("    family:  {}", font.family);
        eprintln!("    size_px: {}", font.size_px);
    }
    Ok(())
}
