use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use profile_preview::{
    ComposeOpts, LayoutSet, ResampleFilter, compose_previews_with, generate_mask, load_image,
    save_mask_png, save_png,
};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser, Debug)]
#[command(name = "profile-preview", version)]
struct Cli {
    /// Log compositing details (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one preview PNG per layout from a portrait and a banner.
    Compose(ComposeArgs),
    /// Write the circular mask for a diameter as a grayscale PNG.
    Mask(MaskArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Portrait image (PNG or JPEG).
    #[arg(long)]
    portrait: PathBuf,

    /// Banner image (PNG or JPEG).
    #[arg(long)]
    banner: PathBuf,

    /// Output directory; each preview is written as `<layout>.png`.
    #[arg(long)]
    out_dir: PathBuf,

    /// Layout JSON (`{"layouts": [...]}`). Defaults to desktop + mobile.
    #[arg(long)]
    layouts: Option<PathBuf>,

    /// Resampling filter.
    #[arg(long, value_enum, default_value_t = FilterChoice::Lanczos3)]
    filter: FilterChoice,
}

#[derive(Parser, Debug)]
struct MaskArgs {
    /// Mask diameter in pixels.
    #[arg(long)]
    size: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FilterChoice {
    Nearest,
    Triangle,
    CatmullRom,
    Lanczos3,
}

impl From<FilterChoice> for ResampleFilter {
    fn from(f: FilterChoice) -> Self {
        match f {
            FilterChoice::Nearest => Self::Nearest,
            FilterChoice::Triangle => Self::Triangle,
            FilterChoice::CatmullRom => Self::CatmullRom,
            FilterChoice::Lanczos3 => Self::Lanczos3,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("profile_preview={log_level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Mask(args) => cmd_mask(args),
    }
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let layouts = match &args.layouts {
        Some(path) => LayoutSet::from_path(path)?,
        None => LayoutSet::standard(),
    };
    let portrait = load_image(&args.portrait)
        .with_context(|| format!("load portrait '{}'", args.portrait.display()))?;
    let banner = load_image(&args.banner)
        .with_context(|| format!("load banner '{}'", args.banner.display()))?;

    let opts = ComposeOpts {
        filter: args.filter.into(),
    };
    let previews = compose_previews_with(&portrait, &banner, &layouts.layouts, &opts)?;

    for preview in &previews {
        let out = args.out_dir.join(format!("{}.png", preview.layout));
        save_png(&preview.image, &out)?;
        eprintln!(
            "wrote {} ({}x{}, portrait {})",
            out.display(),
            preview.image.width,
            preview.image.height,
            preview.placement
        );
    }
    Ok(())
}

fn cmd_mask(args: MaskArgs) -> anyhow::Result<()> {
    let mask = generate_mask(args.size)?;
    save_mask_png(&mask, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
