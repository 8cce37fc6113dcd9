use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "flex3d", version)]
struct Cli {
    /// Log reflow phases to stderr (overridden by `RUST_LOG`).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a scene document and print every box's rectangle and position.
    Layout(LayoutArgs),
    /// Resolve a scene document and print its content extent.
    Extent(ExtentArgs),
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Input scene document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct ExtentArgs {
    /// Input scene document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Viewport height in world units; adds the scroll page count to the output.
    #[arg(long)]
    viewport_height: Option<f32>,
}

#[derive(Serialize)]
struct ExtentOut {
    width: f32,
    height: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pages: Option<f32>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Layout(args) => cmd_layout(args),
        Command::Extent(args) => cmd_extent(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "flex3d=debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn mount(path: &Path) -> anyhow::Result<flex3d::MountedScene> {
    let doc = flex3d::SceneDocument::from_path(path)
        .with_context(|| format!("read scene document '{}'", path.display()))?;
    let mut mounted = doc.mount().with_context(|| "mount scene document")?;
    mounted.reflow().with_context(|| "reflow scene document")?;
    Ok(mounted)
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let mounted = mount(&args.in_path)?;
    let out = serde_json::to_string_pretty(&mounted.layouts())?;
    println!("{out}");
    Ok(())
}

fn cmd_extent(args: ExtentArgs) -> anyhow::Result<()> {
    let mounted = mount(&args.in_path)?;
    let extent = mounted
        .root
        .content_extent()
        .context("layout is stale after reflow")?;
    let pages = args
        .viewport_height
        .map(|vh| flex3d::ScrollConfig::default().pages(extent.height, vh))
        .transpose()?;

    let out = ExtentOut {
        width: extent.width,
        height: extent.height,
        pages,
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
