use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tile_extruder::{ExtrudeJob, Rgba8, TileGrid};

#[derive(Parser, Debug)]
#[command(
    name = "tile-extruder",
    version,
    about = "Extrude the tiles of a tileset image to prevent texture bleeding."
)]
struct Cli {
    /// Log progress to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extrude a tileset and write the result.
    Extrude(ExtrudeArgs),
    /// Print the tile grid and the extruded size without writing anything.
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct GridArgs {
    /// Tile width in pixels.
    #[arg(short = 'w', long)]
    tile_width: Option<u32>,

    /// Tile height in pixels.
    #[arg(short = 'H', long)]
    tile_height: Option<u32>,

    /// Path to the tileset you want to extrude.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Pixels between the tiles and the edge of the tileset image [default: 0].
    #[arg(short, long)]
    margin: Option<u32>,

    /// Pixels between neighboring tiles [default: 0].
    #[arg(short, long)]
    spacing: Option<u32>,

    /// Pixels to extrude each tile edge by [default: 1].
    #[arg(short, long)]
    extrusion: Option<u32>,

    /// JSON job file; flags given on the command line override its values.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ExtrudeArgs {
    #[command(flatten)]
    grid: GridArgs,

    /// Output path [default: input path with "_extruded" added to the file name].
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Background for margin and spacing, as 0xRRGGBBAA or #RRGGBB[AA] [default: 0xffffff00].
    #[arg(short, long)]
    color: Option<Rgba8>,

    /// Fill tile rows in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    #[command(flatten)]
    grid: GridArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Extrude(args) => cmd_extrude(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_job(grid: &GridArgs) -> anyhow::Result<ExtrudeJob> {
    let base = match &grid.config {
        Some(path) => ExtrudeJob::from_path(path)?,
        None => ExtrudeJob::default(),
    };
    let overrides = ExtrudeJob {
        input: grid.input.clone(),
        tile_width: grid.tile_width,
        tile_height: grid.tile_height,
        margin: grid.margin,
        spacing: grid.spacing,
        extrusion: grid.extrusion,
        ..ExtrudeJob::default()
    };
    Ok(base.merged_with(overrides))
}

fn cmd_extrude(args: ExtrudeArgs) -> anyhow::Result<()> {
    let job = load_job(&args.grid)?.merged_with(ExtrudeJob {
        output: args.output,
        color: args.color,
        parallel: args.parallel.then_some(true),
        threads: args.threads,
        ..ExtrudeJob::default()
    });
    let job = job.resolve()?;

    tile_extruder::extrude_tileset_to_image(
        &job.input,
        &job.output,
        &job.grid,
        &job.extrusion,
        &job.threading,
    )
    .with_context(|| format!("extrude tileset '{}'", job.input.display()))?;

    eprintln!("wrote {}", job.output.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let job = load_job(&args.grid)?;
    let grid = job.grid()?;
    let input = job
        .input
        .as_deref()
        .context("missing path to tileset image; pass --input or set it in the job file")?;
    let extrusion = job.extrusion.unwrap_or(1);

    let (width, height) = read_dimensions(input)?;
    let layout = TileGrid::solve(width, height, &grid)?;
    let (out_width, out_height) = layout.output_size(extrusion)?;

    println!("input:     {width}x{height}");
    println!(
        "tiles:     {} cols x {} rows ({} tiles of {}x{})",
        layout.cols(),
        layout.rows(),
        layout.tile_count(),
        grid.tile_width,
        grid.tile_height
    );
    println!("margin:    {}", grid.margin);
    println!("spacing:   {}", grid.spacing);
    println!("output:    {out_width}x{out_height} (extrusion {extrusion})");
    Ok(())
}

fn read_dimensions(path: &Path) -> anyhow::Result<(u32, u32)> {
    image::image_dimensions(path)
        .with_context(|| format!("read image dimensions of '{}'", path.display()))
}
