use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use depth_colorize::{CalibrationFormula, ColorMode, DepthFrame};
use kinect_viewer::assets::AssetLoader;
use kinect_viewer::config::ViewerConfig;
use kinect_viewer::frame_io;
use kinect_viewer::output;
use kinect_viewer::render::{self, RenderOptions};
use kinect_viewer::snapshot;

#[derive(Parser)]
#[command(name = "kinect-viewer")]
#[command(about = "Calibrated point clouds and false-color images from raw Kinect depth frames")]
struct Cli {
    /// Config file (defaults to CONFIG_FILE, then the embedded config)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a raw depth frame to PNG images and an optional point cloud
    Render {
        /// Raw depth frame (little-endian u16 samples)
        #[arg(short, long)]
        input: PathBuf,

        /// Raw user label frame of the same size
        #[arg(short, long)]
        labels: Option<PathBuf>,

        /// Directory for the generated files
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Color mode (overrides the config)
        #[arg(short, long)]
        mode: Option<String>,

        /// Write one color image per mode
        #[arg(long)]
        all_modes: bool,

        /// Write cloud.pcd
        #[arg(long)]
        cloud: bool,

        /// Print frame statistics as JSON
        #[arg(long)]
        stats: bool,
    },
    /// Print the mean distance around a pixel
    Measure {
        /// Raw depth frame
        #[arg(short, long)]
        input: PathBuf,

        /// Pixel column (defaults to the frame center)
        #[arg(short)]
        x: Option<usize>,

        /// Pixel row (defaults to the frame center)
        #[arg(short)]
        y: Option<usize>,
    },
    /// Write the rainbow and terrain palettes as a PNG strip
    Palette {
        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Extract the embedded config.yaml for customization
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
    /// Save a timestamped color image and point cloud
    Snapshot {
        /// Raw depth frame
        #[arg(short, long)]
        input: PathBuf,

        /// Directory for the snapshot files
        #[arg(short, long)]
        output_dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    let loader = AssetLoader::from_env(cli.config);

    match cli.command {
        Some(Commands::Render {
            input,
            labels,
            output_dir,
            mode,
            all_modes,
            cloud,
            stats,
        }) => run_render_command(
            &loader,
            &input,
            labels.as_deref(),
            &output_dir,
            mode.as_deref(),
            all_modes,
            cloud,
            stats,
        ),
        Some(Commands::Measure { input, x, y }) => run_measure_command(&loader, &input, x, y),
        Some(Commands::Palette { output }) => run_palette_command(&loader, &output),
        Some(Commands::Init { force }) => run_init_command(&loader, force),
        Some(Commands::Snapshot { input, output_dir }) => {
            run_snapshot_command(&loader, &input, &output_dir)
        }
        None => run_status_command(&loader),
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kinect_viewer=info,depth_colorize=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn load_frame(config: &ViewerConfig, input: &Path) -> anyhow::Result<DepthFrame> {
    Ok(frame_io::read_depth_frame(
        input,
        config.frame.width,
        config.frame.height,
        config.out_of_range()?,
    )?)
}

/// Render a raw frame to images (and optionally a cloud)
#[allow(clippy::too_many_arguments)]
fn run_render_command(
    loader: &AssetLoader,
    input: &Path,
    labels: Option<&Path>,
    output_dir: &Path,
    mode: Option<&str>,
    all_modes: bool,
    cloud: bool,
    stats: bool,
) -> anyhow::Result<()> {
    let config = ViewerConfig::load(loader)?;
    let pipeline = config.pipeline()?;
    let mode = mode.map(str::parse::<ColorMode>).transpose()?;

    let frame = load_frame(&config, input)?;
    let labels = labels
        .map(|path| frame_io::read_label_frame(path, config.frame.width, config.frame.height))
        .transpose()?;

    let options = RenderOptions {
        mode,
        all_modes,
        cloud,
        measure_window: config.measure_window,
    };
    let report =
        render::render_frame(&pipeline, &frame, labels.as_ref(), output_dir, &options)?;

    for file in &report.files {
        println!("  + {}", file.display());
    }
    if let Some(points) = report.points {
        println!("Point cloud: {points} points");
    }
    if stats {
        println!("{}", serde_json::to_string_pretty(&report.stats)?);
    }

    Ok(())
}

fn run_measure_command(
    loader: &AssetLoader,
    input: &Path,
    x: Option<usize>,
    y: Option<usize>,
) -> anyhow::Result<()> {
    let config = ViewerConfig::load(loader)?;
    let pipeline = config.pipeline()?;
    let frame = load_frame(&config, input)?;

    let x = x.unwrap_or(frame.width() / 2);
    let y = y.unwrap_or(frame.height() / 2);

    match pipeline.mean_distance(&frame, x, y, config.measure_window)? {
        Some(meters) => println!("({x}, {y}): {meters:.3} m"),
        None => println!("({x}, {y}): no depth"),
    }

    Ok(())
}

fn run_palette_command(loader: &AssetLoader, output: &Path) -> anyhow::Result<()> {
    let config = ViewerConfig::load(loader)?;
    let pipeline = config.pipeline()?;

    let png = output::palette_png(pipeline.rainbow(), pipeline.ramp())?;
    std::fs::write(output, &png)?;
    println!("Wrote {} ({} bytes)", output.display(), png.len());

    Ok(())
}

/// Extract embedded config to filesystem
fn run_init_command(loader: &AssetLoader, force: bool) -> anyhow::Result<()> {
    let report = loader.init(force)?;

    for f in &report.written {
        println!("  + {f}");
    }
    for f in &report.skipped {
        println!("  - {f} exists (use --force to overwrite)");
    }

    Ok(())
}

fn run_snapshot_command(
    loader: &AssetLoader,
    input: &Path,
    output_dir: &Path,
) -> anyhow::Result<()> {
    let config = ViewerConfig::load(loader)?;
    let pipeline = config.pipeline()?;
    let frame = load_frame(&config, input)?;

    let shot = snapshot::take_snapshot(
        &pipeline,
        &frame,
        output_dir,
        chrono::Local::now().naive_local(),
    )?;
    println!("  + {}", shot.image.display());
    println!("  + {} ({} points)", shot.cloud.display(), shot.points);

    Ok(())
}

/// Display configuration and available modes
fn run_status_command(loader: &AssetLoader) -> anyhow::Result<()> {
    println!("kinect-viewer {}", env!("CARGO_PKG_VERSION"));
    println!();

    match loader.config_file() {
        Some(path) => println!("Config: {}", path.display()),
        None => println!("Config: (embedded)"),
    }
    let config = ViewerConfig::load(loader)?;
    println!("  frame:         {}x{}", config.frame.width, config.frame.height);
    println!("  max depth:     {}", config.sensor.max_depth);
    println!("  calibration:   {}", config.calibration);
    println!("  color mode:    {}", config.color_mode);
    println!("  channel order: {}", config.channel_order);
    println!();

    println!("Calibration formulas:");
    for formula in CalibrationFormula::ALL {
        let note = if formula.is_metric() { "" } else { " (color banding only)" };
        println!("  {formula}{note}");
    }
    println!("\nColor modes:");
    for mode in ColorMode::ALL {
        println!("  {mode}");
    }
    println!("\nRun 'kinect-viewer --help' for commands.");

    Ok(())
}
