use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use discmap::config::Config;
use discmap::disk::DiskCatalog;
use discmap::mapfile::Mapfile;
use discmap::render::{DiskScene, Sampling};

#[derive(Parser, Debug)]
#[command(name = "discmap")]
#[command(author, version, about = "Draw the damaged areas of a ddrescue mapfile onto the disc")]
struct Args {
    /// ddrescue mapfile to read
    #[arg(required_unless_present_any = ["list_profiles", "report_only"])]
    mapfile: Option<PathBuf>,

    /// SVG file to write
    #[arg(short, long, default_value = "discmap.svg")]
    output: PathBuf,

    /// Disc profile, e.g. dvd5 or cd
    #[arg(short, long)]
    disk: Option<String>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Spacing of path points along the track, in millimetres
    #[arg(long)]
    tolerance: Option<f64>,

    /// Fixed number of path steps per damaged area
    #[arg(long, conflicts_with = "tolerance")]
    segments: Option<usize>,

    /// Only print the disc capacity and track length
    #[arg(long)]
    report_only: bool,

    /// List the known disc profiles and exit
    #[arg(long)]
    list_profiles: bool,
}

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for discmap. Override with RUST_LOG.
    let env_filter = EnvFilter::from_default_env()
        .add_directive(LevelFilter::WARN.into())
        .add_directive("discmap=info".parse()?);
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let catalog = config.catalog();

    if args.list_profiles {
        for profile in catalog.iter() {
            println!("{:<12} {}", profile.name, profile.description);
        }
        return Ok(());
    }

    let name = args
        .disk
        .as_deref()
        .or(config.disk.as_deref())
        .unwrap_or(DiskCatalog::DEFAULT_PROFILE);
    let disk = catalog.get(name)?.geometry()?;

    let capacity = disk.capacity();
    let track_length = disk.track_length();
    info!("{name}: capacity {capacity:.0} bytes, track length {track_length:.0} mm");
    println!("Disk capacity = {capacity:.0} bytes");
    println!("Track length = {:.3} m", track_length / 1000.0);

    if args.report_only {
        return Ok(());
    }
    let Some(mapfile_path) = &args.mapfile else {
        return Ok(());
    };

    let mapfile = Mapfile::load(mapfile_path)?;

    let mut options = config.render.scene_options();
    if let Some(n) = args.segments {
        options.sampling = Sampling::Count(n);
    } else if let Some(epsilon) = args.tolerance {
        options.sampling = Sampling::Tolerance(epsilon);
    }

    let document = DiskScene::new(&disk, &options)
        .render(&mapfile)
        .with_context(|| format!("failed to render {}", mapfile_path.display()))?;

    info!("Saving {}", args.output.display());
    svg::save(&args.output, &document)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    Ok(())
}
