use blank_overlay::tools::{draw_debug_overlay, gray_stats, load_image, mask_stats, save_png};
use blank_overlay::{
    ContourMode, LocatorConfig, OverlayError, Placement, RegionShape, analyze, composite_overlay,
    locate_blank_region,
};
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "blanktool", version, about = "Blank-region overlay CLI tools")]
struct Cli {
    /// Seed for the square search
    #[arg(long, global = true, default_value_t = 0)]
    seed: u64,
    /// Use the bounding box instead of the inscribed square search
    #[arg(long, global = true)]
    bbox: bool,
    /// Skip morphological smoothing and keep outer contours only
    #[arg(long, global = true)]
    raw: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Locate a blank region and fit the foreground into it
    Fit,
    /// Grow the background to the foreground if needed and center
    Expand,
}

#[derive(Subcommand)]
enum Command {
    /// Print the best blank region of an image
    Locate {
        #[arg(long)]
        image: PathBuf,
    },
    /// Composite a foreground onto a background
    Composite {
        #[arg(long)]
        background: PathBuf,
        #[arg(long)]
        foreground: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, value_enum, default_value_t = Mode::Fit)]
        mode: Mode,
    },
    /// Print stats and write an image with contours and the chosen region drawn
    Debug {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
}

fn config_from(cli: &Cli) -> LocatorConfig {
    let mut config = if cli.raw {
        LocatorConfig {
            use_morphology: false,
            contour_mode: ContourMode::External,
            ..LocatorConfig::from_env()
        }
    } else {
        LocatorConfig::from_env()
    };
    if cli.bbox {
        config.region_shape = RegionShape::BoundingBox;
    }
    config
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    let config = config_from(&cli);
    let mut rng = StdRng::seed_from_u64(cli.seed);

    let result = match &cli.command {
        Command::Locate { image } => locate_cmd(image, &config, &mut rng),
        Command::Composite {
            background,
            foreground,
            out,
            mode,
        } => composite_cmd(background, foreground, out, *mode, &config, &mut rng),
        Command::Debug { image, out } => debug_cmd(image, out, &config, &mut rng),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_no_region() => {
            eprintln!("No blank region found");
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn locate_cmd(image: &Path, config: &LocatorConfig, rng: &mut StdRng) -> Result<(), OverlayError> {
    let img = load_image(image)?;
    println!("Image: {} ({}x{})", image.display(), img.width(), img.height());
    let rect = locate_blank_region(&img, config, rng)?.ok_or(OverlayError::NoRegionFound)?;
    println!(
        "Region: x={} y={} width={} height={}",
        rect.x, rect.y, rect.width, rect.height
    );
    let (cx, cy) = rect.center();
    println!("Center: ({}, {})", cx, cy);
    Ok(())
}

fn composite_cmd(
    background: &Path,
    foreground: &Path,
    out: &Path,
    mode: Mode,
    config: &LocatorConfig,
    rng: &mut StdRng,
) -> Result<(), OverlayError> {
    let bg = load_image(background)?;
    let fg = load_image(foreground)?;

    let placement = match mode {
        Mode::Fit => {
            let rect = locate_blank_region(&bg, config, rng)?.ok_or(OverlayError::NoRegionFound)?;
            println!(
                "Region: x={} y={} width={} height={}",
                rect.x, rect.y, rect.width, rect.height
            );
            Placement::FitIntoRegion(rect)
        }
        Mode::Expand => Placement::ExpandBackgroundToForeground,
    };

    let composed = composite_overlay(&bg, &fg, placement)?;
    save_png(&composed, out)?;
    println!(
        "Wrote {} ({}x{})",
        out.display(),
        composed.width(),
        composed.height()
    );
    Ok(())
}

fn debug_cmd(
    image: &Path,
    out: &Path,
    config: &LocatorConfig,
    rng: &mut StdRng,
) -> Result<(), OverlayError> {
    let img = load_image(image)?;
    println!("Image: {} ({}x{})", image.display(), img.width(), img.height());

    let analysis = analyze(&img, config, rng)?;
    let gs = gray_stats(&analysis.gray);
    println!("Grayscale range: {}-{}, average: {}", gs.min, gs.max, gs.avg);

    let ms = mask_stats(&analysis.mask);
    println!(
        "Mask: blank_pixels={} total={} blank_ratio={:.2}%",
        ms.blank_pixels,
        ms.total_pixels,
        ms.blank_ratio * 100.0
    );
    println!("Contours: {}", analysis.contours.len());
    match &analysis.best {
        Some(c) => println!(
            "Best: {:?} area={} aspect={:.3} purity={:.1}",
            c.rect, c.area, c.aspect_ratio, c.purity
        ),
        None => println!("Best: none"),
    }

    let mut canvas = img.to_rgba8();
    draw_debug_overlay(&mut canvas, &analysis);
    save_png(&canvas, out)?;
    println!("Wrote {}", out.display());
    Ok(())
}
