use argh::FromArgs;
use std::path::PathBuf;

use birdseye::bev::{BevConfig, BevProcessor, Interpolation, Orientation};
use birdseye::io::functional as F;

#[derive(FromArgs)]
/// Reproject the ground plane of a camera frame into a bird's-eye view
struct Args {
    /// path to the input image
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// path to the output png image
    #[argh(option, short = 'o')]
    output: PathBuf,

    /// device pitch in degrees, -90 is upright
    #[argh(option, default = "-90.0")]
    pitch: f64,

    /// device roll in degrees
    #[argh(option, default = "0.0")]
    roll: f64,

    /// camera height above the ground in meters
    #[argh(option)]
    height: Option<f64>,

    /// farthest ground distance to show in meters
    #[argh(option)]
    look_ahead: Option<f64>,

    /// path to a json configuration file
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// use nearest neighbor instead of bilinear sampling
    #[argh(switch)]
    nearest: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let mut config = match &args.config {
        Some(path) => BevConfig::from_json_file(path)?,
        None => BevConfig::default(),
    };
    if let Some(height) = args.height {
        config.settings.set_camera_height(height);
    }
    if let Some(look_ahead) = args.look_ahead {
        config.settings.set_look_ahead(look_ahead);
    }
    if args.nearest {
        config.interpolation = Interpolation::Nearest;
    }

    let processor = BevProcessor::from_config(&config)?;
    let orientation = Orientation::new(0.0, args.pitch, args.roll);

    let frame = F::read_image_any_rgb8(&args.input)?;
    let bev = processor.process(&frame, &orientation, &config.settings)?;

    if bev.transform.is_clamped() {
        log::warn!("look-ahead row clamped: {:?}", bev.transform.clamp);
    }
    log::info!("top row: {:.2} px", bev.transform.top_row);
    log::info!("matrix: {:?}", bev.transform.matrix);
    log::info!("{}", bev.footprint);

    F::write_image_png_rgb8(&args.output, &bev.image)?;
    println!("{} -> {}", args.input.display(), args.output.display());

    Ok(())
}
