use argh::FromArgs;
use std::path::PathBuf;

use lidarcam::io::{self, CalibrationSource};

#[derive(FromArgs)]
/// Keep the lidar points of a frame that fall inside the left color image
struct Args {
    /// path to the calibration file, either KITTI text or JSON
    #[argh(option)]
    calib_path: PathBuf,

    /// path to the left color image
    #[argh(option)]
    image_path: PathBuf,

    /// path to the raw lidar scan
    #[argh(option)]
    lidar_path: PathBuf,

    /// path to write the cropped scan to
    #[argh(option)]
    output_path: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    // JSON holds the matrices directly, anything else is parsed as KITTI text
    let source = match args.calib_path.extension() {
        Some(ext) if ext == "json" => {
            CalibrationSource::FromMatrices(io::read_calibration_json(&args.calib_path)?)
        }
        _ => CalibrationSource::FromFile(args.calib_path),
    };

    let calib = io::load_calibration(source, &args.image_path)?;
    log::info!("Loaded calibration for {}", calib.image_size());

    let scan = io::read_lidar_bin(&args.lidar_path)?;
    log::info!("Read #{} points", scan.len());

    let cropped = calib.cutout_scene(&scan);
    println!(
        "Kept #{} of #{} points inside the image",
        cropped.len(),
        scan.len()
    );

    if let Some((min, max)) = cropped.bounds() {
        log::info!("Cropped scan bounds: min {min}, max {max}");
    }

    if let Some(output_path) = args.output_path {
        io::write_lidar_bin(&output_path, &cropped)?;
        log::info!("Wrote cropped scan to {}", output_path.display());
    }

    Ok(())
}
