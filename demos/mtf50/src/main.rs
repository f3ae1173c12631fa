use std::path::PathBuf;

use argh::FromArgs;

use lensmtf::image::{Image, ImageSize};
use lensmtf::sfr::{
    measure_rois, EdgeOrientation, MeasurementTable, Roi, SfrConfig, SfrEstimator, Threshold,
};

#[derive(FromArgs, Debug)]
/// Measure the MTF50 of slanted edges in a frame.
struct Args {
    /// path to the frame to measure
    #[argh(option, short = 'i')]
    image: PathBuf,

    /// region around one edge as x1,y1,x2,y2; repeat for several edges
    #[argh(option, short = 'r')]
    roi: Vec<Roi>,

    /// number of sub-pixel bins per pixel
    #[argh(option, default = "4")]
    rate: usize,

    /// the edges already run top to bottom
    #[argh(switch)]
    vertical: bool,

    /// minimum MTF50 for a region to pass
    #[argh(option)]
    threshold: Option<f64>,

    /// name of the capture, e.g. a zoom position or chart face
    #[argh(option, short = 'l', default = "String::from(\"0°\")")]
    label: String,

    /// print the results as JSON
    #[argh(switch)]
    json: bool,

    /// number of threads to use
    #[argh(option, short = 'n', default = "4")]
    num_threads: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    rayon::ThreadPoolBuilder::new()
        .num_threads(args.num_threads)
        .build_global()?;

    if args.roi.is_empty() {
        println!("No regions given, pass at least one --roi x1,y1,x2,y2");
        return Ok(());
    }

    // read the frame as rgb8
    let rgb = image::open(&args.image)?.to_rgb8();
    let size = ImageSize {
        width: rgb.width() as usize,
        height: rgb.height() as usize,
    };
    let frame = Image::<u8, 3>::new(size, rgb.into_raw())?;
    log::info!("loaded {} ({})", args.image.display(), size);

    let orientation = if args.vertical {
        EdgeOrientation::Vertical
    } else {
        EdgeOrientation::Horizontal
    };
    let config = SfrConfig::default()
        .with_oversampling_rate(args.rate)
        .with_orientation(orientation);
    let estimator = SfrEstimator::new(config)?;

    let measurements = measure_rois(&estimator, &frame, &args.roi);

    let mut table = match args.threshold {
        Some(min_mtf50) => MeasurementTable::with_threshold(Threshold::new(min_mtf50)),
        None => MeasurementTable::default(),
    };
    table.record(&args.label, &measurements);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        for line in table.lines() {
            println!("{line}");
        }
    }

    Ok(())
}
