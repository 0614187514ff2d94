//! Run a JSON-configured chain of processors over one image.
//!
//! Usage: `process_image <config.json>`. See `pixel_pipeline::config` for the
//! file format.
use log::info;
use pixel_pipeline::affine::auto_orient;
use pixel_pipeline::config::load_config;
use pixel_pipeline::diagnostics::timing::elapsed_ms;
use pixel_pipeline::diagnostics::{RunReport, TimingBreakdown};
use pixel_pipeline::image::io::{load_rgba8_image, save_rgba8_image, write_json_file};
use pixel_pipeline::image::ImageView;
use pixel_pipeline::Pipeline;
use std::env;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn usage() -> String {
    "Usage: process_image <config.json>".to_string()
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;
    let total_start = Instant::now();

    let mut image = load_rgba8_image(&config.input)?;
    let input_size = [image.width(), image.height()];
    info!(
        "loaded {} ({}x{})",
        config.input.display(),
        input_size[0],
        input_size[1]
    );

    let mut pipeline =
        Pipeline::with_parallel_options(config.parallelism).map_err(|e| e.to_string())?;
    let rows = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&rows);
    pipeline.on_progress(move |_| {
        counter.fetch_add(1, Ordering::Relaxed);
    });

    let mut timing = TimingBreakdown::default();
    if let Some(mut orientation) = config.orientation {
        let start = Instant::now();
        auto_orient(&pipeline, &mut image, &mut orientation).map_err(|e| e.to_string())?;
        timing.record("autoOrient", start, rows.swap(0, Ordering::Relaxed));
    }

    for step in &config.steps {
        let start = Instant::now();
        step.apply(&pipeline, &mut image, config.region)?;
        let processed = rows.swap(0, Ordering::Relaxed);
        info!(
            "{}: {} rows, now {}x{}",
            step.label(),
            processed,
            image.width(),
            image.height()
        );
        timing.record(step.label(), start, processed);
    }

    save_rgba8_image(&image, &config.output)?;
    timing.total_ms = elapsed_ms(total_start);
    info!(
        "wrote {} in {:.2} ms",
        config.output.display(),
        timing.total_ms
    );

    if let Some(report_path) = &config.report {
        let report = RunReport {
            input_size,
            output_size: [image.width(), image.height()],
            orientation: config.orientation,
            timing,
        };
        write_json_file(report_path, &report)?;
    }
    Ok(())
}
