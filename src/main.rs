//! Stamp Field entry point
//!
//! Runs the field headless for the configured number of frames and prints a
//! preview of the last one. Usage: `stamp-field [settings.json]`

use std::process::ExitCode;

use stamp_field::{FieldError, Grid, Settings, preview};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), FieldError> {
    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path)?,
        None => {
            log::info!("Using default settings");
            Settings::default()
        }
    };
    let params = settings.frame_params()?;
    let mut engine = settings.build_engine()?;

    log::info!(
        "Stamp Field starting: {}x{}, {} frames, {} source",
        engine.width(),
        engine.height(),
        settings.frames,
        settings.source.as_str()
    );

    let mut last: Option<Grid> = None;
    for frame in 1..=settings.frames {
        last = Some(engine.step(&params));

        if let Some(every) = settings.renormalize_every.filter(|&n| n > 0) {
            if frame % every == 0 {
                engine.renormalize();
            }
        }
    }

    let Some(output) = last else {
        log::warn!("No frames simulated");
        return Ok(());
    };

    let finite: Vec<f64> = output
        .as_slice()
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .collect();
    let mean = if finite.is_empty() {
        0.0
    } else {
        finite.iter().sum::<f64>() / finite.len() as f64
    };
    log::info!(
        "Finished {} frames: field peak {:.4}, output mean {:.4} ({} of {} cells finite)",
        engine.frames(),
        engine.state().max_value()?,
        mean,
        finite.len(),
        output.len()
    );

    if settings.preview {
        print!("{}", preview::shade(&output, settings.preview_stride));
    }
    Ok(())
}
