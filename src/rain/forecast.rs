//! Parser for the buienradar rain text: one `VVV|HH:MM` line per 5 minutes, where
//! VVV is the intensity code 000 to 255.

use crate::types::forecast::{ForecastMode, ForecastResult, ForecastSample};
use crate::utils::round_to;
use log::{debug, info};

/// Minutes covered by one line of the rain text.
pub const SAMPLE_MINUTES: u32 = 5;

/// Number of lines that cover `timeframe_minutes`, the first line being "now".
pub fn sample_count(timeframe_minutes: u32) -> usize {
    (timeframe_minutes / SAMPLE_MINUTES) as usize + 1
}

fn parse_line(line: &str) -> Option<ForecastSample> {
    let (value, label) = line.split_once('|')?;
    let code = value.trim().parse::<u8>().ok()?;
    Some(ForecastSample {
        intensity_code: code,
        label: label.trim().to_string(),
    })
}

/// Parses the lines covering `timeframe_minutes`.
///
/// Lines without a `|`, or whose code isn't a number in 0..=255, are skipped and
/// leave a gap rather than failing the whole forecast.
pub fn parse_samples(text: &str, timeframe_minutes: u32) -> Vec<ForecastSample> {
    let lines: Vec<&str> = text.lines().collect();
    let rows = lines.len().min(sample_count(timeframe_minutes));
    debug!("Timeframe: {}, rows: {}", timeframe_minutes, rows);

    lines[..rows]
        .iter()
        .filter_map(|line| {
            let sample = parse_line(line);
            match &sample {
                Some(s) => debug!("{:03}|{}", s.intensity_code, s.label),
                None => debug!("Skipping malformed rain line '{}'", line),
            }
            sample
        })
        .collect()
}

/// Summarizes samples into intensity and expected total.
///
/// The expected total is `average mm/h × samples / 6`. That is kept as-is from the
/// plugin's history; it is an approximation, not a dimensional derivation.
pub fn summarize(
    samples: &[ForecastSample],
    timeframe_minutes: u32,
    mode: ForecastMode,
) -> ForecastResult {
    if samples.is_empty() {
        return ForecastResult::empty(mode, timeframe_minutes);
    }

    let n = samples.len() as f64;
    let (total_mm, max_mm, total_code) = samples.iter().fold(
        (0.0_f64, 0.0_f64, 0_u32),
        |(total, max, codes), s| {
            let mm = s.millimeters_per_hour();
            (total + mm, max.max(mm), codes + u32::from(s.intensity_code))
        },
    );
    let average_mm = total_mm / n;

    let intensity_mm = match mode {
        ForecastMode::Average => average_mm,
        ForecastMode::Maximum => max_mm,
    };

    ForecastResult {
        mode,
        intensity_mm: round_to(intensity_mm, 2),
        // The mean of u8 codes never exceeds 255.
        average_code: (f64::from(total_code) / n).ceil() as u8,
        expected_total_mm: round_to(average_mm * n / 6.0, 1),
        timeframe_minutes,
        samples: samples.len(),
    }
}

/// Parses the rain text and summarizes the first `timeframe_minutes`.
pub fn parse_rain_forecast(text: &str, timeframe_minutes: u32, mode: ForecastMode) -> ForecastResult {
    let samples = parse_samples(text, timeframe_minutes);
    let result = summarize(&samples, timeframe_minutes, mode);
    info!(
        "Rain forecast: {} [0-255] | {} mm/hour ({}) | {} mm in {} minutes",
        result.average_code, result.intensity_mm, mode, result.expected_total_mm, timeframe_minutes
    );
    result
}
