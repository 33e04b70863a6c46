use std::{ops::RangeInclusive, path::PathBuf, rc::Rc};

use anyhow::Context as _;
use quadris_engine::PieceSeed;
use ratatui_runtime::{Runtime, ScreenStack};

use self::{context::PlayContext, screens::MenuScreen};

mod context;
mod screens;

const DEFAULT_FRAME_RATE: f64 = 60.0;
const FRAME_RATE_RANGE: RangeInclusive<f64> = 1.0..=1000.0;
const DEFAULT_RESULT_DIR: &str = "./data/results/";

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Piece order seed (32 hex digits); every game of the run uses it
    #[clap(long)]
    pub(crate) seed: Option<PieceSeed>,
    /// Logic and render rate in frames per second
    #[clap(long, default_value_t = DEFAULT_FRAME_RATE, value_parser = parse_frame_rate)]
    pub(crate) frame_rate: f64,
    /// Save a JSON result file for every finished game
    #[clap(long)]
    pub(crate) save_result: bool,
    /// Directory to save result files
    #[clap(long, default_value = DEFAULT_RESULT_DIR)]
    pub(crate) result_dir: PathBuf,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            seed: None,
            frame_rate: DEFAULT_FRAME_RATE,
            save_result: false,
            result_dir: PathBuf::from(DEFAULT_RESULT_DIR),
        }
    }
}

fn parse_frame_rate(s: &str) -> Result<f64, String> {
    let rate = s.parse::<f64>().map_err(|e| e.to_string())?;
    if !FRAME_RATE_RANGE.contains(&rate) {
        return Err(format!(
            "frame rate must be between {} and {}",
            FRAME_RATE_RANGE.start(),
            FRAME_RATE_RANGE.end()
        ));
    }
    Ok(rate)
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        seed,
        frame_rate,
        save_result,
        result_dir,
    } = arg;

    anyhow::ensure!(
        FRAME_RATE_RANGE.contains(frame_rate),
        "Frame rate must be between {} and {}, got {frame_rate}",
        FRAME_RATE_RANGE.start(),
        FRAME_RATE_RANGE.end()
    );

    let context = PlayContext::shared(*frame_rate, *seed);
    let mut screens = ScreenStack::new(Box::new(MenuScreen::new(Rc::clone(&context))));
    Runtime::new()
        .run(&mut screens)
        .context("Failed to run the terminal UI")?;
    drop(screens);

    let results = context.borrow_mut().take_results();
    if results.is_empty() {
        eprintln!("No games played");
    }
    for (i, result) in results.iter().enumerate() {
        let stats = &result.final_stats;
        eprintln!(
            "Game {}: score {}, lines {}, pieces {}, seed {}{}",
            i + 1,
            stats.score(),
            stats.total_cleared_lines(),
            stats.completed_pieces(),
            result.seed,
            if result.topped_out { "" } else { " (abandoned)" },
        );
    }

    if *save_result {
        for result in &results {
            let path = result.save(result_dir)?;
            eprintln!("Saved result to {}", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_rate_bounds() {
        for (input, expected) in [("60", 60.0), ("1", 1.0), ("1000", 1000.0)] {
            let rate = parse_frame_rate(input).unwrap();
            assert!((rate - expected).abs() < f64::EPSILON, "{input}");
        }
        for input in ["1e-300", "0", "-5", "1001", "inf", "NaN", "fast"] {
            assert!(parse_frame_rate(input).is_err(), "{input}");
        }
    }

    #[test]
    fn test_run_rejects_out_of_range_frame_rate() {
        let arg = PlayArg {
            frame_rate: 1e-300,
            ..PlayArg::default()
        };
        let err = run(&arg).unwrap_err();
        assert!(err.to_string().contains("Frame rate must be between"));
    }
}
