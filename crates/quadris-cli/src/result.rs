use std::{
    fs::{self, File},
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use quadris_engine::{GameSession, GameStats, Piece, PieceSeed};
use serde::{Deserialize, Serialize};

/// Outcome of one game, as written to a result file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub recorded_at: DateTime<Utc>,
    pub seed: PieceSeed,
    /// `false` if the player left before the board filled up.
    pub topped_out: bool,
    pub play_time: Duration,
    pub final_stats: GameStats,
    /// Falling piece when the game ended; the one that did not fit if it topped out.
    pub last_piece: Piece,
    pub next_piece: Piece,
}

impl SessionResult {
    pub fn from_session(session: &GameSession, play_time: Duration) -> Self {
        Self {
            recorded_at: Utc::now(),
            seed: session.seed(),
            topped_out: session.is_over(),
            play_time,
            final_stats: session.stats().clone(),
            last_piece: *session.current_piece(),
            next_piece: *session.next_piece(),
        }
    }

    /// Writes the result as pretty-printed JSON into `result_dir`.
    ///
    /// The directory is created if missing. The file is named after the
    /// recording time: `quadris_{YYYYMMDD_HHMMSS_mmm}.json`. An existing file
    /// is never overwritten.
    pub fn save(&self, result_dir: &Path) -> anyhow::Result<PathBuf> {
        fs::create_dir_all(result_dir)
            .with_context(|| format!("Failed to create directory {}", result_dir.display()))?;

        let filename = format!(
            "quadris_{}.json",
            self.recorded_at.format("%Y%m%d_%H%M%S_%3f")
        );
        let filepath = result_dir.join(filename);

        let file = File::create_new(&filepath)
            .with_context(|| format!("Failed to create file: {}", filepath.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .with_context(|| format!("Failed to write JSON to {}", filepath.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush output to {}", filepath.display()))?;

        Ok(filepath)
    }
}
