//! Play data acquisition.
//!
//! The engine itself only consumes `Vec<PlayRecord>`. This module covers
//! where those records come from: a [`PlaySource`] that fetches a season and
//! a [`PlayCache`] that serves last-known-good copies when the source fails.

mod cache;

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::PlayRecord;
use crate::error::{EdgeError, Result};

pub use cache::{CacheLookup, FilePlayCache, PlayCache};

/// Anything that can produce one season of play records
pub trait PlaySource: Send + Sync {
    fn name(&self) -> &str;

    fn fetch(&self, season: i32) -> Result<Vec<PlayRecord>>;
}

/// Reads `plays_<season>.json` exports from a directory
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    dir: PathBuf,
}

impl JsonFileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, season: i32) -> PathBuf {
        self.dir.join(format!("plays_{season}.json"))
    }
}

impl PlaySource for JsonFileSource {
    fn name(&self) -> &str {
        "json-file"
    }

    fn fetch(&self, season: i32) -> Result<Vec<PlayRecord>> {
        let path = self.path_for(season);
        let plays = read_plays(&path)?;
        debug!("Loaded {} plays from {}", plays.len(), path.display());
        Ok(plays)
    }
}

/// Parse a JSON array of play records
pub fn read_plays(path: &Path) -> Result<Vec<PlayRecord>> {
    let raw = fs::read_to_string(path).map_err(|e| EdgeError::PlayDataUnavailable {
        key: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(serde_json::from_str(&raw)?)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Team;

    #[test]
    fn test_json_source_reads_season_file() {
        let dir = testing::scratch_dir("json-source");
        let json = r#"[{
            "game_id": "2025_01_BAL_KC",
            "posteam": "KC",
            "defteam": "BAL",
            "epa": 0.42,
            "yardline_100": 35,
            "qtr": 1,
            "pass": 1
        }]"#;
        fs::write(dir.join("plays_2025.json"), json).unwrap();

        let plays = JsonFileSource::new(&dir).fetch(2025).unwrap();
        assert_eq!(plays.len(), 1);
        assert_eq!(plays[0].offense, Team::KansasCity);
        assert!(plays[0].flags.pass);
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = testing::scratch_dir("json-missing");
        let err = JsonFileSource::new(&dir).fetch(1999).unwrap_err();
        assert!(matches!(err, EdgeError::PlayDataUnavailable { .. }));
    }
}
