use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::PlaySource;
use crate::domain::PlayRecord;
use crate::error::{EdgeError, Result};

/// Outcome of a cache read
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    /// Fetched or cached within the max age
    Fresh(Vec<PlayRecord>),
    /// Source failed; last-known-good copy of the given age
    Stale { plays: Vec<PlayRecord>, age: Duration },
}

impl CacheLookup {
    pub fn plays(&self) -> &[PlayRecord] {
        match self {
            CacheLookup::Fresh(plays) => plays,
            CacheLookup::Stale { plays, .. } => plays,
        }
    }

    pub fn into_plays(self) -> Vec<PlayRecord> {
        match self {
            CacheLookup::Fresh(plays) => plays,
            CacheLookup::Stale { plays, .. } => plays,
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, CacheLookup::Stale { .. })
    }
}

pub trait PlayCache {
    /// Plays for a season: fresh, stale with age, or an error when neither
    /// the source nor a cached copy is available
    fn get(&self, season: i32) -> Result<CacheLookup>;
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    season: i32,
    fetched_at: DateTime<Utc>,
    plays: Vec<PlayRecord>,
}

/// JSON-per-season cache in front of a [`PlaySource`]
pub struct FilePlayCache<S> {
    dir: PathBuf,
    max_age: Duration,
    source: S,
}

impl<S: PlaySource> FilePlayCache<S> {
    pub fn new(dir: impl Into<PathBuf>, max_age: Duration, source: S) -> Self {
        Self {
            dir: dir.into(),
            max_age,
            source,
        }
    }

    pub fn path_for(&self, season: i32) -> PathBuf {
        self.dir.join(format!("season_{season}.json"))
    }

    fn read_entry(&self, season: i32) -> Option<CacheEntry> {
        let path = self.path_for(season);
        let raw = fs::read_to_string(&path).ok()?;
        match serde_json::from_str::<CacheEntry>(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Ignoring unreadable cache file {}: {}", path.display(), e);
                None
            }
        }
    }

    fn write_entry(&self, entry: &CacheEntry) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(entry.season);
        fs::write(&path, serde_json::to_vec(entry)?)?;
        debug!("Cached {} plays at {}", entry.plays.len(), path.display());
        Ok(())
    }

    fn lookup_at(&self, season: i32, now: DateTime<Utc>) -> Result<CacheLookup> {
        let cached = self.read_entry(season);

        if let Some(entry) = &cached {
            let age = now - entry.fetched_at;
            if age <= self.max_age {
                debug!("Cache hit for season {} (age {}m)", season, age.num_minutes());
                return Ok(CacheLookup::Fresh(entry.plays.clone()));
            }
        }

        match self.source.fetch(season) {
            Ok(plays) => {
                info!(
                    "Fetched {} plays for season {} from {}",
                    plays.len(),
                    season,
                    self.source.name()
                );
                let entry = CacheEntry {
                    season,
                    fetched_at: now,
                    plays,
                };
                if let Err(e) = self.write_entry(&entry) {
                    warn!("Failed to write play cache: {}", e);
                }
                Ok(CacheLookup::Fresh(entry.plays))
            }
            Err(e) => match cached {
                Some(entry) => {
                    let age = now - entry.fetched_at;
                    warn!(
                        "{} failed for season {} ({}), serving cache from {}h ago",
                        self.source.name(),
                        season,
                        e,
                        age.num_hours()
                    );
                    Ok(CacheLookup::Stale {
                        plays: entry.plays,
                        age,
                    })
                }
                None => Err(EdgeError::PlayDataUnavailable {
                    key: format!("season {season}"),
                    reason: format!("{} failed and no cached copy exists: {}", self.source.name(), e),
                }),
            },
        }
    }
}

impl<S: PlaySource> PlayCache for FilePlayCache<S> {
    fn get(&self, season: i32) -> Result<CacheLookup> {
        self.lookup_at(season, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testing::scratch_dir;
    use crate::domain::Team;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeSource {
        plays: Option<Vec<PlayRecord>>,
        calls: AtomicUsize,
    }

    impl FakeSource {
        fn ok(plays: Vec<PlayRecord>) -> Self {
            Self {
                plays: Some(plays),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                plays: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl PlaySource for FakeSource {
        fn name(&self) -> &str {
            "fake"
        }

        fn fetch(&self, season: i32) -> Result<Vec<PlayRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.plays.clone().ok_or_else(|| EdgeError::PlayDataUnavailable {
                key: season.to_string(),
                reason: "offline".to_string(),
            })
        }
    }

    fn plays() -> Vec<PlayRecord> {
        vec![PlayRecord {
            game_id: "g1".to_string(),
            week: Some(1),
            offense: Team::Detroit,
            defense: Team::Chicago,
            epa: 0.3,
            down: Some(1),
            yards_to_go: 10,
            yardline: 75,
            quarter: 1,
            half_seconds_remaining: 1700,
            yards_gained: 8,
            flags: Default::default(),
        }]
    }

    #[test]
    fn test_fetch_then_fresh_hit() {
        let dir = scratch_dir("cache-fresh");
        let cache = FilePlayCache::new(&dir, Duration::hours(24), FakeSource::ok(plays()));
        let now = Utc::now();

        assert_eq!(cache.lookup_at(2025, now).unwrap(), CacheLookup::Fresh(plays()));
        let again = cache.lookup_at(2025, now + Duration::hours(1)).unwrap();
        assert_eq!(again, CacheLookup::Fresh(plays()));
        assert_eq!(cache.source.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_stale_when_source_fails() {
        let dir = scratch_dir("cache-stale");
        let now = Utc::now();
        FilePlayCache::new(&dir, Duration::hours(24), FakeSource::ok(plays()))
            .lookup_at(2024, now)
            .unwrap();

        let cache = FilePlayCache::new(&dir, Duration::hours(24), FakeSource::failing());
        let lookup = cache.lookup_at(2024, now + Duration::hours(30)).unwrap();
        assert!(lookup.is_stale());
        match lookup {
            CacheLookup::Stale { plays: cached, age } => {
                assert_eq!(cached, plays());
                assert_eq!(age.num_hours(), 30);
            }
            other => panic!("expected stale lookup, got {other:?}"),
        }
    }

    #[test]
    fn test_error_without_source_or_cache() {
        let dir = scratch_dir("cache-empty");
        let cache = FilePlayCache::new(&dir, Duration::hours(24), FakeSource::failing());
        let err = cache.get(2023).unwrap_err();
        assert!(matches!(err, EdgeError::PlayDataUnavailable { .. }));
    }
}
