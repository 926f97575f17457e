//! Screenshot directory: stamped output paths and listing

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub const DEFAULT_LIST_LIMIT: usize = 50;
pub const MAX_LIST_LIMIT: usize = 200;

#[derive(Debug, Clone)]
pub struct ScreenshotStore {
    dir: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotEntry {
    pub path: String,
    pub size_bytes: u64,
    /// RFC 3339 creation time
    pub created_at: String,
}

impl ScreenshotStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// `screenshots/` under the caller's working directory
    pub fn in_working_dir() -> io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?.join("screenshots")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ensure(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    /// `<prefix>-<UTC stamp>.png`; colons and dots in the stamp are
    /// replaced so the name is filesystem-safe everywhere.
    pub fn stamped_path(&self, prefix: &str) -> PathBuf {
        self.stamped_path_at(prefix, Utc::now())
    }

    fn stamped_path_at(&self, prefix: &str, now: DateTime<Utc>) -> PathBuf {
        let stamp = now
            .to_rfc3339_opts(SecondsFormat::Millis, true)
            .replace([':', '.'], "-");
        self.dir.join(format!("{prefix}-{stamp}.png"))
    }

    /// PNG files in the store, newest first, at most `limit` entries
    /// (clamped to 1..=200).
    pub fn list(&self, limit: usize) -> io::Result<Vec<ScreenshotEntry>> {
        let limit = limit.clamp(1, MAX_LIST_LIMIT);

        let mut stamped: Vec<(SystemTime, ScreenshotEntry)> = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            let is_png = path
                .extension()
                .map_or(false, |e| e.eq_ignore_ascii_case("png"));
            if !is_png {
                continue;
            }

            let meta = entry.metadata()?;
            let created = meta.created().or_else(|_| meta.modified())?;
            stamped.push((
                created,
                ScreenshotEntry {
                    path: path.display().to_string(),
                    size_bytes: meta.len(),
                    created_at: DateTime::<Utc>::from(created)
                        .to_rfc3339_opts(SecondsFormat::Millis, true),
                },
            ));
        }

        stamped.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(stamped.into_iter().take(limit).map(|(_, e)| e).collect())
    }
}
