//! Persisted session tables
//!
//! Two files in the config directory back the registry:
//! - `UUID_Timeouts.tsv`: one `<id>\t<created_at_epoch_float>` line per
//!   tracked non-permanent identity, rewritten in full on every persist
//! - `Permanent_Session_IDs.txt`: one identity per line, auto-created with
//!   a single generated entry when absent; re-read on every persist so
//!   externally appended identities take effect without a restart
//!
//! The permanent-identity list is the durable source of truth for
//! permanent identities: any start-up read failure other than "file
//! absent" is fatal.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

use cellarium_core::{Error, Result, SessionId, Timestamp};

/// File name of the non-permanent identity timeout table
pub const TIMEOUTS_FILE: &str = "UUID_Timeouts.tsv";

/// File name of the permanent-identity list
pub const PERMANENT_IDS_FILE: &str = "Permanent_Session_IDs.txt";

/// Accessor for the two persisted session files
#[derive(Debug, Clone)]
pub struct SessionTables {
    config_dir: PathBuf,
}

impl SessionTables {
    /// Create an accessor rooted at `config_dir`
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        SessionTables {
            config_dir: config_dir.into(),
        }
    }

    /// Path of the timeout table
    pub fn timeouts_path(&self) -> PathBuf {
        self.config_dir.join(TIMEOUTS_FILE)
    }

    /// Path of the permanent-identity list
    pub fn permanent_path(&self) -> PathBuf {
        self.config_dir.join(PERMANENT_IDS_FILE)
    }

    /// Read the timeout table
    ///
    /// A missing file is an empty table. Malformed lines are skipped with a
    /// warning; they only ever describe non-permanent identities.
    pub fn read_timeouts(&self) -> Result<Vec<(SessionId, Timestamp)>> {
        let body = match fs::read_to_string(self.timeouts_path()) {
            Ok(body) => body,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for line in body.lines() {
            if line.is_empty() {
                continue;
            }
            let parsed = line
                .split_once('\t')
                .and_then(|(id, created)| created.parse::<f64>().ok().map(|c| (id, c)));
            match parsed {
                Some((id, created)) => {
                    entries.push((SessionId::from_string(id), Timestamp::from_secs_f64(created)));
                }
                None => warn!(line, "skipping malformed timeout table line"),
            }
        }
        Ok(entries)
    }

    /// Rewrite the timeout table in full
    pub fn write_timeouts<'a, I>(&self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a SessionId, Timestamp)>,
    {
        fs::create_dir_all(&self.config_dir)?;
        let mut body = String::new();
        for (id, created) in entries {
            body.push_str(id.as_str());
            body.push('\t');
            body.push_str(&created.as_secs_f64().to_string());
            body.push('\n');
        }
        fs::write(self.timeouts_path(), body)?;
        Ok(())
    }

    /// Read the permanent-identity list, seeding it when absent
    ///
    /// An absent or empty file is (re)written with one generated tagged
    /// identity. Any other read failure surfaces to the operator.
    pub fn read_or_seed_permanent(&self) -> Result<Vec<SessionId>> {
        match self.read_permanent() {
            Ok(ids) if !ids.is_empty() => Ok(ids),
            Ok(_) => {
                let id = SessionId::new_permanent();
                fs::create_dir_all(&self.config_dir)?;
                fs::write(self.permanent_path(), format!("{}\n", id))?;
                Ok(vec![id])
            }
            Err(e) => Err(e),
        }
    }

    /// Read the permanent-identity list without seeding
    ///
    /// A missing file is an empty list.
    pub fn read_permanent(&self) -> Result<Vec<SessionId>> {
        let body = match fs::read_to_string(self.permanent_path()) {
            Ok(body) => body,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(body
            .lines()
            .filter(|line| !line.is_empty())
            .map(SessionId::from_string)
            .collect())
    }

    /// The sole identity allowed in a restricted deployment
    ///
    /// Reads the first line of the permanent-identity list.
    pub fn restricted_identity(&self) -> Result<SessionId> {
        self.read_permanent()?
            .into_iter()
            .next()
            .ok_or_else(|| Error::SessionStore("permanent identity file is empty".to_string()))
    }
}
