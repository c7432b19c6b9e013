//! Identity audit log
//!
//! One human-readable line per issuance or renewal, appended and flushed
//! immediately so the log survives an unclean shutdown. The line layout is
//! consumed by operator tooling and must not change:
//!
//! ```text
//! 2024-03-01__14-02-33 :: 10.0.0.7 :: New UUID (…) assigned.
//! 2024-03-01__14-07-10 :: 10.0.0.7 :: Old UUID (…) connected :: Time Remaining - 431986.
//! ```

use chrono::Local;
use parking_lot::Mutex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

use cellarium_core::{Result, SessionId};

/// Timestamp layout used in log lines and the log file name
pub const AUDIT_TS_FORMAT: &str = "%Y-%m-%d__%H-%M-%S";

/// Append-only log of identity issuance and renewal events
#[derive(Debug)]
pub struct AuditLog {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl AuditLog {
    /// Create a fresh log file in `dir`, named after the start-up time
    pub fn open_in(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        let name = format!("UUID_Log_{}", Local::now().format(AUDIT_TS_FORMAT));
        let path = dir.join(name);
        let file = File::create(&path)?;
        Ok(AuditLog {
            path,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    /// Record a new identity assignment
    pub fn assigned(&self, origin: &str, id: &SessionId) {
        self.append(format!(
            "{} :: {} :: New UUID ({}) assigned.",
            Local::now().format(AUDIT_TS_FORMAT),
            origin,
            id
        ));
    }

    /// Record a renewal of a known identity with its remaining TTL seconds
    pub fn renewed(&self, origin: &str, id: &SessionId, remaining_secs: u64) {
        self.append(format!(
            "{} :: {} :: Old UUID ({}) connected :: Time Remaining - {}.",
            Local::now().format(AUDIT_TS_FORMAT),
            origin,
            id,
            remaining_secs
        ));
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    // A lost audit line must not fail the session call it describes.
    fn append(&self, line: String) {
        let mut writer = self.writer.lock();
        if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            warn!(path = %self.path.display(), error = %e, "failed to append audit line");
        }
    }
}
