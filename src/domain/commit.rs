use chrono::{DateTime, Utc};

/// One fetched commit with its per-file patches. Immutable once fetched;
/// consumed by aggregation and then discarded.
#[derive(Debug, Clone)]
pub struct CommitRecord {
    pub sha: String,
    pub date: DateTime<Utc>,
    pub message: String,
    pub files: Vec<CommitFile>,
    pub stats: CommitStats,
}

#[derive(Debug, Clone)]
pub struct CommitFile {
    pub filename: String,
    /// Unified-diff text; absent for binary files or patches the host omits.
    pub patch: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CommitStats {
    pub additions: u64,
    pub deletions: u64,
    pub total: u64,
}

impl CommitRecord {
    pub fn short_sha(&self) -> &str {
        // Host responses are untrusted; fall back to the full string rather
        // than panicking on a short or non-ASCII SHA.
        self.sha.get(..7).unwrap_or(&self.sha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn short_sha_takes_first_seven_characters() {
        let record = CommitRecord {
            sha: "abcdef0123456789".to_string(),
            date: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            message: "fix: things".to_string(),
            files: vec![],
            stats: CommitStats::default(),
        };
        assert_eq!(record.short_sha(), "abcdef0");
    }

    #[test]
    fn short_sha_handles_short_input() {
        let record = CommitRecord {
            sha: "abc".to_string(),
            date: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            message: String::new(),
            files: vec![],
            stats: CommitStats::default(),
        };
        assert_eq!(record.short_sha(), "abc");
    }

    #[test]
    fn short_sha_tolerates_non_ascii_responses() {
        let record = CommitRecord {
            sha: "ééééé".to_string(),
            date: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            message: String::new(),
            files: vec![],
            stats: CommitStats::default(),
        };
        // Byte 7 falls inside a multi-byte character; keep the whole string.
        assert_eq!(record.short_sha(), "ééééé");
    }
}
