use crate::domain::commit::CommitRecord;
use crate::domain::repo::Period;
use crate::domain::summary::DiffSummary;
use crate::services::commit_host::MAX_TOTAL_COMMITS;

/// Reduces fetched commits into totals plus one diff-block per changed file
/// that carries a patch. Patch-less files (binary, or too large for the
/// host to inline) still count toward the totals.
pub fn aggregate(commits: &[CommitRecord], period: Period) -> DiffSummary {
    let mut additions = 0u64;
    let mut deletions = 0u64;
    let mut diff_blocks = Vec::new();

    for commit in commits {
        additions += commit.stats.additions;
        deletions += commit.stats.deletions;

        for file in &commit.files {
            let Some(patch) = file.patch.as_deref().filter(|p| !p.is_empty()) else {
                continue;
            };
            diff_blocks.push(format!(
                "{}\n{}\n{}\n{}\n{}",
                commit.short_sha(),
                commit.date.format("%Y-%m-%d %H:%M UTC"),
                commit.message,
                file.filename,
                patch,
            ));
        }
    }

    DiffSummary {
        additions,
        deletions,
        net_diff: additions as i64 - deletions as i64,
        diff_blocks,
        total_commits: commits.len(),
        has_more: commits.len() >= MAX_TOTAL_COMMITS,
        period,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commit::{CommitFile, CommitStats};
    use chrono::{TimeZone, Utc};

    fn period() -> Period {
        Period {
            since: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            until: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
        }
    }

    fn commit(sha: &str, files: Vec<CommitFile>, additions: u64, deletions: u64) -> CommitRecord {
        CommitRecord {
            sha: sha.to_string(),
            date: Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap(),
            message: format!("commit {sha}"),
            files,
            stats: CommitStats {
                additions,
                deletions,
                total: additions + deletions,
            },
        }
    }

    #[test]
    fn net_diff_is_additions_minus_deletions() {
        let commits = vec![
            commit("aaaaaaaaaa", vec![], 10, 4),
            commit("bbbbbbbbbb", vec![], 1, 7),
        ];
        let summary = aggregate(&commits, period());
        assert_eq!(summary.additions, 11);
        assert_eq!(summary.deletions, 11);
        assert_eq!(summary.net_diff, 0);
        assert_eq!(summary.net_diff, summary.additions as i64 - summary.deletions as i64);
        assert_eq!(summary.total_commits, 2);
        assert!(!summary.has_more);
    }

    #[test]
    fn skips_files_without_patches_but_keeps_their_stats() {
        let files = vec![
            CommitFile {
                filename: "image.png".to_string(),
                patch: None,
            },
            CommitFile {
                filename: "src/lib.rs".to_string(),
                patch: Some("@@ -1 +1 @@\n-old\n+new".to_string()),
            },
        ];
        let summary = aggregate(&[commit("cafebabe42", files, 5, 2)], period());
        assert_eq!(summary.diff_blocks.len(), 1);
        assert!(summary.diff_blocks[0].contains("src/lib.rs"));
        assert_eq!(summary.additions, 5);
        assert_eq!(summary.deletions, 2);
    }

    #[test]
    fn diff_block_fields_are_newline_separated_in_fixed_order() {
        let files = vec![CommitFile {
            filename: "main.rs".to_string(),
            patch: Some("@@ -0,0 +1 @@\n+hello".to_string()),
        }];
        let summary = aggregate(&[commit("0123456789abcdef", files, 1, 0)], period());
        let lines: Vec<&str> = summary.diff_blocks[0].splitn(5, '\n').collect();
        assert_eq!(lines[0], "0123456");
        assert_eq!(lines[1], "2024-01-15 09:30 UTC");
        assert_eq!(lines[2], "commit 0123456789abcdef");
        assert_eq!(lines[3], "main.rs");
        assert_eq!(lines[4], "@@ -0,0 +1 @@\n+hello");
    }

    #[test]
    fn block_order_follows_commit_then_file_order() {
        let first = commit(
            "1111111111",
            vec![
                CommitFile {
                    filename: "a.rs".to_string(),
                    patch: Some("+a".to_string()),
                },
                CommitFile {
                    filename: "b.rs".to_string(),
                    patch: Some("+b".to_string()),
                },
            ],
            2,
            0,
        );
        let second = commit(
            "2222222222",
            vec![CommitFile {
                filename: "c.rs".to_string(),
                patch: Some("+c".to_string()),
            }],
            1,
            0,
        );
        let summary = aggregate(&[first, second], period());
        assert!(summary.diff_blocks[0].contains("a.rs"));
        assert!(summary.diff_blocks[1].contains("b.rs"));
        assert!(summary.diff_blocks[2].contains("c.rs"));
    }

    #[test]
    fn ceiling_sized_history_sets_has_more() {
        let commits: Vec<CommitRecord> = (0..MAX_TOTAL_COMMITS)
            .map(|i| commit(&format!("{i:040x}"), vec![], 1, 0))
            .collect();
        let summary = aggregate(&commits, period());
        assert!(summary.has_more);
        assert_eq!(summary.total_commits, MAX_TOTAL_COMMITS);
    }
}
