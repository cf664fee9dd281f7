/// File age analysis: find files that haven't been modified in a long time.
use crate::model::FileRecord;
use chrono::{DateTime, Local};
use serde::Serialize;

/// Age thresholds in days for the three buckets.
pub const OLD_DAYS: i64 = 365;
pub const VERY_OLD_DAYS: i64 = 730;
pub const ANCIENT_DAYS: i64 = 1095;

/// Example paths kept per bucket.
const MAX_EXAMPLES: usize = 3;

/// Files grouped by how long ago they were last modified.
///
/// Buckets are exclusive: a file lands in the oldest bucket it qualifies
/// for. Examples are the first matching paths in scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgingReport {
    pub old_count: u64,
    pub very_old_count: u64,
    pub ancient_count: u64,
    pub old_examples: Vec<String>,
    pub very_old_examples: Vec<String>,
    pub ancient_examples: Vec<String>,
}

/// Bucket `files` by age of `modified` relative to `now`.
///
/// Files with a modification time in the future are ignored.
pub fn aging_report(files: &[FileRecord], now: DateTime<Local>) -> AgingReport {
    let mut report = AgingReport::default();

    for f in files {
        let age_days = (now - f.modified).num_days();
        if age_days < 0 {
            continue;
        }
        let (count, examples) = if age_days >= ANCIENT_DAYS {
            (&mut report.ancient_count, &mut report.ancient_examples)
        } else if age_days >= VERY_OLD_DAYS {
            (&mut report.very_old_count, &mut report.very_old_examples)
        } else if age_days >= OLD_DAYS {
            (&mut report.old_count, &mut report.old_examples)
        } else {
            continue;
        };
        *count += 1;
        if examples.len() < MAX_EXAMPLES {
            examples.push(f.path.clone());
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use chrono::Duration;

    fn file_with_age(name: &str, now: DateTime<Local>, days_ago: i64) -> FileRecord {
        let ts = now - Duration::days(days_ago);
        FileRecord {
            path: format!("/archive/{name}"),
            name: name.to_string(),
            directory: "/archive".to_string(),
            extension: String::new(),
            size_bytes: 1,
            size_display: "1.00 B".to_string(),
            created: ts,
            modified: ts,
            accessed: ts,
            mime_type: "unknown".to_string(),
            is_readable: true,
            is_writable: true,
            is_executable: false,
            category: Category::Uncategorized,
        }
    }

    #[test]
    fn files_land_in_the_oldest_matching_bucket() {
        let now = Local::now();
        let files = vec![
            file_with_age("fresh", now, 10),
            file_with_age("old", now, 400),
            file_with_age("very_old", now, 800),
            file_with_age("ancient", now, 2000),
        ];

        let report = aging_report(&files, now);
        assert_eq!(report.old_count, 1);
        assert_eq!(report.very_old_count, 1);
        assert_eq!(report.ancient_count, 1);
        assert_eq!(report.ancient_examples, ["/archive/ancient"]);
    }

    #[test]
    fn thresholds_are_inclusive() {
        let now = Local::now();
        let report = aging_report(&[file_with_age("edge", now, OLD_DAYS)], now);
        assert_eq!(report.old_count, 1);
    }

    #[test]
    fn examples_are_capped_but_counts_are_not() {
        let now = Local::now();
        let files: Vec<_> = (0..5)
            .map(|i| file_with_age(&format!("f{i}"), now, 400))
            .collect();
        let report = aging_report(&files, now);
        assert_eq!(report.old_count, 5);
        assert_eq!(report.old_examples, ["/archive/f0", "/archive/f1", "/archive/f2"]);
    }

    /// A modification time in the future must be skipped, not panic.
    #[test]
    fn future_timestamps_are_ignored() {
        let now = Local::now();
        let report = aging_report(&[file_with_age("future", now, -30)], now);
        assert_eq!(report, AgingReport::default());
    }
}
