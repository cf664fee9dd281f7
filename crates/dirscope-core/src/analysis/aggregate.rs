/// Aggregator: distribution summaries and the treemap payload.
///
/// Every function here is a read-only pass over an immutable record set,
/// so two calls on the same scan always return identical summaries.
use crate::model::category::GENERIC_ICON;
use crate::model::{Category, DirectoryTreeNode, FileRecord};
use crate::scanner::ScanResult;
use chrono::Datelike;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Number of extensions kept in the extension distribution.
pub const TOP_EXTENSIONS: usize = 10;

/// Label used for files without an extension.
pub const NO_EXTENSION: &str = "no extension";

/// Size buckets as `(label, inclusive lower bound in bytes)`, ascending.
pub const SIZE_BUCKETS: [(&str, u64); 6] = [
    ("<10KB", 0),
    ("10KB-100KB", 10 * 1024),
    ("100KB-1MB", 100 * 1024),
    ("1MB-10MB", 1024 * 1024),
    ("10MB-100MB", 10 * 1024 * 1024),
    (">100MB", 100 * 1024 * 1024),
];

/// Labelled counts for one chart. `labels` and `counts` are positional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DistributionSummary {
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
    /// Number of file records summarised (the whole scan), even when the
    /// displayed labels are truncated.
    pub total_files: u64,
    /// Total bytes per label. Category distribution only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_size: Option<u64>,
    /// Display hint per label. Category distribution only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icons: Option<Vec<&'static str>>,
}

/// Everything the presentation layer needs to draw the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Visualization {
    pub category_distribution: DistributionSummary,
    pub extension_distribution: DistributionSummary,
    pub size_distribution: DistributionSummary,
    pub time_distribution: DistributionSummary,
    pub directory_tree: DirectoryTreeNode,
}

/// Build all summaries for one scan. Rollups are taken from the scanner's
/// tree as-is.
pub fn aggregate(scan: &ScanResult) -> Visualization {
    Visualization {
        category_distribution: category_distribution(&scan.files),
        extension_distribution: extension_distribution(&scan.files, TOP_EXTENSIONS),
        size_distribution: size_distribution(&scan.files),
        time_distribution: time_distribution(&scan.files),
        directory_tree: scan.tree.to_view(),
    }
}

/// Count and size per category, most frequent first.
pub fn category_distribution(files: &[FileRecord]) -> DistributionSummary {
    let mut map: HashMap<&str, (u64, u64)> = HashMap::with_capacity(17);
    for f in files {
        let entry = map.entry(f.category.label()).or_default();
        entry.0 += 1;
        entry.1 += f.size_bytes;
    }

    let ranked = rank(map);
    let sizes: Vec<u64> = ranked.iter().map(|(_, (_, size))| *size).collect();
    let total_size = sizes.iter().sum();
    DistributionSummary {
        labels: ranked.iter().map(|(l, _)| l.to_string()).collect(),
        counts: ranked.iter().map(|(_, (count, _))| *count).collect(),
        total_files: files.len() as u64,
        sizes: Some(sizes),
        total_size: Some(total_size),
        icons: Some(
            ranked
                .iter()
                .map(|(l, _)| Category::from_label(l).map_or(GENERIC_ICON, Category::icon))
                .collect(),
        ),
    }
}

/// Count per extension, most frequent first, limited to `top_n` labels.
/// The rest are omitted, not folded into an "other" bucket.
pub fn extension_distribution(files: &[FileRecord], top_n: usize) -> DistributionSummary {
    let mut map: HashMap<&str, (u64, u64)> = HashMap::new();
    for f in files {
        let label = if f.extension.is_empty() {
            NO_EXTENSION
        } else {
            f.extension.as_str()
        };
        map.entry(label).or_default().0 += 1;
    }

    let mut ranked = rank(map);
    ranked.truncate(top_n);
    DistributionSummary {
        labels: ranked.iter().map(|(l, _)| l.to_string()).collect(),
        counts: ranked.iter().map(|(_, (count, _))| *count).collect(),
        total_files: files.len() as u64,
        ..Default::default()
    }
}

/// Index into [`SIZE_BUCKETS`] for a size. Lower bounds are inclusive.
pub fn size_bucket(size_bytes: u64) -> usize {
    SIZE_BUCKETS
        .iter()
        .rposition(|&(_, lower)| size_bytes >= lower)
        .unwrap_or(0)
}

/// Count per size bucket. All buckets are present, ascending, even if empty.
pub fn size_distribution(files: &[FileRecord]) -> DistributionSummary {
    let mut counts = vec![0u64; SIZE_BUCKETS.len()];
    for f in files {
        counts[size_bucket(f.size_bytes)] += 1;
    }
    DistributionSummary {
        labels: SIZE_BUCKETS.iter().map(|(l, _)| l.to_string()).collect(),
        counts,
        total_files: files.len() as u64,
        ..Default::default()
    }
}

/// Count per modification month (`YYYY-MM`), oldest first. Months between
/// the earliest and latest observed month are filled in with zero.
pub fn time_distribution(files: &[FileRecord]) -> DistributionSummary {
    let mut months: BTreeMap<(i32, u32), u64> = BTreeMap::new();
    for f in files {
        *months
            .entry((f.modified.year(), f.modified.month()))
            .or_default() += 1;
    }

    let mut labels = Vec::new();
    let mut counts = Vec::new();
    if let (Some(&first), Some(&last)) = (months.keys().next(), months.keys().next_back()) {
        let (mut year, mut month) = first;
        while (year, month) <= last {
            labels.push(format!("{year:04}-{month:02}"));
            counts.push(months.get(&(year, month)).copied().unwrap_or(0));
            if month == 12 {
                year += 1;
                month = 1;
            } else {
                month += 1;
            }
        }
    }

    DistributionSummary {
        labels,
        counts,
        total_files: files.len() as u64,
        ..Default::default()
    }
}

/// Sort `(label, (count, size))` by count descending, then label ascending.
fn rank(map: HashMap<&str, (u64, u64)>) -> Vec<(&str, (u64, u64))> {
    let mut ranked: Vec<_> = map.into_iter().collect();
    ranked.sort_unstable_by(|a, b| b.1 .0.cmp(&a.1 .0).then_with(|| a.0.cmp(b.0)));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use chrono::{Local, TimeZone};

    fn record(name: &str, ext: &str, size: u64, category: Category, month: (i32, u32)) -> FileRecord {
        let ts = Local
            .with_ymd_and_hms(month.0, month.1, 15, 12, 0, 0)
            .single()
            .unwrap();
        FileRecord {
            path: format!("/data/{name}"),
            name: name.to_string(),
            directory: "/data".to_string(),
            extension: ext.to_string(),
            size_bytes: size,
            size_display: crate::model::size::format_size(size),
            created: ts,
            modified: ts,
            accessed: ts,
            mime_type: "unknown".to_string(),
            is_readable: true,
            is_writable: true,
            is_executable: false,
            category,
        }
    }

    fn sample() -> Vec<FileRecord> {
        vec![
            record("a.txt", "txt", 10, Category::Documents, (2024, 1)),
            record("b.txt", "txt", 20, Category::Documents, (2024, 1)),
            record("c.png", "png", 30, Category::Images, (2024, 3)),
            record("d.rs", "rs", 40, Category::Code, (2024, 4)),
            record("Makefile", "", 50, Category::Uncategorized, (2024, 4)),
        ]
    }

    #[test]
    fn category_distribution_orders_by_count_then_label() {
        let dist = category_distribution(&sample());
        assert_eq!(dist.labels, ["Documents", "Code", "Images", "Uncategorized"]);
        assert_eq!(dist.counts, [2, 1, 1, 1]);
        assert_eq!(dist.sizes, Some(vec![30, 40, 30, 50]));
        assert_eq!(dist.total_size, Some(150));
        assert_eq!(
            dist.icons,
            Some(vec!["file-text", "file-code", "file-image", "file"])
        );
        assert_eq!(dist.total_files, 5);
        assert_eq!(dist.counts.iter().sum::<u64>(), dist.total_files);
    }

    #[test]
    fn extension_distribution_uses_no_extension_label() {
        let dist = extension_distribution(&sample(), TOP_EXTENSIONS);
        assert_eq!(dist.labels, ["txt", "no extension", "png", "rs"]);
        assert_eq!(dist.counts, [2, 1, 1, 1]);
        assert!(dist.sizes.is_none());
        assert!(dist.icons.is_none());
    }

    /// Extensions beyond the top N are dropped, and the category total still
    /// equals the kept counts plus the dropped records.
    #[test]
    fn extension_distribution_truncates_to_top_n() {
        let mut files = Vec::new();
        for i in 0..12u64 {
            for _ in 0..=i {
                files.push(record("f", &format!("e{i:02}"), 1, Category::Uncategorized, (2024, 1)));
            }
        }
        let dist = extension_distribution(&files, TOP_EXTENSIONS);
        assert_eq!(dist.labels.len(), TOP_EXTENSIONS);
        assert_eq!(dist.labels[0], "e11");
        assert_eq!(dist.labels[9], "e02");

        let kept: u64 = dist.counts.iter().sum();
        let dropped = files
            .iter()
            .filter(|f| !dist.labels.contains(&f.extension))
            .count() as u64;
        let cats = category_distribution(&files);
        assert_eq!(cats.counts.iter().sum::<u64>(), kept + dropped);
    }

    #[test]
    fn size_bucket_lower_bound_is_inclusive() {
        assert_eq!(SIZE_BUCKETS[size_bucket(0)].0, "<10KB");
        assert_eq!(SIZE_BUCKETS[size_bucket(10_239)].0, "<10KB");
        assert_eq!(SIZE_BUCKETS[size_bucket(10_240)].0, "10KB-100KB");
        assert_eq!(SIZE_BUCKETS[size_bucket(1024 * 1024)].0, "1MB-10MB");
        assert_eq!(SIZE_BUCKETS[size_bucket(100 * 1024 * 1024)].0, ">100MB");
        assert_eq!(SIZE_BUCKETS[size_bucket(u64::MAX)].0, ">100MB");
    }

    #[test]
    fn size_distribution_lists_every_bucket() {
        let dist = size_distribution(&[record("x", "", 10_240, Category::Empty, (2024, 1))]);
        assert_eq!(
            dist.labels,
            ["<10KB", "10KB-100KB", "100KB-1MB", "1MB-10MB", "10MB-100MB", ">100MB"]
        );
        assert_eq!(dist.counts, [0, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn time_distribution_fills_gaps() {
        let dist = time_distribution(&sample());
        assert_eq!(dist.labels, ["2024-01", "2024-02", "2024-03", "2024-04"]);
        assert_eq!(dist.counts, [2, 0, 1, 2]);
    }

    #[test]
    fn time_distribution_crosses_year_boundary() {
        let files = vec![
            record("a", "", 1, Category::Uncategorized, (2023, 11)),
            record("b", "", 1, Category::Uncategorized, (2024, 2)),
        ];
        let dist = time_distribution(&files);
        assert_eq!(dist.labels, ["2023-11", "2023-12", "2024-01", "2024-02"]);
        assert_eq!(dist.counts, [1, 0, 0, 1]);
    }

    #[test]
    fn empty_input_gives_empty_but_valid_summaries() {
        assert!(category_distribution(&[]).labels.is_empty());
        assert!(extension_distribution(&[], TOP_EXTENSIONS).labels.is_empty());
        assert!(time_distribution(&[]).labels.is_empty());
        let sizes = size_distribution(&[]);
        assert_eq!(sizes.labels.len(), SIZE_BUCKETS.len());
        assert!(sizes.counts.iter().all(|&c| c == 0));
        assert_eq!(sizes.total_files, 0);
    }
}
