/// In-memory search over one scan's file records.
///
/// Lower-cased names and paths are computed once when the index is built;
/// each query is then a single stable filter pass over the records.
use crate::model::{Category, FileRecord};
use crate::scanner::ScanResult;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Search parameters. Every empty / absent field is ignored; all given
/// filters must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    /// Case-insensitive substring of the name or path.
    pub text: String,
    /// Category labels. Unknown labels match nothing.
    pub categories: Vec<String>,
    /// Extensions, with or without the leading dot.
    pub extensions: Vec<String>,
    /// Inclusive size bounds in bytes.
    pub min_size: Option<u64>,
    pub max_size: Option<u64>,
    /// Inclusive modification-time bounds.
    pub modified_after: Option<DateTime<Local>>,
    pub modified_before: Option<DateTime<Local>>,
}

impl SearchQuery {
    /// Text-only query.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Add a category filter.
    pub fn with_categories<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = labels.into_iter().map(Into::into).collect();
        self
    }
}

/// The `search` response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub results: Vec<FileRecord>,
    pub count: usize,
}

/// Pre-lowered keys for one record set, positional with `ScanResult::files`.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    names: Vec<String>,
    paths: Vec<String>,
}

/// A query with its filters parsed into matchable form.
struct Compiled<'q> {
    needle: String,
    categories: Option<Vec<Category>>,
    extensions: Vec<String>,
    query: &'q SearchQuery,
}

impl SearchIndex {
    /// Build the index for `scan`.
    pub fn new(scan: &ScanResult) -> Self {
        Self {
            names: scan.files.iter().map(|f| f.name.to_lowercase()).collect(),
            paths: scan.files.iter().map(|f| f.path.to_lowercase()).collect(),
        }
    }

    /// Records of `scan` matching `query`, in scan order.
    ///
    /// `scan` must be the result this index was built from.
    pub fn search<'a>(&self, scan: &'a ScanResult, query: &SearchQuery) -> Vec<&'a FileRecord> {
        debug_assert_eq!(self.names.len(), scan.files.len(), "index built from another scan");
        let compiled = compile(query);

        scan.files
            .iter()
            .enumerate()
            .filter(|&(i, f)| self.matches(i, f, &compiled))
            .map(|(_, f)| f)
            .collect()
    }

    fn matches(&self, i: usize, f: &FileRecord, q: &Compiled<'_>) -> bool {
        if !q.needle.is_empty()
            && !self.names[i].contains(&q.needle)
            && !self.paths[i].contains(&q.needle)
        {
            return false;
        }
        if let Some(cats) = &q.categories {
            if !cats.contains(&f.category) {
                return false;
            }
        }
        if !q.extensions.is_empty() && !q.extensions.contains(&f.extension) {
            return false;
        }
        let query = q.query;
        query.min_size.is_none_or(|min| f.size_bytes >= min)
            && query.max_size.is_none_or(|max| f.size_bytes <= max)
            && query.modified_after.is_none_or(|after| f.modified >= after)
            && query.modified_before.is_none_or(|before| f.modified <= before)
    }
}

fn compile(query: &SearchQuery) -> Compiled<'_> {
    let categories = if query.categories.is_empty() {
        None
    } else {
        Some(
            query
                .categories
                .iter()
                .filter_map(|label| {
                    let cat = Category::from_label(label);
                    if cat.is_none() {
                        debug!("Unknown category filter {label:?} matches nothing");
                    }
                    cat
                })
                .collect(),
        )
    };

    Compiled {
        needle: query.text.to_lowercase(),
        categories,
        extensions: query
            .extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_lowercase())
            .collect(),
        query,
    }
}
