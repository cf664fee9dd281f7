/// dirscope core: scanning, categorisation, aggregation and search.
///
/// This crate contains all business logic with no presentation
/// dependencies. A frontend (the `dirscope` CLI, an HTTP layer, a GUI)
/// drives it through [`session::Session`].
///
/// # Modules
///
/// - [`model`]: File records, categories and the arena-allocated size tree.
/// - [`probe`]: Per-path metadata probing and MIME guessing.
/// - [`scanner`]: Deterministic parallel directory walk.
/// - [`analysis`]: Rule-table categoriser, distributions, aging, duplicates,
///   naming and organisation insights.
/// - [`search`]: Substring / filter queries over a scan.
/// - [`session`]: Atomically published "current scan" state.
/// - [`export`]: CSV output of file records.
/// - [`config`]: Scan options.
/// - [`platform`]: Permission bits.
pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod platform;
pub mod probe;
pub mod scanner;
pub mod search;
pub mod session;

pub use config::ScanOptions;
pub use error::{AggregationError, NoScanDataError, ProbeError, ScanError};
pub use model::{Category, DirectoryTreeNode, FileRecord};
pub use probe::probe as probe_file;
pub use scanner::{scan, ScanResult};
pub use search::{SearchQuery, SearchResults};
pub use session::Session;
