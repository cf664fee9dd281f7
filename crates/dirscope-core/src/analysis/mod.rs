/// Analysis modules: categorisation and post-scan algorithms.

pub mod age;
pub mod aggregate;
pub mod categorizer;
pub mod duplicates;
pub mod insights;

pub use age::{aging_report, AgingReport};
pub use aggregate::{aggregate, DistributionSummary, Visualization};
pub use categorizer::{categorize, categorize_extension, CategoryInput};
pub use duplicates::{find_duplicates, DuplicateGroup};
pub use insights::{insights, Insights};
