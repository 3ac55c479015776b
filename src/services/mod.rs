pub mod audit;
pub mod filter;
pub mod flatten;
pub mod loader;
pub mod stats;

pub use audit::{AuditReport, Auditor};
pub use filter::{ReviewFilter, ALL_SUBJECTS};
pub use flatten::flatten_document;
pub use loader::{parse_dataset, DataLoader, DataSource};
pub use stats::{summarize, DatasetStats};
