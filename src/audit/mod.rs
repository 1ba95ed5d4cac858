//! Function-level audit: signature inventory, brace-counted extents, health
//! flags and call-site counts. Independent of the dependency graph; it only
//! shares the source corpus.

pub mod call_sites;
pub mod extent;
pub mod health;
pub mod inventory;
pub mod report;

pub use call_sites::CallSiteIndex;
pub use extent::{function_extent, Extent};
pub use health::{HealthFlag, HealthRules};
pub use inventory::{FunctionExtractor, FunctionKind, FunctionRecord, Inventory};
pub use report::{AuditBuilder, AuditCorpus, AuditReport, AuditSummary, FileAudit, FunctionAudit};
