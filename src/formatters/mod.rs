pub mod audit_markdown;
pub mod dot;
pub mod inventory_json;
pub mod json_compact;

pub use audit_markdown::AuditMarkdownFormatter;
pub use dot::DotFormatter;
pub use inventory_json::InventoryJsonFormatter;
pub use json_compact::JsonCompactFormatter;
