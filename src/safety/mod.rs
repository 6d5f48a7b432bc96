pub mod auditor;

pub use auditor::{AuditReport, audit};
