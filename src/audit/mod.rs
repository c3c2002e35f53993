pub mod logger;

pub use logger::{AuditCategory, AuditLogEntry, AuditLogger};
