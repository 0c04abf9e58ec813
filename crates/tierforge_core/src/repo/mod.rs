//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define template-store data access contracts.
//! - Isolate SQLite query details from session orchestration.
//!
//! # Invariants
//! - Template item listing is deterministic: `sort_order ASC, item_uuid ASC`.
//! - Repository writes validate input before SQL mutations.

pub mod template_repo;
