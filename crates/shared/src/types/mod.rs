//! Common types used across the application.

pub mod id;
pub mod money;
pub mod pagination;

pub use id::{Actor, new_record_id};
pub use money::format_amount;
pub use pagination::{PageMeta, PageRequest, PageResponse};
