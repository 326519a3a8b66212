//! sea-orm entities for the docvault API service.

pub mod audit_logs;
pub mod otps;
pub mod posts;
pub mod share_links;
pub mod users;
