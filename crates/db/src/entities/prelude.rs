//! Entity re-exports.

pub use super::accounts::Entity as Accounts;
pub use super::audit_logs::Entity as AuditLogs;
pub use super::business_documents::Entity as BusinessDocuments;
pub use super::cashboxes::Entity as Cashboxes;
pub use super::clients::Entity as Clients;
pub use super::journal_entries::Entity as JournalEntries;
pub use super::journal_lines::Entity as JournalLines;
pub use super::partners::Entity as Partners;
pub use super::projects::Entity as Projects;
pub use super::suppliers::Entity as Suppliers;
