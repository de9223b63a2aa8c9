//! ID prefix constants.
//!
//! Stored entries get IDs of the form `{prefix}-{8 hex chars}`, generated in SQL
//! by `animo-db`.

/// Prefix for journal entry IDs (`ent-a3f8b2c1`).
pub const PREFIX_ENTRY: &str = "ent";
