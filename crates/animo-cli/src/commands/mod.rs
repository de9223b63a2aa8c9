pub mod analyze;
pub mod dispatch;
pub mod entry;
pub mod serve;
