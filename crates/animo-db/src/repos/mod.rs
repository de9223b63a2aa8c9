//! Repository methods on [`AnimoDb`](crate::AnimoDb).

pub mod entry;
