//! Journal entities.
//!
//! [`Entry`] maps to a row of the `entries` table in `animo-db`; [`NewEntry`]
//! is the validated payload used to create one.

mod entry;

pub use entry::{Emotion, Entry, MAX_INTENSITY, MIN_INTENSITY, NewEntry};
