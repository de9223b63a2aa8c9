//! Entry repository: insert, range listing, and per-user deletion.

use animo_core::entities::{Emotion, Entry, NewEntry};
use animo_core::ids::PREFIX_ENTRY;
use animo_core::range::TimeRange;

use crate::AnimoDb;
use crate::error::DatabaseError;
use crate::helpers::{blank_to_none, get_json, get_opt_string, to_json};

fn row_to_entry(row: &libsql::Row) -> Result<Entry, DatabaseError> {
    Ok(Entry {
        id: Some(row.get::<String>(0)?),
        entry_id: None,
        event_ts: row.get::<i64>(1)?,
        emotions: get_json::<Vec<Emotion>>(row, 2, "emotions")?,
        what_happened: get_opt_string(row, 3)?,
        thoughts: get_opt_string(row, 4)?,
        reaction: get_opt_string(row, 5)?,
        life_areas: get_json::<Vec<String>>(row, 6, "life_areas")?,
    })
}

impl AnimoDb {
    /// Validate and store a new entry owned by `user_id`.
    ///
    /// Blank free-text fields are stored as NULL.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Core` when validation fails, or a storage error.
    pub async fn insert_entry(
        &self,
        user_id: &str,
        new_entry: &NewEntry,
    ) -> Result<Entry, DatabaseError> {
        new_entry.validate()?;

        let id = self.generate_id(PREFIX_ENTRY).await?;
        let what_happened = blank_to_none(new_entry.what_happened.as_deref());
        let thoughts = blank_to_none(new_entry.thoughts.as_deref());
        let reaction = blank_to_none(new_entry.reaction.as_deref());

        self.conn()
            .execute(
                "INSERT INTO entries (id, user_id, event_ts, emotions, what_happened, thoughts, reaction, life_areas)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                libsql::params![
                    id.as_str(),
                    user_id,
                    new_entry.event_ts,
                    to_json(&new_entry.emotions)?,
                    what_happened.as_deref(),
                    thoughts.as_deref(),
                    reaction.as_deref(),
                    to_json(&new_entry.life_areas)?
                ],
            )
            .await?;

        tracing::debug!(entry_id = %id, "entry stored");

        Ok(Entry {
            id: Some(id),
            entry_id: None,
            event_ts: new_entry.event_ts,
            emotions: new_entry.emotions.clone(),
            what_happened,
            thoughts,
            reaction,
            life_areas: new_entry.life_areas.clone(),
        })
    }

    /// Entries of `user_id` with `event_ts` inside `range`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be decoded.
    pub async fn list_entries(
        &self,
        user_id: &str,
        range: TimeRange,
    ) -> Result<Vec<Entry>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT id, event_ts, emotions, what_happened, thoughts, reaction, life_areas
                 FROM entries
                 WHERE user_id = ?1 AND event_ts >= ?2 AND event_ts <= ?3
                 ORDER BY event_ts DESC, created_at DESC",
                libsql::params![user_id, range.from, range.to],
            )
            .await?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_entry(&row)?);
        }
        Ok(entries)
    }

    /// Remove every entry owned by `user_id`. Returns the number removed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete fails.
    pub async fn delete_user_entries(&self, user_id: &str) -> Result<u64, DatabaseError> {
        let removed = self
            .conn()
            .execute("DELETE FROM entries WHERE user_id = ?1", [user_id])
            .await?;
        tracing::info!(removed, "deleted user entries");
        Ok(removed)
    }
}
