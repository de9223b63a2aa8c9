use animo_core::entities::{Emotion, NewEntry};
use animo_core::range::now_ms;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub struct NewEntryArgs<'a> {
    pub ts: Option<i64>,
    pub emotions: &'a [Emotion],
    pub what_happened: Option<&'a str>,
    pub thoughts: Option<&'a str>,
    pub reaction: Option<&'a str>,
    pub areas: &'a [String],
}

impl NewEntryArgs<'_> {
    fn to_new_entry(&self, now: i64) -> NewEntry {
        NewEntry {
            event_ts: self.ts.unwrap_or(now),
            emotions: self.emotions.to_vec(),
            what_happened: self.what_happened.map(str::to_string),
            thoughts: self.thoughts.map(str::to_string),
            reaction: self.reaction.map(str::to_string),
            life_areas: self.areas.to_vec(),
        }
    }
}

pub async fn run(
    user: &str,
    args: NewEntryArgs<'_>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let entry = ctx.db.insert_entry(user, &args.to_new_entry(now_ms())).await?;
    output(&entry, flags.format)
}
