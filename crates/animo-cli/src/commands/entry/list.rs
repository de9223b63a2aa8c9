use serde::Serialize;

use animo_core::entities::Entry;
use animo_core::range::{TimeRange, now_ms};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct EntryListResponse {
    entries: Vec<Entry>,
}

pub async fn run(
    user: &str,
    from: Option<i64>,
    to: Option<i64>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let range = TimeRange::new(from.unwrap_or(0), to.unwrap_or_else(now_ms))?;
    let entries = ctx.db.list_entries(user, range).await?;
    output(&EntryListResponse { entries }, flags.format)
}
