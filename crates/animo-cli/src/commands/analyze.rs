use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;

use animo_core::range::{TimeRange, now_ms};
use animo_core::report::InsightsResponse;
use animo_insights::{InlineRecord, normalize_records, parse_records};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AnalyzeArgs;
use crate::context::AppContext;
use crate::output::output;

/// A records file holds either a bare array or `{"records": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RecordsFile {
    Bare(Vec<Value>),
    Wrapped { records: Vec<Value> },
}

impl RecordsFile {
    /// Readable records; malformed items are skipped.
    pub fn into_records(self) -> Vec<InlineRecord> {
        match self {
            Self::Bare(records) | Self::Wrapped { records } => parse_records(records),
        }
    }
}

pub fn read_records(path: &Path) -> anyhow::Result<Vec<InlineRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file: RecordsFile = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a records file", path.display()))?;
    Ok(file.into_records())
}

/// Handle `animo analyze`.
pub async fn handle(
    args: &AnalyzeArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if args.user.is_none() && args.file.is_none() {
        anyhow::bail!("nothing to analyze: pass --user, --file, or both");
    }

    let now = now_ms();
    let mut entries = Vec::new();
    if let Some(user) = &args.user {
        let range = TimeRange::resolve(
            args.from,
            args.to,
            now,
            ctx.config.analysis.default_range_days,
        )?;
        entries = ctx.db.list_entries(user, range).await?;
    }
    if entries.is_empty()
        && let Some(path) = &args.file
    {
        entries = normalize_records(&read_records(path)?, now);
    }

    let insights = ctx.engine.analyze(&entries).await;
    output(&InsightsResponse { insights }, flags.format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_bare_array() {
        let file = write_temp(r#"[{"id": "a", "ts": 1}, {"id": "b", "ts": 2}]"#);
        let records = read_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn reads_wrapped_records() {
        let file = write_temp(r#"{"records": [{"id": "a", "thoughts": "Nunca"}]}"#);
        let records = read_records(file.path()).unwrap();
        assert_eq!(records[0].thoughts.as_deref(), Some("Nunca"));
    }

    #[test]
    fn skips_malformed_items() {
        let file = write_temp(
            r#"[{"id": "a", "emotions": [{"name": "Triste", "intensity": "6"}]}, "suelto"]"#,
        );
        let records = read_records(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].emotions[0].name, "Triste");
    }

    #[test]
    fn rejects_other_shapes() {
        let file = write_temp(r#"{"entries": []}"#);
        assert!(read_records(file.path()).is_err());
    }
}
