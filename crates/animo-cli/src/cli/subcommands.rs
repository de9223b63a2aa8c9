use clap::Subcommand;

use animo_core::entities::{Emotion, MAX_INTENSITY, MIN_INTENSITY};

/// Parse `name:intensity` or `name:intensity:body`.
pub fn parse_emotion(raw: &str) -> Result<Emotion, String> {
    let mut parts = raw.splitn(3, ':');
    let name = parts.next().unwrap_or_default().trim();
    if name.is_empty() {
        return Err("emotion name is empty (expected name:intensity)".into());
    }
    let intensity = parts
        .next()
        .ok_or_else(|| format!("missing intensity in '{raw}' (expected name:intensity)"))?
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid intensity in '{raw}': {e}"))?;
    if !(MIN_INTENSITY..=MAX_INTENSITY).contains(&intensity) {
        return Err(format!(
            "intensity must be between {MIN_INTENSITY} and {MAX_INTENSITY}"
        ));
    }
    let body = parts
        .next()
        .map(str::trim)
        .filter(|body| !body.is_empty())
        .map(str::to_string);
    Ok(Emotion {
        name: name.to_string(),
        intensity,
        body,
    })
}

/// Entry commands.
#[derive(Clone, Debug, Subcommand)]
pub enum EntryCommands {
    /// Store an entry.
    Add {
        #[arg(long)]
        user: String,
        /// Event time in epoch milliseconds (defaults to now).
        #[arg(long)]
        ts: Option<i64>,
        /// Emotion as name:intensity[:body]; repeatable.
        #[arg(long = "emotion", required = true, value_parser = parse_emotion)]
        emotions: Vec<Emotion>,
        #[arg(long)]
        what_happened: Option<String>,
        #[arg(long)]
        thoughts: Option<String>,
        #[arg(long)]
        reaction: Option<String>,
        /// Life area; repeatable.
        #[arg(long = "area")]
        areas: Vec<String>,
    },
    /// List a user's entries, newest first.
    List {
        #[arg(long)]
        user: String,
        #[arg(long)]
        from: Option<i64>,
        #[arg(long)]
        to: Option<i64>,
    },
}
