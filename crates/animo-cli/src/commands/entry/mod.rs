mod add;
mod list;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EntryCommands;
use crate::context::AppContext;

/// Handle `animo entry`.
pub async fn handle(
    action: &EntryCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        EntryCommands::Add {
            user,
            ts,
            emotions,
            what_happened,
            thoughts,
            reaction,
            areas,
        } => {
            add::run(
                user,
                add::NewEntryArgs {
                    ts: *ts,
                    emotions,
                    what_happened: what_happened.as_deref(),
                    thoughts: thoughts.as_deref(),
                    reaction: reaction.as_deref(),
                    areas,
                },
                ctx,
                flags,
            )
            .await
        }
        EntryCommands::List { user, from, to } => list::run(user, *from, *to, ctx, flags).await,
    }
}
