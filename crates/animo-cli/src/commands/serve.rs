use std::sync::Arc;

use anyhow::Context;

use animo_auth::SupabaseAuth;
use animo_server::AppState;

use crate::cli::root_commands::ServeArgs;
use crate::context::AppContext;

/// Handle `animo serve`.
pub async fn handle(args: &ServeArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let identity = SupabaseAuth::from_config(&ctx.config.auth)
        .context("the HTTP API needs an identity provider")?;

    let server = &ctx.config.server;
    let bind = args.bind.as_deref().unwrap_or(&server.bind);
    let port = args.port.unwrap_or(server.port);
    let addr = format!("{bind}:{port}");

    let state = Arc::new(AppState {
        store: ctx.db.clone(),
        identity: Arc::new(identity),
        engine: ctx.engine.clone(),
        default_range_days: ctx.config.analysis.default_range_days,
    });

    tracing::info!(strategy = ctx.engine.strategy(), "starting animo server");
    animo_server::serve(&addr, state)
        .await
        .with_context(|| format!("server on {addr} failed"))
}
