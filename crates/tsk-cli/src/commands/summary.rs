use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `tsk summary`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let limit = usize::try_from(ctx.config.general.recent_limit)?;
    output(&ctx.sync.summary(limit), flags.format)
}
