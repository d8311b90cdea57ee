//! Dashboard command handler.

use peek_core::{DashboardStats, LoadState, StatusTone};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::{Context, util};

fn stats_detail(stats: &DashboardStats, color: bool) -> String {
    let line = |label: &str, value: u64, tone: StatusTone| {
        format!("{label:<16}{}", output::paint(&value.to_string(), tone, color))
    };
    let mut lines = vec![
        format!("{:<16}{}", "Total screens", stats.total),
        line("Online", stats.online, StatusTone::Success),
        line("Offline", stats.offline, StatusTone::Warning),
        line("Error", stats.error, StatusTone::Error),
    ];
    // Screens in states the backend added later.
    if stats.other() > 0 {
        lines.push(line("Other", stats.other(), StatusTone::Neutral));
    }
    lines.join("\n")
}

pub async fn handle(ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    let mut view = ctx.portal.dashboard();

    let pb = util::spinner("Loading dashboard...", global.quiet);
    let state = view.load().await;
    pb.finish_and_clear();

    match state {
        LoadState::Discarded if ctx.session_rejected() => return Err(CliError::SessionExpired),
        // Zeroed counts are still shown; the failure only goes to the log.
        LoadState::Failed { message } => tracing::warn!(%message, "showing empty dashboard"),
        _ => {}
    }

    let color = output::should_color(&global.color);
    let stats = view.stats();
    let out = output::render_single(
        &global.output,
        &stats,
        |s| stats_detail(s, color),
        |s| s.total.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
