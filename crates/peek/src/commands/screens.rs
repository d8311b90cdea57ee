//! Screen command handlers.

use tabled::Tabled;

use peek_core::{CoreError, ImageUpload, LoadState, Screen, messages};

use crate::cli::{GlobalOpts, ScreensArgs, ScreensCommand};
use crate::error::CliError;
use crate::output;

use super::{Context, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ScreenRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Last Check")]
    last_check: String,
    #[tabled(rename = "Response")]
    response: String,
    #[tabled(rename = "Image")]
    image: String,
}

impl ScreenRow {
    fn new(s: &Screen, color: bool) -> Self {
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
            status: output::paint(s.status.as_str(), s.status.tone(), color),
            last_check: s
                .last_check
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
            response: s
                .response_time_ms
                .map(|ms| format!("{ms:.0} ms"))
                .unwrap_or_default(),
            image: s.image_url.clone().unwrap_or_default(),
        }
    }
}

fn render_screens(screens: &[Screen], global: &GlobalOpts) -> String {
    let color = output::should_color(&global.color);
    output::render_list(
        &global.output,
        screens,
        |s| ScreenRow::new(s, color),
        |s| s.id.clone(),
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(ctx: &Context, args: ScreensArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut view = ctx.portal.screens();

    match args.command {
        ScreensCommand::List => {
            let pb = util::spinner("Loading screens...", global.quiet);
            let state = view.load().await;
            pb.finish_and_clear();

            match state {
                LoadState::Discarded if ctx.session_rejected() => {
                    return Err(CliError::SessionExpired);
                }
                LoadState::Failed { message } => {
                    tracing::warn!(%message, "showing empty screen list");
                }
                _ => {}
            }

            output::print_output(&render_screens(view.screens(), global), global.quiet);
            Ok(())
        }

        ScreensCommand::Create { name, image } => {
            view.open_dialog();
            view.set_name(name);
            if let Some(path) = image {
                let upload = ImageUpload::from_path(&path)
                    .await
                    .map_err(|e| CliError::from(CoreError::from(e)))?;
                view.select_image(upload);
            }

            // The spinner follows the dialog's submit label.
            let mut submit = view.watch_submit();
            let pb = util::spinner(submit.borrow().label(), global.quiet);
            let result = {
                let create = view.create_screen();
                tokio::pin!(create);
                loop {
                    tokio::select! {
                        result = &mut create => break result,
                        Ok(()) = submit.changed() => {
                            pb.set_message(submit.borrow_and_update().label());
                        }
                    }
                }
            };
            pb.finish_and_clear();

            if let Err(e) = result {
                if ctx.session_rejected() {
                    return Err(CliError::SessionExpired);
                }
                let shown = view.alert().unwrap_or(messages::SCREEN_CREATE_FAILED);
                return Err(CliError::from_view(e, shown));
            }

            if !global.quiet {
                eprintln!("✓ Screen created");
            }
            output::print_output(&render_screens(view.screens(), global), global.quiet);
            Ok(())
        }
    }
}
