// ── Screens management view ──

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use peek_api::{ApiClient, ImageUpload};

use crate::error::CoreError;
use crate::messages;
use crate::model::Screen;
use crate::view::LoadState;

/// Local state of the "new screen" dialog.
#[derive(Debug, Clone, Default)]
pub struct ScreenDraft {
    pub name: String,
    pub image: Option<ImageUpload>,
}

impl ScreenDraft {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.image.is_none()
    }
}

/// What the dialog's submit button shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitState {
    pub image_selected: bool,
    pub uploading: bool,
}

impl SubmitState {
    pub fn can_submit(self) -> bool {
        self.image_selected && !self.uploading
    }

    pub fn label(self) -> &'static str {
        if self.uploading {
            messages::UPLOADING_LABEL
        } else {
            messages::SUBMIT_LABEL
        }
    }
}

/// Screen list plus the creation dialog.
pub struct ScreensView {
    api: Arc<ApiClient>,
    lifecycle: CancellationToken,
    state: watch::Sender<LoadState>,
    screens: Vec<Screen>,
    dialog_open: bool,
    draft: ScreenDraft,
    submit: watch::Sender<SubmitState>,
    alert: Option<String>,
}

impl ScreensView {
    pub(crate) fn new(api: Arc<ApiClient>, lifecycle: CancellationToken) -> Self {
        Self {
            api,
            lifecycle,
            state: watch::channel(LoadState::Idle).0,
            screens: Vec::new(),
            dialog_open: false,
            draft: ScreenDraft::default(),
            submit: watch::channel(SubmitState::default()).0,
            alert: None,
        }
    }

    // ── List ─────────────────────────────────────────────────────────

    /// Fetch the full screen list.
    ///
    /// Failure is logged and leaves an empty list; it never escapes.
    pub async fn load(&mut self) -> LoadState {
        self.state.send_replace(LoadState::Loading);
        let result = self.api.list_screens().await;

        if self.lifecycle.is_cancelled() {
            debug!("screens view unmounted, discarding list response");
            self.state.send_replace(LoadState::Discarded);
            return LoadState::Discarded;
        }

        let state = match result {
            Ok(records) => {
                self.screens = records.into_iter().map(Screen::from).collect();
                LoadState::Loaded
            }
            Err(e) => {
                warn!(error = %e, "failed to load screens");
                self.screens.clear();
                LoadState::Failed {
                    message: e.to_string(),
                }
            }
        };
        self.state.send_replace(state.clone());
        state
    }

    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    /// Subscribe to list load state changes.
    pub fn watch_state(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    // ── Creation dialog ──────────────────────────────────────────────

    pub fn open_dialog(&mut self) {
        self.dialog_open = true;
    }

    /// Close the dialog and discard the draft.
    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
        self.draft = ScreenDraft::default();
        self.submit.send_modify(|s| s.image_selected = false);
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn draft(&self) -> &ScreenDraft {
        &self.draft
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn select_image(&mut self, image: ImageUpload) {
        self.draft.image = Some(image);
        self.submit.send_modify(|s| s.image_selected = true);
    }

    pub fn clear_image(&mut self) {
        self.draft.image = None;
        self.submit.send_modify(|s| s.image_selected = false);
    }

    pub fn is_uploading(&self) -> bool {
        self.submit.borrow().uploading
    }

    /// Whether the submit action is enabled.
    pub fn can_submit(&self) -> bool {
        self.submit.borrow().can_submit()
    }

    pub fn submit_label(&self) -> &'static str {
        self.submit.borrow().label()
    }

    /// Subscribe to the submit button state. It flips to uploading for
    /// the duration of [`create_screen`](Self::create_screen).
    pub fn watch_submit(&self) -> watch::Receiver<SubmitState> {
        self.submit.subscribe()
    }

    /// Pending alert text for the user.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Upload the draft as a new screen.
    ///
    /// Without an image nothing is sent. On success the dialog closes, the
    /// draft resets, and the list is fetched again; on failure the dialog
    /// stays open with the draft intact so the user can retry.
    pub async fn create_screen(&mut self) -> Result<(), CoreError> {
        self.alert = None;

        let Some(image) = self.draft.image.clone() else {
            self.alert = Some(messages::IMAGE_REQUIRED.to_owned());
            return Err(CoreError::ValidationFailed {
                message: messages::IMAGE_REQUIRED.to_owned(),
            });
        };

        if self.is_uploading() {
            return Err(CoreError::ValidationFailed {
                message: messages::UPLOAD_IN_PROGRESS.to_owned(),
            });
        }

        self.submit.send_modify(|s| s.uploading = true);
        let result = self.api.create_screen(&self.draft.name, &image).await;
        self.submit.send_modify(|s| s.uploading = false);

        if self.lifecycle.is_cancelled() {
            debug!("screens view unmounted, discarding upload response");
            return result.map_err(CoreError::from);
        }

        match result {
            Ok(()) => {
                info!(name = %self.draft.name, "screen created");
                self.close_dialog();
                self.load().await;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to create screen");
                self.alert = Some(messages::SCREEN_CREATE_FAILED.to_owned());
                Err(e.into())
            }
        }
    }

    /// Stop applying responses to this view.
    pub fn unmount(&self) {
        self.lifecycle.cancel();
    }
}
