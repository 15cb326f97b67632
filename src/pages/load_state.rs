use serde::Serialize;

use crate::error::Error;

/// Phase of a page's last load. Both terminal states go back to `Loading`
/// on the next trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Load phase, loading flag and error banner of one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageStatus {
    state: LoadState,
    loading: bool,
    error: Option<String>,
}

impl PageStatus {
    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub(crate) fn begin(&mut self) {
        self.state = LoadState::Loading;
        self.loading = true;
        self.error = None;
    }

    pub(crate) fn finish(&mut self) {
        self.state = LoadState::Loaded;
        self.loading = false;
    }

    /// Ends a load that failed and hands back the error for the caller.
    pub(crate) fn fail(&mut self, message: &str, err: Error) -> Error {
        self.state = LoadState::Failed;
        self.loading = false;
        self.report(message, err)
    }

    /// Records the banner message of a failed operation. Store failures are
    /// logged with their cause and surface as [`Error::Remote`].
    pub(crate) fn report(&mut self, message: &str, err: Error) -> Error {
        tracing::error!(error = %err, "{}", message);
        self.error = Some(message.to_string());
        if err.is_store_failure() {
            Error::Remote(message.to_string())
        } else {
            err
        }
    }
}
