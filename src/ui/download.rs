use tracing::{info, warn};
use usersearch_api::DownloadRequest;

use super::App;
use super::state::StatusMessage;
use crate::systems::download::{DownloadError, SavedDownload};
use crate::systems::requests::RequestCommand;

/// Resting label of the download control.
pub const DOWNLOAD_LABEL: &str = "Download Filtered Results";

/// Label while a download is running.
pub const DOWNLOADING_LABEL: &str = "Downloading...";

/// The download trigger: disabled with a busy label while a download runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadControl {
    enabled: bool,
    label: &'static str,
}

impl Default for DownloadControl {
    fn default() -> Self {
        Self {
            enabled: true,
            label: DOWNLOAD_LABEL,
        }
    }
}

impl DownloadControl {
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    fn begin(&mut self) {
        self.enabled = false;
        self.label = DOWNLOADING_LABEL;
    }

    pub(crate) fn restore(&mut self) {
        *self = Self::default();
    }
}

impl App<'_> {
    /// Download every result matching the current query to the configured file.
    ///
    /// Ignored while the control is disabled by a running download.
    pub fn perform_download(&mut self) {
        if !self.download_control.is_enabled() {
            return;
        }
        self.download_control.begin();

        let request = DownloadRequest::new(self.query());
        let target = self.config.download_target();
        info!(target = %target.display(), "download issued");
        self.downloads.issue(|id| RequestCommand::Download {
            id,
            request,
            target,
        });
    }

    pub(super) fn handle_download_response(
        &mut self,
        id: u64,
        outcome: Result<SavedDownload, DownloadError>,
    ) {
        if !self.downloads.matches_latest(id) {
            return;
        }
        self.downloads.record_completion();
        self.download_control.restore();

        match outcome {
            Ok(saved) => {
                self.status = Some(StatusMessage::info(format!(
                    "Saved {} bytes to {}.",
                    saved.bytes,
                    saved.path.display()
                )));
            }
            Err(err) => {
                warn!(id, error = %err, "download failed");
                self.status = Some(StatusMessage::error(format!("Download failed: {err}")));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use super::*;
    use crate::testing::StaticBackend;
    use crate::ui::UiConfig;
    use crate::ui::state::tests::{app_with, wait_for_idle};

    fn config_in(dir: &std::path::Path) -> UiConfig {
        UiConfig {
            download_dir: dir.to_path_buf(),
            ..UiConfig::default()
        }
    }

    #[test]
    fn download_disables_control_until_finished() {
        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(StaticBackend::with_users(20));
        let mut app = app_with(backend.clone(), config_in(dir.path()));
        app.query_input = crate::ui::input::QueryInput::new("user1");

        app.perform_download();
        assert!(!app.download_control().is_enabled());
        assert_eq!(app.download_control().label(), DOWNLOADING_LABEL);

        // A second trigger while disabled is ignored.
        app.perform_download();
        wait_for_idle(&mut app);

        assert!(app.download_control().is_enabled());
        assert_eq!(app.download_control().label(), DOWNLOAD_LABEL);
        assert_eq!(backend.downloads.lock().unwrap().len(), 1);
        assert_eq!(
            backend.downloads.lock().unwrap()[0],
            DownloadRequest::new("user1")
        );

        let target = dir.path().join("user_results.json");
        let written = fs::read_to_string(&target).unwrap();
        // user1 and user10..user19
        assert_eq!(written.lines().count(), 11);

        let status = app.status().unwrap();
        assert!(!status.is_error());
        assert!(status.text.starts_with(&format!("Saved {} bytes to ", written.len())));
    }

    #[test]
    fn failed_download_restores_control_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(Arc::new(StaticBackend::failing()), config_in(dir.path()));

        app.perform_download();
        wait_for_idle(&mut app);

        assert!(app.download_control().is_enabled());
        assert_eq!(app.download_control().label(), DOWNLOAD_LABEL);
        let status = app.status().unwrap();
        assert!(status.is_error());
        assert!(status.text.starts_with("Download failed:"));
        assert!(!dir.path().join("user_results.json").exists());
    }

    #[test]
    fn download_ignores_current_page() {
        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(StaticBackend::with_users(42));
        let mut app = app_with(backend.clone(), config_in(dir.path()));

        app.perform_search(1);
        wait_for_idle(&mut app);
        app.next_page();
        wait_for_idle(&mut app);
        app.perform_download();
        wait_for_idle(&mut app);

        let written = fs::read_to_string(dir.path().join("user_results.json")).unwrap();
        assert_eq!(written.lines().count(), 42);
        assert_eq!(app.pagination().current_page(), 2);
    }

    #[test]
    fn custom_file_name_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let config = UiConfig {
            download_file: "export.jsonl".into(),
            ..config_in(dir.path())
        };
        let mut app = app_with(Arc::new(StaticBackend::with_users(2)), config);

        app.perform_download();
        wait_for_idle(&mut app);

        assert!(dir.path().join("export.jsonl").exists());
    }
}
