use std::path::PathBuf;

use super::pagination::DEFAULT_PAGE_SIZE;
use super::style::Theme;
use crate::systems::download::DEFAULT_DOWNLOAD_FILE;

/// Prompt shown in front of the query input unless configured otherwise.
pub const DEFAULT_INPUT_TITLE: &str = "Search users";

/// Settings the interactive UI is started with.
#[derive(Debug, Clone)]
pub struct UiConfig {
    pub page_size: u32,
    pub download_dir: PathBuf,
    pub download_file: String,
    pub initial_query: String,
    /// Issue a search for page 1 as soon as the UI starts.
    pub search_on_start: bool,
    pub input_title: String,
    pub theme: Theme,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            download_dir: PathBuf::from("."),
            download_file: DEFAULT_DOWNLOAD_FILE.to_string(),
            initial_query: String::new(),
            search_on_start: false,
            input_title: DEFAULT_INPUT_TITLE.to_string(),
            theme: Theme::default(),
        }
    }
}

impl UiConfig {
    /// Where a download is written.
    #[must_use]
    pub fn download_target(&self) -> PathBuf {
        self.download_dir.join(&self.download_file)
    }
}
