use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail, ensure};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use usersearch::ui::style;
use usersearch::{DEFAULT_DOWNLOAD_FILE, DEFAULT_PAGE_SIZE, UiConfig, app_dirs};
use usersearch_api::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, parse_base_url};

use crate::cli::CliArgs;

const DEFAULT_THEME: &str = "slate";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    backend: BackendSection,
    ui: UiSection,
    download: DownloadSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct BackendSection {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct UiSection {
    page_size: Option<u32>,
    initial_query: Option<String>,
    search_on_start: Option<bool>,
    input_title: Option<String>,
    theme: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct DownloadSection {
    dir: Option<PathBuf>,
    file: Option<String>,
}

pub struct ResolvedConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub theme_name: String,
    pub ui: UiConfig,
}

impl ResolvedConfig {
    pub fn print_summary(&self) {
        println!("Effective configuration:");
        println!("  Backend: {}", self.base_url);
        println!("  Timeout: {}s", self.timeout.as_secs());
        println!("  Page size: {}", self.ui.page_size);
        println!("  Download target: {}", self.ui.download_target().display());
        println!("  UI theme: {}", self.theme_name);
        println!("  Prompt title: {}", self.ui.input_title);
        if !self.ui.initial_query.is_empty() {
            println!("  Initial query: {}", self.ui.initial_query);
        }
        println!(
            "  Search on start: {}",
            bool_to_word(self.ui.search_on_start)
        );
    }
}

pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
    load_with_env(cli, environment())
}

fn load_with_env(cli: &CliArgs, env: Environment) -> Result<ResolvedConfig> {
    let builder = build_config(cli, env)?;
    let mut raw: RawConfig = builder
        .try_deserialize()
        .map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
    raw.apply_cli_overrides(cli);
    raw.resolve()
}

fn environment() -> Environment {
    Environment::with_prefix("usersearch")
        .separator("__")
        .try_parsing(true)
}

fn build_config(cli: &CliArgs, env: Environment) -> Result<Config> {
    let mut builder = Config::builder();

    if !cli.no_config {
        for path in default_config_files() {
            builder = builder.add_source(File::from(path).required(false));
        }
    }

    for path in &cli.config {
        builder = builder.add_source(File::from(path.clone()).required(true));
    }

    builder = builder.add_source(env);

    builder.build().map_err(|err| match err {
        ConfigError::Frozen => anyhow!("configuration builder is frozen"),
        other => other.into(),
    })
}

fn default_config_files() -> Vec<PathBuf> {
    let mut files = Vec::new();

    if let Ok(dir) = app_dirs::get_config_dir() {
        files.push(dir.join("config.toml"));
    }

    if let Ok(current_dir) = env::current_dir() {
        files.push(current_dir.join("usersearch.toml"));
    }

    files
}

impl RawConfig {
    fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(url) = cli.base_url.clone() {
            self.backend.base_url = Some(url);
        }
        if let Some(secs) = cli.timeout_secs {
            self.backend.timeout_secs = Some(secs);
        }

        if let Some(size) = cli.page_size {
            self.ui.page_size = Some(size);
        }
        if let Some(query) = cli.query.clone() {
            self.ui.initial_query = Some(query);
        }
        if let Some(value) = cli.search_on_start {
            self.ui.search_on_start = Some(value);
        }
        if let Some(title) = cli.title.clone() {
            self.ui.input_title = Some(title);
        }
        if let Some(theme) = cli.theme.clone() {
            self.ui.theme = Some(theme);
        }

        if let Some(dir) = cli.download_dir.clone() {
            self.download.dir = Some(dir);
        }
        if let Some(file) = cli.download_file.clone() {
            self.download.file = Some(file);
        }
    }

    fn resolve(self) -> Result<ResolvedConfig> {
        let base_url = self
            .backend
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        parse_base_url(&base_url).context("invalid backend base URL")?;

        let timeout = match self.backend.timeout_secs {
            Some(secs) => {
                ensure!(secs >= 1, "request timeout must be at least 1 second");
                Duration::from_secs(secs)
            }
            None => DEFAULT_TIMEOUT,
        };

        let page_size = self.ui.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        ensure!(page_size >= 1, "page size must be at least 1");

        let theme_name = self
            .ui
            .theme
            .map(|name| name.trim().to_string())
            .unwrap_or_else(|| DEFAULT_THEME.to_string());
        let Some(theme) = style::by_name(&theme_name) else {
            let known: Vec<&str> = style::names().collect();
            bail!("unknown theme '{theme_name}' (available: {})", known.join(", "));
        };

        let download_file = self
            .download
            .file
            .unwrap_or_else(|| DEFAULT_DOWNLOAD_FILE.to_string());
        validate_file_name(&download_file)?;

        let download_dir = match self.download.dir {
            Some(dir) => dir,
            None => app_dirs::default_download_dir()
                .context("failed to determine a download directory")?,
        };

        let input_title = self
            .ui
            .input_title
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| UiConfig::default().input_title);

        let ui = UiConfig {
            page_size,
            download_dir,
            download_file,
            initial_query: self.ui.initial_query.unwrap_or_default(),
            search_on_start: self.ui.search_on_start.unwrap_or(false),
            input_title,
            theme,
        };

        Ok(ResolvedConfig {
            base_url,
            timeout,
            theme_name,
            ui,
        })
    }
}

fn validate_file_name(name: &str) -> Result<()> {
    ensure!(!name.trim().is_empty(), "download file name must not be empty");
    ensure!(
        !name.contains(['/', '\\']) && name != "." && name != "..",
        "download file name '{name}' must not contain path separators"
    );
    Ok(())
}

fn bool_to_word(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;
    use config::Map;
    use tempfile::tempdir;

    use super::*;

    fn cli(args: &[&str]) -> CliArgs {
        let mut full = vec!["usersearch", "--no-config", "--download-dir", "/tmp/usersearch-dl"];
        full.extend_from_slice(args);
        CliArgs::try_parse_from(full).expect("parses")
    }

    fn no_env() -> Environment {
        environment().source(Some(Map::new()))
    }

    fn env_with(pairs: &[(&str, &str)]) -> Environment {
        let map = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        environment().source(Some(map))
    }

    #[test]
    fn defaults_resolve_without_any_source() {
        let resolved = load_with_env(&cli(&[]), no_env()).unwrap();
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.timeout, DEFAULT_TIMEOUT);
        assert_eq!(resolved.theme_name, "slate");
        assert_eq!(resolved.ui.page_size, 15);
        assert_eq!(resolved.ui.download_file, "user_results.json");
        assert_eq!(
            resolved.ui.download_target(),
            PathBuf::from("/tmp/usersearch-dl/user_results.json")
        );
        assert!(!resolved.ui.search_on_start);
    }

    #[test]
    fn file_then_env_then_cli_take_precedence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("usersearch.toml");
        fs::write(
            &path,
            r#"
[backend]
base_url = "http://file.example:9000"
timeout_secs = 5

[ui]
page_size = 20
initial_query = "from-file"
theme = "paper"

[download]
file = "file.json"
"#,
        )
        .unwrap();
        let path = path.to_string_lossy().into_owned();

        let args = cli(&["-c", &path, "-q", "from-cli"]);
        let env = env_with(&[
            ("USERSEARCH__BACKEND__TIMEOUT_SECS", "9"),
            ("USERSEARCH__UI__INITIAL_QUERY", "from-env"),
        ]);
        let resolved = load_with_env(&args, env).unwrap();

        assert_eq!(resolved.base_url, "http://file.example:9000");
        assert_eq!(resolved.timeout, Duration::from_secs(9));
        assert_eq!(resolved.ui.page_size, 20);
        assert_eq!(resolved.ui.initial_query, "from-cli");
        assert_eq!(resolved.theme_name, "paper");
        assert_eq!(resolved.ui.download_file, "file.json");
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let args = cli(&["-c", "/definitely/not/here.toml"]);
        assert!(load_with_env(&args, no_env()).is_err());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let cases: [&[&str]; 8] = [
            &["--page-size", "0"],
            &["--timeout-secs", "0"],
            &["--base-url", "ftp://example.com"],
            &["--base-url", "not a url"],
            &["--download-file", ""],
            &["--download-file", "nested/out.json"],
            &["--download-file", ".."],
            &["--theme", "neon"],
        ];
        for args in cases {
            assert!(
                load_with_env(&cli(args), no_env()).is_err(),
                "expected {args:?} to be rejected"
            );
        }
    }

    #[test]
    fn theme_aliases_and_search_on_start_resolve() {
        let resolved = load_with_env(&cli(&["--theme", "light", "-s"]), no_env()).unwrap();
        assert_eq!(resolved.theme_name, "light");
        assert_eq!(resolved.ui.theme, style::by_name("paper").unwrap());
        assert!(resolved.ui.search_on_start);
    }

    #[test]
    fn blank_title_falls_back_to_default() {
        let resolved = load_with_env(&cli(&["-t", "  "]), no_env()).unwrap();
        assert_eq!(resolved.ui.input_title, usersearch::ui::DEFAULT_INPUT_TITLE);
    }
}
