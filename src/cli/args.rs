use std::fmt::Write;
use std::path::PathBuf;

use clap::{
    ArgAction, ColorChoice, Parser, ValueEnum,
    builder::{
        BoolishValueParser, Styles,
        styling::{AnsiColor, Effects},
    },
};
use usersearch::app_dirs;

/// Produce the full version banner including config and cache directories.
fn long_version() -> &'static str {
    let config_dir = match app_dirs::get_config_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };
    let cache_dir = match app_dirs::get_cache_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };

    let mut details = format!("usersearch {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(details);
    let _ = writeln!(details, "config directory: {config_dir}");
    let _ = writeln!(details, "cache directory: {cache_dir}");

    Box::leak(details.into_boxed_str())
}

/// Create the clap styles used for custom colour output.
fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into the strongly typed [`CliArgs`] structure.
pub(crate) fn parse_cli() -> CliArgs {
    CliArgs::parse()
}

#[derive(Parser, Debug)]
#[command(
    name = "usersearch",
    version,
    long_version = long_version(),
    about = "Search, page through and download user records from a search backend",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
/// Command-line arguments accepted by the `usersearch` binary.
pub(crate) struct CliArgs {
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "USERSEARCH_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        short = 'b',
        long = "base-url",
        value_name = "URL",
        help = "Base URL of the search backend (default: http://127.0.0.1:8001)"
    )]
    pub(crate) base_url: Option<String>,
    #[arg(
        long = "timeout-secs",
        value_name = "SECS",
        help = "Request timeout in seconds (default: 30)"
    )]
    pub(crate) timeout_secs: Option<u64>,
    #[arg(
        long = "page-size",
        value_name = "NUM",
        help = "Results per page, must match the backend (default: 15)"
    )]
    pub(crate) page_size: Option<u32>,
    #[arg(
        short = 'd',
        long = "download-dir",
        value_name = "DIR",
        help = "Directory downloads are written to (default: the user download folder)"
    )]
    pub(crate) download_dir: Option<PathBuf>,
    #[arg(
        long = "download-file",
        value_name = "NAME",
        help = "File name for downloads (default: user_results.json)"
    )]
    pub(crate) download_file: Option<String>,
    #[arg(
        short = 'q',
        long = "query",
        value_name = "QUERY",
        help = "Provide an initial search query (default: empty)"
    )]
    pub(crate) query: Option<String>,
    #[arg(
        short = 's',
        long = "search-on-start",
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
        help = "Search for the first page as soon as the UI opens (default: disabled)"
    )]
    pub(crate) search_on_start: Option<bool>,
    #[arg(
        short = 't',
        long,
        value_name = "TITLE",
        help = "Set the input prompt title (default: Search users)"
    )]
    pub(crate) title: Option<String>,
    #[arg(
        long,
        value_name = "THEME",
        help = "Select a theme by name (default: slate)"
    )]
    pub(crate) theme: Option<String>,
    #[arg(
        short = 'p',
        long = "print-config",
        help = "Print the resolved configuration before running (default: disabled)"
    )]
    pub(crate) print_config: bool,
    #[arg(
        short = 'l',
        long = "list-themes",
        help = "List supported themes and exit (default: disabled)"
    )]
    pub(crate) list_themes: bool,
    #[arg(
        long = "print",
        conflicts_with = "download",
        help = "Search once and print the page instead of opening the UI (default: disabled)"
    )]
    pub(crate) print: bool,
    #[arg(
        long = "page",
        value_name = "NUM",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Page to print with --print"
    )]
    pub(crate) page: u32,
    #[arg(
        long = "download",
        help = "Download every result for the query and exit (default: disabled)"
    )]
    pub(crate) download: bool,
    #[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Plain, help = "Choose how to print results")]
    pub(crate) output: OutputFormat,
    #[arg(
        short = 'v',
        long,
        help = "Log debug events unless RUST_LOG says otherwise (default: disabled)"
    )]
    pub(crate) verbose: bool,
    #[arg(
        long = "log-file",
        value_name = "FILE",
        help = "Write the interactive session log here (default: usersearch.log in the cache directory)"
    )]
    pub(crate) log_file: Option<PathBuf>,
}

impl CliArgs {
    /// Whether this invocation runs without the interactive UI.
    pub(crate) fn is_headless(&self) -> bool {
        self.print || self.download
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
/// Output formats supported by the CLI utility.
pub(crate) enum OutputFormat {
    Plain,
    Json,
}
