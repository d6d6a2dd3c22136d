mod cli;
mod settings;
mod workflow;

use anyhow::{Context, Result};
use cli::{
    CliArgs, OutputFormat, parse_cli, print_download, print_json, print_plain, print_themes,
};
use usersearch::app_dirs;
use usersearch::logging::{self, LOG_FILE_NAME, LogTarget};
use workflow::SearchWorkflow;

fn main() -> Result<()> {
    let cli = parse_cli();

    if cli.list_themes {
        print_themes();
        return Ok(());
    }

    logging::initialize(cli.verbose, &log_target(&cli)?)?;

    let resolved = settings::load(&cli)?;

    if cli.print_config {
        resolved.print_summary();
    }

    let workflow = SearchWorkflow::from_config(resolved)?;

    if cli.download {
        let saved = workflow.download()?;
        return print_download(&saved, cli.output);
    }

    if cli.print {
        let page = workflow.print_page(cli.page)?;
        return match cli.output {
            OutputFormat::Plain => {
                print_plain(&page);
                Ok(())
            }
            OutputFormat::Json => print_json(&page),
        };
    }

    workflow.run()?;
    Ok(())
}

/// Headless runs log to stderr; the interactive UI owns the terminal and logs to a file.
fn log_target(cli: &CliArgs) -> Result<LogTarget> {
    if cli.is_headless() {
        return Ok(LogTarget::Stderr);
    }

    let path = match &cli.log_file {
        Some(path) => path.clone(),
        None => app_dirs::get_cache_dir()
            .context("failed to locate the cache directory for the session log")?
            .join(LOG_FILE_NAME),
    };
    Ok(LogTarget::File(path))
}
