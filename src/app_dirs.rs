//! Resolve configuration, cache, and download directories for `usersearch`.
//!
//! The helpers in this module respect environment overrides while falling back
//! to platform-appropriate locations provided by the `directories` crate.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::{ProjectDirs, UserDirs};

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "usersearch";
const APPLICATION: &str = "usersearch";

const CONFIG_DIR_ENV: &str = "USERSEARCH_CONFIG_DIR";
const DATA_DIR_ENV: &str = "USERSEARCH_DATA_DIR";
const CACHE_DIR_ENV: &str = "USERSEARCH_CACHE_DIR";

/// Return the platform-specific directory layout for the application.
fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .ok_or_else(|| anyhow!("unable to determine project directories for usersearch"))
}

/// Resolve an override directory from an environment variable.
///
/// An empty string is treated the same as an unset value so that callers can
/// use shell defaults without worrying about trailing whitespace.
fn dir_from_env(name: &str) -> Option<PathBuf> {
    let value = env::var_os(name)?;
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

/// Return the configuration directory holding `config.toml`.
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(dir) = dir_from_env(CONFIG_DIR_ENV) {
        return Ok(dir);
    }

    Ok(project_dirs()?.config_local_dir().to_path_buf())
}

/// Return the data directory used when no download directory is configured
/// and the platform has no user download folder.
pub fn get_data_dir() -> Result<PathBuf> {
    if let Some(dir) = dir_from_env(DATA_DIR_ENV) {
        return Ok(dir);
    }

    Ok(project_dirs()?.data_local_dir().to_path_buf())
}

/// Return the cache directory, home of the interactive session log.
pub fn get_cache_dir() -> Result<PathBuf> {
    if let Some(dir) = dir_from_env(CACHE_DIR_ENV) {
        return Ok(dir);
    }

    Ok(project_dirs()?.cache_dir().to_path_buf())
}

/// Default directory downloaded result files are written to.
///
/// Prefers the user's download folder, then the application data directory.
pub fn default_download_dir() -> Result<PathBuf> {
    if let Some(dir) = UserDirs::new().and_then(|dirs| dirs.download_dir().map(PathBuf::from)) {
        return Ok(dir);
    }

    get_data_dir()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_override_is_ignored() {
        // SAFETY: the variable name is unique to this test.
        unsafe { env::set_var("USERSEARCH_TEST_EMPTY_DIR", "") };
        assert!(dir_from_env("USERSEARCH_TEST_EMPTY_DIR").is_none());
    }

    #[test]
    fn populated_override_is_used() {
        // SAFETY: the variable name is unique to this test.
        unsafe { env::set_var("USERSEARCH_TEST_SET_DIR", "/tmp/usersearch") };
        assert_eq!(
            dir_from_env("USERSEARCH_TEST_SET_DIR"),
            Some(PathBuf::from("/tmp/usersearch"))
        );
    }
}
