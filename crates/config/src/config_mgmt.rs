//! Whole-config save/reload handlers ('config save', 'config reload').
//!
//! Both wrap `sonic-cfggen` as a subprocess; the CLI exits with the
//! subprocess return code on failure. In unit-testing mode the subprocess
//! is never spawned.

use std::fs;
use std::io::{self, Write};

use tracing::info;

use sonic_utils_common::env;
use sonic_utils_common::error::{CliError, CliResult};
use sonic_utils_common::shell::{self, shellquote, SONIC_CFGGEN_CMD};

/// Default CONFIG_DB dump file.
pub const DEFAULT_CONFIG_DB_FILE: &str = "/etc/sonic/config_db.json";

/// Prompts the operator for a yes/no confirmation on stdin.
fn confirm(prompt: &str) -> CliResult<bool> {
    print!("{} [y/N]: ", prompt);
    io::stdout()
        .flush()
        .map_err(|e| CliError::user_error(format!("Failed to write prompt: {}", e)))?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .map_err(|e| CliError::user_error(format!("Failed to read input: {}", e)))?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Saves the running configuration to a file.
pub async fn save(yes: bool, filename: Option<&str>) -> CliResult<()> {
    let filename = filename.unwrap_or(DEFAULT_CONFIG_DB_FILE);
    if !yes
        && !confirm(&format!(
            "Existing file {} will be overwritten, continue?",
            filename
        ))?
    {
        return Err(CliError::Aborted);
    }

    let cmd = format!(
        "{} -d --print-data > {}",
        SONIC_CFGGEN_CMD,
        shellquote(filename)
    );
    if env::unit_testing_mode() {
        info!(command = %cmd, "Unit-testing mode; skipping subprocess");
        return Ok(());
    }
    shell::exec_or_throw(&cmd).await?;
    Ok(())
}

/// Clears the current configuration and loads a saved dump file.
///
/// The file is validated as JSON before anything is executed.
pub async fn reload(yes: bool, filename: Option<&str>) -> CliResult<()> {
    let filename = filename.unwrap_or(DEFAULT_CONFIG_DB_FILE);

    let contents = fs::read_to_string(filename).map_err(|e| {
        CliError::user_error(format!("Cannot read config file {}: {}", filename, e))
    })?;
    serde_json::from_str::<serde_json::Value>(&contents).map_err(|e| {
        CliError::user_error(format!("{} is not valid JSON: {}", filename, e))
    })?;

    if !yes
        && !confirm(&format!(
            "Clear current config and reload config from the file {}?",
            filename
        ))?
    {
        return Err(CliError::Aborted);
    }

    let cmd = format!(
        "{} -j {} --write-to-db",
        SONIC_CFGGEN_CMD,
        shellquote(filename)
    );
    if env::unit_testing_mode() {
        info!(command = %cmd, "Unit-testing mode; skipping subprocess");
        return Ok(());
    }
    shell::exec_or_throw(&cmd).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn test_save_skips_subprocess_in_unit_testing_mode() {
        std::env::set_var(env::UNIT_TESTING_ENV, "1");
        save(true, Some("/tmp/nonexistent-dir/out.json"))
            .await
            .unwrap();
        std::env::remove_var(env::UNIT_TESTING_ENV);
    }

    #[tokio::test]
    #[serial]
    async fn test_reload_validates_json_before_running() {
        std::env::set_var(env::UNIT_TESTING_ENV, "1");

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        writeln!(bad, "not json at all").unwrap();
        bad.flush().unwrap();
        let err = reload(true, bad.path().to_str()).await.unwrap_err();
        assert!(err.is_user_error());
        assert!(err.to_string().contains("not valid JSON"));

        let mut good = tempfile::NamedTempFile::new().unwrap();
        writeln!(good, "{{\"PORTCHANNEL\": {{}}}}").unwrap();
        good.flush().unwrap();
        reload(true, good.path().to_str()).await.unwrap();

        std::env::remove_var(env::UNIT_TESTING_ENV);
    }

    #[tokio::test]
    #[serial]
    async fn test_reload_missing_file_is_user_error() {
        let err = reload(true, Some("/nonexistent/config_db.json"))
            .await
            .unwrap_err();
        assert!(err.is_user_error());
    }
}
