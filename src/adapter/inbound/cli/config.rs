//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../hedgebook.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your defaults", path.display()));
    output::note(&format!(
        "2. Run: hedgebook solve <scenario.toml> -c {}",
        path.display()
    ));
    Ok(())
}

/// Execute `config show`.
///
/// A missing file is not an error here: the defaults are what the engine
/// would run with.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load_or_default(path)?;
    let settings = config.engine_settings()?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "path": path.display().to_string(),
            "exists": path.exists(),
            "logging": {
                "level": config.logging.level,
                "format": config.logging.format,
            },
            "engine": {
                "houses": settings.house_count,
                "rounding": settings.granularity,
                "max_iterations": settings.policy.max_iterations,
                "epsilon": settings.policy.epsilon,
            },
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Path", path.display());
    if !path.exists() {
        output::note("(file not found, showing defaults)");
    }

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    output::section("Engine");
    output::field("Houses", settings.house_count);
    output::field("Rounding", settings.granularity);
    output::field("Max iterations", settings.policy.max_iterations);
    output::field("Epsilon", settings.policy.epsilon);

    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    output::section("Config Validation");
    output::field("Path", path.display());
    Config::load(path)?;
    output::success("Config file is valid");
    output::field(
        "Next",
        format!("hedgebook config show -c {}", path.display()),
    );

    Ok(())
}
