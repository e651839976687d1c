//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use super::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../waterfill.toml.example");

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
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your settings", path.display()));
    output::note(&format!(
        "2. Run: waterfill check config -c {}",
        path.display()
    ));
    output::note(&format!(
        "3. Run: waterfill solve -c {} --floors 0.8,1.0,1.2",
        path.display()
    ));
    Ok(())
}

/// Execute `config show`.
///
/// A missing file shows the built-in defaults.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load_or_default(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "config": config,
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field(
        "Source",
        if path.exists() {
            path.display().to_string()
        } else {
            output::muted("(defaults)")
        },
    );

    output::section("Solver");
    output::field("Backend", config.solver.backend.as_str());
    output::field("Tolerance", format!("{:e}", config.solver.tolerance));
    output::field("Iterations", config.solver.max_iterations);
    output::field("Verbose", config.solver.verbose);

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_is_a_valid_config() {
        let config = Config::parse_toml(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.solver.max_iterations, 200);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("waterfill.toml");
        fs::write(&path, "").unwrap();

        let result = execute_init(&path, false);

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }
}
