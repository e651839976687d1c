//! Handler for the `check` command group.

use std::path::Path;

use serde_json::json;

use super::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Validate configuration file without solving anything.
pub fn execute_config(path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "check.config",
            "valid": true,
            "path": path.display().to_string(),
            "backend": config.solver.backend.as_str(),
        }));
        return Ok(());
    }

    output::section("Configuration");
    output::field("Path", path.display());
    output::success("Configuration file is valid");
    output::field("Backend", config.solver.backend.as_str());
    output::field("Tolerance", format!("{:e}", config.solver.tolerance));
    output::field("Iterations", config.solver.max_iterations);
    output::field("Log level", &config.logging.level);
    Ok(())
}
