use std::path::Path;

use anyhow::Context;
use isa_config::IsaConfig;

/// Load layered configuration, reading `.env` from the working directory
/// first. `extra` is the `--config` file, if any.
pub fn load_config(extra: Option<&Path>) -> anyhow::Result<IsaConfig> {
    if let Some(path) = extra {
        if !path.is_file() {
            anyhow::bail!("config file {} does not exist", path.display());
        }
    }
    IsaConfig::load_with_dotenv(extra).context("failed to load isaslice configuration")
}
