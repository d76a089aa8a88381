//! Entry points for loading configuration.

use crate::config::merge::merge_policy::builder_with_defaults;
use crate::config::sources::{env, global_file, workspace_file};
use crate::config::SitegenConfig;
use crate::error::ApiError;
use config::File;
use std::path::Path;
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the full layered configuration for `workspace_root`.
    pub fn load(workspace_root: &Path) -> Result<SitegenConfig, ApiError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = env::add_to_builder(builder);
        let config: SitegenConfig = builder.build()?.try_deserialize()?;
        debug!(
            workspace = %workspace_root.display(),
            provider = config.provider.provider_type.as_str(),
            model = %config.provider.model,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Load a single explicit file on top of the defaults. Environment overrides still apply.
    pub fn load_from_file(path: &Path) -> Result<SitegenConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = builder_with_defaults()?.add_source(File::from(path).required(true));
        let builder = env::add_to_builder(builder);
        Ok(builder.build()?.try_deserialize()?)
    }
}
