mod init;
mod query;
mod serve;

pub use init::handle_init;
pub use query::{handle_mutate, handle_query};
pub use serve::handle_serve;

use crate::config::DemoConfig;
use crate::graphql::AppState;
use anyhow::{Context, Result};
use std::path::Path;

/// Common context passed to the command handlers that need a config
pub struct CommandContext {
    pub config: DemoConfig,
    pub state: AppState,
}

impl CommandContext {
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let config = DemoConfig::load_or_default(config_path, &cwd)
            .context("Failed to load gql-demo configuration")?;
        let state = AppState::from_config(&config);
        Ok(Self { config, state })
    }
}
