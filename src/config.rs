use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Text that marks a message as a command. Matched literally.
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,

    /// Delete the triggering message before running a recognized command.
    #[serde(default = "default_remove_command_messages")]
    pub remove_command_messages: bool,

    /// Author name the console uses for typed messages.
    #[serde(default = "default_console_username")]
    pub console_username: String,
}

fn default_command_prefix() -> String {
    crate::dispatch::DEFAULT_COMMAND_PREFIX.into()
}

fn default_remove_command_messages() -> bool {
    true
}

fn default_console_username() -> String {
    "console".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            command_prefix: default_command_prefix(),
            remove_command_messages: default_remove_command_messages(),
            console_username: default_console_username(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.command_prefix.is_empty(),
            "commandPrefix must not be empty"
        );
        Ok(())
    }
}
