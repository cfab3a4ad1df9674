use std::sync::Arc;

use anyhow::{Context as _, Result};
use cmdbot_parser::{CommandParser, ParseResult};
use itertools::Itertools as _;
use log::{debug, info};

use crate::config::Config;

mod chat_message;
mod command_handler;
mod hooks;

pub use chat_message::ChatMessage;
pub use command_handler::{CommandDescription, CommandHandler, CommandRegistry};
pub use hooks::{
    error_message, unrecognized_message, DeleteMessage, ErrorHook, RemoveMessageHook,
    ReplyError, ReplyUnrecognized, UnrecognizedHook,
};

pub const DEFAULT_COMMAND_PREFIX: &str = "!";

pub struct DispatcherOptions<C> {
    pub command_prefix: String,

    /// Remove the triggering message before running a recognized command.
    pub remove_command_messages: bool,

    pub on_error: Arc<dyn ErrorHook<C>>,
    pub on_remove_message: Arc<dyn RemoveMessageHook<C>>,
    pub on_unrecognized: Arc<dyn UnrecognizedHook<C>>,
}

impl<C: ChatMessage> Default for DispatcherOptions<C> {
    fn default() -> Self {
        Self {
            command_prefix: DEFAULT_COMMAND_PREFIX.into(),
            remove_command_messages: true,
            on_error: Arc::new(ReplyError),
            on_remove_message: Arc::new(DeleteMessage),
            on_unrecognized: Arc::new(ReplyUnrecognized),
        }
    }
}

impl<C: ChatMessage> DispatcherOptions<C> {
    pub fn from_config(config: &Config) -> Self {
        Self {
            command_prefix: config.command_prefix.clone(),
            remove_command_messages: config.remove_command_messages,
            ..Self::default()
        }
    }
}

impl<C> DispatcherOptions<C> {
    pub fn with_command_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.command_prefix = prefix.into();
        self
    }

    pub fn with_remove_command_messages(mut self, remove: bool) -> Self {
        self.remove_command_messages = remove;
        self
    }

    pub fn with_on_error(mut self, hook: impl ErrorHook<C> + 'static) -> Self {
        self.on_error = Arc::new(hook);
        self
    }

    pub fn with_on_remove_message(mut self, hook: impl RemoveMessageHook<C> + 'static) -> Self {
        self.on_remove_message = Arc::new(hook);
        self
    }

    pub fn with_on_unrecognized(mut self, hook: impl UnrecognizedHook<C> + 'static) -> Self {
        self.on_unrecognized = Arc::new(hook);
        self
    }
}

/// Routes prefixed messages to registered command handlers.
///
/// For a single message at most one handler runs. When message removal is
/// enabled it is awaited before the handler, and a removal failure skips the
/// handler. Failures of either step end up in the error hook, whose result
/// becomes the result of [`Dispatcher::on_message`].
pub struct Dispatcher<C> {
    parser: CommandParser,
    commands: CommandRegistry<C>,
    options: DispatcherOptions<C>,
}

impl<C: ChatMessage> Dispatcher<C> {
    pub fn new(options: DispatcherOptions<C>, commands: CommandRegistry<C>) -> Self {
        Self {
            parser: CommandParser::new(options.command_prefix.clone()),
            commands,
            options,
        }
    }

    pub fn prefix(&self) -> &str {
        self.parser.prefix()
    }

    /// Returns `None` for messages that are not commands; no hook runs then.
    pub async fn on_message(&self, ctx: &C) -> Option<String> {
        // Don't answer bots, including ourselves
        if ctx.is_from_bot() {
            return None;
        }
        let ParseResult::Command(command) = self.parser.parse(ctx.content()) else {
            return None;
        };
        debug!(
            "Received command from {}: {}, args: {:?}",
            ctx.author(),
            command.name,
            command.args
        );

        let Some(handler) = self.commands.get(&command.name) else {
            info!("Unrecognized command: {}", command.name);
            return self.options.on_unrecognized.on_unrecognized(ctx).await;
        };

        match self.execute(handler, ctx, &command.args).await {
            Ok(response) => response,
            Err(e) => self.options.on_error.on_error(ctx, e).await,
        }
    }

    async fn execute(
        &self,
        handler: &dyn CommandHandler<C>,
        ctx: &C,
        args: &[String],
    ) -> Result<Option<String>> {
        if self.options.remove_command_messages {
            self.options
                .on_remove_message
                .on_remove_message(ctx)
                .await
                .context("Failed to remove command message")?;
        }
        handler.execute(ctx, args).await
    }

    pub fn supported_commands(&self) -> Vec<CommandDescription> {
        self.commands.supported_commands()
    }

    pub fn help_text(&self) -> String {
        help_text(self.prefix(), &self.supported_commands())
    }
}

pub fn help_text(prefix: &str, commands: &[CommandDescription]) -> String {
    commands
        .iter()
        .map(|c| format!(" - `{}{}` {}", prefix, c.keyword, c.description))
        .join("\n")
}
