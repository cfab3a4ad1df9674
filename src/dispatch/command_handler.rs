use std::collections::HashMap;

use anyhow::{bail, Result};
use async_trait::async_trait;

#[async_trait]
pub trait CommandHandler<C>: Send + Sync {
    /// Command name this handler is registered under, without the prefix.
    fn keyword(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    async fn execute(&self, ctx: &C, args: &[String]) -> Result<Option<String>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescription {
    pub keyword: String,
    pub description: String,
}

pub struct CommandRegistry<C> {
    handlers: HashMap<String, Box<dyn CommandHandler<C>>>,
}

impl<C> Default for CommandRegistry<C> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<C> CommandRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: impl CommandHandler<C> + 'static) -> Result<()> {
        self.register_boxed(Box::new(handler))
    }

    pub fn register_boxed(&mut self, handler: Box<dyn CommandHandler<C>>) -> Result<()> {
        let keyword = handler.keyword().to_string();
        if self.handlers.contains_key(&keyword) {
            bail!("Command `{keyword}` is already registered");
        }
        self.handlers.insert(keyword, handler);
        Ok(())
    }

    pub fn with(mut self, handler: impl CommandHandler<C> + 'static) -> Result<Self> {
        self.register(handler)?;
        Ok(self)
    }

    pub fn get(&self, keyword: &str) -> Option<&(dyn CommandHandler<C> + 'static)> {
        self.handlers.get(keyword).map(Box::as_ref)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Descriptions of all registered commands, sorted by keyword.
    pub fn supported_commands(&self) -> Vec<CommandDescription> {
        let mut commands: Vec<_> = self
            .handlers
            .values()
            .map(|h| CommandDescription {
                keyword: h.keyword().to_string(),
                description: h.description().to_string(),
            })
            .collect();
        commands.sort_by(|a, b| a.keyword.cmp(&b.keyword));
        commands
    }
}
