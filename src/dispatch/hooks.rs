//! Side effects the dispatcher delegates to: reporting unknown commands,
//! reporting failures and removing the message that triggered a command.
//!
//! Stock implementations talk back through [`ChatMessage`]; replace them in
//! [`DispatcherOptions`](super::DispatcherOptions) to change the behavior.

use anyhow::{Error, Result};
use async_trait::async_trait;
use log::{debug, warn};

use super::chat_message::ChatMessage;
use crate::utils::print_err;

#[async_trait]
pub trait UnrecognizedHook<C>: Send + Sync {
    async fn on_unrecognized(&self, ctx: &C) -> Option<String>;
}

#[async_trait]
pub trait ErrorHook<C>: Send + Sync {
    async fn on_error(&self, ctx: &C, error: Error) -> Option<String>;
}

#[async_trait]
pub trait RemoveMessageHook<C>: Send + Sync {
    async fn on_remove_message(&self, ctx: &C) -> Result<()>;
}

/// Replies to the author that the command is not known.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplyUnrecognized;

/// Replies to the author with the error that stopped the command.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplyError;

/// Deletes the message that triggered the command.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteMessage;

pub fn unrecognized_message(ctx: &impl ChatMessage) -> String {
    format!(
        "{}, unrecognized command: {}",
        ctx.author_mention(),
        ctx.content()
    )
}

pub fn error_message(ctx: &impl ChatMessage, error: &Error) -> String {
    format!(
        "{}, error while executing {}: {:#}",
        ctx.author_mention(),
        ctx.content(),
        error
    )
}

async fn reply_and_return(ctx: &impl ChatMessage, content: String) -> Option<String> {
    let _ = ctx.reply(&content).await.inspect_err(print_err);
    Some(content)
}

#[async_trait]
impl<C: ChatMessage> UnrecognizedHook<C> for ReplyUnrecognized {
    async fn on_unrecognized(&self, ctx: &C) -> Option<String> {
        debug!("Unrecognized command from {}: {}", ctx.author(), ctx.content());
        reply_and_return(ctx, unrecognized_message(ctx)).await
    }
}

#[async_trait]
impl<C: ChatMessage> ErrorHook<C> for ReplyError {
    async fn on_error(&self, ctx: &C, error: Error) -> Option<String> {
        warn!("Command {} failed: {:#}", ctx.content(), error);
        reply_and_return(ctx, error_message(ctx, &error)).await
    }
}

#[async_trait]
impl<C: ChatMessage> RemoveMessageHook<C> for DeleteMessage {
    async fn on_remove_message(&self, ctx: &C) -> Result<()> {
        debug!("Removing command message from {}", ctx.author());
        ctx.delete().await
    }
}
