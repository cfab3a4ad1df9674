use anyhow::{bail, ensure, Context as _, Result};
use async_trait::async_trait;
use cmdbot::config::Config;
use cmdbot::dispatch::{
    help_text, ChatMessage, CommandDescription, CommandHandler, CommandRegistry, Dispatcher,
    DispatcherOptions,
};
use itertools::Itertools as _;
use log::info;
use rand::Rng as _;

/// A line typed into the console.
pub struct ConsoleMessage {
    author: String,
    content: String,
}

impl ConsoleMessage {
    pub fn new(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            content: content.into(),
        }
    }
}

#[async_trait]
impl ChatMessage for ConsoleMessage {
    fn content(&self) -> &str {
        &self.content
    }

    fn author(&self) -> &str {
        &self.author
    }

    async fn reply(&self, content: &str) -> Result<()> {
        println!("{content}");
        Ok(())
    }

    async fn delete(&self) -> Result<()> {
        info!("Removed message from {}: {}", self.author, self.content);
        Ok(())
    }
}

pub fn make_dispatcher(config: &Config) -> Result<Dispatcher<ConsoleMessage>> {
    let mut commands = CommandRegistry::<ConsoleMessage>::new()
        .with(EchoCommand)?
        .with(RollCommand)?
        .with(FailCommand)?;
    let mut descriptions = commands.supported_commands();
    descriptions.push(CommandDescription {
        keyword: HelpCommand::KEYWORD.into(),
        description: HelpCommand::DESCRIPTION.into(),
    });
    descriptions.sort_by(|a, b| a.keyword.cmp(&b.keyword));
    commands.register(HelpCommand {
        text: help_text(&config.command_prefix, &descriptions),
    })?;
    Ok(Dispatcher::new(
        DispatcherOptions::from_config(config),
        commands,
    ))
}

async fn respond(ctx: &ConsoleMessage, response: String) -> Result<Option<String>> {
    ctx.reply(&response).await?;
    Ok(Some(response))
}

struct HelpCommand {
    text: String,
}

impl HelpCommand {
    const KEYWORD: &'static str = "help";
    const DESCRIPTION: &'static str = "List available commands";
}

#[async_trait]
impl CommandHandler<ConsoleMessage> for HelpCommand {
    fn keyword(&self) -> &str {
        Self::KEYWORD
    }

    fn description(&self) -> &str {
        Self::DESCRIPTION
    }

    async fn execute(&self, ctx: &ConsoleMessage, _args: &[String]) -> Result<Option<String>> {
        respond(ctx, self.text.clone()).await
    }
}

struct EchoCommand;

#[async_trait]
impl CommandHandler<ConsoleMessage> for EchoCommand {
    fn keyword(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Show how arguments were split. E.g. `echo one \"two words\"`"
    }

    async fn execute(&self, ctx: &ConsoleMessage, args: &[String]) -> Result<Option<String>> {
        let response = if args.is_empty() {
            String::from("No arguments.")
        } else {
            args.iter()
                .enumerate()
                .map(|(i, arg)| format!("{}: {}", i + 1, arg))
                .join("\n")
        };
        respond(ctx, response).await
    }
}

struct RollCommand;

impl RollCommand {
    const MAX_SIDES: u32 = 1000;
    const MAX_DICE: u32 = 100;
}

fn parse_count(args: &[String], idx: usize, name: &str, default: u32, max: u32) -> Result<u32> {
    let Some(arg) = args.get(idx) else {
        return Ok(default);
    };
    let value: u32 = arg
        .parse()
        .with_context(|| format!("Incorrect {name}: \"{arg}\""))?;
    ensure!(
        (1..=max).contains(&value),
        "Number of {name} must be between 1 and {max}"
    );
    Ok(value)
}

#[async_trait]
impl CommandHandler<ConsoleMessage> for RollCommand {
    fn keyword(&self) -> &str {
        "roll"
    }

    fn description(&self) -> &str {
        "Roll dice. E.g. `roll 20 2` rolls two twenty-sided dice"
    }

    async fn execute(&self, ctx: &ConsoleMessage, args: &[String]) -> Result<Option<String>> {
        let sides = parse_count(args, 0, "sides", 6, Self::MAX_SIDES)?;
        let dice = parse_count(args, 1, "dice", 1, Self::MAX_DICE)?;
        let rolls: Vec<u32> = {
            let mut rng = rand::thread_rng();
            (0..dice).map(|_| rng.gen_range(1..=sides)).collect()
        };
        let total: u32 = rolls.iter().sum();
        let response = format!(
            "{} rolled {} (total {})",
            ctx.author_mention(),
            rolls.iter().join(", "),
            total
        );
        respond(ctx, response).await
    }
}

struct FailCommand;

#[async_trait]
impl CommandHandler<ConsoleMessage> for FailCommand {
    fn keyword(&self) -> &str {
        "fail"
    }

    fn description(&self) -> &str {
        "Always fails"
    }

    async fn execute(&self, _ctx: &ConsoleMessage, _args: &[String]) -> Result<Option<String>> {
        bail!("This command always fails")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher() -> Dispatcher<ConsoleMessage> {
        make_dispatcher(&Config::default()).unwrap()
    }

    async fn send(dispatcher: &Dispatcher<ConsoleMessage>, line: &str) -> Option<String> {
        dispatcher.on_message(&ConsoleMessage::new("j", line)).await
    }

    #[tokio::test]
    async fn help_lists_all_commands() {
        let help = send(&dispatcher(), "!help").await.unwrap();
        let keywords: Vec<_> = help
            .lines()
            .map(|l| l.split('`').nth(1).unwrap_or_default())
            .collect();
        assert_eq!(keywords, ["!echo", "!fail", "!help", "!roll"]);
    }

    #[tokio::test]
    async fn echo_shows_tokens() {
        let response = send(&dispatcher(), r#"!echo one "two words""#).await;
        assert_eq!(response, Some("1: one\n2: two words".into()));
        let response = send(&dispatcher(), "!echo").await;
        assert_eq!(response, Some("No arguments.".into()));
    }

    #[tokio::test]
    async fn roll_stays_in_range() {
        let dispatcher = dispatcher();
        for _ in 0..100 {
            let response = send(&dispatcher, "!roll 3 1").await.unwrap();
            let total: u32 = response
                .trim_end_matches(')')
                .rsplit(' ')
                .next()
                .unwrap()
                .parse()
                .unwrap();
            assert!((1..=3).contains(&total), "{response}");
        }
    }

    #[tokio::test]
    async fn roll_rejects_bad_arguments() {
        let response = send(&dispatcher(), "!roll lots").await.unwrap();
        assert_eq!(response, "@j, error while executing !roll lots: Incorrect sides: \"lots\": invalid digit found in string");
        let response = send(&dispatcher(), "!roll 6 0").await.unwrap();
        assert!(response.ends_with("Number of dice must be between 1 and 100"));
    }

    #[tokio::test]
    async fn fail_reports_error() {
        let response = send(&dispatcher(), "!fail").await;
        assert_eq!(
            response,
            Some("@j, error while executing !fail: This command always fails".into())
        );
    }

    #[tokio::test]
    async fn plain_text_is_not_answered() {
        assert_eq!(send(&dispatcher(), "hello").await, None);
    }
}
