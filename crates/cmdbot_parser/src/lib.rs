use log::trace;

mod tokenizer;

pub use tokenizer::tokenize_args;

/// Command name and its arguments, in order of appearance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Command {
    pub name: String,
    pub args: Vec<String>,
}

impl Command {
    pub fn new(name: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseResult<'a> {
    /// Input did not start with the prefix. Carries the input untouched.
    NotACommand(&'a str),
    Command(Command),
}

impl<'a> ParseResult<'a> {
    pub fn is_command(&self) -> bool {
        matches!(self, ParseResult::Command(_))
    }

    pub fn command(&self) -> Option<&Command> {
        match self {
            ParseResult::Command(command) => Some(command),
            ParseResult::NotACommand(_) => None,
        }
    }

    pub fn into_command(self) -> Option<Command> {
        match self {
            ParseResult::Command(command) => Some(command),
            ParseResult::NotACommand(_) => None,
        }
    }
}

/// Recognizes commands starting with a fixed prefix.
///
/// The prefix is matched literally at the start of the input, it is never
/// interpreted as a pattern. Everything after it is split into a command name
/// (the leading run of word characters) and arguments (see [`tokenize_args`]).
///
/// When the prefix is followed by something other than a word character, the
/// input is still a command, only with an empty name:
///
/// ```
/// use cmdbot_parser::{Command, CommandParser, ParseResult};
///
/// let parser = CommandParser::new("!");
/// assert_eq!(
///     parser.parse("! a b"),
///     ParseResult::Command(Command::new("", ["a", "b"]))
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandParser {
    prefix: String,
}

impl CommandParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn parse<'a>(&self, input: &'a str) -> ParseResult<'a> {
        let Some(body) = input.strip_prefix(self.prefix.as_str()) else {
            return ParseResult::NotACommand(input);
        };
        let (name, rest) = split_command_name(body);
        let command = Command {
            name: name.to_string(),
            args: tokenize_args(rest),
        };
        trace!("Parsed command: {:?}", command);
        ParseResult::Command(command)
    }
}

pub fn make_command_parser(prefix: impl Into<String>) -> CommandParser {
    CommandParser::new(prefix)
}

pub fn parse_command<'a>(prefix: &str, input: &'a str) -> ParseResult<'a> {
    CommandParser::new(prefix).parse(input)
}

pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn split_command_name(body: &str) -> (&str, &str) {
    let end = body
        .find(|c: char| !is_word_char(c))
        .unwrap_or(body.len());
    body.split_at(end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(name: &str, args: &[&str]) -> ParseResult<'static> {
        ParseResult::Command(Command::new(name, args.iter().copied()))
    }

    #[test]
    fn plain_text_is_returned_unchanged() {
        let parser = CommandParser::new("!");
        for text in ["Hello, world!", "", " !cmd", "cmd arg", "?cmd"] {
            assert_eq!(parser.parse(text), ParseResult::NotACommand(text));
        }
    }

    #[test]
    fn single_char_prefix() {
        let parser = make_command_parser("!");
        assert_eq!(
            parser.parse("!cmd arg1 arg2"),
            command("cmd", &["arg1", "arg2"])
        );
    }

    #[test]
    fn multi_char_prefix() {
        let parser = make_command_parser("!!");
        assert_eq!(
            parser.parse("!!cmd arg1 arg2"),
            command("cmd", &["arg1", "arg2"])
        );
    }

    #[test]
    fn partial_prefix_is_not_a_command() {
        let parser = make_command_parser("!!");
        assert_eq!(
            parser.parse("!Hello, world!"),
            ParseResult::NotACommand("!Hello, world!")
        );
    }

    #[test]
    fn prefix_is_literal_not_a_pattern() {
        let parser = CommandParser::new(".*");
        assert_eq!(parser.parse(".*cmd x"), command("cmd", &["x"]));
        assert_eq!(parser.parse("abc"), ParseResult::NotACommand("abc"));
    }

    #[test]
    fn quoted_argument_is_kept_whole() {
        let parser = CommandParser::new("!");
        assert_eq!(
            parser.parse(r#"!cmd arg1 arg2 "arg3 & arg4""#),
            command("cmd", &["arg1", "arg2", "arg3 & arg4"])
        );
    }

    #[test]
    fn no_arguments() {
        let parser = CommandParser::new("!");
        assert_eq!(parser.parse("!cmd"), command("cmd", &[]));
        assert_eq!(parser.parse("!cmd    "), command("cmd", &[]));
    }

    #[test]
    fn command_name_is_leading_word_run() {
        let parser = CommandParser::new("!");
        assert_eq!(parser.parse("!cmd_2x"), command("cmd_2x", &[]));
        assert_eq!(parser.parse("!cmd-foo bar"), command("cmd", &["-foo", "bar"]));
        assert_eq!(parser.parse(r#"!cmd"a b""#), command("cmd", &["a b"]));
    }

    #[test]
    fn prefix_without_command_name_gives_empty_name() {
        let parser = CommandParser::new("!");
        assert_eq!(parser.parse("!"), command("", &[]));
        assert_eq!(parser.parse("! a b"), command("", &["a", "b"]));
        assert_eq!(parser.parse("!?x y"), command("", &["?x", "y"]));
    }

    #[test]
    fn non_ascii_letters_end_command_name() {
        let parser = CommandParser::new("!");
        assert_eq!(parser.parse("!zażółć"), command("za", &["żółć"]));
    }

    #[test]
    fn parsing_is_repeatable() {
        let parser = CommandParser::new("!");
        let input = r#"!roll "2 dice" 6"#;
        assert_eq!(parser.parse(input), parser.parse(input));
        assert_eq!(parser.parse(input), parse_command("!", input));
    }

    #[test]
    fn result_accessors() {
        let parser = CommandParser::new("!");
        let parsed = parser.parse("!cmd a");
        assert!(parsed.is_command());
        assert_eq!(parsed.command().map(|c| c.name.as_str()), Some("cmd"));
        assert_eq!(parsed.into_command(), Some(Command::new("cmd", ["a"])));
        assert_eq!(parser.parse("cmd").into_command(), None);
    }
}
