pub mod config;
pub mod dispatch;
pub mod store;
pub mod utils;

pub use cmdbot_parser as parser;
pub use cmdbot_parser::{make_command_parser, Command, CommandParser, ParseResult};
