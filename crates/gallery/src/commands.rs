use crate::message::{CatalogMessage, Message, NavMessage};
use gallery_config::FilterKind;
use gallery_nav::{Key, OverlayEvent};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Missing argument for {0}")]
    MissingArgument(&'static str),

    #[error("Invalid argument for {command}: {value}")]
    InvalidArgument { command: &'static str, value: String },
}

pub const HELP: &str = "commands: key <Escape|ArrowLeft|ArrowRight|keycode>, click <close|image|overlay>, \
hash <#photo/url>, open <n>, goto <n>, show <url>, filter <popular|new|discussed>, more, reload, status, quit";

/// Turns one line of terminal input into a message.
///
/// Blank lines and `//` comments yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Message>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with("//") {
        return Ok(None);
    }

    let (command, argument) = match line.split_once(char::is_whitespace) {
        Some((command, argument)) => (command, Some(argument.trim())),
        None => (line, None),
    };

    let message = match command {
        "key" => {
            let name = argument.ok_or(CommandError::MissingArgument("key"))?;
            let key = match name.parse::<u32>() {
                Ok(code) => Key::from_code(code),
                Err(_) => Key::from_name(name),
            };
            Message::Overlay(OverlayEvent::KeyDown(key))
        }
        "esc" => Message::Overlay(OverlayEvent::KeyDown(Key::Escape)),
        "left" => Message::Overlay(OverlayEvent::KeyDown(Key::ArrowLeft)),
        "right" => Message::Overlay(OverlayEvent::KeyDown(Key::ArrowRight)),
        "click" => match argument.ok_or(CommandError::MissingArgument("click"))? {
            "close" => Message::Overlay(OverlayEvent::CloseClicked),
            "image" => Message::Overlay(OverlayEvent::ImageClicked),
            "overlay" | "background" => Message::Overlay(OverlayEvent::BackgroundClicked),
            other => {
                return Err(CommandError::InvalidArgument {
                    command: "click",
                    value: other.to_string(),
                });
            }
        },
        "hash" => Message::Location(argument.unwrap_or_default().to_string()),
        "open" => Message::Nav(NavMessage::Open(parse_number("open", argument)?)),
        "goto" => Message::Nav(NavMessage::GoTo(parse_number("goto", argument)?)),
        "show" => {
            let identifier = argument.ok_or(CommandError::MissingArgument("show"))?;
            Message::Nav(NavMessage::Identifier(identifier.to_string()))
        }
        "filter" => {
            let name = argument.ok_or(CommandError::MissingArgument("filter"))?;
            let kind = name
                .parse::<FilterKind>()
                .map_err(|_| CommandError::InvalidArgument {
                    command: "filter",
                    value: name.to_string(),
                })?;
            Message::Catalog(CatalogMessage::Filter(kind))
        }
        "more" => Message::Catalog(CatalogMessage::LoadMore),
        "reload" => Message::Catalog(CatalogMessage::Reload),
        "status" => Message::Status,
        "quit" | "exit" => Message::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(message))
}

fn parse_number<T: std::str::FromStr>(
    command: &'static str,
    argument: Option<&str>,
) -> Result<T, CommandError> {
    let value = argument.ok_or(CommandError::MissingArgument(command))?;
    value.parse().map_err(|_| CommandError::InvalidArgument {
        command,
        value: value.to_string(),
    })
}
