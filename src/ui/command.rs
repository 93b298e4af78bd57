use crate::session::Side;

use super::UiError;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Prompt(String),
    /// `/model` alone shows the current model.
    Model(Option<String>),
    Models,
    History,
    Expand { number: usize, side: Side },
    Export,
    Clear,
    Help,
    Quit,
}

pub fn parse_command(input: &str) -> Result<Command, UiError> {
    let line = input.trim_end_matches(['\r', '\n']);
    if let Some(literal) = line.trim_start().strip_prefix("//") {
        return Ok(Command::Prompt(format!("/{literal}")));
    }

    let Some(rest) = line.trim_start().strip_prefix('/') else {
        return Ok(Command::Prompt(line.to_string()));
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    let command = match name {
        "model" => match args.as_slice() {
            [] => Command::Model(None),
            [model] => Command::Model(Some(model.to_string())),
            _ => return Err(invalid("/model", "expected a single model id")),
        },
        "models" => Command::Models,
        "history" => Command::History,
        "expand" => parse_expand(&args)?,
        "export" => Command::Export,
        "clear" => Command::Clear,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(UiError::UnknownCommand(format!("/{other}"))),
    };

    Ok(command)
}

fn parse_expand(args: &[&str]) -> Result<Command, UiError> {
    let [number, side] = args else {
        return Err(invalid("/expand", "usage: /expand <number> <you|ai>"));
    };

    let number = number
        .parse::<usize>()
        .map_err(|_| invalid("/expand", "conversation number must be a positive integer"))?;

    let side = match side.to_ascii_lowercase().as_str() {
        "you" | "user" => Side::User,
        "ai" | "assistant" => Side::Assistant,
        _ => return Err(invalid("/expand", "side must be 'you' or 'ai'")),
    };

    Ok(Command::Expand { number, side })
}

fn invalid(command: &str, message: &str) -> UiError {
    UiError::InvalidArgument {
        command: command.to_string(),
        message: message.to_string(),
    }
}
