//! Host command parser.
//!
//! Parses the line-oriented commands the binary reads from stdin into
//! structured `Command` variants:
//!
//! ```text
//! new <seed> [options-json]
//! view <role>
//! act <role> <verb> [arg]
//! quit
//! ```

use serde_json::Value;
use tracing::warn;

use crate::board::Role;

/// A parsed host command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Start a Standard Game with the given seed and options.
    New { seed: u64, options: Value },

    /// Print the view for a role.
    View { role: Role },

    /// Apply an action on behalf of a role.
    Act {
        role: Role,
        verb: String,
        arg: Option<String>,
    },

    /// Terminate the process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines, unrecognized commands and malformed
/// arguments; the latter two are logged.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    match tokens[0] {
        "quit" => Some(Command::Quit),
        "new" => parse_new(&tokens, trimmed),
        "view" => parse_view(&tokens),
        "act" => parse_act(&tokens),
        other => {
            warn!(command = other, "unknown command");
            None
        }
    }
}

/// Parses `new <seed> [options-json]`. The JSON may contain spaces.
fn parse_new(tokens: &[&str], full_line: &str) -> Option<Command> {
    if tokens.len() < 2 {
        warn!("malformed new: expected 'new <seed> [options-json]'");
        return None;
    }
    let seed = match tokens[1].parse::<u64>() {
        Ok(seed) => seed,
        Err(_) => {
            warn!(seed = tokens[1], "invalid seed");
            return None;
        }
    };

    let rest = full_line
        .strip_prefix("new")
        .map(str::trim_start)
        .and_then(|s| s.strip_prefix(tokens[1]))
        .map(str::trim)
        .unwrap_or("");
    let options = if rest.is_empty() {
        Value::Null
    } else {
        match serde_json::from_str(rest) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "invalid options JSON");
                return None;
            }
        }
    };

    Some(Command::New { seed, options })
}

/// Parses `view <role>`.
fn parse_view(tokens: &[&str]) -> Option<Command> {
    let Some(name) = tokens.get(1) else {
        warn!("malformed view: expected 'view <role>'");
        return None;
    };
    Some(Command::View {
        role: Role::from_name(name),
    })
}

/// Parses `act <role> <verb> [arg]`.
fn parse_act(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 {
        warn!("malformed act: expected 'act <role> <verb> [arg]'");
        return None;
    }
    Some(Command::Act {
        role: Role::from_name(tokens[1]),
        verb: tokens[2].to_string(),
        arg: tokens.get(3).map(|s| s.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_quit_command() {
        assert_eq!(parse_command("quit"), Some(Command::Quit));
    }

    #[test]
    fn parse_empty_line_returns_none() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
        assert_eq!(parse_command("\t"), None);
    }

    #[test]
    fn parse_unknown_command_returns_none() {
        assert_eq!(parse_command("foobar"), None);
    }

    #[test]
    fn parse_new_with_seed_only() {
        assert_eq!(
            parse_command("new 42"),
            Some(Command::New {
                seed: 42,
                options: Value::Null
            })
        );
    }

    #[test]
    fn parse_new_with_options() {
        assert_eq!(
            parse_command(r#"new 7 { "turn_limit": 2, "undo_active_only": false }"#),
            Some(Command::New {
                seed: 7,
                options: json!({ "turn_limit": 2, "undo_active_only": false }),
            })
        );
    }

    #[test]
    fn parse_new_rejects_bad_input() {
        assert_eq!(parse_command("new"), None);
        assert_eq!(parse_command("new -3"), None);
        assert_eq!(parse_command("new 3 {oops"), None);
    }

    #[test]
    fn parse_view_roles() {
        assert_eq!(parse_command("view German"), Some(Command::View { role: Role::German }));
        assert_eq!(parse_command("view anyone"), Some(Command::View { role: Role::Observer }));
        assert_eq!(parse_command("view"), None);
    }

    #[test]
    fn parse_act_with_and_without_argument() {
        assert_eq!(
            parse_command("act German set_stance track_land"),
            Some(Command::Act {
                role: Role::German,
                verb: "set_stance".to_string(),
                arg: Some("track_land".to_string()),
            })
        );
        assert_eq!(
            parse_command("act Soviet end_setup"),
            Some(Command::Act {
                role: Role::Soviet,
                verb: "end_setup".to_string(),
                arg: None,
            })
        );
        assert_eq!(parse_command("act Soviet"), None);
    }
}
