//! Move scripts: `"right, right, down, enter"`.
//!
//! Tokens are separated by commas or whitespace and are case-insensitive.

use thiserror::Error;

use crate::core::Action;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown move `{token}` at position {position} (expected up, down, left, right or enter)")]
pub struct ScriptError {
    pub token: String,
    pub position: usize,
}

pub fn parse_script(script: &str) -> Result<Vec<Action>, ScriptError> {
    script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(position, token)| {
            parse_move(token).ok_or_else(|| ScriptError {
                token: token.to_string(),
                position,
            })
        })
        .collect()
}

fn parse_move(token: &str) -> Option<Action> {
    match token.to_ascii_lowercase().as_str() {
        "up" | "u" => Some(Action::MoveUp),
        "down" | "d" => Some(Action::MoveDown),
        "left" | "l" => Some(Action::MoveLeft),
        "right" | "r" => Some(Action::MoveRight),
        "enter" | "confirm" | "ok" => Some(Action::Confirm),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_separators() {
        let actions = parse_script("right, r  down,enter").unwrap();
        assert_eq!(
            actions,
            vec![Action::MoveRight, Action::MoveRight, Action::MoveDown, Action::Confirm]
        );
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(parse_script("UP Left").unwrap(), vec![Action::MoveUp, Action::MoveLeft]);
    }

    #[test]
    fn test_parse_empty_script() {
        assert!(parse_script("  ,, ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_reports_bad_token() {
        let err = parse_script("up, sideways").unwrap_err();
        assert_eq!(
            err,
            ScriptError {
                token: "sideways".into(),
                position: 1
            }
        );
    }
}
