//! Subcommands of the `tictactoe` binary

use anyhow::{Result, anyhow};

use crate::tictactoe::Player;

pub mod evaluate;
pub mod selfplay;
pub mod solve;

pub(crate) fn parse_player_token(value: &str, flag: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "x" | "first" | "p1" => Ok(Player::X),
        "o" | "second" | "p2" => Ok(Player::O),
        other => Err(anyhow!(
            "Invalid value '{other}' for {flag} (expected 'x' or 'o')"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_player_token() {
        assert_eq!(parse_player_token("X", "--solver").unwrap(), Player::X);
        assert_eq!(parse_player_token(" second ", "--solver").unwrap(), Player::O);

        let err = parse_player_token("z", "--solver").unwrap_err();
        assert!(err.to_string().contains("--solver"));
    }
}
