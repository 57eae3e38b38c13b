// Copyright 2026 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{Move, ParseError};

/// A line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Move(Move),
    Quit,
}

impl Command {
    pub const QUIT: &'static str = "quit";

    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let text = text.trim();
        if text.eq_ignore_ascii_case(Self::QUIT) {
            return Ok(Command::Quit);
        }
        Ok(Command::Move(Move::parse(text)?))
    }
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Square::*;

    #[test]
    fn test_parse_quit() {
        assert_eq!(Command::parse("quit").unwrap(), Command::Quit);
        assert_eq!(Command::parse("  QUIT \n").unwrap(), Command::Quit);
    }
    #[test]
    fn test_parse_move() {
        assert_eq!(
            Command::parse("E2 e4").unwrap(),
            Command::Move(Move::new(E2, E4))
        );
    }
    #[test]
    fn test_parse_garbage() {
        assert!(Command::parse("quit now").is_err());
        assert!("resign".parse::<Command>().is_err());
    }
}
