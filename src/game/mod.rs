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
use std::fmt;

use crate::Color;

mod command;

pub use command::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: Color,
    pub reason: WinReason,
}

impl GameResult {
    pub fn new(winner: Color, reason: WinReason) -> Self {
        Self { winner, reason }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            WinReason::CheckMate => write!(f, "{} wins by checkmate!", self.winner),
            WinReason::KingCaptured => write!(f, "{} wins!", self.winner),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinReason {
    CheckMate,
    // The loser has no king left on the board
    KingCaptured,
}

/// What a front-end should tell the players after a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Turn(Color),
    GameOver(GameResult),
    Quit,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Turn(color) => write!(f, "{}'s turn", color),
            Status::GameOver(result) => write!(f, "{}", result),
            Status::Quit => write!(f, "Game ended"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Color::*;

    #[test]
    fn test_status_messages() {
        assert_eq!(Status::Turn(Black).to_string(), "Black's turn");
        let result = GameResult::new(White, WinReason::CheckMate);
        assert_eq!(Status::GameOver(result).to_string(), "White wins by checkmate!");
        let result = GameResult::new(Black, WinReason::KingCaptured);
        assert_eq!(result.to_string(), "Black wins!");
    }
}
