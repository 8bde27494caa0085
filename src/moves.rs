use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::*;

/// Move submitted by a client.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveAction {
    Reveal,
    Flag,
    Chord,
}

impl MoveAction {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Reveal => "reveal",
            Self::Flag => "flag",
            Self::Chord => "chord",
        }
    }
}

impl core::str::FromStr for MoveAction {
    type Err = MoveRejection;

    fn from_str(name: &str) -> core::result::Result<Self, Self::Err> {
        match name {
            "reveal" => Ok(Self::Reveal),
            "flag" => Ok(Self::Flag),
            "chord" => Ok(Self::Chord),
            other => Err(MoveRejection::UnknownAction(other.to_owned())),
        }
    }
}

/// Action as recorded in the audit log. Flag toggles are split by their
/// resulting state so the log reads as placed/removed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggedAction {
    Reveal,
    Flag,
    Unflag,
    Chord,
}

/// One entry of the append-only move log. Audit/replay only, never read
/// back into gameplay logic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub row: Coord,
    pub col: Coord,
    pub action: LoggedAction,
    pub timestamp: DateTime<Utc>,
}

/// Outcome record returned by [`GameSession::apply_move`].
///
/// Rejected moves come back with `valid: false` and a descriptive message;
/// nothing is thrown for bad input. Terminal outcomes carry the unmasked
/// board so the client can paint the end position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveResult {
    pub valid: bool,
    pub game_over: bool,
    pub status: GameStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board: Option<Vec<Vec<CellValue>>>,
}

impl MoveResult {
    pub(crate) fn accepted(status: GameStatus, message: impl Into<String>) -> Self {
        Self {
            valid: true,
            game_over: status.is_finished(),
            status,
            score: None,
            message: message.into(),
            board: None,
        }
    }

    pub(crate) fn rejected(status: GameStatus, rejection: MoveRejection) -> Self {
        Self {
            valid: false,
            game_over: status.is_finished(),
            status,
            score: None,
            message: rejection.to_string(),
            board: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_parse_from_wire_names() {
        assert_eq!("reveal".parse(), Ok(MoveAction::Reveal));
        assert_eq!("flag".parse(), Ok(MoveAction::Flag));
        assert_eq!("chord".parse(), Ok(MoveAction::Chord));
        assert_eq!(
            "detonate".parse::<MoveAction>(),
            Err(MoveRejection::UnknownAction("detonate".into()))
        );
    }

    #[test]
    fn logged_actions_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&LoggedAction::Unflag).unwrap(), "\"unflag\"");
        assert_eq!(serde_json::to_string(&MoveAction::Chord).unwrap(), "\"chord\"");
    }
}
