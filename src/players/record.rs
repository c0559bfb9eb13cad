// Player record types shared by the aggregator and the HTTP layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fantasy-relevant NFL positions. Anything outside these six is dropped
/// from the aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    K,
    DEF,
}

pub const VALID_POSITIONS: [Position; 6] = [
    Position::QB,
    Position::RB,
    Position::WR,
    Position::TE,
    Position::K,
    Position::DEF,
];

impl Position {
    /// Parse a provider position code. Exact, case-sensitive match only;
    /// lowercase or combo codes ("qb", "WR/RB") are rejected.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "QB" => Some(Position::QB),
            "RB" => Some(Position::RB),
            "WR" => Some(Position::WR),
            "TE" => Some(Position::TE),
            "K" => Some(Position::K),
            "DEF" => Some(Position::DEF),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K => "K",
            Position::DEF => "DEF",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

/// Position filter for player queries: everything, one position, or a
/// string that matches no position (and therefore no players).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionFilter {
    All,
    Only(Position),
    None,
}

impl PositionFilter {
    /// `"ALL"` selects everything; a valid position code selects that
    /// position; anything else selects nothing (mirroring the upstream
    /// contract where an unknown filter returns an empty list).
    pub fn parse(s: &str) -> Self {
        if s == "ALL" {
            PositionFilter::All
        } else {
            match Position::from_code(s) {
                Some(pos) => PositionFilter::Only(pos),
                None => PositionFilter::None,
            }
        }
    }

    pub fn matches(&self, position: Position) -> bool {
        match self {
            PositionFilter::All => true,
            PositionFilter::Only(p) => *p == position,
            PositionFilter::None => false,
        }
    }
}

/// One normalized player record, merged from the roster, stats, and ADP
/// feeds. The serialized key names are the API contract consumed by the
/// draftboard frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: String,
    pub name: String,
    pub team: String,
    pub position: Position,
    /// Reserved for client-side ranking; always 0 from the server.
    pub rank: u32,
    #[serde(rename = "fantasyPoints")]
    pub fantasy_points: f64,
    #[serde(rename = "rushYds")]
    pub rush_yds: u32,
    #[serde(rename = "rushTD")]
    pub rush_td: u32,
    #[serde(rename = "rushAtt")]
    pub rush_att: u32,
    #[serde(rename = "recYds")]
    pub rec_yds: u32,
    #[serde(rename = "recTD")]
    pub rec_td: u32,
    #[serde(rename = "passYds")]
    pub pass_yds: u32,
    #[serde(rename = "passTD")]
    pub pass_td: u32,
    pub receptions: u32,
    pub fumbles: u32,
    pub interceptions: u32,
    pub sacks: u32,
    /// Average draft position; `null` when no provider supplied one.
    pub adp: Option<f64>,
    /// Optional fields: omitted entirely (not zero-filled) when the stats
    /// feed had no usable value under any known key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_att: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_cmp: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<u32>,
}

impl PlayerRecord {
    /// A record with identity fields set and everything else zeroed/absent.
    pub fn zeroed(id: String, name: String, team: String, position: Position) -> Self {
        Self {
            id,
            name,
            team,
            position,
            rank: 0,
            fantasy_points: 0.0,
            rush_yds: 0,
            rush_td: 0,
            rush_att: 0,
            rec_yds: 0,
            rec_td: 0,
            pass_yds: 0,
            pass_td: 0,
            receptions: 0,
            fumbles: 0,
            interceptions: 0,
            sacks: 0,
            adp: None,
            pass_att: None,
            pass_cmp: None,
            targets: None,
        }
    }
}

/// One row of the standalone `/adp/{season}` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdpEntry {
    pub player_id: String,
    pub adp: f64,
    pub position: String,
    pub team: String,
    pub name: String,
}
