use serde::{Deserialize, Serialize};

use super::team::Team;

/// One offensive snap as delivered by the play-by-play feed.
///
/// Records arrive already filtered to rush/pass downs of one regular season,
/// in schedule order. Column aliases match the nflverse export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayRecord {
    pub game_id: String,
    #[serde(default)]
    pub week: Option<u8>,
    /// Team in possession
    #[serde(alias = "posteam")]
    pub offense: Team,
    /// Team on defense
    #[serde(alias = "defteam")]
    pub defense: Team,
    /// Expected points added by this play
    pub epa: f64,
    #[serde(default)]
    pub down: Option<u8>,
    #[serde(default, alias = "ydstogo")]
    pub yards_to_go: u8,
    /// Distance to the opponent end zone
    #[serde(alias = "yardline_100")]
    pub yardline: u8,
    #[serde(alias = "qtr")]
    pub quarter: u8,
    #[serde(default)]
    pub half_seconds_remaining: u32,
    #[serde(default)]
    pub yards_gained: i32,
    #[serde(flatten)]
    pub flags: PlayFlags,
}

/// Boolean result flags on a play
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayFlags {
    #[serde(default, deserialize_with = "flag")]
    pub pass: bool,
    #[serde(default, deserialize_with = "flag")]
    pub rush: bool,
    #[serde(default, deserialize_with = "flag")]
    pub sack: bool,
    #[serde(default, deserialize_with = "flag")]
    pub first_down: bool,
    #[serde(default, deserialize_with = "flag")]
    pub touchdown: bool,
}

/// nflverse encodes flags as 0/1 numbers; accept booleans too.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Number(f64),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Number(n)) => n >= 0.5,
        None => false,
    })
}

impl PlayRecord {
    pub fn involves(&self, team: Team) -> bool {
        self.offense == team || self.defense == team
    }

    pub fn is_third_down(&self) -> bool {
        self.down == Some(3)
    }
}
