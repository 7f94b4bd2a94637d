use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// NFL franchise, keyed by its play-by-play abbreviation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Team {
    #[serde(rename = "ARI")]
    Arizona,
    #[serde(rename = "ATL")]
    Atlanta,
    #[serde(rename = "BAL")]
    Baltimore,
    #[serde(rename = "BUF")]
    Buffalo,
    #[serde(rename = "CAR")]
    Carolina,
    #[serde(rename = "CHI")]
    Chicago,
    #[serde(rename = "CIN")]
    Cincinnati,
    #[serde(rename = "CLE")]
    Cleveland,
    #[serde(rename = "DAL")]
    Dallas,
    #[serde(rename = "DEN")]
    Denver,
    #[serde(rename = "DET")]
    Detroit,
    #[serde(rename = "GB")]
    GreenBay,
    #[serde(rename = "HOU")]
    Houston,
    #[serde(rename = "IND")]
    Indianapolis,
    #[serde(rename = "JAX")]
    Jacksonville,
    #[serde(rename = "KC")]
    KansasCity,
    #[serde(rename = "LV")]
    LasVegas,
    #[serde(rename = "LAC")]
    LaChargers,
    #[serde(rename = "LA")]
    LaRams,
    #[serde(rename = "MIA")]
    Miami,
    #[serde(rename = "MIN")]
    Minnesota,
    #[serde(rename = "NE")]
    NewEngland,
    #[serde(rename = "NO")]
    NewOrleans,
    #[serde(rename = "NYG")]
    NyGiants,
    #[serde(rename = "NYJ")]
    NyJets,
    #[serde(rename = "PHI")]
    Philadelphia,
    #[serde(rename = "PIT")]
    Pittsburgh,
    #[serde(rename = "SF")]
    SanFrancisco,
    #[serde(rename = "SEA")]
    Seattle,
    #[serde(rename = "TB")]
    TampaBay,
    #[serde(rename = "TEN")]
    Tennessee,
    #[serde(rename = "WAS")]
    Washington,
}

/// Division membership, used for rivalry compression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Division {
    AfcEast,
    AfcNorth,
    AfcSouth,
    AfcWest,
    NfcEast,
    NfcNorth,
    NfcSouth,
    NfcWest,
}

/// Home timezone of a franchise
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Timezone {
    #[serde(rename = "ET")]
    Eastern,
    #[serde(rename = "CT")]
    Central,
    #[serde(rename = "MT")]
    Mountain,
    #[serde(rename = "PT")]
    Pacific,
}

impl Timezone {
    fn ordinal(self) -> u8 {
        match self {
            Timezone::Eastern => 0,
            Timezone::Central => 1,
            Timezone::Mountain => 2,
            Timezone::Pacific => 3,
        }
    }

    /// Number of zones between two timezones
    pub fn distance(self, other: Timezone) -> u8 {
        self.ordinal().abs_diff(other.ordinal())
    }
}

impl Team {
    pub const ALL: [Team; 32] = [
        Team::Arizona,
        Team::Atlanta,
        Team::Baltimore,
        Team::Buffalo,
        Team::Carolina,
        Team::Chicago,
        Team::Cincinnati,
        Team::Cleveland,
        Team::Dallas,
        Team::Denver,
        Team::Detroit,
        Team::GreenBay,
        Team::Houston,
        Team::Indianapolis,
        Team::Jacksonville,
        Team::KansasCity,
        Team::LasVegas,
        Team::LaChargers,
        Team::LaRams,
        Team::Miami,
        Team::Minnesota,
        Team::NewEngland,
        Team::NewOrleans,
        Team::NyGiants,
        Team::NyJets,
        Team::Philadelphia,
        Team::Pittsburgh,
        Team::SanFrancisco,
        Team::Seattle,
        Team::TampaBay,
        Team::Tennessee,
        Team::Washington,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Team::Arizona => "ARI",
            Team::Atlanta => "ATL",
            Team::Baltimore => "BAL",
            Team::Buffalo => "BUF",
            Team::Carolina => "CAR",
            Team::Chicago => "CHI",
            Team::Cincinnati => "CIN",
            Team::Cleveland => "CLE",
            Team::Dallas => "DAL",
            Team::Denver => "DEN",
            Team::Detroit => "DET",
            Team::GreenBay => "GB",
            Team::Houston => "HOU",
            Team::Indianapolis => "IND",
            Team::Jacksonville => "JAX",
            Team::KansasCity => "KC",
            Team::LasVegas => "LV",
            Team::LaChargers => "LAC",
            Team::LaRams => "LA",
            Team::Miami => "MIA",
            Team::Minnesota => "MIN",
            Team::NewEngland => "NE",
            Team::NewOrleans => "NO",
            Team::NyGiants => "NYG",
            Team::NyJets => "NYJ",
            Team::Philadelphia => "PHI",
            Team::Pittsburgh => "PIT",
            Team::SanFrancisco => "SF",
            Team::Seattle => "SEA",
            Team::TampaBay => "TB",
            Team::Tennessee => "TEN",
            Team::Washington => "WAS",
        }
    }

    pub fn division(&self) -> Division {
        use Team::*;
        match self {
            Buffalo | Miami | NewEngland | NyJets => Division::AfcEast,
            Baltimore | Cincinnati | Cleveland | Pittsburgh => Division::AfcNorth,
            Houston | Indianapolis | Jacksonville | Tennessee => Division::AfcSouth,
            Denver | KansasCity | LasVegas | LaChargers => Division::AfcWest,
            Dallas | NyGiants | Philadelphia | Washington => Division::NfcEast,
            Chicago | Detroit | GreenBay | Minnesota => Division::NfcNorth,
            Atlanta | Carolina | NewOrleans | TampaBay => Division::NfcSouth,
            Arizona | LaRams | SanFrancisco | Seattle => Division::NfcWest,
        }
    }

    pub fn timezone(&self) -> Timezone {
        use Team::*;
        match self {
            Houston | Tennessee | KansasCity | Dallas | Chicago | GreenBay | Minnesota
            | NewOrleans => Timezone::Central,
            Denver | Arizona => Timezone::Mountain,
            LasVegas | LaChargers | LaRams | SanFrancisco | Seattle => Timezone::Pacific,
            _ => Timezone::Eastern,
        }
    }

    /// Mile-high home venue
    pub fn is_high_altitude(&self) -> bool {
        matches!(self, Team::Denver)
    }

    pub fn is_dome(&self) -> bool {
        use Team::*;
        matches!(
            self,
            Atlanta | Detroit | NewOrleans | Minnesota | LasVegas | LaRams | Arizona
        )
    }

    /// Historically loud home crowds
    pub fn is_loud_venue(&self) -> bool {
        use Team::*;
        matches!(
            self,
            Seattle | KansasCity | NewOrleans | Buffalo | Philadelphia | GreenBay | Dallas
                | Minnesota
        )
    }

    pub fn is_division_rival(&self, other: Team) -> bool {
        self.division() == other.division()
    }
}

impl FromStr for Team {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Team::ALL
            .iter()
            .copied()
            .find(|team| team.code() == code)
            .ok_or_else(|| {
                let mut codes: Vec<&str> = Team::ALL.iter().map(|t| t.code()).collect();
                codes.sort_unstable();
                ValidationError::UnknownTeam {
                    code: s.to_string(),
                    valid: codes.join(", "),
                }
            })
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Build the "AWAY @ HOME" key used by market line tables
pub fn matchup_key(home: Team, away: Team) -> String {
    format!("{} @ {}", away, home)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for team in Team::ALL {
            assert_eq!(team.code().parse::<Team>().unwrap(), team);
        }
        assert_eq!("kc".parse::<Team>().unwrap(), Team::KansasCity);
    }

    #[test]
    fn test_unknown_team_rejected() {
        let err = "XYZ".parse::<Team>().unwrap_err();
        assert!(matches!(err, ValidationError::UnknownTeam { .. }));
        assert!(err.to_string().contains("XYZ"));
    }

    #[test]
    fn test_divisions_have_four_teams() {
        for team in Team::ALL {
            let count = Team::ALL
                .iter()
                .filter(|other| other.division() == team.division())
                .count();
            assert_eq!(count, 4, "{team} division size");
        }
        assert!(Team::Buffalo.is_division_rival(Team::Miami));
        assert!(!Team::Buffalo.is_division_rival(Team::KansasCity));
    }

    #[test]
    fn test_timezone_distance_coast_to_coast() {
        // SEA (PT) at BUF (ET) = 3 zones
        assert_eq!(Team::Buffalo.timezone().distance(Team::Seattle.timezone()), 3);
        assert_eq!(Team::Denver.timezone().distance(Team::Denver.timezone()), 0);
    }

    #[test]
    fn test_matchup_key() {
        assert_eq!(matchup_key(Team::KansasCity, Team::Baltimore), "BAL @ KC");
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&Team::GreenBay).unwrap();
        assert_eq!(json, "\"GB\"");
        let team: Team = serde_json::from_str("\"LAC\"").unwrap();
        assert_eq!(team, Team::LaChargers);
    }
}
