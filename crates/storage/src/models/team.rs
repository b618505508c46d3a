use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The three teams of the tournament. The set is closed; teams are never
/// created at runtime.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum Team {
    YoungGuns,
    #[serde(rename = "ogs")]
    OGs,
    Mids,
}

impl Team {
    pub const ALL: [Team; 3] = [Team::YoungGuns, Team::OGs, Team::Mids];

    /// Stable identifier used as the storage column value.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::YoungGuns => "young-guns",
            Self::OGs => "ogs",
            Self::Mids => "mids",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::YoungGuns => "Young Guns",
            Self::OGs => "OGs",
            Self::Mids => "Mids",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTeam(pub String);

impl fmt::Display for UnknownTeam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown team '{}'", self.0)
    }
}

impl std::error::Error for UnknownTeam {}

impl FromStr for Team {
    type Err = UnknownTeam;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "youngguns" | "young" => Ok(Self::YoungGuns),
            "ogs" | "og" => Ok(Self::OGs),
            "mids" | "mid" => Ok(Self::Mids),
            _ => Err(UnknownTeam(s.to_string())),
        }
    }
}

impl TryFrom<&str> for Team {
    type Error = UnknownTeam;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_parsing() {
        assert_eq!("young-guns".parse::<Team>(), Ok(Team::YoungGuns));
        assert_eq!("Young Guns".parse::<Team>(), Ok(Team::YoungGuns));
        assert_eq!(Team::try_from("OGs"), Ok(Team::OGs));
        assert_eq!("MIDS".parse::<Team>(), Ok(Team::Mids));

        assert!("veterans".parse::<Team>().is_err());
        assert!(Team::try_from("").is_err());
    }

    #[test]
    fn test_slug_round_trips_through_parser() {
        for team in Team::ALL {
            assert_eq!(team.slug().parse::<Team>(), Ok(team));
        }
    }

    #[test]
    fn test_serde_uses_slug() {
        let json = serde_json::to_string(&Team::OGs).unwrap();
        assert_eq!(json, "\"ogs\"");
        let team: Team = serde_json::from_str("\"young-guns\"").unwrap();
        assert_eq!(team, Team::YoungGuns);
    }
}
