// aivis-core/src/domain/scoring/dimension.rs

use serde::{Deserialize, Serialize};
use std::fmt;

// Declaration order is the presentation order of a report (Ord is derived).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Authority,
    Freshness,
    Structure,
    Technical,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Authority,
        Dimension::Freshness,
        Dimension::Structure,
        Dimension::Technical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authority => "authority",
            Self::Freshness => "freshness",
            Self::Structure => "structure",
            Self::Technical => "technical",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "authority" => Ok(Self::Authority),
            "freshness" => Ok(Self::Freshness),
            "structure" => Ok(Self::Structure),
            "technical" => Ok(Self::Technical),
            _ => Err(format!("Unknown dimension: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_dimension_parsing_is_case_insensitive() -> anyhow::Result<()> {
        assert_eq!(
            Dimension::from_str("Authority").map_err(|e| anyhow::anyhow!(e))?,
            Dimension::Authority
        );
        assert_eq!(
            Dimension::from_str(" technical ").map_err(|e| anyhow::anyhow!(e))?,
            Dimension::Technical
        );
        assert!(Dimension::from_str("seo").is_err());
        Ok(())
    }

    #[test]
    fn test_dimension_order_matches_declaration() {
        let mut shuffled = vec![
            Dimension::Technical,
            Dimension::Authority,
            Dimension::Structure,
            Dimension::Freshness,
        ];
        shuffled.sort();
        assert_eq!(shuffled, Dimension::ALL.to_vec());
    }
}
