//! Garden lifecycle status.

use serde::{Deserialize, Serialize};

/// Status of a virtual garden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GardenStatus {
    /// In progress, fewer than 30 trees.
    Active,
    /// Exactly 30/30 trees; completion achieved.
    Complete,
    /// Archived garden library entry the user can browse.
    Archived,
    /// Traded for real-world tree planting.
    Redeemed,
}

impl GardenStatus {
    /// Display name for UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            GardenStatus::Active => "Active Garden",
            GardenStatus::Complete => "Canopy Complete",
            GardenStatus::Archived => "Memory Grove",
            GardenStatus::Redeemed => "Redeemed Grove",
        }
    }

    /// Subtitle for UI.
    pub fn subtitle(&self) -> &'static str {
        match self {
            GardenStatus::Active => "In progress",
            GardenStatus::Complete => "Ready to redeem!",
            GardenStatus::Archived => "Previous full garden",
            GardenStatus::Redeemed => "Real trees planted",
        }
    }

    /// Whether the garden can accept new trees.
    pub fn can_plant_trees(&self) -> bool {
        *self == GardenStatus::Active
    }

    /// Whether the garden can be redeemed.
    pub fn can_be_redeemed(&self) -> bool {
        *self == GardenStatus::Complete
    }

    /// Archived and redeemed gardens are read-only.
    pub fn is_read_only(&self) -> bool {
        matches!(self, GardenStatus::Archived | GardenStatus::Redeemed)
    }

    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            GardenStatus::Active => "active",
            GardenStatus::Complete => "complete",
            GardenStatus::Archived => "archived",
            GardenStatus::Redeemed => "redeemed",
        }
    }
}

impl std::str::FromStr for GardenStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(GardenStatus::Active),
            "complete" => Ok(GardenStatus::Complete),
            "archived" => Ok(GardenStatus::Archived),
            "redeemed" => Ok(GardenStatus::Redeemed),
            other => Err(format!("unknown garden status: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_predicates() {
        assert!(GardenStatus::Active.can_plant_trees());
        assert!(!GardenStatus::Complete.can_plant_trees());
        assert!(GardenStatus::Complete.can_be_redeemed());
        assert!(GardenStatus::Archived.is_read_only());
        assert!(GardenStatus::Redeemed.is_read_only());
    }

    #[test]
    fn storage_round_trip() {
        for status in [
            GardenStatus::Active,
            GardenStatus::Complete,
            GardenStatus::Archived,
            GardenStatus::Redeemed,
        ] {
            assert_eq!(status.as_str().parse::<GardenStatus>().unwrap(), status);
        }
    }
}
