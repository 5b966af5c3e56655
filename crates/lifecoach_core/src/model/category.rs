//! Four-bucket activity value taxonomy.

use super::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Value category of a planned activity.
///
/// Serialized with the full stored label, e.g. `HIGH LIFE TIME (HLV)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ValueCategory {
    #[serde(rename = "HIGH LIFE TIME (HLV)")]
    Hlv,
    #[serde(rename = "HIGH DOLLAR (HDV)")]
    Hdv,
    #[serde(rename = "LOW DOLLAR (LDV)")]
    Ldv,
    #[serde(rename = "ZERO VALUE (ZV)")]
    Zv,
}

impl ValueCategory {
    /// All categories in canonical order.
    pub const ALL: [ValueCategory; 4] = [Self::Hlv, Self::Hdv, Self::Ldv, Self::Zv];

    pub fn code(self) -> &'static str {
        match self {
            Self::Hlv => "HLV",
            Self::Hdv => "HDV",
            Self::Ldv => "LDV",
            Self::Zv => "ZV",
        }
    }

    /// Label used as the group key in stored planner documents.
    pub fn label(self) -> &'static str {
        match self {
            Self::Hlv => "HIGH LIFE TIME (HLV)",
            Self::Hdv => "HIGH DOLLAR (HDV)",
            Self::Ldv => "LOW DOLLAR (LDV)",
            Self::Zv => "ZERO VALUE (ZV)",
        }
    }

    /// Long name shown next to chart values.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Hlv => "HIGH LIFE TIME VALUE",
            Self::Hdv => "HIGH DOLLAR VALUE",
            Self::Ldv => "LOW DOLLAR VALUE",
            Self::Zv => "ZERO DOLLAR VALUE",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Hlv => "#16a34a",
            Self::Hdv => "#2563eb",
            Self::Ldv => "#38bdf8",
            Self::Zv => "#f97316",
        }
    }

    /// Weight of one scheduled hour in the productivity score (4 best, 1 worst).
    pub fn weight(self) -> u32 {
        match self {
            Self::Hlv => 4,
            Self::Hdv => 3,
            Self::Ldv => 2,
            Self::Zv => 1,
        }
    }
}

impl Display for ValueCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ValueCategory {
    type Err = ModelError;

    /// Accepts the stored label exactly, or the short code in any case.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| {
                category.label() == trimmed || category.code().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| ModelError::InvalidCategory(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::ValueCategory;

    #[test]
    fn parses_codes_and_labels() {
        assert_eq!("hlv".parse::<ValueCategory>().unwrap(), ValueCategory::Hlv);
        assert_eq!(
            "ZERO VALUE (ZV)".parse::<ValueCategory>().unwrap(),
            ValueCategory::Zv
        );
        assert!("MID".parse::<ValueCategory>().is_err());
    }

    #[test]
    fn serializes_with_stored_label() {
        let json = serde_json::to_string(&ValueCategory::Hdv).unwrap();
        assert_eq!(json, "\"HIGH DOLLAR (HDV)\"");
    }

    #[test]
    fn weights_rank_categories_in_canonical_order() {
        let weights: Vec<u32> = ValueCategory::ALL.iter().map(|c| c.weight()).collect();
        assert_eq!(weights, vec![4, 3, 2, 1]);
    }
}
