//! Domain types for the card catalog and collections.
//!
//! Closed enumerations for every value that reaches a query (rarity, color,
//! condition, sort order) plus newtype ids so binder and user ids cannot be
//! mixed up.

pub mod search;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use search::{FilterFragment, PAGE_SIZE, Page, PageWindow, SearchQuery, SortKey};

/// Raised when a raw string does not name a member of a closed enumeration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid {kind} '{value}'. Expected one of: {expected}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Unique identifier for a binder.
///
/// # Examples
///
/// ```rust
/// use binderdex::domain::BinderId;
///
/// let id = BinderId::new(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BinderId(i32);

impl BinderId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        debug_assert!(id >= 0, "BinderId should be non-negative");
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for BinderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for BinderId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl Serialize for BinderId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.0)
    }
}

/// Id of an authenticated account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(i32);

impl UserId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Printing rarity as stored on `card_printings.rarity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Mythic,
}

impl Rarity {
    pub const ALL: [Self; 4] = [Self::Common, Self::Uncommon, Self::Rare, Self::Mythic];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Mythic => "mythic",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rarity {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| ParseEnumError {
                kind: "rarity",
                value: s.to_string(),
                expected: "common, uncommon, rare, mythic",
            })
    }
}

/// Color identity code. `C` marks colorless designs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ColorCode {
    #[serde(rename = "W")]
    White,
    #[serde(rename = "U")]
    Blue,
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "G")]
    Green,
    #[serde(rename = "C")]
    Colorless,
}

impl ColorCode {
    pub const ALL: [Self; 6] = [
        Self::White,
        Self::Blue,
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Colorless,
    ];

    #[must_use]
    pub const fn as_code(&self) -> &'static str {
        match self {
            Self::White => "W",
            Self::Blue => "U",
            Self::Black => "B",
            Self::Red => "R",
            Self::Green => "G",
            Self::Colorless => "C",
        }
    }
}

impl fmt::Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

impl FromStr for ColorCode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_code() == s)
            .ok_or_else(|| ParseEnumError {
                kind: "color",
                value: s.to_string(),
                expected: "W, U, B, R, G, C",
            })
    }
}

/// Sort direction. Serialized as the `ASC`/`DESC` tokens clients send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "ASC")]
    Ascending,
    #[serde(rename = "DESC")]
    Descending,
}

impl SortOrder {
    #[must_use]
    pub const fn is_ascending(&self) -> bool {
        matches!(self, Self::Ascending)
    }

    #[must_use]
    pub const fn reversed(&self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl FromStr for SortOrder {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ASC" => Ok(Self::Ascending),
            "DESC" => Ok(Self::Descending),
            other => Err(ParseEnumError {
                kind: "sort direction",
                value: other.to_string(),
                expected: "ASC, DESC",
            }),
        }
    }
}

/// Physical condition of a collected or listed copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardCondition {
    #[default]
    NearMint,
    LightlyPlayed,
    ModeratelyPlayed,
    HeavilyPlayed,
    Damaged,
}

impl CardCondition {
    pub const ALL: [Self; 5] = [
        Self::NearMint,
        Self::LightlyPlayed,
        Self::ModeratelyPlayed,
        Self::HeavilyPlayed,
        Self::Damaged,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NearMint => "near_mint",
            Self::LightlyPlayed => "lightly_played",
            Self::ModeratelyPlayed => "moderately_played",
            Self::HeavilyPlayed => "heavily_played",
            Self::Damaged => "damaged",
        }
    }
}

impl FromStr for CardCondition {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseEnumError {
                kind: "condition",
                value: s.to_string(),
                expected: "near_mint, lightly_played, moderately_played, heavily_played, damaged",
            })
    }
}

/// Lifecycle of a marketplace listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Active,
    Sold,
    Withdrawn,
}

impl ListingStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Sold => "sold",
            Self::Withdrawn => "withdrawn",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binder_id_conversions() {
        let id = BinderId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(BinderId::from(42), id);
    }

    #[test]
    fn rarity_parses_only_known_values() {
        assert_eq!("mythic".parse::<Rarity>().unwrap(), Rarity::Mythic);
        assert_eq!("common".parse::<Rarity>().unwrap(), Rarity::Common);
        assert!("legendary".parse::<Rarity>().is_err());
        assert!("Mythic".parse::<Rarity>().is_err());
    }

    #[test]
    fn color_codes_round_trip_through_str() {
        for color in ColorCode::ALL {
            assert_eq!(color.as_code().parse::<ColorCode>().unwrap(), color);
        }
        assert!("X".parse::<ColorCode>().is_err());
        assert!("w".parse::<ColorCode>().is_err());
    }

    #[test]
    fn sort_order_accepts_only_uppercase_tokens() {
        assert_eq!("ASC".parse::<SortOrder>().unwrap(), SortOrder::Ascending);
        assert_eq!("DESC".parse::<SortOrder>().unwrap(), SortOrder::Descending);
        assert!("desc".parse::<SortOrder>().is_err());
        assert!("Asc".parse::<SortOrder>().is_err());
        assert!("sideways".parse::<SortOrder>().is_err());
        assert_eq!(SortOrder::Ascending.reversed(), SortOrder::Descending);
    }

    #[test]
    fn condition_serializes_snake_case() {
        let json = serde_json::to_string(&CardCondition::LightlyPlayed).unwrap();
        assert_eq!(json, "\"lightly_played\"");
        assert_eq!(
            "heavily_played".parse::<CardCondition>().unwrap(),
            CardCondition::HeavilyPlayed
        );
    }

    #[test]
    fn parse_error_lists_expected_values() {
        let err = "legendary".parse::<Rarity>().unwrap_err();
        assert!(err.to_string().contains("common, uncommon, rare, mythic"));
    }
}
