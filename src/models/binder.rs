use serde::{Deserialize, Serialize};

use crate::domain::{BinderId, CardCondition};

/// Binder header with aggregate figures, as shown in the binder list.
#[derive(Debug, Clone, Serialize)]
pub struct BinderSummary {
    pub id: BinderId,
    pub owner_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub card_count: i64,
    pub total_value: f64,
    pub created_at: String,
    pub updated_at: String,
}

/// One row of a binder: a quantity of a single printing in one condition.
#[derive(Debug, Clone, Serialize)]
pub struct BinderEntry {
    pub id: i32,
    pub printing_id: String,
    pub name: String,
    pub set_code: String,
    pub set_name: String,
    pub rarity: String,
    pub image_uri_small: Option<String>,
    pub quantity: i32,
    pub condition: CardCondition,
    pub foil: bool,
    /// Price of one copy: the foil price for foil entries when known.
    pub unit_price: Option<f64>,
    pub added_at: String,
}

impl BinderEntry {
    #[must_use]
    pub fn line_value(&self) -> f64 {
        self.unit_price.unwrap_or(0.0) * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BinderDetail {
    #[serde(flatten)]
    pub binder: BinderSummary,
    pub entries: Vec<BinderEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBinder {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BinderChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBinderCard {
    pub printing_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    #[serde(default)]
    pub condition: CardCondition,
    #[serde(default)]
    pub foil: bool,
}

const fn default_quantity() -> i32 {
    1
}

/// Sums `quantity * unit_price` over the entries.
#[must_use]
pub fn total_value(entries: &[BinderEntry]) -> f64 {
    entries.iter().map(BinderEntry::line_value).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(quantity: i32, unit_price: Option<f64>) -> BinderEntry {
        BinderEntry {
            id: 1,
            printing_id: "p1".to_string(),
            name: "Lightning Bolt".to_string(),
            set_code: "lea".to_string(),
            set_name: "Limited Edition Alpha".to_string(),
            rarity: "common".to_string(),
            image_uri_small: None,
            quantity,
            condition: CardCondition::NearMint,
            foil: false,
            unit_price,
            added_at: String::new(),
        }
    }

    #[test]
    fn total_value_multiplies_by_quantity() {
        let entries = vec![entry(4, Some(2.5)), entry(1, Some(10.0))];
        assert!((total_value(&entries) - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unpriced_entries_count_as_zero() {
        let entries = vec![entry(3, None), entry(2, Some(1.25))];
        assert!((total_value(&entries) - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn new_binder_card_defaults() {
        let card: NewBinderCard = serde_json::from_str(r#"{"printing_id":"abc"}"#).unwrap();
        assert_eq!(card.quantity, 1);
        assert_eq!(card.condition, CardCondition::NearMint);
        assert!(!card.foil);
    }
}
