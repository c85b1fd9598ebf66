// 🏷️ Category - one closed enumeration for every screen
//
// Every screen used to carry its own category list (home had INCOME,
// the ledger had SALARY/FREELANCE, the form had Bills/Gift/...).
// This is the superset; each screen picks the subset it shows.
//
// Categories carry presentation data only. Income vs expense is decided
// by the transaction amount sign, never by the category.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// DISPLAY COLOR
// ============================================================================

/// Display color as `0xRRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const fn r(&self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    pub const fn g(&self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    pub const fn b(&self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Hex form, e.g. "#FF9800"
    pub fn hex(&self) -> String {
        format!("#{:06X}", self.0 & 0xFF_FFFF)
    }
}

// ============================================================================
// CATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    Income,
    Shopping,
    Subscription,
    Food,
    Transportation,
    Entertainment,
    Bills,
    Salary,
    Freelance,
    Investment,
    Gift,
    Business,
    PassiveIncome,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0:?}")]
pub struct UnknownCategory(pub String);

impl Category {
    pub const ALL: [Category; 13] = [
        Category::Income,
        Category::Shopping,
        Category::Subscription,
        Category::Food,
        Category::Transportation,
        Category::Entertainment,
        Category::Bills,
        Category::Salary,
        Category::Freelance,
        Category::Investment,
        Category::Gift,
        Category::Business,
        Category::PassiveIncome,
    ];

    /// Options offered by the add-transaction form in expense mode
    pub fn expense_choices() -> &'static [Category] {
        &[
            Category::Shopping,
            Category::Food,
            Category::Transportation,
            Category::Entertainment,
            Category::Bills,
        ]
    }

    /// Options offered by the add-transaction form in income mode
    pub fn income_choices() -> &'static [Category] {
        &[
            Category::Salary,
            Category::Investment,
            Category::Gift,
            Category::Business,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Category::Income => "Income",
            Category::Shopping => "Shopping",
            Category::Subscription => "Subscription",
            Category::Food => "Food",
            Category::Transportation => "Transportation",
            Category::Entertainment => "Entertainment",
            Category::Bills => "Bills",
            Category::Salary => "Salary",
            Category::Freelance => "Freelance",
            Category::Investment => "Investment",
            Category::Gift => "Gift",
            Category::Business => "Business",
            Category::PassiveIncome => "Passive Income",
        }
    }

    /// Case-insensitive lookup by display name. "Transport" is accepted as
    /// an alias because the form labels the category that way.
    pub fn from_name(name: &str) -> Option<Category> {
        let wanted = name.trim();
        if wanted.eq_ignore_ascii_case("transport") {
            return Some(Category::Transportation);
        }
        Category::ALL.iter().copied().find(|c| {
            c.name().eq_ignore_ascii_case(wanted)
                || c.name().replace(' ', "").eq_ignore_ascii_case(wanted)
        })
    }

    /// Light chip background behind the icon
    pub fn background(&self) -> Rgb {
        match self {
            Category::Income | Category::Salary => Rgb(0xE8F5E9),
            Category::Shopping => Rgb(0xFFF3E0),
            Category::Subscription | Category::Freelance => Rgb(0xF3E5F5),
            Category::Food => Rgb(0xFFEBEE),
            Category::Transportation => Rgb(0xE3F2FD),
            Category::Entertainment => Rgb(0xFCE4EC),
            Category::Bills => Rgb(0xECEFF1),
            Category::Investment => Rgb(0xE0F2F1),
            Category::Gift => Rgb(0xFFF8E1),
            Category::Business => Rgb(0xE8EAF6),
            Category::PassiveIncome => Rgb(0xEEEEEE),
        }
    }

    /// Icon tint, also used for list accents
    pub fn tint(&self) -> Rgb {
        match self {
            Category::Income | Category::Salary => Rgb(0x4CAF50),
            Category::Shopping => Rgb(0xFF9800),
            Category::Subscription | Category::Freelance => Rgb(0x9C27B0),
            Category::Food => Rgb(0xE91E63),
            Category::Transportation => Rgb(0x2196F3),
            Category::Entertainment => Rgb(0xD81B60),
            Category::Bills => Rgb(0x607D8B),
            Category::Investment => Rgb(0x009688),
            Category::Gift => Rgb(0xFFC107),
            Category::Business => Rgb(0x3F51B5),
            Category::PassiveIncome => Rgb(0x757575),
        }
    }

    /// Slice color on the report ring
    pub fn chart_color(&self) -> Rgb {
        match self {
            Category::Shopping => Rgb(0xFFA500),
            Category::Subscription => Rgb(0x9370DB),
            Category::Food => Rgb(0xFF6347),
            Category::Salary | Category::Income => Rgb(0x00A86B),
            other => other.tint(),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Income => "💰",
            Category::Shopping => "🛍",
            Category::Subscription => "📺",
            Category::Food => "🍜",
            Category::Transportation => "🚗",
            Category::Entertainment => "🎬",
            Category::Bills => "🧾",
            Category::Salary => "🏦",
            Category::Freelance => "💻",
            Category::Investment => "📈",
            Category::Gift => "🎁",
            Category::Business => "💼",
            Category::PassiveIncome => "🌱",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for Category {
    type Error = UnknownCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Category::from_name(&value).ok_or(UnknownCategory(value))
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.name().to_string()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(Category::from_name("shopping"), Some(Category::Shopping));
        assert_eq!(Category::from_name("  FOOD "), Some(Category::Food));
        assert_eq!(Category::from_name("passive income"), Some(Category::PassiveIncome));
        assert_eq!(Category::from_name("PassiveIncome"), Some(Category::PassiveIncome));
    }

    #[test]
    fn test_transport_alias() {
        assert_eq!(Category::from_name("Transport"), Some(Category::Transportation));
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(Category::from_name("Lottery"), None);
        let err = Category::try_from("Lottery".to_string()).unwrap_err();
        assert_eq!(err, UnknownCategory("Lottery".to_string()));
    }

    #[test]
    fn test_every_name_round_trips() {
        for category in Category::ALL {
            assert_eq!(Category::from_name(category.name()), Some(category));
        }
    }

    #[test]
    fn test_form_choices_do_not_overlap() {
        for c in Category::expense_choices() {
            assert!(!Category::income_choices().contains(c));
        }
    }

    #[test]
    fn test_rgb_channels() {
        let c = Rgb(0xFF9800);
        assert_eq!((c.r(), c.g(), c.b()), (0xFF, 0x98, 0x00));
        assert_eq!(c.hex(), "#FF9800");
    }
}
