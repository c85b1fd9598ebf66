// 💸 Transaction - the one canonical record every screen renders
//
// The sign of `amount` is the only thing that separates income from
// expense. Records are values: built once, cloned out, never mutated.

use super::category::Category;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display currency for every amount label
pub const CURRENCY: &str = "Ksh";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Expense => "Expense",
            TransactionKind::Income => "Income",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            TransactionKind::Expense => TransactionKind::Income,
            TransactionKind::Income => TransactionKind::Expense,
        }
    }

    /// "-" for expenses, "+" for income
    pub fn sign(&self) -> &'static str {
        match self {
            TransactionKind::Expense => "-",
            TransactionKind::Income => "+",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Headline shown in bold on the row ("Shopping", "Salary", ...)
    #[serde(rename = "Title")]
    pub title: String,

    /// Secondary line; some sample rows never had one
    #[serde(rename = "Description", default)]
    pub description: Option<String>,

    /// Signed amount: positive = income, negative = expense
    #[serde(rename = "Amount")]
    pub amount: f64,

    /// Time-of-day label as displayed ("10:00 AM")
    #[serde(rename = "Time")]
    pub time: String,

    #[serde(rename = "Category")]
    pub category: Category,
}

impl Transaction {
    pub fn new(
        title: impl Into<String>,
        description: Option<&str>,
        amount: f64,
        time: impl Into<String>,
        category: Category,
    ) -> Self {
        Transaction {
            title: title.into(),
            description: description.map(str::to_string),
            amount,
            time: time.into(),
            category,
        }
    }

    pub fn kind(&self) -> TransactionKind {
        if self.amount > 0.0 {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind() == TransactionKind::Income
    }

    /// "+ Ksh 2500" / "- Ksh 120"
    pub fn amount_label(&self) -> String {
        signed_amount_label(self.kind(), self.amount.abs())
    }
}

/// Formats a magnitude with the currency, dropping ".00" for whole amounts
pub fn format_amount(magnitude: f64) -> String {
    if magnitude.fract() == 0.0 {
        format!("{} {:.0}", CURRENCY, magnitude)
    } else {
        format!("{} {:.2}", CURRENCY, magnitude)
    }
}

pub fn signed_amount_label(kind: TransactionKind, magnitude: f64) -> String {
    format!("{} {}", kind.sign(), format_amount(magnitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_follows_amount_sign() {
        let salary = Transaction::new("Salary", None, 2500.0, "09:00 AM", Category::Income);
        let food = Transaction::new("Food", Some("Buy a ramen"), -32.0, "07:30 PM", Category::Food);

        assert_eq!(salary.kind(), TransactionKind::Income);
        assert_eq!(food.kind(), TransactionKind::Expense);
        assert!(salary.is_income());
    }

    #[test]
    fn test_amount_label() {
        let food = Transaction::new("Food", None, -32.0, "07:30 PM", Category::Food);
        assert_eq!(food.amount_label(), "- Ksh 32");

        let tip = Transaction::new("Gift", None, 12.5, "01:00 PM", Category::Gift);
        assert_eq!(tip.amount_label(), "+ Ksh 12.50");
    }

    #[test]
    fn test_kind_toggle() {
        assert_eq!(TransactionKind::Expense.toggle(), TransactionKind::Income);
        assert_eq!(TransactionKind::Income.toggle(), TransactionKind::Expense);
    }
}
