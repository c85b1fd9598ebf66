// 📝 Add-transaction form - field state and validation
//
// The form never raises: failing fields are reported inline and the user
// may retry as often as they like. A successful submit hands back a draft
// exactly once; the screen is expected to close afterwards.

use crate::entities::{Category, Transaction, TransactionKind};
use chrono::{Duration, Local, NaiveDate, NaiveTime};
use thiserror::Error;

pub const AMOUNT_ERROR: &str = "Please enter a valid amount";
pub const CATEGORY_ERROR: &str = "Please select a category";
pub const TITLE_ERROR: &str = "Title is required";

/// Per-field validation messages; `None` means the field is fine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub amount: Option<&'static str>,
    pub category: Option<&'static str>,
    pub title: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.category.is_none() && self.title.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("form has invalid fields")]
    Invalid(FieldErrors),
    #[error("form was already submitted")]
    AlreadySubmitted,
}

/// Validated form contents, ready to become a `Transaction`
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    /// Positive magnitude as typed
    pub amount: f64,
    pub category: Category,
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl TransactionDraft {
    pub fn into_transaction(self) -> Transaction {
        let amount = match self.kind {
            TransactionKind::Expense => -self.amount,
            TransactionKind::Income => self.amount,
        };
        Transaction {
            title: self.title,
            description: self.description,
            amount,
            time: self.time.format("%H:%M").to_string(),
            category: self.category,
        }
    }
}

// ============================================================================
// FORM STATE
// ============================================================================

#[derive(Debug, Clone)]
pub struct TransactionForm {
    kind: TransactionKind,
    amount: String,
    category: Option<Category>,
    title: String,
    description: String,
    date: NaiveDate,
    time: NaiveTime,
    show_errors: bool,
    submitted: bool,
}

impl TransactionForm {
    /// Empty expense form stamped with the given moment
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        TransactionForm {
            kind: TransactionKind::Expense,
            amount: String::new(),
            category: None,
            title: String::new(),
            description: String::new(),
            date,
            time,
            show_errors: false,
            submitted: false,
        }
    }

    pub fn now() -> Self {
        let now = Local::now().naive_local();
        Self::new(now.date(), now.time())
    }

    // ------------------------------------------------------------------
    // accessors
    // ------------------------------------------------------------------

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn show_errors(&self) -> bool {
        self.show_errors
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Categories offered for the current kind
    pub fn category_choices(&self) -> &'static [Category] {
        match self.kind {
            TransactionKind::Expense => Category::expense_choices(),
            TransactionKind::Income => Category::income_choices(),
        }
    }

    // ------------------------------------------------------------------
    // edits
    // ------------------------------------------------------------------

    /// Switching kind drops a category the new kind does not offer.
    pub fn set_kind(&mut self, kind: TransactionKind) {
        self.kind = kind;
        if let Some(category) = self.category {
            if !self.category_choices().contains(&category) {
                self.category = None;
            }
        }
    }

    pub fn toggle_kind(&mut self) {
        self.set_kind(self.kind.toggle());
    }

    /// Replaces the amount text if it looks like `^\d*\.?\d*$`.
    /// Returns false (and keeps the old text) otherwise.
    pub fn set_amount(&mut self, text: &str) -> bool {
        if !is_amount_text(text) {
            return false;
        }
        self.amount = text.to_string();
        true
    }

    /// Only categories offered for the current kind are accepted.
    pub fn select_category(&mut self, category: Option<Category>) -> bool {
        match category {
            Some(c) if !self.category_choices().contains(&c) => false,
            _ => {
                self.category = category;
                true
            }
        }
    }

    /// Steps through the offered categories, starting from the first
    pub fn cycle_category(&mut self, forward: bool) {
        let choices = self.category_choices();
        let len = choices.len();
        let next = match self.category.and_then(|c| choices.iter().position(|x| *x == c)) {
            None if forward => 0,
            None => len - 1,
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
        };
        self.category = Some(choices[next]);
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
    }

    pub fn shift_date(&mut self, days: i64) {
        if let Some(date) = self.date.checked_add_signed(Duration::days(days)) {
            self.date = date;
        }
    }

    /// Wraps around midnight
    pub fn shift_time(&mut self, minutes: i64) {
        let (time, _) = self.time.overflowing_add_signed(Duration::minutes(minutes));
        self.time = time;
    }

    // ------------------------------------------------------------------
    // validation
    // ------------------------------------------------------------------

    fn parsed_amount(&self) -> Option<f64> {
        self.amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && *value > 0.0)
    }

    pub fn field_errors(&self) -> FieldErrors {
        FieldErrors {
            amount: self.parsed_amount().is_none().then_some(AMOUNT_ERROR),
            category: self.category.is_none().then_some(CATEGORY_ERROR),
            title: self.title.trim().is_empty().then_some(TITLE_ERROR),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.field_errors().is_empty()
    }

    /// Turns on inline errors and, if every field passes, hands out the
    /// draft. A form only ever yields one draft.
    pub fn submit(&mut self) -> Result<TransactionDraft, FormError> {
        if self.submitted {
            return Err(FormError::AlreadySubmitted);
        }
        self.show_errors = true;

        let errors = self.field_errors();
        let (Some(amount), Some(category)) = (self.parsed_amount(), self.category) else {
            return Err(FormError::Invalid(errors));
        };
        if !errors.is_empty() {
            return Err(FormError::Invalid(errors));
        }

        self.submitted = true;
        let description = self.description.trim();
        Ok(TransactionDraft {
            kind: self.kind,
            amount,
            category,
            title: self.title.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            date: self.date,
            time: self.time,
        })
    }
}

/// Digits with at most one decimal point (empty allowed while typing)
fn is_amount_text(text: &str) -> bool {
    let mut seen_dot = false;
    text.chars().all(|c| match c {
        '0'..='9' => true,
        '.' if !seen_dot => {
            seen_dot = true;
            true
        }
        _ => false,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> TransactionForm {
        TransactionForm::new(
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
        )
    }

    fn filled() -> TransactionForm {
        let mut f = form();
        assert!(f.set_amount("12.50"));
        f.select_category(Some(Category::Food));
        f.set_title("Lunch");
        f
    }

    #[test]
    fn test_amount_filter() {
        let mut f = form();
        assert!(f.set_amount("12.50"));
        assert!(!f.set_amount("-5"));
        assert_eq!(f.amount(), "12.50");
        assert!(!f.set_amount("1.2.3"));
        assert!(!f.set_amount("12a"));
        assert!(f.set_amount(""));
        assert!(f.set_amount("."));
    }

    #[test]
    fn test_negative_amount_is_invalid() {
        let mut f = filled();
        // bypasses the input filter on purpose
        f.amount = "-5".to_string();
        assert_eq!(f.field_errors().amount, Some(AMOUNT_ERROR));
    }

    #[test]
    fn test_amount_validity() {
        let mut f = filled();
        assert_eq!(f.field_errors().amount, None);

        for bad in ["", ".", "0", "0.00"] {
            f.set_amount(bad);
            assert_eq!(f.field_errors().amount, Some(AMOUNT_ERROR), "{:?}", bad);
        }
    }

    #[test]
    fn test_blank_title_is_invalid() {
        let mut f = filled();
        f.set_title("   ");
        assert_eq!(f.field_errors().title, Some(TITLE_ERROR));
        f.set_title("");
        assert!(!f.is_valid());
    }

    #[test]
    fn test_missing_category_is_invalid() {
        let mut f = filled();
        f.select_category(None);
        assert_eq!(f.field_errors().category, Some(CATEGORY_ERROR));
    }

    #[test]
    fn test_submit_invalid_reports_every_field() {
        let mut f = form();
        assert!(!f.show_errors());

        let err = f.submit().unwrap_err();
        assert!(f.show_errors());
        assert_eq!(
            err,
            FormError::Invalid(FieldErrors {
                amount: Some(AMOUNT_ERROR),
                category: Some(CATEGORY_ERROR),
                title: Some(TITLE_ERROR),
            })
        );

        // retry is allowed
        assert!(matches!(f.submit(), Err(FormError::Invalid(_))));
    }

    #[test]
    fn test_submit_once() {
        let mut f = filled();
        let draft = f.submit().unwrap();
        assert_eq!(draft.amount, 12.5);
        assert_eq!(draft.category, Category::Food);
        assert_eq!(draft.title, "Lunch");
        assert_eq!(draft.description, None);

        assert_eq!(f.submit(), Err(FormError::AlreadySubmitted));
    }

    #[test]
    fn test_switching_kind_drops_foreign_category() {
        let mut f = filled();
        f.toggle_kind();
        assert_eq!(f.kind(), TransactionKind::Income);
        assert_eq!(f.category(), None);

        f.select_category(Some(Category::Gift));
        f.set_kind(TransactionKind::Income);
        assert_eq!(f.category(), Some(Category::Gift));
    }

    #[test]
    fn test_select_rejects_other_kind() {
        let mut f = form();
        assert!(!f.select_category(Some(Category::Salary)));
        assert_eq!(f.category(), None);
    }

    #[test]
    fn test_cycle_category_wraps() {
        let mut f = form();
        f.cycle_category(true);
        assert_eq!(f.category(), Some(Category::Shopping));
        f.cycle_category(false);
        assert_eq!(f.category(), Some(Category::Bills));
        f.cycle_category(true);
        assert_eq!(f.category(), Some(Category::Shopping));
    }

    #[test]
    fn test_draft_into_transaction() {
        let mut f = filled();
        f.set_description(" noodles ");
        let tx = f.submit().unwrap().into_transaction();

        assert_eq!(tx.amount, -12.5);
        assert_eq!(tx.time, "10:30");
        assert_eq!(tx.description.as_deref(), Some("noodles"));

        let mut income = form();
        income.set_kind(TransactionKind::Income);
        income.set_amount("100");
        income.select_category(Some(Category::Salary));
        income.set_title("Pay");
        let tx = income.submit().unwrap().into_transaction();
        assert_eq!(tx.amount, 100.0);
        assert!(tx.is_income());
    }

    #[test]
    fn test_shift_date_and_time() {
        let mut f = form();
        f.shift_date(-1);
        assert_eq!(f.date(), NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
        f.shift_time(14 * 60);
        assert_eq!(f.time(), NaiveTime::from_hms_opt(0, 30, 0).unwrap());
    }
}
