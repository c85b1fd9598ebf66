// Entity Models
//
// Plain values shared by every screen:
// - Transaction: signed amount decides income vs expense
// - Category: closed superset enumeration with display data
// - ReportItem: one weighted slice for the report ring

pub mod category;
pub mod report;
pub mod transaction;

pub use category::{Category, Rgb, UnknownCategory};
pub use report::ReportItem;
pub use transaction::{format_amount, signed_amount_label, Transaction, TransactionKind, CURRENCY};
