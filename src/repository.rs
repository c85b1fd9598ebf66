// 📚 Transaction repository - where screens get their records
//
// Screens never build data themselves; they ask a `TransactionRepository`.
// `SampleRepository` re-seeds the built-in sample records on every call,
// `CsvRepository` reads them from a file with the same columns.

use crate::entities::{Category, ReportItem, Transaction, TransactionKind};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

pub trait TransactionRepository {
    fn list_transactions(&self) -> Result<Vec<Transaction>>;
}

// ============================================================================
// SAMPLE DATA
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct SampleRepository;

impl SampleRepository {
    pub fn new() -> Self {
        SampleRepository
    }
}

impl TransactionRepository for SampleRepository {
    fn list_transactions(&self) -> Result<Vec<Transaction>> {
        Ok(sample_transactions())
    }
}

/// Built-in records, newest first
pub fn sample_transactions() -> Vec<Transaction> {
    vec![
        Transaction::new("Salary", Some("Monthly salary"), 2500.0, "09:00 AM", Category::Income),
        Transaction::new("Shopping", Some("Buy some grocery"), -120.0, "10:00 AM", Category::Shopping),
        Transaction::new("Freelance", Some("Web design project"), 350.0, "02:15 PM", Category::Income),
        Transaction::new("Subscription", Some("Disney+ Annual.."), -80.0, "03:30 PM", Category::Subscription),
        Transaction::new("Food", Some("Buy a ramen"), -32.0, "07:30 PM", Category::Food),
        Transaction::new("Transportation", Some("Charging Tesla"), -18.0, "08:30 PM", Category::Transportation),
        Transaction::new("Salary", Some("Salary for July"), 5000.0, "04:30 PM", Category::Salary),
        Transaction::new("Freelance", None, 1200.0, "01:30 PM", Category::Freelance),
        Transaction::new("Dividends", Some("Index fund payout"), 1000.0, "11:00 AM", Category::PassiveIncome),
    ]
}

// ============================================================================
// CSV
// ============================================================================

/// Reads records from a CSV with `Title,Description,Amount,Time,Category`
/// headers. The file is re-read on every call.
#[derive(Debug, Clone)]
pub struct CsvRepository {
    path: PathBuf,
}

impl CsvRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvRepository { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TransactionRepository for CsvRepository {
    fn list_transactions(&self) -> Result<Vec<Transaction>> {
        load_csv(&self.path)
    }
}

pub fn load_csv(csv_path: &Path) -> Result<Vec<Transaction>> {
    let mut rdr = csv::Reader::from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file {}", csv_path.display()))?;

    let mut transactions = Vec::new();

    for (index, result) in rdr.deserialize().enumerate() {
        // header is line 1
        let transaction: Transaction = result
            .with_context(|| format!("Failed to deserialize transaction on line {}", index + 2))?;
        transactions.push(transaction);
    }

    tracing::debug!("loaded {} transactions from {}", transactions.len(), csv_path.display());
    Ok(transactions)
}

// ============================================================================
// EXPORT
// ============================================================================

/// Writes the records as pretty-printed JSON
pub fn export_json<W: Write>(transactions: &[Transaction], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, transactions).context("Failed to serialize transactions")?;
    writeln!(writer).context("Failed to finish export")?;
    Ok(())
}

pub fn export_json_file(transactions: &[Transaction], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file {}", path.display()))?;
    export_json(transactions, std::io::BufWriter::new(file))?;
    tracing::info!("exported {} transactions to {}", transactions.len(), path.display());
    Ok(())
}

// ============================================================================
// SCREEN SELECTORS
// ============================================================================

pub fn recent(transactions: &[Transaction], n: usize) -> Vec<Transaction> {
    transactions.iter().take(n).cloned().collect()
}

pub fn expenses(transactions: &[Transaction]) -> Vec<Transaction> {
    of_kind(transactions, TransactionKind::Expense)
}

pub fn incomes(transactions: &[Transaction]) -> Vec<Transaction> {
    of_kind(transactions, TransactionKind::Income)
}

fn of_kind(transactions: &[Transaction], kind: TransactionKind) -> Vec<Transaction> {
    transactions.iter().filter(|tx| tx.kind() == kind).cloned().collect()
}

/// Sum of incoming amounts
pub fn money_in(transactions: &[Transaction]) -> f64 {
    transactions.iter().filter(|tx| tx.is_income()).map(|tx| tx.amount).sum()
}

/// Sum of outgoing amounts, as a positive number
pub fn money_out(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|tx| !tx.is_income())
        .map(|tx| tx.amount.abs())
        .sum()
}

/// Per-category magnitudes for the report ring, in first-seen order
pub fn breakdown(transactions: &[Transaction], kind: TransactionKind) -> Vec<ReportItem> {
    let mut items: Vec<(Category, f64)> = Vec::new();

    for tx in transactions.iter().filter(|tx| tx.kind() == kind) {
        match items.iter_mut().find(|(category, _)| *category == tx.category) {
            Some((_, sum)) => *sum += tx.amount.abs(),
            None => items.push((tx.category, tx.amount.abs())),
        }
    }

    items
        .into_iter()
        .map(|(category, magnitude)| ReportItem::new(category.name(), magnitude, category.chart_color()))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_sample_repository_reseeds() {
        let repo = SampleRepository::new();
        let first = repo.list_transactions().unwrap();
        let second = repo.list_transactions().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 9);
    }

    #[test]
    fn test_recent_takes_head() {
        let txs = sample_transactions();
        let head = recent(&txs, 5);
        assert_eq!(head.len(), 5);
        assert_eq!(head[0].title, "Salary");
        assert_eq!(head[4].title, "Food");
        assert_eq!(recent(&txs, 100).len(), txs.len());
    }

    #[test]
    fn test_split_by_kind() {
        let txs = sample_transactions();
        let out = expenses(&txs);
        let inc = incomes(&txs);

        assert_eq!(out.len() + inc.len(), txs.len());
        assert!(out.iter().all(|tx| tx.amount < 0.0));
        assert!(inc.iter().all(|tx| tx.amount > 0.0));
    }

    #[test]
    fn test_money_in_and_out() {
        let txs = sample_transactions();
        assert_eq!(money_in(&txs), 2500.0 + 350.0 + 5000.0 + 1200.0 + 1000.0);
        assert_eq!(money_out(&txs), 120.0 + 80.0 + 32.0 + 18.0);
    }

    #[test]
    fn test_sample_income_report_has_every_income_category() {
        let items = breakdown(&sample_transactions(), TransactionKind::Income);
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Income", "Salary", "Freelance", "Passive Income"]);
        assert_eq!(items[3].magnitude, 1000.0);
        assert_eq!(items[3].color, Category::PassiveIncome.chart_color());
    }

    #[test]
    fn test_breakdown_groups_by_category() {
        let txs = vec![
            Transaction::new("Shopping", None, -120.0, "10:00 AM", Category::Shopping),
            Transaction::new("Food", None, -32.0, "07:30 PM", Category::Food),
            Transaction::new("Shopping", None, -30.0, "08:00 PM", Category::Shopping),
            Transaction::new("Salary", None, 5000.0, "09:00 AM", Category::Salary),
        ];

        let items = breakdown(&txs, TransactionKind::Expense);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Shopping");
        assert_eq!(items[0].magnitude, 150.0);
        assert_eq!(items[0].color, Category::Shopping.chart_color());
        assert_eq!(items[1].name, "Food");

        let income = breakdown(&txs, TransactionKind::Income);
        assert_eq!(income.len(), 1);
        assert_eq!(income[0].magnitude, 5000.0);
    }

    #[test]
    fn test_load_csv() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Title,Description,Amount,Time,Category").unwrap();
        writeln!(file, "Shopping,Buy some grocery,-120,10:00 AM,Shopping").unwrap();
        writeln!(file, "Side gig,,350.5,02:15 PM,freelance").unwrap();
        file.flush().unwrap();

        let repo = CsvRepository::new(file.path());
        let txs = repo.list_transactions().unwrap();

        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].description.as_deref(), Some("Buy some grocery"));
        assert_eq!(txs[0].category, Category::Shopping);
        assert_eq!(txs[1].description, None);
        assert_eq!(txs[1].amount, 350.5);
        assert_eq!(txs[1].category, Category::Freelance);
    }

    #[test]
    fn test_load_csv_unknown_category() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Title,Description,Amount,Time,Category").unwrap();
        writeln!(file, "Lottery,,100,10:00 AM,Lottery").unwrap();
        file.flush().unwrap();

        let err = load_csv(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
    }

    #[test]
    fn test_load_csv_missing_file() {
        let err = load_csv(Path::new("/nonexistent/transactions.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to open CSV file"));
    }

    #[test]
    fn test_export_json() {
        let txs = recent(&sample_transactions(), 2);
        let mut buffer = Vec::new();
        export_json(&txs, &mut buffer).unwrap();

        let parsed: Vec<Transaction> = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed, txs);

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value[1]["Category"], "Shopping");
    }

    #[test]
    fn test_export_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");

        export_json_file(&sample_transactions(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Charging Tesla"));
    }
}
