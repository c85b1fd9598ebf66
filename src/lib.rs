// vEasy - personal finance core library
// Exposes navigation, chart geometry, form and data access to the
// terminal UI, the headless commands and the tests

pub mod chart;
pub mod entities;
pub mod form;
pub mod navigation;
pub mod repository;

#[cfg(feature = "tui")]
pub mod ui;

use std::path::PathBuf;
use std::time::Duration;

// Re-export commonly used types
pub use chart::{
    arc_points, arc_segments, draw_ring, list_rows, report_total,
    ArcSegment, ChartError, ReportRow, RingOutcome, RingStyle, RingSurface, START_ANGLE_DEG,
};
pub use entities::{Category, ReportItem, Rgb, Transaction, TransactionKind};
pub use form::{FieldErrors, FormError, TransactionDraft, TransactionForm};
pub use navigation::{
    is_bottom_bar_visible, BackOutcome, BottomTab, Clock, ManualClock, NavState, Navigator,
    Route, SplashTimer, SystemClock, DEFAULT_SPLASH_DELAY_MS,
};
pub use repository::{
    export_json, export_json_file, load_csv, sample_transactions,
    CsvRepository, SampleRepository, TransactionRepository,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Where the profile screen writes "Export Data" when nothing is configured
pub const DEFAULT_EXPORT_PATH: &str = "transactions.json";

/// Runtime settings resolved from the command line
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub splash_delay: Duration,
    pub export_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            splash_delay: Duration::from_millis(DEFAULT_SPLASH_DELAY_MS),
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
        }
    }
}
