// App state for the terminal UI
//
// One owned container: the navigator, the injected repository and the
// per-screen state. Render functions borrow it; key handling mutates it.

use crate::entities::{Transaction, TransactionKind};
use crate::form::{FormError, TransactionForm};
use crate::navigation::{BackOutcome, BottomTab, Clock, Navigator, Route, SystemClock};
use crate::repository::{self, TransactionRepository};
use crate::AppConfig;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::TableState;

/// Number of rows in the home screen's "Recent Transactions"
pub const RECENT_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Focus order of the add-transaction form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Kind,
    Amount,
    Category,
    Title,
    Description,
    Date,
    Time,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::Kind,
        FormField::Amount,
        FormField::Category,
        FormField::Title,
        FormField::Description,
        FormField::Date,
        FormField::Time,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Kind => "Type",
            FormField::Amount => "Amount",
            FormField::Category => "Category",
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Date => "Date",
            FormField::Time => "Time",
        }
    }

    fn index(&self) -> usize {
        FormField::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        FormField::ALL[(self.index() + 1) % FormField::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        let len = FormField::ALL.len();
        FormField::ALL[(self.index() + len - 1) % len]
    }
}

pub struct App<C: Clock = SystemClock> {
    pub navigator: Navigator<C>,
    repository: Box<dyn TransactionRepository>,
    pub config: AppConfig,
    /// Records for the current screen, reloaded on every route change
    pub transactions: Vec<Transaction>,
    pub report_tab: TransactionKind,
    pub list_state: TableState,
    pub form: Option<TransactionForm>,
    pub form_focus: FormField,
    pub show_logout: bool,
    /// One-line feedback shown in the status bar
    pub status: Option<String>,
}

impl App<SystemClock> {
    pub fn new(repository: Box<dyn TransactionRepository>, config: AppConfig) -> Self {
        let navigator = Navigator::new(config.splash_delay);
        App::with_navigator(navigator, repository, config)
    }
}

impl<C: Clock> App<C> {
    pub fn with_navigator(
        navigator: Navigator<C>,
        repository: Box<dyn TransactionRepository>,
        config: AppConfig,
    ) -> Self {
        let mut app = App {
            navigator,
            repository,
            config,
            transactions: Vec::new(),
            report_tab: TransactionKind::Expense,
            list_state: TableState::default(),
            form: None,
            form_focus: FormField::Kind,
            show_logout: false,
            status: None,
        };
        app.on_route_changed();
        app
    }

    pub fn route(&self) -> Route {
        self.navigator.current_route()
    }

    /// Drives the splash timer; returns true when the main UI just appeared.
    pub fn tick(&mut self) -> bool {
        let fired = self.navigator.tick();
        if fired {
            self.on_route_changed();
        }
        fired
    }

    // ========================================================================
    // SCREEN DATA
    // ========================================================================

    fn reload(&mut self) {
        match self.repository.list_transactions() {
            Ok(transactions) => self.transactions = transactions,
            Err(err) => {
                tracing::error!("failed to load transactions: {:#}", err);
                self.transactions.clear();
                self.status = Some(format!("Could not load transactions: {}", err));
            }
        }
    }

    fn on_route_changed(&mut self) {
        self.reload();
        self.show_logout = false;

        let route = self.route();
        if route == Route::NewTransaction {
            if self.form.is_none() {
                self.form = Some(TransactionForm::now());
                self.form_focus = FormField::Kind;
            }
        } else {
            self.form = None;
        }

        let rows = self.transaction_rows().len();
        self.list_state.select(if rows > 0 { Some(0) } else { None });
    }

    pub fn recent_transactions(&self) -> Vec<Transaction> {
        repository::recent(&self.transactions, RECENT_COUNT)
    }

    /// Rows of the transaction screen: expenses first, then income
    pub fn transaction_rows(&self) -> Vec<Transaction> {
        let mut rows = repository::expenses(&self.transactions);
        rows.extend(repository::incomes(&self.transactions));
        rows
    }

    pub fn selected_transaction(&self) -> Option<Transaction> {
        let index = self.list_state.selected()?;
        self.transaction_rows().into_iter().nth(index)
    }

    // ========================================================================
    // NAVIGATION
    // ========================================================================

    fn navigate(&mut self, route: Route) {
        if route == self.route() {
            return;
        }
        self.navigator.navigate(route, None);
        self.on_route_changed();
    }

    fn back(&mut self) -> Control {
        match self.navigator.go_back() {
            BackOutcome::Popped(_) => {
                self.on_route_changed();
                Control::Continue
            }
            BackOutcome::Exit => Control::Quit,
        }
    }

    pub fn select_tab(&mut self, tab: BottomTab) {
        self.navigate(tab.route());
    }

    // ========================================================================
    // KEYS
    // ========================================================================

    pub fn handle_key(&mut self, key: KeyEvent) -> Control {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.navigator.cancel_splash();
            return Control::Quit;
        }

        if self.navigator.is_loading() {
            if matches!(key.code, KeyCode::Char('q')) {
                self.navigator.cancel_splash();
                return Control::Quit;
            }
            return Control::Continue;
        }

        if self.show_logout {
            self.handle_logout_key(key);
            return Control::Continue;
        }

        if self.route() == Route::NewTransaction {
            return self.handle_form_key(key);
        }

        match key.code {
            KeyCode::Char('q') => return Control::Quit,
            KeyCode::Esc | KeyCode::Backspace => return self.back(),
            _ => {}
        }

        if self.navigator.is_bottom_bar_visible() {
            let tab = match key.code {
                KeyCode::Char('1') => Some(BottomTab::Home),
                KeyCode::Char('2') => Some(BottomTab::Transactions),
                KeyCode::Char('3') => Some(BottomTab::Report),
                KeyCode::Char('4') => Some(BottomTab::Profile),
                _ => None,
            };
            if let Some(tab) = tab {
                self.select_tab(tab);
                return Control::Continue;
            }
            if matches!(key.code, KeyCode::Char('a') | KeyCode::Char('+')) {
                self.navigate(Route::NewTransaction);
                return Control::Continue;
            }
        }

        match self.route() {
            Route::Onboarding1 | Route::Onboarding2 | Route::Onboarding3 => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Right | KeyCode::Char(' ')) {
                    self.navigator.advance_onboarding();
                    self.on_route_changed();
                }
            }
            Route::Home => {
                if key.code == KeyCode::Char('s') {
                    self.navigate(Route::Transactions);
                }
            }
            Route::Transactions => match key.code {
                KeyCode::Down | KeyCode::Char('j') => self.select_next(),
                KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
                _ => {}
            },
            Route::Report => {
                if matches!(key.code, KeyCode::Left | KeyCode::Right | KeyCode::Tab) {
                    self.report_tab = self.report_tab.toggle();
                }
            }
            Route::Profile => match key.code {
                KeyCode::Char('e') => self.export(),
                KeyCode::Char('l') => self.show_logout = true,
                _ => {}
            },
            Route::NewTransaction => {}
        }

        Control::Continue
    }

    fn select_next(&mut self) {
        let len = self.transaction_rows().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn select_previous(&mut self) {
        let len = self.transaction_rows().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    fn handle_logout_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                tracing::info!("logged out");
                self.navigator.restart();
                self.on_route_changed();
                self.status = Some("Logged out".to_string());
            }
            KeyCode::Char('n') | KeyCode::Esc => self.show_logout = false,
            _ => {}
        }
    }

    fn export(&mut self) {
        let path = self.config.export_path.clone();
        self.status = Some(match repository::export_json_file(&self.transactions, &path) {
            Ok(()) => format!("Exported {} transactions to {}", self.transactions.len(), path.display()),
            Err(err) => {
                tracing::error!("export failed: {:#}", err);
                format!("Export failed: {}", err)
            }
        });
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Control {
        match key.code {
            KeyCode::Esc => return self.back(),
            KeyCode::Tab | KeyCode::Down => {
                self.form_focus = self.form_focus.next();
                return Control::Continue;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.form_focus = self.form_focus.previous();
                return Control::Continue;
            }
            KeyCode::Enter => return self.submit_form(),
            _ => {}
        }

        let focus = self.form_focus;
        let Some(form) = self.form.as_mut() else {
            return Control::Continue;
        };

        match (focus, key.code) {
            (FormField::Kind, KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')) => form.toggle_kind(),
            (FormField::Category, KeyCode::Right | KeyCode::Char(' ')) => form.cycle_category(true),
            (FormField::Category, KeyCode::Left) => form.cycle_category(false),
            (FormField::Date, KeyCode::Right) => form.shift_date(1),
            (FormField::Date, KeyCode::Left) => form.shift_date(-1),
            (FormField::Time, KeyCode::Right) => form.shift_time(5),
            (FormField::Time, KeyCode::Left) => form.shift_time(-5),
            (FormField::Amount, KeyCode::Char(c)) => {
                let mut text = form.amount().to_string();
                text.push(c);
                form.set_amount(&text);
            }
            (FormField::Amount, KeyCode::Backspace) => {
                let mut text = form.amount().to_string();
                text.pop();
                form.set_amount(&text);
            }
            (FormField::Title, KeyCode::Char(c)) => {
                let mut text = form.title().to_string();
                text.push(c);
                form.set_title(&text);
            }
            (FormField::Title, KeyCode::Backspace) => {
                let mut text = form.title().to_string();
                text.pop();
                form.set_title(&text);
            }
            (FormField::Description, KeyCode::Char(c)) => {
                let mut text = form.description().to_string();
                text.push(c);
                form.set_description(&text);
            }
            (FormField::Description, KeyCode::Backspace) => {
                let mut text = form.description().to_string();
                text.pop();
                form.set_description(&text);
            }
            _ => {}
        }

        Control::Continue
    }

    fn submit_form(&mut self) -> Control {
        let Some(form) = self.form.as_mut() else {
            return Control::Continue;
        };

        match form.submit() {
            Ok(draft) => {
                let transaction = draft.into_transaction();
                // nothing is persisted; the record only goes to the log
                tracing::info!(
                    "transaction captured: {} {} ({})",
                    transaction.title,
                    transaction.amount_label(),
                    transaction.category
                );
                self.status = Some(format!("Added {} {}", transaction.title, transaction.amount_label()));
                self.back()
            }
            Err(FormError::Invalid(errors)) => {
                tracing::debug!("form rejected: {:?}", errors);
                Control::Continue
            }
            Err(FormError::AlreadySubmitted) => Control::Continue,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
