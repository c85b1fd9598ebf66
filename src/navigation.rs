// 🧭 Navigation - screen state machine with a splash gate
//
// States: Loading → Active(route). The splash timer is the only way out of
// Loading. Once active, any route can be pushed; history is a plain stack
// whose root is the onboarding entry (or Home, once onboarding is done).

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Splash delay used when nothing else is configured
pub const DEFAULT_SPLASH_DELAY_MS: u64 = 2000;

// ============================================================================
// ROUTES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Onboarding1,
    Onboarding2,
    Onboarding3,
    Home,
    Transactions,
    Report,
    Profile,
    NewTransaction,
}

impl Route {
    /// Route table, in declaration order
    pub const ALL: [Route; 8] = [
        Route::Onboarding1,
        Route::Onboarding2,
        Route::Onboarding3,
        Route::Home,
        Route::Transactions,
        Route::Report,
        Route::Profile,
        Route::NewTransaction,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Onboarding1 => "onboarding1",
            Route::Onboarding2 => "onboarding2",
            Route::Onboarding3 => "onboarding3",
            Route::Home => "home",
            Route::Transactions => "transactions",
            Route::Report => "report",
            Route::Profile => "profile",
            Route::NewTransaction => "new_transaction",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        Route::ALL.iter().copied().find(|r| r.path() == path)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Onboarding1 | Route::Onboarding2 | Route::Onboarding3 => "Welcome",
            Route::Home => "Home",
            Route::Transactions => "Transactions",
            Route::Report => "Financial Report",
            Route::Profile => "Profile",
            Route::NewTransaction => "New Transaction",
        }
    }

    pub fn is_onboarding(&self) -> bool {
        matches!(self, Route::Onboarding1 | Route::Onboarding2 | Route::Onboarding3)
    }

    /// 1-based onboarding step, if this is an onboarding route
    pub fn onboarding_step(&self) -> Option<usize> {
        match self {
            Route::Onboarding1 => Some(1),
            Route::Onboarding2 => Some(2),
            Route::Onboarding3 => Some(3),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// The bottom bar is hidden during onboarding and on the add-transaction form.
pub fn is_bottom_bar_visible(route: Route) -> bool {
    !matches!(
        route,
        Route::Onboarding1 | Route::Onboarding2 | Route::Onboarding3 | Route::NewTransaction
    )
}

/// Items of the bottom bar (the floating "add" button sits between
/// Transactions and Report and opens `Route::NewTransaction`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BottomTab {
    Home,
    Transactions,
    Report,
    Profile,
}

impl BottomTab {
    pub const ALL: [BottomTab; 4] = [
        BottomTab::Home,
        BottomTab::Transactions,
        BottomTab::Report,
        BottomTab::Profile,
    ];

    pub fn route(&self) -> Route {
        match self {
            BottomTab::Home => Route::Home,
            BottomTab::Transactions => Route::Transactions,
            BottomTab::Report => Route::Report,
            BottomTab::Profile => Route::Profile,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BottomTab::Home => "Home",
            BottomTab::Transactions => "Transaction",
            BottomTab::Report => "Report",
            BottomTab::Profile => "Profile",
        }
    }

    pub fn for_route(route: Route) -> Option<BottomTab> {
        BottomTab::ALL.iter().copied().find(|tab| tab.route() == route)
    }
}

// ============================================================================
// CLOCK + SPLASH TIMER
// ============================================================================

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Hand-driven clock. Clones share the same time, so a test can keep one
/// handle and give another to the navigator.
#[derive(Debug, Clone)]
pub struct ManualClock {
    base: Instant,
    elapsed: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock {
            base: Instant::now(),
            elapsed: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.elapsed.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Pending,
    Fired,
    Cancelled,
}

/// One-shot timer that fires at most once
#[derive(Debug, Clone)]
pub struct SplashTimer {
    deadline: Instant,
    state: TimerState,
}

impl SplashTimer {
    pub fn start(now: Instant, delay: Duration) -> Self {
        SplashTimer {
            deadline: now + delay,
            state: TimerState::Pending,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Returns true exactly once: on the first poll at or after the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.state == TimerState::Pending && now >= self.deadline {
            self.state = TimerState::Fired;
            return true;
        }
        false
    }

    pub fn cancel(&mut self) {
        if self.state == TimerState::Pending {
            self.state = TimerState::Cancelled;
        }
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        match self.state {
            TimerState::Pending => self.deadline.saturating_duration_since(now),
            _ => Duration::ZERO,
        }
    }
}

// ============================================================================
// NAVIGATOR
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Loading,
    Active(Route),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// History was popped; the new current route
    Popped(Route),
    /// Nothing left to pop: the app should exit
    Exit,
}

pub struct Navigator<C: Clock = SystemClock> {
    clock: C,
    splash: SplashTimer,
    loading: bool,
    /// Back stack; the last entry is the current route, never empty
    history: Vec<Route>,
}

impl Navigator<SystemClock> {
    pub fn new(splash_delay: Duration) -> Self {
        Navigator::with_clock(SystemClock, splash_delay)
    }
}

impl<C: Clock> Navigator<C> {
    pub fn with_clock(clock: C, splash_delay: Duration) -> Self {
        let splash = SplashTimer::start(clock.now(), splash_delay);
        Navigator {
            clock,
            splash,
            loading: true,
            history: vec![Route::Onboarding1],
        }
    }

    pub fn state(&self) -> NavState {
        if self.loading {
            NavState::Loading
        } else {
            NavState::Active(self.current_route())
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Top of the back stack. While loading this is the start destination.
    pub fn current_route(&self) -> Route {
        self.history.last().copied().unwrap_or(Route::Onboarding1)
    }

    pub fn history(&self) -> &[Route] {
        &self.history
    }

    pub fn splash_remaining(&self) -> Duration {
        self.splash.remaining(self.clock.now())
    }

    /// Polls the splash timer. Returns true when this call left Loading.
    pub fn tick(&mut self) -> bool {
        if self.loading && self.splash.poll(self.clock.now()) {
            self.loading = false;
            tracing::debug!("splash finished, showing {}", self.current_route());
            return true;
        }
        false
    }

    /// Stops the splash timer; the navigator then stays in Loading.
    pub fn cancel_splash(&mut self) {
        self.splash.cancel();
    }

    /// Pushes `route`. With `clear_history_to`, history is first cut back to
    /// and including the most recent entry for that route (no-op if absent).
    pub fn navigate(&mut self, route: Route, clear_history_to: Option<Route>) {
        if self.loading {
            tracing::debug!("ignoring navigation to {} while loading", route);
            return;
        }

        if let Some(anchor) = clear_history_to {
            if let Some(pos) = self.history.iter().rposition(|r| *r == anchor) {
                self.history.truncate(pos);
            }
        }

        self.history.push(route);
        tracing::debug!("navigate → {} (depth {})", route, self.history.len());
    }

    pub fn go_back(&mut self) -> BackOutcome {
        if self.loading || self.history.len() <= 1 {
            return BackOutcome::Exit;
        }

        self.history.pop();
        let current = self.current_route();
        tracing::debug!("back → {}", current);
        BackOutcome::Popped(current)
    }

    /// Next button of the onboarding carousel. The last step lands on Home
    /// with every onboarding entry removed from history.
    pub fn advance_onboarding(&mut self) {
        match self.current_route() {
            Route::Onboarding1 => self.navigate(Route::Onboarding2, None),
            Route::Onboarding2 => self.navigate(Route::Onboarding3, None),
            Route::Onboarding3 => {
                self.history.retain(|r| !r.is_onboarding());
                self.navigate(Route::Home, None);
            }
            other => tracing::debug!("advance_onboarding ignored on {}", other),
        }
    }

    /// Back to the first onboarding page with an empty history (logout).
    pub fn restart(&mut self) {
        if self.loading {
            return;
        }
        self.history.clear();
        self.history.push(Route::Onboarding1);
        tracing::debug!("navigation restarted");
    }

    pub fn is_bottom_bar_visible(&self) -> bool {
        !self.loading && is_bottom_bar_visible(self.current_route())
    }

    pub fn selected_tab(&self) -> Option<BottomTab> {
        if self.loading {
            return None;
        }
        BottomTab::for_route(self.current_route())
    }
}

// ============================================================================
// TESTS
// ============================================================================
