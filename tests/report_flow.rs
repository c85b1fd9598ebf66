// End-to-end checks over the public library API

use std::time::Duration;
use veasy::repository::{breakdown, recent};
use veasy::{
    arc_segments, draw_ring, is_bottom_bar_visible, report_total, BackOutcome, Category,
    ChartError, ManualClock, Navigator, ReportItem, Rgb, RingOutcome, RingStyle, RingSurface,
    Route, SampleRepository, TransactionForm, TransactionKind, TransactionRepository,
};

struct CountingSurface {
    arcs: usize,
}

impl RingSurface for CountingSurface {
    fn draw_track(&mut self, _radius: f64, _stroke_width: f64, _color: Rgb) {}

    fn draw_arc(&mut self, _start: f64, _sweep: f64, _radius: f64, _stroke: f64, _color: Rgb) {
        self.arcs += 1;
    }
}

#[test]
fn test_sample_expense_report_closes_the_ring() {
    let transactions = SampleRepository::new().list_transactions().unwrap();
    let items = breakdown(&recent(&transactions, 5), TransactionKind::Expense);

    let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["Shopping", "Subscription", "Food"]);

    let total = report_total(&items);
    assert_eq!(total, 232.0);

    let segments = arc_segments(total, &items).unwrap();
    assert_eq!(segments[0].start_angle_deg, -90.0);
    let swept: f64 = segments.iter().map(|s| s.sweep_angle_deg).sum();
    assert!((swept - 360.0).abs() < 1e-9);
}

#[test]
fn test_income_report() {
    let items = vec![
        ReportItem::new("Salary", 5000.0, Category::Salary.chart_color()),
        ReportItem::new("Passive Income", 1000.0, Category::PassiveIncome.chart_color()),
    ];
    let segments = arc_segments(6000.0, &items).unwrap();
    assert!((segments[0].sweep_angle_deg - 300.0).abs() < 1e-9);
    assert!((segments[1].start_angle_deg - 210.0).abs() < 1e-9);
    assert!((segments[1].sweep_angle_deg - 60.0).abs() < 1e-9);
}

#[test]
fn test_empty_report_renders_placeholder() {
    let mut surface = CountingSurface { arcs: 0 };
    let outcome = draw_ring(&mut surface, report_total(&[]), &[], &RingStyle::default());

    assert!(matches!(outcome, RingOutcome::Placeholder(ChartError::InvalidInput(_))));
    assert_eq!(surface.arcs, 0);
}

#[test]
fn test_onboarding_then_add_transaction_round_trip() {
    let clock = ManualClock::new();
    let mut nav = Navigator::with_clock(clock.clone(), Duration::from_millis(2000));
    clock.advance(Duration::from_secs(2));
    nav.tick();

    nav.navigate(Route::Onboarding2, None);
    nav.navigate(Route::Onboarding3, None);
    nav.navigate(Route::Home, Some(Route::Onboarding1));
    assert!(is_bottom_bar_visible(nav.current_route()));

    nav.navigate(Route::NewTransaction, None);
    let mut form = TransactionForm::now();
    assert!(form.submit().is_err());
    form.set_amount("12.50");
    form.select_category(Some(Category::Food));
    form.set_title("Lunch");
    let transaction = form.submit().unwrap().into_transaction();
    assert_eq!(transaction.kind(), TransactionKind::Expense);

    assert_eq!(nav.go_back(), BackOutcome::Popped(Route::Home));
    assert_eq!(nav.go_back(), BackOutcome::Exit);
    assert!(!nav.history().iter().any(|r| r.is_onboarding()));
}
