use super::app::{App, FormField};
use super::ring::{to_color, CanvasRing};
use crate::chart::{draw_ring, list_rows, report_total, RingOutcome, RingStyle};
use crate::entities::{format_amount, Transaction, TransactionKind};
use crate::form::TransactionForm;
use crate::navigation::{BottomTab, Clock, Route};
use crate::repository;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::Canvas, Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap,
    },
    Frame,
};

const ACCENT: Color = Color::Rgb(0x6B, 0x4E, 0xFF);
const INCOME: Color = Color::Rgb(0x4C, 0xAF, 0x50);
const EXPENSE: Color = Color::Rgb(0xE5, 0x39, 0x35);

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

struct OnboardingPage {
    title: &'static str,
    description: &'static str,
    button: &'static str,
}

fn onboarding_page(step: usize) -> OnboardingPage {
    match step {
        1 => OnboardingPage {
            title: "Gain total control of your money",
            description: "Become your own money manager and make every cent count",
            button: "Next",
        },
        2 => OnboardingPage {
            title: "Know where your money goes",
            description: "Track your transaction easily, with categories and financial report",
            button: "Next",
        },
        _ => OnboardingPage {
            title: "Planning ahead",
            description: "Setup your budget for each category so you stay in control",
            button: "Get Started",
        },
    }
}

pub fn ui<C: Clock>(f: &mut Frame, app: &mut App<C>) {
    let area = f.size();
    if app.navigator.is_loading() {
        render_loading(f, area, app);
        return;
    }

    let bar_height = if app.navigator.is_bottom_bar_visible() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),          // Header
            Constraint::Min(0),             // Screen
            Constraint::Length(bar_height), // Bottom navigation
            Constraint::Length(1),          // Status line
        ])
        .split(area);

    render_header(f, chunks[0], app.route());

    match app.route() {
        Route::Onboarding1 | Route::Onboarding2 | Route::Onboarding3 => {
            render_onboarding(f, chunks[1], app.route())
        }
        Route::Home => render_home(f, chunks[1], app),
        Route::Transactions => render_transactions(f, chunks[1], app),
        Route::Report => render_report(f, chunks[1], app),
        Route::Profile => render_profile(f, chunks[1], app),
        Route::NewTransaction => render_form(f, chunks[1], app),
    }

    if bar_height > 0 {
        render_bottom_bar(f, chunks[2], app.navigator.selected_tab());
    }
    render_status(f, chunks[3], app);

    if app.show_logout {
        render_logout_dialog(f, area);
    }
}

fn render_loading<C: Clock>(f: &mut Frame, area: Rect, app: &App<C>) {
    let frame = (app.navigator.splash_remaining().as_millis() / 150) as usize % SPINNER.len();
    let text = vec![
        Line::from(Span::styled(SPINNER[frame], Style::default().fg(ACCENT))),
        Line::from(""),
        Line::from(Span::styled("Loading...", Style::default().fg(Color::DarkGray))),
    ];
    let height = text.len() as u16;
    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    f.render_widget(paragraph, centered(area, area.width, height));
}

fn render_header(f: &mut Frame, area: Rect, route: Route) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" vEasy ", Style::default().fg(Color::White).bg(ACCENT).add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(route.title(), Style::default().add_modifier(Modifier::BOLD)),
    ]))
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(ACCENT)));

    f.render_widget(header, area);
}

fn render_onboarding(f: &mut Frame, area: Rect, route: Route) {
    let step = route.onboarding_step().unwrap_or(1);
    let page = onboarding_page(step);

    let dots: Vec<Span> = (1..=3)
        .map(|i| {
            if i == step {
                Span::styled("● ", Style::default().fg(ACCENT))
            } else {
                Span::styled("○ ", Style::default().fg(Color::DarkGray))
            }
        })
        .collect();

    let text = vec![
        Line::from(Span::styled(page.title, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(page.description),
        Line::from(""),
        Line::from(Span::styled(
            format!("[ {} ]  (Enter)", page.button),
            Style::default().fg(Color::White).bg(ACCENT),
        )),
        Line::from(""),
        Line::from(dots),
    ];

    let height = text.len() as u16 + 2;
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, centered(area, area.width.min(70), height));
}

fn render_home<C: Clock>(f: &mut Frame, area: Rect, app: &App<C>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    render_card(f, cards[0], "Money in", repository::money_in(&app.transactions), INCOME);
    render_card(f, cards[1], "Money out", repository::money_out(&app.transactions), EXPENSE);

    let title = Line::from(vec![
        Span::styled(" Recent Transactions ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("(s) See All ", Style::default().fg(ACCENT)),
    ]);
    render_transaction_table(f, chunks[1], &app.recent_transactions(), title, None);
}

fn render_card(f: &mut Frame, area: Rect, title: &str, amount: f64, color: Color) {
    let card = Paragraph::new(Line::from(Span::styled(
        format_amount(amount),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(format!(" {} ", title)),
    );
    f.render_widget(card, area);
}

fn render_transaction_table(
    f: &mut Frame,
    area: Rect,
    transactions: &[Transaction],
    title: Line,
    state: Option<&mut ratatui::widgets::TableState>,
) {
    let rows = transactions.iter().map(|tx| {
        let color = if tx.is_income() { INCOME } else { EXPENSE };
        Row::new(vec![
            Cell::from(tx.category.icon()),
            Cell::from(tx.title.clone()).style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from(truncate(tx.description.as_deref().unwrap_or(""), 28))
                .style(Style::default().fg(Color::DarkGray)),
            Cell::from(tx.amount_label()).style(Style::default().fg(color)),
            Cell::from(tx.time.clone()).style(Style::default().fg(Color::DarkGray)),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Length(16),
            Constraint::Length(30),
            Constraint::Length(14),
            Constraint::Length(10),
        ],
    )
    .block(Block::default().borders(Borders::ALL).title(title))
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    match state {
        Some(state) => f.render_stateful_widget(table, area, state),
        None => f.render_widget(table, area),
    }
}

fn render_transactions<C: Clock>(f: &mut Frame, area: Rect, app: &mut App<C>) {
    let rows = app.transaction_rows();
    let expense_count = rows.iter().filter(|tx| !tx.is_income()).count();

    let title = Line::from(vec![
        Span::styled(" See your financial report ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!("↓ {} ", expense_count), Style::default().fg(EXPENSE)),
        Span::styled(format!("↑ {} ", rows.len() - expense_count), Style::default().fg(INCOME)),
    ]);
    render_transaction_table(f, area, &rows, title, Some(&mut app.list_state));
}

fn render_report<C: Clock>(f: &mut Frame, area: Rect, app: &App<C>) {
    let kind = app.report_tab;
    let items = repository::breakdown(&app.transactions, kind);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let tabs: Vec<Span> = [TransactionKind::Expense, TransactionKind::Income]
        .iter()
        .flat_map(|tab| {
            let style = if *tab == kind {
                Style::default().fg(Color::White).bg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            [Span::styled(format!(" {} ", tab), style), Span::raw(" ")]
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(tabs)).alignment(Alignment::Center), chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let total = report_total(&items);
    let style = RingStyle::default();
    let center = Line::from(format_amount(total));
    let ring = Canvas::default()
        .block(Block::default().borders(Borders::ALL))
        .marker(Marker::Braille)
        .x_bounds([-1.4, 1.4])
        .y_bounds([-1.4, 1.4])
        .paint(|ctx| {
            let outcome = draw_ring(&mut CanvasRing::new(ctx), total, &items, &style);
            match outcome {
                RingOutcome::Drawn(_) => ctx.print(-0.3, 0.0, center.clone()),
                RingOutcome::Placeholder(_) => ctx.print(-0.3, 0.0, "no data"),
            }
        });
    f.render_widget(ring, body[0]);

    let list: Vec<Row> = list_rows(&items, kind)
        .into_iter()
        .map(|row| {
            let amount_color = if kind == TransactionKind::Income { INCOME } else { EXPENSE };
            Row::new(vec![
                Cell::from("■").style(Style::default().fg(to_color(row.color))),
                Cell::from(row.label),
                Cell::from(row.amount_label).style(Style::default().fg(amount_color)),
                Cell::from(format!("{:>5.1}%", row.share_percent)),
            ])
        })
        .collect();

    let table = Table::new(
        list,
        [
            Constraint::Length(2),
            Constraint::Length(16),
            Constraint::Length(14),
            Constraint::Length(7),
        ],
    )
    .block(Block::default().borders(Borders::ALL).title(" Category "));
    f.render_widget(table, body[1]);
}

fn render_profile<C: Clock>(f: &mut Frame, area: Rect, app: &App<C>) {
    let heading = Style::default().fg(Color::DarkGray);
    let item = Style::default().fg(ACCENT);
    let balance = repository::money_in(&app.transactions) - repository::money_out(&app.transactions);

    let text = vec![
        Line::from(Span::styled("Username", heading)),
        Line::from(Span::styled("Iriana Saliha", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled("Payment Methods", heading)),
        Line::from(vec![
            Span::styled("  M-Pesa ", item),
            Span::raw(format!("BALANCE {}", format_amount(balance.max(0.0)))),
        ]),
        Line::from(vec![Span::styled("  PHYSICAL ", item), Span::raw("CASH")]),
        Line::from(""),
        Line::from(Span::styled("Sim-Cards", heading)),
        Line::from(Span::styled("  Sim 1", item)),
        Line::from(Span::styled("  Sim 2", item)),
        Line::from(""),
        Line::from(Span::styled("  My Wallet", item)),
        Line::from(Span::styled("  Settings", item)),
        Line::from(vec![Span::styled("  Export Data", item), Span::styled("  (e)", heading)]),
        Line::from(vec![
            Span::styled("  Logout", Style::default().fg(Color::Red)),
            Span::styled("  (l)", heading),
        ]),
    ];

    let paragraph = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_form<C: Clock>(f: &mut Frame, area: Rect, app: &App<C>) {
    let Some(form) = app.form.as_ref() else {
        return;
    };

    let accent = match form.kind() {
        TransactionKind::Expense => Color::Rgb(0xFF, 0x4B, 0x55),
        TransactionKind::Income => Color::Rgb(0x00, 0xBF, 0xA5),
    };
    let errors = if form.show_errors() { form.field_errors() } else { Default::default() };

    let mut lines = Vec::new();
    for field in FormField::ALL {
        let focused = field == app.form_focus;
        let marker = if focused { "▸ " } else { "  " };
        let label_style = if focused {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{}{:<12}", marker, field.label()), label_style),
            Span::raw(field_value(form, field)),
        ]));

        let error = match field {
            FormField::Amount => errors.amount,
            FormField::Category => errors.category,
            FormField::Title => errors.title,
            _ => None,
        };
        if let Some(message) = error {
            lines.push(Line::from(Span::styled(
                format!("              {}", message),
                Style::default().fg(Color::Red),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Add Transaction (Enter) ",
        Style::default().fg(Color::White).bg(accent).add_modifier(Modifier::BOLD),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .title(format!(" {} ", form.kind())),
    );
    f.render_widget(paragraph, area);
}

fn field_value(form: &TransactionForm, field: FormField) -> String {
    match field {
        FormField::Kind => match form.kind() {
            TransactionKind::Expense => "[Expense]  Income ".to_string(),
            TransactionKind::Income => " Expense  [Income]".to_string(),
        },
        FormField::Amount => format!("Ksh {}", form.amount()),
        FormField::Category => form
            .category()
            .map(|c| format!("{} {}", c.icon(), c))
            .unwrap_or_else(|| "← choose →".to_string()),
        FormField::Title => form.title().to_string(),
        FormField::Description => form.description().to_string(),
        FormField::Date => form.date().format("%Y-%m-%d").to_string(),
        FormField::Time => form.time().format("%H:%M").to_string(),
    }
}

fn render_bottom_bar(f: &mut Frame, area: Rect, selected: Option<BottomTab>) {
    let mut spans = Vec::new();
    for (i, tab) in BottomTab::ALL.iter().enumerate() {
        if i == 2 {
            spans.push(Span::styled(
                " (+) ",
                Style::default().fg(Color::White).bg(ACCENT).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw("  "));
        }
        let style = if Some(*tab) == selected {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("{} {}", i + 1, tab.label()), style));
        spans.push(Span::raw("  "));
    }

    let bar = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(bar, area);
}

fn render_status<C: Clock>(f: &mut Frame, area: Rect, app: &App<C>) {
    let mut spans = Vec::new();
    if let Some(status) = &app.status {
        spans.push(Span::styled(format!(" {} ", status), Style::default().fg(Color::Green)));
        spans.push(Span::raw("|"));
    }

    let hints: &[(&str, &str)] = match app.route() {
        Route::NewTransaction => &[("Tab", "Field"), ("←/→", "Change"), ("Enter", "Add"), ("Esc", "Cancel")],
        Route::Onboarding1 | Route::Onboarding2 | Route::Onboarding3 => &[("Enter", "Next"), ("Esc", "Back")],
        Route::Report => &[("←/→", "Expense/Income"), ("a", "Add"), ("Esc", "Back")],
        Route::Transactions => &[("↑/↓", "Nav"), ("a", "Add"), ("Esc", "Back")],
        Route::Profile => &[("e", "Export"), ("l", "Logout"), ("Esc", "Back")],
        Route::Home => &[("s", "See All"), ("a", "Add"), ("Esc", "Back")],
    };
    for (key, action) in hints {
        spans.push(Span::styled(format!(" {}", key), Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!(" {} ", action)));
    }
    if app.route() != Route::NewTransaction {
        spans.push(Span::styled(" q", Style::default().fg(Color::Red)));
        spans.push(Span::raw(" Quit"));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_logout_dialog(f: &mut Frame, area: Rect) {
    let popup = centered(area, 40, 7);
    let text = vec![
        Line::from(Span::styled("Logout?", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from("Are you sure do you wanna logout?"),
        Line::from(""),
        Line::from(vec![
            Span::styled(" No (n) ", Style::default().fg(ACCENT).bg(Color::Rgb(0xF3, 0xF0, 0xFF))),
            Span::raw("   "),
            Span::styled(" Yes (y) ", Style::default().fg(Color::White).bg(ACCENT)),
        ]),
    ];

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(ACCENT))),
        popup,
    );
}

/// Rect of at most `width` x `height`, centered in `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
