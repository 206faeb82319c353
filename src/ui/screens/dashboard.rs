use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Paragraph, Wrap},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::titled_block;
use crate::analytics::{BudgetStatus, Suggestion};
use crate::ui::app::App;
use crate::ui::util::{format_amount, progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Summary cards
            Constraint::Length(4), // Budget gauge
            Constraint::Min(8),    // Chart and suggestions
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_budget(f, chunks[1], app);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[2]);

    render_category_chart(f, bottom[0], app);
    render_suggestions(f, bottom[1], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let summary = &app.summary;
    let balance_color = if summary.balance >= Decimal::ZERO {
        p.green
    } else {
        p.red
    };

    render_card(f, cards[0], app, "Income", format_amount(summary.income), p.green);
    render_card(f, cards[1], app, "Expenses", format_amount(summary.expense), p.red);
    render_card(f, cards[2], app, "Balance", format_amount(summary.balance), balance_color);
    render_card(f, cards[3], app, "Transactions", summary.count.to_string(), p.accent);
}

fn render_card(f: &mut Frame, area: Rect, app: &App, title: &str, value: String, color: Color) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(titled_block(title, app.palette()));

    f.render_widget(text, area);
}

fn render_budget(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let status = &app.budget_status;

    let color = if status.is_exceeded() {
        p.red
    } else if status.is_near_limit() {
        p.yellow
    } else {
        p.green
    };

    let lines = match status {
        BudgetStatus::NoBudget => vec![Line::from(Span::styled(
            "No budget set. Use :budget <amount> to start tracking",
            p.dim_style(),
        ))],
        BudgetStatus::Tracking { spent, limit, .. } => {
            let ratio = (status.percent() / Decimal::ONE_HUNDRED)
                .to_f64()
                .unwrap_or(0.0);
            let width = (area.width as usize).saturating_sub(12).min(60);
            vec![
                Line::from(vec![
                    Span::styled(progress_bar(ratio, width), Style::default().fg(color)),
                    Span::styled(
                        format!(" {}%", status.percent().round_dp(0)),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(vec![
                    Span::styled(
                        format!("{} of {}  ", format_amount(*spent), format_amount(*limit)),
                        p.normal_style(),
                    ),
                    Span::styled(status.status_text(), Style::default().fg(color)),
                ]),
            ]
        }
    };

    f.render_widget(
        Paragraph::new(lines).block(titled_block("Monthly Budget", p)),
        area,
    );
}

fn render_category_chart(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let block = titled_block("Expenses by Category", p);

    if app.chart.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No expenses recorded yet", p.dim_style())),
            Line::from(Span::styled(
                "Press 3 to open the entry form or use :add",
                p.dim_style(),
            )),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = app
        .chart
        .iter()
        .take(12)
        .map(|(name, amount)| {
            Bar::default()
                .value(amount.round().to_u64().unwrap_or(0))
                .label(Line::from(truncate(name, 10)))
                .style(Style::default().fg(p.accent))
                .value_style(
                    Style::default()
                        .fg(p.header_bg)
                        .bg(p.accent)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1)
        .bar_style(Style::default().fg(p.accent));

    f.render_widget(chart, area);
}

fn render_suggestions(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();

    let mut lines: Vec<Line> = app
        .suggestions
        .iter()
        .map(|s| {
            let color = match s {
                Suggestion::Overspending { .. } | Suggestion::BudgetExceeded { .. } => p.red,
                Suggestion::BudgetNearLimit { .. } | Suggestion::TopCategory { .. } => p.yellow,
                Suggestion::HealthySavings { .. } => p.green,
                Suggestion::Empty | Suggestion::SetBudget => p.text,
            };
            Line::from(vec![
                Span::styled("• ", Style::default().fg(color)),
                Span::styled(s.to_string(), p.normal_style()),
            ])
        })
        .collect();

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Nothing to flag. Keep it up!",
            p.dim_style(),
        )));
    }

    let text = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(titled_block("Suggestions", p));
    f.render_widget(text, area);
}
