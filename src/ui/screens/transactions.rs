use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use super::titled_block;
use crate::ui::app::App;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    render_table(f, chunks[0], app);
    render_totals(f, chunks[1], app);
}

fn render_table(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let title = if app.filter.is_empty() {
        format!("Transactions ({})", app.transactions.len())
    } else {
        format!(
            "Transactions ({} of {}) {}",
            app.transactions.len(),
            app.total_count,
            app.filter.describe()
        )
    };

    if app.transactions.is_empty() {
        let msg = if app.total_count > 0 {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("No transactions match {}", app.filter.describe()),
                    p.dim_style(),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Press Esc or use :clear-filters to show everything",
                    p.dim_style(),
                )),
            ]
        } else {
            vec![
                Line::from(""),
                Line::from(Span::styled("No transactions yet", p.dim_style())),
                Line::from(""),
                Line::from(Span::styled(
                    "Press 3 for the entry form or use :add",
                    p.dim_style(),
                )),
            ]
        };
        f.render_widget(
            Paragraph::new(msg).centered().block(titled_block(title, p)),
            area,
        );
        return;
    }

    let header_cells = ["Date", "Category", "Type", "Amount", "Note"]
        .iter()
        .map(|h| Cell::from(*h).style(p.header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .transactions
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let (sign, amount_style) = if txn.is_income() {
                ("+", p.income_style())
            } else {
                ("-", p.expense_style())
            };

            let style = if i == app.transaction_index {
                p.selected_style()
            } else if i % 2 == 1 {
                p.alt_row_style()
            } else {
                p.normal_style()
            };

            Row::new(vec![
                Cell::from(format!("  {}", txn.date)),
                Cell::from(truncate(&txn.category, 16)),
                Cell::from(txn.kind.as_str()),
                Cell::from(Span::styled(
                    format!("{sign}{}", format_amount(txn.amount)),
                    amount_style,
                )),
                Cell::from(truncate(&txn.note, 40)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Length(17),
        Constraint::Length(8),
        Constraint::Length(16),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(titled_block(title, p));

    f.render_widget(table, area);
}

fn render_totals(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let view = &app.view_summary;
    let line = Line::from(vec![
        Span::styled(" In ", p.dim_style()),
        Span::styled(format_amount(view.income), p.income_style()),
        Span::styled("  Out ", p.dim_style()),
        Span::styled(format_amount(view.expense), p.expense_style()),
        Span::styled("  Net ", p.dim_style()),
        Span::styled(format_amount(view.balance), Style::default().fg(p.accent)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
