use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use rust_decimal::Decimal;

use super::titled_block;
use crate::ui::app::{App, InputMode};
use crate::ui::util::format_money;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let direction = app.convert_direction;
    let source = direction.source();
    let target = direction.target();

    let input = if app.input_mode == InputMode::Editing {
        format!("{}_", app.command_input)
    } else if app.convert_input.is_empty() {
        "press e to enter an amount".to_string()
    } else {
        app.convert_input.clone()
    };

    let result_line = match &app.convert_result {
        None => Line::from(Span::styled("  -", p.dim_style())),
        Some(Ok(value)) => Line::from(Span::styled(
            format!("  {}", format_money(*value, target.symbol())),
            Style::default().fg(p.green).add_modifier(Modifier::BOLD),
        )),
        Some(Err(e)) => Line::from(Span::styled(format!("  {e}"), p.expense_style())),
    };

    let rate = app.converter.rate();
    let inverse = if rate > Decimal::ZERO {
        (Decimal::ONE / rate).round_dp(4)
    } else {
        Decimal::ZERO
    };

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Direction  ", p.dim_style()),
            Span::styled(
                direction.to_string(),
                Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled("   (r to swap)", p.dim_style()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("  Amount ({})  ", source.symbol()), p.dim_style()),
            Span::styled(input, p.normal_style()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("  Result ({})", target.symbol()),
            p.dim_style(),
        )),
        result_line,
        Line::from(""),
        Line::from(Span::styled(
            format!("  Rate: 1 PEN = {rate} USD, 1 USD = {inverse} PEN"),
            p.dim_style(),
        )),
    ];

    f.render_widget(
        Paragraph::new(lines).block(titled_block("Currency Converter", p)),
        area,
    );
}
