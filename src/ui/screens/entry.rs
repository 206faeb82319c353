use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::titled_block;
use crate::models::{Kind, DEFAULT_CATEGORIES};
use crate::ui::app::{App, FormField, InputMode};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_form(f, chunks[0], app);
    render_hints(f, chunks[1], app);
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let selected = app.selected_field();
    let mut lines = vec![Line::from("")];

    for field in FormField::all() {
        let is_selected = *field == selected;
        let editing = is_selected && app.input_mode == InputMode::Editing;
        let value = if editing {
            format!("{}_", app.command_input)
        } else {
            app.form_value(*field).to_string()
        };

        let marker = if is_selected { "▸ " } else { "  " };
        let label_style = if is_selected {
            Style::default().fg(p.accent).add_modifier(Modifier::BOLD)
        } else {
            p.dim_style()
        };
        let value_style = match field {
            FormField::Kind => match Kind::parse(&app.form.kind) {
                Some(Kind::Income) => p.income_style(),
                Some(Kind::Expense) => p.expense_style(),
                None => p.normal_style(),
            },
            _ if editing => p.command_bar_style(),
            _ => p.normal_style(),
        };

        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(p.accent)),
            Span::styled(format!("{:<10}", field.label()), label_style),
            Span::styled(value, value_style),
        ]));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "  w save   c clear   e/Enter edit   +/- choose",
        p.dim_style(),
    )));

    f.render_widget(
        Paragraph::new(lines).block(titled_block("New Transaction", p)),
        area,
    );
}

fn render_hints(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let selected = app.selected_field();

    let mut lines = vec![Line::from("")];
    match selected {
        FormField::Date => {
            lines.push(Line::from(Span::styled("  Format YYYY-MM-DD", p.normal_style())));
            lines.push(Line::from(Span::styled(
                format!("  Today is {}", app.today),
                p.dim_style(),
            )));
        }
        FormField::Category => {
            lines.push(Line::from(Span::styled(
                "  Type any name or pick with +/-",
                p.normal_style(),
            )));
            lines.push(Line::from(""));
            for cat in DEFAULT_CATEGORIES {
                let style = if cat.eq_ignore_ascii_case(app.form.category.trim()) {
                    Style::default().fg(p.accent).add_modifier(Modifier::BOLD)
                } else {
                    p.dim_style()
                };
                lines.push(Line::from(Span::styled(format!("  {cat}"), style)));
            }
        }
        FormField::Kind => {
            lines.push(Line::from(Span::styled(
                "  income or expense, toggle with +/-",
                p.normal_style(),
            )));
        }
        FormField::Amount => {
            lines.push(Line::from(Span::styled(
                "  A positive number, e.g. 45.50",
                p.normal_style(),
            )));
            lines.push(Line::from(Span::styled(
                "  Amounts are in soles (S/)",
                p.dim_style(),
            )));
        }
        FormField::Note => {
            lines.push(Line::from(Span::styled("  Optional free text", p.normal_style())));
        }
    }

    f.render_widget(
        Paragraph::new(lines).block(titled_block(selected.label(), p)),
        area,
    );
}
