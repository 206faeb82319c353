use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::convert::Converter;
use crate::store::Store;
use crate::ui::app::{App, FormField, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(store: &mut Store, converter: Converter) -> Result<()> {
    let mut app = App::new(converter);
    app.refresh(store);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &mut Store,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab, status and command bars, table borders and header, totals line
            let content_height = f.area().height.saturating_sub(7) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, store)?,
                InputMode::Command => handle_command_input(key, app, store)?,
                InputMode::Search => handle_search_input(key, app, store)?,
                InputMode::Editing => handle_editing_input(key, app),
                InputMode::Confirm => handle_confirm_input(key, app, store)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
            app.filter.search.clear();
            switch_screen(app, store, Screen::Transactions);
        }
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('1') => switch_screen(app, store, Screen::Dashboard),
        KeyCode::Char('2') => switch_screen(app, store, Screen::Transactions),
        KeyCode::Char('3') => switch_screen(app, store, Screen::Add),
        KeyCode::Char('4') => switch_screen(app, store, Screen::Convert),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            switch_screen(app, store, screens[next]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 {
                screens.len() - 1
            } else {
                idx - 1
            };
            switch_screen(app, store, screens[prev]);
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('T') => {
            let theme = app.theme.toggled();
            store.set_theme(theme)?;
            app.refresh(store);
            app.set_status(format!("Theme: {theme}"));
        }
        KeyCode::Char('R') => commands::handle_command("reset", app, store)?,
        KeyCode::Esc => handle_escape(app, store),
        _ => match app.screen {
            Screen::Add => handle_form_key(key.code, app, store)?,
            Screen::Convert => handle_convert_key(key.code, app),
            _ => {}
        },
    }
    Ok(())
}

fn handle_form_key(code: KeyCode, app: &mut App, store: &mut Store) -> Result<()> {
    match code {
        KeyCode::Char('e') | KeyCode::Enter => {
            let field = app.selected_field();
            if field.is_choice() {
                app.cycle_form_choice(1);
            } else {
                app.command_input = app.form_value(field).to_string();
                app.input_mode = InputMode::Editing;
            }
        }
        KeyCode::Char('+') | KeyCode::Char('l') | KeyCode::Right => app.cycle_form_choice(1),
        KeyCode::Char('-') | KeyCode::Char('h') | KeyCode::Left => app.cycle_form_choice(-1),
        KeyCode::Char('w') => app.submit_form(store)?,
        KeyCode::Char('c') => {
            app.clear_form();
            app.set_status("Form cleared");
        }
        _ => {}
    }
    Ok(())
}

fn handle_convert_key(code: KeyCode, app: &mut App) {
    match code {
        KeyCode::Char('e') | KeyCode::Enter => {
            app.command_input = app.convert_input.clone();
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Char('r') => {
            app.convert_direction = app.convert_direction.reversed();
            app.refresh_conversion();
            app.set_status(format!("Converting {}", app.convert_direction));
        }
        _ => {}
    }
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, store)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_search_input(key: event::KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
            app.set_status(format!(
                "Showing {} of {} ({})",
                app.transactions.len(),
                app.total_count,
                app.filter.describe()
            ));
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.filter.search.clear();
            app.refresh_transactions(store);
        }
        KeyCode::Backspace => {
            app.filter.search.pop();
            reset_cursor(app);
            app.refresh_transactions(store);
        }
        KeyCode::Char(c) => {
            app.filter.search.push(c);
            reset_cursor(app);
            app.refresh_transactions(store);
        }
        _ => {}
    }
    Ok(())
}

/// Field and amount editing. The form keeps its old value until Enter;
/// the converter recomputes on every keystroke.
fn handle_editing_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => {
            if app.screen == Screen::Add {
                let field = app.selected_field();
                let value = std::mem::take(&mut app.command_input);
                *app.form_value_mut(field) = value;
                if app.form_field + 1 < FormField::all().len() {
                    app.form_field += 1;
                }
            }
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
            if app.screen == Screen::Add {
                app.set_status("Edit cancelled");
            }
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            sync_convert_input(app);
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
            sync_convert_input(app);
        }
        _ => {}
    }
}

fn sync_convert_input(app: &mut App) {
    if app.screen == Screen::Convert {
        app.convert_input = app.command_input.clone();
        app.refresh_conversion();
    }
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                match action {
                    PendingAction::Reset => {
                        store.reset()?;
                        app.transaction_index = 0;
                        app.transaction_scroll = 0;
                        app.refresh(store);
                        app.set_status("All transactions and the budget were deleted");
                    }
                }
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
        _ => {}
    }
    Ok(())
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, store: &Store, screen: Screen) {
    app.screen = screen;
    if screen == Screen::Transactions {
        app.refresh_transactions(store);
    }
    app.set_status(format!("{screen}"));
}

fn reset_cursor(app: &mut App) {
    app.transaction_index = 0;
    app.transaction_scroll = 0;
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            let len = app.transactions.len();
            let page = app.visible_rows;
            scroll_down(
                &mut app.transaction_index,
                &mut app.transaction_scroll,
                len,
                page,
            );
        }
        Screen::Add => {
            if app.form_field + 1 < FormField::all().len() {
                app.form_field += 1;
            }
        }
        _ => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            scroll_up(&mut app.transaction_index, &mut app.transaction_scroll);
        }
        Screen::Add => app.form_field = app.form_field.saturating_sub(1),
        _ => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            scroll_to_top(&mut app.transaction_index, &mut app.transaction_scroll);
        }
        Screen::Add => app.form_field = 0,
        _ => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            let len = app.transactions.len();
            let page = app.visible_rows;
            scroll_to_bottom(
                &mut app.transaction_index,
                &mut app.transaction_scroll,
                len,
                page,
            );
        }
        Screen::Add => app.form_field = FormField::all().len() - 1,
        _ => {}
    }
}

fn handle_escape(app: &mut App, store: &Store) {
    match app.screen {
        Screen::Transactions if !app.filter.is_empty() => {
            app.filter = Default::default();
            reset_cursor(app);
            app.refresh_transactions(store);
            app.set_status("Filters cleared");
        }
        Screen::Add | Screen::Convert => {
            app.screen = Screen::Dashboard;
            app.status_message.clear();
        }
        _ => app.status_message.clear(),
    }
}
