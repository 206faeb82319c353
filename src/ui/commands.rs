use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::app::{App, InputMode, PendingAction, Screen};
use super::util::{format_amount, format_money};
use crate::analytics::Filter;
use crate::convert::{Currency, Direction};
use crate::models::{Budget, EntryForm, Kind, Theme};
use crate::store::Store;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Store) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit UniBudget", cmd_quit, r);
    register_command!("quit", "Quit UniBudget", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("a", "Go to the entry form", cmd_add_screen, r);
    register_command!("form", "Go to the entry form", cmd_add_screen, r);
    register_command!("x", "Go to the converter", cmd_convert_screen, r);
    register_command!("converter", "Go to the converter", cmd_convert_screen, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Record a transaction (e.g. :add 2024-06-01 expense 12.50 Food lunch)",
        cmd_add,
        r
    );
    register_command!(
        "budget",
        "Set the monthly budget (e.g. :budget 1500, :budget 0 clears)",
        cmd_budget,
        r
    );
    register_command!(
        "search",
        "Search category and note (e.g. :search coffee)",
        cmd_search,
        r
    );
    register_command!("s", "Search category and note (e.g. :s coffee)", cmd_search, r);
    register_command!(
        "from",
        "Show transactions on or after a date (e.g. :from 2024-06-01)",
        cmd_from,
        r
    );
    register_command!(
        "to",
        "Show transactions on or before a date (e.g. :to 2024-06-30)",
        cmd_to,
        r
    );
    register_command!(
        "kind",
        "Filter by type (e.g. :kind income, :kind clears)",
        cmd_kind,
        r
    );
    register_command!(
        "category",
        "Filter by category (e.g. :category Food, :category clears)",
        cmd_category,
        r
    );
    register_command!("cat", "Filter by category", cmd_category, r);
    register_command!(
        "month",
        "Show one month (e.g. :month 2024-06, :month alone is this month so far)",
        cmd_month,
        r
    );
    register_command!("m", "Show one month (e.g. :m 2024-06)", cmd_month, r);
    register_command!("clear-filters", "Show all transactions", cmd_clear_filters, r);
    register_command!(
        "export",
        "Export shown transactions to CSV (e.g. :export ~/budget.csv)",
        cmd_export,
        r
    );
    register_command!("name", "Set display name (e.g. :name Ana)", cmd_name, r);
    register_command!(
        "theme",
        "Switch theme (e.g. :theme dark, :theme alone toggles)",
        cmd_theme,
        r
    );
    register_command!(
        "convert",
        "Convert an amount (e.g. :convert 100 pen, :convert 27 usd)",
        cmd_convert,
        r
    );
    register_command!("reset", "Delete all transactions and the budget", cmd_reset, r);
    register_command!("suggest", "Show the most urgent suggestion", cmd_suggest, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if cmd_name.is_empty() {
        return Ok(());
    }

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, store)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// `<date> <kind> <amount> <category> [note…]`, shared with the CLI.
pub(crate) fn parse_add_args(args: &str) -> Option<EntryForm> {
    let mut parts = args.split_whitespace();
    let date = parts.next()?.to_string();
    let kind = parts.next()?.to_string();
    let amount = parts.next()?.to_string();
    let category = parts.next()?.to_string();
    let note = parts.collect::<Vec<_>>().join(" ");
    Some(EntryForm {
        date,
        category,
        kind,
        amount,
        note,
    })
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

fn apply_filter(app: &mut App, store: &Store) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    app.transaction_index = 0;
    app.transaction_scroll = 0;
    app.refresh_transactions(store);
    app.set_status(format!(
        "Showing {} of {} ({})",
        app.transactions.len(),
        app.total_count,
        app.filter.describe()
    ));
    Ok(())
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    app.refresh_transactions(store);
    Ok(())
}

fn cmd_add_screen(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.screen = Screen::Add;
    Ok(())
}

fn cmd_convert_screen(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.screen = Screen::Convert;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let Some(form) = parse_add_args(args) else {
        app.set_status("Usage: :add <YYYY-MM-DD> <income|expense> <amount> <category> [note]");
        return Ok(());
    };

    let new = match form.parse() {
        Ok(new) => new,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };

    let txn = store.add(new)?;
    let msg = format!(
        "Saved {} {} in {}",
        txn.kind,
        format_amount(txn.amount),
        txn.category
    );
    app.refresh(store);
    app.set_status(msg);
    Ok(())
}

fn cmd_budget(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status(format!(
            "{}. Usage: :budget <amount>",
            app.budget_status.status_text()
        ));
        return Ok(());
    }

    let Some(budget) = Budget::parse(args) else {
        app.set_status(format!("Invalid amount: {args}"));
        return Ok(());
    };

    store.set_budget(budget)?;
    app.refresh(store);
    if budget.is_set() {
        app.set_status(format!("Budget set to {}", format_amount(budget.limit)));
    } else {
        app.set_status("Budget cleared");
    }
    Ok(())
}

fn cmd_search(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.filter.search = args.to_string();
    apply_filter(app, store)?;
    if args.is_empty() {
        app.set_status("Search cleared");
    }
    Ok(())
}

fn cmd_from(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    if args.is_empty() {
        app.filter.from = None;
    } else if let Some(date) = parse_date(args) {
        app.filter.from = Some(date);
    } else {
        app.set_status("Invalid date. Use YYYY-MM-DD");
        return Ok(());
    }
    apply_filter(app, store)
}

fn cmd_to(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    if args.is_empty() {
        app.filter.to = None;
    } else if let Some(date) = parse_date(args) {
        app.filter.to = Some(date);
    } else {
        app.set_status("Invalid date. Use YYYY-MM-DD");
        return Ok(());
    }
    apply_filter(app, store)
}

fn cmd_kind(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    if args.is_empty() || args == "all" {
        app.filter.kind = None;
    } else if let Some(kind) = Kind::parse(args) {
        app.filter.kind = Some(kind);
    } else {
        app.set_status("Type must be income or expense");
        return Ok(());
    }
    apply_filter(app, store)
}

fn cmd_category(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.filter.category = if args.is_empty() || args == "all" {
        None
    } else {
        Some(args.to_string())
    };
    apply_filter(app, store)
}

fn cmd_month(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let range = if args.is_empty() {
        Filter::month_to_date(app.today)
    } else {
        match NaiveDate::parse_from_str(&format!("{args}-01"), "%Y-%m-%d") {
            Ok(first) => Filter::whole_month(first),
            Err(_) => {
                app.set_status("Invalid month format. Use YYYY-MM (e.g. 2024-06)");
                return Ok(());
            }
        }
    };

    app.filter.from = range.from;
    app.filter.to = range.to;
    apply_filter(app, store)
}

fn cmd_clear_filters(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.filter = Filter::default();
    apply_filter(app, store)
}

fn cmd_export(args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/unibudget-export.csv")
    } else {
        crate::run::shellexpand(args)
    };

    let count = crate::export::export_to_path(std::path::Path::new(&path), &app.transactions)?;
    if count == 0 {
        app.set_status(format!("No transactions to export; wrote header to {path}"));
    } else {
        app.set_status(format!("Exported {count} transactions to {path}"));
    }
    Ok(())
}

fn cmd_name(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    store.set_display_name(args)?;
    app.refresh(store);
    if app.display_name.is_empty() {
        app.set_status("Display name cleared");
    } else {
        app.set_status(format!("Hello, {}!", app.display_name));
    }
    Ok(())
}

fn cmd_theme(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let theme = if args.is_empty() {
        app.theme.toggled()
    } else {
        match Theme::parse(args) {
            Some(theme) => theme,
            None => {
                app.set_status("Theme must be light or dark");
                return Ok(());
            }
        }
    };

    store.set_theme(theme)?;
    app.refresh(store);
    app.set_status(format!("Theme: {theme}"));
    Ok(())
}

fn cmd_convert(args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    let mut parts = args.split_whitespace();
    let Some(amount) = parts.next() else {
        app.screen = Screen::Convert;
        return Ok(());
    };

    let direction = match parts.next() {
        None => app.convert_direction,
        Some(code) => match Currency::parse(code) {
            Some(source) => Direction::from_source(source),
            None => {
                app.set_status("Currency must be pen or usd");
                return Ok(());
            }
        },
    };

    app.screen = Screen::Convert;
    app.convert_input = amount.to_string();
    app.convert_direction = direction;
    app.refresh_conversion();

    match app.convert_result.clone() {
        Some(Ok(result)) => app.set_status(format!(
            "{} = {}",
            format_money(
                amount.trim().parse::<Decimal>().unwrap_or_default(),
                direction.source().symbol()
            ),
            format_money(result, direction.target().symbol())
        )),
        Some(Err(e)) => app.set_status(e.to_string()),
        None => {}
    }
    Ok(())
}

fn cmd_reset(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.pending_action = Some(PendingAction::Reset);
    app.confirm_message = format!(
        "Delete all {} transactions and the budget? (y/n)",
        app.total_count
    );
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_suggest(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    let msg = app
        .suggestions
        .first()
        .map_or_else(|| "Nothing to suggest right now".to_string(), |s| s.to_string());
    app.set_status(msg);
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
