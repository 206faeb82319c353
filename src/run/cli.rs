use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::Path;

use crate::analytics::{suggest, Filter, Summary};
use crate::convert::{Converter, Currency, Direction};
use crate::models::{Budget, Kind, Theme};
use crate::store::Store;
use crate::ui::commands::parse_add_args;
use crate::ui::util::{format_amount, format_money};

pub(crate) fn as_cli(args: &[String], store: &mut Store, converter: Converter) -> Result<()> {
    match args[1].as_str() {
        "add" | "a" => cli_add(&args[2..], store),
        "list" | "ls" => cli_list(&args[2..], store),
        "summary" | "s" => cli_summary(store),
        "budget" => cli_budget(&args[2..], store),
        "convert" => cli_convert(&args[2..], converter),
        "export" => cli_export(&args[2..], store),
        "name" => cli_name(&args[2..], store),
        "theme" => cli_theme(&args[2..], store),
        "reset" => cli_reset(&args[2..], store),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("unibudget {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("UniBudget: personal budget tracker for students");
    println!();
    println!("Usage: unibudget [command]");
    println!();
    println!("Commands:");
    println!("  (none)                                    Launch interactive TUI");
    println!("  add <date> <income|expense> <amount> <category> [note]");
    println!("                                            Record a transaction");
    println!("  list                                      List transactions, newest first");
    println!("    --kind <income|expense>                 Only one type");
    println!("    --category <name>                       Only one category");
    println!("    --from <YYYY-MM-DD> --to <YYYY-MM-DD>   Date range (inclusive)");
    println!("    --month <YYYY-MM>                       One calendar month");
    println!("    --search <text>                         Match category or note");
    println!("  summary                                   Totals, budget and suggestions");
    println!("  budget [amount]                           Show or set the budget (0 clears)");
    println!("  convert <amount> [pen|usd]                Convert from PEN (default) or USD");
    println!("  export [path]                             Export transactions to CSV");
    println!("  name [text]                               Show or set the display name");
    println!("  theme [light|dark]                        Show or set the theme");
    println!("  reset --yes                               Delete all transactions and the budget");
    println!("  --help, -h                                Show this help");
    println!("  --version, -V                             Show version");
    println!();
    println!("Environment:");
    println!("  UNIBUDGET_DATA_DIR   Data directory (default: platform data dir)");
    println!("  UNIBUDGET_RATE       USD per PEN (default: 0.27)");
    println!("  RUST_LOG             Log level, e.g. debug");
}

fn cli_add(args: &[String], store: &mut Store) -> Result<()> {
    let form = parse_add_args(&args.join(" ")).ok_or_else(|| {
        anyhow::anyhow!(
            "Usage: unibudget add <YYYY-MM-DD> <income|expense> <amount> <category> [note]"
        )
    })?;
    let new = form.parse()?;
    let txn = store.add(new)?;
    println!(
        "Saved {} {} in {} on {}",
        txn.kind,
        format_amount(txn.amount),
        txn.category,
        txn.date
    );
    Ok(())
}

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

fn date_flag(args: &[String], name: &str) -> Result<Option<NaiveDate>> {
    flag(args, name)
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .with_context(|| format!("Invalid {name} date: {s} (use YYYY-MM-DD)"))
        })
        .transpose()
}

fn parse_filter(args: &[String]) -> Result<Filter> {
    let mut filter = match flag(args, "--month") {
        Some(month) => {
            let first = NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d")
                .with_context(|| format!("Invalid month: {month} (use YYYY-MM)"))?;
            Filter::whole_month(first)
        }
        None => Filter::default(),
    };

    if let Some(from) = date_flag(args, "--from")? {
        filter.from = Some(from);
    }
    if let Some(to) = date_flag(args, "--to")? {
        filter.to = Some(to);
    }
    if let Some(kind) = flag(args, "--kind") {
        let parsed = Kind::parse(kind).ok_or_else(|| {
            let expected: Vec<&str> = Kind::all().iter().map(Kind::as_str).collect();
            anyhow::anyhow!("Invalid --kind: {kind} (expected {})", expected.join(" or "))
        })?;
        filter.kind = Some(parsed);
    }
    filter.category = flag(args, "--category").map(str::to_string);
    filter.search = flag(args, "--search").unwrap_or_default().to_string();
    Ok(filter)
}

fn cli_list(args: &[String], store: &mut Store) -> Result<()> {
    let filter = parse_filter(args)?;
    let rows = filter.apply(store.all());

    if rows.is_empty() {
        println!("No transactions ({})", filter.describe());
        return Ok(());
    }

    println!(
        "{:<12} {:<16} {:<8} {:>14}  Note",
        "Date", "Category", "Type", "Amount"
    );
    println!("{}", "─".repeat(64));
    for txn in &rows {
        println!(
            "{:<12} {:<16} {:<8} {:>14}  {}",
            txn.date.to_string(),
            txn.category,
            txn.kind.as_str(),
            format_amount(txn.signed_amount()),
            txn.note
        );
    }

    let view = Summary::of(rows.iter().copied());
    println!("{}", "─".repeat(64));
    println!(
        "{} of {} transactions | in {} | out {} | net {}",
        rows.len(),
        store.all().len(),
        format_amount(view.income),
        format_amount(view.expense),
        format_amount(view.balance)
    );
    Ok(())
}

fn cli_summary(store: &mut Store) -> Result<()> {
    let summary = store.summary();
    let status = store.budget_status();

    let title = if store.display_name().is_empty() {
        "UniBudget".to_string()
    } else {
        format!("UniBudget, {}", store.display_name())
    };
    println!("{title}");
    println!("{}", "─".repeat(40));
    println!("  Income:     {}", format_amount(summary.income));
    println!("  Expenses:   {}", format_amount(summary.expense));
    println!("  Balance:    {}", format_amount(summary.balance));
    println!("  Total Txns: {}", summary.count);
    println!("  Budget:     {}", status.status_text());

    let ranked = summary.ranked_categories();
    if !ranked.is_empty() {
        println!();
        println!("Expenses by Category:");
        for (name, amount) in &ranked {
            println!("  {name:<24} {}", format_amount(*amount));
        }
    }

    let suggestions = suggest(&summary, &status);
    if !suggestions.is_empty() {
        println!();
        println!("Suggestions:");
        for s in &suggestions {
            println!("  • {s}");
        }
    }

    Ok(())
}

fn cli_budget(args: &[String], store: &mut Store) -> Result<()> {
    let Some(raw) = args.first() else {
        println!("{}", store.budget_status().status_text());
        return Ok(());
    };

    let budget = Budget::parse(raw).ok_or_else(|| anyhow::anyhow!("Invalid amount: {raw}"))?;
    store.set_budget(budget)?;

    if budget.is_set() {
        println!("Budget set to {}", format_amount(budget.limit));
    } else {
        println!("Budget cleared");
    }
    Ok(())
}

fn cli_convert(args: &[String], converter: Converter) -> Result<()> {
    let Some(amount) = args.first() else {
        anyhow::bail!("Usage: unibudget convert <amount> [pen|usd]");
    };
    let source = match args.get(1) {
        Some(code) => {
            Currency::parse(code).ok_or_else(|| anyhow::anyhow!("Unknown currency: {code}"))?
        }
        None => Currency::Pen,
    };
    let direction = Direction::from_source(source);
    let result = converter.convert_str(amount, direction)?;

    println!(
        "{} = {}",
        format_money(
            amount.trim().parse::<Decimal>().unwrap_or_default(),
            source.symbol()
        ),
        format_money(result, direction.target().symbol())
    );
    Ok(())
}

fn cli_export(args: &[String], store: &mut Store) -> Result<()> {
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/unibudget-export.csv")
        });

    let count = crate::export::export_to_path(Path::new(&output_path), store.all())?;
    if count == 0 {
        println!("No transactions; wrote header to {output_path}");
    } else {
        println!("Exported {count} transactions to {output_path}");
    }
    Ok(())
}

fn cli_name(args: &[String], store: &mut Store) -> Result<()> {
    if args.is_empty() {
        if store.display_name().is_empty() {
            println!("No display name set");
        } else {
            println!("{}", store.display_name());
        }
        return Ok(());
    }
    store.set_display_name(&args.join(" "))?;
    println!("Display name set to {}", store.display_name());
    Ok(())
}

fn cli_theme(args: &[String], store: &mut Store) -> Result<()> {
    let Some(raw) = args.first() else {
        println!("{}", store.theme());
        return Ok(());
    };
    let theme =
        Theme::parse(raw).ok_or_else(|| anyhow::anyhow!("Theme must be light or dark: {raw}"))?;
    store.set_theme(theme)?;
    println!("Theme set to {theme}");
    Ok(())
}

fn cli_reset(args: &[String], store: &mut Store) -> Result<()> {
    if !args.iter().any(|a| a == "--yes" || a == "-y") {
        anyhow::bail!(
            "This deletes all {} transactions and the budget. Re-run with --yes to confirm",
            store.all().len()
        );
    }
    store.reset()?;
    println!("All transactions and the budget were deleted");
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
