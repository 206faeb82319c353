use anyhow::Result;
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use crate::analytics::{suggest, BudgetStatus, ChartData, Filter, Suggestion, Summary};
use crate::convert::{ConvertError, Converter, Direction};
use crate::models::*;
use crate::store::Store;
use crate::ui::theme::Palette;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Transactions,
    Add,
    Convert,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Transactions,
            Self::Add,
            Self::Convert,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Add => write!(f, "Add"),
            Self::Convert => write!(f, "Convert"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Search,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Search => write!(f, "SEARCH"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PendingAction {
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Date,
    Category,
    Kind,
    Amount,
    Note,
}

impl FormField {
    pub(crate) fn all() -> &'static [FormField] {
        &[
            Self::Date,
            Self::Category,
            Self::Kind,
            Self::Amount,
            Self::Note,
        ]
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Category => "Category",
            Self::Kind => "Type",
            Self::Amount => "Amount",
            Self::Note => "Note",
        }
    }

    /// Fields cycled with +/- instead of typed.
    pub(crate) fn is_choice(&self) -> bool {
        matches!(self, Self::Kind)
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) today: NaiveDate,

    // Snapshot of the store, rebuilt by `refresh`
    pub(crate) display_name: String,
    pub(crate) theme: Theme,
    pub(crate) summary: Summary,
    pub(crate) budget_status: BudgetStatus,
    pub(crate) chart: ChartData,
    pub(crate) suggestions: Vec<Suggestion>,
    pub(crate) total_count: usize,

    // Transactions
    pub(crate) filter: Filter,
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) view_summary: Summary,
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    // Entry form
    pub(crate) form: EntryForm,
    pub(crate) form_field: usize,

    // Converter
    pub(crate) converter: Converter,
    pub(crate) convert_input: String,
    pub(crate) convert_direction: Direction,
    pub(crate) convert_result: Option<Result<Decimal, ConvertError>>,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(converter: Converter) -> Self {
        let today = Local::now().date_naive();

        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            today,

            display_name: String::new(),
            theme: Theme::default(),
            summary: Summary::default(),
            budget_status: BudgetStatus::NoBudget,
            chart: ChartData::default(),
            suggestions: Vec::new(),
            total_count: 0,

            filter: Filter::default(),
            transactions: Vec::new(),
            view_summary: Summary::default(),
            transaction_index: 0,
            transaction_scroll: 0,

            form: EntryForm::new(today),
            form_field: 0,

            converter,
            convert_input: String::new(),
            convert_direction: Direction::PenToUsd,
            convert_result: None,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn palette(&self) -> &'static Palette {
        Palette::for_theme(self.theme)
    }

    /// Rebuild every derived view from the store.
    pub(crate) fn refresh(&mut self, store: &Store) {
        self.display_name = store.display_name().to_string();
        self.theme = store.theme();
        self.summary = store.summary();
        self.budget_status = BudgetStatus::evaluate(store.budget(), self.summary.expense);
        self.chart = self.summary.chart();
        self.suggestions = suggest(&self.summary, &self.budget_status);
        self.total_count = store.all().len();
        self.refresh_transactions(store);
    }

    pub(crate) fn refresh_transactions(&mut self, store: &Store) {
        let rows = self.filter.apply(store.all());
        self.view_summary = Summary::of(rows.iter().copied());
        self.transactions = rows.into_iter().cloned().collect();
        if self.transaction_index >= self.transactions.len() {
            self.transaction_index = self.transactions.len().saturating_sub(1);
        }
        if self.transaction_scroll > self.transaction_index {
            self.transaction_scroll = self.transaction_index;
        }
    }

    pub(crate) fn refresh_conversion(&mut self) {
        self.convert_result = if self.convert_input.trim().is_empty() {
            None
        } else {
            Some(
                self.converter
                    .convert_str(&self.convert_input, self.convert_direction),
            )
        };
    }

    pub(crate) fn selected_field(&self) -> FormField {
        FormField::all()
            .get(self.form_field)
            .copied()
            .unwrap_or(FormField::Date)
    }

    pub(crate) fn form_value(&self, field: FormField) -> &str {
        match field {
            FormField::Date => &self.form.date,
            FormField::Category => &self.form.category,
            FormField::Kind => &self.form.kind,
            FormField::Amount => &self.form.amount,
            FormField::Note => &self.form.note,
        }
    }

    pub(crate) fn form_value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Date => &mut self.form.date,
            FormField::Category => &mut self.form.category,
            FormField::Kind => &mut self.form.kind,
            FormField::Amount => &mut self.form.amount,
            FormField::Note => &mut self.form.note,
        }
    }

    /// Step the selected choice field (type or category) forwards or back.
    pub(crate) fn cycle_form_choice(&mut self, delta: i32) {
        match self.selected_field() {
            FormField::Kind => {
                let kind = Kind::parse(&self.form.kind).unwrap_or(Kind::Expense);
                self.form.kind = kind.toggled().as_str().to_string();
            }
            FormField::Category => {
                let len = DEFAULT_CATEGORIES.len() as i32;
                let current = DEFAULT_CATEGORIES
                    .iter()
                    .position(|c| c.eq_ignore_ascii_case(self.form.category.trim()))
                    .map_or(if delta > 0 { -1 } else { 0 }, |i| i as i32);
                let next = (current + delta).rem_euclid(len) as usize;
                self.form.category = DEFAULT_CATEGORIES[next].to_string();
            }
            _ => {}
        }
    }

    /// Validate and store the entry form. Input errors become the status
    /// message and leave the form untouched.
    pub(crate) fn submit_form(&mut self, store: &mut Store) -> Result<()> {
        let new = match self.form.parse() {
            Ok(new) => new,
            Err(e) => {
                self.set_status(e.to_string());
                return Ok(());
            }
        };

        let txn = store.add(new)?;
        let msg = format!(
            "Saved {} {} in {}",
            txn.kind,
            crate::ui::util::format_amount(txn.amount),
            txn.category
        );
        self.clear_form();
        self.refresh(store);
        self.set_status(msg);
        Ok(())
    }

    pub(crate) fn clear_form(&mut self) {
        self.form = EntryForm::new(self.today);
        self.form_field = 0;
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
