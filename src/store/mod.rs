use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::analytics::{BudgetStatus, Summary};
use crate::db::{Database, Key};
use crate::models::{Budget, NewTransaction, Theme, Transaction};

/// The owned application state: every transaction (most recent first), the
/// budget and the cosmetic preferences. Each mutation writes through to the
/// database before returning.
pub(crate) struct Store {
    db: Database,
    transactions: Vec<Transaction>,
    budget: Budget,
    display_name: String,
    theme: Theme,
}

impl Store {
    /// Load all persisted keys. Unreadable values fall back to defaults;
    /// only database errors are returned.
    pub(crate) fn open(db: Database) -> Result<Self> {
        let transactions = load_transactions(db.get(Key::Transactions)?.as_deref());
        let budget = load_or_default::<Budget>(&db, Key::Budget)?;
        let display_name = load_or_default::<String>(&db, Key::DisplayName)?;
        let theme = load_or_default::<Theme>(&db, Key::Theme)?;

        log::info!(
            "Loaded {} transactions (budget {})",
            transactions.len(),
            budget.limit
        );

        Ok(Self {
            db,
            transactions,
            budget,
            display_name,
            theme,
        })
    }

    pub(crate) fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub(crate) fn budget(&self) -> Budget {
        self.budget
    }

    pub(crate) fn display_name(&self) -> &str {
        &self.display_name
    }

    pub(crate) fn theme(&self) -> Theme {
        self.theme
    }

    pub(crate) fn summary(&self) -> Summary {
        Summary::of(&self.transactions)
    }

    pub(crate) fn budget_status(&self) -> BudgetStatus {
        BudgetStatus::evaluate(self.budget, self.summary().expense)
    }

    /// Assign an id, prepend and persist.
    pub(crate) fn add(&mut self, new: NewTransaction) -> Result<&Transaction> {
        let id = self.next_id(chrono::Utc::now().timestamp_millis());
        let txn = Transaction::from_new(id, new);
        self.transactions.insert(0, txn);
        if let Err(e) = self.save_transactions() {
            self.transactions.remove(0);
            return Err(e);
        }
        log::debug!("Added transaction {id}");
        Ok(&self.transactions[0])
    }

    /// Drop every transaction and the budget. Preferences are kept.
    pub(crate) fn reset(&mut self) -> Result<()> {
        self.db
            .set_many(&[(Key::Transactions, Some("[]")), (Key::Budget, None)])
            .context("Failed to reset data")?;
        self.transactions.clear();
        self.budget = Budget::unset();
        log::debug!("Store reset");
        Ok(())
    }

    pub(crate) fn set_budget(&mut self, budget: Budget) -> Result<()> {
        if budget.is_set() {
            self.db.set(Key::Budget, &serde_json::to_string(&budget)?)?;
        } else {
            self.db.remove(Key::Budget)?;
        }
        self.budget = budget;
        log::debug!("Budget set to {}", budget.limit);
        Ok(())
    }

    pub(crate) fn set_display_name(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        self.db
            .set(Key::DisplayName, &serde_json::to_string(name)?)?;
        self.display_name = name.to_string();
        Ok(())
    }

    pub(crate) fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.db.set(Key::Theme, &serde_json::to_string(&theme)?)?;
        self.theme = theme;
        Ok(())
    }

    /// Creation time in milliseconds, bumped past the newest existing id so
    /// two entries in the same millisecond still get distinct ids.
    fn next_id(&self, now_millis: i64) -> i64 {
        match self.transactions.iter().map(|t| t.id).max() {
            Some(max) if max >= now_millis => max + 1,
            _ => now_millis,
        }
    }

    fn save_transactions(&self) -> Result<()> {
        let json = serde_json::to_string(&self.transactions)
            .context("Failed to serialize transactions")?;
        self.db.set(Key::Transactions, &json)
    }
}

/// Parse the stored transaction list. A document that is not a JSON array
/// yields an empty list; records that do not parse or validate are dropped.
fn load_transactions(raw: Option<&str>) -> Vec<Transaction> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let values: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("Stored transactions are unreadable, starting empty: {e}");
            return Vec::new();
        }
    };

    let total = values.len();
    let transactions: Vec<Transaction> = values
        .into_iter()
        .filter_map(|v| serde_json::from_value::<Transaction>(v).ok())
        .filter(Transaction::is_valid)
        .collect();

    if transactions.len() < total {
        log::warn!(
            "Dropped {} invalid stored transaction(s)",
            total - transactions.len()
        );
    }
    transactions
}

fn load_or_default<T: DeserializeOwned + Default>(db: &Database, key: Key) -> Result<T> {
    let Some(raw) = db.get(key)? else {
        return Ok(T::default());
    };
    Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
        log::warn!("Stored '{}' is unreadable, using default: {e}", key.as_str());
        T::default()
    }))
}

#[cfg(test)]
mod tests;
