mod budget;
mod preferences;
mod transaction;

pub(crate) use budget::Budget;
pub(crate) use preferences::Theme;
pub(crate) use transaction::{
    EntryForm, InputError, Kind, NewTransaction, Transaction, DEFAULT_CATEGORIES,
};

#[cfg(test)]
mod tests;
