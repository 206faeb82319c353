mod budget;
mod filter;
mod suggest;
mod summary;

pub(crate) use budget::BudgetStatus;
pub(crate) use filter::Filter;
pub(crate) use suggest::{suggest, Suggestion};
pub(crate) use summary::{ChartData, Summary};

#[cfg(test)]
mod tests;
