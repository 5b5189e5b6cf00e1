use api_types::{
    Amount,
    expense::{Expense, ExpenseId},
};
use chrono::{DateTime, Local};

/// Per-category share of spending, recomputed from the whole list on every
/// load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryAggregate {
    pub name: String,
    pub value: Amount,
}

/// Sums absolute amounts by category name, keeping the order in which each
/// category is first encountered.
pub fn aggregate_by_category(expenses: &[Expense]) -> Vec<CategoryAggregate> {
    let mut aggregates: Vec<CategoryAggregate> = Vec::new();
    for expense in expenses {
        let amount = expense.amount.abs();
        match aggregates.iter_mut().find(|agg| agg.name == expense.category) {
            Some(agg) => agg.value += amount,
            None => aggregates.push(CategoryAggregate {
                name: expense.category.clone(),
                value: amount,
            }),
        }
    }
    aggregates
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Unset,
    Loaded,
}

#[derive(Debug, Default)]
pub struct ExpenseListState {
    pub phase: LoadPhase,
    pub items: Vec<Expense>,
    /// Last balance reported by the server; `None` until the first load.
    pub balance: Option<Amount>,
    pub aggregates: Vec<CategoryAggregate>,
    pub selected: usize,
    pub last_refresh: Option<DateTime<Local>>,
}

impl ExpenseListState {
    /// Replaces the list with an authoritative server snapshot.
    pub fn apply_snapshot(&mut self, expenses: Vec<Expense>, balance: Amount) {
        self.aggregates = aggregate_by_category(&expenses);
        self.items = expenses;
        self.balance = Some(balance);
        self.phase = LoadPhase::Loaded;
        self.last_refresh = Some(Local::now());
        self.clamp_selection();
    }

    /// Drops an item locally ahead of the refresh that follows a delete.
    ///
    /// Aggregates and balance are left untouched: they only change with the
    /// next snapshot.
    pub fn remove_local(&mut self, id: ExpenseId) -> bool {
        let before = self.items.len();
        self.items.retain(|expense| expense.id != id);
        self.clamp_selection();
        self.items.len() != before
    }

    pub fn selected_expense(&self) -> Option<&Expense> {
        self.items.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.items.len() - 1);
    }

    pub fn select_prev(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn total(&self) -> Amount {
        self.aggregates.iter().map(|agg| agg.value).sum()
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
    }
}
