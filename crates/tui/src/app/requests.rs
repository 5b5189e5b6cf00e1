use std::collections::HashMap;

use api_types::{
    balance::Balance,
    category::Category,
    expense::{Expense, ExpenseId},
};

use crate::client::ClientError;

/// Kinds of request the app issues; each kind gates the control that starts
/// it while one is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Request {
    LoadExpenses,
    LoadCategories,
    CreateExpense,
    CreateCategory,
    UpdateExpense,
    DeleteExpense,
}

/// Requests in flight, counted per kind.
#[derive(Debug, Default)]
pub struct Pending {
    in_flight: HashMap<Request, usize>,
}

impl Pending {
    pub fn start(&mut self, request: Request) {
        *self.in_flight.entry(request).or_default() += 1;
    }

    pub fn finish(&mut self, request: Request) {
        if let Some(count) = self.in_flight.get_mut(&request) {
            *count -= 1;
            if *count == 0 {
                self.in_flight.remove(&request);
            }
        }
    }

    pub fn contains(&self, request: Request) -> bool {
        self.in_flight.contains_key(&request)
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }
}

/// Result of a spawned request, handed back to the event loop.
///
/// Loads carry the generation they were issued with so that an older
/// response arriving late never overwrites a newer one.
#[derive(Debug)]
pub enum Outcome {
    Expenses {
        generation: u64,
        result: Result<(Vec<Expense>, Balance), ClientError>,
    },
    Categories {
        generation: u64,
        result: Result<Vec<Category>, ClientError>,
    },
    ExpenseCreated(Result<Expense, ClientError>),
    CategoryCreated(Result<Category, ClientError>),
    ExpenseUpdated {
        id: ExpenseId,
        result: Result<(), ClientError>,
    },
    ExpenseDeleted {
        id: ExpenseId,
        result: Result<(), ClientError>,
    },
}

impl Outcome {
    pub fn request(&self) -> Request {
        match self {
            Self::Expenses { .. } => Request::LoadExpenses,
            Self::Categories { .. } => Request::LoadCategories,
            Self::ExpenseCreated(_) => Request::CreateExpense,
            Self::CategoryCreated(_) => Request::CreateCategory,
            Self::ExpenseUpdated { .. } => Request::UpdateExpense,
            Self::ExpenseDeleted { .. } => Request::DeleteExpense,
        }
    }

    pub fn is_ok(&self) -> bool {
        match self {
            Self::Expenses { result, .. } => result.is_ok(),
            Self::Categories { result, .. } => result.is_ok(),
            Self::ExpenseCreated(result) => result.is_ok(),
            Self::CategoryCreated(result) => result.is_ok(),
            Self::ExpenseUpdated { result, .. } | Self::ExpenseDeleted { result, .. } => {
                result.is_ok()
            }
        }
    }
}
