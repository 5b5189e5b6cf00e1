use api_types::{
    Amount, Currency, PaymentMethod,
    expense::{AmountInput, Expense, ExpenseId, ExpenseNew, ExpenseUpdate},
};
use thiserror::Error;

use crate::app::categories::CategoryBook;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Category,
    Amount,
    Currency,
    PaymentMethod,
}

impl FormField {
    pub const ORDER: [FormField; 5] = [
        FormField::Name,
        FormField::Category,
        FormField::Amount,
        FormField::Currency,
        FormField::PaymentMethod,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "NAME",
            Self::Category => "CATEGORY",
            Self::Amount => "AMOUNT",
            Self::Currency => "CURRENCY",
            Self::PaymentMethod => "PAYMENT METHOD",
        }
    }

    pub fn is_text(self) -> bool {
        matches!(self, Self::Name | Self::Amount)
    }

    pub fn next(self) -> Self {
        cycle_value(&Self::ORDER, self, true)
    }

    pub fn prev(self) -> Self {
        cycle_value(&Self::ORDER, self, false)
    }
}

fn cycle_value<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let len = all.len();
    let index = all.iter().position(|v| *v == current).unwrap_or(0);
    let next = if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    };
    all[next]
}

/// Client-side rejections of the add form; the message is shown as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill in all required fields")]
    MissingFields,
    #[error("Please enter a valid amount")]
    InvalidAmount,
}

/// Field editing shared by the add form and the edit dialog.
pub trait EntryDraft {
    fn focus(&self) -> FormField;
    fn set_focus(&mut self, field: FormField);
    fn text_mut(&mut self, field: FormField) -> Option<&mut String>;
    fn cycle(&mut self, field: FormField, forward: bool, book: &CategoryBook);

    fn focus_next(&mut self) {
        self.set_focus(self.focus().next());
    }

    fn focus_prev(&mut self) {
        self.set_focus(self.focus().prev());
    }

    fn type_char(&mut self, ch: char) {
        let field = self.focus();
        if let Some(text) = self.text_mut(field) {
            text.push(ch);
        }
    }

    fn backspace(&mut self) {
        let field = self.focus();
        if let Some(text) = self.text_mut(field) {
            text.pop();
        }
    }

    fn cycle_focused(&mut self, forward: bool, book: &CategoryBook) {
        let field = self.focus();
        self.cycle(field, forward, book);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddExpenseForm {
    pub name: String,
    pub amount: String,
    pub category: Option<String>,
    pub currency: Currency,
    pub payment_method: PaymentMethod,
    pub focus: FormField,
}

impl Default for AddExpenseForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            amount: String::new(),
            category: None,
            currency: Currency::default(),
            payment_method: PaymentMethod::default(),
            focus: FormField::Name,
        }
    }
}

impl AddExpenseForm {
    /// Picks the first category once the list arrives, unless the user has
    /// already chosen one.
    pub fn on_categories_loaded(&mut self, book: &CategoryBook) {
        if self.category.is_none() {
            self.category = book.first_name().map(str::to_string);
        }
    }

    pub fn select_category(&mut self, name: impl Into<String>) {
        self.category = Some(name.into());
    }

    /// Validates the draft and builds the create request.
    pub fn payload(&self) -> Result<ExpenseNew, FormError> {
        let name = self.name.trim();
        let amount = self.amount.trim();
        let category = self.category.as_deref().unwrap_or("");
        if name.is_empty() || amount.is_empty() || category.is_empty() {
            return Err(FormError::MissingFields);
        }
        let amount: Amount = amount.parse().map_err(|_| FormError::InvalidAmount)?;

        Ok(ExpenseNew {
            name: name.to_string(),
            amount,
            category: category.to_string(),
            currency: self.currency,
            payment_method: self.payment_method,
        })
    }
}

impl EntryDraft for AddExpenseForm {
    fn focus(&self) -> FormField {
        self.focus
    }

    fn set_focus(&mut self, field: FormField) {
        self.focus = field;
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Name => Some(&mut self.name),
            FormField::Amount => Some(&mut self.amount),
            _ => None,
        }
    }

    fn cycle(&mut self, field: FormField, forward: bool, book: &CategoryBook) {
        match field {
            FormField::Category => {
                if let Some(name) = book.cycle(self.category.as_deref(), forward) {
                    self.category = Some(name);
                }
            }
            FormField::Currency => {
                self.currency = cycle_value(&Currency::ALL, self.currency, forward);
            }
            FormField::PaymentMethod => {
                self.payment_method =
                    cycle_value(&PaymentMethod::ALL, self.payment_method, forward);
            }
            FormField::Name | FormField::Amount => {}
        }
    }
}

/// Draft of the edit dialog, seeded from the selected expense.
#[derive(Debug, Clone, PartialEq)]
pub struct EditExpenseForm {
    pub id: ExpenseId,
    pub name: String,
    pub amount: String,
    pub category: String,
    pub currency: Currency,
    pub payment_method: PaymentMethod,
    pub focus: FormField,
}

impl EditExpenseForm {
    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            id: expense.id,
            name: expense.name.clone(),
            amount: expense.amount.to_string(),
            category: expense.category.clone(),
            currency: expense.currency,
            payment_method: expense.payment_method,
            focus: FormField::Name,
        }
    }

    /// Update request for the draft as typed; validation is the server's job.
    pub fn payload(&self) -> ExpenseUpdate {
        ExpenseUpdate {
            name: self.name.clone(),
            amount: AmountInput::from(self.amount.trim()),
            category: self.category.clone(),
            currency: self.currency,
            payment_method: self.payment_method,
        }
    }
}

impl EntryDraft for EditExpenseForm {
    fn focus(&self) -> FormField {
        self.focus
    }

    fn set_focus(&mut self, field: FormField) {
        self.focus = field;
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Name => Some(&mut self.name),
            FormField::Amount => Some(&mut self.amount),
            _ => None,
        }
    }

    fn cycle(&mut self, field: FormField, forward: bool, book: &CategoryBook) {
        match field {
            FormField::Category => {
                if let Some(name) = book.cycle(Some(&self.category), forward) {
                    self.category = name;
                }
            }
            FormField::Currency => {
                self.currency = cycle_value(&Currency::ALL, self.currency, forward);
            }
            FormField::PaymentMethod => {
                self.payment_method =
                    cycle_value(&PaymentMethod::ALL, self.payment_method, forward);
            }
            FormField::Name | FormField::Amount => {}
        }
    }
}
