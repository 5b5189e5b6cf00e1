use serde::{Deserialize, Serialize};

mod amount;

pub use amount::{Amount, AmountError};

/// Currencies an expense can be recorded in.
///
/// The serialized form is the display label the server stores verbatim
/// (`"CAD ($)"`), so the label doubles as the wire value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "CAD ($)")]
    Cad,
    #[serde(rename = "USD ($)")]
    Usd,
    #[serde(rename = "EUR (€)")]
    Eur,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Cad, Currency::Usd, Currency::Eur];

    pub fn label(self) -> &'static str {
        match self {
            Self::Cad => "CAD ($)",
            Self::Usd => "USD ($)",
            Self::Eur => "EUR (€)",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Cad | Self::Usd => "$",
            Self::Eur => "€",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "Physical Cash")]
    PhysicalCash,
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Debit Card")]
    DebitCard,
    #[serde(rename = "UPI")]
    Upi,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::PhysicalCash,
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::Upi,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::PhysicalCash => "Physical Cash",
            Self::CreditCard => "Credit Card",
            Self::DebitCard => "Debit Card",
            Self::Upi => "UPI",
        }
    }
}

/// Error body returned by the API on 4xx responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub mod expense {
    use super::*;

    pub type ExpenseId = i64;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Expense {
        pub id: ExpenseId,
        pub name: String,
        /// Signed amount; the client treats every expense as a debit and
        /// displays the absolute value.
        pub amount: Amount,
        /// Category name.
        pub category: String,
        #[serde(default)]
        pub category_id: Option<i64>,
        pub currency: Currency,
        pub payment_method: PaymentMethod,
        /// Server-formatted display date (`14 Oct 2026`).
        pub date: String,
        /// Icon URL of the category, echoed by the server.
        #[serde(default)]
        pub icon: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub name: String,
        pub amount: Amount,
        pub category: String,
        pub currency: Currency,
        pub payment_method: PaymentMethod,
    }

    /// Amount as typed in the edit dialog.
    ///
    /// Edits are validated by the server only, so text that does not parse is
    /// forwarded as a JSON string instead of being rejected locally.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum AmountInput {
        Parsed(Amount),
        Raw(String),
    }

    impl From<&str> for AmountInput {
        fn from(value: &str) -> Self {
            match value.parse::<Amount>() {
                Ok(amount) => Self::Parsed(amount),
                Err(_) => Self::Raw(value.to_string()),
            }
        }
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        pub name: String,
        pub amount: AmountInput,
        pub category: String,
        pub currency: Currency,
        pub payment_method: PaymentMethod,
    }
}

pub mod category {
    use super::*;

    pub type CategoryId = i64;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Category {
        pub id: CategoryId,
        pub name: String,
        #[serde(default)]
        pub icon: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryNew {
        pub name: String,
    }
}

pub mod balance {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Balance {
        pub balance: Amount,
    }
}
