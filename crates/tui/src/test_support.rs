//! In-process stand-in for the expenses API, used by client and app tests.
//!
//! Behaves like the real backend closely enough for the client: fixed
//! starting balance, 400 with `{"error": ..}` on rejected writes, 404 on
//! unknown ids. Every request is recorded so tests can assert that a code
//! path did (or did not) touch the network.

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex, MutexGuard},
};

use api_types::{
    Amount, Currency, PaymentMethod,
    category::Category,
    expense::{Expense, ExpenseId},
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde_json::{Value, json};

const STARTING_BALANCE: Amount = Amount::new(11_290_800);

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
struct Inner {
    expenses: Vec<Expense>,
    categories: Vec<Category>,
    requests: Vec<Recorded>,
    fail_balance: bool,
    fail_list: bool,
    hang_list: bool,
}

impl Inner {
    fn record(&mut self, method: &str, path: impl Into<String>, body: Option<Value>) {
        self.requests.push(Recorded {
            method: method.to_string(),
            path: path.into(),
            body,
        });
    }

    fn next_expense_id(&self) -> ExpenseId {
        self.expenses.iter().map(|e| e.id).max().unwrap_or(0) + 1
    }
}

type Shared = Arc<Mutex<Inner>>;
type Reply = (StatusCode, Json<Value>);

fn lock(shared: &Shared) -> MutexGuard<'_, Inner> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn reject(message: &str) -> Reply {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

#[derive(Default)]
pub struct FakeApiBuilder {
    expenses: Vec<Expense>,
    categories: Vec<Category>,
}

impl FakeApiBuilder {
    pub fn expenses(mut self, expenses: Vec<Expense>) -> Self {
        self.expenses = expenses;
        self
    }

    pub fn categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    pub async fn start(self) -> FakeApi {
        let shared: Shared = Arc::new(Mutex::new(Inner {
            expenses: self.expenses,
            categories: self.categories,
            ..Inner::default()
        }));

        let router = Router::new()
            .route("/api/expenses", get(list_expenses).post(create_expense))
            .route(
                "/api/expenses/{id}",
                put(update_expense).delete(delete_expense),
            )
            .route("/api/balance", get(balance))
            .route("/api/categories", get(list_categories).post(create_category))
            .with_state(shared.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        FakeApi { addr, shared }
    }
}

#[derive(Clone)]
pub struct FakeApi {
    addr: SocketAddr,
    shared: Shared,
}

impl FakeApi {
    pub fn builder() -> FakeApiBuilder {
        FakeApiBuilder::default()
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        lock(&self.shared).requests.clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn clear_requests(&self) {
        lock(&self.shared).requests.clear();
    }

    pub fn expenses(&self) -> Vec<Expense> {
        lock(&self.shared).expenses.clone()
    }

    pub fn fail_balance(&self, fail: bool) {
        lock(&self.shared).fail_balance = fail;
    }

    pub fn fail_list(&self, fail: bool) {
        lock(&self.shared).fail_list = fail;
    }

    /// Makes `GET /api/expenses` accept the request and never answer.
    pub fn hang_list(&self, hang: bool) {
        lock(&self.shared).hang_list = hang;
    }
}

pub fn expense(id: ExpenseId, name: &str, category: &str, cents: i64) -> Expense {
    Expense {
        id,
        name: name.to_string(),
        amount: Amount::new(cents),
        category: category.to_string(),
        category_id: None,
        currency: Currency::Cad,
        payment_method: PaymentMethod::PhysicalCash,
        date: "14 Oct 2026".to_string(),
        icon: None,
    }
}

pub fn category(id: i64, name: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
        icon: None,
    }
}

async fn list_expenses(State(shared): State<Shared>) -> Reply {
    let hang = {
        let mut inner = lock(&shared);
        inner.record("GET", "/api/expenses", None);
        inner.hang_list
    };
    if hang {
        std::future::pending::<()>().await;
    }

    let inner = lock(&shared);
    if inner.fail_list {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(Value::Null));
    }
    (StatusCode::OK, Json(json!(inner.expenses)))
}

async fn create_expense(State(shared): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut inner = lock(&shared);
    inner.record("POST", "/api/expenses", Some(body.clone()));

    let Some(category_name) = body["category"].as_str().map(str::to_string) else {
        return reject("Category is required");
    };
    let Some(category) = inner
        .categories
        .iter()
        .find(|c| c.name == category_name)
        .cloned()
    else {
        return reject(&format!("Category {category_name} not found"));
    };
    let name = body["name"].as_str().unwrap_or_default().to_string();
    let Some(amount) = body["amount"].as_f64() else {
        return reject("Name and amount are required");
    };
    if name.is_empty() {
        return reject("Name and amount are required");
    }
    let Ok(amount) = Amount::from_major(amount) else {
        return reject("Invalid amount format");
    };

    let expense = Expense {
        id: inner.next_expense_id(),
        name,
        amount,
        category: category.name,
        category_id: Some(category.id),
        currency: serde_json::from_value(body["currency"].clone()).unwrap_or(Currency::Cad),
        payment_method: serde_json::from_value(body["payment_method"].clone())
            .unwrap_or(PaymentMethod::PhysicalCash),
        date: "14 Oct 2026".to_string(),
        icon: category.icon,
    };
    inner.expenses.insert(0, expense.clone());
    (StatusCode::CREATED, Json(json!(expense)))
}

async fn update_expense(
    State(shared): State<Shared>,
    Path(id): Path<ExpenseId>,
    Json(body): Json<Value>,
) -> Reply {
    let mut inner = lock(&shared);
    inner.record("PUT", format!("/api/expenses/{id}"), Some(body.clone()));

    let amount = match &body["amount"] {
        Value::Null => None,
        value => match value.as_f64().map(Amount::from_major) {
            Some(Ok(amount)) => Some(amount),
            _ => return reject("Invalid amount format"),
        },
    };

    let Some(expense) = inner.expenses.iter_mut().find(|e| e.id == id) else {
        return (StatusCode::NOT_FOUND, Json(Value::Null));
    };
    if let Some(name) = body["name"].as_str() {
        expense.name = name.to_string();
    }
    if let Some(amount) = amount {
        expense.amount = amount;
    }
    if let Some(category) = body["category"].as_str() {
        expense.category = category.to_string();
    }
    if let Ok(currency) = serde_json::from_value(body["currency"].clone()) {
        expense.currency = currency;
    }
    if let Ok(method) = serde_json::from_value(body["payment_method"].clone()) {
        expense.payment_method = method;
    }
    (StatusCode::OK, Json(json!(expense)))
}

async fn delete_expense(State(shared): State<Shared>, Path(id): Path<ExpenseId>) -> Reply {
    let mut inner = lock(&shared);
    inner.record("DELETE", format!("/api/expenses/{id}"), None);

    let before = inner.expenses.len();
    inner.expenses.retain(|e| e.id != id);
    if inner.expenses.len() == before {
        return (StatusCode::NOT_FOUND, Json(Value::Null));
    }
    (
        StatusCode::OK,
        Json(json!({ "message": "Expense deleted successfully" })),
    )
}

async fn balance(State(shared): State<Shared>) -> Reply {
    let mut inner = lock(&shared);
    inner.record("GET", "/api/balance", None);
    if inner.fail_balance {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(Value::Null));
    }
    let spent: Amount = inner.expenses.iter().map(|e| e.amount).sum();
    let balance = Amount::new(STARTING_BALANCE.cents() - spent.cents());
    (StatusCode::OK, Json(json!({ "balance": balance })))
}

async fn list_categories(State(shared): State<Shared>) -> Reply {
    let mut inner = lock(&shared);
    inner.record("GET", "/api/categories", None);
    (StatusCode::OK, Json(json!(inner.categories)))
}

async fn create_category(State(shared): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut inner = lock(&shared);
    inner.record("POST", "/api/categories", Some(body.clone()));

    let name = body["name"].as_str().unwrap_or_default().to_string();
    if name.is_empty() {
        return reject("Category name is required");
    }
    if inner.categories.iter().any(|c| c.name == name) {
        return reject("Category already exists");
    }
    let category = Category {
        id: inner.categories.iter().map(|c| c.id).max().unwrap_or(0) + 1,
        name,
        icon: Some("https://cdn-icons-png.flaticon.com/512/3126/3126647.png".to_string()),
    };
    inner.categories.push(category.clone());
    (StatusCode::CREATED, Json(json!(category)))
}
