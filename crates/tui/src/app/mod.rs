pub mod categories;
pub mod expenses;
pub mod forms;
pub mod requests;

use std::{future::Future, time::Duration};

use api_types::{
    balance::Balance,
    category::Category,
    expense::{Expense, ExpenseId},
};
use crossterm::event::{self, Event, KeyEvent};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{
    client::{Client, ClientError},
    config::AppConfig,
    error::{AppError, Result},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

use categories::{CategoryBook, NewCategoryDialog, creation_failure_message};
use expenses::ExpenseListState;
use forms::{AddExpenseForm, EditExpenseForm, EntryDraft};
use requests::{Outcome, Pending, Request};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Add,
}

impl Screen {
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Add => "Add Expense",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeMode {
    List,
    /// Side drawer with edit/delete for the selected expense.
    Actions,
    Edit,
}

#[derive(Debug)]
pub struct HomeState {
    pub mode: HomeMode,
    pub list: ExpenseListState,
    pub edit: Option<EditExpenseForm>,
}

/// Blocking message box; every key except Enter/Esc is swallowed while it is
/// shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertState {
    pub message: String,
}

#[derive(Debug, Clone, Copy)]
pub struct ConnectionState {
    pub ok: bool,
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub home: HomeState,
    pub add: AddExpenseForm,
    pub new_category: NewCategoryDialog,
    pub categories: CategoryBook,
    pub alert: Option<AlertState>,
    pub connection: ConnectionState,
    pub pending: Pending,
    pub base_url: String,
}

/// Owns all state. Requests run as spawned tasks and report back through the
/// outcome channel, so input keeps flowing while any of them is outstanding.
pub struct App {
    client: Client,
    pub state: AppState,
    outcome_tx: UnboundedSender<Outcome>,
    outcomes: UnboundedReceiver<Outcome>,
    expenses_generation: u64,
    categories_generation: u64,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let (outcome_tx, outcomes) = mpsc::unbounded_channel();
        let state = AppState {
            screen: Screen::Home,
            home: HomeState {
                mode: HomeMode::List,
                list: ExpenseListState::default(),
                edit: None,
            },
            add: AddExpenseForm::default(),
            new_category: NewCategoryDialog::default(),
            categories: CategoryBook::default(),
            alert: None,
            connection: ConnectionState { ok: true },
            pending: Pending::default(),
            base_url: config.base_url,
        };

        Ok(Self {
            client,
            state,
            outcome_tx,
            outcomes,
            expenses_generation: 0,
            categories_generation: 0,
            should_quit: false,
        })
    }

    /// Must run inside a tokio runtime: requests are spawned onto it.
    pub fn run(&mut self) -> Result<()> {
        self.load_categories();
        self.open_home();

        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        ui::restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(100);

        while !self.should_quit {
            while let Ok(outcome) = self.outcomes.try_recv() {
                self.apply(outcome);
            }

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let action = map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        if self.state.alert.is_some() {
            if matches!(action, AppAction::Submit | AppAction::Cancel) {
                self.state.alert = None;
            }
            return;
        }

        match self.state.screen {
            Screen::Home => self.handle_home_key(action),
            Screen::Add => self.handle_add_key(action),
        }
    }

    fn handle_home_key(&mut self, action: AppAction) {
        match self.state.home.mode {
            HomeMode::List => match action {
                AppAction::Up | AppAction::Input('k') => self.state.home.list.select_prev(),
                AppAction::Down | AppAction::Input('j') => self.state.home.list.select_next(),
                AppAction::Submit => self.open_actions(),
                AppAction::Input('a') => self.open_add(),
                AppAction::Input('h') | AppAction::Input('r') => {
                    if !self.state.pending.contains(Request::LoadExpenses) {
                        self.load_expenses();
                    }
                }
                AppAction::Input('q') => self.should_quit = true,
                _ => {}
            },
            HomeMode::Actions => match action {
                AppAction::Input('e') => self.open_edit(),
                AppAction::Input('d') => {
                    if !self.state.pending.contains(Request::DeleteExpense) {
                        self.delete_selected();
                    }
                }
                AppAction::Cancel | AppAction::Input('b') => {
                    self.state.home.mode = HomeMode::List;
                }
                _ => {}
            },
            HomeMode::Edit => self.handle_edit_key(action),
        }
    }

    fn handle_edit_key(&mut self, action: AppAction) {
        let AppState {
            home, categories, ..
        } = &mut self.state;
        let Some(form) = home.edit.as_mut() else {
            home.mode = HomeMode::List;
            return;
        };

        match action {
            AppAction::Cancel => {
                home.edit = None;
                home.mode = HomeMode::List;
            }
            AppAction::Submit => {
                if !self.state.pending.contains(Request::UpdateExpense) {
                    self.submit_edit();
                }
            }
            other => edit_draft(form, other, categories),
        }
    }

    fn handle_add_key(&mut self, action: AppAction) {
        if self.state.new_category.open {
            let dialog = &mut self.state.new_category;
            match action {
                AppAction::Cancel => dialog.cancel(),
                AppAction::Submit => {
                    if !self.state.pending.contains(Request::CreateCategory) {
                        self.submit_new_category();
                    }
                }
                AppAction::Backspace => {
                    dialog.input.pop();
                }
                AppAction::Input(ch) => dialog.input.push(ch),
                _ => {}
            }
            return;
        }

        match action {
            AppAction::Cancel => self.open_home(),
            AppAction::Submit => {
                if !self.state.pending.contains(Request::CreateExpense) {
                    self.submit_add();
                }
            }
            AppAction::Input(ch) if !self.state.add.focus.is_text() => match ch {
                '+' if self.state.add.focus == forms::FormField::Category => {
                    self.state.new_category.open();
                }
                'h' => self.open_home(),
                _ => edit_draft(&mut self.state.add, action, &self.state.categories),
            },
            other => edit_draft(&mut self.state.add, other, &self.state.categories),
        }
    }

    fn spawn<F>(&mut self, request: Request, task: F)
    where
        F: Future<Output = Outcome> + Send + 'static,
    {
        self.state.pending.start(request);
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            // Fails only once the app is gone.
            let _ = tx.send(task.await);
        });
    }

    /// Folds a finished request back into the state.
    fn apply(&mut self, outcome: Outcome) {
        self.state.pending.finish(outcome.request());
        // Connection status shown in the info bar follows the latest response.
        self.state.connection.ok = outcome.is_ok();

        match outcome {
            Outcome::Expenses { generation, result } => self.on_expenses(generation, result),
            Outcome::Categories { generation, result } => self.on_categories(generation, result),
            Outcome::ExpenseCreated(result) => self.on_expense_created(result),
            Outcome::CategoryCreated(result) => self.on_category_created(result),
            Outcome::ExpenseUpdated { id, result } => self.on_expense_updated(id, result),
            Outcome::ExpenseDeleted { id, result } => self.on_expense_deleted(id, result),
        }
    }

    fn alert(&mut self, message: impl Into<String>) {
        self.state.alert = Some(AlertState {
            message: message.into(),
        });
    }

    fn open_home(&mut self) {
        self.state.screen = Screen::Home;
        self.state.home.mode = HomeMode::List;
        self.state.home.edit = None;
        self.load_expenses();
    }

    /// Fetches expenses and balance together; a snapshot is applied only if
    /// both requests succeed.
    fn load_expenses(&mut self) {
        self.expenses_generation += 1;
        let generation = self.expenses_generation;
        let client = self.client.clone();
        self.spawn(Request::LoadExpenses, async move {
            let result = tokio::try_join!(client.expenses_list(), client.balance_get());
            Outcome::Expenses { generation, result }
        });
    }

    fn on_expenses(
        &mut self,
        generation: u64,
        result: std::result::Result<(Vec<Expense>, Balance), ClientError>,
    ) {
        if generation != self.expenses_generation {
            tracing::debug!(generation, "discarding stale expense snapshot");
            return;
        }

        match result {
            Ok((expenses, balance)) => {
                tracing::info!(count = expenses.len(), "expenses loaded");
                self.state
                    .home
                    .list
                    .apply_snapshot(expenses, balance.balance);
            }
            Err(err) => tracing::warn!("failed to load expenses: {err}"),
        }
    }

    fn open_add(&mut self) {
        self.state.screen = Screen::Add;
        self.state.add = AddExpenseForm::default();
        self.state.new_category = NewCategoryDialog::default();
        self.load_categories();
    }

    fn load_categories(&mut self) {
        self.categories_generation += 1;
        let generation = self.categories_generation;
        let client = self.client.clone();
        self.spawn(Request::LoadCategories, async move {
            let result = client.categories_list().await;
            Outcome::Categories { generation, result }
        });
    }

    fn on_categories(
        &mut self,
        generation: u64,
        result: std::result::Result<Vec<Category>, ClientError>,
    ) {
        if generation != self.categories_generation {
            return;
        }

        match result {
            Ok(categories) => {
                tracing::debug!(count = categories.len(), "categories loaded");
                self.state.categories.replace(categories);
                self.state.add.on_categories_loaded(&self.state.categories);
            }
            Err(err) => tracing::warn!("failed to load categories: {err}"),
        }
    }

    fn submit_add(&mut self) {
        let payload = match self.state.add.payload() {
            Ok(payload) => payload,
            Err(err) => {
                self.alert(err.to_string());
                return;
            }
        };

        let client = self.client.clone();
        self.spawn(Request::CreateExpense, async move {
            Outcome::ExpenseCreated(client.expense_create(&payload).await)
        });
    }

    fn on_expense_created(&mut self, result: std::result::Result<Expense, ClientError>) {
        match result {
            Ok(expense) => {
                tracing::info!(id = expense.id, name = %expense.name, "expense created");
                if self.state.screen == Screen::Add {
                    self.open_home();
                } else {
                    self.load_expenses();
                }
            }
            Err(err) => tracing::error!("failed to add expense: {err}"),
        }
    }

    fn submit_new_category(&mut self) {
        let Some(payload) = self.state.new_category.submission() else {
            return;
        };

        let client = self.client.clone();
        self.spawn(Request::CreateCategory, async move {
            Outcome::CategoryCreated(client.category_create(&payload).await)
        });
    }

    fn on_category_created(&mut self, result: std::result::Result<Category, ClientError>) {
        match result {
            Ok(category) => {
                tracing::info!(id = category.id, name = %category.name, "category created");
                self.state.add.select_category(category.name.clone());
                self.state.categories.push(category);
                self.state.new_category.finish();
            }
            Err(err) => {
                tracing::error!("failed to add category: {err}");
                self.alert(creation_failure_message(&err));
            }
        }
    }

    fn open_actions(&mut self) {
        if self.state.home.list.selected_expense().is_some() {
            self.state.home.mode = HomeMode::Actions;
        }
    }

    fn open_edit(&mut self) {
        let Some(expense) = self.state.home.list.selected_expense() else {
            self.state.home.mode = HomeMode::List;
            return;
        };
        self.state.home.edit = Some(EditExpenseForm::from_expense(expense));
        self.state.home.mode = HomeMode::Edit;
    }

    /// Sends the edit; the dialog stays open until the server accepts it.
    fn submit_edit(&mut self) {
        let Some(form) = self.state.home.edit.as_ref() else {
            return;
        };
        let id = form.id;
        let payload = form.payload();

        let client = self.client.clone();
        self.spawn(Request::UpdateExpense, async move {
            let result = client.expense_update(id, &payload).await;
            Outcome::ExpenseUpdated { id, result }
        });
    }

    /// Nothing is patched locally: close the dialog and re-fetch.
    fn on_expense_updated(&mut self, id: ExpenseId, result: std::result::Result<(), ClientError>) {
        match result {
            Ok(()) => {
                tracing::info!(id, "expense updated");
                if self.state.home.edit.as_ref().is_some_and(|form| form.id == id) {
                    self.state.home.edit = None;
                    self.state.home.mode = HomeMode::List;
                }
                self.load_expenses();
            }
            Err(err) => tracing::error!(id, "failed to update expense: {err}"),
        }
    }

    fn delete_selected(&mut self) {
        self.state.home.mode = HomeMode::List;
        let Some(id) = self.state.home.list.selected_expense().map(|e| e.id) else {
            return;
        };

        let client = self.client.clone();
        self.spawn(Request::DeleteExpense, async move {
            let result = client.expense_delete(id).await;
            Outcome::ExpenseDeleted { id, result }
        });
    }

    /// The removal is applied (and drawn) before the follow-up refresh is
    /// even issued; it stands if that refresh fails.
    fn on_expense_deleted(&mut self, id: ExpenseId, result: std::result::Result<(), ClientError>) {
        match result {
            Ok(()) => {
                tracing::info!(id, "expense deleted");
                self.state.home.list.remove_local(id);
                self.load_expenses();
            }
            Err(err) => tracing::error!(id, "failed to delete expense: {err}"),
        }
    }
}

/// Applies a field-level action to either draft. Space cycles selectors so
/// they are usable without arrow keys.
fn edit_draft<D: EntryDraft>(draft: &mut D, action: AppAction, book: &CategoryBook) {
    match action {
        AppAction::NextField | AppAction::Down => draft.focus_next(),
        AppAction::PrevField | AppAction::Up => draft.focus_prev(),
        AppAction::Left => draft.cycle_focused(false, book),
        AppAction::Right => draft.cycle_focused(true, book),
        AppAction::Backspace => draft.backspace(),
        AppAction::Input(ch) if draft.focus().is_text() => draft.type_char(ch),
        AppAction::Input(' ') => draft.cycle_focused(true, book),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use api_types::{Amount, Currency};
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::test_support::{FakeApi, category, expense};

    fn app_for(api: &FakeApi) -> App {
        App::new(AppConfig {
            base_url: api.base_url(),
            ..AppConfig::default()
        })
        .unwrap()
    }

    async fn next_outcome(app: &mut App) -> Outcome {
        tokio::time::timeout(Duration::from_secs(5), app.outcomes.recv())
            .await
            .expect("request did not finish")
            .expect("outcome channel closed")
    }

    /// Applies outcomes until nothing is in flight, including follow-up
    /// requests issued while applying.
    async fn settle(app: &mut App) {
        while !app.state.pending.is_idle() {
            let outcome = next_outcome(app).await;
            app.apply(outcome);
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn press(app: &mut App, code: KeyCode) {
        app.handle_key(key(code));
        settle(app).await;
    }

    async fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch)).await;
        }
    }

    fn names(app: &App) -> Vec<String> {
        app.state
            .home
            .list
            .items
            .iter()
            .map(|e| e.name.clone())
            .collect()
    }

    #[tokio::test]
    async fn coffee_scenario_posts_defaults_and_returns_home() {
        let api = FakeApi::builder()
            .categories(vec![category(1, "Food")])
            .start()
            .await;
        let mut app = app_for(&api);
        app.open_home();
        settle(&mut app).await;
        assert!(app.state.home.list.items.is_empty());

        press(&mut app, KeyCode::Char('a')).await;
        assert_eq!(app.state.screen, Screen::Add);
        assert_eq!(app.state.add.category.as_deref(), Some("Food"));

        type_text(&mut app, "Coffee").await;
        press(&mut app, KeyCode::Tab).await;
        press(&mut app, KeyCode::Tab).await;
        type_text(&mut app, "4.50").await;
        press(&mut app, KeyCode::Enter).await;

        let posted = api.requests_to("POST", "/api/expenses");
        assert_eq!(posted.len(), 1);
        assert_eq!(
            posted[0].body,
            Some(serde_json::json!({
                "name": "Coffee",
                "amount": 4.5,
                "category": "Food",
                "currency": "CAD ($)",
                "payment_method": "Physical Cash"
            }))
        );
        assert_eq!(app.state.screen, Screen::Home);
        assert_eq!(names(&app), ["Coffee"]);
        assert_eq!(app.state.home.list.total(), Amount::new(450));
    }

    #[tokio::test]
    async fn invalid_add_submissions_never_reach_the_server() {
        let api = FakeApi::builder()
            .categories(vec![category(1, "Food")])
            .start()
            .await;
        let mut app = app_for(&api);
        app.open_add();
        settle(&mut app).await;

        for (name, amount, message) in [
            ("", "4.50", "Please fill in all required fields"),
            ("Coffee", "", "Please fill in all required fields"),
            ("Coffee", "four", "Please enter a valid amount"),
        ] {
            app.state.add.name = name.to_string();
            app.state.add.amount = amount.to_string();
            press(&mut app, KeyCode::Enter).await;

            assert_eq!(
                app.state.alert.as_ref().map(|a| a.message.as_str()),
                Some(message)
            );
            press(&mut app, KeyCode::Esc).await;
            assert!(app.state.alert.is_none());
        }

        assert!(api.requests_to("POST", "/api/expenses").is_empty());
        assert_eq!(app.state.screen, Screen::Add);
    }

    #[tokio::test]
    async fn missing_category_blocks_submission() {
        let api = FakeApi::builder().start().await;
        let mut app = app_for(&api);
        app.open_add();
        settle(&mut app).await;
        assert_eq!(app.state.add.category, None);

        app.state.add.name = "Coffee".to_string();
        app.state.add.amount = "4.50".to_string();
        press(&mut app, KeyCode::Enter).await;

        assert!(app.state.alert.is_some());
        assert!(api.requests_to("POST", "/api/expenses").is_empty());
    }

    #[tokio::test]
    async fn alert_swallows_other_keys() {
        let api = FakeApi::builder().start().await;
        let mut app = app_for(&api);
        app.open_add();
        settle(&mut app).await;
        press(&mut app, KeyCode::Enter).await;
        assert!(app.state.alert.is_some());

        type_text(&mut app, "abc").await;
        assert!(app.state.add.name.is_empty());

        press(&mut app, KeyCode::Enter).await;
        assert!(app.state.alert.is_none());
        type_text(&mut app, "abc").await;
        assert_eq!(app.state.add.name, "abc");
    }

    #[tokio::test]
    async fn whitespace_category_is_a_no_op() {
        let api = FakeApi::builder()
            .categories(vec![category(1, "Food")])
            .start()
            .await;
        let mut app = app_for(&api);
        app.open_add();
        settle(&mut app).await;

        press(&mut app, KeyCode::Tab).await;
        press(&mut app, KeyCode::Char('+')).await;
        assert!(app.state.new_category.open);

        type_text(&mut app, "   ").await;
        press(&mut app, KeyCode::Enter).await;

        assert!(app.state.new_category.open);
        assert!(app.state.alert.is_none());
        assert!(app.state.pending.is_idle());
        assert!(api.requests_to("POST", "/api/categories").is_empty());
    }

    #[tokio::test]
    async fn created_category_is_appended_and_selected() {
        let api = FakeApi::builder()
            .categories(vec![category(1, "Food")])
            .start()
            .await;
        let mut app = app_for(&api);
        app.open_add();
        settle(&mut app).await;

        app.state.new_category.open();
        type_text(&mut app, "  Pets ").await;
        press(&mut app, KeyCode::Enter).await;

        let posted = api.requests_to("POST", "/api/categories");
        assert_eq!(posted[0].body, Some(serde_json::json!({ "name": "Pets" })));
        assert!(!app.state.new_category.open);
        assert!(app.state.new_category.input.is_empty());
        assert_eq!(app.state.add.category.as_deref(), Some("Pets"));
        let known: Vec<_> = app
            .state
            .categories
            .items()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(known, ["Food", "Pets"]);
    }

    #[tokio::test]
    async fn rejected_category_shows_server_message() {
        let api = FakeApi::builder()
            .categories(vec![category(1, "Food")])
            .start()
            .await;
        let mut app = app_for(&api);
        app.open_add();
        settle(&mut app).await;

        app.state.new_category.open();
        type_text(&mut app, "Food").await;
        press(&mut app, KeyCode::Enter).await;

        assert_eq!(
            app.state.alert.as_ref().map(|a| a.message.as_str()),
            Some("Category already exists")
        );
        assert!(app.state.new_category.open);
        assert_eq!(app.state.categories.items().len(), 1);
    }

    #[tokio::test]
    async fn deleted_expense_leaves_the_list_before_the_refresh_lands() {
        let api = FakeApi::builder()
            .expenses(vec![
                expense(7, "Groceries", "Food", -2000),
                expense(8, "Bus", "Transportation", -300),
            ])
            .start()
            .await;
        let mut app = app_for(&api);
        app.open_home();
        settle(&mut app).await;

        press(&mut app, KeyCode::Enter).await;
        app.handle_key(key(KeyCode::Char('d')));
        assert!(app.state.pending.contains(Request::DeleteExpense));

        let outcome = next_outcome(&mut app).await;
        assert_eq!(outcome.request(), Request::DeleteExpense);
        app.apply(outcome);

        assert_eq!(names(&app), ["Bus"]);
        assert!(app.state.pending.contains(Request::LoadExpenses));
        assert_eq!(app.state.home.list.aggregates.len(), 2);

        settle(&mut app).await;
        let aggregates = &app.state.home.list.aggregates;
        assert_eq!(aggregates.len(), 1);
        assert_eq!(aggregates[0].name, "Transportation");
        assert_eq!(
            app.state.home.list.balance,
            Some(Amount::new(11_290_800 + 300))
        );
    }

    #[tokio::test]
    async fn delete_removes_locally_even_if_refresh_fails() {
        let api = FakeApi::builder()
            .expenses(vec![
                expense(7, "Groceries", "Food", -2000),
                expense(8, "Snack", "Food", -500),
            ])
            .start()
            .await;
        let mut app = app_for(&api);
        app.open_home();
        settle(&mut app).await;
        let balance_before = app.state.home.list.balance;

        press(&mut app, KeyCode::Down).await;
        press(&mut app, KeyCode::Enter).await;
        assert_eq!(app.state.home.mode, HomeMode::Actions);

        api.fail_list(true);
        api.clear_requests();
        press(&mut app, KeyCode::Char('d')).await;

        assert_eq!(api.requests_to("DELETE", "/api/expenses/8").len(), 1);
        assert_eq!(api.requests_to("GET", "/api/expenses").len(), 1);
        assert!(api.expenses().iter().all(|e| e.id != 8));
        assert_eq!(names(&app), ["Groceries"]);
        assert_eq!(app.state.home.list.balance, balance_before);
        assert_eq!(app.state.home.mode, HomeMode::List);
        assert!(!app.state.connection.ok);
    }

    #[tokio::test]
    async fn input_is_handled_while_a_request_hangs() {
        let api = FakeApi::builder()
            .categories(vec![category(1, "Food")])
            .start()
            .await;
        api.hang_list(true);
        let mut app = app_for(&api);

        app.open_home();
        assert!(app.state.pending.contains(Request::LoadExpenses));

        // A second refresh is not stacked on the outstanding one.
        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(app.expenses_generation, 1);

        app.handle_key(key(KeyCode::Char('a')));
        assert_eq!(app.state.screen, Screen::Add);
        let outcome = next_outcome(&mut app).await;
        assert_eq!(outcome.request(), Request::LoadCategories);
        app.apply(outcome);
        assert_eq!(app.state.add.category.as_deref(), Some("Food"));

        app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(app.state.add.name, "x");
        assert!(app.state.pending.contains(Request::LoadExpenses));

        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn stale_snapshot_is_discarded() {
        let api = FakeApi::builder()
            .expenses(vec![expense(7, "Groceries", "Food", -2000)])
            .start()
            .await;
        let mut app = app_for(&api);
        app.open_home();
        settle(&mut app).await;

        app.apply(Outcome::Expenses {
            generation: app.expenses_generation - 1,
            result: Ok((vec![], Balance { balance: Amount::ZERO })),
        });
        assert_eq!(names(&app), ["Groceries"]);
        assert_eq!(app.state.home.list.balance, Some(Amount::new(11_292_800)));
    }

    #[tokio::test]
    async fn edit_waits_for_server_then_refetches() {
        let api = FakeApi::builder()
            .categories(vec![category(1, "Food"), category(2, "Bills")])
            .expenses(vec![expense(7, "Groceries", "Food", -2000)])
            .start()
            .await;
        let mut app = app_for(&api);
        app.load_categories();
        app.open_home();
        settle(&mut app).await;

        press(&mut app, KeyCode::Enter).await;
        press(&mut app, KeyCode::Char('e')).await;
        assert_eq!(app.state.home.mode, HomeMode::Edit);

        type_text(&mut app, " run").await;
        press(&mut app, KeyCode::Tab).await;
        press(&mut app, KeyCode::Right).await;
        press(&mut app, KeyCode::Tab).await;
        press(&mut app, KeyCode::Tab).await;
        press(&mut app, KeyCode::Left).await;
        api.clear_requests();

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state.home.mode, HomeMode::Edit);
        app.handle_key(key(KeyCode::Enter));
        settle(&mut app).await;

        let put = api.requests_to("PUT", "/api/expenses/7");
        assert_eq!(put.len(), 1);
        let body = put[0].body.as_ref().unwrap();
        assert_eq!(body["name"], "Groceries run");
        assert_eq!(body["category"], "Bills");
        assert_eq!(body["currency"], "EUR (€)");
        assert_eq!(body["amount"], -20.0);

        assert_eq!(app.state.home.mode, HomeMode::List);
        assert!(app.state.home.edit.is_none());
        assert_eq!(api.requests_to("GET", "/api/expenses").len(), 1);
        let refreshed = &app.state.home.list.items[0];
        assert_eq!(refreshed.name, "Groceries run");
        assert_eq!(refreshed.currency, Currency::Eur);
    }

    #[tokio::test]
    async fn rejected_edit_keeps_dialog_and_list() {
        let api = FakeApi::builder()
            .expenses(vec![expense(7, "Groceries", "Food", -2000)])
            .start()
            .await;
        let mut app = app_for(&api);
        app.open_home();
        settle(&mut app).await;
        app.open_actions();
        app.open_edit();

        if let Some(form) = app.state.home.edit.as_mut() {
            form.amount = "lots".to_string();
        }
        api.clear_requests();
        app.submit_edit();
        settle(&mut app).await;

        let put = api.requests_to("PUT", "/api/expenses/7");
        assert_eq!(put[0].body.as_ref().unwrap()["amount"], "lots");
        assert_eq!(app.state.home.mode, HomeMode::Edit);
        assert!(app.state.home.edit.is_some());
        assert!(api.requests_to("GET", "/api/expenses").is_empty());
        assert_eq!(app.state.home.list.items[0].amount, Amount::new(-2000));
    }

    #[tokio::test]
    async fn load_is_all_or_nothing() {
        let api = FakeApi::builder()
            .expenses(vec![expense(7, "Groceries", "Food", -2000)])
            .start()
            .await;
        api.fail_balance(true);
        let mut app = app_for(&api);

        app.load_expenses();
        settle(&mut app).await;
        assert_eq!(app.state.home.list.phase, expenses::LoadPhase::Unset);
        assert!(app.state.home.list.items.is_empty());
        assert_eq!(app.state.home.list.balance, None);

        api.fail_balance(false);
        app.load_expenses();
        settle(&mut app).await;
        assert_eq!(app.state.home.list.phase, expenses::LoadPhase::Loaded);
        assert_eq!(names(&app), ["Groceries"]);
    }

    #[tokio::test]
    async fn unreachable_server_flags_connection() {
        let mut app = App::new(AppConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..AppConfig::default()
        })
        .unwrap();
        app.open_home();
        settle(&mut app).await;
        assert!(!app.state.connection.ok);
        assert_eq!(app.state.home.list.phase, expenses::LoadPhase::Unset);
    }

    #[tokio::test]
    async fn navigation_resets_add_form_and_reloads_home() {
        let api = FakeApi::builder()
            .categories(vec![category(1, "Food")])
            .start()
            .await;
        let mut app = app_for(&api);

        press(&mut app, KeyCode::Char('a')).await;
        type_text(&mut app, "draft").await;
        api.clear_requests();
        press(&mut app, KeyCode::Esc).await;
        assert_eq!(app.state.screen, Screen::Home);
        assert_eq!(api.requests_to("GET", "/api/expenses").len(), 1);
        assert_eq!(api.requests_to("GET", "/api/balance").len(), 1);

        press(&mut app, KeyCode::Char('a')).await;
        assert!(app.state.add.name.is_empty());
        assert_eq!(api.requests_to("GET", "/api/categories").len(), 1);

        press(&mut app, KeyCode::Esc).await;
        press(&mut app, KeyCode::Char('q')).await;
        assert!(app.should_quit);
    }
}
