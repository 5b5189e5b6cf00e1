use api_types::category::{Category, CategoryNew};

use crate::client::ClientError;

const CREATE_FALLBACK_MESSAGE: &str = "Failed to add category";

/// Categories known to the client, in server order plus any created since.
///
/// Shared by the add form and the edit dialog so both offer the same options.
#[derive(Debug, Default)]
pub struct CategoryBook {
    items: Vec<Category>,
}

impl CategoryBook {
    pub fn replace(&mut self, categories: Vec<Category>) {
        self.items = categories;
    }

    pub fn push(&mut self, category: Category) {
        self.items.push(category);
    }

    pub fn items(&self) -> &[Category] {
        &self.items
    }

    pub fn first_name(&self) -> Option<&str> {
        self.items.first().map(|c| c.name.as_str())
    }

    /// Next (or previous) category name after `current`, wrapping around.
    ///
    /// A `current` that is unknown to the book starts from the first entry.
    pub fn cycle(&self, current: Option<&str>, forward: bool) -> Option<String> {
        if self.items.is_empty() {
            return None;
        }
        let len = self.items.len();
        let position = current.and_then(|name| self.items.iter().position(|c| c.name == name));
        let index = match (position, forward) {
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
            (None, _) => 0,
        };
        Some(self.items[index].name.clone())
    }
}

/// Inline "Add New Category" dialog of the add screen.
#[derive(Debug, Default)]
pub struct NewCategoryDialog {
    pub open: bool,
    pub input: String,
}

impl NewCategoryDialog {
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Cancel keeps whatever was typed for the next time the dialog opens.
    pub fn cancel(&mut self) {
        self.open = false;
    }

    /// Request body for the typed name, or `None` when it is blank.
    pub fn submission(&self) -> Option<CategoryNew> {
        let name = self.input.trim();
        if name.is_empty() {
            return None;
        }
        Some(CategoryNew {
            name: name.to_string(),
        })
    }

    pub fn finish(&mut self) {
        self.input.clear();
        self.open = false;
    }
}

/// Alert text for a failed category creation.
pub fn creation_failure_message(err: &ClientError) -> String {
    err.server_message()
        .unwrap_or(CREATE_FALLBACK_MESSAGE)
        .to_string()
}
