use tui::widgets::ListState;

use crate::{
    errors::TodoError,
    models::todo_model::{NewTodo, Todo, TodoPatch, DEFAULT_IMAGE_URL},
};

pub struct StatefulList<T> {
    pub state: ListState,
    pub items: Vec<T>,
}

impl<T> StatefulList<T> {
    pub fn with_items(items: Vec<T>) -> StatefulList<T> {
        StatefulList {
            state: ListState::default(),
            items,
        }
    }

    pub fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.items.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.items.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn unselect(&mut self) {
        self.state.select(None);
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.state.selected().and_then(|i| self.items.get(i))
    }

    /// Swap in a fresh list, keeping the selection on a valid row
    pub fn replace_items(&mut self, items: Vec<T>) {
        self.items = items;
        match self.state.selected() {
            Some(_) if self.items.is_empty() => self.unselect(),
            Some(i) if i >= self.items.len() => self.state.select(Some(self.items.len() - 1)),
            _ => {}
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum FormField {
    Title,
    Completed,
    Image,
    Price,
    Id,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Title,
        FormField::Completed,
        FormField::Image,
        FormField::Price,
        FormField::Id,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Completed => "Completed",
            FormField::Image => "Image URL",
            FormField::Price => "Price",
            FormField::Id => "Custom ID",
        }
    }
}

/// Raw form input, `price` stays text until submit
#[derive(Debug, Clone, PartialEq)]
pub struct TodoForm {
    pub title: String,
    pub completed: bool,
    pub image: String,
    pub price: String,
    pub id: String,
}

impl Default for TodoForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            completed: false,
            image: String::from(DEFAULT_IMAGE_URL),
            price: String::new(),
            id: String::new(),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum FormError {
    Missing(Vec<&'static str>),
    InvalidPrice(String),
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::Missing(fields) => {
                write!(f, "Please fill in all required fields: {}", fields.join(", "))
            }
            FormError::InvalidPrice(price) => write!(f, "Price '{}' is not a number", price),
        }
    }
}

impl std::error::Error for FormError {}

impl TodoForm {
    pub fn from_todo(todo: &Todo) -> Self {
        Self {
            title: todo.title.clone(),
            completed: todo.completed,
            image: todo.image.clone().unwrap_or_default(),
            price: todo.price.to_string(),
            id: todo.id.clone(),
        }
    }

    /// Text of a field, `None` for the checkbox
    pub fn text(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Title => Some(&self.title),
            FormField::Completed => None,
            FormField::Image => Some(&self.image),
            FormField::Price => Some(&self.price),
            FormField::Id => Some(&self.id),
        }
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Title => Some(&mut self.title),
            FormField::Completed => None,
            FormField::Image => Some(&mut self.image),
            FormField::Price => Some(&mut self.price),
            FormField::Id => Some(&mut self.id),
        }
    }

    /// Every field is required here, image included
    pub fn to_new_todo(&self) -> Result<NewTodo, FormError> {
        let missing: Vec<&'static str> = [
            (FormField::Title, &self.title),
            (FormField::Image, &self.image),
            (FormField::Price, &self.price),
            (FormField::Id, &self.id),
        ]
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field.label())
        .collect();

        if !missing.is_empty() {
            return Err(FormError::Missing(missing));
        }

        let price: f64 = self
            .price
            .trim()
            .parse()
            .ok()
            .filter(|p: &f64| p.is_finite())
            .ok_or_else(|| FormError::InvalidPrice(self.price.clone()))?;

        Ok(NewTodo {
            id: self.id.trim().to_string(),
            title: self.title.clone(),
            image: Some(self.image.clone()),
            price,
        })
    }
}

/// A network call the app wants made. The caller runs it and reports back
/// through [`App::on_response`].
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Fetch,
    Create(NewTodo),
    Update(String, TodoPatch),
    Delete(String),
}

/// Result of running an [`Effect`]
#[derive(Debug)]
pub enum Response {
    Fetched(Result<Vec<Todo>, TodoError>),
    Created(Result<Todo, TodoError>),
    Updated(Result<Todo, TodoError>),
    Deleted(Result<String, TodoError>),
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ActiveBlock {
    Home,
    Form,
    Message,
    Error,
}

/// Everything the terminal client shows.
///
/// Each user action is a method that only touches this struct and returns
/// the [`Effect`] to run, if any. Nothing here talks to the network.
pub struct App {
    pub todos: StatefulList<Todo>,
    pub form: TodoForm,
    pub focus: FormField,
    pub error_message: String,
    pub message: String,
    navigation_stack: Vec<ActiveBlock>,
}

impl App {
    pub fn new() -> App {
        App {
            todos: StatefulList::with_items(vec![]),
            form: TodoForm::default(),
            focus: FormField::Title,
            error_message: String::new(),
            message: String::new(),
            navigation_stack: vec![ActiveBlock::Home],
        }
    }

    /// Gets the current active block
    pub fn active_block(&self) -> ActiveBlock {
        self.navigation_stack
            .last()
            .copied()
            .unwrap_or(ActiveBlock::Home)
    }

    /// Push a block to the navigation stack
    /// so that it is rendered
    pub fn push_navigation_stack(&mut self, active_block: ActiveBlock) {
        self.navigation_stack.push(active_block);
    }

    pub fn pop_navigation_stack(&mut self) -> Option<ActiveBlock> {
        if self.navigation_stack.len() == 1 {
            None
        } else {
            self.navigation_stack.pop()
        }
    }

    pub fn handle_error(&mut self, e: String) {
        log::warn!("{}", e);
        self.dismiss_notification();
        self.push_navigation_stack(ActiveBlock::Error);
        self.error_message = e;
    }

    pub fn handle_new_message(&mut self, m: String) {
        self.dismiss_notification();
        self.push_navigation_stack(ActiveBlock::Message);
        self.message = m;
    }

    /// Close a message or error, if one is showing
    pub fn dismiss_notification(&mut self) {
        if matches!(self.active_block(), ActiveBlock::Message | ActiveBlock::Error) {
            self.pop_navigation_stack();
        }
    }

    pub fn on_load(&mut self) -> Option<Effect> {
        Some(Effect::Fetch)
    }

    /// Open an empty form
    pub fn on_new_todo(&mut self) -> Option<Effect> {
        self.form = TodoForm::default();
        self.open_form();
        None
    }

    /// Copy the selected todo into the form
    pub fn on_edit_selected(&mut self) -> Option<Effect> {
        let form = self.todos.selected_item().map(TodoForm::from_todo)?;
        self.form = form;
        self.open_form();
        None
    }

    fn open_form(&mut self) {
        self.focus = FormField::Title;
        if self.active_block() != ActiveBlock::Form {
            self.push_navigation_stack(ActiveBlock::Form);
        }
    }

    pub fn on_cancel_form(&mut self) -> Option<Effect> {
        if self.active_block() == ActiveBlock::Form {
            self.pop_navigation_stack();
        }
        self.form = TodoForm::default();
        None
    }

    pub fn on_focus_next(&mut self) -> Option<Effect> {
        self.focus = self.focus.next();
        None
    }

    pub fn on_focus_previous(&mut self) -> Option<Effect> {
        self.focus = self.focus.previous();
        None
    }

    /// Type into the focused field, a space on the checkbox flips it
    pub fn on_input_char(&mut self, c: char) -> Option<Effect> {
        match self.form.text_mut(self.focus) {
            Some(text) => text.push(c),
            None if c == ' ' => self.form.completed = !self.form.completed,
            None => {}
        }
        None
    }

    pub fn on_backspace(&mut self) -> Option<Effect> {
        if let Some(text) = self.form.text_mut(self.focus) {
            text.pop();
        }
        None
    }

    /// Always creates, even when the form was filled from an existing todo
    pub fn on_submit(&mut self) -> Option<Effect> {
        match self.form.to_new_todo() {
            Ok(new_todo) => Some(Effect::Create(new_todo)),
            Err(e) => {
                self.handle_error(e.to_string());
                None
            }
        }
    }

    pub fn on_delete_selected(&mut self) -> Option<Effect> {
        let todo = self.todos.selected_item()?;
        Some(Effect::Delete(todo.id.clone()))
    }

    pub fn on_toggle_selected(&mut self) -> Option<Effect> {
        let todo = self.todos.selected_item()?;
        Some(Effect::Update(
            todo.id.clone(),
            TodoPatch::completed(!todo.completed),
        ))
    }

    /// Fold a finished request back into the state. Successful mutations
    /// always ask for a full refetch.
    pub fn on_response(&mut self, response: Response) -> Option<Effect> {
        match response {
            Response::Fetched(Ok(todos)) => {
                self.todos.replace_items(todos);
                None
            }
            Response::Created(Ok(todo)) => {
                log::info!("Todo added: {}", todo.id);
                self.form = TodoForm::default();
                if self.active_block() == ActiveBlock::Form {
                    self.pop_navigation_stack();
                }
                self.handle_new_message(String::from("Todo added successfully"));
                Some(Effect::Fetch)
            }
            Response::Updated(Ok(todo)) => {
                log::info!("Todo updated: {}", todo.id);
                self.handle_new_message(String::from("Todo updated successfully"));
                Some(Effect::Fetch)
            }
            Response::Deleted(Ok(message)) => {
                log::info!("{}", message);
                self.handle_new_message(String::from("Todo deleted successfully"));
                Some(Effect::Fetch)
            }
            Response::Fetched(Err(e)) => {
                self.handle_error(format!("Error fetching todos: {}", e));
                None
            }
            Response::Created(Err(e)) => {
                self.handle_error(format!("Error adding todo: {}", e));
                None
            }
            Response::Updated(Err(e)) => {
                self.handle_error(format!("Error updating todo: {}", e));
                None
            }
            Response::Deleted(Err(e)) => {
                self.handle_error(format!("Error deleting todo: {}", e));
                None
            }
        }
    }
}

#[cfg(test)]
mod app_test {
    use super::*;

    fn todo(id: &str, completed: bool) -> Todo {
        Todo {
            id: id.into(),
            title: format!("Todo {}", id),
            completed,
            image: Some(String::from("http://img/1.png")),
            price: 3.5,
        }
    }

    fn loaded_app(todos: Vec<Todo>) -> App {
        let mut app = App::new();
        app.on_response(Response::Fetched(Ok(todos)));
        app
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.on_input_char(c);
        }
    }

    #[test]
    fn test_load_fetches() {
        let mut app = App::new();

        assert_eq!(app.on_load(), Some(Effect::Fetch));
    }

    #[test]
    fn test_new_form_has_default_image() {
        let mut app = App::new();

        app.on_new_todo();

        assert_eq!(app.active_block(), ActiveBlock::Form);
        assert_eq!(app.form.image, DEFAULT_IMAGE_URL);
        assert_eq!(app.focus, FormField::Title);
    }

    #[test]
    fn test_typing_fills_focused_field() {
        let mut app = App::new();
        app.on_new_todo();

        type_text(&mut app, "Book");
        app.on_focus_next();
        app.on_input_char(' ');
        app.on_focus_next();
        app.on_focus_next();
        type_text(&mut app, "9.9x");
        app.on_backspace();

        assert_eq!(app.form.title, "Book");
        assert_eq!(app.form.completed, true);
        assert_eq!(app.form.price, "9.9");
    }

    #[test]
    fn test_focus_wraps() {
        assert_eq!(FormField::Id.next(), FormField::Title);
        assert_eq!(FormField::Title.previous(), FormField::Id);
    }

    #[test]
    fn test_submit_with_missing_fields_shows_error() {
        let mut app = App::new();
        app.on_new_todo();
        type_text(&mut app, "Book");

        let effect = app.on_submit();

        assert_eq!(effect, None);
        assert_eq!(app.active_block(), ActiveBlock::Error);
        assert_eq!(
            app.error_message,
            "Please fill in all required fields: Price, Custom ID"
        );

        app.dismiss_notification();
        assert_eq!(app.active_block(), ActiveBlock::Form);
    }

    #[test]
    fn test_submit_rejects_unparsable_price() {
        let form = TodoForm {
            title: "Book".into(),
            price: "cheap".into(),
            id: "a1".into(),
            ..Default::default()
        };

        assert_eq!(
            form.to_new_todo(),
            Err(FormError::InvalidPrice("cheap".into()))
        );
    }

    #[test]
    fn test_submit_creates() {
        let mut app = App::new();
        app.form = TodoForm {
            title: "Book".into(),
            price: " 9.99 ".into(),
            id: "a1".into(),
            ..Default::default()
        };

        let effect = app.on_submit();

        assert_eq!(
            effect,
            Some(Effect::Create(NewTodo {
                id: "a1".into(),
                title: "Book".into(),
                image: Some(DEFAULT_IMAGE_URL.into()),
                price: 9.99,
            }))
        );
    }

    #[test]
    fn test_created_resets_form_and_refetches() {
        let mut app = App::new();
        app.on_new_todo();
        type_text(&mut app, "Book");

        let effect = app.on_response(Response::Created(Ok(todo("a1", false))));

        assert_eq!(effect, Some(Effect::Fetch));
        assert_eq!(app.form, TodoForm::default());
        assert_eq!(app.active_block(), ActiveBlock::Message);
        assert_eq!(app.message, "Todo added successfully");

        app.dismiss_notification();
        assert_eq!(app.active_block(), ActiveBlock::Home);
    }

    #[test]
    fn test_failed_create_keeps_form() {
        let mut app = App::new();
        app.on_new_todo();
        type_text(&mut app, "Book");

        let effect = app.on_response(Response::Created(Err(TodoError::ServerError(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        ))));

        assert_eq!(effect, None);
        assert_eq!(app.form.title, "Book");
        assert_eq!(app.active_block(), ActiveBlock::Error);
    }

    #[test]
    fn test_edit_prefills_form() {
        let mut app = loaded_app(vec![todo("a1", false), todo("b2", true)]);
        app.todos.next();
        app.todos.next();

        app.on_edit_selected();

        assert_eq!(app.active_block(), ActiveBlock::Form);
        assert_eq!(app.form.id, "b2");
        assert_eq!(app.form.completed, true);
        assert_eq!(app.form.price, "3.5");
    }

    #[test]
    fn test_edit_without_selection_does_nothing() {
        let mut app = loaded_app(vec![todo("a1", false)]);

        app.on_edit_selected();

        assert_eq!(app.active_block(), ActiveBlock::Home);
    }

    #[test]
    fn test_toggle_inverts_completed_only() {
        let mut app = loaded_app(vec![todo("a1", true)]);
        app.todos.next();

        let effect = app.on_toggle_selected();

        assert_eq!(
            effect,
            Some(Effect::Update("a1".into(), TodoPatch::completed(false)))
        );
    }

    #[test]
    fn test_delete_selected_then_refetch() {
        let mut app = loaded_app(vec![todo("a1", false)]);
        app.todos.next();

        assert_eq!(app.on_delete_selected(), Some(Effect::Delete("a1".into())));

        let effect = app.on_response(Response::Deleted(Ok("Todo deleted".into())));
        assert_eq!(effect, Some(Effect::Fetch));

        app.on_response(Response::Fetched(Ok(vec![])));
        assert!(app.todos.items.is_empty());
        assert_eq!(app.todos.state.selected(), None);
    }

    #[test]
    fn test_selection_stays_in_range_after_refetch() {
        let mut app = loaded_app(vec![todo("a1", false), todo("b2", false)]);
        app.todos.next();
        app.todos.next();

        app.on_response(Response::Fetched(Ok(vec![todo("a1", false)])));

        assert_eq!(app.todos.state.selected(), Some(0));
    }

    #[test]
    fn test_navigation_on_empty_list() {
        let mut app = App::new();

        app.todos.next();
        app.todos.previous();

        assert_eq!(app.todos.state.selected(), None);
        assert_eq!(app.on_delete_selected(), None);
    }

    #[test]
    fn test_message_replaces_message() {
        let mut app = App::new();

        app.handle_new_message("one".into());
        app.handle_new_message("two".into());

        assert_eq!(app.message, "two");
        app.dismiss_notification();
        assert_eq!(app.active_block(), ActiveBlock::Home);
    }
}
