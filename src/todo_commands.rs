use inquire::{Confirm, Text};

use crate::{
    client::TodoClient,
    models::todo_model::{Todo, TodoPatch, DEFAULT_IMAGE_URL},
    ui::app::TodoForm,
};

/// Prompt user to create new todo
pub fn create_new_todo(client: &TodoClient) -> anyhow::Result<()> {
    let title = Text::new("Title")
        .with_help_message("Title for your new todo")
        .prompt()?;

    let image = Text::new("Image URL")
        .with_default(DEFAULT_IMAGE_URL)
        .prompt()?;

    let price = Text::new("Price").prompt()?;

    let suggested_id = uuid::Uuid::new_v4().to_string();
    let id = Text::new("Custom ID")
        .with_default(suggested_id.as_str())
        .prompt()?;

    let form = TodoForm {
        title,
        image,
        price,
        id,
        ..Default::default()
    };

    let todo = client.create(&form.to_new_todo()?)?;

    println!("Todo added: {}", todo.id);

    Ok(())
}

fn format_todo(todo: &Todo) -> String {
    let mark = if todo.completed { "x" } else { " " };
    format!("[{}] {:<20} {:<30} ${}", mark, todo.id, todo.title, todo.price)
}

/// Print every todo, one per line
pub fn list_todos(client: &TodoClient) -> anyhow::Result<()> {
    let todos = client.list()?;

    if todos.is_empty() {
        println!("No todos available");
    }

    for todo in &todos {
        println!("{}", format_todo(todo));
    }

    Ok(())
}

/// Flip the completed flag of the todo with `id`
pub fn toggle_todo(client: &TodoClient, id: &str) -> anyhow::Result<()> {
    let todos = client.list()?;

    let todo = todos
        .iter()
        .find(|t| t.id == id)
        .ok_or_else(|| anyhow::anyhow!("Todo {} not found", id))?;

    let updated = client.update(id, &TodoPatch::completed(!todo.completed))?;

    println!("{}", format_todo(&updated));

    Ok(())
}

pub fn delete_todo(client: &TodoClient, id: &str) -> anyhow::Result<()> {
    let confirmed = Confirm::new(&format!("Delete todo {}?", id))
        .with_default(true)
        .prompt()?;

    if confirmed {
        println!("{}", client.delete(id)?);
    }

    Ok(())
}
