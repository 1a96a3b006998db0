use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

use std::time::Duration;

use tui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::{
    client::TodoClient,
    models::todo_model::Todo,
    ui::app::{ActiveBlock, App, Effect, FormField, Response},
};

const POLL_RATE: Duration = Duration::from_millis(250);

/// Open the interactive todo list and block until the user quits
pub fn render_todo_list(client: &TodoClient) -> anyhow::Result<()> {
    // setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();

    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let effect = app.on_load();
    dispatch(&mut app, client, effect);

    let res = run_app(&mut terminal, &mut app, client);

    // restore terminal
    disable_raw_mode()?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    terminal.show_cursor()?;

    Ok(res?)
}

/// Run an effect against the api
fn execute_effect(client: &TodoClient, effect: Effect) -> Response {
    match effect {
        Effect::Fetch => Response::Fetched(client.list()),
        Effect::Create(new_todo) => Response::Created(client.create(&new_todo)),
        Effect::Update(id, patch) => Response::Updated(client.update(&id, &patch)),
        Effect::Delete(id) => Response::Deleted(client.delete(&id)),
    }
}

/// Keep running effects until the app stops asking for more
fn dispatch(app: &mut App, client: &TodoClient, effect: Option<Effect>) {
    let mut next = effect;
    while let Some(effect) = next {
        log::debug!("Running {:?}", effect);
        next = app.on_response(execute_effect(client, effect));
    }
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    client: &TodoClient,
) -> std::io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if !event::poll(POLL_RATE)? {
            continue;
        }

        let key = match event::read()? {
            Event::Key(key) => key,
            _ => continue,
        };

        let effect = match app.active_block() {
            ActiveBlock::Home => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Left => {
                    app.todos.unselect();
                    None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    app.todos.next();
                    None
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    app.todos.previous();
                    None
                }
                KeyCode::Char('a') => app.on_new_todo(),
                KeyCode::Char('e') => app.on_edit_selected(),
                KeyCode::Char('d') => app.on_toggle_selected(),
                KeyCode::Char('x') => app.on_delete_selected(),
                KeyCode::Char('r') => app.on_load(),
                _ => None,
            },
            ActiveBlock::Form => match key.code {
                KeyCode::Esc => app.on_cancel_form(),
                KeyCode::Tab | KeyCode::Down => app.on_focus_next(),
                KeyCode::BackTab | KeyCode::Up => app.on_focus_previous(),
                KeyCode::Enter => app.on_submit(),
                KeyCode::Backspace => app.on_backspace(),
                KeyCode::Char(c) => app.on_input_char(c),
                _ => None,
            },
            ActiveBlock::Message | ActiveBlock::Error => match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    app.dismiss_notification();
                    None
                }
                _ => None,
            },
        };

        dispatch(app, client, effect);
    }
}

// Draws Message if occured
fn draw_message_content<B>(f: &mut Frame<B>, app: &App)
where
    B: Backend,
{
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(100)].as_ref())
        .margin(5)
        .split(f.size());

    let message_text = vec![
        Spans::from(Span::styled(
            &app.message,
            Style::default().fg(Color::LightBlue),
        )),
        Spans::from(""),
        Spans::from(Span::raw("Press Esc to continue")),
    ];

    let message_paragraph = Paragraph::new(message_text)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    "Message",
                    Style::default().fg(Color::LightBlue),
                ))
                .border_style(Style::default().fg(Color::LightCyan)),
        );

    f.render_widget(message_paragraph, chunks[0]);
}

// Draws Error if occured
fn draw_error_content<B>(f: &mut Frame<B>, app: &App)
where
    B: Backend,
{
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(100)].as_ref())
        .margin(5)
        .split(f.size());

    let error_text = vec![
        Spans::from(vec![
            Span::raw("Error Occured: "),
            Span::styled(&app.error_message, Style::default().fg(Color::Red)),
        ]),
        Spans::from(""),
        Spans::from(Span::raw("Press Esc to continue")),
    ];

    let error_paragraph = Paragraph::new(error_text).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled("Error", Style::default().fg(Color::Red)))
            .border_style(Style::default().fg(Color::LightRed)),
    );

    f.render_widget(error_paragraph, chunks[0]);
}

fn draw_form_content<B>(f: &mut Frame<B>, app: &App)
where
    B: Backend,
{
    let mut constraints = vec![Constraint::Length(2)];
    constraints.extend(FormField::ALL.iter().map(|_| Constraint::Length(3)));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(2)
        .split(f.size());

    let prompt_message = vec![
        Span::styled("Add Todo Item  ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" next field, "),
        Span::styled("Space", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" toggles completed, "),
        Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" to add, "),
        Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" to cancel"),
    ];

    f.render_widget(Paragraph::new(Text::from(Spans::from(prompt_message))), chunks[0]);

    for (i, field) in FormField::ALL.iter().enumerate() {
        let style = if *field == app.focus {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        let content = match app.form.text(*field) {
            Some(text) => String::from(text),
            None => {
                let mark = if app.form.completed { "x" } else { " " };
                format!("[{}] Mark as completed", mark)
            }
        };

        let input = Paragraph::new(content)
            .style(style)
            .block(Block::default().borders(Borders::ALL).title(field.label()));

        f.render_widget(input, chunks[i + 1]);
    }
}

fn todo_details(todo: &Todo) -> Vec<Spans<'_>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let status = if todo.completed { "Completed" } else { "Pending" };

    vec![
        Spans::from(Span::styled(todo.title.as_str(), bold)),
        Spans::from(""),
        Spans::from(format!("Price: ${}", todo.price)),
        Spans::from(format!("Image: {}", todo.image.as_deref().unwrap_or("-"))),
        Spans::from(format!("Status: {}", status)),
        Spans::from(format!("ID: {}", todo.id)),
    ]
}

fn draw_home_content<B: Backend>(f: &mut Frame<B>, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.size());

    // Create two chunks with equal horizontal screen space
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(rows[0]);

    let items: Vec<ListItem> = if app.todos.items.is_empty() {
        vec![ListItem::new("No todos available")]
    } else {
        app.todos
            .items
            .iter()
            .map(|todo| {
                let mark = if todo.completed { "[x]" } else { "[ ]" };
                ListItem::new(Spans::from(vec![
                    Span::raw(format!("{} ", mark)),
                    Span::raw(todo.title.as_str()),
                    Span::styled(
                        format!("  ${}", todo.price),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect()
    };

    // Create a List from all list items and highlight the currently selected one
    let items = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Todo List"))
        .highlight_style(
            Style::default()
                .bg(Color::LightYellow)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    f.render_stateful_widget(items, chunks[0], &mut app.todos.state);

    let details = match app.todos.selected_item() {
        Some(todo) => todo_details(todo),
        None => vec![Spans::from("Select a todo with Up/Down")],
    };

    let details = Paragraph::new(details)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Details"));

    f.render_widget(details, chunks[1]);

    let help = Paragraph::new(Spans::from(vec![Span::styled(
        "a add  e edit  d toggle done  x delete  r refresh  q quit",
        Style::default().fg(Color::DarkGray),
    )]));

    f.render_widget(help, rows[1]);
}

fn ui<B: Backend>(f: &mut Frame<B>, app: &mut App) {
    match app.active_block() {
        ActiveBlock::Message => draw_message_content(f, app),
        ActiveBlock::Home => draw_home_content(f, app),
        ActiveBlock::Error => draw_error_content(f, app),
        ActiveBlock::Form => draw_form_content(f, app),
    }
}
