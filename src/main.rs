use api::api::start_server;

use clap::{Parser, Subcommand};

use crate::client::TodoClient;
use crate::config::{
    ServerConfig, DEFAULT_API_URL, DEFAULT_DATABASE, DEFAULT_MONGO_URI, DEFAULT_PORT,
};
mod api;
mod client;
mod config;
mod errors;
mod models;
mod store;
mod todo_commands;
mod ui;

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the REST api
    Serve {
        #[clap(short = 'p', long, default_value_t = DEFAULT_PORT)]
        port: u16,

        #[clap(long, default_value = DEFAULT_MONGO_URI)]
        mongo_uri: String,

        #[clap(long, default_value = DEFAULT_DATABASE)]
        database: String,

        /// Keep todos in memory instead of MongoDB
        #[clap(long)]
        in_memory: bool,
    },
    #[clap(flatten)]
    Client(ClientCommand),
}

/// Commands that talk to a running server
#[derive(Debug, PartialEq, Subcommand)]
enum ClientCommand {
    /// Interactive todo list (default)
    Ui,
    #[clap(alias = "ls")]
    List,
    #[clap(alias = "c")]
    Create,
    /// Mark a todo as completed or pending
    Toggle { id: String },
    #[clap(alias = "rm")]
    Delete { id: String },
}

impl ClientCommand {
    /// Log lines would be drawn over the terminal ui
    fn logs_to_terminal(&self) -> bool {
        *self != ClientCommand::Ui
    }
}

#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = "Todo list server and terminal client")]
struct TodoArgs {
    /// Base url of the todo api
    #[clap(short = 'u', long = "api-url", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    #[clap(subcommand)]
    command: Option<Commands>,
}

/// Wrapper function for looping a prompt function
/// if error occurs
fn super_prompt(title: &str, function: &dyn Fn() -> anyhow::Result<()>) {
    loop {
        println!("\n{}\n", title);
        let res = function();

        if let Err(e) = res {
            eprintln!("{}", e);

            let response = inquire::Confirm::new("Continue")
                .with_default(true)
                .prompt();

            if let Ok(true) = response {
                continue;
            }
        }

        break;
    }
}

fn run_command(client: &TodoClient, command: ClientCommand) -> anyhow::Result<()> {
    match command {
        ClientCommand::Ui => ui::renderer::render_todo_list(client),
        ClientCommand::List => todo_commands::list_todos(client),
        ClientCommand::Create => {
            super_prompt("Add Todo Item", &|| todo_commands::create_new_todo(client));
            Ok(())
        }
        ClientCommand::Toggle { id } => todo_commands::toggle_todo(client, &id),
        ClientCommand::Delete { id } => todo_commands::delete_todo(client, &id),
    }
}

fn main() -> anyhow::Result<()> {
    let args = TodoArgs::parse();

    match args
        .command
        .unwrap_or(Commands::Client(ClientCommand::Ui))
    {
        Commands::Serve {
            port,
            mongo_uri,
            database,
            in_memory,
        } => {
            start_server(ServerConfig {
                port,
                mongo_uri,
                database,
                in_memory,
            })?;
        }
        Commands::Client(command) => {
            if command.logs_to_terminal() {
                env_logger::init();
            }

            let client = TodoClient::new(&args.api_url);

            if let Err(e) = run_command(&client, command) {
                eprintln!("{}", e);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod main_test {
    use super::*;

    fn parse(args: &[&str]) -> TodoArgs {
        TodoArgs::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn test_no_command_opens_ui() {
        assert_eq!(parse(&["todo-list"]).command.is_none(), true);
    }

    #[test]
    fn test_client_commands_parse() {
        let args = parse(&["todo-list", "ls", "--api-url", "http://example:5000"]);

        assert_eq!(args.api_url, "http://example:5000");
        assert!(matches!(
            args.command,
            Some(Commands::Client(ClientCommand::List))
        ));

        assert!(matches!(
            parse(&["todo-list", "rm", "a1"]).command,
            Some(Commands::Client(ClientCommand::Delete { id })) if id == "a1"
        ));
    }

    #[test]
    fn test_serve_defaults() {
        match parse(&["todo-list", "serve", "--in-memory"]).command {
            Some(Commands::Serve {
                port,
                mongo_uri,
                database,
                in_memory,
            }) => {
                assert_eq!(port, 5000);
                assert_eq!(mongo_uri, "mongodb://localhost:27017");
                assert_eq!(database, "todolist");
                assert_eq!(in_memory, true);
            }
            other => panic!("expected serve, got {:?}", other),
        }
    }

    #[test]
    fn test_terminal_ui_keeps_logger_off() {
        assert_eq!(ClientCommand::Ui.logs_to_terminal(), false);
        assert_eq!(ClientCommand::List.logs_to_terminal(), true);
    }
}
