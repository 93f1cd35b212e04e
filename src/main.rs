//! Roster Client - terminal shell for browsing and managing the employee roster.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use roster_client as app;

use app::client::HttpRosterGateway;
use app::config::{AppConfig, ConfigLoadResult};
use app::controller::{Navigation, RosterController, TableView};
use app::models::JobTitle;
use app::session::Session;
use app::storage::{FileScope, MemoryScope, StorageScope, USER_KEY};
use app::view::SortKey;

/// Terminal shell for browsing and managing the employee roster.
#[derive(Parser)]
#[command(name = "roster-client")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Seed the session scope with a token for this run instead of relying
    /// on a stored login
    #[arg(long)]
    token: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    tracing::info!("Roster client starting...");

    // Determine config path based on mode
    let config_path = if cli.dev {
        tracing::info!("Dev mode: loading config from current directory");
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };

    let config = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => {
            tracing::info!("Config loaded from {:?}", config_path);
            config
        }
        ConfigLoadResult::Missing => {
            tracing::info!("Config missing, using defaults");
            AppConfig::default()
        }
        ConfigLoadResult::Invalid(e) => bail!("Invalid config at {config_path:?}: {e}"),
    };

    // Storage scopes: persistent file shared with the login surface, plus a
    // transient scope for this session
    let persistent = FileScope::open(config.storage_file())?;
    let mut transient = MemoryScope::new();
    if let Some(token) = &cli.token {
        let record = serde_json::json!({ "token": token }).to_string();
        transient.set(USER_KEY, &record)?;
    }

    let session = Session::resolve(Box::new(persistent), Box::new(transient));
    if !session.is_authenticated() {
        println!("No session token found. Log in first, or pass --token.");
        return Ok(());
    }

    let gateway = HttpRosterGateway::new(&config.service.base_url, config.service.timeout_secs)?;
    let mut controller = RosterController::new(gateway, session, config.table.page_size);

    match controller.load().await {
        Ok(Some(Navigation::Login)) => {
            println!("Session no longer authorized. Please log in again.");
            return Ok(());
        }
        Ok(_) => {}
        Err(e) => println!("Could not load the roster: {e}"),
    }

    render(&controller.table());
    run_shell(&mut controller).await;

    Ok(())
}

/// Read commands from stdin and dispatch them to the controller until the
/// operator quits or the session ends.
async fn run_shell<G: app::client::RosterGateway>(controller: &mut RosterController<G>) {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("roster> ");
        let _ = io::stdout().flush();

        let line = match lines.next() {
            Some(Ok(line)) => line.trim().to_string(),
            _ => break,
        };
        let Some(command) = line.split_whitespace().next() else {
            continue;
        };
        let rest = line[command.len()..].trim().to_string();

        match command {
            "sort" => match rest.as_str() {
                "none" | "" => controller.clear_view(),
                key => match key.parse::<SortKey>() {
                    Ok(key) => controller.set_sort(key),
                    Err(e) => {
                        println!("{e} (try name-asc, name-desc, hire-date-desc, hire-date-asc, none)");
                        continue;
                    }
                },
            },
            "filter" => match rest.parse::<JobTitle>() {
                Ok(title) => controller.set_job_title_filter(title),
                Err(e) => {
                    println!("{e}");
                    continue;
                }
            },
            "size" => {
                let accepted = rest.parse::<usize>().is_ok_and(|size| controller.set_page_size(size));
                if !accepted {
                    println!("Page size must be one of {:?}", app::paginate::PAGE_SIZES);
                    continue;
                }
            }
            "page" => match rest.parse::<usize>() {
                Ok(n) => controller.go_to_page(n),
                Err(_) => {
                    println!("Usage: page <number>");
                    continue;
                }
            },
            "first" => controller.first_page(),
            "last" => controller.last_page(),
            "next" => controller.next_page(),
            "prev" => controller.previous_page(),
            "refresh" => {
                if handle_mutation(controller.refresh().await) {
                    break;
                }
            }
            "delete" => match rest.parse::<i64>() {
                Ok(id) => {
                    if handle_mutation(controller.delete(id).await) {
                        break;
                    }
                }
                Err(_) => {
                    println!("Usage: delete <id>");
                    continue;
                }
            },
            "open" => match rest.parse::<i64>() {
                Ok(id) => {
                    if let Navigation::EmployeeDetail(id) = controller.view_employee(id) {
                        println!("Opening employee {id} in the detail surface.");
                    }
                    continue;
                }
                Err(_) => {
                    println!("Usage: open <id>");
                    continue;
                }
            },
            "help" => {
                print_help();
                continue;
            }
            "quit" | "exit" => break,
            other => {
                println!("Unknown command: {other} (try help)");
                continue;
            }
        }

        render(&controller.table());
    }
}

/// Report a refresh/delete result. Returns `true` when the session ended.
fn handle_mutation(result: app::Result<Option<Navigation>>) -> bool {
    match result {
        Ok(Some(Navigation::Login)) => {
            println!("Session no longer authorized. Please log in again.");
            true
        }
        Ok(_) => false,
        Err(e) => {
            println!("{e}");
            false
        }
    }
}

fn render(table: &TableView<'_>) {
    println!();
    if table.window.is_empty() {
        println!("No employees.");
    } else {
        println!("{:<6} {:<24} {:<24} {:<12}", "ID", "Name", "Job Title", "Hired");
        for employee in table.window {
            println!(
                "{:<6} {:<24} {:<24} {}",
                employee.id,
                employee.name,
                employee.job_title.as_str(),
                employee.hire_date
            );
        }
        println!();
        println!("Showing {} of {} employees (view: {})", table.shown, table.total, table.view_spec);
    }

    if !table.controls_hidden() {
        let links: Vec<String> = table
            .page_links()
            .into_iter()
            .map(|n| {
                if n == table.page_index {
                    format!("[{n}]")
                } else {
                    n.to_string()
                }
            })
            .collect();
        println!("Page {} of {}  {}", table.page_index, table.page_count, links.join(" "));
    }
    println!();
}

fn print_help() {
    println!("Commands:");
    println!("  sort <name-asc|name-desc|hire-date-desc|hire-date-asc|none>");
    println!("  filter <job title>     e.g. filter Software Engineer");
    println!("  size <5|10|25|50>      records per page");
    println!("  page <n> | first | last | next | prev");
    println!("  refresh                re-fetch the roster");
    println!("  delete <id>            delete an employee");
    println!("  open <id>              hand off to the employee detail surface");
    println!("  quit");
}
