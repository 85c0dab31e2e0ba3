//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::backend::Backend;
use crate::cli::{
    Command, FocalArg, GraphArgs, ImportArgs, LinksArgs, ProfileAction, ProfileArgs, ResolveArgs,
};
use crate::commands;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// Run the interactive REPL.
pub async fn run_repl(config: &mut Config, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.info("Caselink REPL - Type 'help' for commands, 'exit' to quit"));
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)
        .map_err(editor_error)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(editor_error)?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let mut backend: Option<Backend> = None;
    let mut paging = Paging::default();

    loop {
        let prompt = format!("caselink ({})> ", config.active_profile);

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                let command = match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                        continue;
                    }
                    Ok(ReplCommand::Next) => paging.step(1),
                    Ok(ReplCommand::Prev) => paging.step(-1),
                    Ok(ReplCommand::Command(cmd)) => Ok(cmd),
                    Err(e) => Err(e),
                };

                let result = match command {
                    Ok(cmd) => {
                        execute_repl_command(cmd, &mut backend, &mut paging, config, formatter).await
                    }
                    Err(e) => Err(e),
                };
                if let Err(e) = result {
                    eprintln!("{}", formatter.error(&e.to_string()));
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug)]
enum ReplCommand {
    Exit,
    Help,
    Next,
    Prev,
    Command(Command),
}

/// Last `links` query and where it stood, for `next` and `prev`.
#[derive(Debug, Default)]
struct Paging {
    last: Option<LinksArgs>,
    total_pages: usize,
}

impl Paging {
    fn record(&mut self, args: LinksArgs, total_pages: usize) {
        self.last = Some(args);
        self.total_pages = total_pages;
    }

    /// Re-issue the last query one page further in `delta`'s direction
    fn step(&self, delta: isize) -> Result<Command> {
        let last = self.last.as_ref().ok_or_else(|| {
            CliError::InvalidInput("No links query to page through. Run 'links' first.".to_string())
        })?;

        let last_page = self.total_pages.max(1);

        // From past the end, stepping back lands on the last real page
        let page = if delta < 0 && last.page > last_page {
            last_page
        } else {
            last.page
                .checked_add_signed(delta)
                .filter(|p| (1..=last_page).contains(p))
                .ok_or_else(|| {
                    CliError::InvalidInput(if delta > 0 {
                        "Already on the last page".to_string()
                    } else {
                        "Already on the first page".to_string()
                    })
                })?
        };

        Ok(Command::Links(LinksArgs {
            page,
            ..last.clone()
        }))
    }
}

/// Execute a REPL command.
async fn execute_repl_command(
    cmd: Command,
    backend: &mut Option<Backend>,
    paging: &mut Paging,
    config: &mut Config,
    formatter: &Formatter,
) -> Result<()> {
    match cmd {
        Command::Profile(args) => {
            let previous = config.active_profile.clone();
            commands::execute_profile(args, config, formatter).await?;
            if config.active_profile != previous {
                *backend = None;
                *paging = Paging::default();
            }
        }
        Command::Resolve(args) => commands::execute_resolve(&args, formatter)?,
        Command::Repl => {
            println!("{}", formatter.info("Already in REPL mode"));
        }
        _ => {
            if backend.is_none() {
                *backend = Some(Backend::open(config.get_active_profile()?)?);
            }
            let backend = backend
                .as_mut()
                .ok_or_else(|| CliError::Config("No data source open".to_string()))?;

            match cmd {
                Command::Links(args) => {
                    let page = commands::execute_links(&args, backend, config, formatter).await?;
                    let args = LinksArgs {
                        page_size: Some(page.page_size),
                        ..args
                    };
                    paging.record(args, page.total_pages);
                }
                Command::Summary => commands::execute_summary(backend, config, formatter).await?,
                Command::Graph(args) => {
                    commands::execute_graph(&args, backend, config, formatter).await?
                }
                Command::Import(args) => {
                    commands::execute_import(&args, backend, formatter)?;
                    *paging = Paging::default();
                }
                Command::Profile(_) | Command::Resolve(_) | Command::Repl => {}
            }
        }
    }

    Ok(())
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    match parts[0] {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "next" | "n" => Ok(ReplCommand::Next),
        "prev" | "p" => Ok(ReplCommand::Prev),
        "links" => parse_links_command(&parts[1..]),
        "summary" => Ok(ReplCommand::Command(Command::Summary)),
        "graph" => parse_graph_command(&parts[1..]),
        "resolve" => parse_resolve_command(&parts[1..]),
        "import" => parse_import_command(&parts[1..]),
        "profile" => parse_profile_command(&parts[1..]),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            parts[0]
        ))),
    }
}

// Simple positional parsers for REPL commands

fn parse_links_command(args: &[&str]) -> Result<ReplCommand> {
    let link_type = args
        .first()
        .filter(|t| !matches!(**t, "*" | "all"))
        .map(|t| t.to_string());
    let min_strength = args
        .get(1)
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| CliError::InvalidInput(format!("Invalid strength: {}", s)))
        })
        .transpose()?;
    let page_size = args
        .get(2)
        .map(|s| {
            s.parse::<usize>()
                .map_err(|_| CliError::InvalidInput(format!("Invalid page size: {}", s)))
        })
        .transpose()?;

    Ok(ReplCommand::Command(Command::Links(LinksArgs {
        link_type,
        min_strength,
        page: 1,
        page_size,
    })))
}

fn parse_graph_command(args: &[&str]) -> Result<ReplCommand> {
    let usage = || CliError::InvalidInput("Usage: graph <case|person> <id> [depth]".to_string());
    if args.len() < 2 {
        return Err(usage());
    }

    let kind = match args[0].to_lowercase().as_str() {
        "case" => FocalArg::Case,
        "person" => FocalArg::Person,
        _ => return Err(usage()),
    };
    let id = args[1].parse().map_err(|_| usage())?;
    let depth = match args.get(2) {
        Some(d) => d.parse().map_err(|_| usage())?,
        None => 1,
    };

    Ok(ReplCommand::Command(Command::Graph(GraphArgs { kind, id, depth })))
}

fn parse_resolve_command(args: &[&str]) -> Result<ReplCommand> {
    if args.is_empty() {
        return Err(CliError::InvalidInput(
            "Usage: resolve <kind> [role] [color]".to_string(),
        ));
    }

    Ok(ReplCommand::Command(Command::Resolve(ResolveArgs {
        kind: args[0].to_string(),
        role: args.get(1).map(|s| s.to_string()),
        color: args.get(2).map(|s| s.to_string()),
    })))
}

fn parse_import_command(args: &[&str]) -> Result<ReplCommand> {
    if args.is_empty() {
        return Err(CliError::InvalidInput("Usage: import <file>".to_string()));
    }

    Ok(ReplCommand::Command(Command::Import(ImportArgs {
        file: PathBuf::from(args[0]),
    })))
}

fn parse_profile_command(args: &[&str]) -> Result<ReplCommand> {
    if args.is_empty() {
        return Ok(ReplCommand::Command(Command::Profile(ProfileArgs {
            action: ProfileAction::Show,
        })));
    }

    let action = match args[0] {
        "list" => ProfileAction::List,
        "show" => ProfileAction::Show,
        "switch" => {
            if args.len() < 2 {
                return Err(CliError::InvalidInput("Usage: profile switch <name>".to_string()));
            }
            ProfileAction::Switch {
                name: args[1].to_string(),
            }
        }
        _ => return Err(CliError::InvalidInput(format!("Unknown profile action: {}", args[0]))),
    };

    Ok(ReplCommand::Command(Command::Profile(ProfileArgs { action })))
}

fn editor_error(e: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        format!("Failed to initialize editor: {}", e),
    ))
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  links [type|*] [min] [size]    - List links (page 1)");
    println!("    type: DNA_MATCH | ID_NUMBER | EVIDENCE, * for all");
    println!("    min: minimum strength 0.0-1.0");
    println!("    size: links per page");
    println!("  next, n / prev, p              - Page through the last links query");
    println!("  summary                        - Count and average strength per type");
    println!("  graph <case|person> <id> [d]   - Show a neighborhood (depth d, default 1)");
    println!("  resolve <kind> [role] [color]  - Show icon and color for a node kind");
    println!("  import <file>                  - Import a JSON record set (local profiles)");
    println!("  profile [list|show|switch]     - Manage profiles");
    println!("  help, ?                        - Show this help");
    println!("  exit, quit, q                  - Exit REPL");
    println!();
}
