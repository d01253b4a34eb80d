use clap::Parser;
use std::path::PathBuf;
use taskboard::{
    config::Config, group_by_status, logging::init_logging, terminal::TerminalGuard, ui::run_app,
    App, Result, TaskStore,
};
use tracing::{error, info};

/// Three-column task board in the terminal
#[derive(Debug, Parser)]
#[command(name = "taskboard", version, about)]
struct Cli {
    /// Config file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Event loop tick in milliseconds
    #[arg(long)]
    tick_rate_ms: Option<u64>,

    /// Do not capture the mouse
    #[arg(long)]
    no_mouse: bool,

    /// Print the board as JSON and exit
    #[arg(long)]
    dump: bool,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        std::process::exit(err.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::resolve(cli.config.as_deref())?;
    if let Some(tick_rate_ms) = cli.tick_rate_ms {
        config.tick_rate_ms = tick_rate_ms;
    }
    if cli.no_mouse {
        config.mouse = false;
    }

    let store = TaskStore::seeded();
    if cli.dump {
        let snapshot = group_by_status(store.tasks()).snapshot();
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    if let Err(err) = init_logging(&config) {
        eprintln!("Warning: file logging disabled: {}", err);
    }
    info!(?config, tasks = store.len(), "starting board");

    let mut guard = TerminalGuard::enter(config.mouse)?;
    let mut app = App::new(store);
    let result = run_app(guard.terminal_mut(), &mut app, config.tick_rate());
    let restored = guard.leave();

    if let Err(err) = &result {
        error!(error = %err, "event loop failed");
    }
    info!(tasks = app.store.len(), "board closed");
    result?;
    Ok(restored?)
}
