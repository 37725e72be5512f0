//! pettrackr - Pet care tracker
//!
//! Keeps pets, their owners, vaccinations, vet visits and feeding logs in
//! a local SQLite database, and bills feeding logs per day.
//!
//! Features:
//! - Card grid of all pets with mouse and keyboard navigation
//! - Pet profiles with records and a feeding invoice
//! - Data-entry forms with validation
//! - Random demo pets
//! - A line-oriented menu for plain terminals (`--cli`)
//!
//! Usage: pettrackr [--cli] [--data-dir PATH] [--seed N]

mod app;
mod billing;
mod cli;
mod config;
mod db;
mod form;
mod logging;
mod seed;
mod types;
mod ui;
mod validate;

use anyhow::{bail, Context, Result};
use app::App;
use config::Config;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use db::Database;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::prelude::*;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

/// Parsed command line
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    cli: bool,
    data_dir: Option<PathBuf>,
    seed: Option<u32>,
    help: bool,
    version: bool,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--cli" | "-c" => parsed.cli = true,
            "--data-dir" | "-d" => {
                let dir = args.next().context("--data-dir needs a path")?;
                parsed.data_dir = Some(PathBuf::from(dir));
            }
            "--seed" | "-s" => {
                let n = args.next().context("--seed needs a count")?;
                let n = n
                    .parse()
                    .with_context(|| format!("Invalid pet count for --seed: {}", n))?;
                parsed.seed = Some(n);
            }
            "--help" | "-h" => parsed.help = true,
            "--version" | "-v" => parsed.version = true,
            other => bail!("Unknown argument: {} (see --help)", other),
        }
    }

    Ok(parsed)
}

fn main() -> Result<()> {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(2);
        }
    };

    if args.help {
        print_help();
        return Ok(());
    }

    if args.version {
        println!("pettrackr {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if let Err(e) = run(args) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"pettrackr - Pet care tracker

USAGE:
    pettrackr [OPTIONS]

OPTIONS:
    -c, --cli              Use the line-oriented menu instead of the TUI
    -d, --data-dir PATH    Store the database, images and log in PATH
    -s, --seed N           Add N random pets before starting
    -h, --help             Print help information
    -v, --version          Print version information

KEYBINDINGS:
    1-3                    Switch tabs
    h/j/k/l, arrows        Move across the pet grid
    Mouse wheel            Scroll the grid or profile
    Enter, click           Open a pet's profile
    a                      Add a pet
    r                      Add a random pet
    v / x / f              Add vet visit / vaccination / feeding log (Profile tab)
    Tab, Shift-Tab         Next / previous form field
    Ctrl-S                 Save form
    Esc                    Cancel form / back
    q                      Quit

TABS:
    [1] All Pets     Card grid of every pet
    [2] Profile      Records and feeding invoice of the selected pet
    [3] Settings     Theme and grid columns

CONFIG:
    ~/.config/pettrackr/config.toml
"#
    );
}

fn run(args: Args) -> Result<()> {
    let config_path = Config::path()?;
    let config = Config::load_from(&config_path).context("Failed to load configuration")?;

    let data_dir = match args.data_dir {
        Some(dir) => dir,
        None => config.data_dir()?,
    };

    let log_path = logging::init(&data_dir, &config.log_level)?;
    eprintln!("Data directory: {}", data_dir.display());
    eprintln!("Log file: {}", log_path.display());

    let db = Database::open(&data_dir).context("Failed to open database")?;
    let report = db
        .test_all_connections()
        .context("Database self-check failed")?;
    info!(pets = report.pets, owners = report.owners, "Database ready");

    if let Some(count) = args.seed {
        let mut rng = StdRng::from_entropy();
        for _ in 0..count {
            let seeded = seed::add_random_pet(&db, &mut rng).context("Failed to add random pet")?;
            info!(pet = %seeded.name, id = seeded.pet_id, "Seeded pet");
        }
        eprintln!("Added {} random pet(s)", count);
    }

    if args.cli {
        let stdin = io::stdin();
        let mut cli = cli::Cli::new(&db, config.fees.clone(), stdin.lock(), stdout().lock());
        return cli.run();
    }

    let mut app =
        App::new(db, config, Some(config_path)).context("Failed to initialize application")?;
    run_tui(&mut app)
}

fn run_tui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = main_loop(&mut terminal, app);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    info!("Exited");
    result
}

fn main_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            ui::render(frame, app);
        })?;

        // Poll with a timeout so flash messages expire
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                // Only handle key press events (not release)
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key)?,
                Event::Mouse(mouse) => app.handle_mouse(mouse)?,
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_help_does_not_panic() {
        print_help();
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(args(&[]).unwrap(), Args::default());

        let parsed = args(&["--cli", "--data-dir", "/tmp/pets", "-s", "5"]).unwrap();
        assert!(parsed.cli);
        assert_eq!(parsed.data_dir, Some(PathBuf::from("/tmp/pets")));
        assert_eq!(parsed.seed, Some(5));
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(args(&["--seed"]).is_err());
        assert!(args(&["--seed", "many"]).is_err());
        assert!(args(&["--data-dir"]).is_err());
        assert!(args(&["--bogus"]).is_err());
    }
}
