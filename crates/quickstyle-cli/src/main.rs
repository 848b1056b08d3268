mod app;
mod render;

use anyhow::Result;
use app::{App, Outcome};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use quickstyle_config::Config;
use quickstyle_engine::{DEFAULT_SLOT, FileStore};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    env,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
};

fn main() -> Result<()> {
    // Logging stays off unless RUST_LOG is set
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    // Determine storage location from CLI args or config file
    let args: Vec<String> = env::args().collect();

    let (storage_dir, slot) = if args.len() == 2 {
        let dir = PathBuf::from(&args[1]);
        (Config::expand_path(&dir).unwrap_or(dir), DEFAULT_SLOT.to_string())
    } else if args.len() == 1 {
        match Config::load_or_default() {
            Ok(config) => (config.storage_dir, config.slot),
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                eprintln!("Usage: {} [storage-dir]", args[0]);
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {} [storage-dir]", args[0]);
        process::exit(1);
    };

    let mut app = App::new(FileStore::new(storage_dir), slot);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| render::ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && app.handle_key(key) == Outcome::Quit
        {
            return Ok(());
        }
    }
}
