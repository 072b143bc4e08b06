use std::{
    error::Error,
    io::{self, Stdout},
    panic,
};

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info, warn};
use ratatui::{prelude::CrosstermBackend, Terminal};

use crate::{app::App, config::Args, error::Result};

mod app;
mod config;
mod error;
mod logging;
mod model;
mod store;
mod view;

fn main() -> std::result::Result<(), Box<dyn Error>> {
    let args = Args::parse();
    args.validate()?;

    if !args.no_log {
        logging::init_logging(args.log_level, &args.log_dir())?;
    }
    install_panic_hook(reset_terminal);

    let app = App::new(args.date_format.clone());
    let result = setup_terminal().and_then(|mut terminal| {
        let result = run(&mut terminal, app, &args);
        restore_terminal(&mut terminal)?;
        result
    });

    if let Err(err) = &result {
        warn!("event=app_exit status=error error={}", err);
    }
    logging::shutdown();
    Ok(result?)
}

/// Runs `restore` before the previous panic hook so the panic message is
/// printed to a usable terminal.
fn install_panic_hook<F>(restore: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let previous_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore();
        error!("event=panic info={}", info);
        logging::shutdown();
        previous_hook(info);
    }));
}

fn reset_terminal() {
    disable_raw_mode().ok();
    execute!(io::stdout(), LeaveAlternateScreen).ok();
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    if let Err(err) = execute!(stdout, EnterAlternateScreen) {
        disable_raw_mode().ok();
        return Err(err.into());
    }
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    Ok(terminal.show_cursor()?)
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut app: App,
    args: &Args,
) -> Result<()> {
    while !app.should_quit {
        if app.take_dirty() {
            terminal.draw(|frame| view::draw(frame, &mut app))?;
        }

        if event::poll(args.tick_rate())? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Resize(_, _) => app.mark_dirty(),
                _ => {}
            }
        }
    }
    info!(
        "event=app_exit status=ok total={} completed={}",
        app.store.total_count(),
        app.store.completed_count()
    );
    Ok(())
}
