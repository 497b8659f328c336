use std::fs::File;
use std::io;
use std::io::Stdout;
use std::io::Write;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::Context;
use crossterm::cursor;
use crossterm::event;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lifegrid::config::Config;
use lifegrid::io::STATUS_ROWS;
use lifegrid::io::convert_event;
use lifegrid::render::Frame;
use lifegrid::session::Session;

const DEFAULT_FILTER: &str = "lifegrid=info";

const HELP: &str = "space run/pause  n step  c clear  q quit";

/// The terminal is in raw mode while we run, so logs only go to a file.
fn init_logging(config: &Config) -> anyhow::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Invalid configuration")?;
    init_logging(&config)?;

    // Get the width and height of the terminal
    let (cols, rows) = terminal::size().context("Failed to read terminal size")?;

    let mut session = Session::from_config(
        &config,
        cols.into(),
        rows.saturating_sub(STATUS_ROWS).into(),
    )?;
    let mut frame = Frame::new(config.render, config.layout);

    terminal::enable_raw_mode()?;
    // Restores the terminal on every way out, errors included
    let _guard = TerminalGuard;

    let mut stdout = io::stdout();
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        event::EnableMouseCapture
    )?;

    run(&mut session, &mut frame, &config, &mut stdout)
}

/// Leaves raw mode and the alternate screen when dropped.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

fn run(
    session: &mut Session,
    frame: &mut Frame,
    config: &Config,
    stdout: &mut Stdout,
) -> anyhow::Result<()> {
    let frame_time = config.frame_time();
    let mut last = Instant::now();

    while !session.should_quit() {
        // Poll event for as long as the frame time
        if event::poll(frame_time)? {
            if let Some(command) = convert_event(event::read()?) {
                session.apply(command)?;
            }
        }

        let now = Instant::now();
        session.tick(now - last);
        last = now;

        draw(session, frame, stdout)?;
    }

    info!(generation = session.grid().generation(), "quit");

    Ok(())
}

fn draw(session: &Session, frame: &mut Frame, stdout: &mut Stdout) -> io::Result<()> {
    queue!(
        stdout,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;

    for (i, line) in frame.render(session.grid()).lines().enumerate() {
        let Ok(row) = u16::try_from(i) else { break };

        queue!(stdout, cursor::MoveTo(0, row), style::Print(line))?;
    }

    let grid = session.grid();
    let state = if session.ticker().is_running() {
        "running"
    } else {
        "paused"
    };
    let status = format!(
        "gen {} | pop {} | {}x{} | {} | {} | {}",
        grid.generation(),
        grid.population(),
        grid.row_count(),
        grid.column_count(),
        grid.rules(),
        state,
        HELP
    );

    let (_, rows) = terminal::size()?;
    queue!(
        stdout,
        cursor::MoveTo(0, rows.saturating_sub(STATUS_ROWS)),
        style::Print(status)
    )?;

    stdout.flush()
}
