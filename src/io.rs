use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;

use crate::session::Command;

/// Rows at the bottom of the terminal kept for the status line.
pub const STATUS_ROWS: u16 = 1;

/// Converts a crossterm event into a session command.
///
/// The board is drawn from the terminal's top-left corner, so mouse positions are used as-is.
/// Resizes report the area left for the board once the status line is taken out.
pub fn convert_event(event: CrossTermEvent) -> Option<Command> {
    match event {
        CrossTermEvent::Key(key_event) => convert_key(key_event),
        CrossTermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => Some(Command::Click {
            x: column.into(),
            y: row.into(),
        }),
        CrossTermEvent::Resize(cols, rows) => Some(Command::Resize {
            width: cols.into(),
            height: rows.saturating_sub(STATUS_ROWS).into(),
        }),
        _ => None,
    }
}

fn convert_key(key_event: KeyEvent) -> Option<Command> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }

    match key_event {
        KeyEvent {
            code: KeyCode::Char('q') | KeyCode::Esc,
            ..
        }
        | KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => Some(Command::Quit),
        KeyEvent {
            code: KeyCode::Char(' '),
            ..
        } => Some(Command::TogglePause),
        KeyEvent {
            code: KeyCode::Char('r'),
            ..
        } => Some(Command::Run),
        KeyEvent {
            code: KeyCode::Char('p'),
            ..
        } => Some(Command::Pause),
        KeyEvent {
            code: KeyCode::Char('n' | '.'),
            ..
        } => Some(Command::Step),
        KeyEvent {
            code: KeyCode::Char('c'),
            ..
        } => Some(Command::Clear),
        _ => None,
    }
}
