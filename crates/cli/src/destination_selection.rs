//! Interactive destination menu.
//!
//! Two entries, the current directory and the alternate folder. Arrow keys or
//! `j`/`k` move the selection, `1`/`2` pick directly, Enter confirms and `q` or
//! Escape quits.

use std::io::{stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{queue, ExecutableCommand};
use sprout_core::config::Destination;
use sprout_core::error::Result;

const DESTINATIONS: [Destination; 2] = [
    Destination::CurrentDirectory,
    Destination::AlternateFolder,
];

pub enum DestinationChoice {
    Selected(Destination),
    Quit,
}

/// What a key press does to the menu.
#[derive(Debug, PartialEq, Eq)]
pub enum MenuAction {
    Move(usize),
    Confirm(usize),
    Quit,
    Ignore,
}

struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

/// Maps a key press to a menu action given the currently selected row.
#[must_use]
pub fn action_for_key(selected: usize, key: &KeyEvent) -> MenuAction {
    let last = DESTINATIONS.len() - 1;

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return MenuAction::Quit;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => MenuAction::Move(selected.saturating_sub(1)),
        KeyCode::Down | KeyCode::Char('j') => MenuAction::Move((selected + 1).min(last)),
        KeyCode::Char('1') => MenuAction::Confirm(0),
        KeyCode::Char('2') => MenuAction::Confirm(1),
        KeyCode::Enter => MenuAction::Confirm(selected),
        KeyCode::Esc | KeyCode::Char('q') => MenuAction::Quit,
        _ => MenuAction::Ignore,
    }
}

fn label(destination: Destination, alternate_folder: &str) -> String {
    match destination {
        Destination::CurrentDirectory => "Current directory".to_string(),
        Destination::AlternateFolder => format!("Alternate folder ({alternate_folder})"),
    }
}

fn redraw(selected: usize, alternate_folder: &str) -> Result<()> {
    let mut stdout = stdout();

    queue!(
        stdout,
        Clear(ClearType::All),
        MoveTo(0, 0),
        SetAttribute(Attribute::Bold),
        Print("Where should the new project go?"),
        SetAttribute(Attribute::Reset),
    )?;

    for (index, destination) in DESTINATIONS.iter().enumerate() {
        // Raw mode needs explicit carriage returns, so rows are positioned directly
        let row = u16::try_from(index + 2).unwrap_or(u16::MAX);
        queue!(stdout, MoveTo(0, row))?;

        if index == selected {
            queue!(stdout, SetBackgroundColor(Color::DarkBlue))?;
        }

        queue!(
            stdout,
            Print(format!("[{}] {}", index + 1, label(*destination, alternate_folder))),
            SetAttribute(Attribute::Reset)
        )?;
    }

    queue!(stdout, MoveTo(0, 5), Print("Enter to confirm, q to quit"))?;

    stdout.flush()?;
    Ok(())
}

/// Asks the user where to create the project.
///
/// # Errors
///
/// Returns an error if the terminal cannot be put into raw mode or read from.
pub fn prompt_for_destination(alternate_folder: &str) -> Result<DestinationChoice> {
    let mut selected: usize = 0;

    stdout().execute(EnterAlternateScreen)?;
    enable_raw_mode()?;
    let _raw_mode_guard = RawModeGuard; // Restores the terminal on every return path

    redraw(selected, alternate_folder)?;

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };

        if key.kind != KeyEventKind::Press {
            continue;
        }

        match action_for_key(selected, &key) {
            MenuAction::Move(index) => {
                if index != selected {
                    selected = index;
                    redraw(selected, alternate_folder)?;
                }
            }
            MenuAction::Confirm(index) => {
                return Ok(DestinationChoice::Selected(DESTINATIONS[index]));
            }
            MenuAction::Quit => return Ok(DestinationChoice::Quit),
            MenuAction::Ignore => {}
        }
    }
}
