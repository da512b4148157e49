//! The terminal front end.

use crate::app::{App, Command, Redraw};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use lifeboard_lib::{Coord, Delta, State};
use std::{
    error::Error,
    io::{self, Stdout, Write},
    iter,
    time::Instant,
};

/// Width of a terminal column, in pixels.
const COLUMN_WIDTH: isize = 8;

const HELP: &str = "[space] play/pause  [n] next  [c] clear  [r] reset  \
                    [b/s + digit] rule  [:] command  [q] quit";

/// Number of terminal columns used by a cell of the given scale.
fn cell_width(scale: isize) -> u16 {
    (scale / COLUMN_WIDTH).clamp(1, u16::MAX as isize) as u16
}

/// The cell drawn at a terminal position on a terminal of the given size.
///
/// The first and the last rows are the status bars. A cell cut off at the
/// right edge is not drawn.
fn cell_at(column: u16, row: u16, cell_width: u16, (columns, rows): (u16, u16)) -> Option<Coord> {
    let y = row.checked_sub(1)?;
    let x = column / cell_width;
    if row as usize + 1 >= rows as usize
        || (x as usize + 1) * cell_width as usize > columns as usize
    {
        return None;
    }
    Some((x as isize, y as isize))
}

/// What the keyboard is currently typing into.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Mode {
    Normal,
    /// Waiting for a digit after `b` (dead cells) or `s` (living cells).
    Rule(State),
    /// Typing a command after `:`.
    Prompt(String),
}

/// Raw mode and the alternate screen, restored when dropped.
struct Terminal {
    stdout: Stdout,
}

impl Terminal {
    fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        Ok(Terminal { stdout })
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        execute!(
            self.stdout,
            cursor::Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        )
        .ok();
        terminal::disable_raw_mode().ok();
    }
}

struct BoardWindow {
    terminal: Terminal,
    /// Columns and rows of the terminal.
    size: (u16, u16),
    cell_width: u16,
    mode: Mode,
    message: Option<String>,
}

impl BoardWindow {
    fn new(scale: isize) -> io::Result<Self> {
        let terminal = Terminal::new()?;
        let size = terminal::size()?;
        Ok(BoardWindow {
            terminal,
            size,
            cell_width: cell_width(scale),
            mode: Mode::Normal,
            message: None,
        })
    }

    fn bar(&mut self, row: u16, text: &str) -> io::Result<()> {
        let text: String = text
            .chars()
            .chain(iter::repeat(' '))
            .take(self.size.0 as usize)
            .collect();
        queue!(
            self.terminal.stdout,
            cursor::MoveTo(0, row),
            SetAttribute(Attribute::Reverse),
            Print(text),
            SetAttribute(Attribute::Reset)
        )
    }

    fn draw_bars(&mut self, app: &App) -> io::Result<()> {
        let board = app.board();
        let top = format!(
            "{}  Rule: {}  FPS: {}  {}",
            board.info(),
            board.rules(),
            app.config().fps,
            if app.is_playing() { "Running" } else { "Paused" }
        );
        self.bar(0, &top)?;

        let bottom = match (&self.mode, &self.message) {
            (Mode::Prompt(input), _) => format!(":{}", input),
            (Mode::Rule(State::Dead), _) => String::from("Birth rule: press a digit from 0 to 8"),
            (Mode::Rule(State::Alive), _) => {
                String::from("Survival rule: press a digit from 0 to 8")
            }
            (Mode::Normal, Some(message)) => message.clone(),
            (Mode::Normal, None) => String::from(HELP),
        };
        self.bar(self.size.1.saturating_sub(1), &bottom)
    }

    fn draw_cell(&mut self, (x, y): Coord, state: State) -> io::Result<()> {
        let width = self.cell_width as usize;
        let column = x as usize * width;
        let row = y as usize + 1;
        if column + width > self.size.0 as usize || row + 1 >= self.size.1 as usize {
            return Ok(());
        }
        let glyph: String = match state {
            State::Alive => iter::repeat('█').take(width).collect(),
            State::Dead => iter::once('·')
                .chain(iter::repeat(' '))
                .take(width)
                .collect(),
        };
        queue!(
            self.terminal.stdout,
            cursor::MoveTo(column as u16, row as u16),
            Print(glyph)
        )
    }

    fn draw_deltas(&mut self, deltas: &[Delta]) -> io::Result<()> {
        deltas
            .iter()
            .try_for_each(|delta| self.draw_cell(delta.coord, delta.state))
    }

    /// Draws the visible part of the board with every cell dead.
    fn draw_empty(&mut self, app: &App) -> io::Result<()> {
        let columns = (self.size.0 / self.cell_width) as usize;
        let rows = self.size.1.saturating_sub(2) as usize;
        for y in 0..app.board().height().min(rows) {
            for x in 0..app.board().width().min(columns) {
                self.draw_cell((x as isize, y as isize), State::Dead)?;
            }
        }
        Ok(())
    }

    /// Redraws everything from the current board.
    fn repaint(&mut self, app: &App) -> io::Result<()> {
        queue!(self.terminal.stdout, Clear(ClearType::All))?;
        self.draw_empty(app)?;
        let deltas: Vec<_> = app
            .board()
            .live_cells()
            .map(|coord| Delta {
                coord,
                state: State::Alive,
            })
            .collect();
        self.draw_deltas(&deltas)?;
        self.draw_bars(app)?;
        self.terminal.stdout.flush()
    }

    fn redraw(&mut self, app: &App, redraw: Redraw) -> io::Result<()> {
        match redraw {
            Redraw::Nothing => return Ok(()),
            Redraw::Status => (),
            Redraw::Cells(deltas) => self.draw_deltas(&deltas)?,
            Redraw::Board(deltas) => {
                self.cell_width = cell_width(app.config().scale);
                queue!(self.terminal.stdout, Clear(ClearType::All))?;
                self.draw_empty(app)?;
                self.draw_deltas(&deltas)?;
            }
        }
        self.draw_bars(app)?;
        self.terminal.stdout.flush()
    }

    /// Handles a key press. Returns `None` when the user quits.
    fn key(&mut self, key: KeyEvent, app: &mut App) -> Option<Redraw> {
        self.message = None;
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }
        let result = match std::mem::replace(&mut self.mode, Mode::Normal) {
            Mode::Normal => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return None,
                KeyCode::Char(' ') | KeyCode::Enter => {
                    app.play_pause(Instant::now());
                    Ok(Redraw::Status)
                }
                KeyCode::Char('n') | KeyCode::Right => app.advance(),
                KeyCode::Char('c') => Ok(app.clear()),
                KeyCode::Char('r') => Ok(app.reset()),
                KeyCode::Char('b') => {
                    self.mode = Mode::Rule(State::Dead);
                    Ok(Redraw::Status)
                }
                KeyCode::Char('s') => {
                    self.mode = Mode::Rule(State::Alive);
                    Ok(Redraw::Status)
                }
                KeyCode::Char(':') => {
                    self.mode = Mode::Prompt(String::new());
                    Ok(Redraw::Status)
                }
                _ => Ok(Redraw::Nothing),
            },
            Mode::Rule(state) => match key.code {
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    app.toggle_rule(state, (c as u8 - b'0') as usize)
                }
                _ => Ok(Redraw::Status),
            },
            Mode::Prompt(mut input) => match key.code {
                KeyCode::Enter => match input.parse::<Command>() {
                    Ok(command) => app.execute(command),
                    Err(message) => {
                        self.message = Some(message);
                        Ok(Redraw::Status)
                    }
                },
                KeyCode::Esc => Ok(Redraw::Status),
                KeyCode::Backspace => {
                    input.pop();
                    self.mode = Mode::Prompt(input);
                    Ok(Redraw::Status)
                }
                KeyCode::Char(c) => {
                    input.push(c);
                    self.mode = Mode::Prompt(input);
                    Ok(Redraw::Status)
                }
                _ => {
                    self.mode = Mode::Prompt(input);
                    Ok(Redraw::Nothing)
                }
            },
        };
        Some(result.unwrap_or_else(|e| {
            self.message = Some(e.to_string());
            Redraw::Status
        }))
    }

    fn mouse(&mut self, mouse: MouseEvent, app: &mut App) -> Redraw {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Redraw::Nothing;
        }
        match cell_at(mouse.column, mouse.row, self.cell_width, self.size) {
            Some((x, y)) if app.board().get_cell(x, y).is_ok() => {
                app.toggle(x, y).unwrap_or(Redraw::Nothing)
            }
            _ => Redraw::Nothing,
        }
    }
}

/// Runs the simulation in the terminal until the user quits.
///
/// The last generation is printed after leaving the TUI.
pub(crate) fn run(mut app: App) -> Result<(), Box<dyn Error>> {
    let mut window = BoardWindow::new(app.config().scale)?;
    window.repaint(&app)?;

    loop {
        let ready = match app.timeout(Instant::now()) {
            Some(timeout) => event::poll(timeout)?,
            None => true,
        };
        if ready {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match window.key(key, &mut app) {
                        Some(redraw) => window.redraw(&app, redraw)?,
                        None => break,
                    }
                }
                Event::Mouse(mouse) => {
                    let redraw = window.mouse(mouse, &mut app);
                    window.redraw(&app, redraw)?;
                }
                Event::Resize(columns, rows) => {
                    window.size = (columns, rows);
                    window.repaint(&app)?;
                }
                _ => (),
            }
        }
        let redraw = app.tick(Instant::now())?;
        window.redraw(&app, redraw)?;
    }

    drop(window);
    print!("{}", app.board());
    println!("{}", app.board().info());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{cell_at, cell_width};

    #[test]
    fn layout() {
        assert_eq!(cell_width(16), 2);
        assert_eq!(cell_width(4), 1);
        assert_eq!(cell_width(-3), 1);
        assert_eq!(cell_at(5, 3, 2, (80, 10)), Some((2, 2)));
        assert_eq!(cell_at(5, 0, 2, (80, 10)), None);
        assert_eq!(cell_at(0, 8, 2, (80, 10)), Some((0, 7)));
        assert_eq!(cell_at(0, 9, 2, (80, 10)), None);
        assert_eq!(cell_at(79, 4, 2, (80, 10)), Some((39, 3)));
        assert_eq!(cell_at(80, 4, 2, (81, 10)), None);
    }
}
