use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use rust_decimal::Decimal;
use std::io;
use std::str::FromStr;

use crate::db::Database;
use crate::ui::app::{App, EditTarget, InputMode, PendingAction, Screen, SETUP_BUDGET, SETUP_CALCULATE, SETUP_DATE};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(db: &mut Database) -> Result<()> {
    let saved = db.load_state()?;
    let mut app = App::new(saved);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, db);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    db: &mut Database,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, db)?,
                InputMode::Command => handle_command_input(key, app, db)?,
                InputMode::Editing => handle_editing_input(key, app, db)?,
                InputMode::Confirm => handle_confirm_input(key, app, db)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('1') => switch_screen(app, Screen::Setup),
        KeyCode::Char('2') => switch_screen(app, Screen::Allocations),
        KeyCode::Char('3') => switch_screen(app, Screen::Comparison),
        KeyCode::Char('4') => switch_screen(app, Screen::Timeline),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            switch_screen(app, screens[next]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, screens[prev]);
        }
        KeyCode::Enter => handle_enter(app, db)?,
        KeyCode::Esc => {
            app.status_message.clear();
        }
        KeyCode::Char('+') | KeyCode::Char('=') => handle_adjust(app, db, 1)?,
        KeyCode::Char('-') => handle_adjust(app, db, -1)?,
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_up(app);
            }
        }
        KeyCode::Char('e') if app.screen == Screen::Allocations => {
            if let Some(category) = app.selected_category() {
                app.command_input.clear();
                app.edit_target = Some(EditTarget::Allocation(category));
                app.input_mode = InputMode::Editing;
            }
        }
        KeyCode::Char('x')
            if app.screen == Screen::Allocations || app.screen == Screen::Comparison =>
        {
            if let Some(category) = app.selected_category() {
                app.command_input.clear();
                app.edit_target = Some(EditTarget::Expense(category));
                app.input_mode = InputMode::Editing;
            }
        }
        KeyCode::Char('a') if app.screen == Screen::Allocations => {
            if app.state.is_some() {
                app.command_input.clear();
                app.edit_target = Some(EditTarget::NewCategory);
                app.input_mode = InputMode::Editing;
            }
        }
        KeyCode::Char('D') if app.screen == Screen::Allocations => {
            if let Some(name) = app.selected_category() {
                app.confirm_message = format!("Remove '{name}' and its recorded spending?");
                app.pending_action = Some(PendingAction::RemoveCategory { name });
                app.input_mode = InputMode::Confirm;
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, db)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
            let target = app.edit_target.take();
            apply_edit(app, db, target, input.trim())?;
        }
        KeyCode::Esc => {
            app.command_input.clear();
            app.edit_target = None;
            app.input_mode = InputMode::Normal;
            app.set_status("Edit cancelled");
        }
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn apply_edit(
    app: &mut App,
    db: &mut Database,
    target: Option<EditTarget>,
    input: &str,
) -> Result<()> {
    match target {
        Some(EditTarget::Budget) => {
            if input.is_empty() {
                return Ok(());
            }
            match Decimal::from_str(input) {
                Ok(v) if v > Decimal::ZERO => {
                    app.budget_input = input.to_string();
                }
                _ => app.set_status(format!("Invalid amount: {input}")),
            }
        }
        Some(EditTarget::EventDate) => {
            if input.is_empty() {
                return Ok(());
            }
            match chrono::NaiveDate::parse_from_str(input, "%Y-%m-%d") {
                Ok(_) => app.date_input = input.to_string(),
                Err(_) => app.set_status("Invalid date format. Use YYYY-MM-DD"),
            }
        }
        Some(EditTarget::Allocation(category)) => match Decimal::from_str(input) {
            Ok(v) => app.apply_allocation(db, &category, v)?,
            Err(_) => app.set_status(format!("Invalid amount: {input}")),
        },
        Some(EditTarget::Expense(category)) => {
            app.record_expense(db, &category, input)?;
        }
        Some(EditTarget::NewCategory) => {
            if !input.is_empty() {
                app.add_category(db, input)?;
            }
        }
        None => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                match action {
                    PendingAction::RemoveCategory { name } => {
                        app.remove_category(db, &name)?;
                    }
                    PendingAction::ResetPlan => {
                        app.reset_plan(db)?;
                    }
                }
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
        _ => {}
    }
    Ok(())
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, screen: Screen) {
    if screen != Screen::Setup && app.state.is_none() {
        app.set_status("No plan yet. Fill out Setup and Calculate first");
        return;
    }
    app.screen = screen;
    app.set_status(format!("{screen}"));
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Setup => {
            if app.setup_field < SETUP_CALCULATE {
                app.setup_field += 1;
            }
        }
        Screen::Allocations | Screen::Comparison | Screen::Timeline => {
            let page = app.category_page();
            let len = app.category_count();
            scroll_down(&mut app.category_index, &mut app.category_scroll, len, page);
        }
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Setup => {
            app.setup_field = app.setup_field.saturating_sub(1);
        }
        Screen::Allocations | Screen::Comparison | Screen::Timeline => {
            scroll_up(&mut app.category_index, &mut app.category_scroll);
        }
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Setup => app.setup_field = 0,
        _ => scroll_to_top(&mut app.category_index, &mut app.category_scroll),
    }
}

fn handle_goto_bottom(app: &mut App) {
    match app.screen {
        Screen::Setup => app.setup_field = SETUP_CALCULATE,
        _ => {
            let page = app.category_page();
            let len = app.category_count();
            scroll_to_bottom(&mut app.category_index, &mut app.category_scroll, len, page);
        }
    }
}

fn handle_enter(app: &mut App, db: &mut Database) -> Result<()> {
    match app.screen {
        Screen::Setup => match app.setup_field {
            SETUP_BUDGET => {
                app.command_input = app.budget_input.clone();
                app.edit_target = Some(EditTarget::Budget);
                app.input_mode = InputMode::Editing;
            }
            SETUP_DATE => {
                app.command_input = app.date_input.clone();
                app.edit_target = Some(EditTarget::EventDate);
                app.input_mode = InputMode::Editing;
            }
            SETUP_CALCULATE => app.calculate(db)?,
            _ => app.cycle_setup_field(1),
        },
        Screen::Allocations => {
            if let Some(category) = app.selected_category() {
                app.command_input.clear();
                app.edit_target = Some(EditTarget::Allocation(category));
                app.input_mode = InputMode::Editing;
            }
        }
        Screen::Comparison => {
            if let Some(category) = app.selected_category() {
                app.command_input.clear();
                app.edit_target = Some(EditTarget::Expense(category));
                app.input_mode = InputMode::Editing;
            }
        }
        Screen::Timeline => {}
    }
    Ok(())
}

fn handle_adjust(app: &mut App, db: &mut Database, delta: i32) -> Result<()> {
    match app.screen {
        Screen::Setup => app.cycle_setup_field(delta),
        Screen::Allocations => app.step_allocation(db, delta)?,
        _ => {}
    }
    Ok(())
}
