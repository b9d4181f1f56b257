use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::app::{App, EditTarget, InputMode, PendingAction, Screen};
use crate::db::Database;
use crate::export;
use crate::models::Currency;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit VowBudget", cmd_quit, r);
    register_command!("quit", "Quit VowBudget", cmd_quit, r);
    register_command!("setup", "Go to Setup", cmd_setup, r);
    register_command!("s", "Go to Setup", cmd_setup, r);
    register_command!("allocations", "Go to Allocations", cmd_allocations, r);
    register_command!("a", "Go to Allocations", cmd_allocations, r);
    register_command!("comparison", "Go to Comparison", cmd_comparison, r);
    register_command!("c", "Go to Comparison", cmd_comparison, r);
    register_command!("timeline", "Go to Timeline", cmd_timeline, r);
    register_command!("t", "Go to Timeline", cmd_timeline, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "budget",
        "Change total budget (e.g. :budget 25000)",
        cmd_budget,
        r
    );
    register_command!(
        "currency",
        "Change display currency (e.g. :currency EUR)",
        cmd_currency,
        r
    );
    register_command!(
        "date",
        "Change wedding date (e.g. :date 2026-06-20)",
        cmd_date,
        r
    );
    register_command!(
        "set",
        "Set a category amount (e.g. :set Venue 3000)",
        cmd_set,
        r
    );
    register_command!(
        "spend",
        "Record actual spending (e.g. :spend Venue 3150.75)",
        cmd_spend,
        r
    );
    register_command!(
        "add",
        "Add a custom category (e.g. :add Fireworks)",
        cmd_add,
        r
    );
    register_command!(
        "remove",
        "Remove a category (e.g. :remove Favors)",
        cmd_remove,
        r
    );
    register_command!(
        "export",
        "Export plan to CSV (e.g. :export ~/wedding.csv)",
        cmd_export,
        r
    );
    register_command!(
        "report",
        "Write a text summary report (e.g. :report ~/wedding.txt)",
        cmd_report,
        r
    );
    register_command!("reset", "Clear the saved plan and start over", cmd_reset, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, db)?;
    } else {
        // Try fuzzy match
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_setup(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Setup;
    app.setup_field = 0;
    Ok(())
}

fn cmd_allocations(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.state.is_none() {
        app.set_status("No plan yet. Fill out Setup and Calculate first");
        return Ok(());
    }
    app.screen = Screen::Allocations;
    Ok(())
}

fn cmd_comparison(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.state.is_none() {
        app.set_status("No plan yet. Fill out Setup and Calculate first");
        return Ok(());
    }
    app.screen = Screen::Comparison;
    Ok(())
}

fn cmd_timeline(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.state.is_none() {
        app.set_status("No plan yet. Fill out Setup and Calculate first");
        return Ok(());
    }
    app.screen = Screen::Timeline;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_budget(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :budget <amount>. Example: :budget 25000");
        return Ok(());
    }

    match Decimal::from_str(args) {
        Ok(total) if total > Decimal::ZERO => app.set_total_budget(db, total)?,
        _ => app.set_status(format!("Invalid amount: {args}")),
    }
    Ok(())
}

fn cmd_currency(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        let codes: Vec<&str> = Currency::all().iter().map(|c| c.code()).collect();
        app.set_status(format!("Usage: :currency <code>. Codes: {}", codes.join(", ")));
        return Ok(());
    }

    match Currency::parse(args) {
        Some(currency) => app.set_currency(db, currency)?,
        None => app.set_status(format!("Unknown currency: {args}. Try USD, EUR, GBP, JPY")),
    }
    Ok(())
}

fn cmd_date(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :date <YYYY-MM-DD>. Example: :date 2026-06-20");
        return Ok(());
    }

    match NaiveDate::parse_from_str(args, "%Y-%m-%d") {
        Ok(date) => app.set_event_date(db, date)?,
        Err(_) => app.set_status("Invalid date format. Use YYYY-MM-DD (e.g. 2026-06-20)"),
    }
    Ok(())
}

fn cmd_set(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :set <category> <amount>. Example: :set Venue 3000");
        return Ok(());
    }

    // Last token is the amount, everything before is the category name
    let parts: Vec<&str> = args.rsplitn(2, ' ').collect();
    if parts.len() < 2 {
        app.set_status("Usage: :set <category> <amount>");
        return Ok(());
    }

    let amount = match Decimal::from_str(parts[0]) {
        Ok(a) => a,
        Err(_) => {
            app.set_status(format!("Invalid amount: {}", parts[0]));
            return Ok(());
        }
    };

    app.apply_allocation(db, parts[1], amount)
}

fn cmd_spend(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :spend <category> <amount>. Example: :spend Venue 3150.75");
        return Ok(());
    }

    let parts: Vec<&str> = args.rsplitn(2, ' ').collect();
    if parts.len() < 2 {
        app.set_status("Usage: :spend <category> <amount>");
        return Ok(());
    }

    app.record_expense(db, parts[1], parts[0])
}

fn cmd_add(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        // Enter editing mode for an inline name prompt
        if app.state.is_some() {
            app.command_input.clear();
            app.edit_target = Some(EditTarget::NewCategory);
            app.input_mode = InputMode::Editing;
            app.set_status("Type the new category name, press Enter to confirm");
        } else {
            app.set_status("No plan yet. Fill out Setup and Calculate first");
        }
        return Ok(());
    }

    app.add_category(db, args)
}

fn cmd_remove(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :remove <category>. Example: :remove Favors");
        return Ok(());
    }

    let Some(state) = &app.state else {
        app.set_status("No plan yet. Fill out Setup and Calculate first");
        return Ok(());
    };

    let found = state
        .allocations
        .categories()
        .find(|c| c.eq_ignore_ascii_case(args))
        .map(|name| name.to_string());

    if let Some(name) = found {
        app.confirm_message = format!("Remove '{name}' and its recorded spending?");
        app.pending_action = Some(PendingAction::RemoveCategory { name });
        app.input_mode = InputMode::Confirm;
    } else {
        app.set_status(format!("No category named '{args}'"));
    }

    Ok(())
}

fn cmd_export(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let Some(state) = &app.state else {
        app.set_status("No plan to export. Fill out Setup and Calculate first");
        return Ok(());
    };

    let path = if args.is_empty() {
        export::default_export_path("csv")
    } else {
        crate::run::shellexpand(args).into()
    };

    let rows = export::to_export_rows(&state.allocations, &state.actual_expenses, state.currency);
    let count = export::write_csv(&path, &rows)?;
    app.set_status(format!("Exported {count} categories to {}", path.display()));
    Ok(())
}

fn cmd_report(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let Some(state) = &app.state else {
        app.set_status("No plan to report. Fill out Setup and Calculate first");
        return Ok(());
    };

    let path = if args.is_empty() {
        export::default_export_path("txt")
    } else {
        crate::run::shellexpand(args).into()
    };

    let rows = export::to_export_rows(&state.allocations, &state.actual_expenses, state.currency);
    export::write_report(&path, state, &rows)?;
    app.set_status(format!("Report written to {}", path.display()));
    Ok(())
}

fn cmd_reset(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.state.is_none() {
        app.set_status("Nothing to reset");
        return Ok(());
    }
    app.confirm_message = "Clear the saved plan? This cannot be undone".to_string();
    app.pending_action = Some(PendingAction::ResetPlan);
    app.input_mode = InputMode::Confirm;
    Ok(())
}
