use anyhow::Result;
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::alloc::{self, suggested_booking_date, LocationTable};
use crate::db::Database;
use crate::export;
use crate::models::{BudgetState, Currency};

pub(crate) fn as_cli(args: &[String], db: &mut Database) -> Result<()> {
    match args[1].as_str() {
        "calc" => cli_calc(&args[2..], db),
        "show" => cli_show(db),
        "set" => cli_set(&args[2..], db),
        "spend" => cli_spend(&args[2..], db),
        "add" => cli_add(&args[2..], db),
        "remove" => cli_remove(&args[2..], db),
        "timeline" => cli_timeline(db),
        "export" => cli_export(&args[2..], db),
        "locations" => cli_locations(),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("vowbudget {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("VowBudget — wedding budget planner");
    println!();
    println!("Usage: vowbudget [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  calc <total> <region> <locality>  Allocate a budget by location");
    println!("    --currency <code>           Display currency: USD, EUR, GBP, JPY");
    println!("    --date <YYYY-MM-DD>         Wedding date (default: today)");
    println!("  show                          Print the saved allocation");
    println!("  set <category> <amount>       Set one category, rebalance the rest");
    println!("  spend <category> <amount>     Record actual spending");
    println!("  add <name>                    Add a custom category");
    println!("  remove <name>                 Remove a category");
    println!("  timeline                      Print suggested booking dates");
    println!("  export [path]                 Write the plan as CSV");
    println!("    --report                    Write a text report instead");
    println!("  locations                     List supported regions and localities");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn load_required(db: &Database) -> Result<BudgetState> {
    db.load_state()?.ok_or_else(|| {
        anyhow::anyhow!("No saved plan. Run: vowbudget calc <total> <region> <locality>")
    })
}

fn cli_calc(args: &[String], db: &mut Database) -> Result<()> {
    let positional: Vec<&String> = args
        .iter()
        .take_while(|a| !a.starts_with("--"))
        .collect();
    if positional.len() < 3 {
        anyhow::bail!("Usage: vowbudget calc <total> <region> <locality> [--currency <code>] [--date <YYYY-MM-DD>]");
    }

    let total = Decimal::from_str(positional[0])
        .map_err(|_| anyhow::anyhow!("Invalid budget amount: {}", positional[0]))?;

    let currency = args
        .windows(2)
        .find(|w| w[0] == "--currency")
        .map(|w| {
            Currency::parse(&w[1])
                .ok_or_else(|| anyhow::anyhow!("Unknown currency: {}. Try USD, EUR, GBP, JPY", w[1]))
        })
        .transpose()?
        .unwrap_or_default();

    let event_date = args
        .windows(2)
        .find(|w| w[0] == "--date")
        .map(|w| {
            NaiveDate::parse_from_str(&w[1], "%Y-%m-%d")
                .map_err(|_| anyhow::anyhow!("Invalid date: {}. Use YYYY-MM-DD", w[1]))
        })
        .transpose()?
        .unwrap_or_else(|| Local::now().date_naive());

    let state = alloc::build_state(
        total,
        positional[1],
        positional[2],
        currency,
        event_date,
        LocationTable::builtin(),
    )?;
    db.save_state(&state)?;

    println!(
        "Allocated {} across {} categories for {}, {}",
        state.currency.display(state.total_budget),
        state.allocations.len(),
        state.locality,
        state.region
    );
    println!();
    print_allocation_table(&state);
    Ok(())
}

fn cli_show(db: &mut Database) -> Result<()> {
    let state = load_required(db)?;
    println!(
        "{}, {} | wedding {} | budget {}",
        state.locality,
        state.region,
        state.event_date.format("%B %-d, %Y"),
        state.currency.display(state.total_budget)
    );
    println!();
    print_allocation_table(&state);
    Ok(())
}

fn cli_set(args: &[String], db: &mut Database) -> Result<()> {
    if args.len() < 2 {
        anyhow::bail!("Usage: vowbudget set <category> <amount>");
    }
    let (category, amount_str) = split_category_amount(args);
    let amount = Decimal::from_str(&amount_str)
        .map_err(|_| anyhow::anyhow!("Invalid amount: {amount_str}"))?;

    let state = load_required(db)?;
    let Some(canonical) = find_category(&state, &category) else {
        anyhow::bail!("No category named '{category}'");
    };

    let next = alloc::apply_allocation(&state, &canonical, amount.max(Decimal::ZERO));
    db.save_state(&next)?;
    println!("{canonical} set to {}, others rebalanced", next.currency.display(amount.max(Decimal::ZERO)));
    println!();
    print_allocation_table(&next);
    Ok(())
}

fn cli_spend(args: &[String], db: &mut Database) -> Result<()> {
    if args.len() < 2 {
        anyhow::bail!("Usage: vowbudget spend <category> <amount>");
    }
    let (category, amount_str) = split_category_amount(args);

    let state = load_required(db)?;
    let Some(canonical) = find_category(&state, &category) else {
        anyhow::bail!("No category named '{category}'");
    };

    let next = alloc::record_expense(&state, &canonical, &amount_str);
    db.save_state(&next)?;
    println!(
        "Recorded {} spent on {canonical}",
        next.currency
            .display(next.actual_expenses.get_or_zero(&canonical))
    );
    Ok(())
}

fn cli_add(args: &[String], db: &mut Database) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: vowbudget add <name>");
    }
    let name = args.join(" ");

    let state = load_required(db)?;
    let next = alloc::add_category(&state, &name);
    if next.allocations.len() == state.allocations.len() {
        anyhow::bail!("Category name is empty or already exists: {name}");
    }
    db.save_state(&next)?;
    println!("Added category: {}", name.trim());
    Ok(())
}

fn cli_remove(args: &[String], db: &mut Database) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: vowbudget remove <name>");
    }
    let name = args.join(" ");

    let state = load_required(db)?;
    let Some(canonical) = find_category(&state, &name) else {
        anyhow::bail!("No category named '{name}'");
    };

    let next = alloc::remove_category(&state, &canonical);
    db.save_state(&next)?;
    println!("Removed category: {canonical}");
    Ok(())
}

fn cli_timeline(db: &mut Database) -> Result<()> {
    let state = load_required(db)?;
    let today = Local::now().date_naive();

    let mut entries: Vec<(&str, NaiveDate)> = state
        .allocations
        .categories()
        .map(|c| (c, suggested_booking_date(state.event_date, c)))
        .collect();
    entries.sort_by_key(|(_, date)| *date);

    println!(
        "Booking timeline for {} (wedding {})",
        format!("{}, {}", state.locality, state.region),
        state.event_date.format("%B %-d, %Y")
    );
    println!("{}", "─".repeat(58));
    for (category, book_by) in entries {
        let days_left = (book_by - today).num_days();
        let when = if days_left < 0 {
            format!("{} days overdue", -days_left)
        } else {
            format!("in {days_left} days")
        };
        println!(
            "  {category:<18} {:<18} {when}",
            book_by.format("%B %-d, %Y").to_string()
        );
    }
    Ok(())
}

fn cli_export(args: &[String], db: &mut Database) -> Result<()> {
    let state = load_required(db)?;
    let as_report = args.iter().any(|a| a == "--report");

    let path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| std::path::PathBuf::from(shellexpand(a)))
        .unwrap_or_else(|| export::default_export_path(if as_report { "txt" } else { "csv" }));

    let rows = export::to_export_rows(&state.allocations, &state.actual_expenses, state.currency);
    if as_report {
        export::write_report(&path, &state, &rows)?;
        println!("Report written to {}", path.display());
    } else {
        let count = export::write_csv(&path, &rows)?;
        println!("Exported {count} categories to {}", path.display());
    }
    Ok(())
}

fn cli_locations() -> Result<()> {
    let table = LocationTable::builtin();
    println!("Supported locations:");
    for region in table.regions() {
        println!("  {region}");
        if let Some(localities) = table.localities(region) {
            for locality in localities {
                println!("    {locality}");
            }
        }
    }
    Ok(())
}

fn print_allocation_table(state: &BudgetState) {
    let rows = export::to_export_rows(&state.allocations, &state.actual_expenses, state.currency);
    println!("{:<20} {:>14} {:>14}", "Category", "Allocated", "Spent");
    println!("{}", "─".repeat(50));
    for row in &rows {
        println!("{:<20} {:>14} {:>14}", row.category, row.allocated, row.actual);
    }
    println!("{}", "─".repeat(50));
    println!(
        "{:<20} {:>14} {:>14}",
        "Total",
        state.currency.display(state.allocations.total()),
        state.currency.display(state.actual_expenses.total())
    );
}

/// Last token is the amount; everything before it is the category name.
fn split_category_amount(args: &[String]) -> (String, String) {
    let amount = args[args.len() - 1].clone();
    let category = args[..args.len() - 1].join(" ");
    (category, amount)
}

fn find_category(state: &BudgetState, name: &str) -> Option<String> {
    state
        .allocations
        .categories()
        .find(|c| c.eq_ignore_ascii_case(name.trim()))
        .map(String::from)
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
