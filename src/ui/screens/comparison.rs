use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::BudgetState;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(state) = &app.state else {
        render_empty(f, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Min(5),    // Per-category comparison
        ])
        .split(area);

    render_summary_cards(f, chunks[0], state);
    render_comparison_list(f, chunks[1], app, state);
}

fn render_summary_cards(f: &mut Frame, area: Rect, state: &BudgetState) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let allocated = state.allocations.total();
    let spent = state.actual_expenses.total();
    let remaining = allocated - spent;
    let recorded = state.actual_expenses.len();

    render_card(
        f,
        cards[0],
        "Allocated",
        allocated,
        state,
        theme::ACCENT,
        None,
    );
    render_card(
        f,
        cards[1],
        "Spent",
        spent,
        state,
        theme::YELLOW,
        Some(format!("{recorded} categories")),
    );
    render_card(
        f,
        cards[2],
        "Remaining",
        remaining,
        state,
        if remaining >= Decimal::ZERO {
            theme::GREEN
        } else {
            theme::RED
        },
        None,
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    amount: Decimal,
    state: &BudgetState,
    color: ratatui::style::Color,
    subtitle: Option<String>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let sub_text = subtitle.unwrap_or_default();

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_amount(amount, state.currency),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(sub_text, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_comparison_list(f: &mut Frame, area: Rect, app: &App, state: &BudgetState) {
    let items: Vec<ListItem> = state
        .allocations
        .iter()
        .enumerate()
        .skip(app.category_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, (category, allocated))| {
            let spent = state.actual_expenses.get_or_zero(category);

            let ratio = if allocated > Decimal::ZERO {
                (spent / allocated).to_f64().unwrap_or(0.0)
            } else if spent > Decimal::ZERO {
                1.0
            } else {
                0.0
            };

            let color = if ratio > 1.0 {
                theme::RED
            } else if ratio > 0.9 {
                theme::YELLOW
            } else {
                theme::GREEN
            };

            let style = if i == app.category_index {
                theme::selected_style()
            } else if i % 2 == 0 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let bar = create_progress_bar(ratio.min(1.0), 20);
            let display_name = truncate(category, 17);

            ListItem::new(Line::from(vec![
                Span::styled(format!("{display_name:<18}"), style),
                Span::styled(
                    format!(
                        "{:>12}/{:<12} ",
                        format_amount(spent, state.currency),
                        format_amount(allocated, state.currency)
                    ),
                    Style::default().fg(color),
                ),
                Span::styled(bar, Style::default().fg(color)),
                Span::styled(
                    format!(" {:.0}%", ratio * 100.0),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Budget vs Actual ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(list, area);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("Nothing to compare yet", theme::dim_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Calculate an allocation, then record spending with :spend",
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Comparison ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(msg, area);
}

fn create_progress_bar(ratio: f64, width: usize) -> String {
    let filled = (ratio * width as f64) as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
