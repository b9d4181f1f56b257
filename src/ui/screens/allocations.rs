use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(state) = &app.state else {
        render_empty(f, area);
        return;
    };

    let total = state.total_budget;
    let items: Vec<ListItem> = state
        .allocations
        .iter()
        .enumerate()
        .skip(app.category_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, (category, amount))| {
            let ratio = if total > Decimal::ZERO {
                (amount / total).to_f64().unwrap_or(0.0).clamp(0.0, 1.0)
            } else {
                0.0
            };

            // Negative allocations come from rebalancing one category past
            // what the others can give up.
            let amount_color = if amount < Decimal::ZERO {
                theme::RED
            } else {
                theme::TEXT
            };

            let style = if i == app.category_index {
                theme::selected_style()
            } else if i % 2 == 0 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let tag = if state.is_custom(category) { "+" } else { " " };
            let bar = create_progress_bar(ratio, 20);
            let display_name = truncate(category, 17);

            ListItem::new(Line::from(vec![
                Span::styled(format!("{tag}{display_name:<18}"), style),
                Span::styled(
                    format!("{:>14} ", format_amount(amount, state.currency)),
                    Style::default().fg(amount_color),
                ),
                Span::styled(bar, Style::default().fg(theme::ACCENT)),
                Span::styled(
                    format!(" {:>5.1}%", ratio * 100.0),
                    Style::default()
                        .fg(theme::TEXT_DIM)
                        .add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(
                    " Allocations | total {} ",
                    format_amount(total, state.currency)
                ),
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
        Line::from(Span::styled("No allocation yet", theme::dim_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Fill out the Setup screen and press Calculate",
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Allocations ",
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
