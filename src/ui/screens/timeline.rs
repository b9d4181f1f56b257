use chrono::Local;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::alloc::suggested_booking_date;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(state) = &app.state else {
        render_empty(f, area);
        return;
    };

    let today = Local::now().date_naive();

    // Earliest bookings first, so the next deadline is always at the top.
    let mut entries: Vec<(&str, chrono::NaiveDate)> = state
        .allocations
        .categories()
        .map(|category| (category, suggested_booking_date(state.event_date, category)))
        .collect();
    entries.sort_by_key(|(_, date)| *date);

    let items: Vec<ListItem> = entries
        .iter()
        .enumerate()
        .skip(app.category_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, (category, book_by))| {
            let days_left = (*book_by - today).num_days();

            let urgency = if days_left < 0 {
                theme::RED
            } else if days_left <= 30 {
                theme::YELLOW
            } else {
                theme::GREEN
            };

            let when = if days_left < 0 {
                format!("{} days overdue", -days_left)
            } else if days_left == 0 {
                "book today".to_string()
            } else {
                format!("in {days_left} days")
            };

            let style = if i == app.category_index {
                theme::selected_style()
            } else if i % 2 == 0 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let display_name = truncate(category, 17);
            let allocated = state.allocations.get_or_zero(category);

            ListItem::new(Line::from(vec![
                Span::styled(format!("{display_name:<18}"), style),
                Span::styled(
                    format!("{:<16}", book_by.format("%B %-d, %Y")),
                    theme::normal_style(),
                ),
                Span::styled(
                    format!("{when:<18}"),
                    Style::default().fg(urgency).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format_amount(allocated, state.currency),
                    theme::dim_style(),
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
                    " Booking Timeline | wedding {} ",
                    state.event_date.format("%B %-d, %Y")
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
        Line::from(Span::styled("No timeline yet", theme::dim_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Calculate an allocation to see suggested booking dates",
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Timeline ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(msg, area);
}
