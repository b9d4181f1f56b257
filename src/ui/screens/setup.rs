use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::ui::app::{App, SETUP_CALCULATE};
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Intro
            Constraint::Length(10), // Form fields
            Constraint::Min(3),    // Hint / validation echo
        ])
        .split(area);

    let intro = if app.state.is_some() {
        "Recalculating replaces the current allocation. Spending records are kept"
    } else {
        "Set your budget and location, then Calculate to allocate it"
    };
    let status = Paragraph::new(Line::from(Span::styled(
        intro,
        Style::default().fg(theme::ACCENT),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Wedding Plan ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(status, chunks[0]);

    let budget_display = if app.budget_input.is_empty() {
        "—".to_string()
    } else {
        app.budget_input.clone()
    };

    let fields = [
        ("Total Budget", budget_display),
        ("Currency", app.selected_currency().code().to_string()),
        ("Region", app.selected_region().to_string()),
        ("Locality", app.selected_locality().to_string()),
        ("Wedding Date", app.date_input.clone()),
    ];

    let mut field_items: Vec<ListItem> = fields
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let style = if i == app.setup_field {
                theme::selected_style()
            } else {
                theme::normal_style()
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{label:<16}"),
                    Style::default().fg(theme::TEXT_DIM),
                ),
                Span::styled(value.as_str(), style),
            ]))
        })
        .collect();

    let calc_style = if app.setup_field == SETUP_CALCULATE {
        theme::selected_style().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(theme::GREEN)
            .add_modifier(Modifier::BOLD)
    };
    field_items.push(ListItem::new(Line::from("")));
    field_items.push(ListItem::new(Line::from(Span::styled(
        " Calculate Allocation ",
        calc_style,
    ))));

    let field_list = List::new(field_items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " j/k navigate, +/- change, Enter to edit or calculate ",
                theme::dim_style(),
            )),
    );
    f.render_widget(field_list, chunks[1]);

    let hint = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Allocation percentages come from typical costs in the chosen locality.",
            theme::dim_style(),
        )),
        Line::from(Span::styled(
            "The wedding date drives the vendor booking timeline.",
            theme::dim_style(),
        )),
    ])
    .centered();
    f.render_widget(hint, chunks[2]);
}
