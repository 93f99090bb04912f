/*
[INPUT]:  AppState tasks, sort order, pagination, search input
[OUTPUT]: Search bar and task table rendered into Ratatui frame
[POS]:    TUI UI task list rendering
[UPDATE]: When changing task table columns or the search bar
*/

use ratatui::layout::Constraint;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use taskpanel::output::{derive_status, format_timestamp};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::app::AppState;
use crate::tui::runtime::{border_style, header_style};

const COMMAND_COLUMN_WIDTH: usize = 40;

/// Cut `text` to `max` display columns, marking the cut with "...".
fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let budget = max.saturating_sub(3);
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str("...");
    out
}

pub(in crate::tui) fn draw_search_bar(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &AppState,
) {
    let (text, style) = if app.search.editing {
        (
            format!("{}_", app.search.query),
            Style::default().fg(Color::Yellow),
        )
    } else if app.search.query.is_empty() {
        (
            "Search by task name  [/]".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (app.search.query.clone(), Style::default())
    };
    let widget = Paragraph::new(Line::from(Span::styled(text, style))).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title("Search"),
    );
    frame.render_widget(widget, area);
}

pub(in crate::tui) fn draw_task_list(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &mut AppState,
) {
    let total = app.view.tasks.len();
    let rows: Vec<Row> = {
        let visible = app.visible_tasks();
        if visible.is_empty() {
            vec![Row::new(vec![Cell::from("No tasks found")])]
        } else {
            visible
                .iter()
                .map(|task| {
                    Row::new(vec![
                        Cell::from(task.name.clone()),
                        Cell::from(truncate_to_width(&task.command, COMMAND_COLUMN_WIDTH)),
                        Cell::from(task.owner.clone()),
                        Cell::from(task.server_name.clone()),
                        Cell::from(task.task_executions.len().to_string()),
                    ])
                })
                .collect()
        }
    };

    let header = Row::new(vec![
        Cell::from(format!("Name{}", app.sort.indicator())),
        Cell::from("Command"),
        Cell::from("Owner"),
        Cell::from("Server"),
        Cell::from("Runs"),
    ])
    .style(header_style());

    let mut title = format!(
        "Tasks ({total}) page {}/{}",
        app.pagination.page() + 1,
        app.pagination.page_count(total)
    );
    if app.view.loading {
        title.push_str(" loading...");
    }

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(20),
            Constraint::Percentage(40),
            Constraint::Percentage(15),
            Constraint::Percentage(17),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(title),
    )
    .row_highlight_style(
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("> ");
    frame.render_stateful_widget(table, area, &mut app.table_state);
}

pub(in crate::tui) fn draw_task_detail(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &AppState,
) {
    let label = Style::default().add_modifier(Modifier::BOLD);
    let lines = match app.selected_task() {
        Some(task) => {
            let last_run = task
                .latest_execution()
                .map(|execution| {
                    format!(
                        "{} ({})",
                        format_timestamp(execution.start_time.as_deref()),
                        derive_status(execution)
                    )
                })
                .unwrap_or_else(|| "never".to_string());
            vec![
                Line::from(vec![
                    Span::styled("ID: ", label),
                    Span::raw(task.id.clone().unwrap_or_else(|| "-".to_string())),
                ]),
                Line::from(vec![
                    Span::styled("Command: ", label),
                    Span::raw(task.command.clone()),
                ]),
                Line::from(vec![Span::styled("Last run: ", label), Span::raw(last_run)]),
            ]
        }
        None => vec![Line::from("No task selected")],
    };
    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title("Details"),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}
