/*
[INPUT]:  Task selected for output, loading flag, scroll offset
[OUTPUT]: Latest execution panel rendered into Ratatui frame
[POS]:    TUI UI command output view
[UPDATE]: When changing the execution summary or output display
*/

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use taskpanel::output::{ExecutionStatus, NO_HISTORY, OutputView};

use crate::tui::app::AppState;
use crate::tui::runtime::border_style;

fn status_style(status: ExecutionStatus) -> Style {
    match status {
        ExecutionStatus::Failed => Style::default()
            .fg(Color::LightRed)
            .add_modifier(Modifier::BOLD),
        ExecutionStatus::Succeeded => Style::default()
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD),
        ExecutionStatus::RunningOrUnknown => Style::default().fg(Color::Yellow),
    }
}

pub(in crate::tui) fn draw_output(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &AppState,
) {
    let Some(task) = app.view.selected_task_for_output.as_ref() else {
        let widget = Paragraph::new("Select a task on the Dashboard and press [x] to run it.")
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style())
                    .title("Output"),
            );
        frame.render_widget(widget, area);
        return;
    };

    let mut title = format!("Command Output: {}  [b] Back to List", task.name);
    if app.view.loading {
        title.push_str("  running...");
    }

    let latest = match OutputView::from_task(task) {
        OutputView::NoHistory => {
            let widget = Paragraph::new(NO_HISTORY).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style())
                    .title(title),
            );
            frame.render_widget(widget, area);
            return;
        }
        OutputView::Latest(latest) => latest,
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(area);

    let label = Style::default().add_modifier(Modifier::BOLD);
    let summary = vec![
        Line::from(vec![
            Span::styled("Status: ", label),
            Span::styled(latest.status.to_string(), status_style(latest.status)),
        ]),
        Line::from(vec![
            Span::styled("Start:  ", label),
            Span::raw(latest.started.clone()),
        ]),
        Line::from(vec![
            Span::styled("End:    ", label),
            Span::raw(latest.ended.clone()),
        ]),
    ];
    let summary_widget = Paragraph::new(summary).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(title),
    );
    frame.render_widget(summary_widget, layout[0]);

    let output_widget = Paragraph::new(latest.output.clone())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title("Latest Execution Output"),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.output_scroll, 0));
    frame.render_widget(output_widget, layout[1]);
}
