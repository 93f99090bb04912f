/*
[INPUT]:  Controller, notification ring, log buffer, UI settings
[OUTPUT]: Ratatui-based TUI run loop, rendering, and shared style helpers
[POS]:    TUI runtime loop and shared helpers
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
*/

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event as CrosstermEvent, KeyEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use taskpanel::config::UiConfig;
use taskpanel::logging::LogBufferHandle;
use taskpanel::notify::Level;
use taskpanel::{Controller, NotificationCenter};
use taskpanel_client::TaskClient;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::app::{ActiveModal, AppState, Tab};
use super::events::{KeyOutcome, handle_key_event};
use super::terminal::TerminalGuard;
use super::ui::modal::draw_modal;
use super::ui::*;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);

enum UiEvent {
    Input(CrosstermEvent),
}

pub(super) fn draw_footer(frame: &mut ratatui::Frame, area: Rect, app: &AppState) {
    let key_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let line1 = Line::from(vec![
        Span::styled("[Up/Down]", key_style),
        Span::raw(" Select  "),
        Span::styled("[ [ ] ]", key_style),
        Span::raw(" Page  "),
        Span::styled("[s]", key_style),
        Span::raw(" Sort  "),
        Span::styled("[/]", key_style),
        Span::raw(" Search  "),
        Span::styled("[n]", key_style),
        Span::raw(" New  "),
        Span::styled("[e]", key_style),
        Span::raw(" Edit  "),
        Span::styled("[d]", key_style),
        Span::raw(" Delete  "),
        Span::styled("[x]", key_style),
        Span::raw(" Run"),
    ]);

    let status_style = match app.notifications.latest().map(|n| n.level) {
        Some(Level::Error) => Style::default().fg(Color::LightRed),
        Some(Level::Success) => Style::default().fg(Color::LightGreen),
        _ => Style::default(),
    };
    let line2 = Line::from(vec![
        Span::styled("[r]", key_style),
        Span::raw(" Reload  "),
        Span::styled("[b]", key_style),
        Span::raw(" Back  "),
        Span::styled("[Tab]", key_style),
        Span::raw(" Switch  "),
        Span::styled("[q]", key_style),
        Span::raw(" Quit  "),
        Span::raw("Status: "),
        Span::styled(app.status_message.clone(), status_style),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Hotkeys");
    let text = Text::from(vec![line1, line2]);
    let widget = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

pub(crate) fn border_style() -> Style {
    Style::default().fg(Color::Magenta)
}

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub async fn run_dashboard(
    controller: Controller<TaskClient, NotificationCenter>,
    notifications: NotificationCenter,
    log_buffer: LogBufferHandle,
    ui: &UiConfig,
) -> Result<()> {
    let mut terminal = TerminalGuard::new()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let input_shutdown = CancellationToken::new();
    let input_shutdown_clone = input_shutdown.clone();

    tokio::task::spawn_blocking(move || {
        while !input_shutdown_clone.is_cancelled() {
            if crossterm::event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
                if let Ok(event) = crossterm::event::read() {
                    if event_tx.send(UiEvent::Input(event)).is_err() {
                        break;
                    }
                }
            }
        }
    });

    let mut app = AppState::new(controller, notifications, log_buffer, ui);
    terminal.draw(|frame| draw_ui(frame, &mut app))?;
    app.reload().await;

    let mut tick = tokio::time::interval(ui.tick_interval());
    let mut should_quit = false;

    while !should_quit {
        tokio::select! {
            // redraw so the Logs tab follows new lines
            _ = tick.tick() => {}
            maybe_event = event_rx.recv() => {
                match maybe_event {
                    Some(UiEvent::Input(CrosstermEvent::Key(key)))
                        if key.kind != KeyEventKind::Release =>
                    {
                        match handle_key_event(&mut app, key.code).await {
                            KeyOutcome::Continue => {}
                            KeyOutcome::Quit => should_quit = true,
                            KeyOutcome::Run(task) => {
                                debug!(name = %task.name, "run requested");
                                app.begin_run(&task);
                                terminal.draw(|frame| draw_ui(frame, &mut app))?;
                                app.complete_run(&task).await;
                            }
                        }
                    }
                    Some(_) => {}
                    None => should_quit = true,
                }
            }
        }

        terminal.draw(|frame| draw_ui(frame, &mut app))?;
    }

    input_shutdown.cancel();
    info!("dashboard closed");
    Ok(())
}

fn draw_ui(frame: &mut ratatui::Frame, app: &mut AppState) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(area);

    draw_tabs(frame, layout[1], app.current_tab);

    match app.current_tab {
        Tab::Dashboard => {
            let content = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(5),
                    Constraint::Length(5),
                ])
                .split(layout[0]);
            draw_search_bar(frame, content[0], app);
            draw_task_list(frame, content[1], app);
            draw_task_detail(frame, content[2], app);
        }
        Tab::Output => draw_output(frame, layout[0], app),
        Tab::Logs => draw_logs(frame, layout[0], &app.log_buffer),
    }

    draw_footer(frame, layout[2], app);

    if let Some(active_modal) = app.active_modal.as_ref() {
        let (modal, percent_y) = match active_modal {
            ActiveModal::TaskForm(modal) => (modal.to_modal(), 60),
            ActiveModal::ConfirmDelete(modal) => (modal.to_modal(), 40),
        };
        let modal_area = centered_rect(area, 60, percent_y);
        draw_modal(frame, modal_area, &modal);
    }
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
