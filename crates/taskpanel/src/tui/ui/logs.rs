/*
[INPUT]:  LogBufferHandle snapshots for UI
[OUTPUT]: Log panel rendered into Ratatui frame
[POS]:    TUI UI logs panel rendering
[UPDATE]: When changing how captured logs are shown
*/

use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use taskpanel::logging::LogBufferHandle;

use crate::tui::runtime::border_style;

pub(in crate::tui) fn draw_logs(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    buffer: &LogBufferHandle,
) {
    let lines = {
        let guard = buffer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.snapshot()
    };
    // tail: newest lines stay visible
    let available = area.height.saturating_sub(2) as usize;
    let start = lines.len().saturating_sub(available);

    let text = lines[start..]
        .iter()
        .map(|line| Line::from(Span::raw(line.clone())))
        .collect::<Vec<_>>();
    let log_widget = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(format!("Logs ({})", lines.len())),
    );
    frame.render_widget(log_widget, area);
}
