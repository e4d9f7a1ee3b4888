use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::*;

use crate::ui::{AppState, ToastLevel};

pub fn status_spans(state: &AppState) -> Vec<Span<'static>> {
    let mut spans: Vec<Span> = Vec::new();
    let mode = state.store.mode();
    if mode.edit_mode {
        spans.push(Span::styled(
            " EDIT ",
            crate::theme::list_cursor_style(),
        ));
        spans.push(Span::raw(" "));
    }
    if mode.selection_mode {
        spans.push(Span::styled(
            format!(" SELECT {} ", state.store.selected_fields().len()),
            crate::theme::list_cursor_style(),
        ));
        spans.push(Span::raw(" "));
    }
    if state.store.is_dirty() {
        spans.push(Span::styled("● modified ", crate::theme::text_editing()));
    }
    if let Some(msg) = &state.status_text {
        let spinner = ["⠋", "⠙", "⠸", "⠴", "⠦", "⠇"][state.tick as usize % 6];
        spans.push(Span::raw(format!("{spinner} {msg}  ")));
    }
    if let Some(t) = &state.toast {
        let color = crate::theme::toast_color(t.level);
        let tag = match t.level {
            ToastLevel::Success => "[OK]",
            ToastLevel::Error => "[ERROR]",
            ToastLevel::Info => "[INFO]",
        };
        spans.push(Span::styled(
            format!("{tag} "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(t.text.clone(), Style::default().fg(color)));
    } else if let Some(err) = &state.last_error {
        spans.push(Span::styled(
            format!("last save failed: {err}"),
            Style::default().fg(crate::theme::toast_color(ToastLevel::Error)),
        ));
    }
    spans
}

pub fn draw_footer(f: &mut Frame, area: Rect, state: &AppState, help_text: &str) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);
    f.render_widget(Paragraph::new(Line::from(status_spans(state))), rows[0]);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            help_text.to_string(),
            crate::theme::text_muted(),
        ))),
        rows[1],
    );
}
