use crate::editor::{FieldEditorStore, FieldSlot, FieldType, FieldValue, FormMode};
use crate::widgets::chrome::panel_block;
use ratatui::prelude::*;
use ratatui::widgets::*;

/// Lines shown for a read-only textarea before folding.
pub const TEXTAREA_FOLD_LINES: usize = 3;

pub fn checkbox_checked(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "1" | "on" | "x"
    )
}

/// Per-row rendering inputs that come from the widget rather than the store.
#[derive(Clone, Copy, Debug, Default)]
pub struct RowCtx {
    pub focused: bool,
    pub editing: bool,
    pub mode: FormMode,
    pub selected_mark: bool,
    pub item_cursor: usize,
    pub cursor_on: bool,
}

fn value_style(ctx: &RowCtx) -> Style {
    if ctx.focused {
        if ctx.editing {
            crate::theme::text_editing_bold()
        } else {
            crate::theme::text_active_bold()
        }
    } else if ctx.editing {
        crate::theme::text_editing()
    } else {
        Style::default()
    }
}

fn prefix(slot: &FieldSlot, ctx: &RowCtx) -> Vec<Span<'static>> {
    let sel = if ctx.focused { '›' } else { ' ' };
    let mut spans = vec![Span::raw(format!("{sel} "))];
    if ctx.mode.selection_mode {
        let mark = if ctx.selected_mark { "[x] " } else { "[ ] " };
        spans.push(Span::styled(mark, crate::theme::text_accent()));
    }
    spans.push(Span::raw(format!("{}: ", slot.label)));
    spans
}

fn hint(slot: &FieldSlot, ctx: &RowCtx) -> Option<Span<'static>> {
    if !ctx.focused || ctx.mode.edit_mode || ctx.mode.selection_mode {
        return None;
    }
    let text = if ctx.editing {
        match slot.resolved.kind {
            FieldType::Textarea => format!("   Ctrl+S Save {} • Esc Cancel", slot.label),
            FieldType::ListInput => format!("   Enter Add/Save {} • Del Remove • Esc Cancel", slot.label),
            _ => format!("   Enter Save {} • Esc Cancel", slot.label),
        }
    } else {
        "   e Edit".to_string()
    };
    Some(Span::styled(text, crate::theme::text_muted()))
}

fn empty_marker() -> Span<'static> {
    Span::styled("—", crate::theme::text_muted())
}

/// Builds the lines for one field: read-only presentation or editable control.
pub fn field_lines(slot: &FieldSlot, ctx: &RowCtx) -> Vec<Line<'static>> {
    let style = value_style(ctx);
    let mut head = prefix(slot, ctx);
    let mut extra: Vec<Line<'static>> = Vec::new();
    let scalar = slot.draft.as_scalar().unwrap_or_default().to_string();
    match (&slot.resolved.kind, &slot.draft) {
        (_, FieldValue::List(items)) => {
            if items.is_empty() && !ctx.editing {
                head.push(empty_marker());
            }
            let cursor = ctx.item_cursor.min(items.len().saturating_sub(1));
            for (i, item) in items.iter().enumerate() {
                let tag_style = if ctx.editing && ctx.focused && i == cursor {
                    crate::theme::list_cursor_style()
                } else {
                    crate::theme::text_tag()
                };
                head.push(Span::styled(format!("[{item}]"), tag_style));
                head.push(Span::raw(" "));
            }
            if ctx.editing {
                let mut pending = slot.pending.clone();
                if ctx.focused && ctx.cursor_on {
                    pending.push('▏');
                }
                extra.push(Line::from(vec![
                    Span::styled("    + ", crate::theme::text_muted()),
                    Span::styled(pending, style),
                ]));
            }
        }
        (FieldType::Select, _) => {
            if ctx.editing {
                let pos = slot
                    .resolved
                    .option_index(&scalar)
                    .map(|i| format!(" ({}/{})", i + 1, slot.resolved.options.len()))
                    .unwrap_or_else(|| format!(" (–/{})", slot.resolved.options.len()));
                head.push(Span::styled(format!("‹ {scalar} ›"), style));
                head.push(Span::styled(pos, crate::theme::text_muted()));
            } else if scalar.is_empty() {
                head.push(empty_marker());
            } else {
                head.push(Span::styled(scalar, style));
            }
        }
        (FieldType::Radio, _) => {
            if ctx.editing {
                for opt in &slot.resolved.options {
                    let on = *opt == scalar;
                    let mark = if on { "(•)" } else { "( )" };
                    let st = if on { style } else { Style::default() };
                    head.push(Span::styled(format!("{mark} {opt}  "), st));
                }
            } else if scalar.is_empty() {
                head.push(empty_marker());
            } else {
                head.push(Span::styled(scalar, style));
            }
        }
        (FieldType::Checkbox, _) => {
            let on = checkbox_checked(&scalar);
            if ctx.editing {
                let mark = if on { "[x]" } else { "[ ]" };
                head.push(Span::styled(mark.to_string(), style));
            } else {
                head.push(Span::styled(if on { "Yes" } else { "No" }, style));
            }
        }
        (FieldType::Textarea, _) => {
            let body: Vec<String> = if scalar.is_empty() {
                Vec::new()
            } else {
                scalar.lines().map(|l| l.to_string()).collect()
            };
            if body.is_empty() {
                head.push(empty_marker());
            }
            let shown = if ctx.editing {
                body.len()
            } else {
                body.len().min(TEXTAREA_FOLD_LINES)
            };
            for bl in body.iter().take(shown) {
                extra.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(bl.clone(), style),
                ]));
            }
            if body.len() > shown {
                let more = body.len() - shown;
                extra.push(Line::from(Span::styled(
                    format!(
                        "    … ({} more line{})",
                        more,
                        if more == 1 { "" } else { "s" }
                    ),
                    crate::theme::text_muted(),
                )));
            }
        }
        (FieldType::Text, _) | (FieldType::ListInput, _) => {
            if ctx.editing {
                let mut val = scalar;
                if ctx.focused && ctx.cursor_on {
                    val.push('▏');
                }
                head.push(Span::styled(val, style));
            } else if scalar.is_empty() {
                head.push(empty_marker());
            } else {
                head.push(Span::styled(scalar, style));
            }
        }
    }
    if let Some(h) = hint(slot, ctx) {
        head.push(h);
    }
    let mut lines = vec![Line::from(head)];
    lines.extend(extra);
    lines
}

/// Keeps the focused row's first line inside a viewport of `height` lines.
pub(crate) fn scroll_offset(focus_start: usize, focus_len: usize, height: usize) -> usize {
    if height == 0 {
        return 0;
    }
    let focus_end = focus_start + focus_len.max(1);
    if focus_end <= height {
        0
    } else if focus_len >= height {
        focus_start
    } else {
        focus_end - height
    }
}

pub fn draw_form(
    f: &mut Frame,
    area: Rect,
    title: &str,
    store: &FieldEditorStore,
    focus: usize,
    item_cursor: usize,
    cursor_on: bool,
) {
    let mode = store.mode();
    let mut lines: Vec<Line> = Vec::new();
    let mut focus_start = 0usize;
    let mut focus_len = 1usize;
    for (i, slot) in store.fields().iter().enumerate() {
        let ctx = RowCtx {
            focused: i == focus,
            editing: store.is_rendered_editing(&slot.name),
            mode,
            selected_mark: store.is_selected(&slot.name),
            item_cursor: if i == focus { item_cursor } else { 0 },
            cursor_on,
        };
        let row = field_lines(slot, &ctx);
        if i == focus {
            focus_start = lines.len();
            focus_len = row.len();
        }
        lines.extend(row);
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "(no fields)",
            crate::theme::text_muted(),
        )));
    }
    let block = panel_block(title, true);
    let inner_h = block.inner(area).height as usize;
    let offset = scroll_offset(focus_start, focus_len, inner_h);
    let p = Paragraph::new(lines)
        .block(block)
        .scroll((offset.min(u16::MAX as usize) as u16, 0));
    f.render_widget(p, area);
}
