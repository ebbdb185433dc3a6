use color_eyre::Result;
use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::{
    action::{Action, PopupResult},
    components::{Component, PopupComponent},
    state::MissionDraft,
    tui::{EventResponse, Frame},
};

use super::draw_popup_frame;

const FIELD_LABELS: [&str; 3] = ["Title", "Operator", "Launch date (RFC 3339 or YYYY-MM-DD)"];

/// Modal form for the create and edit flows: three text fields, inline
/// validation, and the usual submit/cancel lifecycle.
///
/// - Tab/Down and BackTab/Up move between fields
/// - Enter validates; on success it emits
///   `Action::PopupResult(FormSubmitted(draft))`, on failure it shows the
///   error and stays open
/// - Esc cancels without emitting a draft
///
/// Each popup instance owns its fields, so abandoning one flow can never
/// leak half-typed values into the next.
pub struct MissionFormPopup {
    title: String,
    inputs: [Input; 3],
    focus: usize,
    error: Option<String>,
    min_width: u16,
    min_height: u16,
}

impl MissionFormPopup {
    /// Empty form for the create flow.
    pub fn create() -> Self {
        Self::with_draft("New Mission", MissionDraft::default())
    }

    /// Form pre-filled from the record being edited.
    pub fn edit(draft: MissionDraft) -> Self {
        Self::with_draft("Edit Mission", draft)
    }

    fn with_draft(title: &str, draft: MissionDraft) -> Self {
        Self {
            title: title.to_string(),
            inputs: [
                Input::new(draft.title),
                Input::new(draft.operator),
                Input::new(draft.date),
            ],
            focus: 0,
            error: None,
            min_width: 64,
            min_height: 17,
        }
    }

    fn draft(&self) -> MissionDraft {
        MissionDraft {
            title: self.inputs[0].value().to_string(),
            operator: self.inputs[1].value().to_string(),
            date: self.inputs[2].value().to_string(),
        }
    }

    fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.inputs.len();
    }

    fn focus_prev(&mut self) {
        self.focus = (self.focus + self.inputs.len() - 1) % self.inputs.len();
    }

    /// Validate and emit the submission, or keep the popup open with an
    /// inline error. A missing launch date never produces a submission.
    fn submit(&mut self) -> Option<Action> {
        let draft = self.draft();
        match draft.validate() {
            Ok(_) => {
                self.error = None;
                Some(Action::PopupResult(PopupResult::FormSubmitted(draft)))
            }
            Err(message) => {
                self.error = Some(message);
                None
            }
        }
    }

    fn field_area(inner: Rect, index: usize) -> Rect {
        // label line + 3-row bordered input per field
        let y = inner.y + (index as u16) * 4;
        Rect {
            x: inner.x,
            y: y + 1,
            width: inner.width,
            height: 3,
        }
    }
}

impl Component for MissionFormPopup {
    fn name(&self) -> &'static str {
        "mission-form"
    }

    fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<EventResponse<Action>>> {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                Ok(Some(EventResponse::Stop(Action::Render)))
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                Ok(Some(EventResponse::Stop(Action::Render)))
            }
            KeyCode::Enter => Ok(self.submit().map(EventResponse::Stop)),
            KeyCode::Esc => Ok(Some(EventResponse::Stop(Action::PopupResult(
                PopupResult::Cancelled,
            )))),
            _ => {
                // let tui-input handle the keystroke; stop propagation so
                // page shortcuts don't fire while typing
                self.inputs[self.focus].handle_event(&CrosstermEvent::Key(key));
                Ok(Some(EventResponse::Stop(Action::Render)))
            }
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::PopupResult(PopupResult::FormSubmitted(_))
            | Action::PopupResult(PopupResult::Cancelled) => Ok(Some(Action::ClosePopup)),
            _ => Ok(None),
        }
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        if area.width < 10 || area.height < 10 {
            return Ok(());
        }

        draw_popup_frame(f, area, &self.title);
        let inner = Rect {
            x: area.x + 2,
            y: area.y + 1,
            width: area.width.saturating_sub(4),
            height: area.height.saturating_sub(2),
        };
        f.render_widget(Clear, inner);

        for (index, label) in FIELD_LABELS.iter().enumerate() {
            let label_rect = Rect {
                x: inner.x,
                y: inner.y + (index as u16) * 4,
                width: inner.width,
                height: 1,
            };
            if Self::field_area(inner, index).bottom() > area.bottom() {
                break;
            }
            let label_style = if index == self.focus {
                Style::default().bold()
            } else {
                Style::default().fg(Color::Gray)
            };
            f.render_widget(
                Paragraph::new(Line::from(Span::styled(*label, label_style))),
                label_rect,
            );

            let box_area = Self::field_area(inner, index);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if index == self.focus {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::DarkGray)
                });
            let box_inner = block.inner(box_area);
            f.render_widget(block, box_area);

            let input = &self.inputs[index];
            let width = box_inner.width.max(1);
            let scroll = input.visual_scroll(width as usize);
            f.render_widget(
                Paragraph::new(input.value()).scroll((0, scroll as u16)),
                box_inner,
            );

            if index == self.focus && box_inner.width > 0 {
                let cursor_col = (input.visual_cursor().saturating_sub(scroll)) as u16;
                f.set_cursor_position((
                    box_inner.x + cursor_col.min(box_inner.width.saturating_sub(1)),
                    box_inner.y,
                ));
            }
        }

        let below_fields = inner.y + FIELD_LABELS.len() as u16 * 4;
        if let Some(error) = &self.error {
            let error_rect = Rect {
                x: inner.x,
                y: below_fields.min(inner.y + inner.height.saturating_sub(1)),
                width: inner.width,
                height: 1,
            };
            f.render_widget(
                Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
                error_rect,
            );
        }

        let hints_y = inner.y + inner.height.saturating_sub(1);
        if hints_y > below_fields {
            let hints = Line::from(vec![
                Span::styled("Tab", Style::default().fg(Color::White)),
                Span::raw(": Next field   "),
                Span::styled("Enter", Style::default().fg(Color::White)),
                Span::raw(": Save   "),
                Span::styled("Esc", Style::default().fg(Color::White)),
                Span::raw(": Cancel"),
            ])
            .fg(Color::DarkGray);
            f.render_widget(
                Paragraph::new(Text::from(hints)),
                Rect {
                    x: inner.x,
                    y: hints_y,
                    width: inner.width,
                    height: 1,
                },
            );
        }

        Ok(())
    }
}

impl PopupComponent for MissionFormPopup {
    fn min_size(&self) -> (u16, u16) {
        (self.min_width, self.min_height)
    }

    fn submit_action(&mut self) -> Option<Action> {
        self.submit()
    }

    fn cancel_action(&mut self) -> Option<Action> {
        Some(Action::PopupResult(PopupResult::Cancelled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_without_a_date_stays_open_and_sends_nothing() {
        let mut popup = MissionFormPopup::edit(MissionDraft {
            title: "Europa Probe".to_string(),
            operator: "ESA".to_string(),
            date: String::new(),
        });

        assert_eq!(popup.submit(), None);
        assert!(popup.error.as_deref().unwrap_or("").contains("launch date"));
    }

    #[test]
    fn submit_with_a_complete_draft_emits_the_values() {
        let mut popup = MissionFormPopup::edit(MissionDraft {
            title: "Europa Probe".to_string(),
            operator: "ESA".to_string(),
            date: "2025-01-01T00:00:00Z".to_string(),
        });

        match popup.submit() {
            Some(Action::PopupResult(PopupResult::FormSubmitted(draft))) => {
                assert_eq!(draft.title, "Europa Probe");
                assert_eq!(draft.operator, "ESA");
                assert_eq!(draft.date, "2025-01-01T00:00:00Z");
            }
            other => panic!("expected a submission, got {other:?}"),
        }
        assert_eq!(popup.error, None);
    }

    #[test]
    fn focus_wraps_around_the_three_fields() {
        let mut popup = MissionFormPopup::create();
        assert_eq!(popup.focus, 0);
        popup.focus_prev();
        assert_eq!(popup.focus, 2);
        popup.focus_next();
        assert_eq!(popup.focus, 0);
    }
}
