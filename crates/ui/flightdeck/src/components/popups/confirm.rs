use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};

use crate::{
    action::{Action, PopupResult},
    components::{Component, PopupComponent},
    tui::{EventResponse, Frame},
};

use super::draw_popup_frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Ok,
    Cancel,
}

/// Modal confirmation popup with selectable OK/Cancel buttons.
///
/// - Arrow Left/Right or Tab/BackTab: switch selected button
/// - Enter: submit (emits `Action::PopupResult` with Confirmed/Cancelled)
/// - Esc: cancel (emits `Action::PopupResult(Cancelled)`)
///
/// The popup only emits the result; the page resolves it against its dialog
/// state, and the popup maps the reinjected result to `Action::ClosePopup`.
pub struct ConfirmPopup {
    title: String,
    question: String,
    ok_label: String,
    cancel_label: String,
    selected: Choice,
    min_width: u16,
    min_height: u16,
}

impl ConfirmPopup {
    pub fn new<T: Into<String>, Q: Into<String>>(title: T, question: Q) -> Self {
        Self {
            title: title.into(),
            question: question.into(),
            ok_label: "OK".into(),
            cancel_label: "Cancel".into(),
            selected: Choice::Cancel,
            min_width: 60,
            min_height: 9,
        }
    }

    pub fn ok_label<S: Into<String>>(mut self, label: S) -> Self {
        self.ok_label = label.into();
        self
    }

    pub fn cancel_label<S: Into<String>>(mut self, label: S) -> Self {
        self.cancel_label = label.into();
        self
    }

    fn confirm_action(&self) -> Action {
        match self.selected {
            Choice::Ok => Action::PopupResult(PopupResult::Confirmed),
            Choice::Cancel => Action::PopupResult(PopupResult::Cancelled),
        }
    }

    fn dismiss_action(&self) -> Action {
        Action::PopupResult(PopupResult::Cancelled)
    }

    fn toggle_selection(&mut self) {
        self.selected = match self.selected {
            Choice::Ok => Choice::Cancel,
            Choice::Cancel => Choice::Ok,
        };
    }

    fn inner_rect(area: Rect) -> Rect {
        Rect {
            x: area.x.saturating_add(1),
            y: area.y.saturating_add(1),
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        }
    }
}

impl Component for ConfirmPopup {
    fn name(&self) -> &'static str {
        "confirm"
    }

    fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<EventResponse<Action>>> {
        let action = match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.toggle_selection();
                None
            }
            KeyCode::Enter => Some(self.confirm_action()),
            KeyCode::Esc => Some(self.dismiss_action()),
            _ => None,
        };
        Ok(action.map(EventResponse::Stop))
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // When the result gets re-injected into the action loop, close
            // the popup and let the page act on the outcome.
            Action::PopupResult(PopupResult::Confirmed)
            | Action::PopupResult(PopupResult::Cancelled) => Ok(Some(Action::ClosePopup)),
            _ => Ok(None),
        }
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        if area.width < 5 || area.height < 5 {
            return Ok(());
        }

        draw_popup_frame(f, area, &self.title);
        let inner = Self::inner_rect(area);

        let mut lines: Vec<Line> = Vec::new();
        for l in self.question.lines() {
            lines.push(Line::from(Span::raw(l)));
        }

        if inner.height >= 3 {
            lines.push(Line::raw(""));
        }

        let selected_style = Style::default().fg(Color::Black).bg(Color::White).bold();
        let unselected_style = Style::default().fg(Color::White).bg(Color::Black);

        let ok_span = Span::styled(
            format!("[ {} ]", self.ok_label),
            if self.selected == Choice::Ok {
                selected_style
            } else {
                unselected_style
            },
        );
        let cancel_span = Span::styled(
            format!("[ {} ]", self.cancel_label),
            if self.selected == Choice::Cancel {
                selected_style
            } else {
                unselected_style
            },
        );

        let spacing = "   ";
        let buttons_len =
            (4 + self.ok_label.len()) + spacing.len() + (4 + self.cancel_label.len());
        let pad = (inner.width as usize).saturating_sub(buttons_len) / 2;
        lines.push(Line::from(vec![
            Span::raw(" ".repeat(pad)),
            ok_span,
            Span::raw(spacing),
            cancel_span,
        ]));

        if inner.height >= 4 {
            lines.push(Line::raw(""));
            let hints = Line::from(vec![
                Span::styled("←/→/Tab", Style::default().fg(Color::White)),
                Span::raw(": Select   "),
                Span::styled("Enter", Style::default().fg(Color::White)),
                Span::raw(": Confirm   "),
                Span::styled("Esc", Style::default().fg(Color::White)),
                Span::raw(": Cancel"),
            ])
            .fg(Color::DarkGray);
            lines.push(hints);
        }

        let para = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true });
        f.render_widget(para, inner);

        Ok(())
    }
}

impl PopupComponent for ConfirmPopup {
    fn min_size(&self) -> (u16, u16) {
        (self.min_width, self.min_height)
    }

    fn submit_action(&mut self) -> Option<Action> {
        Some(self.confirm_action())
    }

    fn cancel_action(&mut self) -> Option<Action> {
        Some(self.dismiss_action())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_the_safe_choice() {
        let popup = ConfirmPopup::new("Delete mission", "Really?");
        assert_eq!(popup.confirm_action(), Action::PopupResult(PopupResult::Cancelled));
    }

    #[test]
    fn enter_on_ok_confirms() {
        let mut popup = ConfirmPopup::new("Delete mission", "Really?");
        popup.toggle_selection();
        assert_eq!(popup.confirm_action(), Action::PopupResult(PopupResult::Confirmed));
    }
}
