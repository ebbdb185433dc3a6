use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use missions::ErrorKind;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::{
    action::{Action, PopupResult},
    pages::Page,
    state::{MissionsState, SubmitOutcome},
    tasks::TaskRunnerHandle,
    tui::{EventResponse, Frame},
};

const CARD_WIDTH: u16 = 30;
const CARD_HEIGHT: u16 = 7;

/// The mission board: the list rendered as cards, sort controls, and the
/// three modal flows (create, edit, delete-confirm).
///
/// All transitions live in [`MissionsState`]; this type is the glue between
/// key events, the task runner, and the drawing code.
pub struct MissionsPage {
    pub state: MissionsState,
    runner: Option<TaskRunnerHandle>,
}

impl MissionsPage {
    pub fn new() -> Self {
        Self {
            state: MissionsState::new(),
            runner: None,
        }
    }

    /// Issue a list fetch for the current sort configuration. The sequence
    /// number ties the eventual completion back to this request.
    fn request_refresh(&mut self) {
        if let Some(runner) = &self.runner {
            let seq = self.state.begin_fetch();
            let sort = self.state.sort;
            let _ = runner.fetch_missions(seq, sort.field, sort.descending);
        }
    }

    fn draw_header(&self, f: &mut Frame<'_>, area: Rect) {
        let cols =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(30)]).split(area);

        let mut title_spans = vec![Span::styled(
            "Solar Rocket Missions",
            Style::default().bold(),
        )];
        if self.state.loading {
            title_spans.push(Span::styled("  ⟳ loading…", Style::default().fg(Color::Yellow)));
        }
        f.render_widget(Paragraph::new(Line::from(title_spans)), cols[0]);

        let arrow = if self.state.sort.descending { "↓" } else { "↑" };
        let sort_label = format!("Sort: {} {}", self.state.sort.field, arrow);
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                sort_label,
                Style::default().fg(Color::Cyan),
            )))
            .alignment(Alignment::Right),
            cols[1],
        );
    }

    fn draw_cards(&self, f: &mut Frame<'_>, area: Rect) {
        let Some(missions) = self.state.missions.as_ref() else {
            return;
        };

        let cols = ((area.width / (CARD_WIDTH + 1)).max(1)) as usize;
        let rows = ((area.height / CARD_HEIGHT).max(1)) as usize;
        let per_page = cols * rows;
        let grid_page = self.state.selected / per_page;
        let start = grid_page * per_page;

        for (index, mission) in missions.iter().enumerate().skip(start).take(per_page) {
            let slot = index - start;
            let col = (slot % cols) as u16;
            let row = (slot / cols) as u16;
            let x = area.x + col * (CARD_WIDTH + 1);
            let y = area.y + row * CARD_HEIGHT;
            if x + CARD_WIDTH > area.x + area.width || y + CARD_HEIGHT > area.y + area.height {
                continue;
            }
            let card = Rect::new(x, y, CARD_WIDTH, CARD_HEIGHT);

            let selected = index == self.state.selected;
            let block = Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(if selected {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::DarkGray)
                })
                .title(Span::styled(
                    truncate(&mission.title, CARD_WIDTH as usize - 4),
                    Style::default().bold(),
                ));
            let inner = block.inner(card);
            f.render_widget(block, card);

            let body = vec![
                Line::from(Span::styled(
                    mission.launch.date.format("%a %b %d %Y").to_string(),
                    Style::default().fg(Color::Gray),
                )),
                Line::raw(""),
                Line::from(Span::raw(truncate(&mission.operator, inner.width as usize))),
            ];
            f.render_widget(Paragraph::new(body), inner);
        }

        // grid pagination indicator
        if missions.len() > per_page {
            let pages = missions.len().div_ceil(per_page);
            let label = format!("card page {}/{}", grid_page + 1, pages);
            let rect = Rect {
                x: area.x,
                y: area.y + area.height.saturating_sub(1),
                width: area.width,
                height: 1,
            };
            f.render_widget(
                Paragraph::new(Span::styled(label, Style::default().fg(Color::DarkGray)))
                    .alignment(Alignment::Right),
                rect,
            );
        }
    }

    fn draw_placeholder(&self, f: &mut Frame<'_>, area: Rect, text: &str) {
        let rect = Rect {
            x: area.x,
            y: area.y + area.height / 2,
            width: area.width,
            height: 1,
        };
        f.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(Color::Gray)))
                .alignment(Alignment::Center),
            rect,
        );
    }
}

impl Default for MissionsPage {
    fn default() -> Self {
        Self::new()
    }
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        value.to_string()
    } else {
        let kept: String = value.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

impl Page for MissionsPage {
    fn name(&self) -> &'static str {
        "missions"
    }

    fn register_task_runner(&mut self, runner: TaskRunnerHandle) -> Result<()> {
        self.runner = Some(runner);
        Ok(())
    }

    fn on_enter(&mut self) -> Result<()> {
        self.request_refresh();
        Ok(())
    }

    fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<EventResponse<Action>>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('z') => Ok(Some(EventResponse::Stop(Action::Suspend))),
                KeyCode::Char('c') => Ok(Some(EventResponse::Stop(Action::Quit))),
                _ => Ok(None),
            };
        }
        let action = match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('n') => Some(Action::OpenCreate),
            KeyCode::Char('e') | KeyCode::Enter => self
                .state
                .selected_mission()
                .map(|mission| Action::OpenEdit(mission.clone())),
            KeyCode::Char('d') | KeyCode::Delete => {
                self.state.selected_mission().map(|mission| Action::OpenDelete {
                    id: mission.id.clone(),
                    title: mission.title.clone(),
                })
            }
            KeyCode::Char('s') => Some(Action::CycleSortField),
            KeyCode::Char('o') => Some(Action::ToggleSortOrder),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('w') => Some(Action::Navigate(1)),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Right | KeyCode::Char('l') => {
                self.state.select_next();
                Some(Action::Render)
            }
            KeyCode::Up | KeyCode::Char('k') | KeyCode::Left | KeyCode::Char('h') => {
                self.state.select_prev();
                Some(Action::Render)
            }
            KeyCode::Esc if self.state.toast.is_some() => Some(Action::ClearError),
            _ => None,
        };
        Ok(action.map(EventResponse::Stop))
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                self.state.tick();
                Ok(None)
            }
            Action::Refresh => {
                self.request_refresh();
                Ok(None)
            }
            Action::ClearError => {
                self.state.dismiss_toast();
                Ok(None)
            }
            Action::OpenCreate => {
                self.state.open_create();
                Ok(None)
            }
            Action::OpenEdit(mission) => {
                self.state.open_edit(&mission);
                Ok(None)
            }
            Action::OpenDelete { id, title } => {
                self.state.open_delete(id, title);
                Ok(None)
            }
            Action::ClosePopup => {
                self.state.close_dialog();
                Ok(None)
            }
            Action::PopupResult(PopupResult::Cancelled) => {
                self.state.close_dialog();
                Ok(None)
            }
            Action::PopupResult(PopupResult::FormSubmitted(draft)) => {
                match self.state.submit_form(&draft) {
                    SubmitOutcome::Invalid(message) => {
                        self.state.show_error(ErrorKind::Validation, message);
                    }
                    SubmitOutcome::Create(input) => {
                        if let Some(runner) = &self.runner {
                            let _ = runner.create_mission(input);
                        }
                    }
                    SubmitOutcome::Edit { id, input } => {
                        if let Some(runner) = &self.runner {
                            let _ = runner.edit_mission(id, input);
                        }
                    }
                }
                Ok(None)
            }
            Action::PopupResult(PopupResult::Confirmed) => {
                if let Some(id) = self.state.confirm_delete() {
                    if let Some(runner) = &self.runner {
                        let _ = runner.delete_mission(id);
                    }
                }
                Ok(None)
            }
            Action::CycleSortField => {
                self.state.cycle_sort_field();
                Ok(Some(Action::Refresh))
            }
            Action::ToggleSortOrder => {
                self.state.toggle_sort_order();
                Ok(Some(Action::Refresh))
            }
            Action::MissionsLoaded { seq, missions } => {
                self.state.apply_loaded(seq, missions);
                Ok(None)
            }
            Action::MissionsFailed { seq, kind, message } => {
                self.state.apply_failed(seq, kind, message);
                Ok(None)
            }
            // Exactly one refetch after any successful mutation.
            Action::MutationSucceeded(_) => Ok(Some(Action::Refresh)),
            Action::MutationFailed { kind, message } => {
                self.state.show_error(kind, message);
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        let layout = Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).split(area);
        self.draw_header(f, layout[0]);

        match self.state.missions.as_ref() {
            None => {
                let text = if self.state.loading {
                    "Loading missions…"
                } else {
                    "No data."
                };
                self.draw_placeholder(f, layout[1], text);
            }
            Some(missions) if missions.is_empty() => {
                self.draw_placeholder(f, layout[1], "No missions yet — press n to create one.");
            }
            Some(_) => self.draw_cards(f, layout[1]),
        }
        Ok(())
    }

    fn hint_line(&self) -> &'static str {
        "n: New  e: Edit  d: Delete  s: Sort  o: Order  r: Refresh  w: Weather  q: Quit"
    }

    fn toast(&self) -> Option<String> {
        self.state.toast.as_ref().map(|toast| {
            let tag = match toast.kind {
                ErrorKind::Network => "network",
                ErrorKind::Server => "server",
                ErrorKind::Decode => "decode",
                ErrorKind::Validation => "input",
            };
            format!("[{tag}] {}", toast.message)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Dialog, MissionDraft};

    fn page() -> MissionsPage {
        MissionsPage::new()
    }

    #[test]
    fn sort_actions_trigger_a_refetch() {
        let mut p = page();
        let follow_up = p.update(Action::CycleSortField).unwrap();
        assert_eq!(follow_up, Some(Action::Refresh));
        let follow_up = p.update(Action::ToggleSortOrder).unwrap();
        assert_eq!(follow_up, Some(Action::Refresh));
        assert!(p.state.sort.descending);
    }

    #[test]
    fn successful_mutation_requests_exactly_one_refetch() {
        let mut p = page();
        let follow_up = p
            .update(Action::MutationSucceeded(crate::action::MutationKind::Create))
            .unwrap();
        assert_eq!(follow_up, Some(Action::Refresh));
    }

    #[test]
    fn failed_mutation_surfaces_a_toast_and_no_refetch() {
        let mut p = page();
        let follow_up = p
            .update(Action::MutationFailed {
                kind: ErrorKind::Server,
                message: "rejected".to_string(),
            })
            .unwrap();
        assert_eq!(follow_up, None);
        assert!(p.toast().unwrap().contains("rejected"));
    }

    #[test]
    fn invalid_submission_keeps_the_dialog_and_shows_input_error() {
        let mut p = page();
        p.update(Action::OpenCreate).unwrap();
        let follow_up = p
            .update(Action::PopupResult(PopupResult::FormSubmitted(
                MissionDraft {
                    title: "Europa Probe".to_string(),
                    operator: "ESA".to_string(),
                    date: String::new(),
                },
            )))
            .unwrap();
        assert_eq!(follow_up, None);
        assert!(matches!(p.state.dialog, Dialog::Create(_)));
        assert!(p.toast().unwrap().starts_with("[input]"));
    }
}
