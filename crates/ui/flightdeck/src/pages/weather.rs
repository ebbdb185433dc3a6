use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Span,
    widgets::{Block, Paragraph, Row, Table},
};
use weather::ForecastDay;

use crate::{
    action::Action,
    pages::Page,
    tasks::TaskRunnerHandle,
    tui::{EventResponse, Frame},
};

/// Forecast table for the launch site. The provider's rows are rendered
/// verbatim; nothing is recomputed or reordered client-side.
pub struct WeatherPage {
    days: Option<Vec<ForecastDay>>,
    loading: bool,
    error: Option<String>,
    runner: Option<TaskRunnerHandle>,
}

impl WeatherPage {
    pub fn new() -> Self {
        Self {
            days: None,
            loading: false,
            error: None,
            runner: None,
        }
    }

    fn request_forecast(&mut self) {
        if let Some(runner) = &self.runner {
            self.loading = true;
            self.error = None;
            let _ = runner.fetch_forecast();
        }
    }
}

impl Default for WeatherPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for WeatherPage {
    fn name(&self) -> &'static str {
        "weather"
    }

    fn register_task_runner(&mut self, runner: TaskRunnerHandle) -> Result<()> {
        self.runner = Some(runner);
        Ok(())
    }

    fn on_enter(&mut self) -> Result<()> {
        if self.days.is_none() && !self.loading {
            self.request_forecast();
        }
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
            KeyCode::Char('m') | KeyCode::Esc => Some(Action::Navigate(0)),
            KeyCode::Char('r') => {
                self.request_forecast();
                Some(Action::Render)
            }
            _ => None,
        };
        Ok(action.map(EventResponse::Stop))
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ForecastLoaded(days) => {
                self.days = Some(days);
                self.loading = false;
                Ok(None)
            }
            Action::ForecastFailed(message) => {
                self.loading = false;
                self.error = Some(message);
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        let layout = Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).split(area);

        f.render_widget(
            Paragraph::new(Span::styled(
                "Launch Site Weather",
                Style::default().bold(),
            )),
            layout[0],
        );

        match (&self.days, self.loading) {
            (None, true) => {
                f.render_widget(
                    Paragraph::new(Span::styled(
                        "Loading forecast…",
                        Style::default().fg(Color::Gray),
                    ))
                    .alignment(Alignment::Center),
                    layout[1],
                );
            }
            (None, false) => {
                f.render_widget(
                    Paragraph::new(Span::styled(
                        "No forecast — press r to fetch.",
                        Style::default().fg(Color::Gray),
                    ))
                    .alignment(Alignment::Center),
                    layout[1],
                );
            }
            (Some(days), _) => {
                let header = Row::new(["Date", "Avg °C", "Avg °F", "Condition", "Icon"])
                    .style(Style::default().bold().fg(Color::Cyan))
                    .bottom_margin(1);
                let rows = days.iter().map(|day| {
                    Row::new([
                        day.date.clone(),
                        format!("{:.1}", day.avg_c),
                        format!("{:.1}", day.avg_f),
                        day.condition.clone(),
                        day.icon.clone(),
                    ])
                });
                let table = Table::new(
                    rows,
                    [
                        Constraint::Length(12),
                        Constraint::Length(8),
                        Constraint::Length(8),
                        Constraint::Length(24),
                        Constraint::Fill(1),
                    ],
                )
                .header(header)
                .block(Block::bordered().title(" Forecast "));
                f.render_widget(table, layout[1]);
            }
        }
        Ok(())
    }

    fn hint_line(&self) -> &'static str {
        "r: Refresh  m: Missions  q: Quit"
    }

    fn toast(&self) -> Option<String> {
        self.error.as_ref().map(|message| format!("[weather] {message}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> ForecastDay {
        ForecastDay {
            date: "2025-06-01".to_string(),
            avg_c: 17.4,
            avg_f: 63.3,
            condition: "Partly cloudy".to_string(),
            icon: "//cdn/116.png".to_string(),
        }
    }

    #[test]
    fn loaded_forecast_replaces_the_previous_rows() {
        let mut p = WeatherPage::new();
        p.update(Action::ForecastLoaded(vec![day()])).unwrap();
        assert_eq!(p.days.as_ref().unwrap().len(), 1);
        assert!(!p.loading);
        assert_eq!(p.toast(), None);
    }

    #[test]
    fn failure_keeps_rows_and_surfaces_the_message() {
        let mut p = WeatherPage::new();
        p.update(Action::ForecastLoaded(vec![day()])).unwrap();
        p.update(Action::ForecastFailed("provider down".to_string()))
            .unwrap();
        assert_eq!(p.days.as_ref().unwrap().len(), 1);
        assert_eq!(p.toast().unwrap(), "[weather] provider down");
    }
}
