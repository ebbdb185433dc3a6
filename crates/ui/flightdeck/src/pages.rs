use color_eyre::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::layout::Rect;
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    action::Action,
    tasks::TaskRunnerHandle,
    tui::{Event, EventResponse, Frame},
};

pub mod missions;
pub mod weather;

pub use self::missions::MissionsPage;
pub use self::weather::WeatherPage;

/// A `Page` composes the widgets of one screen and exposes a lifecycle
/// similar to `Component`, but at the page level. Pages own their view
/// state and issue background work through the task runner.
pub trait Page {
    fn name(&self) -> &'static str;

    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        let _ = tx;
        Ok(())
    }

    fn register_task_runner(&mut self, runner: TaskRunnerHandle) -> Result<()> {
        let _ = runner;
        Ok(())
    }

    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn handle_events(&mut self, event: Event) -> Result<Option<EventResponse<Action>>> {
        let r = match event {
            Event::Key(key_event) => self.handle_key_events(key_event)?,
            Event::Mouse(mouse_event) => self.handle_mouse_events(mouse_event)?,
            _ => None,
        };
        Ok(r)
    }

    fn handle_key_events(&mut self, _key: KeyEvent) -> Result<Option<EventResponse<Action>>> {
        Ok(None)
    }

    fn handle_mouse_events(&mut self, _mouse: MouseEvent) -> Result<Option<EventResponse<Action>>> {
        Ok(None)
    }

    fn update(&mut self, _action: Action) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Draw the page using the provided `Frame` and `area`.
    fn draw(&mut self, frame: &mut Frame<'_>, area: Rect) -> Result<()>;

    /// Called when the page becomes active.
    fn on_enter(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called when the page is leaving / being replaced.
    fn on_exit(&mut self) -> Result<()> {
        Ok(())
    }

    /// Key hints shown in the footer while this page is active.
    fn hint_line(&self) -> &'static str {
        ""
    }

    /// Transient error message to surface in the footer, if any.
    fn toast(&self) -> Option<String> {
        None
    }
}
