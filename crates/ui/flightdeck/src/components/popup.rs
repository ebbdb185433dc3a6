use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Block, Borders, Clear},
};

use crate::{action::Action, components::Component, tui::Frame};

/// Popup extension over `Component` with popup-specific lifecycle hooks.
///
/// Usage from the main loop:
/// 1) Draw the active page as usual
/// 2) If a popup is active:
///    - call `render_backdrop(frame, area)`
///    - compute a centered rect with `centered_rect_fixed(area, width, height)`
///    - draw the popup into that rect
pub trait PopupComponent: Component {
    /// Minimum (width, height) the popup wants; clamped to the page area.
    fn min_size(&self) -> (u16, u16) {
        (60, 10)
    }

    /// Action to emit when the popup is confirmed/submitted (e.g., Enter).
    fn submit_action(&mut self) -> Option<Action> {
        Some(Action::ClosePopup)
    }

    /// Action to emit when the popup is cancelled/closed (e.g., Esc).
    fn cancel_action(&mut self) -> Option<Action> {
        Some(Action::ClosePopup)
    }
}

/// Render a modal-style backdrop that visually separates a popup from the
/// underlying page. Terminals have no real transparency, so a solid dark
/// background stands in for a dim overlay.
pub fn render_backdrop(frame: &mut Frame<'_>, area: Rect) {
    let backdrop = Block::default().style(Style::default().bg(Color::Black));
    frame.render_widget(backdrop, area);
}

/// Compute a centered rectangle with a fixed width/height clamped to the
/// available `area`.
pub fn centered_rect_fixed(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);

    let x = area.x.saturating_add((area.width.saturating_sub(w)) / 2);
    let y = area.y.saturating_add((area.height.saturating_sub(h)) / 2);

    Rect {
        x,
        y,
        width: w,
        height: h,
    }
}

/// Draw a rounded, bordered popup shell with a title, clearing the area so
/// underlying content doesn't bleed through. Returns `area` for chaining.
pub fn draw_popup_frame(frame: &mut Frame<'_>, area: Rect, title: impl Into<String>) -> Rect {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", title.into()))
        .borders(Borders::ALL)
        .border_set(symbols::border::ROUNDED)
        .style(Style::default().fg(Color::White).bg(Color::Black));

    frame.render_widget(block, area);
    area
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_clamps_to_the_available_area() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered_rect_fixed(area, 60, 20);
        assert_eq!(rect, area);
    }

    #[test]
    fn centered_rect_centers_smaller_popups() {
        let area = Rect::new(2, 1, 40, 10);
        let rect = centered_rect_fixed(area, 20, 4);
        assert_eq!(rect, Rect::new(12, 4, 20, 4));
    }
}
