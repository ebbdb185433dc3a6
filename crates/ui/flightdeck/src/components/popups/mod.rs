/// Popup components for the Flightdeck TUI.
///
/// This module aggregates the concrete popup types (confirm, mission form)
/// and re-exports the shared helpers and traits from `components/popup.rs`
/// so there is a single source of truth for popup utilities.
pub mod confirm;
pub mod mission_form;

pub use crate::components::popup::{
    centered_rect_fixed, draw_popup_frame, render_backdrop, PopupComponent,
};
