use missions::{ErrorKind, Mission};
use strum::Display;
use weather::ForecastDay;

use crate::state::MissionDraft;

#[derive(Debug, Clone, PartialEq, Display)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    /// Re-fetch the mission list with the current sort configuration.
    Refresh,
    Error(String),
    ClearError,
    Navigate(usize),

    // Dialog lifecycle. Open* both builds the popup widget (app) and moves
    // the dialog state machine (missions page); ClosePopup reverses both.
    OpenCreate,
    OpenEdit(Mission),
    OpenDelete { id: String, title: String },
    ClosePopup,
    PopupResult(PopupResult),

    // Sort controls; either one triggers a refetch.
    CycleSortField,
    ToggleSortOrder,

    // Background task completions.
    MissionsLoaded { seq: u64, missions: Vec<Mission> },
    MissionsFailed { seq: u64, kind: ErrorKind, message: String },
    MutationSucceeded(MutationKind),
    MutationFailed { kind: ErrorKind, message: String },
    ForecastLoaded(Vec<ForecastDay>),
    ForecastFailed(String),
}

/// Outcome a popup reinjects into the action loop when the user resolves it.
#[derive(Debug, Clone, PartialEq)]
pub enum PopupResult {
    Cancelled,
    /// The mission form was submitted with these (not yet validated) values.
    FormSubmitted(MissionDraft),
    /// The confirmation popup was answered with OK.
    Confirmed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MutationKind {
    Create,
    Edit,
    Delete,
}
