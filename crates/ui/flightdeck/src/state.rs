//! View state for the mission board, kept free of any terminal or network
//! concern so every transition is unit-testable.
//!
//! Two deliberate departures from the behavior this console replaces:
//!   - each dialog variant owns its draft (opening seeds it, closing drops
//!     it), so values can never leak between the create and edit flows;
//!   - every list fetch carries a sequence number and completions older
//!     than the newest issued fetch are discarded, making the ordering
//!     guarantee "last request wins" rather than "last response wins".

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use missions::{ErrorKind, Mission, MissionInput, SortField};

/// Toast lifetime in ticks; at the default four ticks per second this is
/// the five seconds the old snackbar stayed up.
pub const TOAST_TICKS: u8 = 20;

/// Unvalidated form values as the user typed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MissionDraft {
    pub title: String,
    pub operator: String,
    pub date: String,
}

impl MissionDraft {
    pub fn from_mission(mission: &Mission) -> Self {
        Self {
            title: mission.title.clone(),
            operator: mission.operator.clone(),
            date: mission
                .launch
                .date
                .to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    /// Check the draft and produce validated input. A missing launch date
    /// blocks the submission; nothing may reach the network without one.
    pub fn validate(&self) -> Result<MissionInput, String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("title is required".to_string());
        }
        let operator = self.operator.trim();
        if operator.is_empty() {
            return Err("operator is required".to_string());
        }
        let date = parse_launch_date(self.date.trim())
            .ok_or_else(|| "launch date is required (RFC 3339 or YYYY-MM-DD)".to_string())?;
        Ok(MissionInput {
            title: title.to_string(),
            operator: operator.to_string(),
            date,
        })
    }
}

/// Accepts RFC 3339 or a bare date (midnight UTC).
pub fn parse_launch_date(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    None
}

/// The currently open dialog. Each variant carries everything the flow
/// needs, pinned at open time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Dialog {
    #[default]
    None,
    Create(MissionDraft),
    Edit { id: String, draft: MissionDraft },
    Delete { id: String, title: String },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortConfig {
    pub field: SortField,
    pub descending: bool,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            field: SortField::Title,
            descending: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub kind: ErrorKind,
    pub ticks_left: u8,
}

/// What a form submission resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Rejected client-side; the dialog stays open and no request is made.
    Invalid(String),
    Create(MissionInput),
    Edit { id: String, input: MissionInput },
}

#[derive(Debug, Default)]
pub struct MissionsState {
    /// `None` until the first fetch completes; afterwards always a full
    /// snapshot as returned by the server, never patched incrementally.
    pub missions: Option<Vec<Mission>>,
    pub selected: usize,
    pub sort: SortConfig,
    pub dialog: Dialog,
    pub toast: Option<Toast>,
    pub loading: bool,
    next_seq: u64,
    latest_seq: u64,
}

impl MissionsState {
    pub fn new() -> Self {
        Self::default()
    }

    // --- list fetches -----------------------------------------------------

    /// Register a new fetch and return its sequence number. Every later
    /// completion is matched against the newest issued number.
    pub fn begin_fetch(&mut self) -> u64 {
        self.next_seq += 1;
        self.latest_seq = self.next_seq;
        self.loading = true;
        self.latest_seq
    }

    /// Replace the snapshot, unless the completion is stale.
    /// Returns whether the result was applied.
    pub fn apply_loaded(&mut self, seq: u64, missions: Vec<Mission>) -> bool {
        if seq != self.latest_seq {
            return false;
        }
        self.loading = false;
        let len = missions.len();
        self.missions = Some(missions);
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
        true
    }

    /// A failed fetch keeps whatever list was loaded before and surfaces
    /// one toast. Stale failures are dropped like stale successes.
    pub fn apply_failed(&mut self, seq: u64, kind: ErrorKind, message: String) -> bool {
        if seq != self.latest_seq {
            return false;
        }
        self.loading = false;
        self.show_error(kind, message);
        true
    }

    // --- dialogs ----------------------------------------------------------

    pub fn open_create(&mut self) {
        self.dialog = Dialog::Create(MissionDraft::default());
    }

    pub fn open_edit(&mut self, mission: &Mission) {
        self.dialog = Dialog::Edit {
            id: mission.id.clone(),
            draft: MissionDraft::from_mission(mission),
        };
    }

    pub fn open_delete(&mut self, id: String, title: String) {
        self.dialog = Dialog::Delete { id, title };
    }

    /// Drop the dialog and its draft.
    pub fn close_dialog(&mut self) {
        self.dialog = Dialog::None;
    }

    /// Resolve a form submission against the open dialog. On success the
    /// dialog closes; on validation failure it stays open untouched.
    pub fn submit_form(&mut self, draft: &MissionDraft) -> SubmitOutcome {
        match &self.dialog {
            Dialog::Create(_) => match draft.validate() {
                Ok(input) => {
                    self.close_dialog();
                    SubmitOutcome::Create(input)
                }
                Err(message) => SubmitOutcome::Invalid(message),
            },
            Dialog::Edit { id, .. } => match draft.validate() {
                Ok(input) => {
                    let id = id.clone();
                    self.close_dialog();
                    SubmitOutcome::Edit { id, input }
                }
                Err(message) => SubmitOutcome::Invalid(message),
            },
            Dialog::None | Dialog::Delete { .. } => {
                SubmitOutcome::Invalid("no form dialog open".to_string())
            }
        }
    }

    /// Resolve a delete confirmation: yields the identifier pinned at
    /// open-delete time, regardless of what the list looks like now.
    pub fn confirm_delete(&mut self) -> Option<String> {
        if let Dialog::Delete { id, .. } = &self.dialog {
            let id = id.clone();
            self.close_dialog();
            Some(id)
        } else {
            None
        }
    }

    // --- error toast ------------------------------------------------------

    pub fn show_error(&mut self, kind: ErrorKind, message: String) {
        self.toast = Some(Toast {
            message,
            kind,
            ticks_left: TOAST_TICKS,
        });
    }

    pub fn dismiss_toast(&mut self) {
        self.toast = None;
    }

    /// Count down the toast; clears it when the time is up.
    pub fn tick(&mut self) {
        if let Some(toast) = &mut self.toast {
            toast.ticks_left = toast.ticks_left.saturating_sub(1);
            if toast.ticks_left == 0 {
                self.toast = None;
            }
        }
    }

    // --- sort & selection -------------------------------------------------

    pub fn cycle_sort_field(&mut self) {
        self.sort.field = self.sort.field.next();
    }

    pub fn toggle_sort_order(&mut self) {
        self.sort.descending = !self.sort.descending;
    }

    pub fn select_next(&mut self) {
        if let Some(missions) = &self.missions {
            if !missions.is_empty() && self.selected + 1 < missions.len() {
                self.selected += 1;
            }
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_mission(&self) -> Option<&Mission> {
        self.missions.as_ref()?.get(self.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use missions::Launch;
    use pretty_assertions::assert_eq;

    fn mission(id: &str, title: &str, operator: &str) -> Mission {
        Mission {
            id: id.to_string(),
            title: title.to_string(),
            operator: operator.to_string(),
            launch: Launch {
                date: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            },
        }
    }

    fn draft(title: &str, operator: &str, date: &str) -> MissionDraft {
        MissionDraft {
            title: title.to_string(),
            operator: operator.to_string(),
            date: date.to_string(),
        }
    }

    #[test]
    fn draft_without_date_fails_validation() {
        let err = draft("Europa Probe", "ESA", "").validate().unwrap_err();
        assert!(err.contains("launch date"));
    }

    #[test]
    fn draft_accepts_rfc3339_and_bare_dates() {
        let input = draft("Europa Probe", "ESA", "2025-01-01T00:00:00Z")
            .validate()
            .unwrap();
        assert_eq!(input.date.to_rfc3339(), "2025-01-01T00:00:00+00:00");

        let input = draft("Europa Probe", "ESA", "2025-01-01").validate().unwrap();
        assert_eq!(input.date.to_rfc3339(), "2025-01-01T00:00:00+00:00");
    }

    #[test]
    fn create_submission_without_date_keeps_the_dialog_open() {
        let mut state = MissionsState::new();
        state.open_create();

        let outcome = state.submit_form(&draft("Europa Probe", "ESA", ""));

        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        assert!(matches!(state.dialog, Dialog::Create(_)));
    }

    #[test]
    fn valid_create_submission_closes_the_dialog() {
        let mut state = MissionsState::new();
        state.open_create();

        let outcome = state.submit_form(&draft("Europa Probe", "ESA", "2025-01-01T00:00:00Z"));

        match outcome {
            SubmitOutcome::Create(input) => {
                assert_eq!(input.title, "Europa Probe");
                assert_eq!(input.operator, "ESA");
            }
            other => panic!("expected Create, got {other:?}"),
        }
        assert_eq!(state.dialog, Dialog::None);
    }

    #[test]
    fn edit_seeds_its_own_draft_from_the_record() {
        let mut state = MissionsState::new();
        state.open_edit(&mission("m-1", "Ares 3", "NASA"));

        match &state.dialog {
            Dialog::Edit { id, draft } => {
                assert_eq!(id, "m-1");
                assert_eq!(draft.title, "Ares 3");
                assert_eq!(draft.operator, "NASA");
                assert_eq!(draft.date, "2025-01-01T00:00:00Z");
            }
            other => panic!("expected Edit dialog, got {other:?}"),
        }
    }

    #[test]
    fn drafts_do_not_leak_between_flows() {
        let mut state = MissionsState::new();

        // type into the create form, then abandon it
        state.open_create();
        if let Dialog::Create(draft) = &mut state.dialog {
            draft.title = "half-typed".to_string();
        }
        state.close_dialog();

        // the edit flow sees only the record, the create flow a blank slate
        state.open_edit(&mission("m-1", "Ares 3", "NASA"));
        if let Dialog::Edit { draft, .. } = &state.dialog {
            assert_eq!(draft.title, "Ares 3");
        } else {
            panic!("expected Edit dialog");
        }
        state.open_create();
        assert_eq!(state.dialog, Dialog::Create(MissionDraft::default()));
    }

    #[test]
    fn delete_uses_the_id_pinned_at_open_time() {
        let mut state = MissionsState::new();
        let seq = state.begin_fetch();
        state.apply_loaded(seq, vec![mission("m-1", "Ares 3", "NASA")]);

        state.open_delete("m-1".to_string(), "Ares 3".to_string());

        // the list changes between open and confirm
        let seq = state.begin_fetch();
        state.apply_loaded(seq, vec![mission("m-2", "Artemis", "NASA")]);

        assert_eq!(state.confirm_delete(), Some("m-1".to_string()));
        assert_eq!(state.dialog, Dialog::None);
    }

    #[test]
    fn stale_fetch_results_are_discarded() {
        let mut state = MissionsState::new();
        let first = state.begin_fetch();
        let second = state.begin_fetch();

        // the superseded response arrives late
        assert!(!state.apply_loaded(first, vec![mission("m-1", "Old", "X")]));
        assert_eq!(state.missions, None);
        assert!(state.loading);

        assert!(state.apply_loaded(second, vec![mission("m-2", "New", "Y")]));
        assert_eq!(state.missions.as_ref().unwrap()[0].id, "m-2");
        assert!(!state.loading);
    }

    #[test]
    fn stale_failures_are_discarded_too() {
        let mut state = MissionsState::new();
        let first = state.begin_fetch();
        let second = state.begin_fetch();

        assert!(!state.apply_failed(first, ErrorKind::Network, "late".to_string()));
        assert!(state.toast.is_none());

        assert!(state.apply_failed(second, ErrorKind::Network, "down".to_string()));
        assert!(state.toast.is_some());
    }

    #[test]
    fn fetch_failure_keeps_the_previous_list() {
        let mut state = MissionsState::new();
        let seq = state.begin_fetch();
        state.apply_loaded(seq, vec![mission("m-1", "Ares 3", "NASA")]);

        let seq = state.begin_fetch();
        state.apply_failed(seq, ErrorKind::Network, "connection refused".to_string());

        assert_eq!(state.missions.as_ref().unwrap().len(), 1);
        let toast = state.toast.as_ref().unwrap();
        assert_eq!(toast.kind, ErrorKind::Network);
        assert_eq!(toast.ticks_left, TOAST_TICKS);
    }

    #[test]
    fn loaded_snapshot_replaces_the_previous_one_wholesale() {
        let mut state = MissionsState::new();
        let seq = state.begin_fetch();
        state.apply_loaded(
            seq,
            vec![mission("m-1", "A", "X"), mission("m-2", "B", "Y")],
        );
        state.selected = 1;

        let seq = state.begin_fetch();
        state.apply_loaded(seq, vec![mission("m-3", "C", "Z")]);

        let missions = state.missions.as_ref().unwrap();
        assert_eq!(missions.len(), 1);
        assert_eq!(missions[0].id, "m-3");
        // selection clamped to the new snapshot
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn toast_ticks_down_and_clears() {
        let mut state = MissionsState::new();
        state.show_error(ErrorKind::Server, "rejected".to_string());
        for _ in 0..TOAST_TICKS {
            state.tick();
        }
        assert!(state.toast.is_none());
    }

    #[test]
    fn sort_controls_mutate_the_pair_passed_to_fetches() {
        let mut state = MissionsState::new();
        assert_eq!(state.sort, SortConfig::default());

        state.toggle_sort_order();
        assert!(state.sort.descending);
        assert_eq!(state.sort.field, SortField::Title);

        state.cycle_sort_field();
        assert_eq!(state.sort.field, SortField::Date);
        assert!(state.sort.descending);
    }

    #[test]
    fn selection_stays_within_the_list() {
        let mut state = MissionsState::new();
        state.select_next(); // no list yet
        assert_eq!(state.selected, 0);

        let seq = state.begin_fetch();
        state.apply_loaded(
            seq,
            vec![mission("m-1", "A", "X"), mission("m-2", "B", "Y")],
        );
        state.select_next();
        state.select_next();
        assert_eq!(state.selected, 1);
        state.select_prev();
        state.select_prev();
        assert_eq!(state.selected, 0);
    }
}
