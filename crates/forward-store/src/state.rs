//! Application state store.
//!
//! [`Store`] is the single source of truth for the user's classes,
//! events, notes, assignments, calendar navigation, and UI flags. It is
//! constructed once at application start (empty or from seed data) and
//! lives for the whole process.
//!
//! Every action is a synchronous mutate-then-notify: the state lock is
//! taken, the mutation applied, the lock released, and a [`StateField`]
//! tag broadcast to subscribers. No two actions interleave mid-update.
//! Actions never return a value; their effect is observable only
//! through the state they mutate.
//!
//! The store never deletes records. Remote deletion (to-dos) is
//! reflected by refetch in the sync layer, not by a store action.

use std::sync::RwLock;

use chrono::{NaiveDate, Utc};
use tokio::sync::broadcast;

use forward_core::defaults::STORE_NOTIFY_CAPACITY;
use forward_core::{
    Assignment, AssignmentPatch, CalendarView, Class, ClassPatch, Event, EventPatch, Note,
    NotePatch, SearchFilterPatch, SearchFilters,
};

/// Tag identifying which slice of state an action changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateField {
    Classes,
    Events,
    Notes,
    Assignments,
    CurrentDate,
    CalendarView,
    SelectedDate,
    SelectedEvent,
    SidebarOpen,
    MobileSidebarOpen,
    SearchOpen,
    SearchFilters,
    Recording,
    FocusMode,
}

/// Calendar navigation state.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarState {
    pub current_date: NaiveDate,
    pub view: CalendarView,
    pub selected_date: Option<NaiveDate>,
    pub selected_event_id: Option<String>,
}

impl Default for CalendarState {
    fn default() -> Self {
        Self {
            current_date: Utc::now().date_naive(),
            view: CalendarView::default(),
            selected_date: None,
            selected_event_id: None,
        }
    }
}

/// Transient UI flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub sidebar_open: bool,
    pub mobile_sidebar_open: bool,
    pub search_open: bool,
    pub search_filters: SearchFilters,
    pub is_recording: bool,
    pub focus_mode_enabled: bool,
}

/// Full state shape held by the store.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub classes: Vec<Class>,
    pub events: Vec<Event>,
    pub notes: Vec<Note>,
    pub assignments: Vec<Assignment>,
    pub calendar: CalendarState,
    pub ui: UiState,
}

/// The application state store.
pub struct Store {
    state: RwLock<AppState>,
    notify: broadcast::Sender<StateField>,
}

impl Store {
    /// Create a store with an empty state shape.
    pub fn new() -> Self {
        Self::with_seed(AppState::default())
    }

    /// Create a store pre-populated with seed data.
    pub fn with_seed(seed: AppState) -> Self {
        let (notify, _) = broadcast::channel(STORE_NOTIFY_CAPACITY);
        Self {
            state: RwLock::new(seed),
            notify,
        }
    }

    /// Subscribe to field-change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<StateField> {
        self.notify.subscribe()
    }

    /// Clone the full current state.
    pub fn snapshot(&self) -> AppState {
        self.state.read().expect("state lock poisoned").clone()
    }

    /// Read a projection of the current state without cloning it all.
    pub fn with_state<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.state.read().expect("state lock poisoned"))
    }

    /// Mutate under the write lock, then notify after the lock is released.
    fn mutate(&self, field: StateField, f: impl FnOnce(&mut AppState)) {
        {
            let mut state = self.state.write().expect("state lock poisoned");
            f(&mut state);
        }
        let _ = self.notify.send(field);
    }

    // ─── Calendar actions ──────────────────────────────────────────────────

    pub fn set_current_date(&self, date: NaiveDate) {
        self.mutate(StateField::CurrentDate, |s| s.calendar.current_date = date);
    }

    pub fn set_calendar_view(&self, view: CalendarView) {
        self.mutate(StateField::CalendarView, |s| s.calendar.view = view);
    }

    pub fn set_selected_date(&self, date: Option<NaiveDate>) {
        self.mutate(StateField::SelectedDate, |s| s.calendar.selected_date = date);
    }

    pub fn set_selected_event(&self, event_id: Option<String>) {
        self.mutate(StateField::SelectedEvent, |s| {
            s.calendar.selected_event_id = event_id;
        });
    }

    // ─── UI actions ────────────────────────────────────────────────────────

    pub fn toggle_sidebar(&self) {
        self.mutate(StateField::SidebarOpen, |s| {
            s.ui.sidebar_open = !s.ui.sidebar_open;
        });
    }

    pub fn toggle_mobile_sidebar(&self) {
        self.mutate(StateField::MobileSidebarOpen, |s| {
            s.ui.mobile_sidebar_open = !s.ui.mobile_sidebar_open;
        });
    }

    pub fn set_search_open(&self, open: bool) {
        self.mutate(StateField::SearchOpen, |s| s.ui.search_open = open);
    }

    /// Shallow-merge a partial filter patch into the existing filters.
    /// An empty patch is a no-op; `query: Some("")` clears only the query.
    pub fn set_search_filters(&self, patch: SearchFilterPatch) {
        self.mutate(StateField::SearchFilters, |s| {
            patch.apply_to(&mut s.ui.search_filters);
        });
    }

    pub fn set_recording(&self, recording: bool) {
        self.mutate(StateField::Recording, |s| s.ui.is_recording = recording);
    }

    pub fn set_focus_mode(&self, enabled: bool) {
        self.mutate(StateField::FocusMode, |s| s.ui.focus_mode_enabled = enabled);
    }

    pub fn toggle_focus_mode(&self) {
        self.mutate(StateField::FocusMode, |s| {
            s.ui.focus_mode_enabled = !s.ui.focus_mode_enabled;
        });
    }

    // ─── Collection actions ────────────────────────────────────────────────
    //
    // `add_*` appends without de-duplication; callers own id uniqueness.
    // `update_*` locates by id and shallow-merges; a missing id is a
    // silent no-op. `set_*` replaces a collection wholesale (seed loads,
    // refetch results).

    pub fn add_class(&self, class: Class) {
        self.mutate(StateField::Classes, |s| s.classes.push(class));
    }

    pub fn update_class(&self, id: &str, patch: ClassPatch) {
        self.mutate(StateField::Classes, |s| {
            if let Some(class) = s.classes.iter_mut().find(|c| c.id == id) {
                patch.apply_to(class);
            }
        });
    }

    pub fn set_classes(&self, classes: Vec<Class>) {
        self.mutate(StateField::Classes, |s| s.classes = classes);
    }

    pub fn add_event(&self, event: Event) {
        self.mutate(StateField::Events, |s| s.events.push(event));
    }

    pub fn update_event(&self, id: &str, patch: EventPatch) {
        self.mutate(StateField::Events, |s| {
            if let Some(event) = s.events.iter_mut().find(|e| e.id == id) {
                patch.apply_to(event);
            }
        });
    }

    pub fn set_events(&self, events: Vec<Event>) {
        self.mutate(StateField::Events, |s| s.events = events);
    }

    pub fn add_note(&self, note: Note) {
        self.mutate(StateField::Notes, |s| s.notes.push(note));
    }

    pub fn update_note(&self, id: &str, patch: NotePatch) {
        self.mutate(StateField::Notes, |s| {
            if let Some(note) = s.notes.iter_mut().find(|n| n.id == id) {
                patch.apply_to(note);
            }
        });
    }

    pub fn set_notes(&self, notes: Vec<Note>) {
        self.mutate(StateField::Notes, |s| s.notes = notes);
    }

    pub fn add_assignment(&self, assignment: Assignment) {
        self.mutate(StateField::Assignments, |s| s.assignments.push(assignment));
    }

    pub fn update_assignment(&self, id: &str, patch: AssignmentPatch) {
        self.mutate(StateField::Assignments, |s| {
            if let Some(assignment) = s.assignments.iter_mut().find(|a| a.id == id) {
                patch.apply_to(assignment);
            }
        });
    }

    pub fn set_assignments(&self, assignments: Vec<Assignment>) {
        self.mutate(StateField::Assignments, |s| s.assignments = assignments);
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
