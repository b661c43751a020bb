//! Editable Field Controller
//!
//! A two-state machine (`Viewing` / `Editing`) around one attribute of a
//! course or chapter. Submitting validates locally, sends a partial update
//! through the gateway, reports the outcome as a toast and asks the host to
//! refresh.
//!
//! ```text
//!            begin_edit                 submit ok
//!  Viewing ─────────────▶ Editing ────────────────▶ Viewing
//!     ▲                    │  ▲ invalid / failed
//!     └──── cancel ────────┘  └──────┘
//! ```
//!
//! State lives in a `tokio::sync::watch` channel so a rendering layer can
//! follow every transition. Each transition is one `send_if_modified` call;
//! the lock is never held across the gateway `.await`.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::ValidationError;
use crate::format::Display;
use crate::gateway::CourseGateway;
use crate::model::{ResourcePath, UpdateRequest};
use crate::notify::{GENERIC_FAILURE, Notification, NotificationSink, RefreshTrigger};
use crate::validation::FieldKind;

/// Collaborators shared by every controller on a page
#[derive(Clone)]
pub struct Services {
    pub gateway: Arc<dyn CourseGateway>,
    pub notifier: Arc<dyn NotificationSink>,
    pub refresh: Arc<dyn RefreshTrigger>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Viewing,
    Editing,
}

/// Observable state of one editable field
pub struct FieldState<K: FieldKind> {
    pub mode: Mode,
    pub committed: Option<K::Value>,
    pub draft: K::Input,
    pub submitting: bool,
    pub errors: Vec<String>,
    /// Set once a submit surfaced errors; later edits re-validate
    revalidate: bool,
}

impl<K: FieldKind> FieldState<K> {
    fn new(committed: Option<K::Value>) -> Self {
        Self {
            mode: Mode::Viewing,
            draft: K::draft(committed.as_ref()),
            committed,
            submitting: false,
            errors: Vec::new(),
            revalidate: false,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.mode == Mode::Editing
    }

    pub fn is_valid(&self) -> bool {
        K::validate(&self.draft).is_ok()
    }

    /// Whether the Save button is enabled
    pub fn can_submit(&self) -> bool {
        self.is_editing() && !self.submitting && self.is_valid()
    }

    pub fn display(&self) -> Display {
        K::display(self.committed.as_ref())
    }

    fn reset_draft(&mut self) {
        self.draft = K::draft(self.committed.as_ref());
        self.errors.clear();
        self.revalidate = false;
    }
}

impl<K: FieldKind> Clone for FieldState<K> {
    fn clone(&self) -> Self {
        Self {
            mode: self.mode,
            committed: self.committed.clone(),
            draft: self.draft.clone(),
            submitting: self.submitting,
            errors: self.errors.clone(),
            revalidate: self.revalidate,
        }
    }
}

impl<K: FieldKind> PartialEq for FieldState<K> {
    fn eq(&self, other: &Self) -> bool {
        self.mode == other.mode
            && self.committed == other.committed
            && self.draft == other.draft
            && self.submitting == other.submitting
            && self.errors == other.errors
    }
}

impl<K: FieldKind> std::fmt::Debug for FieldState<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldState")
            .field("field", &K::NAME)
            .field("mode", &self.mode)
            .field("committed", &self.committed)
            .field("draft", &self.draft)
            .field("submitting", &self.submitting)
            .field("errors", &self.errors)
            .finish()
    }
}

/// Why a submit was refused before doing anything
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    NotEditing,
    InFlight,
}

/// Result of one submit attempt
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome<V> {
    /// Remote update succeeded and the value is committed
    Committed(V),
    /// Local validation failed; nothing was sent
    Invalid(ValidationError),
    /// Remote update failed; the draft is kept for a manual retry
    Failed,
    /// Refused without validation or network
    Rejected(Rejection),
}

enum Step<V> {
    Send(V),
    Invalid(ValidationError),
    Rejected(Rejection),
}

/// Clears the submitting flag however the submit future ends
struct SubmitGuard<'a, K: FieldKind> {
    state: &'a watch::Sender<FieldState<K>>,
}

impl<K: FieldKind> Drop for SubmitGuard<'_, K> {
    fn drop(&mut self) {
        self.state.send_if_modified(|s| std::mem::replace(&mut s.submitting, false));
    }
}

/// Inline editor for one attribute
pub struct FieldController<K: FieldKind> {
    path: ResourcePath,
    state: watch::Sender<FieldState<K>>,
    services: Services,
}

impl<K: FieldKind> FieldController<K> {
    /// Start in `Viewing` with the host's committed value
    pub fn new(path: ResourcePath, committed: Option<K::Value>, services: Services) -> Self {
        Self {
            path,
            state: watch::Sender::new(FieldState::new(committed)),
            services,
        }
    }

    pub fn path(&self) -> &ResourcePath {
        &self.path
    }

    /// Current state
    pub fn snapshot(&self) -> FieldState<K> {
        self.state.borrow().clone()
    }

    /// Follow every state change
    pub fn subscribe(&self) -> watch::Receiver<FieldState<K>> {
        self.state.subscribe()
    }

    /// e.g. "Course price"
    pub fn heading(&self) -> String {
        format!("{} {}", self.path.scope().as_str(), K::LABEL)
    }

    /// e.g. "Edit price"
    pub fn edit_label(&self) -> String {
        format!("Edit {}", K::LABEL)
    }

    pub fn display(&self) -> Display {
        self.state.borrow().display()
    }

    pub fn can_submit(&self) -> bool {
        self.state.borrow().can_submit()
    }

    /// `Viewing → Editing`, with the form reset to the committed value
    pub fn begin_edit(&self) -> bool {
        let changed = self.state.send_if_modified(|s| {
            if s.is_editing() {
                return false;
            }
            s.mode = Mode::Editing;
            s.reset_draft();
            true
        });
        if changed {
            tracing::debug!(field = K::NAME, path = %self.path, "editing");
        }
        changed
    }

    /// `Editing → Viewing` without a network call. Refused while a
    /// submission is in flight.
    pub fn cancel(&self) -> bool {
        let changed = self.state.send_if_modified(|s| {
            if !s.is_editing() || s.submitting {
                return false;
            }
            s.mode = Mode::Viewing;
            s.reset_draft();
            true
        });
        if changed {
            tracing::debug!(field = K::NAME, path = %self.path, "edit cancelled");
        }
        changed
    }

    /// The Edit / Cancel button
    pub fn toggle(&self) -> bool {
        if self.state.borrow().is_editing() {
            self.cancel()
        } else {
            self.begin_edit()
        }
    }

    /// Replace the form input. Ignored unless editing and idle.
    pub fn set_draft(&self, input: K::Input) -> bool {
        self.state.send_if_modified(|s| {
            if !s.is_editing() || s.submitting {
                return false;
            }
            if s.revalidate {
                s.errors = K::validate(&input).err().map(|e| e.reasons).unwrap_or_default();
            }
            s.draft = input;
            true
        })
    }

    /// Validate, send, and report. At most one submission is in flight.
    pub async fn submit(&self) -> SubmitOutcome<K::Value> {
        let mut step = Step::Rejected(Rejection::NotEditing);
        self.state.send_if_modified(|s| {
            if !s.is_editing() {
                return false;
            }
            if s.submitting {
                step = Step::Rejected(Rejection::InFlight);
                return false;
            }
            match K::validate(&s.draft) {
                Ok(value) => {
                    s.errors.clear();
                    s.submitting = true;
                    step = Step::Send(value);
                }
                Err(err) => {
                    s.errors.clone_from(&err.reasons);
                    s.revalidate = true;
                    step = Step::Invalid(err);
                }
            }
            true
        });

        let value = match step {
            Step::Send(value) => value,
            Step::Invalid(err) => {
                tracing::debug!(field = K::NAME, error = %err, "validation failed");
                return SubmitOutcome::Invalid(err);
            }
            Step::Rejected(reason) => {
                tracing::debug!(field = K::NAME, ?reason, "submit rejected");
                return SubmitOutcome::Rejected(reason);
            }
        };

        let _release = SubmitGuard { state: &self.state };
        let request = UpdateRequest {
            path: self.path.clone(),
            patch: K::patch(&value),
        };

        match self.services.gateway.update(&request).await {
            Ok(()) => {
                self.services
                    .notifier
                    .notify(Notification::success(self.path.scope().success_message()));
                self.state.send_modify(|s| {
                    s.committed = Some(value.clone());
                    s.mode = Mode::Viewing;
                    s.submitting = false;
                    s.reset_draft();
                });
                self.services.refresh.refresh();
                tracing::debug!(field = K::NAME, path = %self.path, "update committed");
                SubmitOutcome::Committed(value)
            }
            Err(err) => {
                tracing::error!(field = K::NAME, path = %self.path, error = %err, "update failed");
                self.services.notifier.notify(Notification::error(GENERIC_FAILURE));
                SubmitOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rust_decimal_macros::dec;
    use serde_json::json;
    use tokio::sync::Notify;

    use crate::gateway::MockGateway;
    use crate::model::{ChapterId, CourseId};
    use crate::notify::{NotificationKind, SharedToasts};
    use crate::validation::{Access, Description, Price, Title};

    struct Harness {
        gateway: Arc<MockGateway>,
        toasts: SharedToasts,
        refreshes: Arc<AtomicUsize>,
        services: Services,
    }

    fn harness(gateway: MockGateway) -> Harness {
        let gateway = Arc::new(gateway);
        let toasts = SharedToasts::new();
        let refreshes = Arc::new(AtomicUsize::new(0));
        let counter = refreshes.clone();
        let services = Services {
            gateway: gateway.clone(),
            notifier: Arc::new(toasts.clone()),
            refresh: Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        };
        Harness {
            gateway,
            toasts,
            refreshes,
            services,
        }
    }

    fn course() -> ResourcePath {
        ResourcePath::course(CourseId::new("course-1"))
    }

    fn chapter() -> ResourcePath {
        ResourcePath::chapter(CourseId::new("course-1"), ChapterId::new("chapter-1"))
    }

    #[tokio::test]
    async fn test_empty_title_never_reaches_the_network() {
        let h = harness(MockGateway::new());
        let title = FieldController::<Title>::new(chapter(), Some("Intro".into()), h.services.clone());

        title.begin_edit();
        title.set_draft(String::new());
        assert!(!title.can_submit());

        let outcome = title.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Invalid(ref e) if e.reasons == ["Title is required"]));

        let state = title.snapshot();
        assert_eq!(state.mode, Mode::Editing);
        assert_eq!(state.errors, vec!["Title is required".to_string()]);
        assert!(!state.submitting);
        assert!(h.gateway.updates().is_empty());
        assert!(h.toasts.drain().is_empty());
    }

    #[tokio::test]
    async fn test_successful_submit_commits_and_refreshes() {
        let h = harness(MockGateway::new());
        let description =
            FieldController::<Description>::new(course(), None, h.services.clone());
        assert_eq!(description.display().text, "No description provided");

        description.begin_edit();
        description.set_draft("This course is about ownership".into());
        let outcome = description.submit().await;

        assert_eq!(
            outcome,
            SubmitOutcome::Committed("This course is about ownership".to_string())
        );
        let state = description.snapshot();
        assert_eq!(state.mode, Mode::Viewing);
        assert!(!state.submitting);
        assert_eq!(state.committed.as_deref(), Some("This course is about ownership"));
        assert_eq!(description.display().text, "This course is about ownership");

        let toasts = h.toasts.drain();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, NotificationKind::Success);
        assert_eq!(toasts[0].message, "Course updated!");
        assert_eq!(h.refreshes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_price_is_coerced_and_formatted() {
        let h = harness(MockGateway::new());
        let price = FieldController::<Price>::new(course(), None, h.services.clone());
        assert_eq!(price.heading(), "Course price");
        assert_eq!(price.edit_label(), "Edit price");

        price.begin_edit();
        price.set_draft("19.99".into());
        assert_eq!(price.submit().await, SubmitOutcome::Committed(dec!(19.99)));

        let updates = h.gateway.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].path.to_string(), "/api/courses/course-1");
        assert_eq!(serde_json::to_value(&updates[0].patch).unwrap(), json!({ "price": 19.99 }));
        assert_eq!(price.display().text, "$19.99");
        assert!(!price.display().placeholder);
    }

    #[tokio::test]
    async fn test_access_flag_toggles_preview_text() {
        let h = harness(MockGateway::new());
        let access = FieldController::<Access>::new(chapter(), Some(false), h.services.clone());
        assert_eq!(access.heading(), "Chapter access");
        assert_eq!(access.display().text, "This chapter is not free.");

        access.begin_edit();
        access.set_draft(true);
        access.submit().await;

        let updates = h.gateway.updates();
        assert_eq!(
            updates[0].path.to_string(),
            "/api/courses/course-1/chapters/chapter-1"
        );
        assert_eq!(serde_json::to_value(&updates[0].patch).unwrap(), json!({ "isFree": true }));
        assert_eq!(access.display().text, "This chapter is free for preview.");
        assert_eq!(h.toasts.drain()[0].message, "Chapter updated!");
    }

    #[tokio::test]
    async fn test_failed_update_keeps_editing() {
        let h = harness(MockGateway::failing());
        let title = FieldController::<Title>::new(course(), Some("Old".into()), h.services.clone());

        title.begin_edit();
        title.set_draft("New".into());
        assert_eq!(title.submit().await, SubmitOutcome::Failed);

        let state = title.snapshot();
        assert_eq!(state.mode, Mode::Editing);
        assert!(!state.submitting);
        assert_eq!(state.draft, "New");
        assert_eq!(state.committed.as_deref(), Some("Old"));

        let toasts = h.toasts.drain();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, NotificationKind::Error);
        assert_eq!(toasts[0].message, "Something went wrong!");
        assert_eq!(h.refreshes.load(Ordering::SeqCst), 0);

        // manual retry once the server recovers
        h.gateway.set_failing(false);
        assert_eq!(title.submit().await, SubmitOutcome::Committed("New".to_string()));
    }

    #[tokio::test]
    async fn test_repeated_success_is_handled_identically() {
        let h = harness(MockGateway::new());
        let title = FieldController::<Title>::new(course(), Some("Same".into()), h.services.clone());

        let mut observed = Vec::new();
        for _ in 0..2 {
            title.begin_edit();
            title.set_draft("Same".into());
            let outcome = title.submit().await;
            let toasts = h.toasts.drain();
            observed.push((outcome, title.snapshot(), toasts.len(), toasts[0].message.clone()));
        }

        assert_eq!(observed[0], observed[1]);
        assert_eq!(h.gateway.updates().len(), 2);
        assert_eq!(h.refreshes.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_second_submit_is_rejected_while_in_flight() {
        let release = Arc::new(Notify::new());
        let h = harness(MockGateway::held(release.clone()));
        let title = FieldController::<Title>::new(course(), None, h.services.clone());
        title.begin_edit();
        title.set_draft("Ownership".into());

        let (first, second) = tokio::join!(title.submit(), async {
            let state = title.snapshot();
            assert!(state.submitting);
            assert!(!state.can_submit());
            assert!(!title.cancel());
            assert!(!title.set_draft("Borrowing".into()));

            let outcome = title.submit().await;
            release.notify_one();
            outcome
        });

        assert_eq!(first, SubmitOutcome::Committed("Ownership".to_string()));
        assert_eq!(second, SubmitOutcome::Rejected(Rejection::InFlight));
        assert_eq!(h.gateway.updates().len(), 1);
        assert!(!title.snapshot().submitting);
    }

    #[tokio::test]
    async fn test_dropped_submit_releases_the_flag() {
        let release = Arc::new(Notify::new());
        let h = harness(MockGateway::held(release));
        let price = FieldController::<Price>::new(course(), None, h.services.clone());
        price.begin_edit();
        price.set_draft("10".into());

        {
            let pending = price.submit();
            tokio::pin!(pending);
            tokio::select! {
                biased;
                _ = &mut pending => panic!("held gateway answered"),
                () = std::future::ready(()) => {}
            }
            assert!(price.snapshot().submitting);
        }

        let state = price.snapshot();
        assert!(!state.submitting);
        assert_eq!(state.mode, Mode::Editing);
    }

    #[tokio::test]
    async fn test_cancel_restores_committed_value() {
        let h = harness(MockGateway::new());
        let title = FieldController::<Title>::new(course(), Some("Kept".into()), h.services.clone());

        assert!(title.toggle());
        title.set_draft("Discarded".into());
        assert!(title.toggle());

        let state = title.snapshot();
        assert_eq!(state.mode, Mode::Viewing);
        assert_eq!(state.draft, "Kept");
        assert!(h.gateway.updates().is_empty());
        assert!(h.toasts.drain().is_empty());
    }

    #[tokio::test]
    async fn test_submit_outside_edit_mode_is_rejected() {
        let h = harness(MockGateway::new());
        let title = FieldController::<Title>::new(course(), Some("Idle".into()), h.services.clone());

        assert_eq!(title.submit().await, SubmitOutcome::Rejected(Rejection::NotEditing));
        assert!(!title.set_draft("ignored".into()));
        assert!(h.gateway.updates().is_empty());
    }

    #[tokio::test]
    async fn test_errors_clear_once_input_is_valid() {
        let h = harness(MockGateway::new());
        let description = FieldController::<Description>::new(course(), None, h.services.clone());
        let mut changes = description.subscribe();

        description.begin_edit();
        description.submit().await;
        assert_eq!(description.snapshot().errors, vec!["Description is required".to_string()]);
        assert!(h.gateway.updates().is_empty());

        description.set_draft("x".into());
        assert!(description.snapshot().errors.is_empty());
        assert!(changes.has_changed().unwrap());
        assert_eq!(changes.borrow_and_update().draft, "x");
    }
}
