//! Application coordinator routing between the intake and browse views.
//!
//! # Responsibility
//! - Mount and tear down the view matching the current history entry.
//! - Run the session gate on every navigation and observed store change.
//! - Route banner dismissals and fetch completions to their owners.
//!
//! # Invariants
//! - At most one of the two views is mounted at a time.
//! - Tearing down a view cancels its banner timer and invalidates its fetch.
//! - Entering `/second?success` shows the success banner once; leaving the
//!   browse view strips the marker from its history entry.

use crate::config::CoreConfig;
use crate::fetch::{run_fetch, FetchCompletion, FetchTicket, RecordSource};
use crate::form::intake::{FormEvent, IntakeForm, Key, SubmitOutcome};
use crate::model::identity::IdentityField;
use crate::nav::gate::{self, GateDecision};
use crate::nav::history::{History, NavState};
use crate::nav::route::Route;
use crate::notify::sequencer::{BannerSlot, DismissEffect, Notification, NotificationSequencer};
use crate::notify::EpochMs;
use crate::store::identity_store::IdentityStore;
use crate::store::kv::{KeyValueStore, StoreResult};
use crate::view::browse::BrowseView;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Navigation request for a path no route matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRouteError(pub String);

impl Display for UnknownRouteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown route `{}`", self.0)
    }
}

impl Error for UnknownRouteError {}

/// Currently mounted view.
#[derive(Debug)]
pub enum ActiveView {
    Intake(IntakeForm),
    Browse(BrowseView),
}

/// Single-profile application state.
pub struct App<S: KeyValueStore> {
    config: CoreConfig,
    store: IdentityStore<S>,
    history: History,
    notifications: NotificationSequencer,
    view: ActiveView,
    next_mount_id: u64,
    pending_fetch: Option<FetchTicket>,
    alerts: Vec<String>,
}

impl<S: KeyValueStore> App<S> {
    /// Starts the app at `initial`, running the gate if it is the browse route.
    pub fn start(
        kv: S,
        config: CoreConfig,
        initial: &str,
        now: EpochMs,
    ) -> Result<Self, UnknownRouteError> {
        let route = parse_route(initial)?;
        let store = IdentityStore::new(kv);
        let view = ActiveView::Intake(IntakeForm::mount(&store));
        let mut app = Self {
            config,
            store,
            history: History::new(route),
            notifications: NotificationSequencer::new(),
            view,
            next_mount_id: 0,
            pending_fetch: None,
            alerts: Vec::new(),
        };
        info!("event=app_start module=app status=ok route={route}");
        app.activate(false, now);
        Ok(app)
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn store(&self) -> &IdentityStore<S> {
        &self.store
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn current_route(&self) -> Route {
        self.history.current().route
    }

    /// Navigation state of the current entry (e.g. redirect origin).
    pub fn nav_state(&self) -> &NavState {
        &self.history.current().state
    }

    pub fn view(&self) -> &ActiveView {
        &self.view
    }

    pub fn intake(&self) -> Option<&IntakeForm> {
        match &self.view {
            ActiveView::Intake(form) => Some(form),
            ActiveView::Browse(_) => None,
        }
    }

    pub fn browse(&self) -> Option<&BrowseView> {
        match &self.view {
            ActiveView::Browse(view) => Some(view),
            ActiveView::Intake(_) => None,
        }
    }

    pub fn banner(&self, slot: BannerSlot) -> Option<&Notification> {
        self.notifications.visible(slot)
    }

    /// Drains blocking alerts raised since the last call.
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    /// Pushes `path` onto history and activates it.
    pub fn navigate(&mut self, path: &str, now: EpochMs) -> Result<(), UnknownRouteError> {
        let route = parse_route(path)?;
        self.push(route, NavState::default(), now);
        Ok(())
    }

    /// Goes back one history entry; returns `false` at the start.
    pub fn back(&mut self, now: EpochMs) -> bool {
        if self.history.index() == 0 {
            return false;
        }
        self.settle_success_marker();
        self.history.back();
        self.activate(false, now);
        true
    }

    /// Re-mounts the current route as a page reload would.
    pub fn reload(&mut self, now: EpochMs) {
        info!(
            "event=app_reload module=app status=ok route={}",
            self.current_route()
        );
        self.activate(true, now);
    }

    /// Feeds one intake event; ignored unless the intake view is mounted.
    ///
    /// # Errors
    /// Returns a store error when a valid identity cannot be persisted.
    pub fn intake_event(&mut self, event: FormEvent, now: EpochMs) -> StoreResult<SubmitOutcome> {
        let ActiveView::Intake(form) = &mut self.view else {
            return Ok(SubmitOutcome::None);
        };

        let outcome = form.handle(event, &self.store)?;
        match &outcome {
            SubmitOutcome::Accepted { navigate_to, .. } => {
                self.push(*navigate_to, NavState::default(), now);
            }
            SubmitOutcome::Rejected(errors) => {
                self.notifications.validation_failed(errors, now);
            }
            SubmitOutcome::None => {}
        }
        Ok(outcome)
    }

    pub fn update_field(&mut self, field: IdentityField, value: impl Into<String>) {
        if let ActiveView::Intake(form) = &mut self.view {
            form.update_field(field, value);
        }
    }

    pub fn submit(&mut self, now: EpochMs) -> StoreResult<SubmitOutcome> {
        self.intake_event(FormEvent::SubmitRequested, now)
    }

    pub fn key_pressed(
        &mut self,
        field: IdentityField,
        key: Key,
        now: EpochMs,
    ) -> StoreResult<SubmitOutcome> {
        self.intake_event(FormEvent::KeyPressed { field, key }, now)
    }

    /// Manual banner close.
    pub fn dismiss_banner(&mut self, slot: BannerSlot) {
        if let Some(effect) = self.notifications.dismiss(slot) {
            self.apply_dismiss_effect(effect);
        }
    }

    /// Advances time: fires due banner timers and re-checks the gate.
    pub fn tick(&mut self, now: EpochMs) {
        for effect in self.notifications.tick(now) {
            self.apply_dismiss_effect(effect);
        }
        self.refresh_gate(now);
    }

    /// Re-evaluates the gate while the browse view is mounted.
    ///
    /// Hosts call this after observing an external store change.
    pub fn refresh_gate(&mut self, now: EpochMs) {
        if matches!(self.view, ActiveView::Browse(_)) {
            self.activate(false, now);
        }
    }

    /// Takes the fetch ticket issued by the latest browse mount, if any.
    ///
    /// The host runs the read (possibly elsewhere) and hands the result back
    /// through [`App::complete_fetch`].
    pub fn take_fetch_ticket(&mut self) -> Option<FetchTicket> {
        self.pending_fetch.take()
    }

    pub fn has_pending_fetch(&self) -> bool {
        self.pending_fetch.is_some()
    }

    /// Applies a fetch completion; returns `false` if it was discarded.
    pub fn complete_fetch(&mut self, completion: FetchCompletion) -> bool {
        match &mut self.view {
            ActiveView::Browse(view) => view.apply_fetch(completion),
            ActiveView::Intake(_) => {
                warn!(
                    "event=records_apply module=app status=discarded reason=view_unmounted ticket_mount_id={}",
                    completion.ticket.mount_id()
                );
                false
            }
        }
    }

    /// Runs any pending fetch synchronously against `source`.
    pub fn run_pending_fetch<R: RecordSource + ?Sized>(&mut self, source: &R) -> bool {
        let Some(ticket) = self.take_fetch_ticket() else {
            return false;
        };
        let completion = run_fetch(source, ticket);
        self.complete_fetch(completion)
    }

    /// Re-issues a failed fetch; the ticket becomes pending.
    pub fn retry_fetch(&mut self) -> bool {
        let ActiveView::Browse(view) = &mut self.view else {
            return false;
        };
        match view.retry_fetch() {
            Some(ticket) => {
                self.pending_fetch = Some(ticket);
                true
            }
            None => false,
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        if let ActiveView::Browse(view) = &mut self.view {
            view.set_query(query);
        }
    }

    pub fn next_page(&mut self) {
        if let ActiveView::Browse(view) = &mut self.view {
            view.next_page();
        }
    }

    pub fn previous_page(&mut self) {
        if let ActiveView::Browse(view) = &mut self.view {
            view.previous_page();
        }
    }

    pub fn go_to_page(&mut self, index: usize) {
        if let ActiveView::Browse(view) = &mut self.view {
            view.go_to_page(index);
        }
    }

    fn push(&mut self, route: Route, state: NavState, now: EpochMs) {
        info!("event=navigate module=app status=ok mode=push route={route}");
        self.settle_success_marker();
        self.history.push(route, state);
        self.activate(false, now);
    }

    fn apply_dismiss_effect(&mut self, effect: DismissEffect) {
        match effect {
            DismissEffect::CanonicalizeRoute => self.canonicalize_current(),
            DismissEffect::ClearFieldErrors => {
                if let ActiveView::Intake(form) = &mut self.view {
                    form.clear_errors();
                }
            }
        }
    }

    fn canonicalize_current(&mut self) {
        let route = self.current_route();
        if route.has_success_marker() {
            let canonical = route.canonical();
            info!("event=navigate module=app status=ok mode=replace route={canonical}");
            self.history.replace(canonical);
        }
    }

    /// Strips the success marker from the entry the browse view is leaving.
    ///
    /// The marker is consumed on mount; the entry must not replay it when
    /// revisited through back-navigation.
    fn settle_success_marker(&mut self) {
        if matches!(self.view, ActiveView::Browse(_)) {
            self.canonicalize_current();
        }
    }

    /// Brings the mounted view in line with the current history entry.
    ///
    /// `remount` forces a fresh mount even when the right view is already up.
    fn activate(&mut self, remount: bool, now: EpochMs) {
        let route = self.current_route();
        match route {
            Route::Intake => {
                if remount || !matches!(self.view, ActiveView::Intake(_)) {
                    self.mount_intake();
                }
            }
            Route::Browse { success } => {
                if let GateDecision::Redirect(redirect) = gate::evaluate(&self.store) {
                    self.alerts.push(redirect.alert.to_string());
                    self.settle_success_marker();
                    self.history.push(
                        redirect.to,
                        NavState {
                            from: Some(redirect.from),
                        },
                    );
                    self.mount_intake();
                    return;
                }

                if remount || !matches!(self.view, ActiveView::Browse(_)) {
                    self.mount_browse();
                }
                if success {
                    if let ActiveView::Browse(view) = &mut self.view {
                        if view.take_success_marker() {
                            self.notifications.entered_with_success_marker(now);
                        }
                    }
                }
            }
        }
    }

    fn mount_intake(&mut self) {
        self.teardown_view();
        self.view = ActiveView::Intake(IntakeForm::mount(&self.store));
    }

    fn mount_browse(&mut self) {
        self.teardown_view();
        self.next_mount_id += 1;
        let mut view = BrowseView::mount(self.next_mount_id);
        self.pending_fetch = view.begin_fetch();
        info!(
            "event=browse_mount module=app status=ok mount_id={}",
            view.mount_id()
        );
        self.view = ActiveView::Browse(view);
    }

    fn teardown_view(&mut self) {
        match &mut self.view {
            ActiveView::Intake(_) => {
                self.notifications.teardown(BannerSlot::ValidationError);
            }
            ActiveView::Browse(view) => {
                view.teardown();
                self.notifications.teardown(BannerSlot::EntrySuccess);
                self.pending_fetch = None;
            }
        }
    }
}

fn parse_route(path: &str) -> Result<Route, UnknownRouteError> {
    Route::parse(path).ok_or_else(|| UnknownRouteError(path.to_string()))
}
