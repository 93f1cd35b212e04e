//! Roster controller: owns the snapshot, view, and page state, and keeps them
//! consistent across fetches, mutations, and selection changes.

use tracing::{debug, info, warn};

use crate::client::{FetchOutcome, RosterGateway};
use crate::error::{AppError, Result};
use crate::models::{Employee, JobTitle};
use crate::paginate::{self, PageSpec};
use crate::session::Session;
use crate::view::{SortKey, ViewSpec, derive_view};

/// Controller lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    /// No token resolved; nothing to fetch.
    #[default]
    Unauthenticated,
    /// A fetch is in flight.
    Loading,
    /// Roster held, view and page derived.
    Ready,
    /// The service rejected the token. Terminal for the session.
    Unauthorized,
}

/// Handoff signals for the routing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Send the operator to the login surface.
    Login,
    /// Open the detail surface for the selected employee.
    EmployeeDetail(i64),
}

/// What the presentation layer renders: one window of the derived view plus
/// the paging metadata around it.
#[derive(Debug)]
pub struct TableView<'a> {
    pub window: &'a [Employee],
    pub page_index: usize,
    pub page_count: usize,
    pub view_spec: ViewSpec,
    /// Records shown up to and including this page ("Showing X of Y").
    pub shown: usize,
    /// Total records in the derived view.
    pub total: usize,
}

impl TableView<'_> {
    /// Page numbers the controls display.
    pub fn page_links(&self) -> Vec<usize> {
        paginate::page_links(self.page_index, self.page_count)
    }

    /// Controls are hidden when everything fits on one page.
    pub fn controls_hidden(&self) -> bool {
        self.page_count <= 1
    }
}

/// Orchestrates token state, roster fetches, view derivation, and paging.
///
/// All state-changing operations recompute derived state synchronously, in a
/// fixed order: update roster or spec, re-derive the view, re-paginate, clamp
/// the page index.
pub struct RosterController<G> {
    gateway: G,
    session: Session,
    state: ControllerState,
    roster: Vec<Employee>,
    view: Vec<Employee>,
    view_spec: ViewSpec,
    page: PageSpec,
    page_count: usize,
    /// Sequence number of the most recently started fetch. Completions
    /// carrying an older number are discarded, so the latest intent wins even
    /// when responses arrive out of order.
    fetch_seq: u64,
}

impl<G: RosterGateway> RosterController<G> {
    /// Create a controller over a resolved session.
    ///
    /// Starts in `Unauthenticated`; call [`Self::load`] to fetch.
    pub fn new(gateway: G, session: Session, page_size: usize) -> Self {
        Self {
            gateway,
            session,
            state: ControllerState::Unauthenticated,
            roster: Vec::new(),
            view: Vec::new(),
            view_spec: ViewSpec::default(),
            page: PageSpec::new(page_size),
            page_count: 1,
            fetch_seq: 0,
        }
    }

    /// Initial load after session resolution.
    pub async fn load(&mut self) -> Result<Option<Navigation>> {
        self.refresh().await
    }

    /// Re-fetch the roster under the current token.
    ///
    /// Keeps the current view spec; the page index is clamped to the new page
    /// count. Also the intent used after an external create/edit.
    pub async fn refresh(&mut self) -> Result<Option<Navigation>> {
        if self.state == ControllerState::Unauthorized {
            // Terminal; never retried automatically.
            return Ok(Some(Navigation::Login));
        }
        if !self.session.is_authenticated() {
            self.state = ControllerState::Unauthenticated;
            return Ok(None);
        }

        let seq = self.begin_fetch();
        let outcome = self.gateway.fetch_all(self.session.token()).await;
        self.finish_fetch(seq, outcome)
    }

    fn begin_fetch(&mut self) -> u64 {
        self.fetch_seq += 1;
        self.state = ControllerState::Loading;
        self.fetch_seq
    }

    fn finish_fetch(&mut self, seq: u64, outcome: Result<FetchOutcome>) -> Result<Option<Navigation>> {
        if seq != self.fetch_seq {
            debug!("Discarding superseded fetch result (seq {seq} < {})", self.fetch_seq);
            return Ok(None);
        }

        match outcome {
            Ok(FetchOutcome::Roster(roster)) => {
                info!("Roster fetched: {} records", roster.len());
                self.roster = roster;
                self.state = ControllerState::Ready;
                self.recompute();
                Ok(None)
            }
            Ok(FetchOutcome::Unauthorized) => {
                warn!("Roster fetch not authorized, ending session");
                self.enter_unauthorized();
                Ok(Some(Navigation::Login))
            }
            Err(e) => {
                // Snapshot and view stay as they were; the operator re-triggers.
                warn!("Roster fetch failed: {e}");
                self.state = ControllerState::Ready;
                Err(e)
            }
        }
    }

    /// Terminal session end: flag the rejection for the login surface and
    /// drop everything derived from the fetched roster.
    fn enter_unauthorized(&mut self) {
        if let Err(e) = self.session.mark_unauthorized() {
            warn!("Failed to record not-authorized flag: {e}");
        }
        self.roster.clear();
        self.view.clear();
        self.page_count = 1;
        self.page.reset();
        self.state = ControllerState::Unauthorized;
    }

    /// Re-derive the view and page metadata from the current snapshot and
    /// spec, then clamp the page index. Always runs in this order.
    fn recompute(&mut self) {
        self.view = derive_view(&self.roster, self.view_spec);
        self.page_count = paginate::page_count(self.view.len(), self.page.page_size());
        self.page.clamp(self.page_count);
    }

    /// Select a sort ordering. Clears any active job-title filter and returns
    /// to page one.
    pub fn set_sort(&mut self, key: SortKey) {
        self.view_spec = ViewSpec::Sort(key);
        self.page.reset();
        self.recompute();
    }

    /// Filter to one job title. Clears any active sort and returns to page one.
    pub fn set_job_title_filter(&mut self, title: JobTitle) {
        self.view_spec = ViewSpec::JobTitle(title);
        self.page.reset();
        self.recompute();
    }

    /// Back to the default view (ascending by id), page one.
    pub fn clear_view(&mut self) {
        self.view_spec = ViewSpec::Unsorted;
        self.page.reset();
        self.recompute();
    }

    /// Change the page size and return to page one. Sizes outside the
    /// selectable set are rejected.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        if !self.page.set_page_size(size) {
            warn!("Rejected page size {size}, keeping {}", self.page.page_size());
            return false;
        }
        self.recompute();
        true
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page.go_to(page, self.page_count);
    }

    pub fn first_page(&mut self) {
        self.page.first();
    }

    pub fn last_page(&mut self) {
        self.page.last(self.page_count);
    }

    pub fn next_page(&mut self) {
        self.page.next(self.page_count);
    }

    pub fn previous_page(&mut self) {
        self.page.previous();
    }

    /// Delete one employee, then re-fetch and reconcile the page index.
    ///
    /// A refused delete leaves the roster untouched and surfaces the failure;
    /// nothing is updated optimistically.
    pub async fn delete(&mut self, id: i64) -> Result<Option<Navigation>> {
        match self.gateway.delete(self.session.token(), id).await {
            Ok(true) => {
                info!("Employee {id} deleted, refreshing roster");
                self.refresh().await
            }
            Ok(false) => {
                warn!("Service refused to delete employee {id}");
                Err(AppError::DeleteRejected { id })
            }
            Err(AppError::Unauthorized) => {
                warn!("Delete of employee {id} not authorized, ending session");
                self.enter_unauthorized();
                Ok(Some(Navigation::Login))
            }
            Err(e) => {
                warn!("Delete of employee {id} failed: {e}");
                Err(e)
            }
        }
    }

    /// Hand the selected employee off to the detail surface.
    pub fn view_employee(&mut self, id: i64) -> Navigation {
        self.session.select_employee(id);
        Navigation::EmployeeDetail(id)
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn view_spec(&self) -> ViewSpec {
        self.view_spec
    }

    pub fn page_index(&self) -> usize {
        self.page.page_index()
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn roster_len(&self) -> usize {
        self.roster.len()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The window and metadata the presentation layer renders.
    pub fn table(&self) -> TableView<'_> {
        let page = paginate::paginate(&self.view, self.page.page_size(), self.page.page_index());
        TableView {
            window: page.window,
            page_index: self.page.page_index(),
            page_count: page.page_count,
            view_spec: self.view_spec,
            shown: (self.page.page_index() * self.page.page_size()).min(self.view.len()),
            total: self.view.len(),
        }
    }
}
