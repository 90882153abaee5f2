//! Browse view model.

use crate::config::PAGE_SIZE;
use crate::fetch::{FetchCompletion, FetchTicket};
use crate::model::record::ListRecord;
use crate::search::filter::{filter_records, matching_records};
use crate::view::pager::{page_count, paginate, Page};
use log::{info, warn};

/// Lifecycle of the one remote read owned by a mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    NotStarted,
    InFlight,
    Loaded,
    /// Read failed; the message is user-presentable.
    Failed(String),
}

/// Browse view mounted behind the session gate.
#[derive(Debug)]
pub struct BrowseView {
    mount_id: u64,
    alive: bool,
    fetch: FetchState,
    records: Vec<ListRecord>,
    query: String,
    page: usize,
    marker_consumed: bool,
}

impl BrowseView {
    pub fn mount(mount_id: u64) -> Self {
        Self {
            mount_id,
            alive: true,
            fetch: FetchState::NotStarted,
            records: Vec::new(),
            query: String::new(),
            page: 0,
            marker_consumed: false,
        }
    }

    pub fn mount_id(&self) -> u64 {
        self.mount_id
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch
    }

    /// Full fetched set, unfiltered.
    pub fn records(&self) -> &[ListRecord] {
        &self.records
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Issues the mount's single fetch; `None` if already issued.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if !self.alive || self.fetch != FetchState::NotStarted {
            return None;
        }
        self.fetch = FetchState::InFlight;
        Some(FetchTicket {
            mount_id: self.mount_id,
        })
    }

    /// Re-issues the fetch after a failure; `None` in any other state.
    pub fn retry_fetch(&mut self) -> Option<FetchTicket> {
        if !self.alive || !matches!(self.fetch, FetchState::Failed(_)) {
            return None;
        }
        info!(
            "event=records_retry module=view status=start mount_id={}",
            self.mount_id
        );
        self.fetch = FetchState::InFlight;
        Some(FetchTicket {
            mount_id: self.mount_id,
        })
    }

    /// Applies a completion; returns `false` when it was discarded.
    ///
    /// Success replaces the record set wholesale; failure leaves it empty and
    /// records the error for display.
    pub fn apply_fetch(&mut self, completion: FetchCompletion) -> bool {
        if !self.alive
            || completion.ticket.mount_id != self.mount_id
            || self.fetch != FetchState::InFlight
        {
            warn!(
                "event=records_apply module=view status=discarded mount_id={} ticket_mount_id={}",
                self.mount_id, completion.ticket.mount_id
            );
            return false;
        }

        match completion.result {
            Ok(records) => {
                self.records = records;
                self.fetch = FetchState::Loaded;
            }
            Err(err) => {
                self.records.clear();
                self.fetch = FetchState::Failed(err.to_string());
            }
        }
        self.page = self.page.min(self.page_count() - 1);
        true
    }

    /// Replaces the live query and returns to the first page.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 0;
    }

    /// Records matching the current query, in fetch order.
    pub fn filtered(&self) -> Vec<&ListRecord> {
        filter_records(&self.query, &self.records)
    }

    pub fn page_count(&self) -> usize {
        let matching = matching_records(&self.query, &self.records).count();
        page_count(matching, PAGE_SIZE)
    }

    /// Current page of the filtered set; only the shown rows are cloned.
    pub fn current_page(&self) -> Page<ListRecord> {
        paginate(&self.filtered(), self.page, PAGE_SIZE).map_rows(|record| record.clone())
    }

    pub fn go_to_page(&mut self, index: usize) {
        self.page = index.min(self.page_count() - 1);
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.page.saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.page.saturating_sub(1));
    }

    /// Consumes the entry-success marker; `true` only the first time.
    pub(crate) fn take_success_marker(&mut self) -> bool {
        !std::mem::replace(&mut self.marker_consumed, true)
    }

    /// Marks the view dead so late completions are dropped.
    pub fn teardown(&mut self) {
        self.alive = false;
    }
}
