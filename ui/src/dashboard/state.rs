//! What the dashboard is currently showing, and which request it is waiting on.
//!
//! Requests are ordered last-issued-wins: every request takes a fresh ticket
//! and only the newest ticket may settle the view. A slow earlier response
//! that resolves after a later one is dropped (its data still lands in the
//! response cache).

use std::rc::Rc;

use crate::data::{FetchError, LoadedDataset};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading {
        url: String,
    },
    Loaded {
        url: String,
        data: Rc<LoadedDataset>,
    },
    /// Replaces whatever was shown before; there is no fallback to the last dataset.
    Failed {
        url: String,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardState {
    issued: u64,
    view: ViewState,
}

impl DashboardState {
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// URL of the request the view belongs to (pending, loaded or failed).
    pub fn active_url(&self) -> Option<&str> {
        match &self.view {
            ViewState::Idle => None,
            ViewState::Loading { url }
            | ViewState::Loaded { url, .. }
            | ViewState::Failed { url, .. } => Some(url),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.view, ViewState::Loading { .. })
    }

    pub fn begin(&mut self, url: &str) -> RequestTicket {
        self.issued += 1;
        self.view = ViewState::Loading {
            url: url.to_string(),
        };
        RequestTicket(self.issued)
    }

    /// Applies a finished request. Returns `false` when a newer request has
    /// been issued since, in which case the view is left untouched.
    pub fn settle(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<Rc<LoadedDataset>, FetchError>,
    ) -> bool {
        if ticket.0 != self.issued {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.issued,
                "discarding stale response"
            );
            return false;
        }

        let url = self.active_url().unwrap_or_default().to_string();
        self.view = match outcome {
            Ok(data) => ViewState::Loaded { url, data },
            Err(err) => {
                tracing::warn!(url = %url, "couldn't load dataset: {err}");
                ViewState::Failed {
                    url,
                    message: err.to_string(),
                }
            }
        };
        true
    }
}
