use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use log::{debug, error, info, warn};
use reqwest::Url;
use serde_json::Value;
use thiserror::Error;

use crate::models::track::Track;
use crate::source::TrackSource;
use crate::view::ListView;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Request error: {0}")]
    Request(reqwest::Error),
    #[error("Invalid response body: {0}")]
    InvalidBody(serde_json::Error),
}

impl From<reqwest::Error> for RenderError {
    fn from(err: reqwest::Error) -> Self {
        RenderError::Request(err)
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::InvalidBody(err)
    }
}

/// Turns a response body into list rows.
///
/// Anything other than a non-empty JSON array yields the single `placeholder`
/// row. Elements that are not track objects are skipped; if none is left the
/// placeholder is shown.
pub fn rows_from_body(body: &str, placeholder: &str) -> Result<Vec<String>, RenderError> {
    let items = match serde_json::from_str::<Value>(body)? {
        Value::Array(items) if !items.is_empty() => items,
        _ => return Ok(vec![placeholder.to_string()]),
    };
    let rows: Vec<String> = items
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| match serde_json::from_value::<Track>(item) {
            Ok(track) => Some(track.to_string()),
            Err(err) => {
                warn!("Skipping track {idx}: {err}");
                None
            }
        })
        .collect();
    if rows.is_empty() {
        return Ok(vec![placeholder.to_string()]);
    }
    Ok(rows)
}

/// Sequence number of a render request. Later requests get larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// A completed fetch, waiting to be applied to a list view.
#[derive(Debug)]
pub struct Fetched {
    pub ticket: Ticket,
    pub rows: Result<Vec<String>, RenderError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The view now holds this many rows.
    Replaced(usize),
    /// A newer request was issued meanwhile; the view was left alone.
    Stale,
    /// The fetch failed and was logged; the view was left alone.
    Failed,
}

/// Fetches track lists and renders them into a [`ListView`].
///
/// Only the most recently issued request may change the view, no matter in
/// which order responses arrive.
pub struct RemoteListRenderer<S> {
    source: S,
    latest: AtomicU64,
}

impl<S: TrackSource> RemoteListRenderer<S> {
    pub fn new(source: S) -> Self {
        RemoteListRenderer {
            source,
            latest: AtomicU64::new(0),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Starts a new request, superseding every earlier one.
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    pub async fn fetch(&self, ticket: Ticket, url: &Url, placeholder: &str) -> Fetched {
        info!("Fetching {url}");
        let rows = match self.source.fetch(url).await {
            Ok(body) => rows_from_body(&body, placeholder),
            Err(err) => Err(err),
        };
        Fetched { ticket, rows }
    }

    /// The only place a view is mutated.
    pub fn apply<V: ListView + ?Sized>(&self, fetched: Fetched, view: &mut V) -> Applied {
        if !self.is_current(fetched.ticket) {
            if let Err(err) = &fetched.rows {
                error!("Fetch failed: {err}");
            }
            debug!("Dropping response to superseded request {:?}", fetched.ticket);
            return Applied::Stale;
        }
        match fetched.rows {
            Ok(rows) => {
                let count = rows.len();
                view.replace_rows(rows);
                Applied::Replaced(count)
            }
            Err(err) => {
                error!("Fetch failed: {err}");
                Applied::Failed
            }
        }
    }

    pub async fn render<V: ListView>(&self, url: &Url, placeholder: &str, view: &Mutex<V>) -> Applied {
        let ticket = self.issue();
        let fetched = self.fetch(ticket, url, placeholder).await;
        let mut view = view.lock().unwrap_or_else(PoisonError::into_inner);
        self.apply(fetched, &mut *view)
    }
}
