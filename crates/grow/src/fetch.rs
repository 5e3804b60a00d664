//! The data-fetch collaborator boundary.
//!
//! Suburb boundaries arrive from an opaque asynchronous source. At most one
//! request is in flight per app; it is polled once per frame and resolved into
//! the [`SuburbCollection`]. There is no retry, timeout, de-duplication, or
//! cancellation — a failed fetch logs a warning and leaves the placeholder
//! (empty) collection in place.

use std::future::Future;
use std::pin::Pin;

use bevy::prelude::*;
use futures_lite::future;
use thiserror::Error;

use crate::suburbs::{SuburbCollection, SuburbFeature};

/// Generic fetch failure surfaced to the caller. The underlying transport
/// error is logged at the source; callers only degrade to placeholder
/// rendering, so no detail is carried.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FetchError {
    #[error("fetch failed")]
    Failed,
}

type SuburbResult = Result<Vec<SuburbFeature>, FetchError>;
type FetchFuture = Pin<Box<dyn Future<Output = SuburbResult> + Send + Sync>>;

/// The single in-flight suburb request, if any.
#[derive(Resource, Default)]
pub struct SuburbFetch {
    in_flight: Option<FetchFuture>,
}

impl SuburbFetch {
    /// Start a fetch. A still-pending previous request is dropped; callers
    /// issue one request per map instance, so overlap only happens on rapid
    /// reloads where the newest request is the right one to keep.
    pub fn queue(&mut self, fut: impl Future<Output = SuburbResult> + Send + Sync + 'static) {
        if self.in_flight.is_some() {
            debug!("replacing in-flight suburb fetch");
        }
        self.in_flight = Some(Box::pin(fut));
    }

    /// Queue an already-materialized feature set (demo data, tests).
    pub fn queue_static(&mut self, features: Vec<SuburbFeature>) {
        self.queue(async move { Ok(features) });
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }
}

/// Fired when a fetch resolves successfully and the collection is replaced.
#[derive(Event, Debug, Clone, Copy)]
pub struct SuburbsLoaded {
    pub count: usize,
}

/// Poll the in-flight request once per frame.
pub fn poll_suburb_fetch(
    mut fetch: ResMut<SuburbFetch>,
    mut suburbs: ResMut<SuburbCollection>,
    mut loaded: EventWriter<SuburbsLoaded>,
) {
    let Some(task) = fetch.in_flight.as_mut() else {
        return;
    };
    let Some(result) = future::block_on(future::poll_once(task.as_mut())) else {
        return;
    };
    fetch.in_flight = None;
    match result {
        Ok(features) => {
            info!("loaded {} suburb features", features.len());
            loaded.send(SuburbsLoaded {
                count: features.len(),
            });
            *suburbs = SuburbCollection::new(features);
        }
        Err(err) => warn!("suburb fetch failed, keeping placeholder collection: {err}"),
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
