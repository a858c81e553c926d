//! Structured query tracing for resolution entry points.
//!
//! Events use target `typemirror::query_json` and are intended to be consumed with:
//! `TYPEMIRROR_LOG=typemirror::query_json=trace TYPEMIRROR_LOG_FORMAT=json`.
//!
//! Environment:
//! - `TYPEMIRROR_QUERY_RUN_ID`: optional run identifier attached to every event.

use crate::MirrorId;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{Level, trace};
use typemirror_schema::DeclId;

static NEXT_QUERY_ID: AtomicU64 = AtomicU64::new(1);
static QUERY_RUN_ID: OnceLock<String> = OnceLock::new();

#[inline]
pub(crate) fn enabled() -> bool {
    tracing::enabled!(target: "typemirror::query_json", Level::TRACE)
}

#[inline]
pub(crate) fn next_query_id() -> u64 {
    NEXT_QUERY_ID.fetch_add(1, Ordering::Relaxed)
}

#[inline]
fn run_id() -> &'static str {
    QUERY_RUN_ID
        .get_or_init(|| {
            std::env::var("TYPEMIRROR_QUERY_RUN_ID").unwrap_or_else(|_| "default".to_string())
        })
        .as_str()
}

/// A query keyed by declaration id is starting.
#[inline]
pub(crate) fn decl_start(query_id: u64, op: &'static str, decl: DeclId) {
    trace!(
        target: "typemirror::query_json",
        event = "query",
        phase = "start",
        run_id = run_id(),
        query_id,
        op,
        decl_id = decl.0
    );
}

/// A type descriptor owned by `owner` is being resolved.
#[inline]
pub(crate) fn type_start(query_id: u64, op: &'static str, owner: DeclId, tag: &str) {
    trace!(
        target: "typemirror::query_json",
        event = "query",
        phase = "start",
        run_id = run_id(),
        query_id,
        op,
        owner_decl_id = owner.0,
        tag
    );
}

#[inline]
pub(crate) fn end(query_id: u64, op: &'static str, result: MirrorId, cache_hit: bool) {
    trace!(
        target: "typemirror::query_json",
        event = "query",
        phase = "end",
        run_id = run_id(),
        query_id,
        op,
        result_mirror_id = result.0,
        cache_hit
    );
}

#[inline]
pub(crate) fn failed(query_id: u64, op: &'static str, decl: DeclId) {
    trace!(
        target: "typemirror::query_json",
        event = "query",
        phase = "error",
        run_id = run_id(),
        query_id,
        op,
        decl_id = decl.0
    );
}
