// ── Hotspot state store ──
//
// Single-owner, insertion-ordered storage for every piece of dashboard
// state, with per-piece version counters for change detection.

mod collection;
mod hotspot_store;

pub use hotspot_store::{HotspotStore, MAX_CLIENTS, PASSWORD_LEN, SSID_MAX_LEN, StatusCounts};
