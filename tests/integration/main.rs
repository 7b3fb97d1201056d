//! Integration tests
//!
//! `catalog_flow` drives the full router over an in-memory store.
//! `live_api` talks to a running server and is ignored by default.

mod catalog_flow;
mod live_api;
mod memory_store;
