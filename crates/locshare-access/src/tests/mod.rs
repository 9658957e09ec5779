//! Service tests against an in-memory SQLite store.

mod common;
mod directories;
