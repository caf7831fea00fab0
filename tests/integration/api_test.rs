//! API endpoint integration tests
//!
//! Domain routers are exercised end-to-end through `tower::ServiceExt`
//! with mock upstream clients standing in for MISO and v0.

#![allow(dead_code)]

mod chat;
mod common;
mod generator;
mod sessions;
