//! Columnar Integration Tests
//!
//! End-to-end tests over the public facade: type registry, arrays, tables,
//! column exchange and the library lifecycle.

#[path = "../common/mod.rs"]
mod common;

mod library;
mod tables;
mod type_system;
