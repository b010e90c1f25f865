//! netroutes: routing table snapshot
//!
//! A library for reading the system IP routing table and joining it with
//! per-interface and per-adapter metadata into a fixed row schema.

pub mod config;
pub mod output;
pub mod routes;
