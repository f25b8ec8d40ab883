//! HTTP handler modules

pub mod api;
