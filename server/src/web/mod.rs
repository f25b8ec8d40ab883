//! Web layer modules

pub mod handlers;
