//! Web starter with route-level access control.
//!
//! Every page request passes the access gate twice: once in the edge
//! middleware and once in the page layout, each resolving the session on its
//! own. See [`access`] for the decision table.

pub mod access;
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod navigation;
pub mod repos;
pub mod services;
pub mod session;
pub mod state;
pub mod web;
