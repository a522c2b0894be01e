//! stockman — personal stock portfolio tracker.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in
//! [`ports`], concrete implementations in [`adapters`], console shell in
//! [`cli`].

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod ports;
