//! Core types and trait definitions for the Stockroom asset tracker.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.
//!
//! The pieces, leaf-first: [`normalize`] canonicalises identifiers,
//! [`employee`] / [`asset`] / [`ledger`] hold the domain records,
//! [`store`] defines the transactional persistence boundary, and
//! [`directory`] / [`registry`] / [`holder`] / [`lifecycle`] implement
//! the operations on top of any [`store::AssetStore`].

pub mod asset;
pub mod directory;
pub mod employee;
pub mod error;
pub mod holder;
pub mod ledger;
pub mod lifecycle;
pub mod normalize;
pub mod registry;
pub mod store;

pub use error::{Error, Result};
