#![doc = "docs-aggregator-core: core pipeline library for docs-aggregator."]

//! This crate aggregates documentation fragments from many repositories into one static
//! site source tree and synthesizes the navigation document the site builder consumes.
//!
//! # Usage
//! Build a [`layout::SiteLayout`], parse an [`config::AggregateConfig`] and hand both to
//! [`pipeline::assemble`] together with the collaborators from [`contract`].

mod command;
pub mod config;
pub mod contract;
pub mod error;
pub mod fetch;
pub mod layout;
pub mod links;
pub mod listing;
pub mod nav;
pub mod pipeline;
pub mod project;
pub mod site_builder;
pub mod template;
pub mod tools_index;
pub mod tree;

pub use error::{Error, Result};
