//! Layout resolution, template composition and page rendering for pagegen.
//!
//! This crate is the core of the generator. For each page it:
//!
//! 1. Resolves which layout applies, via longest-path-prefix matching
//!    against the rules in [`SiteData`] ([`resolve_layout`]).
//! 2. Assembles the layout and every shared fragment from the part
//!    directory into one strict template namespace ([`TemplateUnit`]).
//! 3. Parses the page content into that namespace and executes the
//!    composed template against the site data ([`PageRenderer`]).
//!
//! Rendering is all-or-nothing: a reference to a field missing from the
//! data context aborts with [`SiteError::MissingKey`] and produces no
//! output bytes.
//!
//! [`SiteBuilder`] is the thin orchestration layer that walks the page
//! tree, drives the three steps above per page and writes results to the
//! destination tree.
//!
//! [`SiteData`]: pagegen_config::SiteData

mod builder;
mod context;
mod error;
mod layout;
mod render;
mod template;

pub use builder::{BuildSummary, SiteBuilder, SiteBuilderConfig};
pub use error::SiteError;
pub use layout::{DEFAULT_LAYOUT, resolve_layout};
pub use render::PageRenderer;
pub use template::TemplateUnit;
