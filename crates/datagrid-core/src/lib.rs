//! Configuration-driven datagrids
//!
//! This crate provides the model behind a datagrid view: a [`DataGrid`] built
//! from a declarative configuration record, its ordered [`Column`]s, the
//! user actions and filter buttons it declares on a form, and the pager it
//! exposes. Form building, filtering and pagination themselves belong to
//! the host framework and are reached through the traits in [`form`] and
//! [`query`].
//!
//! # Features
//!
//! - **Typed configuration**: raw records are validated into [`DataGridOptions`],
//!   unknown keys are rejected
//! - **Columns**: ordered cell descriptors with pluggable value and label renderers
//! - **Actions**: per-grid action controls and filter submit/reset buttons
//! - **Forms**: filter form building delegated to a [`QueryHandler`]
//! - **Pagination**: page navigation through [`Pager`]
//!
//! # Architecture
//!
//! ```text
//! DataGrid ──► Columns ──► Renderers
//!    │
//!    ├──► Actions / Buttons ──► FormBuilder controls
//!    │
//!    └──► QueryHandler ──► Form ──► FormView
//!                     └──► Pager
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use datagrid_core::{DataGrid, Renderers};
//! use serde_json::json;
//!
//! let grid = DataGrid::from_value(
//!     "news",
//!     json!({ "columns": { "title": null, "published_at": { "label": "Published" } } }),
//!     query_handler,
//!     &Renderers::default(),
//! )?;
//! assert_eq!(grid.columns().len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod column;
pub mod config;
pub mod datagrid;
pub mod error;
pub mod form;
pub mod options;
pub mod pager;
pub mod query;
pub mod render;

// Re-exports for convenience
pub use column::Column;
pub use config::{ColumnConfig, DataGridOptions, OptionsMap};
pub use datagrid::{DataGrid, RESET_BUTTON, SUBMIT_BUTTON, SharedDataGrid};
pub use error::{DataGridError, DataGridResult, QueryHandlerError, QueryHandlerResult};
pub use form::{Control, ControlType, Form, FormBuilder, FormView};
pub use options::ControlOptions;
pub use pager::Pager;
pub use query::{FilterDescriptor, HttpRequest, QueryHandler, QueryHandlerRegistry};
pub use render::{
	ColumnLabelRenderer, ColumnValueRenderer, DefaultColumnLabelRenderer,
	DefaultColumnValueRenderer, Renderers,
};
