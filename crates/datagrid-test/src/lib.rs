//! # Datagrid Test
//!
//! Test doubles for the collaborators a datagrid talks to.
//!
//! ## Features
//!
//! - **[`RecordingFormBuilder`]**: form builder keeping every declared control
//! - **[`StubForm`]**: form counting how many views were created
//! - **[`StubQueryHandler`]**: query handler with configurable filters and rows
//! - **[`InMemoryQueryHandlerRegistry`]**: query handler registry counting builds
//! - **[`init_test_logging`]**: one-time `tracing` subscriber for tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use datagrid_test::{InMemoryQueryHandlerRegistry, RecordingFormBuilder};
//!
//! let query_handlers = Arc::new(InMemoryQueryHandlerRegistry::new());
//! let registry = DataGridRegistry::new(query_handlers.clone());
//!
//! let mut builder = RecordingFormBuilder::new();
//! registry.data_grid("news")?.write().build_form(&mut builder)?;
//! assert!(builder.control("filterSubmitButton").is_some());
//! ```

pub mod form;
pub mod logging;
pub mod query;
pub mod registry;

pub use form::{RecordingFormBuilder, StubForm};
pub use logging::init_test_logging;
pub use query::StubQueryHandler;
pub use registry::InMemoryQueryHandlerRegistry;
