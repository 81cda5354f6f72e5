//! Request parameter conversion
//!
//! Resolves controller arguments from request parameters. The
//! [`DataGridParamConverter`] turns a datagrid code found in the path or the
//! query string into the matching [`SharedDataGrid`] from a
//! [`DataGridRegistry`].
//!
//! ```rust,ignore
//! use datagrid_params::{DataGridParamConverter, ParamConfiguration, ParamContext, ParamConverter};
//!
//! let converter = DataGridParamConverter::new(registry);
//! let ctx = ParamContext::from_request(&request, path_params);
//! let config = ParamConfiguration::new("dataGrid", "DataGrid");
//! if converter.supports(&config) {
//!     let grid = converter.apply(&ctx, &config)?;
//! }
//! ```
//!
//! [`SharedDataGrid`]: datagrid_core::SharedDataGrid
//! [`DataGridRegistry`]: datagrid_registry::DataGridRegistry

#![warn(missing_docs)]

pub mod context;
pub mod converter;
pub mod error;

pub use context::{ParamConfiguration, ParamContext};
pub use converter::{DATA_GRID_TYPE, DataGridParamConverter, ParamConverter};
pub use error::{ParamError, ParamResult};
