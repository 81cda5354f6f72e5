//! # Datagrid
//!
//! Configuration-driven datagrids for web applications.
//!
//! A datagrid is declared once in configuration (its columns, actions,
//! filter buttons and query handler) and built lazily when a request first
//! needs it. The host framework supplies the form engine and the query
//! engine through the traits re-exported here.
//!
//! ## Feature Flags
//!
//! - `registry` - Lazy registry and settings loading
//! - `params` - Request parameter conversion (implies `registry`)
//! - `full` (default) - Everything above
//! - `test` - Test doubles for collaborators
//!
//! With `default-features = false` only the datagrid model is exported.
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use datagrid::prelude::*;
//!
//! let registry = Arc::new(DataGridRegistry::new(query_handler_registry));
//! DataGridSettings::from_yaml_str(SETTINGS)?.register(&registry);
//!
//! let converter = DataGridParamConverter::new(registry);
//! let ctx = ParamContext::from_request(&request, path_params);
//! let config = ParamConfiguration::new("dataGrid", DATA_GRID_TYPE);
//!
//! if let Some(grid) = converter.apply(&ctx, &config)? {
//!     let mut grid = grid.write();
//!     grid.build_form(&mut form_builder)?;
//!     grid.handle_request(&request)?;
//!     let pager = grid.pager()?;
//! }
//! ```

pub use datagrid_core as model;

#[cfg(feature = "registry")]
pub use datagrid_registry as registry;

#[cfg(feature = "params")]
pub use datagrid_params as params;

#[cfg(feature = "test")]
pub use datagrid_test as test;

// Re-export core types
pub use datagrid_core::{
	Column, ColumnConfig, ColumnLabelRenderer, ColumnValueRenderer, Control, ControlOptions,
	ControlType, DataGrid, DataGridError, DataGridOptions, DataGridResult,
	DefaultColumnLabelRenderer, DefaultColumnValueRenderer, FilterDescriptor, Form, FormBuilder,
	FormView, HttpRequest, OptionsMap, Pager, QueryHandler, QueryHandlerError,
	QueryHandlerRegistry, QueryHandlerResult, RESET_BUTTON, Renderers, SUBMIT_BUTTON,
	SharedDataGrid,
};

#[cfg(feature = "registry")]
pub use datagrid_registry::{DataGridRegistry, DataGridSettings, QUERY_HANDLER_PREFIX};

#[cfg(feature = "params")]
pub use datagrid_params::{
	DATA_GRID_TYPE, DataGridParamConverter, ParamConfiguration, ParamContext, ParamConverter,
	ParamError, ParamResult,
};

// Re-export common external dependencies
pub use serde::{Deserialize, Serialize};
pub use serde_json;

pub mod prelude {
	//! Commonly used types.

	pub use std::sync::Arc;

	pub use crate::{
		Column, ColumnConfig, Control, ControlType, DataGrid, DataGridError, DataGridOptions,
		DataGridResult, Form, FormBuilder, FormView, OptionsMap, Pager, QueryHandler,
		QueryHandlerRegistry, Renderers, SharedDataGrid,
	};

	#[cfg(feature = "registry")]
	pub use crate::{DataGridRegistry, DataGridSettings};

	#[cfg(feature = "params")]
	pub use crate::{
		DATA_GRID_TYPE, DataGridParamConverter, ParamConfiguration, ParamContext,
		ParamConverter, ParamError,
	};

	// External
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Value, json};
}
