//! Parameter converters.

use std::sync::Arc;

use datagrid_core::SharedDataGrid;
use datagrid_registry::DataGridRegistry;

use crate::context::{ParamConfiguration, ParamContext};
use crate::error::{ParamError, ParamResult};

/// Target type handled by [`DataGridParamConverter`].
pub const DATA_GRID_TYPE: &str = "DataGrid";

/// Converts a raw request parameter into a typed argument.
pub trait ParamConverter: Send + Sync {
	/// Converted value.
	type Output;

	/// Argument type this converter produces.
	fn target_type(&self) -> &str;

	/// Returns true if this converter resolves the declared argument.
	fn supports(&self, config: &ParamConfiguration) -> bool {
		config.target_type == self.target_type()
	}

	/// Converts a raw parameter value.
	fn convert_value(&self, value: &str) -> ParamResult<Self::Output>;

	/// Resolves the declared argument from the request parameters.
	///
	/// # Errors
	///
	/// Returns [`ParamError::MissingParameter`] when a required parameter is
	/// absent, or the conversion error otherwise.
	fn apply(
		&self,
		ctx: &ParamContext,
		config: &ParamConfiguration,
	) -> ParamResult<Option<Self::Output>> {
		match ctx.get(&config.name) {
			Some(value) => self.convert_value(value).map(Some),
			None if config.optional => Ok(None),
			None => Err(ParamError::MissingParameter(config.name.clone())),
		}
	}
}

/// Resolves datagrid codes through a [`DataGridRegistry`].
#[derive(Debug, Clone)]
pub struct DataGridParamConverter {
	registry: Arc<DataGridRegistry>,
}

impl DataGridParamConverter {
	/// Creates a converter looking codes up in `registry`.
	pub fn new(registry: Arc<DataGridRegistry>) -> Self {
		Self { registry }
	}

	/// Registry used for lookups.
	pub fn registry(&self) -> &Arc<DataGridRegistry> {
		&self.registry
	}
}

impl ParamConverter for DataGridParamConverter {
	type Output = SharedDataGrid;

	fn target_type(&self) -> &str {
		DATA_GRID_TYPE
	}

	fn convert_value(&self, value: &str) -> ParamResult<SharedDataGrid> {
		tracing::trace!(code = value, "resolving data-grid parameter");
		Ok(self.registry.data_grid(value)?)
	}
}
