//! Query handler registry double

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use datagrid_core::{QueryHandler, QueryHandlerError, QueryHandlerRegistry, QueryHandlerResult};
use parking_lot::Mutex;
use serde_json::Value;

use crate::query::StubQueryHandler;

/// Query handler registry building [`StubQueryHandler`]s from raw configuration.
///
/// Registering a configuration drops the handler previously built for its code.
#[derive(Debug, Default)]
pub struct InMemoryQueryHandlerRegistry {
	configurations: Mutex<HashMap<String, Value>>,
	handlers: Mutex<HashMap<String, Arc<StubQueryHandler>>>,
	builds: AtomicUsize,
}

impl InMemoryQueryHandlerRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers an already built handler.
	pub fn add_handler(&self, code: impl Into<String>, handler: Arc<StubQueryHandler>) {
		self.handlers.lock().insert(code.into(), handler);
	}

	/// Raw configuration registered under `code`.
	pub fn configuration(&self, code: &str) -> Option<Value> {
		self.configurations.lock().get(code).cloned()
	}

	/// Built handler registered under `code`.
	pub fn handler(&self, code: &str) -> Option<Arc<StubQueryHandler>> {
		self.handlers.lock().get(code).cloned()
	}

	/// Number of handlers built from raw configuration.
	pub fn build_count(&self) -> usize {
		self.builds.load(Ordering::SeqCst)
	}
}

impl QueryHandlerRegistry for InMemoryQueryHandlerRegistry {
	fn add_raw_query_handler_configuration(
		&self,
		code: &str,
		configuration: Value,
	) -> QueryHandlerResult<()> {
		self.configurations
			.lock()
			.insert(code.to_string(), configuration);
		self.handlers.lock().remove(code);
		Ok(())
	}

	fn query_handler(&self, code: &str) -> QueryHandlerResult<Arc<dyn QueryHandler>> {
		if let Some(handler) = self.handler(code) {
			return Ok(handler as Arc<dyn QueryHandler>);
		}

		let configuration = self
			.configuration(code)
			.ok_or_else(|| QueryHandlerError::MissingQueryHandler(code.to_string()))?;
		let handler = Arc::new(StubQueryHandler::from_configuration(code, &configuration)?);
		self.builds.fetch_add(1, Ordering::SeqCst);
		self.add_handler(code, Arc::clone(&handler));
		Ok(handler as Arc<dyn QueryHandler>)
	}
}
