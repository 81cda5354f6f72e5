//! Common test fixtures for datagrid-core tests
#![allow(dead_code)]

use std::sync::Arc;

use datagrid_core::{DataGrid, OptionsMap, QueryHandler, Renderers};
use datagrid_test::StubQueryHandler;
use rstest::*;
use serde_json::{Value, json};

/// Converts a JSON object literal into an options record.
pub fn record(value: Value) -> OptionsMap {
	value.as_object().cloned().unwrap_or_default()
}

/// Rows served by the news query handler.
#[fixture]
pub fn news_rows() -> Vec<Value> {
	vec![
		json!({ "id": 1, "title": "Release", "published": true, "author": { "name": "Alice" } }),
		json!({ "id": 2, "title": "Roadmap", "published": false, "author": { "name": "Bob" } }),
		json!({ "id": 3, "title": "Changelog", "published": true, "author": { "name": "Charlie" } }),
	]
}

/// Query handler with one visible and one hidden filter.
#[fixture]
pub fn news_handler(news_rows: Vec<Value>) -> Arc<StubQueryHandler> {
	Arc::new(
		StubQueryHandler::new("news")
			.with_filter("title", false)
			.with_filter("id", true)
			.with_rows(news_rows)
			.with_per_page(2),
	)
}

/// Raw configuration of the news grid.
#[fixture]
pub fn news_configuration() -> Value {
	json!({
		"columns": {
			"title": null,
			"author": { "label": "Written by", "property_path": "author.name" },
			"published": {},
		},
		"template": "datagrid/news.html",
		"actions": {
			"create": { "label": "New article", "route": "news_create" },
			"export": { "form_type": "submit", "label": "Export" },
		},
		"submitButton": { "label": "Search" },
	})
}

/// News grid built from its raw configuration.
#[fixture]
pub fn news_grid(news_configuration: Value, news_handler: Arc<StubQueryHandler>) -> DataGrid {
	let query_handler: Arc<dyn QueryHandler> = news_handler;
	DataGrid::from_value("news", news_configuration, query_handler, &Renderers::default()).unwrap()
}
