//! End-to-end request flow: settings, registry, param conversion, form
//! building, request binding and rendering.
#![cfg(feature = "params")]

use std::collections::HashMap;

use bytes::Bytes;
use datagrid::prelude::*;
use datagrid_test::{InMemoryQueryHandlerRegistry, RecordingFormBuilder, init_test_logging};
use rstest::*;

const SETTINGS: &str = r#"
default_template: "datagrid/default.html"
configurations:
  news:
    query_handler:
      filters: { title: ~, id: { hidden: true } }
      per_page: 2
      rows:
        - { id: 1, title: "Release", published: true }
        - { id: 2, title: "Roadmap", published: false }
        - { id: 3, title: "Changelog", published: true }
    columns:
      title: ~
      published: { label: "Online" }
    actions:
      create: { label: "New article", route: "news_create" }
    submitButton: { label: "Search" }
"#;

#[fixture]
fn converter() -> DataGridParamConverter {
	init_test_logging();
	let registry = DataGridRegistry::new(Arc::new(InMemoryQueryHandlerRegistry::new()));
	DataGridSettings::from_yaml_str(SETTINGS)
		.unwrap()
		.register(&registry);
	DataGridParamConverter::new(Arc::new(registry))
}

#[rstest]
fn test_request_flow(converter: DataGridParamConverter) {
	let request = http::Request::builder()
		.uri("/admin/news?page=2&title=a")
		.body(Bytes::new())
		.unwrap();
	let path_params = HashMap::from([("dataGrid".to_string(), "news".to_string())]);
	let ctx = ParamContext::from_request(&request, path_params);
	let config = ParamConfiguration::new("dataGrid", DATA_GRID_TYPE);

	let grid = converter.apply(&ctx, &config).unwrap().unwrap();
	let mut grid = grid.write();
	assert_eq!(grid.template(), Some("datagrid/default.html"));

	grid
		.set_action_parameters("create", json!({ "section": "blog" }).as_object().cloned().unwrap())
		.unwrap();

	let mut builder = RecordingFormBuilder::new().with_option("action", json!("/admin/news"));
	grid.build_form(&mut builder).unwrap();
	assert_eq!(
		builder.control_names(),
		vec!["filterResetButton", "filterSubmitButton", "actions", "title", "id"]
	);
	let create = builder.control("actions").unwrap().child("create").unwrap();
	assert_eq!(create.control_type, ControlType::Link);
	assert_eq!(create.options["route_parameters"], json!({ "section": "blog" }));

	grid.handle_request(&request).unwrap();
	let pager = grid.pager().unwrap();
	assert_eq!(pager.current_page(), 2);
	assert_eq!(pager.total_pages(), 2);

	let labels: Vec<String> = grid.columns().iter().map(Column::render_label).collect();
	assert_eq!(labels, vec!["Title", "Online"]);

	let cells: Vec<String> = pager
		.items()
		.iter()
		.flat_map(|row| grid.columns().iter().map(move |column| column.render_value(row)))
		.collect();
	assert_eq!(cells, vec!["Changelog", "Yes"]);

	assert_eq!(grid.form_view().unwrap().children.len(), 2);
}

#[rstest]
fn test_unknown_grid_in_request(converter: DataGridParamConverter) {
	let ctx = ParamContext::new(
		HashMap::new(),
		HashMap::from([("dataGrid".to_string(), "orders".to_string())]),
	);
	let config = ParamConfiguration::new("dataGrid", DATA_GRID_TYPE);

	let error = converter.apply(&ctx, &config).unwrap_err();
	assert!(matches!(
		error,
		ParamError::DataGrid(DataGridError::DataGridNotFound(_))
	));
}
