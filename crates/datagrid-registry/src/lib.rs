//! Datagrid registry
//!
//! Holds raw datagrid configurations and turns them into [`DataGrid`]
//! instances the first time they are requested. Configurations usually come
//! from the application settings, see [`DataGridSettings`].
//!
//! ```rust,ignore
//! use datagrid_registry::{DataGridRegistry, DataGridSettings};
//!
//! let registry = DataGridRegistry::new(query_handler_registry);
//! DataGridSettings::from_yaml_str(include_str!("datagrid.yaml"))?.register(&registry);
//!
//! let news = registry.data_grid("news")?;
//! assert_eq!(news.read().code(), "news");
//! ```
//!
//! [`DataGrid`]: datagrid_core::DataGrid

#![warn(missing_docs)]

pub mod registry;
pub mod settings;

pub use registry::{DataGridRegistry, QUERY_HANDLER_PREFIX};
pub use settings::DataGridSettings;
