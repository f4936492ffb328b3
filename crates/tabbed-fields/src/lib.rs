//! Field schema and nested field resolution.
//!
//! Content items keep their custom fields in a flat key-value table. This
//! crate rebuilds the nested structure described by a schema:
//!
//! - [`FieldSchema`] / [`FieldKind`] describe scalar, repeater and flexible
//!   container fields
//! - [`MetaStore`] abstracts the host's key-value table, with
//!   [`JsonMetaStore`] for file-backed data and [`MockMetaStore`] for tests
//!   (behind the `mock` feature)
//! - [`Resolver`] walks the schema and produces a [`FieldTree`]
//!
//! # Example
//!
//! ```
//! use tabbed_fields::{ItemId, JsonMetaStore, Resolver, SchemaProvider, TabbedContentSchema};
//!
//! let store = JsonMetaStore::from_json_str(
//!     r#"{ "1": { "tabs": 1, "tabs_0_title": "Intro", "tabs_0_content": "Hello" } }"#,
//! )
//! .unwrap();
//! let schema = TabbedContentSchema::new();
//!
//! let tree = Resolver::new(&store).resolve(ItemId(1), schema.fields()).into_tree();
//! let tabs = tree.rows("tabs").unwrap();
//! assert_eq!(tabs[0].text("title").as_deref(), Some("Intro"));
//! ```

#[cfg(any(test, feature = "mock"))]
mod mock;
mod resolver;
mod schema;
mod store;
mod value;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockMetaStore;
pub use resolver::{DEFAULT_MAX_ROWS, Resolution, ResolveError, Resolver};
pub use schema::{FieldKind, FieldSchema, Layout, SchemaProvider, TabbedContentSchema};
pub use store::{ItemId, JsonMetaStore, MetaStore, StoreError};
pub use value::{FieldTree, FieldValue, LayoutInstance, MetaValue};
