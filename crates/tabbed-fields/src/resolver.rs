//! Nested field resolution from flat meta keys.
//!
//! Walks a schema and reads the store key by key, rebuilding the nested
//! [`FieldTree`]. Repeater rows and flexible instances live under
//! `{parent}_{index}_{field}` keys:
//!
//! ```text
//! tabs              = 2
//! tabs_0_title      = "Overview"
//! tabs_0_tabs       = 1
//! tabs_0_tabs_0_title = "Details"
//! tabs_1_title      = "Pricing"
//! ```

use crate::schema::{FieldKind, FieldSchema, Layout};
use crate::store::{ItemId, MetaStore};
use crate::value::{FieldTree, FieldValue, LayoutInstance, MetaValue};

/// Recoverable problem found while resolving.
///
/// Each issue affects only the field or instance it names; resolution of
/// everything else continues.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Stored layout tag has no matching layout in the schema.
    #[error("{key}: instance {index} uses unknown layout '{layout}'")]
    SchemaMismatch {
        /// Container meta key.
        key: String,
        /// Instance position.
        index: usize,
        /// Stored tag.
        layout: String,
    },
    /// Repeater count is not a non-negative integer.
    #[error("{key}: repeater count {value:?} is not a non-negative integer")]
    MalformedCount {
        /// Repeater meta key.
        key: String,
        /// Stored value.
        value: MetaValue,
    },
    /// Repeater count is larger than the resolver accepts.
    #[error("{key}: repeater count {count} exceeds the limit of {max} rows")]
    TooManyRows {
        /// Repeater meta key.
        key: String,
        /// Stored count.
        count: usize,
        /// Active row limit.
        max: usize,
    },
    /// Flexible container value is not a list of layout tags.
    #[error("{key}: expected a list of layout tags, found {value:?}")]
    MalformedLayouts {
        /// Container meta key.
        key: String,
        /// Stored value.
        value: MetaValue,
    },
}

/// Result of resolving a schema for one content item.
#[derive(Debug, Default)]
pub struct Resolution {
    /// Resolved fields.
    pub tree: FieldTree,
    /// Recoverable problems, in the order they were found.
    pub issues: Vec<ResolveError>,
}

impl Resolution {
    /// Discard issues and keep the tree.
    #[must_use]
    pub fn into_tree(self) -> FieldTree {
        self.tree
    }
}

/// Default limit on the rows of one repeater.
pub const DEFAULT_MAX_ROWS: usize = 1000;

/// Resolves schemas against a [`MetaStore`].
///
/// A repeater whose stored count exceeds the row limit is omitted and
/// reported as [`ResolveError::TooManyRows`].
pub struct Resolver<'a, S: MetaStore + ?Sized> {
    store: &'a S,
    max_rows: usize,
}

impl<'a, S: MetaStore + ?Sized> Resolver<'a, S> {
    /// Create a resolver reading from `store`, limited to
    /// [`DEFAULT_MAX_ROWS`] rows per repeater.
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }

    /// Set the row limit per repeater.
    #[must_use]
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    /// Resolve all fields of `schema` for `item`.
    pub fn resolve(&self, item: ItemId, schema: &[FieldSchema]) -> Resolution {
        let mut issues = Vec::new();
        let tree = self.resolve_level(item, schema, "", &mut issues);
        for issue in &issues {
            tracing::warn!(item = %item, error = %issue, "Skipped malformed field data");
        }
        Resolution { tree, issues }
    }

    fn resolve_level(
        &self,
        item: ItemId,
        fields: &[FieldSchema],
        prefix: &str,
        issues: &mut Vec<ResolveError>,
    ) -> FieldTree {
        let mut tree = FieldTree::new();

        for field in fields {
            if field.name.is_empty() {
                continue;
            }

            let meta_key = format!("{prefix}{}", field.name);
            let raw = self.store.get(item, &meta_key);

            match &field.kind {
                FieldKind::Scalar => tree.insert(field.name.as_str(), FieldValue::Scalar(raw)),
                FieldKind::Repeater { sub_fields } => {
                    let Some(raw) = raw.filter(|v| !v.is_empty()) else {
                        continue;
                    };
                    let rows = self.resolve_rows(item, sub_fields, &meta_key, &raw, issues);
                    if !rows.is_empty() {
                        tree.insert(field.name.as_str(), FieldValue::Rows(rows));
                    }
                }
                FieldKind::Flexible { layouts } => {
                    let Some(raw) = raw.filter(|v| !v.is_empty()) else {
                        continue;
                    };
                    let instances = self.resolve_layouts(item, layouts, &meta_key, raw, issues);
                    if !instances.is_empty() {
                        tree.insert(field.name.as_str(), FieldValue::Layouts(instances));
                    }
                }
            }
        }

        tree
    }

    fn resolve_rows(
        &self,
        item: ItemId,
        sub_fields: &[FieldSchema],
        meta_key: &str,
        raw: &MetaValue,
        issues: &mut Vec<ResolveError>,
    ) -> Vec<FieldTree> {
        let Some(count) = raw.as_count() else {
            issues.push(ResolveError::MalformedCount {
                key: meta_key.to_owned(),
                value: raw.clone(),
            });
            return Vec::new();
        };

        if count > self.max_rows {
            issues.push(ResolveError::TooManyRows {
                key: meta_key.to_owned(),
                count,
                max: self.max_rows,
            });
            return Vec::new();
        }

        if sub_fields.is_empty() {
            return Vec::new();
        }

        (0..count)
            .map(|i| self.resolve_level(item, sub_fields, &format!("{meta_key}_{i}_"), issues))
            .collect()
    }

    fn resolve_layouts(
        &self,
        item: ItemId,
        layouts: &[Layout],
        meta_key: &str,
        raw: MetaValue,
        issues: &mut Vec<ResolveError>,
    ) -> Vec<LayoutInstance> {
        let MetaValue::List(tags) = raw else {
            issues.push(ResolveError::MalformedLayouts {
                key: meta_key.to_owned(),
                value: raw,
            });
            return Vec::new();
        };

        let mut instances = Vec::with_capacity(tags.len());
        for (i, tag) in tags.into_iter().enumerate() {
            let Some(layout) = layouts.iter().find(|l| l.name == tag) else {
                issues.push(ResolveError::SchemaMismatch {
                    key: meta_key.to_owned(),
                    index: i,
                    layout: tag,
                });
                continue;
            };

            if layout.sub_fields.is_empty() {
                continue;
            }

            let fields =
                self.resolve_level(item, &layout.sub_fields, &format!("{meta_key}_{i}_"), issues);
            instances.push(LayoutInstance { layout: tag, fields });
        }

        instances
    }
}
