//! Schema adapters: vendor formats to [`SchemaNode`].
//!
//! Each adapter handles one vendor format, selected by vendor id through an
//! [`AdapterRegistry`]. Vendor quirks stay inside their adapter; the rest of
//! the compiler only sees the IR.
//!
//! # Available Adapters
//!
//! - [`JsonSchemaAdapter`] - JSON Schema (`json-schema`)
//! - [`NativeAdapter`] - the IR's own serde form (`procli`)

mod json_schema;
mod native;

use std::fmt;

use indexmap::IndexMap;
pub use json_schema::JsonSchemaAdapter;
pub use native::NativeAdapter;
use once_cell::sync::OnceCell;
use procli_ir::SchemaNode;
use procli_manifest::InputSchema;
use serde_json::Value;

use crate::error::SchemaIncompatibility;

/// Converts one vendor's schema format into the IR.
pub trait SchemaAdapter: Send + Sync {
    /// Vendor id this adapter handles (e.g. "json-schema").
    fn vendor(&self) -> &'static str;

    /// Convert a raw schema value.
    fn to_ir(&self, schema: &Value) -> Result<SchemaNode, SchemaIncompatibility>;
}

/// An opaque schema value tagged with its vendor.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSchema {
    pub vendor: String,
    pub value: Value,
}

impl RawSchema {
    pub fn new(vendor: impl Into<String>, value: Value) -> Self {
        Self {
            vendor: vendor.into(),
            value,
        }
    }
}

impl From<&InputSchema> for RawSchema {
    fn from(input: &InputSchema) -> Self {
        Self::new(input.vendor.clone(), input.schema.clone())
    }
}

type AdapterLoader = Box<dyn Fn() -> Result<Box<dyn SchemaAdapter>, String> + Send + Sync>;

enum AdapterSlot {
    Ready(Box<dyn SchemaAdapter>),
    /// Loaded on first use. The outcome is cached, failures included.
    Lazy {
        loader: AdapterLoader,
        cell: OnceCell<Result<Box<dyn SchemaAdapter>, String>>,
    },
}

impl AdapterSlot {
    fn get(&self) -> Result<&dyn SchemaAdapter, &str> {
        match self {
            AdapterSlot::Ready(adapter) => Ok(adapter.as_ref()),
            AdapterSlot::Lazy { loader, cell } => match cell.get_or_init(|| loader()) {
                Ok(adapter) => Ok(adapter.as_ref()),
                Err(reason) => Err(reason.as_str()),
            },
        }
    }
}

/// Dispatch table from vendor id to adapter.
///
/// # Example
///
/// ```ignore
/// let mut registry = AdapterRegistry::new();
/// registry.register_lazy("zod", || load_zod_adapter());
///
/// let node = registry.to_ir(&RawSchema::new("json-schema", json!({ "type": "string" })))?;
/// ```
pub struct AdapterRegistry {
    adapters: IndexMap<String, AdapterSlot>,
}

impl AdapterRegistry {
    /// Create a registry with the built-in adapters.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(JsonSchemaAdapter);
        registry.register(NativeAdapter);
        registry
    }

    /// Create a registry with no adapters.
    pub fn empty() -> Self {
        Self {
            adapters: IndexMap::new(),
        }
    }

    /// Register an adapter, replacing any previous one for its vendor.
    pub fn register(&mut self, adapter: impl SchemaAdapter + 'static) {
        self.adapters.insert(
            adapter.vendor().to_string(),
            AdapterSlot::Ready(Box::new(adapter)),
        );
    }

    /// Register an adapter that is loaded the first time its vendor is used.
    ///
    /// The loader runs at most once. If it fails, every schema of that vendor
    /// fails with the same reason and the loader is not retried.
    pub fn register_lazy<F>(&mut self, vendor: impl Into<String>, loader: F)
    where
        F: Fn() -> Result<Box<dyn SchemaAdapter>, String> + Send + Sync + 'static,
    {
        self.adapters.insert(
            vendor.into(),
            AdapterSlot::Lazy {
                loader: Box::new(loader),
                cell: OnceCell::new(),
            },
        );
    }

    /// Registered vendor ids in registration order.
    pub fn vendors(&self) -> Vec<&str> {
        self.adapters.keys().map(String::as_str).collect()
    }

    /// Returns true if an adapter is registered for the vendor.
    pub fn contains(&self, vendor: &str) -> bool {
        self.adapters.contains_key(vendor)
    }

    /// Convert a raw schema with the adapter for its vendor.
    pub fn to_ir(&self, raw: &RawSchema) -> Result<SchemaNode, SchemaIncompatibility> {
        let slot = self
            .adapters
            .get(&raw.vendor)
            .ok_or_else(|| SchemaIncompatibility::unknown_vendor(&raw.vendor))?;
        let adapter = slot
            .get()
            .map_err(|reason| SchemaIncompatibility::adapter_unavailable(&raw.vendor, reason))?;
        adapter.to_ir(&raw.value)
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("vendors", &self.vendors())
            .finish()
    }
}
