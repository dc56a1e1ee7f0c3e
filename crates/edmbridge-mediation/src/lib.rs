//! # edmbridge-mediation
//!
//! Resolves an OData CSDL document into a normalized, self-contained
//! mediation schema ([`Service`]).
//!
//! The resolution pipeline:
//!
//! 1. [`SymbolRegistry`] indexes every entity, complex and enum type, function
//!    and action under its namespace-qualified and alias-qualified names.
//! 2. [`TypeResolver`] classifies raw type references (primitive, structure,
//!    relation, enum, unknown) and unwraps `Collection(...)`.
//! 3. [`InheritanceFlattener`] walks base-type chains for properties and keys.
//! 4. [`SchemaMapper`] drives the three above and produces the [`Service`].
//!
//! The whole document is resolved in one synchronous pass. Any fatal error
//! aborts the mapping; no partial service is returned.
//!
//! ```ignore
//! let edmx = edmbridge_csdl::from_xml_file("schema.xml")?;
//! let service = edmbridge_mediation::map_document(&edmx, &MediationConfig::default())?;
//! println!("{}", service.to_json_pretty()?);
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Configuration options
//! - [`registry`] - Symbol registry
//! - [`primitive`] - EDM primitive table
//! - [`resolver`] - Type resolution
//! - [`inheritance`] - Base-type flattening
//! - [`mapper`] - Mediation schema construction
//! - [`service`] - Mediation schema model
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod inheritance;
pub mod mapper;
pub mod primitive;
pub mod registry;
pub mod resolver;
pub mod service;

// Re-export main types
pub use config::{AmbiguityPolicy, MediationConfig, OverloadPolicy};
pub use error::MediationError;
pub use inheritance::InheritanceFlattener;
pub use mapper::{SchemaMapper, map_document};
pub use registry::{Definition, SymbolKind, SymbolRegistry};
pub use resolver::{RelationTarget, TypeResolver};
pub use service::{
    BindingType, CollectionDef, EntityTypeDef, EnumDef, InvocationArgument, InvocationDef,
    PropertyDescriptor, PropertyKind, Service, StructureDef, TypeDef,
};

/// Result type for mediation operations.
pub type Result<T> = std::result::Result<T, MediationError>;
