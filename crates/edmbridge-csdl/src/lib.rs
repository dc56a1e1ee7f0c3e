//! # edmbridge-csdl
//!
//! Typed in-memory representation of an OData CSDL (EDMX) document.
//!
//! The model mirrors the parts of the CSDL surface syntax the mediation
//! pipeline consumes:
//!
//! - `Edmx` / `DataServices` / `Schema` with namespace and optional alias
//! - entity, complex and enum type declarations
//! - functions and actions with parameters and return types
//! - one entity container with entity sets and function/action imports
//!
//! Documents can be built in memory (the types implement `Default` and carry
//! small builder helpers) or read from EDMX XML with [`from_xml_str`] and
//! [`from_xml_file`].
//!
//! ## Modules
//!
//! - [`model`] - Document types
//! - [`reader`] - XML reader
//! - [`error`] - Error types

pub mod error;
pub mod model;
pub mod reader;

pub use error::CsdlError;
pub use model::{
    Action, ActionImport, ComplexType, DataServices, Edmx, EntityContainer, EntitySet, EntityType,
    EnumMember, EnumType, Function, FunctionImport, Key, NavigationProperty, Parameter, Property,
    PropertyRef, ReturnType, Schema,
};
pub use reader::{from_xml_file, from_xml_str};

/// Result type for CSDL operations.
pub type Result<T> = std::result::Result<T, CsdlError>;
