//! # edmbridge-graphql
//!
//! GraphQL SDL generation for EdmBridge mediation schemas.
//!
//! The generator turns a [`Service`](edmbridge_mediation::Service) into SDL
//! text with:
//!
//! - an object type per entity type and structure
//! - a `<Type>Input` input type per entity type (no id, no relations, every
//!   field optional)
//! - an enum per enumeration
//! - `Query`/`Mutation` roots with CRUD fields per collection, routed through
//!   the `@backend` directive
//!
//! ## Configuration
//!
//! Add to `edmbridge.toml`:
//!
//! ```toml
//! [graphql]
//! product = "catalog"
//! enum_provenance = false
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Configuration options
//! - [`generator`] - Service to SDL generation
//! - [`sdl`] - SDL document model and rendering
//! - [`directives`] - Routing and provenance directives
//! - [`scalars`] - Scalar and name conversions
//! - [`error`] - Error types for SDL generation

pub mod config;
pub mod directives;
pub mod error;
pub mod generator;
pub mod scalars;
pub mod sdl;

// Re-export main types
pub use config::SdlConfig;
pub use error::SdlError;
pub use generator::{SdlGenerator, generate_sdl};
pub use sdl::{Definition, DefinitionKind, Directive, DirectiveDeclaration, Field, SdlSchema};

/// Result type for SDL generation.
pub type Result<T> = std::result::Result<T, SdlError>;
