//! Mediation schema model.
//!
//! The [`Service`] is the terminal artifact of the resolution pipeline. It owns
//! all of its data and carries no references back into the CSDL document, so
//! it can be persisted as JSON and loaded again by the SDL generator.
//!
//! All mappings preserve insertion order, which is the declaration order of
//! the source document. Two runs over the same document produce byte-identical
//! JSON.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::MediationError;

/// Classification of a resolved type reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Primitive,
    Structure,
    Relation,
    Enum,
    Unknown,
}

/// A resolved property, parameter or result type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    /// Normalized scalar name for primitives, canonical qualified name for
    /// structures/relations/enums, diagnostic placeholder for unknown types.
    pub value_type: String,
    pub property_kind: PropertyKind,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_collection: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    /// Collection exposing the related entity type. Only set for relations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_collection: Option<String>,
}

impl PropertyDescriptor {
    pub fn primitive(value_type: impl Into<String>) -> Self {
        Self::new(value_type, PropertyKind::Primitive)
    }

    pub fn structure(value_type: impl Into<String>) -> Self {
        Self::new(value_type, PropertyKind::Structure)
    }

    pub fn enumeration(value_type: impl Into<String>) -> Self {
        Self::new(value_type, PropertyKind::Enum)
    }

    pub fn relation(value_type: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            relation_collection: Some(collection.into()),
            ..Self::new(value_type, PropertyKind::Relation)
        }
    }

    /// Descriptor for a reference that matched nothing known.
    pub fn unknown(type_ref: &str) -> Self {
        Self::new(format!("unknown ({type_ref})"), PropertyKind::Unknown)
    }

    fn new(value_type: impl Into<String>, property_kind: PropertyKind) -> Self {
        Self {
            value_type: value_type.into(),
            property_kind,
            is_collection: false,
            required: false,
            relation_collection: None,
        }
    }

    pub fn into_collection(mut self) -> Self {
        self.is_collection = true;
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn is_relation(&self) -> bool {
        self.property_kind == PropertyKind::Relation
    }
}

/// A non-entity complex type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_open_type: bool,
    pub properties: IndexMap<String, PropertyDescriptor>,
}

/// An entity type with its flattened properties and resolved key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityTypeDef {
    pub name: String,
    pub key: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_streamable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_open_type: bool,
    pub properties: IndexMap<String, PropertyDescriptor>,
}

/// An enumeration with its member literals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDef {
    pub name: String,
    pub values_type: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_multiselect: bool,
    pub members: IndexMap<String, String>,
}

/// A type entry of the service, tagged by kind when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TypeDef {
    EntityType(EntityTypeDef),
    Structure(StructureDef),
    Enum(EnumDef),
}

impl TypeDef {
    /// Local (unqualified) name of the type.
    pub fn name(&self) -> &str {
        match self {
            Self::EntityType(def) => &def.name,
            Self::Structure(def) => &def.name,
            Self::Enum(def) => &def.name,
        }
    }

    pub fn as_entity_type(&self) -> Option<&EntityTypeDef> {
        match self {
            Self::EntityType(def) => Some(def),
            _ => None,
        }
    }

    pub fn as_structure(&self) -> Option<&StructureDef> {
        match self {
            Self::Structure(def) => Some(def),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumDef> {
        match self {
            Self::Enum(def) => Some(def),
            _ => None,
        }
    }
}

/// A named, queryable entity set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDef {
    pub name: String,
    pub entity_type: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_streamable: bool,
}

/// How an invocation is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingType {
    Unbound,
    Entity,
    Collection,
    Unknown,
}

/// A named invocation argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationArgument {
    pub name: String,
    #[serde(flatten)]
    pub property: PropertyDescriptor,
}

/// A function or action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationDef {
    pub name: String,
    pub binding_type: BindingType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound_data_pointer: Option<String>,
    pub arguments: Vec<InvocationArgument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<PropertyDescriptor>,
}

/// The mediation schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub name: String,
    pub kind: String,
    pub collections: IndexMap<String, CollectionDef>,
    pub types: IndexMap<String, TypeDef>,
    pub invocations: IndexMap<String, InvocationDef>,
}

impl Service {
    /// Creates an empty service.
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            collections: IndexMap::new(),
            types: IndexMap::new(),
            invocations: IndexMap::new(),
        }
    }

    /// Looks up a type by canonical qualified name.
    pub fn type_def(&self, qualified_name: &str) -> Option<&TypeDef> {
        self.types.get(qualified_name)
    }

    /// Entity types in declaration order, with their qualified names.
    pub fn entity_types(&self) -> impl Iterator<Item = (&str, &EntityTypeDef)> {
        self.types
            .iter()
            .filter_map(|(name, def)| def.as_entity_type().map(|et| (name.as_str(), et)))
    }

    /// First collection exposing the given entity type.
    pub fn collection_for_entity_type(&self, qualified_name: &str) -> Option<&CollectionDef> {
        self.collections
            .values()
            .find(|collection| collection.entity_type == qualified_name)
    }

    /// Serializes the service as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, MediationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a service from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a service.
    pub fn from_json_str(json: &str) -> Result<Self, MediationError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a service from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, MediationError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| MediationError::io(path, e))?;
        Self::from_json_str(&content)
    }

    /// Writes the service as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_json_file(&self, path: impl AsRef<Path>) -> Result<(), MediationError> {
        let path = path.as_ref();
        let json = self.to_json_pretty()?;
        std::fs::write(path, json).map_err(|e| MediationError::io(path, e))
    }
}
