//! CSDL document types.
//!
//! Field names follow the Rust convention; the serde renames map them to the
//! CSDL XML attributes (`@Name`) and child elements (`Property`). Only the
//! constructs consumed by the mediation pipeline are modelled, everything
//! else (annotations, terms, type definitions, references) is skipped by the
//! reader.

use serde::Deserialize;

/// Element `edmx:Edmx`, the document root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Edmx {
    #[serde(rename = "@Version")]
    pub version: Option<String>,
    #[serde(rename = "DataServices", default)]
    pub data_services: DataServices,
}

impl Edmx {
    /// Creates a document holding the given schemas.
    pub fn new(schemas: impl IntoIterator<Item = Schema>) -> Self {
        Self {
            version: Some("4.0".to_string()),
            data_services: DataServices {
                schemas: schemas.into_iter().collect(),
            },
        }
    }

    /// Schemas in declaration order.
    pub fn schemas(&self) -> &[Schema] {
        &self.data_services.schemas
    }
}

/// Element `edmx:DataServices`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataServices {
    #[serde(rename = "Schema", default)]
    pub schemas: Vec<Schema>,
}

/// Element `edm:Schema`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Schema {
    #[serde(rename = "@Namespace")]
    pub namespace: String,
    #[serde(rename = "@Alias")]
    pub alias: Option<String>,
    #[serde(rename = "EntityContainer")]
    pub entity_container: Option<EntityContainer>,
    #[serde(rename = "EntityType", default)]
    pub entity_types: Vec<EntityType>,
    #[serde(rename = "ComplexType", default)]
    pub complex_types: Vec<ComplexType>,
    #[serde(rename = "EnumType", default)]
    pub enum_types: Vec<EnumType>,
    #[serde(rename = "Function", default)]
    pub functions: Vec<Function>,
    #[serde(rename = "Action", default)]
    pub actions: Vec<Action>,
}

impl Schema {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Default::default()
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_entity_container(mut self, container: EntityContainer) -> Self {
        self.entity_container = Some(container);
        self
    }

    pub fn with_entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_types.push(entity_type);
        self
    }

    pub fn with_complex_type(mut self, complex_type: ComplexType) -> Self {
        self.complex_types.push(complex_type);
        self
    }

    pub fn with_enum_type(mut self, enum_type: EnumType) -> Self {
        self.enum_types.push(enum_type);
        self
    }

    pub fn with_function(mut self, function: Function) -> Self {
        self.functions.push(function);
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }
}

/// Element `edm:EntityType`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntityType {
    #[serde(rename = "@Name")]
    pub name: String,
    #[serde(rename = "@BaseType")]
    pub base_type: Option<String>,
    #[serde(rename = "@Abstract", default)]
    pub is_abstract: bool,
    #[serde(rename = "@OpenType", default)]
    pub open_type: bool,
    #[serde(rename = "@HasStream", default)]
    pub has_stream: bool,
    #[serde(rename = "Key")]
    pub key: Option<Key>,
    #[serde(rename = "Property", default)]
    pub properties: Vec<Property>,
    #[serde(rename = "NavigationProperty", default)]
    pub navigation_properties: Vec<NavigationProperty>,
}

impl EntityType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Declares the key from the given property names.
    pub fn with_key<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key = Some(Key::new(names));
        self
    }

    pub fn with_base_type(mut self, base_type: impl Into<String>) -> Self {
        self.base_type = Some(base_type.into());
        self
    }

    pub fn with_stream(mut self) -> Self {
        self.has_stream = true;
        self
    }

    pub fn open(mut self) -> Self {
        self.open_type = true;
        self
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_navigation_property(mut self, property: NavigationProperty) -> Self {
        self.navigation_properties.push(property);
        self
    }

    /// Property names of the declared key, empty when no key is declared.
    pub fn key_names(&self) -> Vec<String> {
        self.key
            .as_ref()
            .map(|key| key.property_refs.iter().map(|r| r.name.clone()).collect())
            .unwrap_or_default()
    }
}

/// Element `edm:Key`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Key {
    #[serde(rename = "PropertyRef", default)]
    pub property_refs: Vec<PropertyRef>,
}

impl Key {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            property_refs: names
                .into_iter()
                .map(|name| PropertyRef { name: name.into() })
                .collect(),
        }
    }
}

/// Element `edm:PropertyRef`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyRef {
    #[serde(rename = "@Name")]
    pub name: String,
}

/// Element `edm:Property`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Property {
    #[serde(rename = "@Name")]
    pub name: String,
    #[serde(rename = "@Type")]
    pub type_name: String,
    #[serde(rename = "@Nullable")]
    pub nullable: Option<bool>,
}

impl Property {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            nullable: None,
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = Some(nullable);
        self
    }
}

/// Element `edm:NavigationProperty`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NavigationProperty {
    #[serde(rename = "@Name")]
    pub name: String,
    #[serde(rename = "@Type")]
    pub type_name: String,
    #[serde(rename = "@Nullable")]
    pub nullable: Option<bool>,
    #[serde(rename = "@Partner")]
    pub partner: Option<String>,
}

impl NavigationProperty {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = Some(nullable);
        self
    }
}

/// Element `edm:ComplexType`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComplexType {
    #[serde(rename = "@Name")]
    pub name: String,
    #[serde(rename = "@BaseType")]
    pub base_type: Option<String>,
    #[serde(rename = "@Abstract", default)]
    pub is_abstract: bool,
    #[serde(rename = "@OpenType", default)]
    pub open_type: bool,
    #[serde(rename = "Property", default)]
    pub properties: Vec<Property>,
    #[serde(rename = "NavigationProperty", default)]
    pub navigation_properties: Vec<NavigationProperty>,
}

impl ComplexType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_base_type(mut self, base_type: impl Into<String>) -> Self {
        self.base_type = Some(base_type.into());
        self
    }

    pub fn open(mut self) -> Self {
        self.open_type = true;
        self
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_navigation_property(mut self, property: NavigationProperty) -> Self {
        self.navigation_properties.push(property);
        self
    }
}

/// Element `edm:EnumType`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnumType {
    #[serde(rename = "@Name")]
    pub name: String,
    #[serde(rename = "@UnderlyingType")]
    pub underlying_type: Option<String>,
    #[serde(rename = "@IsFlags", default)]
    pub is_flags: bool,
    #[serde(rename = "Member", default)]
    pub members: Vec<EnumMember>,
}

impl EnumType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_underlying_type(mut self, underlying_type: impl Into<String>) -> Self {
        self.underlying_type = Some(underlying_type.into());
        self
    }

    pub fn flags(mut self) -> Self {
        self.is_flags = true;
        self
    }

    pub fn with_member(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.members.push(EnumMember {
            name: name.into(),
            value: Some(value.into()),
        });
        self
    }
}

/// Element `edm:Member`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnumMember {
    #[serde(rename = "@Name")]
    pub name: String,
    #[serde(rename = "@Value")]
    pub value: Option<String>,
}

/// Element `edm:Function`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Function {
    #[serde(rename = "@Name")]
    pub name: String,
    #[serde(rename = "@IsBound", default)]
    pub is_bound: bool,
    #[serde(rename = "@IsComposable", default)]
    pub is_composable: bool,
    #[serde(rename = "@EntitySetPath")]
    pub entity_set_path: Option<String>,
    #[serde(rename = "Parameter", default)]
    pub parameters: Vec<Parameter>,
    #[serde(rename = "ReturnType")]
    pub return_type: Option<ReturnType>,
}

impl Function {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn bound(mut self) -> Self {
        self.is_bound = true;
        self
    }

    pub fn with_entity_set_path(mut self, path: impl Into<String>) -> Self {
        self.entity_set_path = Some(path.into());
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.parameters.push(Parameter::new(name, type_name));
        self
    }

    pub fn returns(mut self, type_name: impl Into<String>) -> Self {
        self.return_type = Some(ReturnType::new(type_name));
        self
    }
}

/// Element `edm:Action`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Action {
    #[serde(rename = "@Name")]
    pub name: String,
    #[serde(rename = "@IsBound", default)]
    pub is_bound: bool,
    #[serde(rename = "@EntitySetPath")]
    pub entity_set_path: Option<String>,
    #[serde(rename = "Parameter", default)]
    pub parameters: Vec<Parameter>,
    #[serde(rename = "ReturnType")]
    pub return_type: Option<ReturnType>,
}

impl Action {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn bound(mut self) -> Self {
        self.is_bound = true;
        self
    }

    pub fn with_entity_set_path(mut self, path: impl Into<String>) -> Self {
        self.entity_set_path = Some(path.into());
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.parameters.push(Parameter::new(name, type_name));
        self
    }

    pub fn returns(mut self, type_name: impl Into<String>) -> Self {
        self.return_type = Some(ReturnType::new(type_name));
        self
    }
}

/// Element `edm:Parameter`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Parameter {
    #[serde(rename = "@Name")]
    pub name: String,
    #[serde(rename = "@Type")]
    pub type_name: String,
    #[serde(rename = "@Nullable")]
    pub nullable: Option<bool>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            nullable: None,
        }
    }
}

/// Element `edm:ReturnType`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReturnType {
    #[serde(rename = "@Type")]
    pub type_name: String,
    #[serde(rename = "@Nullable")]
    pub nullable: Option<bool>,
}

impl ReturnType {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            nullable: None,
        }
    }
}

/// Element `edm:EntityContainer`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntityContainer {
    #[serde(rename = "@Name")]
    pub name: String,
    #[serde(rename = "EntitySet", default)]
    pub entity_sets: Vec<EntitySet>,
    #[serde(rename = "FunctionImport", default)]
    pub function_imports: Vec<FunctionImport>,
    #[serde(rename = "ActionImport", default)]
    pub action_imports: Vec<ActionImport>,
}

impl EntityContainer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_entity_set(
        mut self,
        name: impl Into<String>,
        entity_type: impl Into<String>,
    ) -> Self {
        self.entity_sets.push(EntitySet {
            name: name.into(),
            entity_type: entity_type.into(),
        });
        self
    }

    /// Imports the function with the given qualified name under `name`.
    pub fn with_function_import(
        mut self,
        name: impl Into<String>,
        function: impl Into<String>,
    ) -> Self {
        self.function_imports.push(FunctionImport {
            name: name.into(),
            function: function.into(),
            entity_set: None,
        });
        self
    }

    /// Imports the action with the given qualified name under `name`.
    pub fn with_action_import(
        mut self,
        name: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        self.action_imports.push(ActionImport {
            name: name.into(),
            action: action.into(),
            entity_set: None,
        });
        self
    }
}

/// Element `edm:EntitySet`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntitySet {
    #[serde(rename = "@Name")]
    pub name: String,
    #[serde(rename = "@EntityType")]
    pub entity_type: String,
}

/// Element `edm:FunctionImport`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FunctionImport {
    #[serde(rename = "@Name")]
    pub name: String,
    #[serde(rename = "@Function")]
    pub function: String,
    #[serde(rename = "@EntitySet")]
    pub entity_set: Option<String>,
}

/// Element `edm:ActionImport`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionImport {
    #[serde(rename = "@Name")]
    pub name: String,
    #[serde(rename = "@Action")]
    pub action: String,
    #[serde(rename = "@EntitySet")]
    pub entity_set: Option<String>,
}
