//! SDL generation from a mediation [`Service`].
//!
//! For every type of the service, in service order:
//!
//! - entity type: an object type plus a `<Type>Input` input type
//! - structure: an object type
//! - enum: an enum type
//!
//! For every collection, in service order, the `Query` root gets a getter by
//! id and a listing field, and the `Mutation` root gets add/update/remove
//! fields routed with `@backend`.

use std::collections::HashSet;

use edmbridge_mediation::{
    CollectionDef, EntityTypeDef, EnumDef, PropertyDescriptor, PropertyKind, Service, TypeDef,
};
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, warn};

use crate::config::SdlConfig;
use crate::directives::{self, methods};
use crate::error::SdlError;
use crate::scalars::{
    capitalize_first, is_builtin_scalar, is_valid_graphql_name, lower_first, scalar_name,
};
use crate::sdl::{Definition, DefinitionKind, Field, SdlSchema};

const PLACEHOLDER_FIELD: &str = "_placeholder";

/// Renders a service as SDL text.
///
/// # Errors
///
/// See [`SdlGenerator::build`].
pub fn generate_sdl(service: &Service, config: &SdlConfig) -> Result<String, SdlError> {
    Ok(SdlGenerator::new(service, config).build()?.to_string())
}

/// Builds an [`SdlSchema`] from a [`Service`].
pub struct SdlGenerator<'a> {
    service: &'a Service,
    config: &'a SdlConfig,
}

impl<'a> SdlGenerator<'a> {
    pub fn new(service: &'a Service, config: &'a SdlConfig) -> Self {
        Self { service, config }
    }

    /// Builds the SDL document.
    ///
    /// Types whose local name was already emitted from another namespace are
    /// skipped with a warning.
    ///
    /// # Errors
    ///
    /// - [`SdlError::CompositeKey`] / [`SdlError::MissingKey`] for entity
    ///   types without exactly one key field
    /// - [`SdlError::UnknownType`] for references to types missing from the
    ///   service
    /// - [`SdlError::InvalidName`] for names GraphQL cannot represent
    pub fn build(&self) -> Result<SdlSchema, SdlError> {
        let mut schema = SdlSchema::new(directives::declarations(self.config.enum_provenance));

        let mut emitted: IndexMap<&str, &str> = IndexMap::new();
        let mut definitions = Vec::new();

        for (qualified_name, type_def) in &self.service.types {
            let local_name = type_def.name();
            if let Some(existing) = emitted.get(local_name) {
                warn!(
                    name = local_name,
                    skipped = %qualified_name,
                    existing = %existing,
                    "A type with this name was already emitted, skipping"
                );
                continue;
            }
            emitted.insert(local_name, qualified_name.as_str());
            ensure_valid_name(local_name)?;

            match type_def {
                TypeDef::EntityType(entity_type) => {
                    let (object, input) = self.entity_definitions(qualified_name, entity_type)?;
                    definitions.push(object);
                    definitions.push(input);
                }
                TypeDef::Structure(structure) => {
                    let fields = self.property_fields(qualified_name, &structure.properties)?;
                    definitions.push(
                        Definition::new(DefinitionKind::Type, &structure.name)
                            .with_fields(or_placeholder(fields)),
                    );
                }
                TypeDef::Enum(enum_def) => definitions.push(self.enum_definition(enum_def)?),
            }
        }

        let mut rooted: HashSet<&str> = HashSet::new();
        for collection in self.service.collections.values() {
            let type_name = self.referenced_name(&collection.name, &collection.entity_type)?;
            if emitted.get(type_name) != Some(&collection.entity_type.as_str()) {
                warn!(
                    collection = %collection.name,
                    entity_type = %collection.entity_type,
                    "Entity type was not emitted under its own name, skipping collection"
                );
                continue;
            }
            if !rooted.insert(collection.entity_type.as_str()) {
                debug!(
                    collection = %collection.name,
                    entity_type = %collection.entity_type,
                    "Entity type already has root fields, skipping collection"
                );
                continue;
            }
            schema.query.fields.extend(query_fields(type_name));
            schema
                .mutation
                .fields
                .extend(self.mutation_fields(type_name, collection));
        }
        for root in [&mut schema.query, &mut schema.mutation] {
            if root.fields.is_empty() {
                root.fields.push(placeholder_field());
            }
        }

        if self.config.declare_custom_scalars {
            schema.definitions.extend(
                self.custom_scalars()
                    .into_iter()
                    .map(|name| Definition::new(DefinitionKind::Scalar, name)),
            );
        }
        schema.definitions.extend(definitions);

        debug!(
            definitions = schema.definitions.len(),
            query_fields = schema.query.fields.len(),
            mutation_fields = schema.mutation.fields.len(),
            "SDL schema built"
        );

        Ok(schema)
    }

    fn entity_definitions(
        &self,
        qualified_name: &str,
        entity_type: &EntityTypeDef,
    ) -> Result<(Definition, Definition), SdlError> {
        let key = match entity_type.key.as_slice() {
            [key] => key.as_str(),
            [] => return Err(SdlError::MissingKey(qualified_name.to_string())),
            _ => {
                return Err(SdlError::CompositeKey {
                    entity_type: qualified_name.to_string(),
                    key: entity_type.key.clone(),
                });
            }
        };

        let mut object_fields = Vec::new();
        let mut input_fields = Vec::new();
        for (name, property) in &entity_type.properties {
            let field = self.property_field(qualified_name, name, property)?;
            if name == key {
                object_fields.push(Field::new(name, "ID"));
                continue;
            }
            if !property.is_relation() {
                input_fields.push(field.clone().with_required(false));
            }
            object_fields.push(field);
        }
        if !entity_type.properties.contains_key(key) {
            warn!(entity_type = qualified_name, key, "Key field is not a property");
        }

        let mut object = Definition::new(DefinitionKind::Type, &entity_type.name)
            .with_fields(or_placeholder(object_fields));
        if self.config.annotate_objects
            && let Some(collection) = self.service.collection_for_entity_type(qualified_name)
        {
            object = object.with_directive(directives::backend(
                &self.config.product,
                &collection.name,
                None,
            ));
        }

        let input = Definition::new(DefinitionKind::Input, input_name(&entity_type.name))
            .with_fields(or_placeholder(input_fields));

        Ok((object, input))
    }

    fn enum_definition(&self, enum_def: &EnumDef) -> Result<Definition, SdlError> {
        let mut values = Vec::with_capacity(enum_def.members.len());
        for (member, literal) in &enum_def.members {
            ensure_valid_name(member)?;
            let value = Field::value(member);
            values.push(if self.config.enum_provenance {
                value.with_directive(directives::enum_value(literal, &enum_def.values_type))
            } else {
                value
            });
        }
        if values.is_empty() {
            warn!(name = %enum_def.name, "Enum has no members, emitting a placeholder value");
            values.push(Field::value(PLACEHOLDER_FIELD));
        }
        Ok(Definition::new(DefinitionKind::Enum, &enum_def.name).with_fields(values))
    }

    fn property_fields(
        &self,
        owner: &str,
        properties: &IndexMap<String, PropertyDescriptor>,
    ) -> Result<Vec<Field>, SdlError> {
        properties
            .iter()
            .map(|(name, property)| self.property_field(owner, name, property))
            .collect()
    }

    fn property_field(
        &self,
        owner: &str,
        name: &str,
        property: &PropertyDescriptor,
    ) -> Result<Field, SdlError> {
        ensure_valid_name(name)?;

        let type_name = match property.property_kind {
            PropertyKind::Primitive => scalar_name(&property.value_type),
            PropertyKind::Unknown => {
                warn!(
                    owner,
                    property = name,
                    value_type = %property.value_type,
                    "Unresolved property type rendered as String"
                );
                "String".to_string()
            }
            PropertyKind::Structure | PropertyKind::Relation | PropertyKind::Enum => self
                .referenced_name(&format!("{owner}.{name}"), &property.value_type)?
                .to_string(),
        };
        let type_name = if property.is_collection {
            format!("[{type_name}]")
        } else {
            type_name
        };

        Ok(Field::new(name, type_name).with_required(property.required))
    }

    fn mutation_fields(&self, type_name: &str, collection: &CollectionDef) -> [Field; 3] {
        let product = self.config.product.as_str();
        let suffix = capitalize_first(type_name);
        let input = input_name(type_name);

        [
            Field::new(format!("add{suffix}"), type_name)
                .with_argument(Field::new("data", &input).required())
                .with_directive(directives::backend(
                    product,
                    &collection.name,
                    Some(methods::ADD),
                )),
            Field::new(format!("update{suffix}"), "Boolean")
                .with_argument(id_argument())
                .with_argument(Field::new("data", &input).required())
                .with_directive(directives::backend(
                    product,
                    &collection.name,
                    Some(methods::UPDATE),
                )),
            Field::new(format!("remove{suffix}"), "Boolean")
                .with_argument(id_argument())
                .with_directive(directives::backend(
                    product,
                    &collection.name,
                    Some(methods::REMOVE),
                )),
        ]
    }

    /// Local name of a type referenced from `referenced_by`.
    fn referenced_name(
        &self,
        referenced_by: &str,
        qualified_name: &str,
    ) -> Result<&'a str, SdlError> {
        self.service
            .type_def(qualified_name)
            .map(TypeDef::name)
            .ok_or_else(|| SdlError::UnknownType {
                referenced_by: referenced_by.to_string(),
                type_name: qualified_name.to_string(),
            })
    }

    /// Non-built-in scalars used by object and input fields, in first-use
    /// order.
    fn custom_scalars(&self) -> IndexSet<String> {
        self.service
            .types
            .values()
            .flat_map(|type_def| match type_def {
                TypeDef::EntityType(def) => Some(&def.properties),
                TypeDef::Structure(def) => Some(&def.properties),
                TypeDef::Enum(_) => None,
            })
            .flat_map(|properties| properties.values())
            .filter(|property| property.property_kind == PropertyKind::Primitive)
            .map(|property| scalar_name(&property.value_type))
            .filter(|name| !is_builtin_scalar(name))
            .collect()
    }
}

fn query_fields(type_name: &str) -> [Field; 2] {
    let field_name = lower_first(type_name);
    [
        Field::new(&field_name, type_name).with_argument(id_argument()),
        Field::new(format!("{field_name}s"), format!("[{type_name}]"))
            .with_argument(Field::new("filter", "String"))
            .with_argument(Field::new("sort", "String")),
    ]
}

fn id_argument() -> Field {
    Field::new("id", "ID").required()
}

fn input_name(type_name: &str) -> String {
    format!("{type_name}Input")
}

fn placeholder_field() -> Field {
    Field::new(PLACEHOLDER_FIELD, "String")
}

fn or_placeholder(fields: Vec<Field>) -> Vec<Field> {
    if fields.is_empty() {
        vec![placeholder_field()]
    } else {
        fields
    }
}

fn ensure_valid_name(name: &str) -> Result<(), SdlError> {
    if is_valid_graphql_name(name) {
        Ok(())
    } else {
        Err(SdlError::InvalidName(name.to_string()))
    }
}
