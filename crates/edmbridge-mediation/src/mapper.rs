//! Mediation schema construction.
//!
//! [`SchemaMapper`] drives the registry, resolver and flattener over a whole
//! document and assembles the [`Service`]. Sections are built in a fixed
//! order (collections, entity types, structures, enums, functions, actions),
//! each in declaration order. The first error aborts the pass.

use edmbridge_csdl::{Edmx, EnumType, Parameter, ReturnType};
use indexmap::IndexMap;
use tracing::{debug, info, instrument};

use crate::config::MediationConfig;
use crate::error::MediationError;
use crate::inheritance::InheritanceFlattener;
use crate::primitive::{DEFAULT_ENUM_VALUES_TYPE, normalize_primitive};
use crate::registry::SymbolRegistry;
use crate::resolver::TypeResolver;
use crate::service::{
    BindingType, CollectionDef, EntityTypeDef, EnumDef, InvocationArgument, InvocationDef,
    PropertyDescriptor, Service, StructureDef, TypeDef,
};

/// Resolves a CSDL document into a mediation [`Service`].
///
/// # Errors
///
/// Returns the first registration or resolution error encountered.
pub fn map_document(edmx: &Edmx, config: &MediationConfig) -> Result<Service, MediationError> {
    let registry = SymbolRegistry::build(edmx, config)?;
    SchemaMapper::new(&registry, config).map()
}

/// Function or action, as seen by the binding classifier.
struct InvocationSource<'d> {
    canonical_name: &'d str,
    name: &'d str,
    is_bound: bool,
    is_imported: bool,
    entity_set_path: Option<&'d str>,
    parameters: &'d [Parameter],
    return_type: Option<&'d ReturnType>,
}

/// Builds a [`Service`] from a populated [`SymbolRegistry`].
pub struct SchemaMapper<'a> {
    registry: &'a SymbolRegistry,
    config: &'a MediationConfig,
    resolver: TypeResolver<'a>,
    flattener: InheritanceFlattener<'a>,
}

impl<'a> SchemaMapper<'a> {
    pub fn new(registry: &'a SymbolRegistry, config: &'a MediationConfig) -> Self {
        Self {
            registry,
            config,
            resolver: TypeResolver::new(registry, config),
            flattener: InheritanceFlattener::new(registry),
        }
    }

    /// Maps the whole registry.
    ///
    /// # Errors
    ///
    /// Any resolution error aborts the mapping; no partial service is
    /// returned.
    #[instrument(skip(self), name = "schema_mapper")]
    pub fn map(&self) -> Result<Service, MediationError> {
        let container = self.registry.entity_container()?;
        let mut service = Service::new(container.name.clone(), self.config.service_kind.clone());

        service.collections = self.map_collections()?;

        for (name, _) in self.registry.entity_types() {
            let def = self.map_entity_type(name)?;
            service.types.insert(name.to_string(), TypeDef::EntityType(def));
        }
        for (name, _) in self.registry.complex_types() {
            let def = self.map_structure(name)?;
            service.types.insert(name.to_string(), TypeDef::Structure(def));
        }
        for (name, enum_type) in self.registry.enum_types() {
            service
                .types
                .insert(name.to_string(), TypeDef::Enum(map_enum(enum_type)));
        }

        for (name, function) in self.registry.functions() {
            let source = InvocationSource {
                canonical_name: name,
                name: &function.name,
                is_bound: function.is_bound,
                is_imported: self.registry.is_function_import(name),
                entity_set_path: function.entity_set_path.as_deref(),
                parameters: &function.parameters,
                return_type: function.return_type.as_ref(),
            };
            service
                .invocations
                .insert(name.to_string(), self.map_invocation(&source)?);
        }
        for (name, action) in self.registry.actions() {
            let source = InvocationSource {
                canonical_name: name,
                name: &action.name,
                is_bound: action.is_bound,
                is_imported: self.registry.is_action_import(name),
                entity_set_path: action.entity_set_path.as_deref(),
                parameters: &action.parameters,
                return_type: action.return_type.as_ref(),
            };
            service
                .invocations
                .insert(name.to_string(), self.map_invocation(&source)?);
        }

        info!(
            service = %service.name,
            collections = service.collections.len(),
            types = service.types.len(),
            invocations = service.invocations.len(),
            "Mediation schema built"
        );

        Ok(service)
    }

    fn map_collections(&self) -> Result<IndexMap<String, CollectionDef>, MediationError> {
        let container = self.registry.entity_container()?;
        let mut collections = IndexMap::new();

        for entity_set in &container.entity_sets {
            let (entity_type, def) = self
                .registry
                .entity_type(&entity_set.entity_type)
                .ok_or_else(|| MediationError::UndefinedEntityType {
                    collection: entity_set.name.clone(),
                    entity_type: entity_set.entity_type.clone(),
                })?;

            collections.insert(
                entity_set.name.clone(),
                CollectionDef {
                    name: entity_set.name.clone(),
                    entity_type: entity_type.to_string(),
                    is_streamable: def.has_stream,
                },
            );
        }

        Ok(collections)
    }

    fn map_entity_type(&self, name: &str) -> Result<EntityTypeDef, MediationError> {
        let (_, entity_type) = self
            .registry
            .entity_type(name)
            .ok_or_else(|| MediationError::UndefinedType(name.to_string()))?;

        let key = self.flattener.resolve_key(name)?;
        if key.len() > 1 {
            return Err(MediationError::composite_key(name, key));
        }

        let base_type = entity_type.base_type.as_deref().map(|base| {
            self.registry
                .entity_type(base)
                .map_or(base, |(canonical, _)| canonical)
                .to_string()
        });

        debug!(entity_type = name, key = ?key, "Mapping entity type");

        Ok(EntityTypeDef {
            name: entity_type.name.clone(),
            key,
            is_streamable: entity_type.has_stream,
            base_type,
            is_open_type: entity_type.open_type,
            properties: self.map_properties(name)?,
        })
    }

    fn map_structure(&self, name: &str) -> Result<StructureDef, MediationError> {
        let (_, complex_type) = self
            .registry
            .complex_type(name)
            .ok_or_else(|| MediationError::UndefinedType(name.to_string()))?;

        Ok(StructureDef {
            name: complex_type.name.clone(),
            is_open_type: complex_type.open_type,
            properties: self.map_properties(name)?,
        })
    }

    /// Structural then navigation properties along the inheritance chain.
    /// A repeated name keeps its first position and takes the later value.
    fn map_properties(
        &self,
        type_name: &str,
    ) -> Result<IndexMap<String, PropertyDescriptor>, MediationError> {
        let mut properties = IndexMap::new();

        for property in self.flattener.structural_properties(type_name)? {
            let descriptor = self
                .resolver
                .resolve(&property.type_name)?
                .with_required(is_required(property.nullable));
            properties.insert(property.name.clone(), descriptor);
        }
        for property in self.flattener.navigational_properties(type_name)? {
            let descriptor = self
                .resolver
                .resolve(&property.type_name)?
                .with_required(is_required(property.nullable));
            properties.insert(property.name.clone(), descriptor);
        }

        Ok(properties)
    }

    fn map_invocation(
        &self,
        source: &InvocationSource<'_>,
    ) -> Result<InvocationDef, MediationError> {
        let arguments = source
            .parameters
            .iter()
            .map(|parameter| {
                Ok(InvocationArgument {
                    name: parameter.name.clone(),
                    property: self
                        .resolver
                        .resolve(&parameter.type_name)?
                        .with_required(is_required(parameter.nullable)),
                })
            })
            .collect::<Result<Vec<_>, MediationError>>()?;

        let result = source
            .return_type
            .map(|return_type| self.resolver.resolve(&return_type.type_name))
            .transpose()?;

        let mut bound_to = None;
        let binding_type = if source.is_imported && !source.is_bound {
            BindingType::Unbound
        } else if source.is_bound {
            let binding = arguments.first().ok_or_else(|| {
                MediationError::BoundInvocationWithoutParameters(source.canonical_name.to_string())
            })?;
            bound_to = Some(binding.property.value_type.clone());
            if binding.property.is_collection {
                BindingType::Collection
            } else {
                BindingType::Entity
            }
        } else {
            BindingType::Unknown
        };

        debug!(
            invocation = source.canonical_name,
            binding_type = ?binding_type,
            "Mapped invocation"
        );

        Ok(InvocationDef {
            name: source.name.to_string(),
            binding_type,
            bound_to,
            bound_data_pointer: source.entity_set_path.map(str::to_string),
            arguments,
            result,
        })
    }
}

fn map_enum(enum_type: &EnumType) -> EnumDef {
    let values_type = match enum_type.underlying_type.as_deref() {
        None => DEFAULT_ENUM_VALUES_TYPE.to_string(),
        Some(underlying) => normalize_primitive(underlying).unwrap_or(underlying).to_string(),
    };

    EnumDef {
        name: enum_type.name.clone(),
        values_type,
        is_multiselect: enum_type.is_flags,
        members: enum_type
            .members
            .iter()
            .map(|member| (member.name.clone(), member.value.clone().unwrap_or_default()))
            .collect(),
    }
}

/// Declared non-nullable means required; undeclared means optional.
fn is_required(nullable: Option<bool>) -> bool {
    nullable == Some(false)
}
