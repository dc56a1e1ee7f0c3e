//! Type reference resolution.
//!
//! Classifies a raw CSDL type reference into a [`PropertyDescriptor`]. The
//! branches are tried in a fixed order (primitive, collection wrapper, entity
//! type, complex type, enum type), so exactly one applies to any reference.

use tracing::{debug, trace, warn};

use crate::config::{AmbiguityPolicy, MediationConfig};
use crate::error::MediationError;
use crate::primitive::{is_primitive_namespace, normalize_primitive};
use crate::registry::SymbolRegistry;
use crate::service::PropertyDescriptor;

const COLLECTION_PREFIX: &str = "Collection(";

/// Result of the reverse lookup from an entity type to its collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationTarget {
    /// Exactly one collection exposes the entity type.
    Unique(String),
    /// Several collections expose the entity type, in declaration order.
    Ambiguous(Vec<String>),
}

/// Resolves raw type references against a [`SymbolRegistry`].
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    registry: &'a SymbolRegistry,
    config: &'a MediationConfig,
}

impl<'a> TypeResolver<'a> {
    pub fn new(registry: &'a SymbolRegistry, config: &'a MediationConfig) -> Self {
        Self { registry, config }
    }

    /// Resolves a raw type reference.
    ///
    /// References that match nothing known resolve to an `unknown`
    /// descriptor instead of failing.
    ///
    /// # Errors
    ///
    /// - [`MediationError::UnknownPrimitive`] for an unsupported `Edm.*` keyword
    /// - [`MediationError::CollectionNestingTooDeep`] when `Collection(...)`
    ///   wrappers nest deeper than the configured maximum
    /// - [`MediationError::UnresolvedRelationTarget`] when a referenced entity
    ///   type has no collection
    /// - [`MediationError::AmbiguousRelationTarget`] when several collections
    ///   match and the ambiguity policy is `reject`
    pub fn resolve(&self, type_ref: &str) -> Result<PropertyDescriptor, MediationError> {
        self.resolve_nested(type_ref, type_ref, 0)
    }

    fn resolve_nested(
        &self,
        type_ref: &str,
        original: &str,
        depth: usize,
    ) -> Result<PropertyDescriptor, MediationError> {
        if let Some(scalar) = normalize_primitive(type_ref) {
            return Ok(PropertyDescriptor::primitive(scalar));
        }
        if is_primitive_namespace(type_ref) {
            return Err(MediationError::UnknownPrimitive(type_ref.to_string()));
        }

        if let Some(inner) = unwrap_collection(type_ref) {
            if depth >= self.config.max_collection_depth {
                return Err(MediationError::CollectionNestingTooDeep {
                    type_ref: original.to_string(),
                    max: self.config.max_collection_depth,
                });
            }
            let descriptor = self.resolve_nested(inner, original, depth + 1)?;
            return Ok(descriptor.into_collection());
        }

        if let Some((canonical, _)) = self.registry.entity_type(type_ref) {
            let collection = self.relation_collection(canonical)?;
            trace!(type_ref, collection = %collection, "Resolved relation");
            return Ok(PropertyDescriptor::relation(canonical, collection));
        }
        if let Some((canonical, _)) = self.registry.complex_type(type_ref) {
            return Ok(PropertyDescriptor::structure(canonical));
        }
        if let Some((canonical, _)) = self.registry.enum_type(type_ref) {
            return Ok(PropertyDescriptor::enumeration(canonical));
        }

        debug!(type_ref, "Unresolved type reference");
        Ok(PropertyDescriptor::unknown(type_ref))
    }

    /// Collections whose entity type is `entity_type`, compared by canonical
    /// name. Returns `None` when no collection matches.
    pub fn collections_for(&self, entity_type: &str) -> Option<RelationTarget> {
        let target = self.canonical_entity_type(entity_type);
        let container = self.registry.entity_container().ok()?;

        let mut matches: Vec<String> = container
            .entity_sets
            .iter()
            .filter(|set| self.canonical_entity_type(&set.entity_type) == target)
            .map(|set| set.name.clone())
            .collect();

        match matches.len() {
            0 => None,
            1 => matches.pop().map(RelationTarget::Unique),
            _ => Some(RelationTarget::Ambiguous(matches)),
        }
    }

    fn relation_collection(&self, entity_type: &str) -> Result<String, MediationError> {
        match self.collections_for(entity_type) {
            None => Err(MediationError::UnresolvedRelationTarget(entity_type.to_string())),
            Some(RelationTarget::Unique(collection)) => Ok(collection),
            Some(RelationTarget::Ambiguous(collections)) => match self.config.ambiguous_relations {
                AmbiguityPolicy::First => {
                    warn!(
                        entity_type,
                        collections = ?collections,
                        "Entity type exposed by several collections, using the first"
                    );
                    collections.into_iter().next().ok_or_else(|| {
                        MediationError::UnresolvedRelationTarget(entity_type.to_string())
                    })
                }
                AmbiguityPolicy::Reject => Err(MediationError::AmbiguousRelationTarget {
                    entity_type: entity_type.to_string(),
                    collections,
                }),
            },
        }
    }

    fn canonical_entity_type<'n>(&'n self, name: &'n str) -> &'n str {
        self.registry
            .entity_type(name)
            .map_or(name, |(canonical, _)| canonical)
    }
}

/// Returns the inner reference of `Collection(<inner>)`.
fn unwrap_collection(type_ref: &str) -> Option<&str> {
    type_ref
        .strip_prefix(COLLECTION_PREFIX)
        .and_then(|rest| rest.strip_suffix(')'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Definition;
    use crate::service::PropertyKind;
    use edmbridge_csdl::{ComplexType, EntityContainer, EntityType, EnumType};

    fn registry_with(container: EntityContainer) -> SymbolRegistry {
        let mut registry = SymbolRegistry::new(&MediationConfig::default());
        registry
            .register(
                "Demo.Catalog",
                Some("Cat"),
                Definition::EntityType(EntityType::new("Widget").with_key(["id"])),
            )
            .unwrap();
        registry
            .register(
                "Demo.Catalog",
                Some("Cat"),
                Definition::EntityType(EntityType::new("Orphan").with_key(["id"])),
            )
            .unwrap();
        registry
            .register(
                "Demo.Catalog",
                Some("Cat"),
                Definition::ComplexType(ComplexType::new("Address")),
            )
            .unwrap();
        registry
            .register(
                "Demo.Catalog",
                Some("Cat"),
                Definition::EnumType(EnumType::new("Color")),
            )
            .unwrap();
        registry.set_entity_container(container);
        registry
    }

    fn registry() -> SymbolRegistry {
        registry_with(EntityContainer::new("Container").with_entity_set("Widgets", "Cat.Widget"))
    }

    #[test]
    fn test_resolve_primitives() {
        let registry = registry();
        let config = MediationConfig::default();
        let resolver = TypeResolver::new(&registry, &config);

        let descriptor = resolver.resolve("Edm.DateTimeOffset").unwrap();
        assert_eq!(descriptor.property_kind, PropertyKind::Primitive);
        assert_eq!(descriptor.value_type, "datetime");
        assert!(!descriptor.is_collection);

        assert_eq!(resolver.resolve("Edm.Guid").unwrap().value_type, "string");
    }

    #[test]
    fn test_unknown_primitive_is_fatal() {
        let registry = registry();
        let config = MediationConfig::default();
        let resolver = TypeResolver::new(&registry, &config);

        let err = resolver.resolve("Edm.TimeOfDay").unwrap_err();
        assert!(
            matches!(err, MediationError::UnknownPrimitive(ref name) if name == "Edm.TimeOfDay")
        );
    }

    #[test]
    fn test_collection_matches_inner_resolution() {
        let registry = registry();
        let config = MediationConfig::default();
        let resolver = TypeResolver::new(&registry, &config);

        for inner in [
            "Edm.String",
            "Demo.Catalog.Widget",
            "Cat.Address",
            "Cat.Color",
            "Vendor.Missing",
        ] {
            let plain = resolver.resolve(inner).unwrap();
            let wrapped = resolver.resolve(&format!("Collection({inner})")).unwrap();
            assert!(wrapped.is_collection, "{inner}");
            assert_eq!(wrapped, plain.into_collection(), "{inner}");
        }
    }

    #[test]
    fn test_collection_depth_is_bounded() {
        let registry = registry();
        let config = MediationConfig {
            max_collection_depth: 2,
            ..MediationConfig::default()
        };
        let resolver = TypeResolver::new(&registry, &config);

        assert!(resolver.resolve("Collection(Collection(Edm.String))").is_ok());
        let err = resolver
            .resolve("Collection(Collection(Collection(Edm.String)))")
            .unwrap_err();
        assert!(matches!(
            err,
            MediationError::CollectionNestingTooDeep { max: 2, .. }
        ));
    }

    #[test]
    fn test_malformed_collection_is_unknown() {
        let registry = registry();
        let config = MediationConfig::default();
        let resolver = TypeResolver::new(&registry, &config);

        let descriptor = resolver.resolve("Collection(Edm.String").unwrap();
        assert_eq!(descriptor.property_kind, PropertyKind::Unknown);
    }

    #[test]
    fn test_resolve_relation_canonicalizes_alias() {
        let registry = registry();
        let config = MediationConfig::default();
        let resolver = TypeResolver::new(&registry, &config);

        let descriptor = resolver.resolve("Cat.Widget").unwrap();
        assert_eq!(descriptor.property_kind, PropertyKind::Relation);
        assert_eq!(descriptor.value_type, "Demo.Catalog.Widget");
        assert_eq!(descriptor.relation_collection.as_deref(), Some("Widgets"));
    }

    #[test]
    fn test_relation_without_collection_fails() {
        let registry = registry();
        let config = MediationConfig::default();
        let resolver = TypeResolver::new(&registry, &config);

        let err = resolver.resolve("Demo.Catalog.Orphan").unwrap_err();
        assert!(matches!(
            err,
            MediationError::UnresolvedRelationTarget(ref name) if name == "Demo.Catalog.Orphan"
        ));
    }

    #[test]
    fn test_structure_enum_and_unknown() {
        let registry = registry();
        let config = MediationConfig::default();
        let resolver = TypeResolver::new(&registry, &config);

        let address = resolver.resolve("Cat.Address").unwrap();
        assert_eq!(address.property_kind, PropertyKind::Structure);
        assert_eq!(address.value_type, "Demo.Catalog.Address");

        let color = resolver.resolve("Demo.Catalog.Color").unwrap();
        assert_eq!(color.property_kind, PropertyKind::Enum);

        let missing = resolver.resolve("Vendor.Missing").unwrap();
        assert_eq!(missing.property_kind, PropertyKind::Unknown);
        assert_eq!(missing.value_type, "unknown (Vendor.Missing)");
        assert!(missing.relation_collection.is_none());
    }

    #[test]
    fn test_collections_for() {
        let registry = registry_with(
            EntityContainer::new("Container")
                .with_entity_set("Widgets", "Demo.Catalog.Widget")
                .with_entity_set("ArchivedWidgets", "Cat.Widget"),
        );
        let config = MediationConfig::default();
        let resolver = TypeResolver::new(&registry, &config);

        assert_eq!(
            resolver.collections_for("Cat.Widget"),
            Some(RelationTarget::Ambiguous(vec![
                "Widgets".to_string(),
                "ArchivedWidgets".to_string()
            ]))
        );
        assert_eq!(
            resolver.collections_for("Demo.Catalog.Widget"),
            resolver.collections_for("Cat.Widget")
        );
        assert_eq!(resolver.collections_for("Demo.Catalog.Orphan"), None);
    }

    #[test]
    fn test_ambiguity_policies() {
        let registry = registry_with(
            EntityContainer::new("Container")
                .with_entity_set("Widgets", "Demo.Catalog.Widget")
                .with_entity_set("ArchivedWidgets", "Demo.Catalog.Widget"),
        );

        let first = MediationConfig::default();
        let descriptor = TypeResolver::new(&registry, &first)
            .resolve("Demo.Catalog.Widget")
            .unwrap();
        assert_eq!(descriptor.relation_collection.as_deref(), Some("Widgets"));

        let reject = MediationConfig {
            ambiguous_relations: AmbiguityPolicy::Reject,
            ..MediationConfig::default()
        };
        let err = TypeResolver::new(&registry, &reject)
            .resolve("Demo.Catalog.Widget")
            .unwrap_err();
        assert_eq!(err.error_code(), "AMBIGUOUS_RELATION_TARGET");
    }
}
