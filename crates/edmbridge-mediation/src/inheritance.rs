//! Base-type chain flattening for entity and complex types.

use std::collections::HashSet;

use edmbridge_csdl::{ComplexType, EntityType, NavigationProperty, Property};

use crate::error::MediationError;
use crate::registry::SymbolRegistry;

/// A type that can take part in an inheritance chain.
#[derive(Debug, Clone, Copy)]
enum ChainLink<'a> {
    Entity(&'a EntityType),
    Complex(&'a ComplexType),
}

impl<'a> ChainLink<'a> {
    fn base_type(self) -> Option<&'a str> {
        match self {
            Self::Entity(def) => def.base_type.as_deref(),
            Self::Complex(def) => def.base_type.as_deref(),
        }
    }

    fn properties(self) -> &'a [Property] {
        match self {
            Self::Entity(def) => &def.properties,
            Self::Complex(def) => &def.properties,
        }
    }

    fn navigation_properties(self) -> &'a [NavigationProperty] {
        match self {
            Self::Entity(def) => &def.navigation_properties,
            Self::Complex(def) => &def.navigation_properties,
        }
    }

    fn key_names(self) -> Vec<String> {
        match self {
            Self::Entity(def) => def.key_names(),
            Self::Complex(_) => Vec::new(),
        }
    }
}

/// Walks base-type chains registered in a [`SymbolRegistry`].
///
/// Chains are ordered derived-first: the named type, then its base, then the
/// base's base.
#[derive(Debug, Clone, Copy)]
pub struct InheritanceFlattener<'a> {
    registry: &'a SymbolRegistry,
}

impl<'a> InheritanceFlattener<'a> {
    pub fn new(registry: &'a SymbolRegistry) -> Self {
        Self { registry }
    }

    /// Structural properties of the type followed by those of its bases.
    ///
    /// # Errors
    ///
    /// Fails if the type or one of its bases is undefined, or the chain
    /// contains a cycle.
    pub fn structural_properties(
        &self,
        type_name: &str,
    ) -> Result<Vec<&'a Property>, MediationError> {
        Ok(self
            .chain(type_name)?
            .into_iter()
            .flat_map(|(_, link)| link.properties())
            .collect())
    }

    /// Navigation properties of the type followed by those of its bases.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::structural_properties`].
    pub fn navigational_properties(
        &self,
        type_name: &str,
    ) -> Result<Vec<&'a NavigationProperty>, MediationError> {
        Ok(self
            .chain(type_name)?
            .into_iter()
            .flat_map(|(_, link)| link.navigation_properties())
            .collect())
    }

    /// The nearest non-empty key declared along the chain.
    ///
    /// # Errors
    ///
    /// Returns [`MediationError::MissingKey`] when no type in the chain
    /// declares a key, plus the chain errors of
    /// [`Self::structural_properties`].
    pub fn resolve_key(&self, type_name: &str) -> Result<Vec<String>, MediationError> {
        let chain = self.chain(type_name)?;
        chain
            .iter()
            .map(|(_, link)| link.key_names())
            .find(|key| !key.is_empty())
            .ok_or_else(|| {
                let root = chain.first().map_or(type_name, |(name, _)| *name);
                MediationError::MissingKey(root.to_string())
            })
    }

    fn chain(&self, type_name: &str) -> Result<Vec<(&'a str, ChainLink<'a>)>, MediationError> {
        let mut current = self
            .lookup(type_name)
            .ok_or_else(|| MediationError::UndefinedType(type_name.to_string()))?;
        let mut visited = HashSet::new();
        let mut chain = Vec::new();

        loop {
            let (name, link) = current;
            if !visited.insert(name) {
                return Err(MediationError::InheritanceCycle(name.to_string()));
            }
            chain.push(current);

            let Some(base) = link.base_type() else {
                break;
            };
            current = self
                .lookup(base)
                .ok_or_else(|| MediationError::unresolved_base_type(name, base))?;
        }

        Ok(chain)
    }

    fn lookup(&self, name: &str) -> Option<(&'a str, ChainLink<'a>)> {
        let registry: &'a SymbolRegistry = self.registry;
        registry
            .entity_type(name)
            .map(|(canonical, def)| (canonical, ChainLink::Entity(def)))
            .or_else(|| {
                registry
                    .complex_type(name)
                    .map(|(canonical, def)| (canonical, ChainLink::Complex(def)))
            })
    }
}
