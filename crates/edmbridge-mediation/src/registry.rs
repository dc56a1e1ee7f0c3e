//! Symbol registry over namespaced and aliased CSDL definitions.
//!
//! Every definition is stored once, in declaration order, and indexed under
//! `<namespace>.<name>` (the canonical name) and, when the owning schema
//! declares an alias, `<alias>.<name>`. Both forms resolve to the same entry
//! and lookups always report the canonical name.

use std::collections::{HashMap, HashSet};
use std::fmt;

use edmbridge_csdl::{Action, ComplexType, Edmx, EntityContainer, EntityType, EnumType, Function};
use tracing::{debug, trace, warn};

use crate::config::{MediationConfig, OverloadPolicy};
use crate::error::MediationError;

/// Kind of a registered symbol. Names only collide within the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    EntityType,
    ComplexType,
    EnumType,
    Function,
    Action,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::EntityType => "entity type",
            Self::ComplexType => "complex type",
            Self::EnumType => "enum type",
            Self::Function => "function",
            Self::Action => "action",
        };
        f.write_str(label)
    }
}

/// A definition handed to [`SymbolRegistry::register`].
#[derive(Debug, Clone)]
pub enum Definition {
    EntityType(EntityType),
    ComplexType(ComplexType),
    EnumType(EnumType),
    Function(Function),
    Action(Action),
}

impl Definition {
    pub fn kind(&self) -> SymbolKind {
        match self {
            Self::EntityType(_) => SymbolKind::EntityType,
            Self::ComplexType(_) => SymbolKind::ComplexType,
            Self::EnumType(_) => SymbolKind::EnumType,
            Self::Function(_) => SymbolKind::Function,
            Self::Action(_) => SymbolKind::Action,
        }
    }

    pub fn local_name(&self) -> &str {
        match self {
            Self::EntityType(def) => &def.name,
            Self::ComplexType(def) => &def.name,
            Self::EnumType(def) => &def.name,
            Self::Function(def) => &def.name,
            Self::Action(def) => &def.name,
        }
    }
}

/// Builds `<qualifier>.<name>`.
pub fn qualified_name(qualifier: &str, name: &str) -> String {
    format!("{qualifier}.{name}")
}

/// Definitions of one kind, in declaration order, with a name index.
#[derive(Debug)]
struct SymbolTable<T> {
    entries: Vec<(String, T)>,
    index: HashMap<String, usize>,
}

impl<T> SymbolTable<T> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    fn insert(&mut self, canonical: String, alias: Option<String>, definition: T) {
        let position = self.entries.len();
        self.index.insert(canonical.clone(), position);
        if let Some(alias) = alias {
            self.index.insert(alias, position);
        }
        self.entries.push((canonical, definition));
    }

    fn get(&self, name: &str) -> Option<(&str, &T)> {
        self.index.get(name).map(|&position| {
            let (canonical, definition) = &self.entries[position];
            (canonical.as_str(), definition)
        })
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(name, def)| (name.as_str(), def))
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Index of every type, function and action declared in a document.
///
/// Built once and never mutated afterwards; the resolver, flattener and mapper
/// borrow it immutably.
#[derive(Debug)]
pub struct SymbolRegistry {
    config: MediationConfig,
    entity_types: SymbolTable<EntityType>,
    complex_types: SymbolTable<ComplexType>,
    enum_types: SymbolTable<EnumType>,
    functions: SymbolTable<Function>,
    actions: SymbolTable<Action>,
    entity_container: Option<EntityContainer>,
    function_imports: HashSet<String>,
    action_imports: HashSet<String>,
}

impl SymbolRegistry {
    /// Creates an empty registry using the duplicate tolerances of `config`.
    pub fn new(config: &MediationConfig) -> Self {
        Self {
            config: config.clone(),
            entity_types: SymbolTable::new(),
            complex_types: SymbolTable::new(),
            enum_types: SymbolTable::new(),
            functions: SymbolTable::new(),
            actions: SymbolTable::new(),
            entity_container: None,
            function_imports: HashSet::new(),
            action_imports: HashSet::new(),
        }
    }

    /// Registers every definition of the document and captures its entity
    /// container.
    ///
    /// # Errors
    ///
    /// Returns [`MediationError::DuplicateDefinition`] on a name collision
    /// that is not tolerated, and [`MediationError::MissingEntityContainer`]
    /// when no schema declares an entity container.
    pub fn build(edmx: &Edmx, config: &MediationConfig) -> Result<Self, MediationError> {
        let mut registry = Self::new(config);

        for schema in edmx.schemas() {
            let namespace = schema.namespace.as_str();
            let alias = schema.alias.as_deref();
            trace!(namespace, alias = ?alias, "Registering schema");

            if let Some(container) = &schema.entity_container {
                registry.set_entity_container(container.clone());
            }

            let definitions = schema
                .entity_types
                .iter()
                .cloned()
                .map(Definition::EntityType)
                .chain(schema.complex_types.iter().cloned().map(Definition::ComplexType))
                .chain(schema.enum_types.iter().cloned().map(Definition::EnumType))
                .chain(schema.functions.iter().cloned().map(Definition::Function))
                .chain(schema.actions.iter().cloned().map(Definition::Action));

            for definition in definitions {
                registry.register(namespace, alias, definition)?;
            }
        }

        if registry.entity_container.is_none() {
            return Err(MediationError::MissingEntityContainer);
        }
        registry.index_imports();

        debug!(
            entity_types = registry.entity_types.len(),
            complex_types = registry.complex_types.len(),
            enum_types = registry.enum_types.len(),
            functions = registry.functions.len(),
            actions = registry.actions.len(),
            "Symbol registry built"
        );

        Ok(registry)
    }

    /// Registers a definition under its namespaced and aliased names.
    ///
    /// A tolerated duplicate enum, or a repeated function/action under the
    /// keep-first overload policy, is discarded and the first definition
    /// kept.
    ///
    /// # Errors
    ///
    /// Returns [`MediationError::DuplicateDefinition`] if either qualified
    /// form is already registered for the same kind.
    pub fn register(
        &mut self,
        namespace: &str,
        alias: Option<&str>,
        definition: Definition,
    ) -> Result<(), MediationError> {
        let kind = definition.kind();
        let namespaced = qualified_name(namespace, definition.local_name());
        let aliased = alias.map(|alias| qualified_name(alias, definition.local_name()));

        let collision = std::iter::once(&namespaced)
            .chain(aliased.as_ref())
            .find(|name| self.contains(kind, name))
            .cloned();

        if let Some(name) = collision {
            if kind == SymbolKind::EnumType && self.is_tolerated(&namespaced, aliased.as_deref()) {
                warn!(name = %name, "Ignoring tolerated duplicate enum definition");
                return Ok(());
            }
            if matches!(kind, SymbolKind::Function | SymbolKind::Action)
                && self.config.invocation_overloads == OverloadPolicy::KeepFirst
            {
                debug!(kind = %kind, name = %name, "Ignoring overload, keeping first declaration");
                return Ok(());
            }
            return Err(MediationError::duplicate(kind, name));
        }

        trace!(kind = %kind, name = %namespaced, "Registered definition");
        match definition {
            Definition::EntityType(def) => self.entity_types.insert(namespaced, aliased, def),
            Definition::ComplexType(def) => self.complex_types.insert(namespaced, aliased, def),
            Definition::EnumType(def) => self.enum_types.insert(namespaced, aliased, def),
            Definition::Function(def) => self.functions.insert(namespaced, aliased, def),
            Definition::Action(def) => self.actions.insert(namespaced, aliased, def),
        }
        Ok(())
    }

    /// Captures the entity container. A later container replaces an earlier
    /// one.
    pub fn set_entity_container(&mut self, container: EntityContainer) {
        if let Some(previous) = &self.entity_container {
            debug!(
                previous = %previous.name,
                current = %container.name,
                "Replacing entity container"
            );
        }
        self.entity_container = Some(container);
    }

    /// Returns the captured entity container.
    ///
    /// # Errors
    ///
    /// Returns [`MediationError::MissingEntityContainer`] if none was captured.
    pub fn entity_container(&self) -> Result<&EntityContainer, MediationError> {
        self.entity_container
            .as_ref()
            .ok_or(MediationError::MissingEntityContainer)
    }

    /// Checks whether a name is registered for the given kind.
    pub fn contains(&self, kind: SymbolKind, name: &str) -> bool {
        match kind {
            SymbolKind::EntityType => self.entity_types.contains(name),
            SymbolKind::ComplexType => self.complex_types.contains(name),
            SymbolKind::EnumType => self.enum_types.contains(name),
            SymbolKind::Function => self.functions.contains(name),
            SymbolKind::Action => self.actions.contains(name),
        }
    }

    pub fn entity_type(&self, name: &str) -> Option<(&str, &EntityType)> {
        self.entity_types.get(name)
    }

    pub fn complex_type(&self, name: &str) -> Option<(&str, &ComplexType)> {
        self.complex_types.get(name)
    }

    pub fn enum_type(&self, name: &str) -> Option<(&str, &EnumType)> {
        self.enum_types.get(name)
    }

    pub fn function(&self, name: &str) -> Option<(&str, &Function)> {
        self.functions.get(name)
    }

    pub fn action(&self, name: &str) -> Option<(&str, &Action)> {
        self.actions.get(name)
    }

    pub fn entity_types(&self) -> impl Iterator<Item = (&str, &EntityType)> {
        self.entity_types.iter()
    }

    pub fn complex_types(&self) -> impl Iterator<Item = (&str, &ComplexType)> {
        self.complex_types.iter()
    }

    pub fn enum_types(&self) -> impl Iterator<Item = (&str, &EnumType)> {
        self.enum_types.iter()
    }

    pub fn functions(&self) -> impl Iterator<Item = (&str, &Function)> {
        self.functions.iter()
    }

    pub fn actions(&self) -> impl Iterator<Item = (&str, &Action)> {
        self.actions.iter()
    }

    /// Whether the container imports this function (canonical name).
    pub fn is_function_import(&self, canonical_name: &str) -> bool {
        self.function_imports.contains(canonical_name)
    }

    /// Whether the container imports this action (canonical name).
    pub fn is_action_import(&self, canonical_name: &str) -> bool {
        self.action_imports.contains(canonical_name)
    }

    fn is_tolerated(&self, namespaced: &str, aliased: Option<&str>) -> bool {
        self.config.is_tolerated_duplicate_enum(namespaced)
            || aliased.is_some_and(|name| self.config.is_tolerated_duplicate_enum(name))
    }

    /// Records container imports under the canonical names of their targets.
    fn index_imports(&mut self) {
        let Some(container) = &self.entity_container else {
            return;
        };

        let function_imports: HashSet<String> = container
            .function_imports
            .iter()
            .map(|import| canonical_or_raw(self.functions.get(&import.function), &import.function))
            .collect();
        let action_imports: HashSet<String> = container
            .action_imports
            .iter()
            .map(|import| canonical_or_raw(self.actions.get(&import.action), &import.action))
            .collect();

        self.function_imports = function_imports;
        self.action_imports = action_imports;
    }
}

fn canonical_or_raw<T>(found: Option<(&str, &T)>, raw: &str) -> String {
    found.map_or_else(|| raw.to_string(), |(canonical, _)| canonical.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use edmbridge_csdl::{Property, Schema};

    fn container() -> EntityContainer {
        EntityContainer::new("Container")
    }

    #[test]
    fn test_register_namespaced_and_aliased() {
        let mut registry = SymbolRegistry::new(&MediationConfig::default());
        registry
            .register(
                "Demo.Catalog",
                Some("Cat"),
                Definition::EntityType(EntityType::new("Widget").with_key(["id"])),
            )
            .unwrap();

        let (canonical, def) = registry.entity_type("Cat.Widget").unwrap();
        assert_eq!(canonical, "Demo.Catalog.Widget");
        assert_eq!(def.name, "Widget");
        assert_eq!(registry.entity_type("Demo.Catalog.Widget").unwrap().0, canonical);
        assert_eq!(registry.entity_types().count(), 1);
    }

    #[test]
    fn test_duplicate_entity_type_fails() {
        let mut registry = SymbolRegistry::new(&MediationConfig::default());
        let widget = Definition::EntityType(EntityType::new("Widget"));
        registry.register("Demo", None, widget.clone()).unwrap();

        let err = registry.register("Demo", None, widget).unwrap_err();
        match err {
            MediationError::DuplicateDefinition { kind, name } => {
                assert_eq!(kind, SymbolKind::EntityType);
                assert_eq!(name, "Demo.Widget");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_alias_fails() {
        let mut registry = SymbolRegistry::new(&MediationConfig::default());
        registry
            .register("A", Some("X"), Definition::ComplexType(ComplexType::new("Address")))
            .unwrap();

        let err = registry
            .register("B", Some("X"), Definition::ComplexType(ComplexType::new("Address")))
            .unwrap_err();
        assert!(matches!(
            err,
            MediationError::DuplicateDefinition { ref name, .. } if name == "X.Address"
        ));
        // Nothing from the rejected definition was indexed.
        assert!(registry.complex_type("B.Address").is_none());
    }

    #[test]
    fn test_same_name_different_kind() {
        let mut registry = SymbolRegistry::new(&MediationConfig::default());
        registry
            .register("Demo", None, Definition::EntityType(EntityType::new("Thing")))
            .unwrap();
        registry
            .register("Demo", None, Definition::ComplexType(ComplexType::new("Thing")))
            .unwrap();

        assert!(registry.contains(SymbolKind::EntityType, "Demo.Thing"));
        assert!(registry.contains(SymbolKind::ComplexType, "Demo.Thing"));
    }

    #[test]
    fn test_tolerated_duplicate_enum_keeps_first() {
        let config = MediationConfig::default().with_tolerated_duplicate_enums(["Demo.Color"]);
        let mut registry = SymbolRegistry::new(&config);

        registry
            .register(
                "Demo",
                None,
                Definition::EnumType(EnumType::new("Color").with_member("Red", "0")),
            )
            .unwrap();
        registry
            .register(
                "Demo",
                None,
                Definition::EnumType(EnumType::new("Color").with_member("Blue", "7")),
            )
            .unwrap();

        let (_, color) = registry.enum_type("Demo.Color").unwrap();
        assert_eq!(color.members.len(), 1);
        assert_eq!(color.members[0].name, "Red");
        assert_eq!(registry.enum_types().count(), 1);
    }

    #[test]
    fn test_tolerated_duplicate_enum_by_alias() {
        let config = MediationConfig::default().with_tolerated_duplicate_enums(["Cat.Color"]);
        let mut registry = SymbolRegistry::new(&config);

        for value in ["0", "1"] {
            registry
                .register(
                    "Demo.Catalog",
                    Some("Cat"),
                    Definition::EnumType(EnumType::new("Color").with_member("Red", value)),
                )
                .unwrap();
        }

        let (name, color) = registry.enum_type("Cat.Color").unwrap();
        assert_eq!(name, "Demo.Catalog.Color");
        assert_eq!(color.members[0].value.as_deref(), Some("0"));
    }

    #[test]
    fn test_untolerated_duplicate_enum_fails() {
        let mut registry = SymbolRegistry::new(&MediationConfig::default());
        registry
            .register("Demo", None, Definition::EnumType(EnumType::new("Color")))
            .unwrap();

        let err = registry
            .register("Demo", None, Definition::EnumType(EnumType::new("Color")))
            .unwrap_err();
        assert_eq!(err.error_code(), "DUPLICATE_DEFINITION");
    }

    #[test]
    fn test_function_overloads() {
        let overloaded = || Definition::Function(Function::new("Find").returns("Edm.String"));

        let mut strict = SymbolRegistry::new(&MediationConfig::default());
        strict.register("Demo", None, overloaded()).unwrap();
        assert!(strict.register("Demo", None, overloaded()).is_err());

        let config = MediationConfig {
            invocation_overloads: OverloadPolicy::KeepFirst,
            ..MediationConfig::default()
        };
        let mut lenient = SymbolRegistry::new(&config);
        lenient.register("Demo", None, overloaded()).unwrap();
        lenient.register("Demo", None, overloaded()).unwrap();
        assert_eq!(lenient.functions().count(), 1);
    }

    #[test]
    fn test_build_requires_entity_container() {
        let edmx = Edmx::new([Schema::new("Demo").with_entity_type(EntityType::new("Widget"))]);
        let err = SymbolRegistry::build(&edmx, &MediationConfig::default()).unwrap_err();
        assert!(matches!(err, MediationError::MissingEntityContainer));
    }

    #[test]
    fn test_build_indexes_all_schemas() {
        let edmx = Edmx::new([
            Schema::new("Demo.Types")
                .with_alias("T")
                .with_complex_type(
                    ComplexType::new("Address").with_property(Property::new("city", "Edm.String")),
                )
                .with_enum_type(EnumType::new("Color")),
            Schema::new("Demo.Service")
                .with_entity_type(EntityType::new("Widget").with_key(["id"]))
                .with_function(Function::new("Count").returns("Edm.Int32"))
                .with_entity_container(
                    container().with_function_import("Count", "Demo.Service.Count"),
                ),
        ]);

        let registry = SymbolRegistry::build(&edmx, &MediationConfig::default()).unwrap();
        assert!(registry.complex_type("T.Address").is_some());
        assert!(registry.enum_type("Demo.Types.Color").is_some());
        assert!(registry.entity_type("Demo.Service.Widget").is_some());
        assert!(registry.is_function_import("Demo.Service.Count"));
        assert_eq!(registry.entity_container().unwrap().name, "Container");
    }

    #[test]
    fn test_imports_are_canonicalized() {
        let edmx = Edmx::new([Schema::new("Demo.Service")
            .with_alias("S")
            .with_action(Action::new("Reset"))
            .with_entity_container(container().with_action_import("Reset", "S.Reset"))]);

        let registry = SymbolRegistry::build(&edmx, &MediationConfig::default()).unwrap();
        assert!(registry.is_action_import("Demo.Service.Reset"));
        assert!(!registry.is_function_import("Demo.Service.Reset"));
    }

    #[test]
    fn test_later_container_wins() {
        let edmx = Edmx::new([
            Schema::new("A").with_entity_container(EntityContainer::new("First")),
            Schema::new("B").with_entity_container(EntityContainer::new("Second")),
        ]);

        let registry = SymbolRegistry::build(&edmx, &MediationConfig::default()).unwrap();
        assert_eq!(registry.entity_container().unwrap().name, "Second");
    }

    #[test]
    fn test_symbol_kind_display() {
        assert_eq!(SymbolKind::ComplexType.to_string(), "complex type");
        assert_eq!(SymbolKind::Action.to_string(), "action");
    }
}
