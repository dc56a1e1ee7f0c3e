//! SDL document model and text rendering.
//!
//! Rendering is done through [`std::fmt::Display`]. Fields are indented by
//! four spaces; definitions are separated by blank lines.

use std::fmt;

const INDENT: &str = "    ";

/// Keyword introducing a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    Type,
    Input,
    Enum,
    Scalar,
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Type => "type",
            Self::Input => "input",
            Self::Enum => "enum",
            Self::Scalar => "scalar",
        })
    }
}

/// Position where a directive may be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveLocation {
    Object,
    FieldDefinition,
    EnumValue,
}

impl fmt::Display for DirectiveLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Object => "OBJECT",
            Self::FieldDefinition => "FIELD_DEFINITION",
            Self::EnumValue => "ENUM_VALUE",
        })
    }
}

/// An applied directive, e.g. `@backend(product: "odata")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub name: String,
    /// Argument names with their string values, rendered quoted.
    pub arguments: Vec<(String, String)>,
}

impl Directive {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.arguments.push((name.into(), value.into()));
        self
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)?;
        if self.arguments.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (i, (name, value)) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: ")?;
            write_quoted(f, value)?;
        }
        f.write_str(")")
    }
}

/// A directive declaration, e.g.
/// `directive @connection(primaryKey: String) on FIELD_DEFINITION`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveDeclaration {
    pub name: String,
    /// Parameter names with their type names.
    pub parameters: Vec<(String, String)>,
    pub locations: Vec<DirectiveLocation>,
}

impl fmt::Display for DirectiveDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "directive @{}", self.name)?;
        if !self.parameters.is_empty() {
            let parameters: Vec<String> = self
                .parameters
                .iter()
                .map(|(name, type_name)| format!("{name}: {type_name}"))
                .collect();
            write!(f, "({})", parameters.join(", "))?;
        }
        let locations: Vec<String> = self.locations.iter().map(ToString::to_string).collect();
        write!(f, " on {}", locations.join(" | "))
    }
}

/// A field, argument or enum value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    /// Rendered type, `None` for enum values.
    pub type_name: Option<String>,
    pub required: bool,
    pub arguments: Vec<Field>,
    pub directives: Vec<Directive>,
}

impl Field {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: Some(type_name.into()),
            required: false,
            arguments: Vec::new(),
            directives: Vec::new(),
        }
    }

    /// An enum value: a bare name.
    pub fn value(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: None,
            required: false,
            arguments: Vec::new(),
            directives: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_argument(mut self, argument: Field) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.arguments.is_empty() {
            f.write_str("(")?;
            for (i, argument) in self.arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{argument}")?;
            }
            f.write_str(")")?;
        }
        if let Some(type_name) = &self.type_name {
            write!(f, ": {type_name}")?;
            if self.required {
                f.write_str("!")?;
            }
        }
        for directive in &self.directives {
            write!(f, " {directive}")?;
        }
        Ok(())
    }
}

/// A top-level type, input, enum or scalar definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub kind: DefinitionKind,
    pub name: String,
    pub directives: Vec<Directive>,
    pub fields: Vec<Field>,
}

impl Definition {
    pub fn new(kind: DefinitionKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            directives: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    pub fn with_fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.name)?;
        for directive in &self.directives {
            write!(f, " {directive}")?;
        }
        if self.kind == DefinitionKind::Scalar {
            return Ok(());
        }
        f.write_str(" {\n")?;
        for field in &self.fields {
            writeln!(f, "{INDENT}{field}")?;
        }
        f.write_str("}")
    }
}

/// A complete SDL document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdlSchema {
    pub directive_declarations: Vec<DirectiveDeclaration>,
    pub query: Definition,
    pub mutation: Definition,
    pub definitions: Vec<Definition>,
}

impl SdlSchema {
    pub fn new(directive_declarations: Vec<DirectiveDeclaration>) -> Self {
        Self {
            directive_declarations,
            query: Definition::new(DefinitionKind::Type, "Query"),
            mutation: Definition::new(DefinitionKind::Type, "Mutation"),
            definitions: Vec::new(),
        }
    }

    /// Looks up a definition by name.
    pub fn definition(&self, name: &str) -> Option<&Definition> {
        self.definitions.iter().find(|def| def.name == name)
    }
}

impl fmt::Display for SdlSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for declaration in &self.directive_declarations {
            writeln!(f, "{declaration}")?;
        }
        if !self.directive_declarations.is_empty() {
            writeln!(f)?;
        }

        write!(f, "{}\n\n", self.query)?;
        write!(f, "{}\n\n", self.mutation)?;

        for (i, definition) in self.definitions.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{definition}")?;
        }
        Ok(())
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_str("\"")?;
    for ch in value.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            _ => write!(f, "{ch}")?,
        }
    }
    f.write_str("\"")
}
