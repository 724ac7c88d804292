use std::fmt;

use serde::{Deserialize, Serialize};

use crate::code::Name;

/// Member visibility as declared in source. A missing modifier means `Public`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    /// UML prefix symbol: `+`, `#` or `-`.
    pub fn symbol(self) -> &'static str {
        match self {
            Visibility::Public => "+",
            Visibility::Protected => "#",
            Visibility::Private => "-",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Modifiers shared by every member kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
}

impl Modifiers {
    pub fn new(visibility: Visibility) -> Self {
        Self {
            visibility,
            is_static: false,
            is_abstract: false,
        }
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }
}

/// Pseudo and scalar types that never name a declaration.
const BUILTIN_TYPES: &[&str] = &[
    "int", "integer", "float", "double", "string", "bool", "boolean", "array", "callable",
    "iterable", "object", "mixed", "void", "null", "never", "false", "true", "resource", "self",
    "static", "parent",
];

/// An opaque type annotation, e.g. `string`, `?Logger`, `User[]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeDeclaration(String);

impl TypeDeclaration {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into().trim().to_owned())
    }

    /// The bare type name with nullable, array and namespace decorations removed.
    pub fn reference_name(&self) -> Name {
        let bare = self.0.trim_start_matches('?');
        let bare = bare.strip_suffix("[]").unwrap_or(bare);
        Name::new(bare)
    }

    pub fn is_builtin(&self) -> bool {
        let name = self.reference_name();
        BUILTIN_TYPES
            .iter()
            .any(|builtin| builtin.eq_ignore_ascii_case(name.as_str()))
    }
}

impl fmt::Display for TypeDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named, optionally typed slot: an attribute or a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub type_declaration: Option<TypeDeclaration>,
}

impl Variable {
    pub fn new(name: impl Into<String>, type_declaration: Option<TypeDeclaration>) -> Self {
        Self {
            name: name.into(),
            type_declaration,
        }
    }

    pub fn has_type(&self) -> bool {
        self.type_declaration.is_some()
    }

    /// The type this variable may reference, if it names something other than a builtin.
    pub fn reference(&self) -> Option<Name> {
        self.type_declaration
            .as_ref()
            .filter(|t| !t.is_builtin())
            .map(TypeDeclaration::reference_name)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.type_declaration {
            Some(t) => write!(f, "{} {}", t, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// An instance or static field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub variable: Variable,
    pub modifiers: Modifiers,
}

impl Attribute {
    pub fn new(variable: Variable, modifiers: Modifiers) -> Self {
        Self {
            variable,
            modifiers,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.modifiers.visibility.symbol())?;
        if self.modifiers.is_static {
            f.write_str("static ")?;
        }
        write!(f, "{}", self.variable)
    }
}

/// A method signature. Static and abstract methods share this shape and differ only by flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub modifiers: Modifiers,
    pub parameters: Vec<Variable>,
    pub return_type: Option<TypeDeclaration>,
}

impl Method {
    pub fn new(
        name: impl Into<String>,
        modifiers: Modifiers,
        parameters: Vec<Variable>,
        return_type: Option<TypeDeclaration>,
    ) -> Self {
        Self {
            name: name.into(),
            modifiers,
            parameters,
            return_type,
        }
    }

    pub fn is_constructor(&self) -> bool {
        self.name.eq_ignore_ascii_case("__construct")
    }

    /// Types referenced by this signature: parameters first, then the return type.
    pub fn references(&self) -> impl Iterator<Item = Name> + '_ {
        let returned = self
            .return_type
            .as_ref()
            .filter(|t| !t.is_builtin())
            .map(TypeDeclaration::reference_name);
        self.parameters
            .iter()
            .filter_map(Variable::reference)
            .chain(returned)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.modifiers.visibility.symbol())?;
        if self.modifiers.is_static {
            f.write_str("static ")?;
        }
        if self.modifiers.is_abstract {
            f.write_str("abstract ")?;
        }
        write!(f, "{}(", self.name)?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{parameter}")?;
        }
        f.write_str(")")?;
        if let Some(return_type) = &self.return_type {
            write!(f, ": {return_type}")?;
        }
        Ok(())
    }
}

/// A class constant, optionally typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constant {
    pub name: String,
    pub modifiers: Modifiers,
    pub type_declaration: Option<TypeDeclaration>,
}

impl Constant {
    pub fn new(
        name: impl Into<String>,
        visibility: Visibility,
        type_declaration: Option<TypeDeclaration>,
    ) -> Self {
        Self {
            name: name.into(),
            // Constants are implicitly static.
            modifiers: Modifiers::new(visibility).with_static(true),
            type_declaration,
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.modifiers.visibility.symbol())?;
        if let Some(t) = &self.type_declaration {
            write!(f, "{t} ")?;
        }
        f.write_str(&self.name)
    }
}

/// Any member of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Member<'a> {
    Attribute(&'a Attribute),
    Method(&'a Method),
    Constant(&'a Constant),
}

impl Member<'_> {
    pub fn modifiers(&self) -> Modifiers {
        match self {
            Member::Attribute(a) => a.modifiers,
            Member::Method(m) => m.modifiers,
            Member::Constant(c) => c.modifiers,
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.modifiers().visibility
    }
}

impl fmt::Display for Member<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Attribute(a) => fmt::Display::fmt(a, f),
            Member::Method(m) => fmt::Display::fmt(m, f),
            Member::Constant(c) => fmt::Display::fmt(c, f),
        }
    }
}

#[cfg(test)]
impl Variable {
    pub fn untyped(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }

    pub fn typed(name: impl Into<String>, type_name: &str) -> Self {
        Self::new(name, Some(TypeDeclaration::new(type_name)))
    }
}

#[cfg(test)]
impl Attribute {
    pub fn public(variable: Variable) -> Self {
        Self::new(variable, Modifiers::new(Visibility::Public))
    }

    pub fn protected(variable: Variable) -> Self {
        Self::new(variable, Modifiers::new(Visibility::Protected))
    }

    pub fn private(variable: Variable) -> Self {
        Self::new(variable, Modifiers::new(Visibility::Private))
    }
}

#[cfg(test)]
impl Method {
    pub fn public(name: impl Into<String>, parameters: Vec<Variable>) -> Self {
        Self::new(name, Modifiers::new(Visibility::Public), parameters, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_without_type() {
        let variable = Variable::untyped("$noType");
        assert!(!variable.has_type());
        assert_eq!(variable.to_string(), "$noType");
    }

    #[test]
    fn test_variable_with_type_renders_type_first() {
        let variable = Variable::typed("$parameterName", "string");
        assert!(variable.has_type());
        assert_eq!(variable.to_string(), "string $parameterName");
    }

    #[test]
    fn test_builtin_types_are_not_references() {
        assert_eq!(Variable::typed("$n", "int").reference(), None);
        assert_eq!(Variable::typed("$s", "?String").reference(), None);
        assert_eq!(Variable::typed("$items", "array").reference(), None);
        assert_eq!(
            Variable::typed("$logger", "?\\Psr\\Log").reference(),
            Some(Name::new("Log"))
        );
    }

    #[test]
    fn test_reference_name_strips_decorations() {
        assert_eq!(TypeDeclaration::new("?User[]").reference_name(), Name::new("User"));
        assert_eq!(
            TypeDeclaration::new("?\\App\\Models\\User[]").reference_name(),
            Name::new("User")
        );
    }

    #[test]
    fn test_attribute_rendering() {
        let attribute = Attribute::new(
            Variable::typed("$count", "int"),
            Modifiers::new(Visibility::Public).with_static(true),
        );
        assert_eq!(attribute.to_string(), "+static int $count");
        assert_eq!(
            Attribute::protected(Variable::untyped("$raw")).to_string(),
            "#$raw"
        );
        assert_eq!(
            Attribute::private(Variable::typed("$name", "string")).to_string(),
            "-string $name"
        );
    }

    #[test]
    fn test_method_rendering() {
        let method = Method::new(
            "create",
            Modifiers::new(Visibility::Public).with_static(true),
            vec![Variable::typed("$id", "int"), Variable::untyped("$raw")],
            Some(TypeDeclaration::new("self")),
        );
        assert_eq!(method.to_string(), "+static create(int $id, $raw): self");

        let method = Method::new(
            "handle",
            Modifiers::new(Visibility::Protected).with_abstract(true),
            vec![],
            None,
        );
        assert_eq!(method.to_string(), "#abstract handle()");
    }

    #[test]
    fn test_constant_rendering_and_static_flag() {
        let constant = Constant::new("PI", Visibility::Public, Some(TypeDeclaration::new("float")));
        assert!(constant.modifiers.is_static);
        assert_eq!(constant.to_string(), "+float PI");
        assert_eq!(Constant::new("MAX", Visibility::Private, None).to_string(), "-MAX");
    }

    #[test]
    fn test_constructor_detection_is_case_insensitive() {
        assert!(Method::public("__construct", vec![]).is_constructor());
        assert!(Method::public("__Construct", vec![]).is_constructor());
        assert!(!Method::public("construct", vec![]).is_constructor());
    }

    #[test]
    fn test_method_references_params_then_return() {
        let method = Method::new(
            "find",
            Modifiers::default(),
            vec![Variable::typed("$id", "UserId"), Variable::typed("$limit", "int")],
            Some(TypeDeclaration::new("?User")),
        );
        let refs: Vec<Name> = method.references().collect();
        assert_eq!(refs, vec![Name::new("UserId"), Name::new("User")]);
    }
}
