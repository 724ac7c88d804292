pub mod codebase;
pub mod members;

use std::fmt;

use serde::{Deserialize, Serialize};

use members::{Attribute, Constant, Member, Method};

pub use codebase::Codebase;

/// A type identifier, compared by exact string equality.
///
/// Only the last namespace segment is kept, so `\App\Foo`, `Vendor\Foo` and `Foo` all
/// name the same type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    pub fn new(name: impl AsRef<str>) -> Self {
        let name = name.as_ref().trim();
        let short = name.rsplit('\\').next().unwrap_or(name);
        Self(short.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The kind of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Class,
    Interface,
    Trait,
}

impl DeclarationKind {
    pub fn label(self) -> &'static str {
        match self {
            DeclarationKind::Class => "class",
            DeclarationKind::Interface => "interface",
            DeclarationKind::Trait => "trait",
        }
    }
}

/// A class, possibly abstract, with an optional parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub name: Name,
    pub attributes: Vec<Attribute>,
    pub methods: Vec<Method>,
    pub constants: Vec<Constant>,
    pub interfaces: Vec<Name>,
    pub traits: Vec<Name>,
    pub parent: Option<Name>,
    pub is_abstract: bool,
    pub is_external: bool,
}

impl ClassDefinition {
    /// A class with no members or relations.
    pub fn named(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            methods: Vec::new(),
            constants: Vec::new(),
            interfaces: Vec::new(),
            traits: Vec::new(),
            parent: None,
            is_abstract: false,
            is_external: false,
        }
    }

    /// A placeholder for a class referenced from scanned code but declared elsewhere.
    pub fn external(name: Name) -> Self {
        Self {
            is_external: true,
            ..Self::named(name)
        }
    }
}

/// An interface. Interfaces may extend several parents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDefinition {
    pub name: Name,
    pub methods: Vec<Method>,
    pub constants: Vec<Constant>,
    pub parents: Vec<Name>,
    pub is_external: bool,
}

impl InterfaceDefinition {
    pub fn named(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
            constants: Vec::new(),
            parents: Vec::new(),
            is_external: false,
        }
    }

    pub fn external(name: Name) -> Self {
        Self {
            is_external: true,
            ..Self::named(name)
        }
    }
}

/// A trait. Traits can use other traits but have no supertypes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitDefinition {
    pub name: Name,
    pub attributes: Vec<Attribute>,
    pub methods: Vec<Method>,
    pub constants: Vec<Constant>,
    pub traits: Vec<Name>,
    pub is_external: bool,
}

impl TraitDefinition {
    pub fn named(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            methods: Vec::new(),
            constants: Vec::new(),
            traits: Vec::new(),
            is_external: false,
        }
    }

    pub fn external(name: Name) -> Self {
        Self {
            is_external: true,
            ..Self::named(name)
        }
    }
}

/// A declaration in the code model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Declaration {
    Class(ClassDefinition),
    Interface(InterfaceDefinition),
    Trait(TraitDefinition),
}

impl Declaration {
    pub fn name(&self) -> &Name {
        match self {
            Declaration::Class(c) => &c.name,
            Declaration::Interface(i) => &i.name,
            Declaration::Trait(t) => &t.name,
        }
    }

    pub fn kind(&self) -> DeclarationKind {
        match self {
            Declaration::Class(_) => DeclarationKind::Class,
            Declaration::Interface(_) => DeclarationKind::Interface,
            Declaration::Trait(_) => DeclarationKind::Trait,
        }
    }

    /// True when the declaration is a stub created for an unresolved reference.
    pub fn is_external(&self) -> bool {
        match self {
            Declaration::Class(c) => c.is_external,
            Declaration::Interface(i) => i.is_external,
            Declaration::Trait(t) => t.is_external,
        }
    }

    pub fn attributes(&self) -> &[Attribute] {
        match self {
            Declaration::Class(c) => &c.attributes,
            Declaration::Interface(_) => &[],
            Declaration::Trait(t) => &t.attributes,
        }
    }

    pub fn methods(&self) -> &[Method] {
        match self {
            Declaration::Class(c) => &c.methods,
            Declaration::Interface(i) => &i.methods,
            Declaration::Trait(t) => &t.methods,
        }
    }

    pub fn constants(&self) -> &[Constant] {
        match self {
            Declaration::Class(c) => &c.constants,
            Declaration::Interface(i) => &i.constants,
            Declaration::Trait(t) => &t.constants,
        }
    }

    /// All members: constants, then attributes, then methods.
    pub fn members(&self) -> impl Iterator<Item = Member<'_>> {
        self.constants()
            .iter()
            .map(Member::Constant)
            .chain(self.attributes().iter().map(Member::Attribute))
            .chain(self.methods().iter().map(Member::Method))
    }

    pub fn constructor(&self) -> Option<&Method> {
        self.methods().iter().find(|m| m.is_constructor())
    }
}

impl From<ClassDefinition> for Declaration {
    fn from(value: ClassDefinition) -> Self {
        Declaration::Class(value)
    }
}

impl From<InterfaceDefinition> for Declaration {
    fn from(value: InterfaceDefinition) -> Self {
        Declaration::Interface(value)
    }
}

impl From<TraitDefinition> for Declaration {
    fn from(value: TraitDefinition) -> Self {
        Declaration::Trait(value)
    }
}
