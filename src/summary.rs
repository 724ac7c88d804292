use serde::Serialize;

use crate::code::members::{Member, Visibility};
use crate::code::{Codebase, Declaration};

/// Counts of one member kind split by visibility.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisibilityCounts {
    pub public: usize,
    pub protected: usize,
    pub private: usize,
}

impl VisibilityCounts {
    fn record(&mut self, visibility: Visibility) {
        match visibility {
            Visibility::Public => self.public += 1,
            Visibility::Protected => self.protected += 1,
            Visibility::Private => self.private += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.public + self.protected + self.private
    }
}

/// Statistics over the scanned declarations of a codebase. External stubs are not counted.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub classes: usize,
    pub interfaces: usize,
    pub traits: usize,
    pub functions: VisibilityCounts,
    pub attributes: VisibilityCounts,
    pub typed_attributes: VisibilityCounts,
    pub functions_per_class: f64,
    pub attributes_per_class: f64,
}

impl Summary {
    pub fn from_codebase(codebase: &Codebase) -> Self {
        let mut summary = Summary::default();
        for declaration in codebase.definitions().filter(|d| !d.is_external()) {
            match declaration {
                Declaration::Class(_) => summary.classes += 1,
                Declaration::Interface(_) => summary.interfaces += 1,
                Declaration::Trait(_) => summary.traits += 1,
            }
            for member in declaration.members() {
                summary.count(member);
            }
        }

        if summary.classes > 0 {
            let classes = summary.classes as f64;
            summary.functions_per_class = summary.function_count() as f64 / classes;
            summary.attributes_per_class = summary.attribute_count() as f64 / classes;
        }
        summary
    }

    fn count(&mut self, member: Member<'_>) {
        let visibility = member.visibility();
        match member {
            Member::Method(_) => self.functions.record(visibility),
            Member::Attribute(attribute) => {
                self.attributes.record(visibility);
                if attribute.variable.has_type() {
                    self.typed_attributes.record(visibility);
                }
            }
            Member::Constant(_) => {}
        }
    }

    pub fn function_count(&self) -> usize {
        self.functions.total()
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.total()
    }

    pub fn typed_attribute_count(&self) -> usize {
        self.typed_attributes.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::members::{Attribute, Constant, Method, Modifiers, TypeDeclaration, Variable};
    use crate::code::{ClassDefinition, InterfaceDefinition, Name};
    use crate::parser::resolver::resolve_external_definitions;

    fn method(name: &str, visibility: Visibility) -> Method {
        Method::new(name, Modifiers::new(visibility), vec![], None)
    }

    fn sample_codebase() -> Codebase {
        let mut parent = ClassDefinition::named("ParentClass");
        parent.attributes = vec![
            Attribute::protected(Variable::untyped("$attribute")),
            Attribute::public(Variable::typed("$value", "float")),
            Attribute::public(Variable::untyped("isValid")),
        ];
        parent.methods = vec![
            method("getAttribute", Visibility::Protected),
            method("privateAction", Visibility::Private),
        ];
        parent.constants = vec![Constant::new("TEST", Visibility::Public, None)];

        let mut parent_interface = InterfaceDefinition::named("ParentInterface");
        parent_interface.methods = vec![method("dance", Visibility::Public)];
        parent_interface.constants = vec![Constant::new(
            "TYPED_TEST",
            Visibility::Public,
            Some(TypeDeclaration::new("float")),
        )];

        let mut ability = InterfaceDefinition::named("SomeAbility");
        ability.methods = vec![method("fly", Visibility::Public)];
        ability.parents = vec![Name::new("ParentInterface")];

        let mut child = ClassDefinition::named("ChildClass");
        child.attributes = vec![
            Attribute::private(Variable::typed("$name", "string")),
            Attribute::private(Variable::untyped("$salary")),
            Attribute::protected(Variable::typed("$age", "int")),
        ];
        child.methods = vec![
            method("getName", Visibility::Public),
            method("getAge", Visibility::Public),
        ];
        child.interfaces = vec![Name::new("SomeAbility")];
        child.parent = Some(Name::new("ParentClass"));

        let mut codebase = Codebase::new();
        for declaration in [
            Declaration::from(parent),
            parent_interface.into(),
            ability.into(),
            child.into(),
        ] {
            codebase.add(declaration).unwrap();
        }
        codebase
    }

    #[test]
    fn test_summary_from_codebase() {
        let summary = Summary::from_codebase(&sample_codebase());

        assert_eq!(summary.interfaces, 2);
        assert_eq!(summary.classes, 2);
        assert_eq!(
            summary.functions,
            VisibilityCounts {
                public: 4,
                protected: 1,
                private: 1
            }
        );
        assert_eq!(
            summary.attributes,
            VisibilityCounts {
                public: 2,
                protected: 2,
                private: 2
            }
        );
        assert_eq!(
            summary.typed_attributes,
            VisibilityCounts {
                public: 1,
                protected: 1,
                private: 1
            }
        );
        assert_eq!(summary.function_count(), 6);
        assert_eq!(summary.attribute_count(), 6);
        assert_eq!(summary.typed_attribute_count(), 3);
        assert_eq!(summary.attributes_per_class, 3.0);
        assert_eq!(summary.functions_per_class, 3.0);
    }

    #[test]
    fn test_external_stubs_are_not_counted() {
        let mut codebase = sample_codebase();
        let mut extra = ClassDefinition::named("Widget");
        extra.parent = Some(Name::new("Vendor\\Base"));
        codebase.add(extra.into()).unwrap();
        resolve_external_definitions(&mut codebase);

        let summary = Summary::from_codebase(&codebase);
        assert_eq!(summary.classes, 3);
        assert_eq!(summary.functions_per_class, 2.0);
    }

    #[test]
    fn test_summary_from_empty_codebase() {
        let summary = Summary::from_codebase(&Codebase::new());
        assert_eq!(summary, Summary::default());
        assert_eq!(summary.functions_per_class, 0.0);
        assert_eq!(summary.attributes_per_class, 0.0);
    }
}
