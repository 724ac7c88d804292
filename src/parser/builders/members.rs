use crate::code::members::{Attribute, Constant, Method, Modifiers, Variable, Visibility};
use crate::parser::ParserConfig;
use crate::parser::syntax::{MemberNode, MethodNode, ParameterNode};

use super::filters::{VisibilityFilter, VisibilityFilters};
use super::types;

fn visibility_of(declared: Option<Visibility>) -> Visibility {
    declared.unwrap_or_default()
}

/// Builds the parameter list of a method, falling back to `@param` tags for types.
fn build_parameters(method: &MethodNode) -> Vec<Variable> {
    method
        .parameters
        .iter()
        .map(|p| build_parameter(p, method.doc.as_deref()))
        .collect()
}

fn build_parameter(parameter: &ParameterNode, doc: Option<&str>) -> Variable {
    Variable::new(
        parameter.name.clone(),
        types::parameter_type(&parameter.name, parameter.type_hint.as_deref(), doc),
    )
}

/// Builds the methods of a declaration, or none at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodsBuilder {
    Filtered(VisibilityFilters),
    NoMethods,
}

impl MethodsBuilder {
    pub fn build(&self, members: &[MemberNode]) -> Vec<Method> {
        let filters = match self {
            MethodsBuilder::Filtered(filters) => filters,
            MethodsBuilder::NoMethods => return Vec::new(),
        };
        members
            .iter()
            .filter_map(|member| match member {
                MemberNode::Method(m) => Some(m),
                _ => None,
            })
            .filter(|m| filters.accepts(visibility_of(m.visibility)))
            .map(|m| {
                let modifiers = Modifiers::new(visibility_of(m.visibility))
                    .with_static(m.is_static)
                    .with_abstract(m.is_abstract);
                Method::new(
                    m.name.clone(),
                    modifiers,
                    build_parameters(m),
                    types::return_type(m.return_type.as_deref(), m.doc.as_deref()),
                )
            })
            .collect()
    }
}

/// Builds attributes from property declarations and promoted constructor parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributesBuilder {
    Filtered(VisibilityFilters),
    NoAttributes,
}

impl AttributesBuilder {
    pub fn build(&self, members: &[MemberNode]) -> Vec<Attribute> {
        let filters = match self {
            AttributesBuilder::Filtered(filters) => filters,
            AttributesBuilder::NoAttributes => return Vec::new(),
        };
        let mut attributes = Vec::new();
        for member in members {
            match member {
                MemberNode::Property(p) => {
                    let visibility = visibility_of(p.visibility);
                    if !filters.accepts(visibility) {
                        continue;
                    }
                    let variable = Variable::new(
                        p.name.clone(),
                        types::attribute_type(p.type_hint.as_deref(), p.doc.as_deref()),
                    );
                    attributes.push(Attribute::new(
                        variable,
                        Modifiers::new(visibility).with_static(p.is_static),
                    ));
                }
                MemberNode::Method(m) if m.name.eq_ignore_ascii_case("__construct") => {
                    for parameter in &m.parameters {
                        let Some(visibility) = parameter.promoted_visibility else {
                            continue;
                        };
                        if !filters.accepts(visibility) {
                            continue;
                        }
                        attributes.push(Attribute::new(
                            build_parameter(parameter, m.doc.as_deref()),
                            Modifiers::new(visibility),
                        ));
                    }
                }
                _ => {}
            }
        }
        attributes
    }
}

/// Builds class constants, or none at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstantsBuilder {
    Filtered(VisibilityFilters),
    NoConstants,
}

impl ConstantsBuilder {
    pub fn build(&self, members: &[MemberNode]) -> Vec<Constant> {
        let filters = match self {
            ConstantsBuilder::Filtered(filters) => filters,
            ConstantsBuilder::NoConstants => return Vec::new(),
        };
        members
            .iter()
            .filter_map(|member| match member {
                MemberNode::Constant(c) => Some(c),
                _ => None,
            })
            .filter(|c| filters.accepts(visibility_of(c.visibility)))
            .map(|c| {
                Constant::new(
                    c.name.clone(),
                    visibility_of(c.visibility),
                    types::attribute_type(c.type_hint.as_deref(), None),
                )
            })
            .collect()
    }
}

/// One builder per member kind, each swappable on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembersBuilder {
    pub constants: ConstantsBuilder,
    pub attributes: AttributesBuilder,
    pub methods: MethodsBuilder,
}

impl MembersBuilder {
    pub fn new(
        constants: ConstantsBuilder,
        attributes: AttributesBuilder,
        methods: MethodsBuilder,
    ) -> Self {
        Self {
            constants,
            attributes,
            methods,
        }
    }

    pub fn from_config(config: &ParserConfig) -> Self {
        let mut chain = Vec::new();
        if config.hide_private {
            chain.push(VisibilityFilter::ExcludePrivate);
        }
        if config.hide_protected {
            chain.push(VisibilityFilter::ExcludeProtected);
        }
        let filters = VisibilityFilters::new(chain);

        let constants = if config.hide_constants {
            ConstantsBuilder::NoConstants
        } else {
            ConstantsBuilder::Filtered(filters.clone())
        };
        let attributes = if config.hide_attributes {
            AttributesBuilder::NoAttributes
        } else {
            AttributesBuilder::Filtered(filters.clone())
        };
        let methods = if config.hide_methods {
            MethodsBuilder::NoMethods
        } else {
            MethodsBuilder::Filtered(filters)
        };
        Self::new(constants, attributes, methods)
    }

    pub fn build_constants(&self, members: &[MemberNode]) -> Vec<Constant> {
        self.constants.build(members)
    }

    pub fn build_attributes(&self, members: &[MemberNode]) -> Vec<Attribute> {
        self.attributes.build(members)
    }

    pub fn build_methods(&self, members: &[MemberNode]) -> Vec<Method> {
        self.methods.build(members)
    }
}

impl Default for MembersBuilder {
    fn default() -> Self {
        Self::from_config(&ParserConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::syntax::{ConstantNode, PropertyNode};

    fn property(name: &str, visibility: Visibility) -> MemberNode {
        MemberNode::Property(PropertyNode {
            name: name.into(),
            visibility: Some(visibility),
            ..Default::default()
        })
    }

    fn method(name: &str, visibility: Visibility) -> MemberNode {
        MemberNode::Method(MethodNode {
            name: name.into(),
            visibility: Some(visibility),
            ..Default::default()
        })
    }

    fn constant(name: &str) -> MemberNode {
        MemberNode::Constant(ConstantNode {
            name: name.into(),
            ..Default::default()
        })
    }

    /// Every visibility for every member kind, plus a node kind the builders ignore.
    fn all_combinations() -> Vec<MemberNode> {
        vec![
            constant("VERSION"),
            property("$public", Visibility::Public),
            property("$protected", Visibility::Protected),
            property("$private", Visibility::Private),
            method("publicMethod", Visibility::Public),
            method("protectedMethod", Visibility::Protected),
            method("privateMethod", Visibility::Private),
            MemberNode::Unknown {
                kind: "enum_case".into(),
            },
        ]
    }

    #[test]
    fn test_default_builder_keeps_everything() {
        let builder = MembersBuilder::default();
        let members = all_combinations();
        assert_eq!(builder.build_constants(&members).len(), 1);
        assert_eq!(builder.build_attributes(&members).len(), 3);
        assert_eq!(builder.build_methods(&members).len(), 3);
    }

    #[test]
    fn test_hide_attributes_and_protected_are_orthogonal() {
        let config = ParserConfig {
            hide_attributes: true,
            hide_protected: true,
            ..Default::default()
        };
        let builder = MembersBuilder::from_config(&config);
        let members = all_combinations();

        assert!(builder.build_attributes(&members).is_empty());
        let methods: Vec<String> = builder
            .build_methods(&members)
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(methods, vec!["publicMethod", "privateMethod"]);
        assert_eq!(builder.build_constants(&members).len(), 1);
    }

    #[test]
    fn test_hide_methods_with_private_filter() {
        let config = ParserConfig {
            hide_methods: true,
            hide_private: true,
            ..Default::default()
        };
        let builder = MembersBuilder::from_config(&config);
        let members = all_combinations();

        assert!(builder.build_methods(&members).is_empty());
        let attributes: Vec<String> = builder
            .build_attributes(&members)
            .iter()
            .map(|a| a.variable.name.to_owned())
            .collect();
        assert_eq!(attributes, vec!["$public", "$protected"]);
    }

    #[test]
    fn test_hide_constants() {
        let config = ParserConfig {
            hide_constants: true,
            ..Default::default()
        };
        let builder = MembersBuilder::from_config(&config);
        assert!(builder.build_constants(&all_combinations()).is_empty());
        assert_eq!(builder.build_attributes(&all_combinations()).len(), 3);
    }

    #[test]
    fn test_missing_visibility_defaults_to_public() {
        let members = vec![MemberNode::Method(MethodNode {
            name: "run".into(),
            ..Default::default()
        })];
        let builder = MembersBuilder::from_config(&ParserConfig {
            hide_private: true,
            hide_protected: true,
            ..Default::default()
        });
        let methods = builder.build_methods(&members);
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].modifiers.visibility, Visibility::Public);
    }

    #[test]
    fn test_method_signature_uses_doc_fallbacks() {
        let members = vec![MemberNode::Method(MethodNode {
            name: "send".into(),
            is_static: true,
            parameters: vec![
                ParameterNode {
                    name: "$message".into(),
                    type_hint: Some("Message".into()),
                    ..Default::default()
                },
                ParameterNode {
                    name: "$transport".into(),
                    ..Default::default()
                },
            ],
            doc: Some("/** @param Smtp $transport\n * @return Receipt */".into()),
            ..Default::default()
        })];
        let methods = MembersBuilder::default().build_methods(&members);
        assert_eq!(methods[0].to_string(), "+static send(Message $message, Smtp $transport): Receipt");
    }

    #[test]
    fn test_promoted_constructor_parameters_become_attributes() {
        let members = vec![MemberNode::Method(MethodNode {
            name: "__construct".into(),
            parameters: vec![
                ParameterNode {
                    name: "$repository".into(),
                    type_hint: Some("Repository".into()),
                    promoted_visibility: Some(Visibility::Private),
                },
                ParameterNode {
                    name: "$plain".into(),
                    type_hint: Some("int".into()),
                    promoted_visibility: None,
                },
            ],
            ..Default::default()
        })];

        let attributes = MembersBuilder::default().build_attributes(&members);
        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes[0].to_string(), "-Repository $repository");

        let hidden = MembersBuilder::from_config(&ParserConfig {
            hide_private: true,
            ..Default::default()
        });
        assert!(hidden.build_attributes(&members).is_empty());
    }
}
