//! Type annotation lookup. An inline annotation always wins; a doc-comment tag is only
//! consulted when the declaration has none.

use std::sync::OnceLock;

use regex::Regex;

use crate::code::members::TypeDeclaration;

static VAR_TAG: OnceLock<Regex> = OnceLock::new();
static PARAM_TAG: OnceLock<Regex> = OnceLock::new();
static RETURN_TAG: OnceLock<Regex> = OnceLock::new();

fn var_tag() -> &'static Regex {
    VAR_TAG.get_or_init(|| Regex::new(r"(?m)@var\s+([^\s*]+)").expect("invalid @var pattern"))
}

fn param_tag() -> &'static Regex {
    PARAM_TAG.get_or_init(|| {
        Regex::new(r"(?m)@param\s+([^\s*$]+)\s+(?:\.\.\.)?(\$\w+)").expect("invalid @param pattern")
    })
}

fn return_tag() -> &'static Regex {
    RETURN_TAG
        .get_or_init(|| Regex::new(r"(?m)@return\s+([^\s*]+)").expect("invalid @return pattern"))
}

fn inline(type_hint: Option<&str>) -> Option<TypeDeclaration> {
    type_hint
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(TypeDeclaration::new)
}

/// Type of an attribute: the inline hint, else the `@var` tag.
pub fn attribute_type(type_hint: Option<&str>, doc: Option<&str>) -> Option<TypeDeclaration> {
    inline(type_hint).or_else(|| {
        let caps = var_tag().captures(doc?)?;
        Some(TypeDeclaration::new(&caps[1]))
    })
}

/// Type of the parameter `name`: the inline hint, else the matching `@param` tag.
pub fn parameter_type(
    name: &str,
    type_hint: Option<&str>,
    doc: Option<&str>,
) -> Option<TypeDeclaration> {
    inline(type_hint).or_else(|| {
        param_tag()
            .captures_iter(doc?)
            .find(|caps| &caps[2] == name)
            .map(|caps| TypeDeclaration::new(&caps[1]))
    })
}

/// Return type of a method: the inline hint, else the `@return` tag.
pub fn return_type(type_hint: Option<&str>, doc: Option<&str>) -> Option<TypeDeclaration> {
    inline(type_hint).or_else(|| {
        let caps = return_tag().captures(doc?)?;
        Some(TypeDeclaration::new(&caps[1]))
    })
}
