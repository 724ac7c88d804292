use crate::code::members::Visibility;

/// A predicate over a member's visibility. Public members are never excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityFilter {
    ExcludePrivate,
    ExcludeProtected,
}

impl VisibilityFilter {
    pub fn accepts(self, visibility: Visibility) -> bool {
        match self {
            VisibilityFilter::ExcludePrivate => visibility != Visibility::Private,
            VisibilityFilter::ExcludeProtected => visibility != Visibility::Protected,
        }
    }
}

/// An ordered chain of filters. A member passes only if every filter accepts it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityFilters(Vec<VisibilityFilter>);

impl VisibilityFilters {
    pub fn new(filters: Vec<VisibilityFilter>) -> Self {
        Self(filters)
    }

    pub fn accepts(&self, visibility: Visibility) -> bool {
        self.0.iter().all(|filter| filter.accepts(visibility))
    }
}
