//! Cache key identifying who asked for a logger

use std::any::{TypeId, type_name};
use std::borrow::Cow;
use std::fmt;

/// Identifies the type (or named component) a logger belongs to.
///
/// Keys built with [`TypeKey::of`] compare by `TypeId`, so two distinct types
/// sharing a printed name never collide. Keys built with [`TypeKey::named`]
/// compare by name only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeKey {
    type_id: Option<TypeId>,
    name: Cow<'static, str>,
}

impl TypeKey {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: Some(TypeId::of::<T>()),
            name: Cow::Borrowed(type_name::<T>()),
        }
    }

    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            type_id: None,
            name: name.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Last path segment of the name, e.g. `Client` for `my_crate::net::Client`
    pub fn short_name(&self) -> &str {
        let base = self.name.split('<').next().unwrap_or(&self.name);
        base.rsplit("::").next().unwrap_or(base)
    }

    pub fn type_id(&self) -> Option<TypeId> {
        self.type_id
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&'static str> for TypeKey {
    fn from(name: &'static str) -> Self {
        Self::named(name)
    }
}

impl From<String> for TypeKey {
    fn from(name: String) -> Self {
        Self::named(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Alpha;
    struct Beta;

    #[test]
    fn test_type_keys_distinguish_types() {
        assert_eq!(TypeKey::of::<Alpha>(), TypeKey::of::<Alpha>());
        assert_ne!(TypeKey::of::<Alpha>(), TypeKey::of::<Beta>());
    }

    #[test]
    fn test_named_key_differs_from_type_key_with_same_name() {
        let typed = TypeKey::of::<Alpha>();
        let named = TypeKey::named(typed.as_str().to_string());
        assert_ne!(typed, named);
        assert_eq!(named, TypeKey::named(typed.as_str().to_string()));
    }

    #[test]
    fn test_short_name() {
        assert_eq!(TypeKey::of::<Alpha>().short_name(), "Alpha");
        assert_eq!(TypeKey::of::<Vec<Alpha>>().short_name(), "Vec");
        assert_eq!(TypeKey::named("plain").short_name(), "plain");
    }

    #[test]
    fn test_display_uses_full_name() {
        let key = TypeKey::named("net::Client");
        assert_eq!(key.to_string(), "net::Client");
        assert!(key.type_id().is_none());
        assert!(TypeKey::of::<Beta>().type_id().is_some());
    }
}
