//! Module identifiers.

use std::fmt;

/// Key a module is registered under: a build-assigned number or a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModuleKey {
    Id(u32),
    Name(String),
}

impl From<u32> for ModuleKey {
    fn from(id: u32) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for ModuleKey {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ModuleKey {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&ModuleKey> for ModuleKey {
    fn from(key: &ModuleKey) -> Self {
        key.clone()
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{}", id),
            Self::Name(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_from_ids_and_names() {
        assert_eq!(ModuleKey::from(377u32), ModuleKey::Id(377));
        assert_eq!(ModuleKey::from("layout"), ModuleKey::Name("layout".into()));
        assert_ne!(ModuleKey::from(1u32), ModuleKey::from("1"));
    }

    #[test]
    fn displays_ids_with_hash() {
        assert_eq!(ModuleKey::from(104u32).to_string(), "#104");
        assert_eq!(ModuleKey::from("pages/index").to_string(), "pages/index");
    }
}
