//! Immutable table of `(resource, action) -> handler` bindings.
//!
//! A [`RegistryBuilder`] collects registrations at startup and rejects
//! duplicates; [`RegistryBuilder::build`] freezes the table into a
//! [`Registry`] that is shared read-only between workers.

use std::collections::HashMap;
use std::fmt;

use super::Handler;

/// The action half of a registry key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionKey {
    /// `POST /R`
    Create,
    /// `GET /R`
    List,
    /// `GET /R/I`
    Detail,
    /// `PUT /R/I`
    Update,
    /// `DELETE /R/I`
    Delete,
    /// `GET /R/I/C`, listing the named relation under a parent record.
    Child(String),
}

impl ActionKey {
    /// Child relation key.
    pub fn child(name: impl Into<String>) -> Self {
        Self::Child(name.into())
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => f.write_str("create"),
            Self::List => f.write_str("list"),
            Self::Detail => f.write_str("detail"),
            Self::Update => f.write_str("update"),
            Self::Delete => f.write_str("delete"),
            Self::Child(name) => write!(f, "child:{name}"),
        }
    }
}

/// Errors raised while assembling a [`Registry`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The pair already has a handler.
    #[error("handler already registered for {action} on resource `{resource}`")]
    Duplicate {
        /// Resource name.
        resource: String,
        /// Action that was registered twice.
        action: ActionKey,
    },
    /// A resource or child name was empty or contained `/`.
    #[error("invalid route name `{name}`")]
    InvalidName {
        /// The rejected name.
        name: String,
    },
}

fn validate_name(name: &str) -> Result<(), RegistryError> {
    if name.is_empty() || name.contains('/') {
        return Err(RegistryError::InvalidName {
            name: name.to_owned(),
        });
    }
    Ok(())
}

type Table = HashMap<String, HashMap<ActionKey, Handler>>;

/// Collects handler registrations before the registry is frozen.
#[derive(Default)]
pub struct RegistryBuilder {
    entries: Table,
}

impl RegistryBuilder {
    /// Start with an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handler` to `(resource, action)`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Duplicate`] when the pair is already bound and
    /// [`RegistryError::InvalidName`] for names that could never match a path
    /// segment.
    pub fn register(
        &mut self,
        resource: &str,
        action: ActionKey,
        handler: Handler,
    ) -> Result<&mut Self, RegistryError> {
        validate_name(resource)?;
        if let ActionKey::Child(name) = &action {
            validate_name(name)?;
        }
        let actions = self.entries.entry(resource.to_owned()).or_default();
        if actions.contains_key(&action) {
            return Err(RegistryError::Duplicate {
                resource: resource.to_owned(),
                action,
            });
        }
        actions.insert(action, handler);
        Ok(self)
    }

    /// Freeze the table.
    #[must_use]
    pub fn build(self) -> Registry {
        Registry {
            entries: self.entries,
        }
    }
}

/// Frozen handler table.
#[derive(Clone, Default)]
pub struct Registry {
    entries: Table,
}

impl Registry {
    /// Look up the handler bound to `(resource, action)`.
    #[must_use]
    pub fn resolve(&self, resource: &str, action: &ActionKey) -> Option<&Handler> {
        self.entries.get(resource)?.get(action)
    }

    /// Number of bound pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    /// Whether nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<String> = self
            .entries
            .iter()
            .flat_map(|(resource, actions)| {
                actions.keys().map(move |action| format!("{resource} {action}"))
            })
            .collect();
        keys.sort();
        f.debug_struct("Registry").field("entries", &keys).finish()
    }
}
