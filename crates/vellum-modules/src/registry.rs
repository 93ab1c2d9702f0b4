//! Module registry with lazy, at-most-once initialization.
//!
//! Each registered module moves through
//! `Uninitialized -> Initializing -> Ready` (or `Failed`). A module that is
//! resolved again while still `Initializing` is part of a cycle.
//!
//! The registry is single-threaded: exports are shared as `Rc` and the
//! registry is passed explicitly rather than held in a global.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::key::ModuleKey;

/// A module's exported value.
pub type Export = Rc<dyn Any>;

/// Builds a module's export. Runs at most once.
pub type Factory = Box<dyn FnOnce(&mut Resolver<'_>) -> Result<Export, RegistryError>>;

enum Slot {
    Uninitialized(Factory),
    Initializing,
    Ready(Export),
    Failed(String),
}

impl Slot {
    fn state(&self) -> ModuleState {
        match self {
            Slot::Uninitialized(_) => ModuleState::Uninitialized,
            Slot::Initializing => ModuleState::Initializing,
            Slot::Ready(_) => ModuleState::Ready,
            Slot::Failed(_) => ModuleState::Failed,
        }
    }
}

/// Initialization state of a registered module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleState {
    /// Registered, factory not yet run
    Uninitialized,
    /// Factory is running
    Initializing,
    /// Factory ran, export cached
    Ready,
    /// Factory ran and failed
    Failed,
}

impl fmt::Display for ModuleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uninitialized => "uninitialized",
            Self::Initializing => "initializing",
            Self::Ready => "ready",
            Self::Failed => "failed",
        })
    }
}

/// A registry of lazily built modules.
#[derive(Default)]
pub struct ModuleRegistry {
    /// Module slots by key
    modules: HashMap<ModuleKey, Slot>,

    /// Keys in registration order
    order: Vec<ModuleKey>,

    /// Keys whose factories are currently running, outermost first
    stack: Vec<ModuleKey>,
}

impl ModuleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `key`.
    ///
    /// The factory's return value is wrapped in an `Rc` and shared by every
    /// later resolve.
    pub fn register<T, F>(&mut self, key: impl Into<ModuleKey>, factory: F) -> Result<(), RegistryError>
    where
        T: Any,
        F: FnOnce(&mut Resolver<'_>) -> Result<T, RegistryError> + 'static,
    {
        let key = key.into();
        if self.modules.contains_key(&key) {
            return Err(RegistryError::DuplicateKey(key));
        }

        let factory: Factory = Box::new(move |ctx: &mut Resolver<'_>| {
            factory(ctx).map(|value| Rc::new(value) as Export)
        });

        tracing::debug!("Registered module {}", key);
        self.modules.insert(key.clone(), Slot::Uninitialized(factory));
        self.order.push(key);
        Ok(())
    }

    /// Resolve a module, running its factory if this is the first request.
    pub fn resolve(&mut self, key: impl Into<ModuleKey>) -> Result<Export, RegistryError> {
        let key = key.into();

        let slot = self
            .modules
            .get_mut(&key)
            .ok_or_else(|| RegistryError::UnknownModule(key.clone()))?;

        let factory = match slot {
            Slot::Ready(export) => return Ok(Rc::clone(export)),
            Slot::Initializing => {
                return Err(RegistryError::CyclicDependency {
                    path: cycle_path(&self.stack, &key),
                });
            }
            Slot::Failed(message) => {
                return Err(RegistryError::Poisoned {
                    key,
                    message: message.clone(),
                });
            }
            Slot::Uninitialized(_) => match std::mem::replace(slot, Slot::Initializing) {
                Slot::Uninitialized(factory) => factory,
                _ => return Err(RegistryError::UnknownModule(key)),
            },
        };

        tracing::debug!("Initializing module {}", key);
        self.stack.push(key.clone());

        let result = {
            let mut ctx = Resolver {
                registry: &mut *self,
                key: key.clone(),
            };
            factory(&mut ctx)
        };

        self.stack.pop();

        let next = match &result {
            Ok(export) => Slot::Ready(Rc::clone(export)),
            Err(e) => {
                tracing::warn!("Module {} failed to initialize: {}", key, e);
                Slot::Failed(e.to_string())
            }
        };
        if let Some(slot) = self.modules.get_mut(&key) {
            *slot = next;
        }

        result
    }

    /// Resolve a module and downcast its export.
    pub fn resolve_as<T: Any>(&mut self, key: impl Into<ModuleKey>) -> Result<Rc<T>, RegistryError> {
        let key = key.into();
        let export = self.resolve(&key)?;
        downcast(key, export)
    }

    /// Check if a module is registered.
    pub fn contains(&self, key: impl Into<ModuleKey>) -> bool {
        self.modules.contains_key(&key.into())
    }

    /// State of a registered module.
    pub fn state(&self, key: impl Into<ModuleKey>) -> Option<ModuleState> {
        self.modules.get(&key.into()).map(Slot::state)
    }

    /// Registered keys in registration order.
    pub fn keys(&self) -> &[ModuleKey] {
        &self.order
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if no module is registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for key in &self.order {
            if let Some(slot) = self.modules.get(key) {
                map.entry(key, &slot.state());
            }
        }
        map.finish()
    }
}

/// Resolution context handed to a factory while it runs.
pub struct Resolver<'r> {
    registry: &'r mut ModuleRegistry,
    key: ModuleKey,
}

impl Resolver<'_> {
    /// Key of the module being initialized.
    pub fn key(&self) -> &ModuleKey {
        &self.key
    }

    /// Resolve a dependency.
    pub fn resolve(&mut self, key: impl Into<ModuleKey>) -> Result<Export, RegistryError> {
        self.registry.resolve(key)
    }

    /// Resolve a dependency and downcast its export.
    pub fn resolve_as<T: Any>(&mut self, key: impl Into<ModuleKey>) -> Result<Rc<T>, RegistryError> {
        self.registry.resolve_as(key)
    }

    /// Resolve a dependency only for its initialization side effects.
    pub fn require(&mut self, key: impl Into<ModuleKey>) -> Result<(), RegistryError> {
        self.registry.resolve(key).map(|_| ())
    }

    /// State of another module, as seen from inside this factory.
    pub fn state(&self, key: impl Into<ModuleKey>) -> Option<ModuleState> {
        self.registry.state(key)
    }

    /// Build a factory failure for the module being initialized.
    pub fn fail(&self, message: impl fmt::Display) -> RegistryError {
        RegistryError::Factory {
            key: self.key.clone(),
            message: message.to_string(),
        }
    }
}

fn downcast<T: Any>(key: ModuleKey, export: Export) -> Result<Rc<T>, RegistryError> {
    export.downcast::<T>().map_err(|_| RegistryError::TypeMismatch {
        key,
        expected: std::any::type_name::<T>(),
    })
}

/// Render the cycle closing at `key`, e.g. `a -> b -> a`.
fn cycle_path(stack: &[ModuleKey], key: &ModuleKey) -> String {
    let start = stack.iter().position(|k| k == key).unwrap_or(0);
    stack[start..]
        .iter()
        .chain(std::iter::once(key))
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Errors that can occur with the registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Module already registered: {0}")]
    DuplicateKey(ModuleKey),

    #[error("Cyclic module dependency: {path}")]
    CyclicDependency { path: String },

    #[error("Module not found: {0}")]
    UnknownModule(ModuleKey),

    #[error("Module {key} does not export a {expected}")]
    TypeMismatch {
        key: ModuleKey,
        expected: &'static str,
    },

    #[error("Module {key} failed to initialize: {message}")]
    Factory { key: ModuleKey, message: String },

    #[error("Module {key} previously failed to initialize: {message}")]
    Poisoned { key: ModuleKey, message: String },
}
