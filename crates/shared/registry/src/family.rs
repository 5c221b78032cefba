use crate::registry::OptionRegistry;
use crate::service::Transport;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId, type_name};
use std::sync::{Arc, LazyLock};
use tracing::debug;

static GLOBAL: LazyLock<RegistryFamily> = LazyLock::new(RegistryFamily::new);

/// One [`OptionRegistry`] per transport type.
///
/// Registries are created on first request and live as long as the family.
/// Registries for different transports share nothing: the same token can be
/// registered in each of them independently.
#[derive(Debug, Default)]
pub struct RegistryFamily {
    registries: RwLock<FxHashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl RegistryFamily {
    /// Creates a new, empty family.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide family, initialized on first access.
    ///
    /// Prefer passing an explicit [`RegistryFamily`] or [`OptionRegistry`]
    /// around. This exists for call sites that cannot, and any registration
    /// made through it must happen before the CLI reads it.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Returns the registry for transport `T`, creating it if needed.
    #[must_use]
    pub fn registry<T: Transport>(&self) -> Arc<OptionRegistry<T>> {
        let id = TypeId::of::<T>();

        if let Some(registry) = Self::lookup(&self.registries.read(), id) {
            return registry;
        }

        let mut registries = self.registries.write();
        if let Some(registry) = Self::lookup(&registries, id) {
            return registry;
        }

        let registry = Arc::new(OptionRegistry::<T>::new());
        registries.insert(id, Arc::clone(&registry) as Arc<dyn Any + Send + Sync>);
        debug!(transport = type_name::<T>(), "Service option registry created");
        registry
    }

    fn lookup<T: Transport>(
        registries: &FxHashMap<TypeId, Arc<dyn Any + Send + Sync>>,
        id: TypeId,
    ) -> Option<Arc<OptionRegistry<T>>> {
        registries.get(&id).cloned().and_then(|slot| slot.downcast::<OptionRegistry<T>>().ok())
    }

    /// Returns `true` if a registry for `T` has been created.
    #[must_use]
    pub fn contains<T: Transport>(&self) -> bool {
        self.registries.read().contains_key(&TypeId::of::<T>())
    }

    /// Number of transport registries created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
