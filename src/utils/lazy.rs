//! Map whose values may be closures evaluated on first access.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use tracing::trace;

struct Slot<V> {
    value: Option<V>,
    init: Option<Box<dyn FnOnce() -> V>>,
}

impl<V> Slot<V> {
    fn force(&mut self) -> Option<&mut V> {
        if let Some(init) = self.init.take() {
            self.value = Some(init());
        }
        self.value.as_mut()
    }
}

/// `HashMap` with lazily evaluated entries.
///
/// An entry added with [`LazyMap::insert_lazy`] runs its closure the first
/// time it is read and keeps the result; later reads return the stored value.
pub struct LazyMap<K, V> {
    slots: HashMap<K, Slot<V>>,
}

impl<K, V> Default for LazyMap<K, V> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V> LazyMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an evaluated value, replacing any previous entry
    pub fn insert(&mut self, key: K, value: V) {
        self.slots.insert(
            key,
            Slot {
                value: Some(value),
                init: None,
            },
        );
    }

    /// Insert a closure that produces the value on first access
    pub fn insert_lazy<F>(&mut self, key: K, init: F)
    where
        F: FnOnce() -> V + 'static,
    {
        self.slots.insert(
            key,
            Slot {
                value: None,
                init: Some(Box::new(init)),
            },
        );
    }

    /// Value under `key`, evaluating it first if needed
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.get_mut(key).map(|v| &*v)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let slot = self.slots.get_mut(key)?;
        if slot.init.is_some() {
            trace!("evaluating lazy entry");
        }
        slot.force()
    }

    /// Whether `key` holds a value that no longer needs evaluation
    pub fn is_evaluated<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.slots.get(key).is_some_and(|slot| slot.init.is_none())
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.slots.contains_key(key)
    }

    /// Remove an entry and return its value, evaluated if still pending
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let mut slot = self.slots.remove(key)?;
        slot.force();
        slot.value
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.slots.keys()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for LazyMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, slot) in &self.slots {
            match &slot.value {
                Some(value) => map.entry(key, value),
                None => map.entry(key, &format_args!("<lazy>")),
            };
        }
        map.finish()
    }
}
