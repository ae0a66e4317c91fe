use std::{collections::HashMap, hash::BuildHasherDefault};

use parking_lot::RwLock;
use wyhash::WyHash as ThunkHasher;

use crate::{AccessError, AccessResult, MemberDescriptor, Synthesizer, Thunk};

type ThunkMap = HashMap<MemberDescriptor, Thunk, BuildHasherDefault<ThunkHasher>>;

/// Memoizes synthesized thunks by descriptor.
///
/// Caches are independent scopes: create as many as needed. Entries are never
/// evicted; [`ThunkCache::dispose`] drops them all and closes the scope.
pub struct ThunkCache {
    /// `None` once disposed.
    thunks: RwLock<Option<ThunkMap>>,
}

impl ThunkCache {
    pub fn new() -> Self {
        Self {
            thunks: RwLock::new(Some(ThunkMap::default())),
        }
    }

    /// Return the thunk stored for `descriptor`, synthesizing and storing it on a miss.
    ///
    /// `synthesize` runs without holding the cache lock, so several threads can race
    /// on one descriptor. The first result stored wins and every racer gets that one.
    /// A failed synthesis is returned as is and nothing is stored.
    pub fn get_or_create<F>(&self, descriptor: &MemberDescriptor, synthesize: F) -> AccessResult<Thunk>
    where
        F: FnOnce(&MemberDescriptor) -> AccessResult<Thunk>,
    {
        if let Some(thunk) = self.get(descriptor)? {
            glog::trace!("thunk cache hit: {}", descriptor);
            return Ok(thunk);
        }

        glog::trace!("thunk cache miss: {}", descriptor);
        let thunk = synthesize(descriptor)?;

        let mut thunks = self.thunks.write();
        let thunks = thunks.as_mut().ok_or(AccessError::ScopeDisposed)?;
        Ok(thunks.entry(descriptor.clone()).or_insert(thunk).clone())
    }

    pub fn get_or_synthesize(&self, descriptor: &MemberDescriptor, synthesizer: &Synthesizer) -> AccessResult<Thunk> {
        self.get_or_create(descriptor, |descriptor| synthesizer.synthesize(descriptor))
    }

    /// Like [`ThunkCache::get_or_synthesize`], narrowed to one thunk type.
    pub fn get_or_synthesize_as<T>(&self, descriptor: &MemberDescriptor, synthesizer: &Synthesizer) -> AccessResult<T>
    where
        T: TryFrom<Thunk, Error = AccessError>,
    {
        T::try_from(self.get_or_synthesize(descriptor, synthesizer)?)
    }

    /// Stored thunk for `descriptor`, if any.
    pub fn get(&self, descriptor: &MemberDescriptor) -> AccessResult<Option<Thunk>> {
        let thunks = self.thunks.read();
        let thunks = thunks.as_ref().ok_or(AccessError::ScopeDisposed)?;
        Ok(thunks.get(descriptor).cloned())
    }

    pub fn contains(&self, descriptor: &MemberDescriptor) -> bool {
        self.thunks.read()
            .as_ref()
            .map_or(false, |thunks| thunks.contains_key(descriptor))
    }

    pub fn len(&self) -> usize {
        self.thunks.read()
            .as_ref()
            .map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every stored thunk. Any later request fails with [`AccessError::ScopeDisposed`].
    ///
    /// Thunks already handed out stay callable.
    pub fn dispose(&self) {
        if let Some(thunks) = self.thunks.write().take() {
            glog::debug!("disposed thunk cache holding {} thunk(s)", thunks.len());
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.thunks.read().is_none()
    }
}

impl Default for ThunkCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ThunkCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThunkCache")
            .field("len", &self.len())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use vesper_reflect::{ReflectError, Value};

    use super::*;
    use crate::{Getter, Target};

    fn constant(value: u32) -> AccessResult<Thunk> {
        Ok(Getter::new(move |_: Target<'_>| Ok(Box::new(value) as Value)).into())
    }

    #[test]
    fn second_request_reuses_the_stored_thunk() {
        let cache = ThunkCache::new();
        let descriptor = MemberDescriptor::field::<u32>("value");
        let calls = AtomicUsize::new(0);
        let synthesize = |_: &MemberDescriptor| {
            calls.fetch_add(1, Ordering::SeqCst);
            constant(1)
        };

        let first = cache.get_or_create(&descriptor, synthesize).unwrap();
        let second = cache.get_or_create(&descriptor, synthesize).unwrap();

        assert!(first.ptr_eq(&second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(&descriptor));
    }

    #[test]
    fn failures_are_not_stored() {
        let cache = ThunkCache::new();
        let descriptor = MemberDescriptor::field::<u32>("value");

        let err = cache
            .get_or_create(&descriptor, |_| Err(AccessError::Reflect(ReflectError::Invocation("boom".into()))))
            .unwrap_err();
        assert!(matches!(err, AccessError::Reflect(_)));
        assert!(cache.is_empty());

        assert!(cache.get_or_create(&descriptor, |_| constant(2)).is_ok());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn disposed_cache_fails_fast() {
        let cache = ThunkCache::new();
        let descriptor = MemberDescriptor::field::<u32>("value");
        let thunk = cache.get_or_create(&descriptor, |_| constant(3)).unwrap();

        cache.dispose();
        assert!(cache.is_disposed());
        assert_eq!(cache.len(), 0);
        assert_eq!(
            cache.get_or_create(&descriptor, |_| constant(3)).unwrap_err(),
            AccessError::ScopeDisposed,
        );

        // thunks already handed out keep working
        let Thunk::Getter(getter) = thunk else {
            panic!("expected a getter");
        };
        assert!(getter.get(Target::Static).is_ok());
    }
}
