//! Ordered path storage with identity lookup and swap-erase removal.

/// Identity extraction for records stored in a [`PathRegistry`].
pub trait Keyed {
    /// Cheap-to-clone identity compared during lookup and dedupe.
    type Key: PartialEq;

    /// Returns this record's identity.
    fn key(&self) -> Self::Key;
}

/// Growable ordered collection of uniquely-owned path records.
///
/// Lookup is an O(n) linear scan by key equality. Removal swaps the target
/// with the last element and pops, so no elements shift and any sibling
/// structure index-aligned with this registry can mirror the removal by
/// applying the identical swap at the returned index.
#[derive(Debug)]
pub struct PathRegistry<P: Keyed> {
    paths: Vec<P>,
}

impl<P: Keyed> Default for PathRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Keyed> PathRegistry<P> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self { paths: Vec::new() }
    }

    /// Returns the number of registered paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` when no paths are registered.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Looks up a path by key without mutating state.
    pub fn find(&self, key: &P::Key) -> Option<&P> {
        self.paths.iter().find(|path| path.key() == *key)
    }

    /// Looks up a path by key for mutation.
    pub fn find_mut(&mut self, key: &P::Key) -> Option<&mut P> {
        self.paths.iter_mut().find(|path| path.key() == *key)
    }

    /// Appends `path` unless a record with the same key already exists.
    ///
    /// Returns `true` only when the path was inserted.
    pub fn add(&mut self, path: P) -> bool {
        if self.find(&path.key()).is_some() {
            return false;
        }
        self.paths.push(path);
        true
    }

    /// Removes the path with `key` using swap-with-last-then-pop.
    ///
    /// Returns the index the record occupied together with the record itself,
    /// transferring ownership out of the registry exactly once. The element
    /// previously stored last now occupies that index.
    pub fn remove(&mut self, key: &P::Key) -> Option<(usize, P)> {
        let index = self.paths.iter().position(|path| path.key() == *key)?;
        Some((index, self.paths.swap_remove(index)))
    }

    /// Empties the registry, yielding ownership of every record.
    pub fn take_all(&mut self) -> Vec<P> {
        std::mem::take(&mut self.paths)
    }

    /// Iterates paths in registry order.
    pub fn iter(&self) -> std::slice::Iter<'_, P> {
        self.paths.iter()
    }

    /// Iterates paths mutably in registry order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, P> {
        self.paths.iter_mut()
    }

    /// Reorders paths by `compare`. Equal elements may be reordered freely.
    pub fn sort_unstable_by<F>(&mut self, compare: F)
    where
        F: FnMut(&P, &P) -> std::cmp::Ordering,
    {
        self.paths.sort_unstable_by(compare);
    }
}
