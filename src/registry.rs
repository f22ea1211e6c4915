//! Indirect object registry.
//!
//! Every indirect object — pages, content streams, fonts, images, the
//! pages-root, the catalog, the info dictionary — is registered at
//! creation time and receives the next sequential object number,
//! starting at 1. Object number 0 is reserved for the free-list head of
//! the cross-reference table and is never assigned. Byte offsets are
//! recorded during serialization only.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::fonts::FontId;
use crate::image::ImageId;
use crate::object::ObjectRef;
use crate::pages::PageId;

/// What a registered object number stands for.
///
/// Bodies are assembled at serialization time; until then the registry
/// records only which entity owns each number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The document catalog
    Catalog,
    /// The pages-root node
    PagesRoot,
    /// The info dictionary
    Info,
    /// A page-tree node
    Page(PageId),
    /// A page's content stream
    Contents(PageId),
    /// A font dictionary
    Font(FontId),
    /// An image XObject
    Image(ImageId),
}

/// Assigns object numbers in creation order and resolves them to byte
/// offsets after serialization.
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    slots: Vec<Slot>,
    offsets: HashMap<u32, usize>,
}

impl ObjectRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object, assigning the next sequential number.
    pub fn register(&mut self, slot: Slot) -> ObjectRef {
        self.slots.push(slot);
        ObjectRef::new(self.slots.len() as u32)
    }

    /// Highest assigned object number.
    pub fn highest_id(&self) -> u32 {
        self.slots.len() as u32
    }

    /// Cross-reference table size (one past the highest number).
    pub fn xref_size(&self) -> u32 {
        self.highest_id() + 1
    }

    /// Whether `r` was assigned by this registry.
    pub fn contains(&self, r: ObjectRef) -> bool {
        r.id >= 1 && (r.id as usize) <= self.slots.len()
    }

    /// Fail if `r` was never registered.
    pub fn ensure_registered(&self, r: ObjectRef) -> Result<()> {
        if self.contains(r) {
            Ok(())
        } else {
            Err(Error::UnregisteredObject(r))
        }
    }

    /// Iterate `(reference, slot)` pairs in ascending object number order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectRef, Slot)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, &slot)| (ObjectRef::new(i as u32 + 1), slot))
    }

    /// Record the byte offset at which an object's emission began.
    pub fn record_offset(&mut self, r: ObjectRef, offset: usize) {
        self.offsets.insert(r.id, offset);
    }

    /// Resolve an object number to its byte offset.
    ///
    /// Populated only once serialization has run over the full set.
    pub fn resolve(&self, r: ObjectRef) -> Option<usize> {
        self.offsets.get(&r.id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let mut registry = ObjectRegistry::new();
        let a = registry.register(Slot::Catalog);
        let b = registry.register(Slot::PagesRoot);
        let c = registry.register(Slot::Page(PageId(0)));
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(c.id, 3);
        assert_eq!(registry.highest_id(), 3);
        assert_eq!(registry.xref_size(), 4);
    }

    #[test]
    fn test_id_zero_is_never_assigned() {
        let mut registry = ObjectRegistry::new();
        for _ in 0..10 {
            let r = registry.register(Slot::Info);
            assert!(r.id >= 1);
        }
        assert!(!registry.contains(ObjectRef::new(0)));
    }

    #[test]
    fn test_ensure_registered() {
        let mut registry = ObjectRegistry::new();
        let r = registry.register(Slot::Catalog);
        assert!(registry.ensure_registered(r).is_ok());
        assert!(matches!(
            registry.ensure_registered(ObjectRef::new(7)),
            Err(Error::UnregisteredObject(_))
        ));
    }

    #[test]
    fn test_iteration_is_in_id_order() {
        let mut registry = ObjectRegistry::new();
        registry.register(Slot::Catalog);
        registry.register(Slot::Font(FontId(0)));
        registry.register(Slot::Image(ImageId(0)));
        let ids: Vec<u32> = registry.iter().map(|(r, _)| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_offsets_resolve_after_recording() {
        let mut registry = ObjectRegistry::new();
        let r = registry.register(Slot::Catalog);
        assert_eq!(registry.resolve(r), None);
        registry.record_offset(r, 15);
        assert_eq!(registry.resolve(r), Some(15));
    }
}
