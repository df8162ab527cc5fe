use crate::network::ObjectId;
use fnv::FnvHashMap;
use std::collections::hash_map::Entry;

/// Looks up an object's id (its index in the footer's objects list) from its
/// name. The same name can appear at several indices, so the first
/// occurrence is designated the primary id and the rest become secondaries
/// that resolve back to it.
pub(crate) struct ObjectIndex<'a> {
    name_index: FnvHashMap<&'a str, ObjectId>,
    primary_ind: FnvHashMap<ObjectId, ObjectId>,
}

impl<'a> ObjectIndex<'a> {
    pub(crate) fn new(objects: &'a [String]) -> Self {
        let mut name_index: FnvHashMap<&str, ObjectId> = FnvHashMap::default();
        let mut primary_ind: FnvHashMap<ObjectId, ObjectId> = FnvHashMap::default();

        for (i, name) in objects.iter().enumerate() {
            let val = ObjectId(i as i32);
            match name_index.entry(name) {
                Entry::Occupied(occupied) => {
                    primary_ind.insert(val, *occupied.get());
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(val);
                }
            };
        }

        Self {
            name_index,
            primary_ind,
        }
    }

    /// Return the primary `ObjectId` for an object name
    pub(crate) fn primary_by_name(&self, name: &str) -> Option<ObjectId> {
        self.name_index.get(name).copied()
    }

    /// Return the primary `ObjectId` given either a primary or secondary id
    pub(crate) fn primary_by_index(&self, id: ObjectId) -> ObjectId {
        self.primary_ind.get(&id).copied().unwrap_or(id)
    }
}
