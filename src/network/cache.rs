use crate::bits::bit_width;
use crate::data::{ATTRIBUTES, OBJECT_CLASSES, PARENT_CLASSES};
use crate::errors::NetworkError;
use crate::models::{ClassIndex, ClassNetCache};
use crate::network::attributes::AttributeTag;
use crate::network::object_index::ObjectIndex;
use crate::network::ObjectId;
use std::cmp;

/// An entry in a class's dispatch table: the attribute object a stream id
/// stands for and the decoder it dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ObjectAttribute {
    pub tag: AttributeTag,
    pub object_id: ObjectId,
}

/// The per-class dispatch record: how wide stream ids are on the wire and
/// what each one resolves to. Lookup must be O(1) in the frame loop, so the
/// attributes live in a dense array indexed by stream id.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CacheInfo {
    pub max_stream_id: u32,
    pub stream_id_bits: u32,
    attributes: Vec<Option<ObjectAttribute>>,
}

impl CacheInfo {
    #[inline]
    pub fn attribute(&self, stream_id: u32) -> Option<ObjectAttribute> {
        self.attributes.get(stream_id as usize).copied().flatten()
    }
}

/// Flattened intermediate form of a net cache row while inheritance is
/// being resolved.
struct ResolvedEntry {
    object_ind: i32,
    cache_id: i32,
    props: Vec<(i32, ObjectAttribute)>,
}

/// The footer's class net cache, flattened: every row owns the union of its
/// ancestors' properties, stream id widths are precomputed, and rows are
/// addressable by object index. The table doubles as the memo for
/// parent-object resolution: once an archetype object is traced to the row
/// of its class, the row is re-registered under the archetype's own index.
pub(crate) struct DispatchTable {
    entries: Vec<CacheInfo>,
    object_entries: Vec<Option<u32>>,
}

impl DispatchTable {
    /// Resolves the raw cache in a single pass. Each row starts from its own
    /// properties and inherits from the closest prior row that matches:
    /// first by the object index of its parent class (when the class name
    /// has a known parent), then by the row's `parent_id` against prior
    /// `cache_id`s. Rows with no match stand alone; resolution never fails.
    pub fn resolve(
        objects: &[String],
        classes: &[ClassIndex],
        net_cache: &[ClassNetCache],
    ) -> DispatchTable {
        let mut resolved: Vec<ResolvedEntry> = Vec::with_capacity(net_cache.len());

        for cache in net_cache {
            let own = cache.properties.iter().map(|prop| {
                let tag = objects
                    .get(prop.object_ind as usize)
                    .and_then(|name| ATTRIBUTES.get(name.as_str()).copied())
                    .unwrap_or(AttributeTag::NotImplemented);
                (
                    prop.stream_id,
                    ObjectAttribute {
                        tag,
                        object_id: ObjectId(prop.object_ind),
                    },
                )
            });

            // The cache id route is how the format links rows, but the
            // footer data is incomplete: some rows point at a parent id
            // that was never written. When the class hierarchy knows the
            // parent class, prefer the most recent row of that class.
            let parent_by_class = classes
                .iter()
                .find(|c| c.index == cache.object_ind)
                .and_then(|c| PARENT_CLASSES.get(c.class.as_str()))
                .and_then(|parent_class| classes.iter().find(|c| c.class == *parent_class))
                .and_then(|parent| resolved.iter().rev().find(|e| e.object_ind == parent.index));

            let parent = parent_by_class
                .or_else(|| resolved.iter().rev().find(|e| e.cache_id == cache.parent_id));

            let mut props = parent.map(|p| p.props.clone()).unwrap_or_default();
            props.extend(own);

            resolved.push(ResolvedEntry {
                object_ind: cache.object_ind,
                cache_id: cache.cache_id,
                props,
            });
        }

        let mut entries = Vec::with_capacity(resolved.len());
        let mut object_entries = vec![None; objects.len()];
        for entry in &resolved {
            let max = entry
                .props
                .iter()
                .map(|&(stream_id, _)| stream_id)
                .filter(|&stream_id| stream_id >= 0)
                .max();

            let max_stream_id = max.map(|m| m as u32 + 1).unwrap_or(3);
            let stream_id_bits = cmp::max(bit_width(u64::from(max_stream_id)), 1) - 1;

            let mut attributes = vec![None; max_stream_id as usize];
            for &(stream_id, attr) in &entry.props {
                if let Some(slot) = attributes.get_mut(stream_id as usize) {
                    *slot = Some(attr);
                }
            }

            let ix = entries.len() as u32;
            entries.push(CacheInfo {
                max_stream_id,
                stream_id_bits,
                attributes,
            });
            if let Some(slot) = object_entries.get_mut(entry.object_ind as usize) {
                *slot = Some(ix);
            }
        }

        DispatchTable {
            entries,
            object_entries,
        }
    }

    #[inline]
    pub fn entry(&self, ix: u32) -> &CacheInfo {
        &self.entries[ix as usize]
    }

    /// Finds the dispatch record for an actor's object. Most objects aren't
    /// cache rows themselves (archetypes, map placed instances), so the
    /// lookup traces the object to its parent and memoises the answer under
    /// the object's own index for the next hundred thousand updates.
    /// `Ok(None)` means the parent resolved but has no cache row.
    pub fn dispatch_index(
        &mut self,
        object_id: ObjectId,
        objects: &[String],
        object_index: &ObjectIndex<'_>,
    ) -> Result<Option<u32>, NetworkError> {
        if let Some(Some(ix)) = self.object_entries.get(usize::from(object_id)) {
            return Ok(Some(*ix));
        }

        let primary = object_index.primary_by_index(object_id);
        if let Some(Some(ix)) = self.object_entries.get(usize::from(primary)) {
            return Ok(Some(*ix));
        }

        let name = objects
            .get(usize::from(object_id))
            .map(String::as_str)
            .unwrap_or("");

        let parent_ix = parent_object(name)
            .and_then(|parent| object_index.primary_by_name(parent))
            .ok_or_else(|| NetworkError::UnresolvedParent(object_id, String::from(name)))?;

        match self.object_entries.get(usize::from(parent_ix)).copied() {
            Some(Some(ix)) => {
                self.object_entries[usize::from(object_id)] = Some(ix);
                Ok(Some(ix))
            }
            _ => Ok(None),
        }
    }
}

/// Objects whose dispatch rows are registered under the generic level
/// object rather than a class of their own. Each map and game mode stamps
/// its own prefix on these names, so a substring probe is the only option.
const SELF_PARENTED: [&str; 6] = [
    "TheWorld:PersistentLevel.CrowdActor_TA",
    "TheWorld:PersistentLevel.VehiclePickup_Boost_TA",
    "TheWorld:PersistentLevel.CrowdManager_TA",
    "TheWorld:PersistentLevel.BreakOutActor_Platform_TA",
    "TheWorld:PersistentLevel.InMapScoreboard_TA",
    "TheWorld:PersistentLevel.HauntedBallTrapTrigger_TA",
];

/// Resolves the parent object whose cache row carries an object's
/// attributes: the static object to class table first, then the substring
/// fallbacks (first match wins). `None` means the network stream is not
/// decodable past this object.
pub(crate) fn parent_object(name: &str) -> Option<&'static str> {
    if let Some(parent) = OBJECT_CLASSES.get(name) {
        return Some(parent);
    }

    if let Some(generic) = SELF_PARENTED.iter().find(|sub| name.contains(*sub)) {
        return Some(generic);
    }

    if name.contains(":GameReplicationInfoArchetype") {
        return Some("TAGame.GRI_TA");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CacheProp;

    fn dummy_objects(len: usize) -> Vec<String> {
        (0..len).map(|i| format!("Object_{}", i)).collect()
    }

    fn cache_row(
        object_ind: i32,
        parent_id: i32,
        cache_id: i32,
        props: &[(i32, i32)],
    ) -> ClassNetCache {
        ClassNetCache {
            object_ind,
            parent_id,
            cache_id,
            properties: props
                .iter()
                .map(|&(object_ind, stream_id)| CacheProp {
                    object_ind,
                    stream_id,
                })
                .collect(),
        }
    }

    #[test]
    fn resolve_inherits_from_closest_prior_cache_id() {
        let objects = dummy_objects(53);
        let net_cache = vec![
            cache_row(40, 20, 38, &[(10, 10)]),
            cache_row(41, 38, 38, &[(11, 20)]),
            cache_row(52, 38, 48, &[(42, 38)]),
        ];

        let table = DispatchTable::resolve(&objects, &[], &net_cache);

        // the middle row inherits from the first (closest prior cache id 38)
        let mid = table.entry(table.object_entries[41].unwrap());
        assert!(mid.attribute(10).is_some());
        assert!(mid.attribute(20).is_some());

        // the last row must pick the *closest* prior row with cache id 38,
        // which is the middle one, already carrying the first row's props
        let last = table.entry(table.object_entries[52].unwrap());
        assert_eq!(last.attribute(10).unwrap().object_id, ObjectId(10));
        assert_eq!(last.attribute(20).unwrap().object_id, ObjectId(11));
        assert_eq!(last.attribute(38).unwrap().object_id, ObjectId(42));
        assert_eq!(last.max_stream_id, 39);
        assert_eq!(last.stream_id_bits, 5);

        // flattened lists are supersets of their ancestors'
        let first = table.entry(table.object_entries[40].unwrap());
        for stream_id in 0..first.max_stream_id {
            if first.attribute(stream_id).is_some() {
                assert!(mid.attribute(stream_id).is_some());
                assert!(last.attribute(stream_id).is_some());
            }
        }
    }

    #[test]
    fn resolve_prefers_parent_class_over_cache_id() {
        let mut objects = dummy_objects(8);
        objects[3] = String::from("TAGame.RBActor_TA");
        objects[5] = String::from("TAGame.Ball_TA");
        let classes = vec![
            ClassIndex {
                class: String::from("TAGame.RBActor_TA"),
                index: 3,
            },
            ClassIndex {
                class: String::from("TAGame.Ball_TA"),
                index: 5,
            },
        ];
        let net_cache = vec![
            cache_row(3, 0, 7, &[(1, 2)]),
            // the parent id is junk, the class hierarchy still finds RBActor
            cache_row(5, 99, 9, &[(2, 4)]),
        ];

        let table = DispatchTable::resolve(&objects, &classes, &net_cache);
        let ball = table.entry(table.object_entries[5].unwrap());
        assert!(ball.attribute(2).is_some());
        assert!(ball.attribute(4).is_some());
    }

    #[test]
    fn resolve_unmatched_entry_stands_alone() {
        let objects = dummy_objects(4);
        let net_cache = vec![cache_row(2, 77, 1, &[])];
        let table = DispatchTable::resolve(&objects, &[], &net_cache);
        let entry = table.entry(table.object_entries[2].unwrap());
        assert_eq!(entry.max_stream_id, 3);
        assert_eq!(entry.stream_id_bits, 1);
        assert_eq!(entry.attribute(1), None);
    }

    #[test]
    fn dispatch_memoises_archetype_lookup() {
        let objects = vec![
            String::from("Core.Object"),
            String::from("TAGame.Car_TA"),
            String::from("Archetypes.Car.Car_Default"),
        ];
        let object_index = ObjectIndex::new(&objects);
        let net_cache = vec![cache_row(1, 0, 1, &[(0, 5)])];
        let mut table = DispatchTable::resolve(&objects, &[], &net_cache);

        assert_eq!(table.object_entries[2], None);
        let ix = table
            .dispatch_index(ObjectId(2), &objects, &object_index)
            .unwrap()
            .unwrap();
        assert_eq!(table.entry(ix).max_stream_id, 6);
        // resolved through TAGame.Car_TA and now cached under the archetype
        assert_eq!(table.object_entries[2], Some(ix));
    }

    #[test]
    fn dispatch_unresolvable_parent() {
        let objects = vec![String::from("NotAThing.Object")];
        let object_index = ObjectIndex::new(&objects);
        let mut table = DispatchTable::resolve(&objects, &[], &[]);
        let err = table
            .dispatch_index(ObjectId(0), &objects, &object_index)
            .unwrap_err();
        assert_eq!(
            err,
            NetworkError::UnresolvedParent(ObjectId(0), String::from("NotAThing.Object"))
        );
    }

    #[test]
    fn parent_object_rules() {
        assert_eq!(
            parent_object("Archetypes.Ball.Ball_Default"),
            Some("TAGame.Ball_TA")
        );
        assert_eq!(
            parent_object("Stadium_P.TheWorld:PersistentLevel.CrowdActor_TA_1"),
            Some("TheWorld:PersistentLevel.CrowdActor_TA")
        );
        assert_eq!(
            parent_object("Wasteland_P.TheWorld:PersistentLevel.VehiclePickup_Boost_TA_30"),
            Some("TheWorld:PersistentLevel.VehiclePickup_Boost_TA")
        );
        assert_eq!(
            parent_object("GameInfo_Soccar.GameInfo.GameInfo_Soccar:GameReplicationInfoArchetype"),
            Some("TAGame.GRI_TA")
        );
        assert_eq!(parent_object("Engine.Unmapped"), None);
    }
}
