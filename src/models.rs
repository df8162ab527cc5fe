//! The data structures a replay decodes into. Everything is `Serialize` so
//! callers can dump a replay to JSON (or any serde format) without knowing
//! about the binary layout, though the output is one way: the JSON form is
//! lossy with respect to numeric and string subtypes.

use crate::network::Frame;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// The structure a rocket league replay is parsed into
#[derive(Serialize, PartialEq, Debug, Clone)]
pub struct Replay {
    pub header_size: i32,
    pub header_crc: u32,
    pub major_version: i32,
    pub minor_version: i32,
    pub net_version: Option<i32>,
    pub game_type: String,

    /// A map would be more convenient, but nothing rules out duplicate
    /// property keys, so the pairs are kept as decoded
    #[serde(serialize_with = "pair_vec")]
    pub properties: Vec<(String, HeaderProp)>,
    pub content_size: i32,
    pub content_crc: u32,
    pub network_frames: Option<NetworkFrames>,
    pub levels: Vec<String>,
    pub keyframes: Vec<KeyFrame>,
    pub debug_info: Vec<DebugInfo>,
    pub tick_marks: Vec<TickMark>,
    pub packages: Vec<String>,
    pub objects: Vec<String>,
    pub names: Vec<String>,
    pub class_indices: Vec<ClassIndex>,
    pub net_cache: Vec<ClassNetCache>,
}

/// The frames decoded from the network stream
#[derive(Serialize, PartialEq, Debug, Clone)]
pub struct NetworkFrames {
    pub frames: Vec<Frame>,
}

/// A significant event in the match (eg. a goal). The tick mark is placed a
/// couple seconds before the event so replay playback has ramp-up time.
#[derive(Serialize, PartialEq, Debug, Clone)]
pub struct TickMark {
    pub description: String,
    pub frame: i32,
}

/// Index entries into the network stream for seeking without decoding every
/// frame before the target.
#[derive(Serialize, PartialEq, Debug, Clone, Copy)]
pub struct KeyFrame {
    pub time: f32,
    pub frame: i32,
    pub position: i32,
}

/// A value in the header's property map: who scored, player stats, the
/// recording fps, and so on.
#[derive(PartialEq, Debug, Clone)]
pub enum HeaderProp {
    Array(Vec<Vec<(String, HeaderProp)>>),
    Bool(bool),
    Byte,
    Float(f32),
    Int(i32),
    Name(String),
    QWord(u64),
    Str(String),
}

impl HeaderProp {
    /// If the property is an array of properties, returns the array
    pub fn as_array(&self) -> Option<&Vec<Vec<(String, HeaderProp)>>> {
        if let HeaderProp::Array(arr) = self {
            Some(arr)
        } else {
            None
        }
    }

    /// If the property is a boolean, returns the value
    pub fn as_bool(&self) -> Option<bool> {
        if let HeaderProp::Bool(val) = self {
            Some(*val)
        } else {
            None
        }
    }

    /// If the property is a float, returns the value
    pub fn as_float(&self) -> Option<f32> {
        if let HeaderProp::Float(val) = self {
            Some(*val)
        } else {
            None
        }
    }

    /// If the property is a QWord, returns the value
    pub fn as_u64(&self) -> Option<u64> {
        if let HeaderProp::QWord(val) = self {
            Some(*val)
        } else {
            None
        }
    }

    /// If the property is an int, returns the value
    ///
    /// ```
    /// # use camber::HeaderProp;
    /// assert_eq!(HeaderProp::Int(-250).as_i32(), Some(-250));
    /// assert_eq!(HeaderProp::Byte.as_i32(), None);
    /// ```
    pub fn as_i32(&self) -> Option<i32> {
        if let HeaderProp::Int(val) = self {
            Some(*val)
        } else {
            None
        }
    }

    /// If the property is a string or a name, returns the value
    ///
    /// ```
    /// # use camber::HeaderProp;
    /// assert_eq!(HeaderProp::Name("abc".to_string()).as_string(), Some("abc"));
    /// assert_eq!(HeaderProp::Str("def".to_string()).as_string(), Some("def"));
    /// assert_eq!(HeaderProp::Byte.as_string(), None);
    /// ```
    pub fn as_string(&self) -> Option<&str> {
        match self {
            HeaderProp::Name(val) => Some(val.as_str()),
            HeaderProp::Str(val) => Some(val.as_str()),
            _ => None,
        }
    }
}

/// Debugging info stored in the replay if debugging was enabled
#[derive(Serialize, PartialEq, Debug, Clone)]
pub struct DebugInfo {
    pub frame: i32,
    pub user: String,
    pub text: String,
}

/// A mapping between a class name and its object's index
#[derive(Serialize, PartialEq, Debug, Clone)]
pub struct ClassIndex {
    pub class: String,

    /// The index the class's object appears at in `Replay::objects`
    pub index: i32,
}

/// A single replicated property in a class net cache entry
#[derive(Serialize, PartialEq, Debug, Clone, Copy)]
pub struct CacheProp {
    /// The index the property's object appears at in `Replay::objects`
    pub object_ind: i32,

    /// The compressed id the property is written under in the network
    /// stream. Stream ids are reused between classes.
    pub stream_id: i32,
}

/// One row of the footer's class net cache: the condensed description of a
/// class's replicated property layout.
#[derive(Serialize, PartialEq, Debug, Clone)]
pub struct ClassNetCache {
    /// The index the class's object appears at in `Replay::objects`
    pub object_ind: i32,

    /// The `cache_id` of the parent row. The child inherits every parent
    /// property. Resolves against the closest prior row with that cache id.
    pub parent_id: i32,

    /// The cache id referenced by children of this row
    pub cache_id: i32,

    /// Properties declared directly on this class
    pub properties: Vec<CacheProp>,
}

/// Serializes a vector of key value pairs as a map. The data format doesn't
/// rule out duplicate keys and JSON technically doesn't either:
/// <http://stackoverflow.com/q/21832701/433785>
fn pair_vec<K, V, S>(inp: &[(K, V)], serializer: S) -> Result<S::Ok, S::Error>
where
    K: Serialize,
    V: Serialize,
    S: Serializer,
{
    let mut state = serializer.serialize_map(Some(inp.len()))?;
    for (key, val) in inp.iter() {
        state.serialize_key(key)?;
        state.serialize_value(val)?;
    }
    state.end()
}

/// Header values are self describing in JSON, so the enum discriminant is
/// dropped on serialization. Slightly lossy: `Name` vs `Str` and `Byte` vs
/// the numeric variants are indistinguishable in the output.
impl Serialize for HeaderProp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match *self {
            HeaderProp::Array(ref x) => {
                let mut state = serializer.serialize_seq(Some(x.len()))?;
                for inner in x {
                    let mut els = HashMap::new();
                    for (key, val) in inner.iter() {
                        els.insert(key, val);
                    }
                    state.serialize_element(&els)?;
                }
                state.end()
            }
            HeaderProp::Bool(ref x) => serializer.serialize_bool(*x),
            HeaderProp::Byte => serializer.serialize_u8(0),
            HeaderProp::Float(ref x) => serializer.serialize_f32(*x),
            HeaderProp::Int(ref x) => serializer.serialize_i32(*x),
            HeaderProp::QWord(ref x) => serializer.collect_str(x),
            HeaderProp::Name(ref x) | HeaderProp::Str(ref x) => serializer.serialize_str(x),
        }
    }
}
