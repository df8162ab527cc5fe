use crate::bits::BitReader;
use crate::network::attributes::Attribute;
use if_chain::if_chain;
use serde::Serialize;
use std::fmt;

/// An object's current vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Vector3i {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Vector3i {
    pub fn decode(bits: &mut BitReader<'_>, net_version: i32) -> Option<Vector3i> {
        let max_size = if net_version >= 7 { 22 } else { 20 };
        if_chain! {
            if let Some(size_bits) = bits.read_bits_max(4, max_size);
            let bias = 1 << (size_bits + 1);
            let bit_limit = size_bits + 2;
            if let Some(dx) = bits.read_u32_bits(bit_limit);
            if let Some(dy) = bits.read_u32_bits(bit_limit);
            if let Some(dz) = bits.read_u32_bits(bit_limit);
            then {
                Some(Vector3i {
                    x: (dx as i32) - bias,
                    y: (dy as i32) - bias,
                    z: (dz as i32) - bias,
                })
            } else {
                None
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vector3f {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3f {
    pub fn decode(bits: &mut BitReader<'_>, net_version: i32) -> Option<Vector3f> {
        Vector3i::decode(bits, net_version).map(|vec| Vector3f {
            x: (vec.x as f32) / 100.0,
            y: (vec.y as f32) / 100.0,
            z: (vec.z as f32) / 100.0,
        })
    }
}

/// An object's current rotation. Each axis is only present when its
/// preceding bit is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rotation {
    pub yaw: Option<i8>,
    pub pitch: Option<i8>,
    pub roll: Option<i8>,
}

impl Rotation {
    pub fn decode(bits: &mut BitReader<'_>) -> Option<Rotation> {
        if_chain! {
            if let Some(yaw) = bits.if_get(BitReader::read_i8);
            if let Some(pitch) = bits.if_get(BitReader::read_i8);
            if let Some(roll) = bits.if_get(BitReader::read_i8);
            then {
                Some(Rotation { yaw, pitch, roll })
            } else {
                None
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    /// Expands an 18 bit field back into [-1/sqrt(2), 1/sqrt(2)]
    fn unpack(val: u32) -> f32 {
        let max_quat = 1.0 / std::f32::consts::SQRT_2;
        let max_value = (1 << 18) - 1;
        let pos_range = (val as f32) / (max_value as f32);
        let range = (pos_range - 0.5) * 2.0;
        range * max_quat
    }

    /// The 16 bit signed mapping used before the smallest-three encoding
    fn compressed_f32(bits: &mut BitReader<'_>) -> Option<f32> {
        bits.read_u16()
            .map(|x| i32::from(x) + i32::from(i16::MIN))
            .map(|x| x as f32 * (i16::MAX as f32).recip())
    }

    /// Pre net version 7 rotations: three compressed floats and no w
    pub fn decode_compressed(bits: &mut BitReader<'_>) -> Option<Self> {
        if_chain! {
            if let Some(x) = Quaternion::compressed_f32(bits);
            if let Some(y) = Quaternion::compressed_f32(bits);
            if let Some(z) = Quaternion::compressed_f32(bits);
            then {
                Some(Quaternion { x, y, z, w: 0.0 })
            } else {
                None
            }
        }
    }

    /// Smallest-three: the largest component is dropped on the wire and
    /// recovered from the unit norm; two bits say which one it was.
    pub fn decode(bits: &mut BitReader<'_>) -> Option<Self> {
        if_chain! {
            if let Some(largest) = bits.read_u32_bits(2);
            if let Some(a) = bits.read_u32_bits(18).map(Quaternion::unpack);
            if let Some(b) = bits.read_u32_bits(18).map(Quaternion::unpack);
            if let Some(c) = bits.read_u32_bits(18).map(Quaternion::unpack);
            let extra = (1.0 - (a * a) - (b * b) - (c * c)).sqrt();
            then {
                match largest {
                    0 => Some(Quaternion { x: extra, y: a, z: b, w: c }),
                    1 => Some(Quaternion { x: a, y: extra, z: b, w: c }),
                    2 => Some(Quaternion { x: a, y: b, z: extra, w: c }),
                    3 => Some(Quaternion { x: a, y: b, z: c, w: extra }),
                    _ => unreachable!(),
                }
            } else {
                None
            }
        }
    }
}

/// Whether a new actor's segment is followed by an initial position and/or
/// an initial rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnTrajectory {
    None,
    Location,
    LocationAndRotation,
}

/// The optional location and rotation of an object when it spawns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Trajectory {
    pub location: Option<Vector3i>,
    pub rotation: Option<Rotation>,
}

impl Trajectory {
    pub fn from_spawn(
        bits: &mut BitReader<'_>,
        sp: SpawnTrajectory,
        net_version: i32,
    ) -> Option<Trajectory> {
        match sp {
            SpawnTrajectory::None => Some(Trajectory {
                location: None,
                rotation: None,
            }),

            SpawnTrajectory::Location => Vector3i::decode(bits, net_version).map(|v| Trajectory {
                location: Some(v),
                rotation: None,
            }),

            SpawnTrajectory::LocationAndRotation => if_chain! {
                if let Some(v) = Vector3i::decode(bits, net_version);
                if let Some(r) = Rotation::decode(bits);
                then {
                    Some(Trajectory {
                        location: Some(v),
                        rotation: Some(r),
                    })
                } else {
                    None
                }
            },
        }
    }
}

/// A replay's objects list doubles as a key space: object indices identify
/// actor types, attribute properties, and class cache rows.
#[derive(Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Debug, Hash, Serialize)]
pub struct ObjectId(pub i32);

impl From<ObjectId> for i32 {
    fn from(x: ObjectId) -> i32 {
        x.0
    }
}

impl From<ObjectId> for usize {
    fn from(x: ObjectId) -> usize {
        x.0 as usize
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A `StreamId` is the compressed form an attribute's object takes in the
/// network stream: where an object id might need 9 bits, the stream id of
/// the same attribute may fit in 6.
#[derive(Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Debug, Hash, Serialize)]
pub struct StreamId(pub i32);

impl From<StreamId> for i32 {
    fn from(x: StreamId) -> i32 {
        x.0
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The channel id of an actor within a match. Not unique across a replay:
/// once an actor is destroyed its id is up for reuse.
#[derive(Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Debug, Hash, Serialize)]
pub struct ActorId(pub i32);

impl From<ActorId> for i32 {
    fn from(x: ActorId) -> i32 {
        x.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Information for an actor that just spawned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NewActor {
    /// The id given to the new actor
    pub actor_id: ActorId,

    /// The name id, present on newer replays
    pub name_id: Option<i32>,

    /// The actor's object id
    pub object_id: ObjectId,

    /// The initial trajectory of the new actor
    pub initial_trajectory: Trajectory,
}

/// Notification that an actor had a property change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdatedAttribute {
    /// The actor that was updated
    pub actor_id: ActorId,

    /// The attribute stream id that was decoded
    pub stream_id: StreamId,

    /// The object id behind the stream id
    pub object_id: ObjectId,

    /// The decoded value
    pub attribute: Attribute,
}

/// The time of a frame and everything that changed during it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// The time in seconds the frame was recorded at
    pub time: f32,

    /// Time elapsed since the previous frame
    pub delta: f32,

    /// Actors that spawned this frame, in stream order
    pub new_actors: Vec<NewActor>,

    /// Actor ids deleted this frame, in stream order
    pub deleted_actors: Vec<ActorId>,

    /// Attribute changes this frame, in stream order
    pub updated_actors: Vec<UpdatedAttribute>,
}
