#![recursion_limit = "512"]
//! # Camber
//!
//! Camber decodes Rocket League replay files, including the network
//! stream: the bit packed transcript of actor replication that makes up
//! ~95% of a replay and holds every position, rotation, boost pickup, and
//! demolition of the match.
//!
//! ```no_run
//! let data = std::fs::read("match.replay")?;
//! let replay = camber::ParserBuilder::new(&data)
//!     .on_error_check_crc()
//!     .must_parse_network_data()
//!     .parse()?;
//!
//! for frame in &replay.network_frames.as_ref().unwrap().frames {
//!     for actor in &frame.new_actors {
//!         println!("{} spawned as {}", actor.actor_id, replay.objects[usize::from(actor.object_id)]);
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Decoding the network stream is strict: a single miscounted bit
//! desynchronizes everything that follows, so the decoder either produces
//! every frame or an error naming the frame and bit offset where the
//! stream stopped making sense. Callers that only want the header can
//! skip the network stream entirely with
//! [`ParserBuilder::never_parse_network_data`].

mod bits;
mod core_parser;
mod crc;
mod data;
mod errors;
mod header;
mod models;
mod network;
mod parser;
mod parsing_utils;
mod serde_utils;

pub use crate::bits::BitReader;
pub use crate::crc::calc_crc;
pub use crate::errors::{AttributeError, NetworkError, ParseError};
pub use crate::models::*;
pub use crate::network::attributes::{
    AppliedDamage, Attribute, CamSettings, ClubColors, DamageState, Demolish, Explosion,
    ExtendedExplosion, Loadout, LoadoutsOnline, MusicStinger, Pickup, PickupNew,
    PrivateMatchSettings, Product, ProductValue, Ps4Id, PsyNetId, RemoteId, RepStatTitle,
    Reservation, RigidBody, StatEvent, SwitchId, TeamLoadout, TeamPaint, UniqueId, Welded,
};
pub use crate::network::{
    ActorId, Frame, NewActor, ObjectId, Quaternion, Rotation, StreamId, Trajectory,
    UpdatedAttribute, Vector3f, Vector3i,
};
pub use crate::parser::{CrcCheck, NetworkParse, ParserBuilder};
