use crate::bits::BitReader;
use crate::errors::{AttributeError, NetworkError};
use crate::network::attributes::{AttributeDecoder, ProductValueDecoder};
use crate::network::cache::DispatchTable;
use crate::network::models::{
    ActorId, Frame, NewActor, ObjectId, SpawnTrajectory, StreamId, Trajectory, UpdatedAttribute,
};
use crate::network::object_index::ObjectIndex;
use crate::network::Context;
use fnv::FnvHashMap;

/// Drives the network stream bit by bit: every frame opens with two floats
/// and then loops actor segments (new / update / delete) until the gate bit
/// goes low. Any miscount here desynchronizes everything after it, so all
/// reads are checked and failures carry the frame index and bit offset.
pub(crate) struct FrameDecoder<'a> {
    pub frames_len: usize,
    pub context: Context,
    pub product_decoder: ProductValueDecoder,
    pub spawns: Vec<SpawnTrajectory>,
    pub objects: &'a [String],
    pub object_index: ObjectIndex<'a>,
    pub cache: DispatchTable,
    pub network_data: &'a [u8],
}

impl<'a> FrameDecoder<'a> {
    fn object_name(&self, object_id: ObjectId) -> String {
        self.objects
            .get(usize::from(object_id))
            .cloned()
            .unwrap_or_else(|| String::from("Out of bounds"))
    }

    fn decode_new_actor(
        &self,
        bits: &mut BitReader<'_>,
        actor_id: ActorId,
    ) -> Result<NewActor, NetworkError> {
        let name_id = if self.context.has_name_ids {
            let id = bits
                .read_i32()
                .ok_or(NetworkError::NotEnoughDataFor("Name Id"))?;
            Some(id)
        } else {
            None
        };

        // one flag with no known meaning, off in every replay seen
        let _unknown = bits
            .read_bit()
            .ok_or(NetworkError::NotEnoughDataFor("New actor flag"))?;

        let object_id = bits
            .read_i32()
            .map(ObjectId)
            .ok_or(NetworkError::NotEnoughDataFor("Object Id"))?;

        let spawn = self
            .spawns
            .get(usize::from(object_id))
            .ok_or(NetworkError::ObjectIdOutOfRange(object_id))?;

        let initial_trajectory = Trajectory::from_spawn(bits, *spawn, self.context.net_version)
            .ok_or(NetworkError::NotEnoughDataFor("Initial trajectory"))?;

        Ok(NewActor {
            actor_id,
            name_id,
            object_id,
            initial_trajectory,
        })
    }

    fn decode_frame(
        &mut self,
        attr_decoder: &AttributeDecoder,
        bits: &mut BitReader<'_>,
        actors: &mut FnvHashMap<ActorId, ObjectId>,
    ) -> Result<Frame, NetworkError> {
        let time = bits
            .read_f32()
            .ok_or(NetworkError::NotEnoughDataFor("Time"))?;

        let delta = bits
            .read_f32()
            .ok_or(NetworkError::NotEnoughDataFor("Delta"))?;

        let mut new_actors = Vec::new();
        let mut updated_actors = Vec::new();
        let mut deleted_actors = Vec::new();

        while bits
            .read_bit()
            .ok_or(NetworkError::NotEnoughDataFor("Actor data"))?
        {
            let actor_id = bits
                .read_bits_max(self.context.channel_bits, self.context.max_channels)
                .map(|x| ActorId(x as i32))
                .ok_or(NetworkError::NotEnoughDataFor("Actor Id"))?;

            let alive = bits
                .read_bit()
                .ok_or(NetworkError::NotEnoughDataFor("Is actor alive"))?;

            if !alive {
                actors.remove(&actor_id);
                deleted_actors.push(actor_id);
                continue;
            }

            let is_new = bits
                .read_bit()
                .ok_or(NetworkError::NotEnoughDataFor("Is new actor"))?;

            if is_new {
                let actor = self.decode_new_actor(bits, actor_id)?;

                // actor ids are recycled, so an insert may overwrite
                actors.insert(actor.actor_id, actor.object_id);
                new_actors.push(actor);
            } else {
                // updates don't restate the object, so the actor must have
                // spawned earlier in the replay
                let object_id = *actors
                    .get(&actor_id)
                    .ok_or(NetworkError::MissingActor(actor_id))?;

                let cache_ix = self
                    .cache
                    .dispatch_index(object_id, self.objects, &self.object_index)?
                    .ok_or_else(|| {
                        NetworkError::MissingCache(actor_id, object_id, self.object_name(object_id))
                    })?;
                let cache_info = self.cache.entry(cache_ix);

                while bits
                    .read_bit()
                    .ok_or(NetworkError::NotEnoughDataFor("Is prop present"))?
                {
                    let stream_id = bits
                        .read_bits_max(cache_info.stream_id_bits, cache_info.max_stream_id)
                        .ok_or(NetworkError::NotEnoughDataFor("Prop id"))?;

                    let attr = cache_info.attribute(stream_id).ok_or_else(|| {
                        NetworkError::MissingAttribute(
                            actor_id,
                            object_id,
                            self.object_name(object_id),
                            StreamId(stream_id as i32),
                        )
                    })?;

                    let attribute = attr_decoder.decode(attr.tag, bits).map_err(|e| match e {
                        AttributeError::Unimplemented => NetworkError::UnimplementedAttribute(
                            actor_id,
                            object_id,
                            self.object_name(object_id),
                            StreamId(stream_id as i32),
                            self.object_name(attr.object_id),
                        ),
                        e => NetworkError::AttributeError(e),
                    })?;

                    updated_actors.push(UpdatedAttribute {
                        actor_id,
                        stream_id: StreamId(stream_id as i32),
                        object_id: attr.object_id,
                        attribute,
                    });
                }
            }
        }

        Ok(Frame {
            time,
            delta,
            new_actors,
            deleted_actors,
            updated_actors,
        })
    }

    pub fn decode_frames(mut self) -> Result<Vec<Frame>, NetworkError> {
        let attr_decoder = AttributeDecoder::new(self.context, self.product_decoder);
        let mut frames: Vec<Frame> = Vec::with_capacity(self.frames_len);
        let mut actors = FnvHashMap::default();
        let mut bits = BitReader::new(self.network_data);

        while frames.len() < self.frames_len {
            let frame = self
                .decode_frame(&attr_decoder, &mut bits, &mut actors)
                .map_err(|e| {
                    NetworkError::FrameError(frames.len(), bits.bit_offset(), Box::new(e))
                })?;
            frames.push(frame);
        }

        // only byte alignment padding may remain after the last frame
        if bits.bits_remaining() >= 8 {
            return Err(NetworkError::TrailingBits(bits.bits_remaining()));
        }

        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::BitWriter;
    use crate::header::Header;
    use crate::models::{CacheProp, ClassIndex, ClassNetCache, HeaderProp};
    use crate::network::attributes::Attribute;
    use crate::network::models::{Rotation, Vector3i};
    use crate::parser::ReplayBody;

    fn test_objects() -> Vec<String> {
        vec![
            String::from("Core.Object"),
            String::from("TAGame.Vehicle_TA:bDriving"),
            String::from("TAGame.Car_TA"),
            String::from("Archetypes.Car.Car_Default"),
        ]
    }

    fn test_header(num_frames: i32) -> Header {
        Header {
            major_version: 868,
            minor_version: 12,
            net_version: None,
            game_type: String::from("TAGame.Replay_Soccar_TA"),
            properties: vec![
                (String::from("NumFrames"), HeaderProp::Int(num_frames)),
                (String::from("MaxChannels"), HeaderProp::Int(1023)),
            ],
        }
    }

    fn test_body(objects: Vec<String>, network_data: &[u8]) -> ReplayBody<'_> {
        ReplayBody {
            levels: Vec::new(),
            keyframes: Vec::new(),
            debug_info: Vec::new(),
            tick_marks: Vec::new(),
            packages: Vec::new(),
            objects,
            names: Vec::new(),
            class_indices: vec![ClassIndex {
                class: String::from("TAGame.Car_TA"),
                index: 2,
            }],
            net_cache: vec![ClassNetCache {
                object_ind: 2,
                parent_id: 0,
                cache_id: 1,
                properties: vec![CacheProp {
                    object_ind: 1,
                    stream_id: 5,
                }],
            }],
            network_data,
        }
    }

    fn push_actor_id(writer: &mut BitWriter, id: u32) {
        writer.push_bits_max(id, 9, 1023);
    }

    /// frame 1 spawns a car, frame 2 flips its driving bit then deletes it
    fn spawn_update_delete_stream() -> Vec<u8> {
        let mut writer = BitWriter::new();

        writer.push_f32(1.0);
        writer.push_f32(0.033);
        writer.push_bit(true); // actor data follows
        push_actor_id(&mut writer, 0);
        writer.push_bit(true); // alive
        writer.push_bit(true); // new
        writer.push_bit(false); // unknown flag
        writer.push_i32(3); // Archetypes.Car.Car_Default
        writer.push_bits_max(2, 4, 20); // vector size 2: bias 8, 4 bit axes
        writer.push_bits(8 + 1, 4);
        writer.push_bits(8 - 3, 4);
        writer.push_bits(8, 4);
        writer.push_bit(false); // yaw
        writer.push_bit(false); // pitch
        writer.push_bit(false); // roll
        writer.push_bit(false); // end of frame

        writer.push_f32(1.033);
        writer.push_f32(0.033);
        writer.push_bit(true);
        push_actor_id(&mut writer, 0);
        writer.push_bit(true); // alive
        writer.push_bit(false); // update
        writer.push_bit(true); // a property follows
        writer.push_bits_max(5, 2, 6); // stream id of bDriving
        writer.push_bit(true); // the boolean payload
        writer.push_bit(false); // no more properties
        writer.push_bit(true);
        push_actor_id(&mut writer, 0);
        writer.push_bit(false); // dead
        writer.push_bit(false); // end of frame

        writer.finish()
    }

    #[test]
    fn decode_spawn_update_delete() {
        let data = spawn_update_delete_stream();
        let header = test_header(2);
        let body = test_body(test_objects(), &data);
        let frames = crate::network::parse(&header, &body).unwrap().frames;

        assert_eq!(frames.len(), 2);

        let spawn = &frames[0];
        assert_eq!(spawn.time, 1.0);
        assert_eq!(spawn.delta, 0.033);
        assert_eq!(spawn.new_actors.len(), 1);
        let actor = spawn.new_actors[0];
        assert_eq!(actor.actor_id, ActorId(0));
        assert_eq!(actor.name_id, None);
        assert_eq!(actor.object_id, ObjectId(3));
        assert_eq!(
            actor.initial_trajectory.location,
            Some(Vector3i { x: 1, y: -3, z: 0 })
        );
        assert_eq!(
            actor.initial_trajectory.rotation,
            Some(Rotation {
                yaw: None,
                pitch: None,
                roll: None,
            })
        );

        let update = &frames[1];
        assert_eq!(update.updated_actors.len(), 1);
        let attr = &update.updated_actors[0];
        assert_eq!(attr.actor_id, ActorId(0));
        assert_eq!(attr.stream_id, StreamId(5));
        assert_eq!(attr.object_id, ObjectId(1));
        assert_eq!(attr.attribute, Attribute::Boolean(true));
        assert_eq!(update.deleted_actors, vec![ActorId(0)]);
    }

    #[test]
    fn update_before_spawn_is_an_error() {
        let mut writer = BitWriter::new();
        writer.push_f32(1.0);
        writer.push_f32(0.033);
        writer.push_bit(true);
        push_actor_id(&mut writer, 4);
        writer.push_bit(true); // alive
        writer.push_bit(false); // update without a prior spawn
        let data = writer.finish();

        let header = test_header(1);
        let body = test_body(test_objects(), &data);
        let err = crate::network::parse(&header, &body).unwrap_err();
        let NetworkError::FrameError(frame, _, inner) = err else {
            panic!("expected frame context");
        };
        assert_eq!(frame, 0);
        assert_eq!(*inner, NetworkError::MissingActor(ActorId(4)));
    }

    #[test]
    fn deleted_actor_id_is_reusable() {
        let mut writer = BitWriter::new();

        // spawn, delete, and respawn channel 0 in one frame
        writer.push_f32(1.0);
        writer.push_f32(0.033);
        for _ in 0..2 {
            writer.push_bit(true);
            push_actor_id(&mut writer, 0);
            writer.push_bit(true);
            writer.push_bit(true);
            writer.push_bit(false);
            writer.push_i32(3);
            writer.push_bits_max(2, 4, 20);
            writer.push_bits(8, 4);
            writer.push_bits(8, 4);
            writer.push_bits(8, 4);
            writer.push_bit(false);
            writer.push_bit(false);
            writer.push_bit(false);

            writer.push_bit(true);
            push_actor_id(&mut writer, 0);
            writer.push_bit(false); // dead
        }
        writer.push_bit(false);
        let data = writer.finish();

        let header = test_header(1);
        let body = test_body(test_objects(), &data);
        let frames = crate::network::parse(&header, &body).unwrap().frames;
        assert_eq!(frames[0].new_actors.len(), 2);
        assert_eq!(frames[0].deleted_actors.len(), 2);
    }

    #[test]
    fn spawn_with_out_of_range_object() {
        let mut writer = BitWriter::new();
        writer.push_f32(1.0);
        writer.push_f32(0.033);
        writer.push_bit(true);
        push_actor_id(&mut writer, 0);
        writer.push_bit(true);
        writer.push_bit(true);
        writer.push_bit(false);
        writer.push_i32(99);
        let data = writer.finish();

        let header = test_header(1);
        let body = test_body(test_objects(), &data);
        let err = crate::network::parse(&header, &body).unwrap_err();
        let NetworkError::FrameError(_, _, inner) = err else {
            panic!("expected frame context");
        };
        assert_eq!(*inner, NetworkError::ObjectIdOutOfRange(ObjectId(99)));
    }

    #[test]
    fn trailing_bits_past_padding() {
        let mut writer = BitWriter::new();
        writer.push_f32(1.0);
        writer.push_f32(0.033);
        writer.push_bit(false); // empty frame
        writer.push_bytes(&[0xff, 0xff]); // junk the decoder never asked for
        let data = writer.finish();

        let header = test_header(1);
        let body = test_body(test_objects(), &data);
        let err = crate::network::parse(&header, &body).unwrap_err();
        assert!(matches!(err, NetworkError::TrailingBits(_)));
    }

    #[test]
    fn stream_exhaustion_reports_offset() {
        let mut writer = BitWriter::new();
        writer.push_f32(1.0);
        let data = writer.finish();

        let header = test_header(1);
        let body = test_body(test_objects(), &data);
        let err = crate::network::parse(&header, &body).unwrap_err();
        let NetworkError::FrameError(frame, offset, inner) = err else {
            panic!("expected frame context");
        };
        assert_eq!(frame, 0);
        assert_eq!(offset, 32);
        assert_eq!(*inner, NetworkError::NotEnoughDataFor("Delta"));
    }

    #[test]
    fn too_many_frames_is_rejected_up_front() {
        let data = [0u8; 4];
        let header = test_header(700_000);
        let body = test_body(test_objects(), &data);
        let err = crate::network::parse(&header, &body).unwrap_err();
        assert_eq!(err, NetworkError::TooManyFrames(700_000));
    }

    #[test]
    fn no_frame_count_no_frames() {
        let header = Header {
            major_version: 868,
            minor_version: 12,
            net_version: None,
            game_type: String::from("TAGame.Replay_Soccar_TA"),
            properties: Vec::new(),
        };
        let body = test_body(test_objects(), &[]);
        let frames = crate::network::parse(&header, &body).unwrap().frames;
        assert!(frames.is_empty());
    }
}
