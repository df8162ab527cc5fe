pub use self::models::*;

pub mod attributes;
mod cache;
mod frame_decoder;
mod models;
mod object_index;

use crate::bits::bit_width;
use crate::data::SPAWN_TRAJECTORIES;
use crate::errors::NetworkError;
use crate::header::Header;
use crate::models::NetworkFrames;
use crate::network::attributes::ProductValueDecoder;
use crate::network::cache::DispatchTable;
use crate::network::frame_decoder::FrameDecoder;
use crate::network::object_index::ObjectIndex;
use crate::parser::ReplayBody;

/// Everything the frame loop needs to know about the replay's vintage,
/// derived once from the header and read by every decoder. Bit layouts in
/// the network stream hinge on three version axes (engine, licensee, net)
/// plus a couple of flags that only the header properties reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Context {
    pub engine_version: i32,
    pub licensee_version: i32,
    pub net_version: i32,
    pub is_lan: bool,

    /// True from the 2022-11-20 build onwards, which rewired a few fields
    pub is_rl_223: bool,

    /// Whether new actor segments open with a name id
    pub has_name_ids: bool,

    /// Highest actor channel id the stream can carry
    pub max_channels: u32,

    /// Wire width of an actor id before its continuation bit
    pub channel_bits: u32,
}

impl Context {
    pub(crate) fn from_header(header: &Header) -> Context {
        let engine_version = header.major_version;
        let licensee_version = header.minor_version;
        let net_version = header.net_version.unwrap_or(0);
        let is_lan = header.match_type() == Some("Lan");
        let is_rl_223 = header
            .build_version()
            .map_or(false, |v| build_at_least(v, (221_120, 42_953, 406_184)));

        // lan replays of the same vintage never carry name ids
        let has_name_ids = (engine_version >= 868 && licensee_version >= 20)
            || (engine_version >= 868 && licensee_version >= 14 && !is_lan);

        let max_channels = header.max_channels().unwrap_or(1023) as u32;
        let channel_bits = bit_width(u64::from(max_channels)).saturating_sub(1);

        Context {
            engine_version,
            licensee_version,
            net_version,
            is_lan,
            is_rl_223,
            has_name_ids,
            max_channels,
            channel_bits,
        }
    }
}

/// Compares a `BuildVersion` string against a pivot, each dot separated
/// component as an integer. A lexical comparison would get
/// `221119.50000.0` wrong.
fn build_at_least(build: &str, pivot: (u64, u64, u64)) -> bool {
    let mut parts = build.split('.').map(|part| part.parse::<u64>().ok());
    match (parts.next().flatten(), parts.next().flatten(), parts.next().flatten()) {
        (Some(a), Some(b), Some(c)) => (a, b, c) >= pivot,
        _ => false,
    }
}

pub(crate) fn parse(header: &Header, body: &ReplayBody<'_>) -> Result<NetworkFrames, NetworkError> {
    let context = Context::from_header(header);
    let object_index = ObjectIndex::new(&body.objects);
    let cache = DispatchTable::resolve(&body.objects, &body.class_indices, &body.net_cache);
    let product_decoder = ProductValueDecoder::create(context, &object_index);

    let spawns: Vec<SpawnTrajectory> = body
        .objects
        .iter()
        .map(|name| {
            SPAWN_TRAJECTORIES
                .get(name.as_str())
                .copied()
                .unwrap_or(SpawnTrajectory::None)
        })
        .collect();

    let Some(frames_len) = header.num_frames() else {
        return Ok(NetworkFrames { frames: Vec::new() });
    };

    // each frame costs two floats minimum, so the frame count can never
    // reach the byte length of the stream
    if frames_len as usize > body.network_data.len() {
        return Err(NetworkError::TooManyFrames(frames_len));
    }

    let decoder = FrameDecoder {
        frames_len: frames_len as usize,
        context,
        product_decoder,
        spawns,
        objects: &body.objects,
        object_index,
        cache,
        network_data: body.network_data,
    };

    Ok(NetworkFrames {
        frames: decoder.decode_frames()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HeaderProp;

    fn header_with(
        major: i32,
        minor: i32,
        net: Option<i32>,
        properties: Vec<(String, HeaderProp)>,
    ) -> Header {
        Header {
            major_version: major,
            minor_version: minor,
            net_version: net,
            game_type: String::from("TAGame.Replay_Soccar_TA"),
            properties,
        }
    }

    #[test]
    fn build_version_numeric_compare() {
        let pivot = (221_120, 42_953, 406_184);
        assert!(build_at_least("221120.42953.406184", pivot));
        assert!(build_at_least("221121.0.0", pivot));
        assert!(!build_at_least("221119.50000.0", pivot));
        assert!(!build_at_least("221120.42953.406183", pivot));
        assert!(!build_at_least("garbage", pivot));
    }

    #[test]
    fn context_channel_width() {
        let header = header_with(868, 20, Some(7), Vec::new());
        let context = Context::from_header(&header);
        assert_eq!(context.max_channels, 1023);
        assert_eq!(context.channel_bits, 9);

        let header = header_with(
            868,
            20,
            Some(7),
            vec![(String::from("MaxChannels"), HeaderProp::Int(2047))],
        );
        let context = Context::from_header(&header);
        assert_eq!(context.max_channels, 2047);
        assert_eq!(context.channel_bits, 10);
    }

    #[test]
    fn context_name_id_flag() {
        // new enough licensee version: always
        let header = header_with(868, 20, Some(7), Vec::new());
        assert!(Context::from_header(&header).has_name_ids);

        // middle band only outside of lan
        let header = header_with(868, 14, Some(0), Vec::new());
        assert!(Context::from_header(&header).has_name_ids);

        let lan = vec![(
            String::from("MatchType"),
            HeaderProp::Name(String::from("Lan")),
        )];
        let header = header_with(868, 14, Some(0), lan.clone());
        assert!(!Context::from_header(&header).has_name_ids);

        // lan does not disable the newer band
        let header = header_with(868, 20, Some(7), lan);
        assert!(Context::from_header(&header).has_name_ids);

        let header = header_with(867, 30, None, Vec::new());
        assert!(!Context::from_header(&header).has_name_ids);
    }

    #[test]
    fn context_rl_223_flag() {
        let props = |v: &str| {
            vec![(
                String::from("BuildVersion"),
                HeaderProp::Str(String::from(v)),
            )]
        };

        let header = header_with(868, 32, Some(10), props("221120.42953.406184"));
        assert!(Context::from_header(&header).is_rl_223);

        let header = header_with(868, 32, Some(10), props("220914.37821.394739"));
        assert!(!Context::from_header(&header).is_rl_223);

        let header = header_with(868, 32, Some(10), Vec::new());
        assert!(!Context::from_header(&header).is_rl_223);
    }
}
