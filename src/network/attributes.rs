use crate::bits::BitReader;
use crate::errors::AttributeError;
use crate::network::object_index::ObjectIndex;
use crate::network::{Context, Quaternion, Rotation, Vector3f};
use crate::parsing_utils::{decode_utf16, decode_windows1252};
use encoding_rs::WINDOWS_1252;
use if_chain::if_chain;
use serde::Serialize;

/// The closed set of attribute shapes. Which tag an object decodes under is
/// settled once, while resolving the class net cache, so the frame loop
/// dispatches on a copyable enum instead of comparing names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AttributeTag {
    Boolean,
    Byte,
    AppliedDamage,
    DamageState,
    CamSettings,
    ClubColors,
    Demolish,
    Enum,
    Explosion,
    ExtendedExplosion,
    FlaggedByte,
    Flagged,
    Float,
    GameMode,
    Int,
    Int64,
    Loadout,
    TeamLoadout,
    Location,
    MusicStinger,
    Pickup,
    PickupNew,
    PlayerHistoryKey,
    QWord,
    Welded,
    RigidBody,
    Title,
    TeamPaint,
    NotImplemented,
    String,
    UniqueId,
    Reservation,
    PartyLeader,
    PrivateMatchSettings,
    LoadoutOnline,
    LoadoutsOnline,
    StatEvent,
    RotationTag,
    RepStatTitle,
}

/// The attribute values found in the network stream
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Attribute {
    Boolean(bool),
    Byte(u8),
    AppliedDamage(AppliedDamage),
    DamageState(DamageState),
    CamSettings(Box<CamSettings>),
    ClubColors(ClubColors),
    Demolish(Box<Demolish>),
    Enum(u16),
    Explosion(Explosion),
    ExtendedExplosion(ExtendedExplosion),
    FlaggedByte(bool, u8),
    Flagged(bool, u32),
    Float(f32),
    GameMode(u8, u8),
    Int(i32),

    #[serde(serialize_with = "crate::serde_utils::display_it")]
    Int64(i64),
    Loadout(Box<Loadout>),
    TeamLoadout(Box<TeamLoadout>),
    Location(Vector3f),
    MusicStinger(MusicStinger),
    PlayerHistoryKey(u16),
    Pickup(Pickup),
    PickupNew(PickupNew),

    #[serde(serialize_with = "crate::serde_utils::display_it")]
    QWord(u64),
    Welded(Welded),
    Title(bool, bool, u32, u32, u32, u32, u32, bool),
    TeamPaint(TeamPaint),
    RigidBody(RigidBody),
    String(String),
    UniqueId(Box<UniqueId>),
    Reservation(Box<Reservation>),
    PartyLeader(Option<Box<UniqueId>>),
    PrivateMatch(Box<PrivateMatchSettings>),
    LoadoutOnline(Vec<Vec<Product>>),
    LoadoutsOnline(LoadoutsOnline),
    StatEvent(StatEvent),
    Rotation(Rotation),
    RepStatTitle(RepStatTitle),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AppliedDamage {
    pub id: u8,
    pub position: Vector3f,
    pub damage_index: u32,
    pub total_damage: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DamageState {
    /// State of the dropshot tile (0 - undamaged, 1 - damaged, 2 - destroyed)
    pub tile_state: u8,

    /// True when the tile is damaged
    pub damaged: bool,

    /// Player actor that dealt the damage
    pub offender: u32,

    /// Position of the ball at the time of the damage
    pub ball_position: Vector3f,

    /// True for the casual damage state
    pub unknown1: bool,
    pub unknown2: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CamSettings {
    pub fov: f32,
    pub height: f32,
    pub angle: f32,
    pub distance: f32,
    pub stiffness: f32,
    pub swivel: f32,
    pub transition: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClubColors {
    pub blue_flag: bool,
    pub blue_color: u8,
    pub orange_flag: bool,
    pub orange_color: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Demolish {
    pub attacker_flag: bool,
    pub attacker: u32,
    pub victim_flag: bool,
    pub victim: u32,
    pub attack_velocity: Vector3f,
    pub victim_velocity: Vector3f,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Explosion {
    pub flag: bool,
    pub actor: u32,
    pub location: Vector3f,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExtendedExplosion {
    pub explosion: Explosion,
    pub unknown1: bool,
    pub secondary_actor: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Loadout {
    pub version: u8,
    pub body: u32,
    pub decal: u32,
    pub wheels: u32,
    pub rocket_trail: u32,
    pub antenna: u32,
    pub topper: u32,
    pub unknown1: u32,
    pub unknown2: Option<u32>,
    pub engine_audio: Option<u32>,
    pub trail: Option<u32>,
    pub goal_explosion: Option<u32>,
    pub banner: Option<u32>,
    pub product_id: Option<u32>,
    pub unknown3: Option<u32>,
    pub unknown4: Option<u32>,
    pub unknown5: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeamLoadout {
    pub blue: Loadout,
    pub orange: Loadout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MusicStinger {
    pub flag: bool,
    pub cue: u32,
    pub trigger: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pickup {
    pub instigator: Option<u32>,
    pub picked_up: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PickupNew {
    pub instigator: Option<u32>,
    pub picked_up: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Welded {
    pub active: bool,
    pub actor: u32,
    pub offset: Vector3f,
    pub mass: f32,
    pub rotation: Rotation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeamPaint {
    pub team: u8,
    pub primary_color: u8,
    pub accent_color: u8,
    pub primary_finish: u32,
    pub accent_finish: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RigidBody {
    pub sleeping: bool,
    pub location: Vector3f,
    pub rotation: Quaternion,
    pub linear_velocity: Option<Vector3f>,
    pub angular_velocity: Option<Vector3f>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatEvent {
    pub unknown1: bool,
    pub object_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniqueId {
    pub system_id: u8,
    pub remote_id: RemoteId,
    pub local_id: u8,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct PsyNetId {
    #[serde(serialize_with = "crate::serde_utils::display_it")]
    pub online_id: u64,
    pub unknown1: Vec<u8>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct SwitchId {
    #[serde(serialize_with = "crate::serde_utils::display_it")]
    pub online_id: u64,
    pub unknown1: Vec<u8>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Ps4Id {
    #[serde(serialize_with = "crate::serde_utils::display_it")]
    pub online_id: u64,
    pub name: String,
    pub unknown1: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RemoteId {
    SplitScreen(u32),

    #[serde(serialize_with = "crate::serde_utils::display_it")]
    Steam(u64),
    PlayStation(Ps4Id),

    #[serde(serialize_with = "crate::serde_utils::display_it")]
    Xbox(u64),

    #[serde(serialize_with = "crate::serde_utils::display_it")]
    QQ(u64),
    Switch(SwitchId),
    PsyNet(PsyNetId),
    Epic(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reservation {
    pub number: u32,
    pub unique_id: UniqueId,
    pub name: Option<String>,
    pub unknown1: bool,
    pub unknown2: bool,
    pub unknown3: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrivateMatchSettings {
    pub mutators: String,
    pub joinable_by: u32,
    pub max_players: u32,
    pub game_name: String,
    pub password: String,
    pub flag: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub unknown: bool,
    pub object_ind: u32,
    pub value: ProductValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadoutsOnline {
    pub blue: Vec<Vec<Product>>,
    pub orange: Vec<Vec<Product>>,
    pub unknown1: bool,
    pub unknown2: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ProductValue {
    NoColor,
    Absent,
    OldColor(u32),
    NewColor(u32),
    OldPaint(u32),
    NewPaint(u32),
    Title(String),
    SpecialEdition(u32),
    OldTeamEdition(u32),
    NewTeamEdition(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepStatTitle {
    pub unknown: bool,
    pub name: String,
    pub unknown2: bool,
    pub index: u32,
    pub value: u32,
}

/// Product values don't dispatch off a stream id. Each product names the
/// object of the attribute it carries, so we pin the object ids of the
/// known product attributes ahead of time and compare at decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ProductValueDecoder {
    context: Context,
    color_ind: u32,
    painted_ind: u32,
    special_edition_ind: u32,
    team_edition_ind: u32,
    title_ind: u32,
}

impl ProductValueDecoder {
    pub fn create(context: Context, object_index: &ObjectIndex<'_>) -> Self {
        let ind_of = |name: &str| {
            object_index
                .primary_by_name(name)
                .map(|id| i32::from(id) as u32)
                .unwrap_or(0)
        };

        ProductValueDecoder {
            context,
            color_ind: ind_of("TAGame.ProductAttribute_UserColor_TA"),
            painted_ind: ind_of("TAGame.ProductAttribute_Painted_TA"),
            special_edition_ind: ind_of("TAGame.ProductAttribute_SpecialEdition_TA"),
            team_edition_ind: ind_of("TAGame.ProductAttribute_TeamEdition_TA"),
            title_ind: ind_of("TAGame.ProductAttribute_TitleID_TA"),
        }
    }

    pub fn decode(&self, bits: &mut BitReader<'_>, obj_ind: u32) -> Option<ProductValue> {
        if obj_ind == self.color_ind {
            if self.context.engine_version >= 868
                && self.context.licensee_version >= 23
                && self.context.net_version >= 8
            {
                bits.read_u32().map(ProductValue::NewColor)
            } else {
                bits.if_get(|b| b.read_u32_bits(31).map(ProductValue::OldColor))
                    .map(|x| x.unwrap_or(ProductValue::NoColor))
            }
        } else if obj_ind == self.painted_ind {
            if self.context.engine_version >= 868 && self.context.licensee_version >= 18 {
                bits.read_u32_bits(31).map(ProductValue::NewPaint)
            } else {
                bits.read_bits_max(3, 14).map(ProductValue::OldPaint)
            }
        } else if obj_ind == self.title_ind {
            decode_text(bits).ok().map(ProductValue::Title)
        } else if obj_ind == self.special_edition_ind {
            bits.read_u32_bits(31).map(ProductValue::SpecialEdition)
        } else if obj_ind == self.team_edition_ind {
            if self.context.engine_version >= 868 && self.context.licensee_version >= 18 {
                bits.read_u32_bits(31).map(ProductValue::NewTeamEdition)
            } else {
                bits.read_bits_max(3, 14).map(ProductValue::OldTeamEdition)
            }
        } else {
            Some(ProductValue::Absent)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AttributeDecoder {
    context: Context,
    product_decoder: ProductValueDecoder,
}

impl AttributeDecoder {
    pub fn new(context: Context, product_decoder: ProductValueDecoder) -> Self {
        AttributeDecoder {
            context,
            product_decoder,
        }
    }

    pub fn decode(
        &self,
        tag: AttributeTag,
        bits: &mut BitReader<'_>,
    ) -> Result<Attribute, AttributeError> {
        match tag {
            AttributeTag::Boolean => self.decode_boolean(bits),
            AttributeTag::Byte => self.decode_byte(bits),
            AttributeTag::AppliedDamage => self.decode_applied_damage(bits),
            AttributeTag::DamageState => self.decode_damage_state(bits),
            AttributeTag::CamSettings => self.decode_cam_settings(bits),
            AttributeTag::ClubColors => self.decode_club_colors(bits),
            AttributeTag::Demolish => self.decode_demolish(bits),
            AttributeTag::Enum => self.decode_enum(bits),
            AttributeTag::Explosion => self.decode_explosion(bits),
            AttributeTag::ExtendedExplosion => self.decode_extended_explosion(bits),
            AttributeTag::Flagged => self.decode_flagged(bits),
            AttributeTag::FlaggedByte => self.decode_flagged_byte(bits),
            AttributeTag::Float => self.decode_float(bits),
            AttributeTag::GameMode => self.decode_game_mode(bits),
            AttributeTag::Int => self.decode_int(bits),
            AttributeTag::Int64 => self.decode_int64(bits),
            AttributeTag::Loadout => self.decode_loadout(bits),
            AttributeTag::TeamLoadout => self.decode_team_loadout(bits),
            AttributeTag::Location => self.decode_location(bits),
            AttributeTag::MusicStinger => self.decode_music_stinger(bits),
            AttributeTag::Pickup => self.decode_pickup(bits),
            AttributeTag::PickupNew => self.decode_pickup_new(bits),
            AttributeTag::PlayerHistoryKey => self.decode_player_history_key(bits),
            AttributeTag::QWord => self.decode_qword(bits),
            AttributeTag::Welded => self.decode_welded(bits),
            AttributeTag::RigidBody => self.decode_rigid_body(bits),
            AttributeTag::Title => self.decode_title(bits),
            AttributeTag::TeamPaint => self.decode_team_paint(bits),
            AttributeTag::NotImplemented => self.decode_not_implemented(bits),
            AttributeTag::String => self.decode_string(bits),
            AttributeTag::UniqueId => self.decode_unique_id(bits),
            AttributeTag::Reservation => self.decode_reservation(bits),
            AttributeTag::PartyLeader => self.decode_party_leader(bits),
            AttributeTag::PrivateMatchSettings => self.decode_private_match_settings(bits),
            AttributeTag::LoadoutOnline => self.decode_loadout_online(bits),
            AttributeTag::LoadoutsOnline => self.decode_loadouts_online(bits),
            AttributeTag::StatEvent => self.decode_stat_event(bits),
            AttributeTag::RotationTag => self.decode_rotation(bits),
            AttributeTag::RepStatTitle => self.decode_rep_stat_title(bits),
        }
    }

    pub fn decode_boolean(&self, bits: &mut BitReader<'_>) -> Result<Attribute, AttributeError> {
        bits.read_bit()
            .map(Attribute::Boolean)
            .ok_or(AttributeError::NotEnoughDataFor("Boolean"))
    }

    pub fn decode_byte(&self, bits: &mut BitReader<'_>) -> Result<Attribute, AttributeError> {
        bits.read_u8()
            .map(Attribute::Byte)
            .ok_or(AttributeError::NotEnoughDataFor("Byte"))
    }

    pub fn decode_applied_damage(
        &self,
        bits: &mut BitReader<'_>,
    ) -> Result<Attribute, AttributeError> {
        if_chain! {
            if let Some(id) = bits.read_u8();
            if let Some(position) = Vector3f::decode(bits, self.context.net_version);
            if let Some(damage_index) = bits.read_u32();
            if let Some(total_damage) = bits.read_u32();
            then {
                Ok(Attribute::AppliedDamage(AppliedDamage {
                    id,
                    position,
                    damage_index,
                    total_damage,
                }))
            } else {
                Err(AttributeError::NotEnoughDataFor("Applied Damage"))
            }
        }
    }

    pub fn decode_damage_state(
        &self,
        bits: &mut BitReader<'_>,
    ) -> Result<Attribute, AttributeError> {
        if_chain! {
            if let Some(tile_state) = bits.read_u8();
            if let Some(damaged) = bits.read_bit();
            if let Some(offender) = bits.read_u32();
            if let Some(ball_position) = Vector3f::decode(bits, self.context.net_version);
            if let Some(unknown1) = bits.read_bit();
            if let Some(unknown2) = bits.read_bit();
            then {
                Ok(Attribute::DamageState(DamageState {
                    tile_state,
                    damaged,
                    offender,
                    ball_position,
                    unknown1,
                    unknown2,
                }))
            } else {
                Err(AttributeError::NotEnoughDataFor("Damage State"))
            }
        }
    }

    pub fn decode_cam_settings(
        &self,
        bits: &mut BitReader<'_>,
    ) -> Result<Attribute, AttributeError> {
        if_chain! {
            if let Some(fov) = bits.read_f32();
            if let Some(height) = bits.read_f32();
            if let Some(angle) = bits.read_f32();
            if let Some(distance) = bits.read_f32();
            if let Some(stiffness) = bits.read_f32();
            if let Some(swivel) = bits.read_f32();
            if let Some(transition) =
                if self.context.engine_version >= 868 && self.context.licensee_version >= 20 {
                    bits.read_f32().map(Some)
                } else {
                    Some(None)
                };
            then {
                Ok(Attribute::CamSettings(Box::new(CamSettings {
                    fov,
                    height,
                    angle,
                    distance,
                    stiffness,
                    swivel,
                    transition,
                })))
            } else {
                Err(AttributeError::NotEnoughDataFor("Cam Settings"))
            }
        }
    }

    pub fn decode_club_colors(
        &self,
        bits: &mut BitReader<'_>,
    ) -> Result<Attribute, AttributeError> {
        if_chain! {
            if let Some(blue_flag) = bits.read_bit();
            if let Some(blue_color) = bits.read_u8();
            if let Some(orange_flag) = bits.read_bit();
            if let Some(orange_color) = bits.read_u8();
            then {
                Ok(Attribute::ClubColors(ClubColors {
                    blue_flag,
                    blue_color,
                    orange_flag,
                    orange_color,
                }))
            } else {
                Err(AttributeError::NotEnoughDataFor("Club Colors"))
            }
        }
    }

    pub fn decode_demolish(&self, bits: &mut BitReader<'_>) -> Result<Attribute, AttributeError> {
        if_chain! {
            if let Some(attacker_flag) = bits.read_bit();
            if let Some(attacker) = bits.read_u32();
            if let Some(victim_flag) = bits.read_bit();
            if let Some(victim) = bits.read_u32();
            if let Some(attack_velocity) = Vector3f::decode(bits, self.context.net_version);
            if let Some(victim_velocity) = Vector3f::decode(bits, self.context.net_version);
            then {
                Ok(Attribute::Demolish(Box::new(Demolish {
                    attacker_flag,
                    attacker,
                    victim_flag,
                    victim,
                    attack_velocity,
                    victim_velocity,
                })))
            } else {
                Err(AttributeError::NotEnoughDataFor("Demolish"))
            }
        }
    }

    pub fn decode_enum(&self, bits: &mut BitReader<'_>) -> Result<Attribute, AttributeError> {
        bits.read_u32_bits(11)
            .map(|x| Attribute::Enum(x as u16))
            .ok_or(AttributeError::NotEnoughDataFor("Enum"))
    }

    pub fn decode_explosion(&self, bits: &mut BitReader<'_>) -> Result<Attribute, AttributeError> {
        decode_explosion(bits, self.context.net_version)
            .map(Attribute::Explosion)
            .ok_or(AttributeError::NotEnoughDataFor("Explosion"))
    }

    pub fn decode_extended_explosion(
        &self,
        bits: &mut BitReader<'_>,
    ) -> Result<Attribute, AttributeError> {
        if_chain! {
            if let Some(explosion) = decode_explosion(bits, self.context.net_version);
            if let Some(unknown1) = bits.read_bit();
            if let Some(secondary_actor) = bits.read_u32();
            then {
                Ok(Attribute::ExtendedExplosion(ExtendedExplosion {
                    explosion,
                    unknown1,
                    secondary_actor,
                }))
            } else {
                Err(AttributeError::NotEnoughDataFor("Extended Explosion"))
            }
        }
    }

    pub fn decode_flagged(&self, bits: &mut BitReader<'_>) -> Result<Attribute, AttributeError> {
        if_chain! {
            if let Some(on) = bits.read_bit();
            if let Some(val) = bits.read_u32();
            then {
                Ok(Attribute::Flagged(on, val))
            } else {
                Err(AttributeError::NotEnoughDataFor("Flagged"))
            }
        }
    }

    pub fn decode_flagged_byte(
        &self,
        bits: &mut BitReader<'_>,
    ) -> Result<Attribute, AttributeError> {
        if_chain! {
            if let Some(flag) = bits.read_bit();
            if let Some(data) = bits.read_u8();
            then {
                Ok(Attribute::FlaggedByte(flag, data))
            } else {
                Err(AttributeError::NotEnoughDataFor("FlaggedByte"))
            }
        }
    }

    pub fn decode_float(&self, bits: &mut BitReader<'_>) -> Result<Attribute, AttributeError> {
        bits.read_f32()
            .map(Attribute::Float)
            .ok_or(AttributeError::NotEnoughDataFor("Float"))
    }

    pub fn decode_game_mode(&self, bits: &mut BitReader<'_>) -> Result<Attribute, AttributeError> {
        // both arms are eight bits today; the width changed across builds
        // before, so the branch stays until proven dead
        let width: u32 =
            if self.context.engine_version >= 868 && self.context.licensee_version >= 12 {
                8
            } else {
                8
            };

        bits.read_u32_bits(width)
            .map(|x| Attribute::GameMode(width as u8, x as u8))
            .ok_or(AttributeError::NotEnoughDataFor("Game Mode"))
    }

    pub fn decode_int(&self, bits: &mut BitReader<'_>) -> Result<Attribute, AttributeError> {
        bits.read_i32()
            .map(Attribute::Int)
            .ok_or(AttributeError::NotEnoughDataFor("Int"))
    }

    pub fn decode_int64(&self, bits: &mut BitReader<'_>) -> Result<Attribute, AttributeError> {
        bits.read_i64()
            .map(Attribute::Int64)
            .ok_or(AttributeError::NotEnoughDataFor("Int64"))
    }

    pub fn decode_loadout(&self, bits: &mut BitReader<'_>) -> Result<Attribute, AttributeError> {
        decode_loadout(bits)
            .map(|loadout| Attribute::Loadout(Box::new(loadout)))
            .ok_or(AttributeError::NotEnoughDataFor("Loadout"))
    }

    pub fn decode_team_loadout(
        &self,
        bits: &mut BitReader<'_>,
    ) -> Result<Attribute, AttributeError> {
        if_chain! {
            if let Some(blue) = decode_loadout(bits);
            if let Some(orange) = decode_loadout(bits);
            then {
                Ok(Attribute::TeamLoadout(Box::new(TeamLoadout { blue, orange })))
            } else {
                Err(AttributeError::NotEnoughDataFor("Team Loadout"))
            }
        }
    }

    pub fn decode_location(&self, bits: &mut BitReader<'_>) -> Result<Attribute, AttributeError> {
        Vector3f::decode(bits, self.context.net_version)
            .map(Attribute::Location)
            .ok_or(AttributeError::NotEnoughDataFor("Location"))
    }

    pub fn decode_music_stinger(
        &self,
        bits: &mut BitReader<'_>,
    ) -> Result<Attribute, AttributeError> {
        if_chain! {
            if let Some(flag) = bits.read_bit();
            if let Some(cue) = bits.read_u32();
            if let Some(trigger) = bits.read_u8();
            then {
                Ok(Attribute::MusicStinger(MusicStinger { flag, cue, trigger }))
            } else {
                Err(AttributeError::NotEnoughDataFor("Music Stinger"))
            }
        }
    }

    pub fn decode_pickup(&self, bits: &mut BitReader<'_>) -> Result<Attribute, AttributeError> {
        if_chain! {
            if let Some(instigator) = bits.if_get(BitReader::read_u32);
            if let Some(picked_up) = bits.read_bit();
            then {
                Ok(Attribute::Pickup(Pickup {
                    instigator,
                    picked_up,
                }))
            } else {
                Err(AttributeError::NotEnoughDataFor("Pickup"))
            }
        }
    }

    pub fn decode_pickup_new(
        &self,
        bits: &mut BitReader<'_>,
    ) -> Result<Attribute, AttributeError> {
        if_chain! {
            if let Some(instigator) = bits.if_get(BitReader::read_u32);
            if let Some(picked_up) = bits.read_u8();
            then {
                Ok(Attribute::PickupNew(PickupNew {
                    instigator,
                    picked_up,
                }))
            } else {
                Err(AttributeError::NotEnoughDataFor("PickupNew"))
            }
        }
    }

    pub fn decode_player_history_key(
        &self,
        bits: &mut BitReader<'_>,
    ) -> Result<Attribute, AttributeError> {
        bits.read_u32_bits(14)
            .map(|x| Attribute::PlayerHistoryKey(x as u16))
            .ok_or(AttributeError::NotEnoughDataFor("PlayerHistoryKey"))
    }

    pub fn decode_qword(&self, bits: &mut BitReader<'_>) -> Result<Attribute, AttributeError> {
        // newer builds rewrote this field into a string
        if self.context.is_rl_223 {
            Ok(Attribute::String(decode_text(bits)?))
        } else {
            bits.read_u64()
                .map(Attribute::QWord)
                .ok_or(AttributeError::NotEnoughDataFor("QWord"))
        }
    }

    pub fn decode_welded(&self, bits: &mut BitReader<'_>) -> Result<Attribute, AttributeError> {
        if_chain! {
            if let Some(active) = bits.read_bit();
            if let Some(actor) = bits.read_u32();
            if let Some(offset) = Vector3f::decode(bits, self.context.net_version);
            if let Some(mass) = bits.read_f32();
            if let Some(rotation) = Rotation::decode(bits);
            then {
                Ok(Attribute::Welded(Welded {
                    active,
                    actor,
                    offset,
                    mass,
                    rotation,
                }))
            } else {
                Err(AttributeError::NotEnoughDataFor("Welded"))
            }
        }
    }

    pub fn decode_rigid_body(&self, bits: &mut BitReader<'_>) -> Result<Attribute, AttributeError> {
        if_chain! {
            if let Some(sleeping) = bits.read_bit();
            if let Some(location) = Vector3f::decode(bits, self.context.net_version);

            if let Some(rotation) = if self.context.net_version >= 7 {
                Quaternion::decode(bits)
            } else {
                Quaternion::decode_compressed(bits)
            };

            // velocities only travel for awake bodies
            if let Some((linear_velocity, angular_velocity)) = if !sleeping {
                let lv = Vector3f::decode(bits, self.context.net_version);
                let av = Vector3f::decode(bits, self.context.net_version);
                match (lv, av) {
                    (Some(lv), Some(av)) => Some((Some(lv), Some(av))),
                    _ => None,
                }
            } else {
                Some((None, None))
            };

            then {
                Ok(Attribute::RigidBody(RigidBody {
                    sleeping,
                    location,
                    rotation,
                    linear_velocity,
                    angular_velocity,
                }))
            } else {
                Err(AttributeError::NotEnoughDataFor("Rigid Body"))
            }
        }
    }

    pub fn decode_title(&self, bits: &mut BitReader<'_>) -> Result<Attribute, AttributeError> {
        if_chain! {
            if let Some(unknown1) = bits.read_bit();
            if let Some(unknown2) = bits.read_bit();
            if let Some(unknown3) = bits.read_u32();
            if let Some(unknown4) = bits.read_u32();
            if let Some(unknown5) = bits.read_u32();
            if let Some(unknown6) = bits.read_u32();
            if let Some(unknown7) = bits.read_u32();
            if let Some(unknown8) = bits.read_bit();
            then {
                Ok(Attribute::Title(
                    unknown1, unknown2, unknown3, unknown4, unknown5, unknown6, unknown7, unknown8,
                ))
            } else {
                Err(AttributeError::NotEnoughDataFor("Title"))
            }
        }
    }

    pub fn decode_team_paint(&self, bits: &mut BitReader<'_>) -> Result<Attribute, AttributeError> {
        if_chain! {
            if let Some(team) = bits.read_u8();
            if let Some(primary_color) = bits.read_u8();
            if let Some(accent_color) = bits.read_u8();
            if let Some(primary_finish) = bits.read_u32();
            if let Some(accent_finish) = bits.read_u32();
            then {
                Ok(Attribute::TeamPaint(TeamPaint {
                    team,
                    primary_color,
                    accent_color,
                    primary_finish,
                    accent_finish,
                }))
            } else {
                Err(AttributeError::NotEnoughDataFor("Team Paint"))
            }
        }
    }

    pub fn decode_not_implemented(
        &self,
        _bits: &mut BitReader<'_>,
    ) -> Result<Attribute, AttributeError> {
        Err(AttributeError::Unimplemented)
    }

    pub fn decode_string(&self, bits: &mut BitReader<'_>) -> Result<Attribute, AttributeError> {
        Ok(Attribute::String(decode_text(bits)?))
    }

    pub fn decode_unique_id(&self, bits: &mut BitReader<'_>) -> Result<Attribute, AttributeError> {
        decode_unique_id(bits, self.context.net_version)
            .map(|id| Attribute::UniqueId(Box::new(id)))
    }

    pub fn decode_reservation(
        &self,
        bits: &mut BitReader<'_>,
    ) -> Result<Attribute, AttributeError> {
        if_chain! {
            if let Some(number) = bits.read_u32_bits(3);
            let unique_id = decode_unique_id(bits, self.context.net_version)?;
            if let Some(name) = if unique_id.system_id != 0 {
                Some(Some(decode_text(bits)?))
            } else {
                Some(None)
            };

            if let Some(unknown1) = bits.read_bit();
            if let Some(unknown2) = bits.read_bit();
            if let Some(unknown3) =
                if self.context.engine_version >= 868 && self.context.licensee_version >= 12 {
                    bits.read_u32_bits(6).map(|x| Some(x as u8))
                } else {
                    Some(None)
                };

            then {
                Ok(Attribute::Reservation(Box::new(Reservation {
                    number,
                    unique_id,
                    name,
                    unknown1,
                    unknown2,
                    unknown3,
                })))
            } else {
                Err(AttributeError::NotEnoughDataFor("Reservation"))
            }
        }
    }

    pub fn decode_party_leader(
        &self,
        bits: &mut BitReader<'_>,
    ) -> Result<Attribute, AttributeError> {
        let system_id = bits
            .read_u8()
            .ok_or(AttributeError::NotEnoughDataFor("Party Leader"))?;

        if system_id != 0 {
            let id = decode_unique_id_with_system_id(bits, self.context.net_version, system_id)?;
            Ok(Attribute::PartyLeader(Some(Box::new(id))))
        } else {
            Ok(Attribute::PartyLeader(None))
        }
    }

    pub fn decode_private_match_settings(
        &self,
        bits: &mut BitReader<'_>,
    ) -> Result<Attribute, AttributeError> {
        if_chain! {
            let mutators = decode_text(bits)?;
            if let Some(joinable_by) = bits.read_u32();
            if let Some(max_players) = bits.read_u32();
            let game_name = decode_text(bits)?;
            let password = decode_text(bits)?;
            if let Some(flag) = bits.read_bit();
            then {
                Ok(Attribute::PrivateMatch(Box::new(PrivateMatchSettings {
                    mutators,
                    joinable_by,
                    max_players,
                    game_name,
                    password,
                    flag,
                })))
            } else {
                Err(AttributeError::NotEnoughDataFor("Private Match"))
            }
        }
    }

    pub fn decode_loadout_online(
        &self,
        bits: &mut BitReader<'_>,
    ) -> Result<Attribute, AttributeError> {
        self.inner_decode_online_loadout(bits)
            .map(Attribute::LoadoutOnline)
            .ok_or(AttributeError::NotEnoughDataFor("Loadout Online"))
    }

    pub fn decode_loadouts_online(
        &self,
        bits: &mut BitReader<'_>,
    ) -> Result<Attribute, AttributeError> {
        if_chain! {
            if let Some(blue) = self.inner_decode_online_loadout(bits);
            if let Some(orange) = self.inner_decode_online_loadout(bits);
            if let Some(unknown1) = bits.read_bit();
            if let Some(unknown2) = bits.read_bit();
            then {
                Ok(Attribute::LoadoutsOnline(LoadoutsOnline {
                    blue,
                    orange,
                    unknown1,
                    unknown2,
                }))
            } else {
                Err(AttributeError::NotEnoughDataFor("Loadouts online"))
            }
        }
    }

    pub fn decode_stat_event(&self, bits: &mut BitReader<'_>) -> Result<Attribute, AttributeError> {
        if_chain! {
            if let Some(unknown1) = bits.read_bit();
            if let Some(object_id) = bits.read_u32();
            then {
                Ok(Attribute::StatEvent(StatEvent { unknown1, object_id }))
            } else {
                Err(AttributeError::NotEnoughDataFor("Stat Event"))
            }
        }
    }

    pub fn decode_rotation(&self, bits: &mut BitReader<'_>) -> Result<Attribute, AttributeError> {
        Rotation::decode(bits)
            .map(Attribute::Rotation)
            .ok_or(AttributeError::NotEnoughDataFor("Rotation"))
    }

    pub fn decode_rep_stat_title(
        &self,
        bits: &mut BitReader<'_>,
    ) -> Result<Attribute, AttributeError> {
        if_chain! {
            if let Some(unknown) = bits.read_bit();
            let name = decode_text(bits)?;
            if let Some(unknown2) = bits.read_bit();
            if let Some(index) = bits.read_u32();
            if let Some(value) = bits.read_u32();
            then {
                Ok(Attribute::RepStatTitle(RepStatTitle {
                    unknown,
                    name,
                    unknown2,
                    index,
                    value,
                }))
            } else {
                Err(AttributeError::NotEnoughDataFor("RepStatTitle"))
            }
        }
    }

    fn decode_product(&self, bits: &mut BitReader<'_>) -> Option<Product> {
        if_chain! {
            if let Some(unknown) = bits.read_bit();
            if let Some(obj_ind) = bits.read_u32();
            if let Some(value) = self.product_decoder.decode(bits, obj_ind);
            then {
                Some(Product {
                    unknown,
                    object_ind: obj_ind,
                    value,
                })
            } else {
                None
            }
        }
    }

    fn inner_decode_online_loadout(&self, bits: &mut BitReader<'_>) -> Option<Vec<Vec<Product>>> {
        let size = bits.read_u8()?;
        let mut res = Vec::with_capacity(usize::from(size));
        for _ in 0..size {
            let attribute_size = bits.read_u8()?;
            let mut products = Vec::with_capacity(usize::from(attribute_size));
            for _ in 0..attribute_size {
                products.push(self.decode_product(bits)?);
            }
            res.push(products);
        }
        Some(res)
    }
}

fn decode_explosion(bits: &mut BitReader<'_>, net_version: i32) -> Option<Explosion> {
    if_chain! {
        if let Some(flag) = bits.read_bit();
        if let Some(actor) = bits.read_u32();
        if let Some(location) = Vector3f::decode(bits, net_version);
        then {
            Some(Explosion {
                flag,
                actor,
                location,
            })
        } else {
            None
        }
    }
}

/// Strings in the bit stream follow the header encoding, except that zero
/// length strings are legal here.
pub(crate) fn decode_text(bits: &mut BitReader<'_>) -> Result<String, AttributeError> {
    use std::cmp::Ordering;

    let size = bits
        .read_i32()
        .ok_or(AttributeError::NotEnoughDataFor("text string"))?;

    match size.cmp(&0) {
        Ordering::Equal => Ok(String::from("")),
        Ordering::Less => size
            .checked_mul(-2)
            .ok_or(AttributeError::TooBigString(size))
            .and_then(|len| {
                bits.read_bytes(len as usize)
                    .and_then(|data| decode_utf16(&data[..]).ok())
                    .ok_or(AttributeError::TooBigString(len))
            }),
        Ordering::Greater => bits
            .read_bytes(size as usize)
            .and_then(|data| decode_windows1252(&data[..]).ok())
            .ok_or(AttributeError::TooBigString(size)),
    }
}

fn decode_loadout_specials(
    bits: &mut BitReader<'_>,
) -> Option<(Option<u32>, Option<u32>, Option<u32>)> {
    if_chain! {
        if let Some(engine_audio) = bits.read_u32();
        if let Some(trail) = bits.read_u32();
        if let Some(goal_explosion) = bits.read_u32();
        then {
            Some((Some(engine_audio), Some(trail), Some(goal_explosion)))
        } else {
            None
        }
    }
}

fn decode_loadout(bits: &mut BitReader<'_>) -> Option<Loadout> {
    if_chain! {
        if let Some(version) = bits.read_u8();
        if let Some(body) = bits.read_u32();
        if let Some(decal) = bits.read_u32();
        if let Some(wheels) = bits.read_u32();
        if let Some(rocket_trail) = bits.read_u32();
        if let Some(antenna) = bits.read_u32();
        if let Some(topper) = bits.read_u32();
        if let Some(unknown1) = bits.read_u32();
        if let Some(unknown2) = if version >= 9 {
            bits.read_u32().map(Some)
        } else {
            Some(None)
        };

        if let Some((engine_audio, trail, goal_explosion)) = if version >= 16 {
            decode_loadout_specials(bits)
        } else {
            Some((None, None, None))
        };

        if let Some(banner) = if version >= 17 {
            bits.read_u32().map(Some)
        } else {
            Some(None)
        };

        if let Some(product_id) = if version >= 19 {
            bits.read_u32().map(Some)
        } else {
            Some(None)
        };

        if let Some((unknown3, unknown4, unknown5)) = if version >= 22 {
            if_chain! {
                if let Some(a) = bits.read_u32();
                if let Some(b) = bits.read_u32();
                if let Some(c) = bits.read_u32();
                then { Some((Some(a), Some(b), Some(c))) } else { None }
            }
        } else {
            Some((None, None, None))
        };

        then {
            Some(Loadout {
                version,
                body,
                decal,
                wheels,
                rocket_trail,
                antenna,
                topper,
                unknown1,
                unknown2,
                engine_audio,
                trail,
                goal_explosion,
                banner,
                product_id,
                unknown3,
                unknown4,
                unknown5,
            })
        } else {
            None
        }
    }
}

fn decode_unique_id(
    bits: &mut BitReader<'_>,
    net_version: i32,
) -> Result<UniqueId, AttributeError> {
    let system_id = bits
        .read_u8()
        .ok_or(AttributeError::NotEnoughDataFor("System id"))?;
    decode_unique_id_with_system_id(bits, net_version, system_id)
}

fn decode_unique_id_with_system_id(
    bits: &mut BitReader<'_>,
    net_version: i32,
    system_id: u8,
) -> Result<UniqueId, AttributeError> {
    let remote_id = match system_id {
        0 => bits
            .read_u32_bits(24)
            .map(RemoteId::SplitScreen)
            .ok_or(AttributeError::NotEnoughDataFor("SplitScreen")),
        1 => bits
            .read_u64()
            .map(RemoteId::Steam)
            .ok_or(AttributeError::NotEnoughDataFor("Steam")),
        2 => {
            let name_bytes = bits
                .read_bytes(16)
                .ok_or(AttributeError::NotEnoughDataFor("PS4 Name"))?
                .into_iter()
                .take_while(|&x| x != 0)
                .collect::<Vec<u8>>();

            let (name, _) = WINDOWS_1252.decode_without_bom_handling(&name_bytes[..]);
            let to_read = if net_version >= 1 { 16 } else { 8 };

            let unknown1 = bits
                .read_bytes(to_read)
                .ok_or(AttributeError::NotEnoughDataFor("PS4 Unknown"))?;

            let online_id = bits
                .read_u64()
                .ok_or(AttributeError::NotEnoughDataFor("PS4 ID"))?;

            Ok(RemoteId::PlayStation(Ps4Id {
                name: name.to_string(),
                unknown1,
                online_id,
            }))
        }
        4 => bits
            .read_u64()
            .map(RemoteId::Xbox)
            .ok_or(AttributeError::NotEnoughDataFor("Xbox")),
        5 => bits
            .read_u64()
            .map(RemoteId::QQ)
            .ok_or(AttributeError::NotEnoughDataFor("QQ ID")),
        6 => {
            let online_id = bits
                .read_u64()
                .ok_or(AttributeError::NotEnoughDataFor("Switch ID"))?;

            let unknown1 = bits
                .read_bytes(24)
                .ok_or(AttributeError::NotEnoughDataFor("Switch ID Unknown"))?;

            Ok(RemoteId::Switch(SwitchId {
                online_id,
                unknown1,
            }))
        }
        7 => {
            let online_id = bits
                .read_u64()
                .ok_or(AttributeError::NotEnoughDataFor("PsyNet ID"))?;

            if net_version < 10 {
                let unknown1 = bits
                    .read_bytes(24)
                    .ok_or(AttributeError::NotEnoughDataFor("PsyNet ID Unknown"))?;

                Ok(RemoteId::PsyNet(PsyNetId {
                    online_id,
                    unknown1,
                }))
            } else {
                Ok(RemoteId::PsyNet(PsyNetId {
                    online_id,
                    ..Default::default()
                }))
            }
        }
        11 => decode_text(bits).map(RemoteId::Epic),
        x => Err(AttributeError::UnrecognizedRemoteId(x)),
    }?;

    let local_id = bits
        .read_u8()
        .ok_or(AttributeError::NotEnoughDataFor("UniqueId local_id"))?;

    Ok(UniqueId {
        system_id,
        remote_id,
        local_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::BitWriter;

    fn context() -> Context {
        Context {
            engine_version: 868,
            licensee_version: 20,
            net_version: 7,
            is_lan: false,
            is_rl_223: false,
            has_name_ids: true,
            max_channels: 1023,
            channel_bits: 9,
        }
    }

    fn decoder(context: Context) -> AttributeDecoder {
        let product_decoder = ProductValueDecoder {
            context,
            color_ind: 0,
            painted_ind: 0,
            special_edition_ind: 0,
            team_edition_ind: 0,
            title_ind: 0,
        };
        AttributeDecoder::new(context, product_decoder)
    }

    #[test]
    fn test_decode_text() {
        let mut writer = BitWriter::new();
        writer.push_i32(7);
        writer.push_bytes(b"anodes\0");
        let data = writer.finish();

        let mut bits = BitReader::new(&data);
        assert_eq!(decode_text(&mut bits).unwrap(), "anodes");
    }

    #[test]
    fn test_decode_text_empty() {
        let mut writer = BitWriter::new();
        writer.push_i32(0);
        let data = writer.finish();

        let mut bits = BitReader::new(&data);
        assert_eq!(decode_text(&mut bits).unwrap(), "");
    }

    #[test]
    fn test_decode_text_utf16() {
        let mut writer = BitWriter::new();
        writer.push_i32(-3);
        writer.push_bytes(&[0x23, 0x26, b'D', 0x00, 0x00, 0x00]);
        let data = writer.finish();

        let mut bits = BitReader::new(&data);
        assert_eq!(decode_text(&mut bits).unwrap(), "\u{2623}D");
    }

    #[test]
    fn test_decode_text_min_length() {
        let mut writer = BitWriter::new();
        writer.push_i32(i32::MIN);
        let data = writer.finish();

        let mut bits = BitReader::new(&data);
        assert_eq!(
            decode_text(&mut bits).unwrap_err(),
            AttributeError::TooBigString(i32::MIN)
        );
    }

    #[test]
    fn test_game_mode_width() {
        let old = Context {
            engine_version: 867,
            licensee_version: 9,
            ..context()
        };

        for ctx in [context(), old] {
            let mut writer = BitWriter::new();
            writer.push_bits(4, 8);
            let data = writer.finish();
            let mut bits = BitReader::new(&data);
            assert_eq!(
                decoder(ctx).decode_game_mode(&mut bits).unwrap(),
                Attribute::GameMode(8, 4)
            );
        }
    }

    #[test]
    fn test_qword_is_text_on_new_builds() {
        let mut writer = BitWriter::new();
        writer.push_i32(3);
        writer.push_bytes(b"ab\0");
        let data = writer.finish();
        let mut bits = BitReader::new(&data);

        let ctx = Context {
            is_rl_223: true,
            ..context()
        };
        assert_eq!(
            decoder(ctx).decode_qword(&mut bits).unwrap(),
            Attribute::String(String::from("ab"))
        );

        let mut writer = BitWriter::new();
        writer.push_u32(0x12345678);
        writer.push_u32(0x9abcdef0);
        let data = writer.finish();
        let mut bits = BitReader::new(&data);
        assert_eq!(
            decoder(context()).decode_qword(&mut bits).unwrap(),
            Attribute::QWord(0x9abcdef0_12345678)
        );
    }

    #[test]
    fn test_loadout_version_gates() {
        // version 8: the seven base fields only
        let mut writer = BitWriter::new();
        writer.push_bits(8, 8);
        for i in 0..7 {
            writer.push_u32(i);
        }
        let data = writer.finish();
        let mut bits = BitReader::new(&data);
        let loadout = decode_loadout(&mut bits).unwrap();
        assert_eq!(loadout.version, 8);
        assert_eq!(loadout.body, 0);
        assert_eq!(loadout.unknown2, None);
        assert_eq!(loadout.banner, None);

        // version 22 carries every conditional field
        let mut writer = BitWriter::new();
        writer.push_bits(22, 8);
        for i in 0..16 {
            writer.push_u32(i);
        }
        let data = writer.finish();
        let mut bits = BitReader::new(&data);
        let loadout = decode_loadout(&mut bits).unwrap();
        assert_eq!(loadout.version, 22);
        assert_eq!(loadout.unknown2, Some(7));
        assert_eq!(loadout.engine_audio, Some(8));
        assert_eq!(loadout.trail, Some(9));
        assert_eq!(loadout.goal_explosion, Some(10));
        assert_eq!(loadout.banner, Some(11));
        assert_eq!(loadout.product_id, Some(12));
        assert_eq!(loadout.unknown5, Some(15));
        assert!(bits.is_empty());
    }

    #[test]
    fn test_unique_id_steam() {
        let mut writer = BitWriter::new();
        writer.push_bits(1, 8);
        writer.push_u32(0x11223344);
        writer.push_u32(0x01100000);
        writer.push_bits(1, 8);
        let data = writer.finish();

        let mut bits = BitReader::new(&data);
        let id = decode_unique_id(&mut bits, 7).unwrap();
        assert_eq!(id.system_id, 1);
        assert_eq!(id.remote_id, RemoteId::Steam(0x01100000_11223344));
        assert_eq!(id.local_id, 1);
    }

    #[test]
    fn test_unique_id_epic() {
        let mut writer = BitWriter::new();
        writer.push_bits(11, 8);
        writer.push_i32(5);
        writer.push_bytes(b"epic\0");
        writer.push_bits(0, 8);
        let data = writer.finish();

        let mut bits = BitReader::new(&data);
        let id = decode_unique_id(&mut bits, 10).unwrap();
        assert_eq!(id.system_id, 11);
        assert_eq!(id.remote_id, RemoteId::Epic(String::from("epic")));
        assert_eq!(id.local_id, 0);
    }

    #[test]
    fn test_unique_id_unrecognized() {
        let mut writer = BitWriter::new();
        writer.push_bits(3, 8);
        let data = writer.finish();

        let mut bits = BitReader::new(&data);
        assert_eq!(
            decode_unique_id(&mut bits, 7).unwrap_err(),
            AttributeError::UnrecognizedRemoteId(3)
        );
    }

    #[test]
    fn test_psynet_id_trailing_bytes() {
        // pre net version 10 carries 24 opaque bytes after the id
        let mut writer = BitWriter::new();
        writer.push_bits(7, 8);
        writer.push_u32(42);
        writer.push_u32(0);
        writer.push_bytes(&[9u8; 24]);
        writer.push_bits(2, 8);
        let data = writer.finish();

        let mut bits = BitReader::new(&data);
        let id = decode_unique_id(&mut bits, 9).unwrap();
        assert_eq!(
            id.remote_id,
            RemoteId::PsyNet(PsyNetId {
                online_id: 42,
                unknown1: vec![9u8; 24],
            })
        );
        assert_eq!(id.local_id, 2);

        let mut writer = BitWriter::new();
        writer.push_bits(7, 8);
        writer.push_u32(42);
        writer.push_u32(0);
        writer.push_bits(2, 8);
        let data = writer.finish();

        let mut bits = BitReader::new(&data);
        let id = decode_unique_id(&mut bits, 10).unwrap();
        assert_eq!(
            id.remote_id,
            RemoteId::PsyNet(PsyNetId {
                online_id: 42,
                unknown1: Vec::new(),
            })
        );
    }

    #[test]
    fn test_party_leader_absent() {
        let mut writer = BitWriter::new();
        writer.push_bits(0, 8);
        let data = writer.finish();

        let mut bits = BitReader::new(&data);
        assert_eq!(
            decoder(context()).decode_party_leader(&mut bits).unwrap(),
            Attribute::PartyLeader(None)
        );
    }

    #[test]
    fn test_reservation_trailing_bits() {
        // engine >= 868 and licensee >= 12 adds six trailing bits
        let mut writer = BitWriter::new();
        writer.push_bits(2, 3);
        writer.push_bits(0, 8); // split screen system id
        writer.push_bits(77, 24);
        writer.push_bits(0, 8); // local id
        writer.push_bit(true);
        writer.push_bit(false);
        writer.push_bits(0b10_1010, 6);
        let data = writer.finish();

        let mut bits = BitReader::new(&data);
        let attr = decoder(context()).decode_reservation(&mut bits).unwrap();
        let Attribute::Reservation(res) = attr else {
            panic!("expected a reservation");
        };
        assert_eq!(res.number, 2);
        assert_eq!(res.unique_id.remote_id, RemoteId::SplitScreen(77));
        assert_eq!(res.name, None);
        assert!(res.unknown1);
        assert!(!res.unknown2);
        assert_eq!(res.unknown3, Some(0b10_1010));
    }

    #[test]
    fn test_cam_settings_transition_gate() {
        let mut writer = BitWriter::new();
        for i in 1..=7 {
            writer.push_f32(i as f32);
        }
        let data = writer.finish();

        let mut bits = BitReader::new(&data);
        let attr = decoder(context()).decode_cam_settings(&mut bits).unwrap();
        let Attribute::CamSettings(cam) = attr else {
            panic!("expected cam settings");
        };
        assert_eq!(cam.fov, 1.0);
        assert_eq!(cam.swivel, 6.0);
        assert_eq!(cam.transition, Some(7.0));

        let old = Context {
            licensee_version: 19,
            ..context()
        };
        let mut bits = BitReader::new(&data);
        let attr = decoder(old).decode_cam_settings(&mut bits).unwrap();
        let Attribute::CamSettings(cam) = attr else {
            panic!("expected cam settings");
        };
        assert_eq!(cam.transition, None);
    }

    #[test]
    fn test_rigid_body_sleeping_skips_velocities() {
        let mut writer = BitWriter::new();
        writer.push_bit(true); // sleeping
        writer.push_bits_max(2, 4, 22);
        // size 2: bias 8, axes are 4 bits
        writer.push_bits(8 + 1, 4);
        writer.push_bits(8 - 3, 4);
        writer.push_bits(8, 4);
        // smallest-three quaternion with mid-range fields
        writer.push_bits(3, 2);
        writer.push_bits(131_071, 18);
        writer.push_bits(131_071, 18);
        writer.push_bits(131_071, 18);
        let data = writer.finish();

        let mut bits = BitReader::new(&data);
        let attr = decoder(context()).decode_rigid_body(&mut bits).unwrap();
        let Attribute::RigidBody(rb) = attr else {
            panic!("expected a rigid body");
        };
        assert!(rb.sleeping);
        assert_eq!(rb.location.x, 0.01);
        assert_eq!(rb.location.y, -0.03);
        assert_eq!(rb.location.z, 0.0);
        assert_eq!(rb.linear_velocity, None);
        assert_eq!(rb.angular_velocity, None);
    }
}
