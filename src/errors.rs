use crate::network::{ActorId, ObjectId, StreamId};
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str;

/// Errors that occur in the byte oriented sections of a replay: the header,
/// the body framing, and the footer lists.
#[derive(PartialEq, Debug, Clone)]
pub enum ParseError {
    /// A section failed to decode. Contains the section name, the byte
    /// offset at failure, and the underlying error.
    ParseError(&'static str, i32, Box<ParseError>),
    ZeroSize,
    Utf8Error(str::Utf8Error),
    TextTooLarge(i32),
    InsufficientData(i32, i32),
    UnexpectedProperty(String),
    CrcMismatch(u32, u32),
    CorruptReplay(String, Box<ParseError>),
    ListTooLarge(usize),
    NetworkError(Box<NetworkError>),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::ZeroSize => write!(f, "A size of zero is not valid"),
            ParseError::Utf8Error(utf8_error) => {
                write!(f, "Unable decode data as utf8: {}", utf8_error)
            }
            ParseError::TextTooLarge(size) => write!(f, "Text of size {} is too large", size),
            ParseError::InsufficientData(expected, left) => write!(
                f,
                "Insufficient data. Expected {} bytes, but only {} left",
                expected, left
            ),
            ParseError::UnexpectedProperty(property) => {
                write!(f, "Did not expect a property of: {}", property)
            }
            ParseError::CrcMismatch(expected, found) => write!(
                f,
                "Crc mismatch. Expected {} but received {}",
                expected, found
            ),
            ParseError::CorruptReplay(section, _) => write!(
                f,
                "Failed to parse {} and crc check failed. Replay is corrupt",
                section
            ),
            ParseError::ListTooLarge(size) => write!(f, "list of size {} is too large", size),
            ParseError::ParseError(section, bytes_read, parse_error) => write!(
                f,
                "Could not decode replay {} at offset ({}): {}",
                section, bytes_read, parse_error
            ),
            ParseError::NetworkError(network_error) => write!(f, "{}", network_error),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseError::Utf8Error(utf8_error) => Some(utf8_error),
            ParseError::CorruptReplay(_, error) => Some(error),
            ParseError::ParseError(_, _, error) => Some(error),
            ParseError::NetworkError(error) => Some(error),
            _ => None,
        }
    }
}

impl From<str::Utf8Error> for ParseError {
    fn from(error: str::Utf8Error) -> Self {
        ParseError::Utf8Error(error)
    }
}

/// Errors from decoding a single attribute out of the bit stream
#[derive(PartialEq, Debug, Clone)]
pub enum AttributeError {
    NotEnoughDataFor(&'static str),
    UnrecognizedRemoteId(u8),
    Unimplemented,
    TooBigString(i32),
}

impl Error for AttributeError {}

impl Display for AttributeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AttributeError::NotEnoughDataFor(message) => {
                write!(f, "Not enough data to decode attribute {}", message)
            }
            AttributeError::UnrecognizedRemoteId(id) => {
                write!(f, "Unrecognized remote id of {}", id)
            }
            AttributeError::Unimplemented => write!(f, "Does not have an attribute implementation"),
            AttributeError::TooBigString(size) => write!(f, "Unexpected size for string: {}", size),
        }
    }
}

/// Errors from decoding the network stream. Any miscount desynchronizes the
/// remainder of the stream, so every variant is fatal to the parse.
#[derive(PartialEq, Debug, Clone)]
pub enum NetworkError {
    NotEnoughDataFor(&'static str),
    TooManyFrames(i32),
    ObjectIdOutOfRange(ObjectId),
    MissingActor(ActorId),
    MissingCache(ActorId, ObjectId, String),
    MissingAttribute(ActorId, ObjectId, String, StreamId),
    UnimplementedAttribute(ActorId, ObjectId, String, StreamId, String),
    UnresolvedParent(ObjectId, String),
    TrailingBits(usize),
    AttributeError(AttributeError),

    /// Wraps any of the above with the frame index being decoded and the
    /// bit offset into the network stream at the point of failure.
    FrameError(usize, usize, Box<NetworkError>),
}

impl Error for NetworkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            NetworkError::AttributeError(attribute_error) => Some(attribute_error),
            NetworkError::FrameError(_, _, error) => Some(error),
            _ => None,
        }
    }
}

impl Display for NetworkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::NotEnoughDataFor(message) => {
                write!(f, "Not enough data to decode {}", message)
            }
            NetworkError::TooManyFrames(size) => write!(f, "Too many frames to decode: {}", size),
            NetworkError::ObjectIdOutOfRange(id) => write!(f, "Object Id of {} exceeds range", id),
            NetworkError::MissingActor(actor_id) => {
                write!(f, "Actor id: {} was not found", actor_id)
            }
            NetworkError::MissingCache(actor_id, object_id, object) => write!(
                f,
                "Actor id: {} of object id: {} ({}) but no attributes found",
                actor_id, object_id, object
            ),
            NetworkError::MissingAttribute(actor_id, object_id, object, stream_id) => write!(
                f,
                "Actor id: {} of object id: {} ({}) but stream id: {} not found",
                actor_id, object_id, object, stream_id
            ),
            NetworkError::UnimplementedAttribute(actor_id, object_id, object, stream_id, attr) => {
                write!(
                    f,
                    "Actor id: {} of object id: {} ({}) but stream id: {} ({}) was not implemented",
                    actor_id, object_id, object, stream_id, attr
                )
            }
            NetworkError::UnresolvedParent(object_id, object) => write!(
                f,
                "Could not resolve a parent object for object id: {} ({})",
                object_id, object
            ),
            NetworkError::TrailingBits(bits) => write!(
                f,
                "All frames decoded but {} bits remain past the padding",
                bits
            ),
            NetworkError::AttributeError(attribute_error) => {
                write!(f, "Attribute error: {}", attribute_error)
            }
            NetworkError::FrameError(frame, bit, error) => write!(
                f,
                "Error decoding frame {} at bit offset ({}): {}",
                frame, bit, error
            ),
        }
    }
}

impl From<AttributeError> for NetworkError {
    fn from(error: AttributeError) -> Self {
        NetworkError::AttributeError(error)
    }
}
