use crate::core_parser::CoreParser;
use crate::errors::ParseError;
use crate::models::HeaderProp;
use crate::parsing_utils::{le_f32, le_i32, le_u64};

/// Intermediate parsing structure for the header
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub major_version: i32,
    pub minor_version: i32,
    pub net_version: Option<i32>,
    pub game_type: String,
    pub properties: Vec<(String, HeaderProp)>,
}

impl Header {
    fn find_property(&self, key: &str) -> Option<&HeaderProp> {
        self.properties
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, prop)| prop)
    }

    pub fn num_frames(&self) -> Option<i32> {
        self.find_property("NumFrames").and_then(HeaderProp::as_i32)
    }

    pub fn max_channels(&self) -> Option<i32> {
        self.find_property("MaxChannels")
            .and_then(HeaderProp::as_i32)
    }

    pub fn match_type(&self) -> Option<&str> {
        self.find_property("MatchType")
            .and_then(HeaderProp::as_string)
    }

    pub fn build_version(&self) -> Option<&str> {
        self.find_property("BuildVersion")
            .and_then(HeaderProp::as_string)
    }
}

pub fn parse_header(rlp: &mut CoreParser) -> Result<Header, ParseError> {
    let major_version = rlp
        .take(4, le_i32)
        .map_err(|e| ParseError::ParseError("major version", rlp.bytes_read(), Box::new(e)))?;

    let minor_version = rlp
        .take(4, le_i32)
        .map_err(|e| ParseError::ParseError("minor version", rlp.bytes_read(), Box::new(e)))?;

    let net_version = if major_version >= 866 && minor_version >= 18 {
        Some(rlp.take(4, le_i32).map_err(|e| {
            ParseError::ParseError("net version", rlp.bytes_read(), Box::new(e))
        })?)
    } else {
        None
    };

    let game_type = rlp
        .parse_text()
        .map_err(|e| ParseError::ParseError("game type", rlp.bytes_read(), Box::new(e)))?;

    let properties = parse_rdict(rlp)
        .map_err(|e| ParseError::ParseError("header properties", rlp.bytes_read(), Box::new(e)))?;

    Ok(Header {
        major_version,
        minor_version,
        net_version,
        game_type,
        properties,
    })
}

/// The header properties are a flat sequence of key / type / value entries
/// terminated by a key of `None`. Since there is no format specification,
/// duplicate keys can't be ruled out, so the result is a key value vector
/// rather than a map.
fn parse_rdict(rlp: &mut CoreParser) -> Result<Vec<(String, HeaderProp)>, ParseError> {
    let mut res: Vec<_> = Vec::new();
    loop {
        let key = rlp.parse_str()?;
        if key == "None" || key == "\0\0\0None" {
            break;
        }

        let val = match rlp.parse_str()? {
            "ArrayProperty" => array_property(rlp),
            "BoolProperty" => bool_property(rlp),
            "ByteProperty" => byte_property(rlp),
            "FloatProperty" => float_property(rlp),
            "IntProperty" => int_property(rlp),
            "NameProperty" => name_property(rlp),
            "QWordProperty" => qword_property(rlp),
            "StrProperty" => str_property(rlp),
            x => Err(ParseError::UnexpectedProperty(String::from(x))),
        }?;

        res.push((String::from(key), val));
    }

    Ok(res)
}

// Each property value starts with 64 bits of filler. There's debate whether
// it's a data length or something else, but every decoder throws it out.

fn byte_property(rlp: &mut CoreParser) -> Result<HeaderProp, ParseError> {
    rlp.take(8, |_d| ())?;
    match rlp.parse_str()? {
        "OnlinePlatform_Steam" | "OnlinePlatform_PS4" => Ok(()),
        _ => rlp.parse_str().map(|_| ()),
    }?;
    Ok(HeaderProp::Byte)
}

fn str_property(rlp: &mut CoreParser) -> Result<HeaderProp, ParseError> {
    rlp.take(8, |_d| ())?;
    Ok(HeaderProp::Str(rlp.parse_text()?))
}

fn name_property(rlp: &mut CoreParser) -> Result<HeaderProp, ParseError> {
    rlp.take(8, |_d| ())?;
    Ok(HeaderProp::Name(rlp.parse_text()?))
}

fn int_property(rlp: &mut CoreParser) -> Result<HeaderProp, ParseError> {
    rlp.take(12, |d| HeaderProp::Int(le_i32(&d[8..])))
}

fn bool_property(rlp: &mut CoreParser) -> Result<HeaderProp, ParseError> {
    rlp.take(9, |d| HeaderProp::Bool(d[8] == 1))
}

fn float_property(rlp: &mut CoreParser) -> Result<HeaderProp, ParseError> {
    rlp.take(12, |d| HeaderProp::Float(le_f32(&d[8..])))
}

fn qword_property(rlp: &mut CoreParser) -> Result<HeaderProp, ParseError> {
    rlp.take(16, |d| HeaderProp::QWord(le_u64(&d[8..])))
}

fn array_property(rlp: &mut CoreParser) -> Result<HeaderProp, ParseError> {
    let size = rlp.take(12, |d| le_i32(&d[8..]))?;
    let arr = CoreParser::repeat(size as usize, || parse_rdict(rlp))?;
    Ok(HeaderProp::Array(arr))
}
