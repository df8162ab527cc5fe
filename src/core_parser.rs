use crate::errors::ParseError;
use crate::parsing_utils::{decode_str, decode_utf16, decode_windows1252, le_i32};

/// A cursor over the byte oriented sections of the replay (everything except
/// the network stream). Keeps track of how far into the replay it is so
/// errors can point at an absolute offset.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreParser<'a> {
    data: &'a [u8],
    offset: i32,
}

impl<'a> CoreParser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        CoreParser { data, offset: 0 }
    }

    pub fn bytes_read(&self) -> i32 {
        self.offset
    }

    pub fn advance(&mut self, ind: usize) {
        self.offset += ind as i32;
        self.data = &self.data[ind..];
    }

    /// Returns a slice of the replay after ensuring enough data backs it
    pub fn view_data(&self, size: usize) -> Result<&'a [u8], ParseError> {
        if size > self.data.len() {
            Err(ParseError::InsufficientData(
                size as i32,
                self.data.len() as i32,
            ))
        } else {
            Ok(&self.data[..size])
        }
    }

    pub fn take_data(&mut self, size: usize) -> Result<&'a [u8], ParseError> {
        let res = self.view_data(size)?;
        self.advance(size);
        Ok(res)
    }

    /// Take the next `size` bytes and interpret them in an infallible fashion
    #[inline]
    pub fn take<F, T>(&mut self, size: usize, mut f: F) -> Result<T, ParseError>
    where
        F: FnMut(&'a [u8]) -> T,
    {
        let res = f(self.view_data(size)?);
        self.advance(size);
        Ok(res)
    }

    pub fn take_i32(&mut self, section: &'static str) -> Result<i32, ParseError> {
        self.take(4, le_i32)
            .map_err(|e| ParseError::ParseError(section, self.bytes_read(), Box::new(e)))
    }

    pub fn take_u32(&mut self, section: &'static str) -> Result<u32, ParseError> {
        self.take_i32(section).map(|x| x as u32)
    }

    /// Repeatedly parse the same element until `size` elements are parsed.
    /// The size is bounded so corrupt length prefixes don't turn into
    /// gigabyte allocations.
    pub fn repeat<F, T>(size: usize, mut f: F) -> Result<Vec<T>, ParseError>
    where
        F: FnMut() -> Result<T, ParseError>,
    {
        if size > 25_000 {
            return Err(ParseError::ListTooLarge(size));
        }

        let mut res = Vec::with_capacity(size);
        for _ in 0..size {
            res.push(f()?);
        }
        Ok(res)
    }

    pub fn list_of<F, T>(&mut self, mut f: F) -> Result<Vec<T>, ParseError>
    where
        F: FnMut(&mut Self) -> Result<T, ParseError>,
    {
        let size = self.take(4, le_i32)?;
        CoreParser::repeat(size as usize, || f(self))
    }

    pub fn text_list(&mut self) -> Result<Vec<String>, ParseError> {
        self.list_of(CoreParser::parse_text)
    }

    /// Parses a length prefixed, null terminated UTF-8 string
    pub fn parse_str(&mut self) -> Result<&'a str, ParseError> {
        let mut size = self.take(4, le_i32)? as usize;

        // One replay in the wild writes a property name with a length of
        // 0x5000000 where the real payload is the 8 byte `\0\0\0None`. The
        // correction is specific to that malformation, so make it visible
        // rather than silently rewriting the length.
        if size == 0x0500_0000 {
            log::warn!(
                "replacing byte length of {} with 8 at offset {}",
                size,
                self.bytes_read()
            );
            size = 8;
        }
        self.take_data(size).and_then(decode_str)
    }

    /// Parses a length prefixed string that is either UTF-16 (negative
    /// length, two bytes a character) or Windows-1252 (positive length).
    pub fn parse_text(&mut self) -> Result<String, ParseError> {
        let characters = self.take(4, le_i32)?;

        // characters.abs() panics at i32::MIN, so check the ranges by hand
        if characters == 0 {
            Err(ParseError::ZeroSize)
        } else if characters > 10_000 || characters < -10_000 {
            Err(ParseError::TextTooLarge(characters))
        } else if characters < 0 {
            let size = characters * -2;
            self.take_data(size as usize).and_then(decode_utf16)
        } else {
            self.take_data(characters as usize)
                .and_then(decode_windows1252)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn str_bytes(text: &str) -> Vec<u8> {
        let mut data = ((text.len() + 1) as i32).to_le_bytes().to_vec();
        data.extend_from_slice(text.as_bytes());
        data.push(0);
        data
    }

    #[test]
    fn parse_str_drops_null() {
        let data = str_bytes("TAGame.Replay_Soccar_TA");
        let mut parser = CoreParser::new(&data);
        assert_eq!(parser.parse_str().unwrap(), "TAGame.Replay_Soccar_TA");
        assert_eq!(parser.bytes_read(), data.len() as i32);
    }

    #[test]
    fn parse_str_insufficient() {
        let data = str_bytes("TAGame.Replay_Soccar_TA");
        let mut parser = CoreParser::new(&data[..data.len() - 1]);
        let err = parser.parse_str().unwrap_err();
        assert_eq!(err, ParseError::InsufficientData(24, 23));
    }

    #[test]
    fn parse_str_no_length() {
        let mut parser = CoreParser::new(&[0x05, 0x00]);
        let err = parser.parse_str().unwrap_err();
        assert_eq!(err, ParseError::InsufficientData(4, 2));
    }

    #[test]
    fn parse_str_length_anomaly() {
        // the 0x5000000 length really spans `\0\0\0None`
        let mut data = 0x0500_0000_i32.to_le_bytes().to_vec();
        data.extend_from_slice(b"\0\0\0None\0");
        let mut parser = CoreParser::new(&data);
        assert_eq!(parser.parse_str().unwrap(), "\0\0\0None");
    }

    #[test]
    fn parse_text_zero_size() {
        let mut parser = CoreParser::new(&[0, 0, 0, 0, 0]);
        assert_eq!(parser.parse_str().unwrap_err(), ParseError::ZeroSize);

        let mut parser = CoreParser::new(&[0, 0, 0, 0, 0]);
        assert_eq!(parser.parse_text().unwrap_err(), ParseError::ZeroSize);
    }

    #[test]
    fn parse_text_too_large() {
        let mut parser = CoreParser::new(&[0xcc, 0xcc, 0xcc, 0xcc, 0xcc]);
        let err = parser.parse_text().unwrap_err();
        assert_eq!(err, ParseError::TextTooLarge(-858993460));
    }

    #[test]
    fn parse_text_windows1252() {
        // 0xb3 is a superscript three in windows-1252 and invalid utf8
        let mut data = 6i32.to_le_bytes().to_vec();
        data.extend_from_slice(&[b'a', b'b', 0xb3, b'c', b'd', 0]);
        let mut parser = CoreParser::new(&data);
        assert_eq!(parser.parse_text().unwrap(), "ab\u{b3}cd");
    }

    #[test]
    fn parse_text_utf16() {
        let mut data = (-3i32).to_le_bytes().to_vec();
        data.extend_from_slice(&[0x23, 0x26, b'D', 0x00, 0x00, 0x00]);
        let mut parser = CoreParser::new(&data);
        assert_eq!(parser.parse_text().unwrap(), "\u{2623}D");
    }

    #[test]
    fn parse_invalid_utf16() {
        // unpaired surrogate decodes to a replacement character
        let data = [0xfd, 0xff, 0xff, 0xff, 0xd8, 0xd8, 0x00, 0x00, 0x00, 0x00];
        let mut parser = CoreParser::new(&data);
        assert_eq!(parser.parse_text().unwrap(), "�\u{0}");
    }

    #[test]
    fn text_list_roundtrip() {
        let mut data = 2i32.to_le_bytes().to_vec();
        for name in ["Stadium_P", "Wasteland_P"] {
            data.extend_from_slice(&((name.len() + 1) as i32).to_le_bytes());
            data.extend_from_slice(name.as_bytes());
            data.push(0);
        }
        let mut parser = CoreParser::new(&data);
        assert_eq!(
            parser.text_list().unwrap(),
            vec![String::from("Stadium_P"), String::from("Wasteland_P")]
        );
    }

    #[test]
    fn list_too_large() {
        let data = 26_000i32.to_le_bytes();
        let mut parser = CoreParser::new(&data);
        let err = parser.text_list().unwrap_err();
        assert_eq!(err, ParseError::ListTooLarge(26_000));
    }
}
