use crate::file::error::FileError;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Text encodings accepted by `read_text_with`
///
/// Names follow the Node.js buffer encodings, so `"utf-8"`, `"ucs2"` and
/// `"binary"` are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TextEncoding {
    #[default]
    Utf8,
    Ascii,
    Latin1,
    Utf16Le,
    Base64,
    Hex,
}

impl TextEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Ascii => "ascii",
            Self::Latin1 => "latin1",
            Self::Utf16Le => "utf16le",
            Self::Base64 => "base64",
            Self::Hex => "hex",
        }
    }

    /// Decode raw bytes into a string
    ///
    /// Returns a message describing the first invalid input on failure.
    /// `latin1`, `base64` and `hex` accept any byte sequence.
    pub fn decode(&self, bytes: Vec<u8>) -> Result<String, String> {
        match self {
            Self::Utf8 => String::from_utf8(bytes).map_err(|e| e.to_string()),
            Self::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(offset) => Err(format!(
                    "byte 0x{:02x} at offset {} is not ASCII",
                    bytes[offset], offset
                )),
                None => String::from_utf8(bytes).map_err(|e| e.to_string()),
            },
            Self::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Self::Utf16Le => {
                if bytes.len() % 2 != 0 {
                    return Err(format!("odd byte length {} for utf16le", bytes.len()));
                }
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16(&units).map_err(|e| e.to_string())
            }
            Self::Base64 => Ok(base64::engine::general_purpose::STANDARD.encode(&bytes)),
            Self::Hex => Ok(hex::encode(&bytes)),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextEncoding {
    type Err = FileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Self::Utf8),
            "ascii" => Ok(Self::Ascii),
            "latin1" | "binary" => Ok(Self::Latin1),
            "utf16le" | "utf-16le" | "ucs2" | "ucs-2" => Ok(Self::Utf16Le),
            "base64" => Ok(Self::Base64),
            "hex" => Ok(Self::Hex),
            _ => Err(FileError::UnknownEncoding(s.to_string())),
        }
    }
}

impl TryFrom<String> for TextEncoding {
    type Error = FileError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TextEncoding> for String {
    fn from(encoding: TextEncoding) -> Self {
        encoding.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("utf8".parse::<TextEncoding>().unwrap(), TextEncoding::Utf8);
        assert_eq!("UTF-8".parse::<TextEncoding>().unwrap(), TextEncoding::Utf8);
        assert_eq!("binary".parse::<TextEncoding>().unwrap(), TextEncoding::Latin1);
        assert_eq!("ucs2".parse::<TextEncoding>().unwrap(), TextEncoding::Utf16Le);
        assert_eq!("hex".parse::<TextEncoding>().unwrap(), TextEncoding::Hex);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "ebcdic".parse::<TextEncoding>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown text encoding: ebcdic");
    }

    #[test]
    fn test_default_is_utf8() {
        assert_eq!(TextEncoding::default(), TextEncoding::Utf8);
    }

    #[test]
    fn test_decode_utf8() {
        let text = TextEncoding::Utf8.decode("héllo".as_bytes().to_vec()).unwrap();
        assert_eq!(text, "héllo");

        assert!(TextEncoding::Utf8.decode(vec![0xff, 0xfe, 0x41]).is_err());
    }

    #[test]
    fn test_decode_ascii_rejects_high_bytes() {
        assert_eq!(TextEncoding::Ascii.decode(b"plain".to_vec()).unwrap(), "plain");

        let err = TextEncoding::Ascii.decode(vec![b'a', 0xe9]).unwrap_err();
        assert_eq!(err, "byte 0xe9 at offset 1 is not ASCII");
    }

    #[test]
    fn test_decode_latin1() {
        let text = TextEncoding::Latin1.decode(vec![0x63, 0x61, 0x66, 0xe9]).unwrap();
        assert_eq!(text, "café");
    }

    #[test]
    fn test_decode_utf16le() {
        let text = TextEncoding::Utf16Le.decode(vec![0x68, 0x00, 0x69, 0x00]).unwrap();
        assert_eq!(text, "hi");

        assert!(TextEncoding::Utf16Le.decode(vec![0x68, 0x00, 0x69]).is_err());
    }

    #[test]
    fn test_decode_base64_and_hex() {
        assert_eq!(TextEncoding::Base64.decode(b"hello".to_vec()).unwrap(), "aGVsbG8=");
        assert_eq!(TextEncoding::Hex.decode(vec![0x00, 0xab, 0x10]).unwrap(), "00ab10");
    }

    #[test]
    fn test_serde_uses_names() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            encoding: TextEncoding,
        }

        let parsed: Wrapper = toml::from_str("encoding = \"ucs2\"").unwrap();
        assert_eq!(parsed.encoding, TextEncoding::Utf16Le);

        let out = toml::to_string(&Wrapper { encoding: TextEncoding::Latin1 }).unwrap();
        assert_eq!(out.trim(), "encoding = \"latin1\"");

        assert!(toml::from_str::<Wrapper>("encoding = \"klingon\"").is_err());
    }
}
