use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::prelude::{BlockError, Decode, Result};
use crate::utils::take;

/// Also known as FLAC tags, the contents of a vorbis comment packet (without the framing bit).
/// Note that the 32-bit field lengths are **little-endian** coded according to the vorbis spec,
/// as opposed to the usual big-endian coding of fixed-length integers in the rest of FLAC.
///
/// Strings are kept as the bytes found in the file. Taggers do not always write UTF-8,
/// so nothing is decoded here; use [VorbisComment::first_str] for a readable view.
///
/// Field names are folded to ASCII lowercase.
/// A field may occur several times, its values are kept in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VorbisComment {
    /// [vendor_string] = read a vector of [vendor_length] octets
    pub vendor_string: Vec<u8>,
    /// [user_comment_list_length] entries, grouped by lowercase field name
    pub comments: BTreeMap<Vec<u8>, Vec<Vec<u8>>>,
}

impl VorbisComment {
    /// Decode a complete VORBIS_COMMENT payload.
    pub fn from_bytes(payload: &[u8]) -> Result<Self> {
        Self::from_reader(&mut Cursor::new(payload))
    }

    /// [vendor_length] = read an unsigned integer of 32 bits
    pub fn vendor_length(&self) -> u32 {
        self.vendor_string.len() as u32
    }

    pub fn vendor_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.vendor_string)
    }

    /// Append `value` to the values of `field`.
    pub fn insert<F: AsRef<[u8]>>(&mut self, field: F, value: Vec<u8>) {
        self.comments
            .entry(field.as_ref().to_ascii_lowercase())
            .or_default()
            .push(value);
    }

    /// All values of `field`, which is matched ASCII case-insensitively.
    pub fn get<F: AsRef<[u8]>>(&self, field: F) -> Option<&[Vec<u8>]> {
        self.comments
            .get(&field.as_ref().to_ascii_lowercase())
            .map(|values| values.as_slice())
    }

    pub fn first<F: AsRef<[u8]>>(&self, field: F) -> Option<&[u8]> {
        self.get(field)
            .and_then(|values| values.first())
            .map(Vec::as_slice)
    }

    /// First value of `field`, invalid UTF-8 replaced by `U+FFFD`.
    pub fn first_str<F: AsRef<[u8]>>(&self, field: F) -> Option<Cow<'_, str>> {
        self.first(field).map(String::from_utf8_lossy)
    }

    /// Number of comment entries.
    pub fn len(&self) -> usize {
        self.comments.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}

impl Decode for VorbisComment {
    fn from_reader<R: Read>(reader: &mut R) -> Result<Self> {
        let vendor_length = reader.read_u32::<LittleEndian>()?;
        let vendor_string = take(reader, vendor_length as usize)?;
        let comment_number = reader.read_u32::<LittleEndian>()?;

        let mut comment = VorbisComment {
            vendor_string,
            comments: BTreeMap::new(),
        };
        for _ in 0..comment_number {
            let length = reader.read_u32::<LittleEndian>()?;
            let entry = take(reader, length as usize)?;
            let (field, value) = split_entry(&entry)?;
            comment.insert(field, value.to_vec());
        }
        Ok(comment)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for VorbisComment {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let comments: BTreeMap<Cow<'_, str>, Vec<Cow<'_, str>>> = self
            .comments
            .iter()
            .map(|(field, values)| {
                let values = values.iter().map(|v| String::from_utf8_lossy(v)).collect();
                (String::from_utf8_lossy(field), values)
            })
            .collect();

        let mut state = serializer.serialize_struct("VorbisComment", 2)?;
        state.serialize_field("vendor_string", &self.vendor_str())?;
        state.serialize_field("comments", &comments)?;
        state.end()
    }
}

/// Split a `field=value` entry at its first `=`.
/// An entry starting with `=` has an empty field name.
fn split_entry(entry: &[u8]) -> Result<(&[u8], &[u8])> {
    match entry.iter().position(|&b| b == b'=') {
        Some(index) => Ok((&entry[..index], &entry[index + 1..])),
        None => {
            let entry = String::from_utf8_lossy(entry).into_owned();
            Err(BlockError::MalformedComment(entry).into())
        }
    }
}
