use std::fmt::{Display, Formatter};
use std::io::Read;
use std::ops::Index;

use byteorder::{BigEndian, ReadBytesExt};
use num_traits::FromPrimitive;

use crate::prelude::{Decode, Result};

/// Size of a metadata block header in bytes.
pub const BLOCK_HEADER_SIZE: usize = 4;

/// Largest block type value. It is invalid, to avoid confusion with a frame sync code.
pub const BLOCK_TYPE_INVALID: u8 = 127;

/// The metadata block types defined by FLAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, FromPrimitive)]
pub enum BlockType {
    StreamInfo = 0,
    Padding = 1,
    Application = 2,
    SeekTable = 3,
    VorbisComment = 4,
    CueSheet = 5,
    Picture = 6,
}

impl BlockType {
    pub const ALL: [BlockType; 7] = [
        BlockType::StreamInfo,
        BlockType::Padding,
        BlockType::Application,
        BlockType::SeekTable,
        BlockType::VorbisComment,
        BlockType::CueSheet,
        BlockType::Picture,
    ];

    /// Known block type of `value`, `None` for reserved and invalid values.
    pub fn from_u8(value: u8) -> Option<Self> {
        FromPrimitive::from_u8(value)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::StreamInfo => "STREAMINFO",
            BlockType::Padding => "PADDING",
            BlockType::Application => "APPLICATION",
            BlockType::SeekTable => "SEEKTABLE",
            BlockType::VorbisComment => "VORBIS_COMMENT",
            BlockType::CueSheet => "CUESHEET",
            BlockType::Picture => "PICTURE",
        }
    }
}

impl Display for BlockType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// METADATA_BLOCK_HEADER
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    /// <1> Last-metadata-block flag: '1' if this block is the last metadata block before the audio blocks, '0' otherwise.
    pub is_last: bool,
    /// <7> BLOCK_TYPE
    /// - 0 : STREAMINFO
    /// - 1 : PADDING
    /// - 2 : APPLICATION
    /// - 3 : SEEKTABLE
    /// - 4 : VORBIS_COMMENT
    /// - 5 : CUESHEET
    /// - 6 : PICTURE
    /// - 7-126 : reserved
    /// - 127 : invalid, to avoid confusion with a frame sync code
    pub block_type: u8,
    /// <24> Length (in bytes) of metadata to follow (does not include the size of the METADATA_BLOCK_HEADER)
    pub length: u32,
}

impl BlockHeader {
    pub fn from_bytes(bytes: [u8; BLOCK_HEADER_SIZE]) -> Self {
        let value = u32::from_be_bytes(bytes);
        BlockHeader {
            is_last: value >> 31 == 1,
            block_type: ((value >> 24) & 0b0111_1111) as u8,
            length: value & 0x00ff_ffff,
        }
    }

    /// Known type of the block following this header.
    pub fn known_type(&self) -> Option<BlockType> {
        BlockType::from_u8(self.block_type)
    }
}

impl Decode for BlockHeader {
    fn from_reader<R: Read>(reader: &mut R) -> Result<Self> {
        let value = reader.read_u32::<BigEndian>()?;
        Ok(BlockHeader::from_bytes(value.to_be_bytes()))
    }
}

/// Number of metadata blocks seen per known block type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataBlockCounts {
    counts: [usize; 7],
}

impl MetadataBlockCounts {
    pub fn get(&self, block_type: BlockType) -> usize {
        self.counts[block_type as usize]
    }

    pub(crate) fn increment(&mut self, block_type: BlockType) {
        self.counts[block_type as usize] += 1;
    }

    /// Number of known blocks seen.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BlockType, usize)> + '_ {
        BlockType::ALL.iter().map(move |t| (*t, self.get(*t)))
    }
}

impl Index<BlockType> for MetadataBlockCounts {
    type Output = usize;

    fn index(&self, block_type: BlockType) -> &Self::Output {
        &self.counts[block_type as usize]
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MetadataBlockCounts {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (block_type, count) in self.iter() {
            map.serialize_entry(block_type.as_str(), &count)?;
        }
        map.end()
    }
}
