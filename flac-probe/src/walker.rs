use log::{debug, trace};

use crate::blocks::{StreamInfo, VorbisComment, STREAM_INFO_SIZE};
use crate::header::{
    BlockHeader, BlockType, MetadataBlockCounts, BLOCK_HEADER_SIZE, BLOCK_TYPE_INVALID,
};
use crate::prelude::{BlockError, ByteSource, FlacError, Result};

/// 4-byte signature every FLAC stream starts with.
pub const FLAC_SIGNATURE: &[u8; 4] = b"fLaC";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkerState {
    Scanning,
    Done,
}

/// Metadata extracted from the header region of a FLAC stream.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FlacMetadata {
    pub stream_info: StreamInfo,
    pub vorbis_comment: Option<VorbisComment>,
    pub block_counts: MetadataBlockCounts,
}

impl FlacMetadata {
    /// Check the `fLaC` signature, then read all metadata blocks from `source`.
    pub fn from_reader<S: ByteSource>(source: &mut S) -> Result<Self> {
        Self::from_reader_with(source, false)
    }

    /// Like [FlacMetadata::from_reader], but with `skip_signature` set the
    /// caller has already consumed the signature.
    pub fn from_reader_with<S: ByteSource>(source: &mut S, skip_signature: bool) -> Result<Self> {
        if !skip_signature {
            check_signature(source)?;
        }
        MetadataWalker::new(source).walk()
    }

    pub fn stream_info(&self) -> &StreamInfo {
        &self.stream_info
    }

    pub fn vorbis_comment(&self) -> Option<&VorbisComment> {
        self.vorbis_comment.as_ref()
    }

    pub fn block_counts(&self) -> &MetadataBlockCounts {
        &self.block_counts
    }

    /// Audio length in seconds.
    pub fn duration(&self) -> f64 {
        self.stream_info.duration()
    }
}

pub fn check_signature<S: ByteSource>(source: &mut S) -> Result<()> {
    let signature = source.read_exact_bytes(FLAC_SIGNATURE.len())?;
    if signature[..] != FLAC_SIGNATURE[..] {
        return Err(FlacError::InvalidMagicNumber);
    }
    Ok(())
}

/// Walks the metadata blocks following the signature.
///
/// The walk ends at the first header with the last-metadata-block flag set, or when
/// the source runs out of bytes between two blocks. Audio frames are never read.
pub struct MetadataWalker<'a, S> {
    source: &'a mut S,
    state: WalkerState,
    headers_read: usize,
    counts: MetadataBlockCounts,
    stream_info: Option<StreamInfo>,
    vorbis_comment: Option<VorbisComment>,
}

impl<'a, S: ByteSource> MetadataWalker<'a, S> {
    pub fn new(source: &'a mut S) -> Self {
        MetadataWalker {
            source,
            state: WalkerState::Scanning,
            headers_read: 0,
            counts: MetadataBlockCounts::default(),
            stream_info: None,
            vorbis_comment: None,
        }
    }

    pub fn state(&self) -> WalkerState {
        self.state
    }

    /// Run until [WalkerState::Done] and collect the result.
    pub fn walk(mut self) -> Result<FlacMetadata> {
        while self.state == WalkerState::Scanning {
            self.step()?;
        }

        let stream_info = self.stream_info.ok_or(BlockError::MissingStreamInfo)?;
        debug!(
            "Metadata walk finished after {} blocks, {} Hz, {} channels, {} bits",
            self.headers_read,
            stream_info.sample_rate,
            stream_info.channels,
            stream_info.bits_per_sample
        );
        Ok(FlacMetadata {
            stream_info,
            vorbis_comment: self.vorbis_comment,
            block_counts: self.counts,
        })
    }

    /// Process one metadata block.
    pub fn step(&mut self) -> Result<WalkerState> {
        if self.state == WalkerState::Done {
            return Ok(self.state);
        }
        if self.source.at_end()? {
            debug!("End of source reached without last-metadata-block flag");
            self.state = WalkerState::Done;
            return Ok(self.state);
        }

        let header = self.read_header()?;
        trace!(
            "Block header: type = {}, length = {}, last = {}",
            header.block_type,
            header.length,
            header.is_last
        );

        let first = self.headers_read == 0;
        self.headers_read += 1;

        match header.known_type() {
            Some(BlockType::StreamInfo) => self.read_stream_info(&header)?,
            Some(_) if first => return Err(BlockError::InvalidFirstBlock.into()),
            Some(BlockType::VorbisComment) => {
                let payload = self.read_payload(&header)?;
                self.vorbis_comment = Some(VorbisComment::from_bytes(&payload)?);
                self.counts.increment(BlockType::VorbisComment);
            }
            Some(block_type) => {
                trace!("Skipping {} block", block_type);
                self.source.skip(header.length as usize)?;
                self.counts.increment(block_type);
            }
            None if header.block_type >= BLOCK_TYPE_INVALID => {
                return Err(BlockError::InvalidBlockType(header.block_type).into());
            }
            None if first => return Err(BlockError::InvalidFirstBlock.into()),
            None => {
                debug!("Skipping reserved block type {}", header.block_type);
                self.source.skip(header.length as usize)?;
            }
        }

        if header.is_last {
            self.state = WalkerState::Done;
        }
        Ok(self.state)
    }

    fn read_header(&mut self) -> Result<BlockHeader> {
        let bytes = self.source.read_exact_bytes(BLOCK_HEADER_SIZE)?;
        Ok(BlockHeader::from_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_payload(&mut self, header: &BlockHeader) -> Result<Vec<u8>> {
        if header.length == 0 {
            return Ok(Vec::new());
        }
        self.source.read_exact_bytes(header.length as usize)
    }

    fn read_stream_info(&mut self, header: &BlockHeader) -> Result<()> {
        if self.counts.get(BlockType::StreamInfo) > 0 {
            return Err(BlockError::DuplicateStreamInfo.into());
        }
        if header.length as usize != STREAM_INFO_SIZE {
            return Err(BlockError::InvalidStreamInfoLength(header.length).into());
        }

        let payload = self.read_payload(header)?;
        self.stream_info = Some(StreamInfo::from_bytes(&payload)?);
        self.counts.increment(BlockType::StreamInfo);
        Ok(())
    }
}
