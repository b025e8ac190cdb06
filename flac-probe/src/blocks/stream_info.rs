use std::io::{Cursor, Read};

use byteorder::{BigEndian, ReadBytesExt};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::prelude::{BlockError, Decode, FieldError, Result};

/// Size of the STREAMINFO payload in bytes.
pub const STREAM_INFO_SIZE: usize = 34;

pub const BLOCK_SIZE_MIN: u16 = 16;
pub const BLOCK_SIZE_MAX: u32 = 65535;
pub const SAMPLE_RATE_MIN: u32 = 1;
/// Limited by the structure of frame headers.
pub const SAMPLE_RATE_MAX: u32 = 655350;

static MD5_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9a-f]{32}$").unwrap());

/// Notes:
/// FLAC specifies a minimum block size of 16 and a maximum block size of 65535,
/// meaning the bit patterns corresponding to the numbers 0-15 in the minimum blocksize and maximum blocksize fields are invalid.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StreamInfo {
    /// <16> The minimum block size (in samples) used in the stream.
    pub min_block_size: u16,
    /// <16> The maximum block size (in samples) used in the stream.
    pub max_block_size: u16,
    /// <24> The minimum frame size (in bytes) used in the stream. May be 0 to imply the value is not known.
    pub min_frame_size: u32,
    /// <24> The maximum frame size (in bytes) used in the stream. May be 0 to imply the value is not known.
    pub max_frame_size: u32,
    /// <20> Sample rate in Hz.
    /// Though 20 bits are available, the maximum sample rate is limited by the structure of frame headers to 655350Hz.
    /// Also, a value of 0 is invalid.
    pub sample_rate: u32,
    /// <3> (number of channels)-1.
    /// FLAC supports from 1 to 8 channels
    pub channels: u8,
    /// <5> (bits per sample)-1.
    /// FLAC supports from 4 to 32 bits per sample.
    pub bits_per_sample: u8,
    /// <36> Total samples in stream.
    /// 'Samples' means inter-channel sample, i.e. one second of 44.1Khz audio will have 44100 samples regardless of the number of channels.
    /// A value of zero here means the number of total samples is unknown.
    pub total_samples: u64,
    /// <128> MD5 signature of the unencoded audio data, as lowercase hex.
    pub audio_md5: String,
}

impl StreamInfo {
    /// Decode a complete STREAMINFO payload.
    pub fn from_bytes(payload: &[u8]) -> Result<Self> {
        if payload.len() != STREAM_INFO_SIZE {
            return Err(BlockError::InvalidStreamInfoLength(payload.len() as u32).into());
        }
        Self::from_reader(&mut Cursor::new(payload))
    }

    /// Audio length in seconds.
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return f64::NAN;
        }
        self.total_samples as f64 / self.sample_rate as f64
    }

    /// (Minimum blocksize == maximum blocksize) implies a fixed-blocksize stream.
    pub fn is_fixed_blocksize_stream(&self) -> bool {
        self.min_block_size == self.max_block_size
    }

    fn validate(&self) -> Result<()> {
        if self.min_block_size < BLOCK_SIZE_MIN {
            return Err(FieldError::MinBlockSizeTooSmall(self.min_block_size).into());
        }
        // cannot fail for a 16-bit field
        if u32::from(self.max_block_size) > BLOCK_SIZE_MAX {
            return Err(FieldError::MaxBlockSizeTooLarge(self.max_block_size.into()).into());
        }
        if self.min_block_size > self.max_block_size {
            return Err(FieldError::BlockSizeOrder {
                min: self.min_block_size,
                max: self.max_block_size,
            }
            .into());
        }
        if !(SAMPLE_RATE_MIN..=SAMPLE_RATE_MAX).contains(&self.sample_rate) {
            return Err(FieldError::SampleRateOutOfRange(self.sample_rate).into());
        }
        // hex::encode output always matches; guards values set by hand
        if !MD5_PATTERN.is_match(&self.audio_md5) {
            return Err(FieldError::InvalidMd5(self.audio_md5.clone()).into());
        }
        Ok(())
    }
}

impl Decode for StreamInfo {
    fn from_reader<R: Read>(reader: &mut R) -> Result<Self> {
        let min_block_size = reader.read_u16::<BigEndian>()?;
        let max_block_size = reader.read_u16::<BigEndian>()?;
        let min_frame_size = reader.read_u24::<BigEndian>()?;
        let max_frame_size = reader.read_u24::<BigEndian>()?;

        // sample rate, channels, bits per sample and total samples share 64 bits
        let high = reader.read_u32::<BigEndian>()? as u64;
        let low = reader.read_u32::<BigEndian>()? as u64;
        let packed = (high << 32) | low;

        let mut md5_signature = [0u8; 16];
        reader.read_exact(&mut md5_signature)?;

        let info = StreamInfo {
            min_block_size,
            max_block_size,
            min_frame_size,
            max_frame_size,
            // 20 bits
            sample_rate: (packed >> 44) as u32,
            // 3 bits
            channels: ((packed >> 41) & 0b111) as u8 + 1,
            // 5 bits
            bits_per_sample: ((packed >> 36) & 0b1_1111) as u8 + 1,
            // 36 bits
            total_samples: packed & 0xf_ffff_ffff,
            audio_md5: hex::encode(md5_signature),
        };
        info.validate()?;
        Ok(info)
    }
}
