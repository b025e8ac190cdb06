#![allow(dead_code)]

use flac_probe::blocks::StreamInfo;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Encode `info` back into a 34-byte STREAMINFO payload.
pub fn encode_stream_info(info: &StreamInfo) -> Vec<u8> {
    let mut data = Vec::with_capacity(34);
    data.extend_from_slice(&info.min_block_size.to_be_bytes());
    data.extend_from_slice(&info.max_block_size.to_be_bytes());
    data.extend_from_slice(&info.min_frame_size.to_be_bytes()[1..]);
    data.extend_from_slice(&info.max_frame_size.to_be_bytes()[1..]);
    let packed = ((info.sample_rate as u64) << 44)
        | (((info.channels - 1) as u64) << 41)
        | (((info.bits_per_sample - 1) as u64) << 36)
        | info.total_samples;
    data.extend_from_slice(&packed.to_be_bytes());
    data.extend_from_slice(&hex::decode(&info.audio_md5).unwrap());
    data
}

pub fn stream_info(
    sample_rate: u32,
    channels: u8,
    bits_per_sample: u8,
    total_samples: u64,
    md5: &str,
) -> StreamInfo {
    StreamInfo {
        min_block_size: 4096,
        max_block_size: 4096,
        min_frame_size: 1024,
        max_frame_size: 8192,
        sample_rate,
        channels,
        bits_per_sample,
        total_samples,
        audio_md5: md5.to_string(),
    }
}

pub fn vorbis_comment_payload(vendor: &str, entries: &[&str]) -> Vec<u8> {
    let entries: Vec<&[u8]> = entries.iter().map(|e| e.as_bytes()).collect();
    raw_vorbis_comment_payload(vendor.as_bytes(), &entries)
}

pub fn raw_vorbis_comment_payload(vendor: &[u8], entries: &[&[u8]]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
    data.extend_from_slice(vendor);
    data.extend_from_slice(&(entries.len() as u32).to_le_bytes());
    for entry in entries {
        data.extend_from_slice(&(entry.len() as u32).to_le_bytes());
        data.extend_from_slice(entry);
    }
    data
}

/// Values that are known to be UTF-8, for comparing against literals.
pub fn text(values: &[Vec<u8>]) -> Vec<&str> {
    values
        .iter()
        .map(|v| std::str::from_utf8(v).unwrap())
        .collect()
}

pub fn block_header(block_type: u8, is_last: bool, length: u32) -> [u8; 4] {
    let first = if is_last { block_type | 0x80 } else { block_type };
    let length = length.to_be_bytes();
    [first, length[1], length[2], length[3]]
}

/// Assembles a FLAC stream from raw metadata blocks.
#[derive(Default)]
pub struct FlacBuilder {
    signature: Option<Vec<u8>>,
    blocks: Vec<(u8, Vec<u8>)>,
    mark_last: bool,
    frames: Vec<u8>,
}

impl FlacBuilder {
    pub fn new() -> Self {
        FlacBuilder {
            mark_last: true,
            ..Default::default()
        }
    }

    pub fn signature(mut self, signature: &[u8]) -> Self {
        self.signature = Some(signature.to_vec());
        self
    }

    pub fn block(mut self, block_type: u8, payload: Vec<u8>) -> Self {
        self.blocks.push((block_type, payload));
        self
    }

    pub fn stream_info(self, info: &StreamInfo) -> Self {
        self.block(0, encode_stream_info(info))
    }

    pub fn vorbis_comment(self, vendor: &str, entries: &[&str]) -> Self {
        self.block(4, vorbis_comment_payload(vendor, entries))
    }

    pub fn padding(self, length: usize) -> Self {
        self.block(1, vec![0u8; length])
    }

    /// Leave the last-metadata-block flag unset everywhere.
    pub fn without_last_flag(mut self) -> Self {
        self.mark_last = false;
        self
    }

    /// Bytes following the metadata blocks.
    pub fn frames(mut self, frames: &[u8]) -> Self {
        self.frames = frames.to_vec();
        self
    }

    /// Length of signature plus metadata blocks.
    pub fn metadata_len(&self) -> u64 {
        let signature = self.signature.as_ref().map_or(4, Vec::len);
        let blocks: usize = self.blocks.iter().map(|(_, p)| 4 + p.len()).sum();
        (signature + blocks) as u64
    }

    pub fn build(&self) -> Vec<u8> {
        let mut data = self.signature.clone().unwrap_or_else(|| b"fLaC".to_vec());
        let count = self.blocks.len();
        for (i, (block_type, payload)) in self.blocks.iter().enumerate() {
            let is_last = self.mark_last && i + 1 == count;
            data.extend_from_slice(&block_header(*block_type, is_last, payload.len() as u32));
            data.extend_from_slice(payload);
        }
        data.extend_from_slice(&self.frames);
        data
    }
}

pub const REFERENCE_VENDOR: &str = "reference libFLAC 1.3.1 20141125";

/// Header layout of the reference recordings: STREAMINFO, SEEKTABLE,
/// VORBIS_COMMENT, PADDING, followed by frame data.
pub fn reference_file(info: &StreamInfo, title: &str) -> Vec<u8> {
    let title = format!("title={title}");
    let mut seek_point = Vec::with_capacity(18);
    seek_point.extend_from_slice(&0u64.to_be_bytes());
    seek_point.extend_from_slice(&0u64.to_be_bytes());
    seek_point.extend_from_slice(&4096u16.to_be_bytes());

    FlacBuilder::new()
        .stream_info(info)
        .block(3, seek_point)
        .vorbis_comment(REFERENCE_VENDOR, &[&title, "date=2017", "artist=Generator"])
        .padding(8192)
        .frames(&[0xff, 0xf8, 0x69, 0x08, 0x00, 0x0f, 0xff, 0xff, 0xff, 0xff])
        .build()
}
