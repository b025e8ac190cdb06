use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlacError {
    #[error("invalid magic number")]
    InvalidMagicNumber,
    #[error(transparent)]
    Block(#[from] BlockError),
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("invalid read length {0}, must be positive")]
    InvalidReadLength(usize),
    #[error(transparent)]
    IO(#[from] std::io::Error),
}

/// Violations of the metadata block structure.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BlockError {
    #[error("invalid first block, must be StreamInfo")]
    InvalidFirstBlock,
    #[error("StreamInfo block must occur only once")]
    DuplicateStreamInfo,
    #[error("StreamInfo block is missing")]
    MissingStreamInfo,
    #[error("invalid StreamInfo length {0}, must be 34")]
    InvalidStreamInfoLength(u32),
    #[error("invalid block type {0}")]
    InvalidBlockType(u8),
    #[error("vorbis comment `{0}` must contain \"=\" as delimiter")]
    MalformedComment(String),
}

/// StreamInfo fields outside of their legal range.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FieldError {
    #[error("minimum block size of {0} is less than the allowed minimum of 16")]
    MinBlockSizeTooSmall(u16),
    #[error("maximum block size of {0} is more than the allowed maximum of 65535")]
    MaxBlockSizeTooLarge(u32),
    #[error("minimum block size of {min} must not be more than maximum block size of {max}")]
    BlockSizeOrder { min: u16, max: u16 },
    #[error("sample rate of {0} is invalid, it must be within the range of 1-655350")]
    SampleRateOutOfRange(u32),
    #[error("invalid MD5 signature `{0}`")]
    InvalidMd5(String),
}

/// Coarse classification of [FlacError].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Signature,
    BlockStructure,
    FieldConstraint,
    Misuse,
}

impl FlacError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FlacError::InvalidMagicNumber => ErrorKind::Signature,
            FlacError::Block(_) => ErrorKind::BlockStructure,
            FlacError::Field(_) => ErrorKind::FieldConstraint,
            FlacError::InvalidReadLength(_) => ErrorKind::Misuse,
            FlacError::IO(_) => ErrorKind::Io,
        }
    }
}
