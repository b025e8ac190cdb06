use std::io::Read;

pub use crate::error::{BlockError, ErrorKind, FieldError, FlacError};
pub use crate::source::ByteSource;

pub type Result<I> = std::result::Result<I, FlacError>;

pub trait Decode: Sized {
    fn from_reader<R: Read>(reader: &mut R) -> Result<Self>;
}
