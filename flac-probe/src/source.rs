use std::io::{self, BufRead, Read};

use crate::prelude::{FlacError, Result};

/// Sequential access to the bytes of a FLAC stream.
///
/// Implemented for every [BufRead], so `BufReader<File>` and `Cursor<Vec<u8>>`
/// can be handed to the parser directly.
pub trait ByteSource {
    /// Read exactly `len` bytes. A zero `len` is rejected with [FlacError::InvalidReadLength].
    fn read_exact_bytes(&mut self, len: usize) -> Result<Vec<u8>>;

    /// Advance `len` bytes without keeping them.
    fn skip(&mut self, len: usize) -> Result<()>;

    /// Whether no more bytes can be read.
    fn at_end(&mut self) -> Result<bool>;
}

impl<R: BufRead> ByteSource for R {
    fn read_exact_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        if len == 0 {
            return Err(FlacError::InvalidReadLength(len));
        }

        let mut buf = vec![0u8; len];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    fn skip(&mut self, len: usize) -> Result<()> {
        let skipped = io::copy(&mut self.by_ref().take(len as u64), &mut io::sink())?;
        if skipped < len as u64 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("expected to skip {len} bytes, only {skipped} available"),
            )
            .into());
        }
        Ok(())
    }

    fn at_end(&mut self) -> Result<bool> {
        Ok(self.fill_buf()?.is_empty())
    }
}
