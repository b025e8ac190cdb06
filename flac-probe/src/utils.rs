use std::io::{self, Read};

/// Read exactly `len` bytes. The buffer grows with the data actually read,
/// so a corrupt length prefix does not allocate up front.
pub(crate) fn take<R: Read>(reader: &mut R, len: usize) -> io::Result<Vec<u8>> {
    let mut r = Vec::new();
    let got = reader.take(len as u64).read_to_end(&mut r)?;
    if got < len {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("expected {len} bytes, got {got}"),
        ));
    }
    Ok(r)
}
