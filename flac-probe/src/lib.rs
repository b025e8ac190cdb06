//! Reads the metadata region of a FLAC stream: STREAMINFO, VORBIS_COMMENT and
//! the number of blocks of each type. Audio frames are never decoded.
//!
//! ```no_run
//! use flac_probe::FlacFile;
//!
//! let flac = FlacFile::open("track.flac")?;
//! println!("{} Hz, {:.2}s", flac.stream_info().sample_rate, flac.duration());
//! if let Some(artist) = flac.vorbis_comment().and_then(|c| c.first_str("artist")) {
//!     println!("by {artist}");
//! }
//! # Ok::<(), flac_probe::error::FlacError>(())
//! ```

#[macro_use]
extern crate num_derive;

mod file;
mod header;
mod source;
mod utils;
mod walker;

pub use file::*;
pub use header::*;
pub use walker::*;

pub mod blocks;
pub mod error;
pub mod prelude;
