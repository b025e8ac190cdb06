mod comment;
mod stream_info;

pub use comment::*;
pub use stream_info::*;
