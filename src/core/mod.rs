// Core modules implementing charset resolution, transcoding, and error modeling.
pub mod charset;
pub mod code_page;
pub mod codec;
pub mod error;
pub mod media_type;
pub mod transcode;
