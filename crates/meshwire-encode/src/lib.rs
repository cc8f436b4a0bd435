//! # meshwire-encode
//!
//! Export module — turns the PNG frame archives saved by the viewer into
//! video files. Shells out to FFmpeg for H.264 encoding.

pub mod ffmpeg;

pub use ffmpeg::{convert_frames_to_video, ExportOptions, FfmpegEncoder};
