pub mod content;
pub mod m3u;
pub mod playback;
pub mod stream_select;
