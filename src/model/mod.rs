pub(crate) mod audio;
pub(crate) mod lyric;
pub(crate) mod visual;
