pub(crate) mod copy;
pub(crate) mod pixel_buffer;
