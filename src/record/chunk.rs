use std::num::NonZeroUsize;
use std::slice::Chunks;

/// Splits `data` into consecutive slices of at most `size` bytes.
pub fn chunks(data: &[u8], size: NonZeroUsize) -> Chunks<'_, u8>
{
	data.chunks(size.get())
}
