//! Identifier partitioning for batched detail requests

/// Split `items` into contiguous chunks of at most `max_chunk_size`
///
/// Order-preserving and lossless: concatenating the chunks yields the
/// input. Every chunk holds exactly `max_chunk_size` elements except
/// possibly the last. Empty input yields no chunks.
///
/// # Panics
/// Panics if `max_chunk_size` is zero (a programming error).
pub fn partition<T: Clone>(items: &[T], max_chunk_size: usize) -> Vec<Vec<T>> {
    assert!(max_chunk_size > 0, "max_chunk_size must be positive");
    items.chunks(max_chunk_size).map(<[T]>::to_vec).collect()
}
