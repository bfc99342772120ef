//! Polynomial tag digest.
//!
//! The digest of a tag is `sum(31^i * byte[i])` over the tag's bytes,
//! accumulated in wrapping u64 arithmetic. Overflow wraps silently; only
//! `digest % bucket_count` is ever consumed, so modular accumulation is
//! exactly as good as the infinite-precision sum.

/// Digest assigned to the empty tag. The polynomial sum of zero bytes
/// would be 0; the empty key instead gets a fixed non-zero constant so
/// it behaves like any other valid key.
pub(crate) const EMPTY_TAG_DIGEST: u64 = 31;

/// Compute the bucket-selection digest of a tag.
///
/// Total for all input: the empty tag yields [`EMPTY_TAG_DIGEST`], every
/// other tag its polynomial sum.
pub fn tag_digest(tag: &str) -> u64 {
    if tag.is_empty() {
        return EMPTY_TAG_DIGEST;
    }
    let mut digest: u64 = 0;
    let mut weight: u64 = 1; // 31^i
    for &b in tag.as_bytes() {
        digest = digest.wrapping_add(weight.wrapping_mul(b as u64));
        weight = weight.wrapping_mul(31);
    }
    digest
}
