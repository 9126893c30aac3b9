//! Content fingerprints for corpus entries.
//!
//! Reports and the `corpus` listing tag every entry with a fingerprint of its
//! raw JPEG bytes, so a result can be matched to the exact file it came from
//! even after the corpus tree is reorganized.

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// 64-bit FNV-1a over the undecoded file content, as 16 lowercase hex digits.
///
/// Not collision resistant. It tells corpus files apart, nothing more.
#[must_use]
pub fn fingerprint(content: &[u8]) -> String {
    let hash = content
        .iter()
        .fold(FNV_OFFSET_BASIS, |hash, &byte| (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME));
    format!("{hash:016x}")
}
