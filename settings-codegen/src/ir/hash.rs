//! Stable name and blob hashing.
//!
//! Settings are keyed in the registry and the developer-driver descriptor by
//! an FNV-1a hash of their qualified name. The embedded schema blob carries a
//! 64-bit FNV-1a integrity hash. Both constants are part of the output
//! contract with the consuming runtime, so the algorithm is fixed here rather
//! than pulled from a hashing crate.

const FNV32_OFFSET: u32 = 0x811c_9dc5;
const FNV32_PRIME: u32 = 0x0100_0193;

const FNV64_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV64_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 32-bit FNV-1a over a setting's qualified name.
pub fn name_hash(name: &str) -> u32 {
    let mut hash = FNV32_OFFSET;
    for byte in name.as_bytes() {
        hash ^= u32::from(*byte);
        hash = hash.wrapping_mul(FNV32_PRIME);
    }
    hash
}

/// 64-bit FNV-1a over the embedded schema blob.
pub fn blob_hash(data: &[u8]) -> u64 {
    let mut hash = FNV64_OFFSET;
    for byte in data {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV64_PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_hash_known_values() {
        // FNV-1a reference vectors.
        assert_eq!(name_hash(""), 0x811c9dc5);
        assert_eq!(name_hash("a"), 0xe40c292c);
        assert_eq!(name_hash("foobar"), 0xbf9cf968);
    }

    #[test]
    fn test_name_hash_is_stable() {
        assert_eq!(name_hash("TexFilterQuality"), name_hash("TexFilterQuality"));
    }

    #[test]
    fn test_name_hash_distinguishes_qualified_names() {
        assert_ne!(name_hash("Debug.LogLevel"), name_hash("LogLevel"));
    }

    #[test]
    fn test_blob_hash_known_values() {
        assert_eq!(blob_hash(b""), 0xcbf29ce484222325);
        assert_eq!(blob_hash(b"foobar"), 0x85944171f73967e8);
    }
}
