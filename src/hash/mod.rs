//! Hashing utilities

use crate::types::SyncError;
use md5::{Digest as _, Md5};
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use xxhash_rust::xxh3::Xxh3;

/// Read size used when streaming a file through a hasher
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Content digest algorithm used to decide whether two files differ.
///
/// Digests are only compared for equality, never trusted for integrity
/// against an adversary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// Blake3 (default)
    #[default]
    Blake3,

    /// MD5, digest-compatible with older mirroring scripts
    Md5,

    /// XXH3-128, non-cryptographic and fastest
    Xxh3,
}

impl HashAlgorithm {
    fn hasher(self) -> StreamHasher {
        match self {
            HashAlgorithm::Blake3 => StreamHasher::Blake3(Box::new(blake3::Hasher::new())),
            HashAlgorithm::Md5 => StreamHasher::Md5(Md5::new()),
            HashAlgorithm::Xxh3 => StreamHasher::Xxh3(Box::new(Xxh3::new())),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HashAlgorithm::Blake3 => "blake3",
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Xxh3 => "xxh3",
        };
        f.write_str(name)
    }
}

enum StreamHasher {
    Blake3(Box<blake3::Hasher>),
    Md5(Md5),
    Xxh3(Box<Xxh3>),
}

impl StreamHasher {
    fn update(&mut self, data: &[u8]) {
        match self {
            StreamHasher::Blake3(h) => {
                h.update(data);
            }
            StreamHasher::Md5(h) => h.update(data),
            StreamHasher::Xxh3(h) => h.update(data),
        }
    }

    fn finalize(self) -> Digest {
        let bytes = match self {
            StreamHasher::Blake3(h) => h.finalize().as_bytes().to_vec(),
            StreamHasher::Md5(h) => h.finalize().to_vec(),
            StreamHasher::Xxh3(h) => h.digest128().to_be_bytes().to_vec(),
        };
        Digest(bytes)
    }
}

/// Final digest bytes of one file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest(Vec<u8>);

impl Digest {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Compute the digest of a file
///
/// The file is streamed in 64KB chunks for memory efficiency.
///
/// # Arguments
/// * `file_path` - Path to the file to hash
/// * `algorithm` - Digest algorithm
///
/// # Returns
/// * `Ok(Digest)` - Digest bytes (32 for blake3, 16 for md5 and xxh3)
/// * `Err(SyncError::Hash)` - The file could not be opened or read
///
/// # Example
/// ```no_run
/// use replika::hash::{compute_hash, HashAlgorithm};
/// use std::path::Path;
///
/// let digest = compute_hash(Path::new("file.txt"), HashAlgorithm::Blake3)?;
/// println!("{digest}");
/// # Ok::<(), replika::SyncError>(())
/// ```
pub fn compute_hash(file_path: &Path, algorithm: HashAlgorithm) -> Result<Digest, SyncError> {
    let hash_error = |source| SyncError::Hash {
        path: file_path.to_path_buf(),
        source,
    };

    let mut file = File::open(file_path).map_err(hash_error)?;
    let mut hasher = algorithm.hasher();
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        let bytes_read = file.read(&mut buffer).map_err(hash_error)?;

        if bytes_read == 0 {
            break; // EOF
        }

        hasher.update(&buffer[0..bytes_read]);
    }

    Ok(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_with(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_hash_empty_file() {
        let temp_file = temp_with(b"");

        let hash = compute_hash(temp_file.path(), HashAlgorithm::Blake3).unwrap();
        assert_eq!(hash.len(), 32);
        assert_eq!(
            hash.to_string(),
            "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
        );
    }

    #[test]
    fn test_md5_matches_reference_digest() {
        let temp_file = temp_with(b"hello");

        let hash = compute_hash(temp_file.path(), HashAlgorithm::Md5).unwrap();
        assert_eq!(hash.to_string(), "5d41402abc4b2a76b9719d911017c592");
    }

    #[test]
    fn test_output_sizes() {
        let temp_file = temp_with(b"sized");

        for (algorithm, size) in [
            (HashAlgorithm::Blake3, 32),
            (HashAlgorithm::Md5, 16),
            (HashAlgorithm::Xxh3, 16),
        ] {
            let hash = compute_hash(temp_file.path(), algorithm).unwrap();
            assert_eq!(hash.len(), size, "{algorithm}");
        }
    }

    #[test]
    fn test_hash_deterministic() {
        let content = b"Test content for hashing";
        let file1 = temp_with(content);
        let file2 = temp_with(content);

        for algorithm in [HashAlgorithm::Blake3, HashAlgorithm::Md5, HashAlgorithm::Xxh3] {
            let hash1 = compute_hash(file1.path(), algorithm).unwrap();
            let hash2 = compute_hash(file2.path(), algorithm).unwrap();
            assert_eq!(hash1, hash2, "{algorithm}");
        }
    }

    #[test]
    fn test_hash_different_content() {
        let file1 = temp_with(b"Content A");
        let file2 = temp_with(b"Content B");

        for algorithm in [HashAlgorithm::Blake3, HashAlgorithm::Md5, HashAlgorithm::Xxh3] {
            let hash1 = compute_hash(file1.path(), algorithm).unwrap();
            let hash2 = compute_hash(file2.path(), algorithm).unwrap();
            assert_ne!(hash1, hash2, "{algorithm}");
        }
    }

    #[test]
    fn test_difference_past_first_chunk_is_detected() {
        let mut a = vec![7u8; CHUNK_SIZE * 3];
        let file1 = temp_with(&a);
        a[CHUNK_SIZE * 2 + 5] = 8;
        let file2 = temp_with(&a);

        let hash1 = compute_hash(file1.path(), HashAlgorithm::Xxh3).unwrap();
        let hash2 = compute_hash(file2.path(), HashAlgorithm::Xxh3).unwrap();
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_hash_nonexistent_file() {
        let path = Path::new("/nonexistent/file.txt");
        let result = compute_hash(path, HashAlgorithm::Blake3);

        match result {
            Err(err @ SyncError::Hash { .. }) => assert!(err.is_not_found()),
            other => panic!("expected hash error, got {other:?}"),
        }
    }

    #[test]
    fn test_algorithm_display_names() {
        assert_eq!(HashAlgorithm::default(), HashAlgorithm::Blake3);
        assert_eq!(HashAlgorithm::Md5.to_string(), "md5");
        assert_eq!(HashAlgorithm::Xxh3.to_string(), "xxh3");
    }
}
