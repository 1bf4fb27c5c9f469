//! Streaming content hasher.
//!
//! # Overview
//! This module provides the [`Hasher`] struct for turning a file's bytes into a
//! [`Fingerprint`] without loading the file into memory. The file is read in
//! fixed-size chunks and each chunk is fed into an incremental digest.
//!
//! # Algorithms
//! - [`HashAlgorithm::Md5`] (default): fast 128-bit digest. Collisions are only
//!   a concern for deliberately crafted inputs, which are out of scope here.
//! - [`HashAlgorithm::Sha256`] and [`HashAlgorithm::Blake3`]: 256-bit digests
//!   for when stronger collision resistance is wanted.
//!
//! # Example
//!
//! ```no_run
//! use dupfind::scanner::{HashAlgorithm, Hasher};
//! use std::path::Path;
//!
//! let hasher = Hasher::new(HashAlgorithm::Sha256).with_buffer_size(8 * 1024);
//! let fingerprint = hasher.fingerprint(Path::new("Cargo.toml")).unwrap();
//! assert_eq!(fingerprint.as_str().len(), 64);
//! ```

use std::fmt::{self, Write as _};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::HashError;
use crate::config::ConfigError;

/// Default read chunk size (64 KiB).
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Lowercase hexadecimal content digest of a file.
///
/// Two files have equal fingerprints when their contents are byte-identical
/// (collisions aside).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Render raw digest bytes as a fingerprint.
    #[must_use]
    pub fn from_digest(bytes: &[u8]) -> Self {
        let mut hex = String::with_capacity(bytes.len() * 2);
        for byte in bytes {
            // Writing to a String cannot fail
            let _ = write!(hex, "{byte:02x}");
        }
        Self(hex)
    }

    /// The hexadecimal string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the fingerprint, returning the hexadecimal string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Content digest used to fingerprint files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum HashAlgorithm {
    /// MD5 (128-bit)
    #[default]
    Md5,
    /// SHA-256 (256-bit)
    Sha256,
    /// BLAKE3 (256-bit)
    Blake3,
}

impl HashAlgorithm {
    /// All supported algorithms.
    pub const ALL: [HashAlgorithm; 3] = [Self::Md5, Self::Sha256, Self::Blake3];

    /// Canonical lowercase name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha256 => "sha256",
            Self::Blake3 => "blake3",
        }
    }

    /// Digest length in bytes.
    #[must_use]
    pub fn digest_len(self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha256 | Self::Blake3 => 32,
        }
    }

    /// Length of a fingerprint produced by this algorithm.
    #[must_use]
    pub fn hex_len(self) -> usize {
        self.digest_len() * 2
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "").as_str() {
            "md5" => Ok(Self::Md5),
            "sha256" => Ok(Self::Sha256),
            "blake3" => Ok(Self::Blake3),
            _ => Err(ConfigError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

impl TryFrom<String> for HashAlgorithm {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HashAlgorithm> for String {
    fn from(algorithm: HashAlgorithm) -> Self {
        algorithm.name().to_string()
    }
}

/// Incremental digest state for one file.
enum Accumulator {
    Md5(md5::Context),
    Sha256(Sha256),
    Blake3(Box<blake3::Hasher>),
}

impl Accumulator {
    fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Md5 => Self::Md5(md5::Context::new()),
            HashAlgorithm::Sha256 => Self::Sha256(Sha256::new()),
            HashAlgorithm::Blake3 => Self::Blake3(Box::new(blake3::Hasher::new())),
        }
    }

    fn update(&mut self, chunk: &[u8]) {
        match self {
            Self::Md5(ctx) => ctx.consume(chunk),
            Self::Sha256(sha) => sha.update(chunk),
            Self::Blake3(hasher) => {
                hasher.update(chunk);
            }
        }
    }

    fn finalize(self) -> Fingerprint {
        match self {
            Self::Md5(ctx) => Fingerprint::from_digest(&ctx.compute().0),
            Self::Sha256(sha) => Fingerprint::from_digest(sha.finalize().as_slice()),
            Self::Blake3(hasher) => Fingerprint::from_digest(hasher.finalize().as_bytes()),
        }
    }
}

/// Streaming file hasher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hasher {
    algorithm: HashAlgorithm,
    buffer_size: usize,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new(HashAlgorithm::default())
    }
}

impl Hasher {
    /// Create a hasher for the given algorithm with the default chunk size.
    #[must_use]
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Set the read chunk size. Values below 1 are clamped to 1.
    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    /// Algorithm in use.
    #[must_use]
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Read chunk size in bytes.
    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Compute the fingerprint of a file.
    ///
    /// # Errors
    ///
    /// - [`HashError::NotFound`] if the file no longer exists
    /// - [`HashError::PermissionDenied`] if it cannot be opened for reading
    /// - [`HashError::Io`] for any other open failure or a read error mid-stream
    pub fn fingerprint(&self, path: &Path) -> Result<Fingerprint, HashError> {
        self.fingerprint_counted(path).map(|(fingerprint, _)| fingerprint)
    }

    /// Compute the fingerprint of a file along with the number of bytes read.
    ///
    /// The count is what was actually hashed, which can differ from the size
    /// seen at discovery if the file changed in between.
    ///
    /// # Errors
    ///
    /// Same as [`Hasher::fingerprint`].
    pub fn fingerprint_counted(&self, path: &Path) -> Result<(Fingerprint, u64), HashError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => HashError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => HashError::PermissionDenied(path.to_path_buf()),
            _ => HashError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let (fingerprint, bytes) = self.digest(file).map_err(|source| HashError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        log::trace!("{} {}", fingerprint, path.display());
        Ok((fingerprint, bytes))
    }

    /// Compute the fingerprint of everything `reader` yields until EOF.
    ///
    /// # Errors
    ///
    /// Returns the first read error other than [`io::ErrorKind::Interrupted`].
    pub fn fingerprint_reader<R: Read>(&self, reader: R) -> io::Result<Fingerprint> {
        self.digest(reader).map(|(fingerprint, _)| fingerprint)
    }

    fn digest<R: Read>(&self, mut reader: R) -> io::Result<(Fingerprint, u64)> {
        let mut accumulator = Accumulator::new(self.algorithm);
        let mut buffer = vec![0u8; self.buffer_size];
        let mut total = 0u64;

        loop {
            match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => {
                    accumulator.update(&buffer[..n]);
                    total += n as u64;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        Ok((accumulator.finalize(), total))
    }
}
