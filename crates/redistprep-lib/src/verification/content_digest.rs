use digest::{Digest, DynDigest};
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigestParseError {
    #[error("Unsupported digest algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Invalid hex digest value: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Digest length mismatch for {algorithm}: expected {expected} bytes, got {actual}")]
    LengthMismatch {
        algorithm: &'static str,
        expected: usize,
        actual: usize,
    },
}

#[derive(Error, Debug)]
pub enum VerificationError {
    #[error("Verification failed: expected {}, got {}",
        hex::encode(.expected),
        hex::encode(.actual)
    )]
    VerificationFailed { expected: Vec<u8>, actual: Vec<u8> },
}

/// An expected content digest for a downloaded artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentDigest {
    Md5(Vec<u8>),
    Sha1(Vec<u8>),
    Sha256(Vec<u8>),
    Sha384(Vec<u8>),
    Sha512(Vec<u8>),
}

impl ContentDigest {
    /// Parses an `algorithm` / hex value pair, e.g. `("sha256", "9f86d0…")`.
    pub fn from_hex(algorithm: &str, hex_value: &str) -> Result<Self, DigestParseError> {
        let value = hex::decode(hex_value)?;
        let (name, expected_len, build): (&'static str, usize, fn(Vec<u8>) -> Self) =
            match algorithm.to_ascii_lowercase().as_str() {
                "md5" => ("md5", 16, Self::Md5),
                "sha1" => ("sha1", 20, Self::Sha1),
                "sha256" => ("sha256", 32, Self::Sha256),
                "sha384" => ("sha384", 48, Self::Sha384),
                "sha512" => ("sha512", 64, Self::Sha512),
                other => return Err(DigestParseError::UnsupportedAlgorithm(other.to_string())),
            };
        if value.len() != expected_len {
            return Err(DigestParseError::LengthMismatch {
                algorithm: name,
                expected: expected_len,
                actual: value.len(),
            });
        }
        Ok(build(value))
    }

    pub fn algorithm(&self) -> &'static str {
        match self {
            ContentDigest::Md5(_) => "md5",
            ContentDigest::Sha1(_) => "sha1",
            ContentDigest::Sha256(_) => "sha256",
            ContentDigest::Sha384(_) => "sha384",
            ContentDigest::Sha512(_) => "sha512",
        }
    }

    pub fn digest_hex(&self) -> String {
        hex::encode(self.expected_bytes())
    }

    fn expected_bytes(&self) -> &[u8] {
        match self {
            ContentDigest::Md5(v)
            | ContentDigest::Sha1(v)
            | ContentDigest::Sha256(v)
            | ContentDigest::Sha384(v)
            | ContentDigest::Sha512(v) => v,
        }
    }
}

/// Streaming verifier: feed downloaded chunks through `update`, then call
/// `verify` once the transfer is complete.
pub struct ContentDigestVerifier {
    hasher: Box<dyn DynDigest + Send>,
    expected_digest: Vec<u8>,
}

impl ContentDigestVerifier {
    pub fn new(content_digest: ContentDigest) -> Self {
        let hasher: Box<dyn DynDigest + Send> = match &content_digest {
            ContentDigest::Md5(_) => Box::new(Md5::new()),
            ContentDigest::Sha1(_) => Box::new(Sha1::new()),
            ContentDigest::Sha256(_) => Box::new(Sha256::new()),
            ContentDigest::Sha384(_) => Box::new(Sha384::new()),
            ContentDigest::Sha512(_) => Box::new(Sha512::new()),
        };
        Self {
            hasher,
            expected_digest: content_digest.expected_bytes().to_vec(),
        }
    }

    #[inline]
    pub fn update(&mut self, data: impl AsRef<[u8]>) {
        self.hasher.update(data.as_ref());
    }

    pub fn verify(self) -> Result<(), VerificationError> {
        let actual_digest = self.hasher.finalize().to_vec();

        if actual_digest == self.expected_digest {
            Ok(())
        } else {
            Err(VerificationError::VerificationFailed {
                expected: self.expected_digest,
                actual: actual_digest,
            })
        }
    }
}
