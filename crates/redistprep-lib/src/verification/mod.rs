mod content_digest;
mod metadata;
mod signature;
mod validator;
mod wildcard;

pub use content_digest::{ContentDigest, ContentDigestVerifier, DigestParseError, VerificationError};
pub use metadata::{CliMetadataReader, MetadataError, MetadataReader};
pub use signature::{CliSignatureVerifier, SignatureError, SignatureVerifier};
pub use validator::{ArtifactValidator, ValidationPolicy};
pub use wildcard::wildcard_match;
