use super::metadata::MetadataReader;
use super::signature::SignatureVerifier;
use super::wildcard::wildcard_match;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Expected identity of a valid runtime redistributable artifact.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct ValidationPolicy {
    pub publisher: String,
    pub issuer: String,
    pub check_root_of_trust: bool,
    pub description_pattern: String,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            publisher: "Microsoft Corporation".to_string(),
            issuer: "Microsoft Code Signing PCA*".to_string(),
            check_root_of_trust: true,
            description_pattern: "Microsoft Visual C++*".to_string(),
        }
    }
}

/// Validates a downloaded artifact before it is launched.
///
/// All checks are mandatory and short-circuit on the first failure. The
/// result is a plain pass/fail; the specific cause is only recorded in the
/// log, since callers stop on any failure regardless of the reason.
pub struct ArtifactValidator<'a> {
    signature: &'a dyn SignatureVerifier,
    metadata: &'a dyn MetadataReader,
    policy: ValidationPolicy,
}

impl<'a> ArtifactValidator<'a> {
    pub fn new(
        signature: &'a dyn SignatureVerifier,
        metadata: &'a dyn MetadataReader,
        policy: ValidationPolicy,
    ) -> Self {
        Self {
            signature,
            metadata,
            policy,
        }
    }

    pub async fn validate(&self, path: &Path) -> bool {
        if !path.exists() {
            warn!(path = %path.display(), "Validation failed: file does not exist");
            return false;
        }

        match self
            .signature
            .verify_signature(
                path,
                &self.policy.publisher,
                &self.policy.issuer,
                self.policy.check_root_of_trust,
            )
            .await
        {
            Ok(0) => {
                debug!(path = %path.display(), "Signature verified");
            }
            Ok(code) => {
                warn!(
                    path = %path.display(),
                    code,
                    "Validation failed: signature verifier returned non-zero verdict"
                );
                return false;
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Validation failed: signature check errored");
                return false;
            }
        }

        match self.metadata.product_description(path).await {
            Ok(description) => {
                if wildcard_match(&self.policy.description_pattern, &description) {
                    debug!(path = %path.display(), description, "Product description matches");
                    true
                } else {
                    warn!(
                        path = %path.display(),
                        description,
                        pattern = %self.policy.description_pattern,
                        "Validation failed: product description does not match expected pattern"
                    );
                    false
                }
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Validation failed: could not read product description");
                false
            }
        }
    }
}
