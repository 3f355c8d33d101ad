// Copyright 2025 Fondazione LINKS
 
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
 
//     http://www.apache.org/licenses/LICENSE-2.0
 
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use tss_esapi::{constants::StartupType, handles::{KeyHandle, PcrHandle}, structures::{Auth, Digest, DigestValues, Public, SensitiveData, Signature, SignatureScheme}};
use zeroize::Zeroizing;

use super::error::TpmBenchError;

/// An open command channel to a TPM 2.0.
///
/// Every method is exactly one blocking request/response round-trip to the TPM.
/// Implementations never run two commands concurrently; callers hold the session
/// mutably for the whole iteration.
pub trait TpmSession {
    /// Issue TPM2_Startup
    fn startup(&mut self, startup_type: StartupType) -> Result<(), TpmBenchError>;

    /// Retrieve `size` random bytes from the TPM TRNG
    fn get_random(&mut self, size: usize) -> Result<Vec<u8>, TpmBenchError>;

    /// Create a transient primary object under the owner hierarchy.
    ///
    /// `auth` becomes the object's user authorization value and `sensitive`
    /// its initial sensitive data. The returned handle must be flushed by the caller.
    fn create_primary(&mut self, public: Public, auth: Option<Auth>, sensitive: Option<SensitiveData>) -> Result<KeyHandle, TpmBenchError>;

    /// Disclose the sensitive data of a sealed object, presenting `auth` as password
    fn unseal(&mut self, object: KeyHandle, auth: Auth) -> Result<Zeroizing<Vec<u8>>, TpmBenchError>;

    /// Extend a PCR with the provided digests
    fn pcr_extend(&mut self, pcr: PcrHandle, digests: DigestValues) -> Result<(), TpmBenchError>;

    /// Sign a digest with a loaded key, using a null hash-check ticket
    fn sign(&mut self, key: KeyHandle, digest: Digest, scheme: SignatureScheme) -> Result<Signature, TpmBenchError>;

    /// Verify a signature over `digest` with a loaded key.
    /// Succeeds only if the TPM issues a verified ticket.
    fn verify_signature(&mut self, key: KeyHandle, digest: Digest, signature: Signature) -> Result<(), TpmBenchError>;

    /// Release a transient object from the TPM memory
    fn flush_context(&mut self, object: KeyHandle) -> Result<(), TpmBenchError>;
}

/// Check that a random request fits in a single TPM2B_DIGEST
pub(crate) fn check_random_size(size: usize) -> Result<(), TpmBenchError> {
    if size > Digest::MAX_SIZE {
        return Err(TpmBenchError::InputError { name: "size".to_owned(),
            value: size.to_string(),
            reason: format!("Random size cannot exceed {0}", Digest::MAX_SIZE) })
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tss_esapi::structures::Digest;

    use crate::session::error::TpmBenchError;

    use super::check_random_size;

    #[test]
    fn test_random_size(){
        assert!(check_random_size(4).is_ok());
        assert!(check_random_size(Digest::MAX_SIZE).is_ok());
    }

    #[test]
    fn test_too_big_random(){
        let result = check_random_size(1024);
        assert_eq!(result.err(), Some(TpmBenchError::InputError { name: "size".to_owned(),
            value: 1024.to_string(),
            reason: format!("Random size cannot exceed {0}", Digest::MAX_SIZE) }))
    }
}
