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

use log::debug;
use tss_esapi::{attributes::{ObjectAttributes, ObjectAttributesBuilder}, structures::{Digest, Public, SignatureScheme}};

use crate::session::{error::TpmBenchError, tpm_session::TpmSession, transient_object::TransientObject};

/// Bytes of TPM randomness used as `unique` field of each primary key
pub const SEED_SIZE: usize = 4;

/// Size of the all-zero SHA-256 digest being signed
pub const DIGEST_SIZE: usize = 32;

/// Attributes of the primary signing keys: bound to this TPM and parent,
/// generated inside the TPM, usable without password and exempt from lockout.
pub(crate) fn signing_key_attributes() -> Result<ObjectAttributes, TpmBenchError> {
    Ok(ObjectAttributesBuilder::new()
        .with_fixed_tpm(true)
        .with_fixed_parent(true)
        .with_sensitive_data_origin(true)
        .with_sign_encrypt(true)
        .with_user_with_auth(true)
        .with_no_da(true)
        .build()?)
}

/// Create a primary signing key seeded with TPM randomness, sign a zero digest
/// and verify the signature with the same key.
///
/// Seeding the `unique` field keeps each iteration's key independent from the previous ones.
pub(crate) fn create_sign_verify<F>(session: &mut dyn TpmSession, template: F) -> Result<(), TpmBenchError>
where
    F: FnOnce(&[u8]) -> Result<Public, TpmBenchError>
{
    let seed = session.get_random(SEED_SIZE)?;
    let public = template(&seed)?;

    let mut key = TransientObject::create_primary(session, public, None, None)?;
    let handle = key.handle();

    let digest = Digest::try_from(vec![0u8; DIGEST_SIZE])?;
    // Null scheme: the key's own scheme is used
    let signature = key.session().sign(handle, digest.clone(), SignatureScheme::Null)?;
    key.session().verify_signature(handle, digest, signature)?;
    debug!("Signature verified with key {handle:?}");

    Ok(())
}
