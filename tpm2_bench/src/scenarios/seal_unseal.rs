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

use tss_esapi::{attributes::ObjectAttributesBuilder, interface_types::algorithm::{HashingAlgorithm, PublicAlgorithm}, structures::{Auth, Digest, KeyedHashScheme, Public, PublicBuilder, PublicKeyedHashParameters, SensitiveData}};

use crate::session::{error::TpmBenchError, tpm_session::TpmSession, transient_object::TransientObject};

use super::{ScenarioExecutor, AUTH_VALUE};

/// Payload sealed at object creation
pub const SEALED_PAYLOAD: &[u8] = b"secrets";

/// Seal a payload in a primary keyed-hash object, then unseal it with its password
pub struct SealUnseal;

/// Public template of the sealed data object.
///
/// The object is bound to this TPM and parent, requires its password and is
/// exempt from dictionary attack lockout. The sensitive data is provided by the
/// caller, so it does not originate in the TPM.
pub(crate) fn sealed_object_template() -> Result<Public, TpmBenchError> {
    let attributes = ObjectAttributesBuilder::new()
        .with_fixed_tpm(true)
        .with_fixed_parent(true)
        .with_sensitive_data_origin(false)
        .with_user_with_auth(true)
        .with_no_da(true)
        .build()?;

    Ok(PublicBuilder::new()
        .with_public_algorithm(PublicAlgorithm::KeyedHash)
        .with_name_hashing_algorithm(HashingAlgorithm::Sha256)
        .with_object_attributes(attributes)
        .with_keyed_hash_parameters(PublicKeyedHashParameters::new(KeyedHashScheme::Null))
        .with_keyed_hash_unique_identifier(Digest::default())
        .build()?)
}

impl ScenarioExecutor for SealUnseal {
    fn run_once(&self, session: &mut dyn TpmSession) -> Result<(), TpmBenchError> {
        let public = sealed_object_template()?;
        let auth = Auth::try_from(AUTH_VALUE.to_vec())?;
        let payload = SensitiveData::try_from(SEALED_PAYLOAD.to_vec())?;

        let mut object = TransientObject::create_primary(session, public, Some(auth.clone()), Some(payload))?;
        let handle = object.handle();
        let unsealed = object.session().unseal(handle, auth)?;

        if unsealed.as_slice() != SEALED_PAYLOAD {
            return Err(TpmBenchError::CorrectnessError("incorrect data unsealed".to_owned()));
        }
        Ok(())
    }
}
