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

use tss_esapi::{interface_types::{algorithm::{HashingAlgorithm, PublicAlgorithm, RsaSchemeAlgorithm}, key_bits::RsaKeyBits}, structures::{Public, PublicBuilder, PublicKeyRsa, PublicRsaParametersBuilder, RsaExponent, RsaScheme}};

use crate::session::{error::TpmBenchError, tpm_session::TpmSession};

use super::{sign_verify::{create_sign_verify, signing_key_attributes}, ScenarioExecutor};

/// Create an RSA-2048 primary key, sign with RSASSA-PSS and verify
pub struct RsaSignVerify;

/// RSA-2048 PSS/SHA-256 signing key template, `seed` placed in the public modulus field
pub(crate) fn rsa_signing_template(seed: &[u8]) -> Result<Public, TpmBenchError> {
    let scheme = RsaScheme::create(RsaSchemeAlgorithm::RsaPss, Some(HashingAlgorithm::Sha256))?;
    let parameters = PublicRsaParametersBuilder::new_unrestricted_signing_key(scheme, RsaKeyBits::Rsa2048, RsaExponent::default())
        .build()?;

    Ok(PublicBuilder::new()
        .with_public_algorithm(PublicAlgorithm::Rsa)
        .with_name_hashing_algorithm(HashingAlgorithm::Sha256)
        .with_object_attributes(signing_key_attributes()?)
        .with_rsa_parameters(parameters)
        .with_rsa_unique_identifier(PublicKeyRsa::try_from(seed.to_vec())?)
        .build()?)
}

impl ScenarioExecutor for RsaSignVerify {
    fn run_once(&self, session: &mut dyn TpmSession) -> Result<(), TpmBenchError> {
        create_sign_verify(session, rsa_signing_template)
    }
}
