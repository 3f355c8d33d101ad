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

use tss_esapi::{interface_types::{algorithm::{HashingAlgorithm, PublicAlgorithm}, ecc::EccCurve}, structures::{EccParameter, EccPoint, EccScheme, HashScheme, Public, PublicBuilder, PublicEccParametersBuilder}};

use crate::session::{error::TpmBenchError, tpm_session::TpmSession};

use super::{sign_verify::{create_sign_verify, signing_key_attributes}, ScenarioExecutor};

/// Create a NIST P-256 primary key, sign with ECDSA and verify
pub struct EccSignVerify;

/// P-256 ECDSA/SHA-256 signing key template, `seed` placed in the X coordinate
pub(crate) fn ecc_signing_template(seed: &[u8]) -> Result<Public, TpmBenchError> {
    let parameters = PublicEccParametersBuilder::new_unrestricted_signing_key(
        EccScheme::EcDsa(HashScheme::new(HashingAlgorithm::Sha256)), EccCurve::NistP256).build()?;
    let x = EccParameter::from_bytes(seed)?;

    Ok(PublicBuilder::new()
        .with_public_algorithm(PublicAlgorithm::Ecc)
        .with_name_hashing_algorithm(HashingAlgorithm::Sha256)
        .with_object_attributes(signing_key_attributes()?)
        .with_ecc_parameters(parameters)
        .with_ecc_unique_identifier(EccPoint::new(x, EccParameter::default()))
        .build()?)
}

impl ScenarioExecutor for EccSignVerify {
    fn run_once(&self, session: &mut dyn TpmSession) -> Result<(), TpmBenchError> {
        create_sign_verify(session, ecc_signing_template)
    }
}
