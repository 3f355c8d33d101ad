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

use sha2::{Digest as _, Sha256};
use tss_esapi::{handles::PcrHandle, interface_types::algorithm::HashingAlgorithm, structures::{Digest, DigestValues}};

use crate::session::{error::TpmBenchError, tpm_session::TpmSession};

use super::ScenarioExecutor;

/// Event data measured into the PCR
pub const MEASUREMENT: &[u8] = b"measurement";

/// Extend PCR 0 with a fixed measurement.
///
/// The measurement is hashed on the host and only the SHA-256 bank is extended,
/// unlike TPM2_PCR_Event which hashes the event into every allocated bank.
pub struct PcrExtend;

/// SHA-256 bank digest of the measurement, as TPM2_PCR_Event would compute it
pub(crate) fn measurement_digests() -> Result<DigestValues, TpmBenchError> {
    let mut digests = DigestValues::new();
    digests.set(HashingAlgorithm::Sha256, Digest::try_from(Sha256::digest(MEASUREMENT).to_vec())?);
    Ok(digests)
}

impl ScenarioExecutor for PcrExtend {
    fn run_once(&self, session: &mut dyn TpmSession) -> Result<(), TpmBenchError> {
        session.pcr_extend(PcrHandle::Pcr0, measurement_digests()?)
    }
}

#[cfg(test)]
mod tests{
    use tss_esapi::handles::PcrHandle;

    use crate::{scenarios::ScenarioExecutor, session::{error::TpmBenchError, mock::{MockTpm, TpmCommand}}};

    use super::{measurement_digests, PcrExtend};

    #[test]
    fn test_measurement_digest(){
        assert!(measurement_digests().is_ok());
    }

    #[test]
    fn test_pcr_extend(){
        let mut tpm = MockTpm::new();
        for _ in 0..10 {
            PcrExtend.run_once(&mut tpm).unwrap();
        }

        assert_eq!(tpm.count(TpmCommand::PcrExtend), 10);
        assert_eq!(tpm.count(TpmCommand::CreatePrimary), 0);
        assert_eq!(tpm.extended(), &[PcrHandle::Pcr0; 10]);
        assert_eq!(tpm.live_objects(), 0);
    }

    #[test]
    fn test_pcr_extend_failure(){
        let mut tpm = MockTpm::new().fail_on(1);
        assert!(matches!(PcrExtend.run_once(&mut tpm), Err(TpmBenchError::TSSError(_))));
    }
}
