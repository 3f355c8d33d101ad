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
use tss_esapi::{constants::{structure_tags::StructureTag, StartupType}, handles::{KeyHandle, PcrHandle}, interface_types::{reserved_handles::Hierarchy, session_handles::AuthSession}, structures::{Auth, Digest, DigestValues, Public, SensitiveData, Signature, SignatureScheme, Ticket}, Context};
use zeroize::Zeroizing;

use super::{error::TpmBenchError, tpm_session::{check_random_size, TpmSession}, tpm_session_config::TpmSessionConfig};

/// [TpmSession] backed by the TSS 2.0 ESAPI wrapper.
///
/// The connection is opened once and kept for the whole benchmark run.
pub struct EsapiSession{
    ctx: Context
}

impl EsapiSession{
    /// Connect to the TPM 2.0 pointed by the provided configuration
    /// ### Examples
    /// ```no_run
    /// use tpm2_bench::session::{esapi_session::EsapiSession, tpm_session_config::TpmSessionConfig};
    /// use std::str::FromStr;
    ///
    /// let config = TpmSessionConfig::from_str("mssim:host=127.0.0.1,port=2321").unwrap();
    /// let session = EsapiSession::connect(config).unwrap();
    /// session.close();
    /// ```
    pub fn connect(config: TpmSessionConfig) -> Result<Self, TpmBenchError>{
        let ctx = Context::new(config)
            .map_err(TpmBenchError::ConnectionError)?;
        debug!("Connected to TPM");
        Ok(EsapiSession { ctx })
    }

    /// Tear down the connection
    pub fn close(self){
        debug!("Closing TPM connection");
        drop(self.ctx);
    }
}

impl TpmSession for EsapiSession{
    fn startup(&mut self, startup_type: StartupType) -> Result<(), TpmBenchError> {
        Ok(self.ctx.startup(startup_type)?)
    }

    fn get_random(&mut self, size: usize) -> Result<Vec<u8>, TpmBenchError> {
        check_random_size(size)?;
        let random = self.ctx.get_random(size)?;

        Ok(random.to_vec())
    }

    fn create_primary(&mut self, public: Public, auth: Option<Auth>, sensitive: Option<SensitiveData>) -> Result<KeyHandle, TpmBenchError> {
        // Owner hierarchy auth is empty
        let primary = self.ctx.execute_with_nullauth_session(|context|{
            context.create_primary(Hierarchy::Owner, public, auth, sensitive, None, None)
        })?;
        Ok(primary.key_handle)
    }

    fn unseal(&mut self, object: KeyHandle, auth: Auth) -> Result<Zeroizing<Vec<u8>>, TpmBenchError> {
        self.ctx.tr_set_auth(object.into(), auth)?;
        let data = self.ctx.execute_with_session(Some(AuthSession::Password), |context| {
            context.unseal(object.into())
        })?;

        Ok(Zeroizing::new(data.value().to_vec()))
    }

    fn pcr_extend(&mut self, pcr: PcrHandle, digests: DigestValues) -> Result<(), TpmBenchError> {
        Ok(self.ctx.execute_with_nullauth_session(|context| {
            context.pcr_extend(pcr, digests)
        })?)
    }

    fn sign(&mut self, key: KeyHandle, digest: Digest, scheme: SignatureScheme) -> Result<Signature, TpmBenchError> {
        Ok(self.ctx.execute_with_nullauth_session(|context| {
            context.sign(key, digest, scheme, None)
        })?)
    }

    fn verify_signature(&mut self, key: KeyHandle, digest: Digest, signature: Signature) -> Result<(), TpmBenchError> {
        let ticket = self.ctx.verify_signature(key, digest, signature)?;
        if ticket.tag() != StructureTag::Verified {
            return Err(TpmBenchError::CorrectnessError(format!("signature not verified, ticket tag {:?}", ticket.tag())));
        }
        Ok(())
    }

    fn flush_context(&mut self, object: KeyHandle) -> Result<(), TpmBenchError> {
        Ok(self.ctx.flush_context(object.into())?)
    }
}
