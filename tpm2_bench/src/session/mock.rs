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

//! In-memory [TpmSession] used by the unit tests.
//!
//! It keeps track of live transient objects, records every command it receives
//! and can fail the Nth command to exercise error paths.

use sha2::{Digest as _, Sha256};
use tss_esapi::{constants::StartupType, handles::{KeyHandle, PcrHandle}, interface_types::algorithm::HashingAlgorithm, structures::{Auth, Digest, DigestValues, HashAgile, Public, SensitiveData, Signature, SignatureScheme}, tss2_esys::ESYS_TR, WrapperErrorKind};
use zeroize::Zeroizing;

use super::{error::TpmBenchError, tpm_session::{check_random_size, TpmSession}};

/// Transient object slots of a typical TPM
const MAX_OBJECTS: usize = 3;
const FIRST_HANDLE: ESYS_TR = 0x4000_0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TpmCommand{
    Startup,
    GetRandom,
    CreatePrimary,
    Unseal,
    PcrExtend,
    Sign,
    VerifySignature,
    FlushContext
}

struct MockObject{
    handle: ESYS_TR,
    public: Public,
    auth: Vec<u8>,
    sensitive: Vec<u8>
}

pub(crate) struct MockTpm{
    commands: Vec<TpmCommand>,
    objects: Vec<MockObject>,
    created: Vec<Public>,
    extended: Vec<PcrHandle>,
    next_handle: ESYS_TR,
    random_counter: u8,
    fail_on: Option<usize>,
    reject_startup: bool,
    tamper_unseal: bool
}

impl MockTpm{
    pub(crate) fn new() -> Self {
        MockTpm {
            commands: Vec::new(),
            objects: Vec::new(),
            created: Vec::new(),
            extended: Vec::new(),
            next_handle: FIRST_HANDLE,
            random_counter: 0,
            fail_on: None,
            reject_startup: false,
            tamper_unseal: false
        }
    }

    /// Fail the n-th command received (1-based) with a TSS error
    pub(crate) fn fail_on(mut self, n: usize) -> Self {
        self.fail_on = Some(n);
        self
    }

    /// Reject TPM2_Startup as an already initialized TPM does
    pub(crate) fn reject_startup(mut self) -> Self {
        self.reject_startup = true;
        self
    }

    /// Return corrupted data on unseal
    pub(crate) fn tamper_unseal(mut self) -> Self {
        self.tamper_unseal = true;
        self
    }

    pub(crate) fn commands(&self) -> &[TpmCommand] {
        &self.commands
    }

    pub(crate) fn count(&self, command: TpmCommand) -> usize {
        self.commands.iter().filter(|c| **c == command).count()
    }

    pub(crate) fn live_objects(&self) -> usize {
        self.objects.len()
    }

    /// Public templates of every object created so far
    pub(crate) fn created(&self) -> &[Public] {
        &self.created
    }

    pub(crate) fn extended(&self) -> &[PcrHandle] {
        &self.extended
    }

    fn record(&mut self, command: TpmCommand) -> Result<(), TpmBenchError> {
        self.commands.push(command);
        if self.fail_on == Some(self.commands.len()) {
            return Err(injected());
        }
        Ok(())
    }

    fn object(&self, handle: KeyHandle) -> Result<&MockObject, TpmBenchError> {
        let handle = ESYS_TR::from(handle);
        self.objects.iter()
            .find(|o| o.handle == handle)
            .ok_or(TpmBenchError::TSSError(tss_esapi::Error::WrapperError(WrapperErrorKind::InvalidParam)))
    }

    fn mac(handle: KeyHandle, digest: &Digest) -> Result<Signature, TpmBenchError> {
        let mac = Sha256::new()
            .chain_update(ESYS_TR::from(handle).to_be_bytes())
            .chain_update(digest.value())
            .finalize();
        Ok(Signature::Hmac(HashAgile::new(HashingAlgorithm::Sha256, Digest::try_from(mac.to_vec())?)))
    }
}

fn injected() -> TpmBenchError {
    TpmBenchError::TSSError(tss_esapi::Error::WrapperError(WrapperErrorKind::InvalidParam))
}

impl TpmSession for MockTpm{
    fn startup(&mut self, _startup_type: StartupType) -> Result<(), TpmBenchError> {
        self.record(TpmCommand::Startup)?;
        if self.reject_startup {
            return Err(injected());
        }
        Ok(())
    }

    fn get_random(&mut self, size: usize) -> Result<Vec<u8>, TpmBenchError> {
        self.record(TpmCommand::GetRandom)?;
        check_random_size(size)?;
        self.random_counter = self.random_counter.wrapping_add(1);
        Ok(vec![self.random_counter; size])
    }

    fn create_primary(&mut self, public: Public, auth: Option<Auth>, sensitive: Option<SensitiveData>) -> Result<KeyHandle, TpmBenchError> {
        self.record(TpmCommand::CreatePrimary)?;
        if self.objects.len() >= MAX_OBJECTS {
            return Err(injected());
        }
        let handle = self.next_handle;
        self.next_handle += 1;
        self.created.push(public.clone());
        self.objects.push(MockObject {
            handle,
            public,
            auth: auth.map(|a| a.value().to_vec()).unwrap_or_default(),
            sensitive: sensitive.map(|s| s.value().to_vec()).unwrap_or_default()
        });
        Ok(KeyHandle::from(handle))
    }

    fn unseal(&mut self, object: KeyHandle, auth: Auth) -> Result<Zeroizing<Vec<u8>>, TpmBenchError> {
        self.record(TpmCommand::Unseal)?;
        let tamper = self.tamper_unseal;
        let obj = self.object(object)?;
        if obj.auth != auth.value() {
            return Err(injected());
        }
        let mut data = obj.sensitive.clone();
        if tamper {
            data.reverse();
        }
        Ok(Zeroizing::new(data))
    }

    fn pcr_extend(&mut self, pcr: PcrHandle, _digests: DigestValues) -> Result<(), TpmBenchError> {
        self.record(TpmCommand::PcrExtend)?;
        self.extended.push(pcr);
        Ok(())
    }

    fn sign(&mut self, key: KeyHandle, digest: Digest, _scheme: SignatureScheme) -> Result<Signature, TpmBenchError> {
        self.record(TpmCommand::Sign)?;
        if !self.object(key)?.public.object_attributes().sign_encrypt() {
            return Err(injected());
        }
        Self::mac(key, &digest)
    }

    fn verify_signature(&mut self, key: KeyHandle, digest: Digest, signature: Signature) -> Result<(), TpmBenchError> {
        self.record(TpmCommand::VerifySignature)?;
        self.object(key)?;
        if Self::mac(key, &digest)? != signature {
            return Err(TpmBenchError::CorrectnessError("signature not verified".to_owned()));
        }
        Ok(())
    }

    fn flush_context(&mut self, object: KeyHandle) -> Result<(), TpmBenchError> {
        self.record(TpmCommand::FlushContext)?;
        let handle = ESYS_TR::from(object);
        let position = self.objects.iter()
            .position(|o| o.handle == handle)
            .ok_or(injected())?;
        self.objects.remove(position);
        Ok(())
    }
}
