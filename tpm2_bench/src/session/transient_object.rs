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

use log::{debug, warn};
use tss_esapi::{handles::KeyHandle, structures::{Auth, Public, SensitiveData}};

use super::{error::TpmBenchError, tpm_session::TpmSession};

/// A transient object living in the TPM for the duration of one benchmark iteration.
///
/// It borrows the session for its whole lifetime and flushes the handle when dropped,
/// so every exit path of an iteration, `?` included, releases the object.
/// A failing flush is only logged: it never replaces the error that ended the iteration.
pub struct TransientObject<'a, S: TpmSession + ?Sized>{
    session: &'a mut S,
    handle: KeyHandle
}

impl<'a, S: TpmSession + ?Sized> TransientObject<'a, S>{
    /// Take ownership of an already created transient handle
    pub fn new(session: &'a mut S, handle: KeyHandle) -> Self {
        TransientObject { session, handle }
    }

    /// Create a primary object under the owner hierarchy and guard its handle
    pub fn create_primary(session: &'a mut S, public: Public, auth: Option<Auth>, sensitive: Option<SensitiveData>) -> Result<Self, TpmBenchError> {
        let handle = session.create_primary(public, auth, sensitive)?;
        debug!("Created transient object {handle:?}");
        Ok(Self::new(session, handle))
    }

    pub fn handle(&self) -> KeyHandle {
        self.handle
    }

    /// Session the object lives in, to issue commands against it
    pub fn session(&mut self) -> &mut S {
        &mut *self.session
    }
}

impl<S: TpmSession + ?Sized> Drop for TransientObject<'_, S>{
    fn drop(&mut self) {
        match self.session.flush_context(self.handle) {
            Ok(()) => debug!("Flushed transient object {:?}", self.handle),
            Err(e) => warn!("Failed to flush transient object {:?}: {e}", self.handle)
        }
    }
}
