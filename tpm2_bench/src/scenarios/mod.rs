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

//! One iteration of each benchmarked workflow.
//!
//! Executors are linear pipelines: create, operate, verify, release.
//! Every transient object is held by a [TransientObject](crate::session::transient_object::TransientObject)
//! so it is flushed on every exit path.

pub mod ecc_sign_verify;
pub mod pcr_extend;
pub mod rsa_sign_verify;
pub mod seal_unseal;
pub(crate) mod sign_verify;

use crate::session::{error::TpmBenchError, tpm_session::TpmSession};

/// Authorization value bound to the sealed object
pub const AUTH_VALUE: &[u8] = b"password";

/// Performs exactly one iteration of a benchmark scenario
pub trait ScenarioExecutor {
    /// Run the workflow once, releasing every object it created before returning
    fn run_once(&self, session: &mut dyn TpmSession) -> Result<(), TpmBenchError>;
}
