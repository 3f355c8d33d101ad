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

use std::{fmt::Display, str::FromStr};

use crate::{scenarios::{ecc_sign_verify::EccSignVerify, pcr_extend::PcrExtend, rsa_sign_verify::RsaSignVerify, seal_unseal::SealUnseal, ScenarioExecutor}, session::error::TpmBenchError};

/// Supported benchmark scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario{
    SealUnseal,
    PcrExtend,
    RsaSignVerify,
    EccSignVerify
}

impl Scenario {
    /// Every scenario, in canonical order
    pub const ALL: [Scenario; 4] = [
        Scenario::SealUnseal,
        Scenario::PcrExtend,
        Scenario::RsaSignVerify,
        Scenario::EccSignVerify
    ];

    /// Resolve a scenario from one of its names, ignoring case
    /// ### Examples
    /// ```rust
    /// use tpm2_bench::types::scenario::Scenario;
    ///
    /// assert_eq!(Scenario::resolve("RSA").unwrap(), Scenario::RsaSignVerify);
    /// assert!(Scenario::resolve("aes").is_err());
    /// ```
    pub fn resolve(name: &str) -> Result<Self, TpmBenchError> {
        let lowercase = name.to_lowercase();
        Self::ALL.into_iter()
            .find(|scenario| scenario.aliases().contains(&lowercase.as_str()))
            .ok_or_else(|| TpmBenchError::UnknownScenario {
                name: name.to_owned(),
                supported: Self::ALL.map(|s| s.name()).join(", ")
            })
    }

    /// Canonical name, used for reporting
    pub fn name(&self) -> &'static str {
        self.aliases()[0]
    }

    /// Accepted names: canonical name first, then the short form
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Scenario::SealUnseal => &["seal_unseal", "seal"],
            Scenario::PcrExtend => &["pcr_extend", "pcr"],
            Scenario::RsaSignVerify => &["rsa_2048_create_sign_verify", "rsa"],
            Scenario::EccSignVerify => &["ecc_p256_create_sign_verify", "ecc"],
        }
    }

    /// Executor performing one iteration of this scenario
    pub fn executor(&self) -> &'static dyn ScenarioExecutor {
        match self {
            Scenario::SealUnseal => &SealUnseal,
            Scenario::PcrExtend => &PcrExtend,
            Scenario::RsaSignVerify => &RsaSignVerify,
            Scenario::EccSignVerify => &EccSignVerify,
        }
    }
}

impl FromStr for Scenario{
    type Err = TpmBenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

impl Display for Scenario{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
