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

use std::time::Instant;

use indicatif::ProgressBar;
use log::{debug, info};
use tss_esapi::constants::StartupType;

use crate::{session::{error::TpmBenchError, tpm_session::TpmSession}, types::{benchmark_result::BenchmarkResult, scenario::Scenario}};

/// Number of iterations run when none is requested
pub const DEFAULT_ITERATIONS: u32 = 1000;

/// Drives the iteration loop of a single scenario and times it
pub struct BenchmarkRunner{
    scenario: Scenario,
    iterations: u32,
    progress: bool
}

impl BenchmarkRunner{
    /// Create a runner for `iterations` runs of `scenario`.
    /// ### Example
    /// ```rust
    /// use tpm2_bench::{runner::BenchmarkRunner, types::scenario::Scenario};
    ///
    /// let runner = BenchmarkRunner::new(Scenario::PcrExtend, 100).unwrap();
    /// assert!(BenchmarkRunner::new(Scenario::PcrExtend, 0).is_err());
    /// ```
    pub fn new(scenario: Scenario, iterations: u32) -> Result<Self, TpmBenchError> {
        if iterations == 0 {
            return Err(TpmBenchError::TpmConfigError("iteration count must be a positive integer".to_owned()));
        }
        Ok(BenchmarkRunner { scenario, iterations, progress: false })
    }

    /// Show a progress bar ticking once per completed iteration
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Run the benchmark on an open session.
    ///
    /// The first failing iteration aborts the run and its error is returned as is:
    /// no partial result is produced.
    pub fn run(&self, session: &mut dyn TpmSession) -> Result<BenchmarkResult, TpmBenchError> {
        // The TPM may already be started, in which case startup is rejected
        if let Err(e) = session.startup(StartupType::Clear) {
            info!("TPM startup rejected; continuing: {e}");
        }

        let bar = if self.progress {
            ProgressBar::new(self.iterations.into())
        } else {
            ProgressBar::hidden()
        };
        let executor = self.scenario.executor();

        let start = Instant::now();
        for i in 0..self.iterations {
            if let Err(e) = executor.run_once(session) {
                bar.abandon();
                debug!("Iteration {i} of '{}' failed", self.scenario);
                return Err(e);
            }
            bar.inc(1);
        }
        let total = start.elapsed();
        bar.finish_and_clear();

        let result = BenchmarkResult::new(self.scenario, self.iterations, total);
        info!("Completed {} iterations of '{}' in {:?}", self.iterations, self.scenario, total);
        Ok(result)
    }
}
