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

use std::{fmt::Display, time::Duration};

use super::scenario::Scenario;

/// Outcome of a completed benchmark run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkResult{
    scenario: Scenario,
    iterations: u32,
    total: Duration
}

impl BenchmarkResult {
    /// `iterations` must be greater than zero
    pub(crate) fn new(scenario: Scenario, iterations: u32, total: Duration) -> Self {
        debug_assert!(iterations > 0);
        BenchmarkResult { scenario, iterations, total }
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Wall-clock duration of the whole loop
    pub fn total(&self) -> Duration {
        self.total
    }

    /// Mean latency, truncated to the nanosecond
    pub fn per_iteration(&self) -> Duration {
        self.total / self.iterations
    }
}

impl Display for BenchmarkResult{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Completed test '{}' in {}.\n({} per iteration)",
            self.scenario,
            format_duration(self.total),
            format_duration(self.per_iteration()))
    }
}

/// Human readable duration with at most 3 decimals, in s, ms or µs
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos() as f64;
    let (value, unit) = if duration >= Duration::from_secs(1) {
        (nanos / 1e9, "s")
    } else if duration >= Duration::from_millis(1) {
        (nanos / 1e6, "ms")
    } else {
        (nanos / 1e3, "µs")
    };
    let value = format!("{value:.3}");
    let value = value.trim_end_matches('0').trim_end_matches('.');
    format!("{value}{unit}")
}
