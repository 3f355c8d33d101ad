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

use std::{process::ExitCode, str::FromStr};

use clap::Parser;
use log::debug;
use tpm2_bench::{runner::{BenchmarkRunner, DEFAULT_ITERATIONS}, session::{error::TpmBenchError, esapi_session::EsapiSession, tpm_session_config::{TpmSessionConfig, DEFAULT_TCTI}}, types::{benchmark_result::BenchmarkResult, scenario::Scenario}};

/// Run TPM 2.0 micro-benchmarks
#[derive(Parser, Debug)]
#[command(name = "tpm2-bench")]
struct Args {
    /// Which test to run: seal_unseal, pcr_extend, rsa_2048_create_sign_verify,
    /// ecc_p256_create_sign_verify (or seal, pcr, rsa, ecc)
    #[arg(long, alias = "test_name", default_value = "seal_unseal")]
    test_name: String,

    /// How many iterations of the test to run
    #[arg(long, alias = "test_count", default_value_t = DEFAULT_ITERATIONS, value_parser = clap::value_parser!(u32).range(1..))]
    test_count: u32,

    /// TCTI used to reach the TPM
    #[arg(long, env = "TPM2_BENCH_TCTI", default_value = DEFAULT_TCTI)]
    tcti: String,

    /// Hide the progress bar
    #[arg(long)]
    quiet: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .init();

    match run(Args::parse()) {
        Ok(result) => {
            println!("{result}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<BenchmarkResult, TpmBenchError> {
    // Configuration is validated before touching the TPM
    let scenario = Scenario::resolve(&args.test_name)?;
    let runner = BenchmarkRunner::new(scenario, args.test_count)?
        .with_progress(!args.quiet);
    let config = TpmSessionConfig::from_str(&args.tcti)
        .map_err(|e| TpmBenchError::TpmConfigError(format!("invalid TCTI '{}': {e}", args.tcti)))?;

    debug!("Running '{scenario}' {} times on {}", args.test_count, args.tcti);
    let mut session = EsapiSession::connect(config)?;
    let result = runner.run(&mut session);
    session.close();
    result
}
