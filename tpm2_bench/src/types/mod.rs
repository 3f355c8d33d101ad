pub mod benchmark_result;
pub mod scenario;
