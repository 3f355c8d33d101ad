pub mod error;
pub mod esapi_session;
pub mod tpm_session;
pub mod tpm_session_config;
pub mod transient_object;

#[cfg(test)]
pub(crate) mod mock;
