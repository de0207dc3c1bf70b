//! Policy provider adapters

mod file_policy;

pub use file_policy::FilePolicyProvider;
