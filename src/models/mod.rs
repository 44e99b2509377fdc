pub mod agent;
pub mod component;
pub mod constants;
pub mod context_file;
pub mod cross_domain;
pub mod hooks;
