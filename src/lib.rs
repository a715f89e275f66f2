pub mod constants;
pub mod constraints;
pub mod conversion;
pub mod coordinates;
pub mod oracle;
pub mod scheduler;
pub mod scoring;
pub mod site;
pub mod sources;
pub mod targets;
pub mod time;
pub mod tofo_errors;
