//! Data Transfer Objects
//!
//! Records exchanged with whoever triggers a deployment: the HTTP API, the
//! CLI or any other invoker. Field names follow the trigger event format
//! (PascalCase request keys, snake_case response keys).

pub mod deploy;
