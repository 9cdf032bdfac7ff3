//! Adapters for the collaborator ports: HTTP implementations talking to
//! the real services, in-memory stand-ins for dry runs and tests, and a
//! filesystem-backed attachment source.

pub mod fs;
pub mod in_memory;
pub mod media_host;
pub mod notifier;
