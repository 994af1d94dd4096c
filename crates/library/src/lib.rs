//! Library registration contract for tabula
//!
//! - Library: trait an external component implements to register with the runtime
//! - ResourceConfig: resource limits a library requests, loadable from TOML
//! - initialize_library / destroy_library: lifecycle entry points

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod library;

pub use config::ResourceConfig;
pub use library::{
    destroy_library, initialize_library, library_extension, shared_library_file,
    shared_library_path, Library,
};
