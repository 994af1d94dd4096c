//! Library registration contract
//!
//! A library is an external component that brings its own native code and,
//! optionally, its own types. The runtime loads it once, hands it the
//! session's type system to extend, and tears it down at shutdown.

use std::path::{Path, PathBuf};
use tabula_core::{Error, Result};
use tabula_types::TypeSystem;
use tracing::info;

use crate::config::ResourceConfig;

/// Component registered with the runtime
///
/// `initialize` is the only point at which a library may add types or
/// reduction operators to a type system.
pub trait Library: Send + Sync {
    /// Library name, unique per runtime
    fn name(&self) -> &str;

    /// Path to the library's shared object, if it has one
    fn shared_library(&self) -> Option<PathBuf>;

    /// C header declaring the library's native entry points
    fn c_header(&self) -> &str;

    /// Symbol name of the native registration callback
    fn registration_callback(&self) -> &str;

    /// Called once when the library is added to the runtime
    fn initialize(&mut self, types: &mut TypeSystem) -> Result<()>;

    /// Called once at runtime shutdown
    fn destroy(&mut self) -> Result<()>;

    /// Resources the library asks for
    fn resource_config(&self) -> ResourceConfig {
        ResourceConfig::default()
    }
}

/// Shared-object file extension for the current platform
///
/// # Errors
///
/// Returns `Unsupported` on platforms other than Linux and macOS.
pub fn library_extension() -> Result<&'static str> {
    if cfg!(target_os = "linux") {
        Ok(".so")
    } else if cfg!(target_os = "macos") {
        Ok(".dylib")
    } else {
        Err(Error::unsupported(format!(
            "shared libraries on platform {:?}",
            std::env::consts::OS
        )))
    }
}

/// `lib<name><ext>` for the current platform
pub fn shared_library_file(name: &str) -> Result<String> {
    Ok(format!("lib{}{}", name, library_extension()?))
}

/// Path of `lib<name><ext>` inside `dir`
pub fn shared_library_path(dir: &Path, name: &str) -> Result<PathBuf> {
    Ok(dir.join(shared_library_file(name)?))
}

/// Validate a library's resources, then let it extend `types`
///
/// Returns the validated resource configuration.
///
/// # Errors
///
/// Returns `Config` for invalid resources, or whatever the library's
/// `initialize` returns. On error `types` is left exactly as it was.
pub fn initialize_library(
    library: &mut dyn Library,
    types: &mut TypeSystem,
) -> Result<ResourceConfig> {
    let config = library.resource_config();
    config.validate()?;

    // Registrations land in a copy that replaces `types` only on success.
    let mut staged = types.clone();
    library.initialize(&mut staged)?;
    let added_types = staged.len().saturating_sub(types.len());
    *types = staged;
    info!(
        target: "tabula::library",
        library = library.name(),
        added_types,
        max_tasks = config.max_tasks,
        "Library initialized"
    );
    Ok(config)
}

/// Tear a library down
pub fn destroy_library(library: &mut dyn Library) -> Result<()> {
    library.destroy()?;
    info!(target: "tabula::library", library = library.name(), "Library destroyed");
    Ok(())
}
