pub mod services;
pub mod utils;

// CLI-specific modules (terminal, home directory resolution, etc.)
#[cfg(feature = "cli")]
pub mod platform;

#[cfg(feature = "cli")]
pub mod tools;
