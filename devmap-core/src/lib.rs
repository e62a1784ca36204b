pub mod builtin;
pub mod config;
pub mod device;
pub mod mapping;
pub mod matcher;
pub mod pool;
pub mod profile;
pub mod registry;
pub mod remap;
pub mod types;

pub(crate) mod internal {
    pub mod paths;
}

pub use internal::paths::PathManager;
