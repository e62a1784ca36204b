use thiserror::Error;

pub mod event;
pub mod tracking;

/**
 * Profiles are identified by interned path strings instead of type identity
 *
 * Types of Path:
 *
 * /profiles/<vendor_name>/<device_name>
 *
 * /profiles/generic/<device_class>
 *
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProfilePath(pub u32);

/// Host-assigned id of a physical device instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceId(pub u64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Path Format Error")]
pub struct PathFormatError;
