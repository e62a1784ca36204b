use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;

pub use devmap_core::{
    builtin::BUILTIN_PROFILES,
    config::{DeviceType, ProfileConfig, ProfileOverrides, ProfileTable, UnmappedPolicy},
    mapping::{ControlHandle, MappingTable},
    matcher::{MatchResult, MatchTier},
    pool::{EventPool, PooledEvent},
    profile::ProfileDefinition,
    registry::ProfileRegistry,
    remap::{HmdNode, RemapDecision},
    types::{MappingError, ProfileError},
    PathManager,
};
pub use devmap_types::{
    event::{EventKind, RawEvent},
    DeviceId, ProfilePath,
};

use devmap_core::{builtin, device::ProfileInstance};

mod device;

pub use device::ConnectedDevice;

/// Builds the profile set with every built-in profile registered
pub fn load_profiles() -> Result<DeviceProfiles, ProfileError> {
    let paths = PathManager::new();
    let mut registry = ProfileRegistry::new();
    builtin::register_builtin_profiles(&mut registry, &paths)?;

    Ok(DeviceProfiles {
        paths,
        registry,
        devices: RwLock::new(HashMap::new()),
        pool: EventPool::new(),
    })
}

/**
 * Profiles plus the devices they have claimed
 *
 * Profiles are added with `&mut self` during startup only. Connecting devices
 * and remapping their events works through `&self`.
 */
#[derive(Debug)]
pub struct DeviceProfiles {
    paths: PathManager,
    registry: ProfileRegistry,
    devices: RwLock<HashMap<DeviceId, Arc<ConnectedDevice>>>,
    pool: EventPool,
}

impl DeviceProfiles {
    /// Registers a user profile table after the built-in profiles
    pub fn add_table(&mut self, json: &str) -> Result<Vec<ProfilePath>, ProfileError> {
        let table = ProfileTable::from_json(json)?;
        self.registry.register_table(table, &self.paths)
    }

    pub fn add_profile(&mut self, config: ProfileConfig) -> Result<ProfilePath, ProfileError> {
        self.registry.register_config(config, &self.paths)
    }

    pub fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    pub fn get_path_string(&self, path: ProfilePath) -> Option<String> {
        self.paths.get_path_string(path)
    }

    pub fn find_match(&self, descriptor: &str) -> MatchResult<'_> {
        self.registry.find_match(descriptor)
    }

    /**
     * Matches a newly discovered device and binds it to the claiming profile
     *
     * Returns `None` for unclaimed descriptors, the host decides what to do with
     * those devices. Connecting an id that is already connected replaces it.
     */
    pub fn connect(&self, device: DeviceId, descriptor: &str) -> Option<Arc<ConnectedDevice>> {
        let result = self.registry.find_match(descriptor);
        let (profile, tier) = match result {
            MatchResult::Claimed { profile, tier } => (profile.clone(), tier),
            MatchResult::Unclaimed => {
                log::info!("No profile claims device {} `{descriptor}`", device.0);
                return None;
            }
        };

        let instance = ProfileInstance::new(device, profile);
        if let Err(err) = instance.finish_mappings() {
            log::warn!("Device {}: {err}", device.0);
        }

        log::info!(
            "Device {} connected as `{}` ({tier})",
            device.0,
            instance.profile.display_name()
        );

        let connected = Arc::new(ConnectedDevice::new(descriptor.to_owned(), tier, instance));
        self.devices.write().insert(device, connected.clone());
        Some(connected)
    }

    pub fn disconnect(&self, device: DeviceId) -> Option<Arc<ConnectedDevice>> {
        let removed = self.devices.write().remove(&device);
        if removed.is_some() {
            log::info!("Device {} disconnected", device.0);
        }
        removed
    }

    pub fn device(&self, device: DeviceId) -> Option<Arc<ConnectedDevice>> {
        self.devices.read().get(&device).cloned()
    }

    /// Events from devices no profile claimed are suppressed
    pub fn remap(&self, event: &RawEvent) -> RemapDecision {
        match self.device(event.device) {
            Some(device) => device.remap(event),
            None => {
                log::trace!("Dropping event from unknown device {}", event.device.0);
                RemapDecision::Suppress
            }
        }
    }

    pub fn checkout_event(&self, kind: EventKind) -> PooledEvent<'_> {
        self.pool.checkout(kind)
    }
}
