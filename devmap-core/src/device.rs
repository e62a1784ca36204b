use std::sync::Arc;

use devmap_types::{event::RawEvent, DeviceId};
use once_cell::sync::OnceCell;

use crate::{
    config::DeviceType,
    mapping::{ControlHandle, MappingTable},
    profile::ProfileDefinition,
    remap::{self, RemapDecision},
    types::MappingError,
};

/**
 * One physical device bound to the profile that claimed it
 *
 * The mapping table starts out uninitialized and is built exactly once by
 * `finish_mappings`. There is no way back to the uninitialized state.
 */
#[derive(Debug)]
pub struct ProfileInstance {
    pub device: DeviceId,
    pub profile: Arc<ProfileDefinition>,
    mappings: OnceCell<MappingTable>,
}

impl ProfileInstance {
    pub fn new(device: DeviceId, profile: Arc<ProfileDefinition>) -> Self {
        Self {
            device,
            profile,
            mappings: OnceCell::new(),
        }
    }

    pub fn device_type(&self) -> DeviceType {
        self.profile.device_type()
    }

    pub fn finish_mappings(&self) -> Result<&MappingTable, MappingError> {
        let mut built = false;
        let table = self.mappings.get_or_init(|| {
            built = true;
            self.profile.build_mappings()
        });

        if built {
            log::debug!(
                "Finished {} mappings for device {} (`{}`)",
                table.len(),
                self.device.0,
                self.profile.path()
            );
            Ok(table)
        } else {
            Err(MappingError::AlreadyBuilt)
        }
    }

    pub fn mappings(&self) -> Option<&MappingTable> {
        self.mappings.get()
    }

    pub fn is_built(&self) -> bool {
        self.mappings.get().is_some()
    }

    pub fn haptics_control(&self) -> Option<ControlHandle> {
        self.mappings().and_then(MappingTable::haptics_control)
    }

    /// # Panics
    ///
    /// Panics if `finish_mappings` was never called, whatever the profile's behaviour.
    pub fn remap(&self, event: &RawEvent) -> RemapDecision {
        let Some(mappings) = self.mappings.get() else {
            panic!(
                "Remap for device {} against profile `{}` before its mapping table was finalized",
                self.device.0,
                self.profile.path()
            );
        };
        remap::remap(event, &self.profile, Some(mappings))
    }
}

#[cfg(test)]
mod tests {
    use devmap_types::{
        event::{ControlValue, EventKind, RawEventData},
        tracking::PlatformNode,
    };

    use super::*;
    use crate::{
        config::{ControlKind, NodeRemap, ProfileConfig, RemapConfig, UnmappedPolicy},
        internal::paths::PathManager,
        mapping::ValueRemap,
    };

    fn vibrating_controller() -> Arc<ProfileDefinition> {
        let config = ProfileConfig::new("/profiles/test/wand", "Wand", DeviceType::TrackedController)
            .with_remap(
                RemapConfig::Mapped {
                    suppress_tracking: false,
                },
                UnmappedPolicy::Suppress,
            )
            .control("trigger", ControlKind::Axis)
            .control("rumble", ControlKind::Haptic)
            .mapping(9, "trigger", ValueRemap::Identity)
            .haptics("rumble");
        Arc::new(ProfileDefinition::compile(config, &PathManager::new()).unwrap())
    }

    #[test]
    fn mappings_build_once() {
        let instance = ProfileInstance::new(DeviceId(1), vibrating_controller());
        assert!(!instance.is_built());
        assert_eq!(instance.haptics_control(), None);

        assert_eq!(instance.finish_mappings().unwrap().len(), 1);
        assert!(instance.is_built());
        assert_eq!(instance.finish_mappings(), Err(MappingError::AlreadyBuilt));
        assert_eq!(instance.haptics_control(), Some(ControlHandle(1)));
        assert_eq!(instance.device_type(), DeviceType::TrackedController);
    }

    #[test]
    fn instances_of_one_profile_build_identical_tables() {
        let profile = vibrating_controller();
        let a = ProfileInstance::new(DeviceId(1), profile.clone());
        let b = ProfileInstance::new(DeviceId(2), profile);
        assert_eq!(a.finish_mappings().unwrap(), b.finish_mappings().unwrap());
    }

    #[test]
    fn remap_goes_through_instance_table() {
        let instance = ProfileInstance::new(DeviceId(3), vibrating_controller());
        instance.finish_mappings().unwrap();

        let mut event = RawEvent::new(EventKind::GenericControl);
        event.control_index = 2;
        event.data = RawEventData::GenericControl(ControlValue::Float(1.));
        assert_eq!(instance.remap(&event), RemapDecision::Suppress);
    }

    #[test]
    #[should_panic(expected = "mapping table was finalized")]
    fn remap_before_finish_panics() {
        let instance = ProfileInstance::new(DeviceId(4), vibrating_controller());
        instance.remap(&RawEvent::new(EventKind::GenericControl));
    }

    fn headset() -> Arc<ProfileDefinition> {
        let config = ProfileConfig::new("/profiles/test/headset", "Headset", DeviceType::HeadMountedDisplay)
            .with_remap(
                RemapConfig::TrackingNodes {
                    nodes: vec![NodeRemap {
                        raw: PlatformNode::LeftEye as u32,
                        logical: 1,
                    }],
                },
                UnmappedPolicy::PassThrough,
            );
        Arc::new(ProfileDefinition::compile(config, &PathManager::new()).unwrap())
    }

    #[test]
    #[should_panic(expected = "mapping table was finalized")]
    fn unbuilt_tracking_node_instance_panics() {
        let instance = ProfileInstance::new(DeviceId(5), headset());
        instance.remap(&RawEvent::new(EventKind::Tracking));
    }

    #[test]
    #[should_panic(expected = "mapping table was finalized")]
    fn unbuilt_pass_through_instance_panics() {
        let config = ProfileConfig::new("/profiles/test/generic", "Generic", DeviceType::Generic);
        let profile = Arc::new(ProfileDefinition::compile(config, &PathManager::new()).unwrap());
        let instance = ProfileInstance::new(DeviceId(6), profile);
        instance.remap(&RawEvent::new(EventKind::Key));
    }

    #[test]
    fn built_tracking_node_instance_remaps() {
        let instance = ProfileInstance::new(DeviceId(7), headset());
        instance.finish_mappings().unwrap();
        assert!(matches!(
            instance.remap(&RawEvent::new(EventKind::Tracking)),
            RemapDecision::Transform(_)
        ));
    }
}
