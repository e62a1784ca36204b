use devmap_core::{
    config::DeviceType,
    device::ProfileInstance,
    mapping::ControlHandle,
    matcher::MatchTier,
    remap::RemapDecision,
};
use devmap_types::{event::RawEvent, DeviceId, ProfilePath};

#[derive(Debug)]
pub struct ConnectedDevice {
    pub descriptor: String,
    pub tier: MatchTier,
    instance: ProfileInstance,
}

impl ConnectedDevice {
    pub(crate) fn new(descriptor: String, tier: MatchTier, instance: ProfileInstance) -> Self {
        Self {
            descriptor,
            tier,
            instance,
        }
    }

    pub fn id(&self) -> DeviceId {
        self.instance.device
    }

    pub fn profile(&self) -> ProfilePath {
        self.instance.profile.id
    }

    pub fn profile_name(&self) -> &str {
        self.instance.profile.display_name()
    }

    pub fn device_type(&self) -> DeviceType {
        self.instance.device_type()
    }

    pub fn haptics_control(&self) -> Option<ControlHandle> {
        self.instance.haptics_control()
    }

    pub fn remap(&self, event: &RawEvent) -> RemapDecision {
        self.instance.remap(event)
    }

    /// The event to hand on to the host dispatcher, `None` when suppressed
    pub fn dispatch(&self, event: &RawEvent) -> Option<RawEvent> {
        self.remap(event).resolve(event)
    }
}
