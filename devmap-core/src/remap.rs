use devmap_types::{
    event::{ControlValue, RawEvent, RawEventData},
    tracking::TrackingEvent,
};
use strum_macros::{Display, FromRepr};

use crate::{
    config::{NodeRemap, UnmappedPolicy},
    mapping::MappingTable,
    profile::{ProfileDefinition, RemapBehavior},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RemapDecision {
    PassThrough,
    Transform(RawEvent),
    Suppress,
}

impl RemapDecision {
    /// The event the host should dispatch, if any
    pub fn resolve(self, original: &RawEvent) -> Option<RawEvent> {
        match self {
            RemapDecision::PassThrough => Some(*original),
            RemapDecision::Transform(event) => Some(event),
            RemapDecision::Suppress => None,
        }
    }
}

/// Logical node enumeration of head mounted display profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, FromRepr)]
#[repr(u32)]
pub enum HmdNode {
    Head = 0,
    LeftEye = 1,
    RightEye = 2,
    CenterEye = 3,
}

/**
 * Decides what happens to one raw event of a device claimed by `profile`
 *
 * `mappings` is the finalized table of the device instance. Profiles with the
 * mapped behaviour cannot run without one.
 *
 * # Panics
 *
 * Panics if `profile` routes events through a mapping table and `mappings` is `None`.
 */
pub fn remap(
    event: &RawEvent,
    profile: &ProfileDefinition,
    mappings: Option<&MappingTable>,
) -> RemapDecision {
    match profile.behavior() {
        RemapBehavior::PassThrough => RemapDecision::PassThrough,
        RemapBehavior::TrackingNodes(nodes) => remap_tracking_node(event, nodes),
        RemapBehavior::Mapped { suppress_tracking } => {
            let Some(mappings) = mappings else {
                panic!(
                    "Remap against profile `{}` before its mapping table was finalized",
                    profile.path()
                );
            };
            remap_mapped(event, mappings, *suppress_tracking, profile.unmapped_policy())
        }
    }
}

fn remap_tracking_node(event: &RawEvent, nodes: &[NodeRemap]) -> RemapDecision {
    let RawEventData::Tracking(tracking) = &event.data else {
        return RemapDecision::PassThrough;
    };

    match nodes.iter().find(|node| node.raw == tracking.node_id) {
        Some(node) => RemapDecision::Transform(RawEvent {
            data: RawEventData::Tracking(TrackingEvent {
                node_id: node.logical,
                ..*tracking
            }),
            ..*event
        }),
        None => RemapDecision::PassThrough,
    }
}

fn remap_mapped(
    event: &RawEvent,
    mappings: &MappingTable,
    suppress_tracking: bool,
    unmapped: UnmappedPolicy,
) -> RemapDecision {
    match event.data {
        RawEventData::GenericControl(ControlValue::Float(value)) => {
            match mappings.get(event.control_index) {
                Some(mapping) => match mapping.remap(event, value) {
                    Some(remapped) => RemapDecision::Transform(remapped),
                    None => RemapDecision::Suppress,
                },
                None => match unmapped {
                    UnmappedPolicy::PassThrough => RemapDecision::PassThrough,
                    UnmappedPolicy::Suppress => {
                        log::trace!("Suppressed unmapped control {}", event.control_index);
                        RemapDecision::Suppress
                    }
                },
            }
        }
        RawEventData::Tracking(_) if suppress_tracking => RemapDecision::Suppress,
        _ => RemapDecision::PassThrough,
    }
}
