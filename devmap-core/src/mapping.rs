use std::collections::BTreeMap;

use devmap_types::event::{ControlValue, RawEvent, RawEventData};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    config::{ControlConfig, ControlKind},
    types::{ProfileError, Result},
};

/// Index of a logical control inside its profile's `ControlSetup`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ControlHandle(pub u32);

/// The ordered logical controls a profile exposes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlSetup {
    controls: Vec<ControlConfig>,
}

impl ControlSetup {
    pub fn new(profile: &str, controls: &[ControlConfig]) -> Result<Self> {
        if let Some(name) = controls.iter().map(|control| &control.name).duplicates().next() {
            return Err(ProfileError::DuplicateControl {
                profile: profile.to_owned(),
                control: name.clone(),
            });
        }

        Ok(Self {
            controls: controls.to_vec(),
        })
    }

    pub fn handle(&self, name: &str) -> Option<ControlHandle> {
        self.controls
            .iter()
            .position(|control| control.name == name)
            .map(|idx| ControlHandle(idx as u32))
    }

    pub fn get(&self, handle: ControlHandle) -> Option<&ControlConfig> {
        self.controls.get(handle.0 as usize)
    }

    pub fn kind(&self, handle: ControlHandle) -> Option<ControlKind> {
        self.get(handle).map(|control| control.kind)
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ControlHandle, &ControlConfig)> {
        self.controls
            .iter()
            .enumerate()
            .map(|(idx, control)| (ControlHandle(idx as u32), control))
    }
}

/// Value transform a mapping applies to float control events
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValueRemap {
    #[default]
    Identity,
    Invert,
    /// Linear remap of `from[0]..from[1]` onto `to[0]..to[1]`
    Range { from: [f32; 2], to: [f32; 2] },
    /// The raw control exists but carries nothing the profile exposes
    Drop,
}

impl ValueRemap {
    pub fn apply(&self, value: f32) -> Option<f32> {
        match *self {
            ValueRemap::Identity => Some(value),
            ValueRemap::Invert => Some(-value),
            ValueRemap::Range {
                from: [from_min, from_max],
                to: [to_min, to_max],
            } => {
                let span = from_max - from_min;
                if span == 0. {
                    return Some(to_min);
                }
                let t = (value - from_min) / span;
                Some(to_min + t * (to_max - to_min))
            }
            ValueRemap::Drop => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlMapping {
    pub source_index: i32,
    pub target: ControlHandle,
    pub remap: ValueRemap,
}

impl ControlMapping {
    /// Re-indexes a float control event carrying `value` onto the logical control,
    /// `None` means the event is dropped
    pub fn remap(&self, event: &RawEvent, value: f32) -> Option<RawEvent> {
        Some(RawEvent {
            control_index: self.target.0 as i32,
            data: RawEventData::GenericControl(ControlValue::Float(self.remap.apply(value)?)),
            ..*event
        })
    }
}

/**
 * Raw control index to logical control associations of one device instance
 *
 * Entries are ordered by raw index so two tables built from the same setup
 * compare equal.
 */
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingTable {
    entries: BTreeMap<i32, ControlMapping>,
    haptics: Option<ControlHandle>,
}

impl MappingTable {
    pub fn get(&self, source_index: i32) -> Option<&ControlMapping> {
        self.entries.get(&source_index)
    }

    /// The logical control an external haptics dispatcher should drive
    pub fn haptics_control(&self) -> Option<ControlHandle> {
        self.haptics
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ControlMapping> {
        self.entries.values()
    }
}

/**
 * Collects mappings against a `ControlSetup`
 *
 * `finish_mappings` consumes the builder, nothing can be inserted into a
 * table once it is finalized.
 */
#[derive(Debug)]
pub struct MappingTableBuilder<'a> {
    profile: &'a str,
    setup: &'a ControlSetup,
    entries: BTreeMap<i32, ControlMapping>,
    haptics: Option<ControlHandle>,
}

impl<'a> MappingTableBuilder<'a> {
    pub fn new(profile: &'a str, setup: &'a ControlSetup) -> Self {
        Self {
            profile,
            setup,
            entries: BTreeMap::new(),
            haptics: None,
        }
    }

    fn resolve(&self, control: &str) -> Result<ControlHandle> {
        self.setup
            .handle(control)
            .ok_or_else(|| ProfileError::UnknownControl {
                profile: self.profile.to_owned(),
                control: control.to_owned(),
            })
    }

    pub fn map(&mut self, source_index: i32, target: &str, remap: ValueRemap) -> Result<&mut Self> {
        let target = self.resolve(target)?;
        self.insert(ControlMapping {
            source_index,
            target,
            remap,
        })?;
        Ok(self)
    }

    pub(crate) fn insert(&mut self, mapping: ControlMapping) -> Result<()> {
        if self.entries.contains_key(&mapping.source_index) {
            return Err(ProfileError::DuplicateMapping {
                profile: self.profile.to_owned(),
                index: mapping.source_index,
            });
        }
        self.entries.insert(mapping.source_index, mapping);
        Ok(())
    }

    pub fn haptics(&mut self, control: &str) -> Result<&mut Self> {
        self.haptics = Some(self.resolve(control)?);
        Ok(self)
    }

    pub fn finish_mappings(self) -> MappingTable {
        MappingTable {
            entries: self.entries,
            haptics: self.haptics,
        }
    }
}

#[cfg(test)]
mod tests {
    use devmap_types::event::EventKind;

    use super::*;

    fn controller_setup() -> ControlSetup {
        ControlSetup::new(
            "test",
            &[
                ControlConfig {
                    name: "trigger".into(),
                    kind: ControlKind::Axis,
                },
                ControlConfig {
                    name: "grip".into(),
                    kind: ControlKind::Axis,
                },
                ControlConfig {
                    name: "rumble".into(),
                    kind: ControlKind::Haptic,
                },
            ],
        )
        .unwrap()
    }

    fn float_event(control_index: i32, value: f32) -> RawEvent {
        let mut event = RawEvent::new(EventKind::GenericControl);
        event.control_index = control_index;
        event.data = RawEventData::GenericControl(ControlValue::Float(value));
        event
    }

    #[test]
    fn duplicate_control_names_are_rejected() {
        let control = ControlConfig {
            name: "trigger".into(),
            kind: ControlKind::Axis,
        };
        let err = ControlSetup::new("dup", &[control.clone(), control]).unwrap_err();
        assert!(matches!(err, ProfileError::DuplicateControl { control, .. } if control == "trigger"));
    }

    #[test]
    fn builder_resolves_names_and_haptics() {
        let setup = controller_setup();
        let mut builder = MappingTableBuilder::new("test", &setup);
        builder
            .map(9, "trigger", ValueRemap::Identity)
            .unwrap()
            .map(10, "grip", ValueRemap::Invert)
            .unwrap()
            .haptics("rumble")
            .unwrap();
        let table = builder.finish_mappings();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(9).unwrap().target, ControlHandle(0));
        assert_eq!(table.get(10).unwrap().target, ControlHandle(1));
        assert_eq!(table.haptics_control(), Some(ControlHandle(2)));
        assert!(table.get(2).is_none());
    }

    #[test]
    fn builder_rejects_unknown_targets_and_duplicate_sources() {
        let setup = controller_setup();
        let mut builder = MappingTableBuilder::new("test", &setup);
        assert!(matches!(
            builder.map(1, "thumbstick", ValueRemap::Identity),
            Err(ProfileError::UnknownControl { .. })
        ));

        builder.map(1, "trigger", ValueRemap::Identity).unwrap();
        assert!(matches!(
            builder.map(1, "grip", ValueRemap::Identity),
            Err(ProfileError::DuplicateMapping { index: 1, .. })
        ));
    }

    #[test]
    fn building_is_deterministic() {
        let setup = controller_setup();
        let build = || {
            let mut builder = MappingTableBuilder::new("test", &setup);
            builder.map(20, "grip", ValueRemap::Identity).unwrap();
            builder.map(3, "trigger", ValueRemap::Identity).unwrap();
            builder.finish_mappings()
        };

        let (a, b) = (build(), build());
        assert_eq!(a, b);
        assert_eq!(
            a.iter().map(|mapping| mapping.source_index).collect::<Vec<_>>(),
            vec![3, 20]
        );
    }

    #[test]
    fn mapping_reindexes_and_transforms() {
        let mapping = ControlMapping {
            source_index: 9,
            target: ControlHandle(1),
            remap: ValueRemap::Range {
                from: [-1., 1.],
                to: [0., 1.],
            },
        };

        let remapped = mapping.remap(&float_event(9, 0.), 0.).unwrap();
        assert_eq!(remapped.control_index, 1);
        assert_eq!(
            remapped.data,
            RawEventData::GenericControl(ControlValue::Float(0.5))
        );
    }

    #[test]
    fn drop_mapping_suppresses() {
        let mapping = ControlMapping {
            source_index: 4,
            target: ControlHandle(0),
            remap: ValueRemap::Drop,
        };
        assert_eq!(mapping.remap(&float_event(4, 1.), 1.), None);
    }

    #[test]
    fn degenerate_range_maps_to_lower_bound() {
        let remap = ValueRemap::Range {
            from: [0.5, 0.5],
            to: [2., 3.],
        };
        assert_eq!(remap.apply(0.9), Some(2.));
    }
}
