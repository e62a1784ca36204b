use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::{mapping::ValueRemap, types::Result};

/// The logical device type a profile constructs for the devices it claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    Keyboard,
    Mouse,
    Pen,
    Touchscreen,
    Gamepad,
    Joystick,
    HeadMountedDisplay,
    TrackedController,
    Generic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    Button,
    Axis,
    Vector2,
    Vector3,
    Quaternion,
    Haptic,
}

/// What happens to a `GenericControl` event whose raw index has no mapping entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmappedPolicy {
    #[default]
    PassThrough,
    Suppress,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RemapConfig {
    #[default]
    PassThrough,
    TrackingNodes {
        nodes: Vec<NodeRemap>,
    },
    Mapped {
        #[serde(default)]
        suppress_tracking: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRemap {
    pub raw: u32,
    pub logical: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlConfig {
    pub name: String,
    pub kind: ControlKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingConfig {
    pub source: i32,
    pub target: String,
    #[serde(default)]
    pub remap: ValueRemap,
}

/**
 * The uncompiled description of a profile
 *
 * Patterns are kept as strings here, they are compiled (and rejected if
 * malformed) when the profile is registered.
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub path: String,
    pub display_name: String,
    pub device_type: DeviceType,
    #[serde(default)]
    pub matching_patterns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_resort_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub never_match_pattern: Option<String>,
    #[serde(default)]
    pub remap: RemapConfig,
    #[serde(default)]
    pub unmapped: UnmappedPolicy,
    #[serde(default)]
    pub controls: Vec<ControlConfig>,
    #[serde(default)]
    pub mappings: Vec<MappingConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub haptics: Option<String>,
}

impl ProfileConfig {
    pub fn new(path: impl Into<String>, display_name: impl Into<String>, device_type: DeviceType) -> Self {
        Self {
            path: path.into(),
            display_name: display_name.into(),
            device_type,
            matching_patterns: Vec::new(),
            last_resort_pattern: None,
            never_match_pattern: None,
            remap: RemapConfig::PassThrough,
            unmapped: UnmappedPolicy::PassThrough,
            controls: Vec::new(),
            mappings: Vec::new(),
            haptics: None,
        }
    }

    pub fn matching(mut self, pattern: impl Into<String>) -> Self {
        self.matching_patterns.push(pattern.into());
        self
    }

    pub fn last_resort(mut self, pattern: impl Into<String>) -> Self {
        self.last_resort_pattern = Some(pattern.into());
        self
    }

    pub fn never_match(mut self, pattern: impl Into<String>) -> Self {
        self.never_match_pattern = Some(pattern.into());
        self
    }

    pub fn with_remap(mut self, remap: RemapConfig, unmapped: UnmappedPolicy) -> Self {
        self.remap = remap;
        self.unmapped = unmapped;
        self
    }

    pub fn control(mut self, name: impl Into<String>, kind: ControlKind) -> Self {
        self.controls.push(ControlConfig {
            name: name.into(),
            kind,
        });
        self
    }

    pub fn mapping(mut self, source: i32, target: impl Into<String>, remap: ValueRemap) -> Self {
        self.mappings.push(MappingConfig {
            source,
            target: target.into(),
            remap,
        });
        self
    }

    pub fn haptics(mut self, control: impl Into<String>) -> Self {
        self.haptics = Some(control.into());
        self
    }

    /// Derives a new profile from this one, the base is left untouched
    pub fn with_overrides(&self, path: impl Into<String>, overrides: ProfileOverrides) -> Self {
        let mut derived = self.clone();
        derived.path = path.into();

        if overrides.clear_matching_patterns {
            derived.matching_patterns.clear();
        }
        if overrides.clear_last_resort {
            derived.last_resort_pattern = None;
        }
        if overrides.clear_never_match {
            derived.never_match_pattern = None;
        }

        if let Some(display_name) = overrides.display_name {
            derived.display_name = display_name;
        }
        if let Some(device_type) = overrides.device_type {
            derived.device_type = device_type;
        }
        derived.matching_patterns.extend(overrides.matching_patterns);
        if let Some(pattern) = overrides.last_resort_pattern {
            derived.last_resort_pattern = Some(pattern);
        }
        if let Some(pattern) = overrides.never_match_pattern {
            derived.never_match_pattern = Some(pattern);
        }
        if let Some(remap) = overrides.remap {
            derived.remap = remap;
        }
        if let Some(unmapped) = overrides.unmapped {
            derived.unmapped = unmapped;
        }
        if let Some(controls) = overrides.controls {
            derived.controls = controls;
        }
        if let Some(mappings) = overrides.mappings {
            derived.mappings = mappings;
        }
        if let Some(haptics) = overrides.haptics {
            derived.haptics = Some(haptics);
        }

        derived
    }
}

/**
 * Explicit override values applied on top of a base profile
 *
 * The `clear_*` flags run first, so a derived profile can drop an inherited
 * pattern and supply its own in the same override set.
 */
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileOverrides {
    pub display_name: Option<String>,
    pub device_type: Option<DeviceType>,
    pub clear_matching_patterns: bool,
    pub clear_last_resort: bool,
    pub clear_never_match: bool,
    /// Appended to the (possibly cleared) inherited patterns
    pub matching_patterns: Vec<String>,
    pub last_resort_pattern: Option<String>,
    pub never_match_pattern: Option<String>,
    pub remap: Option<RemapConfig>,
    pub unmapped: Option<UnmappedPolicy>,
    pub controls: Option<Vec<ControlConfig>>,
    pub mappings: Option<Vec<MappingConfig>>,
    pub haptics: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileEntry {
    Derived {
        path: String,
        extends: String,
        #[serde(default)]
        overrides: ProfileOverrides,
    },
    Base(ProfileConfig),
}

/// An ordered table of profiles, registration follows table order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileTable {
    pub profiles: Vec<ProfileEntry>,
}

impl ProfileTable {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
