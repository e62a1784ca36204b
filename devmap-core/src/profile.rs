use devmap_types::ProfilePath;
use regex::Regex;

use crate::{
    config::{DeviceType, NodeRemap, ProfileConfig, RemapConfig, UnmappedPolicy},
    internal::paths::PathManager,
    mapping::{ControlSetup, MappingTable, MappingTableBuilder},
    types::{PatternField, ProfileError, Result},
};

/// How a profile treats the events of devices it claims
#[derive(Debug, Clone, PartialEq)]
pub enum RemapBehavior {
    /// Generic and fallback profiles never interfere with events
    PassThrough,
    /// Rewrites platform tracking node ids to the profile's own node enumeration
    TrackingNodes(Vec<NodeRemap>),
    /// Routes float control events through the device's mapping table
    Mapped { suppress_tracking: bool },
}

/**
 * A compiled, immutable profile
 *
 * Every pattern has been validated and every mapping resolved against the
 * control setup, so nothing here can fail once registered.
 */
#[derive(Debug)]
pub struct ProfileDefinition {
    pub id: ProfilePath,
    pub config: ProfileConfig,
    matching_patterns: Vec<Regex>,
    last_resort_pattern: Option<Regex>,
    never_match_pattern: Option<Regex>,
    behavior: RemapBehavior,
    setup: ControlSetup,
    mapping_template: MappingTable,
}

impl ProfileDefinition {
    pub fn compile(config: ProfileConfig, paths: &PathManager) -> Result<Self> {
        let id = paths
            .get_path(&config.path)
            .map_err(|err| ProfileError::BadPath(config.path.clone(), err))?;

        let compile = |field: PatternField, pattern: &str| {
            Regex::new(pattern).map_err(|source| ProfileError::InvalidPattern {
                profile: config.path.clone(),
                field,
                pattern: pattern.to_owned(),
                source,
            })
        };

        let matching_patterns = config
            .matching_patterns
            .iter()
            .map(|pattern| compile(PatternField::Matching, pattern))
            .collect::<Result<Vec<_>>>()?;
        let last_resort_pattern = config
            .last_resort_pattern
            .as_deref()
            .map(|pattern| compile(PatternField::LastResort, pattern))
            .transpose()?;
        let never_match_pattern = config
            .never_match_pattern
            .as_deref()
            .map(|pattern| compile(PatternField::NeverMatch, pattern))
            .transpose()?;

        let setup = ControlSetup::new(&config.path, &config.controls)?;

        let mut builder = MappingTableBuilder::new(&config.path, &setup);
        for mapping in &config.mappings {
            builder.map(mapping.source, &mapping.target, mapping.remap)?;
        }
        if let Some(haptics) = &config.haptics {
            builder.haptics(haptics)?;
        }
        let mapping_template = builder.finish_mappings();

        let behavior = match &config.remap {
            RemapConfig::PassThrough => RemapBehavior::PassThrough,
            RemapConfig::TrackingNodes { nodes } => RemapBehavior::TrackingNodes(nodes.clone()),
            RemapConfig::Mapped { suppress_tracking } => RemapBehavior::Mapped {
                suppress_tracking: *suppress_tracking,
            },
        };

        Ok(Self {
            id,
            matching_patterns,
            last_resort_pattern,
            never_match_pattern,
            behavior,
            setup,
            mapping_template,
            config,
        })
    }

    pub fn path(&self) -> &str {
        &self.config.path
    }

    pub fn display_name(&self) -> &str {
        &self.config.display_name
    }

    pub fn device_type(&self) -> DeviceType {
        self.config.device_type
    }

    pub fn behavior(&self) -> &RemapBehavior {
        &self.behavior
    }

    pub fn unmapped_policy(&self) -> UnmappedPolicy {
        self.config.unmapped
    }

    pub fn control_setup(&self) -> &ControlSetup {
        &self.setup
    }

    /// Veto check, a vetoed profile never claims the descriptor
    pub fn is_vetoed(&self, descriptor: &str) -> bool {
        self.never_match_pattern
            .as_ref()
            .map_or(false, |regex| regex.is_match(descriptor))
    }

    pub fn matches_specific(&self, descriptor: &str) -> bool {
        self.matching_patterns
            .iter()
            .any(|regex| regex.is_match(descriptor))
    }

    pub fn matches_last_resort(&self, descriptor: &str) -> bool {
        self.last_resort_pattern
            .as_ref()
            .map_or(false, |regex| regex.is_match(descriptor))
    }

    /// Builds a fresh mapping table for one device instance
    pub fn build_mappings(&self) -> MappingTable {
        self.mapping_template.clone()
    }
}
