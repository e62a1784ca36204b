use std::{collections::HashMap, sync::Arc};

use devmap_types::ProfilePath;

use crate::{
    config::{ProfileConfig, ProfileEntry, ProfileTable},
    internal::paths::PathManager,
    matcher::{self, MatchResult},
    profile::ProfileDefinition,
    types::{ProfileError, Result},
};

/**
 * Ordered set of compiled profiles
 *
 * Registration order is the tie-break for matching, so it happens once during
 * startup from an explicit routine. Afterwards the registry is shared read-only.
 */
#[derive(Debug, Default)]
pub struct ProfileRegistry {
    profiles: Vec<Arc<ProfileDefinition>>,
    index: HashMap<ProfilePath, usize>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registering an identity that is already present replaces it in place
    pub fn register(&mut self, definition: ProfileDefinition) -> ProfilePath {
        let id = definition.id;
        let definition = Arc::new(definition);

        match self.index.get(&id) {
            Some(&idx) => {
                log::warn!(
                    "Profile `{}` registered more than once, replacing previous definition",
                    definition.path()
                );
                self.profiles[idx] = definition;
            }
            None => {
                log::debug!("Registered profile `{}`", definition.path());
                self.index.insert(id, self.profiles.len());
                self.profiles.push(definition);
            }
        }

        id
    }

    pub fn register_config(
        &mut self,
        config: ProfileConfig,
        paths: &PathManager,
    ) -> Result<ProfilePath> {
        Ok(self.register(ProfileDefinition::compile(config, paths)?))
    }

    /**
     * Registers a whole table in order
     *
     * Derived entries may extend any profile registered before them, including
     * earlier entries of the same table. Every entry is compiled before the
     * first one is registered, so a failing table leaves the registry untouched.
     */
    pub fn register_table(
        &mut self,
        table: ProfileTable,
        paths: &PathManager,
    ) -> Result<Vec<ProfilePath>> {
        let mut pending: Vec<ProfileDefinition> = Vec::with_capacity(table.profiles.len());

        for entry in table.profiles {
            let config = match entry {
                ProfileEntry::Base(config) => config,
                ProfileEntry::Derived {
                    path,
                    extends,
                    overrides,
                } => {
                    let parent = paths
                        .get_path(&extends)
                        .ok()
                        .and_then(|parent| {
                            pending
                                .iter()
                                .rev()
                                .find(|definition| definition.id == parent)
                                .or_else(|| self.get(parent).map(Arc::as_ref))
                        })
                        .ok_or_else(|| ProfileError::UnknownParent {
                            profile: path.clone(),
                            parent: extends.clone(),
                        })?;
                    parent.config.with_overrides(path, overrides)
                }
            };
            pending.push(ProfileDefinition::compile(config, paths)?);
        }

        Ok(pending
            .into_iter()
            .map(|definition| self.register(definition))
            .collect())
    }

    pub fn get(&self, id: ProfilePath) -> Option<&Arc<ProfileDefinition>> {
        self.index.get(&id).and_then(|idx| self.profiles.get(*idx))
    }

    pub fn get_all(&self) -> &[Arc<ProfileDefinition>] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn find_match(&self, descriptor: &str) -> MatchResult<'_> {
        matcher::match_descriptor(descriptor, self)
    }
}
