use std::sync::Arc;

use strum_macros::Display;

use crate::{profile::ProfileDefinition, registry::ProfileRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum MatchTier {
    Specific,
    LastResort,
}

#[derive(Debug, Clone)]
pub enum MatchResult<'a> {
    Unclaimed,
    Claimed {
        profile: &'a Arc<ProfileDefinition>,
        tier: MatchTier,
    },
}

impl<'a> MatchResult<'a> {
    pub fn profile(&self) -> Option<&'a Arc<ProfileDefinition>> {
        match self {
            MatchResult::Unclaimed => None,
            MatchResult::Claimed { profile, .. } => Some(profile),
        }
    }

    pub fn tier(&self) -> Option<MatchTier> {
        match self {
            MatchResult::Unclaimed => None,
            MatchResult::Claimed { tier, .. } => Some(*tier),
        }
    }

    pub fn is_claimed(&self) -> bool {
        matches!(self, MatchResult::Claimed { .. })
    }
}

/**
 * Picks the profile that claims a device descriptor
 *
 * A profile whose never-match pattern hits is skipped in both passes. The first
 * pass takes the first registered profile with a matching specific pattern, the
 * second pass only runs when nothing claimed the device and does the same with
 * last resort patterns.
 */
pub fn match_descriptor<'a>(descriptor: &str, registry: &'a ProfileRegistry) -> MatchResult<'a> {
    if descriptor.is_empty() {
        return MatchResult::Unclaimed;
    }

    let result = if let Some(profile) =
        candidates(registry, descriptor).find(|profile| profile.matches_specific(descriptor))
    {
        MatchResult::Claimed {
            profile,
            tier: MatchTier::Specific,
        }
    } else if let Some(profile) =
        candidates(registry, descriptor).find(|profile| profile.matches_last_resort(descriptor))
    {
        MatchResult::Claimed {
            profile,
            tier: MatchTier::LastResort,
        }
    } else {
        MatchResult::Unclaimed
    };

    match &result {
        MatchResult::Claimed { profile, tier } => {
            log::debug!("`{descriptor}` claimed by `{}` ({tier})", profile.path())
        }
        MatchResult::Unclaimed => log::debug!("`{descriptor}` is unclaimed"),
    }

    result
}

fn candidates<'a: 'd, 'd>(
    registry: &'a ProfileRegistry,
    descriptor: &'d str,
) -> impl Iterator<Item = &'a Arc<ProfileDefinition>> + 'd {
    registry.get_all().iter().filter(move |profile| {
        let vetoed = profile.is_vetoed(descriptor);
        if vetoed {
            log::trace!("Profile `{}` vetoed `{descriptor}`", profile.path());
        }
        !vetoed
    })
}
