use devmap_types::ProfilePath;

use crate::{
    config::ProfileTable, internal::paths::PathManager, registry::ProfileRegistry, types::Result,
};

pub static BUILTIN_PROFILES: &str = include_str!("builtin_profiles.json");

pub fn builtin_table() -> Result<ProfileTable> {
    ProfileTable::from_json(BUILTIN_PROFILES)
}

/**
 * Startup registration of the built-in profiles
 *
 * Order matters for matching: device class profiles first, then vendor
 * profiles (the Vive and Oculus controllers before the catch-all OpenVR
 * controller), and the generic last resort profiles at the end.
 */
pub fn register_builtin_profiles(
    registry: &mut ProfileRegistry,
    paths: &PathManager,
) -> Result<Vec<ProfilePath>> {
    let ids = registry.register_table(builtin_table()?, paths)?;
    log::info!("Registered {} built-in profiles", ids.len());
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::DeviceType, matcher::MatchTier};

    fn builtin_registry() -> ProfileRegistry {
        let paths = PathManager::new();
        let mut registry = ProfileRegistry::new();
        register_builtin_profiles(&mut registry, &paths).unwrap();
        registry
    }

    fn claim(registry: &ProfileRegistry, descriptor: &str) -> Option<(String, MatchTier)> {
        let result = registry.find_match(descriptor);
        result
            .profile()
            .map(|profile| (profile.path().to_owned(), result.tier().unwrap()))
    }

    #[test]
    fn builtin_table_compiles_in_documented_order() {
        let registry = builtin_registry();
        let paths = registry
            .get_all()
            .iter()
            .map(|profile| profile.path())
            .collect::<Vec<_>>();

        assert_eq!(paths.first(), Some(&"/profiles/standard/keyboard"));
        assert_eq!(paths.last(), Some(&"/profiles/generic/hid"));

        let vive = paths.iter().position(|path| *path == "/profiles/htc/vive_controller");
        let openvr = paths.iter().position(|path| *path == "/profiles/openvr/controller");
        assert!(vive < openvr);
    }

    #[test]
    fn builtin_claims() {
        let registry = builtin_registry();

        assert_eq!(
            claim(&registry, "interface:[HID] type:[Keyboard] manufacturer:Acme"),
            Some(("/profiles/standard/keyboard".into(), MatchTier::Specific))
        );
        assert_eq!(
            claim(&registry, "interface:[HID] type:[HID] manufacturer:Acme"),
            Some(("/profiles/generic/hid".into(), MatchTier::LastResort))
        );
        assert_eq!(
            claim(&registry, "interface:[XR] type:[HMD] product:Rift CV1"),
            Some((
                "/profiles/standard/head_mounted_display".into(),
                MatchTier::Specific
            ))
        );
        assert_eq!(
            claim(
                &registry,
                "interface:[XR] type:[Controller] product:OpenVR Controller(Vive Controller MV)"
            ),
            Some(("/profiles/htc/vive_controller".into(), MatchTier::Specific))
        );
        assert_eq!(
            claim(
                &registry,
                "interface:[XR] type:[Controller] product:OpenVR Controller(Knuckles)"
            ),
            Some(("/profiles/openvr/controller".into(), MatchTier::Specific))
        );
        assert_eq!(claim(&registry, "interface:[Serial] type:[Printer]"), None);
    }

    #[test]
    fn builtin_controllers_expose_haptics() {
        let registry = builtin_registry();
        let vive = registry
            .get_all()
            .iter()
            .find(|profile| profile.path() == "/profiles/htc/vive_controller")
            .unwrap();

        assert_eq!(vive.device_type(), DeviceType::TrackedController);
        let table = vive.build_mappings();
        let haptics = table.haptics_control().unwrap();
        assert_eq!(
            vive.control_setup().get(haptics).map(|control| control.name.as_str()),
            Some("vibration")
        );
    }
}
