use devmap_types::PathFormatError;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, ProfileError>;

/// Which of the three descriptor patterns of a profile an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum PatternField {
    #[strum(serialize = "matching_patterns")]
    Matching,
    #[strum(serialize = "last_resort_pattern")]
    LastResort,
    #[strum(serialize = "never_match_pattern")]
    NeverMatch,
}

/// Configuration-time failures, reported while profiles are compiled and registered
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Invalid {field} `{pattern}` in profile `{profile}`")]
    InvalidPattern {
        profile: String,
        field: PatternField,
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("Bad Profile Path `{0}`")]
    BadPath(String, #[source] PathFormatError),
    #[error("Profile `{profile}` maps to unknown control `{control}`")]
    UnknownControl { profile: String, control: String },
    #[error("Profile `{profile}` declares control `{control}` more than once")]
    DuplicateControl { profile: String, control: String },
    #[error("Profile `{profile}` maps raw control index {index} more than once")]
    DuplicateMapping { profile: String, index: i32 },
    #[error("Profile `{profile}` extends unknown profile `{parent}`")]
    UnknownParent { profile: String, parent: String },
    #[error("Malformed profile table")]
    Config(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("Mapping table was already finalized")]
    AlreadyBuilt,
}
