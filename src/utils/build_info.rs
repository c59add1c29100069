use std::fmt;

/// Build metadata embedded by `build.rs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            git_hash: env!("SPLITLEDGER_BUILD_HASH"),
            timestamp: env!("SPLITLEDGER_BUILD_TIMESTAMP"),
            target: env!("SPLITLEDGER_BUILD_TARGET"),
            profile: env!("SPLITLEDGER_BUILD_PROFILE"),
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "splitledger {} ({}, built {} for {} [{}])",
            self.version, self.git_hash, self.timestamp, self.target, self.profile
        )
    }
}
