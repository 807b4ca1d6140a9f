/// Version stamp shown by `user_admin_cli version`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    /// Short hash, suffixed `-dirty` for uncommitted trees.
    pub commit: &'static str,
    pub built: &'static str,
    pub profile: &'static str,
}

impl BuildMetadata {
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("user_admin {} ({})", self.version, self.profile),
            format!("commit {}", self.commit),
            format!("built  {}", self.built),
        ]
    }
}

pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        commit: option_env!("USER_ADMIN_COMMIT").unwrap_or("unknown"),
        built: option_env!("USER_ADMIN_BUILT").unwrap_or("unknown"),
        profile: option_env!("USER_ADMIN_PROFILE").unwrap_or("unknown"),
    }
}
