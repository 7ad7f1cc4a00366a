use clap::Args;

use crate::constants::APP_NAME;

/// Build metadata shown by `version`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub commit: &'static str,
    pub date: &'static str,
    pub os: &'static str,
    pub arch: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            commit: option_env!("ASSUME_SPOKE_ROLE_COMMIT").unwrap_or("unknown"),
            date: option_env!("ASSUME_SPOKE_ROLE_BUILD_DATE").unwrap_or("unknown"),
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
        }
    }

    pub fn render(&self) -> String {
        [
            format!("{APP_NAME} {} ({}/{})", self.version, self.os, self.arch),
            String::new(),
            format!("  Version:    {}", self.version),
            format!("  Commit:     {}", self.commit),
            format!("  Build date: {}", self.date),
            format!("  OS/Arch:    {}/{}", self.os, self.arch),
        ]
        .join("\n")
    }
}

#[derive(Debug, Clone, Args)]
pub struct VersionCommand {}

impl VersionCommand {
    pub fn execute(self) {
        println!("{}", BuildInfo::current().render());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_build_info() {
        let info = BuildInfo::current();
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert!(!info.commit.is_empty());
        assert!(!info.date.is_empty());
    }

    #[test]
    fn test_render() {
        let info = BuildInfo {
            version: "1.2.3",
            commit: "abc1234",
            date: "2024-05-01",
            os: "linux",
            arch: "x86_64",
        };

        let rendered = info.render();
        assert!(rendered.starts_with("assume-spoke-role 1.2.3 (linux/x86_64)"));
        assert!(rendered.contains("Commit:     abc1234"));
        assert!(rendered.contains("Build date: 2024-05-01"));
    }
}
