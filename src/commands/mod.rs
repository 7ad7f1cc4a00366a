pub mod run;
pub mod version;

pub use run::RunCommand;
pub use version::VersionCommand;
