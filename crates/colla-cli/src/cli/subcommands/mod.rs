mod ai;
mod backup;
mod env;

pub use ai::AiCommands;
pub use backup::BackupCommands;
pub use env::EnvCommands;
