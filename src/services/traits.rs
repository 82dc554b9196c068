use crate::command::CommandSpec;
use crate::core::types::InitKind;

/// Verbs every init system understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Stop,
    Status,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Status => "status",
        }
    }
}

/// One init system's command line for managing a named service
pub trait InitDriver: Send + Sync {
    fn kind(&self) -> InitKind;

    /// Binary that must be on PATH for the driver to work
    fn binary(&self) -> &'static str;

    fn command(&self, action: Action, service: &str) -> CommandSpec;
}
