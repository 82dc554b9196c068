use crate::command::CommandSpec;
use crate::core::types::InitKind;
use crate::services::traits::{Action, InitDriver};

pub struct SysvDriver;

impl InitDriver for SysvDriver {
    fn kind(&self) -> InitKind {
        InitKind::Sysv
    }

    fn binary(&self) -> &'static str {
        "service"
    }

    // The verb goes after the service name here
    fn command(&self, action: Action, service: &str) -> CommandSpec {
        CommandSpec::new("service").args([service, action.as_str()])
    }
}
