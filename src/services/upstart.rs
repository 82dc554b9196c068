use crate::command::CommandSpec;
use crate::core::types::InitKind;
use crate::services::traits::{Action, InitDriver};

pub struct UpstartDriver;

impl InitDriver for UpstartDriver {
    fn kind(&self) -> InitKind {
        InitKind::Upstart
    }

    fn binary(&self) -> &'static str {
        "initctl"
    }

    fn command(&self, action: Action, service: &str) -> CommandSpec {
        CommandSpec::new("initctl").args([action.as_str(), service])
    }
}
