use crate::command::CommandSpec;
use crate::core::types::InitKind;
use crate::services::traits::{Action, InitDriver};

pub struct SystemdDriver;

impl InitDriver for SystemdDriver {
    fn kind(&self) -> InitKind {
        InitKind::Systemd
    }

    fn binary(&self) -> &'static str {
        "systemctl"
    }

    // `systemctl status` pages and colours when attached to a terminal;
    // neither happens with piped output
    fn command(&self, action: Action, service: &str) -> CommandSpec {
        CommandSpec::new("systemctl").args([action.as_str(), service])
    }
}
