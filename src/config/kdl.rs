use crate::config::Settings;
use crate::core::types::InitKind;
use crate::error::{HostspecError, Result};
use crate::services::SignatureState;
use kdl::{KdlDocument, KdlEntry, KdlNode};
use std::time::Duration;

/// Parse a settings document on top of the defaults
///
/// ```kdl
/// timeout 120
/// signature "systemd" {
///     running "active (running)"
///     stopped "inactive (dead)"
/// }
/// ```
pub fn parse_settings(content: &str) -> Result<Settings> {
    let doc: KdlDocument = content.parse().map_err(|e: kdl::KdlError| {
        let err_msg = e.to_string();
        let hint = if err_msg.contains("unexpected end of file") {
            "\nHint: You might be missing a closing brace '}'."
        } else {
            ""
        };
        HostspecError::ConfigError(format!("KDL parsing error: {}{}", err_msg, hint))
    })?;

    let mut settings = Settings::default();

    for node in doc.nodes() {
        match node.name().value() {
            "timeout" => settings.command_timeout = parse_timeout(node)?,
            "signature" | "signatures" => parse_signature(node, &mut settings)?,
            _ => {
                // Ignore unknown nodes for forward compatibility
            }
        }
    }

    Ok(settings)
}

fn parse_timeout(node: &KdlNode) -> Result<Option<Duration>> {
    let secs = node
        .entries()
        .first()
        .and_then(|entry| entry.value().as_integer())
        .ok_or_else(|| {
            HostspecError::ConfigError(
                "Timeout requires a number of seconds. Usage: timeout 120".to_string(),
            )
        })?;

    let secs = u64::try_from(secs).map_err(|_| {
        HostspecError::ConfigError(format!("Timeout must not be negative, got {}", secs))
    })?;

    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}

fn parse_signature(node: &KdlNode, settings: &mut Settings) -> Result<()> {
    let init_name = node
        .entries()
        .iter()
        .find(|entry| entry.name().is_none())
        .and_then(|entry| entry.value().as_string())
        .ok_or_else(|| {
            HostspecError::ConfigError(
                "Init system name required. Usage: signature \"systemd\" { ... }".to_string(),
            )
        })?;
    let kind: InitKind = init_name
        .parse()
        .map_err(|e: HostspecError| HostspecError::ConfigError(e.to_string()))?;

    // Inline form: signature "sysv" running="..." stopped="..."
    for entry in node.entries() {
        if let Some(name) = entry.name() {
            set_signature(settings, kind, name.value(), entry)?;
        }
    }

    // Block form
    if let Some(children) = node.children() {
        for child in children.nodes() {
            let entry = child.entries().first().ok_or_else(|| {
                HostspecError::ConfigError(format!(
                    "Signature text required for '{}' in signature \"{}\"",
                    child.name().value(),
                    kind
                ))
            })?;
            set_signature(settings, kind, child.name().value(), entry)?;
        }
    }

    Ok(())
}

fn set_signature(settings: &mut Settings, kind: InitKind, state: &str, entry: &KdlEntry) -> Result<()> {
    let state = match state {
        "running" => SignatureState::Running,
        "stopped" => SignatureState::Stopped,
        other => {
            return Err(HostspecError::ConfigError(format!(
                "Unknown state '{}' in signature \"{}\". Valid: running, stopped",
                other, kind
            )));
        }
    };

    let text = entry.value().as_string().ok_or_else(|| {
        HostspecError::ConfigError(format!(
            "Signature for {} {} must be a string",
            kind,
            state.as_str()
        ))
    })?;
    if text.is_empty() {
        return Err(HostspecError::ConfigError(format!(
            "Signature for {} {} must not be empty",
            kind,
            state.as_str()
        )));
    }

    settings.signatures.set(state, kind, text);
    Ok(())
}

#[cfg(test)]
#[path = "kdl_tests.rs"]
mod tests;
