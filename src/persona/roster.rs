// src/persona/roster.rs — Party roster from exported actor sheets

use std::fmt;

/// One party member (or familiar) as it appears in the roster line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: String,
    /// Rendered level, or `None` when the sheet has none.
    pub level: Option<String>,
}

impl fmt::Display for RosterEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Lv {})",
            self.name,
            self.level.as_deref().unwrap_or("?")
        )
    }
}

/// Parse one actor export.
///
/// Name comes from `name`, falling back to `prototypeToken.name`; level from
/// `system.details.level.value`. A sheet with neither name is malformed.
pub fn parse_actor(json: &str) -> Result<RosterEntry, String> {
    let data: serde_json::Value =
        serde_json::from_str(json).map_err(|e| format!("invalid actor JSON: {}", e))?;

    if !data.is_object() {
        return Err("actor export must be a JSON object".into());
    }

    let name = non_empty_str(&data["name"])
        .or_else(|| non_empty_str(&data["prototypeToken"]["name"]))
        .ok_or_else(|| "actor has no name or prototypeToken.name".to_string())?;

    let level = match &data["system"]["details"]["level"]["value"] {
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    };

    Ok(RosterEntry { name, level })
}

fn non_empty_str(value: &serde_json::Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// "Party roster: A (Lv 3), B (Lv ?)"
pub fn roster_summary(entries: &[RosterEntry]) -> String {
    let names: Vec<String> = entries.iter().map(ToString::to_string).collect();
    format!("Party roster: {}", names.join(", "))
}
