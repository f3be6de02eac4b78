use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use bevy_ecs::resource::Resource;

const DEFAULT_STRINGS: &[(&str, &str)] = &[
    (
        "handheld-light-component-on-examine-is-on-message",
        "The light is currently [color=darkgreen]on[/color].",
    ),
    (
        "handheld-light-component-on-examine-is-off-message",
        "The light is currently [color=darkred]off[/color].",
    ),
    (
        "handheld-light-component-cell-missing-message",
        "Missing power cell...",
    ),
    ("handheld-light-component-cell-dead-message", "Dead cell..."),
    ("verb-common-toggle-light", "Toggle light"),
    (
        "salvage-expedition-announcement-countdown-minutes",
        "{ $duration } minutes remaining to complete the expedition.",
    ),
    (
        "salvage-expedition-announcement-countdown-seconds",
        "{ $duration } seconds remaining to complete the expedition.",
    ),
    (
        "salvage-expedition-announcement-dungeon",
        "Dungeon is located to the { $direction }.",
    ),
    (
        "salvage-expedition-structure-remaining",
        "{ $count } structures remaining.",
    ),
    ("salvage-expedition-completed", "Expedition is completed."),
];

/// String table keyed by message id, with `{ $name }` placeholders.
#[derive(Resource, Debug, Clone)]
pub struct Localization {
    strings: HashMap<String, String>,
}

impl Default for Localization {
    fn default() -> Self {
        Self {
            strings: DEFAULT_STRINGS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl Localization {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.strings.insert(key.into(), template.into());
    }

    /// Merge overrides from a flat JSON object of `id -> template`.
    pub fn load_json(&mut self, path: &Path) -> io::Result<usize> {
        let text = fs::read_to_string(path)?;
        let overrides: HashMap<String, String> = serde_json::from_str(&text)?;
        let count = overrides.len();
        self.strings.extend(overrides);
        Ok(count)
    }

    /// Format message `key`. Unknown ids format as the id itself.
    pub fn get_string(&self, key: &str, args: &[(&str, &dyn fmt::Display)]) -> String {
        let Some(template) = self.strings.get(key) else {
            tracing::warn!("missing localization string '{key}'");
            return key.to_string();
        };

        let mut out = template.clone();
        for (name, value) in args {
            let value = value.to_string();
            out = out
                .replace(&format!("{{ ${name} }}"), &value)
                .replace(&format!("{{${name}}}"), &value);
        }
        out
    }
}
