//! Free-text operator commands.

use std::fmt;

use gp_core::Priority;

/// What an operator command asks for.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VoiceIntent {
    /// Weather mentioned: refresh conditions before the next route.
    Reroute,
    PrioritizeSpeed,
    EcoMode,
    AvoidIncident,
    Unknown,
}

impl VoiceIntent {
    /// Keyword match, case-insensitive.  Weather keywords win over the
    /// others so "reroute due to storm" is a reroute.
    pub fn parse(command: &str) -> Self {
        let text = command.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| text.contains(w));

        if has(&["storm", "rain"]) {
            VoiceIntent::Reroute
        } else if has(&["speed", "fast", "urgent"]) {
            VoiceIntent::PrioritizeSpeed
        } else if has(&["eco", "green", "efficien"]) {
            VoiceIntent::EcoMode
        } else if has(&["accident", "incident", "avoid"]) {
            VoiceIntent::AvoidIncident
        } else {
            VoiceIntent::Unknown
        }
    }

    /// Priority the caller should switch to, if the intent names one.
    pub fn priority(self) -> Option<Priority> {
        match self {
            VoiceIntent::PrioritizeSpeed => Some(Priority::Critical),
            VoiceIntent::EcoMode => Some(Priority::Low),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VoiceIntent::Reroute         => "reroute",
            VoiceIntent::PrioritizeSpeed => "prioritize-speed",
            VoiceIntent::EcoMode         => "eco-mode",
            VoiceIntent::AvoidIncident   => "avoid-incident",
            VoiceIntent::Unknown         => "unknown",
        }
    }
}

impl fmt::Display for VoiceIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
