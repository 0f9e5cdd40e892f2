//! Subsystem capabilities and allowlist filtering.
//!
//! The startup event carries allowlist patterns deciding which optional
//! subsystems initialize and which device types may attach. Patterns are
//! `|`-separated alternatives matched anywhere in the tag; `*` matches any
//! run of characters. The matching mechanism stays behind
//! [`CapabilityFilter::allows`] so callers never depend on it.

/// Optional subsystem capabilities.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    LogicDevice,
    LogicDecode,
    RadioDevice,
    RadioDecode,
    RadioSpectrum,
    SignalRecord,
}

impl Capability {
    /// Stable tag tested against allowlist patterns.
    pub fn tag(self) -> &'static str {
        match self {
            Self::LogicDevice => "logic.device",
            Self::LogicDecode => "logic.decode",
            Self::RadioDevice => "radio.device",
            Self::RadioDecode => "radio.decode",
            Self::RadioSpectrum => "radio.spectrum",
            Self::SignalRecord => "signal.record",
        }
    }
}

/// Compiled allowlist pattern.
#[derive(Clone, Debug)]
pub struct CapabilityFilter {
    alternatives: Vec<Vec<String>>,
}

impl CapabilityFilter {
    /// Compile a pattern of `|`-separated alternatives. Each alternative may
    /// contain `*` wildcards and matches anywhere inside the tested tag. An
    /// empty pattern matches everything.
    pub fn new(pattern: &str) -> Self {
        let alternatives = pattern
            .split('|')
            .map(|alt| alt.split('*').map(str::to_owned).collect())
            .collect();

        Self { alternatives }
    }

    /// Filter admitting every tag.
    pub fn allow_all() -> Self {
        Self::new("")
    }

    /// Whether the tag matches any alternative.
    pub fn allows(&self, tag: &str) -> bool {
        self.alternatives.iter().any(|segments| {
            let mut rest = tag;
            for segment in segments {
                match rest.find(segment.as_str()) {
                    Some(at) => rest = &rest[at + segment.len()..],
                    None => return false,
                }
            }
            true
        })
    }

    /// Whether the capability's tag matches.
    pub fn allows_capability(&self, capability: Capability) -> bool {
        self.allows(capability.tag())
    }
}
