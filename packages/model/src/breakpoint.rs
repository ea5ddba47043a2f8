//! # Breakpoints
//!
//! Responsive style buckets and the fallback order used when a tag has no
//! style for the breakpoint being rendered.
//!
//! ## Fallback order
//!
//! ```text
//! exact → adjacent (mob↔tab, wide↔ultra) → pc → first set of pc, mob, tab, wide, ultra
//! ```
//!
//! Empty strings count as unset.

use crate::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five responsive style buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Pc,
    Mob,
    Tab,
    Wide,
    Ultra,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 5] = [
        Breakpoint::Pc,
        Breakpoint::Mob,
        Breakpoint::Tab,
        Breakpoint::Wide,
        Breakpoint::Ultra,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Breakpoint::Pc => "pc",
            Breakpoint::Mob => "mob",
            Breakpoint::Tab => "tab",
            Breakpoint::Wide => "wide",
            Breakpoint::Ultra => "ultra",
        }
    }

    /// The breakpoint whose style is borrowed first when this one has none
    pub fn adjacent(self) -> Option<Breakpoint> {
        match self {
            Breakpoint::Mob => Some(Breakpoint::Tab),
            Breakpoint::Tab => Some(Breakpoint::Mob),
            Breakpoint::Wide => Some(Breakpoint::Ultra),
            Breakpoint::Ultra => Some(Breakpoint::Wide),
            Breakpoint::Pc => None,
        }
    }

    /// Breakpoints to consult, in order, when resolving the effective style.
    /// May repeat entries; the first set style wins.
    pub fn resolution_order(self) -> impl Iterator<Item = Breakpoint> {
        std::iter::once(self)
            .chain(self.adjacent())
            .chain(std::iter::once(Breakpoint::Pc))
            .chain(Breakpoint::ALL)
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Breakpoint {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Breakpoint::ALL
            .into_iter()
            .find(|bp| bp.as_str() == s)
            .ok_or_else(|| ModelError::UnknownBreakpoint(s.to_string()))
    }
}

/// Per-breakpoint style payloads of a tag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Styles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pc_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mob_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wide_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ultra_style: Option<String>,
}

impl Styles {
    pub fn pc(style: impl Into<String>) -> Self {
        Self {
            pc_style: Some(style.into()),
            ..Self::default()
        }
    }

    /// Style stored for exactly this breakpoint (empty counts as unset)
    pub fn get(&self, breakpoint: Breakpoint) -> Option<&str> {
        self.slot(breakpoint)
            .as_deref()
            .filter(|style| !style.is_empty())
    }

    /// Overwrite one breakpoint; an empty string clears it
    pub fn set(&mut self, breakpoint: Breakpoint, style: impl Into<String>) {
        let style = style.into();
        *self.slot_mut(breakpoint) = if style.is_empty() { None } else { Some(style) };
    }

    /// Style to render at `breakpoint`, following the fallback order
    pub fn effective(&self, breakpoint: Breakpoint) -> &str {
        breakpoint
            .resolution_order()
            .find_map(|bp| self.get(bp))
            .unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        Breakpoint::ALL.iter().all(|bp| self.get(*bp).is_none())
    }

    fn slot(&self, breakpoint: Breakpoint) -> &Option<String> {
        match breakpoint {
            Breakpoint::Pc => &self.pc_style,
            Breakpoint::Mob => &self.mob_style,
            Breakpoint::Tab => &self.tab_style,
            Breakpoint::Wide => &self.wide_style,
            Breakpoint::Ultra => &self.ultra_style,
        }
    }

    fn slot_mut(&mut self, breakpoint: Breakpoint) -> &mut Option<String> {
        match breakpoint {
            Breakpoint::Pc => &mut self.pc_style,
            Breakpoint::Mob => &mut self.mob_style,
            Breakpoint::Tab => &mut self.tab_style,
            Breakpoint::Wide => &mut self.wide_style,
            Breakpoint::Ultra => &mut self.ultra_style,
        }
    }
}

/// A boolean per breakpoint, e.g. whether a carousel shows its navigation controls.
///
/// Deserializes from either a per-breakpoint record or a bare boolean
/// (pages saved before controls became responsive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FlagsRepr")]
pub struct BreakpointFlags {
    pub pc: bool,
    pub mob: bool,
    pub tab: bool,
    pub wide: bool,
    pub ultra: bool,
}

impl BreakpointFlags {
    pub fn all(value: bool) -> Self {
        Self {
            pc: value,
            mob: value,
            tab: value,
            wide: value,
            ultra: value,
        }
    }

    pub fn get(&self, breakpoint: Breakpoint) -> bool {
        match breakpoint {
            Breakpoint::Pc => self.pc,
            Breakpoint::Mob => self.mob,
            Breakpoint::Tab => self.tab,
            Breakpoint::Wide => self.wide,
            Breakpoint::Ultra => self.ultra,
        }
    }

    pub fn set(&mut self, breakpoint: Breakpoint, value: bool) {
        match breakpoint {
            Breakpoint::Pc => self.pc = value,
            Breakpoint::Mob => self.mob = value,
            Breakpoint::Tab => self.tab = value,
            Breakpoint::Wide => self.wide = value,
            Breakpoint::Ultra => self.ultra = value,
        }
    }
}

impl Default for BreakpointFlags {
    fn default() -> Self {
        Self::all(true)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagsRepr {
    All(bool),
    Each {
        #[serde(default)]
        pc: bool,
        #[serde(default)]
        mob: bool,
        #[serde(default)]
        tab: bool,
        #[serde(default)]
        wide: bool,
        #[serde(default)]
        ultra: bool,
    },
}

impl From<FlagsRepr> for BreakpointFlags {
    fn from(repr: FlagsRepr) -> Self {
        match repr {
            FlagsRepr::All(value) => BreakpointFlags::all(value),
            FlagsRepr::Each { pc, mob, tab, wide, ultra } => BreakpointFlags { pc, mob, tab, wide, ultra },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styles(pairs: &[(Breakpoint, &str)]) -> Styles {
        let mut styles = Styles::default();
        for (bp, style) in pairs {
            styles.set(*bp, *style);
        }
        styles
    }

    #[test]
    fn test_exact_breakpoint_wins() {
        let s = styles(&[(Breakpoint::Pc, "a"), (Breakpoint::Mob, "b"), (Breakpoint::Tab, "c")]);
        assert_eq!(s.effective(Breakpoint::Mob), "b");
        assert_eq!(s.effective(Breakpoint::Tab), "c");
        assert_eq!(s.effective(Breakpoint::Pc), "a");
    }

    #[test]
    fn test_adjacent_pairs_before_pc() {
        let s = styles(&[(Breakpoint::Pc, "pc"), (Breakpoint::Tab, "tab"), (Breakpoint::Ultra, "ultra")]);
        assert_eq!(s.effective(Breakpoint::Mob), "tab");
        assert_eq!(s.effective(Breakpoint::Wide), "ultra");
    }

    #[test]
    fn test_pc_before_unrelated() {
        let s = styles(&[(Breakpoint::Pc, "pc"), (Breakpoint::Wide, "wide")]);
        assert_eq!(s.effective(Breakpoint::Mob), "pc");
    }

    #[test]
    fn test_any_other_as_last_resort() {
        let s = styles(&[(Breakpoint::Wide, "wide")]);
        assert_eq!(s.effective(Breakpoint::Mob), "wide");
        assert_eq!(s.effective(Breakpoint::Pc), "wide");

        assert_eq!(Styles::default().effective(Breakpoint::Tab), "");
    }

    #[test]
    fn test_empty_string_counts_as_unset() {
        let s = Styles {
            mob_style: Some(String::new()),
            pc_style: Some("pc".to_string()),
            ..Styles::default()
        };
        assert_eq!(s.effective(Breakpoint::Mob), "pc");
    }

    #[test]
    fn test_set_touches_one_field() {
        let mut s = styles(&[(Breakpoint::Pc, "a"), (Breakpoint::Wide, "w")]);
        s.set(Breakpoint::Mob, "m");
        assert_eq!(s.pc_style.as_deref(), Some("a"));
        assert_eq!(s.wide_style.as_deref(), Some("w"));
        assert_eq!(s.mob_style.as_deref(), Some("m"));

        s.set(Breakpoint::Mob, "");
        assert_eq!(s.mob_style, None);
    }

    #[test]
    fn test_breakpoint_parse() {
        assert_eq!("ultra".parse::<Breakpoint>().unwrap(), Breakpoint::Ultra);
        assert!("desktop".parse::<Breakpoint>().is_err());
    }

    #[test]
    fn test_flags_accept_bare_bool() {
        let flags: BreakpointFlags = serde_json::from_str("false").unwrap();
        assert_eq!(flags, BreakpointFlags::all(false));

        let flags: BreakpointFlags = serde_json::from_str(r#"{"pc": true, "mob": false}"#).unwrap();
        assert!(flags.get(Breakpoint::Pc));
        assert!(!flags.get(Breakpoint::Mob));
        assert!(!flags.get(Breakpoint::Ultra));
    }

    #[test]
    fn test_styles_serialize_with_original_keys() {
        let json = serde_json::to_value(Styles::pc("color: red")).unwrap();
        assert_eq!(json, serde_json::json!({ "pcStyle": "color: red" }));
    }
}
