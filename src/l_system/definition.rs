use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use anyhow::Result;
use csscolorparser::Color as CssColor;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};

use super::RuleSet;
use crate::symbol::DEFAULT_FORWARD_SYMBOLS;

fn default_forward_symbols() -> String {
    DEFAULT_FORWARD_SYMBOLS.to_string()
}

/// Everything needed to build an [`super::LSystem`]. This is the shape of a
/// grammar file on disk (RON), e.g.
///
/// ```text
/// (
///     axiom: "2F",
///     angle: 20.0,
///     rules: {
///         'F': [(odds: 1.0, successor: "X[++F][+F][-F][--F]")],
///         'X': [(odds: 1.0, successor: "XX")],
///     },
///     colors: {'2': "#f0faf4"},
///     generations: 4,
/// )
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GrammarDefinition {
    pub axiom: String,
    /// Turn unit in degrees.
    pub angle: f64,
    #[serde(default)]
    pub rules: HashMap<char, Vec<RuleSet>>,
    /// Color digit to stroke color. CSS strings when read from a file.
    #[serde(default)]
    pub colors: HashMap<char, CssColor>,
    #[serde(default)]
    pub generations: u32,
    /// Ceiling on the expanded string length, in symbols.
    #[serde(default)]
    pub max_length: Option<usize>,
    #[serde(default = "default_forward_symbols")]
    pub forward_symbols: String,
}

impl Default for GrammarDefinition {
    fn default() -> Self {
        Self {
            axiom: String::new(),
            angle: 90.0,
            rules: HashMap::new(),
            colors: HashMap::new(),
            generations: 0,
            max_length: None,
            forward_symbols: default_forward_symbols(),
        }
    }
}

impl GrammarDefinition {
    pub fn from_ron(data: &str) -> Result<GrammarDefinition> {
        let definition = ron::from_str(data)?;
        Ok(definition)
    }

    pub fn to_ron(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(self, PrettyConfig::default())?)
    }

    pub fn from_file(path: &Path) -> Result<GrammarDefinition> {
        let mut reader = std::fs::File::open(path)?;
        let mut data = String::new();
        reader.read_to_string(&mut data)?;
        GrammarDefinition::from_ron(&data)
    }

    pub fn to_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::l_system::LSystem;

    const DANDELION: &str = r##"(
        axiom: "2F",
        angle: 20.0,
        rules: {
            'F': [(odds: 1.0, successor: "X[++F][+F][-F][--F]")],
            'X': [(odds: 1.0, successor: "XX")],
        },
        colors: {'2': "#f0faf4"},
        generations: 4,
    )"##;

    #[test]
    fn test_parse_ron() {
        let definition = GrammarDefinition::from_ron(DANDELION).unwrap();
        assert_eq!(definition.axiom, "2F");
        assert_eq!(definition.angle, 20.0);
        assert_eq!(definition.generations, 4);
        assert_eq!(definition.max_length, None);
        assert_eq!(definition.forward_symbols, "F");
        assert_eq!(definition.rules[&'X'], vec![RuleSet::new(1.0, "XX")]);
        assert_eq!(definition.colors[&'2'].to_rgba8(), [0xf0, 0xfa, 0xf4, 0xff]);
        assert!(LSystem::try_from(definition).is_ok());
    }

    #[test]
    fn test_bad_ron_is_an_error() {
        assert!(GrammarDefinition::from_ron("(axiom: 12)").is_err());
        assert!(GrammarDefinition::from_ron(r#"(axiom: "F", angle: 1.0, colors: {'1': "not a color"})"#).is_err());
    }

    #[test]
    fn test_ron_round_trip_keeps_rules() {
        let definition = crate::l_system::presets::coniferous_tree();
        let parsed = GrammarDefinition::from_ron(&definition.to_ron().unwrap()).unwrap();
        assert_eq!(parsed.axiom, definition.axiom);
        assert_eq!(parsed.rules, definition.rules);
        assert_eq!(parsed.generations, definition.generations);
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "lindenmayer-plotter-{}.ron",
            rand::random::<u64>()
        ));
        let definition = GrammarDefinition::from_ron(DANDELION).unwrap();
        definition.to_file(&path).unwrap();
        let loaded = GrammarDefinition::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.rules, definition.rules);
        assert_eq!(loaded.axiom, definition.axiom);
    }
}
