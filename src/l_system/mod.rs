//! The l_system module provides a stochastic Lindenmayer generator for use with
//! plotted line-art. Take a look at the [`crate::l_system::LSystem`] struct for
//! more details, and examples.

use std::collections::HashMap;

use csscolorparser::Color as CssColor;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{ConfigurationError, ResourceLimitError};
use crate::symbol::{Alphabet, Symbol};

pub mod definition;
pub mod presets;

pub use definition::GrammarDefinition;

/// One weighted alternative for rewriting a symbol.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RuleSet {
    /// Relative weight. Selection probability is `odds / sum(odds)`.
    pub odds: f64,
    pub successor: String,
}

impl RuleSet {
    pub fn new(odds: f64, successor: impl Into<String>) -> RuleSet {
        RuleSet {
            odds,
            successor: successor.into(),
        }
    }
}

/// Picks one index out of a list of weights.
///
/// Any [`rand::RngCore`] is a `Chooser`, sampling proportionally to the
/// weights. Tests can plug in their own to script exact selections.
///
/// The `RngCore` implementation returns 0 for weights it cannot sample from:
/// an empty list, negative or NaN entries, all zeros, or a sum that
/// overflows. [`LSystem`] rejects all of those before expanding.
pub trait Chooser {
    fn choose(&mut self, weights: &[f64]) -> usize;
}

impl<R: RngCore + ?Sized> Chooser for R {
    fn choose(&mut self, weights: &[f64]) -> usize {
        // WeightedIndex panics rather than erroring on an infinite total
        if !weights.iter().sum::<f64>().is_finite() {
            return 0;
        }
        match WeightedIndex::new(weights) {
            Ok(dist) => dist.sample(self),
            Err(_) => 0,
        }
    }
}

#[derive(Clone, Debug)]
struct Production {
    alternatives: Vec<RuleSet>,
    weights: Vec<f64>,
}

impl Production {
    fn pick<C: Chooser + ?Sized>(&self, chooser: &mut C) -> &str {
        let index = match self.alternatives.len() {
            1 => 0,
            len => chooser.choose(&self.weights).min(len - 1),
        };
        &self.alternatives[index].successor
    }
}

/// # LSystem
///
/// A validated, immutable L-system grammar: axiom, turn angle, weighted rewrite
/// rules and the color table used by the turtle. Build it from a
/// [`GrammarDefinition`]; a bad definition is rejected up front with a
/// [`ConfigurationError`], so expansion and rendering never have to deal
/// with it.
///
/// # Example
///
/// ```rust
/// use lindenmayer_plotter::l_system::{GrammarDefinition, LSystem, RuleSet};
/// use std::collections::HashMap;
///
/// let algae = LSystem::try_from(GrammarDefinition {
///     axiom: "A".to_string(),
///     rules: HashMap::from([
///         ('A', vec![RuleSet::new(1.0, "AB")]),
///         ('B', vec![RuleSet::new(1.0, "A")])]),
///     generations: 5,
///     ..Default::default()
/// }).unwrap();
///
/// assert_eq!(algae.expand_seeded(0).unwrap(), "ABAABABAABAAB");
/// ```
#[derive(Clone, Debug)]
pub struct LSystem {
    axiom: String,
    angle: f64,
    rules: HashMap<char, Production>,
    colors: HashMap<char, CssColor>,
    generations: u32,
    max_length: Option<usize>,
    alphabet: Alphabet,
}

impl TryFrom<GrammarDefinition> for LSystem {
    type Error = ConfigurationError;

    fn try_from(definition: GrammarDefinition) -> Result<Self, Self::Error> {
        let alphabet = Alphabet::new(&definition.forward_symbols)?;

        let mut symbols: Vec<char> = definition.rules.keys().copied().collect();
        symbols.sort_unstable();

        for symbol in &symbols {
            let alternatives = &definition.rules[symbol];
            if alternatives.is_empty() {
                return Err(ConfigurationError::EmptyRuleSet(*symbol));
            }
            for rule in alternatives {
                if !rule.odds.is_finite() || rule.odds < 0.0 {
                    return Err(ConfigurationError::InvalidOdds {
                        symbol: *symbol,
                        odds: rule.odds,
                    });
                }
            }
            if !alternatives.iter().map(|rule| rule.odds).sum::<f64>().is_finite() {
                return Err(ConfigurationError::OddsOverflow(*symbol));
            }
            if alternatives.len() > 1 && alternatives.iter().all(|rule| rule.odds == 0.0) {
                return Err(ConfigurationError::ZeroOdds(*symbol));
            }
        }

        check_colors(&alphabet, &definition.colors, &definition.axiom, "the axiom")?;
        for symbol in &symbols {
            for (i, rule) in definition.rules[symbol].iter().enumerate() {
                let location = format!("rule '{}' alternative {}", symbol, i);
                check_colors(&alphabet, &definition.colors, &rule.successor, &location)?;
            }
        }

        let rules = definition
            .rules
            .into_iter()
            .map(|(symbol, alternatives)| {
                let weights = alternatives.iter().map(|rule| rule.odds).collect();
                (
                    symbol,
                    Production {
                        alternatives,
                        weights,
                    },
                )
            })
            .collect();

        Ok(LSystem {
            axiom: definition.axiom,
            angle: definition.angle,
            rules,
            colors: definition.colors,
            generations: definition.generations,
            max_length: definition.max_length,
            alphabet,
        })
    }
}

/// Every color digit in `text` must resolve. A digit directly in front of a
/// turn gets a warning, it reads like a turn multiplier but is a color switch.
fn check_colors(
    alphabet: &Alphabet,
    colors: &HashMap<char, CssColor>,
    text: &str,
    location: &str,
) -> Result<(), ConfigurationError> {
    let mut previous: Option<char> = None;
    for symbol in alphabet.tokenize(text) {
        match symbol {
            Symbol::ColorSelect(c) => {
                if !colors.contains_key(&c) {
                    return Err(ConfigurationError::UnresolvedColor {
                        symbol: c,
                        location: location.to_string(),
                    });
                }
                previous = Some(c);
                continue;
            }
            Symbol::Turn(_) => {
                if let Some(digit) = previous {
                    warn!(
                        digit = %digit,
                        location,
                        "color symbol directly before a turn, it selects a color and does not scale the turn"
                    );
                }
            }
            _ => {}
        }
        previous = None;
    }
    Ok(())
}

impl LSystem {
    pub fn axiom(&self) -> &str {
        &self.axiom
    }

    /// Turn unit in degrees.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn generations(&self) -> u32 {
        self.generations
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn color(&self, symbol: char) -> Option<&CssColor> {
        self.colors.get(&symbol)
    }

    pub fn colors(&self) -> &HashMap<char, CssColor> {
        &self.colors
    }

    /// The weighted alternatives for `symbol`, or `None` if it is rewritten
    /// to itself.
    pub fn rule_sets(&self, symbol: char) -> Option<&[RuleSet]> {
        self.rules
            .get(&symbol)
            .map(|production| production.alternatives.as_slice())
    }

    /// Expands the configured number of generations with a thread-local
    /// entropy source.
    pub fn expand(&self) -> Result<String, ResourceLimitError> {
        self.expand_with(&mut rand::thread_rng())
    }

    /// Expands the configured number of generations, reproducibly for a given
    /// `seed`.
    pub fn expand_seeded(&self, seed: u64) -> Result<String, ResourceLimitError> {
        let mut rng = SmallRng::seed_from_u64(seed);
        self.expand_with(&mut rng)
    }

    /// Expands the configured number of generations using `chooser` to pick
    /// between weighted alternatives.
    pub fn expand_with<C: Chooser + ?Sized>(
        &self,
        chooser: &mut C,
    ) -> Result<String, ResourceLimitError> {
        self.expand_generations(self.generations, chooser)
    }

    /// Rewrites the axiom `generations` times. Every symbol with a rule is
    /// replaced by exactly one of its alternatives, every other symbol is
    /// copied through. Fails as soon as the string under construction grows
    /// past `max_length` symbols.
    pub fn expand_generations<C: Chooser + ?Sized>(
        &self,
        generations: u32,
        chooser: &mut C,
    ) -> Result<String, ResourceLimitError> {
        let mut state = self.axiom.clone();
        self.check_length(0, state.chars().count())?;

        for generation in 1..=generations {
            let mut next = String::with_capacity(state.len() * 2);
            let mut length = 0usize;
            for c in state.chars() {
                match self.rules.get(&c) {
                    Some(production) => {
                        let successor = production.pick(chooser);
                        length += successor.chars().count();
                        next.push_str(successor);
                    }
                    None => {
                        length += 1;
                        next.push(c);
                    }
                }
                self.check_length(generation, length)?;
            }
            debug!(generation, length, "expanded l-system generation");
            state = next;
        }
        Ok(state)
    }

    fn check_length(&self, generation: u32, length: usize) -> Result<(), ResourceLimitError> {
        match self.max_length {
            Some(limit) if length > limit => Err(ResourceLimitError {
                generation,
                length,
                limit,
            }),
            _ => Ok(()),
        }
    }
}
