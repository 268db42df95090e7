//! Classification of raw grammar characters into turtle instructions.
//!
//! Grammars are written in classical L-system notation: every character is a
//! symbol. [`Alphabet::classify`] is the single place where a character gets a
//! meaning; everything downstream switches over [`Symbol`] instead of
//! character literals.

use crate::errors::ConfigurationError;

/// Which way a turn symbol rotates the heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnDirection {
    /// `+`, increases the heading.
    Increase,
    /// `-`, decreases the heading.
    Decrease,
}

impl TurnDirection {
    pub fn sign(self) -> f64 {
        match self {
            TurnDirection::Increase => 1.0,
            TurnDirection::Decrease => -1.0,
        }
    }
}

/// The meaning of a single grammar character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    /// Draw a segment and move the cursor to its end.
    Forward,
    /// Rotate the heading by one angle unit.
    Turn(TurnDirection),
    /// Save the cursor (`[`).
    Push,
    /// Restore the most recently saved cursor (`]`).
    Pop,
    /// Switch the active color to the one keyed by this digit.
    ColorSelect(char),
    /// No effect on the cursor. `X` and any unknown character end up here.
    Inert,
}

impl Symbol {
    /// Meaning of `c` regardless of which forward symbols are configured.
    /// Returns `None` for characters that are not structural.
    pub fn structural(c: char) -> Option<Symbol> {
        match c {
            '+' => Some(Symbol::Turn(TurnDirection::Increase)),
            '-' => Some(Symbol::Turn(TurnDirection::Decrease)),
            '[' => Some(Symbol::Push),
            ']' => Some(Symbol::Pop),
            d if d.is_ascii_digit() => Some(Symbol::ColorSelect(d)),
            _ => None,
        }
    }
}

pub const DEFAULT_FORWARD_SYMBOLS: &str = "F";

/// The set of characters that draw forward. Everything else is either
/// structural (see [`Symbol::structural`]) or inert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
    forward: Vec<char>,
}

impl Default for Alphabet {
    fn default() -> Self {
        Alphabet {
            forward: DEFAULT_FORWARD_SYMBOLS.chars().collect(),
        }
    }
}

impl Alphabet {
    /// Builds an alphabet where every character of `forward` draws. Fails if
    /// one of them is a turn, bracket or color digit.
    pub fn new(forward: &str) -> Result<Alphabet, ConfigurationError> {
        let mut symbols: Vec<char> = Vec::with_capacity(forward.len());
        for c in forward.chars() {
            if Symbol::structural(c).is_some() {
                return Err(ConfigurationError::SymbolCollision(c));
            }
            if !symbols.contains(&c) {
                symbols.push(c);
            }
        }
        Ok(Alphabet { forward: symbols })
    }

    pub fn forward_symbols(&self) -> &[char] {
        &self.forward
    }

    pub fn classify(&self, c: char) -> Symbol {
        match Symbol::structural(c) {
            Some(symbol) => symbol,
            None if self.forward.contains(&c) => Symbol::Forward,
            None => Symbol::Inert,
        }
    }

    /// Classifies every character of `text`, left to right.
    pub fn tokenize<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Symbol> + 'a {
        text.chars().map(move |c| self.classify(c))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_classify_default() {
        let alphabet = Alphabet::default();
        let symbols: Vec<Symbol> = alphabet.tokenize("F+-[]3XS").collect();
        assert_eq!(
            symbols,
            vec![
                Symbol::Forward,
                Symbol::Turn(TurnDirection::Increase),
                Symbol::Turn(TurnDirection::Decrease),
                Symbol::Push,
                Symbol::Pop,
                Symbol::ColorSelect('3'),
                Symbol::Inert,
                Symbol::Inert,
            ]
        );
    }

    #[test]
    fn test_custom_forward_symbols() {
        let alphabet = Alphabet::new("AB").unwrap();
        assert_eq!(alphabet.classify('A'), Symbol::Forward);
        assert_eq!(alphabet.classify('B'), Symbol::Forward);
        assert_eq!(alphabet.classify('F'), Symbol::Inert);
    }

    #[test]
    fn test_forward_collision() {
        assert_eq!(
            Alphabet::new("F1"),
            Err(ConfigurationError::SymbolCollision('1'))
        );
        assert_eq!(
            Alphabet::new("["),
            Err(ConfigurationError::SymbolCollision('['))
        );
    }

    #[test]
    fn test_turn_sign() {
        assert_eq!(TurnDirection::Increase.sign(), 1.0);
        assert_eq!(TurnDirection::Decrease.sign(), -1.0);
    }
}
