//! Ready-made grammars: a stochastic conifer, a purple flower and a dandelion.
//! Each returns a [`GrammarDefinition`] so callers can tweak generations or
//! colors before building the [`super::LSystem`].

use std::collections::HashMap;

use super::{GrammarDefinition, RuleSet};
use crate::color::hsba;

/// Three equally likely branchings of `F`. Digits pick one of six blue-green
/// tones. Draw it with a reduction around 1.25.
pub fn coniferous_tree() -> GrammarDefinition {
    GrammarDefinition {
        axiom: "SF".to_string(),
        angle: 20.0,
        rules: HashMap::from([
            (
                'F',
                vec![
                    RuleSet::new(1.0, "3F[++1F[X]][+2F][-4F][--5F[X]]6F"),
                    RuleSet::new(1.0, "3F[+1F][+2F][-4F]5F"),
                    RuleSet::new(1.0, "3F[+1F][-2F][--6F]4F"),
                ],
            ),
            ('X', vec![RuleSet::new(1.0, "X")]),
        ]),
        colors: HashMap::from([
            ('1', hsba(170.0, 100.0, 61.0, 100.0)),
            ('2', hsba(184.0, 97.0, 46.0, 100.0)),
            ('3', hsba(195.0, 87.0, 8.0, 100.0)),
            ('4', hsba(185.0, 84.0, 41.0, 100.0)),
            ('5', hsba(166.0, 26.0, 100.0, 100.0)),
            ('6', hsba(211.0, 71.0, 53.0, 100.0)),
        ]),
        generations: 5,
        ..Default::default()
    }
}

/// A six-fold rosette, deterministic.
pub fn purple_flower() -> GrammarDefinition {
    GrammarDefinition {
        axiom: "F-F-F-F-F-F".to_string(),
        angle: 300.0,
        rules: HashMap::from([
            ('F', vec![RuleSet::new(1.0, "1F-2X++1F+2F-1X+2F")]),
            ('X', vec![RuleSet::new(1.0, "1F-2X+1F++2X+1F+2X")]),
        ]),
        colors: HashMap::from([
            ('1', hsba(288.0, 80.0, 36.0, 100.0)),
            ('2', hsba(174.0, 71.0, 88.0, 100.0)),
        ]),
        generations: 5,
        ..Default::default()
    }
}

/// Four-way fan where `X` doubles each generation and only spaces the
/// branches out. Meant for a reduction below 1, so seeds grow outwards.
pub fn dandelion() -> GrammarDefinition {
    GrammarDefinition {
        axiom: "2F".to_string(),
        angle: 20.0,
        rules: HashMap::from([
            ('F', vec![RuleSet::new(1.0, "X[++F][+F][-F][--F]")]),
            ('X', vec![RuleSet::new(1.0, "XX")]),
        ]),
        colors: HashMap::from([('2', hsba(132.0, 3.0, 98.0, 100.0))]),
        generations: 4,
        ..Default::default()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::l_system::LSystem;

    fn balanced(text: &str) -> bool {
        let mut depth = 0i64;
        for c in text.chars() {
            match c {
                '[' => depth += 1,
                ']' => depth -= 1,
                _ => {}
            }
            if depth < 0 {
                return false;
            }
        }
        depth == 0
    }

    #[test]
    fn test_presets_are_valid() {
        for definition in [coniferous_tree(), purple_flower(), dandelion()] {
            let system = LSystem::try_from(definition).unwrap();
            let expanded = system.expand_seeded(5).unwrap();
            assert!(expanded.len() > system.axiom().len());
            assert!(balanced(&expanded));
        }
    }

    #[test]
    fn test_dandelion_expansion_is_deterministic() {
        let system = LSystem::try_from(dandelion()).unwrap();
        assert_eq!(system.expand_seeded(1).unwrap(), system.expand_seeded(2).unwrap());
        // generation 1 by hand
        let mut rng = rand::thread_rng();
        assert_eq!(
            system.expand_generations(1, &mut rng).unwrap(),
            "2X[++F][+F][-F][--F]"
        );
    }
}
