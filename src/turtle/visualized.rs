use crate::canvas::Canvas;
use crate::errors::LSystemError;
use crate::l_system::{Chooser, LSystem};

use super::{RenderParams, RenderReport, Turtle};

/// One drawable instance of a shared grammar: a tree, a flower, etc.
///
/// The grammar is borrowed, so any number of instances can share one
/// [`LSystem`]. Each instance expands its own string the first time it is
/// rendered and keeps it, so rendering again redraws the same shape.
#[derive(Clone, Debug)]
pub struct VisualizedSystem<'a> {
    system: &'a LSystem,
    params: RenderParams,
    expanded: Option<String>,
}

impl<'a> VisualizedSystem<'a> {
    pub fn new(system: &'a LSystem, params: RenderParams) -> VisualizedSystem<'a> {
        VisualizedSystem {
            system,
            params,
            expanded: None,
        }
    }

    /// Uses an already expanded string instead of expanding on first render.
    pub fn with_expansion(mut self, expanded: impl Into<String>) -> Self {
        self.expanded = Some(expanded.into());
        self
    }

    pub fn params(&self) -> &RenderParams {
        &self.params
    }

    /// The expanded string, if this instance has been rendered already.
    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    /// Expands (once) and draws the whole system onto `canvas`.
    pub fn render_full_system<C, R>(
        &mut self,
        canvas: &mut C,
        chooser: &mut R,
    ) -> Result<RenderReport, LSystemError>
    where
        C: Canvas + ?Sized,
        R: Chooser + ?Sized,
    {
        self.params.validate()?;
        let expanded = match self.expanded.take() {
            Some(expanded) => expanded,
            None => self.system.expand_with(chooser)?,
        };
        let expanded = self.expanded.insert(expanded);
        let report = Turtle::new(self.system).render(expanded, &self.params, canvas)?;
        Ok(report)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::canvas::LineRecorder;
    use crate::errors::ConfigurationError;
    use crate::l_system::{presets, GrammarDefinition, RuleSet};
    use geo_types::Point;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn test_expands_once() {
        let tree = LSystem::try_from(presets::coniferous_tree()).unwrap();
        let params = RenderParams::new(Point::new(100.0, 300.0), 270.0, 12.0, 1.25);
        let mut instance = VisualizedSystem::new(&tree, params);
        assert!(instance.expanded().is_none());

        let mut rng = SmallRng::seed_from_u64(9);
        let mut first = LineRecorder::new(500.0, 500.0);
        let report = instance.render_full_system(&mut first, &mut rng).unwrap();
        let expanded = instance.expanded().unwrap().to_string();
        assert!(report.is_clean());

        let mut second = LineRecorder::new(500.0, 500.0);
        instance.render_full_system(&mut second, &mut rng).unwrap();
        assert_eq!(instance.expanded().unwrap(), expanded);
        assert_eq!(first.commands(), second.commands());
    }

    #[test]
    fn test_instances_share_a_grammar() {
        let dandelion = LSystem::try_from(presets::dandelion()).unwrap();
        let mut canvas = LineRecorder::new(500.0, 500.0);
        let mut rng = SmallRng::seed_from_u64(0);
        let mut segments = 0;
        for x in [50.0, 150.0, 250.0] {
            let params = RenderParams::new(Point::new(x, 100.0), 90.0, 4.0, 0.6);
            let report = VisualizedSystem::new(&dandelion, params)
                .render_full_system(&mut canvas, &mut rng)
                .unwrap();
            segments += report.segments;
        }
        assert_eq!(canvas.segments().len(), segments);
        // F -> X[++F][+F][-F][--F], four generations: 4^4 forward symbols
        assert_eq!(segments, 3 * 256);
    }

    #[test]
    fn test_preset_expansion_is_used() {
        let system = LSystem::try_from(GrammarDefinition {
            axiom: "F".to_string(),
            rules: HashMap::from([('F', vec![RuleSet::new(1.0, "FF")])]),
            generations: 3,
            ..Default::default()
        })
        .unwrap();
        let mut instance =
            VisualizedSystem::new(&system, RenderParams::default()).with_expansion("F+F");
        let mut canvas = LineRecorder::new(10.0, 10.0);
        let report = instance
            .render_full_system(&mut canvas, &mut rand::thread_rng())
            .unwrap();
        assert_eq!(report.segments, 2);
    }

    #[test]
    fn test_errors_surface() {
        let system = LSystem::try_from(GrammarDefinition {
            axiom: "F".to_string(),
            rules: HashMap::from([('F', vec![RuleSet::new(1.0, "FFF")])]),
            generations: 6,
            max_length: Some(100),
            ..Default::default()
        })
        .unwrap();
        let mut canvas = LineRecorder::new(10.0, 10.0);
        let mut rng = SmallRng::seed_from_u64(0);

        let mut instance = VisualizedSystem::new(&system, RenderParams::default());
        assert!(matches!(
            instance.render_full_system(&mut canvas, &mut rng),
            Err(LSystemError::ResourceLimit(_))
        ));
        assert!(instance.expanded().is_none());

        let params = RenderParams::new(Point::new(0.0, 0.0), 0.0, 1.0, -1.0);
        let mut instance = VisualizedSystem::new(&system, params);
        assert_eq!(
            instance.render_full_system(&mut canvas, &mut rng),
            Err(LSystemError::Configuration(
                ConfigurationError::InvalidReduction(-1.0)
            ))
        );
        assert!(canvas.commands().is_empty());
    }
}
