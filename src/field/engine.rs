use crate::field::config::{FlowFieldConfig, ReadingDirection};
use crate::field::curve::CurvePopulation;
use crate::field::generator::generate_curves;
use crate::field::geometry::{curve_opacity, stroke_shape};
use crate::field::wrap::advance_and_wrap;
use crate::foundation::core::{Rect, Size};
use crate::foundation::error::HeroflowResult;
use crate::foundation::math::Rng64;
use crate::surface::context::{DrawContext, StrokeColor};

/// Per-frame summary returned by [`FieldEngine::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct FrameStats {
    /// Curves stroked this frame.
    pub curves: usize,
    /// Curves recycled to the opposite edge this frame.
    pub recycled: usize,
    /// Highest stroke opacity issued this frame.
    pub peak_opacity: f64,
}

/// Population, time accumulator and RNG for one mounted flow field.
///
/// The engine has no notion of hosts or scheduling; it only knows how to regenerate for a
/// viewport and how to advance and draw one frame.
#[derive(Debug)]
pub struct FieldEngine {
    cfg: FlowFieldConfig,
    direction: ReadingDirection,
    population: CurvePopulation,
    time: f64,
    rng: Rng64,
}

impl FieldEngine {
    /// Validate `cfg` and build an engine with an empty population.
    pub fn new(cfg: FlowFieldConfig, direction: ReadingDirection) -> HeroflowResult<Self> {
        cfg.validate()?;
        let rng = match cfg.seed {
            Some(seed) => Rng64::new(seed),
            None => Rng64::from_clock(),
        };
        Ok(Self {
            cfg,
            direction,
            population: CurvePopulation::default(),
            time: 0.0,
            rng,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &FlowFieldConfig {
        &self.cfg
    }

    /// Reading direction the population is oriented for.
    pub fn direction(&self) -> ReadingDirection {
        self.direction
    }

    /// Current population.
    pub fn population(&self) -> &CurvePopulation {
        &self.population
    }

    /// Shared time accumulator.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Discard the population and generate a fresh one for `bounds`.
    #[tracing::instrument(skip(self), fields(epoch = self.population.epoch + 1))]
    pub fn regenerate(&mut self, bounds: Size) {
        let curves = generate_curves(bounds, self.direction, &self.cfg, &mut self.rng);
        tracing::debug!(count = curves.len(), "regenerated flow-field population");
        self.population = CurvePopulation {
            curves,
            bounds,
            epoch: self.population.epoch + 1,
        };
    }

    /// Advance time one fixed step, stroke every curve, then move and wrap it.
    pub fn tick<C: DrawContext + ?Sized>(&mut self, ctx: &mut C) -> FrameStats {
        let bounds = self.population.bounds;
        ctx.clear_rect(Rect::from_origin_size((0.0, 0.0), bounds));
        self.time += self.cfg.time_step;

        let mut stats = FrameStats::default();
        ctx.set_line_cap(self.cfg.line_cap);

        for curve in &mut self.population.curves {
            let shape = stroke_shape(curve, self.time, &self.cfg);
            let opacity = curve_opacity(curve, bounds, self.direction, &self.cfg);

            ctx.begin_path();
            ctx.move_to(shape.start);
            ctx.bezier_curve_to(shape.c1, shape.c2, shape.end);
            ctx.set_stroke_color(StrokeColor::new(curve.color, opacity));
            ctx.set_line_width(curve.thickness);
            ctx.stroke();

            if advance_and_wrap(curve, bounds, self.cfg.wrap_buffer, &mut self.rng) {
                stats.recycled += 1;
            }
            stats.curves += 1;
            stats.peak_opacity = stats.peak_opacity.max(opacity);
        }

        stats
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/engine.rs"]
mod tests;
