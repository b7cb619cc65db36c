use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::Point,
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{Line, PrimitiveStyle},
};
#[allow(unused_imports)]
use micromath::F32Ext;

use crate::color_strategy::{ColorContext, ColorStrategy};
use crate::radial_bars::RadialBars;

pub trait Renderer {
    type Model: ?Sized;

    fn draw<D: DrawTarget<Color = Rgb888>>(
        &mut self,
        target: &mut D,
        model: &Self::Model,
    ) -> Result<(), D::Error>;
}

/// Draws [`RadialBars`] as spokes growing outward from a ring.
pub struct RadialBarRenderer<C> {
    center: Point,
    inner_radius: f32,
    pixels_per_unit: f32,
    max_scale: f32,
    stroke_width: u32,
    color: C,
}

impl<C: ColorStrategy> RadialBarRenderer<C> {
    pub fn new(center: Point, inner_radius: f32, pixels_per_unit: f32, max_scale: f32, color: C) -> Self {
        Self {
            center,
            inner_radius,
            pixels_per_unit,
            max_scale,
            stroke_width: 1,
            color,
        }
    }

    pub fn with_stroke_width(mut self, stroke_width: u32) -> Self {
        self.stroke_width = stroke_width.max(1);
        self
    }

    pub fn color_strategy_mut(&mut self) -> &mut C {
        &mut self.color
    }

    fn to_screen(&self, dx: f32, dy: f32, distance: f32) -> Point {
        // screen y grows downward
        Point::new(
            self.center.x + (dx * distance).round() as i32,
            self.center.y - (dy * distance).round() as i32,
        )
    }
}

impl<C: ColorStrategy> Renderer for RadialBarRenderer<C> {
    type Model = RadialBars;

    fn draw<D>(&mut self, target: &mut D, bars: &RadialBars) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let radius = bars.radius();
        for (i, element) in bars.elements().iter().enumerate() {
            if element.scale <= 0.0 {
                continue;
            }
            let (dx, dy) = (element.x / radius, element.y / radius);
            let start = self.to_screen(dx, dy, self.inner_radius);
            let end = self.to_screen(dx, dy, self.inner_radius + element.scale * self.pixels_per_unit);

            let color = self.color.get_color(&ColorContext {
                index: i,
                angle: element.angle,
                scale: element.scale,
                max_scale: self.max_scale,
            });
            Line::new(start, end)
                .into_styled(PrimitiveStyle::with_stroke(color, self.stroke_width))
                .draw(target)?;
        }
        Ok(())
    }
}
