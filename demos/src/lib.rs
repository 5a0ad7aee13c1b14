// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared pieces for the demos: a synthetic heightmap world and a console dialog layer.

use strata_select::autocorrect::{Choice, DepthNotice};
use strata_select::{Frame, MapRenderer, OccupancySample, RenderRequest, Ui};
use strata_view::{Column, ColumnSample, ColumnSampler, RenderOptions, transform};

/// Rolling hills around sea level with a ravine running north to south at `x = 12`.
#[derive(Copy, Clone, Debug, Default)]
pub struct Hills;

impl Hills {
    /// Height of the top solid block in `column`.
    pub fn height(&self, column: Column) -> i32 {
        if (10..=14).contains(&column.x) {
            return 18;
        }
        let wave = (f64::from(column.x) * 0.11).sin() + (f64::from(column.z) * 0.07).cos();
        #[allow(
            clippy::cast_possible_truncation,
            reason = "the wave stays within -2..=2"
        )]
        let bump = (wave * 6.0).round() as i32;
        64 + bump
    }

    fn block_at(&self, height: i32) -> (u16, &'static str) {
        match height {
            0 => (7, "Bedrock"),
            ..=40 => (1, "Stone"),
            ..=62 => (12, "Sand"),
            _ => (2, "Grass"),
        }
    }
}

impl ColumnSampler for Hills {
    fn sample(&self, column: Column, depth: i32) -> ColumnSample {
        let height = self.height(column).min(depth);
        let (block, label) = self.block_at(height);
        ColumnSample {
            height,
            block,
            label: label.into(),
            flat_top: false,
        }
    }
}

/// Draws [`Hills`] as grayscale by height and tracks occupancy of the selection.
#[derive(Debug, Default)]
pub struct HillsRenderer {
    /// The world being drawn.
    pub world: Hills,
}

impl MapRenderer for HillsRenderer {
    fn render(
        &mut self,
        request: &RenderRequest<'_>,
        frame: &mut Frame,
        progress: &mut dyn FnMut(f32),
    ) -> OccupancySample {
        let view = request.view;
        let upper = view.upper_depth();
        let (lower, _) = view.depth_bounds();
        let shade = request.options.contains(RenderOptions::DEPTH_SHADING);
        let (width, height) = (frame.width(), frame.height());
        for y in 0..height {
            for x in 0..width {
                let screen = kurbo::Point::new(f64::from(x), f64::from(y));
                let column = transform::screen_to_column(screen, view);
                let h = self.world.height(column).min(upper);
                let mut value = u8::try_from(h.clamp(0, 255)).unwrap_or(u8::MAX);
                if shade && h < lower {
                    value /= 2;
                }
                if let Some(px) = frame.pixel_mut(x, y) {
                    px.copy_from_slice(&[value, value, value, 0xff]);
                }
            }
            if height > 0 {
                progress((y + 1) as f32 / height as f32);
            }
        }

        log::trace!("rendered {width}x{height} at scale {:.2}", view.scale());

        let mut sample = OccupancySample::empty(view.config().max_height);
        let selection = request.selection;
        if selection.is_active() {
            let first = transform::screen_to_column(kurbo::Point::ORIGIN, view);
            let last = transform::screen_to_column(view.viewport.to_vec2().to_point(), view);
            let (min, max) = (selection.min_column(), selection.max_column());
            for x in min.x.max(first.x)..=max.x.min(last.x) {
                for z in min.z.max(first.z)..=max.z.min(last.z) {
                    let h = self.world.height(Column::new(x, z)).min(upper);
                    sample.record(h, view.depth_bounds());
                }
            }
        }
        sample
    }
}

/// Prints notices and answers every question with a fixed choice.
#[derive(Debug)]
pub struct ConsoleUi {
    /// Answer given to every question.
    pub answer: Choice,
}

impl Ui for ConsoleUi {
    fn inform(&mut self, notice: &DepthNotice) {
        println!("[{}] {notice}", notice.title());
    }

    fn ask(&mut self, notice: &DepthNotice) -> Choice {
        println!("[{}] {notice}", notice.title());
        println!("  -> {:?}", self.answer);
        self.answer
    }
}
