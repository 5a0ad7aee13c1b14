// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interactive session: one owner for view, selection, drags and collaborators.
//!
//! A [`Session`] is driven by [`InputEvent`]s from the host and by a handful of
//! direct operations (depth sliders, world loading, world switching, jumps and export
//! edits). Every change that affects the map ends in a full [`Session::redraw`], which
//! asks the [`MapRenderer`] for a new frame and occupancy sample.
//!
//! ## Lifecycle of a new selection
//!
//! 1. Secondary press away from any existing selection edge: the selection is seeded at
//!    the pointer and occupancy tracking restarts.
//! 2. Each move reshapes the selection and redraws; the renderer's occupancy sample for
//!    that redraw replaces the tracked one.
//! 3. Release: a single-column selection is dropped. Otherwise the tracked occupancy is
//!    handed to the [`Autocorrector`], which may inform the user or ask through the
//!    [`Ui`] before moving the lower depth.

use core::fmt;

use kurbo::{Point, Size};
use strata_view::{
    Column, ColumnSampler, ConfigError, MapMode, Probe, RenderOptions, View, ViewConfig,
    WorldKind, transform,
};

use crate::drag::{Commit, DragEffect, DragMachine, DragState, PointerButton};
use crate::host::{Frame, MapRenderer, RenderRequest, Ui, pixel_dims};
use crate::keys::{self, Command, Key, Modifiers, PanKeys};
use crate::{Autocorrector, ExportBox, OccupancySample, Selection};

/// Input delivered by the host.
///
/// Positions are in pixels relative to the top-left of the map area.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// A pointer button went down.
    PointerDown {
        /// Which button.
        button: PointerButton,
        /// Where.
        position: Point,
    },
    /// The pointer moved.
    PointerMove {
        /// New position.
        position: Point,
    },
    /// A pointer button went up.
    PointerUp {
        /// Which button.
        button: PointerButton,
        /// Where.
        position: Point,
    },
    /// The wheel turned; positive zooms in.
    Wheel {
        /// Raw wheel delta, in the host's units per notch.
        delta: f64,
    },
    /// A key went down (or repeated).
    KeyDown {
        /// Which key.
        key: Key,
        /// Modifiers held.
        modifiers: Modifiers,
    },
    /// A key went up.
    KeyUp {
        /// Which key.
        key: Key,
    },
    /// Pointer capture was taken away, for example by a focus change.
    CaptureLost,
}

/// What handling an event did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Handled {
    /// The event did not apply.
    Ignored,
    /// State changed but the frame did not.
    Consumed,
    /// The frame was redrawn.
    Redrawn,
}

/// Facts about the loaded world, in overworld block coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct WorldInfo {
    /// World spawn point; `y` carries world `z`.
    pub spawn: Point,
    /// Player position; `y` carries world `z`.
    pub player: Point,
}

bitflags::bitflags! {
    /// Commands currently available to the user.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Actions: u8 {
        /// Center on the spawn point.
        const JUMP_TO_SPAWN = 1 << 0;
        /// Center on the player.
        const JUMP_TO_PLAYER = 1 << 1;
        /// Center on the selection.
        const JUMP_TO_SELECTION = 1 << 2;
        /// Export the selection.
        const EXPORT = 1 << 3;
        /// Repeat the previous export.
        const REPEAT_EXPORT = 1 << 4;
    }
}

impl Default for Actions {
    fn default() -> Self {
        Self::empty()
    }
}

/// Status bar text for the column under the pointer.
///
/// Formats as `x,z; y=Y label`. In the Nether the matching overworld column follows the
/// height: `x,z; y=Y[ox,oz] label`. When the probe found nothing within the world, only
/// the label is shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusLine {
    /// Column under the pointer.
    pub column: Column,
    /// Height of the block found.
    pub height: i32,
    /// Block name.
    pub label: String,
    /// Matching overworld column when viewing the Nether.
    pub overworld: Option<Column>,
    /// Top layer of the world.
    pub max_height: i32,
}

impl StatusLine {
    /// Describe a probe taken in `view` while showing `world`.
    pub fn new(probe: &Probe, view: &View, world: WorldKind) -> Self {
        let overworld = world.is_scaled().then(|| {
            let scaled = probe.column.origin().to_vec2() * view.config().nether_scale;
            Column::containing(scaled.to_point())
        });
        Self {
            column: probe.column,
            height: probe.sample.height,
            label: probe.sample.label.clone(),
            overworld,
            max_height: view.config().max_height,
        }
    }

    /// Whether the probe landed on a real position.
    pub fn has_position(&self) -> bool {
        (-1..=self.max_height).contains(&self.height)
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.has_position() {
            return f.write_str(&self.label);
        }
        let Column { x, z } = self.column;
        write!(f, "{x},{z}; y={}", self.height)?;
        if let Some(o) = self.overworld {
            write!(f, "[{},{}]", o.x, o.z)?;
        }
        write!(f, " {}", self.label)
    }
}

/// Owner of all interactive state for one map window.
#[derive(Debug)]
pub struct Session<R, S, U> {
    view: View,
    selection: Selection,
    drag: DragMachine,
    occupancy: OccupancySample,
    autocorrect: Autocorrector,
    mode: MapMode,
    held: PanKeys,
    world: Option<WorldInfo>,
    exported: bool,
    pointer: Point,
    status: Option<StatusLine>,
    frame: Frame,
    renderer: R,
    sampler: S,
    ui: U,
}

impl<R: MapRenderer, S: ColumnSampler, U: Ui> Session<R, S, U> {
    /// Create a session with no world loaded.
    ///
    /// Fails if `config` does not validate.
    pub fn new(
        config: &ViewConfig,
        viewport: Size,
        renderer: R,
        sampler: S,
        ui: U,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut frame = Frame::for_viewport(viewport);
        frame.fill(0xff);
        Ok(Self {
            view: View::new(config, viewport),
            selection: Selection::inactive(),
            drag: DragMachine::new(),
            occupancy: OccupancySample::empty(config.max_height),
            autocorrect: Autocorrector::new(),
            mode: MapMode::default(),
            held: PanKeys::empty(),
            world: None,
            exported: false,
            pointer: Point::ORIGIN,
            status: None,
            frame,
            renderer,
            sampler,
            ui,
        })
    }

    /// Current view.
    pub fn view(&self) -> &View {
        &self.view
    }

    /// Current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Current drag.
    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// Whether a drag holds pointer capture.
    pub fn is_captured(&self) -> bool {
        self.drag.is_captured()
    }

    /// Occupancy tracked for the selection being drawn.
    pub fn occupancy(&self) -> &OccupancySample {
        &self.occupancy
    }

    /// World kind and render options.
    pub fn mode(&self) -> &MapMode {
        &self.mode
    }

    /// The last rendered frame.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Status text for the last pointer position, once known.
    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    /// The loaded world, if any.
    pub fn world(&self) -> Option<&WorldInfo> {
        self.world.as_ref()
    }

    /// Whether a world is loaded.
    pub fn is_loaded(&self) -> bool {
        self.world.is_some()
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The renderer, mutably.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// The column sampler.
    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    /// The dialog layer.
    pub fn ui(&self) -> &U {
        &self.ui
    }

    /// The dialog layer, mutably.
    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    /// Whether depth autocorrection may still prompt.
    pub fn autocorrect_enabled(&self) -> bool {
        self.autocorrect.is_enabled()
    }

    /// Turn depth autocorrection prompts on or off.
    pub fn set_autocorrect_enabled(&mut self, enabled: bool) {
        self.autocorrect.set_enabled(enabled);
    }

    /// Handle one input event.
    ///
    /// Pointer presses, motion, wheel and key presses are ignored until a world is
    /// loaded. Key presses with Control held are left to menu accelerators.
    pub fn handle(&mut self, event: InputEvent) -> Handled {
        match event {
            InputEvent::CaptureLost => {
                self.held = PanKeys::empty();
                let effects = self.drag.capture_lost(&mut self.selection);
                self.apply(effects)
            }
            InputEvent::PointerUp { button, position } => {
                self.pointer = position;
                let effects = self.drag.release(button, &mut self.selection);
                self.apply(effects)
            }
            InputEvent::KeyUp { key } => match PanKeys::for_key(key) {
                Some(dir) => {
                    self.held.remove(dir);
                    Handled::Consumed
                }
                None => Handled::Ignored,
            },
            _ if !self.is_loaded() => Handled::Ignored,
            InputEvent::PointerDown { button, position } => {
                self.pointer = position;
                let effects = self
                    .drag
                    .press(button, position, &self.view, &mut self.selection);
                self.apply(effects)
            }
            InputEvent::PointerMove { position } => {
                self.pointer = position;
                let effects = self
                    .drag
                    .motion(position, &mut self.view, &mut self.selection);
                let handled = self.apply(effects);
                self.refresh_status();
                if handled == Handled::Ignored {
                    Handled::Consumed
                } else {
                    handled
                }
            }
            InputEvent::Wheel { delta } => {
                self.view.zoom_by_wheel(delta);
                self.redraw();
                Handled::Redrawn
            }
            InputEvent::KeyDown { key, modifiers } => self.key_down(key, modifiers),
        }
    }

    /// Act on the effects of a drag transition.
    fn apply(&mut self, effects: Vec<DragEffect>) -> Handled {
        if effects.is_empty() {
            return Handled::Ignored;
        }
        let max_height = self.view.config().max_height;
        let mut redraw = false;
        for effect in effects {
            match effect {
                DragEffect::Panned | DragEffect::AdjustmentStarted | DragEffect::SelectionMoved => {
                    redraw = true;
                }
                DragEffect::SelectionStarted => {
                    self.occupancy.reset(max_height);
                    redraw = true;
                }
                DragEffect::PanStarted | DragEffect::PanEnded => {}
                DragEffect::Committed(commit) => {
                    redraw |= match commit {
                        Commit::Cleared => true,
                        Commit::Created => self.autocorrect_depth(),
                        Commit::Adjusted | Commit::Interrupted => false,
                    };
                    self.occupancy.reset(max_height);
                }
                DragEffect::PickDepth => redraw |= self.pick_lower_depth(),
            }
        }
        if redraw {
            self.redraw();
            Handled::Redrawn
        } else {
            Handled::Consumed
        }
    }

    fn autocorrect_depth(&mut self) -> bool {
        let lower = self.view.lower_depth();
        match self.autocorrect.run(&self.occupancy, lower, &mut self.ui) {
            Some(depth) => {
                self.view.set_lower_depth(depth);
                self.sync_selection_depths();
                self.refresh_status();
                true
            }
            None => false,
        }
    }

    fn pick_lower_depth(&mut self) -> bool {
        let probe = self.probe(self.pointer);
        let picked = probe
            .sample
            .picked_depth(self.view.config().max_height);
        self.status = Some(StatusLine::new(&probe, &self.view, self.mode.kind()));
        match picked {
            Some(depth) => {
                log::debug!("picked lower depth {depth} at {:?}", probe.column);
                self.view.set_lower_depth(depth);
                self.sync_selection_depths();
                true
            }
            None => false,
        }
    }

    fn key_down(&mut self, key: Key, modifiers: Modifiers) -> Handled {
        if modifiers.contains(Modifiers::CONTROL) {
            return Handled::Ignored;
        }
        let command = keys::command_for(key);
        let mut changed = true;
        match command {
            Command::Pan(dir) => {
                self.held.insert(dir);
                changed = false;
            }
            Command::Unbound => {
                self.held = PanKeys::empty();
                changed = false;
            }
            Command::ZoomIn => self.view.zoom_in_step(),
            Command::ZoomOut => self.view.zoom_out_step(),
            Command::ZoomMax => self.view.zoom_to_max(),
            Command::ZoomMin => self.view.zoom_to_min(),
            Command::UpperDepthUp => changed = self.view.step_upper_depth(1),
            Command::UpperDepthDown => changed = self.view.step_upper_depth(-1),
            Command::DepthPreset(digit) => changed = self.view.apply_depth_preset(digit),
            Command::LowerDepthUp => self.view.step_lower_depth(1),
            Command::LowerDepthDown => self.view.step_lower_depth(-1),
            Command::SnapLowerToUpper => self.view.snap_lower_to_upper(),
        }
        if !self.held.is_empty() {
            self.view.pan_by_keys(self.held.direction());
            changed = true;
        }
        if changed {
            self.sync_selection_depths();
            self.refresh_status();
            self.redraw();
            Handled::Redrawn
        } else if command == Command::Unbound {
            Handled::Ignored
        } else {
            Handled::Consumed
        }
    }

    /// Recompute the whole frame from the current view and selection.
    ///
    /// While a new selection is being drawn, the renderer's occupancy sample becomes the
    /// tracked one. Progress is forwarded to the [`Ui`] and reset to zero afterwards.
    /// With no world loaded the frame is filled white.
    pub fn redraw(&mut self) {
        if self.world.is_some() {
            let request = RenderRequest {
                view: &self.view,
                selection: &self.selection,
                options: self.mode.options(),
                world: self.mode.kind(),
            };
            let ui = &mut self.ui;
            let sample = self
                .renderer
                .render(&request, &mut self.frame, &mut |p: f32| ui.progress(p));
            if self.drag.is_selecting_new() {
                self.occupancy = sample;
            }
        } else {
            self.frame.fill(0xff);
        }
        self.ui.progress(0.0);
    }

    /// Probe the column under a map-area position at the rendered depth.
    pub fn probe(&self, position: Point) -> Probe {
        transform::locate(position, &self.view, &self.sampler)
    }

    fn refresh_status(&mut self) {
        if self.is_loaded() {
            let probe = self.probe(self.pointer);
            self.status = Some(StatusLine::new(&probe, &self.view, self.mode.kind()));
        }
    }

    fn sync_selection_depths(&mut self) {
        self.selection
            .set_depths(self.view.lower_depth(), self.view.upper_depth());
    }

    /// Set the rendered depth, as from the upper slider.
    pub fn set_upper_depth(&mut self, depth: i32) {
        self.view.set_upper_depth(depth);
        self.depths_changed();
    }

    /// Set the export floor, as from the lower slider.
    pub fn set_lower_depth(&mut self, depth: i32) {
        self.view.set_lower_depth(depth);
        self.depths_changed();
    }

    /// Set both depths from slider positions, which run from the top layer down.
    pub fn set_slider_positions(&mut self, upper: i32, lower: i32) {
        let max_height = self.view.config().max_height;
        self.view
            .set_upper_depth(transform::depth_from_slider(upper, max_height));
        self.view
            .set_lower_depth(transform::depth_from_slider(lower, max_height));
        self.depths_changed();
    }

    /// Slider positions for the current `(upper, lower)` depths.
    pub fn slider_positions(&self) -> (i32, i32) {
        let max_height = self.view.config().max_height;
        (
            transform::slider_position(self.view.upper_depth(), max_height),
            transform::slider_position(self.view.lower_depth(), max_height),
        )
    }

    fn depths_changed(&mut self) {
        self.sync_selection_depths();
        self.refresh_status();
        if self.is_loaded() {
            self.redraw();
        }
    }

    /// The map area changed size.
    pub fn resize(&mut self, viewport: Size) {
        self.view.viewport = viewport;
        let (width, height) = pixel_dims(viewport);
        self.frame.resize(width, height);
        self.redraw();
    }

    /// A world finished loading.
    ///
    /// A different world recenters on its spawn point, zooms fully out, resets both
    /// depths and drops the selection. Reloading the same world keeps all of that, so a
    /// user can export, change the world, reload and carry on.
    pub fn load_world(&mut self, info: WorldInfo, same_world: bool) {
        self.world = Some(info);
        if !same_world {
            let (top, floor) = {
                let config = self.view.config();
                (config.max_height, config.default_lower_depth)
            };
            self.view.zoom_to_min();
            self.view.set_upper_depth(top);
            self.view.set_lower_depth(floor);
            self.selection.clear();
            self.drag.reset();
            self.exported = false;
            self.center_on_overworld(info.spawn);
        }
        log::debug!("world loaded (same world: {same_world}): {info:?}");
        self.redraw();
    }

    /// Show a different dimension. The selection is dropped on any switch.
    ///
    /// Returns `false` if `kind` is already shown.
    pub fn set_world_kind(&mut self, kind: WorldKind) -> bool {
        if !self.mode.switch_world(kind, &mut self.view) {
            return false;
        }
        self.selection.clear();
        self.drag.reset();
        self.occupancy.reset(self.view.config().max_height);
        self.refresh_status();
        self.redraw();
        true
    }

    /// Flip render options and redraw.
    pub fn toggle_option(&mut self, options: RenderOptions) {
        self.mode.toggle(options);
        self.redraw();
    }

    /// Center on an overworld position, compressed when viewing the Nether.
    fn center_on_overworld(&mut self, target: Point) {
        let target = if self.mode.kind().is_scaled() {
            (target.to_vec2() / self.view.config().nether_scale).to_point()
        } else {
            target
        };
        self.view.center_on(target);
    }

    /// Center on the world spawn. Returns `false` with no world loaded.
    pub fn jump_to_spawn(&mut self) -> bool {
        let Some(info) = self.world else {
            return false;
        };
        self.center_on_overworld(info.spawn);
        self.redraw();
        true
    }

    /// Center on the player. Returns `false` with no world loaded.
    pub fn jump_to_player(&mut self) -> bool {
        let Some(info) = self.world else {
            return false;
        };
        self.center_on_overworld(info.player);
        self.redraw();
        true
    }

    /// Center on the selection. Returns `false` without one.
    ///
    /// The selection is always in the coordinates of the world being shown, so no Nether
    /// scaling applies.
    pub fn jump_to_selection(&mut self) -> bool {
        let Some(center) = self.selection.center() else {
            return false;
        };
        self.view.center_on(center.origin());
        self.redraw();
        true
    }

    /// Bounds to hand to an exporter.
    pub fn export_box(&self) -> Option<ExportBox> {
        self.selection.export_box()
    }

    /// Apply bounds edited in an export dialog and record that an export happened.
    ///
    /// If the vertical range changed, the two depths follow it: the lower depth takes the
    /// box's bottom and the upper depth its top, unless the lower depth was the higher
    /// of the two, in which case they swap. Heights are clamped to the world.
    ///
    /// Returns `false` when there is no selection to edit.
    pub fn apply_export_edit(&mut self, edited: ExportBox) -> bool {
        let Some(before) = self.selection.export_box() else {
            return false;
        };
        let limits = self.view.config().limits();
        let mut edited = edited.normalized();
        edited.min_y = limits.clamp_depth(edited.min_y);
        edited.max_y = limits.clamp_depth(edited.max_y);
        if (edited.min_y, edited.max_y) != (before.min_y, before.max_y) {
            let (lower, upper) = if self.view.lower_depth() <= self.view.upper_depth() {
                (edited.min_y, edited.max_y)
            } else {
                (edited.max_y, edited.min_y)
            };
            self.view.set_lower_depth(lower);
            self.view.set_upper_depth(upper);
        }
        self.selection = Selection::from_export_box(edited);
        self.exported = true;
        log::debug!("export bounds {edited:?}");
        self.refresh_status();
        self.redraw();
        true
    }

    /// Commands that currently make sense.
    pub fn available_actions(&self) -> Actions {
        let mut actions = Actions::empty();
        if self.is_loaded() {
            actions |= Actions::JUMP_TO_SPAWN | Actions::JUMP_TO_PLAYER;
            if self.selection.is_active() {
                actions |= Actions::EXPORT | Actions::JUMP_TO_SELECTION;
            }
        }
        if self.exported {
            actions |= Actions::REPEAT_EXPORT;
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::autocorrect::{Choice, DepthNotice, NoticeKind};
    use strata_view::ColumnSample;

    /// Heightmap world: a default height with per-column overrides.
    #[derive(Clone, Debug, Default)]
    struct Terrain {
        ground: i32,
        overrides: HashMap<Column, i32>,
    }

    impl Terrain {
        fn flat(ground: i32) -> Self {
            Self {
                ground,
                overrides: HashMap::new(),
            }
        }

        fn height(&self, column: Column) -> i32 {
            self.overrides.get(&column).copied().unwrap_or(self.ground)
        }
    }

    impl ColumnSampler for Terrain {
        fn sample(&self, column: Column, depth: i32) -> ColumnSample {
            let height = self.height(column).min(depth);
            ColumnSample {
                height,
                block: 1,
                label: if height == 0 { "Bedrock" } else { "Stone" }.into(),
                flat_top: false,
            }
        }
    }

    /// Renders the top visible block of each on-screen column in the selection footprint.
    #[derive(Debug, Default)]
    struct HeightmapRenderer {
        terrain: Terrain,
        renders: usize,
        last_options: Option<RenderOptions>,
    }

    impl MapRenderer for HeightmapRenderer {
        fn render(
            &mut self,
            request: &RenderRequest<'_>,
            frame: &mut Frame,
            progress: &mut dyn FnMut(f32),
        ) -> OccupancySample {
            self.renders += 1;
            self.last_options = Some(request.options);
            frame.fill(0x20);
            let view = request.view;
            let mut sample = OccupancySample::empty(view.config().max_height);
            if request.selection.is_active() {
                // Only on-screen columns are seen.
                let first = transform::screen_to_column(Point::ORIGIN, view);
                let last = transform::screen_to_column(view.viewport.to_vec2().to_point(), view);
                let min = request.selection.min_column();
                let max = request.selection.max_column();
                for x in min.x.max(first.x)..=max.x.min(last.x) {
                    for z in min.z.max(first.z)..=max.z.min(last.z) {
                        let h = self.terrain.height(Column::new(x, z));
                        sample.record(
                            h.min(view.upper_depth()),
                            (view.lower_depth(), view.upper_depth()),
                        );
                    }
                }
            }
            progress(0.5);
            progress(1.0);
            sample
        }
    }

    #[derive(Debug, Default)]
    struct ScriptedUi {
        answers: Vec<Choice>,
        informed: Vec<DepthNotice>,
        asked: Vec<DepthNotice>,
        progress: Vec<f32>,
    }

    impl Ui for ScriptedUi {
        fn progress(&mut self, fraction: f32) {
            self.progress.push(fraction);
        }

        fn inform(&mut self, notice: &DepthNotice) {
            self.informed.push(notice.clone());
        }

        fn ask(&mut self, notice: &DepthNotice) -> Choice {
            self.asked.push(notice.clone());
            if self.answers.is_empty() {
                Choice::Decline
            } else {
                self.answers.remove(0)
            }
        }
    }

    type TestSession = Session<HeightmapRenderer, Terrain, ScriptedUi>;

    /// Loaded session over `terrain`, 200x200 at scale 1: screen `(100 + x, 100 + z)`
    /// is world column `(x, z)`.
    fn session(terrain: Terrain) -> TestSession {
        let renderer = HeightmapRenderer {
            terrain: terrain.clone(),
            ..HeightmapRenderer::default()
        };
        let mut s = Session::new(
            &ViewConfig::default(),
            Size::new(200.0, 200.0),
            renderer,
            terrain,
            ScriptedUi::default(),
        )
        .unwrap();
        s.load_world(
            WorldInfo {
                spawn: Point::ORIGIN,
                player: Point::new(40.0, -24.0),
            },
            false,
        );
        s
    }

    fn at(x: f64, z: f64) -> Point {
        Point::new(100.0 + x, 100.0 + z)
    }

    fn drag_select(s: &mut TestSession, from: (f64, f64), to: (f64, f64)) {
        let down = InputEvent::PointerDown {
            button: PointerButton::Secondary,
            position: at(from.0, from.1),
        };
        assert_eq!(s.handle(down), Handled::Redrawn);
        let motion = InputEvent::PointerMove {
            position: at(to.0, to.1),
        };
        assert_eq!(s.handle(motion), Handled::Redrawn);
        s.handle(InputEvent::PointerUp {
            button: PointerButton::Secondary,
            position: at(to.0, to.1),
        });
    }

    fn key(s: &mut TestSession, c: char) -> Handled {
        s.handle(InputEvent::KeyDown {
            key: Key::Char(c),
            modifiers: Modifiers::empty(),
        })
    }

    #[test]
    fn input_is_ignored_until_a_world_loads() {
        let mut s = Session::new(
            &ViewConfig::default(),
            Size::new(4.0, 4.0),
            HeightmapRenderer::default(),
            Terrain::flat(64),
            ScriptedUi::default(),
        )
        .unwrap();
        assert!(s.frame().pixels().iter().all(|&b| b == 0xff));
        let down = InputEvent::PointerDown {
            button: PointerButton::Secondary,
            position: Point::ORIGIN,
        };
        assert_eq!(s.handle(down), Handled::Ignored);
        assert_eq!(s.handle(InputEvent::Wheel { delta: 120.0 }), Handled::Ignored);
        assert_eq!(key(&mut s, 'e'), Handled::Ignored);
        assert_eq!(s.view().scale(), 1.0);
        assert_eq!(s.renderer().renders, 0);
        assert_eq!(s.available_actions(), Actions::empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ViewConfig {
            max_zoom: 0.5,
            ..ViewConfig::default()
        };
        let err = Session::new(
            &config,
            Size::new(4.0, 4.0),
            HeightmapRenderer::default(),
            Terrain::flat(0),
            ScriptedUi::default(),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::ZoomRange { min: 1.0, max: 0.5 });
    }

    #[test]
    fn drag_scenario_produces_expected_box() {
        let mut s = session(Terrain::flat(63));
        s.set_lower_depth(63);
        drag_select(&mut s, (10.0, 10.0), (20.0, 30.0));
        assert_eq!(
            s.export_box(),
            Some(ExportBox {
                min_x: 10,
                min_y: 63,
                min_z: 10,
                max_x: 20,
                max_y: 255,
                max_z: 30,
            })
        );
        // Flat ground at the lower depth is already inside: nothing to correct.
        assert!(s.ui().informed.is_empty());
        assert!(s.ui().asked.is_empty());
        assert!(!s.is_captured());
    }

    #[test]
    fn buried_selection_lowers_depth_without_prompt() {
        let mut s = session(Terrain::flat(30));
        s.set_upper_depth(80);
        s.set_lower_depth(50);
        drag_select(&mut s, (0.0, 0.0), (5.0, 5.0));
        assert_eq!(s.view().lower_depth(), 30);
        assert_eq!(s.selection().min_y(), 30);
        assert_eq!(s.selection().max_y(), 80);
        assert_eq!(s.ui().informed.len(), 1);
        assert_eq!(s.ui().informed[0].kind, NoticeKind::AllBelow);
        assert!(s.ui().asked.is_empty());
    }

    #[test]
    fn partly_buried_selection_asks_and_applies() {
        let mut terrain = Terrain::flat(70);
        terrain.overrides.insert(Column::new(2, 2), 40);
        let mut s = session(terrain);
        s.set_lower_depth(63);
        s.ui_mut().answers.push(Choice::Accept);
        drag_select(&mut s, (0.0, 0.0), (4.0, 4.0));
        assert_eq!(s.ui().asked.len(), 1);
        assert_eq!(s.ui().asked[0].kind, NoticeKind::SomeBelow);
        assert_eq!(s.view().lower_depth(), 40);
        assert_eq!(s.selection().min_y(), 40);
    }

    #[test]
    fn disable_future_silences_prompts() {
        let mut terrain = Terrain::flat(70);
        terrain.overrides.insert(Column::new(2, 2), 40);
        let mut s = session(terrain);
        s.set_lower_depth(63);
        s.ui_mut().answers.push(Choice::DisableFuture);
        drag_select(&mut s, (0.0, 0.0), (4.0, 4.0));
        assert!(!s.autocorrect_enabled());
        assert_eq!(s.view().lower_depth(), 63);
        for step in 1..=3 {
            let o = -20.0 * f64::from(step);
            drag_select(&mut s, (o, o), (o + 4.0, o + 4.0));
        }
        assert_eq!(s.ui().asked.len(), 1);
    }

    #[test]
    fn adjusting_does_not_autocorrect() {
        let mut s = session(Terrain::flat(30));
        s.set_upper_depth(80);
        s.set_lower_depth(50);
        drag_select(&mut s, (0.0, 0.0), (20.0, 20.0));
        assert_eq!(s.ui().informed.len(), 1);
        s.set_lower_depth(50);
        // Grab the east edge and widen.
        drag_select(&mut s, (21.0, 10.0), (30.0, 10.0));
        assert_eq!(s.selection().max_column(), Column::new(30, 20));
        assert_eq!(s.ui().informed.len(), 1);
        assert_eq!(s.view().lower_depth(), 50);
    }

    #[test]
    fn click_clears_selection() {
        let mut s = session(Terrain::flat(64));
        drag_select(&mut s, (0.0, 0.0), (9.0, 9.0));
        assert!(s.selection().is_active());
        drag_select(&mut s, (50.0, 50.0), (50.0, 50.0));
        assert!(!s.selection().is_active());
        assert!(!s.available_actions().contains(Actions::EXPORT));
    }

    #[test]
    fn capture_loss_recovers_without_autocorrect() {
        let mut s = session(Terrain::flat(30));
        s.set_upper_depth(80);
        s.set_lower_depth(50);
        s.handle(InputEvent::PointerDown {
            button: PointerButton::Secondary,
            position: at(0.0, 0.0),
        });
        s.handle(InputEvent::PointerMove {
            position: at(6.0, 6.0),
        });
        assert!(s.is_captured());
        assert_eq!(s.handle(InputEvent::CaptureLost), Handled::Consumed);
        assert_eq!(s.drag_state(), DragState::Idle);
        assert!(s.selection().is_active());
        assert_eq!(s.view().lower_depth(), 50);
        assert!(s.ui().informed.is_empty());
        // Input works normally afterwards.
        drag_select(&mut s, (-40.0, -40.0), (-37.0, -37.0));
        assert_eq!(s.view().lower_depth(), 30);
    }

    #[test]
    fn primary_drag_pans_and_redraws() {
        let mut s = session(Terrain::flat(64));
        let before = s.renderer().renders;
        let press = s.handle(InputEvent::PointerDown {
            button: PointerButton::Primary,
            position: Point::new(50.0, 50.0),
        });
        assert_eq!(press, Handled::Consumed);
        assert!(s.is_captured());
        s.handle(InputEvent::PointerMove {
            position: Point::new(70.0, 40.0),
        });
        assert_eq!(s.view().center, Point::new(-20.0, 10.0));
        assert_eq!(
            s.handle(InputEvent::PointerUp {
                button: PointerButton::Primary,
                position: Point::new(70.0, 40.0),
            }),
            Handled::Consumed
        );
        assert_eq!(s.renderer().renders, before + 1);
    }

    #[test]
    fn middle_click_picks_lower_depth() {
        let mut terrain = Terrain::flat(64);
        terrain.overrides.insert(Column::new(3, 4), 12);
        let mut s = session(terrain);
        drag_select(&mut s, (0.0, 0.0), (9.0, 9.0));
        s.handle(InputEvent::PointerDown {
            button: PointerButton::Middle,
            position: at(3.5, 4.5),
        });
        assert_eq!(s.view().lower_depth(), 12);
        assert_eq!(s.selection().min_y(), 12);
        assert_eq!(s.status().unwrap().to_string(), "3,4; y=12 Stone");
    }

    #[test]
    fn wheel_and_keys_zoom_within_limits() {
        let mut s = session(Terrain::flat(64));
        assert_eq!(s.handle(InputEvent::Wheel { delta: 120.0 }), Handled::Redrawn);
        assert_eq!(s.view().scale(), 2.0);
        s.handle(InputEvent::KeyDown {
            key: Key::Home,
            modifiers: Modifiers::empty(),
        });
        assert_eq!(s.view().scale(), 40.0);
        key(&mut s, 'e');
        assert_eq!(s.view().scale(), 40.0);
        key(&mut s, 'q');
        assert_eq!(s.view().scale(), 39.5);
        s.handle(InputEvent::Wheel { delta: -12000.0 });
        assert_eq!(s.view().scale(), 1.0);
    }

    #[test]
    fn control_keys_are_left_to_accelerators() {
        let mut s = session(Terrain::flat(64));
        let handled = s.handle(InputEvent::KeyDown {
            key: Key::Char('s'),
            modifiers: Modifiers::CONTROL,
        });
        assert_eq!(handled, Handled::Ignored);
        assert_eq!(s.view().center, Point::ORIGIN);
    }

    #[test]
    fn held_keys_pan_until_released_or_interrupted() {
        let mut s = session(Terrain::flat(64));
        assert_eq!(key(&mut s, 'd'), Handled::Redrawn);
        assert_eq!(s.view().center, Point::new(10.0, 0.0));
        // Another bound key keeps panning in the held direction.
        key(&mut s, 'e');
        assert_eq!(s.view().center, Point::new(10.0 + 10.0 / 1.5, 0.0));
        s.handle(InputEvent::KeyUp {
            key: Key::Char('D'),
        });
        key(&mut s, 'e');
        assert_eq!(s.view().center, Point::new(10.0 + 10.0 / 1.5, 0.0));
        // An unbound key stops panning.
        key(&mut s, 's');
        assert_eq!(key(&mut s, 'x'), Handled::Ignored);
        let c = s.view().center;
        key(&mut s, ',');
        assert_eq!(s.view().center, c);
    }

    #[test]
    fn depth_keys_resync_selection() {
        let mut s = session(Terrain::flat(64));
        s.set_lower_depth(64);
        drag_select(&mut s, (0.0, 0.0), (4.0, 4.0));
        assert_eq!(key(&mut s, ','), Handled::Consumed);
        assert_eq!(s.view().upper_depth(), 255);
        key(&mut s, '.');
        assert_eq!((s.selection().min_y(), s.selection().max_y()), (64, 254));
        key(&mut s, '6');
        assert_eq!(s.view().upper_depth(), 62);
        // Crossed bounds normalize.
        assert_eq!((s.selection().min_y(), s.selection().max_y()), (62, 64));
        key(&mut s, ']');
        key(&mut s, ']');
        assert_eq!((s.selection().min_y(), s.selection().max_y()), (62, 62));
        key(&mut s, '[');
        assert_eq!(s.view().lower_depth(), 63);
        key(&mut s, '8');
        key(&mut s, 'b');
        assert_eq!(s.view().lower_depth(), 106);
        assert_eq!((s.selection().min_y(), s.selection().max_y()), (106, 106));
    }

    #[test]
    fn sliders_are_inverted() {
        let mut s = session(Terrain::flat(64));
        s.set_slider_positions(0, 193);
        assert_eq!(s.view().upper_depth(), 255);
        assert_eq!(s.view().lower_depth(), 62);
        assert_eq!(s.slider_positions(), (0, 193));
    }

    #[test]
    fn redraw_reports_and_resets_progress() {
        let mut s = session(Terrain::flat(64));
        s.ui_mut().progress.clear();
        s.redraw();
        assert_eq!(s.ui().progress, vec![0.5, 1.0, 0.0]);
        assert!(s.frame().pixels().iter().all(|&b| b == 0x20));
    }

    #[test]
    fn resize_reallocates_frame() {
        let mut s = session(Terrain::flat(64));
        s.resize(Size::new(30.0, 20.0));
        assert_eq!((s.frame().width(), s.frame().height()), (30, 20));
        assert_eq!(s.view().viewport, Size::new(30.0, 20.0));
    }

    #[test]
    fn nether_switch_scales_and_clears() {
        let mut s = session(Terrain::flat(64));
        s.jump_to_player();
        drag_select(&mut s, (0.0, 0.0), (4.0, 4.0));
        assert!(s.set_world_kind(WorldKind::Nether));
        assert!(!s.selection().is_active());
        assert_eq!(s.view().center, Point::new(5.0, -3.0));
        assert_eq!(s.view().upper_depth(), 126);
        assert_eq!(
            s.renderer().last_options,
            Some(RenderOptions::HIDE_OBSCURED)
        );
        assert!(s.jump_to_spawn());
        assert_eq!(s.view().center, Point::ORIGIN);
        s.jump_to_player();
        assert_eq!(s.view().center, Point::new(5.0, -3.0));
        assert!(s.set_world_kind(WorldKind::Overworld));
        assert_eq!(s.view().center, Point::new(40.0, -24.0));
        assert_eq!(s.view().upper_depth(), 255);
        assert!(!s.set_world_kind(WorldKind::Overworld));
    }

    #[test]
    fn nether_status_shows_overworld_coordinates() {
        let mut s = session(Terrain::flat(64));
        s.set_world_kind(WorldKind::Nether);
        s.handle(InputEvent::PointerMove {
            position: at(-3.0, 7.0),
        });
        assert_eq!(s.status().unwrap().to_string(), "-3,7; y=64[-24,56] Stone");
    }

    #[test]
    fn status_without_position_shows_label_only() {
        let line = StatusLine {
            column: Column::new(1, 2),
            height: 256,
            label: "Unknown".into(),
            overworld: None,
            max_height: 255,
        };
        assert_eq!(line.to_string(), "Unknown");
        let void = StatusLine { height: -1, ..line };
        assert_eq!(void.to_string(), "1,2; y=-1 Unknown");
    }

    #[test]
    fn jump_to_selection_centers_on_it() {
        let mut s = session(Terrain::flat(64));
        assert!(!s.jump_to_selection());
        drag_select(&mut s, (10.0, -20.0), (31.0, 0.0));
        assert!(s.jump_to_selection());
        assert_eq!(s.view().center, Point::new(20.0, -10.0));
    }

    #[test]
    fn reloading_same_world_keeps_state() {
        let mut s = session(Terrain::flat(64));
        s.handle(InputEvent::Wheel { delta: 240.0 });
        s.set_lower_depth(20);
        drag_select(&mut s, (0.0, 0.0), (4.0, 4.0));
        let (scale, sel) = (s.view().scale(), *s.selection());
        s.load_world(WorldInfo::default(), true);
        assert_eq!(s.view().scale(), scale);
        assert_eq!(*s.selection(), sel);
        s.load_world(
            WorldInfo {
                spawn: Point::new(-100.0, 300.0),
                player: Point::ORIGIN,
            },
            false,
        );
        assert_eq!(s.view().scale(), 1.0);
        assert_eq!(s.view().center, Point::new(-100.0, 300.0));
        assert_eq!(s.view().depth_bounds(), (62, 255));
        assert!(!s.selection().is_active());
    }

    #[test]
    fn export_edit_reconciles_depths() {
        let mut s = session(Terrain::flat(64));
        s.set_lower_depth(64);
        drag_select(&mut s, (0.0, 0.0), (4.0, 4.0));
        let mut edited = s.export_box().unwrap();
        edited.min_y = 10;
        edited.max_y = 100;
        edited.max_x = 8;
        assert!(s.apply_export_edit(edited));
        assert_eq!(s.view().lower_depth(), 10);
        assert_eq!(s.view().upper_depth(), 100);
        assert_eq!(s.selection().max_column(), Column::new(8, 4));
        assert!(s.available_actions().contains(Actions::REPEAT_EXPORT));

        // Lower depth above the upper depth: the swap is preserved.
        s.set_upper_depth(20);
        s.set_lower_depth(90);
        let mut edited = s.export_box().unwrap();
        assert_eq!((edited.min_y, edited.max_y), (20, 90));
        edited.min_y = 30;
        edited.max_y = 300;
        s.apply_export_edit(edited);
        assert_eq!(s.view().lower_depth(), 255);
        assert_eq!(s.view().upper_depth(), 30);
        assert_eq!((s.selection().min_y(), s.selection().max_y()), (30, 255));
    }

    #[test]
    fn full_width_export_edit_keeps_presses_working() {
        let mut s = session(Terrain::flat(64));
        drag_select(&mut s, (10.0, 10.0), (15.0, 15.0));
        let mut edited = s.export_box().unwrap();
        edited.min_x = i32::MIN;
        edited.max_x = i32::MAX;
        assert!(s.apply_export_edit(edited));
        assert_eq!(s.export_box().unwrap().extent().0, u32::MAX);

        let press = s.handle(InputEvent::PointerDown {
            button: PointerButton::Secondary,
            position: at(0.0, 12.0),
        });
        assert_eq!(press, Handled::Redrawn);
        // The north edge is grabbed; the full-width x range stays locked.
        assert!(matches!(s.drag_state(), DragState::Adjusting(_)));
        assert_eq!(s.selection().min_column(), Column::new(i32::MIN, 12));
        assert_eq!(s.selection().max_column(), Column::new(i32::MAX, 15));
    }

    #[test]
    fn export_edit_without_selection_is_refused() {
        let mut s = session(Terrain::flat(64));
        assert!(!s.apply_export_edit(ExportBox::default()));
        assert!(!s.available_actions().contains(Actions::REPEAT_EXPORT));
    }

    #[test]
    fn available_actions_follow_state() {
        let mut s = session(Terrain::flat(64));
        assert_eq!(
            s.available_actions(),
            Actions::JUMP_TO_SPAWN | Actions::JUMP_TO_PLAYER
        );
        drag_select(&mut s, (0.0, 0.0), (4.0, 4.0));
        assert!(
            s.available_actions()
                .contains(Actions::EXPORT | Actions::JUMP_TO_SELECTION)
        );
    }

    #[test]
    fn toggling_options_redraws_with_them() {
        let mut s = session(Terrain::flat(64));
        s.toggle_option(RenderOptions::LIGHTING);
        assert_eq!(s.renderer().last_options, Some(RenderOptions::LIGHTING));
    }
}
