//! Aggregate tunnel state: path, clocks, lifecycle, both tube layers and
//! the ring accents. Owned by the frame driver and dropped as a unit.

use crate::config::TunnelConfig;
use crate::error::ConfigError;
use crate::geometry::{self, LayerKind, TubeLayer};
use crate::hooks::Collaborators;
use crate::lifecycle::{Lifecycle, Opacity, TunnelPhase};
use crate::palette;
use crate::path::PathModel;
use crate::render::{FrameSubmission, LayerDraw};
use crate::rings::RingSet;
use crate::state::Camera;
use glam::Vec2;

#[derive(Debug)]
pub struct EngineState {
    config: TunnelConfig,
    path: PathModel,
    camera: Camera,
    shape_clock: f32,
    palette_clock: f32,
    lifecycle: Lifecycle,
    outer: TubeLayer,
    inner: TubeLayer,
    rings: RingSet,
    collaborators: Collaborators,
    elapsed: f32,
    opacity: Opacity,
    handoffs: u32,
}

impl EngineState {
    pub fn new(config: TunnelConfig, collaborators: Collaborators) -> Result<Self, ConfigError> {
        config.validate()?;
        let radial = config.shapes.radial_segment_count();
        let rings = config.geometry.ring_count;
        let outer = TubeLayer::new(LayerKind::Outer, config.outer.clone(), rings, radial);
        let inner = TubeLayer::new(LayerKind::Inner, config.inner.clone(), rings, radial);
        let ring_set = RingSet::new(&config.rings, &config.geometry, &config.shapes);
        log::info!(
            "[tunnel] built: {} rings x {} segments, {} shapes, {} palettes",
            rings,
            radial,
            config.shapes.len(),
            config.palettes.palettes().len()
        );
        Ok(Self {
            path: PathModel::new(&config.path),
            camera: Camera::new(&config.camera),
            lifecycle: Lifecycle::new(config.lifecycle.clone()),
            shape_clock: 0.0,
            palette_clock: 0.0,
            outer,
            inner,
            rings: ring_set,
            collaborators,
            elapsed: 0.0,
            opacity: Opacity::default(),
            handoffs: 0,
            config,
        })
    }

    pub fn config(&self) -> &TunnelConfig {
        &self.config
    }

    pub fn path(&self) -> &PathModel {
        &self.path
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn phase(&self) -> TunnelPhase {
        self.lifecycle.phase()
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn opacity(&self) -> Opacity {
        self.opacity
    }

    pub fn shape_clock(&self) -> f32 {
        self.shape_clock
    }

    pub fn palette_clock(&self) -> f32 {
        self.palette_clock
    }

    pub fn outer(&self) -> &TubeLayer {
        &self.outer
    }

    pub fn inner(&self) -> &TubeLayer {
        &self.inner
    }

    pub fn rings(&self) -> &RingSet {
        &self.rings
    }

    /// How many times the Active handoff has gone out (0 or 1).
    pub fn handoff_count(&self) -> u32 {
        self.handoffs
    }

    /// One frame of work in strict order: path, clocks, phase, geometry,
    /// color. Returns the phase after this frame.
    pub fn step(&mut self, elapsed: f32, dt_sec: f32, pointer: Vec2) -> TunnelPhase {
        self.elapsed = elapsed;
        self.path.update_from_pointer(pointer, dt_sec);
        self.shape_clock += dt_sec * self.config.shape_clock_rate;
        self.palette_clock += dt_sec * self.config.palette_clock_rate;

        for transition in self.lifecycle.advance(elapsed) {
            if transition.to == TunnelPhase::Active && self.handoffs == 0 {
                self.handoffs += 1;
                self.collaborators.signal_active();
            }
        }
        let phase = self.lifecycle.phase();
        self.opacity = self.lifecycle.opacity(elapsed);
        self.outer.set_opacity(self.opacity.outer);
        self.inner.set_opacity(self.opacity.inner);
        self.rings.set_opacity(self.opacity.rings);
        if phase == TunnelPhase::Complete {
            return phase;
        }

        let Some(curve) = self.path.curve() else {
            log::trace!("[tunnel] curve unavailable; keeping last frame's buffers");
            return phase;
        };
        self.camera
            .follow(&self.config.camera, self.path.smoothed_pointer(), &curve);

        let cfg = &self.config;
        for layer in [&mut self.outer, &mut self.inner] {
            geometry::rebuild(
                layer,
                &curve,
                &cfg.shapes,
                &cfg.geometry,
                self.shape_clock,
                elapsed,
            );
        }

        let shutdown = self.lifecycle.shutdown_override(elapsed);
        for layer in [&mut self.outer, &mut self.inner] {
            palette::colorize(
                layer,
                &cfg.palettes,
                &cfg.color,
                elapsed,
                self.palette_clock,
                shutdown,
            );
        }
        self.rings.update(
            &curve,
            &cfg.palettes,
            &cfg.color,
            elapsed,
            self.palette_clock,
            shutdown,
        );
        phase
    }

    pub fn submission(&self) -> FrameSubmission<'_> {
        FrameSubmission {
            layers: [layer_draw(&self.outer), layer_draw(&self.inner)],
            rings: if self.phase().rings_visible() {
                self.rings.draws()
            } else {
                Default::default()
            },
        }
    }
}

fn layer_draw(layer: &TubeLayer) -> LayerDraw<'_> {
    LayerDraw {
        label: layer.profile().label,
        positions: layer.positions(),
        colors: layer.colors(),
        indices: layer.indices(),
        opacity: layer.opacity(),
    }
}
