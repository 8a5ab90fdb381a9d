//! Playback shell around a [`Simulation`].
//!
//! The host owns the frame clock (an animation-frame callback, a render
//! loop, a fixed tick count) and calls [`Player::frame`] once per frame.
//! Pausing only stops ticks and drawing; it never touches simulation state.

use crate::error::EngineError;
use crate::render::RenderSink;
use crate::simulation::Simulation;

pub struct Player {
    simulation: Simulation,
    paused: bool,
}

impl Player {
    /// Wraps a simulation, initially running.
    pub fn new(simulation: Simulation) -> Self {
        Self {
            simulation,
            paused: false,
        }
    }

    pub fn pause(&mut self) {
        if !self.paused {
            log::debug!("paused at tick {}", self.simulation.ticks());
        }
        self.paused = true;
    }

    pub fn resume(&mut self) {
        if self.paused {
            log::debug!("resumed at tick {}", self.simulation.ticks());
        }
        self.paused = false;
    }

    pub fn toggle(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Runs one frame: draws the current particle states, then ticks.
    ///
    /// Does nothing while paused. Returns whether a tick happened.
    pub fn frame(&mut self, sink: &mut dyn RenderSink) -> bool {
        if self.paused {
            return false;
        }
        self.simulation.render(sink);
        self.simulation.tick();
        true
    }

    /// Wipes the surface to the background color.
    pub fn clear_canvas(&self, sink: &mut dyn RenderSink) {
        sink.clear(1.0);
    }

    /// Clears the surface and restarts the simulation from fresh random state.
    pub fn reset(&mut self, sink: &mut dyn RenderSink) {
        self.clear_canvas(sink);
        self.simulation.reset();
    }

    /// Clears the surface and adopts a new size.
    pub fn resize(
        &mut self,
        width: usize,
        height: usize,
        sink: &mut dyn RenderSink,
    ) -> Result<(), EngineError> {
        self.simulation.resize(width, height)?;
        self.clear_canvas(sink);
        Ok(())
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Mutable access for configuration changes between frames.
    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.simulation
    }

    pub fn into_simulation(self) -> Simulation {
        self.simulation
    }
}
