//! Wall-clock driver: ticks a `SimulationWorld` at the requested cadence
//! until told to stop.

use std::time::Duration;

use tokio::sync::watch;

use crate::simulation::SimulationWorld;

/// Receivers the binary uses to steer a running simulation.
pub struct TickControls {
    pub tick_duration: watch::Receiver<Duration>,
    pub paused: watch::Receiver<bool>,
    /// Flips to `true` once; a send made while a tick runs is still seen.
    pub shutdown: watch::Receiver<bool>,
}

/// Runs until shutdown is requested or a control sender is dropped.
/// Returns the simulation so callers can report on it.
pub async fn run(mut simulation: SimulationWorld, controls: TickControls) -> SimulationWorld {
    let TickControls {
        mut tick_duration,
        paused: mut pause_rx,
        mut shutdown,
    } = controls;

    let mut interval = tokio::time::interval(*tick_duration.borrow());
    let mut paused = *pause_rx.borrow();
    loop {
        if *shutdown.borrow() {
            break;
        }
        tokio::select! {
            _ = interval.tick() => {
                if !paused {
                    simulation.tick();
                }
            },
            result = tick_duration.changed() => {
                if result.is_ok() {
                    let new_duration = *tick_duration.borrow();
                    interval = tokio::time::interval(new_duration);
                } else {
                    break;
                }
            },
            result = pause_rx.changed() => {
                if result.is_ok() {
                    paused = *pause_rx.borrow();
                } else {
                    break;
                }
            },
            result = shutdown.changed() => {
                if result.is_err() {
                    break;
                }
            },
        }
    }
    simulation
}
