/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info};
use std::time::{Duration, Instant};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::ElevatorConfig;
use crate::elevator::SharedElevator;

/**
 * Drives the physics of the elevator.
 *
 * Every tick advances the elevator by the wall-clock time since the previous
 * tick fired, not by the nominal period, so scheduling jitter does not change
 * how far the cabin travels.
 *
 * # Fields
 * - `elevator`:        The shared elevator.
 * - `period`:          Nominal tick period.
 * - `terminate_rx`:    Stops the driver when a message arrives or every sender is dropped.
 */
pub struct TickDriver {
    elevator: SharedElevator,
    period: Duration,
    terminate_rx: cbc::Receiver<()>,
}

impl TickDriver {
    pub fn new(
        config: &ElevatorConfig,
        elevator: SharedElevator,
        terminate_rx: cbc::Receiver<()>,
    ) -> TickDriver {
        TickDriver {
            elevator,
            period: config.tick_period(),
            terminate_rx,
        }
    }

    pub fn run(self) {
        info!("Tick driver started with a period of {:?}", self.period);
        let ticker = cbc::tick(self.period);
        let mut last_tick = Instant::now();

        loop {
            cbc::select! {
                recv(ticker) -> _ => {
                    // The instant carried by the tick may be stale, use the clock instead
                    let now = Instant::now();
                    let elapsed = now.saturating_duration_since(last_tick);
                    self.elevator.with(|elevator| elevator.advance(elapsed.as_secs_f64()));
                    last_tick = now;
                }
                recv(self.terminate_rx) -> _ => {
                    debug!("Tick driver terminated");
                    return;
                }
            }
        }
    }
}
