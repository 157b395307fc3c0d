/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::sync::{Arc, Mutex, PoisonError};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::ElevatorConfig;
use crate::elevator::Elevator;
use crate::shared::ElevatorError;

/**
 * The one elevator of the process, shared between the tick driver, every
 * client connection and the web facade.
 *
 * All access goes through `with`, which holds the lock for the duration of
 * the closure only. Clones refer to the same elevator.
 */
#[derive(Clone, Debug)]
pub struct SharedElevator {
    inner: Arc<Mutex<Elevator>>,
}

impl SharedElevator {
    pub fn new(elevator: Elevator) -> SharedElevator {
        SharedElevator {
            inner: Arc::new(Mutex::new(elevator)),
        }
    }

    pub fn from_config(config: &ElevatorConfig) -> Result<SharedElevator, ElevatorError> {
        Ok(SharedElevator::new(Elevator::new(config)?))
    }

    /// Runs `f` with exclusive access to the elevator.
    pub fn with<R>(&self, f: impl FnOnce(&mut Elevator) -> R) -> R {
        // Every accessor leaves the elevator valid, so a panic in another
        // holder does not corrupt it.
        let mut elevator = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *elevator)
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> Elevator {
        self.with(|elevator| elevator.clone())
    }
}
