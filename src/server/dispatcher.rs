/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, info, warn};
use std::io::{self, ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread::Builder;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::ServerConfig;
use crate::elevator::{Elevator, SharedElevator};
use crate::protocol::{read_frame, write_frame, Command, DecodeError, Reply};
use crate::shared::ElevatorError;

/**
 * TCP server for elevator clients.
 *
 * Every accepted connection gets its own thread running `handle_connection`.
 * Connections only meet through the shared elevator, so a stalled client
 * never holds up the others.
 *
 * # Fields
 * - `listener`:    Bound listening socket.
 * - `elevator`:    The shared elevator every connection operates on.
 */
pub struct Server {
    listener: TcpListener,
    elevator: SharedElevator,
}

impl Server {
    pub fn bind(config: &ServerConfig, elevator: SharedElevator) -> io::Result<Server> {
        let listener = TcpListener::bind(("0.0.0.0", config.client_port))?;
        Ok(Server { listener, elevator })
    }

    pub fn from_listener(listener: TcpListener, elevator: SharedElevator) -> Server {
        Server { listener, elevator }
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn run(self) {
        if let Ok(addr) = self.local_addr() {
            info!("Elevator server listening on {}", addr);
        }

        for stream in self.listener.incoming() {
            let stream = match stream {
                Ok(stream) => stream,
                Err(e) => {
                    warn!("Error opening connection, lost this call: {}", e);
                    continue;
                }
            };

            let peer = peer_name(&stream);
            info!("Got a connection from {}", peer);

            let elevator = self.elevator.clone();
            let connection_thread = Builder::new().name(format!("client_{}", peer));
            let spawned = connection_thread.spawn(move || {
                match handle_connection(stream, &elevator) {
                    Ok(()) => info!("Client {} disconnected", peer),
                    Err(e) => warn!("Client {} dropped: {}", peer, e),
                }
            });
            if let Err(e) = spawned {
                warn!("Could not start a thread for the connection: {}", e);
            }
        }
    }
}

/**
 * Runs the command loop of one connection until the peer goes away.
 *
 * Returns `Ok` when the peer closed the connection between two frames and
 * `TransportClosed` on any other read or write failure. Bad commands are
 * logged and dropped without closing the connection, except an unknown motor
 * direction byte, which stops the motor.
 */
pub fn handle_connection<S: Read + Write>(mut stream: S, elevator: &SharedElevator) -> Result<(), ElevatorError> {
    loop {
        let frame = match read_frame(&mut stream)? {
            Some(frame) => frame,
            None => return Ok(()),
        };

        let reply = match Command::decode(frame) {
            Ok(command) => {
                debug!("{:?}", command);
                let result = elevator.with(|e| execute(command, e));
                match result {
                    Ok(reply) => reply,
                    Err(e) => {
                        warn!("Could not execute {:?}: {}", command, e);
                        Reply::fallback(frame[0])
                    }
                }
            }
            Err(e) => {
                warn!("Could not decode command {:?}: {}", frame, e);
                if let DecodeError::InvalidMotorDirection(_) = e {
                    // An unreadable direction stops the motor
                    elevator.with(|state| state.set_direction(0))?;
                }
                Reply::fallback(e.opcode())
            }
        };

        if let Some(reply) = reply {
            write_frame(&mut stream, &reply.encode())?;
        }
    }
}

/// Applies one command to the elevator. Only read commands produce a reply.
pub fn execute(command: Command, elevator: &mut Elevator) -> Result<Option<Reply>, ElevatorError> {
    match command {
        Command::NoOp => Ok(None),
        Command::SetMotorDirection(direction) => {
            elevator.set_direction(direction)?;
            Ok(None)
        }
        Command::SetOrderButtonLamp { button, floor, on } => {
            elevator.set_button_lamp(button, floor as usize, on)?;
            Ok(None)
        }
        Command::SetFloorIndicator(floor) => {
            elevator.set_floor_indicator(floor as usize)?;
            Ok(None)
        }
        Command::SetDoorOpenLamp(on) => {
            elevator.set_door_lamp(on);
            Ok(None)
        }
        Command::SetStopButtonLamp(on) => {
            elevator.set_stop_lamp(on);
            Ok(None)
        }
        Command::GetOrderButton { button, floor } => {
            let pressed = elevator.button(button, floor as usize)?;
            Ok(Some(Reply::OrderButton(pressed)))
        }
        Command::GetFloorSensor => {
            // Floors fit in a byte since the floor count is configured as one
            let floor = elevator.floor_signal().map(|floor| floor as u8);
            Ok(Some(Reply::FloorSensor(floor)))
        }
        Command::GetStopButton => Ok(Some(Reply::StopButton(elevator.stop_button()))),
        Command::GetObstructionSwitch => Ok(Some(Reply::ObstructionSwitch(elevator.obstruction()))),
    }
}

fn peer_name(stream: &TcpStream) -> String {
    match stream.peer_addr() {
        Ok(addr) => addr.to_string(),
        Err(e) if e.kind() == ErrorKind::NotConnected => "disconnected peer".to_string(),
        Err(_) => "unknown peer".to_string(),
    }
}
