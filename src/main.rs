/* 3rd party libraries */
use clap::Parser;
use crossbeam_channel as cbc;
use log::{info, warn};
use std::thread::Builder;

/* Custom libraries */
use elevator_simulator::config::{self, CliArgs};
use elevator_simulator::elevator::{SharedElevator, TickDriver};
use elevator_simulator::server::Server;
use elevator_simulator::unwrap_or_exit;
use elevator_simulator::web::WebServer;

const WELCOME: &str = "
Hi!
This is the elevator simulator. Connect your elevator driver to the client port
and watch the elevator in the browser through the web port.

Tired of this message? The argument --shh will silence it ;)
";

/* Main */
fn main() {
    // Load the configuration
    let args = CliArgs::parse();
    let config = match config::load_config(args.config.as_deref()) {
        Ok(config) => args.apply(config),
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };
    let log_level = match config::parse_log_level(&config.logging.log_level) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    if !config.logging.shh {
        info!("{}", WELCOME);
    }
    unwrap_or_exit!(config.validate());

    // Create the elevator
    let elevator = unwrap_or_exit!(SharedElevator::from_config(&config.elevator));
    info!(
        "Simulating {} floors at {} floors/s with a sensor margin of {}",
        config.elevator.n_floors, config.elevator.speed, config.elevator.margin
    );

    // Start the client server
    let server = unwrap_or_exit!(Server::bind(&config.server, elevator.clone()));
    let server_thread = Builder::new().name("client_server".into());
    unwrap_or_exit!(server_thread.spawn(move || server.run()));

    // Start the web server
    if config.web.enabled {
        match WebServer::bind(&config.web, elevator.clone()) {
            Ok(web_server) => {
                let web_thread = Builder::new().name("web_server".into());
                unwrap_or_exit!(web_thread.spawn(move || web_server.run()));
            }
            Err(e) => warn!("Could not start the HTTP server, continuing without it: {}", e),
        }
    }

    // Run the physics until the process is killed
    let (_terminate_tx, terminate_rx) = cbc::unbounded::<()>();
    let tick_driver = TickDriver::new(&config.elevator, elevator, terminate_rx);
    tick_driver.run();
}
