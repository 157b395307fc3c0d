pub mod dispatcher;


pub use dispatcher::{execute, handle_connection, Server};
