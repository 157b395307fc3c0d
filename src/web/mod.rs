pub mod facade;
pub mod http;


pub use facade::{ButtonPress, WebError};
pub use http::{route, WebResponse, WebServer};
