/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, info, warn};
use std::error::Error;
use std::io::Read;
use std::net::SocketAddr;
use std::thread::Builder;
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::WebConfig;
use crate::elevator::SharedElevator;
use crate::web::facade;

/***************************************/
/*       Public data structures        */
/***************************************/

/// Status and optional JSON body of an answered request.
#[derive(Debug, Clone, PartialEq)]
pub struct WebResponse {
    pub status: u16,
    pub body: Option<String>,
}

/**
 * HTTP server for the browser frontend.
 *
 * Serves `GET /api/total` and `POST /api/button` on top of the same shared
 * elevator as the client protocol. Each request is handled on its own thread.
 */
pub struct WebServer {
    server: Server,
    elevator: SharedElevator,
}

impl WebServer {
    pub fn bind(config: &WebConfig, elevator: SharedElevator) -> Result<WebServer, Box<dyn Error + Send + Sync + 'static>> {
        let server = Server::http(("0.0.0.0", config.web_port))?;
        Ok(WebServer { server, elevator })
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    pub fn run(self) {
        if let Some(addr) = self.local_addr() {
            info!("HTTP server started on {}", addr);
            info!(
                "The state of the elevator can be found at http://localhost:{}/api/total",
                addr.port()
            );
        }

        for request in self.server.incoming_requests() {
            let elevator = self.elevator.clone();
            let request_thread = Builder::new().name("web_request".into());
            if let Err(e) = request_thread.spawn(move || respond(request, &elevator)) {
                warn!("Could not start a thread for the web request: {}", e);
            }
        }
    }
}

/// Answers one request. The path may carry a query string, which is ignored.
pub fn route(method: &Method, url: &str, body: &[u8], elevator: &SharedElevator) -> WebResponse {
    let path = url.split('?').next().unwrap_or("");

    let result = match (method, path) {
        (Method::Get, "/api/total") => facade::total(elevator).map(Some),
        (Method::Post, "/api/button") => facade::set_button(elevator, body).map(|_| None),
        _ => {
            return WebResponse {
                status: 404,
                body: None,
            }
        }
    };

    match result {
        Ok(Some(json)) => WebResponse {
            status: 200,
            body: Some(json),
        },
        Ok(None) => WebResponse {
            status: 204,
            body: None,
        },
        Err(e) => {
            warn!("Path: {}. Error: {}", path, e);
            WebResponse {
                status: e.status,
                body: None,
            }
        }
    }
}

/***************************************/
/*          Private functions          */
/***************************************/
fn respond(mut request: Request, elevator: &SharedElevator) {
    debug!("Handling: {} {}", request.method(), request.url());

    let mut body = Vec::new();
    let answer = match request.as_reader().read_to_end(&mut body) {
        Ok(_) => route(request.method(), request.url(), &body, elevator),
        Err(e) => {
            warn!("Could not read the request body: {}", e);
            WebResponse {
                status: 400,
                body: None,
            }
        }
    };

    let mut response = Response::from_data(answer.body.unwrap_or_default().into_bytes())
        .with_status_code(StatusCode(answer.status));
    if answer.status == 200 {
        if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], &b"application/json; charset=UTF-8"[..]) {
            response.add_header(header);
        }
    }

    let url = request.url().to_string();
    if let Err(e) = request.respond(response) {
        warn!("Could not answer {}: {}", url, e);
    }
    debug!("Handled: {}", url);
}
