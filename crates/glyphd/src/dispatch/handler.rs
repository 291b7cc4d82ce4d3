//! Connection handler that serves protocol commands.
//!
//! Each connection is served until the client disconnects, sends `quit`, or
//! a fatal error occurs. Non-fatal errors are answered in-band and the loop
//! continues with the next command.

use std::io::{Read, Write};

use tracing::{debug, warn};

use crate::session::{Protocol, Session};
use crate::transport::{ConnectionHandler, ConnectionStream};

use super::errors::DispatchError;
use super::response::ResponseWriter;
use super::router::{CommandRouter, DISPATCH_TARGET, Flow};

/// Connection handler running the command loop.
#[derive(Debug, Clone)]
pub struct DispatchConnectionHandler {
    router: CommandRouter,
    protocol: Protocol,
}

impl DispatchConnectionHandler {
    /// Creates a handler routing through `router` with the given framing.
    pub const fn new(router: CommandRouter, protocol: Protocol) -> Self {
        Self { router, protocol }
    }

    /// Serves commands from `stream` until the connection ends.
    pub fn serve<S>(&self, stream: S)
    where
        S: Read + Write,
    {
        let mut session = Session::new(stream, self.protocol.clone());
        loop {
            match self.step(&mut session) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Close) => {
                    debug!(target: DISPATCH_TARGET, "client closed session");
                    return;
                }
                Err(error) if error.is_fatal() => {
                    warn!(target: DISPATCH_TARGET, %error, "closing connection after fatal error");
                    return;
                }
                Err(error) => {
                    debug!(target: DISPATCH_TARGET, %error, "rejecting command");
                    let end_tag = self.protocol.end_tag();
                    if let Err(write_error) =
                        ResponseWriter::new(&mut session, end_tag).respond_error(&error)
                    {
                        warn!(target: DISPATCH_TARGET, error = %write_error, "failed to write error response");
                        return;
                    }
                }
            }
        }
    }

    fn step<S>(&self, session: &mut Session<S>) -> Result<Flow, DispatchError>
    where
        S: Read + Write,
    {
        match session.next_command()? {
            Some(line) => self.router.route(&line, session),
            None => Ok(Flow::Close),
        }
    }
}

impl ConnectionHandler for DispatchConnectionHandler {
    fn handle(&self, stream: ConnectionStream) {
        let peer = stream.peer();
        debug!(target: DISPATCH_TARGET, %peer, "serving connection");
        self.serve(stream);
    }
}
