//! Test doubles for the CLI runtime.

use std::ffi::OsString;
use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener};
use std::process::ExitCode;
use std::thread::{self, JoinHandle};

use glyph_config::{Config, SocketEndpoint};

use crate::config::ConfigLoader;
use crate::errors::AppError;
use crate::{IoStreams, run_with_loader};

pub(crate) const END_TAG: &str = "APL_NATIVE_END_TAG";

/// Loader pointing the client at a fixed endpoint.
pub(crate) struct StaticLoader {
    pub(crate) endpoint: SocketEndpoint,
}

impl ConfigLoader for StaticLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(Config {
            daemon_socket: self.endpoint.clone(),
            end_tag: END_TAG.to_owned(),
            ..Config::default()
        })
    }
}

/// Single-connection daemon that records one request and replies with a
/// canned body.
pub(crate) struct FakeDaemon {
    address: SocketAddr,
    thread: JoinHandle<String>,
}

impl FakeDaemon {
    pub(crate) fn reply_with(body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind fake daemon");
        let address = listener.local_addr().expect("local address");
        let reply = format!("{body}\n{END_TAG}\n");
        let thread = thread::spawn(move || {
            let (stream, _) = listener.accept().expect("accept client");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            let request = read_request(&mut reader);
            let mut writer = stream;
            writer.write_all(reply.as_bytes()).expect("write reply");
            request
        });
        Self { address, thread }
    }

    pub(crate) fn endpoint(&self) -> SocketEndpoint {
        SocketEndpoint::tcp(self.address.ip().to_string(), self.address.port())
    }

    /// Waits for the exchange and returns the raw request text.
    pub(crate) fn request(self) -> String {
        self.thread.join().expect("fake daemon thread")
    }
}

fn read_request<R: BufRead>(reader: &mut R) -> String {
    let mut request = String::new();
    reader.read_line(&mut request).expect("read command line");
    if request.trim_end() == "def" {
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).expect("read block line") == 0 {
                break;
            }
            request.push_str(&line);
            if line.trim_end() == END_TAG {
                break;
            }
        }
    }
    request
}

/// Captured result of one CLI run.
pub(crate) struct Outcome {
    pub(crate) exit: ExitCode,
    pub(crate) stdout: String,
    pub(crate) stderr: String,
}

pub(crate) fn run_cli(args: &[&str], loader: &StaticLoader) -> Outcome {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let exit = {
        let mut io = IoStreams {
            stdout: &mut stdout,
            stderr: &mut stderr,
        };
        run_with_loader(args.iter().map(OsString::from), &mut io, loader)
    };
    Outcome {
        exit,
        stdout: String::from_utf8(stdout).expect("utf8 stdout"),
        stderr: String::from_utf8(stderr).expect("utf8 stderr"),
    }
}
