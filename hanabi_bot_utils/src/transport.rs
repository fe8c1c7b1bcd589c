use std::io::{BufRead, BufReader, Write};
use std::net::{TcpStream, ToSocketAddrs};

use hanabi::{Request, Response};
use tracing::trace;

use crate::ProtocolError;

/// A blocking, message-oriented connection to the game server.
pub trait Transport {
    fn send(&mut self, request: &Request) -> anyhow::Result<()>;

    /// Blocks until the next message arrives.
    fn receive(&mut self) -> anyhow::Result<Response>;
}

/// Exchanges one JSON object per line.
pub struct JsonLinesTransport<R, W> {
    reader: R,
    writer: W,
    // A re-usable buffer for reading.
    // Should always be empty before and after receive().
    buf: String,
}

impl JsonLinesTransport<BufReader<TcpStream>, TcpStream> {
    pub fn connect(addr: impl ToSocketAddrs) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr)?;
        let reader = BufReader::new(stream.try_clone()?);
        Ok(Self::new(reader, stream))
    }
}

impl<R: BufRead, W: Write> JsonLinesTransport<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            buf: String::new(),
        }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: BufRead, W: Write> Transport for JsonLinesTransport<R, W> {
    fn send(&mut self, request: &Request) -> anyhow::Result<()> {
        let mut req_json = serde_json::to_string(request)?;
        trace!(name: "Sending request", request = %req_json);
        req_json.push('\n');
        self.writer.write_all(req_json.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    fn receive(&mut self) -> anyhow::Result<Response> {
        self.buf.clear();
        let num_bytes_read = self.reader.read_line(&mut self.buf)?;
        if num_bytes_read == 0 {
            // 0 bytes read means EOF - the server has gone away.
            return Err(ProtocolError::ConnectionClosed.into());
        }
        let serialized_response = self.buf.trim_end();
        trace!(name: "Received response", response = %serialized_response);
        let response = serde_json::from_str::<Response>(serialized_response)?;
        self.buf.clear();
        Ok(response)
    }
}
