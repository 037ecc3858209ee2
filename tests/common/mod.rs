//! Scripted mock feed server shared by the integration tests.
//!
//! The server speaks the real wire protocol: it reads the 2-byte request,
//! then either streams a scripted byte sequence and closes (stream-all) or
//! follows a per-sequence script of resend steps, one step per connection.

#![allow(dead_code)] // each test binary uses a subset of the helpers

use std::{collections::HashMap, net::SocketAddr, sync::Arc, time::Duration};

use tapefeed::{
    packet::{self, Side, TradePacket},
    request::{CALL_TYPE_RESEND, CALL_TYPE_STREAM_ALL, REQUEST_SIZE},
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    sync::Mutex,
};

/// How the server answers one resend connection for a given sequence.
#[derive(Clone, Debug)]
pub enum ResendStep {
    /// Write these bytes, then close.
    Frame(Vec<u8>),
    /// Close immediately without writing.
    Close,
    /// Hold the connection open without ever writing.
    Stall,
}

/// Scripted behaviour for one mock server instance.
#[derive(Debug, Default)]
pub struct ServerScript {
    /// Bytes streamed in response to a stream-all request.
    pub stream_bytes: Vec<u8>,
    /// When non-zero, stream-all bytes are written in chunks of this size.
    pub write_chunk: usize,
    /// Per-sequence resend scripts, consumed one step per connection.
    /// A missing or exhausted script stalls, modelling an unresponsive server.
    pub resend: HashMap<u8, Vec<ResendStep>>,
}

struct ScriptState {
    stream_bytes: Vec<u8>,
    write_chunk: usize,
    resend: Mutex<HashMap<u8, Vec<ResendStep>>>,
}

/// Spawn a mock server and return the address to connect to.
pub async fn spawn(script: ServerScript) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("server addr");
    let state = Arc::new(ScriptState {
        stream_bytes: script.stream_bytes,
        write_chunk: script.write_chunk,
        resend: Mutex::new(script.resend),
    });
    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(handle(stream, Arc::clone(&state)));
        }
    });
    addr
}

async fn handle(mut stream: TcpStream, state: Arc<ScriptState>) {
    let mut request = [0_u8; REQUEST_SIZE];
    if stream.read_exact(&mut request).await.is_err() {
        return;
    }
    match request[0] {
        CALL_TYPE_STREAM_ALL => {
            if state.write_chunk == 0 {
                let _ = stream.write_all(&state.stream_bytes).await;
            } else {
                for chunk in state.stream_bytes.chunks(state.write_chunk) {
                    let _ = stream.write_all(chunk).await;
                    tokio::task::yield_now().await;
                }
            }
            let _ = stream.shutdown().await;
        }
        CALL_TYPE_RESEND => {
            let step = {
                let mut resend = state.resend.lock().await;
                resend.get_mut(&request[1]).and_then(|steps| {
                    if steps.is_empty() {
                        None
                    } else {
                        Some(steps.remove(0))
                    }
                })
            };
            match step {
                Some(ResendStep::Frame(bytes)) => {
                    let _ = stream.write_all(&bytes).await;
                    // The server leaves the connection open; the client
                    // closes as soon as the frame arrives.
                    tokio::time::sleep(Duration::from_millis(200)).await;
                }
                Some(ResendStep::Close) => {}
                Some(ResendStep::Stall) | None => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                }
            }
        }
        other => panic!("mock server received unknown call type {other}"),
    }
}

/// A well-formed packet with the given sequence.
pub fn sample_packet(sequence: i32) -> TradePacket {
    TradePacket {
        symbol: "AAPL".into(),
        side: Side::Buy,
        quantity: 100,
        price: 15_000,
        sequence,
    }
}

/// Concatenated wire frames for packets with the given sequences.
pub fn frames(sequences: &[i32]) -> Vec<u8> {
    sequences
        .iter()
        .flat_map(|&sequence| packet::encode(&sample_packet(sequence)))
        .collect()
}

/// A resend step answering with the sample packet for `sequence`.
pub fn frame_step(sequence: i32) -> ResendStep {
    ResendStep::Frame(packet::encode(&sample_packet(sequence)).to_vec())
}
