//! Frame entregue pelo driver de rádio da estação base.
//!
//! Cada pacote recebido chega ao espaço de usuário como um registro de
//! [`FRAME_SIZE`] bytes:
//!
//! ```text
//! ┌───────────────┬─────────┬──────────────┐
//! │ Timestamp(8)  │ Pipe(1) │ Payload(8)   │
//! └───────────────┴─────────┴──────────────┘
//! ```
//!
//! - Timestamp: nanossegundos desde a época Unix (`u64` LE)
//! - Pipe: índice do pipe de recepção, identifica o sensor

use crate::address::PIPE_COUNT;
use crate::protocol::{PAYLOAD_SIZE, ProtocolError, decode_payload, encode_payload};
use crate::types::Payload;

/// Tamanho do frame recebido do driver.
pub const FRAME_SIZE: usize = TIMESTAMP_SIZE + 1 + PAYLOAD_SIZE;

const TIMESTAMP_SIZE: usize = 8;
const PIPE_OFFSET: usize = TIMESTAMP_SIZE;
const PAYLOAD_OFFSET: usize = PIPE_OFFSET + 1;

/// Pacote recebido, com horário e pipe de origem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceivedFrame {
    pub timestamp_ns: u64,
    pub pipe: u8,
    pub payload: Payload,
}

pub fn encode_frame(frame: &ReceivedFrame) -> [u8; FRAME_SIZE] {
    let mut record = [0u8; FRAME_SIZE];
    record[..PIPE_OFFSET].copy_from_slice(&frame.timestamp_ns.to_le_bytes());
    record[PIPE_OFFSET] = frame.pipe;
    record[PAYLOAD_OFFSET..].copy_from_slice(&encode_payload(&frame.payload));
    record
}

/// Decodifica um frame do driver.
///
/// O pipe é validado antes do payload.
pub fn decode_frame(data: &[u8]) -> Result<ReceivedFrame, ProtocolError> {
    if data.len() != FRAME_SIZE {
        return Err(ProtocolError::Framing {
            expected: FRAME_SIZE,
            actual: data.len(),
        });
    }

    let mut timestamp = [0u8; TIMESTAMP_SIZE];
    timestamp.copy_from_slice(&data[..PIPE_OFFSET]);

    let pipe = data[PIPE_OFFSET];
    if usize::from(pipe) >= PIPE_COUNT {
        return Err(ProtocolError::InvalidPipe(pipe));
    }

    Ok(ReceivedFrame {
        timestamp_ns: u64::from_le_bytes(timestamp),
        pipe,
        payload: decode_payload(&data[PAYLOAD_OFFSET..])?,
    })
}
