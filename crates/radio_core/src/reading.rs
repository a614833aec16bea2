//! Documento JSON de leitura emitido pela estação base.
//!
//! Mesmo formato aceito pelo back-end (`POST /api/v1/readings`).

use crate::frame::ReceivedFrame;
use serde::{Deserialize, Serialize};

/// Leitura decodificada, pronta para serialização.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Horário de recepção (ns desde a época Unix)
    pub time: u64,
    /// Pipe de origem
    pub sensor_id: u8,
    pub seqno: u16,
    /// Código de [`crate::types::ReadingKind`]
    pub rtype: u16,
    pub value: f32,
}

impl From<&ReceivedFrame> for Reading {
    fn from(frame: &ReceivedFrame) -> Self {
        Self {
            time: frame.timestamp_ns,
            sensor_id: frame.pipe,
            seqno: frame.payload.sequence_number,
            rtype: frame.payload.kind.code(),
            value: frame.payload.value,
        }
    }
}

impl Reading {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Payload, ReadingKind};

    #[test]
    fn built_from_frame() {
        let frame = ReceivedFrame {
            timestamp_ns: 42,
            pipe: 4,
            payload: Payload::new(ReadingKind::Pressure, 101_325.0, 9),
        };
        let reading = Reading::from(&frame);
        assert_eq!(reading.sensor_id, 4);
        assert_eq!(reading.rtype, 2);
        assert_eq!(reading.seqno, 9);
        assert_eq!(reading.value, 101_325.0);
    }

    #[test]
    fn json_field_names() {
        let reading = Reading {
            time: 1,
            sensor_id: 0,
            seqno: 42,
            rtype: 1,
            value: 23.5,
        };
        let json = reading.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"time":1,"sensor_id":0,"seqno":42,"rtype":1,"value":23.5}"#
        );
        let parsed: Reading = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, reading);
    }
}
