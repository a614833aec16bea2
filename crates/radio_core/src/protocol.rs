//! Codec binário do payload de rádio.
//!
//! Registro de tamanho fixo, sem prefixo de tamanho nem delimitador.
//! Todos os campos multi-byte em little-endian:
//!
//! ```text
//! ┌──────────┬────────────┬─────────────┐
//! │ Tipo(2)  │ Valor(4)   │ Seqno(2)    │
//! └──────────┴────────────┴─────────────┘
//! ```
//!
//! - Tipo: código `u16` de [`ReadingKind`]
//! - Valor: bits IEEE-754 de um `f32`
//! - Seqno: contador `u16` do nó

use crate::types::{Payload, ReadingKind};

/// Tamanho do registro do payload no fio.
pub const PAYLOAD_SIZE: usize = 8;

const KIND_OFFSET: usize = 0;
const VALUE_OFFSET: usize = 2;
const SEQNO_OFFSET: usize = 6;

/// Erros do protocolo.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("Tamanho de registro inválido ({actual} bytes, esperado {expected})")]
    Framing { expected: usize, actual: usize },

    #[error("Tipo de leitura desconhecido: {0}")]
    UnknownKind(u16),

    #[error("Pipe inválido: {0}")]
    InvalidPipe(u8),
}

/// Codifica um [`Payload`] no registro de [`PAYLOAD_SIZE`] bytes.
pub fn encode_payload(payload: &Payload) -> [u8; PAYLOAD_SIZE] {
    let mut record = [0u8; PAYLOAD_SIZE];
    record[KIND_OFFSET..VALUE_OFFSET].copy_from_slice(&payload.kind.code().to_le_bytes());
    record[VALUE_OFFSET..SEQNO_OFFSET].copy_from_slice(&payload.value.to_bits().to_le_bytes());
    record[SEQNO_OFFSET..].copy_from_slice(&payload.sequence_number.to_le_bytes());
    record
}

/// Decodifica um registro recebido em [`Payload`].
///
/// Rejeita registros de tamanho diferente de [`PAYLOAD_SIZE`] e códigos de
/// tipo fora do conjunto declarado.
pub fn decode_payload(data: &[u8]) -> Result<Payload, ProtocolError> {
    let record: &[u8; PAYLOAD_SIZE] = data.try_into().map_err(|_| ProtocolError::Framing {
        expected: PAYLOAD_SIZE,
        actual: data.len(),
    })?;

    let code = u16::from_le_bytes([record[KIND_OFFSET], record[KIND_OFFSET + 1]]);
    let kind = ReadingKind::try_from(code)?;

    let mut value = [0u8; 4];
    value.copy_from_slice(&record[VALUE_OFFSET..SEQNO_OFFSET]);
    let value = f32::from_bits(u32::from_le_bytes(value));

    let sequence_number = u16::from_le_bytes([record[SEQNO_OFFSET], record[SEQNO_OFFSET + 1]]);

    Ok(Payload {
        kind,
        value,
        sequence_number,
    })
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> Payload {
        Payload::new(ReadingKind::Temperature, 23.5, 42)
    }

    #[test]
    fn encode_decode_roundtrip() {
        let original = sample_payload();
        let encoded = encode_payload(&original);
        let decoded = decode_payload(&encoded).unwrap();
        assert_eq!(decoded.kind, ReadingKind::Temperature);
        assert_eq!(decoded.value, 23.5);
        assert_eq!(decoded.sequence_number, 42);
    }

    #[test]
    fn layout_is_little_endian() {
        let encoded = encode_payload(&sample_payload());
        // 23.5f32 = 0x41BC0000
        assert_eq!(encoded, [0x01, 0x00, 0x00, 0x00, 0xBC, 0x41, 0x2A, 0x00]);
    }

    #[test]
    fn length_is_fixed() {
        let a = encode_payload(&Payload::new(ReadingKind::Unset, 0.0, 0));
        let b = encode_payload(&Payload::new(ReadingKind::Voltage, f32::MAX, u16::MAX));
        assert_eq!(a.len(), PAYLOAD_SIZE);
        assert_eq!(b.len(), PAYLOAD_SIZE);
    }

    #[test]
    fn special_floats_keep_their_bits() {
        let quiet_nan_with_payload = f32::from_bits(0x7FC0_1234);
        let signalling_nan = f32::from_bits(0xFF80_0001);
        for value in [
            -0.0,
            0.0,
            f32::INFINITY,
            f32::NEG_INFINITY,
            f32::MIN_POSITIVE,
            quiet_nan_with_payload,
            signalling_nan,
        ] {
            let original = Payload::new(ReadingKind::Pressure, value, 7);
            let decoded = decode_payload(&encode_payload(&original)).unwrap();
            assert_eq!(decoded.value.to_bits(), value.to_bits());
            assert_eq!(decoded, original);
        }
    }

    #[test]
    fn rejects_short_record() {
        assert_eq!(
            decode_payload(&[0x01, 0x00, 0x00]),
            Err(ProtocolError::Framing {
                expected: PAYLOAD_SIZE,
                actual: 3
            })
        );
        assert!(matches!(
            decode_payload(&[]),
            Err(ProtocolError::Framing { actual: 0, .. })
        ));
    }

    #[test]
    fn rejects_long_record() {
        let mut data = encode_payload(&sample_payload()).to_vec();
        data.push(0);
        assert!(matches!(
            decode_payload(&data),
            Err(ProtocolError::Framing { actual: 9, .. })
        ));
    }

    #[test]
    fn rejects_unknown_kind() {
        let mut encoded = encode_payload(&sample_payload());
        encoded[0] = 7;
        assert_eq!(decode_payload(&encoded), Err(ProtocolError::UnknownKind(7)));
    }

    #[test]
    fn high_tag_byte_is_part_of_the_code() {
        let mut encoded = encode_payload(&sample_payload());
        encoded[1] = 0x01;
        assert_eq!(
            decode_payload(&encoded),
            Err(ProtocolError::UnknownKind(0x0101))
        );
    }

    #[test]
    fn counter_extremes_roundtrip() {
        for seq in [0, 1, u16::MAX - 1, u16::MAX] {
            let original = Payload::new(ReadingKind::Unset, 1.0, seq);
            assert_eq!(decode_payload(&encode_payload(&original)), Ok(original));
        }
    }
}
