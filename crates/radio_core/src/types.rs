//! Tipos transmitidos pelo link de rádio.
//!
//! Espelha o `struct payload` do firmware dos sensores: um tipo de leitura,
//! o valor medido e o número de sequência do nó.

use crate::protocol::ProtocolError;
use std::fmt;

// ──────────────────────────────────────────────
// Tipo de leitura
// ──────────────────────────────────────────────

/// Grandeza física carregada por um [`Payload`].
///
/// Os códigos numéricos fazem parte do formato de fio e não podem mudar
/// entre builds do firmware e da estação base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum ReadingKind {
    Unset = 0,
    Temperature = 1,
    Pressure = 2,
    Voltage = 3,
}

impl ReadingKind {
    /// Todos os tipos, na ordem dos códigos.
    pub const ALL: [ReadingKind; 4] = [
        ReadingKind::Unset,
        ReadingKind::Temperature,
        ReadingKind::Pressure,
        ReadingKind::Voltage,
    ];

    /// Código de 16 bits usado no fio.
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Nome em minúsculas (usado pelo front-end).
    pub const fn name(self) -> &'static str {
        match self {
            ReadingKind::Unset => "null",
            ReadingKind::Temperature => "temperature",
            ReadingKind::Pressure => "pressure",
            ReadingKind::Voltage => "voltage",
        }
    }

    /// Rótulo exibido no console da estação base.
    pub const fn label(self) -> &'static str {
        match self {
            ReadingKind::Unset => "T_NULL",
            ReadingKind::Temperature => "T_TEMPERATURE",
            ReadingKind::Pressure => "T_PRESSURE",
            ReadingKind::Voltage => "T_VOLTAGE",
        }
    }

    /// Unidade convencionada entre produtor e consumidor.
    pub const fn unit(self) -> &'static str {
        match self {
            ReadingKind::Unset => "",
            ReadingKind::Temperature => "°C",
            ReadingKind::Pressure => "Pa",
            ReadingKind::Voltage => "V",
        }
    }
}

impl TryFrom<u16> for ReadingKind {
    type Error = ProtocolError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ReadingKind::Unset),
            1 => Ok(ReadingKind::Temperature),
            2 => Ok(ReadingKind::Pressure),
            3 => Ok(ReadingKind::Voltage),
            other => Err(ProtocolError::UnknownKind(other)),
        }
    }
}

impl From<ReadingKind> for u16 {
    fn from(kind: ReadingKind) -> Self {
        kind.code()
    }
}

impl fmt::Display for ReadingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ──────────────────────────────────────────────
// Payload
// ──────────────────────────────────────────────

/// Uma leitura de sensor com seu número de sequência.
///
/// A igualdade compara os bits de `value`: `-0.0` difere de `0.0` e dois NaN
/// com o mesmo padrão de bits são iguais.
#[derive(Debug, Clone, Copy)]
pub struct Payload {
    pub kind: ReadingKind,
    /// Medida, na unidade implícita em `kind`
    pub value: f32,
    /// Contador por nó, volta a zero após `u16::MAX`
    pub sequence_number: u16,
}

impl Payload {
    pub fn new(kind: ReadingKind, value: f32, sequence_number: u16) -> Self {
        Self {
            kind,
            value,
            sequence_number,
        }
    }
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.value.to_bits() == other.value.to_bits()
            && self.sequence_number == other.sequence_number
    }
}

impl Eq for Payload {}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ReadingKind::Unset.code(), 0);
        assert_eq!(ReadingKind::Temperature.code(), 1);
        assert_eq!(ReadingKind::Pressure.code(), 2);
        assert_eq!(ReadingKind::Voltage.code(), 3);
    }

    #[test]
    fn try_from_accepts_declared_codes() {
        for kind in ReadingKind::ALL {
            assert_eq!(ReadingKind::try_from(kind.code()).unwrap(), kind);
        }
    }

    #[test]
    fn unknown_code_is_not_unset() {
        assert!(matches!(
            ReadingKind::try_from(4),
            Err(ProtocolError::UnknownKind(4))
        ));
        assert!(matches!(
            ReadingKind::try_from(u16::MAX),
            Err(ProtocolError::UnknownKind(u16::MAX))
        ));
    }

    #[test]
    fn labels_match_console_names() {
        let labels: Vec<_> = ReadingKind::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(
            labels,
            ["T_NULL", "T_TEMPERATURE", "T_PRESSURE", "T_VOLTAGE"]
        );
        assert_eq!(ReadingKind::Pressure.to_string(), "pressure");
    }

    #[test]
    fn units_per_kind() {
        let units: Vec<_> = ReadingKind::ALL.iter().map(|k| k.unit()).collect();
        assert_eq!(units, ["", "°C", "Pa", "V"]);
    }

    #[test]
    fn equality_is_bitwise() {
        let pos = Payload::new(ReadingKind::Voltage, 0.0, 1);
        let neg = Payload::new(ReadingKind::Voltage, -0.0, 1);
        assert_ne!(pos, neg);

        let nan = Payload::new(ReadingKind::Voltage, f32::NAN, 1);
        assert_eq!(nan, nan);
    }
}
