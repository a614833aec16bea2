//! Endereços dos dispositivos de rádio.
//!
//! O firmware declara quatro slots de endereço e todos carregam o mesmo
//! valor `0xB7`. Um driver que escolha o destino por um desses símbolos
//! atinge o mesmo alvo físico nos quatro casos. Os valores são mantidos
//! como declarados; se a duplicação é intencional (canal compartilhado)
//! fica a cargo do integrador.

use std::fmt;

/// Identificador de dispositivo de 1 byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceAddress(pub u8);

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

pub const ADDR0: DeviceAddress = DeviceAddress(0xB7);
pub const ADDR1: DeviceAddress = DeviceAddress(0xB7);
pub const ADDR2: DeviceAddress = DeviceAddress(0xB7);
pub const ADDR3: DeviceAddress = DeviceAddress(0xB7);

/// Os quatro slots declarados, na ordem.
pub const DEVICE_ADDRESSES: [DeviceAddress; 4] = [ADDR0, ADDR1, ADDR2, ADDR3];

/// Pipes de recepção do rádio da estação base.
pub const PIPE_COUNT: usize = 6;

/// Largura do endereço de recepção (bytes).
pub const ADDRESS_WIDTH: usize = 5;

/// Endereço de recepção do pipe: `[pipe, 0xB7, 0xB7, 0xB7, 0xB7]`.
///
/// Retorna `None` para pipes fora de `0..PIPE_COUNT`.
pub fn pipe_rx_address(pipe: u8) -> Option<[u8; ADDRESS_WIDTH]> {
    if usize::from(pipe) >= PIPE_COUNT {
        return None;
    }
    let mut address = [ADDR0.0; ADDRESS_WIDTH];
    address[0] = pipe;
    Some(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_slots_share_one_value() {
        assert!(DEVICE_ADDRESSES.iter().all(|a| *a == DeviceAddress(0xB7)));
        assert_eq!(ADDR0, ADDR3);
    }

    #[test]
    fn pipe_addresses() {
        assert_eq!(pipe_rx_address(0), Some([0x00, 0xB7, 0xB7, 0xB7, 0xB7]));
        assert_eq!(pipe_rx_address(5), Some([0x05, 0xB7, 0xB7, 0xB7, 0xB7]));
        assert_eq!(pipe_rx_address(6), None);
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(ADDR1.to_string(), "0xB7");
    }
}
