//! # Radio Core
//!
//! Crate compartilhada que define o formato de fio da rede de sensores:
//! tipos de leitura, codec do payload de tamanho fixo, endereços dos
//! dispositivos e o frame entregue pelo driver da estação base.
//!
//! ## Módulos
//! - [`types`] – `ReadingKind` e `Payload`
//! - [`protocol`] – Encode/decode do payload de 8 bytes
//! - [`address`] – Endereços declarados e endereços de pipe
//! - [`frame`] – Frame de 17 bytes do driver (timestamp + pipe + payload)
//! - [`sequence`] – Detecção de perdas e duplicatas por número de sequência
//! - [`reading`] – Documento JSON de leitura
//! - [`config`] – Configuração unificada via TOML

pub mod types;
pub mod protocol;
pub mod address;
pub mod frame;
pub mod sequence;
pub mod reading;
pub mod config;

// Re-exports convenientes
pub use types::{Payload, ReadingKind};
pub use protocol::{PAYLOAD_SIZE, ProtocolError, decode_payload, encode_payload};
pub use frame::{FRAME_SIZE, ReceivedFrame, decode_frame, encode_frame};
pub use sequence::{SequenceStatus, SequenceTracker};
pub use reading::Reading;
pub use config::{AppConfig, ConfigError};
