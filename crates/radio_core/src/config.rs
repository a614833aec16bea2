//! Configuração unificada via TOML.
//!
//! Um único `config.toml` ao lado do executável; seções ausentes usam os
//! valores padrão.

use crate::address::PIPE_COUNT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Como os frames chegam da fonte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    /// Dispositivo de caractere: cada `read` devolve um pacote
    Datagram,
    /// Arquivo de captura ou pipe: registros delimitados só pelo tamanho
    Stream,
}

/// Formato de saída das leituras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

/// Configuração da estação base.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseStationConfig {
    /// Dispositivo de caractere do rádio (ou arquivo de captura)
    pub device: String,
    pub mode: SourceMode,
    pub output: OutputFormat,
    /// Capacidade do channel entre leitura e saída
    pub queue_capacity: usize,
    /// Espera antes de tentar abrir o dispositivo novamente (segundos)
    pub reopen_delay_secs: f64,
    /// Nome exibido para cada pipe
    pub sensor_names: Vec<String>,
    /// Back-end para upload das leituras (vazio = imprime no console)
    pub endpoint: String,
}

impl Default for BaseStationConfig {
    fn default() -> Self {
        Self {
            device: "/dev/rfm70".into(),
            mode: SourceMode::Datagram,
            output: OutputFormat::Text,
            queue_capacity: 64,
            reopen_delay_secs: 2.0,
            sensor_names: (1..=PIPE_COUNT).map(|i| format!("Sensor {i}")).collect(),
            endpoint: String::new(),
        }
    }
}

impl BaseStationConfig {
    /// Nome do sensor no pipe, ou um nome genérico se não configurado.
    pub fn sensor_name(&self, pipe: u8) -> String {
        self.sensor_names
            .get(usize::from(pipe))
            .cloned()
            .unwrap_or_else(|| format!("Pipe {pipe}"))
    }
}

/// Configuração raiz do aplicativo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_station: BaseStationConfig,
}

/// Erros de leitura/escrita do arquivo de configuração.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Erro de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML inválido: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Erro ao gerar TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl AppConfig {
    /// Lê e parseia um arquivo TOML, sem fallback.
    pub fn read_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Carrega a configuração; arquivo ausente ou inválido resulta no padrão.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            info!("{} não existe, usando configuração padrão", path.display());
            return AppConfig::default();
        }

        match Self::read_from(path) {
            Ok(config) => {
                info!("Configuração carregada de {}", path.display());
                config
            }
            Err(e) => {
                warn!("{}: {e}. Usando configuração padrão", path.display());
                AppConfig::default()
            }
        }
    }

    /// Salva configuração em arquivo TOML.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        info!("Configuração salva em {}", path.display());
        Ok(())
    }

    /// Caminho padrão: `config.toml` no diretório do executável.
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("config.toml")))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Valida a configuração e retorna lista de erros.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let station = &self.base_station;

        if station.device.trim().is_empty() {
            errors.push("Dispositivo não pode ser vazio".into());
        }
        if station.queue_capacity == 0 {
            errors.push("Capacidade da fila não pode ser 0".into());
        }
        if !(0.1..=60.0).contains(&station.reopen_delay_secs) {
            errors.push(format!(
                "Espera de reabertura inválida: {} (0.1–60.0)",
                station.reopen_delay_secs
            ));
        }
        if !station.endpoint.is_empty()
            && !(station.endpoint.starts_with("http://") || station.endpoint.starts_with("https://"))
        {
            errors.push(format!(
                "Endpoint inválido: {} (esperado http:// ou https://)",
                station.endpoint
            ));
        }
        if station.sensor_names.len() > PIPE_COUNT {
            errors.push(format!(
                "Nomes de sensores demais: {} (máximo {PIPE_COUNT})",
                station.sensor_names.len()
            ));
        }

        errors
    }
}
