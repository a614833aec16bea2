//! # Radiolink Base Station
//!
//! Lê os frames entregues pelo driver do rádio (ou de um arquivo de
//! captura), decodifica os payloads dos sensores e imprime cada leitura
//! em stdout, como linha legível ou como documento JSON.
//!
//! ## Uso
//! ```bash
//! base_station                              # Usa config.toml ao lado do executável
//! base_station --device /dev/rfm70 --json   # Uma leitura JSON por linha
//! base_station --device captura.bin --stream
//! base_station --endpoint http://backend:8080  # POST /api/v1/readings
//! ```

mod output;
mod radio_thread;
mod station;
mod upload;

use anyhow::Context;
use clap::Parser;
use radio_core::address::{PIPE_COUNT, pipe_rx_address};
use radio_core::config::{AppConfig, BaseStationConfig, OutputFormat, SourceMode};
use std::path::PathBuf;
use station::Station;
use tracing::{error, info, warn};

#[derive(Debug, Parser)]
#[command(version, about = "Decodifica leituras dos sensores de rádio")]
struct Args {
    /// Arquivo de configuração (padrão: config.toml ao lado do executável)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dispositivo do rádio ou arquivo de captura
    #[arg(short, long)]
    device: Option<String>,

    /// Emite uma leitura JSON por linha
    #[arg(long)]
    json: bool,

    /// Lê registros contínuos de tamanho fixo (arquivo/pipe)
    #[arg(long)]
    stream: bool,

    /// Back-end que recebe as leituras (em vez do console)
    #[arg(short, long)]
    endpoint: Option<String>,
}

/// Aplica as flags da linha de comando sobre a configuração do arquivo.
fn apply_overrides(station: &mut BaseStationConfig, args: &Args) {
    if let Some(device) = &args.device {
        station.device = device.clone();
    }
    if args.json {
        station.output = OutputFormat::Json;
    }
    if args.stream {
        station.mode = SourceMode::Stream;
    }
    if let Some(endpoint) = &args.endpoint {
        station.endpoint = endpoint.clone();
    }
}

fn main() -> anyhow::Result<()> {
    // ── Logging ── (stderr; stdout fica só com as leituras)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // ── Carregar config ──
    let config_path = args.config.clone().unwrap_or_else(AppConfig::default_path);
    let mut config = AppConfig::load(&config_path);

    // Salva config padrão se não existir
    if args.config.is_none() && !config_path.exists() {
        if let Err(e) = config.save(&config_path) {
            warn!("Não foi possível salvar config padrão: {e}");
        }
    }

    apply_overrides(&mut config.base_station, &args);

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            error!("{e}");
        }
        anyhow::bail!("Configuração inválida ({} erro(s))", errors.len());
    }

    let station_cfg = config.base_station;
    info!(
        "Estação base: {} | modo {:?} | saída {:?} | payload {} bytes, frame {} bytes",
        station_cfg.device,
        station_cfg.mode,
        station_cfg.output,
        radio_core::PAYLOAD_SIZE,
        radio_core::FRAME_SIZE
    );
    for pipe in (0..PIPE_COUNT).filter_map(|p| u8::try_from(p).ok()) {
        if let Some(address) = pipe_rx_address(pipe) {
            info!(
                "Pipe {pipe} ({}): endereço {:02X?}",
                station_cfg.sensor_name(pipe),
                address
            );
        }
    }

    // ── Thread de leitura ──
    let (rx, reader) = radio_thread::spawn_reader_thread(&station_cfg)
        .context("Falha ao criar thread de leitura")?;

    // ── Loop principal ──
    let mut station = Station::new(station_cfg);
    let stdout = std::io::stdout();
    station
        .run(&rx, &mut stdout.lock())
        .context("Falha ao escrever leituras")?;

    if reader.join().is_err() {
        anyhow::bail!("Thread de leitura terminou com pânico");
    }

    station.log_summary();
    Ok(())
}
