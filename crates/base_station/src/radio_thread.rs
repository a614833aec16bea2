//! Thread que lê frames do rádio e os envia para o loop principal via channel.

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use radio_core::config::{BaseStationConfig, SourceMode};
use radio_core::frame::{FRAME_SIZE, ReceivedFrame, decode_frame};
use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Mensagem enviada da thread de leitura para o loop principal.
#[derive(Debug, Clone)]
pub struct RadioMessage {
    pub frame: ReceivedFrame,
    pub raw_size: usize,
}

/// Contadores de uma sessão de leitura.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadSummary {
    pub frames: u64,
    pub malformed: u64,
    pub dropped: u64,
}

/// Inicia a thread de leitura. Retorna o receiver do channel.
pub fn spawn_reader_thread(
    config: &BaseStationConfig,
) -> io::Result<(Receiver<RadioMessage>, JoinHandle<()>)> {
    let (tx, rx) = bounded::<RadioMessage>(config.queue_capacity);
    let device = config.device.clone();
    let mode = config.mode;
    let reopen_delay = Duration::from_secs_f64(config.reopen_delay_secs);

    let handle = std::thread::Builder::new()
        .name("radio-reader".into())
        .spawn(move || reader_loop(&tx, &device, mode, reopen_delay))?;

    Ok((rx, handle))
}

fn reader_loop(tx: &Sender<RadioMessage>, device: &str, mode: SourceMode, reopen_delay: Duration) {
    loop {
        match File::open(device) {
            Ok(mut file) => {
                info!("Lendo frames de {device} – Modo: {mode:?}");
                let result = match mode {
                    SourceMode::Datagram => read_datagrams(&mut file, tx),
                    SourceMode::Stream => read_stream(&mut file, tx),
                };
                match result {
                    Ok(summary) => {
                        info!(
                            "Fim de {device}: {} frames, {} inválidos, {} descartados",
                            summary.frames, summary.malformed, summary.dropped
                        );
                        return;
                    }
                    Err(e) if mode == SourceMode::Datagram => {
                        error!("Erro ao ler {device}: {e}. Reabrindo em {reopen_delay:?}...");
                        std::thread::sleep(reopen_delay);
                    }
                    Err(e) => {
                        error!("Erro ao ler {device}: {e}");
                        return;
                    }
                }
            }
            Err(e) if mode == SourceMode::Datagram => {
                error!("Falha ao abrir {device}: {e}. Tentando novamente em {reopen_delay:?}...");
                std::thread::sleep(reopen_delay);
            }
            Err(e) => {
                error!("Falha ao abrir {device}: {e}");
                return;
            }
        }
    }
}

/// Lê uma fonte onde cada `read` devolve exatamente um pacote.
///
/// Pacotes de tamanho diferente de [`FRAME_SIZE`] são ignorados.
pub fn read_datagrams<R: Read>(source: &mut R, tx: &Sender<RadioMessage>) -> io::Result<ReadSummary> {
    let mut summary = ReadSummary::default();
    let mut buf = [0u8; 64];

    loop {
        let size = match source.read(&mut buf) {
            Ok(0) => return Ok(summary),
            Ok(size) => size,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        if size != FRAME_SIZE {
            warn!("Ignorando pacote de tamanho inválido: {size}");
            summary.malformed += 1;
            continue;
        }

        if !forward(&buf[..size], tx, SourceMode::Datagram, &mut summary) {
            return Ok(summary);
        }
    }
}

/// Lê uma fonte contínua, delimitando registros apenas pelo tamanho fixo.
///
/// Nenhum frame é descartado: o envio espera o consumidor.
pub fn read_stream<R: Read>(source: &mut R, tx: &Sender<RadioMessage>) -> io::Result<ReadSummary> {
    let mut summary = ReadSummary::default();
    let mut record = [0u8; FRAME_SIZE];

    loop {
        let filled = fill_record(source, &mut record)?;
        if filled == 0 {
            return Ok(summary);
        }
        if filled < FRAME_SIZE {
            warn!("Registro parcial de {filled} bytes no fim da fonte, ignorado");
            summary.malformed += 1;
            return Ok(summary);
        }

        if !forward(&record, tx, SourceMode::Stream, &mut summary) {
            return Ok(summary);
        }
    }
}

/// Preenche `record` até o fim ou até EOF. Retorna quantos bytes foram lidos.
fn fill_record<R: Read>(source: &mut R, record: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < record.len() {
        match source.read(&mut record[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Decodifica e encaminha um frame. Retorna `false` se o receiver foi fechado.
///
/// No modo `Datagram` o frame é descartado se o channel estiver cheio; no
/// modo `Stream` o envio bloqueia até haver espaço.
fn forward(
    data: &[u8],
    tx: &Sender<RadioMessage>,
    mode: SourceMode,
    summary: &mut ReadSummary,
) -> bool {
    let frame = match decode_frame(data) {
        Ok(frame) => frame,
        Err(e) => {
            warn!("Frame inválido: {e}");
            summary.malformed += 1;
            return true;
        }
    };

    summary.frames += 1;
    let msg = RadioMessage {
        frame,
        raw_size: data.len(),
    };
    match mode {
        SourceMode::Stream => tx.send(msg).is_ok(),
        SourceMode::Datagram => match tx.try_send(msg) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                debug!("Channel cheio, descartando frame");
                summary.dropped += 1;
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        },
    }
}
