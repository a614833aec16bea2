//! Loop de consumo: sequência por sensor e saída das leituras.

use crate::output;
use crate::radio_thread::RadioMessage;
use crate::upload::Uploader;
use crossbeam_channel::Receiver;
use radio_core::config::BaseStationConfig;
use radio_core::frame::ReceivedFrame;
use radio_core::reading::Reading;
use radio_core::sequence::{SequenceStatus, SequenceTracker};
use std::io::Write;
use tracing::{debug, info, warn};

pub struct Station {
    config: BaseStationConfig,
    tracker: SequenceTracker,
    /// Presente quando há endpoint configurado; substitui a saída no console
    uploader: Option<Uploader>,
}

impl Station {
    pub fn new(config: BaseStationConfig) -> Self {
        let uploader = (!config.endpoint.is_empty()).then(|| Uploader::new(&config.endpoint));
        if let Some(uploader) = &uploader {
            info!("Leituras serão enviadas para {}", uploader.url());
        }
        Self {
            config,
            tracker: SequenceTracker::new(),
            uploader,
        }
    }

    /// Consome o channel até a thread de leitura terminar.
    pub fn run<W: Write>(&mut self, rx: &Receiver<RadioMessage>, out: &mut W) -> anyhow::Result<()> {
        for msg in rx.iter() {
            debug!("Frame de {} bytes do pipe {}", msg.raw_size, msg.frame.pipe);
            self.handle(&msg.frame, out)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Processa um frame: registra a sequência e envia ou escreve a leitura.
    ///
    /// Falhas de upload são logadas e não interrompem o processamento.
    pub fn handle<W: Write>(&mut self, frame: &ReceivedFrame, out: &mut W) -> anyhow::Result<SequenceStatus> {
        let name = self.config.sensor_name(frame.pipe);
        let seq = frame.payload.sequence_number;

        let status = self.tracker.observe(frame.pipe, seq);
        match status {
            SequenceStatus::Gap { missing } => {
                warn!("{name}: {missing} pacote(s) perdido(s) antes de seq {seq}");
            }
            SequenceStatus::Duplicate => warn!("{name}: seq {seq} duplicado"),
            SequenceStatus::Stale => warn!("{name}: seq {seq} fora de ordem"),
            SequenceStatus::First | SequenceStatus::InOrder => {}
        }

        match &self.uploader {
            Some(uploader) => {
                if let Err(e) = uploader.upload(&Reading::from(frame)) {
                    warn!("{name}: upload de seq {seq} falhou: {e}");
                }
            }
            None => {
                let line = output::render(self.config.output, frame, &name)?;
                writeln!(out, "{line}")?;
            }
        }
        Ok(status)
    }

    /// Loga o resumo de sequência de cada sensor visto.
    pub fn log_summary(&self) {
        for (pipe, stats) in self.tracker.iter() {
            info!(
                "{}: {} recebidos, {} perdidos, {} duplicados, {} fora de ordem (último seq {})",
                self.config.sensor_name(pipe),
                stats.received,
                stats.lost,
                stats.duplicates,
                stats.stale,
                stats.last
            );
        }
    }
}
