//! Detecção de perda, duplicação e reordenação por número de sequência.
//!
//! Aritmética de números seriais sobre `u16`: uma diferença de até metade
//! do contador é considerada "à frente", o resto é um pacote atrasado.
//! Só distingue lacunas dentro dessa janela, nunca voltas completas.

use std::collections::BTreeMap;
use tracing::debug;

/// Maior avanço aceito como "à frente" do último número visto.
pub const SEQUENCE_WINDOW: u16 = u16::MAX / 2;

/// Resultado da comparação de um número de sequência com o anterior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceStatus {
    /// Primeiro pacote visto do sensor
    First,
    InOrder,
    Gap { missing: u16 },
    Duplicate,
    /// Chegou depois de um número mais novo
    Stale,
}

/// Classifica `current` em relação a `previous`.
pub fn classify(previous: u16, current: u16) -> SequenceStatus {
    match current.wrapping_sub(previous) {
        0 => SequenceStatus::Duplicate,
        1 => SequenceStatus::InOrder,
        delta if delta <= SEQUENCE_WINDOW => SequenceStatus::Gap { missing: delta - 1 },
        _ => SequenceStatus::Stale,
    }
}

/// Contadores por sensor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequenceStats {
    pub last: u16,
    pub received: u64,
    pub lost: u64,
    pub duplicates: u64,
    pub stale: u64,
}

/// Último número aceito e estatísticas, por sensor.
#[derive(Debug, Default)]
pub struct SequenceTracker {
    sensors: BTreeMap<u8, SequenceStats>,
}

impl SequenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra um número de sequência recebido de `sensor`.
    pub fn observe(&mut self, sensor: u8, sequence_number: u16) -> SequenceStatus {
        let Some(stats) = self.sensors.get_mut(&sensor) else {
            self.sensors.insert(
                sensor,
                SequenceStats {
                    last: sequence_number,
                    received: 1,
                    ..Default::default()
                },
            );
            debug!("Sensor {sensor}: primeiro pacote (seq {sequence_number})");
            return SequenceStatus::First;
        };

        stats.received += 1;
        let status = classify(stats.last, sequence_number);
        match status {
            SequenceStatus::InOrder => stats.last = sequence_number,
            SequenceStatus::Gap { missing } => {
                stats.lost += u64::from(missing);
                stats.last = sequence_number;
            }
            SequenceStatus::Duplicate => stats.duplicates += 1,
            SequenceStatus::Stale => stats.stale += 1,
            SequenceStatus::First => {}
        }
        status
    }

    pub fn stats(&self, sensor: u8) -> Option<&SequenceStats> {
        self.sensors.get(&sensor)
    }

    /// Estatísticas de todos os sensores vistos, ordenadas por id.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &SequenceStats)> {
        self.sensors.iter().map(|(id, stats)| (*id, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_numbers_have_no_gap() {
        assert_eq!(classify(5, 6), SequenceStatus::InOrder);
    }

    #[test]
    fn detects_gap() {
        assert_eq!(classify(5, 9), SequenceStatus::Gap { missing: 3 });
    }

    #[test]
    fn wraparound_is_not_a_reset() {
        assert_eq!(classify(u16::MAX, 0), SequenceStatus::InOrder);
        assert_eq!(classify(u16::MAX - 1, 1), SequenceStatus::Gap { missing: 2 });
    }

    #[test]
    fn duplicates_and_stale() {
        assert_eq!(classify(10, 10), SequenceStatus::Duplicate);
        assert_eq!(classify(10, 8), SequenceStatus::Stale);
        assert_eq!(classify(1, u16::MAX), SequenceStatus::Stale);
    }

    #[test]
    fn window_edges() {
        assert_eq!(
            classify(0, SEQUENCE_WINDOW),
            SequenceStatus::Gap {
                missing: SEQUENCE_WINDOW - 1
            }
        );
        assert_eq!(classify(0, SEQUENCE_WINDOW + 1), SequenceStatus::Stale);
    }

    #[test]
    fn tracker_counts_per_sensor() {
        let mut tracker = SequenceTracker::new();
        assert_eq!(tracker.observe(0, 5), SequenceStatus::First);
        assert_eq!(tracker.observe(1, 100), SequenceStatus::First);
        assert_eq!(tracker.observe(0, 6), SequenceStatus::InOrder);
        assert_eq!(tracker.observe(0, 9), SequenceStatus::Gap { missing: 2 });
        assert_eq!(tracker.observe(0, 9), SequenceStatus::Duplicate);
        assert_eq!(tracker.observe(0, 7), SequenceStatus::Stale);
        assert_eq!(tracker.observe(0, 10), SequenceStatus::InOrder);

        let stats = tracker.stats(0).unwrap();
        assert_eq!(stats.last, 10);
        assert_eq!(stats.received, 6);
        assert_eq!(stats.lost, 2);
        assert_eq!(stats.duplicates, 1);
        assert_eq!(stats.stale, 1);

        assert_eq!(tracker.stats(1).unwrap().received, 1);
        assert!(tracker.stats(2).is_none());
        assert_eq!(tracker.iter().map(|(id, _)| id).collect::<Vec<_>>(), [0, 1]);
    }

    #[test]
    fn stale_does_not_move_last() {
        let mut tracker = SequenceTracker::new();
        tracker.observe(3, 65_534);
        tracker.observe(3, 1);
        assert_eq!(tracker.observe(3, 65_535), SequenceStatus::Stale);
        assert_eq!(tracker.observe(3, 2), SequenceStatus::InOrder);
        assert_eq!(tracker.stats(3).unwrap().lost, 2);
    }
}
