use crate::coordinates::{FocusPoint, WorldPoint};
use crate::palette::Color;
use serde::{Deserialize, Serialize};

/// Death markers disappear five minutes after the death.
pub const DEATH_MARKER_TTL_MS: u64 = 5 * 60 * 1000;

pub const SPAWN_COLOR: Color = Color::rgb(0x22, 0xc5, 0x5e);
pub const SPAWN_OUTLINE: Color = Color::rgb(0x16, 0x65, 0x34);
pub const DEATH_COLOR: Color = Color::rgb(0xef, 0x44, 0x44);
pub const DEATH_OUTLINE: Color = Color::rgb(0x99, 0x1b, 0x1b);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeathMarker {
    pub position: FocusPoint,
    pub created_at_ms: u64,
}

impl DeathMarker {
    pub fn new(position: FocusPoint, created_at_ms: u64) -> Self {
        Self {
            position,
            created_at_ms,
        }
    }

    /// Timestamps from the future count as age zero.
    pub fn is_visible_at(&self, now_ms: u64, ttl_ms: u64) -> bool {
        now_ms.saturating_sub(self.created_at_ms) < ttl_ms
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Marker {
    Spawn,
    Death(DeathMarker),
}

impl Marker {
    pub fn world_point(&self) -> WorldPoint {
        match self {
            Marker::Spawn => WorldPoint::ORIGIN,
            Marker::Death(death) => death.position.tile(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Marker::Spawn => "Spawn",
            Marker::Death(_) => "Death",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Marker::Spawn => SPAWN_COLOR,
            Marker::Death(_) => DEATH_COLOR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: Color,
}

/// The spawn point plus the most recent death, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerSet {
    death: Option<DeathMarker>,
    ttl_ms: u64,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self::with_ttl(DEATH_MARKER_TTL_MS)
    }

    pub fn with_ttl(ttl_ms: u64) -> Self {
        Self { death: None, ttl_ms }
    }

    pub fn record_death(&mut self, position: FocusPoint, now_ms: u64) {
        log::debug!("death marker at {:?}", position.tile());
        self.death = Some(DeathMarker::new(position, now_ms));
    }

    pub fn set_death(&mut self, death: Option<DeathMarker>) {
        self.death = death;
    }

    pub fn death(&self) -> Option<DeathMarker> {
        self.death
    }

    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    /// Markers to draw at `now_ms`, spawn first.
    pub fn visible(&self, now_ms: u64) -> Vec<Marker> {
        let mut markers = vec![Marker::Spawn];
        match self.death {
            Some(death) if death.is_visible_at(now_ms, self.ttl_ms) => {
                markers.push(Marker::Death(death));
            }
            Some(_) => log::trace!("death marker expired"),
            None => {}
        }
        markers
    }

    pub fn legend(&self, now_ms: u64) -> Vec<LegendEntry> {
        legend_for(&self.visible(now_ms))
    }

    /// Drops an expired death marker. Returns whether one was removed.
    pub fn prune(&mut self, now_ms: u64) -> bool {
        match self.death {
            Some(death) if !death.is_visible_at(now_ms, self.ttl_ms) => {
                log::debug!("pruning expired death marker");
                self.death = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self::new()
    }
}

pub fn legend_for(markers: &[Marker]) -> Vec<LegendEntry> {
    markers
        .iter()
        .map(|marker| LegendEntry {
            label: marker.label(),
            color: marker.color(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: u64 = 1_700_000_000_000;

    fn with_death() -> MarkerSet {
        let mut markers = MarkerSet::new();
        markers.record_death(FocusPoint::new(3.5, -2.5), T);
        markers
    }

    #[test]
    fn spawn_is_always_visible() {
        let markers = MarkerSet::new();
        assert_eq!(markers.visible(T), vec![Marker::Spawn]);
        assert_eq!(Marker::Spawn.world_point(), WorldPoint::ORIGIN);
    }

    #[test]
    fn death_marker_expires_after_five_minutes() {
        let markers = with_death();
        assert_eq!(markers.visible(T + DEATH_MARKER_TTL_MS - 1).len(), 2);
        assert_eq!(markers.visible(T + DEATH_MARKER_TTL_MS).len(), 1);
        assert_eq!(markers.visible(T + DEATH_MARKER_TTL_MS + 1), vec![Marker::Spawn]);
    }

    #[test]
    fn expired_death_is_not_in_legend() {
        let markers = with_death();
        let labels = |now| {
            markers
                .legend(now)
                .into_iter()
                .map(|entry| entry.label)
                .collect::<Vec<_>>()
        };
        assert_eq!(labels(T + 1), vec!["Spawn", "Death"]);
        assert_eq!(labels(T + DEATH_MARKER_TTL_MS + 1), vec!["Spawn"]);
    }

    #[test]
    fn future_timestamps_count_as_fresh() {
        let death = DeathMarker::new(FocusPoint::new(0.0, 0.0), T + 10_000);
        assert!(death.is_visible_at(T, DEATH_MARKER_TTL_MS));
    }

    #[test]
    fn death_position_is_floored() {
        let markers = with_death();
        let death = markers.visible(T)[1];
        assert_eq!(death.world_point(), WorldPoint::new(3, -3));
    }

    #[test]
    fn prune_drops_only_expired_markers() {
        let mut markers = with_death();
        assert!(!markers.prune(T + 1));
        assert!(markers.death().is_some());
        assert!(markers.prune(T + DEATH_MARKER_TTL_MS));
        assert!(markers.death().is_none());
    }
}
