use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::sound::AudioStream;
use crate::ecs::time::SimTime;

/// Countdown lifecycle of an expedition. Ordering is progression order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExpeditionStage {
    Added,
    Running,
    Countdown,
    MusicCountdown,
    FinalCountdown,
    Completed,
}

/// Timed off-site mission, attached to the root entity of the mission map.
#[derive(Component, Debug, Clone)]
pub struct SalvageExpedition {
    /// Station that launched the mission; recalled shuttles fly to its first grid.
    pub station: Option<Entity>,
    pub end_time: SimTime,
    pub stage: ExpeditionStage,
    /// Music played over the final two minutes.
    pub sound: String,
    pub stream: Option<AudioStream>,
    /// Offset of the dungeon from the map origin; zero when there is none.
    pub dungeon_location: Vec2,
    pub completed: bool,
}

impl SalvageExpedition {
    pub fn new(station: Option<Entity>, end_time: SimTime) -> Self {
        Self {
            station,
            end_time,
            stage: ExpeditionStage::Added,
            sound: "/Audio/Music/salvage_expedition.ogg".to_string(),
            stream: None,
            dungeon_location: Vec2::ZERO,
            completed: false,
        }
    }

    /// Move to `stage` if it is later than the current one.
    /// Returns whether the stage changed.
    pub fn advance_to(&mut self, stage: ExpeditionStage) -> bool {
        if stage <= self.stage {
            return false;
        }
        self.stage = stage;
        true
    }

    /// One-way: a completed expedition never reopens.
    pub fn mark_completed(&mut self) {
        self.completed = true;
        self.advance_to(ExpeditionStage::Completed);
    }
}

/// Objective: destroy every listed structure.
#[derive(Component, Debug, Clone, Default)]
pub struct SalvageStructureExpedition {
    pub structures: Vec<Entity>,
}

/// Mining mission. Entities brought along are exempt from the mining tax.
#[derive(Component, Debug, Clone, Default)]
pub struct SalvageMiningExpedition {
    /// Snapshot taken once when the first shuttle departs for the mission.
    pub exempt_entities: Option<Vec<Entity>>,
}

/// Per-station expedition bookkeeping.
#[derive(Component, Debug, Clone, Default)]
pub struct SalvageExpeditionData {
    pub active_mission: Option<Entity>,
    pub missions_finished: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_ordered() {
        assert!(ExpeditionStage::Added < ExpeditionStage::Running);
        assert!(ExpeditionStage::Running < ExpeditionStage::Countdown);
        assert!(ExpeditionStage::Countdown < ExpeditionStage::MusicCountdown);
        assert!(ExpeditionStage::MusicCountdown < ExpeditionStage::FinalCountdown);
        assert!(ExpeditionStage::FinalCountdown < ExpeditionStage::Completed);
    }

    #[test]
    fn advance_never_regresses() {
        let mut exp = SalvageExpedition::new(None, SimTime::from_minutes(10));
        assert!(exp.advance_to(ExpeditionStage::MusicCountdown));
        assert!(!exp.advance_to(ExpeditionStage::Countdown));
        assert!(!exp.advance_to(ExpeditionStage::MusicCountdown));
        assert_eq!(exp.stage, ExpeditionStage::MusicCountdown);
    }

    #[test]
    fn completion_is_terminal() {
        let mut exp = SalvageExpedition::new(None, SimTime::from_minutes(10));
        exp.mark_completed();
        assert!(exp.completed);
        assert_eq!(exp.stage, ExpeditionStage::Completed);
        assert!(!exp.advance_to(ExpeditionStage::FinalCountdown));
    }
}
