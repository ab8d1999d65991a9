use log::info;

use crate::api::Settlement::{
    AchievementTriggered, ColonyRenamed, FreeInteractionChanged, HappinessChanged,
    ManualHiringChanged, MaxCitizensChanged,
};
use crate::api::{ColonyError, Event};
use crate::citizens::DEFAULT_HAPPINESS;
use crate::math::Position;
use crate::permissions::{Action, Rank};
use crate::{occur, Colony};

impl Colony {
    pub fn rename(&mut self, name: &str) -> Vec<Event> {
        info!("Colony {} renamed to {}", self.name, name);
        self.name = name.to_string();
        self.fields_dirty = true;
        occur![vec![ColonyRenamed {
            colony: self.id,
            name: self.name.clone(),
        }]]
    }

    pub fn set_manual_hiring(&mut self, manual_hiring: bool) -> Vec<Event> {
        self.manual_hiring = manual_hiring;
        self.fields_dirty = true;
        occur![vec![ManualHiringChanged { manual_hiring }]]
    }

    /// Capacity is the sum of home capacities, must follow every home level change.
    pub fn calculate_max_citizens(&mut self) -> Vec<Event> {
        let max_citizens = self.buildings.calculate_max_citizens();
        if max_citizens == self.max_citizens {
            return vec![];
        }
        self.max_citizens = max_citizens;
        self.fields_dirty = true;
        occur![vec![MaxCitizensChanged { max_citizens }]]
    }

    pub fn trigger_achievement(&mut self, achievement: &str) -> Vec<Event> {
        if self.achievements.iter().any(|known| known == achievement) {
            return vec![];
        }
        info!("Colony {} achieved {}", self.name, achievement);
        self.achievements.push(achievement.to_string());
        self.fields_dirty = true;
        occur![vec![AchievementTriggered {
            achievement: achievement.to_string(),
        }]]
    }

    /// Mean happiness of citizens, empty colony keeps default mood.
    pub fn update_overall_happiness(&mut self) -> Vec<Event> {
        let count = self.citizens.len();
        let happiness = if count == 0 {
            DEFAULT_HAPPINESS
        } else {
            let total: f64 = self
                .citizens
                .citizens
                .values()
                .map(|citizen| citizen.happiness)
                .sum();
            total / count as f64
        };
        if (happiness - self.happiness).abs() < f64::EPSILON {
            return vec![];
        }
        self.happiness = happiness;
        self.fields_dirty = true;
        occur![vec![HappinessChanged { happiness }]]
    }

    pub fn add_free_position(&mut self, position: Position) -> Vec<Event> {
        self.free_positions.insert(position);
        self.free_interaction_changed()
    }

    pub fn remove_free_position(&mut self, position: Position) -> Vec<Event> {
        self.free_positions.remove(&position);
        self.free_interaction_changed()
    }

    pub fn add_free_block(&mut self, block: &str) -> Vec<Event> {
        self.free_blocks.insert(block.to_string());
        self.free_interaction_changed()
    }

    pub fn remove_free_block(&mut self, block: &str) -> Vec<Event> {
        self.free_blocks.remove(block);
        self.free_interaction_changed()
    }

    fn free_interaction_changed(&mut self) -> Vec<Event> {
        self.fields_dirty = true;
        occur![vec![FreeInteractionChanged {
            positions: self.free_positions.len(),
            blocks: self.free_blocks.len(),
        }]]
    }

    pub fn mark_fields_dirty(&mut self) {
        self.fields_dirty = true;
    }

    pub fn set_permission(&mut self, rank: Rank, action: Action) -> Result<Vec<Event>, ColonyError> {
        let change = self.permissions.set_permission(rank, action)?;
        let events = occur![change()];
        self.permissions_dirty = true;
        Ok(events)
    }

    pub fn remove_permission(
        &mut self,
        rank: Rank,
        action: Action,
    ) -> Result<Vec<Event>, ColonyError> {
        let change = self.permissions.remove_permission(rank, action)?;
        let events = occur![change()];
        self.permissions_dirty = true;
        Ok(events)
    }

    pub fn toggle_permission(
        &mut self,
        rank: Rank,
        action: Action,
    ) -> Result<Vec<Event>, ColonyError> {
        let change = self.permissions.toggle_permission(rank, action)?;
        let events = occur![change()];
        self.permissions_dirty = true;
        Ok(events)
    }

    pub fn add_player(&mut self, player: &str, rank: Rank) -> Result<Vec<Event>, ColonyError> {
        let add = self.permissions.add_player(player, rank)?;
        let events = occur![add()];
        self.permissions_dirty = true;
        Ok(events)
    }

    pub fn remove_player(&mut self, player: &str) -> Result<Vec<Event>, ColonyError> {
        let remove = self.permissions.remove_player(player)?;
        let events = occur![remove()];
        self.permissions_dirty = true;
        Ok(events)
    }
}
