use log::info;
use rand::Rng;

use crate::api::{ColonyError, Event};
use crate::building::BuildingError;
use crate::citizens::{generate_citizen_name, Citizen, CitizenId, Job};
use crate::math::Position;
use crate::replication::ColonyMessage;
use crate::{occur, Colony};

impl Colony {
    #[inline]
    pub fn get_citizen(&self, id: CitizenId) -> Option<&Citizen> {
        self.citizens.citizens.get(&id)
    }

    pub fn add_citizen(&mut self, name: &str) -> Result<(CitizenId, Vec<Event>), ColonyError> {
        let (id, add) = self.citizens.add_citizen(name.to_string())?;
        let events = occur![add()];
        info!("Citizen {} joined colony {} as {:?}", name, self.name, id);
        Ok((id, events))
    }

    pub fn recruit_citizen<R: Rng>(
        &mut self,
        random: &mut R,
    ) -> Result<(CitizenId, Vec<Event>), ColonyError> {
        let name = generate_citizen_name(random);
        self.add_citizen(&name)
    }

    /// Lazily realizes citizen state, identity is never duplicated.
    pub fn spawn_citizen_if_null(&mut self, id: CitizenId) -> Result<Vec<Event>, ColonyError> {
        let spawn = self.citizens.spawn_citizen_if_null(id)?;
        Ok(occur![spawn()])
    }

    pub fn remove_citizen(&mut self, id: CitizenId) -> Result<Vec<Event>, ColonyError> {
        let citizen = self.citizens.get_citizen(id)?;
        let home = citizen.home_building;
        let mut events = self.release_citizen_order(id)?;
        if let Some(home) = home {
            if let Ok(evict) = self.buildings.evict_resident(home, id) {
                events.extend(occur![evict()]);
            }
        }
        let cancellations = self.requesting.cancel_requests_for_citizen(id);
        let remove = self.citizens.remove_citizen(id)?;
        events.extend(occur![cancellations, remove()]);
        self.removals.push(ColonyMessage::RemoveCitizen {
            colony: self.id,
            id,
        });
        events.extend(self.update_overall_happiness());
        Ok(events)
    }

    /// Employs citizen in a builder's hut.
    pub fn assign_job(
        &mut self,
        id: CitizenId,
        work_building: Position,
    ) -> Result<Vec<Event>, ColonyError> {
        let building = self.buildings.get_building(work_building)?;
        if !building.role.capabilities().workplace {
            return Err(BuildingError::NotWorkplace {
                position: work_building,
            }
            .into());
        }
        let job = Job::builder();
        let change = self
            .citizens
            .change_job(id, Some(job), Some(work_building))?;
        Ok(occur![change()])
    }

    pub fn clear_job(&mut self, id: CitizenId) -> Result<Vec<Event>, ColonyError> {
        let mut events = self.release_citizen_order(id)?;
        let change = self.citizens.change_job(id, None, None)?;
        events.extend(occur![change()]);
        Ok(events)
    }

    pub fn set_citizen_happiness(
        &mut self,
        id: CitizenId,
        happiness: f64,
    ) -> Result<Vec<Event>, ColonyError> {
        let citizen = self.citizens.get_citizen_mut(id)?;
        citizen.happiness = happiness;
        citizen.dirty = true;
        Ok(self.update_overall_happiness())
    }

    /// Drops the order held by citizen job, the order goes back to the queue.
    pub(crate) fn release_citizen_order(&mut self, id: CitizenId) -> Result<Vec<Event>, ColonyError> {
        let work_order = match self.citizens.get_citizen(id)?.job {
            Some(job) => job.work_order(),
            None => None,
        };
        let work_order = match work_order {
            Some(work_order) => work_order,
            None => return Ok(vec![]),
        };
        let mut events = vec![];
        if let Ok(release) = self.working.release_work_order(work_order) {
            events.extend(occur![release()]);
        }
        let take = self.citizens.take_work_order(id, None)?;
        let cancellations = self.requesting.cancel_requests_for_citizen(id);
        events.extend(occur![take(), cancellations]);
        Ok(events)
    }

    pub fn mark_citizens_dirty(&mut self) {
        for citizen in self.citizens.citizens.values_mut() {
            citizen.dirty = true;
        }
    }
}
