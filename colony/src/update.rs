use log::{error, warn};

use crate::api::{ColonyError, Event};
use crate::citizens::CitizenId;
use crate::math::Position;
use crate::requesting::Payload;
use crate::tokens::TokenKind;
use crate::working::{assign, Assignment, Notice, WorkOrderId, WorkOrderKind, Worker};
use crate::{occur, Colony};

impl Colony {
    /// Advances colony by one tick: validity sweeps, assignment, request
    /// resolution and housing.
    pub fn update(&mut self) -> Vec<Event> {
        let mut events = vec![];
        events.extend(self.prune_stale_work_orders());
        events.extend(self.check_work_order_claims());
        events.extend(self.assign_work_orders());
        events.extend(occur![self.requesting.resolve_requests()]);
        events.extend(self.capture_homeless_citizens());
        events
    }

    fn prune_stale_work_orders(&mut self) -> Vec<Event> {
        let stale: Vec<WorkOrderId> = self
            .working
            .work_orders
            .values()
            .filter(|order| order.kind != WorkOrderKind::Decoration)
            .filter(|order| !self.buildings.buildings.contains_key(&order.building))
            .map(|order| order.id)
            .collect();
        let mut events = vec![];
        for id in stale {
            warn!("Work order {:?} references vanished building, pruned", id);
            match self.cancel_work_order(id) {
                Ok(cancellation) => events.extend(cancellation),
                Err(error) => error!("Unable to prune work order {:?}, {:?}", id, error),
            }
        }
        events
    }

    /// Claimed order and claiming citizen job must reference each other.
    fn check_work_order_claims(&mut self) -> Vec<Event> {
        let mut broken = vec![];
        for order in self.working.work_orders.values() {
            if let Some(citizen) = order.claimed_by {
                let holds = self
                    .citizens
                    .citizens
                    .get(&citizen)
                    .and_then(|citizen| citizen.job)
                    .and_then(|job| job.work_order());
                if holds != Some(order.id) {
                    error!(
                        "Work order {:?} claimed by {:?} whose job holds {:?}, claim released",
                        order.id, citizen, holds
                    );
                    broken.push(order.id);
                }
            }
        }
        let mut events = vec![];
        for id in broken {
            if let Ok(release) = self.working.release_work_order(id) {
                events.extend(occur![release()]);
            }
        }
        let mut orphans: Vec<CitizenId> = vec![];
        for citizen in self.citizens.citizens.values() {
            if let Some(work_order) = citizen.job.and_then(|job| job.work_order()) {
                let claimed_by = self
                    .working
                    .work_orders
                    .get(&work_order)
                    .and_then(|order| order.claimed_by);
                if claimed_by != Some(citizen.id) {
                    error!(
                        "Citizen {:?} job holds {:?} not claimed by it, job order dropped",
                        citizen.id, work_order
                    );
                    orphans.push(citizen.id);
                }
            }
        }
        for citizen in orphans {
            if let Ok(take) = self.citizens.take_work_order(citizen, None) {
                events.extend(occur![take()]);
            }
        }
        events
    }

    pub(crate) fn collect_workers(&self) -> Vec<Worker> {
        let mut workers = vec![];
        for citizen in self.citizens.citizens.values() {
            let hut = match citizen.builder_hut() {
                Some(hut) => hut,
                None => continue,
            };
            let building = match self.buildings.buildings.get(&hut) {
                Some(building) => building,
                None => continue,
            };
            workers.push(Worker {
                citizen: citizen.id,
                work_building: hut,
                building_level: building.level,
                building_max_level: building.is_max_level(),
                busy: citizen.job.and_then(|job| job.work_order()).is_some(),
            });
        }
        workers
    }

    fn assign_work_orders(&mut self) -> Vec<Event> {
        let town_hall = self
            .buildings
            .town_hall()
            .map(|building| building.position);
        let mut events = vec![];
        for id in self.working.unclaimed_work_orders() {
            let workers = self.collect_workers();
            let assignment = match self.working.get_work_order(id) {
                Ok(order) => assign(order, &workers, town_hall),
                Err(_) => continue,
            };
            let result = match assignment {
                Assignment::Claimed { citizen } => self.claim_work_order(id, citizen, &workers),
                Assignment::NoBuilder => self.notify(id, Notice::NoBuilder),
                Assignment::LevelTooLow { level } => {
                    self.notify(id, Notice::BuilderLevelTooLow { level })
                }
                Assignment::Waiting => Ok(vec![]),
            };
            match result {
                Ok(assignment_events) => events.extend(assignment_events),
                Err(error) => error!("Unable to assign work order {:?}, {:?}", id, error),
            }
        }
        events
    }

    fn claim_work_order(
        &mut self,
        id: WorkOrderId,
        citizen: CitizenId,
        workers: &[Worker],
    ) -> Result<Vec<Event>, ColonyError> {
        let claim = self.working.claim_work_order(id, citizen)?;
        let take = self.citizens.take_work_order(citizen, Some(id))?;
        let mut events = occur![claim(), take()];
        let hut = workers
            .iter()
            .find(|worker| worker.citizen == citizen)
            .map(|worker| worker.work_building);
        if let Some(hut) = hut {
            events.extend(self.request_materials(id, citizen, hut));
        }
        Ok(events)
    }

    /// Claimed orders without open material request ask for it again,
    /// requests do not outlive a restart.
    pub(crate) fn request_claimed_materials(&mut self) -> Vec<Event> {
        let claims: Vec<(WorkOrderId, CitizenId, Position)> = self
            .working
            .work_orders
            .values()
            .filter(|order| !order.requested)
            .filter_map(|order| {
                let citizen = order.claimed_by?;
                let hut = self.citizens.citizens.get(&citizen)?.builder_hut()?;
                Some((order.id, citizen, hut))
            })
            .collect();
        let mut events = vec![];
        for (id, citizen, hut) in claims {
            events.extend(self.request_materials(id, citizen, hut));
        }
        events
    }

    /// Builder hut asks for the structure deliverable on behalf of builder.
    fn request_materials(
        &mut self,
        id: WorkOrderId,
        citizen: CitizenId,
        hut: Position,
    ) -> Vec<Event> {
        let (requester, structure) = match (
            self.buildings.buildings.get(&hut),
            self.working.work_orders.get(&id),
        ) {
            (Some(building), Some(order)) if !order.requested => {
                (building.id, order.structure_name.clone())
            }
            _ => return vec![],
        };
        let token = self.tokens.next(TokenKind::Request);
        let payload = Payload::Deliverable { name: structure };
        let create = match self
            .requesting
            .create_request(token, requester, Some(citizen), payload)
        {
            Ok(create) => create,
            Err(error) => {
                warn!("Unable to request materials of {:?}, {:?}", id, error);
                return vec![];
            }
        };
        let mut events = occur![create()];
        if let Ok(mark) = self.working.mark_requested(id) {
            events.extend(occur![mark()]);
        }
        events
    }

    fn notify(&mut self, id: WorkOrderId, notice: Notice) -> Result<Vec<Event>, ColonyError> {
        let issue = self.working.issue_notice(id, notice.clone())?;
        let events = occur![issue()];
        if !events.is_empty() {
            self.notices.push((id, notice));
        }
        Ok(events)
    }

    /// Homes below capacity take homeless citizens and those living in lower homes.
    fn capture_homeless_citizens(&mut self) -> Vec<Event> {
        let homes: Vec<(Position, u8)> = self
            .buildings
            .homes()
            .map(|home| (home.position, home.level))
            .collect();
        let mut events = vec![];
        for (position, level) in homes {
            loop {
                let free = match self.buildings.buildings.get(&position) {
                    Some(home) => home.max_inhabitants() > home.residents().len(),
                    None => false,
                };
                if !free {
                    break;
                }
                let candidate = self.citizens.citizens.values().find(|citizen| {
                    match citizen.home_building {
                        None => true,
                        Some(current) if current == position => false,
                        Some(current) => self
                            .buildings
                            .buildings
                            .get(&current)
                            .map(|home| home.level < level)
                            .unwrap_or(true),
                    }
                });
                let (citizen, previous) = match candidate {
                    Some(citizen) => (citizen.id, citizen.home_building),
                    None => break,
                };
                match self.move_in(citizen, previous, position) {
                    Ok(moving) => events.extend(moving),
                    Err(error) => {
                        error!("Unable to settle {:?} at {}, {:?}", citizen, position, error);
                        break;
                    }
                }
            }
        }
        events
    }

    fn move_in(
        &mut self,
        citizen: CitizenId,
        previous: Option<Position>,
        home: Position,
    ) -> Result<Vec<Event>, ColonyError> {
        let mut events = vec![];
        if let Some(previous) = previous {
            if let Ok(evict) = self.buildings.evict_resident(previous, citizen) {
                events.extend(occur![evict()]);
            }
        }
        let settle = self.buildings.settle_resident(home, citizen)?;
        events.extend(occur![settle()]);
        let change = self.citizens.change_home(citizen, Some(home))?;
        events.extend(occur![change()]);
        Ok(events)
    }
}
