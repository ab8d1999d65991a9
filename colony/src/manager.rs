use datamap::{DataError, Storage};
use log::{info, warn};
use rayon::prelude::*;
use std::collections::BTreeMap;

use crate::api::{ColonyError, Event, ObserverRequest, Settlement};
use crate::math::Position;
use crate::permissions::{Action, Rank};
use crate::replication::Delivery;
use crate::requesting::RequestManager;
use crate::structures::StructureCatalog;
use crate::tokens::{Token, TokenFactory, TokenKind};
use crate::{occur, Colony};

/// Registers request resolvers of freshly created or loaded colony.
pub type ResolverSetup = fn(&mut RequestManager);

/// Process wide context of colonies.
///
/// Colonies share no mutable state, so ticks and synchronization passes
/// advance them in parallel. Structure catalog is shared read-only.
pub struct ColonyManager {
    pub tokens: TokenFactory,
    pub colonies: BTreeMap<Token, Colony>,
    catalog: StructureCatalog,
    setup: ResolverSetup,
    deleted: Vec<Token>,
}

impl ColonyManager {
    pub fn new(catalog: StructureCatalog, setup: ResolverSetup) -> Self {
        Self {
            tokens: TokenFactory::default(),
            colonies: BTreeMap::new(),
            catalog,
            setup,
            deleted: vec![],
        }
    }

    #[inline]
    pub fn catalog(&self) -> &StructureCatalog {
        &self.catalog
    }

    pub fn create_colony(
        &mut self,
        name: &str,
        owner: &str,
        dimension: i32,
        center: Position,
    ) -> Result<(Token, Vec<Event>), ColonyError> {
        if let Some(colony) = self.owned_colony(owner) {
            return Err(ColonyError::OwnerHasColony {
                owner: owner.to_string(),
                colony: colony.id,
            });
        }
        let id = self.tokens.next(TokenKind::Colony);
        let mut colony = Colony::new(id, name, owner, dimension, center);
        (self.setup)(&mut colony.requesting);
        self.colonies.insert(id, colony);
        info!("Colony {} {} founded by {}", id, name, owner);
        let events = occur![vec![Settlement::ColonyFounded {
            colony: id,
            name: name.to_string(),
            owner: owner.to_string(),
        }]];
        Ok((id, events))
    }

    /// Removes colony, every subscriber receives eviction message.
    pub fn delete_colony(&mut self, id: Token) -> Result<(Vec<Delivery>, Vec<Event>), ColonyError> {
        let mut colony = self
            .colonies
            .remove(&id)
            .ok_or(ColonyError::ColonyNotFound { colony: id })?;
        let evictions = colony.evict_subscribers();
        self.deleted.push(id);
        info!("Colony {} {} deleted", id, colony.name);
        let events = occur![vec![Settlement::ColonyDeleted { colony: id }]];
        Ok((evictions, events))
    }

    #[inline]
    pub fn get_colony(&self, id: Token) -> Result<&Colony, ColonyError> {
        self.colonies
            .get(&id)
            .ok_or(ColonyError::ColonyNotFound { colony: id })
    }

    #[inline]
    pub fn get_colony_mut(&mut self, id: Token) -> Result<&mut Colony, ColonyError> {
        self.colonies
            .get_mut(&id)
            .ok_or(ColonyError::ColonyNotFound { colony: id })
    }

    pub fn find_colony_by_id(&self, value: usize) -> Option<&Colony> {
        self.colonies
            .get(&Token::from_raw(TokenKind::Colony, value))
    }

    pub fn owned_colony(&self, player: &str) -> Option<&Colony> {
        self.colonies
            .values()
            .find(|colony| colony.owner() == Some(player))
    }

    pub fn update(&mut self) -> Vec<Event> {
        self.colonies
            .par_iter_mut()
            .flat_map_iter(|(_, colony)| colony.update())
            .collect()
    }

    pub fn synchronize(&mut self) -> Vec<Delivery> {
        self.colonies
            .par_iter_mut()
            .flat_map_iter(|(_, colony)| colony.synchronize())
            .collect()
    }

    /// Validates and applies observer intent on behalf of player.
    pub fn handle_intent(
        &mut self,
        player: &str,
        request: ObserverRequest,
    ) -> Result<Vec<Event>, ColonyError> {
        match request {
            ObserverRequest::Login { .. } | ObserverRequest::Heartbeat => Ok(vec![]),
            ObserverRequest::Subscribe { colony } => {
                let colony = self.get_colony_mut(colony)?;
                if colony.permissions.rank_of(player) == Rank::Hostile {
                    return Err(ColonyError::PermissionDenied {
                        player: player.to_string(),
                        action: Action::AccessHuts,
                    });
                }
                Ok(colony.subscribe(player))
            }
            ObserverRequest::Unsubscribe { colony } => {
                let colony = self.get_colony_mut(colony)?;
                if !colony.is_subscribed(player) {
                    return Err(ColonyError::NotSubscribed {
                        player: player.to_string(),
                        colony: colony.id,
                    });
                }
                Ok(colony.unsubscribe(player))
            }
            ObserverRequest::MarkBuildingDirty {
                colony,
                position,
                dimension,
            } => {
                let colony = match self.colonies.get_mut(&colony) {
                    Some(colony) if colony.dimension == dimension => colony,
                    _ => {
                        warn!(
                            "Unable to mark building {} dirty, colony {} not found in dimension {}",
                            position, colony, dimension
                        );
                        return Ok(vec![]);
                    }
                };
                match colony.mark_building_dirty(position) {
                    Ok(events) => Ok(events),
                    Err(_) => {
                        warn!(
                            "Unable to mark building {} dirty, not found in colony {}",
                            position, colony.id
                        );
                        Ok(vec![])
                    }
                }
            }
            ObserverRequest::Rename { colony, name } => {
                let colony = self.permitted_colony(player, colony, Action::Rename)?;
                Ok(colony.rename(&name))
            }
            ObserverRequest::SetPermission {
                colony,
                rank,
                action,
            } => self
                .permitted_colony(player, colony, Action::EditPermissions)?
                .set_permission(rank, action),
            ObserverRequest::RemovePermission {
                colony,
                rank,
                action,
            } => self
                .permitted_colony(player, colony, Action::EditPermissions)?
                .remove_permission(rank, action),
            ObserverRequest::TogglePermission {
                colony,
                rank,
                action,
            } => self
                .permitted_colony(player, colony, Action::EditPermissions)?
                .toggle_permission(rank, action),
            ObserverRequest::AddPlayer {
                colony,
                player: target,
                rank,
            } => self
                .permitted_colony(player, colony, Action::EditPermissions)?
                .add_player(&target, rank),
            ObserverRequest::RemovePlayer {
                colony,
                player: target,
            } => self
                .permitted_colony(player, colony, Action::EditPermissions)?
                .remove_player(&target),
            ObserverRequest::MarkRequestAsAccepted {
                colony,
                requester,
                request,
            } => self
                .permitted_colony(player, colony, Action::ManageHuts)?
                .accept_request(requester, request),
        }
    }

    fn permitted_colony(
        &mut self,
        player: &str,
        colony: Token,
        action: Action,
    ) -> Result<&mut Colony, ColonyError> {
        let colony = self.get_colony_mut(colony)?;
        if !colony.permissions.has_permission(player, action) {
            warn!(
                "Player {} is not permitted to {:?} in colony {}",
                player, action, colony.id
            );
            return Err(ColonyError::PermissionDenied {
                player: player.to_string(),
                action,
            });
        }
        Ok(colony)
    }

    /// Lost connection of player, drops its subscriptions.
    pub fn unsubscribe_everywhere(&mut self, player: &str) -> Vec<Event> {
        let mut events = vec![];
        for colony in self.colonies.values_mut() {
            events.extend(colony.unsubscribe(player));
        }
        events
    }

    pub fn save(&mut self, storage: &Storage) -> Result<(), DataError> {
        for id in self.deleted.drain(..) {
            storage.delete(&id.value().to_string())?;
        }
        for colony in self.colonies.values() {
            let compound = colony.save()?;
            storage.save(&colony.id.value().to_string(), &colony.name, &compound)?;
        }
        info!("Saved {} colonies", self.colonies.len());
        Ok(())
    }

    pub fn load(&mut self, storage: &Storage) -> Result<(), DataError> {
        for compound in storage.load_all()? {
            let colony = Colony::load(&compound, &self.catalog, self.setup)?;
            self.tokens.register(colony.id);
            self.colonies.insert(colony.id, colony);
        }
        info!("Loaded {} colonies", self.colonies.len());
        Ok(())
    }
}
