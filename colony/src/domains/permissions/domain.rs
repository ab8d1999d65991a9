use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Rank grants and player membership of one colony.
#[derive(Debug, Clone, PartialEq)]
pub struct Permissions {
    pub grants: BTreeMap<Rank, BTreeSet<Action>>,
    pub players: BTreeMap<String, Rank>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Rank {
    Owner,
    Officer,
    Friend,
    Neutral,
    Hostile,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Action {
    AccessHuts,
    ManageHuts,
    PlaceHuts,
    BreakHuts,
    EditPermissions,
    Rename,
    ReceiveMessages,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::AccessHuts,
        Action::ManageHuts,
        Action::PlaceHuts,
        Action::BreakHuts,
        Action::EditPermissions,
        Action::Rename,
        Action::ReceiveMessages,
    ];
}

/// Flat form used for persistence and replication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionsData {
    pub grants: Vec<(Rank, Vec<Action>)>,
    pub players: Vec<(String, Rank)>,
}

impl Permissions {
    pub fn new(owner: &str) -> Self {
        let mut grants = BTreeMap::new();
        grants.insert(Rank::Owner, Action::ALL.into_iter().collect());
        grants.insert(
            Rank::Officer,
            [
                Action::AccessHuts,
                Action::ManageHuts,
                Action::PlaceHuts,
                Action::BreakHuts,
                Action::ReceiveMessages,
            ]
            .into_iter()
            .collect(),
        );
        grants.insert(
            Rank::Friend,
            [Action::AccessHuts, Action::ReceiveMessages]
                .into_iter()
                .collect(),
        );
        grants.insert(Rank::Neutral, BTreeSet::new());
        grants.insert(Rank::Hostile, BTreeSet::new());
        let mut players = BTreeMap::new();
        players.insert(owner.to_string(), Rank::Owner);
        Self { grants, players }
    }

    pub fn owner(&self) -> Option<&str> {
        self.players
            .iter()
            .find(|(_, rank)| **rank == Rank::Owner)
            .map(|(name, _)| name.as_str())
    }

    /// Unknown players are neutral.
    pub fn rank_of(&self, player: &str) -> Rank {
        self.players.get(player).copied().unwrap_or(Rank::Neutral)
    }

    pub fn has_permission(&self, player: &str, action: Action) -> bool {
        let rank = self.rank_of(player);
        self.grants
            .get(&rank)
            .map(|actions| actions.contains(&action))
            .unwrap_or(false)
    }

    pub fn to_data(&self) -> PermissionsData {
        PermissionsData {
            grants: self
                .grants
                .iter()
                .map(|(rank, actions)| (*rank, actions.iter().copied().collect()))
                .collect(),
            players: self
                .players
                .iter()
                .map(|(name, rank)| (name.clone(), *rank))
                .collect(),
        }
    }

    pub fn from_data(data: PermissionsData) -> Self {
        Self {
            grants: data
                .grants
                .into_iter()
                .map(|(rank, actions)| (rank, actions.into_iter().collect()))
                .collect(),
            players: data.players.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Administration {
    PermissionChanged {
        rank: Rank,
        action: Action,
        granted: bool,
    },
    PlayerRankChanged {
        player: String,
        rank: Rank,
    },
    PlayerRemoved {
        player: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PermissionsError {
    OwnerRankImmutable,
    OwnerCannotBeRemoved { player: String },
    PlayerNotFound { player: String },
    PermissionDenied { player: String, action: Action },
}
