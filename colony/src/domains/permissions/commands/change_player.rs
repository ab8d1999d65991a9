use crate::permissions::Administration::{PlayerRankChanged, PlayerRemoved};
use crate::permissions::{Administration, Permissions, PermissionsError, Rank};

impl Permissions {
    pub fn add_player(
        &mut self,
        player: &str,
        rank: Rank,
    ) -> Result<impl FnOnce() -> Vec<Administration> + '_, PermissionsError> {
        if rank == Rank::Owner || self.rank_of(player) == Rank::Owner {
            return Err(PermissionsError::OwnerRankImmutable);
        }
        let player = player.to_string();
        let command = move || {
            self.players.insert(player.clone(), rank);
            vec![PlayerRankChanged { player, rank }]
        };
        Ok(command)
    }

    pub fn remove_player(
        &mut self,
        player: &str,
    ) -> Result<impl FnOnce() -> Vec<Administration> + '_, PermissionsError> {
        match self.players.get(player) {
            None => {
                return Err(PermissionsError::PlayerNotFound {
                    player: player.to_string(),
                })
            }
            Some(Rank::Owner) => {
                return Err(PermissionsError::OwnerCannotBeRemoved {
                    player: player.to_string(),
                })
            }
            Some(_) => {}
        }
        let player = player.to_string();
        let command = move || {
            self.players.remove(&player);
            vec![PlayerRemoved { player }]
        };
        Ok(command)
    }
}
