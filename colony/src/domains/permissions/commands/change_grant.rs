use crate::permissions::Administration::PermissionChanged;
use crate::permissions::{Action, Administration, Permissions, PermissionsError, Rank};

impl Permissions {
    pub fn set_permission(
        &mut self,
        rank: Rank,
        action: Action,
    ) -> Result<impl FnOnce() -> Vec<Administration> + '_, PermissionsError> {
        self.change_grant(rank, action, |_| true)
    }

    pub fn remove_permission(
        &mut self,
        rank: Rank,
        action: Action,
    ) -> Result<impl FnOnce() -> Vec<Administration> + '_, PermissionsError> {
        self.change_grant(rank, action, |_| false)
    }

    pub fn toggle_permission(
        &mut self,
        rank: Rank,
        action: Action,
    ) -> Result<impl FnOnce() -> Vec<Administration> + '_, PermissionsError> {
        self.change_grant(rank, action, |granted| !granted)
    }

    fn change_grant(
        &mut self,
        rank: Rank,
        action: Action,
        decide: fn(bool) -> bool,
    ) -> Result<impl FnOnce() -> Vec<Administration> + '_, PermissionsError> {
        if rank == Rank::Owner {
            return Err(PermissionsError::OwnerRankImmutable);
        }
        let actions = self.grants.entry(rank).or_default();
        let command = move || {
            let granted = decide(actions.contains(&action));
            if granted {
                actions.insert(action);
            } else {
                actions.remove(&action);
            }
            vec![PermissionChanged {
                rank,
                action,
                granted,
            }]
        };
        Ok(command)
    }
}
