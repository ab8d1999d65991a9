pub use change_grant::*;
pub use change_player::*;

mod change_grant;
mod change_player;
