//! Colony and citizen lookups of chat style commands.
//!
//! Argument count decides how the lookup reads its arguments:
//!
//! | count | colony          | citizen                  |
//! |-------|-----------------|--------------------------|
//! | 1     | caller's colony | id                       |
//! | 2     | id              | id                       |
//! | 3     | caller's colony | name of three words      |
//! | 4     | id              | name of three words      |
//! | 5+    | too many        | too many                 |

use std::fmt::{Display, Formatter};

use crate::citizens::CitizenId;
use crate::manager::ColonyManager;
use crate::tokens::Token;

const TOO_MANY_ARGUMENTS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    OnlyNumbers { subject: &'static str },
    TooManyArguments,
    NotFound { subject: &'static str },
    NoColony,
    Unknown,
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::OnlyNumbers { subject } => {
                write!(f, "Please only use numbers for the {} ID!", subject)
            }
            CommandError::TooManyArguments => write!(f, "Too many arguments!"),
            CommandError::NotFound { subject } => write!(f, "{} not found!", subject),
            CommandError::NoColony => write!(f, "You haven't got a colony!"),
            CommandError::Unknown => write!(f, "Unknown Error!"),
        }
    }
}

impl std::error::Error for CommandError {}

pub fn resolve_colony(
    manager: &ColonyManager,
    caller: &str,
    args: &[&str],
) -> Result<Token, CommandError> {
    let colony = match args.len() {
        2 | 4 => {
            let value = parse_id(args[0], "colony")?;
            manager.find_colony_by_id(value)
        }
        1 | 3 => Some(manager.owned_colony(caller).ok_or(CommandError::NoColony)?),
        count if count >= TOO_MANY_ARGUMENTS => return Err(CommandError::TooManyArguments),
        _ => return Err(CommandError::Unknown),
    };
    colony
        .map(|colony| colony.id)
        .ok_or(CommandError::NotFound { subject: "Colony" })
}

pub fn resolve_citizen(
    manager: &ColonyManager,
    caller: &str,
    args: &[&str],
) -> Result<(Token, CitizenId), CommandError> {
    let id = resolve_colony(manager, caller, args)?;
    let colony = manager
        .get_colony(id)
        .map_err(|_| CommandError::NotFound { subject: "Colony" })?;
    let citizen = match args.len() {
        1 => colony.citizens.get_citizen(CitizenId(parse_id(args[0], "citizen")?)).ok(),
        2 => colony.citizens.get_citizen(CitizenId(parse_id(args[1], "citizen")?)).ok(),
        3 => colony.citizens.find_citizen_by_name(&args[0..3].join(" ")),
        4 => colony.citizens.find_citizen_by_name(&args[1..4].join(" ")),
        _ => return Err(CommandError::Unknown),
    };
    citizen
        .map(|citizen| (id, citizen.id))
        .ok_or(CommandError::NotFound { subject: "Citizen" })
}

fn parse_id(argument: &str, subject: &'static str) -> Result<usize, CommandError> {
    argument
        .parse()
        .map_err(|_| CommandError::OnlyNumbers { subject })
}
