use rand::seq::SliceRandom;
use rand::Rng;

const FIRST_NAMES: [&str; 12] = [
    "Ada", "Bran", "Cora", "Dain", "Elin", "Finn", "Greta", "Hale", "Ines", "Jory", "Kara", "Lior",
];

const LAST_NAMES: [&str; 10] = [
    "Ashdown", "Brook", "Carrow", "Dunmore", "Elmsworth", "Fairfield", "Grove", "Holt", "Ivers",
    "Marsh",
];

/// Generates "First M. Last" name, three words like those entered in commands.
pub fn generate_citizen_name<R: Rng>(random: &mut R) -> String {
    let first = FIRST_NAMES.choose(random).copied().unwrap_or("Ada");
    let last = LAST_NAMES.choose(random).copied().unwrap_or("Brook");
    let initial = random.gen_range(b'A'..=b'Z') as char;
    format!("{} {}. {}", first, initial, last)
}
