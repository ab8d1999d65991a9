use crate::citizens::{Citizen, CitizensDomain};

impl CitizensDomain {
    pub fn load_citizens(&mut self, citizens: Vec<Citizen>, sequence: usize) {
        self.citizens_id.set(sequence);
        for citizen in citizens {
            self.citizens_id.register(citizen.id.0);
            self.citizens.insert(citizen.id, citizen);
        }
    }
}
