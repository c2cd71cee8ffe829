use crate::types::Location;

/// Static reference data; pickups only happen at these two sites.
pub fn seed_locations() -> Vec<Location> {
    vec![
        Location {
            id: "loc-1".into(),
            name: "Main Warehouse".into(),
            address: "1234 Industrial Blvd, Denver, CO 80216".into(),
            instructions: "Enter through Gate B. Bring photo ID and your pickup number. Our team will assist you with loading.".into(),
        },
        Location {
            id: "loc-2".into(),
            name: "Downtown Showroom".into(),
            address: "567 Market St, Denver, CO 80202".into(),
            instructions: "Street parking available. Check in at the front desk upon arrival.".into(),
        },
    ]
}

pub fn find(id: &str) -> Option<Location> {
    seed_locations().into_iter().find(|location| location.id == id)
}
