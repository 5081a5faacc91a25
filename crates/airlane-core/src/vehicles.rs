//! Aerial vehicle catalogue and fit selection.

use serde::{Deserialize, Serialize};

/// Rated specification of a delivery aircraft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleProfile {
    pub name: String,
    pub rated_payload_kg: f64,
    pub rated_range_km: f64,
    pub cruise_altitude_m: f64,
    pub orders_per_trip: u32,
    pub battery_life_min: u32,
}

impl VehicleProfile {
    fn new(
        name: &str,
        rated_payload_kg: f64,
        rated_range_km: f64,
        cruise_altitude_m: f64,
        orders_per_trip: u32,
        battery_life_min: u32,
    ) -> Self {
        Self {
            name: name.to_string(),
            rated_payload_kg,
            rated_range_km,
            cruise_altitude_m,
            orders_per_trip,
            battery_life_min,
        }
    }

    pub fn can_carry(&self, payload_kg: f64, range_km: f64) -> bool {
        self.rated_payload_kg >= payload_kg && self.rated_range_km >= range_km
    }
}

/// Result of matching a payload/range requirement against the catalogue.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleFit<'a> {
    pub profile: &'a VehicleProfile,
    /// False when no profile qualified and the highest-capacity one was substituted
    pub qualified: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct VehicleCatalogue {
    profiles: Vec<VehicleProfile>,
}

impl Default for VehicleCatalogue {
    fn default() -> Self {
        Self {
            profiles: vec![
                VehicleProfile::new("Zipline Platform 1", 1.8, 80.0, 150.0, 1, 45),
                VehicleProfile::new("Zipline Platform 2", 2.5, 120.0, 200.0, 2, 60),
                VehicleProfile::new("Wing (Alphabet Inc.)", 1.5, 20.0, 120.0, 1, 30),
                VehicleProfile::new("Matternet M2", 2.0, 20.0, 100.0, 1, 35),
                VehicleProfile::new("Amazon Prime Air MK30", 2.3, 24.0, 120.0, 2, 40),
                VehicleProfile::new("Wingcopter 198", 6.0, 120.0, 300.0, 4, 90),
                VehicleProfile::new("Flytrex", 2.5, 6.0, 150.0, 2, 25),
                VehicleProfile::new("Swoop Aero Kite", 3.0, 70.0, 200.0, 3, 55),
                VehicleProfile::new("Manna", 2.0, 3.0, 100.0, 1, 20),
                VehicleProfile::new("UPS Flight Forward", 2.3, 32.0, 120.0, 2, 45),
            ],
        }
    }
}

impl VehicleCatalogue {
    /// Build a catalogue from explicit profiles. Returns `None` when empty.
    pub fn new(profiles: Vec<VehicleProfile>) -> Option<Self> {
        if profiles.is_empty() {
            None
        } else {
            Some(Self { profiles })
        }
    }

    pub fn profiles(&self) -> &[VehicleProfile] {
        &self.profiles
    }

    /// Lightest-rated profile that carries `payload_kg` over `range_km`.
    ///
    /// Ties on rated payload go to the shorter rated range, then to the name.
    /// When nothing qualifies, the highest-capacity profile is returned with
    /// `qualified = false`.
    pub fn select(&self, payload_kg: f64, range_km: f64) -> VehicleFit<'_> {
        let best = self
            .profiles
            .iter()
            .filter(|p| p.can_carry(payload_kg, range_km))
            .min_by(|a, b| {
                a.rated_payload_kg
                    .total_cmp(&b.rated_payload_kg)
                    .then(a.rated_range_km.total_cmp(&b.rated_range_km))
                    .then_with(|| a.name.cmp(&b.name))
            });

        match best {
            Some(profile) => VehicleFit {
                profile,
                qualified: true,
            },
            None => VehicleFit {
                profile: self.highest_capacity(),
                qualified: false,
            },
        }
    }

    fn highest_capacity(&self) -> &VehicleProfile {
        // Catalogue is never empty: `Default` is populated and `new` rejects empty lists.
        let mut top = &self.profiles[0];
        for profile in &self.profiles[1..] {
            let ordering = profile
                .rated_payload_kg
                .total_cmp(&top.rated_payload_kg)
                .then(profile.rated_range_km.total_cmp(&top.rated_range_km));
            if ordering.is_gt() {
                top = profile;
            }
        }
        top
    }
}
