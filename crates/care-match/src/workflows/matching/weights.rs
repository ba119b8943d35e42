/// Fixed contribution of each sub-score to the composite match score.
pub const MATCH_WEIGHTS: MatchWeights = MatchWeights {
    distance: 0.25,
    specialization: 0.30,
    rating: 0.15,
    experience: 0.10,
    language: 0.10,
    availability: 0.10,
};

/// Surcharge applied on top of `duration * hourly_rate`.
pub const GST_MULTIPLIER: f64 = 1.10;
/// Distance score lost per kilometre travelled.
pub const DISTANCE_PENALTY_PER_KM: f64 = 5.0;
pub const TRAVEL_MINUTES_PER_KM: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchWeights {
    pub distance: f64,
    pub specialization: f64,
    pub rating: f64,
    pub experience: f64,
    pub language: f64,
    pub availability: f64,
}

impl MatchWeights {
    pub fn sum(&self) -> f64 {
        self.distance
            + self.specialization
            + self.rating
            + self.experience
            + self.language
            + self.availability
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        assert!((MATCH_WEIGHTS.sum() - 1.0).abs() < 1e-9);
    }
}
