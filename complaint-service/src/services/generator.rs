use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

pub const USER_ID_SPACE: u32 = 10_000;
pub const COMPLAINT_ID_SPACE: u32 = 10_000;
pub const SECRET_CODE_SPACE: u32 = 1_000_000;

/// Source of user identifiers, complaint identifiers and secret codes.
///
/// Implementations only draw values; checking them against existing records
/// is the caller's job.
pub trait IdGenerator: Send + Sync {
    fn user_id(&self) -> String;
    fn complaint_id(&self) -> String;
    fn secret_code(&self) -> String;
}

/// Numeric string generator backed by a single `StdRng` seeded at construction.
pub struct RandomIdGenerator {
    rng: Mutex<StdRng>,
}

impl RandomIdGenerator {
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic sequence, for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn draw(&self, upper: u32) -> String {
        // A panic mid-draw cannot leave the RNG in an unusable state.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(0..upper).to_string()
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl IdGenerator for RandomIdGenerator {
    fn user_id(&self) -> String {
        self.draw(USER_ID_SPACE)
    }

    fn complaint_id(&self) -> String {
        self.draw(COMPLAINT_ID_SPACE)
    }

    fn secret_code(&self) -> String {
        self.draw(SECRET_CODE_SPACE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_stay_within_their_ranges() {
        let ids = RandomIdGenerator::with_seed(7);
        for _ in 0..1_000 {
            let user_id: u32 = ids.user_id().parse().unwrap();
            let complaint_id: u32 = ids.complaint_id().parse().unwrap();
            let code: u32 = ids.secret_code().parse().unwrap();
            assert!(user_id < USER_ID_SPACE);
            assert!(complaint_id < COMPLAINT_ID_SPACE);
            assert!(code < SECRET_CODE_SPACE);
        }
    }

    #[test]
    fn same_seed_gives_same_sequence() {
        let a = RandomIdGenerator::with_seed(42);
        let b = RandomIdGenerator::with_seed(42);
        for _ in 0..16 {
            assert_eq!(a.secret_code(), b.secret_code());
        }
    }

    #[test]
    fn rapid_calls_do_not_repeat_the_sequence() {
        // Re-seeding per call would hand back the same value every time.
        let ids = RandomIdGenerator::from_entropy();
        let codes: std::collections::HashSet<String> =
            (0..50).map(|_| ids.secret_code()).collect();
        assert!(codes.len() > 1);
    }
}
