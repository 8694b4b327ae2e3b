use sha2::{Digest, Sha256};

use crate::models::{Treatment, UserId};

/// Maps a user to the treatment that handles their requests
///
/// Implementations must be pure in the user: the same user always gets the
/// same treatment for the lifetime of an experiment.
#[cfg_attr(test, mockall::automock)]
pub trait TreatmentAssigner: Send + Sync {
    fn assign(&self, user: UserId) -> Treatment;
}

/// A named experiment splitting users evenly across all treatments
#[derive(Debug, Clone)]
pub struct Experiment {
    name: String,
}

impl Experiment {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stable bucket in `0..buckets` derived from the experiment name and user
    fn bucket(&self, user: UserId, buckets: usize) -> usize {
        let digest = Sha256::digest(format!("{}:{}", self.name, user).as_bytes());

        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&digest[..8]);

        (u64::from_be_bytes(prefix) % buckets as u64) as usize
    }
}

impl TreatmentAssigner for Experiment {
    fn assign(&self, user: UserId) -> Treatment {
        Treatment::ALL[self.bucket(user, Treatment::ALL.len())]
    }
}
