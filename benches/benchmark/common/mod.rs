use std::cell::Cell;
use std::time::Duration;

use criterion::Criterion;
use flow_rail::traits::{Payload, Release};
use flow_rail::Fault;

// ============================================================================
// Test Data & Domain Types
// ============================================================================

#[derive(Debug, Clone)]
pub struct UserData {
    pub user_id: u64,
    pub username: String,
    pub active: bool,
}

impl UserData {
    pub fn new(id: u64) -> Self {
        Self { user_id: id, username: format!("user_{id}"), active: id % 7 != 0 }
    }
}

impl Payload for UserData {}

#[derive(Debug, Clone)]
pub enum DomainError {
    NotFound(u64),
    Inactive(u64),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::NotFound(id) => write!(f, "user {id} not found"),
            DomainError::Inactive(id) => write!(f, "user {id} is inactive"),
        }
    }
}

impl std::error::Error for DomainError {}

/// Pretend connection: counts releases.
#[derive(Debug, Default)]
pub struct Connection {
    pub closed: Cell<u32>,
}

impl Release for Connection {
    fn release(&self) -> Result<(), Fault> {
        self.closed.set(self.closed.get() + 1);
        Ok(())
    }
}

// ============================================================================
// Simulated Operations
// ============================================================================

pub fn simulate_db_query(user_id: u64) -> Result<UserData, DomainError> {
    if user_id >= 100 {
        return Err(DomainError::NotFound(user_id));
    }
    Ok(UserData::new(user_id))
}

pub fn simulate_activity_check(user: &UserData) -> Result<(), DomainError> {
    if user.active {
        Ok(())
    } else {
        Err(DomainError::Inactive(user.user_id))
    }
}

pub fn configure_criterion() -> Criterion {
    Criterion::default()
        .sample_size(100)
        .warm_up_time(Duration::from_secs(3))
        .measurement_time(Duration::from_secs(5))
        .noise_threshold(0.05)
}
