use exposure_core::ExposureState;
use exposure_ports::ExposureAuthorization;
use std::sync::RwLock;

/// Authorization snapshot updated by the platform bridge
pub struct SharedAuthorization {
    state: RwLock<ExposureState>,
}

impl SharedAuthorization {
    pub fn new(state: ExposureState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    /// Replace the current snapshot
    pub fn set(&self, state: ExposureState) {
        *self.state.write().unwrap_or_else(|p| p.into_inner()) = state;
    }
}

impl Default for SharedAuthorization {
    fn default() -> Self {
        Self::new(ExposureState::default())
    }
}

impl ExposureAuthorization for SharedAuthorization {
    fn snapshot(&self) -> ExposureState {
        *self.state.read().unwrap_or_else(|p| p.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_follows_updates() {
        let authorization = SharedAuthorization::default();
        assert!(!authorization.snapshot().is_good());

        authorization.set(ExposureState::active());
        assert!(authorization.snapshot().is_good());
    }
}
