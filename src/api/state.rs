//! Application state for the Prima Engine API.

use std::sync::Arc;

use crate::calculation::PrimaCalculator;

/// Shared application state.
///
/// Holds the calculator, and through it the fiscal configuration, shared by
/// every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    calculator: Arc<PrimaCalculator>,
}

impl AppState {
    /// Creates a new application state around `calculator`.
    pub fn new(calculator: PrimaCalculator) -> Self {
        Self {
            calculator: Arc::new(calculator),
        }
    }

    /// Returns the shared calculator.
    pub fn calculator(&self) -> &PrimaCalculator {
        &self.calculator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FiscalConfig;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone + Send + Sync>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_app_state_exposes_config() {
        let state = AppState::new(PrimaCalculator::new(FiscalConfig::default()));
        assert_eq!(state.calculator().config().metadata().year, 2025);
    }
}
