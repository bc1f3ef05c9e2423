//! Init/teardown lifecycle around a single engine
//!
//! Mirrors the procedural `init` / `cleanup` API: exactly one live grid at a
//! time, with explicit errors for double initialization and use after
//! teardown.

use tracing::debug;

use super::core::Chebyshev;
use super::error::ChebError;

/// Holds at most one [`Chebyshev`] engine
#[derive(Debug, Default)]
pub struct ChebSession {
    engine: Option<Chebyshev>,
}

impl ChebSession {
    /// Empty session
    pub const fn new() -> Self {
        Self { engine: None }
    }

    /// Build the engine for `n` points over [lower, upper]
    pub fn initialize(&mut self, n: usize, lower: f64, upper: f64) -> Result<(), ChebError> {
        if self.engine.is_some() {
            return Err(ChebError::AlreadyInitialized);
        }
        self.engine = Some(Chebyshev::new(n, lower, upper)?);
        debug!(n, lower, upper, "session initialized");
        Ok(())
    }

    /// Release the engine
    pub fn teardown(&mut self) -> Result<(), ChebError> {
        match self.engine.take() {
            Some(engine) => {
                debug!(n = engine.n(), "session torn down");
                Ok(())
            }
            None => Err(ChebError::NotInitialized),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.engine.is_some()
    }

    /// The live engine
    pub fn engine(&self) -> Result<&Chebyshev, ChebError> {
        self.engine.as_ref().ok_or(ChebError::NotInitialized)
    }
}
