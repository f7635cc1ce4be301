#![cfg(feature = "cli")]

use std::sync::Arc;

use crate::tools::logger::Logger;

#[derive(Clone)]
pub struct CliContext {
    logger: Arc<Logger>,
    verbose: bool,
}

impl CliContext {
    pub fn new(verbose: bool) -> Self {
        Self {
            logger: Arc::new(Logger::new()),
            verbose,
        }
    }

    pub fn logger(&self) -> Arc<Logger> {
        Arc::clone(&self.logger)
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}
