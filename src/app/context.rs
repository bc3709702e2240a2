use crate::ports::{Clock, ProjectFilesystem};

/// Application context holding dependencies for command execution.
pub struct AppContext<F: ProjectFilesystem, C: Clock> {
    filesystem: F,
    clock: C,
}

impl<F: ProjectFilesystem, C: Clock> AppContext<F, C> {
    /// Create a new application context.
    pub fn new(filesystem: F, clock: C) -> Self {
        Self { filesystem, clock }
    }

    /// Get a reference to the project filesystem.
    pub fn filesystem(&self) -> &F {
        &self.filesystem
    }

    /// Get a reference to the clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }
}
