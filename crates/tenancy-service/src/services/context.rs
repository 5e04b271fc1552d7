//! Service context - dependency container for the coordinator
//!
//! Holds the store, the host-supplied collaborators, the clock, and the
//! invite policy. Everything is behind a port, so tests substitute
//! in-memory implementations and a fixed clock.

use std::sync::Arc;

use tenancy_common::InviteConfig;
use tenancy_core::traits::{Clock, InviteStore, PropertyDirectory, SystemClock, TenantLinker};

/// Service context containing all coordinator dependencies
#[derive(Clone)]
pub struct ServiceContext {
    invite_store: Arc<dyn InviteStore>,
    tenant_linker: Arc<dyn TenantLinker>,
    property_directory: Arc<dyn PropertyDirectory>,
    clock: Arc<dyn Clock>,
    invite_config: InviteConfig,
}

impl ServiceContext {
    /// Get the invite store
    pub fn invite_store(&self) -> &dyn InviteStore {
        self.invite_store.as_ref()
    }

    /// Get the tenant linker
    pub fn tenant_linker(&self) -> &dyn TenantLinker {
        self.tenant_linker.as_ref()
    }

    /// Get the property directory
    pub fn property_directory(&self) -> &dyn PropertyDirectory {
        self.property_directory.as_ref()
    }

    /// Get the clock
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Get the invite policy
    pub fn invite_config(&self) -> &InviteConfig {
        &self.invite_config
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("invite_config", &self.invite_config)
            .finish_non_exhaustive()
    }
}

/// Error building a service context
#[derive(Debug, thiserror::Error)]
#[error("Missing service context dependency: {0}")]
pub struct ContextBuildError(&'static str);

/// Builder for creating a ServiceContext
pub struct ServiceContextBuilder {
    invite_store: Option<Arc<dyn InviteStore>>,
    tenant_linker: Option<Arc<dyn TenantLinker>>,
    property_directory: Option<Arc<dyn PropertyDirectory>>,
    clock: Arc<dyn Clock>,
    invite_config: InviteConfig,
}

impl ServiceContextBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            invite_store: None,
            tenant_linker: None,
            property_directory: None,
            clock: Arc::new(SystemClock),
            invite_config: InviteConfig::default(),
        }
    }

    #[must_use]
    pub fn invite_store(mut self, store: Arc<dyn InviteStore>) -> Self {
        self.invite_store = Some(store);
        self
    }

    #[must_use]
    pub fn tenant_linker(mut self, linker: Arc<dyn TenantLinker>) -> Self {
        self.tenant_linker = Some(linker);
        self
    }

    #[must_use]
    pub fn property_directory(mut self, directory: Arc<dyn PropertyDirectory>) -> Self {
        self.property_directory = Some(directory);
        self
    }

    /// Override the clock (defaults to the system clock)
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Override the invite policy (defaults to `InviteConfig::default()`)
    #[must_use]
    pub fn invite_config(mut self, config: InviteConfig) -> Self {
        self.invite_config = config;
        self
    }

    /// Build the context
    ///
    /// # Errors
    /// Returns an error naming the first missing dependency
    pub fn build(self) -> Result<ServiceContext, ContextBuildError> {
        Ok(ServiceContext {
            invite_store: self.invite_store.ok_or(ContextBuildError("invite_store"))?,
            tenant_linker: self
                .tenant_linker
                .ok_or(ContextBuildError("tenant_linker"))?,
            property_directory: self
                .property_directory
                .ok_or(ContextBuildError("property_directory"))?,
            clock: self.clock,
            invite_config: self.invite_config,
        })
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
