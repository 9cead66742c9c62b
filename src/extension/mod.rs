//! Capability negotiation gateway.
//!
//! The engine asks a [`SolverExtensionService`] for its optional
//! capabilities (topology graphs, shared constraint providers,
//! multi-threaded deciders, partitioned search, nearby selection) and gets
//! back whatever the installed tier provides. The community tier,
//! [`DefaultSolverExtensionService`], answers every request with a plain
//! implementation except partitioned search.
//!
//! Callers that want a capability but can live without it go through
//! [`build_or_default`], which never fails.

mod default;
mod edition;
mod error;
mod service;

pub use default::DefaultSolverExtensionService;
pub use edition::{
    identify_solver_version, version_string, COMMUNITY_COORDINATES, COMMUNITY_NAME,
    DEVELOPMENT_SNAPSHOT, SOLVER_NAME,
};
pub use error::{Capability, ExtensionError, ResolutionError};
pub use service::{
    build_or_default, build_or_default_with, load, DefaultServiceResolver, ServiceResolver,
    SolverExtensionService,
};
