//! MySQL repository implementations

mod challenge_repository_impl;
mod principal_repository_impl;

pub use challenge_repository_impl::MySqlChallengeRepository;
pub use principal_repository_impl::MySqlPrincipalRepository;
