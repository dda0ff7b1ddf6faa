//! Process-memory repository implementations. Contents are lost on restart.

pub mod account_repo_impl;
pub mod track_repo_impl;

pub use account_repo_impl::InMemoryAccountRepository;
pub use track_repo_impl::InMemoryTrackRepository;
