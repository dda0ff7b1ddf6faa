//! Repository traits (ports)

pub mod account_repository;
pub mod track_repository;

pub use account_repository::AccountRepository;
pub use track_repository::TrackRepository;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
#[cfg(test)]
pub use track_repository::MockTrackRepository;
