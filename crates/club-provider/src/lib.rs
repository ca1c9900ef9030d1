mod client;
mod dto;
mod error;
mod normalize;
mod types;

pub use client::{ProviderClient, ProviderConfig};
pub use error::ProviderError;
pub use types::{Match, MatchSummary, MatchType, Player, SetResult, Team, TeamResult};
