// Job search: query translation, provider access, normalization and ranking.
// All SerpApi traffic goes through provider::SerpApiClient.

pub mod aggregator;
pub mod handlers;
pub mod normalize;
pub mod provider;
pub mod query;
