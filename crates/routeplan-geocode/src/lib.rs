pub mod error;
pub mod locationiq;
pub mod nominatim;
pub mod provider;
pub mod resolver;
mod retry;
pub mod suggest;

pub use error::GeocodeError;
pub use locationiq::LocationIqProvider;
pub use nominatim::NominatimProvider;
pub use provider::GeocodingProvider;
pub use resolver::{GeocodingResolver, MAX_SUGGESTIONS, MIN_QUERY_LEN};
pub use suggest::SuggestionSession;
