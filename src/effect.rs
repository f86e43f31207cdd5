//! Effects - side effects declared by the reducer

use crate::state::WeatherReading;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone)]
pub enum Effect {
    /// Fetch current weather for a city; `seq` ties the completion back to
    /// the request that issued it
    FetchWeather { city: String, seq: u64 },
    /// Write the reading through to the persistent store
    PersistReading { reading: WeatherReading },
}
