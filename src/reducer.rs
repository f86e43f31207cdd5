//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::AppState;

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Weather actions =====
        Action::WeatherFetch(city) => {
            state.request_seq += 1;
            state.fetch_in_flight = true;
            DispatchResult::changed_with(Effect::FetchWeather {
                city,
                seq: state.request_seq,
            })
        }

        Action::WeatherRefresh => {
            let Some(city) = state.reading.as_ref().and_then(|r| r.city()) else {
                return DispatchResult::unchanged();
            };
            let city = city.to_string();
            state.request_seq += 1;
            state.fetch_in_flight = true;
            DispatchResult::changed_with(Effect::FetchWeather {
                city,
                seq: state.request_seq,
            })
        }

        Action::WeatherDidLoad { seq, reading } => {
            // A completion from a superseded request never touches state
            if seq != state.request_seq {
                return DispatchResult::unchanged();
            }
            state.fetch_in_flight = false;
            state.last_error = None;
            state.reading = Some(reading.clone());
            DispatchResult::changed_with(Effect::PersistReading { reading })
        }

        Action::WeatherDidError { seq, message } => {
            // Silent by design: the display keeps its pre-request state and
            // the failure only reaches the log and the debug layer
            if seq == state.request_seq {
                state.fetch_in_flight = false;
            }
            state.last_error = Some(message);
            DispatchResult::changed()
        }

        // ===== Persist actions =====
        Action::PersistDidSave => DispatchResult::unchanged(),

        Action::PersistDidError(message) => {
            state.last_error = Some(message);
            DispatchResult::changed()
        }

        // ===== Search actions =====
        Action::SearchOpen => {
            state.search_mode = true;
            state.search_query.clear();
            DispatchResult::changed()
        }

        Action::SearchClose => {
            state.search_mode = false;
            state.search_query.clear();
            DispatchResult::changed()
        }

        Action::SearchQueryChange(query) => {
            state.search_query = query;
            DispatchResult::changed()
        }

        Action::SearchSubmit(query) => {
            // The box clears the moment the request is issued, not when it
            // resolves. An empty query still goes upstream; the endpoint
            // answers it with a client error that lands in the log.
            state.search_mode = false;
            state.search_query.clear();
            state.request_seq += 1;
            state.fetch_in_flight = true;
            DispatchResult::changed_with(Effect::FetchWeather {
                city: query,
                seq: state.request_seq,
            })
        }

        // ===== UI actions =====
        Action::UiToggleUnits => {
            state.unit = state.unit.toggle();
            DispatchResult::changed()
        }

        Action::UiToggleDarkMode => {
            state.dark_mode = !state.dark_mode;
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Quit => DispatchResult::unchanged(),
    }
}
