//! Tests using the StoreTestHarness and EffectStoreTestHarness
//!
//! These tests demonstrate the integrated testing pattern where
//! store, component, and render testing are combined.

use climate::{
    action::Action,
    components::{Component, WeatherDisplay, WeatherDisplayProps},
    effect::Effect,
    icons::IconTable,
    persist,
    reducer::reducer,
    state::{AppState, TempUnit, WeatherReading},
};
use tui_dispatch::NumericComponentId;
use tui_dispatch::testing::*;

/// Upstream payload fixture: Paris, 293.15 K, clear sky
fn paris_payload() -> WeatherReading {
    serde_json::from_str(
        r#"{
            "name": "Paris",
            "main": {"temp": 293.15, "humidity": 55},
            "weather": [{"description": "clear sky"}],
            "coord": {"lat": 48.85, "lon": 2.35}
        }"#,
    )
    .expect("fixture parses")
}

// ============================================================================
// EffectStoreTestHarness Tests
// ============================================================================

#[test]
fn test_search_fetch_flow_with_harness() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    // User types Paris and presses the commit key
    harness.dispatch_collect(Action::SearchOpen);
    harness.dispatch_collect(Action::SearchQueryChange("Paris".into()));
    harness.dispatch_collect(Action::SearchSubmit("Paris".into()));

    // The box clears before any response arrives
    harness.assert_state(|s| s.search_query.is_empty());
    harness.assert_state(|s| !s.search_mode);
    harness.assert_state(|s| s.fetch_in_flight);

    // Verify effect was emitted with the typed city
    let effects = harness.drain_effects();
    effects.effects_first_matches(
        |e| matches!(e, Effect::FetchWeather { city, seq: 1 } if city == "Paris"),
    );

    // Simulate async completion
    harness.complete_action(Action::WeatherDidLoad {
        seq: 1,
        reading: paris_payload(),
    });
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 1, "Should have processed 1 action");
    assert_eq!(changed, 1, "Action should have changed state");

    harness.assert_state(|s| s.reading == Some(paris_payload()));

    // Write-through: the same reading goes to the store
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(
        |e| matches!(e, Effect::PersistReading { reading } if *reading == paris_payload()),
    );
}

#[test]
fn test_fetch_error_flow() {
    let mut harness = EffectStoreTestHarness::new(
        AppState::with_reading(Some(paris_payload())),
        reducer,
    );

    harness.dispatch_collect(Action::SearchSubmit("Atlantis".into()));
    harness.drain_effects();

    // Endpoint answers 404; the display keeps the prior reading and the
    // failure only lands in the diagnostic record
    harness.complete_action(Action::WeatherDidError {
        seq: 1,
        message: "weather endpoint returned 404 Not Found: city not found".into(),
    });
    harness.process_emitted();

    harness.assert_state(|s| s.reading == Some(paris_payload()));
    harness.assert_state(|s| s.last_error.as_deref().is_some_and(|e| e.contains("404")));
    harness.assert_state(|s| s.search_query.is_empty());
    harness.assert_state(|s| !s.fetch_in_flight);

    // No write-through on failure
    let effects = harness.drain_effects();
    effects.effects_empty();
}

#[test]
fn test_overlapping_requests_latest_wins() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchSubmit("Paris".into()));
    harness.dispatch_collect(Action::SearchSubmit("London".into()));
    harness.drain_effects();

    // The Paris response resolves after London was issued - dropped
    harness.complete_action(Action::WeatherDidLoad {
        seq: 1,
        reading: paris_payload(),
    });
    harness.process_emitted();
    harness.assert_state(|s| s.reading.is_none());

    // The London response carries the current seq - applied
    let mut london = paris_payload();
    london.name = Some("London".into());
    harness.complete_action(Action::WeatherDidLoad {
        seq: 2,
        reading: london,
    });
    harness.process_emitted();
    harness.assert_state(|s| {
        s.reading.as_ref().and_then(|r| r.city()) == Some("London")
    });
}

#[test]
fn test_unit_toggle_with_harness() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.assert_state(|s| s.unit == TempUnit::Celsius);

    harness.dispatch_collect(Action::UiToggleUnits);
    harness.assert_state(|s| s.unit == TempUnit::Fahrenheit);

    harness.dispatch_collect(Action::UiToggleUnits);
    harness.assert_state(|s| s.unit == TempUnit::Celsius);
}

#[test]
fn test_dispatch_all() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    // Dispatch multiple actions at once
    let results = harness.dispatch_all([
        Action::UiToggleUnits,
        Action::UiToggleDarkMode,
        Action::UiToggleUnits,
    ]);

    // All should have changed state
    assert_eq!(results, vec![true, true, true]);

    // Net result: units back to Celsius, dark mode on
    harness.assert_state(|s| s.unit == TempUnit::Celsius);
    harness.assert_state(|s| s.dark_mode);
}

// ============================================================================
// Component + Store Integration Tests
// ============================================================================

#[test]
fn test_keyboard_opens_search() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let mut component = WeatherDisplay;
    let icons = IconTable::builtin();

    // Send '/' key through component, get actions
    let actions = harness.send_keys::<NumericComponentId, _, _>("/", |state, event| {
        let props = WeatherDisplayProps {
            state,
            icons: &icons,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    // Verify action was returned
    actions.assert_count(1);
    actions.assert_first(Action::SearchOpen);

    // Now dispatch the action manually and verify state
    harness.dispatch_collect(Action::SearchOpen);
    harness.assert_state(|s| s.search_mode);
}

#[test]
fn test_keyboard_refresh_refetches_current_city() {
    let mut harness = EffectStoreTestHarness::new(
        AppState::with_reading(Some(paris_payload())),
        reducer,
    );
    let mut component = WeatherDisplay;
    let icons = IconTable::builtin();

    let actions = harness.send_keys::<NumericComponentId, _, _>("r", |state, event| {
        let props = WeatherDisplayProps {
            state,
            icons: &icons,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_first(Action::WeatherRefresh);

    harness.dispatch_collect(Action::WeatherRefresh);
    let effects = harness.drain_effects();
    effects.effects_first_matches(
        |e| matches!(e, Effect::FetchWeather { city, .. } if city == "Paris"),
    );
}

// ============================================================================
// Render Tests with Harness
// ============================================================================

#[test]
fn test_render_after_load_shows_reading() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchSubmit("Paris".into()));
    harness.drain_effects();
    harness.complete_action(Action::WeatherDidLoad {
        seq: 1,
        reading: paris_payload(),
    });
    harness.process_emitted();

    let mut component = WeatherDisplay;
    let icons = IconTable::builtin();
    let output = harness.render_plain(60, 20, |frame, area, state| {
        let props = WeatherDisplayProps {
            state,
            icons: &icons,
            is_focused: true,
        };
        component.render(frame, area, props);
    });

    assert!(output.contains("clear sky"), "description visible:\n{}", output);
    assert!(output.contains("55% Humidity"), "humidity visible:\n{}", output);
    assert!(
        output.contains("Coord: 48.85, 2.35"),
        "coordinates visible:\n{}",
        output
    );
}

#[test]
fn test_render_after_error_is_unchanged() {
    let mut harness = EffectStoreTestHarness::new(
        AppState::with_reading(Some(paris_payload())),
        reducer,
    );
    let mut component = WeatherDisplay;
    let icons = IconTable::builtin();

    let before = harness.render_plain(60, 20, |frame, area, state| {
        let props = WeatherDisplayProps {
            state,
            icons: &icons,
            is_focused: true,
        };
        component.render(frame, area, props);
    });

    harness.dispatch_collect(Action::SearchSubmit("Atlantis".into()));
    harness.drain_effects();
    harness.complete_action(Action::WeatherDidError {
        seq: 1,
        message: "weather request failed: connection refused".into(),
    });
    harness.process_emitted();

    let after = harness.render_plain(60, 20, |frame, area, state| {
        let props = WeatherDisplayProps {
            state,
            icons: &icons,
            is_focused: true,
        };
        component.render(frame, area, props);
    });
    assert_eq!(before, after, "failed fetch must not change the display");
}

#[test]
fn test_render_unit_toggle_changes_display() {
    let mut harness = EffectStoreTestHarness::new(
        AppState::with_reading(Some(paris_payload())),
        reducer,
    );
    let mut component = WeatherDisplay;
    let icons = IconTable::builtin();

    // Render in Celsius
    let celsius_output = harness.render_plain(60, 20, |frame, area, state| {
        let props = WeatherDisplayProps {
            state,
            icons: &icons,
            is_focused: true,
        };
        component.render(frame, area, props);
    });

    // Toggle to Fahrenheit
    harness.dispatch_collect(Action::UiToggleUnits);
    let fahrenheit_output = harness.render_plain(60, 20, |frame, area, state| {
        let props = WeatherDisplayProps {
            state,
            icons: &icons,
            is_focused: true,
        };
        component.render(frame, area, props);
    });

    // Outputs should be different (temperature display changes)
    assert_ne!(
        celsius_output, fahrenheit_output,
        "Celsius and Fahrenheit renders should differ"
    );

    // Toggling back restores the original display
    harness.dispatch_collect(Action::UiToggleUnits);
    let round_trip = harness.render_plain(60, 20, |frame, area, state| {
        let props = WeatherDisplayProps {
            state,
            icons: &icons,
            is_focused: true,
        };
        component.render(frame, area, props);
    });
    assert_eq!(celsius_output, round_trip);
}

// ============================================================================
// Store Round-Trip Tests
// ============================================================================

#[tokio::test]
async fn test_persisted_reading_reproduces_display() {
    let dir = std::env::temp_dir().join(format!("climate-harness-{}", std::process::id()));
    let path = persist::reading_path(&dir);

    persist::save_reading(&path, &paris_payload())
        .await
        .expect("save succeeds");
    let restored = persist::load_reading(&path).await;

    // A fresh instance hydrated from the store renders the same reading
    let mut original = EffectStoreTestHarness::new(
        AppState::with_reading(Some(paris_payload())),
        reducer,
    );
    let mut hydrated = EffectStoreTestHarness::new(AppState::with_reading(restored), reducer);
    let mut component = WeatherDisplay;
    let icons = IconTable::builtin();

    let original_output = original.render_plain(60, 20, |frame, area, state| {
        let props = WeatherDisplayProps {
            state,
            icons: &icons,
            is_focused: true,
        };
        component.render(frame, area, props);
    });
    let hydrated_output = hydrated.render_plain(60, 20, |frame, area, state| {
        let props = WeatherDisplayProps {
            state,
            icons: &icons,
            is_focused: true,
        };
        component.render(frame, area, props);
    });
    assert_eq!(original_output, hydrated_output);

    let _ = tokio::fs::remove_dir_all(&dir).await;
}
