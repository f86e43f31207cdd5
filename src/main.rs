//! City weather TUI

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tracing_subscriber::EnvFilter;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_components::centered_rect;
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use climate::action::Action;
use climate::api;
use climate::components::{
    Component, SearchOverlay, SearchOverlayProps, WeatherDisplay, WeatherDisplayProps,
};
use climate::config::{self, Config};
use climate::effect::Effect;
use climate::icons::IconTable;
use climate::persist;
use climate::reducer::reducer;
use climate::state::AppState;

/// City weather TUI
#[derive(Parser, Debug)]
#[command(name = "climate")]
#[command(about = "Look up current weather by city name")]
struct Args {
    /// City to look up at startup (otherwise the last reading is shown)
    #[arg(long, short)]
    city: Option<String>,

    /// OpenWeatherMap API key; overrides the configured one
    #[arg(long)]
    api_key: Option<String>,

    /// Path to the config file
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

/// Everything the effect handler needs outside of state
struct EffectEnv {
    endpoint: String,
    api_key: String,
    store_path: PathBuf,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum ClimateComponentId {
    Display,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum ClimateContext {
    Main,
    Search,
}

impl EventRoutingState<ClimateComponentId, ClimateContext> for AppState {
    fn focused(&self) -> Option<ClimateComponentId> {
        if self.search_mode {
            Some(ClimateComponentId::Search)
        } else {
            Some(ClimateComponentId::Display)
        }
    }

    fn modal(&self) -> Option<ClimateComponentId> {
        if self.search_mode {
            Some(ClimateComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: ClimateComponentId) -> ClimateContext {
        match id {
            ClimateComponentId::Display => ClimateContext::Main,
            ClimateComponentId::Search => ClimateContext::Search,
        }
    }

    fn default_context(&self) -> ClimateContext {
        ClimateContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        city,
        api_key,
        config: config_path,
        debug: debug_args,
    } = Args::parse();

    let config = match Config::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let data_dir = config::data_dir();
    init_logging(&data_dir);

    let store_path = persist::reading_path(&data_dir);
    let env = Arc::new(EffectEnv {
        endpoint: config.api.endpoint.clone(),
        api_key: api_key.unwrap_or_else(|| config.api.api_key.clone()),
        store_path: store_path.clone(),
    });
    let icons = config.icon_table();

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    // Warm start: the store may hold the previous session's reading
    let state = debug
        .load_state_or_else_async(move || async move {
            let reading = persist::load_reading(&store_path).await;
            if reading.is_some() {
                tracing::info!("hydrated previous reading from store");
            }
            Ok::<AppState, io::Error>(AppState::with_reading(reading))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let init_action = city.map(Action::WeatherFetch);
    let result = run_app(
        &mut terminal,
        &debug,
        store,
        init_action,
        replay_actions,
        icons,
        env,
    )
    .await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

/// The terminal is owned by the TUI, so diagnostics go to a file
fn init_logging(data_dir: &std::path::Path) {
    if std::fs::create_dir_all(data_dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join("climate.log"))
    else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

struct ClimateUi {
    display: WeatherDisplay,
    search: SearchOverlay,
    icons: IconTable,
}

impl ClimateUi {
    fn new(icons: IconTable) -> Self {
        Self {
            display: WeatherDisplay,
            search: SearchOverlay::new(),
            icons,
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<ClimateComponentId>,
    ) {
        event_ctx.set_component_area(ClimateComponentId::Display, area);

        let props = WeatherDisplayProps {
            state,
            icons: &self.icons,
            is_focused: render_ctx.is_focused() && !state.search_mode,
        };
        self.display.render(frame, area, props);

        self.search.set_open(state.search_mode);
        if state.search_mode {
            let modal_area = centered_rect(60, 7, area);
            event_ctx.set_component_area(ClimateComponentId::Search, modal_area);
            let props = SearchOverlayProps {
                query: &state.search_query,
                is_focused: render_ctx.is_focused(),
                theme: state.theme(),
                on_query_change: Action::SearchQueryChange,
                on_query_submit: Action::SearchSubmit,
            };
            self.search.render(frame, area, props);
        } else {
            event_ctx
                .component_areas
                .remove(&ClimateComponentId::Search);
        }
    }

    fn handle_display_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = WeatherDisplayProps {
            state,
            icons: &self.icons,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .display
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        self.search.set_open(state.search_mode);
        let props = SearchOverlayProps {
            query: &state.search_query,
            is_focused: true,
            theme: state.theme(),
            on_query_change: Action::SearchQueryChange,
            on_query_submit: Action::SearchSubmit,
        };
        let actions: Vec<_> = self.search.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    init_action: Option<Action>,
    replay_actions: Vec<ReplayItem<Action>>,
    icons: IconTable,
    env: Arc<EffectEnv>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(ClimateUi::new(icons)));
    let mut bus: EventBus<AppState, Action, ClimateComponentId, ClimateContext> = EventBus::new();
    let keybindings: Keybindings<ClimateContext> = Keybindings::new();

    let ui_display = Rc::clone(&ui);
    bus.register(ClimateComponentId::Display, move |event, state| {
        ui_display
            .borrow_mut()
            .handle_display_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(ClimateComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            init_action,
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, env.clone()),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, env: Arc<EffectEnv>) {
    match effect {
        Effect::FetchWeather { city, seq } => {
            // One keyed task: a newer fetch supersedes an older one, and the
            // reducer drops any stale completion that still lands
            ctx.tasks().spawn("weather", async move {
                match api::fetch_by_city(&env.endpoint, &env.api_key, &city).await {
                    Ok(reading) => {
                        tracing::info!(city = %city, "weather fetch resolved");
                        Action::WeatherDidLoad { seq, reading }
                    }
                    Err(e) => {
                        tracing::warn!(city = %city, error = %e, "weather fetch failed");
                        Action::WeatherDidError {
                            seq,
                            message: e.to_string(),
                        }
                    }
                }
            });
        }
        Effect::PersistReading { reading } => {
            let path = env.store_path.clone();
            ctx.tasks().spawn("persist", async move {
                match persist::save_reading(&path, &reading).await {
                    Ok(()) => Action::PersistDidSave,
                    Err(e) => {
                        tracing::warn!(error = %e, "write-through failed");
                        Action::PersistDidError(e)
                    }
                }
            });
        }
    }
}
