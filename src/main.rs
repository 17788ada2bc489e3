//! Weather dashboard - terminal client

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};
use weather_dashboard::action::Action;
use weather_dashboard::api::DashboardClient;
use weather_dashboard::components::{Component, Dashboard, DashboardProps};
use weather_dashboard::effect::Effect;
use weather_dashboard::reducer::reducer;
use weather_dashboard::state::{AppState, DEFAULT_CITY, LOADING_ANIM_TICK_MS};
use weather_dashboard::{flows, logging};

/// Weather dashboard - current conditions and forecast for any city
#[derive(Parser, Debug)]
#[command(name = "weather-dashboard")]
#[command(about = "Terminal weather dashboard with city autocomplete")]
struct Args {
    /// City searched on startup
    #[arg(long, short, default_value = DEFAULT_CITY)]
    city: String,

    /// Base URL of the weather backend
    #[arg(long, short, default_value = "http://127.0.0.1:5000")]
    api_url: String,

    /// Append tracing output to this file (the terminal is owned by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum DashboardComponentId {
    Dashboard,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum DashboardContext {
    Main,
}

impl EventRoutingState<DashboardComponentId, DashboardContext> for AppState {
    fn focused(&self) -> Option<DashboardComponentId> {
        Some(DashboardComponentId::Dashboard)
    }

    fn modal(&self) -> Option<DashboardComponentId> {
        None
    }

    fn binding_context(&self, _id: DashboardComponentId) -> DashboardContext {
        DashboardContext::Main
    }

    fn default_context(&self) -> DashboardContext {
        DashboardContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        city,
        api_url,
        log_file,
        debug: debug_args,
    } = Args::parse();

    logging::init(log_file.as_deref())?;

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(city))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let client = DashboardClient::new(api_url);
    tracing::info!(api_url = %client.base_url(), "weather dashboard starting");

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, client, replay_actions).await;

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

struct DashboardUi {
    dashboard: Dashboard,
}

impl DashboardUi {
    fn new() -> Self {
        Self {
            dashboard: Dashboard::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<DashboardComponentId>,
    ) {
        event_ctx.set_component_area(DashboardComponentId::Dashboard, area);

        let props = DashboardProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.dashboard.render(frame, area, props);
    }

    fn handle_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = DashboardProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .dashboard
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
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    client: DashboardClient,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(DashboardUi::new()));
    let mut bus: EventBus<AppState, Action, DashboardComponentId, DashboardContext> =
        EventBus::new();
    let keybindings: Keybindings<DashboardContext> = Keybindings::new();

    // Keys go to the focused dashboard
    let ui_keys = Rc::clone(&ui);
    bus.register(DashboardComponentId::Dashboard, move |event, state| match event.kind {
        EventKind::Key(_) => ui_keys.borrow_mut().handle_event(&event.kind, state),
        _ => HandlerResponse::ignored(),
    });

    // Clicks are hit-tested against the last rendered layout wherever they land,
    // so a click anywhere outside the input and dropdown closes the dropdown.
    let ui_mouse = Rc::clone(&ui);
    bus.register_global(move |event, state| match event.kind {
        EventKind::Mouse(_) => ui_mouse.borrow_mut().handle_event(&event.kind, state),
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    let client = Arc::new(client);
    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::SearchSubmit),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(LOADING_ANIM_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, Arc::clone(&client)),
        )
        .await
}

/// Handle effects by spawning keyed tasks; a new request replaces the one
/// still in flight under the same key.
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, client: Arc<DashboardClient>) {
    match effect {
        Effect::FetchSuggestions { seq, query } => {
            ctx.tasks().spawn(TaskKey::new("suggestions"), async move {
                flows::suggestions(&client, seq, query).await
            });
        }
        Effect::FetchWeather { seq, city } => {
            ctx.tasks().spawn(TaskKey::new("weather"), async move {
                flows::weather(&client, seq, city).await
            });
        }
    }
}
