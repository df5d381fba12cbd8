/// Market Pulse: interactive terminal dashboard
///
/// Price correlation heatmap, headline sentiment and portfolio VaR, rerun every
/// time the configuration panel is committed.
use std::{
    error::Error,
    io,
    sync::Arc,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use pulse_dashboard::{
    ControlAction, Controls, DashboardConfig, DashboardState, Sources, init_file_logging,
    log_file_path, render_ui, spawn_render,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::Mutex;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_file_logging(&log_file_path())?;

    let config = DashboardConfig::from_env();
    let sources = Sources::from_config(&config)?;
    info!("Starting market-pulse with {:?}", config.inputs);

    // Setup panic hook to restore terminal on crash
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, config, sources).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: DashboardConfig,
    sources: Sources,
) -> Result<(), Box<dyn Error>> {
    let state = Arc::new(Mutex::new(DashboardState::new()));
    let mut controls = Controls::new(config.inputs);

    spawn_render(
        Arc::clone(&state),
        sources.clone(),
        controls.committed().clone(),
    )
    .await;

    let tick_rate = config.tick_rate;
    let mut last_tick = Instant::now();
    let mut redraw = true;

    loop {
        if redraw || last_tick.elapsed() >= tick_rate {
            let view = state.lock().await.view();
            terminal.draw(|f| render_ui(f, &controls, &view))?;
            last_tick = Instant::now();
            redraw = false;
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        let mut action = ControlAction::None;
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                action = controls.handle_key(key, Instant::now());
                // Echo keystrokes without waiting for the next tick
                redraw = true;
            }
        }
        if action == ControlAction::None {
            action = controls.poll_debounce(Instant::now());
        }

        match action {
            ControlAction::Quit => break,
            ControlAction::Commit | ControlAction::Rerun => {
                info!("Rerun with {:?}", controls.committed());
                spawn_render(
                    Arc::clone(&state),
                    sources.clone(),
                    controls.committed().clone(),
                )
                .await;
            }
            ControlAction::None | ControlAction::Edited => {}
        }
    }

    Ok(())
}
