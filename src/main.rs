use std::io::stdout;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::KeyCode;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{self, ClearType},
};

use phantomswarm::config::Config;
use phantomswarm::eventhandler::{EventHandler, EventType};
use phantomswarm::mem::{self, TrackingAllocator};
use phantomswarm::radio::DryRunRadio;
use phantomswarm::scheduler::SwarmRuntime;
use phantomswarm::status::{MessageType, StatusMessage};
use phantomswarm::ui;

#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator;

const UI_INTERVAL: Duration = Duration::from_secs(2);

fn main() -> Result<()> {
    let config = Config::default();
    let heap_budget = config.heap_budget;

    // A fixed seed via the environment reproduces an entire run.
    let seed: u64 = std::env::var("PHANTOMSWARM_SEED")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or_else(rand::random);

    // Hardware radio backends register themselves out of tree; the stock
    // binary drives the software backend for soak runs and development.
    let radio = Box::new(DryRunRadio::new());

    let mut runtime = SwarmRuntime::new(config, radio, seed, false);
    runtime.status_log.add_message(StatusMessage::new(
        MessageType::Info,
        format!("PRNG seed {seed}"),
    ));
    runtime.start(move || mem::free_heap(heap_budget));

    terminal::enable_raw_mode()?;
    execute!(stdout(), Hide, terminal::Clear(ClearType::All))?;

    let mut events = EventHandler::new();
    events.start();

    let start_time = Instant::now();
    ui::print_dashboard(&runtime, start_time, mem::free_heap(heap_budget));
    let mut last_ui = Instant::now();
    let mut running = true;

    while running {
        runtime.run_iteration(mem::free_heap(heap_budget));

        while let Some(event) = events.get() {
            match event {
                EventType::Key(KeyCode::Char('q')) | EventType::Key(KeyCode::Esc) => {
                    running = false;
                }
                EventType::Key(KeyCode::Char(' ')) => {
                    runtime.paused = !runtime.paused;
                }
                _ => {}
            }
        }

        if last_ui.elapsed() >= UI_INTERVAL {
            last_ui = Instant::now();
            ui::print_dashboard(&runtime, start_time, mem::free_heap(heap_budget));
        }

        thread::sleep(Duration::from_millis(5));
    }

    events.stop();
    execute!(stdout(), Show)?;
    terminal::disable_raw_mode()?;
    println!();

    Ok(())
}
