use crossterm::event::{poll, Event, KeyCode, KeyEventKind};

use std::time::Duration;
use std::{
    sync::{
        self,
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver, Sender},
        Arc,
    },
    thread,
};

pub enum EventType {
    Key(KeyCode),
    Tick,
}

pub struct EventHandler {
    handle: Option<thread::JoinHandle<()>>,
    alive: sync::Arc<AtomicBool>,
    tx: Sender<EventType>,
    rx: Receiver<EventType>,
}

impl EventHandler {
    pub fn new() -> EventHandler {
        let (tx, rx) = mpsc::channel();

        EventHandler {
            handle: None,
            alive: Arc::new(AtomicBool::new(false)),
            tx,
            rx,
        }
    }

    pub fn get(&mut self) -> Option<EventType> {
        if let Ok(event) = self.rx.try_recv() {
            return Some(event);
        }
        None
    }

    pub fn start(&mut self) {
        self.alive.store(true, Ordering::SeqCst);
        let alive = self.alive.clone();
        let tx = self.tx.clone();

        self.handle = Some(thread::spawn(move || {
            while alive.load(Ordering::SeqCst) {
                if poll(Duration::from_millis(50)).unwrap_or(false) {
                    if let Ok(Event::Key(key)) = crossterm::event::read() {
                        if key.kind == KeyEventKind::Press {
                            let _ = match key.code {
                                KeyCode::Char('q') => tx.send(EventType::Key(key.code)),
                                KeyCode::Char(' ') => tx.send(EventType::Key(key.code)),
                                KeyCode::Esc => tx.send(EventType::Key(key.code)),
                                _ => Ok(()),
                            };
                        }
                    }
                }
                let _ = tx.send(EventType::Tick);
            }
        }));
    }

    pub fn stop(&mut self) {
        self.alive.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            handle.join().ok();
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        EventHandler::new()
    }
}
