use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

pub enum UiEvent {
    Key(KeyEvent),
    /// Emitted whenever the poll interval passes without input. The
    /// countdown is advanced from these on the main loop.
    Tick,
    Resize,
}

/// Reads terminal input on a helper thread and hands it to the main loop,
/// which is the only place the quiz session is mutated.
pub struct EventHandler {
    rx: mpsc::Receiver<UiEvent>,
    _tx: mpsc::Sender<UiEvent>,
}

impl EventHandler {
    pub fn new(poll_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let _tx = tx.clone();

        thread::spawn(move || {
            loop {
                let forwarded = if event::poll(poll_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                            Some(UiEvent::Key(key))
                        }
                        Ok(Event::Resize(_, _)) => Some(UiEvent::Resize),
                        _ => None,
                    }
                } else {
                    Some(UiEvent::Tick)
                };
                if let Some(ev) = forwarded {
                    if tx.send(ev).is_err() {
                        return;
                    }
                }
            }
        });

        Self { rx, _tx }
    }

    pub fn next(&self) -> anyhow::Result<UiEvent> {
        Ok(self.rx.recv()?)
    }
}
