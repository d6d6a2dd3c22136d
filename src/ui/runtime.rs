use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use anyhow::{Result, anyhow};
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tracing::info;
use usersearch_api::SearchBackend;

use super::App;
use super::config::UiConfig;
use super::state::SearchOutcome;

/// Construct an [`App`] for `backend` and run it until the user quits.
pub fn run(backend: Arc<dyn SearchBackend>, config: UiConfig) -> Result<SearchOutcome> {
    let mut app = App::new(backend, config);
    app.run()
}

impl App<'_> {
    /// Pump the terminal event loop until the user exits.
    pub fn run(&mut self) -> Result<SearchOutcome> {
        let mut terminal = ratatui::init();
        terminal.clear()?;

        self.start();

        let (event_tx, event_rx) = mpsc::channel();
        let event_loop_running = Arc::new(AtomicBool::new(true));
        let event_loop_flag = Arc::clone(&event_loop_running);

        let event_thread = thread::spawn(move || -> Result<()> {
            while event_loop_flag.load(Ordering::Relaxed) {
                if event::poll(Duration::from_millis(50))? {
                    let event = event::read()?;
                    if event_tx.send(event).is_err() {
                        break;
                    }
                }
            }
            Ok(())
        });

        let mut pending_events = VecDeque::new();

        let result: Result<SearchOutcome> = 'event_loop: loop {
            self.pump_responses();
            if self.is_searching() {
                self.throbber_state.calc_next();
            }

            loop {
                match event_rx.try_recv() {
                    Ok(Event::Resize(_, _)) => {}
                    Ok(event) => pending_events.push_back(event),
                    Err(mpsc::TryRecvError::Empty) => break,
                    Err(mpsc::TryRecvError::Disconnected) => {
                        break 'event_loop Err(anyhow!("input event channel disconnected"));
                    }
                }
            }

            if let Err(err) = terminal.draw(|frame| self.draw(frame)) {
                break Err(err.into());
            }

            let mut maybe_outcome = None;
            while let Some(event) = pending_events.pop_front() {
                if let Event::Key(key) = event
                    && key.kind == KeyEventKind::Press
                    && let Some(outcome) = self.handle_key(key)
                {
                    maybe_outcome = Some(outcome);
                    break;
                }
            }

            if let Some(outcome) = maybe_outcome {
                break Ok(outcome);
            }

            thread::sleep(Duration::from_millis(16));
        };

        ratatui::restore();

        event_loop_running.store(false, Ordering::Relaxed);
        match event_thread.join() {
            Ok(join_result) => join_result?,
            Err(err) => std::panic::resume_unwind(err),
        }

        if let Ok(outcome) = &result {
            info!(
                query = %outcome.query,
                page = outcome.current_page,
                total = outcome.total_results,
                "session closed"
            );
        }
        result
    }

    /// Issue the configured start-up search, if any.
    pub(crate) fn start(&mut self) {
        if self.config.search_on_start {
            self.perform_search(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::testing::StaticBackend;
    use crate::ui::UiConfig;
    use crate::ui::state::tests::{app_with, wait_for_idle};

    #[test]
    fn start_searches_first_page_when_configured() {
        let backend = Arc::new(StaticBackend::with_users(4));
        let config = UiConfig {
            initial_query: "user".into(),
            search_on_start: true,
            ..UiConfig::default()
        };
        let mut app = app_with(backend.clone(), config);

        app.start();
        wait_for_idle(&mut app);

        assert_eq!(app.results().row_count(), 4);
        let searches = backend.searches.lock().unwrap();
        assert_eq!(searches.len(), 1);
        assert_eq!(searches[0].query, "user");
        assert_eq!(searches[0].page, 1);
    }

    #[test]
    fn start_is_idle_by_default() {
        let backend = Arc::new(StaticBackend::with_users(4));
        let mut app = app_with(backend.clone(), UiConfig::default());

        app.start();

        assert!(!app.is_searching());
        assert!(backend.searches.lock().unwrap().is_empty());
    }
}
