use gloo::timers::future::TimeoutFuture;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Configuration for idle request-number regeneration
#[derive(Clone, PartialEq)]
pub struct RequestNumberRefreshConfig {
    pub interval_ms: u32,
}

impl Default for RequestNumberRefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: 60_000, // regenerate once a minute while idle
        }
    }
}

/// Re-emit `regenerate` at a fixed interval while `pause_when` is false.
///
/// Long-idle sessions would otherwise keep a stale request number; once the
/// user starts editing (or a submit is in flight) the loop pauses, and the
/// cleanup flag stops a pending tick from firing after unmount.
#[hook]
pub fn use_request_number_refresh(
    config: RequestNumberRefreshConfig,
    regenerate: Callback<()>,
    pause_when: bool,
) {
    use_effect_with((config, pause_when), move |(config, paused)| {
        let cancelled = Rc::new(Cell::new(false));

        if !*paused {
            let interval_ms = config.interval_ms;
            let flag = cancelled.clone();
            spawn_local(async move {
                loop {
                    TimeoutFuture::new(interval_ms).await;
                    if flag.get() {
                        break;
                    }
                    regenerate.emit(());
                }
            });
        }

        move || cancelled.set(true)
    });
}
