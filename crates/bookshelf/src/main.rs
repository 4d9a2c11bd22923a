//! Bookshelf - a walkthrough of the flux-store dispatch loop.
//!
//! Builds one store at the composition root, wires middleware and a
//! subscriber, then drives it through the three stages the library supports:
//! plain dispatch, a combined user/books reducer, and a deferred (thunk)
//! dispatch that lands after a timer.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use flux_store::{LoggingMiddleware, Store, ThunkMiddleware};

mod actions;
mod domain;
mod logger;
mod reducers;
mod state;

use actions::{add_book_by, add_book_later, set_name};
use reducers::app_reducer;
use state::AppState;

fn main() -> Result<()> {
    logger::init();

    log::info!("Starting bookshelf");

    let store = Store::builder(app_reducer)
        .middleware(LoggingMiddleware::new())
        .middleware(ThunkMiddleware::new())
        .build();

    let subscription = store.subscribe(|state: &AppState| {
        let user = state.user.name.as_deref().unwrap_or("nobody");
        println!("[{user}] shelf holds {} book(s)", state.books.len());
    });

    // Plain dispatches: each one is reducer + notification, synchronously.
    store.dispatch(set_name("Ada"))?;
    store.dispatch(add_book_by("Dune", "Frank Herbert"))?;
    store.dispatch(add_book_by("The Dispossessed", "Ursula K. Le Guin"))?;

    // Deferred dispatch: the thunk returns immediately, the book arrives
    // once the timer thread fires and the queue is pumped.
    let before = store.snapshot();
    store.dispatch(add_book_later("Permutation City", Duration::from_millis(150)))?;
    assert_eq!(store.snapshot(), before);
    println!("deferred add dispatched; shelf still holds {} book(s)", before.books.len());

    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        if store.pump()? > 0 {
            break;
        }
        if Instant::now() >= deadline {
            bail!("deferred dispatch never arrived");
        }
        thread::sleep(Duration::from_millis(10));
    }

    println!("final shelf:");
    for book in &store.state().books {
        println!("  - {book}");
    }

    subscription.unsubscribe();
    log::info!("Exiting bookshelf");
    Ok(())
}
