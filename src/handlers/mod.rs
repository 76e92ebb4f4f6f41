//! Event Handlers
//!
//! - keyboard: User keyboard input
//!
//! Fetch results and timer firings need no handler of their own: they arrive
//! as `Msg`s and go straight through `App::dispatch`.

pub mod keyboard;
