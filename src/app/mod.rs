mod hud;
mod input;
mod render;
mod state;
mod step;
mod watchers;

pub use state::{App, AppOptions};
