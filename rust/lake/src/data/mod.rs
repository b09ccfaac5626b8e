pub mod actions;
pub mod maps;
pub mod states;

pub use actions::{Action, ActionSet, ActionSetName, Direction, DOWN, LEFT, RIGHT, UP};
pub use maps::{Cell, Grid, MapName};
pub use states::{StateSet, StateSetName};

/// Episode cap used when a configuration does not name one.
pub const MAX_EPISODE_SIZE: usize = 100;
