use afterimage_engine::{Grid, SessionConfig};

use crate::{
    command::play::app::PlayApp,
    profile::{FileProfileStore, ProfileStore as _},
    tui::Tui,
};

mod app;
mod screen;

/// Logical engine ticks per second. Coarse enough to idle cheaply, fine
/// enough that the pre-reveal delay lands between frames.
const TICKS_PER_SEC: u64 = 10;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Grid width in cells
    #[clap(long, default_value_t = 8)]
    width: u8,
    /// Grid height in cells
    #[clap(long, default_value_t = 8)]
    height: u8,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let store = FileProfileStore::new();
    let profile = store.load();
    let config = SessionConfig {
        grid: Grid::new(arg.width, arg.height),
        ticks_per_sec: TICKS_PER_SEC,
        highest_level: profile.highest_level,
        ..SessionConfig::default()
    };

    let mut app = PlayApp::new(config, profile, store);
    #[expect(clippy::cast_precision_loss)]
    let tui = Tui::new(TICKS_PER_SEC as f64);
    tui.run(&mut app)
}
