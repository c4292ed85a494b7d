use clap::{Parser, Subcommand};

mod play;

use self::play::PlayArg;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play the memorization game (the default)
    Play(#[clap(flatten)] PlayArg),
    /// Print the persisted best level and exit
    Best,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Best => best(),
    }
    Ok(())
}

fn best() {
    use crate::profile::{FileProfileStore, ProfileStore as _};

    let profile = FileProfileStore::new().load();
    if profile.highest_level == 0 {
        println!("no games played yet");
    } else {
        println!("best level reached: {}", profile.highest_level);
    }
}
