mod command;
mod profile;
mod tui;
mod ui;

fn main() -> anyhow::Result<()> {
    command::run()
}
