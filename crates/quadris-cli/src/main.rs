mod command;
mod result;
mod ui;

fn main() -> anyhow::Result<()> {
    command::run()
}
