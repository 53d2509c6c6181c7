use anyhow::Result;

fn main() -> Result<()> {
    deskpilot::cli::run()
}
