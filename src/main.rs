use anyhow::{Context, Result};
use clap::Parser;
use winit::event_loop::EventLoop;

use keyflow::cli::CliArgs;
use keyflow::Input;

mod demo;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    keyflow::tracing::init();

    let config = args.load_config().context("Failed to load input config")?;
    tracing::debug!(?config, fps = args.frame_rate(), "starting demo");

    let input = Input::new(config);
    let mut app = demo::App::new(input, args.frame_rate())?;

    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut app)?;

    Ok(())
}
