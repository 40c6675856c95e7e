//! IB Commerce demo application
//!
//! Usage:
//!   ib-demo                          open the module launcher
//!   ib-demo --module finance         start straight in the Finance walkthrough
//!   ib-demo --catalog modules.json   use a custom module catalog
//!   ib-demo --list                   print module keys and exit

use anyhow::Result;
use clap::Parser;
use gpui::{Application, WindowOptions};
use ib_demo::cli::{module_listing, Args};
use ib_demo::ui::demo::TryBeforeBuyDemo;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,demo_engine=info,ib_demo=info")),
        )
        .init();

    let args = Args::parse();
    let options = args.load()?;

    if args.list {
        print!("{}", module_listing(&options.catalog));
        return Ok(());
    }

    Application::new().run(move |cx| {
        cx.open_window(WindowOptions::default(), |_, cx| TryBeforeBuyDemo::new(cx, options))
            .ok();
    });
    Ok(())
}
