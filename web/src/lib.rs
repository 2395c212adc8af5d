use clap::Parser;
use wasm_bindgen::prelude::*;

mod desk;
mod minesweeper;
mod snake;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let (args, arg_error) = match Args::try_parse_from(location_hash.split(['#', '&'])) {
        Ok(args) => (args, None),
        Err(err) => (Args::parse_from([env!("CARGO_PKG_NAME")]), Some(err)),
    };
    if let Some(log_level) = args.verbose.log_level() {
        if let Err(err) = console_log::init_with_level(log_level) {
            web_sys::console::error_1(&format!("Error initializing logger: {err}").into());
        }
    }
    if let Some(err) = arg_error {
        log::warn!("ignoring location hash arguments: {}", err);
    }
    log::debug!("seed: {:?}", args.seed);

    let Some(root) = document().get_element_by_id("desk") else {
        log::error!("Could not find id=\"desk\" element");
        return;
    };

    log::debug!("App started");
    yew::Renderer::<desk::Desk>::with_root_and_props(root, desk::DeskProps { seed: args.seed })
        .render();
}
