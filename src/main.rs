use std::process::exit;

use catalog_pager::app;
use catalog_pager::output::console;

fn main() {
    if let Err(e) = app::run_cli() {
        console::error(e);
        exit(1);
    }
}
