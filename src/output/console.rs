use std::fmt::Display;

use colored::{ColoredString, Colorize};

fn tag(label: ColoredString) -> String {
    format!("{}{}{}", "[".bold().white(), label, "]".bold().white())
}

pub fn info(message: impl Display) {
    println!("{} {}", tag("INF".bold().blue()), message);
}

pub fn warn(message: impl Display) {
    println!("{} {}", tag("WRN".bold().yellow()), message);
}

pub fn error(message: impl Display) {
    eprintln!("{} {}", tag("ERR".bold().red()), message);
}

/// Only printed with `-v`.
pub fn debug(verbose: u8, message: impl Display) {
    if verbose > 0 {
        println!("{} {}", tag("DBG".bold().purple()), message);
    }
}

pub fn kv(label: &str, value: impl Display) {
    println!(":: {:<10}: {}", label, value);
}
