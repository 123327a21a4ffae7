//! Terminal rendering of the product table and the pagination row.

use colored::Colorize;
use itertools::Itertools;

use crate::catalog::Product;
use crate::pagination::Paginator;

pub const HEADING: &str = "Products Ordered By Descending Popularity";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRow {
    /// One-based position in the whole sorted catalog.
    pub position: usize,
    pub title: String,
    pub price: String,
}

pub fn table_rows(pager: &Paginator<Product>) -> Vec<TableRow> {
    let offset = pager.first_index();
    pager
        .visible_slice()
        .iter()
        .enumerate()
        .map(|(i, p)| TableRow {
            position: offset + i + 1,
            title: p.title.clone(),
            price: p.price_label(),
        })
        .collect()
}

fn pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    let mut out = value.to_string();
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(len)));
    out
}

pub fn render_table(rows: &[TableRow]) -> String {
    let positions: Vec<String> = rows.iter().map(|r| r.position.to_string()).collect();
    let pos_w = positions
        .iter()
        .map(|p| p.chars().count())
        .chain(std::iter::once(1))
        .max()
        .unwrap_or(1);
    let title_w = rows
        .iter()
        .map(|r| r.title.chars().count())
        .chain(std::iter::once("Title".len()))
        .max()
        .unwrap_or(0);
    let price_w = rows
        .iter()
        .map(|r| r.price.chars().count())
        .chain(std::iter::once("Price".len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!(
        " {} | {} | {}\n",
        pad("#", pos_w).bold().white(),
        pad("Title", title_w).bold().white(),
        pad("Price", price_w).bold().white()
    ));
    out.push_str(&format!(
        "-{}-+-{}-+-{}-\n",
        "-".repeat(pos_w),
        "-".repeat(title_w),
        "-".repeat(price_w)
    ));
    for (row, position) in rows.iter().zip(positions.iter()) {
        out.push_str(&format!(
            " {} | {} | {}\n",
            pad(position, pos_w).cyan(),
            pad(&row.title, title_w),
            pad(&row.price, price_w).yellow()
        ));
    }
    out
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageButton {
    pub page: usize,
    pub active: bool,
}

/// State of the Prev / numbered / Next control row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Controls {
    pub prev_enabled: bool,
    pub buttons: Vec<PageButton>,
    pub next_enabled: bool,
}

pub fn controls<T>(pager: &Paginator<T>, max_buttons: usize) -> Controls {
    let current = pager.current_page();
    Controls {
        prev_enabled: pager.has_prev(),
        buttons: pager
            .visible_page_buttons(max_buttons)
            .into_iter()
            .map(|page| PageButton {
                page,
                active: page == current,
            })
            .collect(),
        next_enabled: pager.has_next(),
    }
}

pub fn render_controls(controls: &Controls) -> String {
    let nav = |label: &str, enabled: bool| {
        let text = format!("< {label} >");
        if enabled {
            text.bold().white().to_string()
        } else {
            text.dimmed().to_string()
        }
    };
    let numbers = controls
        .buttons
        .iter()
        .map(|b| {
            if b.active {
                format!("[{}]", b.page).bold().green().to_string()
            } else {
                format!(" {} ", b.page)
            }
        })
        .join(" ");
    format!(
        "{} {} {}",
        nav("Prev", controls.prev_enabled),
        numbers,
        nav("Next", controls.next_enabled)
    )
}

/// Heading, table, control row and a page summary line.
pub fn render_view(pager: &Paginator<Product>, max_buttons: usize) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&HEADING.bold().white().to_string());
    out.push_str("\n\n");
    out.push_str(&render_table(&table_rows(pager)));
    out.push('\n');
    out.push_str(&render_controls(&controls(pager, max_buttons)));
    out.push('\n');
    out.push_str(&format!(
        ":: Page {} of {} :: {} products\n",
        pager.current_page(),
        pager.total_pages(),
        pager.len()
    ));
    out
}
