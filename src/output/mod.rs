pub mod console;
pub mod table;

use serde::Serialize;

use crate::catalog::Product;
use crate::pagination::Paginator;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" | "table" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct RankedProduct<'a> {
    pub rank: usize,
    #[serde(flatten)]
    pub product: &'a Product,
}

/// One page of the sorted catalog, as printed by batch mode.
#[derive(Clone, Debug, Serialize)]
pub struct PageReport<'a> {
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub total_products: usize,
    pub products: Vec<RankedProduct<'a>>,
}

pub fn build_report(pager: &Paginator<Product>) -> PageReport<'_> {
    let offset = pager.first_index();
    PageReport {
        page: pager.current_page(),
        total_pages: pager.total_pages(),
        page_size: pager.page_size(),
        total_products: pager.len(),
        products: pager
            .visible_slice()
            .iter()
            .enumerate()
            .map(|(i, product)| RankedProduct {
                rank: offset + i + 1,
                product,
            })
            .collect(),
    }
}

/// Tab-separated `#`, title, price; one product per line.
pub fn render_text(report: &PageReport<'_>) -> Vec<u8> {
    let mut out = String::new();
    for r in &report.products {
        out.push_str(&format!(
            "{}\t{}\t{}\n",
            r.rank,
            r.product.title,
            r.product.price_label()
        ));
    }
    out.into_bytes()
}

pub fn render_json(report: &PageReport<'_>) -> Vec<u8> {
    let mut out = serde_json::to_vec_pretty(report).unwrap_or_else(|_| b"{}".to_vec());
    out.push(b'\n');
    out
}

pub fn render(format: OutputFormat, report: &PageReport<'_>) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_text(report),
        OutputFormat::Json => render_json(report),
    }
}
