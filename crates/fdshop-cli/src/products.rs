//! Reading product pages from disk.

use std::path::Path;

use anyhow::Context;
use fdshop_core::ProductRecord;
use fdshop_extract::{extract_detail, extract_listing, parse_base_url, Html, Url};

/// Which page layout an HTML file uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PageKind {
    Listing,
    Detail,
}

pub(crate) fn load_document(path: &Path) -> anyhow::Result<Html> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(Html::parse_document(&raw))
}

fn base_url(raw: Option<&str>) -> anyhow::Result<Option<Url>> {
    raw.map(parse_base_url).transpose().map_err(Into::into)
}

/// Extracts the products on a page: every container for a listing page,
/// the single product for a detail page.
pub(crate) fn load_products(
    path: &Path,
    kind: PageKind,
    base: Option<&str>,
) -> anyhow::Result<Vec<ProductRecord>> {
    let html = load_document(path)?;
    let base = base_url(base)?;
    let products = match kind {
        PageKind::Listing => extract_listing(&html, base.as_ref()),
        PageKind::Detail => vec![extract_detail(&html, base.as_ref())?],
    };
    tracing::info!(path = %path.display(), count = products.len(), "products loaded");
    Ok(products)
}

pub(crate) fn find_product<'a>(
    products: &'a [ProductRecord],
    name: &str,
) -> anyhow::Result<&'a ProductRecord> {
    products
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| anyhow::anyhow!("no product named '{name}' on the page"))
}

pub(crate) fn run_products(
    path: &Path,
    kind: PageKind,
    base: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let products = load_products(path, kind, base)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&products)?);
        return Ok(());
    }
    if products.is_empty() {
        println!("no products found");
        return Ok(());
    }

    println!("{:<4}{:<36}{:>12}  {:<24}{:>6}  flags", "id", "name", "price", "brand", "sets");
    for p in &products {
        let mut flags = Vec::new();
        if p.pinned {
            flags.push("pinned");
        } else if p.always_visible {
            flags.push("excluded");
        }
        println!(
            "{:<4}{:<36}{:>12}  {:<24}{:>6}  {}",
            p.id,
            p.name,
            p.price,
            p.info.brand.join(", "),
            p.info.sets_num.map(|n| n.to_string()).unwrap_or_default(),
            flags.join(" "),
        );
    }
    Ok(())
}
