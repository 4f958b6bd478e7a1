//! `fdshop filter`: run one live-edit-then-apply cycle over a listing page.

use std::path::PathBuf;

use clap::Args;
use fdshop_core::{AppConfig, FilterField};
use fdshop_core::SetsRange;
use fdshop_filter::{EngineOptions, FilterEngine, RangeSlider};

use crate::products::{load_products, PageKind};

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Listing page HTML file
    pub page: PathBuf,
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub region: Vec<String>,
    #[arg(long)]
    pub brand: Vec<String>,
    #[arg(long)]
    pub card_type: Vec<String>,
    #[arg(long)]
    pub interface_type: Vec<String>,
    /// Online, Offline or "Online PIN"
    #[arg(long)]
    pub mode: Vec<String>,
    #[arg(long)]
    pub test_focus: Vec<String>,
    /// Typed into the slider's minimum field
    #[arg(long)]
    pub sets_min: Option<String>,
    /// Typed into the slider's maximum field
    #[arg(long)]
    pub sets_max: Option<String>,
    /// Slider lower bound (`fs-rangeslider-min`), default 0
    #[arg(long)]
    pub slider_min: Option<String>,
    /// Slider upper bound (`fs-rangeslider-max`), default 100
    #[arg(long)]
    pub slider_max: Option<String>,
    /// Print option lists with per-option counts instead of results
    #[arg(long)]
    pub options: bool,
    #[arg(long)]
    pub base_url: Option<String>,
    #[arg(long)]
    pub json: bool,
}

impl FilterArgs {
    fn checked(&self) -> [(FilterField, &[String]); 6] {
        [
            (FilterField::Region, self.region.as_slice()),
            (FilterField::Brand, self.brand.as_slice()),
            (FilterField::CardType, self.card_type.as_slice()),
            (FilterField::InterfaceType, self.interface_type.as_slice()),
            (FilterField::Modes, self.mode.as_slice()),
            (FilterField::TestFocus, self.test_focus.as_slice()),
        ]
    }

    /// Types the range flags into the slider; `None` when neither is set.
    pub(crate) fn slider_range(&self) -> Option<SetsRange> {
        let mut slider =
            RangeSlider::from_attrs(self.slider_min.as_deref(), self.slider_max.as_deref());
        let mut committed = None;
        if let Some(text) = &self.sets_min {
            committed = Some(slider.set_min_text(text));
        }
        if let Some(text) = &self.sets_max {
            committed = Some(slider.set_max_text(text));
        }
        committed
    }
}

pub(crate) fn run_filter(config: &AppConfig, args: &FilterArgs) -> anyhow::Result<()> {
    let products = load_products(&args.page, PageKind::Listing, args.base_url.as_deref())?;
    let options = EngineOptions {
        interface_type_matching: config.interface_type_matching,
    };
    let Some(engine) = FilterEngine::init(products, options) else {
        println!("no products to filter");
        return Ok(());
    };

    if args.options {
        print_options(&engine);
        return Ok(());
    }

    for (field, values) in args.checked() {
        for value in values {
            engine.toggle(field, value, true);
        }
    }
    if let Some(query) = &args.search {
        engine.set_search(query);
    }
    if let Some(range) = args.slider_range() {
        engine.set_sets_range(range.min, range.max);
    }
    tracing::debug!(candidates = engine.candidate_count(), "selections staged");

    let layout = engine.apply_filters();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    let products = engine.products();
    for id in &layout.order {
        if let Some(p) = products.iter().find(|p| p.id == *id) {
            let marker = if p.always_visible { "*" } else { " " };
            println!("{marker} {:<4}{:<36}{:>12}", p.id, p.name, p.price);
        }
    }
    println!(
        "showing {} of {} items",
        layout.results_count, layout.items_count
    );
    Ok(())
}

fn print_options(engine: &FilterEngine) {
    let counts = engine.individual_counts();
    for field in FilterField::ALL {
        let values = counts.field(field);
        if values.is_empty() {
            continue;
        }
        println!("{field}:");
        for (value, n) in values {
            println!("  {value:<36}{n:>5}");
        }
    }
    let range = engine.live().sets_num;
    println!("sets-num: {}..={}", range.min, range.max);
}
