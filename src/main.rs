use anyhow::{Context, Result};
use std::env;
use tracing_subscriber::EnvFilter;

use park_atlas::{Atlas, AtlasConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let config = match args.get(1) {
        Some(path) => AtlasConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => AtlasConfig::default(),
    };
    tracing::info!(tie_break = ?config.tie_break, "park-atlas {}", park_atlas::VERSION);

    let atlas = Atlas::with_config(config);
    seed_sample(&atlas).context("Failed to seed sample atlas")?;

    if let Some(park) = atlas.most_visited() {
        tracing::info!(
            park = park.name(),
            visits = atlas.total_visits(park.id()),
            "most visited park"
        );
    }

    let report = atlas.report();
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

/// A handful of parks, visitors and trips to exercise every query
fn seed_sample(atlas: &Atlas) -> Result<()> {
    let ama = atlas.create_visitor("Ama")?;
    let kofi = atlas.create_visitor("Kofi")?;
    let lin = atlas.create_visitor("Lin")?;

    let yellowstone = atlas.create_park("Yellowstone")?;
    let yosemite = atlas.create_park("Yosemite")?;
    atlas.create_park("Acadia")?;

    let trips = [
        (&ama, &yellowstone, "2023-01-01", "2023-01-10"),
        (&ama, &yellowstone, "2023-06-01", "2023-06-04"),
        (&kofi, &yellowstone, "2023-03-15", "2023-03-20"),
        (&lin, &yosemite, "2023-08-01", "2023-08-09"),
    ];

    for (visitor, park, start, end) in trips {
        atlas.book_trip(visitor.id(), park.id(), start, end)?;
    }

    Ok(())
}
