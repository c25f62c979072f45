//! Decomposes a buried solid foundation with fill and ratchetting and
//! prints the parameter report and the polygon table.
//!
//! ```text
//! cargo run --example decompose
//! RUST_LOG=foundation_section=debug cargo run --example decompose
//! ```

use foundation_section::{
    FillConfig, FillLayers, FoundationConfig, GeometryAssembly, LayerFamily, SectionError,
};

fn main() -> Result<(), SectionError> {
    // Default: WARN for everything, INFO for this crate.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("foundation_section=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = FoundationConfig::solid(2.0, 1.5, 0.4, 0.5)
        .with_fill(FillConfig::new(30.0).with_layers(FillLayers::Count(2)))
        .with_ratchetting(0.3)
        .with_strata(vec![1.0, 2.0, 4.0])
        .with_water_table(1.0);
    let assembly = GeometryAssembly::build(&config)?;
    println!("{assembly}\n");

    for (index, polygon) in assembly.polygons().iter().enumerate() {
        let family = assembly.family(index).map_or("?", |f| f.as_str());
        let centroid = polygon.centroid();
        println!(
            "{index:>3}  {family:<12} area = {:>8.4}  centroid = ({:.3}, {:.3})  vertices = {}",
            polygon.area(),
            centroid.x,
            centroid.y,
            polygon.vertices().len()
        );
    }

    for family in [
        LayerFamily::Strata,
        LayerFamily::Fill,
        LayerFamily::Excavation,
        LayerFamily::Ratchetting,
    ] {
        if let Some(map) = assembly.layer_map(family) {
            println!("{family:?}: {:?}", map.iter().collect::<Vec<_>>());
        }
    }
    Ok(())
}
