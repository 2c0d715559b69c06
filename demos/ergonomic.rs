use nodeuid::layout::{COUNTER_BITS, NODE_ID_SHIFT, TIMESTAMP_SHIFT};
use nodeuid::{GeneratorConfig, IdGenerator};

fn main() -> nodeuid::Result<()> {
    // Node id straight from the deployment
    let generator = IdGenerator::with_node_id(42)?;
    let id1 = generator.next_id()?;
    let id2 = generator.next_id()?;

    println!("Generated IDs: {}, {}", id1, id2);

    // The layout is public, so decoding is plain shifting
    let timestamp = id1 >> TIMESTAMP_SHIFT;
    let node_id = (id1 >> NODE_ID_SHIFT) & 0x1FFF;
    let counter = id1 & ((1 << COUNTER_BITS) - 1);
    println!(
        "ID {} -> timestamp: {}, node: {}, counter: {}",
        id1, timestamp, node_id, counter
    );

    // Same thing, configured from TOML
    let config = GeneratorConfig::from_toml_str(
        r#"
        node_id = 7
        epoch_millis = 1704067200000

        [regression]
        policy = "reject"
        "#,
    )?;
    let configured = IdGenerator::from_config(&config)?;
    println!("Configured generator: {}", configured.next_id()?);

    Ok(())
}
