//! Customizing dictionary ordering with EncodeOptions.
//!
//! Run with: cargo run --example custom_options

use serde::Serialize;
use serde_hamster::{to_string_with_options, DictionaryOrder, EncodeOptions};
use std::error::Error;

#[derive(Debug, Serialize)]
struct Config {
    name: String,
    version: String,
    debug: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        name: "MyApp".to_string(),
        version: "1.0.0".to_string(),
        debug: true,
    };

    // Default ordering: characters appear in discovery order
    println!("Default (first seen):");
    let default = serde_hamster::to_string(&config)?;
    println!("{}\n", default);

    // Sorted ordering: canonical output independent of traversal order
    println!("Sorted:");
    let sorted_options = EncodeOptions::new().with_dictionary_order(DictionaryOrder::Sorted);
    let sorted = to_string_with_options(&config, &sorted_options)?;
    println!("{}\n", sorted);

    // Seeded shuffle: stable across runs for a given seed
    println!("Shuffled (seed 7):");
    let shuffled_options = EncodeOptions::shuffled(7);
    let first = to_string_with_options(&config, &shuffled_options)?;
    let second = to_string_with_options(&config, &shuffled_options)?;
    assert_eq!(first, second);
    println!("{}\n", first);

    // Unseeded shuffle: different dictionary every run, same decoded value
    println!("Shuffled (random):");
    let random_options = EncodeOptions::new()
        .with_dictionary_order(DictionaryOrder::Shuffled { seed: None });
    let random = to_string_with_options(&config, &random_options)?;
    println!("{}", random);

    Ok(())
}
