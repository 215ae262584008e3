//! Working with Value for runtime flexibility.
//!
//! Run with: cargo run --example dynamic_values

use serde::Serialize;
use serde_hamster::{encode, hamster, to_value, Value};
use std::error::Error;

#[derive(Debug, Serialize)]
struct User {
    id: u32,
    name: String,
    roles: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Build config dynamically with the hamster! macro
    let config = hamster!({
        "host": "localhost",
        "port": 8080,
        "features": ["auth", "logging", "metrics"],
        "debug": true
    });

    println!("Config document:\n{}\n", encode(&config)?);

    // Access values dynamically
    if let Value::Object(obj) = &config {
        if let Some(host) = obj.get("host").and_then(Value::as_str) {
            println!("Accessing field 'host': {}", host);
        }

        if let Some(port) = obj.get("port").and_then(Value::as_u64) {
            println!("Accessing field 'port': {}", port);
        }

        if let Some(features) = obj.get("features").and_then(Value::as_array) {
            println!("Accessing field 'features': {} items\n", features.len());
        }
    }

    // Values JSON has no spelling for: big integers and bit arrays
    let mut metrics = serde_hamster::ObjectMap::new();
    metrics.insert(
        "total_supply".to_string(),
        Value::big_int_from_decimal("340282366920938463463374607431768211456")?,
    );
    metrics.insert(
        "flags".to_string(),
        Value::bits_from_bools(&[true, false, true, true]),
    );
    metrics.insert(
        "digest".to_string(),
        Value::bits_from_hex("deadbeef")?,
    );

    println!("Metrics document:\n{}\n", encode(&Value::Object(metrics))?);

    // Convert an existing struct to a Value
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        roles: vec!["admin".to_string(), "developer".to_string()],
    };

    let user_value = to_value(&user)?;
    println!("User document:\n{}\n", encode(&user_value)?);

    // Runtime type checking
    println!("Type checks:");
    println!("  is_object: {}", user_value.is_object());
    println!("  is_array:  {}", user_value.is_array());
    println!("  is_string: {}", user_value.is_string());

    Ok(())
}
