//! Basic hamster serialization.
//!
//! Run with: cargo run --example simple

use serde::Serialize;
use serde_hamster::{to_string, DELIMITER};
use std::error::Error;

#[derive(Debug, Serialize)]
struct User {
    id: u32,
    name: String,
    email: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let users = vec![
        User {
            id: 42,
            name: "Alice Johnson".to_string(),
            email: "alice@example.com".to_string(),
        },
        User {
            id: 43,
            name: "Bob Smith".to_string(),
            email: "bob@example.com".to_string(),
        },
    ];

    // Serialize to a hamster document
    let document = to_string(&users)?;
    println!("hamster output:\n{}\n", document);

    // Every document has three sections: format name, dictionary, payload
    let mut sections = document.split(DELIMITER);
    println!("format:     {}", sections.next().unwrap_or_default());
    println!("dictionary: {}", sections.next().unwrap_or_default());
    println!("payload:    {}", sections.next().unwrap_or_default());

    Ok(())
}
