//! A header and a page sharing one counter through bindings.
//!
//! Run with `RUST_LOG=tally=debug` to see dispatch and subscription logs.

use tally::{Binding, ReentrancyPolicy, Store, StoreConfig};
use tracing_subscriber::EnvFilter;

fn milestone(value: u64) -> Option<String> {
    (value != 0 && value % 10 == 0).then(|| format!("{value} clicks, nice!"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Shared Counter ===\n");

    let store = Store::with_config(
        StoreConfig::default()
            .with_initial(0)
            .with_reentrancy(ReentrancyPolicy::Reject),
    );

    let header = Binding::attach(&store, |value| {
        println!("   [Header] count: {value}");
    });
    let page = Binding::attach(&store, |value| {
        println!("   [Page]   count: {value}");
        if let Some(message) = milestone(value) {
            println!("   [Page]   {message}");
        }
    });

    println!("1. Decrementing at zero (clamped)");
    page.decrement()?;

    println!("\n2. Incrementing from the page");
    for _ in 0..3 {
        page.increment()?;
    }

    println!("\n3. Incrementing from the header");
    for _ in 0..7 {
        header.increment()?;
    }

    println!("\n4. Unmounting the page");
    page.detach();
    header.decrement()?;

    println!("\nFinal value: {}", header.value());
    Ok(())
}
