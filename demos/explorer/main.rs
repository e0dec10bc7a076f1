//! Walk through a catalog browsing session from the command line
//!
//! ```sh
//! RUST_LOG=catalog=debug cargo run --example explorer -- demos/explorer/config.yaml
//! ```

use catalog::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("🛒 Catalog Explorer\n");

    // Load configuration
    let config = match std::env::args().nth(1) {
        Some(path) => CatalogConfig::from_yaml_file(&path)?,
        None => CatalogConfig::default(),
    };

    let store = config.build_store(Utc::now());
    println!("📦 Generated {} products", store.len());
    println!("   Categories: {}", store.categories().join(", "));

    let api = Arc::new(CatalogApi::new(store, config.fetch_policy()));
    let session = CatalogSession::new(Arc::clone(&api), Location::parse("https://shop.example/products")?);
    let favorites = Favorites::load_with_key(config.open_storage()?, &config.favorites.storage_key);

    // Typing into the search box: only the last keystroke survives the debounce
    let debouncer = config.debouncer();
    let typed = ["he", "head", "headphones"];
    let settled = futures::future::join_all(typed.iter().map(|text| debouncer.settle(text.to_string()))).await;
    if let Some(query) = settled.into_iter().flatten().last() {
        session.update_filters(FilterUpdate::Search(Some(query)));
    }
    session.update_filters(FilterUpdate::InStock(Some(true)));
    session.update_filters(FilterUpdate::Sort(Some(SortMode::PriceAsc)));
    println!("\n🔗 {}", session.location().as_str());

    // Retry transient failures the way a "Try again" button would
    let mut attempts = 0;
    let products = loop {
        attempts += 1;
        session.refresh().await;
        match session.state() {
            LoadState::Loaded(outcome) => break outcome,
            LoadState::Failed(e) if e.is_retryable() && attempts < 3 => {
                println!("⚠️  {} (attempt {})", e, attempts);
            }
            LoadState::Failed(e) => return Err(e.into()),
            other => anyhow::bail!("unexpected state {:?}", other),
        }
    };

    match &products {
        QueryOutcome::NoMatches => println!("No products match these filters"),
        QueryOutcome::Matches(items) => {
            for product in items.iter().take(5) {
                println!(
                    "   {} {:<40} {} {:>10.2} ★{:.1}",
                    product.id, product.name, product.currency, product.price, product.rating
                );
            }
        }
    }

    // Favorite the two cheapest matches
    let mut events = favorites.subscribe();
    for product in products.items().iter().take(2) {
        favorites.toggle(&product.id);
    }
    while let Ok(envelope) = events.try_recv() {
        println!("❤️  {} {} ({} total)", envelope.event.action(), envelope.event.product_id(), envelope.event.count());
    }

    let saved = api.get_many(&favorites.ids()).await?;
    println!("\n⭐ Favorites:");
    for product in saved {
        println!("   {} {}", product.id, product.name);
    }

    Ok(())
}
