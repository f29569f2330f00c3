use catalog_admin::infra::logging;
use catalog_admin::{AdminConfig, CatalogRemote, HttpCatalogClient};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--list-products]\n\
         \n\
         Reads env vars (all optional):\n\
           CATALOG_API_BASE_URL, ADMIN_BIND_ADDR, NOTICE_CAPACITY\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let list_products = args.iter().any(|a| a == "--list-products");

    // Force-read config (nice error messages if something is malformed)
    let config = AdminConfig::from_env()?;

    println!("> Preflight:");
    println!("  CATALOG_API_BASE_URL={}", config.api_base_url);
    println!("  ADMIN_BIND_ADDR={}", config.bind_addr);
    println!("  NOTICE_CAPACITY={}", config.notice_capacity);

    let client = HttpCatalogClient::new(config.api_base_url.clone());

    // Basic connectivity: the category set is the smallest resource.
    let categories = client
        .categories()
        .await
        .map_err(|e| anyhow::anyhow!("Remote catalog unreachable: {}", e))?;
    println!("  Categories ({}): {}", categories.len(), categories.join(", "));

    if list_products {
        let products = client
            .list()
            .await
            .map_err(|e| anyhow::anyhow!("Product listing failed: {}", e))?;
        println!("  Products: {}", products.len());
        for p in products.iter().take(10) {
            println!("    #{:<4} {:<10.2} [{}] {}", p.id, p.price, p.category, p.title);
        }
    }

    println!("> Preflight OK.");
    Ok(())
}
