//! `storedesk`: command-line access to the sales entry workflow.
//!
//! ```text
//! storedesk products [term]             list (or search) sellable products
//! storedesk sales                       list recorded sales, newest first
//! storedesk sell <seller> <id=qty>...   record a sale
//! ```

use anyhow::{Context, bail};

use storedesk_client::{ApiConfig, FormCommand, FormOutcome, HttpSalesApi, SalesEntrySession};
use storedesk_core::ProductId;
use storedesk_sales::DraftCommand;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storedesk_observability::init();

    let config = ApiConfig::from_env().context("invalid API configuration")?;
    let api = HttpSalesApi::new(config).context("failed to build HTTP client")?;
    let mut session = SalesEntrySession::new(api);

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("products") => {
            session.refresh_catalog().await.context("loading catalog")?;
            let term = args.get(1).map(String::as_str).unwrap_or("");
            for product in session.catalog().search(term) {
                let stock = product
                    .stock
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("{}\t{}\tstock {}", product.id, product.label(), stock);
            }
        }
        Some("sales") => {
            session.refresh_sales().await.context("loading sales")?;
            for row in session.sales() {
                println!(
                    "{}\t{}\t{}\t{}",
                    row.id,
                    row.timestamp.format("%d/%m/%Y %H:%M:%S"),
                    row.seller_name,
                    row.total
                );
            }
        }
        Some("sell") => {
            let Some(seller) = args.get(1) else {
                bail!("usage: storedesk sell <seller> <product_id=quantity>...");
            };
            sell(&mut session, seller, &args[2..]).await?;
        }
        Some(other) => bail!("unknown command {other:?}; expected `products`, `sales` or `sell`"),
    }

    Ok(())
}

async fn sell(
    session: &mut SalesEntrySession<HttpSalesApi>,
    seller: &str,
    lines: &[String],
) -> anyhow::Result<()> {
    session.refresh_catalog().await.context("loading catalog")?;
    session.dispatch(FormCommand::Open).await?;
    session
        .dispatch(FormCommand::Edit(DraftCommand::SetSellerName { name: seller.to_string() }))
        .await?;

    for (index, spec) in lines.iter().enumerate() {
        let Some((id, qty)) = spec.split_once('=') else {
            bail!("expected <product_id=quantity>, got {spec:?}");
        };
        let product_id: ProductId = id.parse().with_context(|| format!("line {}", index + 1))?;
        if session.catalog().get(&product_id).is_none() {
            bail!("unknown product {product_id}");
        }
        for cmd in [
            DraftCommand::AddLine,
            DraftCommand::SelectProduct { index, product_id },
            DraftCommand::SetQuantityInput { index, input: qty.to_string() },
        ] {
            session.dispatch(FormCommand::Edit(cmd)).await?;
        }
    }

    if let Some(draft) = session.draft() {
        for shortfall in draft.stock_shortfalls() {
            eprintln!(
                "warning: {} requested {} but only {} in stock",
                shortfall.product_id, shortfall.requested, shortfall.available
            );
        }
        println!("total: {}", draft.total());
    }

    match session.dispatch(FormCommand::Submit).await? {
        FormOutcome::Submitted(receipt) => match receipt.id {
            Some(id) => println!("recorded sale {id}"),
            None => println!("sale recorded"),
        },
        other => bail!("unexpected outcome {other:?}"),
    }
    Ok(())
}
