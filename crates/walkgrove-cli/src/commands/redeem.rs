use clap::Subcommand;
use walkgrove_core::{GardenStatus, MockRedemptionProvider, RedemptionProvider, CAPACITY};

use super::open_service;

#[derive(Subcommand)]
pub enum RedeemAction {
    /// Create a planting order for the completed garden and follow it
    /// through fulfillment
    Order,
    /// Show redeemed gardens and their orders
    Status,
}

pub fn run(action: RedeemAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        RedeemAction::Order => {
            let mut service = open_service()?;
            if !service.garden().status.can_be_redeemed() {
                eprintln!("no completed garden to redeem");
                std::process::exit(1);
            }
            let garden_id = service.garden().id;

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            let mut provider = MockRedemptionProvider::new();

            let order = runtime.block_on(provider.create_order(garden_id, CAPACITY as u32))?;
            println!("{}", serde_json::to_string_pretty(&order)?);

            service.redeem_garden(&order.order_id)?;

            // Follow fulfillment until the trees are in the ground.
            loop {
                let status = runtime.block_on(provider.fetch_order_status(&order))?;
                println!("{}", serde_json::to_string(&status)?);
                if status.status.is_complete() {
                    break;
                }
            }

            if let Some(url) = runtime.block_on(provider.fetch_certificate(&order))? {
                println!("certificate: {url}");
            }
        }
        RedeemAction::Status => {
            let service = open_service()?;
            let redeemed: Vec<_> = service
                .db()
                .gardens()?
                .into_iter()
                .filter(|g| g.status == GardenStatus::Redeemed)
                .collect();
            println!("{}", serde_json::to_string_pretty(&redeemed)?);
        }
    }
    Ok(())
}
