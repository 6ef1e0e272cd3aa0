//! `bazaar-app coupon ...`

use clap::{Args, Subcommand};

mod create;
mod list;

/// Coupon administration
#[derive(Debug, Args)]
pub(crate) struct CouponCommand {
    #[command(subcommand)]
    action: CouponAction,
}

#[derive(Debug, Subcommand)]
enum CouponAction {
    /// Create a percentage coupon
    Create(create::CreateCouponArgs),

    /// Print every coupon with its usage
    List(list::ListCouponsArgs),
}

pub(crate) async fn run(command: CouponCommand) -> Result<(), String> {
    match command.action {
        CouponAction::Create(args) => create::run(args).await,
        CouponAction::List(args) => list::run(args).await,
    }
}
