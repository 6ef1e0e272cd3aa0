use bazaar_app::{
    database::{self, Db},
    domain::coupons::{CouponsService, PgCouponsService},
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct ListCouponsArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: ListCouponsArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let coupons = PgCouponsService::new(Db::new(pool))
        .list_coupons()
        .await
        .map_err(|error| format!("failed to list coupons: {error}"))?;

    if coupons.is_empty() {
        println!("no coupons");
        return Ok(());
    }

    for coupon in coupons {
        let uses = coupon.max_uses.map_or_else(
            || format!("{}/unlimited", coupon.times_used),
            |max| format!("{}/{max}", coupon.times_used),
        );

        println!(
            "{}\t{}%\tmin {}\tuntil {}\tuses {uses}\t{}",
            coupon.code,
            coupon.percent_off,
            coupon.minimum_spend,
            coupon.valid_till,
            if coupon.active { "active" } else { "inactive" },
        );
    }

    Ok(())
}
