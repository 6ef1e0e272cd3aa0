use bazaar_app::{
    database::{self, Db},
    domain::coupons::{
        CouponsService, PgCouponsService,
        data::{CouponTerms, NewCoupon},
        records::CouponUuid,
    },
};
use clap::Args;
use jiff::civil::Date;

#[derive(Debug, Args)]
pub(crate) struct CreateCouponArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Code customers type at checkout, stored upper-case
    #[arg(long)]
    code: String,

    /// Whole-number percentage taken off the subtotal
    #[arg(long)]
    percent_off: u8,

    /// Minimum subtotal in paise
    #[arg(long, default_value_t = 0)]
    minimum_spend: u64,

    /// Last day the coupon can be used, as YYYY-MM-DD
    #[arg(long)]
    valid_till: Date,

    /// Total redemptions allowed; unlimited when omitted
    #[arg(long)]
    max_uses: Option<u32>,

    /// Create the coupon switched off
    #[arg(long)]
    inactive: bool,
}

pub(crate) async fn run(args: CreateCouponArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let coupons = PgCouponsService::new(Db::new(pool));

    let coupon = coupons
        .create_coupon(NewCoupon {
            uuid: CouponUuid::new(),
            code: args.code,
            terms: CouponTerms {
                percent_off: args.percent_off,
                active: !args.inactive,
                minimum_spend: args.minimum_spend,
                valid_till: args.valid_till,
                max_uses: args.max_uses,
            },
        })
        .await
        .map_err(|error| format!("failed to create coupon: {error}"))?;

    println!("coupon_uuid: {}", coupon.uuid);
    println!("code: {}", coupon.code);
    println!("percent_off: {}", coupon.percent_off);
    println!("valid_till: {}", coupon.valid_till);

    Ok(())
}
