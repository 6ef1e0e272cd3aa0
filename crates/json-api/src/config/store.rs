//! Store Config

use clap::Args;

/// Store-wide settings.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// IANA time zone whose calendar days govern coupon expiry and returns
    #[arg(long = "store-time-zone", env = "STORE_TIME_ZONE", default_value = "Asia/Kolkata")]
    pub time_zone: String,
}
