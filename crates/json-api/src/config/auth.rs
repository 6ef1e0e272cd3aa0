//! Auth Config

use clap::Args;

/// `OpenBao` settings used to derive password and token verifiers.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// `OpenBao` server address
    #[arg(long = "openbao-addr", env = "OPENBAO_ADDR")]
    pub addr: String,

    /// `OpenBao` authentication token
    #[arg(long = "openbao-token", env = "OPENBAO_TOKEN", hide_env_values = true)]
    pub token: String,

    /// `OpenBao` Transit key name
    #[arg(long = "openbao-transit-key", env = "OPENBAO_TRANSIT_KEY")]
    pub transit_key: String,
}

/// HTTP Basic credentials for the `/admin` routes.
#[derive(Debug, Args)]
pub struct AdminConfig {
    /// Back-office username
    #[arg(long, env = "ADMIN_USERNAME")]
    pub admin_username: String,

    /// Back-office password
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: String,
}
