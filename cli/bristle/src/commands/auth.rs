use anyhow::Result;
use bpaf::Bpaf;
use bristle_catalog::{Client, ClientTrait, LoginRequest, RegisterRequest};
use tracing::{debug, instrument};

use crate::utils::message;

/// Sign in to the store
#[derive(Debug, Bpaf, Clone)]
pub struct Login {
    /// The account name
    #[bpaf(positional("username"))]
    pub username: String,

    /// The account password
    #[bpaf(positional("password"))]
    pub password: String,
}

impl Login {
    #[instrument(name = "login", fields(username = self.username), skip_all)]
    pub async fn handle(self, client: Client) -> Result<()> {
        debug!("logging in as: {}", self.username);
        let outcome = client
            .login(&LoginRequest {
                username: self.username,
                password: self.password,
            })
            .await?;
        message::updated(format!(
            "{} (signed in as '{}')",
            outcome.message, outcome.username
        ));
        Ok(())
    }
}

/// Create a store account
#[derive(Debug, Bpaf, Clone)]
pub struct Register {
    /// Your given name
    #[bpaf(long("first-name"), argument("NAME"))]
    pub first_name: String,

    /// Your family name
    #[bpaf(long("last-name"), argument("NAME"))]
    pub last_name: String,

    /// Address for order confirmations
    #[bpaf(long, argument("EMAIL"))]
    pub email: String,

    /// The account name
    #[bpaf(positional("username"))]
    pub username: String,

    /// The account password
    #[bpaf(positional("password"))]
    pub password: String,
}

impl Register {
    #[instrument(name = "register", fields(username = self.username), skip_all)]
    pub async fn handle(self, client: Client) -> Result<()> {
        debug!("registering account: {}", self.username);
        let reply = client
            .register(&RegisterRequest {
                username: self.username,
                password: self.password,
                first_name: self.first_name,
                last_name: self.last_name,
                email: self.email,
            })
            .await?;
        message::updated(reply.message);
        Ok(())
    }
}
