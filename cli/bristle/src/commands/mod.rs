mod auth;
mod browse;
mod search;
mod top;

use anyhow::Result;
use bpaf::Bpaf;
use indoc::{formatdoc, indoc};

use crate::config::Config;
use crate::utils::init::init_catalog_client;
use crate::utils::message;

static BRISTLE_DESCRIPTION: &'_ str = indoc! {"
    Bristle is a command line storefront for the toothbrush catalog.

    Browse and search products, follow spelling suggestions, and keep an
    eye on what everyone else is shopping for."
};

fn vec_len<T>(x: Vec<T>) -> usize {
    Vec::len(&x)
}

#[derive(Bpaf, Clone, Copy, Debug)]
pub enum Verbosity {
    Verbose(
        /// Increase logging verbosity
        ///
        /// Invoke multiple times for increasing detail.
        #[bpaf(short('v'), long("verbose"), req_flag(()), many, map(vec_len))]
        usize,
    ),

    /// Silence logs except for errors
    #[bpaf(short, long)]
    Quiet,
}

impl Default for Verbosity {
    fn default() -> Self {
        Verbosity::Verbose(0)
    }
}

#[derive(Bpaf)]
#[bpaf(
    options,
    descr(BRISTLE_DESCRIPTION),
    version(env!("CARGO_PKG_VERSION")),
    footer("Run 'bristle browse' to start shopping.")
)]
pub struct BristleCli(#[bpaf(external(bristle_args))] pub BristleArgs);

#[derive(Debug, Bpaf)]
pub struct BristleArgs {
    #[bpaf(external, fallback(Default::default()))]
    pub verbosity: Verbosity,

    #[bpaf(external(commands), optional)]
    command: Option<Commands>,
}

impl BristleArgs {
    pub async fn handle(self, config: Config) -> Result<()> {
        // Given no command, print a welcome message instead
        let Some(command) = self.command else {
            print_welcome_message();
            return Ok(());
        };

        let client = init_catalog_client(&config)?;

        match command {
            Commands::Browse(args) => args.handle(client).await,
            Commands::Search(args) => args.handle(config, client).await,
            Commands::Top(args) => args.handle(client).await,
            Commands::Login(args) => args.handle(client).await,
            Commands::Register(args) => args.handle(client).await,
        }
    }
}

/// Print general welcome message with short usage instructions.
fn print_welcome_message() {
    let welcome_message = {
        let version = env!("CARGO_PKG_VERSION");
        formatdoc! {r#"
            bristle version {version}

            Usage: bristle OPTIONS (browse|search|top|login|register) [--help]

            Use 'bristle --help' for the full list of commands and more information
        "#}
    };

    message::plain(welcome_message);
}

#[derive(Bpaf, Clone, Debug)]
enum Commands {
    /// Browse the catalog interactively
    #[bpaf(command)]
    Browse(#[bpaf(external(browse::browse))] browse::Browse),

    /// Search the catalog and print a page of results
    #[bpaf(command)]
    Search(#[bpaf(external(search::search))] search::Search),

    /// Show the most searched-for terms
    #[bpaf(command)]
    Top(#[bpaf(external(top::top))] top::Top),

    /// Sign in to the store
    #[bpaf(command)]
    Login(#[bpaf(external(auth::login))] auth::Login),

    /// Create a store account
    #[bpaf(command)]
    Register(#[bpaf(external(auth::register))] auth::Register),
}
