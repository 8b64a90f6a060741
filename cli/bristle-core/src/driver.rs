//! Executes session commands against a catalog client.
//!
//! [`SessionDriver`] spawns one task per asynchronous [`Command`] so that
//! slow responses never block newer ones, and funnels every
//! [`Completion`] back through a single channel for the caller to feed
//! into [`SearchSession::apply`](crate::session::SearchSession::apply).

use std::sync::Arc;

use bristle_catalog::{Client, ClientTrait};
use tokio::sync::mpsc;

use crate::session::{Command, Completion, SUGGESTION_HIDE_DELAY};

/// Effects the presentation layer applies itself, synchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEffect {
    ScrollToTop,
}

/// Spawns session commands and funnels their completions back through an
/// unbounded channel.
#[derive(Debug)]
pub struct SessionDriver {
    client: Arc<Client>,
    tx: mpsc::UnboundedSender<Completion>,
}

impl SessionDriver {
    pub fn new(client: Client) -> (Self, mpsc::UnboundedReceiver<Completion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let driver = Self {
            client: Arc::new(client),
            tx,
        };
        (driver, rx)
    }

    /// Spawn the asynchronous commands; anything the caller must handle
    /// in the presentation layer comes back as a [`UiEffect`].
    pub fn execute(&self, commands: Vec<Command>) -> Vec<UiEffect> {
        let mut effects = Vec::new();
        for command in commands {
            if command == Command::ScrollToTop {
                effects.push(UiEffect::ScrollToTop);
                continue;
            }
            let client = Arc::clone(&self.client);
            let tx = self.tx.clone();
            tokio::spawn(async move {
                if let Some(completion) = run_command(&client, command).await {
                    // A closed receiver means the session is over.
                    let _ = tx.send(completion);
                }
            });
        }
        effects
    }
}

async fn run_command(client: &Client, command: Command) -> Option<Completion> {
    let completion = match command {
        Command::FetchProducts { token, params } => Completion::ProductsLoaded {
            token,
            searched: params.query.clone(),
            outcome: client.fetch_products(&params).await,
        },
        Command::FetchSuggestions { token, prefix } => Completion::SuggestionsLoaded {
            token,
            outcome: client.autocomplete(prefix).await,
        },
        Command::FetchSpellcheck { word } => {
            let outcome = client.spellcheck(&word).await;
            Completion::SpellcheckLoaded { word, outcome }
        },
        Command::FetchTopSearches => Completion::TopSearchesLoaded {
            outcome: client.top_searches().await,
        },
        Command::FetchBrands => Completion::BrandsLoaded {
            outcome: client.brands().await,
        },
        Command::FetchTypes => Completion::TypesLoaded {
            outcome: client.toothbrush_types().await,
        },
        Command::ScheduleSuggestionsHide { token } => {
            tokio::time::sleep(SUGGESTION_HIDE_DELAY).await;
            Completion::SuggestionsHideElapsed { token }
        },
        Command::ScrollToTop => return None,
    };
    Some(completion)
}

#[cfg(test)]
mod tests {
    use bristle_catalog::{MockClient, ProductQuery, SpellcheckVerdict};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::session::SearchSession;

    #[tokio::test]
    async fn product_fetches_resolve_through_the_channel() {
        let mock = MockClient::default();
        mock.push_products_response(vec![]);
        let (driver, mut completions) = SessionDriver::new(Client::Mock(mock));

        let effects = driver.execute(vec![Command::FetchProducts {
            token: 7,
            params: ProductQuery {
                query: Some("sonic".to_string()),
                ..ProductQuery::default()
            },
        }]);
        assert_eq!(effects, vec![]);

        match completions.recv().await {
            Some(Completion::ProductsLoaded {
                token,
                searched,
                outcome,
            }) => {
                assert_eq!(token, 7);
                assert_eq!(searched.as_deref(), Some("sonic"));
                assert_eq!(outcome.unwrap(), vec![]);
            },
            other => panic!("unexpected completion: {other:?}"),
        }
    }

    #[tokio::test]
    async fn scroll_is_a_synchronous_effect() {
        let (driver, mut completions) = SessionDriver::new(Client::Mock(MockClient::default()));

        let effects = driver.execute(vec![Command::ScrollToTop]);
        assert_eq!(effects, vec![UiEffect::ScrollToTop]);
        assert!(completions.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn suggestion_hide_fires_after_the_delay() {
        let (driver, mut completions) = SessionDriver::new(Client::Mock(MockClient::default()));
        driver.execute(vec![Command::ScheduleSuggestionsHide { token: 3 }]);

        tokio::time::sleep(SUGGESTION_HIDE_DELAY).await;
        match completions.recv().await {
            Some(Completion::SuggestionsHideElapsed { token }) => assert_eq!(token, 3),
            other => panic!("unexpected completion: {other:?}"),
        }
    }

    #[tokio::test]
    async fn search_pipeline_drives_spellcheck_and_top_refresh() {
        let mock = MockClient::default();
        mock.push_products_response(vec![]);
        mock.push_spellcheck_response(SpellcheckVerdict {
            exists: false,
            suggestions: vec!["toothbrush".to_string()],
        });
        mock.push_top_searches_response(vec![]);
        let (driver, mut completions) = SessionDriver::new(Client::Mock(mock));

        let mut session = SearchSession::new();
        driver.execute(session.submit("toothbruush"));

        // The pipeline settles once the misspelling verdict lands.
        while session.loading() || session.spelling_suggestions().is_none() {
            let completion = completions.recv().await.unwrap();
            driver.execute(session.apply(completion));
        }
        assert_eq!(
            session.spelling_suggestions(),
            Some(&["toothbrush".to_string()][..])
        );
    }
}
