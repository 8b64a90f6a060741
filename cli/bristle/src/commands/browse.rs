use std::io;

use anyhow::Result;
use bpaf::Bpaf;
use bristle_catalog::Client;
use bristle_core::driver::{SessionDriver, UiEffect};
use bristle_core::filters::FacetDimension;
use bristle_core::session::{Completion, SearchSession};
use bristle_core::sort::SortField;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use indoc::indoc;
use itertools::Itertools;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::instrument;

use crate::utils::display::{DisplayProducts, page_footer, trending_line};
use crate::utils::message;

const BROWSE_HELP: &str = indoc! {"
    Type a search and press enter. Other inputs:

    ?<prefix>       preview autocomplete suggestions for a prefix
    :pick <n>       search the n-th autocomplete suggestion
    :correct <n>    search the n-th spelling correction
    :sort <field>   toggle sorting by price, battery, or waterproof
    :brand [name]   toggle a brand filter, or list the known brands
    :type [name]    toggle a type filter, or list the known types
    :page <n>       jump to a results page
    :all            clear the search and show the whole catalog
    :help           show this help
    :quit           leave the store
"};

/// Browse the catalog interactively
#[derive(Debug, Bpaf, Clone)]
pub struct Browse {}

impl Browse {
    #[instrument(name = "browse", skip_all)]
    pub async fn handle(self, client: Client) -> Result<()> {
        let (driver, mut completions) = SessionDriver::new(client);
        let mut session = SearchSession::new();

        message::plain(BROWSE_HELP);
        apply_effects(driver.execute(session.startup()));

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        // stdin closed
                        break;
                    };
                    match parse_line(&line) {
                        ReplAction::Quit => break,
                        action => dispatch(&driver, &mut session, action),
                    }
                },
                Some(completion) = completions.recv() => {
                    handle_completion(&driver, &mut session, completion);
                },
            }
        }

        Ok(())
    }
}

/// One parsed line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplAction {
    Submit(String),
    Preview(String),
    Pick(usize),
    Correct(usize),
    Sort(SortField),
    Brand(String),
    Type(String),
    ListBrands,
    ListTypes,
    Page(usize),
    ShowAll,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

fn parse_line(line: &str) -> ReplAction {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ReplAction::Empty;
    }
    if let Some(prefix) = trimmed.strip_prefix('?') {
        return ReplAction::Preview(prefix.to_string());
    }
    let Some(command) = trimmed.strip_prefix(':') else {
        return ReplAction::Submit(trimmed.to_string());
    };

    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };

    match (name, rest) {
        ("quit" | "q", _) => ReplAction::Quit,
        ("help" | "h", _) => ReplAction::Help,
        ("all", _) => ReplAction::ShowAll,
        ("pick", n) => n
            .parse()
            .map(ReplAction::Pick)
            .unwrap_or_else(|_| ReplAction::Unknown(trimmed.to_string())),
        ("correct", n) => n
            .parse()
            .map(ReplAction::Correct)
            .unwrap_or_else(|_| ReplAction::Unknown(trimmed.to_string())),
        ("page", n) => n
            .parse()
            .map(ReplAction::Page)
            .unwrap_or_else(|_| ReplAction::Unknown(trimmed.to_string())),
        ("sort", field) => field
            .parse()
            .map(ReplAction::Sort)
            .unwrap_or_else(|_| ReplAction::Unknown(trimmed.to_string())),
        ("brand", "") => ReplAction::ListBrands,
        ("brand", value) => ReplAction::Brand(value.to_string()),
        ("type", "") => ReplAction::ListTypes,
        ("type", value) => ReplAction::Type(value.to_string()),
        _ => ReplAction::Unknown(trimmed.to_string()),
    }
}

fn dispatch(driver: &SessionDriver, session: &mut SearchSession, action: ReplAction) {
    let commands = match action {
        ReplAction::Submit(text) => {
            // Submitting takes focus away from the input.
            let mut commands = session.blur();
            commands.extend(session.submit(text));
            commands
        },
        ReplAction::Preview(prefix) => {
            session.focus();
            session.input_changed(prefix)
        },
        ReplAction::Pick(index) => {
            let picked = index
                .checked_sub(1)
                .and_then(|i| session.suggestions().get(i))
                .cloned();
            let Some(term) = picked else {
                message::warning(format!("no suggestion number {index}"));
                return;
            };
            session.select_suggestion(term)
        },
        ReplAction::Correct(index) => {
            let picked = index
                .checked_sub(1)
                .and_then(|i| session.spelling_suggestions()?.get(i))
                .cloned();
            let Some(term) = picked else {
                message::warning(format!("no spelling correction number {index}"));
                return;
            };
            session.select_correction(term)
        },
        ReplAction::Sort(field) => session.toggle_sort(field),
        ReplAction::Brand(value) => session.toggle_filter(FacetDimension::Brand, value),
        ReplAction::Type(value) => session.toggle_filter(FacetDimension::Type, value),
        ReplAction::ListBrands => {
            render_facet_values("brands", session.known_brands(), |value| {
                session.filters().is_selected(FacetDimension::Brand, value)
            });
            return;
        },
        ReplAction::ListTypes => {
            render_facet_values("types", session.known_types(), |value| {
                session.filters().is_selected(FacetDimension::Type, value)
            });
            return;
        },
        ReplAction::Page(target) => {
            let commands = session.navigate(target);
            if !commands.is_empty() {
                apply_effects(driver.execute(commands));
                render_results(session);
            }
            return;
        },
        ReplAction::ShowAll => session.show_all(),
        ReplAction::Help => {
            message::plain(BROWSE_HELP);
            return;
        },
        ReplAction::Unknown(line) => {
            message::warning(format!("unrecognized input '{line}', try :help"));
            return;
        },
        ReplAction::Empty | ReplAction::Quit => return,
    };
    apply_effects(driver.execute(commands));
}

fn handle_completion(driver: &SessionDriver, session: &mut SearchSession, completion: Completion) {
    let loaded_products = matches!(completion, Completion::ProductsLoaded { .. });
    let loaded_suggestions = matches!(completion, Completion::SuggestionsLoaded { .. });
    let loaded_spelling = matches!(completion, Completion::SpellcheckLoaded { .. });

    apply_effects(driver.execute(session.apply(completion)));

    // A discarded stale fetch leaves the loading flag up, so nothing is
    // rendered until its superseding request resolves.
    if loaded_products && !session.loading() {
        render_results(session);
    }
    if loaded_suggestions && session.suggestions_visible() {
        render_suggestions(session);
    }
    if loaded_spelling {
        render_spelling(session);
    }
}

fn apply_effects(effects: Vec<UiEffect>) {
    for effect in effects {
        match effect {
            UiEffect::ScrollToTop => scroll_to_top(),
        }
    }
}

fn scroll_to_top() {
    // Failing to move the cursor only degrades the view.
    let _ = execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0));
}

fn render_results(session: &SearchSession) {
    if session.products().is_empty() {
        if session.query().is_empty() {
            message::plain("The catalog is empty.");
        } else {
            message::plain(format!("No products matched '{}'", session.query()));
        }
    } else {
        message::plain(DisplayProducts::from(session.visible_products()));
        message::plain(page_footer(session.page_view()));
    }
    if let Some(line) = context_line(session) {
        message::plain(line);
    }
    if !session.top_searches().is_empty() {
        message::plain(trending_line(session.top_searches()));
    }
}

fn render_suggestions(session: &SearchSession) {
    let numbered = session
        .suggestions()
        .iter()
        .enumerate()
        .map(|(i, term)| format!("{}) {term}", i + 1))
        .join("  ");
    message::plain(format!("Suggestions: {numbered}"));
}

fn render_spelling(session: &SearchSession) {
    let Some(suggestions) = session.spelling_suggestions() else {
        return;
    };
    if suggestions.is_empty() {
        return;
    }
    let numbered = suggestions
        .iter()
        .enumerate()
        .map(|(i, term)| format!("{}) {term}", i + 1))
        .join("  ");
    message::plain(format!(
        "No exact match for '{}'. Did you mean: {numbered} (use :correct <n>)",
        session.query()
    ));
}

/// List a facet vocabulary with markers on the selected values.
fn render_facet_values(label: &str, values: &[String], is_selected: impl Fn(&str) -> bool) {
    if values.is_empty() {
        message::plain(format!("No known {label} yet."));
        return;
    }
    let rendered = values
        .iter()
        .map(|value| {
            let marker = if is_selected(value) { "x" } else { " " };
            format!("[{marker}] {value}")
        })
        .join("\n");
    message::plain(rendered);
}

/// Summary of the active query, sort, and filters; [None] for an
/// unfiltered browse.
fn context_line(session: &SearchSession) -> Option<String> {
    let mut parts = Vec::new();

    if !session.query().is_empty() {
        parts.push(format!("query '{}'", session.query()));
    }

    let sort = session.sort();
    if !sort.is_empty() {
        let directives = sort
            .entries()
            .iter()
            .map(|directive| {
                let badge = match sort.priority_badge(directive.field) {
                    Some(badge) => format!(" ({badge})"),
                    None => String::new(),
                };
                format!(
                    "{}{}{badge}",
                    directive.field.as_str(),
                    directive.direction.glyph()
                )
            })
            .join(" ");
        parts.push(format!("sort {directives}"));
    }

    let filters = session.filters();
    if !filters.brands().is_empty() {
        parts.push(format!("brands {}", filters.brands().iter().join(", ")));
    }
    if !filters.types().is_empty() {
        parts.push(format!("types {}", filters.types().iter().join(", ")));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("  |  "))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn bare_lines_are_submissions() {
        assert_eq!(
            parse_line("  oral b  "),
            ReplAction::Submit("oral b".to_string())
        );
    }

    #[test]
    fn question_mark_previews_a_prefix() {
        assert_eq!(parse_line("?or"), ReplAction::Preview("or".to_string()));
        assert_eq!(parse_line("?"), ReplAction::Preview(String::new()));
    }

    #[test]
    fn colon_commands_parse() {
        assert_eq!(parse_line(":pick 2"), ReplAction::Pick(2));
        assert_eq!(parse_line(":correct 1"), ReplAction::Correct(1));
        assert_eq!(parse_line(":sort price"), ReplAction::Sort(SortField::Price));
        assert_eq!(
            parse_line(":brand Oral-B"),
            ReplAction::Brand("Oral-B".to_string())
        );
        assert_eq!(
            parse_line(":type Electric"),
            ReplAction::Type("Electric".to_string())
        );
        assert_eq!(parse_line(":page 3"), ReplAction::Page(3));
        assert_eq!(parse_line(":all"), ReplAction::ShowAll);
        assert_eq!(parse_line(":q"), ReplAction::Quit);
        assert_eq!(parse_line(""), ReplAction::Empty);
    }

    #[test]
    fn bare_facet_commands_list_the_vocabulary() {
        assert_eq!(parse_line(":brand"), ReplAction::ListBrands);
        assert_eq!(parse_line(":type"), ReplAction::ListTypes);
    }

    #[test]
    fn malformed_commands_are_reported_not_submitted() {
        assert_eq!(
            parse_line(":sort sideways"),
            ReplAction::Unknown(":sort sideways".to_string())
        );
        assert_eq!(
            parse_line(":page two"),
            ReplAction::Unknown(":page two".to_string())
        );
        assert_eq!(
            parse_line(":paeg 2"),
            ReplAction::Unknown(":paeg 2".to_string())
        );
    }

    #[test]
    fn context_line_shows_priorities_and_facets() {
        let mut session = SearchSession::new();
        session.toggle_sort(SortField::Price);
        session.toggle_sort(SortField::Price);
        session.toggle_sort(SortField::Battery);
        session.toggle_filter(FacetDimension::Brand, "Oral-B");
        session.submit("sonic");

        assert_eq!(
            context_line(&session).as_deref(),
            Some("query 'sonic'  |  sort price↓ (1) battery↑ (2)  |  brands Oral-B")
        );
    }

    #[test]
    fn default_browse_has_no_context_line() {
        let session = SearchSession::new();
        assert_eq!(context_line(&session), None);
    }
}
