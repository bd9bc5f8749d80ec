//! Integration tests for address expansion.
//!
//! These run the expander against a real in-memory contact database and
//! check the expansion properties over generated address lists.

#![allow(clippy::unwrap_used)]

use mailcompose_address::{AddressList, ParseOptions, ParsedAddress};
use mailcompose_core::{
    AddressExpander, Contact, ContactRepository, DirectoryMatch, ExpansionResult,
    MemoryDirectory, NotificationQueue, Severity,
};
use proptest::prelude::*;

async fn contacts(entries: &[(&str, &str)]) -> ContactRepository {
    let repo = ContactRepository::in_memory().await.unwrap();
    for (email, name) in entries {
        repo.record(email, name).await.unwrap();
    }
    repo
}

#[tokio::test]
async fn single_match_completes_trailing_fragment() {
    let repo = contacts(&[("bob@example.com", ""), ("alice@example.com", "")]).await;
    let queue = NotificationQueue::new();
    let expander = AddressExpander::new(&repo, &queue);

    let result = expander.expand("alice@example.com, bo").await.unwrap();
    assert_eq!(
        result,
        ExpansionResult::Resolved("alice@example.com, bob@example.com".into())
    );
    assert!(queue.is_empty());
}

#[tokio::test]
async fn no_match_leaves_fragment_and_warns_once() {
    let repo = contacts(&[("bob@example.com", "")]).await;
    let queue = NotificationQueue::new();
    let expander = AddressExpander::new(&repo, &queue);

    let result = expander.expand("al").await.unwrap();
    assert_eq!(result, ExpansionResult::Unresolved("al".into()));

    let notifications = queue.drain();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].severity, Severity::Warning);
}

#[tokio::test]
async fn several_matches_need_disambiguation() {
    let repo = contacts(&[("john@x.com", ""), ("joe@x.com", "")]).await;
    repo.record("john@x.com", "").await.unwrap();
    let queue = NotificationQueue::new();
    let expander = AddressExpander::new(&repo, &queue);

    let result = expander.expand("jo").await.unwrap();
    assert_eq!(
        result,
        ExpansionResult::Ambiguous {
            prefix: String::new(),
            fragment: "jo".into(),
            candidates: vec![
                DirectoryMatch::new("john", "x.com"),
                DirectoryMatch::new("joe", "x.com"),
            ],
        }
    );
    assert_eq!(queue.drain().len(), 1);
}

#[tokio::test]
async fn underscore_fragment_matches_one_contact() {
    let repo = contacts(&[("john_doe@x.com", ""), ("johnxdoe@x.com", "")]).await;
    let queue = NotificationQueue::new();
    let expander = AddressExpander::new(&repo, &queue);

    let result = expander.expand("john_doe").await.unwrap();
    assert_eq!(result, ExpansionResult::Resolved("john_doe@x.com".into()));
    assert!(queue.is_empty());

    let result = expander.expand("%").await.unwrap();
    assert_eq!(result, ExpansionResult::Unresolved("%".into()));
    assert_eq!(queue.drain().len(), 1);
}

#[tokio::test]
async fn tiny_search_limit_still_reports_ambiguity() {
    let repo = contacts(&[("john@x.com", ""), ("joe@x.com", "")])
        .await
        .with_search_limit(1);
    let queue = NotificationQueue::new();
    let expander = AddressExpander::new(&repo, &queue);

    let result = expander.expand("jo").await.unwrap();
    let ExpansionResult::Ambiguous { candidates, .. } = result else {
        panic!("expected an ambiguous result");
    };
    assert_eq!(candidates.len(), 2);
    assert_eq!(queue.drain().len(), 1);
}

#[tokio::test]
async fn unresolved_keeps_quoted_fragment() {
    let repo = contacts(&[]).await;
    let queue = NotificationQueue::new();
    let expander = AddressExpander::new(&repo, &queue);

    let input = "x@y.com, \"Smith, J\"";
    let result = expander.expand(input).await.unwrap();
    assert_eq!(result, ExpansionResult::Unresolved(input.into()));

    let reparsed = AddressList::parse(result.value().unwrap(), &ParseOptions::default()).unwrap();
    assert_eq!(reparsed.len(), 2);
}

#[tokio::test]
async fn imported_recipients_become_expandable() {
    let repo = contacts(&[]).await;
    let sent = AddressList::parse(
        "\"Doe, Jane\" <jane@example.com>, partial",
        &ParseOptions::default(),
    )
    .unwrap();
    assert_eq!(repo.record_list(&sent).await.unwrap(), 1);

    let queue = NotificationQueue::new();
    let expander = AddressExpander::new(&repo, &queue);
    let result = expander.expand("doe").await.unwrap();
    assert_eq!(
        result.value(),
        Some("\"Doe, Jane\" <jane@example.com>")
    );
}

#[tokio::test]
async fn display_names_survive_expansion() {
    let repo = contacts(&[("jane@example.com", "Doe, Jane")]).await;
    let queue = NotificationQueue::new();
    let expander = AddressExpander::new(&repo, &queue);

    let result = expander
        .expand("Bob <bob@example.com>; jan")
        .await
        .unwrap();
    assert_eq!(
        result.value(),
        Some("Bob <bob@example.com>, \"Doe, Jane\" <jane@example.com>")
    );
}

#[tokio::test]
async fn malformed_input_is_a_parse_error() {
    let repo = contacts(&[]).await;
    let queue = NotificationQueue::new();
    let expander = AddressExpander::new(&repo, &queue);

    let err = expander.expand("Bob <bob@example.com").await.unwrap_err();
    assert!(matches!(err, mailcompose_core::Error::Parse(_)));
    assert!(queue.is_empty());
}

fn complete_address() -> impl Strategy<Value = ParsedAddress> {
    ("[a-z]{1,8}", "[a-z]{1,8}\\.(com|org)")
        .prop_map(|(local, host)| ParsedAddress::new(local, host))
}

fn fragment() -> impl Strategy<Value = ParsedAddress> {
    (
        "[a-z][a-z.,;@<>()\"]{0,5}( [a-z,;]{1,3})?",
        proptest::option::of("[A-Za-z]{1,8}"),
    )
        .prop_map(|(text, personal)| {
            let fragment = ParsedAddress::fragment(text);
            match personal {
                Some(personal) => fragment.with_personal(personal),
                None => fragment,
            }
        })
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn complete_lists_resolve_unchanged(
        addresses in proptest::collection::vec(complete_address(), 1..5)
    ) {
        let input = AddressList::from(addresses).to_string();
        let queue = NotificationQueue::new();
        let expander = AddressExpander::new(MemoryDirectory::default(), &queue);

        let result = runtime().block_on(expander.expand(&input)).unwrap();
        prop_assert_eq!(result, ExpansionResult::Resolved(input));
        prop_assert!(queue.is_empty());
    }

    #[test]
    fn unresolved_returns_list_verbatim(
        preceding in proptest::collection::vec(complete_address(), 0..4),
        last in fragment(),
    ) {
        let mut list = AddressList::from(preceding);
        list.push(last);
        let input = list.to_string();
        let queue = NotificationQueue::new();
        let expander = AddressExpander::new(MemoryDirectory::default(), &queue);

        let result = runtime().block_on(expander.expand(&input)).unwrap();
        prop_assert_eq!(result, ExpansionResult::Unresolved(input));
        prop_assert_eq!(queue.len(), 1);
    }

    #[test]
    fn single_match_keeps_preceding_addresses(
        preceding in proptest::collection::vec(complete_address(), 0..4),
        target in complete_address(),
    ) {
        let mailbox = target.mailbox().unwrap().to_string();
        let email = target.bare_address();
        let directory: MemoryDirectory = std::iter::once(Contact::new(&email, "")).collect();
        let queue = NotificationQueue::new();
        let expander = AddressExpander::new(directory, &queue);

        let prefix = AddressList::from(preceding).to_string();
        let input = if prefix.is_empty() {
            mailbox
        } else {
            format!("{prefix}, {mailbox}")
        };

        let result = runtime().block_on(expander.expand(&input)).unwrap();
        let ExpansionResult::Resolved(value) = result else {
            return Err(TestCaseError::fail("expected a resolved list"));
        };
        prop_assert!(value.starts_with(&prefix));
        prop_assert!(value.ends_with(&email));
    }

    #[test]
    fn ambiguous_result_drops_fragment(
        preceding in proptest::collection::vec(complete_address(), 0..4),
        count in 2usize..6,
    ) {
        let directory: MemoryDirectory = (0..count)
            .map(|i| Contact::new(format!("zz{i}@example.com"), ""))
            .collect();
        let queue = NotificationQueue::new();
        let expander = AddressExpander::new(directory, &queue);

        let list = AddressList::from(preceding);
        let mut input = list.to_string();
        if !input.is_empty() {
            input.push_str(", ");
        }
        input.push_str("zz");

        let result = runtime().block_on(expander.expand(&input)).unwrap();
        let ExpansionResult::Ambiguous { prefix, fragment, candidates } = result else {
            return Err(TestCaseError::fail("expected an ambiguous result"));
        };
        prop_assert_eq!(prefix, list.to_string());
        prop_assert_eq!(fragment, "zz");
        prop_assert_eq!(candidates.len(), count);
        prop_assert_eq!(queue.len(), 1);
    }
}

#[test]
fn parse_options_default_keeps_fragments() {
    let list = AddressList::parse("bo", &ParseOptions::default()).unwrap();
    assert!(!list.last().unwrap().is_complete());
}
