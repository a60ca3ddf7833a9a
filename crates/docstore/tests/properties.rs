//! Property tests for request construction and response filtering.

use docstore::core::{reconcile, BatchGetEntry};
use docstore::prelude::*;
use docstore_test::{fixtures, MockTransport};
use proptest::prelude::*;

fn path() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("users/alice".to_string()),
        Just("users/bob".to_string()),
        "[a-z]{1,8}/[a-z0-9]{1,8}",
    ]
}

fn entry() -> impl Strategy<Value = BatchGetEntry> {
    (path(), any::<bool>(), 0_i64..3600).prop_map(|(path, found, offset)| {
        let read_time = fixtures::read_time_plus(offset);
        if found {
            fixtures::found(&path, read_time)
        } else {
            fixtures::missing(&path, read_time)
        }
    })
}

proptest! {
    #[test]
    fn prop_one_request_in_add_order(paths in prop::collection::vec(path(), 0..16)) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let mock = MockTransport::with_entries(Vec::new());
        let client = Docstore::with_transport(fixtures::config(), mock.clone());

        let mut batch = client.batch();
        for path in &paths {
            batch.add(path.as_str());
        }
        runtime.block_on(batch.get(None)).unwrap();

        let expected: Vec<String> = paths.iter().map(|p| fixtures::name(p)).collect();
        prop_assert_eq!(mock.request_count(), 1);
        let request = mock.last_request().unwrap();
        prop_assert_eq!(request.route.as_str(), "batchGet");
        prop_assert_eq!(request.documents(), expected);
    }

    #[test]
    fn prop_get_returns_found_entries_in_order(entries in prop::collection::vec(entry(), 0..16)) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let mock = MockTransport::with_entries(entries.clone());
        let client = Docstore::with_transport(fixtures::config(), mock);

        let docs = runtime.block_on(client.batch().get(None)).unwrap();

        prop_assert_eq!(&docs, &reconcile(&entries));
        let expected: Vec<_> = entries
            .iter()
            .filter_map(|entry| match entry {
                BatchGetEntry::Found { document, read_time } => {
                    Some((document.name.clone(), *read_time))
                }
                BatchGetEntry::Missing { .. } => None,
            })
            .collect();
        let actual: Vec<_> = docs
            .iter()
            .map(|doc| (doc.name().to_string(), doc.read_time()))
            .collect();
        prop_assert_eq!(actual, expected);
    }
}
