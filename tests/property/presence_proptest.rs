//! Property-based tests for the presence registry

use std::collections::HashMap;

use proptest::prelude::*;
use uuid::Uuid;

use pulsechat::backend::realtime::PresenceRegistry;

#[derive(Debug, Clone)]
enum Op {
    Connect { user: u8, conn: u8 },
    Disconnect { user: u8, conn: u8 },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..5u8, 0..8u8).prop_map(|(user, conn)| Op::Connect { user, conn }),
        (0..5u8, 0..8u8).prop_map(|(user, conn)| Op::Disconnect { user, conn }),
    ]
}

fn conn_id(n: u8) -> Uuid {
    Uuid::from_u128(n as u128 + 1)
}

proptest! {
    #[test]
    fn test_registry_matches_last_connection_model(ops in prop::collection::vec(op(), 0..64)) {
        let mut registry = PresenceRegistry::new();
        let mut model: HashMap<String, Uuid> = HashMap::new();

        for op in ops {
            match op {
                Op::Connect { user, conn } => {
                    let user = format!("user-{}", user);
                    let previous = registry.add(user.clone(), conn_id(conn));
                    prop_assert_eq!(previous, model.insert(user, conn_id(conn)));
                }
                Op::Disconnect { user, conn } => {
                    let user = format!("user-{}", user);
                    let expected = model.get(&user) == Some(&conn_id(conn));
                    if expected {
                        model.remove(&user);
                    }
                    prop_assert_eq!(registry.remove(&user, conn_id(conn)), expected);
                }
            }
        }

        let mut expected: Vec<String> = model.keys().cloned().collect();
        expected.sort();
        prop_assert_eq!(registry.snapshot(), expected);
        prop_assert_eq!(registry.len(), model.len());
        for (user, conn) in &model {
            prop_assert_eq!(registry.connection_of(user), Some(*conn));
        }
    }

    #[test]
    fn test_snapshot_is_sorted_and_unique(users in prop::collection::vec("[a-z]{1,6}", 0..32)) {
        let mut registry = PresenceRegistry::new();
        for user in &users {
            registry.add(user.clone(), Uuid::new_v4());
        }

        let snapshot = registry.snapshot();
        prop_assert!(snapshot.windows(2).all(|w| w[0] < w[1]));
        for user in &users {
            prop_assert!(snapshot.contains(user));
        }
    }
}
