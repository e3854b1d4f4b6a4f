//! Property-based tests for session tokens

use std::time::Duration;

use proptest::prelude::*;
use uuid::Uuid;

use pulsechat::backend::auth::sessions::TokenIssuer;
use pulsechat::client::token_expiry;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

fn issuer() -> TokenIssuer {
    TokenIssuer::new(b"proptest-secret", Duration::from_secs(3600))
}

proptest! {
    #[test]
    fn test_issued_token_verifies(raw in any::<u128>()) {
        let user_id = Uuid::from_u128(raw);
        let token = issuer().issue(user_id).unwrap();
        prop_assert_eq!(issuer().verify(&token).unwrap(), user_id);
    }

    #[test]
    fn test_client_reads_server_expiry(raw in any::<u128>(), issued_at in 1_000_000u64..4_000_000_000u64) {
        let token = issuer().issue_at(Uuid::from_u128(raw), issued_at).unwrap();
        prop_assert_eq!(token_expiry(&token), Some(issued_at + 3600));
    }

    #[test]
    fn test_mutated_token_is_rejected(index in any::<prop::sample::Index>(), pick in 0..ALPHABET.len()) {
        let token = issuer().issue(Uuid::new_v4()).unwrap();
        let bytes = token.as_bytes();

        // Any character but the separators and the final one (which may
        // carry unused bits)
        let candidates: Vec<usize> = (0..bytes.len() - 1).filter(|&i| bytes[i] != b'.').collect();
        let pos = candidates[index.index(candidates.len())];

        let mut replacement = ALPHABET[pick];
        if replacement == bytes[pos] {
            replacement = ALPHABET[(pick + 1) % ALPHABET.len()];
        }

        let mut mutated = bytes.to_vec();
        mutated[pos] = replacement;
        let mutated = String::from_utf8(mutated).unwrap();

        prop_assert!(issuer().verify(&mutated).is_err());
    }
}
