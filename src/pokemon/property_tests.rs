//! Property-Based Tests for lookup and random picking

use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cache;
use crate::error::LookupError;
use crate::pokemon::testing::FakePokeApi;
use crate::pokemon::{draw_id, LookupKey, Resolver};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Canonical numeric strings classify as IDs.
    #[test]
    fn prop_numeric_input_is_id(id in 1u32..=u32::MAX) {
        prop_assert_eq!(LookupKey::parse(&id.to_string()), Ok(LookupKey::Id(id)));
    }

    // Zero-prefixed numerals never pass validation.
    #[test]
    fn prop_leading_zero_rejected(digits in "0[0-9]{0,6}") {
        prop_assert!(matches!(LookupKey::parse(&digits), Err(LookupError::InvalidInput(_))));
    }

    // Whitespace-only input never passes validation.
    #[test]
    fn prop_blank_rejected(blank in "[ \t\r\n]{0,8}") {
        prop_assert!(matches!(LookupKey::parse(&blank), Err(LookupError::InvalidInput(_))));
    }

    // Names are case-folded, so any casing yields the same key.
    #[test]
    fn prop_name_case_insensitive(name in "[a-z][a-z-]{0,15}", mask in any::<u16>()) {
        let mixed: String = name
            .chars()
            .enumerate()
            .map(|(i, c)| if mask & (1 << (i % 16)) != 0 { c.to_ascii_uppercase() } else { c })
            .collect();

        prop_assert_eq!(LookupKey::parse(&mixed), LookupKey::parse(&name));
    }

    // Draws stay inside [1, count] for every count and seed.
    #[test]
    fn prop_draw_in_range(count in 1u32..5000, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..100 {
            let id = draw_id(&mut rng, count);
            prop_assert!(id >= 1 && id <= count);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    // Resolving an ID never touches the species endpoint.
    #[test]
    fn prop_id_resolve_skips_name_lookup(id in 1u32..2000) {
        let api = Arc::new(FakePokeApi::with_pokemon(&[(id, "somemon")]));
        let resolver = Resolver::new(api.clone(), cache::shared(10), Duration::from_secs(60));

        let record = tokio_test::block_on(resolver.resolve(&LookupKey::Id(id))).unwrap();

        prop_assert_eq!(record.id, id);
        prop_assert!(api.calls().iter().all(|p| !p.starts_with("pokemon-species")));
    }

    // A name carrying URL syntax is rejected before any upstream call.
    #[test]
    fn prop_url_syntax_in_name_is_not_found(
        head in "[a-z]{0,6}",
        sep in prop::sample::select(vec!["/", "?", "#", ".", "%", " ", "&"]),
        tail in "[a-z0-9]{0,6}"
    ) {
        let api = Arc::new(FakePokeApi::with_pokemon(&[(25, "pikachu")]));
        let resolver = Resolver::new(api.clone(), cache::shared(10), Duration::from_secs(60));
        let key = LookupKey::Name(format!("{head}{sep}{tail}"));

        let result = tokio_test::block_on(resolver.resolve(&key));

        prop_assert!(matches!(result, Err(LookupError::NotFound(_))));
        prop_assert!(api.calls().is_empty());
    }
}
