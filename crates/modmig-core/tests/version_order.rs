use modmig_core::Version;
use proptest::prelude::*;

fn v(text: &str) -> Version {
    Version::parse(text).unwrap()
}

#[test]
fn parse_accepts_dotted_numeric_forms() {
    assert_eq!(v("1.4").components(), &[1, 4]);
    assert_eq!(v("0.19.2").components(), &[0, 19, 2]);
    assert_eq!(v("10.0.0.7").components(), &[10, 0, 0, 7]);
}

#[test]
fn parse_rejects_malformed_text() {
    for text in ["", "1", "1.", ".1", "1..2", "a.b", "1.2-rc", " 1.2", "1.2 "] {
        let err = Version::parse(text).unwrap_err();
        assert_eq!(err.info().code, "modmig.version_format", "input: {text:?}");
    }
}

#[test]
fn ordering_is_lexicographic_with_zero_padding() {
    assert!(v("1.4") < v("1.5"));
    assert!(v("1.9") < v("2.0"));
    assert!(v("1.2") < v("1.2.1"));
    assert_eq!(v("1.2"), v("1.2.0"));
    assert_eq!(v("1.2"), v("1.2.0.0"));
    assert!(v("0.10") > v("0.9"));
}

#[test]
fn display_round_trips_verbatim() {
    for text in ["1.4", "0.19.2", "10.0.0.7", "1.2.0"] {
        assert_eq!(v(text).to_string(), text);
    }
}

fn version_strategy() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..1000, 2..6)
}

proptest! {
    #[test]
    fn parse_round_trips(components in version_strategy()) {
        let text = components
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(".");
        let parsed = Version::parse(&text).unwrap();
        prop_assert_eq!(parsed.to_string(), text.clone());
        prop_assert_eq!(Version::parse(&text).unwrap(), parsed);
    }

    #[test]
    fn ordering_is_transitive(
        a in version_strategy(),
        b in version_strategy(),
        c in version_strategy(),
    ) {
        let make = |components: &[u64]| {
            Version::parse(
                &components
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join("."),
            )
            .unwrap()
        };
        let (a, b, c) = (make(&a), make(&b), make(&c));
        if a < b && b < c {
            prop_assert!(a < c);
        }
        if a == b && b == c {
            prop_assert!(a == c);
        }
    }
}
