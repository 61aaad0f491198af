use medi_diagnose::SymptomEncoder;
use proptest::prelude::*;

const VOCAB: [&str; 6] = ["chills", "cough", "fatigue", "fever", "headache", "vomiting"];

fn encoder() -> SymptomEncoder {
    SymptomEncoder::new(VOCAB.iter().map(|s| s.to_string()).collect()).unwrap()
}

fn symptom() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(VOCAB.to_vec()).prop_map(str::to_string),
        "[a-z_]{1,12}",
    ]
}

proptest! {
    #[test]
    fn encoding_ignores_order_and_duplicates(symptoms in prop::collection::vec(symptom(), 0..12)) {
        let enc = encoder();
        let forward = enc.encode(&symptoms);

        let mut reversed = symptoms.clone();
        reversed.reverse();
        prop_assert_eq!(&enc.encode(&reversed), &forward);

        let mut doubled = symptoms.clone();
        doubled.extend(symptoms.iter().cloned());
        prop_assert_eq!(&enc.encode(&doubled), &forward);
    }

    #[test]
    fn encoding_is_binary_and_fixed_width(symptoms in prop::collection::vec(symptom(), 0..12)) {
        let enc = encoder();
        let v = enc.encode(&symptoms);
        prop_assert_eq!(v.len(), VOCAB.len());
        prop_assert!(v.as_slice().iter().all(|x| *x == 0.0 || *x == 1.0));

        let known = VOCAB.iter().filter(|s| symptoms.iter().any(|x| x == *s)).count();
        prop_assert_eq!(v.active(), known);
    }

    #[test]
    fn unknown_never_lists_vocabulary(symptoms in prop::collection::vec(symptom(), 0..12)) {
        let unknown = encoder().unknown(&symptoms);
        prop_assert!(unknown.iter().all(|s| !VOCAB.contains(&s.as_str())));
    }
}
