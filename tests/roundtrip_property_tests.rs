use proptest::prelude::*;
use std::collections::BTreeMap;
use stringsheet::{
    GenerateOptions, IdentifierRow, Platform, ResourceFormat, RowRange, TableRecord,
    TranslationRow, TranslationTable, convert_str, generate,
};

fn key_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,15}").expect("valid key regex")
}

/// Includes newlines, double quotes and backslashes, which `.strings` escapes.
fn value_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 _\\-\\.,!\\?\\n\"\\\\]{1,30}")
        .expect("valid value regex")
}

/// string_name -> (english text, optional French cell)
fn dataset_strategy() -> impl Strategy<Value = BTreeMap<String, (String, Option<String>)>> {
    prop::collection::btree_map(
        key_strategy(),
        (value_strategy(), prop::option::of(value_strategy())),
        1..8,
    )
}

fn build_tables(
    values: &BTreeMap<String, (String, Option<String>)>,
) -> (Vec<IdentifierRow>, TranslationTable) {
    // Suffix the English text with its key so source texts never collide.
    let identifiers = values
        .iter()
        .map(|(name, (source, _))| IdentifierRow {
            name: name.clone(),
            source_text: format!("{source} {name}"),
        })
        .collect::<Vec<_>>();
    let rows = values
        .iter()
        .filter_map(|(name, (source, fr))| {
            fr.as_ref().map(|fr| TranslationRow {
                source_text: format!("{source} {name}"),
                translations: vec![Some(fr.clone())],
            })
        })
        .collect();
    (
        identifiers,
        TranslationTable {
            languages: vec!["fr".to_string()],
            rows,
        },
    )
}

fn expected_value(name: &str, source: &str, fr: &Option<String>) -> String {
    match fr {
        Some(fr) if !fr.trim().is_empty() => fr.clone(),
        _ => format!("{source} {name}"),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn android_generate_convert_restores_names_and_values(values in dataset_strategy()) {
        let (identifiers, translations) = build_tables(&values);
        let generated = generate(
            Platform::Android,
            &identifiers,
            &translations,
            RowRange::all(identifiers.len()).unwrap(),
            &GenerateOptions::default(),
        )
        .unwrap();

        let conversion =
            convert_str(generated.get("fr").unwrap(), ResourceFormat::AndroidStrings).unwrap();
        let expected = values
            .iter()
            .map(|(name, (source, fr))| TableRecord::new(name.as_str(), expected_value(name, source, fr)))
            .collect::<Vec<_>>();

        prop_assert_eq!(conversion.records, expected);
        prop_assert!(conversion.line_errors.is_empty());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn ios_generate_convert_restores_source_keys(values in dataset_strategy()) {
        let (identifiers, translations) = build_tables(&values);
        let generated = generate(
            Platform::Ios,
            &identifiers,
            &translations,
            RowRange::all(identifiers.len()).unwrap(),
            &GenerateOptions::default(),
        )
        .unwrap();

        let conversion = convert_str(generated.get("fr").unwrap(), ResourceFormat::Strings).unwrap();
        let expected = values
            .iter()
            .map(|(name, (source, fr))| {
                TableRecord::new(format!("{source} {name}"), expected_value(name, source, fr))
            })
            .collect::<Vec<_>>();

        prop_assert_eq!(&conversion.records, &expected);
        prop_assert!(conversion.is_complete());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn generation_is_deterministic(values in dataset_strategy()) {
        let (identifiers, translations) = build_tables(&values);
        let range = RowRange::all(identifiers.len()).unwrap();
        for platform in [Platform::Android, Platform::Ios] {
            let first = generate(platform, &identifiers, &translations, range, &GenerateOptions::default()).unwrap();
            let second = generate(platform, &identifiers, &translations, range, &GenerateOptions::default()).unwrap();
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn fallback_count_matches_warnings(values in dataset_strategy()) {
        let (identifiers, translations) = build_tables(&values);
        let generated = generate(
            Platform::Android,
            &identifiers,
            &translations,
            RowRange::all(identifiers.len()).unwrap(),
            &GenerateOptions::default(),
        )
        .unwrap();
        prop_assert_eq!(generated.artifacts[0].fallback_count, generated.warnings.len());
    }
}
