use namebuckets::cli_output::{OutputMode, OutputWriter};
use namebuckets::grouping::{group_by_key, group_by_key_checked};
use namebuckets::input::{self, Separator};
use namebuckets::{group_words, BucketOrder, KeyKind, KeyValue, Overrides, Settings};
use std::io::Write;

#[test]
fn test_sample_names_grouped_by_length() {
    let groups = group_words(input::sample_items(), &Settings::default());

    let rendered = OutputWriter::new(OutputMode::Plain)
        .render_groups(&groups)
        .unwrap();
    assert_eq!(
        rendered,
        "5: roger, betty\n6: rachel, judith\n7: raymond, matthew, melissa, charlie"
    );
}

#[test]
fn test_every_item_lands_in_exactly_one_bucket() {
    let items = input::split_items(
        "the quick brown fox jumps over the lazy dog again and again",
        Separator::Whitespace,
    );

    for kind in KeyKind::ALL {
        let settings = Settings {
            key: kind,
            ..Settings::default()
        };
        let groups = group_words(items.clone(), &settings);

        assert_eq!(groups.item_count(), items.len());
        assert!(groups.iter().all(|b| !b.items.is_empty()));
        for bucket in &groups {
            assert!(bucket.items.iter().all(|i| kind.derive(i) == bucket.key));
        }

        let keys: Vec<&KeyValue> = groups.keys().collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn test_buckets_preserve_encounter_order() {
    let items: Vec<String> = ["b1", "a", "b2", "c", "b3"].iter().map(|s| s.to_string()).collect();
    let groups = group_words(items, &Settings::default());

    assert_eq!(
        groups.get(&KeyValue::Number(2)).unwrap(),
        &["b1".to_string(), "b2".to_string(), "b3".to_string()][..]
    );
    assert_eq!(
        groups.get(&KeyValue::Number(1)).unwrap(),
        &["a".to_string(), "c".to_string()][..]
    );
}

#[test]
fn test_check_and_entry_styles_agree_on_every_key() {
    let names = input::sample_items();
    for kind in KeyKind::ALL {
        let checked = group_by_key_checked(names.clone(), |n| kind.derive(n));
        let by_entry = group_by_key(names.clone(), |n| kind.derive(n));
        assert_eq!(checked, by_entry, "mismatch for {}", kind);
    }
}

#[test]
fn test_parallel_path_matches_sequential_path() {
    let items: Vec<String> = (0..2_000)
        .map(|i| format!("{}{}", "w".repeat(i % 17), i % 3))
        .collect();

    for order in [BucketOrder::Key, BucketOrder::FirstSeen] {
        let sequential = Settings {
            order,
            parallel_threshold: usize::MAX,
            ..Settings::default()
        };
        let parallel = Settings {
            order,
            parallel_threshold: 1,
            ..Settings::default()
        };
        assert_eq!(
            group_words(items.clone(), &sequential),
            group_words(items.clone(), &parallel)
        );
    }
}

#[test]
fn test_config_file_with_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    std::fs::write(
        &config_path,
        r#"{"key": "initial", "order": "first-seen", "separator": "comma"}"#,
    )
    .unwrap();

    let input_path = dir.path().join("names.txt");
    let mut file = std::fs::File::create(&input_path).unwrap();
    write!(file, "Roger, betty,rachel, Bob").unwrap();

    let settings = Settings::load(Some(&config_path)).unwrap().apply(Overrides {
        format: Some(OutputMode::Plain),
        ..Overrides::default()
    });
    let items = input::read_items(&input_path, settings.separator).unwrap();
    let groups = group_words(items, &settings);

    let rendered = OutputWriter::new(settings.output_mode())
        .render_groups(&groups)
        .unwrap();
    assert_eq!(rendered, "r: Roger, rachel\nb: betty, Bob");
}
