//! Path mutator properties checked over every bindable field

use flyer_document::{get, image_ref, set, FieldPath, FlyerDocument};

fn leaves(doc: &FlyerDocument) -> Vec<(FieldPath, String)> {
    doc.fields()
        .into_iter()
        .map(|f| {
            let value = get(doc, &f.path).unwrap().to_string();
            (f.path, value)
        })
        .collect()
}

#[test]
fn test_set_changes_only_target_leaf() {
    let doc = FlyerDocument::default();
    let before = leaves(&doc);

    for (target, _) in &before {
        let next = set(&doc, target, "changed").unwrap();

        for (path, value) in leaves(&next) {
            if &path == target {
                assert_eq!(value, "changed");
            } else {
                let original = &before.iter().find(|(p, _)| p == &path).unwrap().1;
                assert_eq!(&value, original, "{} changed while editing {}", path, target);
            }
        }
    }
}

#[test]
fn test_set_is_idempotent() {
    let doc = FlyerDocument::default();
    let path = FieldPath::parse("footer.whatsapp").unwrap();

    let once = set(&doc, &path, "+212 600 000 000").unwrap();
    let twice = set(&once, &path, "+212 600 000 000").unwrap();

    assert_eq!(once, twice);
}

#[test]
fn test_benefit_edit_keeps_order_and_length() {
    let doc = FlyerDocument::default();
    let path = FieldPath::parse("about.benefits.2").unwrap();

    let next = set(&doc, &path, "Supervision individuelle").unwrap();

    assert_eq!(next.about.benefits.len(), 4);
    assert_eq!(next.about.benefits[0], doc.about.benefits[0]);
    assert_eq!(next.about.benefits[1], doc.about.benefits[1]);
    assert_eq!(next.about.benefits[2], "Supervision individuelle");
    assert_eq!(next.about.benefits[3], doc.about.benefits[3]);
}

#[test]
fn test_round_trip_after_edits() {
    let mut doc = FlyerDocument::default();
    let edits = [
        ("header.titleLine1", "Titre avec \"guillemets\""),
        ("about.description", "Ligne 1\nLigne 2\n\tindentée"),
        ("about.benefits.0", "émoji 🎉"),
        ("trainers.list.2.title", ""),
        ("footer.email", "a@b.c"),
    ];
    for (path, value) in edits {
        doc = set(&doc, &FieldPath::parse(path).unwrap(), value).unwrap();
    }
    let embedded = image_ref::to_data_url("image/png", &[1, 2, 3, 4, 5]);
    doc = set(&doc, &FieldPath::parse("gallery.image2").unwrap(), embedded).unwrap();

    let compact = FlyerDocument::from_json(&doc.to_json().unwrap()).unwrap();
    let pretty = FlyerDocument::from_json(&doc.to_json_pretty().unwrap()).unwrap();

    assert_eq!(compact, doc);
    assert_eq!(pretty, doc);
}

#[test]
fn test_unknown_keys_in_file_are_ignored() {
    let mut value = serde_json::to_value(FlyerDocument::default()).unwrap();
    value["version"] = serde_json::json!(3);
    value["header"]["extra"] = serde_json::json!("ignored");

    let doc = FlyerDocument::from_json(&value.to_string()).unwrap();
    assert_eq!(doc, FlyerDocument::default());
}
