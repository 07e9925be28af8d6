use petalmap::dataset::LabeledPoint;
use petalmap::ml::model_file::RECORD_LEN;
use petalmap::ml::{ModelFileError, RecordError, SoftmaxClassifier};

fn trained_classifier() -> SoftmaxClassifier {
    let points = vec![
        LabeledPoint::new(-0.7, -0.7, 0),
        LabeledPoint::new(0.1, 0.0, 1),
        LabeledPoint::new(0.7, 0.8, 2),
    ];
    let mut classifier = SoftmaxClassifier::new(0.5);
    classifier.randomize_seeded(11);
    for _ in 0..25 {
        classifier.train_epoch(&points);
    }
    classifier
}

#[test]
fn save_then_load_is_bit_identical() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("model.bin");
    let original = trained_classifier();
    original.save(&path).expect("save");

    let bytes = std::fs::read(&path).expect("read back");
    assert_eq!(bytes.len(), RECORD_LEN);

    let mut restored = SoftmaxClassifier::default();
    restored.load(&path).expect("load");
    for (a, b) in original
        .weights()
        .iter()
        .flatten()
        .zip(restored.weights().iter().flatten())
    {
        assert_eq!(a.to_bits(), b.to_bits());
    }
    assert_eq!(restored.learning_rate().to_bits(), 0.5f32.to_bits());
    assert_eq!(restored.epochs_trained(), 25);
    assert_eq!(restored.last_loss().to_bits(), original.last_loss().to_bits());
}

#[test]
fn record_layout_is_little_endian_fields_in_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("model.bin");
    let classifier = trained_classifier();
    classifier.save(&path).expect("save");
    let bytes = std::fs::read(&path).expect("read back");

    let field = |idx: usize| -> [u8; 4] {
        let start = idx * 4;
        [bytes[start], bytes[start + 1], bytes[start + 2], bytes[start + 3]]
    };
    assert_eq!(f32::from_le_bytes(field(0)), classifier.weights()[0][0]);
    assert_eq!(f32::from_le_bytes(field(5)), classifier.weights()[1][2]);
    assert_eq!(f32::from_le_bytes(field(8)), classifier.weights()[2][2]);
    assert_eq!(f32::from_le_bytes(field(9)), 0.5);
    assert_eq!(i32::from_le_bytes(field(10)), 25);
    assert_eq!(f32::from_le_bytes(field(11)), classifier.last_loss());
}

#[test]
fn missing_file_leaves_state_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut classifier = trained_classifier();
    let before = *classifier.state();
    let err = classifier
        .load(&dir.path().join("does-not-exist.bin"))
        .unwrap_err();
    assert!(matches!(err, ModelFileError::Read { .. }));
    assert_eq!(classifier.state(), &before);
}

#[test]
fn truncated_file_leaves_state_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("model.bin");
    trained_classifier().save(&path).expect("save");
    let bytes = std::fs::read(&path).expect("read back");
    std::fs::write(&path, &bytes[..RECORD_LEN - 4]).expect("truncate");

    let mut classifier = SoftmaxClassifier::new(0.25);
    classifier.randomize_seeded(1);
    let before = *classifier.state();
    let err = classifier.load(&path).unwrap_err();
    assert!(matches!(
        err,
        ModelFileError::Invalid {
            source: RecordError::Length { got: 44, expected: 48 },
            ..
        }
    ));
    assert_eq!(classifier.state(), &before);
}

#[test]
fn save_to_unwritable_location_reports_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, b"x").expect("write blocker");
    let err = trained_classifier()
        .save(&blocker.join("model.bin"))
        .unwrap_err();
    assert!(matches!(err, ModelFileError::CreateDir { .. }));
}
