use std::path::Path;

/// Petal length/width rows taken from the iris data, six per variety.
const ROWS: &[(f32, f32, &str)] = &[
    (1.4, 0.2, "Setosa"),
    (1.3, 0.2, "Setosa"),
    (1.5, 0.2, "Setosa"),
    (1.4, 0.3, "Setosa"),
    (1.7, 0.4, "Setosa"),
    (1.6, 0.2, "Setosa"),
    (4.7, 1.4, "Versicolor"),
    (4.5, 1.5, "Versicolor"),
    (4.9, 1.5, "Versicolor"),
    (4.0, 1.3, "Versicolor"),
    (4.6, 1.5, "Versicolor"),
    (3.3, 1.0, "Versicolor"),
    (6.0, 2.5, "Virginica"),
    (5.1, 1.9, "Virginica"),
    (5.9, 2.1, "Virginica"),
    (5.6, 1.8, "Virginica"),
    (5.8, 2.2, "Virginica"),
    (6.6, 2.1, "Virginica"),
];

pub fn iris_csv() -> String {
    let mut text =
        String::from("\"sepal.length\",\"sepal.width\",\"petal.length\",\"petal.width\",\"variety\"\n");
    for (length, width, variety) in ROWS {
        text.push_str(&format!("5.0,3.0,{length},{width},\"{variety}\"\n"));
    }
    text
}

pub fn write_iris_csv(path: &Path) {
    std::fs::write(path, iris_csv()).expect("write iris fixture");
}

pub fn row_count() -> usize {
    ROWS.len()
}
