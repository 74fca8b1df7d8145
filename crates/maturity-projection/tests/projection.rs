use maturity_projection::{
    ellipse::EllipseFit,
    projection::{ProjectionConfig, project},
};
use maturity_table::{columns::ColumnMapping, label::MaturityClass, record::RawRow, table::Table};
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rand_pcg::Pcg32;

fn raw_row(id: &str, label: &str, url: &str, cells: &[(&str, f64)]) -> RawRow {
    let mut row = RawRow::new();
    row.insert("biotoolsID".to_owned(), id.to_owned());
    row.insert("maturity".to_owned(), label.to_owned());
    row.insert("repo_url".to_owned(), url.to_owned());
    for (column, value) in cells {
        row.insert((*column).to_owned(), value.to_string());
    }
    row
}

fn clustered_rows(sizes: [usize; 3], seed: u64) -> Vec<RawRow> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let centers: [(f64, f64, f64); 3] =
        [(5.0, 40.0, 2.0), (300.0, 2000.0, 25.0), (40.0, 600.0, 4.0)];
    let labels = ["emerging", "Mature", " LEGACY "];
    let mut rows = vec![];
    for ((&size, &(stars, commits, contributors)), label) in
        sizes.iter().zip(&centers).zip(labels)
    {
        let stars_dist = Normal::new(stars, stars * 0.2).unwrap();
        let commits_dist = Normal::new(commits, commits * 0.2).unwrap();
        let contributors_dist = Normal::new(contributors, contributors * 0.2).unwrap();
        for i in 0..size {
            // Every fourth record lacks a source link; the projection keeps it.
            let url = if i % 4 == 0 {
                String::new()
            } else {
                format!("https://github.com/{}/{i}", label.trim())
            };
            rows.push(raw_row(
                &format!("{}-{i}", label.trim()),
                label,
                &url,
                &[
                    ("repo.stargazers_count", stars_dist.sample(&mut rng).max(0.0)),
                    ("num_commits", commits_dist.sample(&mut rng).max(0.0)),
                    ("num_contributors", contributors_dist.sample(&mut rng).max(0.0)),
                ],
            ));
        }
    }
    rows.push(raw_row("unlabeled", "", "https://github.com/x/y", &[("num_commits", 9.0)]));
    rows.push(raw_row("other", "retired", "https://github.com/x/z", &[]));
    rows
}

#[test]
fn test_projection_of_clustered_records() {
    let rows = clustered_rows([40, 50, 30], 7);
    let table = Table::normalize(&rows, &ColumnMapping::default());
    let projection = project(&table, &ProjectionConfig::default()).unwrap();

    assert_eq!(projection.points.len(), 120);
    assert!(projection.points.iter().all(|p| p.pc1.is_finite() && p.pc2.is_finite()));

    let [pc1, pc2] = projection.explained_variance_ratio;
    assert!((0.0..=1.0).contains(&pc1));
    assert!((0.0..=1.0).contains(&pc2));
    assert!(pc1 + pc2 <= 1.0 + 1e-12);
    assert!(pc1 >= pc2);
    // Three correlated metrics dominate the variance.
    assert!(pc1 > 0.5, "{pc1}");

    for (class, fit) in projection.ellipses.iter() {
        let EllipseFit::Fitted(ellipse) = fit else {
            panic!("{class}: expected an ellipse, got {fit:?}");
        };
        assert!(ellipse.semi_major >= ellipse.semi_minor);
        assert!(ellipse.semi_minor > 0.0);

        let (sin, cos) = ellipse.angle.sin_cos();
        let points = projection.class_points(class).collect::<Vec<_>>();
        let inside = points
            .iter()
            .filter(|[x, y]| {
                let dx = x - ellipse.center[0];
                let dy = y - ellipse.center[1];
                let u = (dx * cos + dy * sin) / ellipse.semi_major;
                let v = (-dx * sin + dy * cos) / ellipse.semi_minor;
                u * u + v * v <= 1.0
            })
            .count();
        assert!(inside * 10 >= points.len() * 8, "{class}: {inside}/{}", points.len());
    }
}

#[test]
fn test_loadings_are_unit_axes_with_positive_pivot() {
    let rows = clustered_rows([20, 20, 20], 1);
    let table = Table::normalize(&rows, &ColumnMapping::default());
    let projection = project(&table, &ProjectionConfig::default()).unwrap();

    for axis in [
        projection.loadings.iter().map(|l| l.pc1).collect::<Vec<_>>(),
        projection.loadings.iter().map(|l| l.pc2).collect::<Vec<_>>(),
    ] {
        let norm = axis.iter().map(|w| w * w).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
        let pivot = axis
            .iter()
            .copied()
            .reduce(|acc, w| if w.abs() > acc.abs() { w } else { acc })
            .unwrap();
        assert!(pivot > 0.0);
    }
}

#[test]
fn test_small_class_has_no_ellipse() {
    let rows = clustered_rows([2, 10, 10], 5);
    let table = Table::normalize(&rows, &ColumnMapping::default());
    let projection = project(&table, &ProjectionConfig::default()).unwrap();

    assert_eq!(
        projection.ellipses[MaturityClass::Emerging],
        EllipseFit::TooFewPoints {
            count: 2,
            required: 3
        }
    );
    assert!(projection.ellipses[MaturityClass::Mature].is_fitted());
    assert!(projection.ellipses[MaturityClass::Legacy].is_fitted());
}

#[test]
fn test_projection_serializes_ellipse_status() {
    let rows = clustered_rows([2, 10, 10], 5);
    let table = Table::normalize(&rows, &ColumnMapping::default());
    let projection = project(&table, &ProjectionConfig::default()).unwrap();
    let json = serde_json::to_value(&projection).unwrap();

    assert_eq!(json["ellipses"]["Emerging"]["status"], "too_few_points");
    assert_eq!(json["ellipses"]["Mature"]["status"], "fitted");
    assert!(json["ellipses"]["Mature"]["semi_major"].is_number());
    assert_eq!(json["points"].as_array().unwrap().len(), 22);
}
