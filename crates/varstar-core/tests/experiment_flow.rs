//! End-to-end flow: load a small survey table from disk, build the dataset,
//! split it, and evaluate densities and distances on training patterns.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ndarray::{Array2, Axis};
use rand::rngs::StdRng;
use rand::SeedableRng;
use varstar_core::config::SplitConfig;
use varstar_core::data_handling::{ClassName, Dataset, Pattern, SubjectId};
use varstar_core::labels::{count_unique_classes, sort_into_maps};
use varstar_core::metrics::{
    distance_matrix, scotts_rule_bandwidth, EuclideanDistance, GaussianKernel, Kernel,
};
use varstar_core::split::StratifiedSplit;

const FEATURE_COUNT: usize = 3;

fn write_survey_csv(path: &Path) -> Result<()> {
    let mut rows = String::from("id,class,amplitude,log_period,skewness\n");
    for (offset, class) in [(0u64, "RRLyr"), (12, "Cepheid"), (24, "EclBin")] {
        for i in 0..12u64 {
            let id = offset + i;
            let x = i as f64 + offset as f64 / 12.0;
            rows.push_str(&format!(
                "{},{},{:.4},{:.4},{:.4}\n",
                id,
                class,
                0.8 + 0.013 * x,
                -0.25 + 0.021 * x,
                0.5 - 0.017 * x
            ));
        }
    }
    fs::write(path, rows).context("writing survey table")?;
    Ok(())
}

fn read_survey_csv(
    path: &Path,
) -> Result<(BTreeMap<SubjectId, ClassName>, BTreeMap<SubjectId, Pattern>)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .context("opening survey table")?;
    let mut labels = BTreeMap::new();
    let mut patterns = BTreeMap::new();
    for record in reader.records() {
        let record = record.context("reading survey row")?;
        let id: SubjectId = record[0].parse().context("parsing subject id")?;
        let class = record[1].to_string();
        let features: Vec<f64> = (2..2 + FEATURE_COUNT)
            .map(|column| record[column].parse::<f64>())
            .collect::<std::result::Result<_, _>>()
            .context("parsing feature columns")?;
        labels.insert(id, class);
        patterns.insert(id, Pattern::from(features));
    }
    Ok((labels, patterns))
}

#[test]
fn full_experiment_flow() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempfile::tempdir()?;
    let table = dir.path().join("survey.csv");
    write_survey_csv(&table)?;
    let (labels, patterns) = read_survey_csv(&table)?;

    assert_eq!(labels.len(), 36);
    let counts = count_unique_classes(&labels);
    assert_eq!(counts.len(), 3);
    assert!(counts.values().all(|&count| count == 12));

    let dataset = Dataset::new("survey.csv fixture", labels.clone())
        .with_view("features", patterns)?;

    // 12 per class at a quarter holdout: 3 test, 9 training, 3 folds of 3
    let config = SplitConfig {
        holdout_fraction: 0.25,
        fold_count: 3,
    };
    let mut rng = StdRng::seed_from_u64(2026);
    let split = StratifiedSplit::new(&labels, &config, &mut rng)?;
    split.log_summary();

    assert_eq!(split.testing().len(), 9);
    assert_eq!(split.training().len(), 27);
    assert_eq!(split.fold_count(), 3);
    for fold in split.folds() {
        assert_eq!(fold.len(), 9);
    }

    // Training matrix for one class via the label-handling path
    let view = dataset.view("features").expect("view attached above");
    let by_class = sort_into_maps(view, dataset.labels())?;
    let training_rows: Vec<&Pattern> = by_class["RRLyr"]
        .iter()
        .filter(|(id, _)| split.training().contains(*id))
        .map(|(_, pattern)| *pattern)
        .collect();
    assert_eq!(training_rows.len(), 9);

    let mut matrix = Array2::<f64>::zeros((training_rows.len(), FEATURE_COUNT));
    for (row, pattern) in training_rows.iter().enumerate() {
        let values = pattern.as_vector().expect("vector patterns");
        for (column, value) in values.iter().enumerate() {
            matrix[[row, column]] = *value;
        }
    }

    // Density of one training subject around the class mean
    let bandwidth = scotts_rule_bandwidth(matrix.view())?;
    let mean = matrix.mean_axis(Axis(0)).expect("non-empty matrix");
    let displacement = &matrix.row(0).to_owned() - &mean;
    let density = GaussianKernel.evaluate(displacement.view(), Some(bandwidth.view()))?;
    assert!(density.is_finite() && density > 0.0);

    // Pairwise distances over the class's training patterns
    let distances = distance_matrix(matrix.view(), &EuclideanDistance)?;
    assert_eq!(distances.nrows(), 9);
    for i in 0..distances.nrows() {
        assert_eq!(distances[[i, i]], 0.0);
        for j in 0..distances.ncols() {
            assert_eq!(distances[[i, j]], distances[[j, i]]);
        }
    }

    Ok(())
}
