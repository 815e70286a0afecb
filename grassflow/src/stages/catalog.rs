//! The fixed Global Mountain Grassland analysis workflow.

use super::{ManualStep, StageGroup, Workflow};

/// Title printed in the run banners.
pub const WORKFLOW_TITLE: &str = "Global Mountain Grassland Analysis Workflow";

/// Where the Earth Engine extraction script has to be run.
pub const EARTH_ENGINE_CONSOLE: &str = "https://code.earthengine.google.com/";

/// Builds the workflow the `run-all` binary executes.
///
/// Group and stage order is significant. The NDVI/climate extraction runs in
/// the Earth Engine code editor and is announced, never launched.
#[must_use]
pub fn grassland_workflow() -> Workflow {
    Workflow::new(WORKFLOW_TITLE)
        .with_group(
            StageGroup::new("Data Preprocessing")
                .with_stage("preprocess-climate-grids", "data_preprocessing/cmip6_preprocess.py")
                .with_stage("interpolate-ghm-index", "data_preprocessing/ghm_interpolation.py")
                .with_manual_step(ManualStep::new(
                    "gee_ndvi_climate_extraction.js",
                    EARTH_ENGINE_CONSOLE,
                )),
        )
        .with_group(
            StageGroup::new("Trend Analysis")
                .with_stage("vegetation-index-trend", "trend_analysis/ndvi_trend_analysis.py")
                .with_stage("human-modification-hotspot", "trend_analysis/ghm_hotspot.py")
                .with_stage("impact-index-compute", "trend_analysis/impact_index.py"),
        )
        .with_group(
            StageGroup::new("Climate Correlation Analysis")
                .with_stage("spearman-correlation", "climate_correlation/spearman_correlation.py"),
        )
        .with_group(
            StageGroup::new("Machine Learning Models")
                .with_stage("train-rf-xgb", "ml_model/train_rf_xgb.py")
                .with_stage("shap-plot", "ml_model/shap_plot.py")
                .with_stage("lstm-model", "ml_model/lstm_model.py"),
        )
        .with_group(
            StageGroup::new("Future Projections and Scenario Analysis")
                .with_stage("kde-ks-analysis", "future_projection/kde_ks_analysis.py")
                .with_stage("delta-lai-map", "future_projection/delta_lai_map.py"),
        )
}
