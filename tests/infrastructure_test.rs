//! Test to verify test infrastructure works correctly

mod common;

use common::builders::TreeBuilder;
use sunburst_rs::Dataset;

#[test]
fn test_infrastructure_setup() {
    let tree = TreeBuilder::new("root").leaf("a", 1.0).leaf("b", 2.0).build();
    assert_eq!(tree.children().len(), 2);
}

#[test]
fn test_sample_data_is_loadable() {
    let dataset = Dataset::load(common::sample_data_path()).unwrap();
    assert_eq!(dataset.root_name(), "flare");
}

#[test]
fn test_float_comparison() {
    common::assert_float_eq(1.0, 1.0000001, 0.001);
}

#[test]
#[should_panic]
fn test_float_comparison_fails() {
    common::assert_float_eq(1.0, 2.0, 0.001);
}
