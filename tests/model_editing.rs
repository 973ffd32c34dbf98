use approx::assert_relative_eq;
use frame_solver::prelude::*;

fn section() -> Section {
    Section::rectangular(29_000.0, 11_200.0, 6.0, 12.0)
}

/// Two-span continuous beam A-B-C
fn two_span() -> FEModel {
    let mut model = FEModel::new();
    model.add_node("A", Node::new(0.0, 0.0, 0.0)).unwrap();
    model.add_node("B", Node::new(100.0, 0.0, 0.0)).unwrap();
    model.add_node("C", Node::new(200.0, 0.0, 0.0)).unwrap();
    model.add_member("AB", "A", "B", section()).unwrap();
    model.add_member("BC", "B", "C", section()).unwrap();
    model.define_support("A", Support::fixed()).unwrap();
    model.define_support("C", Support::fixed()).unwrap();
    model
        .add_member_dist_load("AB", DistributedLoad::uniform(LoadDirection::Fy, -1.0))
        .unwrap();
    model
        .add_member_dist_load("BC", DistributedLoad::uniform(LoadDirection::Fy, -1.0))
        .unwrap();
    model
}

#[test]
fn edits_invalidate_results() {
    let mut model = two_span();
    model.analyze_linear(&AnalysisOptions::default()).unwrap();
    assert!(model.is_analyzed());
    assert!(model.member_segments("AB").is_ok());

    model.add_node_load("B", NodeLoad::fy(-1.0)).unwrap();
    assert!(!model.is_analyzed());
    assert!(matches!(model.node_displacement("B"), Err(FEAError::NotAnalyzed)));
    assert!(matches!(model.member_segments("AB"), Err(FEAError::NotAnalyzed)));
    assert!(matches!(model.check_statics(), Err(FEAError::NotAnalyzed)));
}

#[test]
fn removing_a_node_cascades_and_model_reanalyzes() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut model = two_span();
    model.remove_node("C").unwrap();

    assert_eq!(model.num_nodes(), 2);
    assert_eq!(model.num_members(), 1);
    assert!(matches!(model.member("BC"), Err(FEAError::MemberNotFound(_))));

    // What is left is a cantilever under a uniform load
    let report = model
        .analyze_linear(&AnalysisOptions::default().with_statics_check())
        .unwrap();
    assert_eq!(report.status, AnalysisStatus::Solved);

    let s = section();
    let tip = model.node_displacement("B").unwrap();
    assert_relative_eq!(
        tip.dy,
        -1.0 * 100.0_f64.powi(4) / (8.0 * s.e * s.iz),
        max_relative = 1e-9
    );
    let base = model.node_reactions("A").unwrap();
    assert_relative_eq!(base.fy, 100.0, epsilon = 1e-9);
    assert_relative_eq!(base.mz, 5000.0, epsilon = 1e-6);
    assert!(report.statics.unwrap().is_balanced(1e-9));
}

#[test]
fn fixed_beam_split_at_midspan() {
    let mut model = two_span();
    model.analyze_linear(&AnalysisOptions::default()).unwrap();

    // A and C are fixed, so B sits at midspan of a 200 in fixed-fixed beam
    let s = section();
    let span = 200.0_f64;
    let b = model.node_displacement("B").unwrap();
    assert_relative_eq!(b.rz, 0.0, epsilon = 1e-12);
    assert_relative_eq!(b.dy, -span.powi(4) / (384.0 * s.e * s.iz), max_relative = 1e-9);

    let left = model.member_segments("AB").unwrap();
    assert_relative_eq!(
        left.moment(MomentDirection::Mz, 0.0).unwrap(),
        -span.powi(2) / 12.0,
        max_relative = 1e-9
    );
    assert_relative_eq!(
        left.moment(MomentDirection::Mz, 100.0).unwrap(),
        span.powi(2) / 24.0,
        max_relative = 1e-9
    );
}

#[test]
fn clearing_loads_leaves_an_unloaded_structure() {
    let mut model = two_span();
    model.add_node_displacement("C", Dof::DY, -0.05).unwrap();
    model.clear_loads();
    model.analyze_linear(&AnalysisOptions::default()).unwrap();

    // Settlement survives clearing loads
    assert_relative_eq!(model.node_displacement("C").unwrap().dy, -0.05);
    let segments = model.member_segments("AB").unwrap();
    assert_relative_eq!(
        segments.shear(ShearDirection::Fy, 10.0).unwrap(),
        segments.shear(ShearDirection::Fy, 90.0).unwrap(),
        max_relative = 1e-9
    );
}

#[test]
fn removed_names_can_be_reused() {
    let mut model = two_span();
    model.remove_member("BC").unwrap();
    model.add_member("BC", "C", "B", section()).unwrap();
    assert_eq!(model.member_names().collect::<Vec<_>>(), vec!["AB", "BC"]);

    assert!(matches!(
        model.add_node("A", Node::new(5.0, 5.0, 5.0)),
        Err(FEAError::DuplicateName(_))
    ));
    assert!(matches!(model.remove_plate("P1"), Err(FEAError::PlateNotFound(_))));
}
